use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Position of an item in the sorted item universe of a `TransactionMatrix`.
///
/// Ids are assigned in item order, so comparing ids compares items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A set of distinct items stored as a strictly ascending id sequence.
///
/// Two itemsets with the same members are equal and hash equally no matter
/// how they were built. Ordering is by size, then lexicographic by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Itemset(SmallVec<[ItemId; 4]>);

impl Itemset {
    /// Build the canonical form of `items`: sorted, duplicates removed.
    pub fn new(items: impl IntoIterator<Item = ItemId>) -> Self {
        let mut ids: SmallVec<[ItemId; 4]> = items.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self(ids)
    }

    pub fn singleton(item: ItemId) -> Self {
        let mut ids = SmallVec::new();
        ids.push(item);
        Self(ids)
    }

    /// Caller guarantees `ids` is strictly ascending.
    pub(crate) fn from_sorted(ids: SmallVec<[ItemId; 4]>) -> Self {
        debug_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        Self(ids)
    }

    pub fn items(&self) -> &[ItemId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.0.binary_search(&item).is_ok()
    }

    pub fn is_disjoint(&self, other: &Itemset) -> bool {
        self.0.iter().all(|id| !other.contains(*id))
    }

    pub fn is_subset_of(&self, other: &Itemset) -> bool {
        is_sorted_subset(&self.0, &other.0)
    }

    /// Copy of this itemset without the member at `position`.
    pub fn without(&self, position: usize) -> Itemset {
        let mut ids = self.0.clone();
        ids.remove(position);
        Self(ids)
    }

    /// Members of `self` that are not in `other`.
    pub fn difference(&self, other: &Itemset) -> Itemset {
        Self(self.0.iter().copied().filter(|id| !other.contains(*id)).collect())
    }

    pub fn union(&self, other: &Itemset) -> Itemset {
        Self::new(self.0.iter().chain(other.0.iter()).copied())
    }

    /// Members selected by the set bits of `mask` (bit `i` selects position `i`).
    pub(crate) fn select(&self, mask: u64) -> Itemset {
        Self(
            self.0
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1u64 << i) != 0)
                .map(|(_, id)| *id)
                .collect(),
        )
    }
}

impl Ord for Itemset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.0.as_slice().cmp(other.0.as_slice()))
    }
}

impl PartialOrd for Itemset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromIterator<ItemId> for Itemset {
    fn from_iter<T: IntoIterator<Item = ItemId>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Merge walk over two ascending slices.
pub(crate) fn is_sorted_subset(needle: &[ItemId], haystack: &[ItemId]) -> bool {
    if needle.len() > haystack.len() {
        return false;
    }
    let mut rest = haystack.iter();
    'outer: for id in needle {
        for candidate in rest.by_ref() {
            match candidate.cmp(id) {
                Ordering::Less => continue,
                Ordering::Equal => continue 'outer,
                Ordering::Greater => return false,
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[u32]) -> Itemset {
        Itemset::new(ids.iter().map(|&i| ItemId(i)))
    }

    #[test]
    fn construction_is_canonical() {
        assert_eq!(set(&[3, 1, 2, 1]), set(&[1, 2, 3]));
        assert_eq!(set(&[3, 1, 2]).items(), &[ItemId(1), ItemId(2), ItemId(3)]);
    }

    #[test]
    fn serializes_in_canonical_order() {
        let json = serde_json::to_string(&set(&[3, 1, 1, 2])).unwrap();
        assert_eq!(json, "[1,2,3]");
    }

    #[test]
    fn orders_by_size_then_members() {
        let mut sets = vec![set(&[0, 2]), set(&[5]), set(&[0, 1]), set(&[1])];
        sets.sort();
        assert_eq!(sets, vec![set(&[1]), set(&[5]), set(&[0, 1]), set(&[0, 2])]);
    }

    #[test]
    fn subset_walk() {
        assert!(set(&[1, 3]).is_subset_of(&set(&[0, 1, 2, 3])));
        assert!(!set(&[1, 4]).is_subset_of(&set(&[0, 1, 2, 3])));
        assert!(!set(&[0, 1, 2]).is_subset_of(&set(&[0, 1])));
        assert!(set(&[]).is_subset_of(&set(&[7])));
    }

    #[test]
    fn set_algebra() {
        let a = set(&[1, 2, 5]);
        assert_eq!(a.difference(&set(&[2])), set(&[1, 5]));
        assert_eq!(a.without(0), set(&[2, 5]));
        assert_eq!(a.select(0b101), set(&[1, 5]));
        assert_eq!(set(&[1]).union(&set(&[0, 1])), set(&[0, 1]));
        assert!(a.is_disjoint(&set(&[0, 3])));
        assert!(!a.is_disjoint(&set(&[5])));
    }
}
