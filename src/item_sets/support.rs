use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::itemset::{ItemId, Itemset};
use super::matrix::Item;

/// An itemset that met the support threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequentItemset {
    pub itemset: Itemset,
    /// Number of transactions containing the itemset.
    pub support_count: u64,
    /// `support_count / total transactions`.
    pub support: f64,
}

/// Support count of every itemset retained by a mining pass, at any level.
///
/// Filled while mining, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SupportIndex {
    counts: FxHashMap<Itemset, u64>,
    transaction_count: u64,
}

impl SupportIndex {
    pub(crate) fn new(transaction_count: u64) -> Self {
        Self {
            counts: FxHashMap::default(),
            transaction_count,
        }
    }

    pub(crate) fn record(&mut self, itemset: Itemset, count: u64) {
        self.counts.insert(itemset, count);
    }

    pub fn count(&self, itemset: &Itemset) -> Option<u64> {
        self.counts.get(itemset).copied()
    }

    pub fn fraction(&self, itemset: &Itemset) -> Option<f64> {
        self.count(itemset).map(|c| self.to_fraction(c))
    }

    pub fn contains(&self, itemset: &Itemset) -> bool {
        self.counts.contains_key(itemset)
    }

    pub fn transaction_count(&self) -> u64 {
        self.transaction_count
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub(crate) fn to_fraction(&self, count: u64) -> f64 {
        if self.transaction_count == 0 {
            0.0
        } else {
            count as f64 / self.transaction_count as f64
        }
    }
}

/// Output of one mining pass: retained itemsets grouped by size, plus their
/// support index.
///
/// `levels[k - 1]` holds the itemsets of size `k` in canonical order.
#[derive(Debug, Clone)]
pub struct FrequentItemsets {
    levels: Vec<Vec<FrequentItemset>>,
    index: SupportIndex,
    items: Arc<[Item]>,
    min_support: f64,
}

impl FrequentItemsets {
    pub(crate) fn new(
        levels: Vec<Vec<FrequentItemset>>,
        index: SupportIndex,
        items: Arc<[Item]>,
        min_support: f64,
    ) -> Self {
        Self {
            levels,
            index,
            items,
            min_support,
        }
    }

    pub fn levels(&self) -> &[Vec<FrequentItemset>] {
        &self.levels
    }

    /// Itemsets of size `len`; empty when none were retained at that size.
    pub fn level(&self, len: usize) -> &[FrequentItemset] {
        len.checked_sub(1)
            .and_then(|i| self.levels.get(i))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All itemsets, ascending size then canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &FrequentItemset> {
        self.levels.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the largest retained itemset (0 when nothing was retained).
    pub fn max_len(&self) -> usize {
        self.levels.len()
    }

    pub fn support_index(&self) -> &SupportIndex {
        &self.index
    }

    pub fn transaction_count(&self) -> u64 {
        self.index.transaction_count()
    }

    pub fn min_support(&self) -> f64 {
        self.min_support
    }

    pub fn item_name(&self, id: ItemId) -> Option<&str> {
        self.items.get(id.index()).map(String::as_str)
    }

    pub fn item_id(&self, item: &str) -> Option<ItemId> {
        self.items
            .binary_search_by(|probe| probe.as_str().cmp(item))
            .ok()
            .map(|i| ItemId(i as u32))
    }

    /// Item names of `itemset`, in canonical order.
    pub fn names(&self, itemset: &Itemset) -> Vec<&str> {
        itemset
            .items()
            .iter()
            .filter_map(|id| self.item_name(*id))
            .collect()
    }
}
