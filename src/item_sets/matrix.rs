use std::collections::BTreeSet;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::itemset::ItemId;
use crate::errors::{MiningError, MiningResult};

/// Item identifier as supplied by the caller (a product name, a SKU...).
pub type Item = String;

/// One basket: distinct item ids in ascending order.
pub type Transaction = Vec<ItemId>;

/// Immutable set of transactions over a sorted item universe.
///
/// The universe is exactly the union of items that occur in some
/// transaction. Ids index into it, so id order equals item order.
#[derive(Debug, Clone)]
pub struct TransactionMatrix {
    items: Arc<[Item]>,
    lookup: FxHashMap<Item, ItemId>,
    transactions: Vec<Transaction>,
}

impl Default for TransactionMatrix {
    fn default() -> Self {
        Self {
            items: Arc::from(Vec::new()),
            lookup: FxHashMap::default(),
            transactions: Vec::new(),
        }
    }
}

impl TransactionMatrix {
    /// Build from item lists. Repeated items inside one transaction collapse.
    pub fn from_transactions<I, T, S>(transactions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw: Vec<Vec<String>> = transactions
            .into_iter()
            .map(|t| t.into_iter().map(|s| s.as_ref().to_string()).collect())
            .collect();

        let universe: BTreeSet<&str> = raw.iter().flatten().map(String::as_str).collect();
        let items: Arc<[Item]> = universe.iter().map(|s| s.to_string()).collect();
        let lookup: FxHashMap<Item, ItemId> = items
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), ItemId(i as u32)))
            .collect();

        let transactions = raw
            .iter()
            .map(|row| {
                let mut ids: Transaction = row.iter().map(|name| lookup[name.as_str()]).collect();
                ids.sort_unstable();
                ids.dedup();
                ids
            })
            .collect();

        Self {
            items,
            lookup,
            transactions,
        }
    }

    /// Build from a one-hot table: `columns` names the items, each row marks
    /// which of them are present.
    ///
    /// Columns that are never set do not enter the universe.
    pub fn from_boolean_table<S: AsRef<str>>(
        columns: &[S],
        rows: &[Vec<bool>],
    ) -> MiningResult<Self> {
        let mut baskets = Vec::with_capacity(rows.len());
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != columns.len() {
                return Err(MiningError::RaggedRow {
                    row,
                    expected: columns.len(),
                    found: cells.len(),
                });
            }
            let basket: Vec<&str> = cells
                .iter()
                .zip(columns)
                .filter(|(present, _)| **present)
                .map(|(_, name)| name.as_ref())
                .collect();
            baskets.push(basket);
        }
        Ok(Self::from_transactions(baskets))
    }

    /// Number of transactions (rows).
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// True when there are no transactions or no items.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() || self.items.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// The sorted item universe.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub(crate) fn shared_items(&self) -> Arc<[Item]> {
        Arc::clone(&self.items)
    }

    pub fn item(&self, id: ItemId) -> Option<&str> {
        self.items.get(id.index()).map(String::as_str)
    }

    pub fn id_of(&self, item: &str) -> Option<ItemId> {
        self.lookup.get(item).copied()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Occurrence count of every item, most frequent first (ties by item order).
    pub fn item_frequencies(&self) -> Vec<(&str, usize)> {
        let mut counts = vec![0usize; self.items.len()];
        for transaction in &self.transactions {
            for id in transaction {
                counts[id.index()] += 1;
            }
        }
        let mut frequencies: Vec<(&str, usize)> = self
            .items
            .iter()
            .map(String::as_str)
            .zip(counts)
            .collect();
        frequencies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        frequencies
    }
}
