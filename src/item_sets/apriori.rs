use std::time::Instant;

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, info};

use super::itemset::{ItemId, Itemset};
use super::matrix::{Transaction, TransactionMatrix};
use super::support::{FrequentItemset, FrequentItemsets, SupportIndex};
use super::{min_support_count, validate_min_support, ItemSetMiner};
use crate::config::MiningConfig;
use crate::errors::{MiningError, MiningResult};

/// Ceilings against combinatorial blow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MiningLimits {
    /// Stop growing itemsets past this size. `None` = unbounded.
    pub max_itemset_len: Option<usize>,
    /// Maximum number of candidates kept for counting at any one level.
    /// Exceeding it fails the pass with `ResourceLimitExceeded`.
    pub max_candidates: Option<usize>,
}

/// Level-wise Apriori miner.
///
/// Level 1 counts single items. Level k+1 candidates come from a prefix join
/// of the retained level-k itemsets, are pruned by downward closure, and are
/// counted in one scan of the matrix.
#[derive(Debug, Clone)]
pub struct Apriori {
    limits: MiningLimits,
    parallel: bool,
    parallel_min_transactions: usize,
}

impl Default for Apriori {
    fn default() -> Self {
        Self {
            limits: MiningLimits::default(),
            parallel: true,
            parallel_min_transactions: 4096,
        }
    }
}

impl Apriori {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &MiningConfig) -> Self {
        Self {
            limits: config.limits(),
            parallel: config.effective_parallel(),
            parallel_min_transactions: config.effective_parallel_min_transactions(),
        }
    }

    pub fn with_limits(mut self, limits: MiningLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Split counting scans across the rayon pool once the matrix has at
    /// least `min_transactions` rows.
    pub fn with_parallelism(mut self, enabled: bool, min_transactions: usize) -> Self {
        self.parallel = enabled;
        self.parallel_min_transactions = min_transactions;
        self
    }

    pub fn limits(&self) -> MiningLimits {
        self.limits
    }

    fn use_parallel(&self, dataset: &TransactionMatrix) -> bool {
        self.parallel && dataset.len() >= self.parallel_min_transactions.max(1)
    }

    fn count_items(&self, dataset: &TransactionMatrix) -> Vec<u64> {
        let width = dataset.item_count();
        let scan = |rows: &[Transaction]| {
            let mut counts = vec![0u64; width];
            for row in rows {
                for id in row {
                    counts[id.index()] += 1;
                }
            }
            counts
        };
        if self.use_parallel(dataset) {
            dataset
                .transactions()
                .par_chunks(chunk_len(dataset.len()))
                .map(scan)
                .reduce(|| vec![0u64; width], merge_counts)
        } else {
            scan(dataset.transactions())
        }
    }

    fn count_candidates(&self, dataset: &TransactionMatrix, candidates: &[Itemset]) -> Vec<u64> {
        let width = dataset.item_count();
        let len = candidates.first().map_or(0, Itemset::len);
        let scan = |rows: &[Transaction]| {
            let mut counts = vec![0u64; candidates.len()];
            let mut present = vec![false; width];
            for row in rows.iter().filter(|row| row.len() >= len) {
                for id in row {
                    present[id.index()] = true;
                }
                for (count, candidate) in counts.iter_mut().zip(candidates) {
                    if candidate.items().iter().all(|id| present[id.index()]) {
                        *count += 1;
                    }
                }
                for id in row {
                    present[id.index()] = false;
                }
            }
            counts
        };
        if self.use_parallel(dataset) {
            dataset
                .transactions()
                .par_chunks(chunk_len(dataset.len()))
                .map(scan)
                .reduce(|| vec![0u64; candidates.len()], merge_counts)
        } else {
            scan(dataset.transactions())
        }
    }
}

impl ItemSetMiner for Apriori {
    fn mine(
        &self,
        dataset: &TransactionMatrix,
        min_support: f64,
    ) -> MiningResult<FrequentItemsets> {
        validate_min_support(min_support)?;
        let start = Instant::now();
        let total = dataset.len();
        let mut index = SupportIndex::new(total as u64);
        let mut levels: Vec<Vec<FrequentItemset>> = Vec::new();

        if dataset.is_empty() {
            info!(transactions = total, "empty transaction matrix, nothing to mine");
            return Ok(FrequentItemsets::new(
                levels,
                index,
                dataset.shared_items(),
                min_support,
            ));
        }

        let min_count = min_support_count(min_support, total);
        let max_len = self.limits.max_itemset_len.unwrap_or(usize::MAX);
        debug!(
            transactions = total,
            items = dataset.item_count(),
            min_count,
            "mining frequent itemsets"
        );

        let singles: Vec<FrequentItemset> = self
            .count_items(dataset)
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count >= min_count)
            .map(|(i, count)| frequent(Itemset::singleton(ItemId(i as u32)), count, &index))
            .collect();
        debug!(level = 1, retained = singles.len(), "level complete");

        let mut current = singles;
        while !current.is_empty() {
            for f in &current {
                index.record(f.itemset.clone(), f.support_count);
            }
            let level = current.len();
            let next_len = level_len(&current) + 1;
            levels.push(current);
            if next_len > max_len {
                debug!(max_len, "itemset length ceiling reached");
                break;
            }

            let previous = &levels[levels.len() - 1];
            let candidates = generate_candidates(previous, self.limits.max_candidates)?;
            if candidates.is_empty() {
                break;
            }
            let counts = self.count_candidates(dataset, &candidates);
            current = candidates
                .into_iter()
                .zip(counts)
                .filter(|(_, count)| *count >= min_count)
                .map(|(itemset, count)| frequent(itemset, count, &index))
                .collect();
            debug!(
                level = next_len,
                previous = level,
                retained = current.len(),
                "level complete"
            );
        }

        let result = FrequentItemsets::new(levels, index, dataset.shared_items(), min_support);
        info!(
            itemsets = result.len(),
            max_len = result.max_len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "frequent itemset mining complete"
        );
        Ok(result)
    }
}

/// Join level-k itemsets sharing their first k-1 members, then drop every
/// candidate with an infrequent k-subset.
///
/// `level` must be in canonical order; the output then is too, and each
/// candidate appears once.
fn generate_candidates(
    level: &[FrequentItemset],
    max_candidates: Option<usize>,
) -> MiningResult<Vec<Itemset>> {
    let known: FxHashSet<&Itemset> = level.iter().map(|f| &f.itemset).collect();
    let limit = max_candidates.unwrap_or(usize::MAX);
    let mut candidates = Vec::new();
    let mut pruned = 0usize;

    for (i, left) in level.iter().enumerate() {
        let left = left.itemset.items();
        let (prefix, last) = left.split_at(left.len() - 1);
        for right in &level[i + 1..] {
            let right = right.itemset.items();
            if &right[..prefix.len()] != prefix {
                break;
            }
            let mut ids: SmallVec<[ItemId; 4]> = SmallVec::from_slice(left);
            ids.push(right[right.len() - 1]);
            debug_assert!(last[0] < right[right.len() - 1]);
            let candidate = Itemset::from_sorted(ids);

            // Dropping either of the last two members yields `left` or `right`.
            let closed = (0..prefix.len()).all(|pos| known.contains(&candidate.without(pos)));
            if !closed {
                pruned += 1;
                continue;
            }
            candidates.push(candidate);
            if candidates.len() > limit {
                return Err(MiningError::ResourceLimitExceeded {
                    limit: "max_candidates",
                    max: limit,
                    value: candidates.len(),
                });
            }
        }
    }

    debug!(
        generated = candidates.len() + pruned,
        pruned,
        "candidate generation complete"
    );
    Ok(candidates)
}

fn frequent(itemset: Itemset, count: u64, index: &SupportIndex) -> FrequentItemset {
    FrequentItemset {
        itemset,
        support_count: count,
        support: index.to_fraction(count),
    }
}

fn level_len(level: &[FrequentItemset]) -> usize {
    level.first().map_or(0, |f| f.itemset.len())
}

fn merge_counts(mut left: Vec<u64>, right: Vec<u64>) -> Vec<u64> {
    for (l, r) in left.iter_mut().zip(right) {
        *l += r;
    }
    left
}

fn chunk_len(rows: usize) -> usize {
    let workers = rayon::current_num_threads().max(1);
    rows.div_ceil(workers * 4).max(1)
}
