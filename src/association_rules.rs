//! Association rules derived from frequent itemsets.

pub mod metrics;

pub use metrics::Conviction;

use std::cmp::Ordering;

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::{MiningError, MiningResult};
use crate::item_sets::{FrequentItemsets, ItemId, Itemset, SupportIndex};

/// A scored rule `antecedent → consequent`.
///
/// The two sides are disjoint and their union is a frequent itemset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    /// Support fraction of `antecedent ∪ consequent`.
    pub support: f64,
    pub support_count: u64,
    pub antecedent_support: f64,
    pub consequent_support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub leverage: f64,
    pub conviction: Conviction,
}

/// Enumerates antecedent/consequent splits of frequent itemsets and keeps the
/// splits whose confidence reaches `min_confidence`.
#[derive(Debug, Clone, Copy)]
pub struct RuleGenerator {
    min_confidence: f64,
}

impl RuleGenerator {
    /// `min_confidence` must be in `[0, 1]`.
    pub fn new(min_confidence: f64) -> MiningResult<Self> {
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(MiningError::InvalidThreshold {
                name: "min_confidence",
                value: min_confidence,
                range: "[0, 1]",
            });
        }
        Ok(Self { min_confidence })
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// Like [`generate`](Self::generate), for callers that may not have mined yet.
    ///
    /// `None` fails with `RulesRequestedBeforeMining`; an empty mining result
    /// yields an empty rule list.
    pub fn generate_from(&self, frequent: Option<&FrequentItemsets>) -> MiningResult<Vec<Rule>> {
        match frequent {
            Some(frequent) => self.generate(frequent),
            None => Err(MiningError::RulesRequestedBeforeMining),
        }
    }

    /// Every rule meeting the confidence threshold, ordered by lift descending,
    /// then confidence descending, then antecedent and consequent ascending.
    pub fn generate(&self, frequent: &FrequentItemsets) -> MiningResult<Vec<Rule>> {
        let index = frequent.support_index();
        let mut rules = Vec::new();
        let mut considered = 0usize;

        for level in frequent.levels().iter().skip(1) {
            for f in level {
                let len = f.itemset.len();
                if len >= u64::BITS as usize {
                    return Err(MiningError::ResourceLimitExceeded {
                        limit: "rule_itemset_len",
                        max: u64::BITS as usize - 1,
                        value: len,
                    });
                }
                let full = (1u64 << len) - 1;
                for mask in 1..full {
                    considered += 1;
                    let antecedent = f.itemset.select(mask);
                    let consequent = f.itemset.select(full & !mask);
                    if let Some(rule) =
                        self.score(index, &f.itemset, f.support_count, antecedent, consequent)
                    {
                        rules.push(rule);
                    }
                }
            }
        }

        rules.sort_by(rule_order);
        debug!(considered, "rule candidates scored");
        info!(
            rules = rules.len(),
            min_confidence = self.min_confidence,
            "association rules derived"
        );
        Ok(rules)
    }

    fn score(
        &self,
        index: &SupportIndex,
        union: &Itemset,
        union_count: u64,
        antecedent: Itemset,
        consequent: Itemset,
    ) -> Option<Rule> {
        // Both sides are subsets of a frequent itemset, so downward closure
        // puts them in the index.
        let antecedent_count = index.count(&antecedent)?;
        let consequent_count = index.count(&consequent)?;
        debug_assert!(
            antecedent.is_disjoint(&consequent) && antecedent.union(&consequent) == *union
        );

        let confidence = metrics::confidence(union_count, antecedent_count);
        if confidence < self.min_confidence {
            return None;
        }
        let total = index.transaction_count();
        let consequent_support = index.to_fraction(consequent_count);
        Some(Rule {
            support: index.to_fraction(union_count),
            support_count: union_count,
            antecedent_support: index.to_fraction(antecedent_count),
            consequent_support,
            confidence,
            lift: metrics::lift(union_count, antecedent_count, consequent_count, total),
            leverage: metrics::leverage(union_count, antecedent_count, consequent_count, total),
            conviction: metrics::conviction(confidence, consequent_support),
            antecedent,
            consequent,
        })
    }
}

/// Lift desc, confidence desc, antecedent asc, consequent asc.
pub fn rule_order(a: &Rule, b: &Rule) -> Ordering {
    b.lift
        .total_cmp(&a.lift)
        .then_with(|| b.confidence.total_cmp(&a.confidence))
        .then_with(|| a.antecedent.cmp(&b.antecedent))
        .then_with(|| a.consequent.cmp(&b.consequent))
}

/// Rules whose antecedent contains `item`, by confidence descending.
///
/// Rules with equal confidence keep their relative order from `rules`.
pub fn rules_with_antecedent<'a>(rules: &'a [Rule], item: ItemId) -> Vec<&'a Rule> {
    let mut matching: Vec<&Rule> = rules
        .iter()
        .filter(|rule| rule.antecedent.contains(item))
        .collect();
    matching.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    matching
}
