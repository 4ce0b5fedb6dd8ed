//! Tabular views of mining output for exporters and plotters.

use serde::Serialize;

use crate::association_rules::Rule;
use crate::item_sets::{FrequentItemsets, Itemset};

/// One row of the frequent-itemset table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemsetRow {
    pub itemsets: Vec<String>,
    pub support: f64,
}

/// One row of the rule table. `conviction` is `None` when unbounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleRow {
    pub antecedents: Vec<String>,
    pub consequents: Vec<String>,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub leverage: f64,
    pub conviction: Option<f64>,
}

/// Rows in mining order: ascending size, then canonical order.
pub fn itemset_table(frequent: &FrequentItemsets) -> Vec<ItemsetRow> {
    frequent
        .iter()
        .map(|f| ItemsetRow {
            itemsets: owned_names(frequent, &f.itemset),
            support: f.support,
        })
        .collect()
}

/// Rows in the order of `rules`. Item names resolve through `frequent`.
pub fn rule_table(frequent: &FrequentItemsets, rules: &[Rule]) -> Vec<RuleRow> {
    rules
        .iter()
        .map(|rule| RuleRow {
            antecedents: owned_names(frequent, &rule.antecedent),
            consequents: owned_names(frequent, &rule.consequent),
            support: rule.support,
            confidence: rule.confidence,
            lift: rule.lift,
            leverage: rule.leverage,
            conviction: (!rule.conviction.is_infinite()).then(|| rule.conviction.value()),
        })
        .collect()
}

pub fn to_json<T: Serialize>(rows: &[T]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}

fn owned_names(frequent: &FrequentItemsets, itemset: &Itemset) -> Vec<String> {
    frequent
        .names(itemset)
        .into_iter()
        .map(str::to_string)
        .collect()
}
