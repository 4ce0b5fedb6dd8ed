//! Pattern Mining tools.
//!
//! Frequent itemsets are mined level by level with [`Apriori`]; the result
//! carries a [`SupportIndex`] that [`RuleGenerator`] turns into scored
//! association rules. [`Analyzer`] wires both stages behind a config.
//!
//! ```no_run
//! use pate::{Analyzer, MiningConfig, TransactionMatrix};
//!
//! let baskets = vec![vec!["Bread", "Milk"], vec!["Bread", "Eggs"], vec!["Milk"]];
//! let matrix = TransactionMatrix::from_transactions(baskets);
//! let mut analyzer = Analyzer::new(&MiningConfig::default()).unwrap();
//! analyzer.mine(&matrix).unwrap();
//! for rule in analyzer.derive_rules().unwrap() {
//!     println!("{:?} -> {:?} lift {:.2}", rule.antecedent, rule.consequent, rule.lift);
//! }
//! ```

pub mod analyzer;
pub mod association_rules;
pub mod config;
pub mod errors;
pub mod item_sets;
pub mod table;
pub mod tracing_setup;

pub use analyzer::{Analyzer, Stage};
pub use association_rules::{Conviction, Rule, RuleGenerator};
pub use config::MiningConfig;
pub use errors::{ConfigError, ErrorCode, MiningError, MiningResult};
pub use item_sets::{
    Apriori, FrequentItemset, FrequentItemsets, ItemId, ItemSetMiner, Itemset, MiningLimits,
    SupportIndex, TransactionMatrix,
};
