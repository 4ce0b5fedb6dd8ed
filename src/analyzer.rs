//! Market basket pipeline: mine, derive rules, query.
//!
//! State moves forward only: `Uninitialized → Mined → RulesDerived`. Mining
//! again replaces the itemsets and discards rules derived from the old ones.

use tracing::{debug, info};

use crate::association_rules::{rules_with_antecedent, Rule, RuleGenerator};
use crate::config::MiningConfig;
use crate::errors::{MiningError, MiningResult};
use crate::item_sets::{
    validate_min_support, Apriori, FrequentItemsets, ItemSetMiner, TransactionMatrix,
};

/// Pipeline stage, as reported by [`Analyzer::stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Uninitialized,
    Mined,
    RulesDerived,
}

pub struct Analyzer {
    miner: Apriori,
    generator: RuleGenerator,
    min_support: f64,
    allow_empty_input: bool,
    frequent: Option<FrequentItemsets>,
    rules_derived: Option<Vec<Rule>>,
}

impl Analyzer {
    /// Thresholds and limits are checked here, before any data is seen.
    pub fn new(config: &MiningConfig) -> MiningResult<Self> {
        let min_support = config.effective_min_support();
        validate_min_support(min_support)?;
        let generator = RuleGenerator::new(config.effective_min_confidence())?;
        config.validate()?;
        Ok(Self {
            miner: Apriori::from_config(config),
            generator,
            min_support,
            allow_empty_input: config.effective_allow_empty_input(),
            frequent: None,
            rules_derived: None,
        })
    }

    pub fn stage(&self) -> Stage {
        match (&self.frequent, &self.rules_derived) {
            (None, _) => Stage::Uninitialized,
            (Some(_), None) => Stage::Mined,
            (Some(_), Some(_)) => Stage::RulesDerived,
        }
    }

    /// Mine `matrix`, replacing any earlier result and dropping its rules.
    pub fn mine(&mut self, matrix: &TransactionMatrix) -> MiningResult<&FrequentItemsets> {
        if matrix.is_empty() && !self.allow_empty_input {
            return Err(MiningError::EmptyInput);
        }
        if self.stage() != Stage::Uninitialized {
            debug!("re-mining, previous itemsets and rules discarded");
        }
        info!(
            transactions = matrix.len(),
            items = matrix.item_count(),
            min_support = self.min_support,
            "generating frequent itemsets"
        );
        let frequent = self.miner.mine(matrix, self.min_support)?;
        self.rules_derived = None;
        Ok(&*self.frequent.insert(frequent))
    }

    /// Derive rules from the mined itemsets. Calling it again re-derives.
    pub fn derive_rules(&mut self) -> MiningResult<&[Rule]> {
        let frequent = self
            .frequent
            .as_ref()
            .ok_or(MiningError::RulesRequestedBeforeMining)?;
        let rules = self.generator.generate(frequent)?;
        Ok(self.rules_derived.insert(rules).as_slice())
    }

    pub fn frequent_itemsets(&self) -> Option<&FrequentItemsets> {
        self.frequent.as_ref()
    }

    /// Derived rules, ordered by lift.
    ///
    /// Fails with `RulesRequestedBeforeMining` before any mining pass and with
    /// `RulesNotDerived` when itemsets are mined but rules were not derived.
    pub fn rules(&self) -> MiningResult<&[Rule]> {
        match (&self.frequent, &self.rules_derived) {
            (_, Some(rules)) => Ok(rules.as_slice()),
            (None, None) => Err(MiningError::RulesRequestedBeforeMining),
            (Some(_), None) => Err(MiningError::RulesNotDerived),
        }
    }

    /// The first `n` rules by lift.
    pub fn top_rules(&self, n: usize) -> MiningResult<&[Rule]> {
        let rules = self.rules()?;
        Ok(&rules[..n.min(rules.len())])
    }

    /// Rules whose antecedent contains `item`, most confident first.
    pub fn recommendations(&self, item: &str) -> MiningResult<Vec<&Rule>> {
        let rules = self.rules()?;
        let id = self
            .frequent
            .as_ref()
            .and_then(|frequent| frequent.item_id(item))
            .ok_or_else(|| MiningError::UnknownItem(item.to_string()))?;
        Ok(rules_with_antecedent(rules, id))
    }
}
