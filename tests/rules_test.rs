//! Tests for association rule derivation.

use pate::association_rules::rule_order;
use pate::{
    Apriori, Conviction, FrequentItemsets, ItemSetMiner, MiningError, Rule, RuleGenerator,
    TransactionMatrix,
};

const EPS: f64 = 1e-9;

fn bakery() -> TransactionMatrix {
    TransactionMatrix::from_transactions(vec![
        vec!["Bread", "Milk"],
        vec!["Bread", "Eggs"],
        vec!["Bread", "Milk", "Eggs"],
        vec!["Milk"],
    ])
}

fn find<'a>(
    frequent: &FrequentItemsets,
    rules: &'a [Rule],
    antecedent: &[&str],
    consequent: &[&str],
) -> Option<&'a Rule> {
    rules.iter().find(|r| {
        frequent.names(&r.antecedent) == antecedent && frequent.names(&r.consequent) == consequent
    })
}

#[test]
fn test_bakery_rules_at_half_confidence() {
    let frequent = Apriori::new().mine(&bakery(), 0.5).unwrap();
    let rules = RuleGenerator::new(0.5).unwrap().generate(&frequent).unwrap();

    let bread_milk = find(&frequent, &rules, &["Bread"], &["Milk"]).unwrap();
    assert!((bread_milk.confidence - 2.0 / 3.0).abs() < EPS);
    assert!((bread_milk.support - 0.5).abs() < EPS);

    let eggs_bread = find(&frequent, &rules, &["Eggs"], &["Bread"]).unwrap();
    assert!((eggs_bread.confidence - 1.0).abs() < EPS);
    assert!((eggs_bread.lift - 4.0 / 3.0).abs() < EPS);
    assert_eq!(eggs_bread.conviction, Conviction::Infinite);
    assert!((eggs_bread.leverage - 0.125).abs() < EPS);

    let pos = |r: &Rule| rules.iter().position(|x| x == r).unwrap();
    assert!(pos(eggs_bread) < pos(bread_milk));

    // Every split of both frequent pairs clears 0.5 confidence.
    assert_eq!(rules.len(), 4);
}

#[test]
fn test_rule_order_is_lift_then_confidence_then_antecedent() {
    let frequent = Apriori::new().mine(&bakery(), 0.25).unwrap();
    let rules = RuleGenerator::new(0.0).unwrap().generate(&frequent).unwrap();
    for pair in rules.windows(2) {
        assert_ne!(rule_order(&pair[0], &pair[1]), std::cmp::Ordering::Greater);
    }
    // Two-way splits of three pairs and six splits of the triple.
    assert_eq!(rules.len(), 12);
}

#[test]
fn test_high_confidence_filters_rules() {
    let frequent = Apriori::new().mine(&bakery(), 0.5).unwrap();
    let rules = RuleGenerator::new(0.9).unwrap().generate(&frequent).unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(frequent.names(&rules[0].antecedent), vec!["Eggs"]);
    assert_eq!(frequent.names(&rules[0].consequent), vec!["Bread"]);
}

#[test]
fn test_rules_from_empty_mining_are_empty_not_error() {
    let empty = TransactionMatrix::from_transactions(Vec::<Vec<&str>>::new());
    let frequent = Apriori::new().mine(&empty, 0.5).unwrap();
    let rules = RuleGenerator::new(0.5).unwrap().generate_from(Some(&frequent)).unwrap();
    assert!(rules.is_empty());
}

#[test]
fn test_rules_without_mining_is_distinct_error() {
    let err = RuleGenerator::new(0.5).unwrap().generate_from(None).unwrap_err();
    assert_eq!(err, MiningError::RulesRequestedBeforeMining);
}

#[test]
fn test_single_item_transactions_have_no_rules() {
    let matrix = TransactionMatrix::from_transactions(vec![vec!["A"], vec!["B"], vec!["A"]]);
    let frequent = Apriori::new().mine(&matrix, 0.3).unwrap();
    let rules = RuleGenerator::new(0.0).unwrap().generate(&frequent).unwrap();
    assert!(rules.is_empty());
}

#[test]
fn test_invalid_min_confidence() {
    for bad in [-0.01, 1.01, f64::NAN] {
        assert!(matches!(
            RuleGenerator::new(bad),
            Err(MiningError::InvalidThreshold { name: "min_confidence", .. })
        ));
    }
    assert!(RuleGenerator::new(0.0).is_ok());
    assert!(RuleGenerator::new(1.0).is_ok());
}

#[test]
fn test_finite_conviction() {
    let frequent = Apriori::new().mine(&bakery(), 0.5).unwrap();
    let rules = RuleGenerator::new(0.5).unwrap().generate(&frequent).unwrap();
    let bread_milk = find(&frequent, &rules, &["Bread"], &["Milk"]).unwrap();
    // (1 - 0.75) / (1 - 2/3)
    match bread_milk.conviction {
        Conviction::Finite(v) => assert!((v - 0.75).abs() < EPS),
        Conviction::Infinite => panic!("conviction should be finite"),
    }
}
