//! Property tests for mining and rule derivation.

use proptest::prelude::*;

use pate::item_sets::min_support_count;
use pate::{Apriori, ItemId, ItemSetMiner, Itemset, RuleGenerator, TransactionMatrix};

const ITEMS: [&str; 6] = ["Bread", "Butter", "Cheese", "Eggs", "Milk", "Tea"];

fn baskets() -> impl Strategy<Value = Vec<Vec<&'static str>>> {
    prop::collection::vec(
        prop::collection::vec(prop::sample::select(ITEMS.to_vec()), 1..5),
        0..30,
    )
}

/// Every non-empty subset of the universe with its support count.
fn brute_force(matrix: &TransactionMatrix) -> Vec<(Itemset, u64)> {
    let n = matrix.item_count();
    (1u32..(1 << n))
        .map(|mask| {
            let itemset: Itemset = (0..n as u32)
                .filter(|i| mask & (1 << i) != 0)
                .map(ItemId)
                .collect();
            let count = matrix
                .transactions()
                .iter()
                .filter(|t| itemset.items().iter().all(|id| t.contains(id)))
                .count() as u64;
            (itemset, count)
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_matches_exhaustive_enumeration(data in baskets(), min_support in 0.01f64..=1.0) {
        let matrix = TransactionMatrix::from_transactions(data);
        let frequent = Apriori::new().mine(&matrix, min_support).unwrap();

        if matrix.is_empty() {
            prop_assert!(frequent.is_empty());
        } else {
            let min_count = min_support_count(min_support, matrix.len());
            let mut expected: Vec<(Itemset, u64)> = brute_force(&matrix)
                .into_iter()
                .filter(|(_, count)| *count >= min_count)
                .collect();
            expected.sort();
            let mined: Vec<(Itemset, u64)> = frequent
                .iter()
                .map(|f| (f.itemset.clone(), f.support_count))
                .collect();
            prop_assert_eq!(mined, expected);
        }
    }

    #[test]
    fn prop_threshold_and_downward_closure(data in baskets(), min_support in 0.01f64..=1.0) {
        let matrix = TransactionMatrix::from_transactions(data);
        let frequent = Apriori::new().mine(&matrix, min_support).unwrap();
        let index = frequent.support_index();

        for f in frequent.iter() {
            prop_assert!(f.support >= min_support);
            if f.itemset.len() > 1 {
                for pos in 0..f.itemset.len() {
                    prop_assert!(index.contains(&f.itemset.without(pos)));
                }
            }
        }
    }

    #[test]
    fn prop_rules_are_valid(
        data in baskets(),
        min_support in 0.05f64..=1.0,
        min_confidence in 0.0f64..=1.0,
    ) {
        let matrix = TransactionMatrix::from_transactions(data);
        let frequent = Apriori::new().mine(&matrix, min_support).unwrap();
        let rules = RuleGenerator::new(min_confidence).unwrap().generate(&frequent).unwrap();
        let index = frequent.support_index();

        for rule in &rules {
            prop_assert!(rule.confidence >= min_confidence);
            prop_assert!(rule.antecedent.is_disjoint(&rule.consequent));
            prop_assert!(!rule.antecedent.is_empty() && !rule.consequent.is_empty());
            let union = rule.antecedent.union(&rule.consequent);
            prop_assert_eq!(index.count(&union), Some(rule.support_count));
        }
        for pair in rules.windows(2) {
            prop_assert!(pair[0].lift >= pair[1].lift);
        }
    }

    #[test]
    fn prop_deterministic(data in baskets(), min_support in 0.05f64..=1.0) {
        let matrix = TransactionMatrix::from_transactions(data);
        let generator = RuleGenerator::new(0.3).unwrap();

        let first = Apriori::new().mine(&matrix, min_support).unwrap();
        let second = Apriori::new().mine(&matrix, min_support).unwrap();
        let a: Vec<_> = first.iter().cloned().collect();
        let b: Vec<_> = second.iter().cloned().collect();
        prop_assert_eq!(a, b);

        let rules_a = generator.generate(&first).unwrap();
        let rules_b = generator.generate(&second).unwrap();
        prop_assert_eq!(rules_a, rules_b);
    }
}
