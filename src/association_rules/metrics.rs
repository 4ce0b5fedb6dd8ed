//! Rule interest measures.
//!
//! All inputs are support counts over `total` transactions. Counts are kept
//! integral until the final division, so symmetric rules (A→B, B→A) get
//! bit-identical lift and leverage.

use std::fmt;

use serde::{Serialize, Serializer};

/// Conviction of a rule. Unbounded when confidence is exactly 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conviction {
    Finite(f64),
    Infinite,
}

impl Conviction {
    /// The finite value, or `f64::INFINITY`.
    pub fn value(self) -> f64 {
        match self {
            Self::Finite(v) => v,
            Self::Infinite => f64::INFINITY,
        }
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, Self::Infinite)
    }
}

impl fmt::Display for Conviction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(v) => write!(f, "{v:.4}"),
            Self::Infinite => f.write_str("inf"),
        }
    }
}

/// JSON has no infinity; an unbounded conviction serializes as `null`.
impl Serialize for Conviction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Finite(v) => serializer.serialize_some(v),
            Self::Infinite => serializer.serialize_none(),
        }
    }
}

/// `support(A ∪ C) / support(A)`.
pub fn confidence(union_count: u64, antecedent_count: u64) -> f64 {
    union_count as f64 / antecedent_count as f64
}

/// `confidence / support_fraction(C)`, computed as `n·|A∪C| / (|A|·|C|)`.
pub fn lift(union_count: u64, antecedent_count: u64, consequent_count: u64, total: u64) -> f64 {
    (union_count as f64 * total as f64) / (antecedent_count as f64 * consequent_count as f64)
}

/// `support(A ∪ C) − support(A)·support(C)`, as fractions.
pub fn leverage(union_count: u64, antecedent_count: u64, consequent_count: u64, total: u64) -> f64 {
    let n = total as f64;
    let expected = (antecedent_count as f64 * consequent_count as f64) / (n * n);
    union_count as f64 / n - expected
}

/// `(1 − support(C)) / (1 − confidence)`; `Infinite` at confidence 1.
pub fn conviction(confidence: f64, consequent_support: f64) -> Conviction {
    if confidence >= 1.0 {
        Conviction::Infinite
    } else {
        Conviction::Finite((1.0 - consequent_support) / (1.0 - confidence))
    }
}
