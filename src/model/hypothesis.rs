//! Hypothesis: one candidate translation with its quality score.

use std::cmp::Ordering;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A ranked list of hypotheses. Four fit inline, which covers the
/// default request size.
pub type Hypotheses = SmallVec<[Hypothesis; 4]>;

/// A candidate translation.
///
/// Scores are log-likelihood-like: higher is better, and scores of chained
/// translations are summed. Edges without a native scorer (identity, remote,
/// few-shot) report `0.0`, which acts as the neutral element of that sum.
/// Mixing such edges with beam-scored edges is an accepted approximation:
/// the sum still ranks the scored half of the chain correctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub value: String,
    pub score: f32,
}

impl Hypothesis {
    pub fn new(value: impl Into<String>, score: f32) -> Self {
        Self { value: value.into(), score }
    }

    /// Total order by score only, per `f32::total_cmp`: positive NaN sorts
    /// above every other value and negative NaN below.
    pub fn cmp_score(&self, other: &Self) -> Ordering {
        self.score.total_cmp(&other.score)
    }

    /// `n` copies of the same hypothesis, for backends that only ever
    /// produce a single result.
    pub fn repeated(value: impl Into<String>, score: f32, n: usize) -> Hypotheses {
        smallvec::smallvec![Hypothesis::new(value, score); n]
    }
}

impl std::fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {})", self.value, self.score)
    }
}

/// Sort best-first. The sort is stable, so equal scores keep the order in
/// which they were produced.
pub fn sort_best_first(hypotheses: &mut [Hypothesis]) {
    hypotheses.sort_by(|a, b| b.cmp_score(a));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_best_first_is_stable() {
        let mut hs = vec![
            Hypothesis::new("a", -1.0),
            Hypothesis::new("b", -0.5),
            Hypothesis::new("c", -1.0),
            Hypothesis::new("d", 0.0),
        ];
        sort_best_first(&mut hs);
        let order: Vec<&str> = hs.iter().map(|h| h.value.as_str()).collect();
        assert_eq!(order, vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_nan_sign_decides_its_place() {
        let mut hs = vec![
            Hypothesis::new("low", -f32::NAN),
            Hypothesis::new("mid", -2.0),
            Hypothesis::new("high", f32::NAN),
        ];
        sort_best_first(&mut hs);
        let order: Vec<&str> = hs.iter().map(|h| h.value.as_str()).collect();
        assert_eq!(order, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_repeated() {
        let hs = Hypothesis::repeated("hola", 0.0, 3);
        assert_eq!(hs.len(), 3);
        assert!(hs.iter().all(|h| h.value == "hola" && h.score == 0.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Hypothesis::new("hi", -1.5).to_string(), "(\"hi\", -1.5)");
    }
}
