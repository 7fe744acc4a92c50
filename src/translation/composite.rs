//! Composite edge: two edges chained through a pivot language.
//!
//! Every intermediate hypothesis is translated again and the N×N
//! combinations are re-ranked by summed score, so a weaker intermediate can
//! still win if it leads to a much better final translation. Cost is
//! O(N) calls to `second` per call, i.e. O(N^(k+1)) backend calls for a
//! chain of k hops. N is small (default 4) and chains are short.

use crate::model::{Hypotheses, Hypothesis, LanguageRef, sort_best_first};
use crate::{Error, Result};
use super::{describe, Translation, TranslationKind, TranslationRef};

/// `first` then `second`, where `first.to_lang() == second.from_lang()`.
pub struct CompositeTranslation {
    first: TranslationRef,
    second: TranslationRef,
}

impl CompositeTranslation {
    pub fn new(first: TranslationRef, second: TranslationRef) -> Result<Self> {
        if first.to_lang() != second.from_lang() {
            return Err(Error::InvalidArgument(format!(
                "cannot chain {} with {}",
                describe(first.as_ref()),
                describe(second.as_ref())
            )));
        }
        Ok(Self::chain(first, second))
    }

    /// Chain two edges whose pivot is already known to match.
    pub(crate) fn chain(first: TranslationRef, second: TranslationRef) -> Self {
        debug_assert!(first.to_lang() == second.from_lang());
        Self { first, second }
    }

    pub fn first(&self) -> &TranslationRef { &self.first }
    pub fn second(&self) -> &TranslationRef { &self.second }

    /// Pivot language between the two halves.
    pub fn pivot(&self) -> &LanguageRef {
        self.first.to_lang()
    }
}

impl Translation for CompositeTranslation {
    fn from_lang(&self) -> &LanguageRef { self.first.from_lang() }
    fn to_lang(&self) -> &LanguageRef { self.second.to_lang() }
    fn kind(&self) -> TranslationKind { TranslationKind::Composite }

    fn generate(&self, input_text: &str, num_hypotheses: usize) -> Result<Hypotheses> {
        let intermediate = self.first.hypotheses(input_text, num_hypotheses)?;

        let mut combined: Vec<Hypothesis> = Vec::with_capacity(num_hypotheses * num_hypotheses);
        for step in &intermediate {
            for last in self.second.hypotheses(&step.value, num_hypotheses)? {
                combined.push(Hypothesis::new(last.value, step.score + last.score));
            }
        }
        if combined.len() < num_hypotheses {
            return Err(Error::BackendUnavailable(format!(
                "{} produced {} of {num_hypotheses} hypotheses",
                describe(self),
                combined.len()
            )));
        }

        sort_best_first(&mut combined);
        combined.truncate(num_hypotheses);
        Ok(combined.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::translation::IdentityTranslation;

    /// Tags the input with the target code and slot index.
    struct Fixed {
        from: LanguageRef,
        to: LanguageRef,
        scores: Vec<f32>,
    }

    impl Translation for Fixed {
        fn from_lang(&self) -> &LanguageRef { &self.from }
        fn to_lang(&self) -> &LanguageRef { &self.to }
        fn kind(&self) -> TranslationKind { TranslationKind::Package }

        fn generate(&self, input_text: &str, n: usize) -> Result<Hypotheses> {
            Ok((0..n)
                .map(|i| Hypothesis::new(format!("{input_text}>{}{i}", self.to.code), self.scores[i]))
                .collect())
        }
    }

    fn lang(code: &str) -> LanguageRef {
        LanguageRef::new(code, code.to_uppercase())
    }

    #[test]
    fn test_rejects_mismatched_pivot() {
        let a: TranslationRef = Arc::new(IdentityTranslation::new(lang("en")));
        let b: TranslationRef = Arc::new(IdentityTranslation::new(lang("fr")));
        assert!(matches!(CompositeTranslation::new(a, b), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_reranks_across_intermediates() {
        let first: TranslationRef = Arc::new(Fixed { from: lang("en"), to: lang("es"), scores: vec![-0.1, -0.2] });
        let second: TranslationRef = Arc::new(Fixed { from: lang("es"), to: lang("fr"), scores: vec![-1.0, -0.05] });
        let chain = CompositeTranslation::new(first, second).unwrap();

        assert_eq!(chain.from_lang().code, "en");
        assert_eq!(chain.to_lang().code, "fr");
        assert_eq!(chain.pivot().code, "es");

        let hs = chain.hypotheses("x", 2).unwrap();
        let values: Vec<&str> = hs.iter().map(|h| h.value.as_str()).collect();
        assert_eq!(values, vec!["x>es0>fr1", "x>es1>fr1"]);
        assert!((hs[0].score - (-0.15)).abs() < 1e-6);
        assert!((hs[1].score - (-0.25)).abs() < 1e-6);
    }
}
