//! Property tests for composite hypothesis combination.
//!
//! Sub-edges here return caller-chosen scores so the count and ordering
//! guarantees can be checked over arbitrary inputs and chain lengths.

use std::sync::Arc;

use proptest::prelude::*;
use pivot_translate::{
    Hypotheses, Hypothesis, LanguageRef, Result, Translation, TranslationGraph, TranslationKind,
    TranslationRef,
};

/// Emits `n` hypotheses tagging the input with the target code; slot `i`
/// gets `scores[i % scores.len()]`.
struct ScoredEdge {
    from: LanguageRef,
    to: LanguageRef,
    scores: Vec<f32>,
}

impl Translation for ScoredEdge {
    fn from_lang(&self) -> &LanguageRef { &self.from }
    fn to_lang(&self) -> &LanguageRef { &self.to }
    fn kind(&self) -> TranslationKind { TranslationKind::Package }

    fn generate(&self, input_text: &str, n: usize) -> Result<Hypotheses> {
        Ok((0..n)
            .map(|i| Hypothesis::new(format!("{input_text}|{}{i}", self.to.code), self.scores[i % self.scores.len()]))
            .collect())
    }
}

fn scored(from: &str, to: &str, scores: Vec<f32>) -> TranslationRef {
    Arc::new(ScoredEdge {
        from: LanguageRef::new(from, from.to_uppercase()),
        to: LanguageRef::new(to, to.to_uppercase()),
        scores,
    })
}

fn scores() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-20.0f32..0.0, 1..6)
}

proptest! {
    #[test]
    fn composite_returns_n_sorted(n in 1usize..6, s1 in scores(), s2 in scores()) {
        let graph = TranslationGraph::from_translations(vec![scored("a", "b", s1), scored("b", "c", s2)]);
        let edge = graph.get_translation_from_codes("a", "c").unwrap().unwrap();
        prop_assert_eq!(edge.kind(), TranslationKind::Composite);

        let hs = edge.hypotheses("x", n).unwrap();
        prop_assert_eq!(hs.len(), n);
        for pair in hs.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn composite_best_is_best_pair(s1 in scores(), s2 in scores()) {
        let n = 3;
        let graph = TranslationGraph::from_translations(vec![scored("a", "b", s1.clone()), scored("b", "c", s2.clone())]);
        let hs = graph.hypotheses("x", "a", "c", n).unwrap();

        let slot = |s: &[f32], i: usize| s[i % s.len()];
        let best = (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .map(|(i, j)| slot(&s1, i) + slot(&s2, j))
            .fold(f32::NEG_INFINITY, f32::max);
        prop_assert_eq!(hs[0].score, best);
    }

    #[test]
    fn longer_chains_keep_count(n in 1usize..4, hops in 2usize..5) {
        let codes: Vec<String> = (0..=hops).map(|i| format!("l{i}")).collect();
        let edges: Vec<TranslationRef> = codes
            .windows(2)
            .map(|w| scored(&w[0], &w[1], vec![-1.0, -2.0]))
            .collect();
        let graph = TranslationGraph::from_translations(edges);

        let hs = graph.hypotheses("x", &codes[0], &codes[hops], n).unwrap();
        prop_assert_eq!(hs.len(), n);
        prop_assert!(hs.windows(2).all(|p| p[0].score >= p[1].score));
    }
}
