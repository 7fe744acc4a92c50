//! Graph construction: direct edges, identity edges, pivot closure.

use std::sync::Arc;
use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::model::LanguageRef;
use crate::translation::{CompositeTranslation, IdentityTranslation, TranslationRef};
use super::{Language, TranslationGraph};

/// Accumulates languages and edges, then closes the graph under
/// composition.
#[derive(Default)]
pub struct GraphBuilder {
    languages: Vec<Language>,
    /// code → position in `languages`
    index: HashMap<String, usize>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the node for `lang`, creating it on first sight. The
    /// first name seen for a code is kept.
    fn node(&mut self, lang: &LanguageRef) -> usize {
        if let Some(&i) = self.index.get(lang.code.as_str()) {
            return i;
        }
        let i = self.languages.len();
        self.languages.push(Language::new(lang));
        self.index.insert(lang.code.clone(), i);
        i
    }

    fn register(&mut self, from: usize, to: usize, edge: TranslationRef) {
        self.languages[from].translations_from.push(edge.clone());
        self.languages[to].translations_to.push(edge);
    }

    /// Add a discovered edge. Malformed entries (empty code, self-loop,
    /// second edge for the same pair) are skipped and reported as `false`.
    pub fn add_translation(&mut self, edge: TranslationRef) -> bool {
        let (from, to) = (edge.from_lang().clone(), edge.to_lang().clone());
        if from.code.is_empty() || to.code.is_empty() {
            warn!(%edge, "skipping translation with empty language code");
            return false;
        }
        if from == to {
            warn!(%edge, "skipping self translation, identity covers it");
            return false;
        }
        let from = self.node(&from);
        let to = self.node(&to);
        if self.languages[from].translation_to(&self.languages[to].code).is_some() {
            warn!(%edge, "skipping duplicate translation");
            return false;
        }
        self.register(from, to, edge);
        true
    }

    pub fn add_translations(&mut self, edges: impl IntoIterator<Item = TranslationRef>) -> usize {
        edges.into_iter().filter(|e| self.add_translation(e.clone())).count()
    }

    /// Register a language with no edges yet.
    pub fn add_language(&mut self, lang: &LanguageRef) {
        self.node(lang);
    }

    /// Give every language an edge to itself.
    pub fn add_identity_translations(&mut self) {
        for i in 0..self.languages.len() {
            if self.languages[i].translation_to(&self.languages[i].code).is_some() {
                continue;
            }
            let identity: TranslationRef =
                Arc::new(IdentityTranslation::new(self.languages[i].language_ref()));
            self.register(i, i, identity);
        }
    }

    /// Synthesize composite edges until no language can reach a new
    /// destination. Returns the number of edges added.
    ///
    /// Per language, outbound edges are scanned in insertion order (edges
    /// added during the scan are visited too) and the scan repeats until a
    /// pass adds nothing. The first chain found for a destination is kept,
    /// so chains are not necessarily the shortest, and existing edges are
    /// never replaced.
    pub fn close(&mut self) -> usize {
        let mut total = 0;
        for l in 0..self.languages.len() {
            loop {
                let mut added = 0;
                let mut k = 0;
                while k < self.languages[l].translations_from.len() {
                    let first = self.languages[l].translations_from[k].clone();
                    k += 1;
                    let Some(&pivot) = self.index.get(first.to_lang().code.as_str()) else {
                        continue;
                    };
                    let onward = self.languages[pivot].translations_from.clone();
                    for second in onward {
                        let Some(&dest) = self.index.get(second.to_lang().code.as_str()) else {
                            continue;
                        };
                        if self.languages[l].translation_to(&self.languages[dest].code).is_some() {
                            continue;
                        }
                        let composite: TranslationRef =
                            Arc::new(CompositeTranslation::chain(first.clone(), second));
                        debug!(%composite, pivot = %first.to_lang().code, "synthesized translation");
                        self.register(l, dest, composite);
                        added += 1;
                    }
                }
                debug!(lang = %self.languages[l].code, added, "closure pass");
                if added == 0 {
                    break;
                }
                total += added;
            }
        }
        total
    }

    /// Number of edges currently registered.
    pub fn edge_count(&self) -> usize {
        self.languages.iter().map(|l| l.translations_from.len()).sum()
    }

    /// Add identity edges, close the graph and freeze it.
    #[tracing::instrument(skip_all)]
    pub fn build(mut self) -> TranslationGraph {
        self.add_identity_translations();
        let synthesized = self.close();
        debug!(synthesized, edges = self.edge_count(), "translation graph closed");
        TranslationGraph::new(self.languages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Hypotheses, Hypothesis};
    use crate::translation::{Translation, TranslationKind};

    struct Direct(LanguageRef, LanguageRef);

    impl Translation for Direct {
        fn from_lang(&self) -> &LanguageRef { &self.0 }
        fn to_lang(&self) -> &LanguageRef { &self.1 }
        fn kind(&self) -> TranslationKind { TranslationKind::Package }

        fn generate(&self, input: &str, n: usize) -> crate::Result<Hypotheses> {
            Ok(Hypothesis::repeated(format!("{input}/{}", self.1.code), -1.0, n))
        }
    }

    fn edge(from: &str, to: &str) -> TranslationRef {
        Arc::new(Direct(LanguageRef::new(from, from), LanguageRef::new(to, to)))
    }

    #[test]
    fn test_chain_of_three() {
        let mut builder = GraphBuilder::new();
        builder.add_translation(edge("a", "b"));
        builder.add_translation(edge("b", "c"));
        builder.add_translation(edge("c", "d"));
        builder.add_identity_translations();
        // a→c, a→d, b→d
        assert_eq!(builder.close(), 3);
        assert_eq!(builder.close(), 0);
    }

    #[test]
    fn test_rejects_malformed_edges() {
        let mut builder = GraphBuilder::new();
        assert!(builder.add_translation(edge("a", "b")));
        assert!(!builder.add_translation(edge("a", "b")));
        assert!(!builder.add_translation(edge("a", "a")));
        assert!(!builder.add_translation(edge("a", "")));
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn test_identity_added_once() {
        let mut builder = GraphBuilder::new();
        builder.add_language(&LanguageRef::new("en", "English"));
        builder.add_identity_translations();
        builder.add_identity_translations();
        assert_eq!(builder.edge_count(), 1);
    }
}
