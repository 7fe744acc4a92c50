//! # Translation Graph
//!
//! Languages are vertices, `Translation`s are directed edges. After
//! `GraphBuilder::build` every language has an identity edge, and every
//! language reachable from L through any chain of edges has exactly one
//! edge from L: the discovered one if it exists, otherwise a composite.
//!
//! A built `TranslationGraph` is immutable; sharing it across threads needs
//! no locking.

pub mod builder;
pub mod language;

use hashbrown::HashMap;

use crate::model::Hypotheses;
use crate::translation::TranslationRef;
use crate::{Error, Result};

pub use builder::GraphBuilder;
pub use language::Language;

/// Code of the language listed first when present.
pub const PRIMARY_LANGUAGE: &str = "en";

/// A closed, ordered translation graph.
#[derive(Clone, Debug)]
pub struct TranslationGraph {
    languages: Vec<Language>,
    index: HashMap<String, usize>,
}

impl TranslationGraph {
    /// Build and close a graph from discovered edges.
    pub fn from_translations(edges: impl IntoIterator<Item = TranslationRef>) -> Self {
        let mut builder = GraphBuilder::new();
        builder.add_translations(edges);
        builder.build()
    }

    pub(crate) fn new(mut languages: Vec<Language>) -> Self {
        order_languages(&mut languages);
        let index = languages
            .iter()
            .enumerate()
            .map(|(i, l)| (l.code.clone(), i))
            .collect();
        Self { languages, index }
    }

    /// Languages, English first, then by display name.
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn into_languages(self) -> Vec<Language> {
        self.languages
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.languages.iter().map(|l| l.translations_from.len()).sum()
    }

    /// Exact match on code.
    pub fn get_language_from_code(&self, code: &str) -> Result<&Language> {
        self.index
            .get(code)
            .map(|&i| &self.languages[i])
            .ok_or_else(|| Error::LanguageNotFound(code.to_string()))
    }

    /// The edge between two languages. `Ok(None)` means both languages
    /// exist but nothing connects them.
    pub fn get_translation_from_codes(&self, from_code: &str, to_code: &str) -> Result<Option<TranslationRef>> {
        let from_lang = self.get_language_from_code(from_code)?;
        let to_lang = self.get_language_from_code(to_code)?;
        Ok(from_lang.translation_to(&to_lang.code).cloned())
    }

    /// Like `get_translation_from_codes`, with a missing path as an error.
    pub fn require_translation(&self, from_code: &str, to_code: &str) -> Result<TranslationRef> {
        self.get_translation_from_codes(from_code, to_code)?
            .ok_or_else(|| Error::NoTranslationPath {
                from: from_code.to_string(),
                to: to_code.to_string(),
            })
    }

    pub fn translate(&self, text: &str, from_code: &str, to_code: &str) -> Result<String> {
        self.require_translation(from_code, to_code)?.translate(text)
    }

    pub fn hypotheses(
        &self,
        text: &str,
        from_code: &str,
        to_code: &str,
        num_hypotheses: usize,
    ) -> Result<Hypotheses> {
        self.require_translation(from_code, to_code)?.hypotheses(text, num_hypotheses)
    }
}

/// English first if present, the rest by name. Both steps are stable.
fn order_languages(languages: &mut Vec<Language>) {
    let primary = languages
        .iter()
        .position(|l| l.code == PRIMARY_LANGUAGE)
        .map(|i| languages.remove(i));
    languages.sort_by(|a, b| a.name.cmp(&b.name));
    if let Some(primary) = primary {
        languages.insert(0, primary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LanguageRef;

    fn graph_of(langs: &[(&str, &str)]) -> TranslationGraph {
        let mut builder = GraphBuilder::new();
        for (code, name) in langs {
            builder.add_language(&LanguageRef::new(*code, *name));
        }
        builder.build()
    }

    #[test]
    fn test_english_first_then_by_name() {
        let graph = graph_of(&[("es", "Spanish"), ("en", "English"), ("fr", "French")]);
        let names: Vec<&str> = graph.languages().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["English", "French", "Spanish"]);
    }

    #[test]
    fn test_english_first_even_when_not_alphabetical() {
        let graph = graph_of(&[("de", "Deutsch"), ("en", "Zz English"), ("ar", "Arabic")]);
        let codes: Vec<&str> = graph.languages().iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["en", "ar", "de"]);
    }

    #[test]
    fn test_index_follows_ordering() {
        let graph = graph_of(&[("es", "Spanish"), ("en", "English")]);
        assert_eq!(graph.get_language_from_code("es").unwrap().name, "Spanish");
        assert_eq!(graph.get_language_from_code("en").unwrap().name, "English");
    }

    #[test]
    fn test_unconnected_languages() {
        let graph = graph_of(&[("es", "Spanish"), ("en", "English")]);
        assert!(graph.get_translation_from_codes("en", "es").unwrap().is_none());
        assert!(matches!(
            graph.translate("hi", "en", "es"),
            Err(Error::NoTranslationPath { .. })
        ));
    }
}
