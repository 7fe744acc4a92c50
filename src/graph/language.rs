//! Language vertex with its outbound and inbound edges.

use crate::model::LanguageRef;
use crate::translation::TranslationRef;

/// A language that can be translated from and/or to.
///
/// At most one edge in `translations_from` targets any given destination.
#[derive(Clone)]
pub struct Language {
    pub code: String,
    pub name: String,
    pub(crate) translations_from: Vec<TranslationRef>,
    pub(crate) translations_to: Vec<TranslationRef>,
}

impl Language {
    pub(crate) fn new(lang: &LanguageRef) -> Self {
        Self {
            code: lang.code.clone(),
            name: lang.name.clone(),
            translations_from: Vec::new(),
            translations_to: Vec::new(),
        }
    }

    /// Edges leaving this language, in insertion order.
    pub fn translations_from(&self) -> &[TranslationRef] {
        &self.translations_from
    }

    /// Edges arriving at this language, in insertion order.
    pub fn translations_to(&self) -> &[TranslationRef] {
        &self.translations_to
    }

    /// The edge from this language to `to`, if any.
    pub fn get_translation(&self, to: &LanguageRef) -> Option<&TranslationRef> {
        self.translation_to(&to.code)
    }

    pub fn translation_to(&self, code: &str) -> Option<&TranslationRef> {
        self.translations_from
            .iter()
            .find(|t| t.to_lang().code == code)
    }

    pub fn language_ref(&self) -> LanguageRef {
        LanguageRef::new(&self.code, &self.name)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl std::fmt::Debug for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Language")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("translations_from", &self.translations_from.len())
            .field("translations_to", &self.translations_to.len())
            .finish()
    }
}
