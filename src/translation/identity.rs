//! Identity edge: a language translating to itself.

use crate::model::{Hypotheses, Hypothesis, LanguageRef};
use crate::Result;
use super::{Translation, TranslationKind};

/// Returns the input unchanged, with score 0, in every slot.
#[derive(Debug, Clone)]
pub struct IdentityTranslation {
    lang: LanguageRef,
}

impl IdentityTranslation {
    pub fn new(lang: LanguageRef) -> Self {
        Self { lang }
    }
}

impl Translation for IdentityTranslation {
    fn from_lang(&self) -> &LanguageRef { &self.lang }
    fn to_lang(&self) -> &LanguageRef { &self.lang }
    fn kind(&self) -> TranslationKind { TranslationKind::Identity }

    fn generate(&self, input_text: &str, num_hypotheses: usize) -> Result<Hypotheses> {
        Ok(Hypothesis::repeated(input_text, 0.0, num_hypotheses))
    }
}
