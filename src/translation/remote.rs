//! Remote edge: one request to a single-result translation API.

use std::sync::Arc;

use crate::backend::RemoteApi;
use crate::model::{Hypotheses, Hypothesis, LanguageRef};
use crate::Result;
use super::{Translation, TranslationKind};

/// The API only ever returns one translation, so every requested slot
/// holds that same result with score 0.
pub struct RemoteTranslation {
    from_lang: LanguageRef,
    to_lang: LanguageRef,
    api: Arc<dyn RemoteApi>,
}

impl RemoteTranslation {
    pub fn new(from_lang: LanguageRef, to_lang: LanguageRef, api: Arc<dyn RemoteApi>) -> Self {
        Self { from_lang, to_lang, api }
    }
}

impl Translation for RemoteTranslation {
    fn from_lang(&self) -> &LanguageRef { &self.from_lang }
    fn to_lang(&self) -> &LanguageRef { &self.to_lang }
    fn kind(&self) -> TranslationKind { TranslationKind::Remote }

    fn generate(&self, input_text: &str, num_hypotheses: usize) -> Result<Hypotheses> {
        let result = self.api.translate(input_text, &self.from_lang.code, &self.to_lang.code)?;
        Ok(Hypothesis::repeated(result, 0.0, num_hypotheses))
    }
}
