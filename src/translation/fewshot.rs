//! Few-shot edge: a completion model prompted sentence by sentence.

use std::sync::Arc;
use tracing::debug;

use crate::backend::{LanguageModel, PromptBuilder, SentenceChunker};
use crate::model::{Hypotheses, Hypothesis, LanguageRef};
use crate::Result;
use super::{Translation, TranslationKind};

pub struct FewShotTranslation {
    from_lang: LanguageRef,
    to_lang: LanguageRef,
    model: Arc<dyn LanguageModel>,
    prompts: Arc<dyn PromptBuilder>,
    chunker: Arc<dyn SentenceChunker>,
}

impl FewShotTranslation {
    pub fn new(
        from_lang: LanguageRef,
        to_lang: LanguageRef,
        model: Arc<dyn LanguageModel>,
        prompts: Arc<dyn PromptBuilder>,
        chunker: Arc<dyn SentenceChunker>,
    ) -> Self {
        Self { from_lang, to_lang, model, prompts, chunker }
    }
}

impl Translation for FewShotTranslation {
    fn from_lang(&self) -> &LanguageRef { &self.from_lang }
    fn to_lang(&self) -> &LanguageRef { &self.to_lang }
    fn kind(&self) -> TranslationKind { TranslationKind::FewShot }

    fn generate(&self, input_text: &str, num_hypotheses: usize) -> Result<Hypotheses> {
        let mut translated = String::new();
        for sentence in self.chunker.chunk(input_text) {
            let prompt = self.prompts.generate_prompt(&sentence, &self.from_lang, &self.to_lang);
            debug!(%prompt, "fewshot prompt");
            let response = self.model.infer(&prompt)?;
            debug!(%response, "fewshot response");
            let result = self.prompts.parse_inference(&response);
            debug!(%result, "fewshot result");
            translated.push_str(&result);
        }
        Ok(Hypothesis::repeated(translated, 0.0, num_hypotheses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::{LinePromptBuilder, MemoryLanguageModel, PunctuationChunker};

    #[test]
    fn test_prompts_each_sentence_and_concatenates() {
        let model = Arc::new(
            MemoryLanguageModel::new()
                .with_completion("English (en): Hi.\nSpanish (es):", " Hola.\n")
                .with_completion("English (en): Bye.\nSpanish (es):", " Adiós.\n"),
        );
        let edge = FewShotTranslation::new(
            LanguageRef::new("en", "English"),
            LanguageRef::new("es", "Spanish"),
            model.clone(),
            Arc::new(LinePromptBuilder),
            Arc::new(PunctuationChunker),
        );

        let hs = edge.hypotheses("Hi. Bye.", 2).unwrap();
        assert_eq!(hs.to_vec(), vec![Hypothesis::new("Hola.Adiós.", 0.0); 2]);
        assert_eq!(model.prompts().len(), 2);
    }
}
