//! Direct edge backed by an installed model package.
//!
//! ```text
//! text → chunk → tokenize per sentence → translate_batch (beam, N-best)
//!      → hypothesis i = concat(sentence top-i tokens), Σ scores
//!      → "▁" → " ", drop one leading space
//! ```
//!
//! The inference handle and tokenizer are opened on first use and kept for
//! the lifetime of the edge. A per-edge mutex makes that at-most-once even
//! when the first two requests race.

use std::sync::Arc;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::backend::{
    WORD_BOUNDARY, BackendLoader, BatchOptions, InferenceBackend, SentenceChunker, Tokenizer, TokenizerLoader,
};
use crate::config::Settings;
use crate::model::{Hypotheses, Hypothesis, LanguageRef, Package};
use crate::{Error, Result};
use super::{Translation, TranslationKind};

/// Collaborators shared by every packaged edge of one provider.
#[derive(Clone)]
pub struct PackageRuntime {
    pub settings: Settings,
    pub loader: Arc<dyn BackendLoader>,
    pub tokenizers: Arc<dyn TokenizerLoader>,
    pub chunker: Arc<dyn SentenceChunker>,
}

#[derive(Clone)]
struct LoadedPackage {
    translator: Arc<dyn InferenceBackend>,
    tokenizer: Arc<dyn Tokenizer>,
}

pub struct PackageTranslation {
    from_lang: LanguageRef,
    to_lang: LanguageRef,
    package: Package,
    runtime: PackageRuntime,
    loaded: Mutex<Option<LoadedPackage>>,
}

impl PackageTranslation {
    pub fn new(package: Package, runtime: PackageRuntime) -> Self {
        Self {
            from_lang: package.from_lang(),
            to_lang: package.to_lang(),
            package,
            runtime,
            loaded: Mutex::new(None),
        }
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.lock().is_some()
    }

    /// Open the model and tokenizer now instead of on first request.
    pub fn preload(&self) -> Result<()> {
        self.handle().map(|_| ())
    }

    fn handle(&self) -> Result<LoadedPackage> {
        let mut slot = self.loaded.lock();
        if let Some(loaded) = slot.as_ref() {
            return Ok(loaded.clone());
        }
        info!(package = %self.package.path().display(), "loading translation package");
        let translator = self
            .runtime
            .loader
            .load(&self.package.model_path(), self.runtime.settings.device)?;
        let tokenizer = self.runtime.tokenizers.load(&self.package.tokenizer_path())?;
        let loaded = LoadedPackage { translator, tokenizer };
        *slot = Some(loaded.clone());
        Ok(loaded)
    }
}

impl Translation for PackageTranslation {
    fn from_lang(&self) -> &LanguageRef { &self.from_lang }
    fn to_lang(&self) -> &LanguageRef { &self.to_lang }
    fn kind(&self) -> TranslationKind { TranslationKind::Package }

    fn generate(&self, input_text: &str, num_hypotheses: usize) -> Result<Hypotheses> {
        let loaded = self.handle()?;
        apply_packaged_translation(&loaded, &self.runtime, input_text, num_hypotheses)
    }
}

fn apply_packaged_translation(
    loaded: &LoadedPackage,
    runtime: &PackageRuntime,
    input_text: &str,
    num_hypotheses: usize,
) -> Result<Hypotheses> {
    let sentences = runtime.chunker.chunk(input_text);
    debug!(?sentences, "sentences");

    let tokenized: Vec<Vec<String>> = sentences
        .iter()
        .map(|sentence| loaded.tokenizer.encode(sentence))
        .collect();
    debug!(?tokenized, "tokenized");

    let settings = &runtime.settings;
    let options = BatchOptions {
        beam_size: settings.beam_size(num_hypotheses),
        num_hypotheses,
        length_penalty: settings.length_penalty,
        max_batch_size: settings.max_batch_size,
        replace_unknowns: true,
    };
    let batches = loaded.translator.translate_batch(&tokenized, &options)?;
    if batches.len() != tokenized.len() {
        return Err(Error::BackendUnavailable(format!(
            "backend answered {} of {} sentences",
            batches.len(),
            tokenized.len()
        )));
    }

    let mut hypotheses = Hypotheses::with_capacity(num_hypotheses);
    for i in 0..num_hypotheses {
        let mut detokenized = String::new();
        let mut score = 0.0;
        for candidates in &batches {
            let candidate = candidates.get(i).ok_or_else(|| {
                Error::BackendUnavailable(format!(
                    "backend returned {} of {num_hypotheses} hypotheses",
                    candidates.len()
                ))
            })?;
            detokenized.extend(candidate.tokens.iter().map(String::as_str));
            score += candidate.score;
        }
        let detokenized = detokenized.replace(WORD_BOUNDARY, " ");
        let value = detokenized.strip_prefix(' ').unwrap_or(&detokenized);
        hypotheses.push(Hypothesis::new(value, score));
    }
    debug!(?hypotheses, "value hypotheses");
    Ok(hypotheses)
}
