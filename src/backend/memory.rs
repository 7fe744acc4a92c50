//! In-memory collaborators.
//!
//! Dictionary-backed reference implementations of every contract in
//! `backend`. They never touch disk or network.
//!
//! ## Limitations
//!
//! - **No real decoding**: `MemoryModel` looks whole sentences up in a
//!   table. Unknown sentences are copied through with a neutral score.
//! - **No scoring model**: candidate scores are whatever the table says.
//! - **Whitespace tokenization only**: every word becomes one `▁word` token.
//!
//! Use these for:
//! - Testing graph closure and hypothesis composition deterministically
//! - Embedding the translation graph in tools that ship canned translations

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use parking_lot::{Mutex, RwLock};

use crate::config::Device;
use crate::model::LanguageRef;
use crate::{Error, Result};
use super::{
    WORD_BOUNDARY, BackendLoader, BatchOptions, InferenceBackend, LanguageModel, PromptBuilder,
    RemoteApi, ScoredTokens, SentenceChunker, Tokenizer, TokenizerLoader,
};

// ============================================================================
// MemoryModel
// ============================================================================

/// Sentence-table "model": source sentence → ranked candidates.
#[derive(Default)]
pub struct MemoryModel {
    entries: RwLock<HashMap<String, Vec<(String, f32)>>>,
}

impl MemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register candidates for a source sentence, best first.
    pub fn with_entry<S: Into<String>>(
        self,
        source: &str,
        candidates: impl IntoIterator<Item = (S, f32)>,
    ) -> Self {
        self.entries.write().insert(
            source.to_string(),
            candidates.into_iter().map(|(s, score)| (s.into(), score)).collect(),
        );
        self
    }
}

fn detokenize(tokens: &[String]) -> String {
    tokens.concat().replace(WORD_BOUNDARY, " ").trim().to_string()
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(|w| format!("{WORD_BOUNDARY}{w}")).collect()
}

impl InferenceBackend for MemoryModel {
    fn translate_batch(
        &self,
        batch: &[Vec<String>],
        options: &BatchOptions,
    ) -> Result<Vec<Vec<ScoredTokens>>> {
        let entries = self.entries.read();
        Ok(batch
            .iter()
            .map(|sentence| {
                let source = detokenize(sentence);
                let candidates: Vec<ScoredTokens> = match entries.get(&source) {
                    Some(found) if !found.is_empty() => found
                        .iter()
                        .map(|(text, score)| ScoredTokens::new(tokenize(text), *score))
                        .collect(),
                    _ => vec![ScoredTokens::new(sentence.clone(), 0.0)],
                };
                // Pad with the weakest candidate, as a beam narrower than
                // `num_hypotheses` would.
                let weakest = candidates[candidates.len() - 1].clone();
                candidates
                    .into_iter()
                    .chain(std::iter::repeat(weakest))
                    .take(options.num_hypotheses)
                    .collect()
            })
            .collect())
    }
}

// ============================================================================
// MemoryLoader
// ============================================================================

/// Serves pre-registered models by path and counts loads.
#[derive(Default)]
pub struct MemoryLoader {
    models: RwLock<HashMap<PathBuf, Arc<MemoryModel>>>,
    loads: AtomicUsize,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(self, model_path: impl Into<PathBuf>, model: MemoryModel) -> Self {
        self.models.write().insert(model_path.into(), Arc::new(model));
        self
    }

    /// Number of successful `load` calls so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl BackendLoader for MemoryLoader {
    fn load(&self, model_path: &Path, _device: Device) -> Result<Arc<dyn InferenceBackend>> {
        let model = self
            .models
            .read()
            .get(model_path)
            .cloned()
            .ok_or_else(|| Error::BackendUnavailable(format!("no model at {}", model_path.display())))?;
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(model)
    }
}

// ============================================================================
// Tokenizer / chunker
// ============================================================================

/// Splits on whitespace and marks every word with `▁`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn encode(&self, sentence: &str) -> Vec<String> {
        tokenize(sentence)
    }
}

impl TokenizerLoader for WhitespaceTokenizer {
    fn load(&self, _model_path: &Path) -> Result<Arc<dyn Tokenizer>> {
        Ok(Arc::new(WhitespaceTokenizer))
    }
}

/// Splits after `.`, `!` or `?` when followed by whitespace. The whitespace
/// stays at the head of the next sentence so concatenation is lossless.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationChunker;

impl SentenceChunker for PunctuationChunker {
    fn chunk(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if matches!(c, '.' | '!' | '?') {
                if let Some(&(j, next)) = chars.peek() {
                    if next.is_whitespace() {
                        sentences.push(text[start..j].to_string());
                        start = j;
                    }
                } else {
                    sentences.push(text[start..i + c.len_utf8()].to_string());
                    start = text.len();
                }
            }
        }
        if start < text.len() {
            sentences.push(text[start..].to_string());
        }
        sentences
    }
}

// ============================================================================
// MemoryApi
// ============================================================================

/// Remote single-result API answering from a phrase table.
pub struct MemoryApi {
    languages: Vec<LanguageRef>,
    phrases: RwLock<HashMap<(String, String, String), String>>,
}

impl MemoryApi {
    pub fn new(languages: Vec<LanguageRef>) -> Self {
        Self { languages, phrases: RwLock::new(HashMap::new()) }
    }

    pub fn with_phrase(self, from_code: &str, to_code: &str, text: &str, translated: &str) -> Self {
        self.phrases.write().insert(
            (from_code.to_string(), to_code.to_string(), text.to_string()),
            translated.to_string(),
        );
        self
    }
}

impl RemoteApi for MemoryApi {
    fn languages(&self) -> Result<Vec<LanguageRef>> {
        Ok(self.languages.clone())
    }

    fn translate(&self, text: &str, from_code: &str, to_code: &str) -> Result<String> {
        self.phrases
            .read()
            .get(&(from_code.to_string(), to_code.to_string(), text.to_string()))
            .cloned()
            .ok_or_else(|| Error::BackendUnavailable(format!("no phrase for {from_code}->{to_code}: {text:?}")))
    }
}

// ============================================================================
// MemoryLanguageModel
// ============================================================================

/// Completion model answering from a prompt table. Records every prompt.
#[derive(Default)]
pub struct MemoryLanguageModel {
    completions: RwLock<HashMap<String, String>>,
    prompts: Mutex<Vec<String>>,
}

impl MemoryLanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_completion(self, prompt: impl Into<String>, completion: impl Into<String>) -> Self {
        self.completions.write().insert(prompt.into(), completion.into());
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

impl LanguageModel for MemoryLanguageModel {
    fn infer(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        self.completions
            .read()
            .get(prompt)
            .cloned()
            .ok_or_else(|| Error::BackendUnavailable("no completion for prompt".into()))
    }
}

/// `"<from name> (<code>): <sentence>\n<to name> (<code>):"`; the answer
/// is the first line of the completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinePromptBuilder;

impl PromptBuilder for LinePromptBuilder {
    fn generate_prompt(&self, sentence: &str, from: &LanguageRef, to: &LanguageRef) -> String {
        format!(
            "{} ({}): {}\n{} ({}):",
            from.name, from.code, sentence.trim(), to.name, to.code
        )
    }

    fn parse_inference(&self, response: &str) -> String {
        response.lines().next().unwrap_or_default().trim().to_string()
    }
}
