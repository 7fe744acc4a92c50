//! # Backend Collaborator Contracts
//!
//! Everything the translation core consumes but does not implement: the
//! batch inference engine, the subword tokenizer, sentence chunking,
//! package discovery, remote translation APIs and few-shot language models.
//!
//! ## Implementations
//!
//! | Contract | Module | Description |
//! |----------|--------|-------------|
//! | all | `memory` | Dictionary-backed reference implementations for testing/embedding |
//!
//! All calls are blocking. Timeouts, retries and cancellation belong to the
//! implementation behind the trait, never to the core.

pub mod memory;

use std::path::Path;
use std::sync::Arc;
use serde::{Deserialize, Serialize};

use crate::config::Device;
use crate::model::{LanguageRef, Package};
use crate::Result;

// ============================================================================
// Batch inference
// ============================================================================

/// Decoding parameters for one `translate_batch` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOptions {
    pub beam_size: usize,
    pub num_hypotheses: usize,
    pub length_penalty: f32,
    pub max_batch_size: usize,
    /// Copy the source token into the output in place of `<unk>`.
    pub replace_unknowns: bool,
}

/// One decoded candidate for one sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTokens {
    pub tokens: Vec<String>,
    pub score: f32,
}

impl ScoredTokens {
    pub fn new(tokens: impl IntoIterator<Item = impl Into<String>>, score: f32) -> Self {
        Self { tokens: tokens.into_iter().map(Into::into).collect(), score }
    }
}

/// A loaded sequence-to-sequence model.
pub trait InferenceBackend: Send + Sync {
    /// Decode every tokenized sentence. The outer result has one entry per
    /// input sentence, each holding `num_hypotheses` candidates best-first.
    fn translate_batch(
        &self,
        batch: &[Vec<String>],
        options: &BatchOptions,
    ) -> Result<Vec<Vec<ScoredTokens>>>;
}

/// Opens an inference model from disk.
pub trait BackendLoader: Send + Sync {
    fn load(&self, model_path: &Path, device: Device) -> Result<Arc<dyn InferenceBackend>>;
}

// ============================================================================
// Tokenization and chunking
// ============================================================================

/// SentencePiece word-boundary marker.
pub const WORD_BOUNDARY: char = '▁';

/// Subword tokenizer. Decoding is token concatenation plus removal of the
/// word-boundary marker, done by the caller.
pub trait Tokenizer: Send + Sync {
    fn encode(&self, sentence: &str) -> Vec<String>;
}

/// Opens a tokenizer model from disk.
pub trait TokenizerLoader: Send + Sync {
    fn load(&self, model_path: &Path) -> Result<Arc<dyn Tokenizer>>;
}

/// Sentence boundary detection. Must be deterministic and keep every
/// character of the input in exactly one sentence.
pub trait SentenceChunker: Send + Sync {
    fn chunk(&self, text: &str) -> Vec<String>;
}

/// Treats the whole input as one sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeTextChunker;

impl SentenceChunker for WholeTextChunker {
    fn chunk(&self, text: &str) -> Vec<String> {
        vec![text.to_string()]
    }
}

// ============================================================================
// Discovery
// ============================================================================

/// Lists the model packages installed on this machine.
pub trait PackageSource: Send + Sync {
    fn installed_packages(&self) -> Result<Vec<Package>>;
}

impl PackageSource for Vec<Package> {
    fn installed_packages(&self) -> Result<Vec<Package>> {
        Ok(self.clone())
    }
}

// ============================================================================
// Remote and LLM translation
// ============================================================================

/// A remote service that returns a single translation per request.
pub trait RemoteApi: Send + Sync {
    /// Languages the service can translate between (any ordered pair).
    fn languages(&self) -> Result<Vec<LanguageRef>>;

    fn translate(&self, text: &str, from_code: &str, to_code: &str) -> Result<String>;
}

/// A free-text completion model.
pub trait LanguageModel: Send + Sync {
    fn infer(&self, prompt: &str) -> Result<String>;
}

/// Few-shot prompt construction and completion parsing.
pub trait PromptBuilder: Send + Sync {
    fn generate_prompt(&self, sentence: &str, from: &LanguageRef, to: &LanguageRef) -> String;

    /// Extract the translated sentence from a raw completion.
    fn parse_inference(&self, response: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_text_chunker() {
        assert_eq!(WholeTextChunker.chunk("One. Two."), vec!["One. Two.".to_string()]);
    }
}
