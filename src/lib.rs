//! # pivot-translate: Translation Graph with Pivot Synthesis
//!
//! Routes a translation request between two languages across whatever
//! translation capabilities are installed, chaining through intermediate
//! ("pivot") languages when no direct edge exists.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `Translation` is the one contract every edge honours
//! 2. **Closed graph**: any reachable language pair has exactly one edge
//! 3. **Collaborators at the edge**: inference, tokenization, chunking,
//!    package discovery, remote APIs and LLMs are traits in `backend`
//! 4. **Immutable once built**: a `TranslationGraph` never changes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pivot_translate::{Translator, Provider, RemoteProvider, LanguageRef};
//! use pivot_translate::backend::memory::MemoryApi;
//!
//! # fn example() -> pivot_translate::Result<()> {
//! let api = MemoryApi::new(vec![
//!     LanguageRef::new("en", "English"),
//!     LanguageRef::new("es", "Spanish"),
//! ])
//! .with_phrase("en", "es", "Hello", "Hola");
//!
//! let translator = Translator::new(Provider::Remote(RemoteProvider { api: Arc::new(api) }));
//! assert_eq!(translator.translate("Hello", "en", "es")?, "Hola");
//! # Ok(())
//! # }
//! ```
//!
//! ## Providers
//!
//! | Provider | Setting | Edges |
//! |----------|---------|-------|
//! | Packages | `opennmt` (default) | One per installed translate package |
//! | Remote | `libretranslate` | Every ordered pair of API languages |
//! | FewShot | `openai` | English ↔ Spanish via a completion model |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod backend;
pub mod translation;
pub mod graph;
pub mod provider;
pub mod config;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{Hypothesis, Hypotheses, LanguageRef, Package};

// ============================================================================
// Re-exports: Edges and graph
// ============================================================================

pub use translation::{Translation, TranslationKind, TranslationRef};
pub use graph::{GraphBuilder, Language, TranslationGraph};

// ============================================================================
// Re-exports: Providers and settings
// ============================================================================

pub use provider::{FewShotProvider, PackageProvider, Provider, RemoteProvider};
pub use config::{Device, ModelProviderKind, Settings};

// ============================================================================
// Top-level Translator handle
// ============================================================================

/// The primary entry point. A `Translator` wraps a provider and answers
/// language and translation queries against the graph it discovers.
///
/// Every query rediscovers and rebuilds the graph, so newly installed
/// packages show up immediately. Callers translating in a loop should take
/// a `TranslationGraph` once via [`Translator::graph`] and query that.
pub struct Translator {
    provider: Provider,
    settings: Settings,
}

impl Translator {
    pub fn new(provider: Provider) -> Self {
        Self { provider, settings: Settings::default() }
    }

    /// Pick the provider named by `settings.model_provider` and keep the
    /// settings for request defaults.
    pub fn from_settings(settings: &Settings, providers: impl IntoIterator<Item = Provider>) -> Result<Self> {
        let provider = providers
            .into_iter()
            .find(|p| p.kind() == settings.model_provider)
            .ok_or_else(|| Error::Config(format!(
                "no backend configured for provider {:?}",
                settings.model_provider
            )))?;
        Ok(Self { provider, settings: settings.clone() })
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Discover edges and build the closed graph.
    #[tracing::instrument(skip_all)]
    pub fn graph(&self) -> Result<TranslationGraph> {
        tracing::info!(provider = ?self.provider.kind(), "building translation graph");
        Ok(TranslationGraph::from_translations(self.provider.discover()?))
    }

    /// Installed languages, English first, then by name.
    pub fn get_installed_languages(&self) -> Result<Vec<Language>> {
        Ok(self.graph()?.into_languages())
    }

    pub fn get_language_from_code(&self, code: &str) -> Result<Language> {
        self.graph()?.get_language_from_code(code).cloned()
    }

    /// `Ok(None)` when both languages exist but are not connected.
    #[tracing::instrument(skip(self))]
    pub fn get_translation_from_codes(&self, from_code: &str, to_code: &str) -> Result<Option<TranslationRef>> {
        self.graph()?.get_translation_from_codes(from_code, to_code)
    }

    #[tracing::instrument(skip(self, text))]
    pub fn translate(&self, text: &str, from_code: &str, to_code: &str) -> Result<String> {
        self.graph()?.translate(text, from_code, to_code)
    }

    /// `settings.num_hypotheses` candidates, best first.
    #[tracing::instrument(skip(self, text))]
    pub fn hypotheses(&self, text: &str, from_code: &str, to_code: &str) -> Result<Hypotheses> {
        self.graph()?
            .hypotheses(text, from_code, to_code, self.settings.num_hypotheses)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Language not found: {0}")]
    LanguageNotFound(String),

    #[error("No translation path from {from} to {to}")]
    NoTranslationPath { from: String, to: String },

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
