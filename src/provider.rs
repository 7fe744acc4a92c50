//! Discovery of direct edges.
//!
//! Each provider turns one kind of backend into the list of edges the graph
//! builder starts from. Self pairs are never emitted; the builder adds
//! identity edges for every language.

use std::sync::Arc;
use tracing::{info, warn};

use crate::backend::{LanguageModel, PackageSource, PromptBuilder, RemoteApi, SentenceChunker};
use crate::config::ModelProviderKind;
use crate::model::LanguageRef;
use crate::translation::package::PackageRuntime;
use crate::translation::{
    FewShotTranslation, PackageTranslation, RemoteTranslation, TranslationRef,
};
use crate::Result;

/// Installed model packages, decoded locally.
#[derive(Clone)]
pub struct PackageProvider {
    pub source: Arc<dyn PackageSource>,
    pub runtime: PackageRuntime,
}

/// A remote single-result API; every ordered pair of its languages.
#[derive(Clone)]
pub struct RemoteProvider {
    pub api: Arc<dyn RemoteApi>,
}

/// A few-shot completion model over a fixed language set.
#[derive(Clone)]
pub struct FewShotProvider {
    pub model: Arc<dyn LanguageModel>,
    pub prompts: Arc<dyn PromptBuilder>,
    pub chunker: Arc<dyn SentenceChunker>,
    pub languages: Vec<LanguageRef>,
}

impl FewShotProvider {
    /// English ↔ Spanish, the pair the prompt examples cover.
    pub fn default_languages() -> Vec<LanguageRef> {
        vec![LanguageRef::new("en", "English"), LanguageRef::new("es", "Spanish")]
    }
}

/// Source of direct edges.
#[derive(Clone)]
pub enum Provider {
    Packages(PackageProvider),
    Remote(RemoteProvider),
    FewShot(FewShotProvider),
}

impl Provider {
    pub fn kind(&self) -> ModelProviderKind {
        match self {
            Provider::Packages(_) => ModelProviderKind::OpenNmt,
            Provider::Remote(_) => ModelProviderKind::LibreTranslate,
            Provider::FewShot(_) => ModelProviderKind::OpenAi,
        }
    }

    /// List the direct edges this provider offers right now.
    pub fn discover(&self) -> Result<Vec<TranslationRef>> {
        let edges = match self {
            Provider::Packages(p) => discover_packages(p)?,
            Provider::Remote(p) => {
                let languages = p.api.languages()?;
                all_pairs(&languages, |from, to| {
                    Arc::new(RemoteTranslation::new(from, to, p.api.clone()))
                })
            }
            Provider::FewShot(p) => all_pairs(&p.languages, |from, to| {
                Arc::new(FewShotTranslation::new(
                    from,
                    to,
                    p.model.clone(),
                    p.prompts.clone(),
                    p.chunker.clone(),
                ))
            }),
        };
        info!(provider = ?self.kind(), edges = edges.len(), "discovered translations");
        Ok(edges)
    }
}

fn discover_packages(provider: &PackageProvider) -> Result<Vec<TranslationRef>> {
    let mut edges: Vec<TranslationRef> = Vec::new();
    for pkg in provider.source.installed_packages()? {
        if !pkg.is_translate() {
            continue;
        }
        if pkg.from_code.is_empty() || pkg.to_code.is_empty() {
            warn!(path = %pkg.path().display(), "skipping package without language codes");
            continue;
        }
        edges.push(Arc::new(PackageTranslation::new(pkg, provider.runtime.clone())));
    }
    Ok(edges)
}

fn all_pairs(
    languages: &[LanguageRef],
    make: impl Fn(LanguageRef, LanguageRef) -> TranslationRef,
) -> Vec<TranslationRef> {
    let mut edges = Vec::new();
    for from in languages {
        for to in languages.iter().filter(|to| *to != from) {
            edges.push(make(from.clone(), to.clone()));
        }
    }
    edges
}
