//! # Translation Edges
//!
//! `Translation` is the one contract every edge in the graph implements:
//! turn text in `from_lang` into up to N ranked hypotheses in `to_lang`.
//!
//! ## Variants
//!
//! | Edge | Module | Hypotheses |
//! |------|--------|------------|
//! | `PackageTranslation` | `package` | Beam search over a packaged model (native N-best) |
//! | `IdentityTranslation` | `identity` | Input unchanged, score 0 |
//! | `CompositeTranslation` | `composite` | Chain of two edges, N×N re-ranked |
//! | `RemoteTranslation` | `remote` | Single API result, duplicated |
//! | `FewShotTranslation` | `fewshot` | Completion model per sentence, duplicated |

pub mod composite;
pub mod fewshot;
pub mod identity;
pub mod package;
pub mod remote;

use std::fmt;
use std::sync::Arc;

use crate::model::{Hypotheses, LanguageRef};
use crate::{Error, Result};

pub use composite::CompositeTranslation;
pub use fewshot::FewShotTranslation;
pub use identity::IdentityTranslation;
pub use package::PackageTranslation;
pub use remote::RemoteTranslation;

/// Shared handle to an edge. Composite edges hold their parts through it.
pub type TranslationRef = Arc<dyn Translation>;

/// Which variant an edge is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationKind {
    Package,
    Identity,
    Composite,
    Remote,
    FewShot,
}

/// A capability that turns text in one language into ranked hypotheses in
/// another.
pub trait Translation: Send + Sync {
    fn from_lang(&self) -> &LanguageRef;

    fn to_lang(&self) -> &LanguageRef;

    fn kind(&self) -> TranslationKind;

    /// Produce exactly `num_hypotheses` hypotheses, best first. Callers go
    /// through `hypotheses`, which validates the count.
    fn generate(&self, input_text: &str, num_hypotheses: usize) -> Result<Hypotheses>;

    /// `num_hypotheses` ranked hypotheses for `input_text`. Backends without
    /// native N-best output repeat their single answer.
    fn hypotheses(&self, input_text: &str, num_hypotheses: usize) -> Result<Hypotheses> {
        if num_hypotheses < 1 {
            return Err(Error::InvalidArgument(format!(
                "num_hypotheses must be at least 1, got {num_hypotheses}"
            )));
        }
        self.generate(input_text, num_hypotheses)
    }

    /// Best single translation.
    fn translate(&self, input_text: &str) -> Result<String> {
        self.hypotheses(input_text, 1)?
            .into_iter()
            .next()
            .map(|h| h.value)
            .ok_or_else(|| Error::BackendUnavailable(format!("{} produced no hypotheses", describe(self))))
    }
}

/// `"<from> → <to>"`.
pub fn describe<T: Translation + ?Sized>(translation: &T) -> String {
    format!("{} → {}", translation.from_lang(), translation.to_lang())
}

impl fmt::Debug for dyn Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({} -> {})", self.kind(), self.from_lang().code, self.to_lang().code)
    }
}

impl fmt::Display for dyn Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&describe(self))
    }
}
