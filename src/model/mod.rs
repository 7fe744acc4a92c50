//! # Translation Data Model
//!
//! Plain DTOs shared by every layer: hypotheses, language identities and
//! package descriptors.
//!
//! Design rule: no backend handles here. This module is pure data: no I/O
//! beyond manifest parsing, no shared state.

pub mod hypothesis;
pub mod language;
pub mod package;

pub use hypothesis::{Hypothesis, Hypotheses, sort_best_first};
pub use language::LanguageRef;
pub use package::{Package, TRANSLATE_PACKAGE};
