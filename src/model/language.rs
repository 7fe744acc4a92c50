//! Language identity carried by every edge.

use serde::{Deserialize, Serialize};

/// The code + display name of a language.
///
/// Identity is the ISO 639 `code`; `name` is presentation only and takes no
/// part in equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageRef {
    pub code: String,
    pub name: String,
}

impl LanguageRef {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self { code: code.into(), name: name.into() }
    }
}

impl PartialEq for LanguageRef {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for LanguageRef {}

impl std::hash::Hash for LanguageRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl std::fmt::Display for LanguageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_code() {
        assert_eq!(LanguageRef::new("en", "English"), LanguageRef::new("en", "Anglais"));
        assert_ne!(LanguageRef::new("en", "English"), LanguageRef::new("es", "English"));
    }
}
