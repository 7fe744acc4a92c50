//! Installed package descriptor.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use super::LanguageRef;

/// Package type that carries a translation model.
pub const TRANSLATE_PACKAGE: &str = "translate";

/// One installed model package, as reported by a `PackageSource`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    #[serde(rename = "type", default = "default_package_type")]
    pub package_type: String,
    pub from_code: String,
    pub from_name: String,
    pub to_code: String,
    pub to_name: String,
    #[serde(default)]
    pub package_path: PathBuf,
}

fn default_package_type() -> String {
    TRANSLATE_PACKAGE.to_string()
}

impl Package {
    pub fn new(
        from: (&str, &str),
        to: (&str, &str),
        package_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            package_type: default_package_type(),
            from_code: from.0.to_string(),
            from_name: from.1.to_string(),
            to_code: to.0.to_string(),
            to_name: to.1.to_string(),
            package_path: package_path.into(),
        }
    }

    /// Parse a package's `metadata.json` manifest.
    pub fn from_metadata_json(json: &str, package_path: impl Into<PathBuf>) -> crate::Result<Self> {
        let mut pkg: Package = serde_json::from_str(json)?;
        pkg.package_path = package_path.into();
        Ok(pkg)
    }

    /// Read `<package_path>/metadata.json`.
    pub fn load(package_path: impl Into<PathBuf>) -> crate::Result<Self> {
        let package_path = package_path.into();
        let json = std::fs::read_to_string(package_path.join("metadata.json"))?;
        Self::from_metadata_json(&json, package_path)
    }

    pub fn is_translate(&self) -> bool {
        self.package_type == TRANSLATE_PACKAGE
    }

    pub fn from_lang(&self) -> LanguageRef {
        LanguageRef::new(&self.from_code, &self.from_name)
    }

    pub fn to_lang(&self) -> LanguageRef {
        LanguageRef::new(&self.to_code, &self.to_name)
    }

    /// Directory holding the inference model.
    pub fn model_path(&self) -> PathBuf {
        self.package_path.join("model")
    }

    /// Subword tokenizer model file.
    pub fn tokenizer_path(&self) -> PathBuf {
        self.package_path.join("sentencepiece.model")
    }

    pub fn path(&self) -> &Path {
        &self.package_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_metadata_json() {
        let json = r#"{"type":"translate","from_code":"en","from_name":"English","to_code":"es","to_name":"Spanish"}"#;
        let pkg = Package::from_metadata_json(json, "/pkgs/en_es").unwrap();
        assert!(pkg.is_translate());
        assert_eq!(pkg.from_lang(), LanguageRef::new("en", "English"));
        assert_eq!(pkg.model_path(), PathBuf::from("/pkgs/en_es/model"));
        assert_eq!(pkg.tokenizer_path(), PathBuf::from("/pkgs/en_es/sentencepiece.model"));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = std::env::temp_dir().join(format!("pivot-translate-pkg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("metadata.json"),
            r#"{"type":"translate","from_code":"fr","from_name":"French","to_code":"en","to_name":"English"}"#,
        )
        .unwrap();

        let pkg = Package::load(&dir).unwrap();
        assert_eq!(pkg.to_lang(), LanguageRef::new("en", "English"));
        assert_eq!(pkg.path(), dir.as_path());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_manifest() {
        let err = Package::load("/definitely/not/a/package").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }

    #[test]
    fn test_missing_type_defaults_to_translate() {
        let json = r#"{"from_code":"de","from_name":"German","to_code":"en","to_name":"English"}"#;
        let pkg = Package::from_metadata_json(json, "/pkgs/de_en").unwrap();
        assert!(pkg.is_translate());
    }
}
