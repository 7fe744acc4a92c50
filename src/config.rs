//! Runtime settings.

use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Which discovery strategy populates the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProviderKind {
    /// Installed model packages decoded locally.
    #[default]
    OpenNmt,
    /// A remote LibreTranslate-style API.
    LibreTranslate,
    /// Few-shot prompting of a completion model.
    OpenAi,
}

impl FromStr for ModelProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "opennmt" => Ok(Self::OpenNmt),
            "libretranslate" => Ok(Self::LibreTranslate),
            "openai" => Ok(Self::OpenAi),
            other => Err(Error::Config(format!("unknown model provider '{other}'"))),
        }
    }
}

/// Where packaged models run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Cpu,
    Cuda,
}

impl FromStr for Device {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            "cuda" => Ok(Self::Cuda),
            other => Err(Error::Config(format!("unknown device '{other}'"))),
        }
    }
}

/// Translation settings. Every field has a default, so partial JSON and a
/// bare environment both work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model_provider: ModelProviderKind,
    pub device: Device,
    /// Hypotheses requested when the caller does not say.
    pub num_hypotheses: usize,
    /// Lower bound on the beam; the beam is `max(num_hypotheses, min_beam_size)`.
    pub min_beam_size: usize,
    pub length_penalty: f32,
    pub max_batch_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_provider: ModelProviderKind::default(),
            device: Device::default(),
            num_hypotheses: 4,
            min_beam_size: 4,
            length_penalty: 0.2,
            max_batch_size: 32,
        }
    }
}

impl Settings {
    /// Read `PIVOT_*` environment variables over the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build from any key lookup; unset keys keep their defaults, set but
    /// unparseable keys are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            model_provider: parse_var(&lookup, "PIVOT_MODEL_PROVIDER", defaults.model_provider)?,
            device: parse_var(&lookup, "PIVOT_DEVICE", defaults.device)?,
            num_hypotheses: parse_var(&lookup, "PIVOT_NUM_HYPOTHESES", defaults.num_hypotheses)?,
            min_beam_size: parse_var(&lookup, "PIVOT_MIN_BEAM_SIZE", defaults.min_beam_size)?,
            length_penalty: parse_var(&lookup, "PIVOT_LENGTH_PENALTY", defaults.length_penalty)?,
            max_batch_size: parse_var(&lookup, "PIVOT_MAX_BATCH_SIZE", defaults.max_batch_size)?,
        })
    }

    /// Beam width for a request of `num_hypotheses` candidates.
    pub fn beam_size(&self, num_hypotheses: usize) -> usize {
        num_hypotheses.max(self.min_beam_size)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("{key}={raw:?}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_env() {
        let settings = Settings::from_lookup(|_| None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.beam_size(1), 4);
        assert_eq!(settings.beam_size(6), 6);
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PIVOT_MODEL_PROVIDER", "LibreTranslate"),
            ("PIVOT_DEVICE", "cuda"),
            ("PIVOT_NUM_HYPOTHESES", "2"),
        ]
        .into_iter()
        .collect();
        let settings = Settings::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(settings.model_provider, ModelProviderKind::LibreTranslate);
        assert_eq!(settings.device, Device::Cuda);
        assert_eq!(settings.num_hypotheses, 2);
        assert_eq!(settings.max_batch_size, 32);
    }

    #[test]
    fn test_bad_value_is_config_error() {
        let err = Settings::from_lookup(|k| (k == "PIVOT_NUM_HYPOTHESES").then(|| "many".into()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json_str(r#"{"model_provider":"openai","length_penalty":0.5}"#).unwrap();
        assert_eq!(settings.model_provider, ModelProviderKind::OpenAi);
        assert_eq!(settings.length_penalty, 0.5);
        assert_eq!(settings.min_beam_size, 4);
    }
}
