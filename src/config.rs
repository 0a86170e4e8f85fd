//! Run configuration loaded from an optional YAML file.
//!
//! Every key is optional; a missing file section falls back to the built-in
//! defaults, which translate into Hindi and Telugu with the Helsinki-NLP
//! OPUS-MT models.
//!
//! ```yaml
//! languages:
//!   - code: hi
//!     model: Helsinki-NLP/opus-mt-en-hi
//!   - code: te
//!     model: Helsinki-NLP/opus-mt-en-te
//! inference_url: https://api-inference.huggingface.co/models/
//! model_info_url: https://huggingface.co/api/models/
//! max_translation_length: 400
//! user_agent: news_translate/0.1
//! ```

use crate::errors::ConfigError;
use crate::utils::parse_base_url;
use itertools::Itertools;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, instrument};

/// A target language and the model that translates into it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageModel {
    /// Column header and log label, e.g. `"hi"`.
    pub code: String,
    /// Model identifier on the hub, e.g. `"Helsinki-NLP/opus-mt-en-hi"`.
    pub model: String,
}

impl LanguageModel {
    pub fn new(code: &str, model: &str) -> Self {
        Self {
            code: code.to_string(),
            model: model.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub languages: Vec<LanguageModel>,
    /// Base URL the model identifier is appended to for inference calls.
    pub inference_url: String,
    /// Base URL the model identifier is appended to when resolving a model.
    pub model_info_url: String,
    /// Upper bound on generated tokens per translation.
    pub max_translation_length: usize,
    pub user_agent: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            languages: vec![
                LanguageModel::new("hi", "Helsinki-NLP/opus-mt-en-hi"),
                LanguageModel::new("te", "Helsinki-NLP/opus-mt-en-te"),
            ],
            inference_url: "https://api-inference.huggingface.co/models/".to_string(),
            model_info_url: "https://huggingface.co/api/models/".to_string(),
            max_translation_length: 400,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config at `path`, or the defaults when no path is given.
    #[instrument(level = "info", skip_all)]
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            info!("No config file given; using built-in defaults");
            return Ok(Self::default());
        };
        let yaml = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;
        let config = Self::from_yaml(&yaml)?;
        info!(
            config_path = %path.display(),
            languages = %config.languages.iter().map(|l| l.code.as_str()).join(","),
            "Loaded configuration"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.languages.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one target language is required".to_string(),
            ));
        }
        if let Some(blank) = self
            .languages
            .iter()
            .find(|l| l.code.trim().is_empty() || l.model.trim().is_empty())
        {
            return Err(ConfigError::Invalid(format!(
                "language entry {blank:?} needs both a code and a model"
            )));
        }
        let duplicates = self
            .languages
            .iter()
            .map(|l| l.code.as_str())
            .duplicates()
            .join(", ");
        if !duplicates.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "duplicate language codes: {duplicates}"
            )));
        }
        for (key, raw) in [
            ("inference_url", &self.inference_url),
            ("model_info_url", &self.model_info_url),
        ] {
            parse_base_url(raw)
                .map_err(|e| ConfigError::Invalid(format!("{key} {raw:?}: {e}")))?;
        }
        if self.max_translation_length == 0 {
            return Err(ConfigError::Invalid(
                "max_translation_length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
