//! Summary translation.
//!
//! The module uses a trait-based design so the pipeline never talks to a
//! model directly:
//! - [`ModelLoader`]: Constructs one translation engine from a model identifier
//! - [`Translator`]: Translates text with an already constructed engine
//! - [`TranslatorRegistry`]: One engine per configured language, built once per run
//!
//! # Degradation
//!
//! A model that fails to load disables its language for the whole run: every
//! article gets [`FieldOutcome::Failed`] for that column. A translation call
//! that fails only affects that one (article, language) cell.

use crate::config::LanguageModel;
use crate::errors::{ModelLoadError, TranslationError};
use crate::models::{FieldOutcome, Translation};
use crate::utils::truncate_for_log;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

pub mod inference;

/// Reason recorded for every cell of a language whose model did not load.
pub const MODEL_UNAVAILABLE: &str = "model unavailable";

/// Translates text with a loaded model.
pub trait Translator {
    /// Translate `text`, generating at most `max_length` tokens.
    async fn translate(&self, text: &str, max_length: usize) -> Result<String, TranslationError>;
}

/// Constructs translation engines by model identifier.
pub trait ModelLoader {
    /// The engine type this loader produces.
    type Engine: Translator;

    /// Resolve `model_id` and construct an engine for it.
    async fn load(&self, model_id: &str) -> Result<Self::Engine, ModelLoadError>;
}

/// A configured language and its engine, if the engine loaded.
struct LanguageEngine<T> {
    language: LanguageModel,
    engine: Option<T>,
}

/// Run-scoped translation engines, one per configured language.
///
/// Built once before the first article and only read afterwards. Languages
/// keep their configuration order, which is also the spreadsheet column order.
pub struct TranslatorRegistry<T> {
    engines: Vec<LanguageEngine<T>>,
    max_length: usize,
}

impl<T> fmt::Debug for TranslatorRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_map();
        for e in &self.engines {
            list.entry(&e.language.code, &e.engine.is_some());
        }
        list.finish()
    }
}

impl<T: Translator> TranslatorRegistry<T> {
    /// Load an engine for every language with `loader`.
    ///
    /// Load failures are logged and leave that language unavailable; this
    /// function itself never fails.
    #[instrument(level = "info", skip_all, fields(languages = languages.len()))]
    pub async fn load<L>(loader: &L, languages: &[LanguageModel], max_length: usize) -> Self
    where
        L: ModelLoader<Engine = T>,
    {
        let mut engines = Vec::with_capacity(languages.len());
        for language in languages {
            let t0 = Instant::now();
            let engine = match loader.load(&language.model).await {
                Ok(engine) => {
                    info!(
                        language = %language.code,
                        model = %language.model,
                        elapsed_ms = t0.elapsed().as_millis(),
                        "Translation engine ready"
                    );
                    Some(engine)
                }
                Err(e) => {
                    warn!(
                        language = %language.code,
                        model = %language.model,
                        error = %e,
                        "Failed to load translation model; language disabled for this run"
                    );
                    None
                }
            };
            engines.push(LanguageEngine {
                language: language.clone(),
                engine,
            });
        }
        Self {
            engines,
            max_length,
        }
    }

    /// Configured language codes in column order.
    pub fn languages(&self) -> Vec<&str> {
        self.engines
            .iter()
            .map(|e| e.language.code.as_str())
            .collect()
    }

    /// Whether `code` is configured and its engine loaded.
    pub fn is_available(&self, code: &str) -> bool {
        self.engines
            .iter()
            .any(|e| e.language.code == code && e.engine.is_some())
    }

    /// Translate `text` into every configured language, in order.
    #[instrument(level = "debug", skip_all, fields(chars = text.chars().count()))]
    pub async fn translate_all(&self, text: &str) -> Vec<Translation> {
        let mut translations = Vec::with_capacity(self.engines.len());
        for entry in &self.engines {
            let code = &entry.language.code;
            let outcome = match &entry.engine {
                None => {
                    warn!(language = %code, "Translation model unavailable; leaving cell empty");
                    FieldOutcome::Failed(MODEL_UNAVAILABLE.to_string())
                }
                Some(engine) => match engine.translate(text, self.max_length).await {
                    Ok(translated) => {
                        debug!(
                            language = %code,
                            preview = %truncate_for_log(&translated, 80),
                            "Translated summary"
                        );
                        FieldOutcome::Success(translated)
                    }
                    Err(e) => {
                        warn!(language = %code, error = %e, "Error during translation");
                        FieldOutcome::Failed(e.to_string())
                    }
                },
            };
            translations.push(Translation {
                language: code.clone(),
                outcome,
            });
        }
        translations
    }

    /// One `NotAttempted` entry per configured language.
    pub fn not_attempted(&self) -> Vec<Translation> {
        self.engines
            .iter()
            .map(|e| Translation {
                language: e.language.code.clone(),
                outcome: FieldOutcome::NotAttempted,
            })
            .collect()
    }
}
