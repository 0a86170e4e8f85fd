//! Helpers shared by the unit tests: a local HTTP fixture server and
//! deterministic stand-ins for the extractor and the translation models.

use crate::errors::{ExtractionError, ModelLoadError, TranslationError};
use crate::models::ExtractedArticle;
use crate::scrapers::ContentExtractor;
use crate::translate::{ModelLoader, Translator};
use axum::Router;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::net::TcpListener;

/// Serve `app` on an ephemeral local port and return its base URL
/// (no trailing slash). The server lives until the test runtime shuts down.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Returns canned articles; any URL without one fails to extract.
#[derive(Default)]
pub struct FakeExtractor {
    pages: HashMap<String, ExtractedArticle>,
    requested: Mutex<Vec<String>>,
}

impl FakeExtractor {
    pub fn with_page(mut self, url: &str, title: Option<&str>, body: Option<&str>) -> Self {
        self.pages.insert(
            url.to_string(),
            ExtractedArticle::new(title.map(str::to_string), body.map(str::to_string)),
        );
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl ContentExtractor for FakeExtractor {
    async fn extract(&self, url: &str) -> Result<ExtractedArticle, ExtractionError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ExtractionError::InvalidUrl {
                url: url.to_string(),
                source: url::ParseError::EmptyHost,
            })
    }
}

/// Prefixes text with the last segment of its model id, e.g.
/// `"[opus-mt-en-hi] text"`.
///
/// Fails when `max_length` is zero, and fails for models ending in `-te`
/// when the text contains `FAIL`.
#[derive(Debug)]
pub struct FakeTranslator {
    tag: String,
}

impl FakeTranslator {
    pub fn new(model_id: &str) -> Self {
        let tag = model_id.rsplit('/').next().unwrap_or(model_id).to_string();
        Self { tag }
    }
}

impl Translator for FakeTranslator {
    async fn translate(&self, text: &str, max_length: usize) -> Result<String, TranslationError> {
        if max_length == 0 {
            return Err(TranslationError::EmptyResponse);
        }
        if self.tag.ends_with("-te") && text.contains("FAIL") {
            return Err(TranslationError::Api {
                status: 500,
                message: "fake failure".to_string(),
            });
        }
        Ok(format!("[{}] {}", self.tag, text))
    }
}

/// Builds [`FakeTranslator`]s and records every load.
#[derive(Default)]
pub struct FakeLoader {
    failing: Vec<String>,
    loaded: Mutex<Vec<String>>,
}

impl FakeLoader {
    /// A loader that refuses the given model ids.
    pub fn failing(models: &[&str]) -> Self {
        Self {
            failing: models.iter().map(|m| m.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Model ids passed to `load`, in call order.
    pub fn loaded(&self) -> Vec<String> {
        self.loaded.lock().unwrap().clone()
    }
}

impl ModelLoader for FakeLoader {
    type Engine = FakeTranslator;

    async fn load(&self, model_id: &str) -> Result<FakeTranslator, ModelLoadError> {
        self.loaded.lock().unwrap().push(model_id.to_string());
        if self.failing.iter().any(|m| m == model_id) {
            return Err(ModelLoadError::NotTranslation {
                model: model_id.to_string(),
                pipeline: "none".to_string(),
            });
        }
        Ok(FakeTranslator::new(model_id))
    }
}
