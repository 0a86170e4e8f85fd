//! Translation through a HuggingFace-compatible inference endpoint.
//!
//! Loading a model means asking the hub for its metadata and checking that
//! it is a translation model; no weights are downloaded locally. Each
//! translation is then one POST to `<inference_url><model_id>`.

use crate::errors::{ModelLoadError, TranslationError};
use crate::translate::{ModelLoader, Translator};
use crate::utils::{parse_base_url, truncate_for_log};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, instrument};
use url::Url;

#[derive(Deserialize)]
struct ModelInfo {
    pipeline_tag: Option<String>,
}

#[derive(Serialize)]
struct TranslationRequest<'a> {
    inputs: &'a str,
    parameters: TranslationParameters,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct TranslationParameters {
    max_length: usize,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct TranslationOutput {
    translation_text: String,
}

#[derive(Deserialize)]
struct ApiError {
    error: String,
}

fn authorize(request: RequestBuilder, api_token: Option<&str>) -> RequestBuilder {
    match api_token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Resolves models on the hub and hands out [`InferenceTranslator`]s.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    model_info_url: Url,
    inference_url: Url,
    api_token: Option<String>,
}

impl fmt::Debug for InferenceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceClient")
            .field("model_info_url", &self.model_info_url.as_str())
            .field("inference_url", &self.inference_url.as_str())
            .field("api_token", &self.api_token.as_deref().map(|_| "<redacted>"))
            .finish()
    }
}

impl InferenceClient {
    pub fn new(
        client: Client,
        model_info_url: &str,
        inference_url: &str,
        api_token: Option<String>,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            client,
            model_info_url: parse_base_url(model_info_url)?,
            inference_url: parse_base_url(inference_url)?,
            api_token,
        })
    }
}

impl ModelLoader for InferenceClient {
    type Engine = InferenceTranslator;

    #[instrument(level = "info", skip_all, fields(model = %model_id))]
    async fn load(&self, model_id: &str) -> Result<InferenceTranslator, ModelLoadError> {
        let endpoint = |base: &Url| {
            base.join(model_id).map_err(|source| ModelLoadError::Endpoint {
                model: model_id.to_string(),
                source,
            })
        };
        let http = |source: reqwest::Error| ModelLoadError::Http {
            model: model_id.to_string(),
            source,
        };

        let info_url = endpoint(&self.model_info_url)?;
        debug!(%info_url, "Resolving model");
        let info: ModelInfo = authorize(self.client.get(info_url), self.api_token.as_deref())
            .send()
            .await
            .map_err(http)?
            .error_for_status()
            .map_err(http)?
            .json()
            .await
            .map_err(http)?;

        match info.pipeline_tag.as_deref() {
            Some("translation") => {}
            other => {
                return Err(ModelLoadError::NotTranslation {
                    model: model_id.to_string(),
                    pipeline: other.unwrap_or("none").to_string(),
                });
            }
        }

        let endpoint = endpoint(&self.inference_url)?;
        info!(%endpoint, "Resolved translation model");
        Ok(InferenceTranslator {
            client: self.client.clone(),
            endpoint,
            api_token: self.api_token.clone(),
        })
    }
}

/// A translation engine bound to one model's inference endpoint.
pub struct InferenceTranslator {
    client: Client,
    endpoint: Url,
    api_token: Option<String>,
}

impl fmt::Debug for InferenceTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceTranslator")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_token", &self.api_token.as_deref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Translator for InferenceTranslator {
    #[instrument(level = "debug", skip_all, fields(endpoint = %self.endpoint))]
    async fn translate(&self, text: &str, max_length: usize) -> Result<String, TranslationError> {
        let t0 = Instant::now();
        let request = TranslationRequest {
            inputs: text,
            parameters: TranslationParameters { max_length },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };
        let response = authorize(
            self.client.post(self.endpoint.clone()).json(&request),
            self.api_token.as_deref(),
        )
        .send()
        .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(
            status = status.as_u16(),
            elapsed_ms = t0.elapsed().as_millis(),
            "Inference call finished"
        );

        // The endpoint reports some failures as `{"error": ...}` with a 200.
        if let Ok(ApiError { error }) = serde_json::from_str::<ApiError>(&body) {
            return Err(TranslationError::Api {
                status: status.as_u16(),
                message: error,
            });
        }
        if !status.is_success() {
            return Err(TranslationError::Api {
                status: status.as_u16(),
                message: truncate_for_log(&body, 200),
            });
        }

        let outputs: Vec<TranslationOutput> = serde_json::from_str(&body)?;
        outputs
            .into_iter()
            .next()
            .map(|o| o.translation_text)
            .ok_or(TranslationError::EmptyResponse)
    }
}
