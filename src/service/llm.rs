//! Generative model client
//!
//! [`ModelClient`] is the seam the analysis service depends on. [`GeminiClient`]
//! talks to the Generative Language REST API; tests substitute their own
//! implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use thiserror::Error;

use crate::model::ModelConfig;
use crate::service::image::PreparedImage;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    #[error("model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model returned no text")]
    EmptyResponse,

    #[error("failed to create model client: {0}")]
    Client(String),
}

/// Text generation, optionally grounded on an image
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Model identifier, for logging
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;

    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &PreparedImage,
    ) -> Result<String, ModelError>;
}

/// Gemini `generateContent` client
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        config: &ModelConfig,
    ) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::Client(e.to_string()))?;

        let model = model.into();
        tracing::info!(model = %model, "Model client initialized");

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model,
        })
    }

    async fn generate_content(&self, body: Value) -> Result<String, ModelError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let start = Instant::now();

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .inspect_err(|e| {
                tracing::error!(model = %self.model, error = %e, "Model request failed");
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                model = %self.model,
                status = status.as_u16(),
                "Model returned error status"
            );
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response.json().await?;
        let text = candidate_text(&payload).ok_or(ModelError::EmptyResponse)?;

        tracing::info!(
            model = %self.model,
            elapsed_ms = start.elapsed().as_millis() as u64,
            response_chars = text.len(),
            "Model call completed"
        );

        Ok(text)
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        self.generate_content(request_body(prompt, None)).await
    }

    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &PreparedImage,
    ) -> Result<String, ModelError> {
        self.generate_content(request_body(prompt, Some(image)))
            .await
    }
}

fn request_body(prompt: &str, image: Option<&PreparedImage>) -> Value {
    let mut parts = vec![json!({ "text": prompt })];
    if let Some(image) = image {
        parts.push(json!({
            "inline_data": {
                "mime_type": image.mime_type,
                "data": STANDARD.encode(&image.bytes),
            }
        }));
    }
    json!({ "contents": [{ "parts": parts }] })
}

/// Concatenated text of `candidates[0].content.parts[*].text`
fn candidate_text(payload: &Value) -> Option<String> {
    let parts = payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
