//! GeminiApiBackend - Direct REST API implementation for Gemini.
//!
//! Sends the NLU system instruction and user prompt to `generateContent` and
//! asks for a JSON response body.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use voicebook_core::config::NluSettings;

use crate::backend::ModelBackend;
use crate::error::NluError;

/// Default model used when the settings do not name one.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const API_KEY_HEADER: &str = "x-goog-api-key";
const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";

/// Backend implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiBackend {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiApiBackend {
    /// Creates a new backend with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Builds a backend from settings, or `None` without a credential.
    pub fn from_settings(settings: &NluSettings) -> Option<Self> {
        let api_key = settings.credential()?;
        let model = if settings.model_name.trim().is_empty() {
            DEFAULT_GEMINI_MODEL
        } else {
            settings.model_name.trim()
        };
        Some(Self::new(api_key, model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{model}:generateContent",
            self.base_url.trim_end_matches('/'),
            model = self.model
        )
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, NluError> {
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| NluError::Transport(format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| NluError::Decode(format!("Failed to parse Gemini response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl ModelBackend for GeminiApiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, system_instruction: &str, prompt: &str) -> Result<String, NluError> {
        let request = GenerateContentRequest::new(system_instruction, prompt);
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn new(system_instruction: &str, prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: system_instruction.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        }
    }
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, NluError> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.trim().is_empty())
        .ok_or(NluError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> NluError {
    let parsed = serde_json::from_str::<ErrorWrapper>(&body).ok();
    let status_text = parsed
        .as_ref()
        .and_then(|wrapper| wrapper.error.status.clone())
        .unwrap_or_default();

    let message = match parsed {
        Some(wrapper) => {
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        }
        None => body.clone(),
    };

    let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
        || status_text == RESOURCE_EXHAUSTED
        || body.contains(RESOURCE_EXHAUSTED);

    NluError::Http {
        status: status.as_u16(),
        message,
        rate_limited,
        retry_after,
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    if let Ok(seconds) = value.trim().parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    // Only the delay-seconds form is recognised
    None
}
