//! Intent resolution: transcript plus context in, decoded intent out.

use std::sync::Arc;
use voicebook_core::config::NluSettings;
use voicebook_core::{NluContext, NluResponse};

use crate::backend::ModelBackend;
use crate::backoff::{BackoffPolicy, Sleeper, TokioSleeper, retry_with_backoff};
use crate::error::NluError;
use crate::gemini_api_backend::GeminiApiBackend;
use crate::keyword_matcher::KeywordIntentMatcher;
use crate::prompt::{NLU_SYSTEM_INSTRUCTION, build_user_prompt};
use crate::response_parser::parse_nlu_response;

/// Turns a transcript into an intent.
///
/// Resolution never fails: transport errors, exhausted retries and
/// malformed output all come back as `unknown`.
#[async_trait::async_trait]
pub trait IntentResolver: Send + Sync {
    async fn resolve(&self, transcript: &str, context: &NluContext) -> NluResponse;
}

/// NLU client backed by a hosted model, with rate-limit retries.
pub struct NluClient {
    backend: Arc<dyn ModelBackend>,
    policy: BackoffPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl NluClient {
    /// Creates a client with the default policy (5 attempts, 1s doubling).
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self {
            backend,
            policy: BackoffPolicy::default(),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_policy(mut self, policy: BackoffPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the sleeper used between retries.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    async fn request(&self, prompt: &str) -> Result<String, NluError> {
        let backend = self.backend.as_ref();
        let instruction = NLU_SYSTEM_INSTRUCTION.as_str();

        retry_with_backoff(
            &self.policy,
            self.sleeper.as_ref(),
            NluError::is_rate_limited,
            |attempt| {
                tracing::debug!(
                    "[NluClient] Sending command to {} (attempt {})",
                    backend.name(),
                    attempt
                );
                backend.generate(instruction, prompt)
            },
        )
        .await
    }
}

#[async_trait::async_trait]
impl IntentResolver for NluClient {
    async fn resolve(&self, transcript: &str, context: &NluContext) -> NluResponse {
        let prompt = build_user_prompt(transcript, context);

        match self.request(&prompt).await {
            Ok(text) => {
                let response = parse_nlu_response(&text);
                tracing::info!(
                    "[NluClient] Resolved '{}' -> {} ({} slots)",
                    transcript,
                    response.intent,
                    response.slots.len()
                );
                response
            }
            Err(err) if err.is_rate_limited() => {
                tracing::error!(
                    "[NluClient] Still rate limited after {} attempts: {}",
                    self.policy.max_attempts,
                    err
                );
                NluResponse::unknown()
            }
            Err(err) => {
                tracing::error!("[NluClient] Error processing intent: {}", err);
                NluResponse::unknown()
            }
        }
    }
}

/// Picks the resolver for the given settings.
///
/// With a credential the Gemini-backed client is used; without one the
/// offline keyword matcher takes over.
pub fn resolver_from_settings(settings: &NluSettings) -> Arc<dyn IntentResolver> {
    match GeminiApiBackend::from_settings(settings) {
        Some(backend) => {
            tracing::info!("[NluClient] Using Gemini model '{}'", backend.model());
            let policy = BackoffPolicy::new(settings.max_attempts, settings.initial_backoff());
            Arc::new(NluClient::new(Arc::new(backend)).with_policy(policy))
        }
        None => {
            tracing::warn!(
                "[NluClient] No API key configured; falling back to offline keyword matching"
            );
            Arc::new(KeywordIntentMatcher::new())
        }
    }
}
