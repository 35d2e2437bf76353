//! Model backend abstraction.

use crate::error::NluError;

/// A hosted generative model that turns a prompt into text.
///
/// The NLU client owns retries and parsing; a backend makes exactly one call
/// per `generate`.
#[async_trait::async_trait]
pub trait ModelBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    async fn generate(&self, system_instruction: &str, prompt: &str) -> Result<String, NluError>;
}
