use async_trait::async_trait;
use reply_core::{GenerationRequest, Result};

use crate::protocol::BackendResponse;

/// Sends a rendered prompt to a generation backend.
///
/// Implementations make exactly one HTTP attempt per call.
#[async_trait]
pub trait ReplyBackend: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// # Arguments
    /// * `prompt` - Fully rendered prompt text
    /// * `request` - Supplies model and token budget
    async fn generate(&self, prompt: &str, request: &GenerationRequest) -> Result<BackendResponse>;
}
