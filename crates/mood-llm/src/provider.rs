//! Oracle provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for scoring-oracle providers
///
/// Implementations of this trait provide access to a hosted generative
/// model (e.g., Gemini). Stubs implementing it drive the analyzer tests
/// without touching the network.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion from the model
    ///
    /// # Arguments
    ///
    /// * `request` - The completion request with messages and parameters
    ///
    /// # Returns
    ///
    /// The completion response with the assistant's message and metadata
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;
}
