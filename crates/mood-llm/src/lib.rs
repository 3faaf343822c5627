//! LLM provider abstraction for tickermood
//!
//! This crate provides provider-agnostic access to the hosted generative
//! model used as the sentiment scoring oracle. It includes:
//!
//! - Message types for model communication
//! - Completion request/response types
//! - Provider trait for concrete implementations
//! - Retry policy with exponential backoff for transient failures
//! - Concrete provider implementations (behind feature flags)

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod retry;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LlmError, Result};
pub use messages::{Message, Role};
pub use provider::LlmProvider;
pub use retry::RetryPolicy;

// Provider implementations (feature-gated)
#[cfg(feature = "gemini")]
pub mod providers;
