//! Concrete oracle provider implementations
//!
//! This module contains implementations of the LlmProvider trait for
//! hosted model services.

#[cfg(feature = "gemini")]
pub mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::GeminiProvider;
