//! Shared utilities for tickermood
//!
//! This crate provides common functionality used across the tickermood
//! workspace, including logging setup and environment bootstrap.

pub mod env;
pub mod logging;

pub use env::load_dotenv;
pub use logging::init_tracing;
