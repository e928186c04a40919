//! Shared utilities used by both sides of the boundary.
pub mod config;
pub mod error;
pub mod log;

pub use config::SdkConfig;
pub use error::{SdkCode, SdkError, SdkResult};
