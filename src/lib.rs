//! Native SDK core exposed through a C ABI, plus a safe Rust wrapper over it.
pub mod api;
pub mod common;
pub mod native;
pub mod sdk;

pub use common::{SdkCode, SdkConfig, SdkError, SdkResult};
pub use native::{Ownership, RawResult};
pub use sdk::{InitState, LinkedCore, NativeCore, ProcessOutcome, Sdk};
