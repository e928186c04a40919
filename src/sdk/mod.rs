//! Safe wrapper over the native core.
//!
//! Callers never see a raw pointer: every buffer the core hands out is
//! adopted by a guard the moment it crosses the boundary.

pub mod bridge;
pub mod buffer;
pub mod domain;
pub mod service;
pub mod workers;

pub use bridge::{LinkedCore, NativeCore};
pub use domain::{InitState, ProcessOutcome, UNKNOWN_VERSION};
pub use service::Sdk;
