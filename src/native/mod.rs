//! Native core: the operations behind the C ABI.
//!
//! The core owns every buffer it hands out until the caller passes it back to
//! `rust_sdk_free_string`.

pub mod domain;
pub mod service;

pub use domain::{Ownership, RawResult};
