//! Host-side values returned by the wrapper.

/// Converted result of a `process_string` call. Owns all of its data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub success: bool,
    pub value: i32,
    pub message: Option<String>,
}

/// Initialisation state of an [`Sdk`](super::Sdk). There is no teardown.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InitState {
    Uninitialized,
    Initialized,
}

/// Returned by `version()` when the core hands back no pointer.
pub const UNKNOWN_VERSION: &str = "unknown";
