//! Error handling primitives shared by the core and the wrapper.
//!
//! Only `SdkCode` crosses the FFI boundary; `SdkError` stays on the Rust side.

use thiserror::Error;

/// Stable error codes that cross the FFI boundary.
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SdkCode {
    /// Success code used as a sentinel.
    Ok = 0,
    /// Core setup reported failure.
    InitFailed = 1,
    /// Input could not be handed to the core.
    InvalidInput = 2,
    /// Background execution context is gone.
    PoolClosed = 3,
    /// Wrapper and core disagree on a buffer convention.
    OwnershipMismatch = 4,
    /// Catch-all for bugs.
    Internal = 5,
}

/// Canonical error type for the wrapper.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SdkError {
    #[error("native core initialisation failed")]
    InitFailed,
    #[error("input contains an interior nul byte at offset {0}")]
    InteriorNul(usize),
    #[error("worker pool is closed")]
    PoolClosed,
    #[error("worker dropped the task before producing a result")]
    TaskDropped,
    #[error("version ownership mismatch: wrapper expects {expected}, core reports {reported}")]
    OwnershipMismatch { expected: u32, reported: u32 },
}

/// Result alias used throughout the crate.
pub type SdkResult<T> = Result<T, SdkError>;

impl SdkError {
    /// Machine parsable code for this error.
    pub const fn code(&self) -> SdkCode {
        match self {
            SdkError::InitFailed => SdkCode::InitFailed,
            SdkError::InteriorNul(_) => SdkCode::InvalidInput,
            SdkError::PoolClosed => SdkCode::PoolClosed,
            SdkError::TaskDropped => SdkCode::Internal,
            SdkError::OwnershipMismatch { .. } => SdkCode::OwnershipMismatch,
        }
    }
}

impl From<std::ffi::NulError> for SdkError {
    fn from(err: std::ffi::NulError) -> Self {
        SdkError::InteriorNul(err.nul_position())
    }
}
