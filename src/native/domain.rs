//! Types that cross the C ABI.

use std::os::raw::c_char;
use std::ptr;

/// Result of `rust_sdk_process_string`.
///
/// When `message` is non-null the caller owns it and must hand it back to
/// `rust_sdk_free_string` exactly once.
#[repr(C)]
#[derive(Debug)]
pub struct RawResult {
    pub success: bool,
    pub value: i32,
    pub message: *const c_char,
}

impl RawResult {
    /// Failure value for inputs the core refuses to look at.
    pub const fn rejected() -> Self {
        Self {
            success: false,
            value: -1,
            message: ptr::null(),
        }
    }
}

/// Ownership convention of the version string for one build.
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Ownership {
    /// Process-lifetime buffer; never released.
    Static = 0,
    /// Fresh buffer; the caller releases it through `rust_sdk_free_string`.
    CallerFrees = 1,
}

impl Ownership {
    /// Convention compiled into this build.
    pub const BUILD: Ownership = if cfg!(feature = "owned-version") {
        Ownership::CallerFrees
    } else {
        Ownership::Static
    };

    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Ownership::Static),
            1 => Some(Ownership::CallerFrees),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ownership::Static => "static",
            Ownership::CallerFrees => "caller-frees",
        }
    }
}
