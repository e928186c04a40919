//! Seam between the wrapper and whichever native core it drives.

use std::os::raw::c_char;

use crate::api::ffi;
use crate::native::domain::{Ownership, RawResult};

/// Function table of a native core.
///
/// Implementations must be callable from any thread. `VERSION_OWNERSHIP` is
/// fixed per build; the wrapper never inspects a pointer to guess it.
pub trait NativeCore: Send + Sync + 'static {
    /// Convention followed by [`NativeCore::version`].
    const VERSION_OWNERSHIP: Ownership;

    fn init(&self) -> bool;

    fn add(&self, a: i32, b: i32) -> i32;

    /// # Safety
    ///
    /// `input` must be null or point to a nul-terminated string that stays
    /// valid for the duration of the call.
    unsafe fn process_string(&self, input: *const c_char) -> RawResult;

    fn fibonacci(&self, n: i32) -> i64;

    fn version(&self) -> *const c_char;

    /// Convention the core reports at runtime, as a raw ABI value.
    fn version_ownership(&self) -> u32 {
        Self::VERSION_OWNERSHIP as u32
    }

    /// # Safety
    ///
    /// `ptr` must be null or a buffer this core handed out and that has not
    /// been released yet.
    unsafe fn free_string(&self, ptr: *mut c_char);
}

/// The core linked into this library, reached through its C ABI.
#[derive(Copy, Clone, Debug, Default)]
pub struct LinkedCore;

impl NativeCore for LinkedCore {
    const VERSION_OWNERSHIP: Ownership = Ownership::BUILD;

    fn init(&self) -> bool {
        ffi::rust_sdk_init()
    }

    fn add(&self, a: i32, b: i32) -> i32 {
        ffi::rust_sdk_add(a, b)
    }

    unsafe fn process_string(&self, input: *const c_char) -> RawResult {
        ffi::rust_sdk_process_string(input)
    }

    fn fibonacci(&self, n: i32) -> i64 {
        ffi::rust_sdk_fibonacci(n)
    }

    fn version(&self) -> *const c_char {
        ffi::rust_sdk_version()
    }

    fn version_ownership(&self) -> u32 {
        ffi::rust_sdk_version_ownership()
    }

    unsafe fn free_string(&self, ptr: *mut c_char) {
        ffi::rust_sdk_free_string(ptr)
    }
}
