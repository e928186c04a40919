//! C-compatible API consumed by the host-language package.
//!
//! Ownership rules:
//! - `rust_sdk_process_string` returns a message the caller must release with
//!   `rust_sdk_free_string`.
//! - `rust_sdk_version` returns a static buffer unless the crate is built with
//!   the `owned-version` feature; `rust_sdk_version_ownership` reports which.
//! - Last-error text is copied into caller buffers and never handed out.
//!   `rust_sdk_last_error_code` reports the matching `SdkCode`.
//!
//! Every function here may be called from any thread.

#![allow(clippy::not_unsafe_ptr_arg_deref)]

use std::cell::{Cell, RefCell};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::common::config::SdkConfig;
use crate::common::error::SdkCode;
use crate::common::log;
use crate::native::domain::{Ownership, RawResult};
use crate::native::service;

/// ABI revision; bump on any signature or ownership change.
pub const ABI_VERSION: u32 = 1;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
    static LAST_CODE: Cell<SdkCode> = const { Cell::new(SdkCode::Ok) };
}

fn set_last_error(code: SdkCode, message: &str) {
    tracing::warn!(error = message, code = code as u32, "native call rejected");
    LAST_CODE.with(|slot| slot.set(code));
    LAST_ERROR.with(|slot| {
        *slot.borrow_mut() = CString::new(message).ok();
    });
}

fn clear_last_error() {
    LAST_CODE.with(|slot| slot.set(SdkCode::Ok));
    LAST_ERROR.with(|slot| {
        *slot.borrow_mut() = None;
    });
}

/// ABI version to coordinate with the host layer.
#[no_mangle]
pub extern "C" fn rust_sdk_abi_version() -> u32 {
    ABI_VERSION
}

/// Initialize the core. Safe to call repeatedly.
#[no_mangle]
pub extern "C" fn rust_sdk_init() -> bool {
    service::init()
}

/// Install the tracing subscriber, configured from `RUST_SDK_LOG` and
/// `RUST_LOG`. Returns false if logging was already set up.
#[no_mangle]
pub extern "C" fn rust_sdk_init_logging() -> bool {
    match log::init_tracing(&SdkConfig::from_env()) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(%err, "logging not installed");
            false
        }
    }
}

/// Wrapping 32-bit addition.
#[no_mangle]
pub extern "C" fn rust_sdk_add(a: i32, b: i32) -> i32 {
    service::add(a, b)
}

/// Describe a nul-terminated string (caller must free `message`).
#[no_mangle]
pub extern "C" fn rust_sdk_process_string(input: *const c_char) -> RawResult {
    if input.is_null() {
        set_last_error(SdkCode::InvalidInput, "input pointer was null");
        return RawResult::rejected();
    }

    // SAFETY: non-null and, per the ABI contract, nul-terminated.
    let bytes = unsafe { CStr::from_ptr(input) }.to_bytes();
    let (value, message) = service::describe(bytes);
    tracing::debug!(len = bytes.len(), "processed string");
    clear_last_error();

    RawResult {
        success: true,
        value,
        message: service::hand_out(message),
    }
}

/// Fibonacci number; 0 for `n <= 0`, saturates at `i64::MAX` past n = 92.
#[no_mangle]
pub extern "C" fn rust_sdk_fibonacci(n: i32) -> i64 {
    service::fibonacci(n)
}

/// Version string. See `rust_sdk_version_ownership` for who releases it.
#[no_mangle]
pub extern "C" fn rust_sdk_version() -> *const c_char {
    match Ownership::BUILD {
        Ownership::Static => service::VERSION_NUL.as_ptr() as *const c_char,
        Ownership::CallerFrees => service::hand_out(service::VERSION.to_string()) as *const c_char,
    }
}

/// Ownership convention of `rust_sdk_version` for this build.
#[no_mangle]
pub extern "C" fn rust_sdk_version_ownership() -> u32 {
    Ownership::BUILD as u32
}

/// Free strings allocated by the core.
///
/// Null is ignored. Passing any other pointer not returned by this core (or
/// the static version buffer) is undefined behaviour.
#[no_mangle]
pub extern "C" fn rust_sdk_free_string(ptr: *mut c_char) {
    // SAFETY: the caller upholds the ownership contract above.
    unsafe { service::reclaim(ptr) }
}

/// Buffers handed out and not yet released.
#[no_mangle]
pub extern "C" fn rust_sdk_live_buffers() -> usize {
    service::live_buffers()
}

/// Length in bytes of this thread's last error, excluding the terminator.
#[no_mangle]
pub extern "C" fn rust_sdk_last_error_length() -> usize {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|msg| msg.as_bytes().len())
            .unwrap_or(0)
    })
}

/// Copy this thread's last error into `buffer`, truncating to `capacity - 1`
/// bytes. Returns the number of bytes copied.
#[no_mangle]
pub extern "C" fn rust_sdk_last_error_message(buffer: *mut c_char, capacity: usize) -> usize {
    if buffer.is_null() || capacity == 0 {
        return 0;
    }
    LAST_ERROR.with(|slot| match slot.borrow().as_ref() {
        Some(message) => {
            let bytes = message.as_bytes();
            let to_copy = bytes.len().min(capacity - 1);
            // SAFETY: the caller guarantees `capacity` writable bytes.
            unsafe {
                ptr::copy_nonoverlapping(bytes.as_ptr() as *const c_char, buffer, to_copy);
                *buffer.add(to_copy) = 0;
            }
            to_copy
        }
        None => 0,
    })
}

/// `SdkCode` of this thread's last error; `Ok` (0) when there is none.
#[no_mangle]
pub extern "C" fn rust_sdk_last_error_code() -> u32 {
    LAST_CODE.with(|slot| slot.get() as u32)
}

/// Clear this thread's last error.
#[no_mangle]
pub extern "C" fn rust_sdk_clear_last_error() {
    clear_last_error();
}
