//! Operations implemented by the native core.
//!
//! Everything here is plain Rust; `api::ffi` is the only place that deals in
//! raw pointers handed to foreign callers. All functions are safe to call
//! concurrently.

use std::ffi::CString;
use std::os::raw::c_char;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

/// Version reported by the core.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nul-terminated copy of [`VERSION`] with process lifetime.
pub static VERSION_NUL: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();

/// Largest index whose Fibonacci number fits in an `i64`.
pub const FIBONACCI_MAX_EXACT: i32 = 92;

static SETUP: Once = Once::new();
static LIVE_BUFFERS: AtomicUsize = AtomicUsize::new(0);

/// One-time core setup. Repeated calls are no-ops that report success.
pub fn init() -> bool {
    SETUP.call_once(|| {
        tracing::info!(version = VERSION, "native core initialised");
    });
    true
}

/// Two's-complement wrapping addition: `add(i32::MAX, 1) == i32::MIN`.
pub fn add(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

/// n-th Fibonacci number.
///
/// `n <= 0` yields 0. Indices past [`FIBONACCI_MAX_EXACT`] saturate at
/// `i64::MAX`.
pub fn fibonacci(n: i32) -> i64 {
    if n <= 0 {
        return 0;
    }
    if n > FIBONACCI_MAX_EXACT {
        return i64::MAX;
    }

    let (mut a, mut b) = (0i64, 1i64);
    for _ in 1..n {
        // Cannot overflow below the exact bound.
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    b
}

/// Length (in bytes) and human readable summary of an input.
pub fn describe(input: &[u8]) -> (i32, String) {
    let len = input.len();
    let text = String::from_utf8_lossy(input);
    let value = i32::try_from(len).unwrap_or(i32::MAX);
    (value, format!("Processed: {text} (length: {len})"))
}

/// Move a string across the boundary. The caller now owns the buffer.
pub fn hand_out(text: String) -> *mut c_char {
    let cstring = CString::new(text).unwrap_or_else(|err| {
        let mut bytes = err.into_vec();
        bytes.retain(|b| *b != 0);
        CString::new(bytes).unwrap_or_default()
    });
    LIVE_BUFFERS.fetch_add(1, Ordering::Relaxed);
    cstring.into_raw()
}

/// Take back a buffer produced by [`hand_out`]. Null is ignored.
///
/// # Safety
///
/// `ptr` must be null or a pointer returned by [`hand_out`] that has not been
/// reclaimed yet.
pub unsafe fn reclaim(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }
    drop(CString::from_raw(ptr));
    LIVE_BUFFERS.fetch_sub(1, Ordering::Relaxed);
}

/// Buffers handed out and not yet reclaimed.
pub fn live_buffers() -> usize {
    LIVE_BUFFERS.load(Ordering::Relaxed)
}
