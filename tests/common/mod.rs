#![allow(dead_code)]

use std::ffi::CString;
use std::os::raw::c_char;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Mutex;
use std::thread;

use rust_spm_sdk::{NativeCore, Ownership, RawResult};

/// Core double that counts `init` calls and releases its own buffers.
#[derive(Default)]
pub struct CountingCore {
    pub init_calls: AtomicUsize,
}

impl NativeCore for CountingCore {
    const VERSION_OWNERSHIP: Ownership = Ownership::CallerFrees;

    fn init(&self) -> bool {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        thread::yield_now();
        true
    }

    fn add(&self, a: i32, b: i32) -> i32 {
        a.wrapping_add(b)
    }

    unsafe fn process_string(&self, _input: *const c_char) -> RawResult {
        RawResult::rejected()
    }

    fn fibonacci(&self, _n: i32) -> i64 {
        0
    }

    fn version(&self) -> *const c_char {
        CString::new("0.0.0").unwrap().into_raw()
    }

    unsafe fn free_string(&self, ptr: *mut c_char) {
        if !ptr.is_null() {
            drop(CString::from_raw(ptr));
        }
    }
}

/// Core double whose `fibonacci` blocks until released through `gate`.
pub struct GatedCore {
    pub gate: Mutex<Receiver<()>>,
}

impl NativeCore for GatedCore {
    const VERSION_OWNERSHIP: Ownership = Ownership::Static;

    fn init(&self) -> bool {
        true
    }

    fn add(&self, a: i32, b: i32) -> i32 {
        a.wrapping_add(b)
    }

    unsafe fn process_string(&self, _input: *const c_char) -> RawResult {
        RawResult::rejected()
    }

    fn fibonacci(&self, n: i32) -> i64 {
        let gate = self.gate.lock().unwrap();
        gate.recv().unwrap();
        rust_spm_sdk::native::service::fibonacci(n)
    }

    fn version(&self) -> *const c_char {
        std::ptr::null()
    }

    unsafe fn free_string(&self, _ptr: *mut c_char) {}
}
