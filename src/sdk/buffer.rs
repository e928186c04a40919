//! Guards for buffers that cross the boundary.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr::NonNull;

use super::bridge::NativeCore;

/// A core-allocated C string owned by the wrapper.
///
/// Released through the core exactly once, when the guard drops.
pub struct OwnedCString<'a, C: NativeCore> {
    ptr: NonNull<c_char>,
    core: &'a C,
}

impl<'a, C: NativeCore> OwnedCString<'a, C> {
    /// Take ownership of `ptr`. Returns `None` for null, which needs no release.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a nul-terminated buffer allocated by `core`
    /// whose ownership was just transferred to the caller. Nothing else may
    /// release it afterwards.
    pub unsafe fn adopt(core: &'a C, ptr: *const c_char) -> Option<Self> {
        NonNull::new(ptr as *mut c_char).map(|ptr| Self { ptr, core })
    }

    pub fn as_c_str(&self) -> &CStr {
        // SAFETY: valid and nul-terminated until `drop`, per `adopt`.
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
    }

    /// Copy into a host string; invalid UTF-8 is replaced.
    pub fn to_string_lossy(&self) -> String {
        self.as_c_str().to_string_lossy().into_owned()
    }
}

impl<C: NativeCore> Drop for OwnedCString<'_, C> {
    fn drop(&mut self) {
        // SAFETY: sole owner since `adopt`; this is the only release point.
        unsafe { self.core.free_string(self.ptr.as_ptr()) }
    }
}

/// Copy a buffer with process lifetime. Never released.
///
/// # Safety
///
/// `ptr` must be null or point to a nul-terminated buffer that lives for the
/// rest of the process.
pub unsafe fn borrow_static(ptr: *const c_char) -> Option<&'static CStr> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr))
    }
}
