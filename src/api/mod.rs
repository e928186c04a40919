//! Public entry points for foreign function interfaces.
//!
//! `include/rust_spm_sdk.h` mirrors the symbols exported from [`ffi`].

pub mod ffi;
