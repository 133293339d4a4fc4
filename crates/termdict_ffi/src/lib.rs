//! FFI bridge crate for UI shells.
//! Exposes the dictionary session through plain, never-panicking functions.

pub mod api;
