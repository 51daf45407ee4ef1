//! ALFA AEAD - C ABI bindings
//!
//! Exposes seal/open to C callers over raw pointer + length pairs.
//! Return values: the number of bytes written, or `-1` from
//! `alfa_aead_open` when authentication fails. Misuse (unknown algorithm,
//! null pointer with a non-zero length, bad key/tag length, short output
//! buffer) aborts the process, exactly like the Rust API.
//!
//! Input and output buffers must not overlap.

#![cfg(feature = "ffi")]

use std::slice;

use crate::crypto::contract::{self, Stage};
use crate::crypto::{self as aead, Algorithm};

/// Returned by `alfa_aead_open` when the tag does not verify
pub const ALFA_AEAD_AUTH_FAILED: isize = -1;

fn algorithm_from_raw(id: u32) -> Algorithm {
    match Algorithm::from_id(id) {
        Some(algorithm) => algorithm,
        None => contract::violated(Stage::Init, format_args!("unknown algorithm id {}", id)),
    }
}

/// # Safety
/// `ptr` must be null with `len == 0`, or valid for reads of `len` bytes.
unsafe fn input<'a>(ptr: *const u8, len: usize, what: &str) -> &'a [u8] {
    if len == 0 {
        return &[];
    }
    if ptr.is_null() {
        contract::violated(Stage::Init, format_args!("{} is null but length is {}", what, len));
    }
    // SAFETY: non-null and valid for `len` bytes per the caller contract
    unsafe { slice::from_raw_parts(ptr, len) }
}

/// # Safety
/// `ptr` must be null with `len == 0`, or valid for writes of `len` bytes
/// and not aliased by any other argument.
unsafe fn output<'a>(ptr: *mut u8, len: usize) -> &'a mut [u8] {
    if len == 0 {
        return &mut [];
    }
    if ptr.is_null() {
        contract::violated(Stage::Init, format_args!("dest is null but capacity is {}", len));
    }
    // SAFETY: non-null, writable for `len` bytes and unaliased per the caller contract
    unsafe { slice::from_raw_parts_mut(ptr, len) }
}

/// Seal `plaintext` into `dest` as `ciphertext || tag`.
///
/// # Safety
/// Every pointer must be valid for its paired length (or null with length
/// zero) and `dest` must not overlap any input.
#[no_mangle]
pub unsafe extern "C" fn alfa_aead_seal(
    algorithm: u32,
    plaintext: *const u8,
    plaintext_len: usize,
    aad: *const u8,
    aad_len: usize,
    key: *const u8,
    key_len: usize,
    nonce: *const u8,
    nonce_len: usize,
    dest: *mut u8,
    dest_capacity: usize,
) -> isize {
    let algorithm = algorithm_from_raw(algorithm);
    // SAFETY: forwarded caller contract
    let (plaintext, aad, key, nonce, dest) = unsafe {
        (
            input(plaintext, plaintext_len, "plaintext"),
            input(aad, aad_len, "aad"),
            input(key, key_len, "key"),
            input(nonce, nonce_len, "nonce"),
            output(dest, dest_capacity),
        )
    };

    let written = aead::seal(algorithm, plaintext, aad, key, nonce, dest);
    written as isize
}

/// Open `ciphertext` with a separate 16-byte `tag` into `dest`.
///
/// Returns the plaintext length, or [`ALFA_AEAD_AUTH_FAILED`]; in the latter
/// case `dest` holds zeroes and must be discarded.
///
/// # Safety
/// Every pointer must be valid for its paired length (or null with length
/// zero) and `dest` must not overlap any input.
#[no_mangle]
pub unsafe extern "C" fn alfa_aead_open(
    algorithm: u32,
    ciphertext: *const u8,
    ciphertext_len: usize,
    aad: *const u8,
    aad_len: usize,
    tag: *const u8,
    tag_len: usize,
    key: *const u8,
    key_len: usize,
    nonce: *const u8,
    nonce_len: usize,
    dest: *mut u8,
    dest_capacity: usize,
) -> isize {
    let algorithm = algorithm_from_raw(algorithm);
    // SAFETY: forwarded caller contract
    let (ciphertext, aad, tag, key, nonce, dest) = unsafe {
        (
            input(ciphertext, ciphertext_len, "ciphertext"),
            input(aad, aad_len, "aad"),
            input(tag, tag_len, "tag"),
            input(key, key_len, "key"),
            input(nonce, nonce_len, "nonce"),
            output(dest, dest_capacity),
        )
    };

    match aead::open(algorithm, ciphertext, aad, tag, key, nonce, dest) {
        Ok(n) => n as isize,
        Err(_) => ALFA_AEAD_AUTH_FAILED,
    }
}

/// Does nothing. Used to measure the cost of crossing the C boundary.
#[no_mangle]
pub extern "C" fn alfa_aead_noop() {}
