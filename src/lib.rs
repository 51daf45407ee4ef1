//! # ALFA AEAD
//!
//! Uniform authenticated encryption with associated data over
//! caller-managed buffers.
//!
//! ## Architecture
//!
//! ```text
//! caller ──► CONTRACT CHECKS ──► CIPHER REGISTRY ──► PRIMITIVE
//!            key/nonce/tag        chacha20-poly1305    AAD pass
//!            dest capacity        aes-256-gcm          data pass
//!            (abort on misuse)    xchacha20-poly1305   finalize / tag
//!                                 aes-256-gcm-16
//! ```
//!
//! ## Security Model
//!
//! - Caller bugs (wrong key/nonce/tag length, short output buffer) abort
//!   the process; they are never returned as errors
//! - Tampered ciphertext, tag or AAD returns `AeadError::AuthenticationFailed`
//!   and the output buffer is zeroed
//! - Fresh primitive instance per call, no shared state, thread-safe
//! - Nonce uniqueness and key management are the caller's job

pub mod config;
pub mod crypto;
pub mod error;
pub mod speed;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use config::SpeedConfig;
pub use crypto::{open, open_appended, seal, AeadKey, Algorithm, TAG_LEN};
pub use error::{AeadError, AeadResult};

/// ALFA AEAD version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
