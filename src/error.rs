//! ALFA AEAD - Error Types
//!
//! Only legitimate data-level failures live here. Caller bugs (wrong key
//! length, short destination buffer, ...) never become an `AeadError`; they
//! abort the process through [`crate::crypto::contract`].

use thiserror::Error;

/// Result type for AEAD operations
pub type AeadResult<T> = Result<T, AeadError>;

/// AEAD error types
#[derive(Error, Debug)]
pub enum AeadError {
    // ═══════════════════════════════════════════════════════════════
    // CRYPTO ERRORS
    // ═══════════════════════════════════════════════════════════════

    /// Tag verification failed: ciphertext, tag or AAD was tampered with
    /// or corrupted. Any output buffer contents must be discarded.
    #[error("Authentication failed - ciphertext, tag or associated data corrupted")]
    AuthenticationFailed,

    // ═══════════════════════════════════════════════════════════════
    // INPUT ERRORS (CLI / config, never produced by seal/open)
    // ═══════════════════════════════════════════════════════════════

    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    // ═══════════════════════════════════════════════════════════════
    // CONFIG ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AeadError {
    /// Check if this error signals possible tampering
    pub fn is_security_critical(&self) -> bool {
        matches!(self, AeadError::AuthenticationFailed)
    }
}

impl From<serde_json::Error> for AeadError {
    fn from(e: serde_json::Error) -> Self {
        AeadError::Config(e.to_string())
    }
}
