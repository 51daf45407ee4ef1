//! ALFA AEAD - Contract Enforcement
//!
//! Pre-flight checks shared by seal and open. A failed check is a bug in the
//! caller, never attacker input, so it terminates the process instead of
//! returning an error value. The abort cannot be intercepted with
//! `catch_unwind`.

use std::fmt;

use super::registry::{Algorithm, TAG_LEN};

/// Per-call progress of a seal/open operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    KeyBound,
    AadAuthenticated,
    DataProcessed,
    Finalized,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::KeyBound => "key-bound",
            Stage::AadAuthenticated => "aad-authenticated",
            Stage::DataProcessed => "data-processed",
            Stage::Finalized => "finalized",
        };
        f.write_str(name)
    }
}

/// Report a contract violation and abort the process.
#[cold]
pub fn violated(stage: Stage, message: fmt::Arguments<'_>) -> ! {
    log::error!("AEAD contract violation at {}: {}", stage, message);
    eprintln!("alfa_aead: contract violation at {}: {}", stage, message);
    std::process::abort()
}

pub fn require_key_len(algorithm: Algorithm, key: &[u8]) {
    if key.len() != algorithm.key_len() {
        violated(
            Stage::Init,
            format_args!(
                "{}: key length mismatch (expected {}, got {})",
                algorithm,
                algorithm.key_len(),
                key.len()
            ),
        );
    }
}

pub fn require_nonce_len(algorithm: Algorithm, nonce: &[u8]) {
    if nonce.len() != algorithm.nonce_len() {
        violated(
            Stage::Init,
            format_args!(
                "{}: only {}-byte nonces are supported, got {}",
                algorithm,
                algorithm.nonce_len(),
                nonce.len()
            ),
        );
    }
}

pub fn require_tag_len(tag: &[u8]) {
    if tag.len() != TAG_LEN {
        violated(
            Stage::Init,
            format_args!("unsupported tag length {} (only {} is supported)", tag.len(), TAG_LEN),
        );
    }
}

/// `needed` bytes must fit into a destination of `capacity` bytes.
pub fn require_capacity(needed: usize, capacity: usize) {
    if needed > capacity {
        violated(
            Stage::Init,
            format_args!("{} bytes overflow the {}-byte output buffer", needed, capacity),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_inputs_pass() {
        for alg in Algorithm::ALL {
            require_key_len(alg, &[0u8; 32]);
            require_nonce_len(alg, &vec![0u8; alg.nonce_len()]);
        }
        require_tag_len(&[0u8; 16]);
        require_capacity(21, 21);
        require_capacity(0, 0);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::AadAuthenticated.to_string(), "aad-authenticated");
        assert_eq!(Stage::Finalized.to_string(), "finalized");
    }
}
