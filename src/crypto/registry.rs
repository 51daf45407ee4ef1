//! ALFA AEAD - Cipher Registry
//!
//! Maps the closed [`Algorithm`] enum to key/nonce/tag lengths and to the
//! RustCrypto primitive that implements it. Every call builds a fresh
//! primitive instance; nothing is cached between calls.

use std::fmt;
use std::str::FromStr;

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{generic_array::GenericArray, AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{Aes256Gcm, AesGcm};
use chacha20poly1305::{ChaCha20Poly1305, XChaCha20Poly1305};
use serde::{Deserialize, Serialize};

use super::contract::Stage;
use crate::error::AeadError;

/// Key length shared by every registered algorithm
pub const KEY_LEN: usize = 32;

/// Nonce length for ChaCha20-Poly1305 and AES-256-GCM
pub const NONCE_LEN: usize = 12;

/// Nonce length for XChaCha20-Poly1305
pub const XCHACHA_NONCE_LEN: usize = 24;

/// Nonce length for the wide-IV AES-256-GCM variant
pub const GCM16_NONCE_LEN: usize = 16;

/// The only supported authentication tag length
pub const TAG_LEN: usize = 16;

/// AES-256-GCM taking a 16-byte IV (GHASH-derived counter block)
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// AEAD algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// ChaCha20-Poly1305, RFC 8439 (12-byte nonce)
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
    /// AES-256-GCM, NIST SP 800-38D (12-byte nonce)
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    /// XChaCha20-Poly1305 (24-byte nonce)
    #[serde(rename = "xchacha20-poly1305")]
    XChaCha20Poly1305,
    /// AES-256-GCM with a 16-byte nonce, as used by gocryptfs file content
    #[serde(rename = "aes-256-gcm-16")]
    Aes256Gcm16,
}

impl Algorithm {
    /// Every registered algorithm, in wire-id order
    pub const ALL: [Algorithm; 4] = [
        Algorithm::ChaCha20Poly1305,
        Algorithm::Aes256Gcm,
        Algorithm::XChaCha20Poly1305,
        Algorithm::Aes256Gcm16,
    ];

    pub fn key_len(&self) -> usize {
        KEY_LEN
    }

    pub fn nonce_len(&self) -> usize {
        match self {
            Self::ChaCha20Poly1305 | Self::Aes256Gcm => NONCE_LEN,
            Self::XChaCha20Poly1305 => XCHACHA_NONCE_LEN,
            Self::Aes256Gcm16 => GCM16_NONCE_LEN,
        }
    }

    pub fn tag_len(&self) -> usize {
        TAG_LEN
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ChaCha20Poly1305 => "chacha20-poly1305",
            Self::Aes256Gcm => "aes-256-gcm",
            Self::XChaCha20Poly1305 => "xchacha20-poly1305",
            Self::Aes256Gcm16 => "aes-256-gcm-16",
        }
    }

    /// Numeric discriminant used across the C ABI
    pub fn id(&self) -> u32 {
        match self {
            Self::ChaCha20Poly1305 => 0,
            Self::Aes256Gcm => 1,
            Self::XChaCha20Poly1305 => 2,
            Self::Aes256Gcm16 => 3,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }

    /// Encrypt `buffer` in place and return the detached tag.
    ///
    /// Lengths must already have been checked by the caller; an `Err` names
    /// the stage at which the primitive refused the input.
    pub(crate) fn seal_in_place(
        &self,
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        buffer: &mut [u8],
    ) -> Result<[u8; TAG_LEN], Stage> {
        match self {
            Self::ChaCha20Poly1305 => seal_with::<ChaCha20Poly1305>(key, nonce, aad, buffer),
            Self::Aes256Gcm => seal_with::<Aes256Gcm>(key, nonce, aad, buffer),
            Self::XChaCha20Poly1305 => seal_with::<XChaCha20Poly1305>(key, nonce, aad, buffer),
            Self::Aes256Gcm16 => seal_with::<Aes256Gcm16>(key, nonce, aad, buffer),
        }
    }

    /// Verify `tag` and decrypt `buffer` in place.
    ///
    /// `Ok(false)` means the tag did not verify; `buffer` then still holds
    /// unauthenticated bytes and must be wiped by the caller.
    pub(crate) fn open_in_place(
        &self,
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        buffer: &mut [u8],
        tag: &[u8],
    ) -> Result<bool, Stage> {
        match self {
            Self::ChaCha20Poly1305 => open_with::<ChaCha20Poly1305>(key, nonce, aad, buffer, tag),
            Self::Aes256Gcm => open_with::<Aes256Gcm>(key, nonce, aad, buffer, tag),
            Self::XChaCha20Poly1305 => {
                open_with::<XChaCha20Poly1305>(key, nonce, aad, buffer, tag)
            }
            Self::Aes256Gcm16 => open_with::<Aes256Gcm16>(key, nonce, aad, buffer, tag),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = AeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| AeadError::UnknownAlgorithm(s.to_string()))
    }
}

fn seal_with<C: AeadInPlace + KeyInit>(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    buffer: &mut [u8],
) -> Result<[u8; TAG_LEN], Stage> {
    let cipher = C::new_from_slice(key).map_err(|_| Stage::KeyBound)?;
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(nonce), aad, buffer)
        .map_err(|_| Stage::DataProcessed)?;

    if tag.len() != TAG_LEN {
        return Err(Stage::Finalized);
    }
    let mut out = [0u8; TAG_LEN];
    out.copy_from_slice(&tag);
    Ok(out)
}

fn open_with<C: AeadInPlace + KeyInit>(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    buffer: &mut [u8],
    tag: &[u8],
) -> Result<bool, Stage> {
    let cipher = C::new_from_slice(key).map_err(|_| Stage::KeyBound)?;
    let verified = cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(nonce),
            aad,
            buffer,
            GenericArray::from_slice(tag),
        )
        .is_ok();
    Ok(verified)
}
