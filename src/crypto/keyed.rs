//! ALFA AEAD - Keyed cipher handle
//!
//! `AeadKey` binds an algorithm to a private copy of the key and offers an
//! append-style API over `Vec<u8>`. The stored key is zeroized on drop or on
//! [`AeadKey::wipe`]. Every seal/open still builds its own primitive
//! instance, so a shared `&AeadKey` can be used from many threads at once.

use std::fmt;

use rand::RngCore;
use secrecy::{ExposeSecret, Secret};

use super::contract::{self, Stage};
use super::open::open_appended;
use super::registry::{Algorithm, KEY_LEN, TAG_LEN};
use super::seal::seal;
use crate::error::AeadResult;

/// Secure AEAD key with automatic zeroization
pub struct AeadKey {
    algorithm: Algorithm,
    key: Option<Secret<[u8; KEY_LEN]>>,
}

impl AeadKey {
    /// Create a key handle from caller bytes (a private copy is kept).
    ///
    /// Aborts if `key` is not exactly 32 bytes.
    pub fn new(algorithm: Algorithm, key: &[u8]) -> Self {
        contract::require_key_len(algorithm, key);
        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(key);
        Self {
            algorithm,
            key: Some(Secret::new(bytes)),
        }
    }

    /// Generate a random key
    pub fn generate(algorithm: Algorithm) -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self {
            algorithm,
            key: Some(Secret::new(bytes)),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Required nonce length in bytes
    pub fn nonce_size(&self) -> usize {
        self.algorithm.nonce_len()
    }

    /// Bytes added to every message for authentication
    pub fn overhead(&self) -> usize {
        TAG_LEN
    }

    /// Encrypt `plaintext` and append `ciphertext || tag` to `dst`.
    ///
    /// Returns the number of bytes appended (`plaintext.len() + 16`).
    pub fn seal(&self, dst: &mut Vec<u8>, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> usize {
        let key = self.expose_key();
        let start = dst.len();
        dst.resize(start + plaintext.len() + TAG_LEN, 0);
        seal(self.algorithm, plaintext, aad, key, nonce, &mut dst[start..])
    }

    /// Verify and decrypt `sealed` (`ciphertext || tag`), appending the
    /// plaintext to `dst`.
    ///
    /// On error `dst` is restored to its original length.
    pub fn open(
        &self,
        dst: &mut Vec<u8>,
        nonce: &[u8],
        sealed: &[u8],
        aad: &[u8],
    ) -> AeadResult<usize> {
        let key = self.expose_key();
        let start = dst.len();
        dst.resize(start + sealed.len().saturating_sub(TAG_LEN), 0);

        match open_appended(self.algorithm, sealed, aad, key, nonce, &mut dst[start..]) {
            Ok(n) => Ok(n),
            Err(e) => {
                dst.truncate(start);
                Err(e)
            }
        }
    }

    /// Drop the key material. Any later seal/open aborts.
    pub fn wipe(&mut self) {
        // Secret zeroizes its contents on drop
        self.key = None;
    }

    pub fn is_wiped(&self) -> bool {
        self.key.is_none()
    }

    fn expose_key(&self) -> &[u8; KEY_LEN] {
        match &self.key {
            Some(key) => key.expose_secret(),
            None => contract::violated(
                Stage::Init,
                format_args!("{}: tried to use wiped key", self.algorithm),
            ),
        }
    }
}

impl fmt::Debug for AeadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AeadKey")
            .field("algorithm", &self.algorithm)
            .field("wiped", &self.is_wiped())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AeadError;

    #[test]
    fn test_seal_appends_to_dst() {
        let key = AeadKey::new(Algorithm::Aes256Gcm, &[0x11; 32]);
        let nonce = [0u8; 12];

        let mut dst = b"prefix".to_vec();
        let n = key.seal(&mut dst, &nonce, b"payload", b"ad");
        assert_eq!(n, 7 + 16);
        assert_eq!(dst.len(), 6 + n);
        assert_eq!(&dst[..6], b"prefix");

        let mut plain = b"head:".to_vec();
        let m = key.open(&mut plain, &nonce, &dst[6..], b"ad").unwrap();
        assert_eq!(m, 7);
        assert_eq!(plain, b"head:payload");
    }

    #[test]
    fn test_failed_open_restores_dst() {
        let key = AeadKey::generate(Algorithm::XChaCha20Poly1305);
        let nonce = [0x33; 24];

        let mut sealed = Vec::new();
        key.seal(&mut sealed, &nonce, b"0123456789", b"");
        let last = sealed.len() - 1;
        sealed[last] ^= 0x80;

        let mut dst = b"keep".to_vec();
        let result = key.open(&mut dst, &nonce, &sealed, b"");
        assert!(matches!(result, Err(AeadError::AuthenticationFailed)));
        assert_eq!(dst, b"keep");

        // Appending one byte must also fail
        sealed[last] ^= 0x80;
        sealed.push(0);
        assert!(key.open(&mut dst, &nonce, &sealed, b"").is_err());
        assert_eq!(dst, b"keep");
    }

    #[test]
    fn test_short_input_is_auth_failure() {
        let key = AeadKey::generate(Algorithm::ChaCha20Poly1305);
        let mut dst = Vec::new();
        for len in 0..TAG_LEN {
            let result = key.open(&mut dst, &[0u8; 12], &vec![0u8; len], b"");
            assert!(matches!(result, Err(AeadError::AuthenticationFailed)));
            assert!(dst.is_empty());
        }
    }

    #[test]
    fn test_sizes() {
        for alg in Algorithm::ALL {
            let key = AeadKey::generate(alg);
            assert_eq!(key.nonce_size(), alg.nonce_len());
            assert_eq!(key.overhead(), 16);
            assert_eq!(key.algorithm(), alg);
        }
    }

    #[test]
    fn test_generated_keys_differ() {
        let a = AeadKey::generate(Algorithm::Aes256Gcm);
        let b = AeadKey::generate(Algorithm::Aes256Gcm);
        let nonce = [0u8; 12];
        let (mut ca, mut cb) = (Vec::new(), Vec::new());
        a.seal(&mut ca, &nonce, b"x", b"");
        b.seal(&mut cb, &nonce, b"x", b"");
        assert_ne!(ca, cb);
    }

    #[test]
    fn test_wipe() {
        let mut key = AeadKey::generate(Algorithm::ChaCha20Poly1305);
        assert!(!key.is_wiped());
        key.wipe();
        assert!(key.is_wiped());
        assert!(format!("{:?}", key).contains("wiped: true"));
    }

    #[test]
    fn test_debug_hides_key() {
        let key = AeadKey::new(Algorithm::Aes256Gcm, &[0xAB; 32]);
        let shown = format!("{:?}", key);
        assert!(!shown.to_lowercase().contains("ab, ab"));
        assert!(!shown.contains("171"));
    }

    #[test]
    fn test_concurrent_use() {
        let key = AeadKey::new(Algorithm::Aes256Gcm, &[0x5A; 32]);
        let nonce = [0x07; 12];
        let mut reference = Vec::new();
        key.seal(&mut reference, &nonce, &[0u8; 1024], b"shared");

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..50 {
                        let mut out = Vec::new();
                        key.seal(&mut out, &nonce, &[0u8; 1024], b"shared");
                        assert_eq!(out, reference);

                        let mut plain = Vec::new();
                        key.open(&mut plain, &nonce, &out, b"shared").unwrap();
                        assert_eq!(plain, vec![0u8; 1024]);
                    }
                });
            }
        });
    }
}
