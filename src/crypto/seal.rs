//! ALFA AEAD - Seal
//!
//! Output layout: `[encrypted bytes][16-byte tag]`.

use super::contract::{self, Stage};
use super::registry::{Algorithm, TAG_LEN};

/// Encrypt `plaintext` and authenticate `aad` into the head of `dest`.
///
/// Writes `plaintext.len() + 16` bytes (ciphertext followed by the tag) and
/// returns that length. Bytes of `dest` past the returned length are left
/// untouched.
///
/// # Aborts
/// A wrong key or nonce length, or a `dest` shorter than
/// `plaintext.len() + 16`, aborts the process.
///
/// # Example
/// ```
/// use alfa_aead::{seal, Algorithm};
///
/// let mut out = [0u8; 21];
/// let n = seal(Algorithm::ChaCha20Poly1305, b"hello", b"", &[0u8; 32], &[0u8; 12], &mut out);
/// assert_eq!(n, 21);
/// ```
pub fn seal(
    algorithm: Algorithm,
    plaintext: &[u8],
    aad: &[u8],
    key: &[u8],
    nonce: &[u8],
    dest: &mut [u8],
) -> usize {
    contract::require_key_len(algorithm, key);
    contract::require_nonce_len(algorithm, nonce);
    let sealed_len = match plaintext.len().checked_add(TAG_LEN) {
        Some(n) => n,
        None => contract::violated(Stage::Init, format_args!("plaintext length overflows")),
    };
    contract::require_capacity(sealed_len, dest.len());

    let (body, rest) = dest.split_at_mut(plaintext.len());
    body.copy_from_slice(plaintext);

    let tag = match algorithm.seal_in_place(key, nonce, aad, body) {
        Ok(tag) => tag,
        Err(stage) => contract::violated(
            stage,
            format_args!("{}: encryption of {} bytes failed", algorithm, plaintext.len()),
        ),
    };
    rest[..TAG_LEN].copy_from_slice(&tag);

    sealed_len
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [0x42; 32];

    #[test]
    fn test_output_length_is_plaintext_plus_tag() {
        for alg in Algorithm::ALL {
            let nonce = vec![0x01; alg.nonce_len()];
            for len in [0usize, 1, 15, 16, 17, 4096] {
                let plaintext = vec![0xAB; len];
                let mut dest = vec![0u8; len + TAG_LEN];
                let n = seal(alg, &plaintext, b"aad", &KEY, &nonce, &mut dest);
                assert_eq!(n, len + TAG_LEN, "{} len {}", alg, len);
            }
        }
    }

    #[test]
    fn test_oversized_dest_tail_untouched() {
        let nonce = [0u8; 12];
        let mut dest = [0xEE; 64];
        let n = seal(Algorithm::Aes256Gcm, b"hello", b"", &KEY, &nonce, &mut dest);
        assert_eq!(n, 21);
        assert!(dest[n..].iter().all(|&b| b == 0xEE));
    }

    #[test]
    fn test_deterministic() {
        for alg in Algorithm::ALL {
            let nonce = vec![0x09; alg.nonce_len()];
            let mut a = [0u8; 48];
            let mut b = [0u8; 48];
            seal(alg, b"same input, same output!", b"hdr", &KEY, &nonce, &mut a);
            seal(alg, b"same input, same output!", b"hdr", &KEY, &nonce, &mut b);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_algorithms_produce_different_ciphertexts() {
        let nonce = [0u8; 12];
        let mut chacha = [0u8; 21];
        let mut gcm = [0u8; 21];
        seal(Algorithm::ChaCha20Poly1305, b"hello", b"", &KEY, &nonce, &mut chacha);
        seal(Algorithm::Aes256Gcm, b"hello", b"", &KEY, &nonce, &mut gcm);
        assert_ne!(chacha, gcm);
    }

    #[test]
    fn test_aad_changes_only_tag() {
        let nonce = [0u8; 12];
        let mut a = [0u8; 21];
        let mut b = [0u8; 21];
        seal(Algorithm::ChaCha20Poly1305, b"hello", b"one", &KEY, &nonce, &mut a);
        seal(Algorithm::ChaCha20Poly1305, b"hello", b"two", &KEY, &nonce, &mut b);
        assert_eq!(a[..5], b[..5]);
        assert_ne!(a[5..], b[5..]);
    }
}
