//! ALFA AEAD - Open
//!
//! `open` takes ciphertext and tag as two buffers; `open_appended` takes the
//! `ciphertext || tag` layout that `seal` produces.

use zeroize::Zeroize;

use super::contract;
use super::registry::{Algorithm, TAG_LEN};
use crate::error::{AeadError, AeadResult};

/// Verify `tag` over `ciphertext` and `aad`, decrypting into the head of `dest`.
///
/// Returns the plaintext length (`ciphertext.len()`) on success. On
/// [`AeadError::AuthenticationFailed`] the first `ciphertext.len()` bytes of
/// `dest` are zeroed; callers must still treat them as garbage.
///
/// Wrong key, nonce or tag lengths, or a `dest` shorter than `ciphertext`,
/// abort the process.
pub fn open(
    algorithm: Algorithm,
    ciphertext: &[u8],
    aad: &[u8],
    tag: &[u8],
    key: &[u8],
    nonce: &[u8],
    dest: &mut [u8],
) -> AeadResult<usize> {
    contract::require_key_len(algorithm, key);
    contract::require_nonce_len(algorithm, nonce);
    contract::require_tag_len(tag);
    contract::require_capacity(ciphertext.len(), dest.len());

    let body = &mut dest[..ciphertext.len()];
    body.copy_from_slice(ciphertext);

    let verified = match algorithm.open_in_place(key, nonce, aad, body, tag) {
        Ok(verified) => verified,
        Err(stage) => contract::violated(
            stage,
            format_args!("{}: decryption of {} bytes failed", algorithm, ciphertext.len()),
        ),
    };

    if !verified {
        body.zeroize();
        log::debug!(
            "{}: tag mismatch on {}-byte ciphertext",
            algorithm,
            ciphertext.len()
        );
        return Err(AeadError::AuthenticationFailed);
    }

    Ok(ciphertext.len())
}

/// Like [`open`], but `sealed` is `ciphertext || tag` as written by
/// [`crate::seal`].
///
/// A `sealed` buffer shorter than the tag cannot be authentic and yields
/// [`AeadError::AuthenticationFailed`]; it is treated as bad data, not as a
/// caller bug.
pub fn open_appended(
    algorithm: Algorithm,
    sealed: &[u8],
    aad: &[u8],
    key: &[u8],
    nonce: &[u8],
    dest: &mut [u8],
) -> AeadResult<usize> {
    if sealed.len() < TAG_LEN {
        contract::require_key_len(algorithm, key);
        contract::require_nonce_len(algorithm, nonce);
        log::debug!("{}: sealed input too short ({} bytes)", algorithm, sealed.len());
        return Err(AeadError::AuthenticationFailed);
    }
    let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_LEN);
    open(algorithm, ciphertext, aad, tag, key, nonce, dest)
}
