//! ALFA AEAD - Cryptographic Core
//!
//! Seal/open over caller-managed buffers for every registered algorithm.

pub mod contract;
pub mod keyed;
pub mod registry;

mod open;
mod seal;

pub use keyed::AeadKey;
pub use open::{open, open_appended};
pub use registry::{Algorithm, GCM16_NONCE_LEN, KEY_LEN, NONCE_LEN, TAG_LEN, XCHACHA_NONCE_LEN};
pub use seal::seal;
