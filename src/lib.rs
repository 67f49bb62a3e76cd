//! ncryptsec library crate: password-encrypted secret keys and device-link payloads.
//!
//! A 32-byte secret key is sealed with XChaCha20-Poly1305 under a key derived
//! from a password with scrypt, packed into a versioned envelope, and carried
//! as a bech32 `ncryptsec1...` string. The `link` module builds the short-lived,
//! PIN-protected variant used to move a key between devices via QR code.
pub mod codec;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod link;
pub mod transport;
pub mod util;

pub use codec::{
    decrypt, decrypt_detailed, decrypt_to_hex, encrypt, encrypt_hex, encrypt_with_rng, inspect,
    Decrypted, EncryptOptions, EnvelopeInfo,
};
pub use envelope::KeySecurity;
pub use error::{Error, FormatError};
pub use link::{build_link_payload, generate_pin, open_link_payload, LinkPayload};
