//! Crypto module: scrypt key derivation and XChaCha20-Poly1305 sealing.
//!
//! Both primitives come from audited RustCrypto crates; this module only fixes
//! their parameters. Key boundaries are raw `[u8; 32]` arrays wrapped in
//! `Zeroizing` so derived keys and recovered plaintext are wiped on drop.

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    Key, XChaCha20Poly1305, XNonce,
};
use rand::{CryptoRng, RngCore};
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use crate::error::{Error, FormatError};

/// Length of a raw secret key and of the derived symmetric key.
pub const KEY_LEN: usize = 32;

/// Length of the scrypt salt.
pub const SALT_LEN: usize = 16;

/// Length of the XChaCha20-Poly1305 nonce.
pub const NONCE_LEN: usize = 24;

/// Length of the Poly1305 authentication tag appended to the ciphertext.
pub const TAG_LEN: usize = 16;

/// Smallest accepted cost exponent.
pub const MIN_LOGN: u8 = 1;

/// Largest accepted cost exponent (N = 2^22, 4 GiB of scrypt memory).
pub const MAX_LOGN: u8 = 22;

const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

// ── Random material ─────────────────────────────────────────────────────────

/// Draw a fresh salt and nonce for one encryption.
pub fn random_salt_and_nonce<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> ([u8; SALT_LEN], [u8; NONCE_LEN]) {
    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut nonce);
    (salt, nonce)
}

// ── Key derivation ──────────────────────────────────────────────────────────

/// Reject cost exponents outside `MIN_LOGN..=MAX_LOGN`.
pub fn check_logn(logn: u8) -> Result<(), FormatError> {
    if !(MIN_LOGN..=MAX_LOGN).contains(&logn) {
        return Err(FormatError::CostOutOfRange {
            logn,
            min: MIN_LOGN,
            max: MAX_LOGN,
        });
    }
    Ok(())
}

/// Derive a 32-byte key from a password and 16-byte salt with scrypt.
///
/// Parameters: N = 2^logn, r = 8, p = 1. The password is NFKC-normalized first
/// so the same passphrase typed on different keyboards derives the same key.
///
/// Deterministic: same password + salt + logn always produce the same key.
pub fn derive_key(
    password: &str,
    salt: &[u8; SALT_LEN],
    logn: u8,
) -> Result<Zeroizing<[u8; KEY_LEN]>, FormatError> {
    check_logn(logn)?;

    let cost_error = || FormatError::CostOutOfRange {
        logn,
        min: MIN_LOGN,
        max: MAX_LOGN,
    };
    let params =
        scrypt::Params::new(logn, SCRYPT_R, SCRYPT_P, KEY_LEN).map_err(|_| cost_error())?;

    let normalized = Zeroizing::new(password.nfkc().collect::<String>());
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    scrypt::scrypt(normalized.as_bytes(), salt, &params, key.as_mut())
        .map_err(|_| cost_error())?;

    Ok(key)
}

// ── AEAD ────────────────────────────────────────────────────────────────────

/// Encrypt `plaintext` with XChaCha20-Poly1305, binding `aad` into the tag.
///
/// Returns `ciphertext || tag`.
pub fn seal(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, FormatError> {
    let cipher = XChaCha20Poly1305::new(Key::from_slice(key));
    cipher
        .encrypt(
            XNonce::from_slice(nonce),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|_| FormatError::PayloadTooLarge)
}

/// Decrypt `ciphertext || tag`, verifying it against `aad`.
///
/// Any mismatch (wrong key, flipped bit, altered aad, truncated input) yields
/// `Error::Authentication` with no detail about the cause.
pub fn open(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    aad: &[u8],
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>, Error> {
    let cipher = XChaCha20Poly1305::new(Key::from_slice(key));
    let plaintext = cipher
        .decrypt(
            XNonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|_| Error::Authentication)?;
    Ok(Zeroizing::new(plaintext))
}
