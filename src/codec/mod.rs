//! Codec module: the public `encrypt` / `decrypt` operations.
//!
//! Encryption runs raw key → envelope → bytes → bech32 string; decryption
//! mirrors it. Every failure path returns an error and never a partial key.

use rand::{CryptoRng, RngCore};
use serde::Serialize;
use zeroize::Zeroizing;

use crate::crypto::{self, KEY_LEN};
use crate::envelope::{Envelope, KeySecurity};
use crate::error::{Error, FormatError, Result};
use crate::keys;
use crate::transport;

/// Human-readable prefix of every encrypted key string.
pub const PREFIX: &str = "ncryptsec";

/// Cost exponent for keys encrypted for long-term storage (N = 65536).
pub const STORAGE_LOGN: u8 = 16;

/// Parameters chosen at encryption time. Both end up in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncryptOptions {
    pub logn: u8,
    pub key_security: KeySecurity,
}

impl EncryptOptions {
    /// Long-term storage profile: logn 16, key security unknown.
    pub const fn storage() -> Self {
        EncryptOptions {
            logn: STORAGE_LOGN,
            key_security: KeySecurity::Unknown,
        }
    }

    /// Device-link profile: logn 10. Never use this for at-rest keys.
    pub const fn device_link() -> Self {
        EncryptOptions {
            logn: crate::link::LINK_LOGN,
            key_security: KeySecurity::Unknown,
        }
    }

    pub const fn with_logn(mut self, logn: u8) -> Self {
        self.logn = logn;
        self
    }

    pub const fn with_key_security(mut self, key_security: KeySecurity) -> Self {
        self.key_security = key_security;
        self
    }
}

impl Default for EncryptOptions {
    fn default() -> Self {
        EncryptOptions::storage()
    }
}

/// A decrypted key together with the public parameters of its envelope.
pub struct Decrypted {
    pub secret_key: Zeroizing<[u8; KEY_LEN]>,
    pub logn: u8,
    /// Raw key security byte as stored. Authenticated, but not checked.
    pub ksb: u8,
}

impl Decrypted {
    /// Typed key security, or `None` when the byte is outside {0, 1, 2}.
    pub fn key_security(&self) -> Option<KeySecurity> {
        KeySecurity::try_from(self.ksb).ok()
    }
}

impl std::fmt::Debug for Decrypted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decrypted")
            .field("secret_key", &"[REDACTED]")
            .field("logn", &self.logn)
            .field("ksb", &self.ksb)
            .finish()
    }
}

/// Public parameters of an encrypted key, readable without the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeInfo {
    pub version: u8,
    pub logn: u8,
    pub ksb: u8,
    pub key_security: Option<KeySecurity>,
    pub ciphertext_len: usize,
}

/// Encrypt a 32-byte secret key under `password`, using the thread-local CSPRNG.
pub fn encrypt(
    secret_key: &[u8; KEY_LEN],
    password: &str,
    options: EncryptOptions,
) -> Result<String> {
    encrypt_with_rng(&mut rand::thread_rng(), secret_key, password, options)
}

/// Encrypt with an explicit random source for the salt and nonce.
///
/// Production callers should pass a CSPRNG; tests pass a seeded one.
pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    secret_key: &[u8; KEY_LEN],
    password: &str,
    options: EncryptOptions,
) -> Result<String> {
    crypto::check_logn(options.logn)?;

    let (salt, nonce) = crypto::random_salt_and_nonce(rng);
    let key = crypto::derive_key(password, &salt, options.logn)?;

    let ksb = options.key_security.as_byte();
    let ciphertext = crypto::seal(&key, &nonce, &[ksb], secret_key)?;

    let envelope = Envelope::new(options.logn, salt, nonce, ksb, ciphertext);
    let encoded = transport::encode(PREFIX, &envelope.to_bytes())?;

    tracing::debug!(
        logn = options.logn,
        ksb,
        len = encoded.len(),
        "encrypted secret key"
    );
    Ok(encoded)
}

/// Decrypt an `ncryptsec1...` string back to the 32-byte secret key.
pub fn decrypt(encoded: &str, password: &str) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    decrypt_detailed(encoded, password).map(|decrypted| decrypted.secret_key)
}

/// Decrypt and also return the envelope's cost factor and key security byte.
pub fn decrypt_detailed(encoded: &str, password: &str) -> Result<Decrypted> {
    let result = decrypt_inner(encoded, password);
    match &result {
        Ok(decrypted) => tracing::debug!(
            logn = decrypted.logn,
            ksb = decrypted.ksb,
            "decrypted secret key"
        ),
        Err(e) => tracing::debug!(kind = e.kind(), "decryption failed"),
    }
    result
}

fn decrypt_inner(encoded: &str, password: &str) -> Result<Decrypted> {
    let envelope = parse(encoded)?;

    // logn comes from the input; bound it before scrypt allocates 128 * r * 2^logn bytes
    crypto::check_logn(envelope.logn)?;

    let key = crypto::derive_key(password, &envelope.salt, envelope.logn)?;
    let plaintext = crypto::open(&key, &envelope.nonce, &envelope.aad(), &envelope.ciphertext)?;

    if plaintext.len() != KEY_LEN {
        return Err(Error::Authentication);
    }
    let mut secret_key = Zeroizing::new([0u8; KEY_LEN]);
    secret_key.copy_from_slice(&plaintext);

    Ok(Decrypted {
        secret_key,
        logn: envelope.logn,
        ksb: envelope.ksb,
    })
}

/// Read the public parameters of an encrypted key without decrypting it.
pub fn inspect(encoded: &str) -> Result<EnvelopeInfo> {
    let envelope = parse(encoded)?;
    Ok(EnvelopeInfo {
        version: envelope.version,
        logn: envelope.logn,
        ksb: envelope.ksb,
        key_security: KeySecurity::try_from(envelope.ksb).ok(),
        ciphertext_len: envelope.ciphertext.len(),
    })
}

/// Encrypt a secret key given as 64 hex characters.
pub fn encrypt_hex(
    secret_key_hex: &str,
    password: &str,
    options: EncryptOptions,
) -> Result<String> {
    let secret_key = keys::parse_secret_key_hex(secret_key_hex)?;
    encrypt(&secret_key, password, options)
}

/// Decrypt to a lowercase hex string.
pub fn decrypt_to_hex(encoded: &str, password: &str) -> Result<Zeroizing<String>> {
    let secret_key = decrypt(encoded, password)?;
    Ok(Zeroizing::new(hex::encode(&secret_key[..])))
}

fn parse(encoded: &str) -> Result<Envelope> {
    let (prefix, bytes) = transport::decode(encoded.trim())?;
    if prefix != PREFIX {
        return Err(FormatError::WrongPrefix {
            found: prefix,
            expected: PREFIX,
        }
        .into());
    }
    Ok(Envelope::from_bytes(&bytes)?)
}
