/// Envelope module: the fixed-layout binary form of an encrypted key.
///
/// Layout (no length prefixes, every offset is static):
///
/// ```text
/// Offset  Size  Field
/// 0       1     Version: 0x02
/// 1       1     logn (scrypt cost exponent, N = 2^logn)
/// 2       16    Salt
/// 18      24    Nonce
/// 42      1     Key security byte (also the AEAD associated data)
/// 43      N     XChaCha20-Poly1305 ciphertext || tag
/// ```
///
/// Decoding only checks the version byte and the minimum length. Cost and
/// key-security validation belong to the caller so the codec stays usable
/// for inspecting envelopes written with parameters this build refuses.
use serde::Serialize;

use crate::crypto::{KEY_LEN, NONCE_LEN, SALT_LEN, TAG_LEN};
use crate::error::FormatError;

/// The only envelope version this crate reads or writes.
pub const VERSION: u8 = 0x02;

/// Fixed header length: 1 version + 1 logn + 16 salt + 24 nonce + 1 ksb = 43 bytes.
pub const HEADER_LEN: usize = 2 + SALT_LEN + NONCE_LEN + 1;

/// Shortest valid ciphertext: a sealed 32-byte key plus its tag.
pub const MIN_CIPHERTEXT_LEN: usize = KEY_LEN + TAG_LEN;

const SALT_OFFSET: usize = 2;
const NONCE_OFFSET: usize = SALT_OFFSET + SALT_LEN;
const KSB_OFFSET: usize = NONCE_OFFSET + NONCE_LEN;

/// How the key was handled before it was encrypted.
///
/// Advisory only: it is authenticated as associated data but never enforced
/// by decryption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum KeySecurity {
    /// The key is known to have been handled insecurely (e.g. stored unencrypted).
    Insecure = 0x00,
    /// The key is known never to have been handled insecurely.
    Secure = 0x01,
    /// Nothing is known about how the key was handled.
    #[default]
    Unknown = 0x02,
}

impl KeySecurity {
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for KeySecurity {
    type Error = FormatError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x00 => Ok(KeySecurity::Insecure),
            0x01 => Ok(KeySecurity::Secure),
            0x02 => Ok(KeySecurity::Unknown),
            other => Err(FormatError::InvalidKeySecurity(other)),
        }
    }
}

impl std::fmt::Display for KeySecurity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            KeySecurity::Insecure => "insecure",
            KeySecurity::Secure => "secure",
            KeySecurity::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// All fields of an encrypted-key envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub version: u8,
    pub logn: u8,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    /// Raw key security byte. Kept as a byte so unknown values still round-trip.
    pub ksb: u8,
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Build a current-version envelope.
    pub fn new(
        logn: u8,
        salt: [u8; SALT_LEN],
        nonce: [u8; NONCE_LEN],
        ksb: u8,
        ciphertext: Vec<u8>,
    ) -> Self {
        Envelope {
            version: VERSION,
            logn,
            salt,
            nonce,
            ksb,
            ciphertext,
        }
    }

    /// The associated data bound into the AEAD tag: exactly the ksb byte.
    pub fn aad(&self) -> [u8; 1] {
        [self.ksb]
    }

    /// Serialize into the fixed layout. Length is always `HEADER_LEN + ciphertext.len()`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        buf.push(self.version);
        buf.push(self.logn);
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.nonce);
        buf.push(self.ksb);
        buf.extend_from_slice(&self.ciphertext);
        buf
    }

    /// Parse the fixed layout, checking only length and version.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FormatError> {
        let min = HEADER_LEN + MIN_CIPHERTEXT_LEN;
        if data.len() < min {
            return Err(FormatError::Truncated {
                len: data.len(),
                min,
            });
        }

        let version = data[0];
        if version != VERSION {
            return Err(FormatError::UnsupportedVersion(version));
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&data[SALT_OFFSET..NONCE_OFFSET]);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&data[NONCE_OFFSET..KSB_OFFSET]);

        Ok(Envelope {
            version,
            logn: data[1],
            salt,
            nonce,
            ksb: data[KSB_OFFSET],
            ciphertext: data[HEADER_LEN..].to_vec(),
        })
    }
}
