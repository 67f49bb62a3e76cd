use thiserror::Error;

/// Everything that can go wrong while encrypting or decrypting a key.
///
/// Only two kinds exist. Neither variant ever carries the password or key
/// material, so both are safe to log and display.
#[derive(Error, Debug)]
pub enum Error {
    /// The input could not be parsed; retrying with the same input is pointless.
    #[error("invalid encrypted key: {0}")]
    Format(#[from] FormatError),

    /// Tag verification failed. Wrong password, corruption and tampering all
    /// land here and are reported identically.
    #[error("Wrong password or corrupted encrypted key")]
    Authentication,
}

impl Error {
    /// Short, stable label used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Format(_) => "format",
            Error::Authentication => "authentication",
        }
    }
}

/// The reason an encoded key, envelope, or link payload was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("bech32 decoding failed: {0}")]
    Bech32(#[from] bech32::Error),

    #[error("expected bech32 variant, got bech32m")]
    WrongVariant,

    #[error("encoded string is {len} characters, limit is {max}")]
    TooLong { len: usize, max: usize },

    #[error("invalid prefix '{found}', expected '{expected}'")]
    WrongPrefix { found: String, expected: &'static str },

    #[error("envelope too short ({len} bytes, need at least {min})")]
    Truncated { len: usize, min: usize },

    #[error("unsupported envelope version {0}, expected 2")]
    UnsupportedVersion(u8),

    #[error("cost factor logn={logn} outside supported range {min}..={max}")]
    CostOutOfRange { logn: u8, min: u8, max: u8 },

    #[error("invalid key security byte {0}, expected 0, 1 or 2")]
    InvalidKeySecurity(u8),

    #[error("secret key must be 32 bytes ({0} given)")]
    KeyLength(usize),

    #[error("secret key is not valid hex")]
    InvalidHex,

    #[error("PIN length {0} outside supported range 1..=9")]
    PinLength(usize),

    #[error("not a device-link URI (expected 'nostr:link:ncryptsec1...')")]
    NotLinkUri,

    #[error("payload too large to encrypt")]
    PayloadTooLarge,
}

pub type Result<T> = std::result::Result<T, Error>;
