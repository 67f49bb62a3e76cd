/// Transport module: bech32 text encoding for envelopes.
///
/// Produces checksummed, case-insensitive strings that survive copy/paste and
/// fit in a scannable QR code. Only the original bech32 checksum is accepted;
/// bech32m strings are rejected. Encoded strings are bounded to
/// `MAX_ENCODED_LEN` characters in both directions.
use bech32::{FromBase32, ToBase32, Variant};

use crate::error::FormatError;

/// Upper bound on an encoded string, prefix and checksum included.
pub const MAX_ENCODED_LEN: usize = 5000;

/// Encode `data` as bech32 under the human-readable `prefix`.
pub fn encode(prefix: &str, data: &[u8]) -> Result<String, FormatError> {
    let encoded = bech32::encode(prefix, data.to_base32(), Variant::Bech32)?;
    if encoded.len() > MAX_ENCODED_LEN {
        return Err(FormatError::TooLong {
            len: encoded.len(),
            max: MAX_ENCODED_LEN,
        });
    }
    Ok(encoded)
}

/// Decode a bech32 string into its lowercase prefix and payload bytes.
///
/// Fails on oversize input, a bad checksum, characters outside the bech32
/// alphabet, mixed case, the bech32m variant, or non-zero padding bits.
pub fn decode(encoded: &str) -> Result<(String, Vec<u8>), FormatError> {
    // Checked before parsing so an oversized input costs nothing to reject
    if encoded.len() > MAX_ENCODED_LEN {
        return Err(FormatError::TooLong {
            len: encoded.len(),
            max: MAX_ENCODED_LEN,
        });
    }

    let (prefix, words, variant) = bech32::decode(encoded)?;
    if variant != Variant::Bech32 {
        return Err(FormatError::WrongVariant);
    }
    let data = Vec::<u8>::from_base32(&words)?;
    Ok((prefix, data))
}
