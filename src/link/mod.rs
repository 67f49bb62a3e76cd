/// Link module: PIN-protected device-link payloads.
///
/// One device encrypts its secret key under a short numeric PIN with a cheap
/// cost factor and shows the result as a `nostr:link:ncryptsec1...` URI in a
/// QR code. The other device scans it and decrypts with the PIN entered by the
/// user. The profile is weak on purpose (logn 10, 4 digits) and must never be
/// used for keys at rest: it relies on short display time and the PIN
/// travelling out of band.
use rand::{CryptoRng, Rng, RngCore};
use zeroize::Zeroizing;

use crate::codec::{self, EncryptOptions};
use crate::crypto::KEY_LEN;
use crate::error::{FormatError, Result};

/// URI scheme prepended to the encrypted key.
pub const LINK_SCHEME: &str = "nostr:link:";

/// Cost exponent for device-link payloads (N = 1024).
pub const LINK_LOGN: u8 = 10;

/// Default number of PIN digits.
pub const DEFAULT_PIN_LENGTH: usize = 4;

/// Longest PIN: 10^9 still fits in a u32.
pub const MAX_PIN_LENGTH: usize = 9;

/// A device-link payload ready to be rendered as a QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPayload {
    /// The bare `ncryptsec1...` string.
    pub encrypted_key: String,
    /// `nostr:link:` followed by `encrypted_key`.
    pub uri: String,
}

/// Generate a numeric PIN of `length` digits from the thread-local CSPRNG.
pub fn generate_pin(length: usize) -> std::result::Result<String, FormatError> {
    generate_pin_with_rng(&mut rand::thread_rng(), length)
}

/// Generate a PIN uniformly from `[0, 10^length)`, left-padded with zeros.
pub fn generate_pin_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    length: usize,
) -> std::result::Result<String, FormatError> {
    if !(1..=MAX_PIN_LENGTH).contains(&length) {
        return Err(FormatError::PinLength(length));
    }
    let upper = 10u32.pow(length as u32);
    let value = rng.gen_range(0..upper);
    Ok(format!("{:0width$}", value, width = length))
}

/// Encrypt `secret_key` under `pin` with the device-link profile and wrap it in a URI.
pub fn build_link_payload(secret_key: &[u8; KEY_LEN], pin: &str) -> Result<LinkPayload> {
    build_link_payload_with_rng(&mut rand::thread_rng(), secret_key, pin)
}

/// `build_link_payload` with an explicit random source.
pub fn build_link_payload_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    secret_key: &[u8; KEY_LEN],
    pin: &str,
) -> Result<LinkPayload> {
    let encrypted_key =
        codec::encrypt_with_rng(rng, secret_key, pin, EncryptOptions::device_link())?;
    let uri = format!("{}{}", LINK_SCHEME, encrypted_key);
    tracing::debug!(len = uri.len(), "built device-link payload");
    Ok(LinkPayload { encrypted_key, uri })
}

/// Whether scanned content looks like a device-link URI.
///
/// Case-insensitive. Also accepts content that embeds the scheme and an
/// encrypted key somewhere other than at the start.
pub fn is_link_uri(data: &str) -> bool {
    let lower = data.trim().to_ascii_lowercase();
    lower.starts_with(LINK_SCHEME)
        || (lower.contains("nostr:link") && lower.contains(codec::PREFIX))
}

/// Strip the `nostr:link:` scheme and return the encrypted key string.
///
/// The scheme is matched case-insensitively and surrounding whitespace is
/// ignored. The remainder must start with `ncryptsec1`; its checksum is left
/// to `decrypt`.
pub fn parse_link_uri(uri: &str) -> std::result::Result<&str, FormatError> {
    let trimmed = uri.trim();
    let scheme = trimmed
        .get(..LINK_SCHEME.len())
        .ok_or(FormatError::NotLinkUri)?;
    if !scheme.eq_ignore_ascii_case(LINK_SCHEME) {
        return Err(FormatError::NotLinkUri);
    }

    let encrypted_key = &trimmed[LINK_SCHEME.len()..];
    let expected = format!("{}1", codec::PREFIX);
    let starts_with_prefix = encrypted_key
        .get(..expected.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(&expected));
    if !starts_with_prefix {
        return Err(FormatError::NotLinkUri);
    }
    Ok(encrypted_key)
}

/// Parse a scanned device-link URI and decrypt it with the PIN.
pub fn open_link_payload(uri: &str, pin: &str) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    let encrypted_key = parse_link_uri(uri)?;
    codec::decrypt(encrypted_key, pin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_generate_pin_length_and_digits() {
        for length in 1..=MAX_PIN_LENGTH {
            let pin = generate_pin(length).expect("valid length");
            assert_eq!(pin.len(), length, "pin {:?} has wrong length", pin);
            assert!(pin.chars().all(|c| c.is_ascii_digit()), "pin {:?} not numeric", pin);
        }
    }

    #[test]
    fn test_generate_pin_rejects_bad_length() {
        assert_eq!(generate_pin(0), Err(FormatError::PinLength(0)));
        assert_eq!(generate_pin(10), Err(FormatError::PinLength(10)));
    }

    #[test]
    fn test_generate_pin_keeps_leading_zeros() {
        // With one digit every value 0..=9 shows up quickly; "0" must stay "0"
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 10];
        for _ in 0..1000 {
            let pin = generate_pin_with_rng(&mut rng, 1).expect("valid length");
            let digit = pin.parse::<usize>().expect("numeric");
            seen[digit] = true;
        }
        assert!(seen.iter().all(|s| *s), "every digit must appear: {:?}", seen);

        let padded: Vec<String> = (0..2000)
            .map(|_| generate_pin_with_rng(&mut rng, 4).expect("valid length"))
            .filter(|pin| pin.starts_with('0'))
            .collect();
        assert!(!padded.is_empty(), "zero-padded PINs must occur");
        assert!(padded.iter().all(|pin| pin.len() == 4));
    }

    #[test]
    fn test_generate_pin_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = [0usize; 10];
        let draws = 20_000;
        for _ in 0..draws {
            let pin = generate_pin_with_rng(&mut rng, 2).expect("valid length");
            let tens = (pin.as_bytes()[0] - b'0') as usize;
            counts[tens] += 1;
        }
        // Expected 2000 per bucket; allow a wide margin
        for (digit, count) in counts.iter().enumerate() {
            assert!(
                (1700..=2300).contains(count),
                "leading digit {} drawn {} times",
                digit,
                count
            );
        }
    }

    #[test]
    fn test_build_link_payload_uri_shape() {
        let payload = build_link_payload(&[0x02; KEY_LEN], "4821").expect("build should succeed");
        assert!(payload.uri.starts_with("nostr:link:ncryptsec1"), "got: {}", payload.uri);
        assert_eq!(payload.uri, format!("nostr:link:{}", payload.encrypted_key));
    }

    #[test]
    fn test_build_link_payload_uses_cheap_cost() {
        let payload = build_link_payload(&[0x02; KEY_LEN], "4821").expect("build should succeed");
        let info = codec::inspect(&payload.encrypted_key).expect("inspect");
        assert_eq!(info.logn, LINK_LOGN);
        assert_eq!(info.ksb, 0x02);
    }

    #[test]
    fn test_open_link_payload_round_trip() {
        let payload = build_link_payload(&[0x02; KEY_LEN], "4821").expect("build should succeed");
        let key = open_link_payload(&payload.uri, "4821").expect("open should succeed");
        assert_eq!(*key, [0x02; KEY_LEN]);

        let wrong = open_link_payload(&payload.uri, "0000");
        assert!(matches!(wrong, Err(Error::Authentication)));
    }

    #[test]
    fn test_parse_link_uri_case_insensitive() {
        let payload = build_link_payload(&[0x04; KEY_LEN], "1111").expect("build should succeed");
        let shouted = payload.uri.to_ascii_uppercase();
        let encrypted_key = parse_link_uri(&shouted).expect("uppercase URI must parse");
        assert!(encrypted_key.starts_with("NCRYPTSEC1"));

        // Uppercase bech32 is valid, so the uppercase URI still opens
        let key = open_link_payload(&shouted, "1111").expect("open should succeed");
        assert_eq!(*key, [0x04; KEY_LEN]);
    }

    #[test]
    fn test_parse_link_uri_rejects_other_content() {
        assert_eq!(parse_link_uri("lnbc1xyz"), Err(FormatError::NotLinkUri));
        assert_eq!(parse_link_uri("nostr:"), Err(FormatError::NotLinkUri));
        assert_eq!(
            parse_link_uri("nostr:link:npub1abc"),
            Err(FormatError::NotLinkUri)
        );
        assert_eq!(parse_link_uri("ñostr:link:x"), Err(FormatError::NotLinkUri));
    }

    #[test]
    fn test_is_link_uri() {
        assert!(is_link_uri("nostr:link:ncryptsec1qqq"));
        assert!(is_link_uri("NOSTR:LINK:NCRYPTSEC1QQQ"));
        assert!(is_link_uri("scan: nostr:link ncryptsec1qqq"));
        assert!(!is_link_uri("nsec1abc"));
        assert!(!is_link_uri("cashuBabc"));
        assert!(!is_link_uri(""));
    }
}
