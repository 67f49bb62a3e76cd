//! Secret key input: hex parsing and reading keys from a file or stdin.
//!
//! Keys are handed to the codec as raw 32-byte arrays. Anything read or parsed
//! here is wrapped in `Zeroizing` so intermediate copies are wiped on drop.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use zeroize::Zeroizing;

use crate::crypto::KEY_LEN;
use crate::error::FormatError;

/// Parse a 64-character hex string (surrounding whitespace ignored) into a key.
pub fn parse_secret_key_hex(input: &str) -> Result<Zeroizing<[u8; KEY_LEN]>, FormatError> {
    let hex_str = input.trim();
    if hex_str.len() != KEY_LEN * 2 {
        return Err(FormatError::KeyLength(hex_str.len() / 2));
    }

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    hex::decode_to_slice(hex_str, key.as_mut()).map_err(|_| FormatError::InvalidHex)?;
    Ok(key)
}

/// Read a hex-encoded secret key from `source`: a file path, or `-` for stdin.
pub fn read_secret_key(source: &str) -> anyhow::Result<Zeroizing<[u8; KEY_LEN]>> {
    let mut buf = Zeroizing::new(String::new());
    if source == "-" {
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read secret key from stdin")?;
    } else {
        let path = Path::new(source);
        warn_if_readable_by_others(path)?;
        std::fs::File::open(path)
            .and_then(|mut file| file.read_to_string(&mut buf))
            .with_context(|| format!("Failed to read secret key from {}", path.display()))?;
    }

    if buf.trim().is_empty() {
        anyhow::bail!("No key data received from {}", display_source(source));
    }

    parse_secret_key_hex(&buf)
        .with_context(|| format!("Invalid secret key in {}", display_source(source)))
}

fn display_source(source: &str) -> &str {
    if source == "-" {
        "stdin"
    } else {
        source
    }
}

/// Log a warning when a key file grants group or other access (Unix only).
#[cfg(unix)]
pub fn warn_if_readable_by_others(path: &Path) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?;
    let mode = metadata.permissions().mode() & 0o777;
    if mode & 0o077 != 0 {
        tracing::warn!(
            path = %path.display(),
            mode = %format!("{:04o}", mode),
            "secret key file is accessible to other users; fix with chmod 600"
        );
    }
    Ok(())
}

#[cfg(not(unix))]
pub fn warn_if_readable_by_others(_path: &Path) -> anyhow::Result<()> {
    Ok(())
}
