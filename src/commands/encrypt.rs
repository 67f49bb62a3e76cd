/// Encrypt command: reads a hex secret key, prompts for a password, and prints
/// the ncryptsec string.
use anyhow::Context;
use owo_colors::{OwoColorize, Stream::Stderr};

use ncryptsec::util::{human_bytes, scrypt_memory_bytes};
use ncryptsec::{EncryptOptions, KeySecurity};

use crate::cli::EncryptArgs;

pub fn run_encrypt(args: EncryptArgs) -> anyhow::Result<()> {
    // ── 1. Validate options before touching any secret ───────────────────
    ncryptsec::crypto::check_logn(args.logn)?;
    let options = EncryptOptions::storage()
        .with_logn(args.logn)
        .with_key_security(KeySecurity::from(args.ksb));

    // ── 2. Read key and password ──────────────────────────────────────────
    let secret_key = ncryptsec::keys::read_secret_key(&args.key_file)?;
    let password = super::prompt_secret("Enter password", Some("Confirm password"))?;

    // ── 3. Encrypt ────────────────────────────────────────────────────────
    eprintln!(
        "Deriving key (logn={}, {} of memory)...",
        args.logn,
        human_bytes(scrypt_memory_bytes(args.logn))
    );
    let encoded = ncryptsec::encrypt(&secret_key, &password, options)
        .context("Failed to encrypt secret key")?;

    // ── 4. Output ─────────────────────────────────────────────────────────
    println!("{}", encoded);
    if args.logn < ncryptsec::codec::STORAGE_LOGN {
        eprintln!(
            "{}",
            format!(
                "Warning: logn={} is below the storage default of {}.",
                args.logn,
                ncryptsec::codec::STORAGE_LOGN
            )
            .if_supports_color(Stderr, |t| t.yellow())
        );
    }

    if args.copy {
        if super::try_copy_to_clipboard(&encoded) {
            eprintln!("Encrypted key copied to clipboard.");
        } else {
            eprintln!("(Clipboard unavailable; copy the encrypted key manually)");
        }
    }

    if args.qr {
        println!();
        qr2term::print_qr(&encoded).map_err(|e| anyhow::anyhow!("QR code render failed: {}", e))?;
    }

    Ok(())
}
