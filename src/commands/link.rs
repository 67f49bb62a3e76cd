/// Link command: generates a PIN, encrypts the secret key with the cheap
/// device-link profile, and renders the nostr:link: URI as a QR code.
use owo_colors::{OwoColorize, Stream::Stdout};

use crate::cli::LinkArgs;

pub fn run_link(args: LinkArgs) -> anyhow::Result<()> {
    // ── 1. PIN first: a bad --pin-length fails before the key is read ────
    let pin = ncryptsec::generate_pin(args.pin_length)?;

    // ── 2. Read key and build payload ────────────────────────────────────
    let secret_key = ncryptsec::keys::read_secret_key(&args.key_file)?;
    let payload = ncryptsec::build_link_payload(&secret_key, &pin)?;

    // ── 3. Output ────────────────────────────────────────────────────────
    if !args.no_qr {
        qr2term::print_qr(&payload.uri)
            .map_err(|e| anyhow::anyhow!("QR code render failed: {}", e))?;
        println!();
    }
    println!("{}", payload.uri);
    println!();
    println!(
        "PIN: {}",
        pin.as_str().if_supports_color(Stdout, |t| t.bold())
    );
    println!(
        "{}",
        "Scan on the other device and enter the PIN. Close this screen when done."
            .if_supports_color(Stdout, |t| t.yellow())
    );

    Ok(())
}
