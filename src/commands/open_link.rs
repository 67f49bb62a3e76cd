/// Open-link command: decrypts a scanned nostr:link: URI with the PIN shown
/// on the sending device.
use owo_colors::{OwoColorize, Stream::Stderr};

use ncryptsec::Error;
use zeroize::Zeroizing;

use crate::cli::OpenLinkArgs;

pub fn run_open_link(args: OpenLinkArgs) -> anyhow::Result<()> {
    if !ncryptsec::link::is_link_uri(&args.uri) {
        anyhow::bail!("Not a device-link URI (expected nostr:link:ncryptsec1...)");
    }
    ncryptsec::link::parse_link_uri(&args.uri)?;

    let pin = super::prompt_secret("Enter PIN", None)?;

    match ncryptsec::open_link_payload(&args.uri, &pin) {
        Ok(secret_key) => {
            let hex_key = Zeroizing::new(hex::encode(&secret_key[..]));
            println!("{}", hex_key.as_str());
            Ok(())
        }
        Err(Error::Authentication) => {
            eprintln!(
                "{}",
                "Error: Incorrect PIN. Cannot decrypt this link."
                    .if_supports_color(Stderr, |t| t.red())
            );
            anyhow::bail!("Incorrect PIN: decryption failed");
        }
        Err(e) => Err(e.into()),
    }
}
