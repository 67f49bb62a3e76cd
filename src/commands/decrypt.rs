/// Decrypt command: prompts for the password and prints the hex secret key.
use owo_colors::{OwoColorize, Stream::Stderr};

use ncryptsec::Error;

use crate::cli::DecryptArgs;

pub fn run_decrypt(args: DecryptArgs) -> anyhow::Result<()> {
    // Parse first so a malformed string fails before the password prompt
    let info = ncryptsec::inspect(&args.encrypted_key)?;
    ncryptsec::crypto::check_logn(info.logn)?;

    let password = super::prompt_secret("Enter password", None)?;

    match ncryptsec::decrypt_to_hex(&args.encrypted_key, &password) {
        Ok(hex_key) => {
            println!("{}", hex_key.as_str());
            Ok(())
        }
        Err(Error::Authentication) => {
            eprintln!(
                "{}",
                "Error: Wrong password or corrupted encrypted key."
                    .if_supports_color(Stderr, |t| t.red())
            );
            anyhow::bail!("Decryption failed");
        }
        Err(e) => Err(e.into()),
    }
}
