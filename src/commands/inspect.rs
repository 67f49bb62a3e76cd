/// Inspect command: shows version, cost factor and key security of an
/// ncryptsec string without asking for the password.
use owo_colors::{OwoColorize, Stream::Stdout};

use ncryptsec::util::{human_bytes, scrypt_memory_bytes};

use crate::cli::InspectArgs;

pub fn run_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let info = ncryptsec::inspect(&args.encrypted_key)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let key_security = match info.key_security {
        Some(ks) => format!("{} (0x{:02x})", ks, info.ksb),
        None => format!("invalid (0x{:02x})", info.ksb),
    };

    println!("Version:       {}", info.version);
    println!(
        "Cost:          logn={} (N={}, {})",
        info.logn,
        1u64.checked_shl(u32::from(info.logn))
            .map(|n| n.to_string())
            .unwrap_or_else(|| "overflow".to_string()),
        human_bytes(scrypt_memory_bytes(info.logn))
    );
    println!("Key security:  {}", key_security);
    println!("Ciphertext:    {} bytes", info.ciphertext_len);

    if ncryptsec::crypto::check_logn(info.logn).is_err() {
        println!(
            "{}",
            format!(
                "Warning: logn={} is outside the range this build will decrypt.",
                info.logn
            )
            .if_supports_color(Stdout, |t| t.yellow())
        );
    } else if info.logn <= ncryptsec::link::LINK_LOGN {
        println!(
            "{}",
            "Note: low cost factor; suitable for short-lived device links only."
                .if_supports_color(Stdout, |t| t.yellow())
        );
    }

    Ok(())
}
