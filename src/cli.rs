use clap::{Parser, Subcommand, ValueEnum};

use ncryptsec::KeySecurity;

#[derive(Parser)]
#[command(
    name = "ncryptsec",
    version,
    about = "Password-encrypt secret keys (ncryptsec) and hand them to another device via QR"
)]
pub struct Cli {
    /// Log debug events to stderr (RUST_LOG takes precedence when set)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a hex secret key with a password
    Encrypt(EncryptArgs),
    /// Decrypt an ncryptsec string back to the hex secret key
    Decrypt(DecryptArgs),
    /// Show the public parameters of an ncryptsec string
    Inspect(InspectArgs),
    /// Build a PIN-protected device-link QR code for a secret key
    Link(LinkArgs),
    /// Decrypt a scanned nostr:link: URI with its PIN
    OpenLink(OpenLinkArgs),
}

/// Advisory key security byte stored in the envelope.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KsbArg {
    /// Key has been handled insecurely (0x00)
    Insecure,
    /// Key has never been handled insecurely (0x01)
    Secure,
    /// Unknown handling (0x02)
    Unknown,
}

impl From<KsbArg> for KeySecurity {
    fn from(arg: KsbArg) -> Self {
        match arg {
            KsbArg::Insecure => KeySecurity::Insecure,
            KsbArg::Secure => KeySecurity::Secure,
            KsbArg::Unknown => KeySecurity::Unknown,
        }
    }
}

#[derive(Parser)]
pub struct EncryptArgs {
    /// File holding the hex secret key, or - for stdin
    #[arg(long, value_name = "PATH", default_value = "-")]
    pub key_file: String,

    /// scrypt cost exponent (N = 2^logn)
    #[arg(long, env = "NCRYPTSEC_LOGN", default_value_t = ncryptsec::codec::STORAGE_LOGN)]
    pub logn: u8,

    /// Key security byte to record in the envelope
    #[arg(long, value_enum, default_value = "unknown")]
    pub ksb: KsbArg,

    /// Render the result as a QR code in the terminal
    #[arg(long)]
    pub qr: bool,

    /// Copy the result to the clipboard
    #[arg(long)]
    pub copy: bool,
}

#[derive(Parser)]
pub struct DecryptArgs {
    /// The ncryptsec1... string
    #[arg(value_name = "NCRYPTSEC")]
    pub encrypted_key: String,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// The ncryptsec1... string
    #[arg(value_name = "NCRYPTSEC")]
    pub encrypted_key: String,

    /// Print machine-readable JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct LinkArgs {
    /// File holding the hex secret key, or - for stdin
    #[arg(long, value_name = "PATH", default_value = "-")]
    pub key_file: String,

    /// Number of PIN digits
    #[arg(long, default_value_t = ncryptsec::link::DEFAULT_PIN_LENGTH)]
    pub pin_length: usize,

    /// Print the URI without rendering a QR code
    #[arg(long)]
    pub no_qr: bool,
}

#[derive(Parser)]
pub struct OpenLinkArgs {
    /// The scanned nostr:link:ncryptsec1... URI
    #[arg(value_name = "URI")]
    pub uri: String,
}
