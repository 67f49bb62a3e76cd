pub mod decrypt;
pub mod encrypt;
pub mod inspect;
pub mod link;
pub mod open_link;

use std::io::{self, IsTerminal};

use zeroize::Zeroizing;

/// Prompt for a secret on the terminal, optionally asking twice.
///
/// Secrets are never accepted from arguments or the environment, so a
/// non-interactive session is an error.
pub(crate) fn prompt_secret(
    prompt: &str,
    confirm: Option<&str>,
) -> anyhow::Result<Zeroizing<String>> {
    if !io::stderr().is_terminal() {
        anyhow::bail!("{} requires an interactive terminal", prompt);
    }
    let mut input = dialoguer::Password::new().with_prompt(prompt);
    if let Some(confirm_prompt) = confirm {
        input = input.with_confirmation(confirm_prompt, "Entries don't match");
    }
    let secret = input
        .interact()
        .map_err(|e| anyhow::anyhow!("{} prompt failed: {}", prompt, e))?;
    Ok(Zeroizing::new(secret))
}

pub(crate) fn try_copy_to_clipboard(text: &str) -> bool {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => clipboard.set_text(text).is_ok(),
        Err(_) => false,
    }
}
