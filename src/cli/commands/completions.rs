//! `webcrypto completions`: shell completion scripts.
//!
//! Usage:
//!   webcrypto completions bash > ~/.bash_completion.d/webcrypto
//!   webcrypto completions zsh

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::{Result, WebCryptoError};

/// Execute the `completions` command, writing to stdout.
pub fn execute(shell: &str) -> Result<()> {
    write_script(parse_shell(shell)?, &mut io::stdout())
}

/// Write the completion script for `shell` to `out`.
pub fn write_script(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "webcrypto", out);
    Ok(())
}

/// Shell names are matched case-insensitively; `ps` is PowerShell.
fn parse_shell(name: &str) -> Result<Shell> {
    if name.eq_ignore_ascii_case("ps") {
        return Ok(Shell::PowerShell);
    }
    <Shell as clap::ValueEnum>::from_str(name, true).map_err(|_| {
        WebCryptoError::CommandFailed(format!(
            "unknown shell '{name}', supported: bash, zsh, fish, powershell, elvish"
        ))
    })
}
