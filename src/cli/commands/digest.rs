//! `webcrypto digest`: hex digest of a file or stdin.
//!
//! Usage:
//!   webcrypto digest README.md
//!   echo -n abc | webcrypto digest --alg SHA-256

use std::path::Path;

use crate::alg::ShaVariant;
use crate::cli::{context, load_settings, read_input, Cli};
use crate::errors::Result;

/// Execute the `digest` command.
pub fn execute(cli: &Cli, alg: &str, file: Option<&Path>) -> Result<()> {
    let variant: ShaVariant = alg.parse()?;
    let settings = load_settings(cli)?;
    let data = read_input(file)?;
    let hex = context(&settings).sha(variant).hex_digest(&data)?;
    println!("{hex}");
    Ok(())
}
