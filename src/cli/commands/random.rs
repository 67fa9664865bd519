//! `webcrypto random`: random bytes as hex, or a v4 UUID.

use crate::cli::{context, load_settings, Cli};
use crate::errors::Result;
use crate::sha::hexify;

/// Execute the `random` command.
pub fn execute(cli: &Cli, len: Option<usize>, uuid: bool) -> Result<()> {
    let settings = load_settings(cli)?;
    let random = context(&settings).random();

    if uuid {
        println!("{}", random.uuid()?);
        return Ok(());
    }

    let bytes = match len {
        Some(n) => random.get_values(n)?,
        None => random.salt()?,
    };
    println!("{}", hexify(&bytes));
    Ok(())
}
