//! `webcrypto derive`: PBKDF2 bits from a password.
//!
//! The password comes from `WEBCRYPTO_PASSWORD` or an interactive prompt.
//! Prints the salt and the derived bits as hex.

use crate::alg::SecureHash;
use crate::cli::{context, decode_hex, load_settings, output, prompt_password, Cli};
use crate::errors::Result;
use crate::params::Pbkdf2Params;
use crate::sha::hexify;

/// Execute the `derive` command.
pub fn execute(
    cli: &Cli,
    hash: Option<&str>,
    salt: Option<&str>,
    bits: Option<u32>,
    iterations: Option<u32>,
) -> Result<()> {
    let settings = load_settings(cli)?;
    let crypto = context(&settings);

    let hash: SecureHash = match hash {
        Some(h) => h.parse()?,
        None => settings.default_hash,
    };
    let salt = match salt {
        Some(s) => decode_hex(s)?,
        None => crypto.random().salt()?,
    };
    let bits = bits.unwrap_or(settings.derive_bits);

    let password = prompt_password()?;
    let pbkdf2 = crypto.pbkdf2();
    let key = pbkdf2.import_key(password.as_bytes(), None)?;

    let mut params = Pbkdf2Params::new(hash, salt.clone());
    params.iterations = iterations;
    let derived = key.derive_bits(&params, bits)?;

    let recommended = pbkdf2.iterations().for_hash(hash);
    let used = iterations.unwrap_or(recommended);
    if used < recommended {
        output::warning(&format!(
            "{used} iterations is below the configured {recommended} for {hash}"
        ));
    }
    output::info(&format!("PBKDF2-{hash}, {used} iterations"));
    println!("salt: {}", hexify(&salt));
    println!("bits: {}", hexify(&derived));
    Ok(())
}
