//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, WebCryptoError};
use crate::WebCrypto;

/// webcrypto: typed WebCrypto operations from the command line.
#[derive(Parser)]
#[command(
    name = "webcrypto",
    about = "Key generation, digests, random values and PBKDF2 from the command line",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (default: ./webcrypto.toml when present)
    #[arg(long, global = true, env = "WEBCRYPTO_CONFIG")]
    pub config: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Show the usages inferred for each algorithm
    Usages {
        /// Only this algorithm (e.g. AES-GCM)
        alg: Option<String>,
    },

    /// Hex digest of a file or stdin
    Digest {
        /// SHA-1, SHA-256, SHA-384 or SHA-512
        #[arg(short, long, default_value = "SHA-512")]
        alg: String,

        /// File to hash (reads stdin if omitted)
        file: Option<PathBuf>,
    },

    /// Random bytes as hex, or a v4 UUID
    Random {
        /// Number of bytes (default: configured random length)
        #[arg(short, long)]
        len: Option<usize>,

        /// Print a UUID instead of bytes
        #[arg(long, conflicts_with = "len")]
        uuid: bool,
    },

    /// Generate a key or key pair and print its export
    Keygen {
        /// Algorithm name (e.g. AES-GCM, ECDSA, RSA-PSS, HMAC)
        alg: String,

        /// Export format for secret keys: raw or jwk. Pairs use jwk, or pkcs8 + spki otherwise.
        #[arg(short, long, default_value = "jwk")]
        format: String,
    },

    /// Derive bits from a password with PBKDF2
    Derive {
        /// SHA-256, SHA-384 or SHA-512 (default: configured hash)
        #[arg(long)]
        hash: Option<String>,

        /// Salt as hex (random when omitted)
        #[arg(long)]
        salt: Option<String>,

        /// Number of bits (default: configured derive bits)
        #[arg(long)]
        bits: Option<u32>,

        /// Iteration count (default: configured table)
        #[arg(long)]
        iterations: Option<u32>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Settings from `--config`, or from `webcrypto.toml` in the current
/// directory when it exists.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::resolve(cli.config.as_deref(), &cwd)
}

/// A software-backed context configured from `settings`.
pub fn context(settings: &Settings) -> WebCrypto {
    WebCrypto::software().with_settings(settings)
}

/// Get the password to derive from, trying in order:
/// 1. `WEBCRYPTO_PASSWORD` env var (scripts and CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("WEBCRYPTO_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| WebCryptoError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Decode a hex string (either case, even length).
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    hex::decode(s.trim())
        .map_err(|e| WebCryptoError::CommandFailed(format!("invalid hex '{}': {e}", s.trim())))
}

/// Read a whole file, or stdin when `path` is `None`.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(p) => Ok(std::fs::read(p)?),
        None => {
            use std::io::Read;
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}
