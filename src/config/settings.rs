use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::alg::{NamedCurve, SecureHash};
use crate::errors::{Result, WebCryptoError};
use crate::kdf::Pbkdf2Iterations;
use crate::params::{EcKeyGenParams, HmacKeyGenParams, RsaHashedKeyGenParams};

/// Facade defaults, loaded from `webcrypto.toml`.
///
/// Every field has a default so the crate works without any config
/// file at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// PBKDF2 iterations per hash when a request omits them.
    #[serde(default)]
    pub pbkdf2_iterations: Pbkdf2Iterations,

    /// Curve used by `ec_key_gen_params()` (default: P-521).
    #[serde(default = "default_curve")]
    pub default_curve: NamedCurve,

    /// RSA modulus length in bits, used by `rsa_key_gen_params()` (default: 4096).
    #[serde(default = "default_modulus_length")]
    pub default_modulus_length: u32,

    /// Hash used by the `*_params()` builders and `webcrypto derive`
    /// (default: SHA-512).  `WebCrypto::with_settings` does not apply it.
    #[serde(default = "default_hash")]
    pub default_hash: SecureHash,

    /// IV and salt length in bytes (default: 16).
    #[serde(default = "default_random_length")]
    pub random_length: usize,

    /// Bits produced by `webcrypto derive` (default: 256).
    #[serde(default = "default_derive_bits")]
    pub derive_bits: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_curve() -> NamedCurve {
    NamedCurve::P521
}

fn default_modulus_length() -> u32 {
    4096
}

fn default_hash() -> SecureHash {
    SecureHash::Sha512
}

fn default_random_length() -> usize {
    16
}

fn default_derive_bits() -> u32 {
    256
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            pbkdf2_iterations: Pbkdf2Iterations::default(),
            default_curve: default_curve(),
            default_modulus_length: default_modulus_length(),
            default_hash: default_hash(),
            random_length: default_random_length(),
            derive_bits: default_derive_bits(),
        }
    }
}

impl Settings {
    /// Name of the config file looked up in a directory.
    pub const FILE_NAME: &'static str = "webcrypto.toml";

    /// Load settings from `<dir>/webcrypto.toml`.
    ///
    /// A missing file gives the defaults; a file that cannot be parsed
    /// is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::parse_file(&config_path)
    }

    /// Load settings from an explicit file, which must exist.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(WebCryptoError::ConfigNotFound(path.to_path_buf()));
        }
        Self::parse_file(path)
    }

    /// `load_file` when `path` is given, otherwise `load` from `dir`.
    pub fn resolve(path: Option<&Path>, dir: &Path) -> Result<Self> {
        match path {
            Some(p) => Self::load_file(p),
            None => Self::load(dir),
        }
    }

    fn parse_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            WebCryptoError::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;

        Ok(settings)
    }

    /// Where `load` looks in `dir`.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(Self::FILE_NAME)
    }

    pub fn ec_key_gen_params(&self) -> EcKeyGenParams {
        EcKeyGenParams {
            named_curve: self.default_curve,
        }
    }

    pub fn rsa_key_gen_params(&self) -> RsaHashedKeyGenParams {
        RsaHashedKeyGenParams {
            modulus_length: self.default_modulus_length,
            hash: self.default_hash,
            ..Default::default()
        }
    }

    pub fn hmac_key_gen_params(&self) -> HmacKeyGenParams {
        HmacKeyGenParams {
            hash: self.default_hash,
            length: None,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
