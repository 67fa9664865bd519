//! Key-usage inference.
//!
//! Every algorithm maps to exactly one of four fixed usage pairs.  The
//! pair is what a freshly generated, imported, derived or unwrapped key
//! receives when the caller does not name its usages explicitly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alg::Algorithm;
use crate::errors::{Result, WebCryptoError};

/// One operation a key may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyUsage {
    Encrypt,
    Decrypt,
    Sign,
    Verify,
    DeriveKey,
    DeriveBits,
    WrapKey,
    UnwrapKey,
}

impl KeyUsage {
    pub const ALL: [KeyUsage; 8] = [
        KeyUsage::Encrypt,
        KeyUsage::Decrypt,
        KeyUsage::Sign,
        KeyUsage::Verify,
        KeyUsage::DeriveKey,
        KeyUsage::DeriveBits,
        KeyUsage::WrapKey,
        KeyUsage::UnwrapKey,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyUsage::Encrypt => "encrypt",
            KeyUsage::Decrypt => "decrypt",
            KeyUsage::Sign => "sign",
            KeyUsage::Verify => "verify",
            KeyUsage::DeriveKey => "deriveKey",
            KeyUsage::DeriveBits => "deriveBits",
            KeyUsage::WrapKey => "wrapKey",
            KeyUsage::UnwrapKey => "unwrapKey",
        }
    }

    /// Whether the usage belongs to the private half of a key pair.
    pub fn is_private_role(&self) -> bool {
        matches!(
            self,
            KeyUsage::Decrypt
                | KeyUsage::Sign
                | KeyUsage::DeriveKey
                | KeyUsage::DeriveBits
                | KeyUsage::UnwrapKey
        )
    }
}

impl fmt::Display for KeyUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyUsage {
    type Err = WebCryptoError;

    fn from_str(s: &str) -> Result<Self> {
        KeyUsage::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| WebCryptoError::InvalidParameter(format!("unknown key usage '{s}'")))
    }
}

/// A canonical pair of complementary usages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UsagePair(pub KeyUsage, pub KeyUsage);

impl UsagePair {
    pub const ENCRYPTION: UsagePair = UsagePair(KeyUsage::Encrypt, KeyUsage::Decrypt);
    pub const SIGNING: UsagePair = UsagePair(KeyUsage::Sign, KeyUsage::Verify);
    pub const DERIVATION: UsagePair = UsagePair(KeyUsage::DeriveKey, KeyUsage::DeriveBits);
    pub const WRAPPING: UsagePair = UsagePair(KeyUsage::WrapKey, KeyUsage::UnwrapKey);

    /// A fresh, owned list of both usages.
    pub fn to_vec(&self) -> Vec<KeyUsage> {
        vec![self.0, self.1]
    }

    pub fn contains(&self, usage: KeyUsage) -> bool {
        self.0 == usage || self.1 == usage
    }
}

impl fmt::Display for UsagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.0, self.1)
    }
}

/// Canonical usage pair for an algorithm.
pub fn infer_usages(alg: Algorithm) -> UsagePair {
    match alg {
        Algorithm::AesCbc | Algorithm::AesCtr | Algorithm::AesGcm | Algorithm::RsaOaep => {
            UsagePair::ENCRYPTION
        }
        Algorithm::Hmac | Algorithm::Ecdsa | Algorithm::RsaPss | Algorithm::RsassaPkcs1V15 => {
            UsagePair::SIGNING
        }
        Algorithm::Ecdh | Algorithm::Hkdf | Algorithm::Pbkdf2 => UsagePair::DERIVATION,
        Algorithm::AesKw => UsagePair::WRAPPING,
    }
}

/// Canonical usage pair for an algorithm given by name.
///
/// Unknown names (digest names included) fail with
/// [`WebCryptoError::UnsupportedAlgorithm`].
pub fn infer_usages_by_name(name: &str) -> Result<UsagePair> {
    let alg: Algorithm = name.parse()?;
    Ok(infer_usages(alg))
}

/// The caller's usages, or the inferred pair for `alg` when none were given.
pub(crate) fn resolve(alg: Algorithm, usages: Option<&[KeyUsage]>) -> Vec<KeyUsage> {
    match usages {
        Some(explicit) => explicit.to_vec(),
        None => infer_usages(alg).to_vec(),
    }
}
