//! Closed sets of algorithm identifiers.
//!
//! Every algorithm the layer knows about is a variant of [`Algorithm`].
//! Family enums (`AesMode`, `RsaVariant`, ...) narrow that set for the
//! shared modules, so a facade can only ever name an algorithm of its own
//! family.  Parsing a string that is not in the set fails with
//! [`WebCryptoError::UnsupportedAlgorithm`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, WebCryptoError};

/// Every algorithm a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    AesCbc,
    AesCtr,
    AesGcm,
    AesKw,
    RsaOaep,
    RsaPss,
    RsassaPkcs1V15,
    Ecdsa,
    Ecdh,
    Hmac,
    Hkdf,
    Pbkdf2,
}

impl Algorithm {
    /// All key algorithms, in inference-table order.
    pub const ALL: [Algorithm; 12] = [
        Algorithm::AesCbc,
        Algorithm::AesCtr,
        Algorithm::AesGcm,
        Algorithm::RsaOaep,
        Algorithm::Hmac,
        Algorithm::Ecdsa,
        Algorithm::RsaPss,
        Algorithm::RsassaPkcs1V15,
        Algorithm::Ecdh,
        Algorithm::Hkdf,
        Algorithm::Pbkdf2,
        Algorithm::AesKw,
    ];

    /// The registered WebCrypto name, e.g. `"AES-GCM"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::AesCbc => "AES-CBC",
            Algorithm::AesCtr => "AES-CTR",
            Algorithm::AesGcm => "AES-GCM",
            Algorithm::AesKw => "AES-KW",
            Algorithm::RsaOaep => "RSA-OAEP",
            Algorithm::RsaPss => "RSA-PSS",
            Algorithm::RsassaPkcs1V15 => "RSASSA-PKCS1-v1_5",
            Algorithm::Ecdsa => "ECDSA",
            Algorithm::Ecdh => "ECDH",
            Algorithm::Hmac => "HMAC",
            Algorithm::Hkdf => "HKDF",
            Algorithm::Pbkdf2 => "PBKDF2",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = WebCryptoError;

    /// Names are matched exactly, the way WebCrypto registers them.
    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| WebCryptoError::UnsupportedAlgorithm(s.to_string()))
    }
}

/// AES block cipher modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AesMode {
    Cbc,
    Ctr,
    Gcm,
    Kw,
}

impl AesMode {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            AesMode::Cbc => Algorithm::AesCbc,
            AesMode::Ctr => Algorithm::AesCtr,
            AesMode::Gcm => Algorithm::AesGcm,
            AesMode::Kw => Algorithm::AesKw,
        }
    }
}

/// RSA schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsaVariant {
    Oaep,
    Pss,
    Pkcs1V15,
}

impl RsaVariant {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            RsaVariant::Oaep => Algorithm::RsaOaep,
            RsaVariant::Pss => Algorithm::RsaPss,
            RsaVariant::Pkcs1V15 => Algorithm::RsassaPkcs1V15,
        }
    }
}

/// Elliptic-curve schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcVariant {
    Ecdsa,
    Ecdh,
}

impl EcVariant {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            EcVariant::Ecdsa => Algorithm::Ecdsa,
            EcVariant::Ecdh => Algorithm::Ecdh,
        }
    }
}

/// Key derivation functions that take key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KdfVariant {
    Hkdf,
    Pbkdf2,
}

impl KdfVariant {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            KdfVariant::Hkdf => Algorithm::Hkdf,
            KdfVariant::Pbkdf2 => Algorithm::Pbkdf2,
        }
    }
}

/// Digest algorithms, including the legacy SHA-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaVariant {
    #[serde(rename = "SHA-1")]
    Sha1,
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-384")]
    Sha384,
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl ShaVariant {
    pub const ALL: [ShaVariant; 4] = [
        ShaVariant::Sha1,
        ShaVariant::Sha256,
        ShaVariant::Sha384,
        ShaVariant::Sha512,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShaVariant::Sha1 => "SHA-1",
            ShaVariant::Sha256 => "SHA-256",
            ShaVariant::Sha384 => "SHA-384",
            ShaVariant::Sha512 => "SHA-512",
        }
    }

    /// Digest output size in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            ShaVariant::Sha1 => 20,
            ShaVariant::Sha256 => 32,
            ShaVariant::Sha384 => 48,
            ShaVariant::Sha512 => 64,
        }
    }

    /// Internal block size in bits (the default HMAC key length).
    pub fn block_bits(&self) -> u32 {
        match self {
            ShaVariant::Sha1 | ShaVariant::Sha256 => 512,
            ShaVariant::Sha384 | ShaVariant::Sha512 => 1024,
        }
    }
}

impl fmt::Display for ShaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShaVariant {
    type Err = WebCryptoError;

    fn from_str(s: &str) -> Result<Self> {
        ShaVariant::ALL
            .into_iter()
            .find(|sha| sha.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| WebCryptoError::UnsupportedAlgorithm(s.to_string()))
    }
}

/// The SHA-2 hashes accepted wherever a keyed algorithm needs a hash.
///
/// SHA-1 is deliberately absent: it is reachable only through the digest
/// facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecureHash {
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-384")]
    Sha384,
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl SecureHash {
    pub fn variant(&self) -> ShaVariant {
        match self {
            SecureHash::Sha256 => ShaVariant::Sha256,
            SecureHash::Sha384 => ShaVariant::Sha384,
            SecureHash::Sha512 => ShaVariant::Sha512,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.variant().as_str()
    }
}

impl From<SecureHash> for ShaVariant {
    fn from(hash: SecureHash) -> Self {
        hash.variant()
    }
}

impl fmt::Display for SecureHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecureHash {
    type Err = WebCryptoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.parse::<ShaVariant>()? {
            ShaVariant::Sha256 => Ok(SecureHash::Sha256),
            ShaVariant::Sha384 => Ok(SecureHash::Sha384),
            ShaVariant::Sha512 => Ok(SecureHash::Sha512),
            ShaVariant::Sha1 => Err(WebCryptoError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// NIST prime curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedCurve {
    #[serde(rename = "P-256")]
    P256,
    #[serde(rename = "P-384")]
    P384,
    #[serde(rename = "P-521")]
    P521,
}

impl NamedCurve {
    pub fn as_str(&self) -> &'static str {
        match self {
            NamedCurve::P256 => "P-256",
            NamedCurve::P384 => "P-384",
            NamedCurve::P521 => "P-521",
        }
    }

    /// Size of one field element (and of a private scalar) in bytes.
    pub fn field_len(&self) -> usize {
        match self {
            NamedCurve::P256 => 32,
            NamedCurve::P384 => 48,
            NamedCurve::P521 => 66,
        }
    }

    /// Size of the field in bits, the upper bound for ECDH `derive_bits`.
    pub fn field_bits(&self) -> u32 {
        match self {
            NamedCurve::P256 => 256,
            NamedCurve::P384 => 384,
            NamedCurve::P521 => 521,
        }
    }
}

impl fmt::Display for NamedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamedCurve {
    type Err = WebCryptoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "P-256" => Ok(NamedCurve::P256),
            "P-384" => Ok(NamedCurve::P384),
            "P-521" => Ok(NamedCurve::P521),
            other => Err(WebCryptoError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// AES key sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum AesKeyLength {
    Aes128,
    Aes192,
    Aes256,
}

impl AesKeyLength {
    pub fn bits(&self) -> u32 {
        match self {
            AesKeyLength::Aes128 => 128,
            AesKeyLength::Aes192 => 192,
            AesKeyLength::Aes256 => 256,
        }
    }

    pub fn bytes(&self) -> usize {
        self.bits() as usize / 8
    }
}

impl From<AesKeyLength> for u32 {
    fn from(length: AesKeyLength) -> Self {
        length.bits()
    }
}

impl TryFrom<u32> for AesKeyLength {
    type Error = WebCryptoError;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            128 => Ok(AesKeyLength::Aes128),
            192 => Ok(AesKeyLength::Aes192),
            256 => Ok(AesKeyLength::Aes256),
            other => Err(WebCryptoError::InvalidParameter(format!(
                "AES key length must be 128, 192 or 256 bits (got {other})"
            ))),
        }
    }
}

/// Key interchange formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFormat {
    Raw,
    Pkcs8,
    Spki,
    Jwk,
}

impl KeyFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyFormat::Raw => "raw",
            KeyFormat::Pkcs8 => "pkcs8",
            KeyFormat::Spki => "spki",
            KeyFormat::Jwk => "jwk",
        }
    }
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyFormat {
    type Err = WebCryptoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "raw" => Ok(KeyFormat::Raw),
            "pkcs8" => Ok(KeyFormat::Pkcs8),
            "spki" => Ok(KeyFormat::Spki),
            "jwk" => Ok(KeyFormat::Jwk),
            other => Err(WebCryptoError::InvalidParameter(format!(
                "unknown key format '{other}' (expected raw, pkcs8, spki or jwk)"
            ))),
        }
    }
}

/// The role tag carried by every key handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Secret,
    Public,
    Private,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Secret => "secret",
            KeyType::Public => "public",
            KeyType::Private => "private",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
