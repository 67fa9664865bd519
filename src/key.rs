//! Key handles, key pairs and key data.
//!
//! A [`CryptoKey`] is an opaque, immutable handle.  The provider that
//! created it stores its own material inside; the layer only ever reads
//! the metadata.  Cloning a handle is cheap and shares the same key.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::alg::{
    AesKeyLength, AesMode, Algorithm, EcVariant, KdfVariant, KeyType, NamedCurve, RsaVariant,
    SecureHash,
};
use crate::usages::KeyUsage;

/// Algorithm metadata attached to a key handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Aes {
        mode: AesMode,
        length: AesKeyLength,
    },
    Hmac {
        hash: SecureHash,
        /// Key length in bits.
        length: u32,
    },
    Rsa {
        variant: RsaVariant,
        modulus_length: u32,
        /// Big-endian public exponent.
        public_exponent: Vec<u8>,
        hash: SecureHash,
    },
    Ec {
        variant: EcVariant,
        curve: NamedCurve,
    },
    Kdf {
        variant: KdfVariant,
    },
}

impl KeyAlgorithm {
    pub fn name(&self) -> Algorithm {
        match self {
            KeyAlgorithm::Aes { mode, .. } => mode.algorithm(),
            KeyAlgorithm::Hmac { .. } => Algorithm::Hmac,
            KeyAlgorithm::Rsa { variant, .. } => variant.algorithm(),
            KeyAlgorithm::Ec { variant, .. } => variant.algorithm(),
            KeyAlgorithm::Kdf { variant } => variant.algorithm(),
        }
    }
}

struct KeyInner {
    algorithm: KeyAlgorithm,
    extractable: bool,
    key_type: KeyType,
    usages: Vec<KeyUsage>,
    material: Box<dyn Any + Send + Sync>,
}

/// Opaque, provider-owned key handle.
#[derive(Clone)]
pub struct CryptoKey {
    inner: Arc<KeyInner>,
}

impl CryptoKey {
    /// Build a handle around provider-specific `material`.
    ///
    /// Only providers call this; the layer never creates keys on its own.
    pub fn new<M>(
        algorithm: KeyAlgorithm,
        extractable: bool,
        key_type: KeyType,
        usages: Vec<KeyUsage>,
        material: M,
    ) -> Self
    where
        M: Any + Send + Sync,
    {
        Self {
            inner: Arc::new(KeyInner {
                algorithm,
                extractable,
                key_type,
                usages,
                material: Box::new(material),
            }),
        }
    }

    pub fn algorithm(&self) -> &KeyAlgorithm {
        &self.inner.algorithm
    }

    pub fn extractable(&self) -> bool {
        self.inner.extractable
    }

    pub fn key_type(&self) -> KeyType {
        self.inner.key_type
    }

    pub fn usages(&self) -> &[KeyUsage] {
        &self.inner.usages
    }

    pub fn has_usage(&self, usage: KeyUsage) -> bool {
        self.inner.usages.contains(&usage)
    }

    /// Provider material, if it is of type `M`.
    pub fn material<M: Any>(&self) -> Option<&M> {
        self.inner.material.downcast_ref::<M>()
    }

    /// Whether both handles refer to the same key.
    pub fn ptr_eq(&self, other: &CryptoKey) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for CryptoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoKey")
            .field("algorithm", &self.inner.algorithm)
            .field("extractable", &self.inner.extractable)
            .field("type", &self.inner.key_type)
            .field("usages", &self.inner.usages)
            .finish_non_exhaustive()
    }
}

/// A public and a private handle created together.
#[derive(Debug, Clone)]
pub struct CryptoKeyPair {
    pub public_key: CryptoKey,
    pub private_key: CryptoKey,
}

/// What `generate_key` produced: one secret key or a key pair.
#[derive(Debug, Clone)]
pub enum GeneratedKey {
    Secret(CryptoKey),
    Pair(CryptoKeyPair),
}

/// Serialized key payload.
///
/// `raw`, `pkcs8` and `spki` carry bytes; `jwk` carries a JSON Web Key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyData {
    Bytes(Vec<u8>),
    Jwk(Jwk),
}

impl KeyData {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            KeyData::Bytes(b) => Some(b),
            KeyData::Jwk(_) => None,
        }
    }

    pub fn as_jwk(&self) -> Option<&Jwk> {
        match self {
            KeyData::Jwk(j) => Some(j),
            KeyData::Bytes(_) => None,
        }
    }
}

impl From<Vec<u8>> for KeyData {
    fn from(bytes: Vec<u8>) -> Self {
        KeyData::Bytes(bytes)
    }
}

impl From<&[u8]> for KeyData {
    fn from(bytes: &[u8]) -> Self {
        KeyData::Bytes(bytes.to_vec())
    }
}

impl From<Jwk> for KeyData {
    fn from(jwk: Jwk) -> Self {
        KeyData::Jwk(jwk)
    }
}

/// JSON Web Key (RFC 7517) with the members WebCrypto uses.
///
/// Binary members are base64url without padding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_ops: Option<Vec<KeyUsage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<bool>,
}
