//! Algorithm parameters.
//!
//! Two layers live here:
//!
//! - *Partial* parameter structs (`AesGcmParams`, `Pbkdf2Params`, ...)
//!   are what callers fill in.  They never carry an algorithm name.
//! - *Enforced* descriptors (`CipherAlgorithm`, `SignAlgorithm`, ...) are
//!   what the provider receives.  The algorithm name is the enum variant,
//!   so a descriptor can only be built by a facade that knows which
//!   algorithm it stands for.

use crate::alg::{
    AesKeyLength, AesMode, Algorithm, EcVariant, KdfVariant, NamedCurve, RsaVariant, SecureHash,
};
use crate::key::CryptoKey;

/// Default RSA public exponent, 65537.
pub const DEFAULT_PUBLIC_EXPONENT: [u8; 3] = [0x01, 0x00, 0x01];

// --- Key generation ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AesKeyGenParams {
    pub length: AesKeyLength,
}

impl Default for AesKeyGenParams {
    fn default() -> Self {
        Self {
            length: AesKeyLength::Aes256,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HmacKeyGenParams {
    pub hash: SecureHash,
    /// Key length in bits; the hash block size when omitted.
    pub length: Option<u32>,
}

impl Default for HmacKeyGenParams {
    fn default() -> Self {
        Self {
            hash: SecureHash::Sha512,
            length: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaHashedKeyGenParams {
    pub modulus_length: u32,
    pub public_exponent: Vec<u8>,
    pub hash: SecureHash,
}

impl Default for RsaHashedKeyGenParams {
    fn default() -> Self {
        Self {
            modulus_length: 4096,
            public_exponent: DEFAULT_PUBLIC_EXPONENT.to_vec(),
            hash: SecureHash::Sha512,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcKeyGenParams {
    pub named_curve: NamedCurve,
}

impl Default for EcKeyGenParams {
    fn default() -> Self {
        Self {
            named_curve: NamedCurve::P521,
        }
    }
}

// --- Key import ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaHashedImportParams {
    pub hash: SecureHash,
}

impl Default for RsaHashedImportParams {
    fn default() -> Self {
        Self {
            hash: SecureHash::Sha512,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcKeyImportParams {
    pub named_curve: NamedCurve,
}

impl Default for EcKeyImportParams {
    fn default() -> Self {
        Self {
            named_curve: NamedCurve::P521,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HmacImportParams {
    pub hash: SecureHash,
    pub length: Option<u32>,
}

impl Default for HmacImportParams {
    fn default() -> Self {
        Self {
            hash: SecureHash::Sha512,
            length: None,
        }
    }
}

impl From<HmacKeyGenParams> for HmacImportParams {
    fn from(p: HmacKeyGenParams) -> Self {
        Self {
            hash: p.hash,
            length: p.length,
        }
    }
}

// --- Cipher operations ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AesCbcParams {
    /// 16-byte initialization vector.
    pub iv: Vec<u8>,
}

impl AesCbcParams {
    pub fn new(iv: impl Into<Vec<u8>>) -> Self {
        Self { iv: iv.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AesCtrParams {
    /// 16-byte initial counter block.
    pub counter: Vec<u8>,
    /// Number of rightmost bits of `counter` that are incremented.
    pub length: u32,
}

impl AesCtrParams {
    pub fn new(counter: impl Into<Vec<u8>>, length: u32) -> Self {
        Self {
            counter: counter.into(),
            length,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AesGcmParams {
    pub iv: Vec<u8>,
    pub additional_data: Option<Vec<u8>>,
    /// Authentication tag length in bits; 128 when omitted.
    pub tag_length: Option<u32>,
}

impl AesGcmParams {
    pub fn new(iv: impl Into<Vec<u8>>) -> Self {
        Self {
            iv: iv.into(),
            ..Self::default()
        }
    }

    pub fn with_additional_data(mut self, aad: impl Into<Vec<u8>>) -> Self {
        self.additional_data = Some(aad.into());
        self
    }

    pub fn with_tag_length(mut self, bits: u32) -> Self {
        self.tag_length = Some(bits);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RsaOaepParams {
    pub label: Option<Vec<u8>>,
}

// --- Signature operations ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaPssParams {
    /// Salt length in bytes.
    pub salt_length: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcdsaParams {
    pub hash: SecureHash,
}

impl Default for EcdsaParams {
    fn default() -> Self {
        Self {
            hash: SecureHash::Sha512,
        }
    }
}

// --- Derivation operations ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HkdfParams {
    pub hash: SecureHash,
    pub salt: Vec<u8>,
    pub info: Vec<u8>,
}

impl Default for HkdfParams {
    fn default() -> Self {
        Self::new(SecureHash::Sha512, Vec::new(), Vec::new())
    }
}

impl HkdfParams {
    pub fn new(hash: SecureHash, salt: impl Into<Vec<u8>>, info: impl Into<Vec<u8>>) -> Self {
        Self {
            hash,
            salt: salt.into(),
            info: info.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pbkdf2Params {
    pub hash: SecureHash,
    pub salt: Vec<u8>,
    /// Iteration count; the configured policy for `hash` when omitted.
    pub iterations: Option<u32>,
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self::new(SecureHash::Sha512, Vec::new())
    }
}

impl Pbkdf2Params {
    pub fn new(hash: SecureHash, salt: impl Into<Vec<u8>>) -> Self {
        Self {
            hash,
            salt: salt.into(),
            iterations: None,
        }
    }
}

/// ECDH parameters: the peer's public key.
#[derive(Debug, Clone)]
pub struct EcdhKeyDeriveParams {
    pub public: CryptoKey,
}

// --- Enforced descriptors ---

/// What to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyGenAlgorithm {
    Aes(AesMode, AesKeyGenParams),
    Hmac(HmacKeyGenParams),
    Rsa(RsaVariant, RsaHashedKeyGenParams),
    Ec(EcVariant, EcKeyGenParams),
}

impl KeyGenAlgorithm {
    pub fn name(&self) -> Algorithm {
        match self {
            KeyGenAlgorithm::Aes(mode, _) => mode.algorithm(),
            KeyGenAlgorithm::Hmac(_) => Algorithm::Hmac,
            KeyGenAlgorithm::Rsa(variant, _) => variant.algorithm(),
            KeyGenAlgorithm::Ec(variant, _) => variant.algorithm(),
        }
    }
}

/// How to interpret imported key data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportAlgorithm {
    Aes(AesMode),
    Hmac(HmacImportParams),
    Rsa(RsaVariant, RsaHashedImportParams),
    Ec(EcVariant, EcKeyImportParams),
    Kdf(KdfVariant),
}

impl ImportAlgorithm {
    pub fn name(&self) -> Algorithm {
        match self {
            ImportAlgorithm::Aes(mode) => mode.algorithm(),
            ImportAlgorithm::Hmac(_) => Algorithm::Hmac,
            ImportAlgorithm::Rsa(variant, _) => variant.algorithm(),
            ImportAlgorithm::Ec(variant, _) => variant.algorithm(),
            ImportAlgorithm::Kdf(variant) => variant.algorithm(),
        }
    }
}

/// Encryption and decryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CipherAlgorithm {
    AesCbc(AesCbcParams),
    AesCtr(AesCtrParams),
    AesGcm(AesGcmParams),
    RsaOaep(RsaOaepParams),
}

impl CipherAlgorithm {
    pub fn name(&self) -> Algorithm {
        match self {
            CipherAlgorithm::AesCbc(_) => Algorithm::AesCbc,
            CipherAlgorithm::AesCtr(_) => Algorithm::AesCtr,
            CipherAlgorithm::AesGcm(_) => Algorithm::AesGcm,
            CipherAlgorithm::RsaOaep(_) => Algorithm::RsaOaep,
        }
    }
}

/// Key wrapping: any cipher, or AES-KW.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrapAlgorithm {
    Cipher(CipherAlgorithm),
    AesKw,
}

impl WrapAlgorithm {
    pub fn name(&self) -> Algorithm {
        match self {
            WrapAlgorithm::Cipher(c) => c.name(),
            WrapAlgorithm::AesKw => Algorithm::AesKw,
        }
    }
}

impl From<CipherAlgorithm> for WrapAlgorithm {
    fn from(c: CipherAlgorithm) -> Self {
        WrapAlgorithm::Cipher(c)
    }
}

/// Signing and verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignAlgorithm {
    Hmac,
    Ecdsa(EcdsaParams),
    RsaPss(RsaPssParams),
    RsassaPkcs1V15,
}

impl SignAlgorithm {
    pub fn name(&self) -> Algorithm {
        match self {
            SignAlgorithm::Hmac => Algorithm::Hmac,
            SignAlgorithm::Ecdsa(_) => Algorithm::Ecdsa,
            SignAlgorithm::RsaPss(_) => Algorithm::RsaPss,
            SignAlgorithm::RsassaPkcs1V15 => Algorithm::RsassaPkcs1V15,
        }
    }
}

/// Key agreement and key derivation.
///
/// PBKDF2 always carries a concrete iteration count here.
#[derive(Debug, Clone)]
pub enum DeriveAlgorithm {
    Ecdh(EcdhKeyDeriveParams),
    Hkdf(HkdfParams),
    Pbkdf2 {
        hash: SecureHash,
        salt: Vec<u8>,
        iterations: u32,
    },
}

impl DeriveAlgorithm {
    pub fn name(&self) -> Algorithm {
        match self {
            DeriveAlgorithm::Ecdh(_) => Algorithm::Ecdh,
            DeriveAlgorithm::Hkdf(_) => Algorithm::Hkdf,
            DeriveAlgorithm::Pbkdf2 { .. } => Algorithm::Pbkdf2,
        }
    }
}

/// The kind of key `derive_key` should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedKeyType {
    Aes(AesMode, AesKeyLength),
    Hmac(HmacKeyGenParams),
}

impl DerivedKeyType {
    pub fn name(&self) -> Algorithm {
        match self {
            DerivedKeyType::Aes(mode, _) => mode.algorithm(),
            DerivedKeyType::Hmac(_) => Algorithm::Hmac,
        }
    }

    /// Number of key bits the derivation must produce.
    pub fn length_bits(&self) -> u32 {
        match self {
            DerivedKeyType::Aes(_, length) => length.bits(),
            DerivedKeyType::Hmac(p) => p.length.unwrap_or_else(|| p.hash.variant().block_bits()),
        }
    }

    /// The import descriptor for the derived bytes.
    pub fn import_algorithm(&self) -> ImportAlgorithm {
        match self {
            DerivedKeyType::Aes(mode, _) => ImportAlgorithm::Aes(*mode),
            DerivedKeyType::Hmac(p) => ImportAlgorithm::Hmac((*p).into()),
        }
    }
}
