use crate::aes::{AesCbcKey, AesCtrKey, AesGcmKey, AesKwKey};
use crate::alg::Algorithm;
use crate::errors::{Result, WebCryptoError};
use crate::hmac::HmacKey;
use crate::key::CryptoKey;
use crate::proxy;
use crate::subtle::Subtle;

/// A key produced by `derive_key`, wrapped in the view for its algorithm.
#[derive(Debug, Clone)]
pub enum DerivedKey {
    Hmac(HmacKey),
    AesCbc(AesCbcKey),
    AesCtr(AesCtrKey),
    AesGcm(AesGcmKey),
    AesKw(AesKwKey),
}

impl DerivedKey {
    /// Route a freshly derived handle to the view for `target`.
    ///
    /// Only HMAC and the AES modes can be derivation targets.
    pub fn wrap(subtle: &Subtle, target: Algorithm, key: CryptoKey) -> Result<Self> {
        match target {
            Algorithm::Hmac => Ok(DerivedKey::Hmac(proxy::wrap_key(subtle, key))),
            Algorithm::AesCbc => Ok(DerivedKey::AesCbc(proxy::wrap_key(subtle, key))),
            Algorithm::AesCtr => Ok(DerivedKey::AesCtr(proxy::wrap_key(subtle, key))),
            Algorithm::AesGcm => Ok(DerivedKey::AesGcm(proxy::wrap_key(subtle, key))),
            Algorithm::AesKw => Ok(DerivedKey::AesKw(proxy::wrap_key(subtle, key))),
            Algorithm::RsaOaep
            | Algorithm::RsaPss
            | Algorithm::RsassaPkcs1V15
            | Algorithm::Ecdsa
            | Algorithm::Ecdh
            | Algorithm::Hkdf
            | Algorithm::Pbkdf2 => Err(WebCryptoError::UnsupportedAlgorithm(target.to_string())),
        }
    }

    /// Same as [`DerivedKey::wrap`] with the target given by name.
    pub fn wrap_by_name(subtle: &Subtle, target: &str, key: CryptoKey) -> Result<Self> {
        Self::wrap(subtle, target.parse()?, key)
    }

    pub fn crypto_key(&self) -> &CryptoKey {
        match self {
            DerivedKey::Hmac(k) => k.crypto_key(),
            DerivedKey::AesCbc(k) => k.crypto_key(),
            DerivedKey::AesCtr(k) => k.crypto_key(),
            DerivedKey::AesGcm(k) => k.crypto_key(),
            DerivedKey::AesKw(k) => k.crypto_key(),
        }
    }

    pub fn algorithm_name(&self) -> Algorithm {
        self.crypto_key().algorithm().name()
    }

    pub fn into_hmac(self) -> Option<HmacKey> {
        match self {
            DerivedKey::Hmac(k) => Some(k),
            _ => None,
        }
    }

    pub fn into_aes_cbc(self) -> Option<AesCbcKey> {
        match self {
            DerivedKey::AesCbc(k) => Some(k),
            _ => None,
        }
    }

    pub fn into_aes_ctr(self) -> Option<AesCtrKey> {
        match self {
            DerivedKey::AesCtr(k) => Some(k),
            _ => None,
        }
    }

    pub fn into_aes_gcm(self) -> Option<AesGcmKey> {
        match self {
            DerivedKey::AesGcm(k) => Some(k),
            _ => None,
        }
    }

    pub fn into_aes_kw(self) -> Option<AesKwKey> {
        match self {
            DerivedKey::AesKw(k) => Some(k),
            _ => None,
        }
    }
}
