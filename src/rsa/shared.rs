//! Variant-bound RSA operations for OAEP, PSS and PKCS#1 v1.5.

use crate::alg::{KeyFormat, RsaVariant};
use crate::errors::Result;
use crate::key::{CryptoKey, CryptoKeyPair, KeyData};
use crate::params::{
    CipherAlgorithm, ImportAlgorithm, KeyGenAlgorithm, RsaHashedImportParams, RsaHashedKeyGenParams,
    SignAlgorithm, WrapAlgorithm,
};
use crate::subtle::Subtle;
use crate::usages::{self, KeyUsage};

/// RSA calls with the variant bound in.
#[derive(Debug, Clone, Copy)]
pub struct RsaShared<'a> {
    subtle: &'a Subtle,
    variant: RsaVariant,
}

impl<'a> RsaShared<'a> {
    pub fn new(subtle: &'a Subtle, variant: RsaVariant) -> Self {
        Self { subtle, variant }
    }

    pub fn variant(&self) -> RsaVariant {
        self.variant
    }

    pub fn generate_key(
        &self,
        params: RsaHashedKeyGenParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<CryptoKeyPair> {
        let usages = usages::resolve(self.variant.algorithm(), usages);
        self.subtle.generate_key_pair(
            &KeyGenAlgorithm::Rsa(self.variant, params),
            extractable,
            &usages,
        )
    }

    pub fn import_key(
        &self,
        format: KeyFormat,
        data: &KeyData,
        params: RsaHashedImportParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<CryptoKey> {
        let usages = usages::resolve(self.variant.algorithm(), usages);
        self.subtle.import_key(
            format,
            data,
            &ImportAlgorithm::Rsa(self.variant, params),
            extractable,
            &usages,
        )
    }

    pub fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<KeyData> {
        self.subtle.export_key(format, key)
    }

    pub fn encrypt(&self, algorithm: &CipherAlgorithm, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        self.subtle.encrypt(algorithm, key, data)
    }

    pub fn decrypt(&self, algorithm: &CipherAlgorithm, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        self.subtle.decrypt(algorithm, key, data)
    }

    pub fn sign(&self, algorithm: &SignAlgorithm, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        self.subtle.sign(algorithm, key, data)
    }

    pub fn verify(
        &self,
        algorithm: &SignAlgorithm,
        key: &CryptoKey,
        signature: &[u8],
        data: &[u8],
    ) -> Result<bool> {
        self.subtle.verify(algorithm, key, signature, data)
    }

    pub fn wrap_key(
        &self,
        format: KeyFormat,
        key: &CryptoKey,
        wrapping_key: &CryptoKey,
        algorithm: &WrapAlgorithm,
    ) -> Result<Vec<u8>> {
        self.subtle.wrap_key(format, key, wrapping_key, algorithm)
    }

    /// Usages default to the pair of the key being unwrapped.
    #[allow(clippy::too_many_arguments)]
    pub fn unwrap_key(
        &self,
        format: KeyFormat,
        wrapped_key: &[u8],
        unwrapping_key: &CryptoKey,
        algorithm: &WrapAlgorithm,
        unwrapped_key_algorithm: &ImportAlgorithm,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<CryptoKey> {
        let usages = usages::resolve(unwrapped_key_algorithm.name(), usages);
        self.subtle.unwrap_key(
            format,
            wrapped_key,
            unwrapping_key,
            algorithm,
            unwrapped_key_algorithm,
            extractable,
            &usages,
        )
    }
}
