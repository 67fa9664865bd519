//! Mode-bound AES operations shared by the CBC, CTR, GCM and KW facades.

use crate::alg::{AesMode, KeyFormat};
use crate::errors::Result;
use crate::key::{CryptoKey, KeyData};
use crate::params::{AesKeyGenParams, CipherAlgorithm, ImportAlgorithm, KeyGenAlgorithm, WrapAlgorithm};
use crate::subtle::Subtle;
use crate::usages::{self, KeyUsage};

/// AES calls with the mode bound in.
///
/// Usages default to the mode's inferred pair; for `unwrap_key` they
/// default to the pair of the key being unwrapped.
#[derive(Debug, Clone, Copy)]
pub struct AesShared<'a> {
    subtle: &'a Subtle,
    mode: AesMode,
}

impl<'a> AesShared<'a> {
    pub fn new(subtle: &'a Subtle, mode: AesMode) -> Self {
        Self { subtle, mode }
    }

    pub fn mode(&self) -> AesMode {
        self.mode
    }

    pub fn generate_key(
        &self,
        params: AesKeyGenParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<CryptoKey> {
        let usages = usages::resolve(self.mode.algorithm(), usages);
        self.subtle.generate_secret_key(
            &KeyGenAlgorithm::Aes(self.mode, params),
            extractable,
            &usages,
        )
    }

    pub fn import_key(
        &self,
        format: KeyFormat,
        data: &KeyData,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<CryptoKey> {
        let usages = usages::resolve(self.mode.algorithm(), usages);
        self.subtle.import_key(
            format,
            data,
            &ImportAlgorithm::Aes(self.mode),
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

    pub fn wrap_key(
        &self,
        format: KeyFormat,
        key: &CryptoKey,
        wrapping_key: &CryptoKey,
        algorithm: &WrapAlgorithm,
    ) -> Result<Vec<u8>> {
        self.subtle.wrap_key(format, key, wrapping_key, algorithm)
    }

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
