use crate::alg::{AesMode, KeyFormat};
use crate::errors::Result;
use crate::key::{CryptoKey, KeyData};
use crate::params::{AesKeyGenParams, ImportAlgorithm, WrapAlgorithm};
use crate::proxy::{self, key_view};
use crate::subtle::Subtle;
use crate::usages::KeyUsage;

use super::AesShared;

/// AES-KW (RFC 3394).  Keys only wrap and unwrap other keys.
#[derive(Debug, Clone)]
pub struct AesKw {
    subtle: Subtle,
}

impl AesKw {
    pub fn new(subtle: Subtle) -> Self {
        Self { subtle }
    }

    fn shared(&self) -> AesShared<'_> {
        AesShared::new(&self.subtle, AesMode::Kw)
    }

    pub fn generate_key(
        &self,
        params: AesKeyGenParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<AesKwKey> {
        let key = self.shared().generate_key(params, extractable, usages)?;
        Ok(proxy::wrap_key(&self.subtle, key))
    }

    pub fn import_key(
        &self,
        format: KeyFormat,
        data: &KeyData,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<AesKwKey> {
        let key = self.shared().import_key(format, data, extractable, usages)?;
        Ok(proxy::wrap_key(&self.subtle, key))
    }

    pub fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<KeyData> {
        self.shared().export_key(format, key)
    }

    pub fn wrap_key(&self, format: KeyFormat, key: &CryptoKey, wrapping_key: &CryptoKey) -> Result<Vec<u8>> {
        self.shared()
            .wrap_key(format, key, wrapping_key, &WrapAlgorithm::AesKw)
    }

    pub fn unwrap_key(
        &self,
        format: KeyFormat,
        wrapped_key: &[u8],
        unwrapping_key: &CryptoKey,
        unwrapped_key_algorithm: &ImportAlgorithm,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<CryptoKey> {
        self.shared().unwrap_key(
            format,
            wrapped_key,
            unwrapping_key,
            &WrapAlgorithm::AesKw,
            unwrapped_key_algorithm,
            extractable,
            usages,
        )
    }
}

key_view!(
    /// An AES-KW key-encryption key.
    AesKwKey
);

impl AesKwKey {
    fn shared(&self) -> AesShared<'_> {
        AesShared::new(self.subtle(), AesMode::Kw)
    }

    /// Export `key` in `format` and wrap it with this key.
    ///
    /// JWK payloads are padded with trailing spaces to a multiple of
    /// 8 bytes; raw key lengths must already be one.
    pub fn wrap_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<Vec<u8>> {
        self.shared()
            .wrap_key(format, key, self.crypto_key(), &WrapAlgorithm::AesKw)
    }

    pub fn unwrap_key(
        &self,
        format: KeyFormat,
        wrapped_key: &[u8],
        unwrapped_key_algorithm: &ImportAlgorithm,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<CryptoKey> {
        self.shared().unwrap_key(
            format,
            wrapped_key,
            self.crypto_key(),
            &WrapAlgorithm::AesKw,
            unwrapped_key_algorithm,
            extractable,
            usages,
        )
    }
}
