use crate::alg::{KeyFormat, RsaVariant};
use crate::errors::Result;
use crate::key::{CryptoKey, KeyData};
use crate::params::{
    CipherAlgorithm, ImportAlgorithm, RsaHashedImportParams, RsaHashedKeyGenParams, RsaOaepParams,
    WrapAlgorithm,
};
use crate::proxy::{self, key_view, ImportedKey, KeyPair};
use crate::subtle::Subtle;
use crate::usages::KeyUsage;

use super::RsaShared;

fn cipher(params: &RsaOaepParams) -> CipherAlgorithm {
    CipherAlgorithm::RsaOaep(params.clone())
}

/// RSA-OAEP.  Public keys encrypt and wrap; private keys decrypt and
/// unwrap.
#[derive(Debug, Clone)]
pub struct RsaOaep {
    subtle: Subtle,
}

impl RsaOaep {
    pub fn new(subtle: Subtle) -> Self {
        Self { subtle }
    }

    fn shared(&self) -> RsaShared<'_> {
        RsaShared::new(&self.subtle, RsaVariant::Oaep)
    }

    pub fn generate_key_pair(
        &self,
        params: RsaHashedKeyGenParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<KeyPair<RsaOaepPrivateKey, RsaOaepPublicKey>> {
        let pair = self.shared().generate_key(params, extractable, usages)?;
        Ok(proxy::wrap_key_pair(&self.subtle, pair))
    }

    pub fn generate_key(
        &self,
        params: RsaHashedKeyGenParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<KeyPair<RsaOaepPrivateKey, RsaOaepPublicKey>> {
        self.generate_key_pair(params, extractable, usages)
    }

    pub fn import_key(
        &self,
        format: KeyFormat,
        data: &KeyData,
        params: RsaHashedImportParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<ImportedKey<RsaOaepPrivateKey, RsaOaepPublicKey>> {
        let key = self
            .shared()
            .import_key(format, data, params, extractable, usages)?;
        proxy::wrap_imported(&self.subtle, key)
    }

    pub fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<KeyData> {
        self.shared().export_key(format, key)
    }

    pub fn encrypt(&self, params: &RsaOaepParams, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        self.shared().encrypt(&cipher(params), key, data)
    }

    pub fn decrypt(&self, params: &RsaOaepParams, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        self.shared().decrypt(&cipher(params), key, data)
    }

    pub fn wrap_key(
        &self,
        format: KeyFormat,
        key: &CryptoKey,
        wrapping_key: &CryptoKey,
        params: &RsaOaepParams,
    ) -> Result<Vec<u8>> {
        let algorithm: WrapAlgorithm = cipher(params).into();
        self.shared().wrap_key(format, key, wrapping_key, &algorithm)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn unwrap_key(
        &self,
        format: KeyFormat,
        wrapped_key: &[u8],
        unwrapping_key: &CryptoKey,
        params: &RsaOaepParams,
        unwrapped_key_algorithm: &ImportAlgorithm,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<CryptoKey> {
        let algorithm: WrapAlgorithm = cipher(params).into();
        self.shared().unwrap_key(
            format,
            wrapped_key,
            unwrapping_key,
            &algorithm,
            unwrapped_key_algorithm,
            extractable,
            usages,
        )
    }
}

key_view!(
    /// Private half of an RSA-OAEP pair.
    RsaOaepPrivateKey
);

impl RsaOaepPrivateKey {
    fn shared(&self) -> RsaShared<'_> {
        RsaShared::new(self.subtle(), RsaVariant::Oaep)
    }

    pub fn decrypt(&self, params: &RsaOaepParams, data: &[u8]) -> Result<Vec<u8>> {
        self.shared().decrypt(&cipher(params), self.crypto_key(), data)
    }

    pub fn unwrap_key(
        &self,
        format: KeyFormat,
        wrapped_key: &[u8],
        params: &RsaOaepParams,
        unwrapped_key_algorithm: &ImportAlgorithm,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<CryptoKey> {
        let algorithm: WrapAlgorithm = cipher(params).into();
        self.shared().unwrap_key(
            format,
            wrapped_key,
            self.crypto_key(),
            &algorithm,
            unwrapped_key_algorithm,
            extractable,
            usages,
        )
    }
}

key_view!(
    /// Public half of an RSA-OAEP pair.
    RsaOaepPublicKey
);

impl RsaOaepPublicKey {
    fn shared(&self) -> RsaShared<'_> {
        RsaShared::new(self.subtle(), RsaVariant::Oaep)
    }

    pub fn encrypt(&self, params: &RsaOaepParams, data: &[u8]) -> Result<Vec<u8>> {
        self.shared().encrypt(&cipher(params), self.crypto_key(), data)
    }

    pub fn wrap_key(&self, format: KeyFormat, key: &CryptoKey, params: &RsaOaepParams) -> Result<Vec<u8>> {
        let algorithm: WrapAlgorithm = cipher(params).into();
        self.shared()
            .wrap_key(format, key, self.crypto_key(), &algorithm)
    }
}
