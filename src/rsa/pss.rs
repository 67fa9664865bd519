use crate::alg::{KeyFormat, RsaVariant};
use crate::errors::Result;
use crate::key::{CryptoKey, KeyData};
use crate::params::{RsaHashedImportParams, RsaHashedKeyGenParams, RsaPssParams, SignAlgorithm};
use crate::proxy::{self, key_view, ImportedKey, KeyPair};
use crate::subtle::Subtle;
use crate::usages::KeyUsage;

use super::RsaShared;

/// RSA-PSS signatures.
#[derive(Debug, Clone)]
pub struct RsaPss {
    subtle: Subtle,
}

impl RsaPss {
    pub fn new(subtle: Subtle) -> Self {
        Self { subtle }
    }

    fn shared(&self) -> RsaShared<'_> {
        RsaShared::new(&self.subtle, RsaVariant::Pss)
    }

    pub fn generate_key_pair(
        &self,
        params: RsaHashedKeyGenParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<KeyPair<RsaPssPrivateKey, RsaPssPublicKey>> {
        let pair = self.shared().generate_key(params, extractable, usages)?;
        Ok(proxy::wrap_key_pair(&self.subtle, pair))
    }

    pub fn generate_key(
        &self,
        params: RsaHashedKeyGenParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<KeyPair<RsaPssPrivateKey, RsaPssPublicKey>> {
        self.generate_key_pair(params, extractable, usages)
    }

    pub fn import_key(
        &self,
        format: KeyFormat,
        data: &KeyData,
        params: RsaHashedImportParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<ImportedKey<RsaPssPrivateKey, RsaPssPublicKey>> {
        let key = self
            .shared()
            .import_key(format, data, params, extractable, usages)?;
        proxy::wrap_imported(&self.subtle, key)
    }

    pub fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<KeyData> {
        self.shared().export_key(format, key)
    }

    pub fn sign(&self, params: RsaPssParams, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        self.shared().sign(&SignAlgorithm::RsaPss(params), key, data)
    }

    pub fn verify(
        &self,
        params: RsaPssParams,
        key: &CryptoKey,
        signature: &[u8],
        data: &[u8],
    ) -> Result<bool> {
        self.shared()
            .verify(&SignAlgorithm::RsaPss(params), key, signature, data)
    }
}

key_view!(
    /// Private half of an RSA-PSS pair.
    RsaPssPrivateKey
);

impl RsaPssPrivateKey {
    pub fn sign(&self, params: RsaPssParams, data: &[u8]) -> Result<Vec<u8>> {
        RsaShared::new(self.subtle(), RsaVariant::Pss).sign(
            &SignAlgorithm::RsaPss(params),
            self.crypto_key(),
            data,
        )
    }
}

key_view!(
    /// Public half of an RSA-PSS pair.
    RsaPssPublicKey
);

impl RsaPssPublicKey {
    pub fn verify(&self, params: RsaPssParams, signature: &[u8], data: &[u8]) -> Result<bool> {
        RsaShared::new(self.subtle(), RsaVariant::Pss).verify(
            &SignAlgorithm::RsaPss(params),
            self.crypto_key(),
            signature,
            data,
        )
    }
}
