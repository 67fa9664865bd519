use crate::alg::{KeyFormat, RsaVariant};
use crate::errors::Result;
use crate::key::{CryptoKey, KeyData};
use crate::params::{RsaHashedImportParams, RsaHashedKeyGenParams, SignAlgorithm};
use crate::proxy::{self, key_view, ImportedKey, KeyPair};
use crate::subtle::Subtle;
use crate::usages::KeyUsage;

use super::RsaShared;

/// RSASSA-PKCS1-v1_5 signatures.  Signing is deterministic.
#[derive(Debug, Clone)]
pub struct RsassaPkcs1V15 {
    subtle: Subtle,
}

impl RsassaPkcs1V15 {
    pub fn new(subtle: Subtle) -> Self {
        Self { subtle }
    }

    fn shared(&self) -> RsaShared<'_> {
        RsaShared::new(&self.subtle, RsaVariant::Pkcs1V15)
    }

    pub fn generate_key_pair(
        &self,
        params: RsaHashedKeyGenParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<KeyPair<RsassaPkcs1V15PrivateKey, RsassaPkcs1V15PublicKey>> {
        let pair = self.shared().generate_key(params, extractable, usages)?;
        Ok(proxy::wrap_key_pair(&self.subtle, pair))
    }

    pub fn generate_key(
        &self,
        params: RsaHashedKeyGenParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<KeyPair<RsassaPkcs1V15PrivateKey, RsassaPkcs1V15PublicKey>> {
        self.generate_key_pair(params, extractable, usages)
    }

    pub fn import_key(
        &self,
        format: KeyFormat,
        data: &KeyData,
        params: RsaHashedImportParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<ImportedKey<RsassaPkcs1V15PrivateKey, RsassaPkcs1V15PublicKey>> {
        let key = self
            .shared()
            .import_key(format, data, params, extractable, usages)?;
        proxy::wrap_imported(&self.subtle, key)
    }

    pub fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<KeyData> {
        self.shared().export_key(format, key)
    }

    pub fn sign(&self, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        self.shared().sign(&SignAlgorithm::RsassaPkcs1V15, key, data)
    }

    pub fn verify(&self, key: &CryptoKey, signature: &[u8], data: &[u8]) -> Result<bool> {
        self.shared()
            .verify(&SignAlgorithm::RsassaPkcs1V15, key, signature, data)
    }
}

key_view!(
    /// Private half of an RSASSA-PKCS1-v1_5 pair.
    RsassaPkcs1V15PrivateKey
);

impl RsassaPkcs1V15PrivateKey {
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        RsaShared::new(self.subtle(), RsaVariant::Pkcs1V15).sign(
            &SignAlgorithm::RsassaPkcs1V15,
            self.crypto_key(),
            data,
        )
    }
}

key_view!(
    /// Public half of an RSASSA-PKCS1-v1_5 pair.
    RsassaPkcs1V15PublicKey
);

impl RsassaPkcs1V15PublicKey {
    pub fn verify(&self, signature: &[u8], data: &[u8]) -> Result<bool> {
        RsaShared::new(self.subtle(), RsaVariant::Pkcs1V15).verify(
            &SignAlgorithm::RsassaPkcs1V15,
            self.crypto_key(),
            signature,
            data,
        )
    }
}
