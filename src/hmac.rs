//! HMAC facade.  Keys sign and verify; the hash defaults to SHA-512 and
//! the key length to the hash's block size.

use crate::alg::{Algorithm, KeyFormat};
use crate::errors::Result;
use crate::key::{CryptoKey, KeyData};
use crate::params::{HmacImportParams, HmacKeyGenParams, ImportAlgorithm, KeyGenAlgorithm, SignAlgorithm};
use crate::proxy::{self, key_view};
use crate::subtle::Subtle;
use crate::usages::{self, KeyUsage};

#[derive(Debug, Clone)]
pub struct Hmac {
    subtle: Subtle,
}

impl Hmac {
    pub fn new(subtle: Subtle) -> Self {
        Self { subtle }
    }

    pub fn generate_key(
        &self,
        params: HmacKeyGenParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<HmacKey> {
        let usages = usages::resolve(Algorithm::Hmac, usages);
        let key = self
            .subtle
            .generate_secret_key(&KeyGenAlgorithm::Hmac(params), extractable, &usages)?;
        Ok(proxy::wrap_key(&self.subtle, key))
    }

    pub fn import_key(
        &self,
        format: KeyFormat,
        data: &KeyData,
        params: HmacImportParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<HmacKey> {
        let usages = usages::resolve(Algorithm::Hmac, usages);
        let key = self.subtle.import_key(
            format,
            data,
            &ImportAlgorithm::Hmac(params),
            extractable,
            &usages,
        )?;
        Ok(proxy::wrap_key(&self.subtle, key))
    }

    pub fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<KeyData> {
        self.subtle.export_key(format, key)
    }

    pub fn sign(&self, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        self.subtle.sign(&SignAlgorithm::Hmac, key, data)
    }

    pub fn verify(&self, key: &CryptoKey, signature: &[u8], data: &[u8]) -> Result<bool> {
        self.subtle.verify(&SignAlgorithm::Hmac, key, signature, data)
    }
}

key_view!(
    /// An HMAC secret key.
    HmacKey
);

impl HmacKey {
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.subtle().sign(&SignAlgorithm::Hmac, self.crypto_key(), data)
    }

    pub fn verify(&self, signature: &[u8], data: &[u8]) -> Result<bool> {
        self.subtle()
            .verify(&SignAlgorithm::Hmac, self.crypto_key(), signature, data)
    }
}
