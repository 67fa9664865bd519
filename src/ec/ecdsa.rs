use crate::alg::{EcVariant, KeyFormat};
use crate::errors::Result;
use crate::key::{CryptoKey, KeyData};
use crate::params::{EcKeyGenParams, EcKeyImportParams, EcdsaParams, SignAlgorithm};
use crate::proxy::{self, key_view, ImportedKey, KeyPair};
use crate::subtle::Subtle;
use crate::usages::KeyUsage;

use super::EcShared;

/// ECDSA.  Private keys sign, public keys verify.
#[derive(Debug, Clone)]
pub struct Ecdsa {
    subtle: Subtle,
}

impl Ecdsa {
    pub fn new(subtle: Subtle) -> Self {
        Self { subtle }
    }

    fn shared(&self) -> EcShared<'_> {
        EcShared::new(&self.subtle, EcVariant::Ecdsa)
    }

    pub fn generate_key_pair(
        &self,
        params: EcKeyGenParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<KeyPair<EcdsaPrivateKey, EcdsaPublicKey>> {
        let pair = self.shared().generate_key(params, extractable, usages)?;
        Ok(proxy::wrap_key_pair(&self.subtle, pair))
    }

    pub fn generate_key(
        &self,
        params: EcKeyGenParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<KeyPair<EcdsaPrivateKey, EcdsaPublicKey>> {
        self.generate_key_pair(params, extractable, usages)
    }

    pub fn import_key(
        &self,
        format: KeyFormat,
        data: &KeyData,
        params: EcKeyImportParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<ImportedKey<EcdsaPrivateKey, EcdsaPublicKey>> {
        let key = self
            .shared()
            .import_key(format, data, params, extractable, usages)?;
        proxy::wrap_imported(&self.subtle, key)
    }

    pub fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<KeyData> {
        self.shared().export_key(format, key)
    }

    pub fn sign(&self, params: EcdsaParams, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        self.subtle.sign(&SignAlgorithm::Ecdsa(params), key, data)
    }

    pub fn verify(
        &self,
        params: EcdsaParams,
        key: &CryptoKey,
        signature: &[u8],
        data: &[u8],
    ) -> Result<bool> {
        self.subtle
            .verify(&SignAlgorithm::Ecdsa(params), key, signature, data)
    }
}

key_view!(
    /// Private half of an ECDSA pair.
    EcdsaPrivateKey
);

impl EcdsaPrivateKey {
    /// Signature in IEEE P1363 form (`r || s`).
    pub fn sign(&self, params: EcdsaParams, data: &[u8]) -> Result<Vec<u8>> {
        self.subtle()
            .sign(&SignAlgorithm::Ecdsa(params), self.crypto_key(), data)
    }
}

key_view!(
    /// Public half of an ECDSA pair.
    EcdsaPublicKey
);

impl EcdsaPublicKey {
    pub fn verify(&self, params: EcdsaParams, signature: &[u8], data: &[u8]) -> Result<bool> {
        self.subtle()
            .verify(&SignAlgorithm::Ecdsa(params), self.crypto_key(), signature, data)
    }
}
