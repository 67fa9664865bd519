use crate::alg::{EcVariant, KeyFormat};
use crate::errors::Result;
use crate::kdf::{self, DerivedKey};
use crate::key::{CryptoKey, KeyData};
use crate::params::{DeriveAlgorithm, DerivedKeyType, EcKeyGenParams, EcKeyImportParams, EcdhKeyDeriveParams};
use crate::proxy::{self, key_view, ImportedKey, KeyPair};
use crate::subtle::Subtle;
use crate::usages::KeyUsage;

use super::EcShared;

fn agreement(public_key: &CryptoKey) -> DeriveAlgorithm {
    DeriveAlgorithm::Ecdh(EcdhKeyDeriveParams {
        public: public_key.clone(),
    })
}

/// ECDH key agreement.  Private keys derive; public keys are only
/// handed to the peer.
#[derive(Debug, Clone)]
pub struct Ecdh {
    subtle: Subtle,
}

impl Ecdh {
    pub fn new(subtle: Subtle) -> Self {
        Self { subtle }
    }

    fn shared(&self) -> EcShared<'_> {
        EcShared::new(&self.subtle, EcVariant::Ecdh)
    }

    pub fn generate_key_pair(
        &self,
        params: EcKeyGenParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<KeyPair<EcdhPrivateKey, EcdhPublicKey>> {
        let pair = self.shared().generate_key(params, extractable, usages)?;
        Ok(proxy::wrap_key_pair(&self.subtle, pair))
    }

    pub fn generate_key(
        &self,
        params: EcKeyGenParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<KeyPair<EcdhPrivateKey, EcdhPublicKey>> {
        self.generate_key_pair(params, extractable, usages)
    }

    pub fn import_key(
        &self,
        format: KeyFormat,
        data: &KeyData,
        params: EcKeyImportParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<ImportedKey<EcdhPrivateKey, EcdhPublicKey>> {
        let key = self
            .shared()
            .import_key(format, data, params, extractable, usages)?;
        proxy::wrap_imported(&self.subtle, key)
    }

    pub fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<KeyData> {
        self.shared().export_key(format, key)
    }

    /// Shared secret between `private_key` and the peer's `public_key`,
    /// truncated to `length` bits.
    pub fn derive_bits(&self, public_key: &CryptoKey, private_key: &CryptoKey, length: u32) -> Result<Vec<u8>> {
        kdf::derive_bits(&self.subtle, &agreement(public_key), private_key, length)
    }

    pub fn derive_key(
        &self,
        public_key: &CryptoKey,
        private_key: &CryptoKey,
        derived_key_type: &DerivedKeyType,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<DerivedKey> {
        kdf::derive_key(
            &self.subtle,
            &agreement(public_key),
            private_key,
            derived_key_type,
            extractable,
            usages,
        )
    }
}

key_view!(
    /// Private half of an ECDH pair.
    EcdhPrivateKey
);

impl EcdhPrivateKey {
    pub fn derive_bits(&self, public_key: &CryptoKey, length: u32) -> Result<Vec<u8>> {
        kdf::derive_bits(self.subtle(), &agreement(public_key), self.crypto_key(), length)
    }

    pub fn derive_key(
        &self,
        public_key: &CryptoKey,
        derived_key_type: &DerivedKeyType,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<DerivedKey> {
        kdf::derive_key(
            self.subtle(),
            &agreement(public_key),
            self.crypto_key(),
            derived_key_type,
            extractable,
            usages,
        )
    }
}

key_view!(
    /// Public half of an ECDH pair.  Carries no operations of its own.
    EcdhPublicKey
);
