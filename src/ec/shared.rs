//! Variant-bound EC key management for ECDSA and ECDH.

use crate::alg::{EcVariant, KeyFormat};
use crate::errors::Result;
use crate::key::{CryptoKey, CryptoKeyPair, KeyData};
use crate::params::{EcKeyGenParams, EcKeyImportParams, ImportAlgorithm, KeyGenAlgorithm};
use crate::subtle::Subtle;
use crate::usages::{self, KeyUsage};

/// EC calls with the variant bound in.
#[derive(Debug, Clone, Copy)]
pub struct EcShared<'a> {
    subtle: &'a Subtle,
    variant: EcVariant,
}

impl<'a> EcShared<'a> {
    pub fn new(subtle: &'a Subtle, variant: EcVariant) -> Self {
        Self { subtle, variant }
    }

    pub fn variant(&self) -> EcVariant {
        self.variant
    }

    pub fn generate_key(
        &self,
        params: EcKeyGenParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<CryptoKeyPair> {
        let usages = usages::resolve(self.variant.algorithm(), usages);
        self.subtle
            .generate_key_pair(&KeyGenAlgorithm::Ec(self.variant, params), extractable, &usages)
    }

    /// Import either half; `pkcs8` and JWKs with `d` give a private key.
    pub fn import_key(
        &self,
        format: KeyFormat,
        data: &KeyData,
        params: EcKeyImportParams,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<CryptoKey> {
        let usages = usages::resolve(self.variant.algorithm(), usages);
        self.subtle.import_key(
            format,
            data,
            &ImportAlgorithm::Ec(self.variant, params),
            extractable,
            &usages,
        )
    }

    pub fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<KeyData> {
        self.subtle.export_key(format, key)
    }
}
