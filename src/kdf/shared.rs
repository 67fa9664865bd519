//! Derivation helpers shared by HKDF, PBKDF2 and ECDH.

use crate::alg::{KdfVariant, KeyFormat};
use crate::errors::{Result, WebCryptoError};
use crate::key::{CryptoKey, KeyData};
use crate::params::{DeriveAlgorithm, DerivedKeyType, ImportAlgorithm};
use crate::subtle::Subtle;
use crate::usages::{self, KeyUsage};

use super::DerivedKey;

/// Lengths must be whole bytes; checked before the provider sees them.
pub(crate) fn check_bit_length(length: u32) -> Result<()> {
    if length % 8 != 0 {
        return Err(WebCryptoError::InvalidBitLength(length));
    }
    Ok(())
}

/// `derive_bits` with the length checked up front.
pub(crate) fn derive_bits(
    subtle: &Subtle,
    algorithm: &DeriveAlgorithm,
    base_key: &CryptoKey,
    length: u32,
) -> Result<Vec<u8>> {
    check_bit_length(length)?;
    subtle.derive_bits(algorithm, base_key, length)
}

/// `derive_key` with usages defaulted from the target algorithm and the
/// new handle routed to the target's view.
pub(crate) fn derive_key(
    subtle: &Subtle,
    algorithm: &DeriveAlgorithm,
    base_key: &CryptoKey,
    derived_key_type: &DerivedKeyType,
    extractable: bool,
    usages: Option<&[KeyUsage]>,
) -> Result<DerivedKey> {
    let target = derived_key_type.name();
    let usages = usages::resolve(target, usages);
    let key = subtle.derive_key(algorithm, base_key, derived_key_type, extractable, &usages)?;
    DerivedKey::wrap(subtle, target, key)
}

/// KDF calls with the variant bound in.  Key material is never
/// extractable.
#[derive(Debug, Clone, Copy)]
pub struct KdfShared<'a> {
    subtle: &'a Subtle,
    variant: KdfVariant,
}

impl<'a> KdfShared<'a> {
    pub fn new(subtle: &'a Subtle, variant: KdfVariant) -> Self {
        Self { subtle, variant }
    }

    pub fn variant(&self) -> KdfVariant {
        self.variant
    }

    /// Import raw key material (a password for PBKDF2, input keying
    /// material for HKDF).
    pub fn import_key(&self, material: &[u8], usages: Option<&[KeyUsage]>) -> Result<CryptoKey> {
        let usages = usages::resolve(self.variant.algorithm(), usages);
        self.subtle.import_key(
            KeyFormat::Raw,
            &KeyData::Bytes(material.to_vec()),
            &ImportAlgorithm::Kdf(self.variant),
            false,
            &usages,
        )
    }

    pub fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<KeyData> {
        self.subtle.export_key(format, key)
    }

    pub fn derive_bits(&self, algorithm: &DeriveAlgorithm, key: &CryptoKey, length: u32) -> Result<Vec<u8>> {
        derive_bits(self.subtle, algorithm, key, length)
    }

    pub fn derive_key(
        &self,
        algorithm: &DeriveAlgorithm,
        key: &CryptoKey,
        derived_key_type: &DerivedKeyType,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<DerivedKey> {
        derive_key(self.subtle, algorithm, key, derived_key_type, extractable, usages)
    }
}
