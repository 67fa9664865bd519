use crate::alg::{KdfVariant, KeyFormat};
use crate::errors::Result;
use crate::key::{CryptoKey, KeyData};
use crate::params::{DeriveAlgorithm, DerivedKeyType, HkdfParams};
use crate::proxy::{self, key_view};
use crate::subtle::Subtle;
use crate::usages::KeyUsage;

use super::{DerivedKey, KdfShared};

/// HKDF (RFC 5869).
#[derive(Debug, Clone)]
pub struct Hkdf {
    subtle: Subtle,
}

impl Hkdf {
    pub fn new(subtle: Subtle) -> Self {
        Self { subtle }
    }

    fn shared(&self) -> KdfShared<'_> {
        KdfShared::new(&self.subtle, KdfVariant::Hkdf)
    }

    /// Import input keying material.  The handle is never extractable.
    pub fn import_key(&self, material: &[u8], usages: Option<&[KeyUsage]>) -> Result<HkdfKey> {
        let key = self.shared().import_key(material, usages)?;
        Ok(proxy::wrap_key(&self.subtle, key))
    }

    pub fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<KeyData> {
        self.shared().export_key(format, key)
    }

    pub fn derive_bits(&self, params: &HkdfParams, key: &CryptoKey, length: u32) -> Result<Vec<u8>> {
        self.shared()
            .derive_bits(&DeriveAlgorithm::Hkdf(params.clone()), key, length)
    }

    pub fn derive_key(
        &self,
        params: &HkdfParams,
        key: &CryptoKey,
        derived_key_type: &DerivedKeyType,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<DerivedKey> {
        self.shared().derive_key(
            &DeriveAlgorithm::Hkdf(params.clone()),
            key,
            derived_key_type,
            extractable,
            usages,
        )
    }
}

key_view!(
    /// HKDF input keying material.
    HkdfKey
);

impl HkdfKey {
    fn shared(&self) -> KdfShared<'_> {
        KdfShared::new(self.subtle(), KdfVariant::Hkdf)
    }

    pub fn derive_bits(&self, params: &HkdfParams, length: u32) -> Result<Vec<u8>> {
        self.shared()
            .derive_bits(&DeriveAlgorithm::Hkdf(params.clone()), self.crypto_key(), length)
    }

    pub fn derive_key(
        &self,
        params: &HkdfParams,
        derived_key_type: &DerivedKeyType,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<DerivedKey> {
        self.shared().derive_key(
            &DeriveAlgorithm::Hkdf(params.clone()),
            self.crypto_key(),
            derived_key_type,
            extractable,
            usages,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alg::{AesKeyLength, AesMode, SecureHash};
    use crate::errors::WebCryptoError;

    #[test]
    fn material_is_never_extractable() {
        let hkdf = Hkdf::new(Subtle::default());
        let key = hkdf.import_key(b"input keying material", None).unwrap();
        assert!(!key.extractable());
        assert_eq!(key.usages(), &[KeyUsage::DeriveKey, KeyUsage::DeriveBits]);
        assert!(key.export_key(KeyFormat::Raw).is_err());
    }

    #[test]
    fn derive_bits_is_deterministic() {
        let hkdf = Hkdf::new(Subtle::default());
        let key = hkdf.import_key(b"ikm", None).unwrap();
        let params = HkdfParams::new(SecureHash::Sha256, b"salt".to_vec(), b"info".to_vec());
        let a = key.derive_bits(&params, 256).unwrap();
        let b = hkdf.derive_bits(&params, key.crypto_key(), 256).unwrap();
        assert_eq!(a.len(), 32);
        assert_eq!(a, b);
    }

    #[test]
    fn odd_length_is_rejected() {
        let hkdf = Hkdf::new(Subtle::default());
        let key = hkdf.import_key(b"ikm", None).unwrap();
        let err = key.derive_bits(&HkdfParams::default(), 127).unwrap_err();
        assert!(matches!(err, WebCryptoError::InvalidBitLength(127)));
    }

    #[test]
    fn derive_key_routes_to_aes_view() {
        let hkdf = Hkdf::new(Subtle::default());
        let key = hkdf.import_key(b"ikm", None).unwrap();
        let derived = key
            .derive_key(
                &HkdfParams::default(),
                &DerivedKeyType::Aes(AesMode::Cbc, AesKeyLength::Aes128),
                true,
                None,
            )
            .unwrap();
        let cbc = derived.into_aes_cbc().unwrap();
        assert_eq!(cbc.usages(), &[KeyUsage::Encrypt, KeyUsage::Decrypt]);
    }
}
