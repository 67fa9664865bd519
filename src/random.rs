//! Random values from the provider: raw bytes, IVs, salts and v4 UUIDs.

use uuid::Uuid;

use crate::errors::Result;
use crate::subtle::Subtle;

/// Default IV and salt length in bytes.
pub const DEFAULT_RANDOM_LENGTH: usize = 16;

#[derive(Debug, Clone)]
pub struct Random {
    subtle: Subtle,
    default_length: usize,
}

impl Random {
    pub fn new(subtle: Subtle) -> Self {
        Self::with_default_length(subtle, DEFAULT_RANDOM_LENGTH)
    }

    /// Use `length` for `iv()` and `salt()`.
    pub fn with_default_length(subtle: Subtle, length: usize) -> Self {
        Self {
            subtle,
            default_length: length,
        }
    }

    /// `len` random bytes.  The provider caps a single request.
    pub fn get_values(&self, len: usize) -> Result<Vec<u8>> {
        self.subtle.random_bytes(len)
    }

    /// Fill `buf` in place.
    pub fn fill(&self, buf: &mut [u8]) -> Result<()> {
        self.subtle.get_random_values(buf)
    }

    pub fn iv(&self) -> Result<Vec<u8>> {
        self.iv_with_length(self.default_length)
    }

    pub fn iv_with_length(&self, len: usize) -> Result<Vec<u8>> {
        self.get_values(len)
    }

    pub fn salt(&self) -> Result<Vec<u8>> {
        self.salt_with_length(self.default_length)
    }

    pub fn salt_with_length(&self, len: usize) -> Result<Vec<u8>> {
        self.get_values(len)
    }

    /// RFC 4122 version 4 UUID built from provider bytes.
    pub fn uuid(&self) -> Result<Uuid> {
        let mut bytes = [0u8; 16];
        self.fill(&mut bytes)?;
        Ok(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::WebCryptoError;

    #[test]
    fn default_lengths() {
        let random = Random::new(Subtle::default());
        assert_eq!(random.iv().unwrap().len(), 16);
        assert_eq!(random.salt().unwrap().len(), 16);
        assert_eq!(random.iv_with_length(12).unwrap().len(), 12);
        assert_eq!(random.salt_with_length(0).unwrap().len(), 0);
    }

    #[test]
    fn configured_default_length() {
        let random = Random::with_default_length(Subtle::default(), 32);
        assert_eq!(random.iv().unwrap().len(), 32);
    }

    #[test]
    fn values_differ() {
        let random = Random::new(Subtle::default());
        assert_ne!(random.get_values(32).unwrap(), random.get_values(32).unwrap());
    }

    #[test]
    fn uuid_is_v4() {
        let random = Random::new(Subtle::default());
        let id = random.uuid().unwrap();
        assert_eq!(id.get_version_num(), 4);
        assert_eq!(id.get_variant(), uuid::Variant::RFC4122);
        assert_ne!(id, random.uuid().unwrap());
    }

    #[test]
    fn oversized_request_is_a_provider_error() {
        let random = Random::new(Subtle::default());
        assert!(matches!(
            random.get_values(65_537),
            Err(WebCryptoError::Provider(_))
        ));
    }
}
