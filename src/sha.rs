//! SHA digests through the provider, plus hex rendering.

use crate::alg::ShaVariant;
use crate::errors::Result;
use crate::subtle::Subtle;

/// One SHA variant bound to a provider.
#[derive(Debug, Clone)]
pub struct Sha {
    subtle: Subtle,
    variant: ShaVariant,
}

impl Sha {
    pub fn new(subtle: Subtle, variant: ShaVariant) -> Self {
        Self { subtle, variant }
    }

    pub fn variant(&self) -> ShaVariant {
        self.variant
    }

    pub fn digest(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.subtle.digest(self.variant, data)
    }

    /// Digest rendered as lower-case hex.
    pub fn hex_digest(&self, data: &[u8]) -> Result<String> {
        Ok(hexify(&self.digest(data)?))
    }
}

/// Lower-case hex, two characters per byte.
pub fn hexify(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
