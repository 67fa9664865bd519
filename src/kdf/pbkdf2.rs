use serde::{Deserialize, Serialize};

use crate::alg::{KdfVariant, KeyFormat, SecureHash};
use crate::errors::Result;
use crate::key::{CryptoKey, KeyData};
use crate::params::{DeriveAlgorithm, DerivedKeyType, Pbkdf2Params};
use crate::proxy::{self, key_view};
use crate::subtle::Subtle;
use crate::usages::KeyUsage;

use super::{DerivedKey, KdfShared};

/// PBKDF2 iteration counts applied when a request omits `iterations`.
///
/// Defaults follow the OWASP 2023 password storage guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pbkdf2Iterations {
    #[serde(default = "default_sha256", rename = "SHA-256")]
    pub sha256: u32,

    #[serde(default = "default_sha384", rename = "SHA-384")]
    pub sha384: u32,

    #[serde(default = "default_sha512", rename = "SHA-512")]
    pub sha512: u32,
}

fn default_sha256() -> u32 {
    600_000
}

fn default_sha384() -> u32 {
    210_000
}

fn default_sha512() -> u32 {
    210_000
}

impl Default for Pbkdf2Iterations {
    fn default() -> Self {
        Self {
            sha256: default_sha256(),
            sha384: default_sha384(),
            sha512: default_sha512(),
        }
    }
}

impl Pbkdf2Iterations {
    pub fn for_hash(&self, hash: SecureHash) -> u32 {
        match hash {
            SecureHash::Sha256 => self.sha256,
            SecureHash::Sha384 => self.sha384,
            SecureHash::Sha512 => self.sha512,
        }
    }

    /// Turn caller params into a descriptor with a concrete count.
    pub fn normalize(&self, params: &Pbkdf2Params) -> DeriveAlgorithm {
        DeriveAlgorithm::Pbkdf2 {
            hash: params.hash,
            salt: params.salt.clone(),
            iterations: params.iterations.unwrap_or_else(|| self.for_hash(params.hash)),
        }
    }
}

/// PBKDF2 (RFC 8018) over HMAC.
#[derive(Debug, Clone)]
pub struct Pbkdf2 {
    subtle: Subtle,
    iterations: Pbkdf2Iterations,
}

impl Pbkdf2 {
    pub fn new(subtle: Subtle) -> Self {
        Self::with_iterations(subtle, Pbkdf2Iterations::default())
    }

    pub fn with_iterations(subtle: Subtle, iterations: Pbkdf2Iterations) -> Self {
        Self { subtle, iterations }
    }

    pub fn iterations(&self) -> &Pbkdf2Iterations {
        &self.iterations
    }

    fn shared(&self) -> KdfShared<'_> {
        KdfShared::new(&self.subtle, KdfVariant::Pbkdf2)
    }

    /// Import a password.  The handle is never extractable.
    pub fn import_key(&self, password: &[u8], usages: Option<&[KeyUsage]>) -> Result<Pbkdf2Key> {
        let key = self.shared().import_key(password, usages)?;
        let view: Pbkdf2Key = proxy::wrap_key(&self.subtle, key);
        Ok(view.with_iterations(self.iterations))
    }

    pub fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<KeyData> {
        self.shared().export_key(format, key)
    }

    pub fn derive_bits(&self, params: &Pbkdf2Params, key: &CryptoKey, length: u32) -> Result<Vec<u8>> {
        self.shared()
            .derive_bits(&self.iterations.normalize(params), key, length)
    }

    pub fn derive_key(
        &self,
        params: &Pbkdf2Params,
        key: &CryptoKey,
        derived_key_type: &DerivedKeyType,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<DerivedKey> {
        self.shared().derive_key(
            &self.iterations.normalize(params),
            key,
            derived_key_type,
            extractable,
            usages,
        )
    }
}

key_view!(
    /// A password imported for PBKDF2.
    ///
    /// Carries the iteration table applied when a request omits
    /// `iterations`.  Keys from [`Pbkdf2::import_key`] get the facade's
    /// table; a view built directly through [`proxy::wrap_key`] starts
    /// with [`Pbkdf2Iterations::default`] until [`Pbkdf2Key::with_iterations`]
    /// replaces it.
    Pbkdf2Key { iterations: Pbkdf2Iterations }
);

impl Pbkdf2Key {
    pub fn with_iterations(mut self, iterations: Pbkdf2Iterations) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn iterations(&self) -> &Pbkdf2Iterations {
        &self.iterations
    }

    fn shared(&self) -> KdfShared<'_> {
        KdfShared::new(self.subtle(), KdfVariant::Pbkdf2)
    }

    pub fn derive_bits(&self, params: &Pbkdf2Params, length: u32) -> Result<Vec<u8>> {
        self.shared()
            .derive_bits(&self.iterations.normalize(params), self.crypto_key(), length)
    }

    pub fn derive_key(
        &self,
        params: &Pbkdf2Params,
        derived_key_type: &DerivedKeyType,
        extractable: bool,
        usages: Option<&[KeyUsage]>,
    ) -> Result<DerivedKey> {
        self.shared().derive_key(
            &self.iterations.normalize(params),
            self.crypto_key(),
            derived_key_type,
            extractable,
            usages,
        )
    }
}
