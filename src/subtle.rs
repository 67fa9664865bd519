//! Thin adapter over the injected [`CryptoProvider`].
//!
//! Every method forwards one primitive call and converts the provider's
//! error into [`WebCryptoError::Provider`] without touching its meaning.
//! The adapter logs what was asked for (algorithm names and formats, never
//! key bytes) and adds the typed secret-key / key-pair split on top of
//! `generate_key`.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::alg::{KeyFormat, ShaVariant};
use crate::errors::{Result, WebCryptoError};
use crate::key::{CryptoKey, CryptoKeyPair, GeneratedKey, KeyData};
use crate::params::{
    CipherAlgorithm, DeriveAlgorithm, DerivedKeyType, ImportAlgorithm, KeyGenAlgorithm,
    SignAlgorithm, WrapAlgorithm,
};
use crate::provider::{CryptoProvider, ProviderResult, SoftwareProvider};
use crate::usages::KeyUsage;

/// Shared handle to a provider.  Cloning is cheap.
#[derive(Clone)]
pub struct Subtle {
    provider: Arc<dyn CryptoProvider>,
}

impl fmt::Debug for Subtle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subtle").finish_non_exhaustive()
    }
}

impl Default for Subtle {
    fn default() -> Self {
        Self::new(Arc::new(SoftwareProvider::new()))
    }
}

/// Log a provider failure and lift it into the crate error.
fn forward<T>(op: &'static str, result: ProviderResult<T>) -> Result<T> {
    result.map_err(|e| {
        warn!(op, error = %e, "provider call failed");
        WebCryptoError::Provider(e)
    })
}

impl Subtle {
    pub fn new(provider: Arc<dyn CryptoProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn CryptoProvider> {
        &self.provider
    }

    pub fn encrypt(&self, algorithm: &CipherAlgorithm, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        debug!(alg = %algorithm.name(), len = data.len(), "encrypt");
        forward("encrypt", self.provider.encrypt(algorithm, key, data))
    }

    pub fn decrypt(&self, algorithm: &CipherAlgorithm, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        debug!(alg = %algorithm.name(), len = data.len(), "decrypt");
        forward("decrypt", self.provider.decrypt(algorithm, key, data))
    }

    pub fn sign(&self, algorithm: &SignAlgorithm, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        debug!(alg = %algorithm.name(), len = data.len(), "sign");
        forward("sign", self.provider.sign(algorithm, key, data))
    }

    pub fn verify(
        &self,
        algorithm: &SignAlgorithm,
        key: &CryptoKey,
        signature: &[u8],
        data: &[u8],
    ) -> Result<bool> {
        debug!(alg = %algorithm.name(), len = data.len(), "verify");
        forward("verify", self.provider.verify(algorithm, key, signature, data))
    }

    pub fn derive_bits(&self, algorithm: &DeriveAlgorithm, base_key: &CryptoKey, length: u32) -> Result<Vec<u8>> {
        debug!(alg = %algorithm.name(), length, "derive_bits");
        forward("derive_bits", self.provider.derive_bits(algorithm, base_key, length))
    }

    pub fn derive_key(
        &self,
        algorithm: &DeriveAlgorithm,
        base_key: &CryptoKey,
        derived_key_type: &DerivedKeyType,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<CryptoKey> {
        debug!(
            alg = %algorithm.name(),
            target = %derived_key_type.name(),
            extractable,
            ?usages,
            "derive_key"
        );
        forward(
            "derive_key",
            self.provider
                .derive_key(algorithm, base_key, derived_key_type, extractable, usages),
        )
    }

    pub fn wrap_key(
        &self,
        format: KeyFormat,
        key: &CryptoKey,
        wrapping_key: &CryptoKey,
        algorithm: &WrapAlgorithm,
    ) -> Result<Vec<u8>> {
        debug!(%format, alg = %algorithm.name(), wrapped = %key.algorithm().name(), "wrap_key");
        forward(
            "wrap_key",
            self.provider.wrap_key(format, key, wrapping_key, algorithm),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn unwrap_key(
        &self,
        format: KeyFormat,
        wrapped_key: &[u8],
        unwrapping_key: &CryptoKey,
        unwrap_algorithm: &WrapAlgorithm,
        unwrapped_key_algorithm: &ImportAlgorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<CryptoKey> {
        debug!(
            %format,
            alg = %unwrap_algorithm.name(),
            target = %unwrapped_key_algorithm.name(),
            extractable,
            ?usages,
            "unwrap_key"
        );
        forward(
            "unwrap_key",
            self.provider.unwrap_key(
                format,
                wrapped_key,
                unwrapping_key,
                unwrap_algorithm,
                unwrapped_key_algorithm,
                extractable,
                usages,
            ),
        )
    }

    pub fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<KeyData> {
        debug!(%format, alg = %key.algorithm().name(), "export_key");
        forward("export_key", self.provider.export_key(format, key))
    }

    pub fn import_key(
        &self,
        format: KeyFormat,
        data: &KeyData,
        algorithm: &ImportAlgorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<CryptoKey> {
        debug!(%format, alg = %algorithm.name(), extractable, ?usages, "import_key");
        forward(
            "import_key",
            self.provider
                .import_key(format, data, algorithm, extractable, usages),
        )
    }

    pub fn generate_key(
        &self,
        algorithm: &KeyGenAlgorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<GeneratedKey> {
        debug!(alg = %algorithm.name(), extractable, ?usages, "generate_key");
        forward(
            "generate_key",
            self.provider.generate_key(algorithm, extractable, usages),
        )
    }

    /// `generate_key` for algorithms that produce a single secret key.
    pub fn generate_secret_key(
        &self,
        algorithm: &KeyGenAlgorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<CryptoKey> {
        match self.generate_key(algorithm, extractable, usages)? {
            GeneratedKey::Secret(key) => Ok(key),
            GeneratedKey::Pair(_) => Err(WebCryptoError::InvalidParameter(format!(
                "{} produced a key pair where a secret key was expected",
                algorithm.name()
            ))),
        }
    }

    /// `generate_key` for algorithms that produce a public/private pair.
    pub fn generate_key_pair(
        &self,
        algorithm: &KeyGenAlgorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<CryptoKeyPair> {
        match self.generate_key(algorithm, extractable, usages)? {
            GeneratedKey::Pair(pair) => Ok(pair),
            GeneratedKey::Secret(_) => Err(WebCryptoError::InvalidParameter(format!(
                "{} produced a secret key where a key pair was expected",
                algorithm.name()
            ))),
        }
    }

    pub fn digest(&self, algorithm: ShaVariant, data: &[u8]) -> Result<Vec<u8>> {
        debug!(alg = %algorithm, len = data.len(), "digest");
        forward("digest", self.provider.digest(algorithm, data))
    }

    pub fn get_random_values(&self, buf: &mut [u8]) -> Result<()> {
        debug!(len = buf.len(), "get_random_values");
        forward("get_random_values", self.provider.get_random_values(buf))
    }

    /// Fresh vector of `len` random bytes.
    pub fn random_bytes(&self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.get_random_values(&mut buf)?;
        Ok(buf)
    }
}
