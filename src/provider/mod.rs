//! The crypto provider interface.
//!
//! Everything cryptographic happens behind [`CryptoProvider`].  The rest
//! of the crate only normalizes parameters, picks usages and wraps the
//! handles the provider hands back.
//!
//! - `software` is the bundled implementation on top of the RustCrypto
//!   crates.

pub mod software;

use thiserror::Error;

use crate::alg::{KeyFormat, ShaVariant};
use crate::key::{CryptoKey, GeneratedKey, KeyData};
use crate::params::{
    CipherAlgorithm, DeriveAlgorithm, DerivedKeyType, ImportAlgorithm, KeyGenAlgorithm,
    SignAlgorithm, WrapAlgorithm,
};
use crate::usages::KeyUsage;

pub use software::SoftwareProvider;

/// Failures reported by a provider, named after the WebCrypto exceptions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("NotSupportedError: {0}")]
    NotSupported(String),

    #[error("OperationError: {0}")]
    Operation(String),

    #[error("DataError: {0}")]
    Data(String),

    #[error("InvalidAccessError: {0}")]
    InvalidAccess(String),

    #[error("SyntaxError: {0}")]
    Syntax(String),
}

/// Result type used by provider implementations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// A cryptographic engine.
///
/// Implementations must be shareable across threads; every method takes
/// `&self` and keys are immutable, so no locking is expected of callers.
pub trait CryptoProvider: Send + Sync {
    fn encrypt(
        &self,
        algorithm: &CipherAlgorithm,
        key: &CryptoKey,
        data: &[u8],
    ) -> ProviderResult<Vec<u8>>;

    fn decrypt(
        &self,
        algorithm: &CipherAlgorithm,
        key: &CryptoKey,
        data: &[u8],
    ) -> ProviderResult<Vec<u8>>;

    fn sign(&self, algorithm: &SignAlgorithm, key: &CryptoKey, data: &[u8])
        -> ProviderResult<Vec<u8>>;

    /// `Ok(false)` for a well-formed but wrong signature.
    fn verify(
        &self,
        algorithm: &SignAlgorithm,
        key: &CryptoKey,
        signature: &[u8],
        data: &[u8],
    ) -> ProviderResult<bool>;

    /// Derive `length` bits from `base_key`.
    fn derive_bits(
        &self,
        algorithm: &DeriveAlgorithm,
        base_key: &CryptoKey,
        length: u32,
    ) -> ProviderResult<Vec<u8>>;

    fn derive_key(
        &self,
        algorithm: &DeriveAlgorithm,
        base_key: &CryptoKey,
        derived_key_type: &DerivedKeyType,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> ProviderResult<CryptoKey>;

    /// Export `key` in `format` and encrypt the result with `wrapping_key`.
    fn wrap_key(
        &self,
        format: KeyFormat,
        key: &CryptoKey,
        wrapping_key: &CryptoKey,
        algorithm: &WrapAlgorithm,
    ) -> ProviderResult<Vec<u8>>;

    #[allow(clippy::too_many_arguments)]
    fn unwrap_key(
        &self,
        format: KeyFormat,
        wrapped_key: &[u8],
        unwrapping_key: &CryptoKey,
        unwrap_algorithm: &WrapAlgorithm,
        unwrapped_key_algorithm: &ImportAlgorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> ProviderResult<CryptoKey>;

    fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> ProviderResult<KeyData>;

    fn import_key(
        &self,
        format: KeyFormat,
        data: &KeyData,
        algorithm: &ImportAlgorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> ProviderResult<CryptoKey>;

    fn generate_key(
        &self,
        algorithm: &KeyGenAlgorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> ProviderResult<GeneratedKey>;

    fn digest(&self, algorithm: ShaVariant, data: &[u8]) -> ProviderResult<Vec<u8>>;

    /// Fill `buf` with cryptographically secure random bytes.
    fn get_random_values(&self, buf: &mut [u8]) -> ProviderResult<()>;
}
