use std::path::PathBuf;

use thiserror::Error;

use crate::provider::ProviderError;

/// All errors that can occur in the WebCrypto layer.
#[derive(Debug, Error)]
pub enum WebCryptoError {
    // --- Layer errors (raised before the provider is touched) ---
    #[error("Invalid alg {0}")]
    UnsupportedAlgorithm(String),

    #[error("length must be a multiple of 8, got {0}")]
    InvalidBitLength(u32),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    // --- Provider errors (passed through unchanged) ---
    #[error(transparent)]
    Provider(#[from] ProviderError),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    #[error("Config file not found at {0}")]
    ConfigNotFound(PathBuf),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for WebCrypto results.
pub type Result<T> = std::result::Result<T, WebCryptoError>;
