pub mod aes;
pub mod alg;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod ec;
pub mod errors;
pub mod hmac;
pub mod kdf;
pub mod key;
pub mod params;
pub mod provider;
pub mod proxy;
pub mod random;
pub mod rsa;
pub mod sha;
pub mod subtle;
pub mod usages;

pub use crypto::WebCrypto;
pub use errors::{Result, WebCryptoError};
pub use key::{CryptoKey, CryptoKeyPair, Jwk, KeyAlgorithm, KeyData};
pub use proxy::{ImportedKey, KeyPair};
pub use usages::{infer_usages, infer_usages_by_name, KeyUsage, UsagePair};
