//! Capability views over key handles.
//!
//! Each key role has its own view type (`AesGcmKey`, `EcdsaPublicKey`,
//! `HkdfKey`, ...).  A view binds one [`CryptoKey`] and a [`Subtle`]
//! adapter together and exposes only the operations that role may
//! perform, so the key is never passed again.  Every view also offers
//! `crypto_key()` to get the untouched handle back, `export_key`, and
//! read-only metadata.
//!
//! The surface is closed at compile time.  A public ECDSA key has no
//! `sign`:
//!
//! ```compile_fail
//! use webcrypto::params::{EcKeyGenParams, EcdsaParams};
//! use webcrypto::WebCrypto;
//!
//! let crypto = WebCrypto::software();
//! let pair = crypto
//!     .ecdsa()
//!     .generate_key_pair(EcKeyGenParams::default(), true, None)
//!     .unwrap();
//! pair.public_key.sign(EcdsaParams::default(), b"data");
//! ```
//!
//! and a private RSA-OAEP key has no `encrypt`:
//!
//! ```compile_fail
//! use webcrypto::params::{RsaHashedKeyGenParams, RsaOaepParams};
//! use webcrypto::WebCrypto;
//!
//! let crypto = WebCrypto::software();
//! let pair = crypto
//!     .rsa_oaep()
//!     .generate_key_pair(RsaHashedKeyGenParams::default(), true, None)
//!     .unwrap();
//! pair.private_key.encrypt(&RsaOaepParams::default(), b"data");
//! ```
//!
//! A private ECDSA key cannot verify either:
//!
//! ```compile_fail
//! use webcrypto::params::{EcKeyGenParams, EcdsaParams};
//! use webcrypto::WebCrypto;
//!
//! let crypto = WebCrypto::software();
//! let pair = crypto
//!     .ecdsa()
//!     .generate_key_pair(EcKeyGenParams::default(), true, None)
//!     .unwrap();
//! pair.private_key.verify(EcdsaParams::default(), b"sig", b"data");
//! ```
//!
//! while the matching halves compile:
//!
//! ```
//! use webcrypto::params::{EcKeyGenParams, EcdsaParams};
//! use webcrypto::WebCrypto;
//!
//! let crypto = WebCrypto::software();
//! let pair = crypto
//!     .ecdsa()
//!     .generate_key_pair(EcKeyGenParams::default(), true, None)
//!     .unwrap();
//! let sig = pair.private_key.sign(EcdsaParams::default(), b"data").unwrap();
//! assert!(pair.public_key.verify(EcdsaParams::default(), &sig, b"data").unwrap());
//! ```

use crate::alg::KeyType;
use crate::errors::{Result, WebCryptoError};
use crate::key::{CryptoKey, CryptoKeyPair};
use crate::subtle::Subtle;

/// Builds a view around a handle.
pub trait FromCryptoKey: Sized {
    fn from_crypto_key(subtle: Subtle, key: CryptoKey) -> Self;
}

/// Wrap one handle in the view `V`.
pub fn wrap_key<V: FromCryptoKey>(subtle: &Subtle, key: CryptoKey) -> V {
    V::from_crypto_key(subtle.clone(), key)
}

/// Both halves of a key pair, each in its own view.
#[derive(Debug, Clone)]
pub struct KeyPair<Priv, Pub> {
    pub private_key: Priv,
    pub public_key: Pub,
}

/// Wrap each half of `pair` in its view.
pub fn wrap_key_pair<Priv, Pub>(subtle: &Subtle, pair: CryptoKeyPair) -> KeyPair<Priv, Pub>
where
    Priv: FromCryptoKey,
    Pub: FromCryptoKey,
{
    KeyPair {
        private_key: wrap_key(subtle, pair.private_key),
        public_key: wrap_key(subtle, pair.public_key),
    }
}

/// An imported asymmetric key; which half depends on the key data.
#[derive(Debug, Clone)]
pub enum ImportedKey<Priv, Pub> {
    Private(Priv),
    Public(Pub),
}

impl<Priv, Pub> ImportedKey<Priv, Pub> {
    pub fn private(self) -> Option<Priv> {
        match self {
            ImportedKey::Private(k) => Some(k),
            ImportedKey::Public(_) => None,
        }
    }

    pub fn public(self) -> Option<Pub> {
        match self {
            ImportedKey::Public(k) => Some(k),
            ImportedKey::Private(_) => None,
        }
    }
}

/// Pick the view for an imported handle by its `type`.
pub fn wrap_imported<Priv, Pub>(subtle: &Subtle, key: CryptoKey) -> Result<ImportedKey<Priv, Pub>>
where
    Priv: FromCryptoKey,
    Pub: FromCryptoKey,
{
    match key.key_type() {
        KeyType::Private => Ok(ImportedKey::Private(wrap_key(subtle, key))),
        KeyType::Public => Ok(ImportedKey::Public(wrap_key(subtle, key))),
        KeyType::Secret => Err(WebCryptoError::InvalidParameter(format!(
            "{} import produced a secret key where a public or private key was expected",
            key.algorithm().name()
        ))),
    }
}

/// Declare a view type with the parts every view shares: the bound
/// handle, [`FromCryptoKey`], metadata passthrough and `export_key`.
///
/// Extra fields start out as their `Default` and are filled in by the
/// facade that builds the view.
macro_rules! key_view {
    ($(#[$meta:meta])* $name:ident $({ $($field:ident: $fty:ty),* $(,)? })?) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            subtle: $crate::subtle::Subtle,
            key: $crate::key::CryptoKey,
            $($($field: $fty,)*)?
        }

        impl $crate::proxy::FromCryptoKey for $name {
            fn from_crypto_key(subtle: $crate::subtle::Subtle, key: $crate::key::CryptoKey) -> Self {
                Self {
                    subtle,
                    key,
                    $($($field: Default::default(),)*)?
                }
            }
        }

        #[allow(dead_code)]
        impl $name {
            /// The wrapped handle, unchanged.
            pub fn crypto_key(&self) -> &$crate::key::CryptoKey {
                &self.key
            }

            pub fn into_crypto_key(self) -> $crate::key::CryptoKey {
                self.key
            }

            pub fn algorithm(&self) -> &$crate::key::KeyAlgorithm {
                self.key.algorithm()
            }

            pub fn extractable(&self) -> bool {
                self.key.extractable()
            }

            pub fn key_type(&self) -> $crate::alg::KeyType {
                self.key.key_type()
            }

            pub fn usages(&self) -> &[$crate::usages::KeyUsage] {
                self.key.usages()
            }

            pub fn export_key(
                &self,
                format: $crate::alg::KeyFormat,
            ) -> $crate::errors::Result<$crate::key::KeyData> {
                self.subtle.export_key(format, &self.key)
            }

            fn subtle(&self) -> &$crate::subtle::Subtle {
                &self.subtle
            }
        }
    };
}

pub(crate) use key_view;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alg::{AesMode, KeyFormat};
    use crate::params::{AesKeyGenParams, KeyGenAlgorithm};
    use crate::usages::KeyUsage;

    key_view!(
        /// Minimal view used to exercise the macro.
        TestKey
    );

    fn secret(subtle: &Subtle) -> CryptoKey {
        subtle
            .generate_secret_key(
                &KeyGenAlgorithm::Aes(AesMode::Kw, AesKeyGenParams::default()),
                true,
                &[KeyUsage::WrapKey],
            )
            .unwrap()
    }

    #[test]
    fn crypto_key_returns_the_same_handle() {
        let subtle = Subtle::default();
        let key = secret(&subtle);
        let view: TestKey = wrap_key(&subtle, key.clone());
        assert!(view.crypto_key().ptr_eq(&key));
        assert_eq!(view.usages(), &[KeyUsage::WrapKey]);
        assert_eq!(view.key_type(), KeyType::Secret);
        assert!(view.export_key(KeyFormat::Raw).is_ok());
        assert!(view.subtle().random_bytes(1).is_ok());
    }

    #[test]
    fn wrapping_twice_gives_independent_views() {
        let subtle = Subtle::default();
        let key = secret(&subtle);
        let a: TestKey = wrap_key(&subtle, key.clone());
        let b: TestKey = wrap_key(&subtle, key);
        assert!(a.crypto_key().ptr_eq(b.crypto_key()));
        assert_eq!(
            a.export_key(KeyFormat::Raw).unwrap(),
            b.export_key(KeyFormat::Raw).unwrap()
        );
    }

    #[test]
    fn secret_key_is_not_an_imported_half() {
        let subtle = Subtle::default();
        let key = secret(&subtle);
        let imported: Result<ImportedKey<TestKey, TestKey>> = wrap_imported(&subtle, key);
        assert!(matches!(imported, Err(WebCryptoError::InvalidParameter(_))));
    }
}
