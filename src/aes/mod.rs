//! AES facades: CBC, CTR and GCM for encryption, KW for key wrapping.
//!
//! Keys default to 256 bits and to the mode's inferred usages.  CBC, CTR
//! and GCM keys can also wrap and unwrap other keys with their own cipher.

mod cbc;
mod ctr;
mod gcm;
mod kw;
mod shared;

pub use self::cbc::{AesCbc, AesCbcKey};
pub use self::ctr::{AesCtr, AesCtrKey, DEFAULT_COUNTER_LENGTH};
pub use self::gcm::{AesGcm, AesGcmKey};
pub use self::kw::{AesKw, AesKwKey};
pub use self::shared::AesShared;

/// Facade and key view for an AES encryption mode.  The mode's partial
/// parameters become `CipherAlgorithm::$variant` on every call.
macro_rules! aes_cipher {
    (
        $(#[$facade_meta:meta])*
        facade $facade:ident,
        $(#[$view_meta:meta])*
        view $view:ident,
        mode $mode:expr,
        params $params:ty => $variant:ident
    ) => {
        $(#[$facade_meta])*
        #[derive(Debug, Clone)]
        pub struct $facade {
            subtle: $crate::subtle::Subtle,
        }

        impl $facade {
            pub fn new(subtle: $crate::subtle::Subtle) -> Self {
                Self { subtle }
            }

            fn shared(&self) -> $crate::aes::AesShared<'_> {
                $crate::aes::AesShared::new(&self.subtle, $mode)
            }

            pub fn generate_key(
                &self,
                params: $crate::params::AesKeyGenParams,
                extractable: bool,
                usages: Option<&[$crate::usages::KeyUsage]>,
            ) -> $crate::errors::Result<$view> {
                let key = self.shared().generate_key(params, extractable, usages)?;
                Ok($crate::proxy::wrap_key(&self.subtle, key))
            }

            pub fn import_key(
                &self,
                format: $crate::alg::KeyFormat,
                data: &$crate::key::KeyData,
                extractable: bool,
                usages: Option<&[$crate::usages::KeyUsage]>,
            ) -> $crate::errors::Result<$view> {
                let key = self.shared().import_key(format, data, extractable, usages)?;
                Ok($crate::proxy::wrap_key(&self.subtle, key))
            }

            pub fn export_key(
                &self,
                format: $crate::alg::KeyFormat,
                key: &$crate::key::CryptoKey,
            ) -> $crate::errors::Result<$crate::key::KeyData> {
                self.shared().export_key(format, key)
            }

            pub fn encrypt(
                &self,
                params: &$params,
                key: &$crate::key::CryptoKey,
                data: &[u8],
            ) -> $crate::errors::Result<Vec<u8>> {
                let algorithm = $crate::params::CipherAlgorithm::$variant(params.clone());
                self.shared().encrypt(&algorithm, key, data)
            }

            pub fn decrypt(
                &self,
                params: &$params,
                key: &$crate::key::CryptoKey,
                data: &[u8],
            ) -> $crate::errors::Result<Vec<u8>> {
                let algorithm = $crate::params::CipherAlgorithm::$variant(params.clone());
                self.shared().decrypt(&algorithm, key, data)
            }

            pub fn wrap_key(
                &self,
                format: $crate::alg::KeyFormat,
                key: &$crate::key::CryptoKey,
                wrapping_key: &$crate::key::CryptoKey,
                params: &$params,
            ) -> $crate::errors::Result<Vec<u8>> {
                let algorithm: $crate::params::WrapAlgorithm =
                    $crate::params::CipherAlgorithm::$variant(params.clone()).into();
                self.shared().wrap_key(format, key, wrapping_key, &algorithm)
            }

            #[allow(clippy::too_many_arguments)]
            pub fn unwrap_key(
                &self,
                format: $crate::alg::KeyFormat,
                wrapped_key: &[u8],
                unwrapping_key: &$crate::key::CryptoKey,
                params: &$params,
                unwrapped_key_algorithm: &$crate::params::ImportAlgorithm,
                extractable: bool,
                usages: Option<&[$crate::usages::KeyUsage]>,
            ) -> $crate::errors::Result<$crate::key::CryptoKey> {
                let algorithm: $crate::params::WrapAlgorithm =
                    $crate::params::CipherAlgorithm::$variant(params.clone()).into();
                self.shared().unwrap_key(
                    format,
                    wrapped_key,
                    unwrapping_key,
                    &algorithm,
                    unwrapped_key_algorithm,
                    extractable,
                    usages,
                )
            }
        }

        $crate::proxy::key_view!($(#[$view_meta])* $view);

        impl $view {
            fn shared(&self) -> $crate::aes::AesShared<'_> {
                $crate::aes::AesShared::new(self.subtle(), $mode)
            }

            pub fn encrypt(&self, params: &$params, data: &[u8]) -> $crate::errors::Result<Vec<u8>> {
                let algorithm = $crate::params::CipherAlgorithm::$variant(params.clone());
                self.shared().encrypt(&algorithm, self.crypto_key(), data)
            }

            pub fn decrypt(&self, params: &$params, data: &[u8]) -> $crate::errors::Result<Vec<u8>> {
                let algorithm = $crate::params::CipherAlgorithm::$variant(params.clone());
                self.shared().decrypt(&algorithm, self.crypto_key(), data)
            }

            /// Export `key` in `format` and encrypt it with this key.
            pub fn wrap_key(
                &self,
                format: $crate::alg::KeyFormat,
                key: &$crate::key::CryptoKey,
                params: &$params,
            ) -> $crate::errors::Result<Vec<u8>> {
                let algorithm: $crate::params::WrapAlgorithm =
                    $crate::params::CipherAlgorithm::$variant(params.clone()).into();
                self.shared().wrap_key(format, key, self.crypto_key(), &algorithm)
            }

            /// Decrypt `wrapped_key` with this key and import the result.
            pub fn unwrap_key(
                &self,
                format: $crate::alg::KeyFormat,
                wrapped_key: &[u8],
                params: &$params,
                unwrapped_key_algorithm: &$crate::params::ImportAlgorithm,
                extractable: bool,
                usages: Option<&[$crate::usages::KeyUsage]>,
            ) -> $crate::errors::Result<$crate::key::CryptoKey> {
                let algorithm: $crate::params::WrapAlgorithm =
                    $crate::params::CipherAlgorithm::$variant(params.clone()).into();
                self.shared().unwrap_key(
                    format,
                    wrapped_key,
                    self.crypto_key(),
                    &algorithm,
                    unwrapped_key_algorithm,
                    extractable,
                    usages,
                )
            }
        }
    };
}

pub(crate) use aes_cipher;
