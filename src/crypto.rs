//! Root context: one provider, every facade.

use std::sync::Arc;

use crate::aes::{AesCbc, AesCtr, AesGcm, AesKw};
use crate::alg::ShaVariant;
use crate::config::Settings;
use crate::ec::{Ecdh, Ecdsa};
use crate::hmac::Hmac;
use crate::kdf::{Hkdf, Pbkdf2, Pbkdf2Iterations};
use crate::provider::{CryptoProvider, SoftwareProvider};
use crate::random::{Random, DEFAULT_RANDOM_LENGTH};
use crate::rsa::{RsaOaep, RsaPss, RsassaPkcs1V15};
use crate::sha::Sha;
use crate::subtle::Subtle;

/// Entry point.  Facades are cheap to build and share the provider.
///
/// ```
/// use webcrypto::params::{AesGcmParams, AesKeyGenParams};
/// use webcrypto::WebCrypto;
///
/// let crypto = WebCrypto::software();
/// let key = crypto.aes_gcm().generate_key(AesKeyGenParams::default(), true, None).unwrap();
/// let params = AesGcmParams::new(crypto.random().iv_with_length(12).unwrap());
/// let ct = key.encrypt(&params, b"hello").unwrap();
/// assert_eq!(key.decrypt(&params, &ct).unwrap(), b"hello");
/// ```
#[derive(Debug, Clone)]
pub struct WebCrypto {
    subtle: Subtle,
    pbkdf2_iterations: Pbkdf2Iterations,
    random_length: usize,
}

impl WebCrypto {
    /// A context over `provider` with the default PBKDF2 table and a
    /// 16-byte random length.
    pub fn new(provider: Arc<dyn CryptoProvider>) -> Self {
        Self {
            subtle: Subtle::new(provider),
            pbkdf2_iterations: Pbkdf2Iterations::default(),
            random_length: DEFAULT_RANDOM_LENGTH,
        }
    }

    /// Backed by the bundled [`SoftwareProvider`].
    pub fn software() -> Self {
        Self::new(Arc::new(SoftwareProvider::new()))
    }

    /// Apply the PBKDF2 table and random length from `settings`.
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.pbkdf2_iterations = settings.pbkdf2_iterations;
        self.random_length = settings.random_length;
        self
    }

    /// The adapter every facade forwards to.
    pub fn subtle(&self) -> &Subtle {
        &self.subtle
    }

    /// AES-CBC facade.
    pub fn aes_cbc(&self) -> AesCbc {
        AesCbc::new(self.subtle.clone())
    }

    /// AES-CTR facade.
    pub fn aes_ctr(&self) -> AesCtr {
        AesCtr::new(self.subtle.clone())
    }

    /// AES-GCM facade.
    pub fn aes_gcm(&self) -> AesGcm {
        AesGcm::new(self.subtle.clone())
    }

    /// AES-KW facade.
    pub fn aes_kw(&self) -> AesKw {
        AesKw::new(self.subtle.clone())
    }

    /// ECDSA facade.
    pub fn ecdsa(&self) -> Ecdsa {
        Ecdsa::new(self.subtle.clone())
    }

    /// ECDH facade.
    pub fn ecdh(&self) -> Ecdh {
        Ecdh::new(self.subtle.clone())
    }

    /// RSA-OAEP facade.
    pub fn rsa_oaep(&self) -> RsaOaep {
        RsaOaep::new(self.subtle.clone())
    }

    /// RSA-PSS facade.
    pub fn rsa_pss(&self) -> RsaPss {
        RsaPss::new(self.subtle.clone())
    }

    /// RSASSA-PKCS1-v1_5 facade.
    pub fn rsassa_pkcs1_v1_5(&self) -> RsassaPkcs1V15 {
        RsassaPkcs1V15::new(self.subtle.clone())
    }

    /// HMAC facade.
    pub fn hmac(&self) -> Hmac {
        Hmac::new(self.subtle.clone())
    }

    /// HKDF facade.
    pub fn hkdf(&self) -> Hkdf {
        Hkdf::new(self.subtle.clone())
    }

    /// PBKDF2 facade using this context's iteration table.
    pub fn pbkdf2(&self) -> Pbkdf2 {
        Pbkdf2::with_iterations(self.subtle.clone(), self.pbkdf2_iterations)
    }

    /// Digest facade for `variant`.
    pub fn sha(&self, variant: ShaVariant) -> Sha {
        Sha::new(self.subtle.clone(), variant)
    }

    pub fn sha1(&self) -> Sha {
        self.sha(ShaVariant::Sha1)
    }

    pub fn sha256(&self) -> Sha {
        self.sha(ShaVariant::Sha256)
    }

    pub fn sha384(&self) -> Sha {
        self.sha(ShaVariant::Sha384)
    }

    pub fn sha512(&self) -> Sha {
        self.sha(ShaVariant::Sha512)
    }

    /// Random values; IVs and salts default to the configured length.
    pub fn random(&self) -> Random {
        Random::with_default_length(self.subtle.clone(), self.random_length)
    }
}

impl Default for WebCrypto {
    fn default() -> Self {
        Self::software()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_flow_into_facades() {
        let settings = Settings {
            random_length: 24,
            pbkdf2_iterations: Pbkdf2Iterations {
                sha256: 1,
                sha384: 2,
                sha512: 3,
            },
            ..Settings::default()
        };
        let crypto = WebCrypto::software().with_settings(&settings);
        assert_eq!(crypto.random().salt().unwrap().len(), 24);
        assert_eq!(crypto.pbkdf2().iterations().sha384, 2);
    }

    #[test]
    fn facades_share_one_provider() {
        let crypto = WebCrypto::default();
        let a = crypto.aes_gcm();
        let b = crypto.hmac();
        drop((a, b));
        assert_eq!(Arc::strong_count(crypto.subtle().provider()), 1);
    }
}
