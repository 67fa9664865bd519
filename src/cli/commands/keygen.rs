//! `webcrypto keygen`: generate a key or key pair and print its export.
//!
//! Usage:
//!   webcrypto keygen AES-GCM
//!   webcrypto keygen AES-KW --format raw
//!   webcrypto keygen ECDSA --format pkcs8

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::alg::{AesMode, Algorithm, EcVariant, KeyFormat, RsaVariant};
use crate::cli::{context, load_settings, output, Cli};
use crate::config::Settings;
use crate::errors::{Result, WebCryptoError};
use crate::key::{CryptoKey, GeneratedKey, KeyData};
use crate::params::{AesKeyGenParams, KeyGenAlgorithm};
use crate::usages::infer_usages;

/// Execute the `keygen` command.
pub fn execute(cli: &Cli, alg: &str, format: &str) -> Result<()> {
    let alg: Algorithm = alg.parse()?;
    let format: KeyFormat = format.parse()?;
    let settings = load_settings(cli)?;
    let crypto = context(&settings);

    let descriptor = key_gen_algorithm(alg, &settings)?;
    let usages = infer_usages(alg).to_vec();
    match crypto.subtle().generate_key(&descriptor, true, &usages)? {
        GeneratedKey::Secret(key) => {
            println!("{}", render(&export(&crypto, &key, format)?)?);
        }
        GeneratedKey::Pair(pair) => {
            let (private_format, public_format) = match format {
                KeyFormat::Jwk => (KeyFormat::Jwk, KeyFormat::Jwk),
                _ => (KeyFormat::Pkcs8, KeyFormat::Spki),
            };
            output::info(&format!("private key ({private_format})"));
            println!("{}", render(&export(&crypto, &pair.private_key, private_format)?)?);
            output::info(&format!("public key ({public_format})"));
            println!("{}", render(&export(&crypto, &pair.public_key, public_format)?)?);
        }
    }

    output::success(&format!("generated {alg} key"));
    Ok(())
}

/// Descriptor for `alg` with the configured defaults.
fn key_gen_algorithm(alg: Algorithm, settings: &Settings) -> Result<KeyGenAlgorithm> {
    let aes = |mode: AesMode| -> Result<KeyGenAlgorithm> {
        Ok(KeyGenAlgorithm::Aes(mode, AesKeyGenParams::default()))
    };
    let rsa = |variant: RsaVariant| -> Result<KeyGenAlgorithm> {
        Ok(KeyGenAlgorithm::Rsa(variant, settings.rsa_key_gen_params()))
    };
    let ec = |variant: EcVariant| -> Result<KeyGenAlgorithm> {
        Ok(KeyGenAlgorithm::Ec(variant, settings.ec_key_gen_params()))
    };
    match alg {
        Algorithm::AesCbc => aes(AesMode::Cbc),
        Algorithm::AesCtr => aes(AesMode::Ctr),
        Algorithm::AesGcm => aes(AesMode::Gcm),
        Algorithm::AesKw => aes(AesMode::Kw),
        Algorithm::Hmac => Ok(KeyGenAlgorithm::Hmac(settings.hmac_key_gen_params())),
        Algorithm::RsaOaep => rsa(RsaVariant::Oaep),
        Algorithm::RsaPss => rsa(RsaVariant::Pss),
        Algorithm::RsassaPkcs1V15 => rsa(RsaVariant::Pkcs1V15),
        Algorithm::Ecdsa => ec(EcVariant::Ecdsa),
        Algorithm::Ecdh => ec(EcVariant::Ecdh),
        Algorithm::Hkdf | Algorithm::Pbkdf2 => Err(WebCryptoError::CommandFailed(format!(
            "{alg} keys are imported from existing material, not generated"
        ))),
    }
}

fn export(crypto: &crate::WebCrypto, key: &CryptoKey, format: KeyFormat) -> Result<KeyData> {
    crypto.subtle().export_key(format, key)
}

/// JWKs as pretty JSON, binary formats as base64.
fn render(data: &KeyData) -> Result<String> {
    match data {
        KeyData::Jwk(jwk) => serde_json::to_string_pretty(jwk)
            .map_err(|e| WebCryptoError::SerializationError(e.to_string())),
        KeyData::Bytes(bytes) => Ok(STANDARD.encode(bytes)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alg::NamedCurve;

    #[test]
    fn kdf_algorithms_cannot_be_generated() {
        let settings = Settings::default();
        assert!(key_gen_algorithm(Algorithm::Pbkdf2, &settings).is_err());
        assert!(key_gen_algorithm(Algorithm::Hkdf, &settings).is_err());
    }

    #[test]
    fn descriptors_follow_settings() {
        let settings = Settings {
            default_curve: NamedCurve::P384,
            ..Settings::default()
        };
        match key_gen_algorithm(Algorithm::Ecdh, &settings).unwrap() {
            KeyGenAlgorithm::Ec(EcVariant::Ecdh, params) => {
                assert_eq!(params.named_curve, NamedCurve::P384)
            }
            other => panic!("unexpected descriptor {other:?}"),
        }
    }

    #[test]
    fn render_bytes_as_base64() {
        assert_eq!(render(&KeyData::Bytes(vec![0, 1, 2])).unwrap(), "AAEC");
    }
}
