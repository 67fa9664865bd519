//! RSA-OAEP, RSA-PSS and RSASSA-PKCS1-v1_5.

use aes_gcm::aead::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, Oaep, Pkcs1v15Sign, Pss, RsaPrivateKey, RsaPublicKey};
use sha2::{Sha256, Sha384, Sha512};

use crate::alg::{KeyFormat, KeyType, RsaVariant, SecureHash};
use crate::key::{Jwk, KeyData};
use crate::provider::{ProviderError, ProviderResult};

use super::{digest, jwk};

const MIN_MODULUS_BITS: u32 = 1024;
const MAX_MODULUS_BITS: u32 = 4096;

/// What the software provider stores inside an RSA `CryptoKey`.
pub(super) enum RsaMaterial {
    Private(RsaPrivateKey),
    Public(RsaPublicKey),
}

impl RsaMaterial {
    pub(super) fn key_type(&self) -> KeyType {
        match self {
            RsaMaterial::Private(_) => KeyType::Private,
            RsaMaterial::Public(_) => KeyType::Public,
        }
    }

    fn public_parts(&self) -> (&BigUint, &BigUint) {
        match self {
            RsaMaterial::Private(k) => (k.n(), k.e()),
            RsaMaterial::Public(k) => (k.n(), k.e()),
        }
    }

    /// Modulus length in bits.
    pub(super) fn modulus_length(&self) -> u32 {
        self.public_parts().0.bits() as u32
    }

    /// Big-endian public exponent.
    pub(super) fn public_exponent(&self) -> Vec<u8> {
        self.public_parts().1.to_bytes_be()
    }
}

pub(super) fn generate(modulus_length: u32, public_exponent: &[u8]) -> ProviderResult<RsaPrivateKey> {
    if !(MIN_MODULUS_BITS..=MAX_MODULUS_BITS).contains(&modulus_length) || modulus_length % 8 != 0 {
        return Err(ProviderError::Operation(format!(
            "RSA modulus length must be a multiple of 8 between {MIN_MODULUS_BITS} and {MAX_MODULUS_BITS} (got {modulus_length})"
        )));
    }
    let exponent = BigUint::from_bytes_be(public_exponent);
    if exponent != BigUint::from(3u32) && exponent != BigUint::from(65_537u32) {
        return Err(ProviderError::Operation(
            "RSA public exponent must be 3 or 65537".into(),
        ));
    }
    RsaPrivateKey::new_with_exp(&mut OsRng, modulus_length as usize, &exponent)
        .map_err(|e| ProviderError::Operation(format!("RSA key generation failed: {e}")))
}

/// Parse key data.  The format decides which half it is.
pub(super) fn parse(format: KeyFormat, data: &KeyData) -> ProviderResult<RsaMaterial> {
    match (format, data) {
        (KeyFormat::Pkcs8, KeyData::Bytes(der)) => RsaPrivateKey::from_pkcs8_der(der)
            .map(RsaMaterial::Private)
            .map_err(|e| ProviderError::Data(format!("invalid PKCS#8 RSA key: {e}"))),
        (KeyFormat::Spki, KeyData::Bytes(der)) => RsaPublicKey::from_public_key_der(der)
            .map(RsaMaterial::Public)
            .map_err(|e| ProviderError::Data(format!("invalid SPKI RSA key: {e}"))),
        (KeyFormat::Jwk, KeyData::Jwk(jwk)) => parse_jwk(jwk),
        (KeyFormat::Raw, _) => Err(ProviderError::NotSupported(
            "RSA keys cannot be imported as raw".into(),
        )),
        _ => Err(ProviderError::Data(format!(
            "key data does not match the '{format}' format"
        ))),
    }
}

fn parse_jwk(jwk: &Jwk) -> ProviderResult<RsaMaterial> {
    jwk::expect_kty(jwk, "RSA")?;
    let n = big("n", jwk.n.as_ref())?;
    let e = big("e", jwk.e.as_ref())?;
    if jwk.d.is_none() {
        return RsaPublicKey::new(n, e)
            .map(RsaMaterial::Public)
            .map_err(|err| ProviderError::Data(format!("invalid RSA public key: {err}")));
    }
    let d = big("d", jwk.d.as_ref())?;
    let p = big("p", jwk.p.as_ref())?;
    let q = big("q", jwk.q.as_ref())?;
    let key = RsaPrivateKey::from_components(n, e, d, vec![p, q])
        .map_err(|err| ProviderError::Data(format!("invalid RSA private key: {err}")))?;
    key.validate()
        .map_err(|err| ProviderError::Data(format!("inconsistent RSA private key: {err}")))?;
    Ok(RsaMaterial::Private(key))
}

fn big(member: &str, value: Option<&String>) -> ProviderResult<BigUint> {
    Ok(BigUint::from_bytes_be(&jwk::decode(member, value)?))
}

/// JWK `alg` for a key of `variant` hashed with `hash`.
pub(super) fn jwk_alg(variant: RsaVariant, hash: SecureHash) -> &'static str {
    match (variant, hash) {
        (RsaVariant::Oaep, SecureHash::Sha256) => "RSA-OAEP-256",
        (RsaVariant::Oaep, SecureHash::Sha384) => "RSA-OAEP-384",
        (RsaVariant::Oaep, SecureHash::Sha512) => "RSA-OAEP-512",
        (RsaVariant::Pss, SecureHash::Sha256) => "PS256",
        (RsaVariant::Pss, SecureHash::Sha384) => "PS384",
        (RsaVariant::Pss, SecureHash::Sha512) => "PS512",
        (RsaVariant::Pkcs1V15, SecureHash::Sha256) => "RS256",
        (RsaVariant::Pkcs1V15, SecureHash::Sha384) => "RS384",
        (RsaVariant::Pkcs1V15, SecureHash::Sha512) => "RS512",
    }
}

/// Serialize `material` in `format`.  The JWK carries no usage or
/// extractability members; the caller adds them.
pub(super) fn export(material: &RsaMaterial, format: KeyFormat) -> ProviderResult<KeyData> {
    match (material, format) {
        (RsaMaterial::Private(k), KeyFormat::Pkcs8) => {
            let der = k
                .to_pkcs8_der()
                .map_err(|e| ProviderError::Operation(format!("PKCS#8 encoding: {e}")))?;
            Ok(KeyData::Bytes(der.as_bytes().to_vec()))
        }
        (RsaMaterial::Public(k), KeyFormat::Spki) => {
            let der = k
                .to_public_key_der()
                .map_err(|e| ProviderError::Operation(format!("SPKI encoding: {e}")))?;
            Ok(KeyData::Bytes(der.as_bytes().to_vec()))
        }
        (RsaMaterial::Private(k), KeyFormat::Jwk) => {
            let [p, q] = k.primes() else {
                return Err(ProviderError::Operation(
                    "only two-prime RSA keys can be exported as JWK".into(),
                ));
            };
            let missing_crt = || ProviderError::Operation("RSA key has no CRT values".into());
            let dp = k.dp().ok_or_else(missing_crt)?;
            let dq = k.dq().ok_or_else(missing_crt)?;
            let qi = k.crt_coefficient().ok_or_else(missing_crt)?;
            Ok(KeyData::Jwk(Jwk {
                d: Some(jwk::encode(&k.d().to_bytes_be())),
                p: Some(jwk::encode(&p.to_bytes_be())),
                q: Some(jwk::encode(&q.to_bytes_be())),
                dp: Some(jwk::encode(&dp.to_bytes_be())),
                dq: Some(jwk::encode(&dq.to_bytes_be())),
                qi: Some(jwk::encode(&qi.to_bytes_be())),
                ..public_jwk(material)
            }))
        }
        (RsaMaterial::Public(_), KeyFormat::Jwk) => Ok(KeyData::Jwk(public_jwk(material))),
        (m, f) => Err(ProviderError::InvalidAccess(format!(
            "a {} RSA key cannot be exported as {f}",
            m.key_type()
        ))),
    }
}

fn public_jwk(material: &RsaMaterial) -> Jwk {
    let (n, e) = material.public_parts();
    Jwk {
        kty: "RSA".into(),
        n: Some(jwk::encode(&n.to_bytes_be())),
        e: Some(jwk::encode(&e.to_bytes_be())),
        ..Jwk::default()
    }
}

macro_rules! by_hash {
    ($hash:expr, $make:ident) => {
        match $hash {
            SecureHash::Sha256 => $make!(Sha256),
            SecureHash::Sha384 => $make!(Sha384),
            SecureHash::Sha512 => $make!(Sha512),
        }
    };
}

fn oaep(hash: SecureHash, label: Option<&[u8]>) -> ProviderResult<Oaep> {
    let label = match label {
        None | Some([]) => None,
        Some(bytes) => Some(String::from_utf8(bytes.to_vec()).map_err(|_| {
            ProviderError::NotSupported("RSA-OAEP labels must be valid UTF-8".into())
        })?),
    };
    Ok(match label {
        None => {
            macro_rules! make {
                ($d:ty) => {
                    Oaep::new::<$d>()
                };
            }
            by_hash!(hash, make)
        }
        Some(label) => {
            macro_rules! make {
                ($d:ty) => {
                    Oaep::new_with_label::<$d, _>(label)
                };
            }
            by_hash!(hash, make)
        }
    })
}

pub(super) fn oaep_encrypt(
    key: &RsaPublicKey,
    hash: SecureHash,
    label: Option<&[u8]>,
    data: &[u8],
) -> ProviderResult<Vec<u8>> {
    key.encrypt(&mut OsRng, oaep(hash, label)?, data)
        .map_err(|e| ProviderError::Operation(format!("RSA-OAEP encryption failed: {e}")))
}

pub(super) fn oaep_decrypt(
    key: &RsaPrivateKey,
    hash: SecureHash,
    label: Option<&[u8]>,
    data: &[u8],
) -> ProviderResult<Vec<u8>> {
    key.decrypt(oaep(hash, label)?, data)
        .map_err(|_| ProviderError::Operation("RSA-OAEP decryption failed".into()))
}

fn pss(hash: SecureHash, salt_length: u32) -> Pss {
    macro_rules! make {
        ($d:ty) => {
            Pss::new_with_salt::<$d>(salt_length as usize)
        };
    }
    by_hash!(hash, make)
}

fn pkcs1(hash: SecureHash) -> Pkcs1v15Sign {
    macro_rules! make {
        ($d:ty) => {
            Pkcs1v15Sign::new::<$d>()
        };
    }
    by_hash!(hash, make)
}

pub(super) fn pss_sign(
    key: &RsaPrivateKey,
    hash: SecureHash,
    salt_length: u32,
    data: &[u8],
) -> ProviderResult<Vec<u8>> {
    let hashed = digest::digest(hash.variant(), data);
    key.sign_with_rng(&mut OsRng, pss(hash, salt_length), &hashed)
        .map_err(|e| ProviderError::Operation(format!("RSA-PSS signing failed: {e}")))
}

pub(super) fn pss_verify(
    key: &RsaPublicKey,
    hash: SecureHash,
    salt_length: u32,
    signature: &[u8],
    data: &[u8],
) -> bool {
    let hashed = digest::digest(hash.variant(), data);
    key.verify(pss(hash, salt_length), &hashed, signature).is_ok()
}

pub(super) fn pkcs1_sign(key: &RsaPrivateKey, hash: SecureHash, data: &[u8]) -> ProviderResult<Vec<u8>> {
    let hashed = digest::digest(hash.variant(), data);
    key.sign_with_rng(&mut OsRng, pkcs1(hash), &hashed)
        .map_err(|e| ProviderError::Operation(format!("RSASSA-PKCS1-v1_5 signing failed: {e}")))
}

pub(super) fn pkcs1_verify(key: &RsaPublicKey, hash: SecureHash, signature: &[u8], data: &[u8]) -> bool {
    let hashed = digest::digest(hash.variant(), data);
    key.verify(pkcs1(hash), &hashed, signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_key() -> RsaPrivateKey {
        generate(1024, &[1, 0, 1]).unwrap()
    }

    #[test]
    fn rejects_odd_sizes_and_exponents() {
        assert!(generate(1000, &[1, 0, 1]).is_err());
        assert!(generate(8192, &[1, 0, 1]).is_err());
        assert!(generate(1024, &[5]).is_err());
    }

    #[test]
    fn oaep_round_trip_with_label() {
        let private = small_key();
        let public = private.to_public_key();
        let ct = oaep_encrypt(&public, SecureHash::Sha256, Some(b"ctx"), b"secret").unwrap();
        let pt = oaep_decrypt(&private, SecureHash::Sha256, Some(b"ctx"), &ct).unwrap();
        assert_eq!(pt, b"secret");
        assert!(oaep_decrypt(&private, SecureHash::Sha256, Some(b"other"), &ct).is_err());
    }

    #[test]
    fn non_utf8_label_is_not_supported() {
        let public = small_key().to_public_key();
        assert!(matches!(
            oaep_encrypt(&public, SecureHash::Sha256, Some(&[0xff, 0xfe]), b"x"),
            Err(ProviderError::NotSupported(_))
        ));
    }

    #[test]
    fn pss_and_pkcs1_sign_verify() {
        let private = small_key();
        let public = private.to_public_key();
        let sig = pss_sign(&private, SecureHash::Sha256, 32, b"msg").unwrap();
        assert!(pss_verify(&public, SecureHash::Sha256, 32, &sig, b"msg"));
        assert!(!pss_verify(&public, SecureHash::Sha256, 32, &sig, b"msh"));

        let sig = pkcs1_sign(&private, SecureHash::Sha384, b"msg").unwrap();
        assert!(pkcs1_verify(&public, SecureHash::Sha384, &sig, b"msg"));
        assert!(!pkcs1_verify(&public, SecureHash::Sha512, &sig, b"msg"));
    }

    #[test]
    fn jwk_round_trip_private() {
        let material = RsaMaterial::Private(small_key());
        let exported = export(&material, KeyFormat::Jwk).unwrap();
        let parsed = parse(KeyFormat::Jwk, &exported).unwrap();
        assert_eq!(parsed.key_type(), KeyType::Private);
        assert_eq!(parsed.modulus_length(), 1024);
        assert_eq!(parsed.public_exponent(), vec![1, 0, 1]);
        assert_eq!(export(&parsed, KeyFormat::Jwk).unwrap(), exported);
    }

    #[test]
    fn raw_is_not_supported() {
        assert!(matches!(
            parse(KeyFormat::Raw, &KeyData::Bytes(vec![1, 2, 3])),
            Err(ProviderError::NotSupported(_))
        ));
    }
}
