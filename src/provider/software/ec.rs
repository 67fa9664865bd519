//! ECDSA and ECDH on the NIST prime curves.
//!
//! Signatures are the raw `r || s` concatenation WebCrypto uses, not DER.
//! Public keys export as uncompressed SEC1 points (`raw`), SPKI or JWK;
//! private keys as PKCS#8 or JWK.

use crate::alg::{KeyFormat, KeyType, NamedCurve, SecureHash};
use crate::key::{Jwk, KeyData};
use crate::provider::{ProviderError, ProviderResult};

use super::{digest, jwk};

/// Per-curve primitives.  Each curve crate exposes the same surface, so one
/// body serves all three.
macro_rules! curve_module {
    ($module:ident, $krate:ident) => {
        pub(super) mod $module {
            use aes_gcm::aead::OsRng;
            use $krate::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
            use $krate::ecdsa::{Signature, SigningKey, VerifyingKey};
            use $krate::elliptic_curve::ecdh::diffie_hellman;
            use $krate::elliptic_curve::sec1::ToEncodedPoint;
            use $krate::pkcs8::{
                DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey,
            };
            pub(crate) use $krate::{PublicKey, SecretKey};

            use crate::provider::{ProviderError, ProviderResult};

            pub(crate) fn generate() -> SecretKey {
                SecretKey::random(&mut OsRng)
            }

            pub(crate) fn secret_from_pkcs8(der: &[u8]) -> ProviderResult<SecretKey> {
                SecretKey::from_pkcs8_der(der)
                    .map_err(|e| ProviderError::Data(format!("invalid PKCS#8 EC key: {e}")))
            }

            pub(crate) fn secret_to_pkcs8(key: &SecretKey) -> ProviderResult<Vec<u8>> {
                let der = key
                    .to_pkcs8_der()
                    .map_err(|e| ProviderError::Operation(format!("PKCS#8 encoding: {e}")))?;
                Ok(der.as_bytes().to_vec())
            }

            pub(crate) fn secret_from_scalar(d: &[u8]) -> ProviderResult<SecretKey> {
                SecretKey::from_slice(d)
                    .map_err(|_| ProviderError::Data("invalid EC private scalar".into()))
            }

            pub(crate) fn secret_scalar(key: &SecretKey) -> Vec<u8> {
                key.to_bytes().to_vec()
            }

            pub(crate) fn public_from_spki(der: &[u8]) -> ProviderResult<PublicKey> {
                PublicKey::from_public_key_der(der)
                    .map_err(|e| ProviderError::Data(format!("invalid SPKI EC key: {e}")))
            }

            pub(crate) fn public_to_spki(key: &PublicKey) -> ProviderResult<Vec<u8>> {
                let der = key
                    .to_public_key_der()
                    .map_err(|e| ProviderError::Operation(format!("SPKI encoding: {e}")))?;
                Ok(der.as_bytes().to_vec())
            }

            pub(crate) fn public_from_sec1(bytes: &[u8]) -> ProviderResult<PublicKey> {
                PublicKey::from_sec1_bytes(bytes)
                    .map_err(|_| ProviderError::Data("invalid EC point".into()))
            }

            pub(crate) fn public_to_sec1(key: &PublicKey) -> Vec<u8> {
                key.to_encoded_point(false).as_bytes().to_vec()
            }

            pub(crate) fn sign_prehash(key: &SecretKey, prehash: &[u8]) -> ProviderResult<Vec<u8>> {
                let signer = SigningKey::from_bytes(&key.to_bytes())
                    .map_err(|e| ProviderError::Operation(format!("ECDSA key: {e}")))?;
                let signature: Signature = signer
                    .sign_prehash_with_rng(&mut OsRng, prehash)
                    .map_err(|e| ProviderError::Operation(format!("ECDSA signing failed: {e}")))?;
                Ok(signature.to_bytes().to_vec())
            }

            pub(crate) fn verify_prehash(
                key: &PublicKey,
                prehash: &[u8],
                signature: &[u8],
            ) -> ProviderResult<bool> {
                let Ok(signature) = Signature::from_slice(signature) else {
                    return Ok(false);
                };
                let verifier = VerifyingKey::from_sec1_bytes(&public_to_sec1(key))
                    .map_err(|e| ProviderError::Operation(format!("ECDSA key: {e}")))?;
                Ok(verifier.verify_prehash(prehash, &signature).is_ok())
            }

            pub(crate) fn shared_secret(key: &SecretKey, peer: &PublicKey) -> Vec<u8> {
                let shared = diffie_hellman(key.to_nonzero_scalar(), peer.as_affine());
                shared.raw_secret_bytes().to_vec()
            }
        }
    };
}

curve_module!(p256_ops, p256);
curve_module!(p384_ops, p384);
curve_module!(p521_ops, p521);

/// An EC private key on one of the supported curves.
pub(super) enum EcPrivate {
    P256(p256_ops::SecretKey),
    P384(p384_ops::SecretKey),
    P521(p521_ops::SecretKey),
}

/// An EC public key on one of the supported curves.
#[derive(Clone)]
pub(super) enum EcPublic {
    P256(p256_ops::PublicKey),
    P384(p384_ops::PublicKey),
    P521(p521_ops::PublicKey),
}

/// What the software provider stores inside an EC `CryptoKey`.
pub(super) enum EcMaterial {
    Private(EcPrivate),
    Public(EcPublic),
}

impl EcPrivate {
    pub(super) fn generate(curve: NamedCurve) -> Self {
        match curve {
            NamedCurve::P256 => EcPrivate::P256(p256_ops::generate()),
            NamedCurve::P384 => EcPrivate::P384(p384_ops::generate()),
            NamedCurve::P521 => EcPrivate::P521(p521_ops::generate()),
        }
    }

    pub(super) fn curve(&self) -> NamedCurve {
        match self {
            EcPrivate::P256(_) => NamedCurve::P256,
            EcPrivate::P384(_) => NamedCurve::P384,
            EcPrivate::P521(_) => NamedCurve::P521,
        }
    }

    pub(super) fn public_key(&self) -> EcPublic {
        match self {
            EcPrivate::P256(k) => EcPublic::P256(k.public_key()),
            EcPrivate::P384(k) => EcPublic::P384(k.public_key()),
            EcPrivate::P521(k) => EcPublic::P521(k.public_key()),
        }
    }

    fn from_pkcs8(curve: NamedCurve, der: &[u8]) -> ProviderResult<Self> {
        Ok(match curve {
            NamedCurve::P256 => EcPrivate::P256(p256_ops::secret_from_pkcs8(der)?),
            NamedCurve::P384 => EcPrivate::P384(p384_ops::secret_from_pkcs8(der)?),
            NamedCurve::P521 => EcPrivate::P521(p521_ops::secret_from_pkcs8(der)?),
        })
    }

    fn to_pkcs8(&self) -> ProviderResult<Vec<u8>> {
        match self {
            EcPrivate::P256(k) => p256_ops::secret_to_pkcs8(k),
            EcPrivate::P384(k) => p384_ops::secret_to_pkcs8(k),
            EcPrivate::P521(k) => p521_ops::secret_to_pkcs8(k),
        }
    }

    fn from_scalar(curve: NamedCurve, d: &[u8]) -> ProviderResult<Self> {
        if d.len() != curve.field_len() {
            return Err(ProviderError::Data(format!(
                "EC private scalar for {curve} must be {} bytes (got {})",
                curve.field_len(),
                d.len()
            )));
        }
        Ok(match curve {
            NamedCurve::P256 => EcPrivate::P256(p256_ops::secret_from_scalar(d)?),
            NamedCurve::P384 => EcPrivate::P384(p384_ops::secret_from_scalar(d)?),
            NamedCurve::P521 => EcPrivate::P521(p521_ops::secret_from_scalar(d)?),
        })
    }

    fn scalar(&self) -> Vec<u8> {
        match self {
            EcPrivate::P256(k) => p256_ops::secret_scalar(k),
            EcPrivate::P384(k) => p384_ops::secret_scalar(k),
            EcPrivate::P521(k) => p521_ops::secret_scalar(k),
        }
    }

    /// Raw `r || s` ECDSA signature over `data` hashed with `hash`.
    pub(super) fn sign(&self, hash: SecureHash, data: &[u8]) -> ProviderResult<Vec<u8>> {
        let prehash = digest::digest(hash.variant(), data);
        match self {
            EcPrivate::P256(k) => p256_ops::sign_prehash(k, &prehash),
            EcPrivate::P384(k) => p384_ops::sign_prehash(k, &prehash),
            EcPrivate::P521(k) => p521_ops::sign_prehash(k, &prehash),
        }
    }

    /// Raw ECDH shared secret (the x coordinate).
    pub(super) fn shared_secret(&self, peer: &EcPublic) -> ProviderResult<Vec<u8>> {
        match (self, peer) {
            (EcPrivate::P256(k), EcPublic::P256(p)) => Ok(p256_ops::shared_secret(k, p)),
            (EcPrivate::P384(k), EcPublic::P384(p)) => Ok(p384_ops::shared_secret(k, p)),
            (EcPrivate::P521(k), EcPublic::P521(p)) => Ok(p521_ops::shared_secret(k, p)),
            _ => Err(ProviderError::InvalidAccess(format!(
                "ECDH public key is on {} but the private key is on {}",
                peer.curve(),
                self.curve()
            ))),
        }
    }
}

impl EcPublic {
    pub(super) fn curve(&self) -> NamedCurve {
        match self {
            EcPublic::P256(_) => NamedCurve::P256,
            EcPublic::P384(_) => NamedCurve::P384,
            EcPublic::P521(_) => NamedCurve::P521,
        }
    }

    fn from_spki(curve: NamedCurve, der: &[u8]) -> ProviderResult<Self> {
        Ok(match curve {
            NamedCurve::P256 => EcPublic::P256(p256_ops::public_from_spki(der)?),
            NamedCurve::P384 => EcPublic::P384(p384_ops::public_from_spki(der)?),
            NamedCurve::P521 => EcPublic::P521(p521_ops::public_from_spki(der)?),
        })
    }

    fn to_spki(&self) -> ProviderResult<Vec<u8>> {
        match self {
            EcPublic::P256(k) => p256_ops::public_to_spki(k),
            EcPublic::P384(k) => p384_ops::public_to_spki(k),
            EcPublic::P521(k) => p521_ops::public_to_spki(k),
        }
    }

    fn from_sec1(curve: NamedCurve, bytes: &[u8]) -> ProviderResult<Self> {
        Ok(match curve {
            NamedCurve::P256 => EcPublic::P256(p256_ops::public_from_sec1(bytes)?),
            NamedCurve::P384 => EcPublic::P384(p384_ops::public_from_sec1(bytes)?),
            NamedCurve::P521 => EcPublic::P521(p521_ops::public_from_sec1(bytes)?),
        })
    }

    /// Uncompressed SEC1 encoding: `0x04 || x || y`.
    fn to_sec1(&self) -> Vec<u8> {
        match self {
            EcPublic::P256(k) => p256_ops::public_to_sec1(k),
            EcPublic::P384(k) => p384_ops::public_to_sec1(k),
            EcPublic::P521(k) => p521_ops::public_to_sec1(k),
        }
    }

    fn from_coordinates(curve: NamedCurve, x: &[u8], y: &[u8]) -> ProviderResult<Self> {
        let n = curve.field_len();
        if x.len() != n || y.len() != n {
            return Err(ProviderError::Data(format!(
                "EC coordinates for {curve} must be {n} bytes each"
            )));
        }
        let mut sec1 = Vec::with_capacity(1 + 2 * n);
        sec1.push(0x04);
        sec1.extend_from_slice(x);
        sec1.extend_from_slice(y);
        Self::from_sec1(curve, &sec1)
    }

    fn coordinates(&self) -> (Vec<u8>, Vec<u8>) {
        let sec1 = self.to_sec1();
        let n = self.curve().field_len();
        (sec1[1..1 + n].to_vec(), sec1[1 + n..].to_vec())
    }

    pub(super) fn verify(
        &self,
        hash: SecureHash,
        signature: &[u8],
        data: &[u8],
    ) -> ProviderResult<bool> {
        let prehash = digest::digest(hash.variant(), data);
        match self {
            EcPublic::P256(k) => p256_ops::verify_prehash(k, &prehash, signature),
            EcPublic::P384(k) => p384_ops::verify_prehash(k, &prehash, signature),
            EcPublic::P521(k) => p521_ops::verify_prehash(k, &prehash, signature),
        }
    }
}

impl EcMaterial {
    pub(super) fn key_type(&self) -> KeyType {
        match self {
            EcMaterial::Private(_) => KeyType::Private,
            EcMaterial::Public(_) => KeyType::Public,
        }
    }

    fn curve(&self) -> NamedCurve {
        match self {
            EcMaterial::Private(k) => k.curve(),
            EcMaterial::Public(k) => k.curve(),
        }
    }
}

/// Parse key data for `curve`.  The format decides which half it is.
pub(super) fn parse(curve: NamedCurve, format: KeyFormat, data: &KeyData) -> ProviderResult<EcMaterial> {
    let material = match (format, data) {
        (KeyFormat::Pkcs8, KeyData::Bytes(der)) => {
            EcMaterial::Private(EcPrivate::from_pkcs8(curve, der)?)
        }
        (KeyFormat::Spki, KeyData::Bytes(der)) => EcMaterial::Public(EcPublic::from_spki(curve, der)?),
        (KeyFormat::Raw, KeyData::Bytes(point)) => {
            EcMaterial::Public(EcPublic::from_sec1(curve, point)?)
        }
        (KeyFormat::Jwk, KeyData::Jwk(jwk)) => parse_jwk(curve, jwk)?,
        _ => return Err(mismatched(format)),
    };
    if material.curve() != curve {
        return Err(ProviderError::Data(format!(
            "key is on {} but {curve} was requested",
            material.curve()
        )));
    }
    Ok(material)
}

fn parse_jwk(curve: NamedCurve, jwk: &Jwk) -> ProviderResult<EcMaterial> {
    jwk::expect_kty(jwk, "EC")?;
    if jwk.crv.as_deref() != Some(curve.as_str()) {
        return Err(ProviderError::Data(format!(
            "JWK crv must be '{curve}' (got {:?})",
            jwk.crv
        )));
    }
    let x = jwk::decode("x", jwk.x.as_ref())?;
    let y = jwk::decode("y", jwk.y.as_ref())?;
    let public = EcPublic::from_coordinates(curve, &x, &y)?;

    match jwk.d.as_ref() {
        None => Ok(EcMaterial::Public(public)),
        Some(_) => {
            let d = jwk::decode("d", jwk.d.as_ref())?;
            let private = EcPrivate::from_scalar(curve, &d)?;
            if private.public_key().to_sec1() != public.to_sec1() {
                return Err(ProviderError::Data(
                    "JWK private scalar does not match its public point".into(),
                ));
            }
            Ok(EcMaterial::Private(private))
        }
    }
}

/// JWK `alg` an ECDSA key on `curve` may carry.
pub(super) fn ecdsa_jwk_alg(curve: NamedCurve) -> &'static str {
    match curve {
        NamedCurve::P256 => "ES256",
        NamedCurve::P384 => "ES384",
        NamedCurve::P521 => "ES512",
    }
}

/// Serialize `material` in `format`.  The JWK carries no usage or
/// extractability members; the caller adds them.
pub(super) fn export(material: &EcMaterial, format: KeyFormat) -> ProviderResult<KeyData> {
    match (material, format) {
        (EcMaterial::Private(k), KeyFormat::Pkcs8) => Ok(KeyData::Bytes(k.to_pkcs8()?)),
        (EcMaterial::Public(k), KeyFormat::Spki) => Ok(KeyData::Bytes(k.to_spki()?)),
        (EcMaterial::Public(k), KeyFormat::Raw) => Ok(KeyData::Bytes(k.to_sec1())),
        (EcMaterial::Private(k), KeyFormat::Jwk) => {
            let mut jwk = public_jwk(&k.public_key());
            jwk.d = Some(jwk::encode(&k.scalar()));
            Ok(KeyData::Jwk(jwk))
        }
        (EcMaterial::Public(k), KeyFormat::Jwk) => Ok(KeyData::Jwk(public_jwk(k))),
        (m, f) => Err(ProviderError::InvalidAccess(format!(
            "a {} EC key cannot be exported as {f}",
            m.key_type()
        ))),
    }
}

fn public_jwk(key: &EcPublic) -> Jwk {
    let (x, y) = key.coordinates();
    Jwk {
        kty: "EC".into(),
        crv: Some(key.curve().as_str().into()),
        x: Some(jwk::encode(&x)),
        y: Some(jwk::encode(&y)),
        ..Jwk::default()
    }
}

fn mismatched(format: KeyFormat) -> ProviderError {
    ProviderError::Data(format!("key data does not match the '{format}' format"))
}
