//! Software implementation of [`CryptoProvider`] on the RustCrypto crates.
//!
//! Symmetric material (AES, HMAC, KDF keys) is kept in a [`SecretMaterial`]
//! that is wiped on drop.  Asymmetric keys keep the curve or RSA crate's
//! own types, which zeroize their private scalars themselves.
//!
//! Usage and extractability rules follow WebCrypto:
//!
//! - a key is only usable for the operations in its usage set, and only
//!   with the algorithm it was created for (`InvalidAccess` otherwise);
//! - a secret key must be created with at least one usage (`Syntax`);
//! - generated pairs split the requested usages by role, and the public
//!   half is always extractable;
//! - only extractable keys can be exported or wrapped.

mod aes;
mod digest;
mod ec;
mod hmac;
mod jwk;
mod kdf;
mod rsa;

use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::alg::{AesKeyLength, AesMode, Algorithm, KeyFormat, KeyType, SecureHash, ShaVariant};
use crate::key::{CryptoKey, CryptoKeyPair, GeneratedKey, Jwk, KeyAlgorithm, KeyData};
use crate::params::{
    CipherAlgorithm, DeriveAlgorithm, DerivedKeyType, ImportAlgorithm, KeyGenAlgorithm,
    SignAlgorithm, WrapAlgorithm,
};
use crate::usages::KeyUsage;

use super::{CryptoProvider, ProviderError, ProviderResult};

use self::ec::{EcMaterial, EcPrivate};
use self::rsa::RsaMaterial;

/// Largest buffer `get_random_values` fills in one call.
pub const MAX_RANDOM_BYTES: usize = 65_536;

/// Raw symmetric key bytes, zeroed when the last handle drops.
#[derive(Zeroize)]
#[zeroize(drop)]
struct SecretMaterial {
    bytes: Vec<u8>,
}

impl SecretMaterial {
    fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// The bundled provider.  Stateless; clones are free.
#[derive(Debug, Default, Clone, Copy)]
pub struct SoftwareProvider;

impl SoftwareProvider {
    pub fn new() -> Self {
        Self
    }
}

// ---------------------------------------------------------------------------
// Usage rules
// ---------------------------------------------------------------------------

/// Every usage a key of `alg` may carry.
fn allowed_usages(alg: Algorithm) -> &'static [KeyUsage] {
    use KeyUsage::*;
    match alg {
        Algorithm::AesCbc | Algorithm::AesCtr | Algorithm::AesGcm | Algorithm::RsaOaep => {
            &[Encrypt, Decrypt, WrapKey, UnwrapKey]
        }
        Algorithm::AesKw => &[WrapKey, UnwrapKey],
        Algorithm::Hmac | Algorithm::Ecdsa | Algorithm::RsaPss | Algorithm::RsassaPkcs1V15 => {
            &[Sign, Verify]
        }
        Algorithm::Ecdh | Algorithm::Hkdf | Algorithm::Pbkdf2 => &[DeriveKey, DeriveBits],
    }
}

/// Dedupe `usages` and make sure each one is valid for `alg`.
fn checked_usages(alg: Algorithm, usages: &[KeyUsage]) -> ProviderResult<Vec<KeyUsage>> {
    let allowed = allowed_usages(alg);
    let mut out = Vec::with_capacity(usages.len());
    for usage in usages {
        if !allowed.contains(usage) {
            return Err(ProviderError::Syntax(format!(
                "usage '{usage}' is not valid for {alg}"
            )));
        }
        if !out.contains(usage) {
            out.push(*usage);
        }
    }
    Ok(out)
}

fn secret_usages(alg: Algorithm, usages: &[KeyUsage]) -> ProviderResult<Vec<KeyUsage>> {
    let usages = checked_usages(alg, usages)?;
    if usages.is_empty() {
        return Err(ProviderError::Syntax(format!(
            "a {alg} secret key needs at least one usage"
        )));
    }
    Ok(usages)
}

/// Split requested usages into (public, private) halves.
fn pair_usages(alg: Algorithm, usages: &[KeyUsage]) -> ProviderResult<(Vec<KeyUsage>, Vec<KeyUsage>)> {
    let (private, public): (Vec<_>, Vec<_>) = checked_usages(alg, usages)?
        .into_iter()
        .partition(KeyUsage::is_private_role);
    if private.is_empty() {
        return Err(ProviderError::Syntax(format!(
            "a {alg} private key needs at least one usage"
        )));
    }
    Ok((public, private))
}

/// Usages for an imported key.  The requested set is narrowed to the
/// key's role, so a pair's default usages can be passed for either half.
fn import_usages(alg: Algorithm, key_type: KeyType, usages: &[KeyUsage]) -> ProviderResult<Vec<KeyUsage>> {
    match key_type {
        KeyType::Secret => secret_usages(alg, usages),
        KeyType::Public => Ok(checked_usages(alg, usages)?
            .into_iter()
            .filter(|u| !u.is_private_role())
            .collect()),
        KeyType::Private => {
            let private: Vec<_> = checked_usages(alg, usages)?
                .into_iter()
                .filter(KeyUsage::is_private_role)
                .collect();
            if private.is_empty() {
                return Err(ProviderError::Syntax(format!(
                    "a {alg} private key needs at least one usage"
                )));
            }
            Ok(private)
        }
    }
}

/// The key must belong to `alg` and allow `usage`.
fn check_key(key: &CryptoKey, alg: Algorithm, usage: KeyUsage) -> ProviderResult<()> {
    let name = key.algorithm().name();
    if name != alg {
        return Err(ProviderError::InvalidAccess(format!(
            "{alg} cannot be used with a {name} key"
        )));
    }
    if !key.has_usage(usage) {
        return Err(ProviderError::InvalidAccess(format!(
            "key does not allow '{usage}'"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Material access
// ---------------------------------------------------------------------------

fn foreign() -> ProviderError {
    ProviderError::InvalidAccess("key was not created by the software provider".into())
}

fn secret_bytes(key: &CryptoKey) -> ProviderResult<&[u8]> {
    key.material::<SecretMaterial>()
        .map(SecretMaterial::as_bytes)
        .ok_or_else(foreign)
}

fn ec_material(key: &CryptoKey) -> ProviderResult<&EcMaterial> {
    key.material::<EcMaterial>().ok_or_else(foreign)
}

fn rsa_material(key: &CryptoKey) -> ProviderResult<&RsaMaterial> {
    key.material::<RsaMaterial>().ok_or_else(foreign)
}

fn rsa_hash(key: &CryptoKey) -> ProviderResult<SecureHash> {
    match key.algorithm() {
        KeyAlgorithm::Rsa { hash, .. } => Ok(*hash),
        _ => Err(foreign()),
    }
}

fn hmac_hash(key: &CryptoKey) -> ProviderResult<SecureHash> {
    match key.algorithm() {
        KeyAlgorithm::Hmac { hash, .. } => Ok(*hash),
        _ => Err(foreign()),
    }
}

fn wrong_half(op: &str, needed: KeyType) -> ProviderError {
    ProviderError::InvalidAccess(format!("{op} needs the {needed} key"))
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    bytes
}

// ---------------------------------------------------------------------------
// Unchecked cores shared by the public operations and wrap/unwrap/derive
// ---------------------------------------------------------------------------

fn encrypt_with(algorithm: &CipherAlgorithm, key: &CryptoKey, data: &[u8]) -> ProviderResult<Vec<u8>> {
    match algorithm {
        CipherAlgorithm::AesCbc(p) => aes::cbc_encrypt(secret_bytes(key)?, &p.iv, data),
        CipherAlgorithm::AesCtr(p) => aes::ctr_apply(secret_bytes(key)?, p, data),
        CipherAlgorithm::AesGcm(p) => aes::gcm_encrypt(secret_bytes(key)?, p, data),
        CipherAlgorithm::RsaOaep(p) => match rsa_material(key)? {
            RsaMaterial::Public(k) => rsa::oaep_encrypt(k, rsa_hash(key)?, p.label.as_deref(), data),
            RsaMaterial::Private(_) => Err(wrong_half("RSA-OAEP encryption", KeyType::Public)),
        },
    }
}

fn decrypt_with(algorithm: &CipherAlgorithm, key: &CryptoKey, data: &[u8]) -> ProviderResult<Vec<u8>> {
    match algorithm {
        CipherAlgorithm::AesCbc(p) => aes::cbc_decrypt(secret_bytes(key)?, &p.iv, data),
        CipherAlgorithm::AesCtr(p) => aes::ctr_apply(secret_bytes(key)?, p, data),
        CipherAlgorithm::AesGcm(p) => aes::gcm_decrypt(secret_bytes(key)?, p, data),
        CipherAlgorithm::RsaOaep(p) => match rsa_material(key)? {
            RsaMaterial::Private(k) => rsa::oaep_decrypt(k, rsa_hash(key)?, p.label.as_deref(), data),
            RsaMaterial::Public(_) => Err(wrong_half("RSA-OAEP decryption", KeyType::Private)),
        },
    }
}

fn derive_with(algorithm: &DeriveAlgorithm, base_key: &CryptoKey, length: u32) -> ProviderResult<Vec<u8>> {
    if length % 8 != 0 {
        return Err(ProviderError::Operation(format!(
            "derived length must be a multiple of 8 bits (got {length})"
        )));
    }
    let len = (length / 8) as usize;
    match algorithm {
        DeriveAlgorithm::Ecdh(params) => {
            let EcMaterial::Private(private) = ec_material(base_key)? else {
                return Err(wrong_half("ECDH", KeyType::Private));
            };
            let peer = &params.public;
            if peer.algorithm().name() != Algorithm::Ecdh || peer.key_type() != KeyType::Public {
                return Err(ProviderError::InvalidAccess(
                    "ECDH needs a public ECDH key from the peer".into(),
                ));
            }
            let EcMaterial::Public(public) = ec_material(peer)? else {
                return Err(wrong_half("ECDH peer", KeyType::Public));
            };
            let mut secret = private.shared_secret(public)?;
            if len > secret.len() {
                secret.zeroize();
                return Err(ProviderError::Operation(format!(
                    "ECDH on {} yields at most {} bits",
                    private.curve(),
                    secret.len() * 8
                )));
            }
            secret.truncate(len);
            Ok(secret)
        }
        DeriveAlgorithm::Hkdf(p) => {
            if len == 0 {
                return Err(ProviderError::Operation("HKDF length must be positive".into()));
            }
            kdf::hkdf(p.hash, secret_bytes(base_key)?, &p.salt, &p.info, len)
        }
        DeriveAlgorithm::Pbkdf2 {
            hash,
            salt,
            iterations,
        } => {
            if len == 0 {
                return Err(ProviderError::Operation("PBKDF2 length must be positive".into()));
            }
            kdf::pbkdf2(*hash, secret_bytes(base_key)?, salt, *iterations, len)
        }
    }
}

// ---------------------------------------------------------------------------
// Import / export of each key family
// ---------------------------------------------------------------------------

fn aes_jwk_alg(mode: AesMode, length: AesKeyLength) -> String {
    let suffix = match mode {
        AesMode::Cbc => "CBC",
        AesMode::Ctr => "CTR",
        AesMode::Gcm => "GCM",
        AesMode::Kw => "KW",
    };
    format!("A{}{suffix}", length.bits())
}

/// Pull symmetric key bytes out of `raw` or an `oct` JWK.
fn secret_key_bytes(format: KeyFormat, data: &KeyData, alg: Algorithm) -> ProviderResult<Zeroizing<Vec<u8>>> {
    match (format, data) {
        (KeyFormat::Raw, KeyData::Bytes(bytes)) => Ok(Zeroizing::new(bytes.clone())),
        (KeyFormat::Jwk, KeyData::Jwk(j)) => {
            jwk::expect_kty(j, "oct")?;
            Ok(Zeroizing::new(jwk::decode("k", j.k.as_ref())?))
        }
        (KeyFormat::Pkcs8 | KeyFormat::Spki, _) => Err(ProviderError::NotSupported(format!(
            "{alg} keys cannot be imported as {format}"
        ))),
        _ => Err(ProviderError::Data(format!(
            "key data does not match the '{format}' format"
        ))),
    }
}

fn import_aes(
    mode: AesMode,
    format: KeyFormat,
    data: &KeyData,
    extractable: bool,
    usages: &[KeyUsage],
) -> ProviderResult<CryptoKey> {
    let alg = mode.algorithm();
    let bytes = secret_key_bytes(format, data, alg)?;
    let length = AesKeyLength::try_from(bytes.len() as u32 * 8)
        .map_err(|_| ProviderError::Data(format!("invalid AES key length {} bytes", bytes.len())))?;
    let usages = secret_usages(alg, usages)?;
    if let KeyData::Jwk(j) = data {
        jwk::expect_alg(j, &aes_jwk_alg(mode, length))?;
        jwk::check_import(j, extractable, &usages)?;
    }
    Ok(CryptoKey::new(
        KeyAlgorithm::Aes { mode, length },
        extractable,
        KeyType::Secret,
        usages,
        SecretMaterial::new(bytes.to_vec()),
    ))
}

fn import_hmac(
    hash: SecureHash,
    length: Option<u32>,
    format: KeyFormat,
    data: &KeyData,
    extractable: bool,
    usages: &[KeyUsage],
) -> ProviderResult<CryptoKey> {
    let bytes = secret_key_bytes(format, data, Algorithm::Hmac)?;
    if bytes.is_empty() {
        return Err(ProviderError::Data("HMAC key must not be empty".into()));
    }
    let bits = bytes.len() as u32 * 8;
    if let Some(requested) = length {
        if requested != bits {
            return Err(ProviderError::Data(format!(
                "HMAC length {requested} does not match the {bits}-bit key"
            )));
        }
    }
    let usages = secret_usages(Algorithm::Hmac, usages)?;
    if let KeyData::Jwk(j) = data {
        jwk::expect_alg(j, hmac::jwk_alg(hash))?;
        jwk::check_import(j, extractable, &usages)?;
    }
    Ok(CryptoKey::new(
        KeyAlgorithm::Hmac { hash, length: bits },
        extractable,
        KeyType::Secret,
        usages,
        SecretMaterial::new(bytes.to_vec()),
    ))
}

fn secret_export(key: &CryptoKey, format: KeyFormat, jwk_alg: String) -> ProviderResult<KeyData> {
    let bytes = secret_bytes(key)?;
    match format {
        KeyFormat::Raw => Ok(KeyData::Bytes(bytes.to_vec())),
        KeyFormat::Jwk => Ok(KeyData::Jwk(Jwk {
            kty: "oct".into(),
            alg: Some(jwk_alg),
            k: Some(jwk::encode(bytes)),
            ..Jwk::default()
        })),
        KeyFormat::Pkcs8 | KeyFormat::Spki => Err(ProviderError::NotSupported(format!(
            "{} keys cannot be exported as {format}",
            key.algorithm().name()
        ))),
    }
}

/// Serialized form of an exported key, as the wrapping cipher sees it.
fn wrap_payload(exported: KeyData, algorithm: &WrapAlgorithm) -> ProviderResult<Zeroizing<Vec<u8>>> {
    match exported {
        KeyData::Bytes(bytes) => Ok(Zeroizing::new(bytes)),
        KeyData::Jwk(j) => {
            let mut json = Zeroizing::new(jwk::to_bytes(&j)?);
            // AES-KW needs whole 64-bit blocks; JSON tolerates trailing spaces.
            if *algorithm == WrapAlgorithm::AesKw {
                while json.len() % 8 != 0 {
                    json.push(b' ');
                }
            }
            Ok(json)
        }
    }
}

impl CryptoProvider for SoftwareProvider {
    fn encrypt(&self, algorithm: &CipherAlgorithm, key: &CryptoKey, data: &[u8]) -> ProviderResult<Vec<u8>> {
        check_key(key, algorithm.name(), KeyUsage::Encrypt)?;
        encrypt_with(algorithm, key, data)
    }

    fn decrypt(&self, algorithm: &CipherAlgorithm, key: &CryptoKey, data: &[u8]) -> ProviderResult<Vec<u8>> {
        check_key(key, algorithm.name(), KeyUsage::Decrypt)?;
        decrypt_with(algorithm, key, data)
    }

    fn sign(&self, algorithm: &SignAlgorithm, key: &CryptoKey, data: &[u8]) -> ProviderResult<Vec<u8>> {
        check_key(key, algorithm.name(), KeyUsage::Sign)?;
        match algorithm {
            SignAlgorithm::Hmac => hmac::sign(hmac_hash(key)?, secret_bytes(key)?, data),
            SignAlgorithm::Ecdsa(p) => match ec_material(key)? {
                EcMaterial::Private(k) => k.sign(p.hash, data),
                EcMaterial::Public(_) => Err(wrong_half("ECDSA signing", KeyType::Private)),
            },
            SignAlgorithm::RsaPss(p) => match rsa_material(key)? {
                RsaMaterial::Private(k) => rsa::pss_sign(k, rsa_hash(key)?, p.salt_length, data),
                RsaMaterial::Public(_) => Err(wrong_half("RSA-PSS signing", KeyType::Private)),
            },
            SignAlgorithm::RsassaPkcs1V15 => match rsa_material(key)? {
                RsaMaterial::Private(k) => rsa::pkcs1_sign(k, rsa_hash(key)?, data),
                RsaMaterial::Public(_) => Err(wrong_half("RSASSA-PKCS1-v1_5 signing", KeyType::Private)),
            },
        }
    }

    fn verify(
        &self,
        algorithm: &SignAlgorithm,
        key: &CryptoKey,
        signature: &[u8],
        data: &[u8],
    ) -> ProviderResult<bool> {
        check_key(key, algorithm.name(), KeyUsage::Verify)?;
        match algorithm {
            SignAlgorithm::Hmac => hmac::verify(hmac_hash(key)?, secret_bytes(key)?, signature, data),
            SignAlgorithm::Ecdsa(p) => match ec_material(key)? {
                EcMaterial::Public(k) => k.verify(p.hash, signature, data),
                EcMaterial::Private(_) => Err(wrong_half("ECDSA verification", KeyType::Public)),
            },
            SignAlgorithm::RsaPss(p) => match rsa_material(key)? {
                RsaMaterial::Public(k) => Ok(rsa::pss_verify(k, rsa_hash(key)?, p.salt_length, signature, data)),
                RsaMaterial::Private(_) => Err(wrong_half("RSA-PSS verification", KeyType::Public)),
            },
            SignAlgorithm::RsassaPkcs1V15 => match rsa_material(key)? {
                RsaMaterial::Public(k) => Ok(rsa::pkcs1_verify(k, rsa_hash(key)?, signature, data)),
                RsaMaterial::Private(_) => {
                    Err(wrong_half("RSASSA-PKCS1-v1_5 verification", KeyType::Public))
                }
            },
        }
    }

    fn derive_bits(&self, algorithm: &DeriveAlgorithm, base_key: &CryptoKey, length: u32) -> ProviderResult<Vec<u8>> {
        check_key(base_key, algorithm.name(), KeyUsage::DeriveBits)?;
        derive_with(algorithm, base_key, length)
    }

    fn derive_key(
        &self,
        algorithm: &DeriveAlgorithm,
        base_key: &CryptoKey,
        derived_key_type: &DerivedKeyType,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> ProviderResult<CryptoKey> {
        check_key(base_key, algorithm.name(), KeyUsage::DeriveKey)?;
        let bits = Zeroizing::new(derive_with(algorithm, base_key, derived_key_type.length_bits())?);
        let data = KeyData::Bytes(bits.to_vec());
        let key = self.import_key(
            KeyFormat::Raw,
            &data,
            &derived_key_type.import_algorithm(),
            extractable,
            usages,
        );
        if let KeyData::Bytes(mut b) = data {
            b.zeroize();
        }
        key
    }

    fn wrap_key(
        &self,
        format: KeyFormat,
        key: &CryptoKey,
        wrapping_key: &CryptoKey,
        algorithm: &WrapAlgorithm,
    ) -> ProviderResult<Vec<u8>> {
        check_key(wrapping_key, algorithm.name(), KeyUsage::WrapKey)?;
        let payload = wrap_payload(self.export_key(format, key)?, algorithm)?;
        match algorithm {
            WrapAlgorithm::AesKw => aes::kw_wrap(secret_bytes(wrapping_key)?, &payload),
            WrapAlgorithm::Cipher(cipher) => encrypt_with(cipher, wrapping_key, &payload),
        }
    }

    fn unwrap_key(
        &self,
        format: KeyFormat,
        wrapped_key: &[u8],
        unwrapping_key: &CryptoKey,
        unwrap_algorithm: &WrapAlgorithm,
        unwrapped_key_algorithm: &ImportAlgorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> ProviderResult<CryptoKey> {
        check_key(unwrapping_key, unwrap_algorithm.name(), KeyUsage::UnwrapKey)?;
        let payload = Zeroizing::new(match unwrap_algorithm {
            WrapAlgorithm::AesKw => aes::kw_unwrap(secret_bytes(unwrapping_key)?, wrapped_key)?,
            WrapAlgorithm::Cipher(cipher) => decrypt_with(cipher, unwrapping_key, wrapped_key)?,
        });
        let data = match format {
            KeyFormat::Jwk => KeyData::Jwk(jwk::from_bytes(&payload)?),
            _ => KeyData::Bytes(payload.to_vec()),
        };
        let key = self.import_key(format, &data, unwrapped_key_algorithm, extractable, usages);
        if let KeyData::Bytes(mut b) = data {
            b.zeroize();
        }
        key
    }

    fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> ProviderResult<KeyData> {
        if !key.extractable() {
            return Err(ProviderError::InvalidAccess("key is not extractable".into()));
        }
        let exported = match key.algorithm() {
            KeyAlgorithm::Aes { mode, length } => secret_export(key, format, aes_jwk_alg(*mode, *length))?,
            KeyAlgorithm::Hmac { hash, .. } => secret_export(key, format, hmac::jwk_alg(*hash).into())?,
            KeyAlgorithm::Kdf { variant } => {
                return Err(ProviderError::NotSupported(format!(
                    "{} key material cannot be exported",
                    variant.algorithm()
                )))
            }
            KeyAlgorithm::Rsa { variant, hash, .. } => match rsa::export(rsa_material(key)?, format)? {
                KeyData::Jwk(j) => KeyData::Jwk(Jwk {
                    alg: Some(rsa::jwk_alg(*variant, *hash).into()),
                    ..j
                }),
                bytes => bytes,
            },
            KeyAlgorithm::Ec { .. } => ec::export(ec_material(key)?, format)?,
        };
        Ok(match exported {
            KeyData::Jwk(j) => KeyData::Jwk(Jwk {
                key_ops: Some(key.usages().to_vec()),
                ext: Some(key.extractable()),
                ..j
            }),
            bytes => bytes,
        })
    }

    fn import_key(
        &self,
        format: KeyFormat,
        data: &KeyData,
        algorithm: &ImportAlgorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> ProviderResult<CryptoKey> {
        match algorithm {
            ImportAlgorithm::Aes(mode) => import_aes(*mode, format, data, extractable, usages),
            ImportAlgorithm::Hmac(p) => import_hmac(p.hash, p.length, format, data, extractable, usages),
            ImportAlgorithm::Kdf(variant) => {
                let alg = variant.algorithm();
                let KeyData::Bytes(bytes) = data else {
                    return Err(ProviderError::NotSupported(format!("{alg} keys can only be imported as raw")));
                };
                if format != KeyFormat::Raw {
                    return Err(ProviderError::NotSupported(format!("{alg} keys can only be imported as raw")));
                }
                if extractable {
                    return Err(ProviderError::Syntax(format!("{alg} key material cannot be extractable")));
                }
                let usages = secret_usages(alg, usages)?;
                Ok(CryptoKey::new(
                    KeyAlgorithm::Kdf { variant: *variant },
                    false,
                    KeyType::Secret,
                    usages,
                    SecretMaterial::new(bytes.clone()),
                ))
            }
            ImportAlgorithm::Rsa(variant, p) => {
                let alg = variant.algorithm();
                let material = rsa::parse(format, data)?;
                let key_type = material.key_type();
                let usages = import_usages(alg, key_type, usages)?;
                if let KeyData::Jwk(j) = data {
                    jwk::expect_alg(j, rsa::jwk_alg(*variant, p.hash))?;
                    jwk::check_import(j, extractable, &usages)?;
                }
                let algorithm = KeyAlgorithm::Rsa {
                    variant: *variant,
                    modulus_length: material.modulus_length(),
                    public_exponent: material.public_exponent(),
                    hash: p.hash,
                };
                Ok(CryptoKey::new(algorithm, extractable, key_type, usages, material))
            }
            ImportAlgorithm::Ec(variant, p) => {
                let alg = variant.algorithm();
                let material = ec::parse(p.named_curve, format, data)?;
                let key_type = material.key_type();
                let usages = import_usages(alg, key_type, usages)?;
                if let KeyData::Jwk(j) = data {
                    if alg == Algorithm::Ecdsa {
                        jwk::expect_alg(j, ec::ecdsa_jwk_alg(p.named_curve))?;
                    }
                    jwk::check_import(j, extractable, &usages)?;
                }
                let algorithm = KeyAlgorithm::Ec {
                    variant: *variant,
                    curve: p.named_curve,
                };
                Ok(CryptoKey::new(algorithm, extractable, key_type, usages, material))
            }
        }
    }

    fn generate_key(
        &self,
        algorithm: &KeyGenAlgorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> ProviderResult<GeneratedKey> {
        let alg = algorithm.name();
        match algorithm {
            KeyGenAlgorithm::Aes(mode, p) => {
                let usages = secret_usages(alg, usages)?;
                let material = SecretMaterial::new(random_bytes(p.length.bytes()));
                Ok(GeneratedKey::Secret(CryptoKey::new(
                    KeyAlgorithm::Aes {
                        mode: *mode,
                        length: p.length,
                    },
                    extractable,
                    KeyType::Secret,
                    usages,
                    material,
                )))
            }
            KeyGenAlgorithm::Hmac(p) => {
                let length = p.length.unwrap_or_else(|| p.hash.variant().block_bits());
                if length == 0 || length % 8 != 0 {
                    return Err(ProviderError::Operation(format!(
                        "HMAC key length must be a positive multiple of 8 bits (got {length})"
                    )));
                }
                let usages = secret_usages(alg, usages)?;
                let material = SecretMaterial::new(random_bytes(length as usize / 8));
                Ok(GeneratedKey::Secret(CryptoKey::new(
                    KeyAlgorithm::Hmac { hash: p.hash, length },
                    extractable,
                    KeyType::Secret,
                    usages,
                    material,
                )))
            }
            KeyGenAlgorithm::Rsa(variant, p) => {
                let (public_usages, private_usages) = pair_usages(alg, usages)?;
                let private = rsa::generate(p.modulus_length, &p.public_exponent)?;
                let public = RsaMaterial::Public(private.to_public_key());
                let algorithm = KeyAlgorithm::Rsa {
                    variant: *variant,
                    modulus_length: public.modulus_length(),
                    public_exponent: public.public_exponent(),
                    hash: p.hash,
                };
                Ok(GeneratedKey::Pair(CryptoKeyPair {
                    public_key: CryptoKey::new(
                        algorithm.clone(),
                        true,
                        KeyType::Public,
                        public_usages,
                        public,
                    ),
                    private_key: CryptoKey::new(
                        algorithm,
                        extractable,
                        KeyType::Private,
                        private_usages,
                        RsaMaterial::Private(private),
                    ),
                }))
            }
            KeyGenAlgorithm::Ec(variant, p) => {
                let (public_usages, private_usages) = pair_usages(alg, usages)?;
                let private = EcPrivate::generate(p.named_curve);
                let public = EcMaterial::Public(private.public_key());
                let algorithm = KeyAlgorithm::Ec {
                    variant: *variant,
                    curve: p.named_curve,
                };
                Ok(GeneratedKey::Pair(CryptoKeyPair {
                    public_key: CryptoKey::new(
                        algorithm.clone(),
                        true,
                        KeyType::Public,
                        public_usages,
                        public,
                    ),
                    private_key: CryptoKey::new(
                        algorithm,
                        extractable,
                        KeyType::Private,
                        private_usages,
                        EcMaterial::Private(private),
                    ),
                }))
            }
        }
    }

    fn digest(&self, algorithm: ShaVariant, data: &[u8]) -> ProviderResult<Vec<u8>> {
        Ok(digest::digest(algorithm, data))
    }

    fn get_random_values(&self, buf: &mut [u8]) -> ProviderResult<()> {
        if buf.len() > MAX_RANDOM_BYTES {
            return Err(ProviderError::Operation(format!(
                "at most {MAX_RANDOM_BYTES} random bytes per call (got {})",
                buf.len()
            )));
        }
        rand::rng().fill_bytes(buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alg::{EcVariant, KdfVariant, NamedCurve};
    use crate::params::{AesGcmParams, AesKeyGenParams, EcKeyGenParams, EcdsaParams, HmacKeyGenParams};

    fn aes_gcm_key(usages: &[KeyUsage]) -> CryptoKey {
        let alg = KeyGenAlgorithm::Aes(AesMode::Gcm, AesKeyGenParams::default());
        match SoftwareProvider.generate_key(&alg, true, usages).unwrap() {
            GeneratedKey::Secret(k) => k,
            GeneratedKey::Pair(_) => panic!("AES generates a secret key"),
        }
    }

    #[test]
    fn secret_key_needs_usages() {
        let alg = KeyGenAlgorithm::Aes(AesMode::Cbc, AesKeyGenParams::default());
        assert!(matches!(
            SoftwareProvider.generate_key(&alg, true, &[]),
            Err(ProviderError::Syntax(_))
        ));
        assert!(matches!(
            SoftwareProvider.generate_key(&alg, true, &[KeyUsage::Sign]),
            Err(ProviderError::Syntax(_))
        ));
    }

    #[test]
    fn usage_is_enforced() {
        let key = aes_gcm_key(&[KeyUsage::Encrypt]);
        let alg = CipherAlgorithm::AesGcm(AesGcmParams::new(vec![0u8; 12]));
        let ct = SoftwareProvider.encrypt(&alg, &key, b"hi").unwrap();
        assert!(matches!(
            SoftwareProvider.decrypt(&alg, &key, &ct),
            Err(ProviderError::InvalidAccess(_))
        ));
    }

    #[test]
    fn algorithm_must_match_key() {
        let key = aes_gcm_key(&[KeyUsage::Encrypt]);
        let alg = CipherAlgorithm::AesCbc(crate::params::AesCbcParams::new(vec![0u8; 16]));
        assert!(matches!(
            SoftwareProvider.encrypt(&alg, &key, b"hi"),
            Err(ProviderError::InvalidAccess(_))
        ));
    }

    #[test]
    fn pair_usages_are_split_by_role() {
        let alg = KeyGenAlgorithm::Ec(EcVariant::Ecdsa, EcKeyGenParams { named_curve: NamedCurve::P256 });
        let GeneratedKey::Pair(pair) = SoftwareProvider
            .generate_key(&alg, false, &[KeyUsage::Sign, KeyUsage::Verify])
            .unwrap()
        else {
            panic!("ECDSA generates a pair");
        };
        assert_eq!(pair.private_key.usages(), &[KeyUsage::Sign]);
        assert_eq!(pair.public_key.usages(), &[KeyUsage::Verify]);
        assert!(pair.public_key.extractable());
        assert!(!pair.private_key.extractable());

        let sig = SoftwareProvider
            .sign(&SignAlgorithm::Ecdsa(EcdsaParams::default()), &pair.private_key, b"m")
            .unwrap();
        assert!(SoftwareProvider
            .verify(&SignAlgorithm::Ecdsa(EcdsaParams::default()), &pair.public_key, &sig, b"m")
            .unwrap());
    }

    #[test]
    fn non_extractable_cannot_export() {
        let alg = KeyGenAlgorithm::Hmac(HmacKeyGenParams::default());
        let GeneratedKey::Secret(key) = SoftwareProvider
            .generate_key(&alg, false, &[KeyUsage::Sign])
            .unwrap()
        else {
            panic!("HMAC generates a secret key");
        };
        assert!(matches!(
            SoftwareProvider.export_key(KeyFormat::Raw, &key),
            Err(ProviderError::InvalidAccess(_))
        ));
    }

    #[test]
    fn kdf_material_must_not_be_extractable() {
        let alg = ImportAlgorithm::Kdf(KdfVariant::Hkdf);
        let data = KeyData::Bytes(vec![1, 2, 3]);
        assert!(matches!(
            SoftwareProvider.import_key(KeyFormat::Raw, &data, &alg, true, &[KeyUsage::DeriveBits]),
            Err(ProviderError::Syntax(_))
        ));
        assert!(SoftwareProvider
            .import_key(KeyFormat::Raw, &data, &alg, false, &[KeyUsage::DeriveBits])
            .is_ok());
    }

    #[test]
    fn random_values_are_capped() {
        let mut small = [0u8; 32];
        SoftwareProvider.get_random_values(&mut small).unwrap();
        assert_ne!(small, [0u8; 32]);
        let mut big = vec![0u8; MAX_RANDOM_BYTES + 1];
        assert!(SoftwareProvider.get_random_values(&mut big).is_err());
    }

    #[test]
    fn aes_jwk_alg_names() {
        assert_eq!(aes_jwk_alg(AesMode::Kw, AesKeyLength::Aes128), "A128KW");
        assert_eq!(aes_jwk_alg(AesMode::Gcm, AesKeyLength::Aes256), "A256GCM");
    }
}
