//! Integration tests for the EC and RSA facades.

use webcrypto::alg::{AesMode, KeyFormat, NamedCurve, SecureHash};
use webcrypto::params::{
    AesKeyGenParams, DerivedKeyType, EcKeyGenParams, EcKeyImportParams, EcdsaParams,
    ImportAlgorithm, RsaHashedImportParams, RsaHashedKeyGenParams, RsaOaepParams, RsaPssParams,
};
use webcrypto::{KeyData, KeyUsage, WebCrypto};

fn rsa2048(hash: SecureHash) -> RsaHashedKeyGenParams {
    RsaHashedKeyGenParams {
        modulus_length: 2048,
        hash,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// ECDSA
// ---------------------------------------------------------------------------

#[test]
fn ecdsa_default_curve_is_p521() {
    let crypto = WebCrypto::software();
    let pair = crypto
        .ecdsa()
        .generate_key_pair(EcKeyGenParams::default(), true, None)
        .unwrap();
    let sig = pair.private_key.sign(EcdsaParams::default(), b"message").unwrap();
    assert_eq!(sig.len(), 132);
    assert!(pair
        .public_key
        .verify(EcdsaParams::default(), &sig, b"message")
        .unwrap());
}

#[test]
fn ecdsa_jwk_roundtrip_keeps_signatures_valid() {
    let crypto = WebCrypto::software();
    let ecdsa = crypto.ecdsa();
    let pair = ecdsa
        .generate_key_pair(EcKeyGenParams { named_curve: NamedCurve::P384 }, true, None)
        .unwrap();
    let import = EcKeyImportParams {
        named_curve: NamedCurve::P384,
    };

    let private_jwk = pair.private_key.export_key(KeyFormat::Jwk).unwrap();
    let private = ecdsa
        .import_key(KeyFormat::Jwk, &private_jwk, import, true, None)
        .unwrap()
        .private()
        .expect("JWK with d is private");
    assert_eq!(private.usages(), &[KeyUsage::Sign]);
    assert_eq!(private.export_key(KeyFormat::Jwk).unwrap(), private_jwk);

    let raw = pair.public_key.export_key(KeyFormat::Raw).unwrap();
    assert_eq!(raw.as_bytes().unwrap().len(), 1 + 2 * 48);
    let public = ecdsa
        .import_key(KeyFormat::Raw, &raw, import, true, None)
        .unwrap()
        .public()
        .expect("raw is public");

    let params = EcdsaParams {
        hash: SecureHash::Sha384,
    };
    let sig = private.sign(params, b"payload").unwrap();
    assert!(public.verify(params, &sig, b"payload").unwrap());
    assert!(!public.verify(params, &sig, b"other").unwrap());
}

#[test]
fn ecdsa_import_with_wrong_curve_fails() {
    let crypto = WebCrypto::software();
    let ecdsa = crypto.ecdsa();
    let pair = ecdsa
        .generate_key_pair(EcKeyGenParams { named_curve: NamedCurve::P256 }, true, None)
        .unwrap();
    let spki = pair.public_key.export_key(KeyFormat::Spki).unwrap();
    let result = ecdsa.import_key(
        KeyFormat::Spki,
        &spki,
        EcKeyImportParams {
            named_curve: NamedCurve::P384,
        },
        true,
        None,
    );
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// ECDH
// ---------------------------------------------------------------------------

#[test]
fn ecdh_agreement_is_symmetric() {
    let crypto = WebCrypto::software();
    let ecdh = crypto.ecdh();
    let params = EcKeyGenParams {
        named_curve: NamedCurve::P521,
    };
    let alice = ecdh.generate_key_pair(params, true, None).unwrap();
    let bob = ecdh.generate_key_pair(params, true, None).unwrap();

    let ab = alice.private_key.derive_bits(bob.public_key.crypto_key(), 528).unwrap();
    let ba = bob.private_key.derive_bits(alice.public_key.crypto_key(), 528).unwrap();
    assert_eq!(ab.len(), 66);
    assert_eq!(ab, ba);

    assert!(alice
        .private_key
        .derive_bits(bob.public_key.crypto_key(), 536)
        .is_err());
}

#[test]
fn ecdh_derived_hmac_keys_agree() {
    let crypto = WebCrypto::software();
    let ecdh = crypto.ecdh();
    let params = EcKeyGenParams {
        named_curve: NamedCurve::P256,
    };
    let alice = ecdh.generate_key_pair(params, true, None).unwrap();
    let bob = ecdh.generate_key_pair(params, true, None).unwrap();

    let target = DerivedKeyType::Hmac(webcrypto::params::HmacKeyGenParams {
        hash: SecureHash::Sha256,
        length: Some(256),
    });
    let a = ecdh
        .derive_key(
            bob.public_key.crypto_key(),
            alice.private_key.crypto_key(),
            &target,
            false,
            None,
        )
        .unwrap()
        .into_hmac()
        .unwrap();
    let b = bob
        .private_key
        .derive_key(alice.public_key.crypto_key(), &target, false, None)
        .unwrap()
        .into_hmac()
        .unwrap();
    let tag = a.sign(b"hello").unwrap();
    assert!(b.verify(&tag, b"hello").unwrap());
}

#[test]
fn ecdh_refuses_a_private_peer() {
    let crypto = WebCrypto::software();
    let ecdh = crypto.ecdh();
    let params = EcKeyGenParams {
        named_curve: NamedCurve::P256,
    };
    let alice = ecdh.generate_key_pair(params, true, None).unwrap();
    let bob = ecdh.generate_key_pair(params, true, None).unwrap();
    let err = alice
        .private_key
        .derive_bits(bob.private_key.crypto_key(), 128)
        .unwrap_err();
    assert!(err.to_string().starts_with("InvalidAccessError"), "{err}");
}

// ---------------------------------------------------------------------------
// RSA
// ---------------------------------------------------------------------------

#[test]
fn rsa_oaep_encrypts_and_wraps() {
    let crypto = WebCrypto::software();
    let oaep = crypto.rsa_oaep();
    let pair = oaep
        .generate_key_pair(
            rsa2048(SecureHash::Sha256),
            true,
            Some(&[
                KeyUsage::Encrypt,
                KeyUsage::Decrypt,
                KeyUsage::WrapKey,
                KeyUsage::UnwrapKey,
            ]),
        )
        .unwrap();
    assert_eq!(pair.public_key.usages(), &[KeyUsage::Encrypt, KeyUsage::WrapKey]);
    assert_eq!(pair.private_key.usages(), &[KeyUsage::Decrypt, KeyUsage::UnwrapKey]);

    let params = RsaOaepParams::default();
    let ct = pair.public_key.encrypt(&params, b"short secret").unwrap();
    assert_eq!(ct.len(), 256);
    assert_eq!(pair.private_key.decrypt(&params, &ct).unwrap(), b"short secret");

    let dek = crypto
        .aes_kw()
        .generate_key(AesKeyGenParams::default(), true, None)
        .unwrap();
    let wrapped = pair
        .public_key
        .wrap_key(KeyFormat::Raw, dek.crypto_key(), &params)
        .unwrap();
    let unwrapped = pair
        .private_key
        .unwrap_key(
            KeyFormat::Raw,
            &wrapped,
            &params,
            &ImportAlgorithm::Aes(AesMode::Kw),
            true,
            None,
        )
        .unwrap();
    assert_eq!(unwrapped.usages(), &[KeyUsage::WrapKey, KeyUsage::UnwrapKey]);
    assert_eq!(
        crypto.aes_kw().export_key(KeyFormat::Raw, &unwrapped).unwrap(),
        dek.export_key(KeyFormat::Raw).unwrap()
    );

    let spki = pair.public_key.export_key(KeyFormat::Spki).unwrap();
    let public = oaep
        .import_key(
            KeyFormat::Spki,
            &spki,
            RsaHashedImportParams {
                hash: SecureHash::Sha256,
            },
            true,
            None,
        )
        .unwrap()
        .public()
        .unwrap();
    let ct = public.encrypt(&params, b"again").unwrap();
    assert_eq!(pair.private_key.decrypt(&params, &ct).unwrap(), b"again");
}

#[test]
fn rsa_pss_sign_verify_and_jwk() {
    let crypto = WebCrypto::software();
    let pss = crypto.rsa_pss();
    let pair = pss
        .generate_key_pair(rsa2048(SecureHash::Sha512), true, None)
        .unwrap();
    let params = RsaPssParams { salt_length: 64 };
    let sig = pair.private_key.sign(params, b"contract").unwrap();
    assert!(pair.public_key.verify(params, &sig, b"contract").unwrap());
    assert!(!pair.public_key.verify(params, &sig, b"contracT").unwrap());

    let jwk = pair.private_key.export_key(KeyFormat::Jwk).unwrap();
    let parsed = jwk.as_jwk().unwrap();
    assert_eq!(parsed.kty, "RSA");
    assert_eq!(parsed.alg.as_deref(), Some("PS512"));
    assert_eq!(parsed.e.as_deref(), Some("AQAB"));

    let reimported = pss
        .import_key(KeyFormat::Jwk, &jwk, RsaHashedImportParams::default(), true, None)
        .unwrap()
        .private()
        .unwrap();
    let sig = reimported.sign(params, b"contract").unwrap();
    assert!(pair.public_key.verify(params, &sig, b"contract").unwrap());
}

#[test]
fn rsassa_pkcs1_v1_5_pkcs8_roundtrip() {
    let crypto = WebCrypto::software();
    let rsa = crypto.rsassa_pkcs1_v1_5();
    let pair = rsa
        .generate_key_pair(rsa2048(SecureHash::Sha256), true, None)
        .unwrap();
    let pkcs8 = pair.private_key.export_key(KeyFormat::Pkcs8).unwrap();
    assert!(matches!(pkcs8, KeyData::Bytes(_)));

    let private = rsa
        .import_key(
            KeyFormat::Pkcs8,
            &pkcs8,
            RsaHashedImportParams {
                hash: SecureHash::Sha256,
            },
            false,
            None,
        )
        .unwrap()
        .private()
        .unwrap();
    assert!(!private.extractable());
    assert_eq!(private.sign(b"x").unwrap(), pair.private_key.sign(b"x").unwrap());
    assert!(pair
        .public_key
        .verify(&private.sign(b"x").unwrap(), b"x")
        .unwrap());
}
