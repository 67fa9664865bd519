//! HMAC and digest facades against published vectors.

use webcrypto::alg::{KeyFormat, SecureHash, ShaVariant};
use webcrypto::params::{HmacImportParams, HmacKeyGenParams};
use webcrypto::sha::hexify;
use webcrypto::{KeyAlgorithm, KeyData, KeyUsage, WebCrypto};

#[test]
fn sha_abc_vectors() {
    let crypto = WebCrypto::software();
    let cases = [
        (ShaVariant::Sha1, "a9993e364706816aba3e25717850c26c9cd0d89d"),
        (
            ShaVariant::Sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        ),
        (
            ShaVariant::Sha384,
            "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7",
        ),
        (
            ShaVariant::Sha512,
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
        ),
    ];
    for (variant, expected) in cases {
        assert_eq!(crypto.sha(variant).hex_digest(b"abc").unwrap(), expected, "{variant:?}");
    }
}

#[test]
fn named_sha_accessors_match_variants() {
    let crypto = WebCrypto::software();
    assert_eq!(crypto.sha1().variant(), ShaVariant::Sha1);
    assert_eq!(crypto.sha256().variant(), ShaVariant::Sha256);
    assert_eq!(crypto.sha384().variant(), ShaVariant::Sha384);
    assert_eq!(crypto.sha512().variant(), ShaVariant::Sha512);
    assert_eq!(crypto.sha512().digest(b"").unwrap().len(), 64);
}

#[test]
fn hexify_is_lowercase_and_padded() {
    assert_eq!(hexify(&[0x00, 0x0a, 0xff]), "000aff");
    assert_eq!(hexify(&[]), "");
}

#[test]
fn hmac_rfc4231_case_2() {
    let crypto = WebCrypto::software();
    let key = crypto
        .hmac()
        .import_key(
            KeyFormat::Raw,
            &KeyData::Bytes(b"Jefe".to_vec()),
            HmacImportParams {
                hash: SecureHash::Sha256,
                length: None,
            },
            false,
            None,
        )
        .unwrap();
    assert_eq!(
        key.algorithm(),
        &KeyAlgorithm::Hmac {
            hash: SecureHash::Sha256,
            length: 32
        }
    );
    let tag = key.sign(b"what do ya want for nothing?").unwrap();
    assert_eq!(
        hexify(&tag),
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
    );
}

#[test]
fn hmac_detects_tampering() {
    let crypto = WebCrypto::software();
    let hmac = crypto.hmac();
    let key = hmac
        .generate_key(
            HmacKeyGenParams {
                hash: SecureHash::Sha384,
                length: Some(384),
            },
            true,
            None,
        )
        .unwrap();
    let mut tag = key.sign(b"ledger entry").unwrap();
    assert_eq!(tag.len(), 48);
    assert!(hmac.verify(key.crypto_key(), &tag, b"ledger entry").unwrap());
    tag[0] ^= 1;
    assert!(!key.verify(&tag, b"ledger entry").unwrap());
    assert!(!key.verify(&tag[..47], b"ledger entry").unwrap());
}

#[test]
fn hmac_jwk_roundtrip() {
    let crypto = WebCrypto::software();
    let hmac = crypto.hmac();
    let key = hmac
        .generate_key(HmacKeyGenParams::default(), true, Some(&[KeyUsage::Sign]))
        .unwrap();
    let jwk = key.export_key(KeyFormat::Jwk).unwrap();
    assert_eq!(jwk.as_jwk().unwrap().alg.as_deref(), Some("HS512"));

    let imported = hmac
        .import_key(KeyFormat::Jwk, &jwk, HmacImportParams::default(), true, Some(&[KeyUsage::Sign]))
        .unwrap();
    assert_eq!(imported.sign(b"m").unwrap(), key.sign(b"m").unwrap());
}

#[test]
fn sign_only_key_cannot_verify() {
    let crypto = WebCrypto::software();
    let key = crypto
        .hmac()
        .generate_key(HmacKeyGenParams::default(), false, Some(&[KeyUsage::Sign]))
        .unwrap();
    let tag = key.sign(b"m").unwrap();
    let err = key.verify(&tag, b"m").unwrap_err();
    assert!(err.to_string().contains("verify"), "{err}");
}
