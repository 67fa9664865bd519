//! Integration tests for the AES facades and their key views.

use webcrypto::alg::{AesKeyLength, AesMode, KeyFormat};
use webcrypto::params::{AesCbcParams, AesGcmParams, AesKeyGenParams, ImportAlgorithm};
use webcrypto::{KeyData, KeyUsage, WebCrypto, WebCryptoError};

fn aes128() -> AesKeyGenParams {
    AesKeyGenParams {
        length: AesKeyLength::Aes128,
    }
}

// ---------------------------------------------------------------------------
// Round trips through export and import
// ---------------------------------------------------------------------------

#[test]
fn cbc_roundtrip_through_raw_export() {
    let crypto = WebCrypto::software();
    let cbc = crypto.aes_cbc();
    let key = cbc.generate_key(AesKeyGenParams::default(), true, None).unwrap();

    let raw = key.export_key(KeyFormat::Raw).unwrap();
    assert_eq!(raw.as_bytes().unwrap().len(), 32);
    let imported = cbc.import_key(KeyFormat::Raw, &raw, true, None).unwrap();

    let params = AesCbcParams::new(crypto.random().iv().unwrap());
    let ct = key.encrypt(&params, b"attack at dawn").unwrap();
    assert_eq!(ct.len(), 16);
    assert_eq!(imported.decrypt(&params, &ct).unwrap(), b"attack at dawn");
}

#[test]
fn ctr_roundtrip_through_jwk_export() {
    let crypto = WebCrypto::software();
    let ctr = crypto.aes_ctr();
    let key = ctr.generate_key(aes128(), true, None).unwrap();

    let jwk = key.export_key(KeyFormat::Jwk).unwrap();
    assert_eq!(jwk.as_jwk().unwrap().alg.as_deref(), Some("A128CTR"));
    let imported = ctr.import_key(KeyFormat::Jwk, &jwk, true, None).unwrap();

    let params = ctr.params().unwrap();
    let message = b"counter mode keeps the length";
    let ct = ctr.encrypt(&params, key.crypto_key(), message).unwrap();
    assert_eq!(ct.len(), message.len());
    assert_eq!(imported.decrypt(&params, &ct).unwrap(), message);
}

#[test]
fn gcm_roundtrip_with_additional_data() {
    let crypto = WebCrypto::software();
    let gcm = crypto.aes_gcm();
    let key = gcm.generate_key(AesKeyGenParams::default(), true, None).unwrap();
    let imported = gcm
        .import_key(KeyFormat::Raw, &key.export_key(KeyFormat::Raw).unwrap(), false, None)
        .unwrap();
    assert!(!imported.extractable());

    let params = AesGcmParams::new(crypto.random().iv_with_length(12).unwrap())
        .with_additional_data(b"header".to_vec());
    let ct = key.encrypt(&params, b"body").unwrap();
    assert_eq!(imported.decrypt(&params, &ct).unwrap(), b"body");

    let wrong_aad = AesGcmParams::new(params.iv.clone()).with_additional_data(b"HEADER".to_vec());
    assert!(imported.decrypt(&wrong_aad, &ct).is_err());
}

#[test]
fn brown_fox_scenario() {
    let crypto = WebCrypto::software();
    let key = crypto
        .aes_gcm()
        .generate_key(
            AesKeyGenParams {
                length: AesKeyLength::Aes256,
            },
            true,
            None,
        )
        .unwrap();
    let message = "brown fox fox fox fox fox fox fox fox fox";
    let params = AesGcmParams::new(crypto.random().iv().unwrap());
    assert_eq!(params.iv.len(), 16);

    let ct = key.encrypt(&params, message.as_bytes()).unwrap();
    let pt = key.decrypt(&params, &ct).unwrap();
    assert_eq!(String::from_utf8(pt).unwrap(), message);
}

// ---------------------------------------------------------------------------
// JWK stability
// ---------------------------------------------------------------------------

#[test]
fn jwk_export_import_export_is_identical() {
    let crypto = WebCrypto::software();
    let gcm = crypto.aes_gcm();
    let key = gcm.generate_key(AesKeyGenParams::default(), true, None).unwrap();

    let first = key.export_key(KeyFormat::Jwk).unwrap();
    let again = gcm
        .import_key(KeyFormat::Jwk, &first, true, None)
        .unwrap()
        .export_key(KeyFormat::Jwk)
        .unwrap();

    let a = serde_json::to_string(first.as_jwk().unwrap()).unwrap();
    let b = serde_json::to_string(again.as_jwk().unwrap()).unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Key wrapping
// ---------------------------------------------------------------------------

#[test]
fn kw_wraps_a_dek_as_jwk() {
    let crypto = WebCrypto::software();
    let kek = crypto.aes_kw().generate_key(AesKeyGenParams::default(), false, None).unwrap();
    assert_eq!(kek.usages(), &[KeyUsage::WrapKey, KeyUsage::UnwrapKey]);
    let dek = crypto.aes_gcm().generate_key(AesKeyGenParams::default(), true, None).unwrap();

    let wrapped = kek.wrap_key(KeyFormat::Jwk, dek.crypto_key()).unwrap();
    assert_eq!(wrapped.len() % 8, 0);

    let unwrapped = kek
        .unwrap_key(
            KeyFormat::Jwk,
            &wrapped,
            &ImportAlgorithm::Aes(AesMode::Gcm),
            true,
            None,
        )
        .unwrap();
    assert_eq!(unwrapped.usages(), &[KeyUsage::Encrypt, KeyUsage::Decrypt]);
    assert_eq!(
        crypto.aes_gcm().export_key(KeyFormat::Jwk, &unwrapped).unwrap(),
        dek.export_key(KeyFormat::Jwk).unwrap()
    );
}

#[test]
fn kw_wraps_raw_keys() {
    let crypto = WebCrypto::software();
    let kw = crypto.aes_kw();
    let kek = kw.generate_key(aes128(), false, None).unwrap();
    let dek = crypto.aes_cbc().generate_key(aes128(), true, None).unwrap();

    let wrapped = kw.wrap_key(KeyFormat::Raw, dek.crypto_key(), kek.crypto_key()).unwrap();
    assert_eq!(wrapped.len(), 16 + 8);
    let unwrapped = kw
        .unwrap_key(
            KeyFormat::Raw,
            &wrapped,
            kek.crypto_key(),
            &ImportAlgorithm::Aes(AesMode::Cbc),
            true,
            Some(&[KeyUsage::Decrypt]),
        )
        .unwrap();
    assert_eq!(unwrapped.usages(), &[KeyUsage::Decrypt]);
}

#[test]
fn gcm_key_can_wrap_when_allowed() {
    let crypto = WebCrypto::software();
    let gcm = crypto.aes_gcm();
    let dek = crypto.aes_ctr().generate_key(aes128(), true, None).unwrap();
    let params = AesGcmParams::new(crypto.random().iv_with_length(12).unwrap());

    let default_usages = gcm.generate_key(AesKeyGenParams::default(), true, None).unwrap();
    let err = default_usages
        .wrap_key(KeyFormat::Raw, dek.crypto_key(), &params)
        .unwrap_err();
    assert!(matches!(err, WebCryptoError::Provider(_)), "{err}");

    let kek = gcm
        .generate_key(
            AesKeyGenParams::default(),
            false,
            Some(&[KeyUsage::WrapKey, KeyUsage::UnwrapKey]),
        )
        .unwrap();
    let wrapped = kek.wrap_key(KeyFormat::Jwk, dek.crypto_key(), &params).unwrap();
    let unwrapped = kek
        .unwrap_key(
            KeyFormat::Jwk,
            &wrapped,
            &params,
            &ImportAlgorithm::Aes(AesMode::Ctr),
            true,
            None,
        )
        .unwrap();
    assert_eq!(
        crypto.aes_ctr().export_key(KeyFormat::Raw, &unwrapped).unwrap(),
        dek.export_key(KeyFormat::Raw).unwrap()
    );
}

#[test]
fn non_extractable_keys_cannot_be_wrapped() {
    let crypto = WebCrypto::software();
    let kek = crypto.aes_kw().generate_key(AesKeyGenParams::default(), false, None).unwrap();
    let dek = crypto.aes_gcm().generate_key(AesKeyGenParams::default(), false, None).unwrap();
    assert!(kek.wrap_key(KeyFormat::Raw, dek.crypto_key()).is_err());
    assert!(dek.export_key(KeyFormat::Raw).is_err());
}

// ---------------------------------------------------------------------------
// Counters and misuse
// ---------------------------------------------------------------------------

#[test]
fn ctr_counter_layout() {
    let crypto = WebCrypto::software();
    let ctr = crypto.aes_ctr();
    for length in [1usize, 8, 12, 16] {
        let counter = ctr.generate_counter(length).unwrap();
        assert_eq!(counter.len(), 16);
        assert_eq!(counter[15], 1);
    }
    assert!(matches!(
        ctr.generate_counter(0),
        Err(WebCryptoError::InvalidParameter(_))
    ));
    assert!(matches!(
        ctr.generate_counter(17),
        Err(WebCryptoError::InvalidParameter(_))
    ));
    assert_eq!(ctr.params().unwrap().length, 64);
}

#[test]
fn key_from_another_mode_is_refused() {
    let crypto = WebCrypto::software();
    let cbc_key = crypto.aes_cbc().generate_key(AesKeyGenParams::default(), true, None).unwrap();
    let params = AesGcmParams::new(vec![0u8; 12]);
    let err = crypto
        .aes_gcm()
        .encrypt(&params, cbc_key.crypto_key(), b"data")
        .unwrap_err();
    assert!(err.to_string().starts_with("InvalidAccessError"), "{err}");
}

#[test]
fn raw_import_picks_length_from_bytes() {
    let crypto = WebCrypto::software();
    let key = crypto
        .aes_gcm()
        .import_key(KeyFormat::Raw, &KeyData::Bytes(vec![7u8; 24]), true, None)
        .unwrap();
    assert_eq!(
        key.algorithm(),
        &webcrypto::KeyAlgorithm::Aes {
            mode: AesMode::Gcm,
            length: AesKeyLength::Aes192
        }
    );
    assert!(crypto
        .aes_gcm()
        .import_key(KeyFormat::Raw, &KeyData::Bytes(vec![7u8; 20]), true, None)
        .is_err());
}
