//! One context and one key shared across threads.

use std::collections::HashSet;
use std::thread;

use webcrypto::alg::SecureHash;
use webcrypto::params::{AesGcmParams, AesKeyGenParams, HmacKeyGenParams};
use webcrypto::WebCrypto;

#[test]
fn views_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebCrypto>();
    assert_send_sync::<webcrypto::CryptoKey>();
    assert_send_sync::<webcrypto::aes::AesGcmKey>();
    assert_send_sync::<webcrypto::ec::EcdsaPrivateKey>();
    assert_send_sync::<webcrypto::kdf::Pbkdf2Key>();
}

#[test]
fn one_gcm_key_across_threads() {
    let crypto = WebCrypto::software();
    let key = crypto
        .aes_gcm()
        .generate_key(AesKeyGenParams::default(), false, None)
        .unwrap();

    thread::scope(|s| {
        for i in 0..8u8 {
            let key = &key;
            let crypto = &crypto;
            s.spawn(move || {
                let params = AesGcmParams {
                    iv: crypto.random().iv_with_length(12).unwrap(),
                    ..Default::default()
                };
                let msg = vec![i; 100];
                let ct = key.encrypt(&params, &msg).unwrap();
                assert_eq!(key.decrypt(&params, &ct).unwrap(), msg);
            });
        }
    });
}

#[test]
fn hmac_tags_agree_across_threads() {
    let crypto = WebCrypto::software();
    let key = crypto
        .hmac()
        .generate_key(
            HmacKeyGenParams {
                hash: SecureHash::Sha256,
                length: None,
            },
            false,
            None,
        )
        .unwrap();
    let expected = key.sign(b"shared message").unwrap();

    let tags: Vec<Vec<u8>> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let key = key.clone();
                s.spawn(move || key.sign(b"shared message").unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(tags.iter().all(|t| *t == expected));
}

#[test]
fn uuids_from_many_threads_are_distinct() {
    let crypto = WebCrypto::software();
    let ids: HashSet<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| crypto.random().uuid().unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(ids.len(), 8);
}
