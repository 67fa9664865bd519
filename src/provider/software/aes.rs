//! AES in CBC, CTR, GCM and key-wrap modes.
//!
//! Every function takes the raw key bytes; the key size picks AES-128,
//! AES-192 or AES-256.
//!
//! - CBC uses PKCS#7 padding, so ciphertext is always a whole number of
//!   blocks.
//! - CTR treats the rightmost `length` bits of the counter block as the
//!   counter and leaves the rest untouched.
//! - GCM appends the tag to the ciphertext; 12- and 16-byte IVs and tags
//!   of 96 to 128 bits are supported.
//! - KW is RFC 3394 without padding.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes_gcm::aead::consts::{U12, U13, U14, U15, U16};
use aes_gcm::aead::{Aead, Payload};
use aes_gcm::{AesGcm, Nonce};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::params::{AesCtrParams, AesGcmParams};
use crate::provider::{ProviderError, ProviderResult};

/// AES block size in bytes.
const BLOCK_LEN: usize = 16;

/// Run `$body` with `$cipher` bound to the AES variant matching the key size.
macro_rules! with_aes {
    ($key:expr, $cipher:ident => $body:expr) => {
        match $key.len() {
            16 => {
                type $cipher = aes::Aes128;
                $body
            }
            24 => {
                type $cipher = aes::Aes192;
                $body
            }
            32 => {
                type $cipher = aes::Aes256;
                $body
            }
            n => Err(ProviderError::Data(format!(
                "AES key must be 16, 24 or 32 bytes (got {n})"
            ))),
        }
    };
}

// ---------------------------------------------------------------------------
// CBC
// ---------------------------------------------------------------------------

pub(super) fn cbc_encrypt(key: &[u8], iv: &[u8], data: &[u8]) -> ProviderResult<Vec<u8>> {
    check_iv(iv)?;
    with_aes!(key, Cipher => {
        let enc = cbc::Encryptor::<Cipher>::new_from_slices(key, iv)
            .map_err(|e| ProviderError::Operation(format!("AES-CBC init: {e}")))?;
        Ok(enc.encrypt_padded_vec_mut::<Pkcs7>(data))
    })
}

pub(super) fn cbc_decrypt(key: &[u8], iv: &[u8], data: &[u8]) -> ProviderResult<Vec<u8>> {
    check_iv(iv)?;
    if data.is_empty() || data.len() % BLOCK_LEN != 0 {
        return Err(ProviderError::Operation(
            "AES-CBC ciphertext must be a non-empty multiple of 16 bytes".into(),
        ));
    }
    with_aes!(key, Cipher => {
        let dec = cbc::Decryptor::<Cipher>::new_from_slices(key, iv)
            .map_err(|e| ProviderError::Operation(format!("AES-CBC init: {e}")))?;
        dec.decrypt_padded_vec_mut::<Pkcs7>(data)
            .map_err(|_| ProviderError::Operation("AES-CBC decryption failed".into()))
    })
}

fn check_iv(iv: &[u8]) -> ProviderResult<()> {
    if iv.len() != BLOCK_LEN {
        return Err(ProviderError::Operation(format!(
            "AES-CBC iv must be 16 bytes (got {})",
            iv.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CTR
// ---------------------------------------------------------------------------

/// Encrypt or decrypt (the operation is symmetric) in counter mode.
pub(super) fn ctr_apply(key: &[u8], params: &AesCtrParams, data: &[u8]) -> ProviderResult<Vec<u8>> {
    let counter: [u8; BLOCK_LEN] = params.counter.as_slice().try_into().map_err(|_| {
        ProviderError::Operation(format!(
            "AES-CTR counter must be 16 bytes (got {})",
            params.counter.len()
        ))
    })?;
    if params.length == 0 || params.length > 128 {
        return Err(ProviderError::Operation(format!(
            "AES-CTR length must be between 1 and 128 bits (got {})",
            params.length
        )));
    }

    let blocks = data.len().div_ceil(BLOCK_LEN) as u128;
    if params.length < 128 && blocks > (1u128 << params.length) {
        return Err(ProviderError::Operation(
            "AES-CTR counter would wrap around for this input".into(),
        ));
    }

    with_aes!(key, Cipher => {
        let cipher = Cipher::new_from_slice(key)
            .map_err(|e| ProviderError::Operation(format!("AES-CTR init: {e}")))?;
        Ok(ctr_xor(&cipher, counter, params.length, data))
    })
}

fn ctr_xor<C: BlockEncrypt>(cipher: &C, counter: [u8; BLOCK_LEN], length: u32, data: &[u8]) -> Vec<u8> {
    let initial = u128::from_be_bytes(counter);
    let mask = if length == 128 {
        u128::MAX
    } else {
        (1u128 << length) - 1
    };
    let fixed = initial & !mask;

    let mut out = Vec::with_capacity(data.len());
    for (i, chunk) in data.chunks(BLOCK_LEN).enumerate() {
        let ctr = (initial & mask).wrapping_add(i as u128) & mask;
        let mut block = GenericArray::clone_from_slice(&(fixed | ctr).to_be_bytes());
        cipher.encrypt_block(&mut block);
        out.extend(chunk.iter().zip(block.iter()).map(|(d, k)| d ^ k));
    }
    out
}

// ---------------------------------------------------------------------------
// GCM
// ---------------------------------------------------------------------------

/// Run one GCM operation with concrete key, nonce and tag sizes.
macro_rules! gcm_op {
    ($cipher:ty, $nonce:ty, $tag:ty, $key:expr, $iv:expr, $payload:expr, $encrypt:expr) => {{
        let gcm = AesGcm::<$cipher, $nonce, $tag>::new_from_slice($key)
            .map_err(|e| ProviderError::Operation(format!("AES-GCM init: {e}")))?;
        let nonce = Nonce::<$nonce>::from_slice($iv);
        if $encrypt {
            gcm.encrypt(nonce, $payload)
                .map_err(|_| ProviderError::Operation("AES-GCM encryption failed".into()))
        } else {
            gcm.decrypt(nonce, $payload)
                .map_err(|_| ProviderError::Operation("AES-GCM decryption failed".into()))
        }
    }};
}

macro_rules! gcm_tag {
    ($cipher:ty, $nonce:ty, $tag_bytes:expr, $key:expr, $iv:expr, $payload:expr, $encrypt:expr) => {
        match $tag_bytes {
            12 => gcm_op!($cipher, $nonce, U12, $key, $iv, $payload, $encrypt),
            13 => gcm_op!($cipher, $nonce, U13, $key, $iv, $payload, $encrypt),
            14 => gcm_op!($cipher, $nonce, U14, $key, $iv, $payload, $encrypt),
            15 => gcm_op!($cipher, $nonce, U15, $key, $iv, $payload, $encrypt),
            _ => gcm_op!($cipher, $nonce, U16, $key, $iv, $payload, $encrypt),
        }
    };
}

pub(super) fn gcm_encrypt(key: &[u8], params: &AesGcmParams, data: &[u8]) -> ProviderResult<Vec<u8>> {
    gcm_apply(key, params, data, true)
}

pub(super) fn gcm_decrypt(key: &[u8], params: &AesGcmParams, data: &[u8]) -> ProviderResult<Vec<u8>> {
    gcm_apply(key, params, data, false)
}

fn gcm_apply(key: &[u8], params: &AesGcmParams, data: &[u8], encrypt: bool) -> ProviderResult<Vec<u8>> {
    let tag_bytes = gcm_tag_bytes(params.tag_length)?;
    if !encrypt && data.len() < tag_bytes {
        return Err(ProviderError::Operation(
            "AES-GCM ciphertext is shorter than the tag".into(),
        ));
    }
    let aad = params.additional_data.as_deref().unwrap_or_default();
    let payload = Payload { msg: data, aad };
    let iv = params.iv.as_slice();

    with_aes!(key, Cipher => {
        match iv.len() {
            12 => gcm_tag!(Cipher, U12, tag_bytes, key, iv, payload, encrypt),
            16 => gcm_tag!(Cipher, U16, tag_bytes, key, iv, payload, encrypt),
            0 => Err(ProviderError::Operation("AES-GCM iv must not be empty".into())),
            n => Err(ProviderError::NotSupported(format!(
                "AES-GCM iv of {n} bytes (only 12 and 16 are supported)"
            ))),
        }
    })
}

/// Tag size in bytes for a WebCrypto `tagLength` in bits.
fn gcm_tag_bytes(tag_length: Option<u32>) -> ProviderResult<usize> {
    match tag_length.unwrap_or(128) {
        bits @ (96 | 104 | 112 | 120 | 128) => Ok(bits as usize / 8),
        bits @ (32 | 64) => Err(ProviderError::NotSupported(format!(
            "AES-GCM tagLength {bits}"
        ))),
        bits => Err(ProviderError::Operation(format!(
            "invalid AES-GCM tagLength {bits}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// KW
// ---------------------------------------------------------------------------

pub(super) fn kw_wrap(key: &[u8], data: &[u8]) -> ProviderResult<Vec<u8>> {
    if data.len() < 16 || data.len() % 8 != 0 {
        return Err(ProviderError::Operation(format!(
            "AES-KW input must be a multiple of 8 bytes and at least 16 (got {})",
            data.len()
        )));
    }
    with_aes!(key, Cipher => {
        let kek = aes_kw::Kek::<Cipher>::try_from(key)
            .map_err(|e| ProviderError::Operation(format!("AES-KW init: {e}")))?;
        kek.wrap_vec(data)
            .map_err(|e| ProviderError::Operation(format!("AES-KW wrap: {e}")))
    })
}

pub(super) fn kw_unwrap(key: &[u8], data: &[u8]) -> ProviderResult<Vec<u8>> {
    with_aes!(key, Cipher => {
        let kek = aes_kw::Kek::<Cipher>::try_from(key)
            .map_err(|e| ProviderError::Operation(format!("AES-KW init: {e}")))?;
        kek.unwrap_vec(data)
            .map_err(|_| ProviderError::Operation("AES-KW integrity check failed".into()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];

    #[test]
    fn kw_rfc3394_vector() {
        // RFC 3394 section 4.1: 128-bit KEK wrapping 128 bits of key data.
        let data = [
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
            0xee, 0xff,
        ];
        let wrapped = kw_wrap(&KEY, &data).unwrap();
        let expected = [
            0x1f, 0xa6, 0x8b, 0x0a, 0x81, 0x12, 0xb4, 0x47, 0xae, 0xf3, 0x4b, 0xd8, 0xfb, 0x5a,
            0x7b, 0x82, 0x9d, 0x3e, 0x86, 0x23, 0x71, 0xd2, 0xcf, 0xe5,
        ];
        assert_eq!(wrapped, expected);
        assert_eq!(kw_unwrap(&KEY, &wrapped).unwrap(), data);
    }

    #[test]
    fn kw_rejects_odd_lengths() {
        assert!(kw_wrap(&KEY, &[0u8; 15]).is_err());
        assert!(kw_wrap(&KEY, &[0u8; 8]).is_err());
    }

    #[test]
    fn cbc_pads_to_block() {
        let ct = cbc_encrypt(&KEY, &[7u8; 16], b"hello").unwrap();
        assert_eq!(ct.len(), 16);
        assert_eq!(cbc_decrypt(&KEY, &[7u8; 16], &ct).unwrap(), b"hello");
    }

    #[test]
    fn cbc_requires_16_byte_iv() {
        assert!(cbc_encrypt(&KEY, &[0u8; 12], b"x").is_err());
    }

    #[test]
    fn ctr_is_symmetric() {
        let params = AesCtrParams::new([0u8; 16], 64);
        let ct = ctr_apply(&KEY, &params, b"counter mode text spanning blocks").unwrap();
        assert_eq!(ct.len(), 33);
        let pt = ctr_apply(&KEY, &params, &ct).unwrap();
        assert_eq!(pt, b"counter mode text spanning blocks");
    }

    #[test]
    fn ctr_counter_only_touches_low_bits() {
        // With a 1-bit counter starting at 1 the second block wraps to 0 and
        // must match a fresh run that starts at 0.
        let mut start_one = [0xffu8; 16];
        start_one[15] = 0xff;
        let mut start_zero = start_one;
        start_zero[15] = 0xfe;

        let two_blocks = ctr_apply(&KEY, &AesCtrParams::new(start_one, 1), &[0u8; 32]).unwrap();
        let one_block = ctr_apply(&KEY, &AesCtrParams::new(start_zero, 1), &[0u8; 16]).unwrap();
        assert_eq!(&two_blocks[16..], &one_block[..]);
    }

    #[test]
    fn ctr_rejects_wrap_around() {
        let params = AesCtrParams::new([0u8; 16], 1);
        assert!(ctr_apply(&KEY, &params, &[0u8; 48]).is_err());
    }

    #[test]
    fn gcm_round_trip_with_16_byte_iv_and_aad() {
        let params = AesGcmParams::new([3u8; 16]).with_additional_data(b"header".to_vec());
        let ct = gcm_encrypt(&[9u8; 32], &params, b"payload").unwrap();
        assert_eq!(ct.len(), 7 + 16);
        assert_eq!(gcm_decrypt(&[9u8; 32], &params, &ct).unwrap(), b"payload");

        let wrong_aad = AesGcmParams::new([3u8; 16]).with_additional_data(b"other".to_vec());
        assert!(gcm_decrypt(&[9u8; 32], &wrong_aad, &ct).is_err());
    }

    #[test]
    fn gcm_short_tag() {
        let params = AesGcmParams::new([1u8; 12]).with_tag_length(96);
        let ct = gcm_encrypt(&KEY, &params, b"abc").unwrap();
        assert_eq!(ct.len(), 3 + 12);
        assert_eq!(gcm_decrypt(&KEY, &params, &ct).unwrap(), b"abc");
    }

    #[test]
    fn gcm_tag_lengths() {
        assert!(matches!(gcm_tag_bytes(Some(64)), Err(ProviderError::NotSupported(_))));
        assert!(matches!(gcm_tag_bytes(Some(100)), Err(ProviderError::Operation(_))));
        assert_eq!(gcm_tag_bytes(None).unwrap(), 16);
    }

    #[test]
    fn rejects_bad_key_size() {
        assert!(matches!(
            cbc_encrypt(&[0u8; 20], &[0u8; 16], b"x"),
            Err(ProviderError::Data(_))
        ));
    }
}
