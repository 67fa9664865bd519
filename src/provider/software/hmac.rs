//! HMAC over the SHA-2 family.

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

use crate::alg::SecureHash;
use crate::provider::{ProviderError, ProviderResult};

macro_rules! mac {
    ($hash:ty, $key:expr, $data:expr) => {{
        let mut mac = <Hmac<$hash> as Mac>::new_from_slice($key)
            .map_err(|e| ProviderError::Operation(format!("HMAC init: {e}")))?;
        mac.update($data);
        mac.finalize().into_bytes().to_vec()
    }};
}

pub(super) fn sign(hash: SecureHash, key: &[u8], data: &[u8]) -> ProviderResult<Vec<u8>> {
    Ok(match hash {
        SecureHash::Sha256 => mac!(Sha256, key, data),
        SecureHash::Sha384 => mac!(Sha384, key, data),
        SecureHash::Sha512 => mac!(Sha512, key, data),
    })
}

/// Constant-time comparison against a freshly computed tag.
pub(super) fn verify(
    hash: SecureHash,
    key: &[u8],
    signature: &[u8],
    data: &[u8],
) -> ProviderResult<bool> {
    let expected = sign(hash, key, data)?;
    Ok(expected.ct_eq(signature).into())
}

/// JWK `alg` for an HMAC key.
pub(super) fn jwk_alg(hash: SecureHash) -> &'static str {
    match hash {
        SecureHash::Sha256 => "HS256",
        SecureHash::Sha384 => "HS384",
        SecureHash::Sha512 => "HS512",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc4231_case_2() {
        let tag = sign(SecureHash::Sha256, b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            tag[..8],
            [0x5b, 0xdc, 0xc1, 0x46, 0xbf, 0x60, 0x75, 0x4e]
        );
    }

    #[test]
    fn verify_detects_tampering() {
        let key = [0x42u8; 64];
        let tag = sign(SecureHash::Sha512, &key, b"message").unwrap();
        assert!(verify(SecureHash::Sha512, &key, &tag, b"message").unwrap());
        assert!(!verify(SecureHash::Sha512, &key, &tag, b"messagE").unwrap());
        assert!(!verify(SecureHash::Sha512, &key, &tag[..10], b"message").unwrap());
    }
}
