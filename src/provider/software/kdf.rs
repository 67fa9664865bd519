//! HKDF (RFC 5869) and PBKDF2 (RFC 8018) bit derivation.

use hkdf::Hkdf;
use sha2::{Sha256, Sha384, Sha512};

use crate::alg::SecureHash;
use crate::provider::{ProviderError, ProviderResult};

/// Extract-then-expand `len` bytes from `ikm`.
pub(super) fn hkdf(
    hash: SecureHash,
    ikm: &[u8],
    salt: &[u8],
    info: &[u8],
    len: usize,
) -> ProviderResult<Vec<u8>> {
    let mut okm = vec![0u8; len];
    let expanded = match hash {
        SecureHash::Sha256 => Hkdf::<Sha256>::new(Some(salt), ikm).expand(info, &mut okm),
        SecureHash::Sha384 => Hkdf::<Sha384>::new(Some(salt), ikm).expand(info, &mut okm),
        SecureHash::Sha512 => Hkdf::<Sha512>::new(Some(salt), ikm).expand(info, &mut okm),
    };
    expanded.map_err(|e| ProviderError::Operation(format!("HKDF expand failed: {e}")))?;
    Ok(okm)
}

/// Stretch `password` into `len` bytes.
pub(super) fn pbkdf2(
    hash: SecureHash,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    len: usize,
) -> ProviderResult<Vec<u8>> {
    if iterations == 0 {
        return Err(ProviderError::Operation(
            "PBKDF2 iterations must be at least 1".into(),
        ));
    }
    let mut out = vec![0u8; len];
    match hash {
        SecureHash::Sha256 => pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out),
        SecureHash::Sha384 => pbkdf2::pbkdf2_hmac::<Sha384>(password, salt, iterations, &mut out),
        SecureHash::Sha512 => pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, iterations, &mut out),
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hkdf_rfc5869_case_1() {
        let ikm = [0x0bu8; 22];
        let salt: Vec<u8> = (0x00..=0x0c).collect();
        let info: Vec<u8> = (0xf0..=0xf9).collect();
        let okm = hkdf(SecureHash::Sha256, &ikm, &salt, &info, 42).unwrap();
        assert_eq!(okm[..8], [0x3c, 0xb2, 0x5f, 0x25, 0xfa, 0xac, 0xd5, 0x7a]);
    }

    #[test]
    fn hkdf_rejects_oversized_output() {
        // 255 * 32 is the most HKDF-SHA256 can produce.
        assert!(hkdf(SecureHash::Sha256, b"k", b"", b"", 255 * 32 + 1).is_err());
    }

    #[test]
    fn pbkdf2_is_deterministic() {
        let a = pbkdf2(SecureHash::Sha256, b"password", b"salt", 2, 32).unwrap();
        let b = pbkdf2(SecureHash::Sha256, b"password", b"salt", 2, 32).unwrap();
        assert_eq!(a, b);
        // RFC 7914 section 11 test vector prefix for PBKDF2-HMAC-SHA256, c=1.
        let c1 = pbkdf2(SecureHash::Sha256, b"passwd", b"salt", 1, 64).unwrap();
        assert_eq!(c1[..4], [0x55, 0xac, 0x04, 0x6e]);
    }

    #[test]
    fn pbkdf2_rejects_zero_iterations() {
        assert!(pbkdf2(SecureHash::Sha512, b"pw", b"salt", 0, 16).is_err());
    }
}
