//! SHA-1 and SHA-2 digests.

use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::alg::ShaVariant;

pub(super) fn digest(algorithm: ShaVariant, data: &[u8]) -> Vec<u8> {
    match algorithm {
        ShaVariant::Sha1 => Sha1::digest(data).to_vec(),
        ShaVariant::Sha256 => Sha256::digest(data).to_vec(),
        ShaVariant::Sha384 => Sha384::digest(data).to_vec(),
        ShaVariant::Sha512 => Sha512::digest(data).to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_lengths() {
        for sha in ShaVariant::ALL {
            assert_eq!(digest(sha, b"abc").len(), sha.output_len());
        }
    }

    #[test]
    fn sha1_abc() {
        let d = digest(ShaVariant::Sha1, b"abc");
        assert_eq!(d[..4], [0xa9, 0x99, 0x3e, 0x36]);
    }
}
