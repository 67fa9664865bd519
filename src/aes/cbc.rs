use crate::alg::AesMode;
use crate::params::AesCbcParams;

super::aes_cipher! {
    /// AES-CBC with PKCS#7 padding.  Every call needs a fresh 16-byte IV.
    facade AesCbc,
    /// An AES-CBC secret key.
    view AesCbcKey,
    mode AesMode::Cbc,
    params AesCbcParams => AesCbc
}
