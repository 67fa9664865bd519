use crate::alg::AesMode;
use crate::params::AesGcmParams;

super::aes_cipher! {
    /// AES-GCM.  The tag (128 bits unless `tag_length` says otherwise) is
    /// appended to the ciphertext.  Never reuse an IV under the same key.
    facade AesGcm,
    /// An AES-GCM secret key.
    view AesGcmKey,
    mode AesMode::Gcm,
    params AesGcmParams => AesGcm
}
