use crate::alg::AesMode;
use crate::errors::{Result, WebCryptoError};
use crate::params::AesCtrParams;
use crate::subtle::Subtle;

/// Length in bytes of the counter segment when the caller does not pick one.
pub const DEFAULT_COUNTER_LENGTH: usize = 8;

/// Size of an AES-CTR counter block.
const BLOCK_LEN: usize = 16;

super::aes_cipher! {
    /// AES-CTR.  Encryption and decryption are the same operation; never
    /// reuse a counter block under the same key.
    facade AesCtr,
    /// An AES-CTR secret key.
    view AesCtrKey,
    mode AesMode::Ctr,
    params AesCtrParams => AesCtr
}

impl AesCtr {
    /// A fresh counter block with a `length`-byte counter segment.
    ///
    /// The leading `16 - length` bytes are random; the segment starts at 1.
    pub fn generate_counter(&self, length: usize) -> Result<Vec<u8>> {
        generate_counter(&self.subtle, length)
    }

    /// Parameters for one message with the default 8-byte counter segment.
    pub fn params(&self) -> Result<AesCtrParams> {
        self.params_with_counter_length(DEFAULT_COUNTER_LENGTH)
    }

    /// Parameters for one message; `length` bytes of the block count blocks.
    pub fn params_with_counter_length(&self, length: usize) -> Result<AesCtrParams> {
        let counter = self.generate_counter(length)?;
        Ok(AesCtrParams::new(counter, (length * 8) as u32))
    }
}

fn generate_counter(subtle: &Subtle, length: usize) -> Result<Vec<u8>> {
    if !(1..=BLOCK_LEN).contains(&length) {
        return Err(WebCryptoError::InvalidParameter(format!(
            "AES-CTR counter length must be 1 to {BLOCK_LEN} bytes (got {length})"
        )));
    }
    let mut counter = vec![0u8; BLOCK_LEN];
    subtle.get_random_values(&mut counter[..BLOCK_LEN - length])?;
    counter[BLOCK_LEN - 1] = 1;
    Ok(counter)
}
