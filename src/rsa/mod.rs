//! RSA facades: OAEP for encryption and key wrapping, PSS and
//! PKCS#1 v1.5 for signatures.
//!
//! Generated keys default to a 4096-bit modulus, exponent 65537 and
//! SHA-512.

mod oaep;
mod pkcs1_v1_5;
mod pss;
mod shared;

pub use self::oaep::{RsaOaep, RsaOaepPrivateKey, RsaOaepPublicKey};
pub use self::pkcs1_v1_5::{RsassaPkcs1V15, RsassaPkcs1V15PrivateKey, RsassaPkcs1V15PublicKey};
pub use self::pss::{RsaPss, RsaPssPrivateKey, RsaPssPublicKey};
pub use self::shared::RsaShared;
