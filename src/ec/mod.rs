//! Elliptic-curve facades: ECDSA signatures and ECDH key agreement on the
//! NIST curves.

mod ecdh;
mod ecdsa;
mod shared;

pub use self::ecdh::{Ecdh, EcdhPrivateKey, EcdhPublicKey};
pub use self::ecdsa::{Ecdsa, EcdsaPrivateKey, EcdsaPublicKey};
pub use self::shared::EcShared;
