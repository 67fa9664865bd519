//! Key derivation: HKDF and PBKDF2 facades, plus the dispatch that routes
//! derived keys to their views.  ECDH reuses the same derivation helpers.

mod derived;
mod hkdf;
mod pbkdf2;
mod shared;

pub use self::derived::DerivedKey;
pub use self::hkdf::{Hkdf, HkdfKey};
pub use self::pbkdf2::{Pbkdf2, Pbkdf2Iterations, Pbkdf2Key};
pub use self::shared::KdfShared;

pub(crate) use self::shared::{derive_bits, derive_key};
