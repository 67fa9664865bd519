//! Settings loaded from `webcrypto.toml`.

pub mod settings;

pub use settings::Settings;
