pub mod completions;
pub mod derive;
pub mod digest;
pub mod keygen;
pub mod random;
pub mod usages;
