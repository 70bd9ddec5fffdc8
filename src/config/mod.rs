//! Configuration — named types and scalar settings from a TOML file.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, FieldDef, ScalarsConfig, TypeDef};
