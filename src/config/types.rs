use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scalars: ScalarsConfig,
    /// User-declared named types, keyed by name.
    pub types: BTreeMap<String, TypeDef>,
}

/// Settings for the scalar collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalarsConfig {
    /// Named types that convert from a single token without a text decoder.
    pub extra: Vec<String>,
}

/// A named type. Exactly one of `underlying` or `fields` must be given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDef {
    /// Type expression this name wraps (e.g. `"bool"`, `"Vec<String>"`).
    pub underlying: Option<String>,
    /// Struct fields, in declaration order.
    pub fields: Option<Vec<FieldDef>>,
    /// Whether the type decodes its own text.
    pub text_decoder: bool,
}

/// A struct field declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    /// Type expression of the field.
    #[serde(rename = "type")]
    pub ty: String,
}
