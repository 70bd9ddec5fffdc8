use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{Config, TypeDef};
use crate::scalar::StdScalars;
use crate::types::syntax::{self, NameResolver, SyntaxError, KEYWORDS, MAX_DEPTH};
use crate::types::{Field, TypeDescriptor, TypeRegistry};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },

    #[error("Invalid type '{name}': {source}")]
    TypeError {
        name: String,
        #[source]
        source: SyntaxError,
    },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/fieldarity/types.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("fieldarity").join("types.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise behaves like [`Config::load_from`].
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads, parses and validates the config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        tracing::info!(
            "Loaded config from {} ({} types)",
            path.display(),
            config.types.len()
        );
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Type names are identifiers and shadow no primitive, built-in or keyword
    /// - Each type declares exactly one of `underlying` or `fields`
    /// - Field names are unique within a struct
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, def) in &self.types {
            if !is_identifier(name) {
                return Err(ConfigError::ValidationError {
                    message: format!("Type name '{}' is not an identifier", name),
                });
            }

            if TypeRegistry::is_reserved(name) || KEYWORDS.contains(&name.as_str()) {
                return Err(ConfigError::ValidationError {
                    message: format!("Type name '{}' is reserved", name),
                });
            }

            match (&def.underlying, &def.fields) {
                (Some(_), None) => {}
                (None, Some(fields)) => {
                    let mut seen = HashSet::new();
                    if let Some(dup) = fields.iter().find(|f| !seen.insert(f.name.as_str())) {
                        return Err(ConfigError::ValidationError {
                            message: format!("Type '{}' declares field '{}' twice", name, dup.name),
                        });
                    }
                }
                _ => {
                    return Err(ConfigError::ValidationError {
                        message: format!(
                            "Type '{}' must declare exactly one of `underlying` or `fields`",
                            name
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    /// Builds a registry holding the built-ins plus every declared type.
    pub fn registry(&self) -> Result<TypeRegistry, ConfigError> {
        let mut resolver = DefResolver {
            defs: &self.types,
            registry: TypeRegistry::new(),
            visiting: Vec::new(),
        };

        for name in self.types.keys() {
            resolver
                .resolve(name)
                .map_err(|source| ConfigError::TypeError {
                    name: name.clone(),
                    source,
                })?;
        }

        Ok(resolver.registry)
    }

    /// Scalar support with the configured extra names.
    pub fn scalars(&self) -> StdScalars {
        for name in &self.scalars.extra {
            if !self.types.contains_key(name) && !TypeRegistry::is_reserved(name) {
                tracing::warn!("Extra scalar '{}' is not a declared type", name);
            }
        }

        self.scalars
            .extra
            .iter()
            .fold(StdScalars::new(), |scalars, name| scalars.with_extra(name.clone()))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Resolves declared names on demand, so definitions may refer to each
/// other in any order.
struct DefResolver<'c> {
    defs: &'c BTreeMap<String, TypeDef>,
    registry: TypeRegistry,
    visiting: Vec<String>,
}

impl DefResolver<'_> {
    fn build(&mut self, name: &str, def: &TypeDef) -> Result<TypeDescriptor, SyntaxError> {
        let underlying = match (&def.underlying, &def.fields) {
            (Some(expr), _) => syntax::parse(expr, self)?,
            (None, Some(fields)) => {
                let fields = fields
                    .iter()
                    .map(|f| {
                        Ok(Field {
                            name: f.name.clone(),
                            ty: syntax::parse(&f.ty, self)?,
                        })
                    })
                    .collect::<Result<Vec<_>, SyntaxError>>()?;
                TypeDescriptor::structure(fields)
            }
            (None, None) => TypeDescriptor::structure(Vec::new()),
        };

        let ty = TypeDescriptor::named(name, underlying);
        Ok(if def.text_decoder {
            ty.with_text_decoder()
        } else {
            ty
        })
    }
}

impl NameResolver for DefResolver<'_> {
    fn resolve(&mut self, name: &str) -> Result<Option<TypeDescriptor>, SyntaxError> {
        if let Some(ty) = self.registry.get(name) {
            return Ok(Some(ty.clone()));
        }

        let defs = self.defs;
        let Some(def) = defs.get(name) else {
            return Ok(None);
        };

        if self.visiting.iter().any(|n| n == name) {
            return Err(SyntaxError::RecursiveType {
                name: name.to_string(),
            });
        }

        if self.visiting.len() >= MAX_DEPTH {
            return Err(SyntaxError::TooDeep { limit: MAX_DEPTH });
        }

        self.visiting.push(name.to_string());
        let built = self.build(name, def);
        self.visiting.pop();

        let ty = built?;
        self.registry.define(name, ty.clone());
        Ok(Some(ty))
    }
}
