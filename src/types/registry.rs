//! Named type registry.

use std::collections::BTreeMap;

use crate::types::syntax::{self, NameResolver, SyntaxError};
use crate::types::{Primitive, TypeDescriptor};

/// Names that every registry defines, with the primitive they wrap.
const BUILTINS: [(&str, Primitive); 4] = [
    ("Duration", Primitive::I64),
    ("PathBuf", Primitive::String),
    ("IpAddr", Primitive::String),
    ("SocketAddr", Primitive::String),
];

/// Maps type names to descriptors.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: BTreeMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    /// A registry holding only the built-in names.
    pub fn new() -> Self {
        let types = BUILTINS
            .iter()
            .map(|(name, p)| {
                let ty = TypeDescriptor::named(*name, TypeDescriptor::primitive(*p));
                (name.to_string(), ty)
            })
            .collect();
        Self { types }
    }

    /// Whether `name` is reserved by a primitive or a built-in.
    pub fn is_reserved(name: &str) -> bool {
        Primitive::from_name(name).is_some() || BUILTINS.iter().any(|(b, _)| *b == name)
    }

    pub fn define(&mut self, name: impl Into<String>, ty: TypeDescriptor) {
        self.types.insert(name.into(), ty);
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Parse a type expression against the names defined here.
    pub fn parse(&self, input: &str) -> Result<TypeDescriptor, SyntaxError> {
        let mut resolver = self;
        syntax::parse(input, &mut resolver)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NameResolver for &TypeRegistry {
    fn resolve(&mut self, name: &str) -> Result<Option<TypeDescriptor>, SyntaxError> {
        Ok(self.get(name).cloned())
    }
}
