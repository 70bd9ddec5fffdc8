//! Type descriptors — the structural shape of a field's declared type.
//!
//! A descriptor is a closed sum over the shapes the classifier cares about.
//! Static Rust types get one through [`Describe`]; type expressions and
//! user-declared names get one through [`syntax::parse`] and
//! [`TypeRegistry`].

mod describe;
mod registry;
pub mod syntax;
mod value;

use std::fmt;

pub use describe::{describe, Describe};
pub use registry::TypeRegistry;
pub use syntax::{NameResolver, SyntaxError};
pub use value::{ChannelHandle, Value, ValueError};

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Char,
    String,
}

impl Primitive {
    /// All primitives, in declaration order.
    pub const ALL: [Primitive; 15] = [
        Primitive::Bool,
        Primitive::I8,
        Primitive::I16,
        Primitive::I32,
        Primitive::I64,
        Primitive::Isize,
        Primitive::U8,
        Primitive::U16,
        Primitive::U32,
        Primitive::U64,
        Primitive::Usize,
        Primitive::F32,
        Primitive::F64,
        Primitive::Char,
        Primitive::String,
    ];

    /// Rust spelling of the primitive (e.g. `"u16"`, `"String"`).
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::Isize => "isize",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::Usize => "usize",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::Char => "char",
            Primitive::String => "String",
        }
    }

    /// Look up a primitive by its Rust spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// A named field inside a struct descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: TypeDescriptor,
}

/// Structural shape of a type.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Primitive(Primitive),
    /// Single-level indirection that may be unset (`Option<T>`).
    Pointer(Box<TypeDescriptor>),
    /// Ordered container (`Vec<T>`).
    Sequence(Box<TypeDescriptor>),
    /// Associative container (`HashMap<K, V>`).
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    /// Receiving end of a channel (`Receiver<T>`).
    Channel(Box<TypeDescriptor>),
    /// Any callable. Carries its rendered signature.
    Function(String),
    /// Dynamic trait object (`dyn Name`).
    Interface(String),
    Struct(Vec<Field>),
}

/// Description of a field's declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    name: Option<String>,
    kind: Kind,
    text_decoder: bool,
}

impl TypeDescriptor {
    pub fn new(kind: Kind) -> Self {
        Self {
            name: None,
            kind,
            text_decoder: false,
        }
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Self::new(Kind::Primitive(primitive))
    }

    pub fn pointer(elem: TypeDescriptor) -> Self {
        Self::new(Kind::Pointer(Box::new(elem)))
    }

    pub fn sequence(elem: TypeDescriptor) -> Self {
        Self::new(Kind::Sequence(Box::new(elem)))
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::new(Kind::Map {
            key: Box::new(key),
            value: Box::new(value),
        })
    }

    pub fn channel(elem: TypeDescriptor) -> Self {
        Self::new(Kind::Channel(Box::new(elem)))
    }

    pub fn function(signature: impl Into<String>) -> Self {
        Self::new(Kind::Function(signature.into()))
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(Kind::Interface(name.into()))
    }

    pub fn structure(fields: Vec<Field>) -> Self {
        Self::new(Kind::Struct(fields))
    }

    /// A user-defined type named `name` whose shape is `underlying`'s shape.
    ///
    /// The text-decoder capability is not inherited: a named type opts in
    /// with [`with_text_decoder`](Self::with_text_decoder).
    pub fn named(name: impl Into<String>, underlying: TypeDescriptor) -> Self {
        Self {
            name: Some(name.into()),
            kind: underlying.kind,
            text_decoder: false,
        }
    }

    /// Mark this type as supplying its own text decoding.
    pub fn with_text_decoder(mut self) -> Self {
        self.text_decoder = true;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Whether this type itself supplies text decoding.
    pub fn has_text_decoder(&self) -> bool {
        self.text_decoder
    }

    /// The pointee, if this is a pointer.
    pub fn pointee(&self) -> Option<&TypeDescriptor> {
        match &self.kind {
            Kind::Pointer(elem) => Some(elem),
            _ => None,
        }
    }

    /// The primitive kind, if any. Named types report their underlying kind.
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self.kind {
            Kind::Primitive(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_bool(&self) -> bool {
        self.as_primitive() == Some(Primitive::Bool)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            return f.write_str(name);
        }
        match &self.kind {
            Kind::Primitive(p) => f.write_str(p.name()),
            Kind::Pointer(elem) => write!(f, "Option<{}>", elem),
            Kind::Sequence(elem) => write!(f, "Vec<{}>", elem),
            Kind::Map { key, value } => write!(f, "HashMap<{}, {}>", key, value),
            Kind::Channel(elem) => write!(f, "Receiver<{}>", elem),
            Kind::Function(signature) => f.write_str(signature),
            Kind::Interface(name) => write!(f, "dyn {}", name),
            Kind::Struct(fields) => {
                f.write_str("struct {")?;
                for (i, field) in fields.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{}{}: {}", sep, field.name, field.ty)?;
                }
                f.write_str(" }")
            }
        }
    }
}
