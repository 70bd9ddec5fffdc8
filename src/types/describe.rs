//! Compile-time descriptors for Rust types.

use std::any::Any;
use std::collections::HashMap;
use std::sync::mpsc::Receiver;

use crate::types::{ChannelHandle, Primitive, TypeDescriptor, Value};

/// A Rust type that can describe its own shape and current value.
///
/// `Option<T>` plays the role of a pointer: `None` is the unset handle.
/// `Vec` and `HashMap` are always allocated, so their values are never
/// unset; wrap them in `Option` to get an absent state.
///
/// Types with their own text decoding implement this by hand and return a
/// descriptor built with [`TypeDescriptor::with_text_decoder`].
pub trait Describe {
    fn descriptor() -> TypeDescriptor;

    fn to_value(&self) -> Value;
}

/// Descriptor of `T`.
pub fn describe<T: Describe>() -> TypeDescriptor {
    T::descriptor()
}

macro_rules! describe_signed {
    ($($ty:ty => $prim:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::primitive(Primitive::$prim)
                }

                fn to_value(&self) -> Value {
                    Value::Int(*self as i64)
                }
            }
        )*
    };
}

macro_rules! describe_unsigned {
    ($($ty:ty => $prim:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::primitive(Primitive::$prim)
                }

                fn to_value(&self) -> Value {
                    Value::Uint(*self as u64)
                }
            }
        )*
    };
}

describe_signed!(i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize);
describe_unsigned!(u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize);

impl Describe for bool {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::primitive(Primitive::Bool)
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Describe for f32 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::primitive(Primitive::F32)
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl Describe for f64 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::primitive(Primitive::F64)
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl Describe for char {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::primitive(Primitive::Char)
    }

    fn to_value(&self) -> Value {
        Value::Char(*self)
    }
}

impl Describe for String {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::primitive(Primitive::String)
    }

    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl<T: Describe> Describe for Option<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::pointer(T::descriptor())
    }

    fn to_value(&self) -> Value {
        Value::Pointer(self.as_ref().map(|v| Box::new(v.to_value())))
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence(T::descriptor())
    }

    fn to_value(&self) -> Value {
        Value::Sequence(Some(self.iter().map(Describe::to_value).collect()))
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::map(K::descriptor(), V::descriptor())
    }

    fn to_value(&self) -> Value {
        Value::Map(Some(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        ))
    }
}

impl<T: Describe> Describe for Receiver<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::channel(T::descriptor())
    }

    fn to_value(&self) -> Value {
        let id = self as *const Receiver<T> as usize as u64;
        Value::Channel(Some(ChannelHandle::new(id)))
    }
}

impl Describe for Box<dyn Any> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::interface("Any")
    }

    /// The dynamic contents are opaque; only a few primitives are recovered.
    fn to_value(&self) -> Value {
        let any: &dyn Any = self.as_ref();
        let inner = if let Some(b) = any.downcast_ref::<bool>() {
            Value::Bool(*b)
        } else if let Some(i) = any.downcast_ref::<i64>() {
            Value::Int(*i)
        } else if let Some(s) = any.downcast_ref::<String>() {
            Value::Str(s.clone())
        } else {
            Value::Struct(Vec::new())
        };
        Value::Interface(Some(Box::new(inner)))
    }
}
