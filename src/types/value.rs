//! Dynamic values — the runtime counterpart of a [`TypeDescriptor`].

use serde_json::Value as Json;
use thiserror::Error;

use crate::types::{Kind, Primitive, TypeDescriptor};

/// Errors produced when decoding JSON into a [`Value`].
#[derive(Debug, Error)]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: &'static str },

    #[error("{value} is out of range for {ty}")]
    OutOfRange { ty: String, value: String },

    #[error("{owner} has no field '{field}'")]
    UnknownField { owner: String, field: String },

    #[error("map entry {index} of {ty} must be a [key, value] pair")]
    MalformedEntry { ty: String, index: usize },
}

/// Opaque identity of an open channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelHandle(u64);

impl ChannelHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// A field value. `None` in a handle variant means "unset".
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Char(char),
    Str(String),
    Pointer(Option<Box<Value>>),
    Sequence(Option<Vec<Value>>),
    Map(Option<Vec<(Value, Value)>>),
    Channel(Option<ChannelHandle>),
    /// A callable, identified by name when bound.
    Function(Option<String>),
    Interface(Option<Box<Value>>),
    Struct(Vec<(String, Value)>),
}

impl Value {
    /// The default value of `ty`.
    pub fn zero_of(ty: &TypeDescriptor) -> Value {
        match ty.kind() {
            Kind::Primitive(p) => match p {
                Primitive::Bool => Value::Bool(false),
                Primitive::I8
                | Primitive::I16
                | Primitive::I32
                | Primitive::I64
                | Primitive::Isize => Value::Int(0),
                Primitive::U8
                | Primitive::U16
                | Primitive::U32
                | Primitive::U64
                | Primitive::Usize => Value::Uint(0),
                Primitive::F32 | Primitive::F64 => Value::Float(0.0),
                Primitive::Char => Value::Char('\0'),
                Primitive::String => Value::Str(String::new()),
            },
            Kind::Pointer(_) => Value::Pointer(None),
            Kind::Sequence(_) => Value::Sequence(None),
            Kind::Map { .. } => Value::Map(None),
            Kind::Channel(_) => Value::Channel(None),
            Kind::Function(_) => Value::Function(None),
            Kind::Interface(_) => Value::Interface(None),
            Kind::Struct(fields) => Value::Struct(
                fields
                    .iter()
                    .map(|f| (f.name.clone(), Value::zero_of(&f.ty)))
                    .collect(),
            ),
        }
    }

    /// Whether values of this shape support equality.
    ///
    /// Sequences, maps and functions never do; a struct does when all of its
    /// fields do. Handles behind a pointer, channel or interface compare by
    /// identity and are always comparable.
    pub fn is_comparable(&self) -> bool {
        match self {
            Value::Sequence(_) | Value::Map(_) | Value::Function(_) => false,
            Value::Struct(fields) => fields.iter().all(|(_, v)| v.is_comparable()),
            _ => true,
        }
    }

    /// Decode `json` as a value of type `ty`.
    ///
    /// `null` decodes to the unset handle for pointer, sequence, map,
    /// channel, function and interface types. Struct fields missing from the
    /// object take their zero value. Maps accept an object (string keys) or
    /// an array of `[key, value]` pairs.
    pub fn from_json(ty: &TypeDescriptor, json: &Json) -> Result<Value, ValueError> {
        match ty.kind() {
            Kind::Primitive(p) => primitive_from_json(ty, *p, json),
            Kind::Pointer(elem) => match json {
                Json::Null => Ok(Value::Pointer(None)),
                other => Ok(Value::Pointer(Some(Box::new(Value::from_json(elem, other)?)))),
            },
            Kind::Sequence(elem) => match json {
                Json::Null => Ok(Value::Sequence(None)),
                Json::Array(items) => items
                    .iter()
                    .map(|item| Value::from_json(elem, item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(|items| Value::Sequence(Some(items))),
                other => Err(mismatch(ty, other)),
            },
            Kind::Map { key, value } => match json {
                Json::Null => Ok(Value::Map(None)),
                Json::Object(entries) => entries
                    .iter()
                    .map(|(k, v)| {
                        Ok((
                            Value::from_json(key, &Json::String(k.clone()))?,
                            Value::from_json(value, v)?,
                        ))
                    })
                    .collect::<Result<Vec<_>, ValueError>>()
                    .map(|entries| Value::Map(Some(entries))),
                Json::Array(pairs) => pairs
                    .iter()
                    .enumerate()
                    .map(|(index, pair)| match pair.as_array().map(Vec::as_slice) {
                        Some([k, v]) => Ok((Value::from_json(key, k)?, Value::from_json(value, v)?)),
                        _ => Err(ValueError::MalformedEntry {
                            ty: ty.to_string(),
                            index,
                        }),
                    })
                    .collect::<Result<Vec<_>, ValueError>>()
                    .map(|entries| Value::Map(Some(entries))),
                other => Err(mismatch(ty, other)),
            },
            Kind::Channel(_) => match json {
                Json::Null => Ok(Value::Channel(None)),
                Json::Number(n) => n
                    .as_u64()
                    .map(|id| Value::Channel(Some(ChannelHandle::new(id))))
                    .ok_or_else(|| ValueError::OutOfRange {
                        ty: ty.to_string(),
                        value: n.to_string(),
                    }),
                other => Err(mismatch(ty, other)),
            },
            Kind::Function(_) => match json {
                Json::Null => Ok(Value::Function(None)),
                Json::String(name) => Ok(Value::Function(Some(name.clone()))),
                other => Err(mismatch(ty, other)),
            },
            Kind::Interface(_) => match json {
                Json::Null => Ok(Value::Interface(None)),
                other => Ok(Value::Interface(Some(Box::new(untyped(other))))),
            },
            Kind::Struct(fields) => {
                let Json::Object(entries) = json else {
                    return Err(mismatch(ty, json));
                };
                if let Some(unknown) = entries
                    .keys()
                    .find(|k| !fields.iter().any(|f| &f.name == *k))
                {
                    return Err(ValueError::UnknownField {
                        owner: ty.to_string(),
                        field: unknown.clone(),
                    });
                }
                fields
                    .iter()
                    .map(|f| {
                        let value = match entries.get(&f.name) {
                            Some(v) => Value::from_json(&f.ty, v)?,
                            None => Value::zero_of(&f.ty),
                        };
                        Ok((f.name.clone(), value))
                    })
                    .collect::<Result<Vec<_>, ValueError>>()
                    .map(Value::Struct)
            }
        }
    }
}

fn primitive_from_json(ty: &TypeDescriptor, p: Primitive, json: &Json) -> Result<Value, ValueError> {
    let out_of_range = || ValueError::OutOfRange {
        ty: ty.to_string(),
        value: json.to_string(),
    };
    match p {
        Primitive::Bool => json.as_bool().map(Value::Bool).ok_or_else(|| mismatch(ty, json)),
        Primitive::I8 | Primitive::I16 | Primitive::I32 | Primitive::I64 | Primitive::Isize => {
            if !json.is_number() {
                return Err(mismatch(ty, json));
            }
            let n = json.as_i64().ok_or_else(out_of_range)?;
            let fits = match p {
                Primitive::I8 => i8::try_from(n).is_ok(),
                Primitive::I16 => i16::try_from(n).is_ok(),
                Primitive::I32 => i32::try_from(n).is_ok(),
                Primitive::Isize => isize::try_from(n).is_ok(),
                _ => true,
            };
            if fits {
                Ok(Value::Int(n))
            } else {
                Err(out_of_range())
            }
        }
        Primitive::U8 | Primitive::U16 | Primitive::U32 | Primitive::U64 | Primitive::Usize => {
            if !json.is_number() {
                return Err(mismatch(ty, json));
            }
            let n = json.as_u64().ok_or_else(out_of_range)?;
            let fits = match p {
                Primitive::U8 => u8::try_from(n).is_ok(),
                Primitive::U16 => u16::try_from(n).is_ok(),
                Primitive::U32 => u32::try_from(n).is_ok(),
                Primitive::Usize => usize::try_from(n).is_ok(),
                _ => true,
            };
            if fits {
                Ok(Value::Uint(n))
            } else {
                Err(out_of_range())
            }
        }
        Primitive::F32 | Primitive::F64 => {
            let f = json.as_f64().ok_or_else(|| mismatch(ty, json))?;
            if p == Primitive::F32 && f.is_finite() && f.abs() > f64::from(f32::MAX) {
                return Err(out_of_range());
            }
            Ok(Value::Float(f))
        }
        Primitive::Char => {
            let s = json.as_str().ok_or_else(|| mismatch(ty, json))?;
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Char(c)),
                _ => Err(out_of_range()),
            }
        }
        Primitive::String => json
            .as_str()
            .map(|s| Value::Str(s.to_string()))
            .ok_or_else(|| mismatch(ty, json)),
    }
}

/// The dynamic value held by an interface, inferred from JSON alone.
fn untyped(json: &Json) -> Value {
    match json {
        Json::Null => Value::Interface(None),
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::Uint(u)
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Json::String(s) => Value::Str(s.clone()),
        Json::Array(items) => Value::Sequence(Some(items.iter().map(untyped).collect())),
        Json::Object(entries) => Value::Map(Some(
            entries
                .iter()
                .map(|(k, v)| (Value::Str(k.clone()), untyped(v)))
                .collect(),
        )),
    }
}

fn mismatch(ty: &TypeDescriptor, found: &Json) -> ValueError {
    let found = match found {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    };
    ValueError::TypeMismatch {
        expected: ty.to_string(),
        found,
    }
}
