//! Cardinality classifier — type → number of tokens.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::field::presence::is_presence_flag;
use crate::scalar::{ScalarSupport, StdScalars};
use crate::types::{Describe, Kind, TypeDescriptor};

/// How many tokens a field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// Boolean-like, set by presence alone (e.g. `--verbose`).
    Zero,
    /// Exactly one token (e.g. `--port 8080`).
    One,
    /// Zero or more tokens into a `Vec` or `HashMap`.
    Multiple,
    /// The type cannot be parsed from tokens.
    Unsupported,
}

impl Cardinality {
    /// Collapse a classification into a single tag.
    pub fn from_result(result: &Result<Cardinality, UnsupportedType>) -> Cardinality {
        match result {
            Ok(cardinality) => *cardinality,
            Err(_) => Cardinality::Unsupported,
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Cardinality::Zero => "zero",
            Cardinality::One => "one",
            Cardinality::Multiple => "multiple",
            Cardinality::Unsupported => "unsupported",
        })
    }
}

/// A field type that cannot be populated from tokens.
///
/// Container types are reported after one level of `Option` is removed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnsupportedType {
    #[error("cannot parse into {container} because {element} not supported")]
    Element { container: String, element: String },

    #[error("cannot parse into {container} because key type {key} not supported")]
    Key { container: String, key: String },

    #[error("cannot parse into {container} because value type {value} not supported")]
    Value { container: String, value: String },

    #[error("cannot parse into {ty}")]
    Shape { ty: String },
}

/// Classify `ty` against the given scalar support.
///
/// Never returns `Ok(Cardinality::Unsupported)`.
pub fn cardinality_of(
    ty: &TypeDescriptor,
    scalars: &impl ScalarSupport,
) -> Result<Cardinality, UnsupportedType> {
    if scalars.can_parse(ty) {
        if is_presence_flag(ty) {
            return Ok(Cardinality::Zero);
        }
        return Ok(Cardinality::One);
    }

    let ty = ty.pointee().unwrap_or(ty);

    let result = match ty.kind() {
        Kind::Sequence(elem) => {
            if scalars.can_parse(elem) {
                Ok(Cardinality::Multiple)
            } else {
                Err(UnsupportedType::Element {
                    container: ty.to_string(),
                    element: elem.to_string(),
                })
            }
        }
        Kind::Map { key, value } => {
            if !scalars.can_parse(key) {
                Err(UnsupportedType::Key {
                    container: ty.to_string(),
                    key: key.to_string(),
                })
            } else if !scalars.can_parse(value) {
                Err(UnsupportedType::Value {
                    container: ty.to_string(),
                    value: value.to_string(),
                })
            } else {
                Ok(Cardinality::Multiple)
            }
        }
        _ => Err(UnsupportedType::Shape { ty: ty.to_string() }),
    };

    if let Err(err) = &result {
        tracing::debug!("unsupported field type: {}", err);
    }
    result
}

/// Classify `ty` with the default [`StdScalars`].
pub fn classify(ty: &TypeDescriptor) -> Result<Cardinality, UnsupportedType> {
    cardinality_of(ty, &StdScalars::new())
}

/// Classify the Rust type `T`.
pub fn classify_type<T: Describe>() -> Result<Cardinality, UnsupportedType> {
    classify(&T::descriptor())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Field, Primitive};
    use std::collections::HashMap;
    use std::sync::mpsc::Receiver;

    fn prim(p: Primitive) -> TypeDescriptor {
        TypeDescriptor::primitive(p)
    }

    #[test]
    fn scalars_take_one_token() {
        assert_eq!(classify_type::<i32>(), Ok(Cardinality::One));
        assert_eq!(classify_type::<String>(), Ok(Cardinality::One));
        assert_eq!(classify_type::<Option<f64>>(), Ok(Cardinality::One));
    }

    #[test]
    fn booleans_take_no_token() {
        assert_eq!(classify_type::<bool>(), Ok(Cardinality::Zero));
        assert_eq!(classify_type::<Option<bool>>(), Ok(Cardinality::Zero));
    }

    #[test]
    fn text_decoded_bool_takes_one_token() {
        let level = TypeDescriptor::named("Level", prim(Primitive::Bool)).with_text_decoder();
        assert_eq!(classify(&level), Ok(Cardinality::One));
        assert_eq!(classify(&TypeDescriptor::pointer(level)), Ok(Cardinality::One));
    }

    #[test]
    fn containers_take_multiple() {
        assert_eq!(classify_type::<Vec<i32>>(), Ok(Cardinality::Multiple));
        assert_eq!(classify_type::<Vec<Option<u8>>>(), Ok(Cardinality::Multiple));
        assert_eq!(classify_type::<HashMap<String, i32>>(), Ok(Cardinality::Multiple));
        assert_eq!(classify_type::<Option<Vec<String>>>(), Ok(Cardinality::Multiple));
    }

    #[test]
    fn unparsable_element_names_both_types() {
        let err = classify_type::<Vec<Vec<i32>>>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot parse into Vec<Vec<i32>> because Vec<i32> not supported"
        );
    }

    #[test]
    fn map_failure_names_the_side() {
        let err = classify_type::<HashMap<Vec<i32>, String>>().unwrap_err();
        assert_eq!(
            err,
            UnsupportedType::Key {
                container: "HashMap<Vec<i32>, String>".into(),
                key: "Vec<i32>".into(),
            }
        );

        let err = classify_type::<HashMap<String, Receiver<i32>>>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot parse into HashMap<String, Receiver<i32>> because value type Receiver<i32> not supported"
        );
    }

    #[test]
    fn other_shapes_are_unsupported() {
        let cases = [
            TypeDescriptor::channel(prim(Primitive::I32)),
            TypeDescriptor::function("fn()"),
            TypeDescriptor::interface("Any"),
            TypeDescriptor::structure(vec![Field {
                name: "X".into(),
                ty: prim(Primitive::I32),
            }]),
        ];
        for ty in cases {
            let result = classify(&ty);
            assert_eq!(Cardinality::from_result(&result), Cardinality::Unsupported);
            assert_eq!(
                result.unwrap_err(),
                UnsupportedType::Shape { ty: ty.to_string() }
            );
        }
    }

    #[test]
    fn only_one_pointer_level_is_unwrapped() {
        let err = classify_type::<Option<Option<Vec<i32>>>>().unwrap_err();
        assert_eq!(err.to_string(), "cannot parse into Option<Vec<i32>>");
    }

    #[test]
    fn custom_scalar_support_is_consulted() {
        struct OnlyStrings;
        impl ScalarSupport for OnlyStrings {
            fn can_parse(&self, ty: &TypeDescriptor) -> bool {
                ty.as_primitive() == Some(Primitive::String)
            }
        }

        let ty = TypeDescriptor::sequence(prim(Primitive::I32));
        assert!(matches!(
            cardinality_of(&ty, &OnlyStrings),
            Err(UnsupportedType::Element { .. })
        ));
        assert_eq!(
            cardinality_of(&prim(Primitive::Bool), &OnlyStrings).unwrap_err(),
            UnsupportedType::Shape { ty: "bool".into() }
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(Cardinality::Zero.to_string(), "zero");
        assert_eq!(Cardinality::Multiple.to_string(), "multiple");
        assert_eq!(Cardinality::Unsupported.to_string(), "unsupported");
    }
}
