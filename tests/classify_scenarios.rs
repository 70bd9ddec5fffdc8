//! End-to-end classification through the public API.

use std::collections::HashMap;
use std::sync::mpsc::Receiver;

use fieldarity::field::{
    classify, classify_type, is_exported, is_presence_flag, is_text_decodable, is_zero,
    Cardinality, UnsupportedType,
};
use fieldarity::types::syntax::MAX_DEPTH;
use fieldarity::types::{
    describe, Describe, Primitive, SyntaxError, TypeDescriptor, TypeRegistry, Value,
};

/// A bool-shaped type that decodes its own text ("on"/"off").
#[derive(Debug, Default)]
struct Toggle(bool);

impl Describe for Toggle {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::named("Toggle", TypeDescriptor::primitive(Primitive::Bool))
            .with_text_decoder()
    }

    fn to_value(&self) -> Value {
        Value::Bool(self.0)
    }
}

// =============================================================================
// CARDINALITY
// =============================================================================

#[test]
fn test_sequence_of_ints_is_multiple() {
    assert_eq!(classify_type::<Vec<i32>>(), Ok(Cardinality::Multiple));
}

#[test]
fn test_string_keyed_map_is_multiple() {
    assert_eq!(classify_type::<HashMap<String, i32>>(), Ok(Cardinality::Multiple));
}

#[test]
fn test_map_of_channels_fails_on_value_side() {
    let err = classify_type::<HashMap<String, Receiver<i32>>>().unwrap_err();
    assert!(matches!(err, UnsupportedType::Value { ref value, .. } if value == "Receiver<i32>"));
    assert!(err.to_string().contains("value type"));
}

#[test]
fn test_optional_bool_is_presence_flag() {
    assert_eq!(classify_type::<Option<bool>>(), Ok(Cardinality::Zero));
}

#[test]
fn test_text_decoded_bool_takes_one_token() {
    assert_eq!(classify_type::<Toggle>(), Ok(Cardinality::One));
    assert_eq!(classify_type::<Option<Toggle>>(), Ok(Cardinality::One));
    assert_eq!(classify_type::<Vec<Toggle>>(), Ok(Cardinality::Multiple));
}

#[test]
fn test_every_primitive_is_a_scalar() {
    for p in Primitive::ALL {
        let ty = TypeDescriptor::primitive(p);
        let expected = if p == Primitive::Bool {
            Cardinality::Zero
        } else {
            Cardinality::One
        };
        assert_eq!(classify(&ty), Ok(expected), "{}", ty);
        assert_eq!(classify(&TypeDescriptor::pointer(ty)), Ok(expected));
    }
}

#[test]
fn test_error_is_present_exactly_when_unsupported() {
    let registry = TypeRegistry::new();
    let exprs = [
        "bool",
        "Option<String>",
        "Vec<Duration>",
        "HashMap<PathBuf, Option<u8>>",
        "Vec<HashMap<String, i32>>",
        "HashMap<Vec<u8>, i32>",
        "Receiver<bool>",
        "fn(i32) -> bool",
        "Box<dyn Any>",
    ];
    for expr in exprs {
        let ty = registry.parse(expr).unwrap();
        let result = classify(&ty);
        assert_ne!(result, Ok(Cardinality::Unsupported), "{}", expr);
        assert_eq!(
            Cardinality::from_result(&result) == Cardinality::Unsupported,
            result.is_err(),
            "{}",
            expr
        );
    }
}

#[test]
fn test_key_and_value_failures_are_distinguished() {
    let registry = TypeRegistry::new();

    let key = classify(&registry.parse("HashMap<Vec<u8>, i32>").unwrap()).unwrap_err();
    assert_eq!(
        key.to_string(),
        "cannot parse into HashMap<Vec<u8>, i32> because key type Vec<u8> not supported"
    );

    let value = classify(&registry.parse("HashMap<i32, Vec<u8>>").unwrap()).unwrap_err();
    assert_eq!(
        value.to_string(),
        "cannot parse into HashMap<i32, Vec<u8>> because value type Vec<u8> not supported"
    );
}

#[test]
fn test_optional_container_reports_unwrapped_type() {
    let err = classify_type::<Option<Vec<Receiver<u8>>>>().unwrap_err();
    assert_eq!(
        err,
        UnsupportedType::Element {
            container: "Vec<Receiver<u8>>".into(),
            element: "Receiver<u8>".into(),
        }
    );
}

// =============================================================================
// PREDICATES
// =============================================================================

#[test]
fn test_text_decoding_always_beats_bool_shape() {
    for ty in [describe::<Toggle>(), describe::<Option<Toggle>>()] {
        assert!(is_text_decodable(&ty));
        assert!(!is_presence_flag(&ty));
    }
}

#[test]
fn test_zero_values_of_rust_types() {
    let unset: Option<u32> = None;
    assert!(is_zero(&unset.to_value()));
    assert!(!is_zero(&Some(0_u32).to_value()));
    assert!(!is_zero(&Vec::<i32>::new().to_value()));
    assert!(!is_zero(&HashMap::<String, i32>::new().to_value()));
    assert!(is_zero(&0_i16.to_value()));
    assert!(is_zero(&String::new().to_value()));
    assert!(is_zero(&Toggle::default().to_value()));
}

#[test]
fn test_zero_values_of_unset_handles() {
    assert!(is_zero(&Value::Sequence(None)));
    assert!(is_zero(&Value::Map(None)));
    assert!(is_zero(&Value::Interface(None)));
}

#[test]
fn test_exported_names() {
    assert!(is_exported("Count"));
    assert!(!is_exported("count"));
    assert!(!is_exported(""));
    assert!(is_exported("Ω"));
    assert!(!is_exported("ω"));
}

#[test]
fn test_uppercase_symbols_are_not_exported() {
    assert!(!is_exported("Ⓐx"));
    assert!(!is_exported("Ⅰx"));
}

// =============================================================================
// TYPE EXPRESSIONS
// =============================================================================

#[test]
fn test_deeply_nested_expression_is_rejected() {
    let levels = 2_000;
    let expr = format!("{}i32{}", "Vec<".repeat(levels), ">".repeat(levels));
    let err = TypeRegistry::new().parse(&expr).unwrap_err();
    assert_eq!(err, SyntaxError::TooDeep { limit: MAX_DEPTH });
}
