//! Scalar capability — can a single token become a value of this type?

use std::collections::BTreeSet;

use crate::field::is_text_decodable;
use crate::types::{Kind, TypeDescriptor};

/// The scalar-conversion collaborator's capability query.
///
/// Implementations must look through one level of pointer themselves, so
/// that `Option<T>` is parsable whenever `T` is.
pub trait ScalarSupport {
    fn can_parse(&self, ty: &TypeDescriptor) -> bool;
}

/// Default scalar support: primitives, text decoders, and an extra set of
/// named types the caller knows how to convert.
#[derive(Debug, Clone, Default)]
pub struct StdScalars {
    extra: BTreeSet<String>,
}

impl StdScalars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat the type named `name` as parsable from one token.
    pub fn with_extra(mut self, name: impl Into<String>) -> Self {
        self.extra.insert(name.into());
        self
    }
}

impl ScalarSupport for StdScalars {
    fn can_parse(&self, ty: &TypeDescriptor) -> bool {
        if is_text_decodable(ty) {
            return true;
        }

        let ty = ty.pointee().unwrap_or(ty);

        if ty.name().is_some_and(|name| self.extra.contains(name)) {
            return true;
        }

        matches!(ty.kind(), Kind::Primitive(_))
    }
}

impl<S: ScalarSupport + ?Sized> ScalarSupport for &S {
    fn can_parse(&self, ty: &TypeDescriptor) -> bool {
        (**self).can_parse(ty)
    }
}
