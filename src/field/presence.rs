//! Presence flags and text decoders.

use crate::types::TypeDescriptor;

/// Whether `ty` is set by the mere presence of its option.
///
/// A text decoder always wins: a bool-shaped type that decodes its own text
/// wants exactly one token. Otherwise `bool` and `Option<bool>` are presence
/// flags; the `Option` form tells "unset" apart from "explicitly false".
pub fn is_presence_flag(ty: &TypeDescriptor) -> bool {
    if is_text_decodable(ty) {
        return false;
    }
    ty.is_bool() || ty.pointee().is_some_and(TypeDescriptor::is_bool)
}

/// Whether `ty`, or the pointee of `ty`, supplies its own text decoding.
///
/// Exactly one level of `Option` is looked through, never more.
pub fn is_text_decodable(ty: &TypeDescriptor) -> bool {
    ty.has_text_decoder() || ty.pointee().is_some_and(TypeDescriptor::has_text_decoder)
}
