//! Exported field names.

use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// Whether `name` is exported: its first character is an uppercase letter.
///
/// "Uppercase letter" is the Unicode general category `Lu`. Uppercase
/// symbols such as `Ⓐ` (`So`) or `Ⅰ` (`Nl`) do not count.
pub fn is_exported(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|c| c.general_category() == GeneralCategory::UppercaseLetter)
}

/// Like [`is_exported`], for names that may not be valid UTF-8.
///
/// Returns false when the leading bytes do not decode to a character.
pub fn is_exported_bytes(name: &[u8]) -> bool {
    // The first chunk's valid part is empty when the name starts with a
    // bad byte.
    name.utf8_chunks()
        .next()
        .is_some_and(|chunk| is_exported(chunk.valid()))
}
