//! Single-byte (Latin-1) character codes.
//!
//! Glyph caches hold exactly 256 codes, the Latin-1 range, where each code
//! is also the Unicode scalar value of the character.

/// The line break code. It is a layout break, never a glyph.
pub const NEWLINE: u8 = b'\n';

/// Encode a string as single-byte codes.
///
/// # Panics
///
/// Panics if `text` contains a character above U+00FF. Callers are expected
/// to validate text before handing it to the layout engine.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = u32::from(c);
            assert!(
                code <= 0xFF,
                "character {c:?} (U+{code:04X}) is outside the single-byte range"
            );
            code as u8
        })
        .collect()
}

/// Check whether every character of `text` has a single-byte code.
pub fn is_encodable(text: &str) -> bool {
    text.chars().all(|c| u32::from(c) <= 0xFF)
}

/// Decode single-byte codes back into a string.
pub fn decode(codes: &[u8]) -> String {
    codes.iter().map(|&code| char::from(code)).collect()
}
