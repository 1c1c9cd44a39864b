//! Error types for the text crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a [`GlyphCache`](crate::text::GlyphCache).
///
/// Every failure of the eager glyph load is reported here, at construction.
/// Once a cache exists, glyph lookups cannot fail.
#[derive(Error, Debug)]
pub enum FontLoadError {
    /// The font file or stream could not be read.
    #[error("failed to read font data{}: {source}", display_path(.path))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// The font data was rejected by the parser.
    #[error("failed to parse font data: {0}")]
    Parse(String),

    /// A character size of zero was requested.
    #[error("invalid character size: {0}")]
    InvalidCharSize(u32),

    /// The outline thickness is negative or not finite.
    #[error("invalid outline thickness: {0}")]
    InvalidOutlineThickness(f32),

    /// The rasterizer refused one of the eager glyph requests.
    #[error("failed to rasterize glyph {code} (bold: {bold}): {reason}")]
    Glyph { code: u8, bold: bool, reason: String },

    /// The glyphs do not fit in the largest allowed atlas page.
    #[error("glyph atlas full: cannot place a {glyph_width}x{glyph_height} glyph in a {width}x{max_height} page")]
    AtlasFull {
        width: u32,
        max_height: u32,
        glyph_width: u32,
        glyph_height: u32,
    },
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" from {}", p.display()))
        .unwrap_or_default()
}

/// Errors that can occur while measuring, laying out or drawing text.
#[derive(Error, Debug)]
pub enum TextError {
    /// The operation needs a glyph cache but none is assigned.
    #[error("no font assigned")]
    NoFont,

    /// Building a glyph cache failed.
    #[error(transparent)]
    FontLoad(#[from] FontLoadError),
}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;
