//! Rasterizer boundary and font sources.
//!
//! A [`Rasterizer`] turns a font into glyph records and an atlas texture. The
//! glyph cache queries it exactly once per code and boldness, then never again.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::error::FontLoadError;

use super::atlas::GlyphTexture;
use super::glyph_cache::Glyph;

/// Where font data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// A font file on disk.
    File(PathBuf),
    /// Font file contents already in memory.
    Bytes(Vec<u8>),
}

impl FontSource {
    /// Read a whole stream into memory.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, FontLoadError> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|source| FontLoadError::Io { path: None, source })?;
        Ok(Self::Bytes(data))
    }

    /// Resolve the source to font file contents.
    pub fn into_bytes(self) -> Result<Vec<u8>, FontLoadError> {
        match self {
            Self::File(path) => fs::read(&path).map_err(|source| FontLoadError::Io {
                path: Some(path),
                source,
            }),
            Self::Bytes(data) => Ok(data),
        }
    }
}

impl From<PathBuf> for FontSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<Vec<u8>> for FontSource {
    fn from(data: Vec<u8>) -> Self {
        Self::Bytes(data)
    }
}

impl From<&[u8]> for FontSource {
    fn from(data: &[u8]) -> Self {
        Self::Bytes(data.to_vec())
    }
}

/// Descriptive information about a font.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontInfo {
    /// Family name, empty if the font does not declare one.
    pub family: String,
}

/// Produces glyph records and atlas textures for one font.
///
/// Coordinates are y-down with the baseline at y = 0: a glyph's `bounds.top`
/// is negative for ink above the baseline.
pub trait Rasterizer {
    /// Rasterize one code at a size, boldness and outline thickness.
    ///
    /// The returned texture rectangle refers to the texture later returned by
    /// [`texture`](Self::texture) for the same size.
    fn glyph(
        &mut self,
        code: u8,
        char_size: u32,
        bold: bool,
        outline_thickness: f32,
    ) -> Result<Glyph, FontLoadError>;

    /// The atlas holding every glyph rasterized so far at `char_size`.
    fn texture(&mut self, char_size: u32) -> Result<GlyphTexture, FontLoadError>;

    /// Distance between two consecutive baselines.
    fn line_spacing(&self, char_size: u32) -> f32;

    /// Offset of the underline's top edge below the baseline.
    fn underline_position(&self, char_size: u32) -> f32;

    /// Thickness of the underline.
    fn underline_thickness(&self, char_size: u32) -> f32;

    /// Descriptive information about the font.
    fn info(&self) -> FontInfo {
        FontInfo::default()
    }
}
