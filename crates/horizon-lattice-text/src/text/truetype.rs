//! TrueType/OpenType rasterizer.
//!
//! Uses fontdue for coverage bitmaps and ttf-parser for the font tables
//! fontdue does not expose (family name, underline metrics). One atlas page
//! is kept per character size.

use std::collections::HashMap;

use fontdue::{Font, FontSettings};
use tracing::{debug, trace};

use crate::error::FontLoadError;
use crate::types::Rect;

use super::atlas::{DEFAULT_ATLAS_WIDTH, DEFAULT_MAX_ATLAS_HEIGHT, GlyphAtlas, GlyphTexture};
use super::glyph_cache::Glyph;
use super::rasterizer::{FontInfo, FontSource, Rasterizer};

/// Horizontal growth of bold glyphs, in pixels.
const BOLD_STRENGTH: usize = 1;

/// Font-unit metrics read once from the font tables.
#[derive(Debug, Clone, Copy)]
struct FaceMetrics {
    units_per_em: f32,
    ascender: f32,
    descender: f32,
    line_gap: f32,
    /// Underline (position, thickness) in font units, y-up.
    underline: Option<(f32, f32)>,
}

/// A [`Rasterizer`] over TrueType/OpenType font data.
pub struct TrueTypeRasterizer {
    font: Font,
    metrics: FaceMetrics,
    info: FontInfo,
    atlas_width: u32,
    max_atlas_height: u32,
    atlases: HashMap<u32, GlyphAtlas>,
    missing: usize,
}

impl TrueTypeRasterizer {
    /// Parse font file contents.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontLoadError> {
        let (metrics, info) = {
            let face = ttf_parser::Face::parse(&data, 0)
                .map_err(|e| FontLoadError::Parse(e.to_string()))?;
            (read_face_metrics(&face), read_font_info(&face))
        };

        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| FontLoadError::Parse(e.to_string()))?;

        Ok(Self {
            font,
            metrics,
            info,
            atlas_width: DEFAULT_ATLAS_WIDTH,
            max_atlas_height: DEFAULT_MAX_ATLAS_HEIGHT,
            atlases: HashMap::new(),
            missing: 0,
        })
    }

    /// Load and parse a font source.
    pub fn from_source(source: FontSource) -> Result<Self, FontLoadError> {
        Self::from_bytes(source.into_bytes()?)
    }

    /// Set the atlas page width and the height pages may grow to.
    pub fn with_atlas_limits(mut self, width: u32, max_height: u32) -> Self {
        self.atlas_width = width;
        self.max_atlas_height = max_height;
        self
    }

    /// Number of requests so far for codes the font has no glyph for.
    ///
    /// Such codes render the font's `.notdef` glyph.
    pub fn missing_glyphs(&self) -> usize {
        self.missing
    }

    fn scale(&self, char_size: u32) -> f32 {
        char_size as f32 / self.metrics.units_per_em
    }
}

impl Rasterizer for TrueTypeRasterizer {
    fn glyph(
        &mut self,
        code: u8,
        char_size: u32,
        bold: bool,
        outline_thickness: f32,
    ) -> Result<Glyph, FontLoadError> {
        let character = char::from(code);
        if self.font.lookup_glyph_index(character) == 0 {
            trace!(code, "font has no glyph for code");
            self.missing += 1;
        }

        let (metrics, coverage) = self.font.rasterize(character, char_size as f32);
        let mut bitmap = Bitmap {
            width: metrics.width,
            height: metrics.height,
            pixels: coverage,
        };
        let mut left = metrics.xmin as f32;
        let mut top = -(metrics.ymin as f32 + metrics.height as f32);
        let mut advance = metrics.advance_width;

        if bold {
            if !bitmap.is_empty() {
                bitmap = bitmap.embolden(BOLD_STRENGTH);
            }
            advance += BOLD_STRENGTH as f32;
        }

        if outline_thickness > 0.0 && !bitmap.is_empty() {
            let radius = outline_thickness.ceil() as usize;
            bitmap = bitmap.outline_ring(radius);
            left -= radius as f32;
            top -= radius as f32;
        }

        let atlas_width = self.atlas_width;
        let max_atlas_height = self.max_atlas_height;
        let atlas = self
            .atlases
            .entry(char_size)
            .or_insert_with(|| GlyphAtlas::new(atlas_width, max_atlas_height));
        let texture_rect =
            atlas.insert(bitmap.width as u32, bitmap.height as u32, &bitmap.pixels)?;

        Ok(Glyph {
            texture_rect,
            bounds: Rect::new(left, top, bitmap.width as f32, bitmap.height as f32),
            advance,
        })
    }

    fn texture(&mut self, char_size: u32) -> Result<GlyphTexture, FontLoadError> {
        let texture = self
            .atlases
            .get(&char_size)
            .map(GlyphAtlas::texture)
            .unwrap_or_else(|| GlyphTexture::new(1, 1));
        debug!(
            char_size,
            width = texture.width(),
            height = texture.height(),
            missing = self.missing,
            "glyph atlas ready"
        );
        Ok(texture)
    }

    fn line_spacing(&self, char_size: u32) -> f32 {
        let m = &self.metrics;
        (m.ascender - m.descender + m.line_gap) * self.scale(char_size)
    }

    fn underline_position(&self, char_size: u32) -> f32 {
        match self.metrics.underline {
            Some((position, _)) => -position * self.scale(char_size),
            None => char_size as f32 / 10.0,
        }
    }

    fn underline_thickness(&self, char_size: u32) -> f32 {
        match self.metrics.underline {
            Some((_, thickness)) => thickness * self.scale(char_size),
            None => char_size as f32 / 14.0,
        }
    }

    fn info(&self) -> FontInfo {
        self.info.clone()
    }
}

impl std::fmt::Debug for TrueTypeRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeRasterizer")
            .field("info", &self.info)
            .field("metrics", &self.metrics)
            .field("atlas_sizes", &self.atlases.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

fn read_face_metrics(face: &ttf_parser::Face<'_>) -> FaceMetrics {
    FaceMetrics {
        units_per_em: f32::from(face.units_per_em().max(1)),
        ascender: f32::from(face.ascender()),
        descender: f32::from(face.descender()),
        line_gap: f32::from(face.line_gap()),
        underline: face
            .underline_metrics()
            .map(|m| (f32::from(m.position), f32::from(m.thickness))),
    }
}

fn read_font_info(face: &ttf_parser::Face<'_>) -> FontInfo {
    let family = face
        .names()
        .into_iter()
        .filter(|name| name.name_id == ttf_parser::name_id::FAMILY && name.is_unicode())
        .find_map(|name| name.to_string())
        .unwrap_or_default();
    FontInfo { family }
}

/// An 8-bit coverage bitmap, row-major.
#[derive(Debug, Clone, PartialEq)]
struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Bitmap {
    fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Coverage at a signed position, zero outside the bitmap.
    fn at(&self, x: isize, y: isize) -> u8 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0;
        }
        self.pixels[y as usize * self.width + x as usize]
    }

    /// Smear coverage `strength` pixels to the right.
    fn embolden(&self, strength: usize) -> Bitmap {
        let width = self.width + strength;
        let mut pixels = vec![0u8; width * self.height];
        for y in 0..self.height {
            for x in 0..width {
                pixels[y * width + x] = (0..=strength)
                    .map(|dx| self.at(x as isize - dx as isize, y as isize))
                    .max()
                    .unwrap_or(0);
            }
        }
        Bitmap {
            width,
            height: self.height,
            pixels,
        }
    }

    /// The ring between the glyph and its dilation by `radius` pixels.
    fn outline_ring(&self, radius: usize) -> Bitmap {
        let r = radius as isize;
        let width = self.width + radius * 2;
        let height = self.height + radius * 2;
        let mut pixels = vec![0u8; width * height];
        for y in 0..height as isize {
            for x in 0..width as isize {
                let (sx, sy) = (x - r, y - r);
                let mut dilated = 0u8;
                for dy in -r..=r {
                    for dx in -r..=r {
                        if dx * dx + dy * dy <= r * r {
                            dilated = dilated.max(self.at(sx + dx, sy + dy));
                        }
                    }
                }
                pixels[y as usize * width + x as usize] = dilated.saturating_sub(self.at(sx, sy));
            }
        }
        Bitmap {
            width,
            height,
            pixels,
        }
    }
}
