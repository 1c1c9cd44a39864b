//! Eagerly materialized glyph cache.
//!
//! A [`GlyphCache`] asks its rasterizer for every one of the 256 codes, in
//! both regular and bold weight, while it is being built. Lookups afterwards
//! are plain array indexing and cannot fail or trigger rasterizer work.
//! Any rasterizer failure therefore happens at construction time, where it is
//! reported as a [`FontLoadError`], and never in the middle of drawing.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use horizon_lattice_text::text::{GlyphCache, StyledRun, TextStyle};
//! use horizon_lattice_text::Color;
//!
//! let font = Arc::new(GlyphCache::from_file("assets/DejaVuSans.ttf", 20)?);
//! let glyph = font.glyph(b'A', false);
//! println!("'A' advances by {} px", glyph.advance);
//!
//! let mut run = StyledRun::new("Hello", Some(font), Color::WHITE, TextStyle::BOLD);
//! let bounds = run.local_bounds()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::FontLoadError;
use crate::types::{IntRect, Rect};

use super::atlas::{DEFAULT_ATLAS_WIDTH, DEFAULT_MAX_ATLAS_HEIGHT, GlyphTexture};
use super::rasterizer::{FontInfo, FontSource, Rasterizer};
use super::truetype::TrueTypeRasterizer;

/// Number of codes in a glyph table.
pub const GLYPH_COUNT: usize = 256;

/// Precomputed placement data for one character code and boldness.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Glyph {
    /// Region of the atlas texture holding the glyph's pixels.
    pub texture_rect: IntRect,
    /// Drawing box relative to the pen position on the baseline.
    pub bounds: Rect,
    /// Horizontal pen advance.
    pub advance: f32,
}

/// Configuration for building a glyph cache.
#[derive(Debug, Clone)]
pub struct GlyphCacheConfig {
    /// Character size in pixels, fixed for the cache's lifetime.
    pub char_size: u32,
    /// Glyph outline thickness; zero renders filled glyphs.
    ///
    /// Must not exceed `char_size`.
    pub outline_thickness: f32,
    /// Atlas page width used by the built-in rasterizer.
    pub atlas_width: u32,
    /// Largest atlas page height the built-in rasterizer may grow to.
    pub max_atlas_height: u32,
}

impl Default for GlyphCacheConfig {
    fn default() -> Self {
        Self {
            char_size: 30,
            outline_thickness: 0.0,
            atlas_width: DEFAULT_ATLAS_WIDTH,
            max_atlas_height: DEFAULT_MAX_ATLAS_HEIGHT,
        }
    }
}

impl GlyphCacheConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the character size.
    pub fn char_size(mut self, size: u32) -> Self {
        self.char_size = size;
        self
    }

    /// Set the outline thickness.
    pub fn outline_thickness(mut self, thickness: f32) -> Self {
        self.outline_thickness = thickness;
        self
    }

    /// Set the atlas page width.
    pub fn atlas_width(mut self, width: u32) -> Self {
        self.atlas_width = width;
        self
    }

    /// Set the maximum atlas page height.
    pub fn max_atlas_height(mut self, height: u32) -> Self {
        self.max_atlas_height = height;
        self
    }

    fn validate(&self) -> Result<(), FontLoadError> {
        if self.char_size == 0 {
            return Err(FontLoadError::InvalidCharSize(self.char_size));
        }
        let thickness = self.outline_thickness;
        if !thickness.is_finite() || thickness < 0.0 || thickness > self.char_size as f32 {
            return Err(FontLoadError::InvalidOutlineThickness(self.outline_thickness));
        }
        Ok(())
    }
}

/// Every glyph of a font at one size, loaded up front.
///
/// The cache is immutable once built. Share it between runs and layouts with
/// an `Arc`; it is never copied per run.
pub struct GlyphCache {
    char_size: u32,
    outline_thickness: f32,
    regular: [Glyph; GLYPH_COUNT],
    bold: [Glyph; GLYPH_COUNT],
    texture: GlyphTexture,
    line_spacing: f32,
    underline_position: f32,
    underline_thickness: f32,
    info: FontInfo,
}

impl GlyphCache {
    /// Load a font file at the given character size.
    pub fn from_file(path: impl AsRef<Path>, char_size: u32) -> Result<Self, FontLoadError> {
        Self::from_source(
            FontSource::File(path.as_ref().to_path_buf()),
            &GlyphCacheConfig::new().char_size(char_size),
        )
    }

    /// Load font file contents at the given character size.
    pub fn from_bytes(data: impl Into<Vec<u8>>, char_size: u32) -> Result<Self, FontLoadError> {
        Self::from_source(
            FontSource::Bytes(data.into()),
            &GlyphCacheConfig::new().char_size(char_size),
        )
    }

    /// Load a font from a stream at the given character size.
    pub fn from_reader(reader: impl Read, char_size: u32) -> Result<Self, FontLoadError> {
        Self::from_source(
            FontSource::from_reader(reader)?,
            &GlyphCacheConfig::new().char_size(char_size),
        )
    }

    /// Load a font with the built-in TrueType rasterizer.
    pub fn from_source(
        source: FontSource,
        config: &GlyphCacheConfig,
    ) -> Result<Self, FontLoadError> {
        config.validate()?;
        let mut rasterizer = TrueTypeRasterizer::from_source(source)?
            .with_atlas_limits(config.atlas_width, config.max_atlas_height);
        Self::from_rasterizer(&mut rasterizer, config)
    }

    /// Build the cache from any rasterizer.
    ///
    /// Issues one request per code and boldness (512 in total) plus one
    /// texture request. The first failure aborts construction.
    pub fn from_rasterizer<R: Rasterizer + ?Sized>(
        rasterizer: &mut R,
        config: &GlyphCacheConfig,
    ) -> Result<Self, FontLoadError> {
        config.validate()?;
        let char_size = config.char_size;
        let outline_thickness = config.outline_thickness;

        let mut regular = [Glyph::default(); GLYPH_COUNT];
        let mut bold = [Glyph::default(); GLYPH_COUNT];
        for code in 0..=u8::MAX {
            regular[code as usize] = rasterizer.glyph(code, char_size, false, outline_thickness)?;
        }
        for code in 0..=u8::MAX {
            bold[code as usize] = rasterizer.glyph(code, char_size, true, outline_thickness)?;
        }
        let texture = rasterizer.texture(char_size)?;

        let cache = Self {
            char_size,
            outline_thickness,
            regular,
            bold,
            texture,
            line_spacing: rasterizer.line_spacing(char_size),
            underline_position: rasterizer.underline_position(char_size),
            underline_thickness: rasterizer.underline_thickness(char_size),
            info: rasterizer.info(),
        };

        debug!(
            char_size,
            outline_thickness,
            atlas_width = cache.texture.width(),
            atlas_height = cache.texture.height(),
            family = %cache.info.family,
            "glyph cache loaded"
        );

        Ok(cache)
    }

    /// Look up the glyph for a code.
    #[inline]
    pub fn glyph(&self, code: u8, bold: bool) -> &Glyph {
        if bold {
            &self.bold[code as usize]
        } else {
            &self.regular[code as usize]
        }
    }

    /// The character size the cache was built for.
    pub fn char_size(&self) -> u32 {
        self.char_size
    }

    /// The outline thickness the cache was built for.
    pub fn outline_thickness(&self) -> f32 {
        self.outline_thickness
    }

    /// The atlas texture all glyph rectangles refer to.
    pub fn texture(&self) -> &GlyphTexture {
        &self.texture
    }

    /// Distance between two consecutive baselines.
    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    /// Offset of the underline below the baseline.
    pub fn underline_position(&self) -> f32 {
        self.underline_position
    }

    /// Thickness of underline and strike-through decorations.
    pub fn underline_thickness(&self) -> f32 {
        self.underline_thickness
    }

    /// Descriptive information about the font.
    pub fn info(&self) -> &FontInfo {
        &self.info
    }
}

impl std::fmt::Debug for GlyphCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphCache")
            .field("char_size", &self.char_size)
            .field("outline_thickness", &self.outline_thickness)
            .field("line_spacing", &self.line_spacing)
            .field("texture_size", &self.texture.size())
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encodes the request in the glyph so lookups can be traced back.
    #[derive(Default)]
    struct EchoRasterizer {
        glyph_calls: usize,
        texture_calls: usize,
        fail_on: Option<(u8, bool)>,
    }

    impl Rasterizer for EchoRasterizer {
        fn glyph(
            &mut self,
            code: u8,
            char_size: u32,
            bold: bool,
            outline_thickness: f32,
        ) -> Result<Glyph, FontLoadError> {
            self.glyph_calls += 1;
            if self.fail_on == Some((code, bold)) {
                return Err(FontLoadError::Glyph {
                    code,
                    bold,
                    reason: "corrupt bitmap".into(),
                });
            }
            Ok(Glyph {
                texture_rect: IntRect::new(code as i32, bold as i32, 1, 1),
                bounds: Rect::new(0.0, -(char_size as f32), 1.0, outline_thickness),
                advance: code as f32 + if bold { 0.5 } else { 0.0 },
            })
        }

        fn texture(&mut self, _char_size: u32) -> Result<GlyphTexture, FontLoadError> {
            self.texture_calls += 1;
            Ok(GlyphTexture::new(256, 2))
        }

        fn line_spacing(&self, char_size: u32) -> f32 {
            char_size as f32 * 1.25
        }

        fn underline_position(&self, _char_size: u32) -> f32 {
            2.0
        }

        fn underline_thickness(&self, _char_size: u32) -> f32 {
            1.0
        }

        fn info(&self) -> FontInfo {
            FontInfo {
                family: "Echo".into(),
            }
        }
    }

    #[test]
    fn test_every_code_is_loaded_once() {
        let mut rasterizer = EchoRasterizer::default();
        let config = GlyphCacheConfig::new().char_size(16).outline_thickness(2.0);
        let cache = GlyphCache::from_rasterizer(&mut rasterizer, &config).unwrap();

        assert_eq!(rasterizer.glyph_calls, 512);
        assert_eq!(rasterizer.texture_calls, 1);

        for code in 0..=u8::MAX {
            assert_eq!(cache.glyph(code, false).advance, code as f32);
            assert_eq!(cache.glyph(code, true).advance, code as f32 + 0.5);
            assert_eq!(cache.glyph(code, true).texture_rect.top, 1);
        }
        assert_eq!(cache.glyph(b'A', false).bounds.height(), 2.0);
    }

    #[test]
    fn test_metrics_are_captured() {
        let mut rasterizer = EchoRasterizer::default();
        let cache =
            GlyphCache::from_rasterizer(&mut rasterizer, &GlyphCacheConfig::new().char_size(20))
                .unwrap();
        assert_eq!(cache.char_size(), 20);
        assert_eq!(cache.outline_thickness(), 0.0);
        assert_eq!(cache.line_spacing(), 25.0);
        assert_eq!(cache.underline_position(), 2.0);
        assert_eq!(cache.underline_thickness(), 1.0);
        assert_eq!(cache.texture().size(), (256, 2));
        assert_eq!(cache.info().family, "Echo");
    }

    #[test]
    fn test_rasterizer_failure_aborts_construction() {
        let mut rasterizer = EchoRasterizer {
            fail_on: Some((200, true)),
            ..Default::default()
        };
        let err = GlyphCache::from_rasterizer(&mut rasterizer, &GlyphCacheConfig::new())
            .unwrap_err();
        assert!(matches!(err, FontLoadError::Glyph { code: 200, bold: true, .. }));
        assert_eq!(rasterizer.texture_calls, 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut rasterizer = EchoRasterizer::default();
        let config = GlyphCacheConfig::new().char_size(0);
        let err = GlyphCache::from_rasterizer(&mut rasterizer, &config).unwrap_err();
        assert!(matches!(err, FontLoadError::InvalidCharSize(0)));

        let err = GlyphCache::from_rasterizer(
            &mut rasterizer,
            &GlyphCacheConfig::new().outline_thickness(-1.0),
        )
        .unwrap_err();
        assert!(matches!(err, FontLoadError::InvalidOutlineThickness(_)));
        assert_eq!(rasterizer.glyph_calls, 0);
    }

    #[test]
    fn test_outline_thicker_than_char_size_is_rejected() {
        let mut rasterizer = EchoRasterizer::default();
        let config = GlyphCacheConfig::new().char_size(20).outline_thickness(1e6);
        let err = GlyphCache::from_rasterizer(&mut rasterizer, &config).unwrap_err();
        assert!(matches!(err, FontLoadError::InvalidOutlineThickness(t) if t == 1e6));
        assert_eq!(rasterizer.glyph_calls, 0);

        // Exactly the character size is still accepted.
        let config = GlyphCacheConfig::new().char_size(20).outline_thickness(20.0);
        assert!(GlyphCache::from_rasterizer(&mut rasterizer, &config).is_ok());
    }

    #[test]
    fn test_unparseable_bytes_fail_to_load() {
        let err = GlyphCache::from_bytes(b"definitely not a font".to_vec(), 12).unwrap_err();
        assert!(matches!(err, FontLoadError::Parse(_)));
    }

    #[test]
    fn test_missing_file_fails_to_load() {
        let err = GlyphCache::from_file("/nonexistent/horizon/font.ttf", 12).unwrap_err();
        assert!(matches!(err, FontLoadError::Io { .. }));
    }
}
