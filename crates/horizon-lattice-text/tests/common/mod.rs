//! Shared fixtures for the text integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use horizon_lattice_text::text::{
    FontInfo, Glyph, GlyphCache, GlyphCacheConfig, GlyphTexture, Rasterizer,
};
use horizon_lattice_text::{FontLoadError, IntRect, Rect};

/// Pen advance of every monospace glyph.
pub const ADVANCE: f32 = 12.0;

/// Width of every monospace glyph box.
pub const GLYPH_WIDTH: f32 = 10.0;

/// Glyphs per atlas row in the monospace texture.
const ATLAS_COLUMNS: i32 = 16;

/// A fixed-advance font: every code is a `10 x char_size` box standing on the
/// baseline and advancing the pen by 12, bold or not.
#[derive(Debug, Default)]
pub struct MonospaceRasterizer {
    pub glyph_calls: usize,
}

impl Rasterizer for MonospaceRasterizer {
    fn glyph(
        &mut self,
        code: u8,
        char_size: u32,
        _bold: bool,
        _outline_thickness: f32,
    ) -> Result<Glyph, FontLoadError> {
        self.glyph_calls += 1;
        let size = char_size as i32;
        let code = i32::from(code);
        Ok(Glyph {
            texture_rect: IntRect::new(
                (code % ATLAS_COLUMNS) * GLYPH_WIDTH as i32,
                (code / ATLAS_COLUMNS) * size,
                GLYPH_WIDTH as i32,
                size,
            ),
            bounds: Rect::new(0.0, -(char_size as f32), GLYPH_WIDTH, char_size as f32),
            advance: ADVANCE,
        })
    }

    fn texture(&mut self, char_size: u32) -> Result<GlyphTexture, FontLoadError> {
        Ok(GlyphTexture::new(
            ATLAS_COLUMNS as u32 * GLYPH_WIDTH as u32,
            16 * char_size,
        ))
    }

    fn line_spacing(&self, char_size: u32) -> f32 {
        char_size as f32 * 1.5
    }

    fn underline_position(&self, _char_size: u32) -> f32 {
        2.0
    }

    fn underline_thickness(&self, _char_size: u32) -> f32 {
        1.0
    }

    fn info(&self) -> FontInfo {
        FontInfo {
            family: "Test Mono".into(),
        }
    }
}

/// A monospace cache with filled glyphs.
pub fn monospace(char_size: u32) -> Arc<GlyphCache> {
    monospace_outlined(char_size, 0.0)
}

/// A monospace cache rendering glyph outlines.
pub fn monospace_outlined(char_size: u32, outline_thickness: f32) -> Arc<GlyphCache> {
    let config = GlyphCacheConfig::new()
        .char_size(char_size)
        .outline_thickness(outline_thickness);
    let cache = GlyphCache::from_rasterizer(&mut MonospaceRasterizer::default(), &config)
        .expect("monospace rasterizer never fails");
    Arc::new(cache)
}

/// Route `tracing` output through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Compare points with a small tolerance.
pub fn approx_eq(a: horizon_lattice_text::Point, b: horizon_lattice_text::Point) -> bool {
    (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
}
