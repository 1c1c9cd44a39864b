//! A single run of styled text and its geometry.
//!
//! A [`StyledRun`] owns a string, a shared [`GlyphCache`], four corner colors
//! and a [`TextStyle`]. Setters only mark the run dirty; the vertex buffer and
//! decoration rectangles are rebuilt on the next read (bounds, character
//! positions, vertices or drawing).
//!
//! Newlines inside the string are layout breaks: they produce no quad, reset
//! the pen to the left edge and move it down by the font's line spacing.

use std::sync::Arc;

use tracing::trace;

use crate::error::{TextError, TextResult};
use crate::renderer::{Drawable, RenderTarget};
use crate::shape::RectangleShape;
use crate::transform::{Transform2D, Transformable};
use crate::types::{Color, Point, Rect, Size, Vertex};

use super::glyph_cache::{Glyph, GlyphCache};
use super::latin1::{self, NEWLINE};
use super::style::TextStyle;

/// Horizontal shear applied to italic runs.
pub const ITALIC_SHEAR: f32 = -0.2;

/// Styled text with lazily rebuilt quad geometry.
#[derive(Debug, Clone)]
pub struct StyledRun {
    text: Vec<u8>,
    font: Option<Arc<GlyphCache>>,
    corner_colors: [Color; 4],
    style: TextStyle,
    placement: Transformable,
    dirty: bool,
    /// Glyph per code of `text`, newlines included.
    glyphs: Vec<Glyph>,
    vertices: Vec<Vertex>,
    underline: RectangleShape,
    strike_through: RectangleShape,
}

impl Default for StyledRun {
    fn default() -> Self {
        Self {
            text: Vec::new(),
            font: None,
            corner_colors: [Color::WHITE; 4],
            style: TextStyle::REGULAR,
            placement: Transformable::default(),
            dirty: true,
            glyphs: Vec::new(),
            vertices: Vec::new(),
            underline: RectangleShape::default(),
            strike_through: RectangleShape::default(),
        }
    }
}

impl StyledRun {
    /// Create a run.
    ///
    /// # Panics
    ///
    /// Panics if `text` contains a character above U+00FF.
    pub fn new(text: &str, font: Option<Arc<GlyphCache>>, color: Color, style: TextStyle) -> Self {
        Self {
            text: latin1::encode(text),
            font,
            corner_colors: [color; 4],
            style,
            ..Default::default()
        }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// The text as a string.
    pub fn string(&self) -> String {
        latin1::decode(&self.text)
    }

    /// The text as single-byte codes.
    pub fn codes(&self) -> &[u8] {
        &self.text
    }

    /// Number of codes in the text, newlines included.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the text.
    ///
    /// # Panics
    ///
    /// Panics if `text` contains a character above U+00FF.
    pub fn set_string(&mut self, text: &str) {
        self.text = latin1::encode(text);
        self.dirty = true;
    }

    /// Replace the text with raw single-byte codes.
    pub fn set_codes(&mut self, codes: impl Into<Vec<u8>>) {
        self.text = codes.into();
        self.dirty = true;
    }

    /// The glyph cache, if one is assigned.
    pub fn font(&self) -> Option<&Arc<GlyphCache>> {
        self.font.as_ref()
    }

    /// Assign or remove the glyph cache.
    pub fn set_font(&mut self, font: Option<Arc<GlyphCache>>) {
        self.font = font;
        self.dirty = true;
    }

    /// The character size of the assigned cache.
    pub fn char_size(&self) -> Option<u32> {
        self.font.as_ref().map(|font| font.char_size())
    }

    /// The color of the first corner, used for decorations.
    pub fn color(&self) -> Color {
        self.corner_colors[0]
    }

    /// Tint all four corners with one color.
    pub fn set_color(&mut self, color: Color) {
        self.corner_colors = [color; 4];
        self.dirty = true;
    }

    /// Per-corner colors: top-left, top-right, bottom-right, bottom-left.
    pub fn corner_colors(&self) -> [Color; 4] {
        self.corner_colors
    }

    /// Set per-corner colors, applied to every glyph quad.
    pub fn set_corner_colors(&mut self, colors: [Color; 4]) {
        self.corner_colors = colors;
        self.dirty = true;
    }

    /// The style flags.
    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// Set the style flags.
    pub fn set_style(&mut self, style: TextStyle) {
        self.style = style;
        self.dirty = true;
    }

    /// Check whether the geometry is stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// The run's placement.
    pub fn transformable(&self) -> &Transformable {
        &self.placement
    }

    /// Mutable access to the run's placement.
    pub fn transformable_mut(&mut self) -> &mut Transformable {
        &mut self.placement
    }

    /// The position in the parent's space.
    pub fn position(&self) -> Point {
        self.placement.position()
    }

    /// Set the position in the parent's space.
    pub fn set_position(&mut self, position: Point) {
        self.placement.set_position(position);
    }

    /// The local-to-parent transform.
    pub fn transform(&self) -> Transform2D {
        self.placement.transform()
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Rebuild the geometry if it is stale.
    ///
    /// Does nothing when the run is clean or has no font. Rebuilding twice
    /// without a change in between yields identical buffers.
    pub fn update_geometry(&mut self) {
        if !self.dirty {
            return;
        }
        let Some(font) = self.font.clone() else {
            return;
        };

        let bold = self.style.contains(TextStyle::BOLD);
        self.glyphs.clear();
        self.glyphs.extend(self.text.iter().map(|&code| *font.glyph(code, bold)));

        self.vertices.clear();
        let mut pen = Point::ZERO;
        for (&code, glyph) in self.text.iter().zip(&self.glyphs) {
            if code == NEWLINE {
                pen.x = 0.0;
                pen.y += font.line_spacing();
                continue;
            }
            push_quad(&mut self.vertices, pen, glyph, &self.corner_colors);
            pen.x += glyph.advance;
        }

        let width = pen_before(&self.text, &self.glyphs, &font, self.text.len()).x;
        let color = self.color();
        if self.style.contains(TextStyle::UNDERLINE) {
            self.underline = decoration(
                Point::new(0.0, font.underline_position()),
                Size::new(width, font.underline_thickness()),
                color,
                font.outline_thickness(),
            );
        }
        if self.style.contains(TextStyle::STRIKE_THROUGH) {
            let thickness = font.underline_thickness();
            self.strike_through = decoration(
                Point::new(0.0, font.char_size() as f32 / -3.0 + thickness / 2.0),
                Size::new(width, thickness),
                color,
                font.outline_thickness(),
            );
        }

        self.dirty = false;
        trace!(
            codes = self.text.len(),
            vertices = self.vertices.len(),
            "rebuilt styled run geometry"
        );
    }

    fn require_font(&mut self) -> TextResult<Arc<GlyphCache>> {
        let font = self.font.clone().ok_or(TextError::NoFont)?;
        self.update_geometry();
        Ok(font)
    }

    /// The quad vertices, four per non-newline code.
    pub fn vertices(&mut self) -> TextResult<&[Vertex]> {
        self.require_font()?;
        Ok(&self.vertices)
    }

    /// The underline rectangle, if the run is underlined.
    pub fn underline_shape(&mut self) -> TextResult<Option<RectangleShape>> {
        self.require_font()?;
        Ok(self
            .style
            .contains(TextStyle::UNDERLINE)
            .then_some(self.underline))
    }

    /// The strike-through rectangle, if the run is struck through.
    pub fn strike_through_shape(&mut self) -> TextResult<Option<RectangleShape>> {
        self.require_font()?;
        Ok(self
            .style
            .contains(TextStyle::STRIKE_THROUGH)
            .then_some(self.strike_through))
    }

    /// The box spanning every drawable glyph, in local coordinates.
    ///
    /// Text without drawable glyphs has zero bounds.
    pub fn local_bounds(&mut self) -> TextResult<Rect> {
        let font = self.require_font()?;

        let mut top_left = Point::new(f32::INFINITY, f32::INFINITY);
        let mut bottom_right = Point::ZERO;
        let mut pen = Point::ZERO;
        for (&code, glyph) in self.text.iter().zip(&self.glyphs) {
            if code == NEWLINE {
                pen.x = 0.0;
                pen.y += font.line_spacing();
                continue;
            }
            let b = glyph.bounds;
            top_left.x = top_left.x.min(pen.x + b.left());
            top_left.y = top_left.y.min(pen.y + b.top());
            bottom_right.x = bottom_right.x.max(pen.x + b.right());
            bottom_right.y = bottom_right.y.max(pen.y + b.bottom());
            pen.x += glyph.advance;
        }

        if !top_left.x.is_finite() {
            return Ok(Rect::ZERO);
        }
        Ok(Rect::from_corners(top_left, bottom_right))
    }

    /// The local bounds mapped through the run's transform.
    pub fn global_bounds(&mut self) -> TextResult<Rect> {
        let local = self.local_bounds()?;
        Ok(self.transform().transform_rect(&local))
    }

    /// The pen position just before code `index`, in local coordinates.
    ///
    /// `index == len()` gives the pen position after the last code.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn find_character_pos(&mut self, index: usize) -> TextResult<Point> {
        assert!(
            index <= self.text.len(),
            "character index {index} out of range for text of length {}",
            self.text.len()
        );
        let font = self.require_font()?;
        Ok(pen_before(&self.text, &self.glyphs, &font, index))
    }
}

impl Drawable for StyledRun {
    fn draw(&mut self, target: &mut dyn RenderTarget, parent: &Transform2D) -> TextResult<()> {
        let font = self.require_font()?;

        let mut transform = parent.then(&self.transform());
        if self.style.contains(TextStyle::ITALIC) {
            transform = transform.then(&Transform2D::shear_x(ITALIC_SHEAR));
        }

        target.draw_quads(&self.vertices, font.texture(), &transform);
        if self.style.contains(TextStyle::STRIKE_THROUGH) {
            target.draw_rectangle(&self.strike_through, &transform);
        }
        if self.style.contains(TextStyle::UNDERLINE) {
            target.draw_rectangle(&self.underline, &transform);
        }
        Ok(())
    }
}

/// Replay pen movement over the first `index` codes.
fn pen_before(text: &[u8], glyphs: &[Glyph], font: &GlyphCache, index: usize) -> Point {
    let mut pen = Point::ZERO;
    for (&code, glyph) in text.iter().zip(glyphs).take(index) {
        if code == NEWLINE {
            pen.x = 0.0;
            pen.y += font.line_spacing();
        } else {
            pen.x += glyph.advance;
        }
    }
    pen
}

fn push_quad(vertices: &mut Vec<Vertex>, pen: Point, glyph: &Glyph, colors: &[Color; 4]) {
    let b = glyph.bounds;
    let t = glyph.texture_rect;
    let (u0, v0) = (t.left as f32, t.top as f32);
    let (u1, v1) = (t.right() as f32, t.bottom() as f32);

    let corners = [
        (Point::new(b.left(), b.top()), Point::new(u0, v0)),
        (Point::new(b.right(), b.top()), Point::new(u1, v0)),
        (Point::new(b.right(), b.bottom()), Point::new(u1, v1)),
        (Point::new(b.left(), b.bottom()), Point::new(u0, v1)),
    ];
    for ((offset, tex_coords), &color) in corners.into_iter().zip(colors) {
        vertices.push(Vertex::new(pen + offset, tex_coords, color));
    }
}

/// Decorations follow the glyph rendering mode: solid when glyphs are filled,
/// outlined when the cache renders outlines.
fn decoration(position: Point, size: Size, color: Color, outline_thickness: f32) -> RectangleShape {
    let shape = RectangleShape::new(position, size);
    if outline_thickness == 0.0 {
        shape.with_fill(color)
    } else {
        shape.with_outline(color, outline_thickness)
    }
}
