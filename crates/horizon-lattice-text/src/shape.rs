//! Filled and outlined rectangles.
//!
//! Underline and strike-through decorations are drawn as [`RectangleShape`]s
//! next to the glyph quads.

use crate::types::{Color, Point, Rect, Size};

/// An axis-aligned rectangle with a fill color and an optional outline.
///
/// The outline is drawn outside the rectangle, `outline_thickness` pixels wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleShape {
    /// Top-left corner in local coordinates.
    pub position: Point,
    /// Width and height.
    pub size: Size,
    /// Interior color.
    pub fill_color: Color,
    /// Outline color.
    pub outline_color: Color,
    /// Outline width in pixels; zero disables the outline.
    pub outline_thickness: f32,
}

impl Default for RectangleShape {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            size: Size::ZERO,
            fill_color: Color::WHITE,
            outline_color: Color::WHITE,
            outline_thickness: 0.0,
        }
    }
}

impl RectangleShape {
    /// Create a white, unoutlined rectangle.
    pub fn new(position: Point, size: Size) -> Self {
        Self {
            position,
            size,
            ..Default::default()
        }
    }

    /// Fill with a solid color and drop any outline.
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill_color = color;
        self.outline_thickness = 0.0;
        self
    }

    /// Leave the interior transparent and stroke the edge instead.
    pub fn with_outline(mut self, color: Color, thickness: f32) -> Self {
        self.fill_color = Color::TRANSPARENT;
        self.outline_color = color;
        self.outline_thickness = thickness;
        self
    }

    /// Check whether the outline is drawn.
    pub fn is_outlined(&self) -> bool {
        self.outline_thickness > 0.0
    }

    /// The rectangle without its outline.
    pub fn rect(&self) -> Rect {
        Rect {
            origin: self.position,
            size: self.size,
        }
    }

    /// The rectangle including its outline.
    pub fn bounds(&self) -> Rect {
        let t = self.outline_thickness.max(0.0);
        Rect::new(
            self.position.x - t,
            self.position.y - t,
            self.size.width + t * 2.0,
            self.size.height + t * 2.0,
        )
    }
}
