//! Rich text composed of styled parts.
//!
//! A [`RichLayout`] collects [`Part`]s, then [`generate`](RichLayout::generate)
//! splits every part into space-terminated words, wraps them greedily against
//! a maximum width and produces one [`StyledRun`] per word. Each run also
//! records a [`Hitbox`] tagged with its part's [`PartId`], which is what
//! [`point_on`](RichLayout::point_on) searches.
//!
//! The generated state is rebuilt from scratch on every call to `generate`;
//! nothing is tracked incrementally, so changes to parts or the font are only
//! visible after generating again.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use horizon_lattice_text::text::{GlyphCache, Part, RichLayout, TextStyle};
//! use horizon_lattice_text::{Color, Point};
//!
//! let font = Arc::new(GlyphCache::from_file("assets/DejaVuSans.ttf", 20)?);
//! let mut layout = RichLayout::new();
//! layout.set_font(Some(font));
//! layout.set_max_width(300.0);
//!
//! let link = layout.add_part(
//!     Part::new("click here")
//!         .with_color(Color::BLUE)
//!         .with_style(TextStyle::UNDERLINE),
//! );
//! layout.add_part(Part::new(" to continue\n"));
//! layout.generate()?;
//!
//! assert_eq!(layout.point_on(Point::new(5.0, -5.0)), Some(link));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::error::{TextError, TextResult};
use crate::renderer::{Drawable, RenderTarget};
use crate::transform::{Transform2D, Transformable};
use crate::types::{Color, Point, Rect};

use super::glyph_cache::GlyphCache;
use super::latin1;
use super::style::TextStyle;
use super::styled_run::StyledRun;

const WORD_SEPARATOR: char = ' ';

/// Identifier shared by every piece of one [`RichLayout::add_part`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub usize);

/// A styled segment of rich text.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    text: String,
    color: Color,
    corner_colors: Option<[Color; 4]>,
    style: TextStyle,
    id: PartId,
    line_break: bool,
}

impl Part {
    /// Create a white, regular part.
    ///
    /// # Panics
    ///
    /// Panics if `text` contains a character above U+00FF.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        assert!(
            latin1::is_encodable(&text),
            "part text {text:?} contains characters outside the single-byte range"
        );
        Self {
            text,
            color: Color::WHITE,
            corner_colors: None,
            style: TextStyle::REGULAR,
            id: PartId(0),
            line_break: false,
        }
    }

    /// Set the text color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Override the color per corner: top-left, top-right, bottom-right, bottom-left.
    pub fn with_corner_colors(mut self, colors: [Color; 4]) -> Self {
        self.corner_colors = Some(colors);
        self
    }

    /// Set the style flags.
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// The part's text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The part's color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// The per-corner override, if any.
    pub fn corner_colors(&self) -> Option<[Color; 4]> {
        self.corner_colors
    }

    /// The part's style flags.
    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// The identifier assigned when the part was added.
    pub fn id(&self) -> PartId {
        self.id
    }

    /// Whether the part was terminated by a newline.
    pub fn is_line_break(&self) -> bool {
        self.line_break
    }

    fn piece(&self, text: &str, id: PartId, line_break: bool) -> Self {
        Self {
            text: text.to_owned(),
            id,
            line_break,
            ..self.clone()
        }
    }

    /// Split into space-terminated words plus the remainder, which may be empty.
    fn words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.text.split_inclusive(WORD_SEPARATOR).collect();
        if words.last().is_none_or(|word| word.ends_with(WORD_SEPARATOR)) {
            words.push("");
        }
        words
    }
}

/// The clickable area of one generated run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    /// Part the run came from.
    pub id: PartId,
    /// Area in layout-local coordinates.
    pub rect: Rect,
}

/// Multi-part styled text with word wrapping and hit-testing.
#[derive(Debug, Clone, Default)]
pub struct RichLayout {
    font: Option<Arc<GlyphCache>>,
    max_width: f32,
    parts: Vec<Part>,
    next_id: usize,
    runs: Vec<StyledRun>,
    hitboxes: Vec<Hitbox>,
    generated: bool,
    placement: Transformable,
}

impl RichLayout {
    /// Create an empty layout without a font and without wrapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// The glyph cache, if one is assigned.
    pub fn font(&self) -> Option<&Arc<GlyphCache>> {
        self.font.as_ref()
    }

    /// Assign or remove the glyph cache used by the next generation.
    pub fn set_font(&mut self, font: Option<Arc<GlyphCache>>) {
        self.font = font;
    }

    /// The character size of the assigned cache.
    pub fn char_size(&self) -> Option<u32> {
        self.font.as_ref().map(|font| font.char_size())
    }

    /// The wrap width; zero or less disables wrapping.
    pub fn max_width(&self) -> f32 {
        self.max_width
    }

    /// Set the wrap width used by the next generation.
    pub fn set_max_width(&mut self, max_width: f32) {
        self.max_width = max_width;
    }

    /// Append a part and return its identifier.
    ///
    /// Text containing newlines is stored as several pieces sharing the
    /// returned identifier. Every piece that ended at a newline is a line
    /// break; the piece after the last newline is always stored, even when
    /// empty.
    pub fn add_part(&mut self, part: Part) -> PartId {
        let id = PartId(self.next_id);
        self.next_id += 1;

        let mut pieces = part.text.split(char::from(latin1::NEWLINE)).peekable();
        while let Some(text) = pieces.next() {
            let line_break = pieces.peek().is_some();
            self.parts.push(part.piece(text, id, line_break));
        }
        id
    }

    /// The stored part pieces in insertion order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Lay out every part into runs and hitboxes.
    ///
    /// Words are placed left to right. When wrapping is enabled, a word that
    /// would cross the wrap width moves to the start of the next line first;
    /// words are never split. A line-break part ends its line after its last
    /// word.
    pub fn generate(&mut self) -> TextResult<()> {
        let font = self.font.clone().ok_or(TextError::NoFont)?;
        self.runs.clear();
        self.hitboxes.clear();

        let line_spacing = font.line_spacing();
        let lift = Point::new(0.0, font.char_size() as f32);
        let mut pen = Point::ZERO;
        let mut lines = 1usize;

        for part in &self.parts {
            let words = part.words();
            let last = words.len() - 1;
            for (i, word) in words.into_iter().enumerate() {
                let mut run = StyledRun::new(word, Some(font.clone()), part.color, part.style);
                if let Some(colors) = part.corner_colors {
                    run.set_corner_colors(colors);
                }

                let end = run.find_character_pos(run.len())?;
                if self.max_width > 0.0 && pen.x + end.x > self.max_width {
                    pen.x = 0.0;
                    pen.y += line_spacing;
                    lines += 1;
                }

                run.set_position(pen);
                self.hitboxes.push(Hitbox {
                    id: part.id,
                    rect: Rect::from_corners(pen - lift, run.transform().transform_point(end)),
                });
                pen.x += end.x;

                if part.line_break && i == last {
                    pen.x = 0.0;
                    pen.y += line_spacing;
                    lines += 1;
                }
                self.runs.push(run);
            }
        }

        self.generated = true;
        debug!(
            parts = self.parts.len(),
            runs = self.runs.len(),
            lines,
            max_width = self.max_width,
            "generated rich layout"
        );
        Ok(())
    }

    /// The generated runs, one per word.
    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    /// The generated hitboxes, in insertion order.
    pub fn hitboxes(&self) -> &[Hitbox] {
        &self.hitboxes
    }

    /// Check whether generated state is available.
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    fn assert_generated(&self) {
        assert!(self.generated, "rich layout queried before generate() was called");
    }

    /// Find the part under a point given in the parent's coordinates.
    ///
    /// Overlapping hitboxes resolve to the earliest one.
    ///
    /// # Panics
    ///
    /// Panics if the layout has not been generated.
    pub fn point_on(&self, point: Point) -> Option<PartId> {
        self.assert_generated();
        let local = self.placement.inverse_transform()?.transform_point(point);
        self.hitboxes
            .iter()
            .find(|hitbox| hitbox.rect.contains(local))
            .map(|hitbox| hitbox.id)
    }

    /// The box from the local origin to the furthest hitbox edges.
    ///
    /// # Panics
    ///
    /// Panics if the layout has not been generated.
    pub fn local_bounds(&self) -> Rect {
        self.assert_generated();
        let (width, height) = self.hitboxes.iter().fold((0.0f32, 0.0f32), |(w, h), hitbox| {
            (w.max(hitbox.rect.right()), h.max(hitbox.rect.bottom()))
        });
        Rect::new(0.0, 0.0, width, height)
    }

    /// The local bounds mapped through the layout's transform.
    ///
    /// # Panics
    ///
    /// Panics if the layout has not been generated.
    pub fn global_bounds(&self) -> Rect {
        self.transform().transform_rect(&self.local_bounds())
    }

    /// Remove every part, run and hitbox.
    ///
    /// Identifiers keep counting up, so ids handed out before the call are
    /// never reused. The layout must be generated again before it is queried.
    pub fn clear(&mut self) {
        self.parts.clear();
        self.runs.clear();
        self.hitboxes.clear();
        self.generated = false;
    }

    /// The layout's placement.
    pub fn transformable(&self) -> &Transformable {
        &self.placement
    }

    /// Mutable access to the layout's placement.
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
}

impl Drawable for RichLayout {
    fn draw(&mut self, target: &mut dyn RenderTarget, parent: &Transform2D) -> TextResult<()> {
        let transform = parent.then(&self.transform());
        for run in &mut self.runs {
            run.draw(target, &transform)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(layout: &RichLayout) -> Vec<&str> {
        layout.parts().iter().map(Part::text).collect()
    }

    #[test]
    fn test_ids_count_per_call() {
        let mut layout = RichLayout::new();
        assert_eq!(layout.add_part(Part::new("a")), PartId(0));
        assert_eq!(layout.add_part(Part::new("b\nc\nd")), PartId(1));
        assert_eq!(layout.add_part(Part::new("e")), PartId(2));

        let ids: Vec<_> = layout.parts().iter().map(Part::id).collect();
        assert_eq!(ids, [PartId(0), PartId(1), PartId(1), PartId(1), PartId(2)]);
    }

    #[test]
    fn test_newline_split_marks_breaks() {
        let mut layout = RichLayout::new();
        layout.add_part(Part::new("ab\ncd").with_color(Color::RED));

        assert_eq!(texts(&layout), ["ab", "cd"]);
        assert!(layout.parts()[0].is_line_break());
        assert!(!layout.parts()[1].is_line_break());
        assert!(layout.parts().iter().all(|p| p.color() == Color::RED));
    }

    #[test]
    fn test_trailing_newline_leaves_empty_piece() {
        let mut layout = RichLayout::new();
        layout.add_part(Part::new("line\n"));
        assert_eq!(texts(&layout), ["line", ""]);
        assert!(layout.parts()[0].is_line_break());
        assert!(!layout.parts()[1].is_line_break());
    }

    #[test]
    fn test_words_keep_trailing_space() {
        assert_eq!(Part::new("one two").words(), ["one ", "two"]);
        assert_eq!(Part::new("one two ").words(), ["one ", "two ", ""]);
        assert_eq!(Part::new("").words(), [""]);
        assert_eq!(Part::new("  ").words(), [" ", " ", ""]);
    }

    #[test]
    fn test_clear_keeps_counting() {
        let mut layout = RichLayout::new();
        layout.add_part(Part::new("a"));
        layout.clear();
        assert!(layout.parts().is_empty());
        assert!(!layout.is_generated());
        assert_eq!(layout.add_part(Part::new("b")), PartId(1));
    }

    #[test]
    fn test_generate_without_font_fails() {
        let mut layout = RichLayout::new();
        layout.add_part(Part::new("a"));
        assert!(matches!(layout.generate(), Err(TextError::NoFont)));
        assert!(!layout.is_generated());
    }

    #[test]
    #[should_panic(expected = "before generate()")]
    fn test_point_on_before_generate_panics() {
        RichLayout::new().point_on(Point::ZERO);
    }

    #[test]
    #[should_panic(expected = "single-byte range")]
    fn test_wide_characters_are_rejected() {
        Part::new("snow ☃");
    }
}
