//! Text rendering layer for Horizon Lattice.
//!
//! This crate turns fonts into textured quad geometry for a 2D renderer. It
//! covers three layers:
//!
//! - [`text::GlyphCache`] rasterizes all 256 single-byte codes of a font in
//!   regular and bold weight while it is built. Later lookups are array
//!   indexing and cannot fail.
//! - [`text::StyledRun`] builds quads, underline and strike-through for one
//!   string, lazily and only after a change.
//! - [`text::RichLayout`] composes styled parts with word wrapping and maps
//!   points back to the part under them.
//!
//! Rendering goes through the [`RenderTarget`] trait. [`DrawList`] is a
//! recording implementation for headless use.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use horizon_lattice_text::text::{GlyphCache, Part, RichLayout, TextStyle};
//! use horizon_lattice_text::{Color, DrawList, Drawable, Point, Transform2D};
//!
//! let font = Arc::new(GlyphCache::from_file("assets/font.ttf", 18)?);
//!
//! let mut layout = RichLayout::new();
//! layout.set_font(Some(font));
//! layout.set_max_width(240.0);
//! layout.add_part(Part::new("Warning: ").with_color(Color::RED).with_style(TextStyle::BOLD));
//! layout.add_part(Part::new("the reactor is running hot."));
//! layout.generate()?;
//! layout.set_position(Point::new(20.0, 40.0));
//!
//! let mut list = DrawList::new();
//! layout.draw(&mut list, &Transform2D::IDENTITY)?;
//! println!("{} vertices", list.vertex_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod renderer;
mod shape;
pub mod text;
mod transform;
mod types;

pub use error::{FontLoadError, TextError, TextResult};
pub use renderer::{DrawCommand, DrawList, Drawable, RenderTarget};
pub use shape::RectangleShape;
pub use transform::{Transform2D, Transformable};
pub use types::{Color, IntRect, Point, Rect, Size, Vertex};
