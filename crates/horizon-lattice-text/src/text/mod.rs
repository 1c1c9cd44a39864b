//! Glyph caching, styled runs and rich text layout.
//!
//! # Getting Started
//!
//! Load a font once per character size. Loading rasterizes every glyph up
//! front, so it is the only step that can fail on a bad font:
//!
//! ```no_run
//! use std::sync::Arc;
//! use horizon_lattice_text::text::{GlyphCache, GlyphCacheConfig, FontSource};
//!
//! let config = GlyphCacheConfig::new().char_size(24).outline_thickness(1.5);
//! let font = GlyphCache::from_source(FontSource::File("assets/font.ttf".into()), &config)?;
//! let font = Arc::new(font);
//! println!("Loaded {} at {}px", font.info().family, font.char_size());
//! # Ok::<(), horizon_lattice_text::FontLoadError>(())
//! ```
//!
//! # Styled Runs
//!
//! A [`StyledRun`] turns a string into textured quads, rebuilding them only
//! after something changed:
//!
//! ```no_run
//! use std::sync::Arc;
//! use horizon_lattice_text::text::{GlyphCache, StyledRun, TextStyle};
//! use horizon_lattice_text::{Color, DrawList, Drawable, Point, Transform2D};
//!
//! let font = Arc::new(GlyphCache::from_file("assets/font.ttf", 20)?);
//! let mut run = StyledRun::new(
//!     "Score: 100",
//!     Some(font),
//!     Color::YELLOW,
//!     TextStyle::BOLD | TextStyle::UNDERLINE,
//! );
//! run.set_position(Point::new(16.0, 32.0));
//!
//! let mut list = DrawList::new();
//! run.draw(&mut list, &Transform2D::IDENTITY)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Rich Text
//!
//! [`RichLayout`] composes differently styled [`Part`]s, wraps them by word
//! and maps points back to the part under them.

mod atlas;
mod glyph_cache;
pub mod latin1;
mod rasterizer;
mod rich_layout;
mod style;
mod styled_run;
mod truetype;

pub use atlas::{DEFAULT_ATLAS_WIDTH, DEFAULT_MAX_ATLAS_HEIGHT, GlyphTexture};
pub use glyph_cache::{GLYPH_COUNT, Glyph, GlyphCache, GlyphCacheConfig};
pub use rasterizer::{FontInfo, FontSource, Rasterizer};
pub use rich_layout::{Hitbox, Part, PartId, RichLayout};
pub use style::TextStyle;
pub use styled_run::{ITALIC_SHEAR, StyledRun};
pub use truetype::TrueTypeRasterizer;
