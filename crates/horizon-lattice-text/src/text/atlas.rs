//! Glyph atlas texture and packing.
//!
//! Glyph coverage bitmaps are packed into a single RGBA page with a
//! shelf-based allocator: glyphs are placed left to right on horizontal
//! shelves, and a new shelf opens below the last one when nothing fits.
//! The page grows downwards by doubling until it reaches its maximum height.
//!
//! Pixels are stored as white RGB with the coverage in alpha, so a renderer
//! can tint glyphs by multiplying with the vertex color.

use image::{Rgba, RgbaImage};
use tracing::trace;

use crate::error::FontLoadError;
use crate::types::IntRect;

/// Default atlas page width.
pub const DEFAULT_ATLAS_WIDTH: u32 = 1024;

/// Default maximum atlas page height.
pub const DEFAULT_MAX_ATLAS_HEIGHT: u32 = 8192;

/// Height a fresh page starts with.
const INITIAL_ATLAS_HEIGHT: u32 = 128;

/// Padding between glyph allocations to prevent texture bleeding.
const GLYPH_PADDING: u32 = 1;

/// An RGBA image holding rasterized glyphs.
///
/// This is the texture handle text geometry samples from. Texture
/// coordinates in vertices are pixel positions in this image.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphTexture {
    image: RgbaImage,
}

impl GlyphTexture {
    /// Create a fully transparent texture.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Wrap an existing image.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Width and height in pixels.
    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The underlying image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA8 bytes, row-major, ready for upload.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Coverage (alpha) of one pixel, or zero outside the texture.
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        self.image.get_pixel_checked(x, y).map_or(0, |p| p.0[3])
    }
}

/// A shelf (horizontal row) in the atlas.
#[derive(Debug)]
struct Shelf {
    /// Y position of this shelf in the atlas.
    y: u32,
    /// Height of this shelf.
    height: u32,
    /// Current X position for the next allocation.
    cursor_x: u32,
}

impl Shelf {
    fn new(y: u32, height: u32) -> Self {
        Self {
            y,
            height,
            cursor_x: GLYPH_PADDING,
        }
    }

    /// Try to allocate space in this shelf.
    fn try_allocate(&mut self, width: u32, height: u32, atlas_width: u32) -> Option<(u32, u32)> {
        if height > self.height {
            return None;
        }

        let padded_width = width + GLYPH_PADDING;
        if self.cursor_x + padded_width > atlas_width {
            return None;
        }

        let x = self.cursor_x;
        self.cursor_x += padded_width;
        Some((x, self.y))
    }
}

/// A growable atlas page that glyph bitmaps are packed into.
#[derive(Debug)]
pub(crate) struct GlyphAtlas {
    image: RgbaImage,
    max_height: u32,
    shelves: Vec<Shelf>,
    next_shelf_y: u32,
}

impl GlyphAtlas {
    pub(crate) fn new(width: u32, max_height: u32) -> Self {
        let width = width.max(1);
        let max_height = max_height.max(1);
        Self {
            image: RgbaImage::new(width, INITIAL_ATLAS_HEIGHT.min(max_height)),
            max_height,
            shelves: Vec::new(),
            next_shelf_y: GLYPH_PADDING,
        }
    }

    /// Copy a coverage bitmap into the atlas and return where it landed.
    ///
    /// Empty bitmaps take no space and map to [`IntRect::ZERO`].
    pub(crate) fn insert(
        &mut self,
        width: u32,
        height: u32,
        coverage: &[u8],
    ) -> Result<IntRect, FontLoadError> {
        if width == 0 || height == 0 {
            return Ok(IntRect::ZERO);
        }
        debug_assert_eq!(coverage.len(), (width * height) as usize);

        let (x, y) = self.allocate(width, height)?;
        for row in 0..height {
            for col in 0..width {
                let alpha = coverage[(row * width + col) as usize];
                self.image
                    .put_pixel(x + col, y + row, Rgba([255, 255, 255, alpha]));
            }
        }

        Ok(IntRect::new(x as i32, y as i32, width as i32, height as i32))
    }

    /// Snapshot of the page as a texture.
    pub(crate) fn texture(&self) -> GlyphTexture {
        GlyphTexture::from_image(self.image.clone())
    }

    fn allocate(&mut self, width: u32, height: u32) -> Result<(u32, u32), FontLoadError> {
        let atlas_width = self.image.width();
        for shelf in &mut self.shelves {
            if let Some(pos) = shelf.try_allocate(width, height, atlas_width) {
                return Ok(pos);
            }
        }

        let full = FontLoadError::AtlasFull {
            width: atlas_width,
            max_height: self.max_height,
            glyph_width: width,
            glyph_height: height,
        };
        if width + GLYPH_PADDING * 2 > atlas_width {
            return Err(full);
        }

        let shelf_y = self.next_shelf_y;
        let required = shelf_y + height + GLYPH_PADDING;
        if required > self.image.height() && !self.grow(required) {
            return Err(full);
        }

        let mut shelf = Shelf::new(shelf_y, height);
        let pos = shelf.try_allocate(width, height, atlas_width).ok_or(full)?;
        self.shelves.push(shelf);
        self.next_shelf_y = required;
        Ok(pos)
    }

    /// Double the page height until `required` rows fit.
    fn grow(&mut self, required: u32) -> bool {
        let mut height = self.image.height();
        while height < required {
            if height >= self.max_height {
                return false;
            }
            height = (height * 2).min(self.max_height);
        }

        let mut grown = RgbaImage::new(self.image.width(), height);
        image::imageops::replace(&mut grown, &self.image, 0, 0);
        trace!(
            width = grown.width(),
            from = self.image.height(),
            to = height,
            "grew glyph atlas"
        );
        self.image = grown;
        true
    }
}
