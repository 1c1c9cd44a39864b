//! Renderer boundary for text geometry.
//!
//! Text in this crate is renderer-agnostic. Anything that can draw a list of
//! textured quads and plain rectangles implements [`RenderTarget`]; runs and
//! layouts implement [`Drawable`] and push their geometry into it.
//!
//! [`DrawList`] is a recording target that keeps the submitted commands, for
//! headless rendering, batching into a GPU pass later, or inspection in tests.

use crate::error::TextResult;
use crate::shape::RectangleShape;
use crate::text::GlyphTexture;
use crate::transform::Transform2D;
use crate::types::Vertex;

/// A surface that text geometry can be submitted to.
pub trait RenderTarget {
    /// Draw independent quads (four vertices each) sampled from `texture`.
    ///
    /// Vertex texture coordinates are in texture pixels.
    fn draw_quads(&mut self, vertices: &[Vertex], texture: &GlyphTexture, transform: &Transform2D);

    /// Draw a filled and/or outlined rectangle.
    fn draw_rectangle(&mut self, shape: &RectangleShape, transform: &Transform2D);
}

/// Something that can submit itself to a [`RenderTarget`].
///
/// Drawing takes `&mut self` because text rebuilds its geometry lazily.
pub trait Drawable {
    /// Draw under the given parent transform.
    fn draw(&mut self, target: &mut dyn RenderTarget, parent: &Transform2D) -> TextResult<()>;
}

/// A command recorded by [`DrawList`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A batch of textured quads.
    Quads {
        vertices: Vec<Vertex>,
        /// Width and height of the texture the quads sample from.
        texture_size: (u32, u32),
        transform: Transform2D,
    },
    /// A single rectangle.
    Rectangle {
        shape: RectangleShape,
        transform: Transform2D,
    },
}

/// A [`RenderTarget`] that records every command in submission order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Create an empty draw list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded commands.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Total number of quad vertices recorded.
    pub fn vertex_count(&self) -> usize {
        self.commands
            .iter()
            .map(|command| match command {
                DrawCommand::Quads { vertices, .. } => vertices.len(),
                DrawCommand::Rectangle { .. } => 0,
            })
            .sum()
    }

    /// Recorded rectangles, in order.
    pub fn rectangles(&self) -> impl Iterator<Item = &RectangleShape> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Rectangle { shape, .. } => Some(shape),
            DrawCommand::Quads { .. } => None,
        })
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Discard all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl RenderTarget for DrawList {
    fn draw_quads(&mut self, vertices: &[Vertex], texture: &GlyphTexture, transform: &Transform2D) {
        self.commands.push(DrawCommand::Quads {
            vertices: vertices.to_vec(),
            texture_size: texture.size(),
            transform: *transform,
        });
    }

    fn draw_rectangle(&mut self, shape: &RectangleShape, transform: &Transform2D) {
        self.commands.push(DrawCommand::Rectangle {
            shape: *shape,
            transform: *transform,
        });
    }
}
