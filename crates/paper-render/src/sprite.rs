//! Sprite sheet support.
//!
//! A sprite sheet is a texture holding uniformly-sized sprites in a grid,
//! optionally separated by padding. The grid size is derived from the
//! texture size. [`SpriteSheet::tex_coords`] yields the four texture
//! coordinates of one cell in the order [`EdgeRenderData::tex_coords`]
//! expects, so any rectangle can show any sprite.
//!
//! ```ignore
//! let sheet = SpriteSheet::new(texture, SpriteSheetDescriptor::uniform(32, 32))?;
//! let data = sheet.render_data(2, 1, transform, Color::WHITE)?;
//! renderer.draw_rectangle(&data);
//! ```

use std::sync::Arc;

use glam::Vec2;

use crate::color::Color;
use crate::error::{RenderError, RenderResult};
use crate::renderer2d::EdgeRenderData;
use crate::resource::Texture;
use crate::transform::Transform;

/// Cell geometry of a sprite sheet, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheetDescriptor {
    pub sprite_width: u32,
    pub sprite_height: u32,
    /// Horizontal gap between neighbouring sprites.
    pub padding_width: u32,
    /// Vertical gap between neighbouring sprites.
    pub padding_height: u32,
}

impl SpriteSheetDescriptor {
    /// Cells of `width` x `height` with no padding.
    pub fn uniform(width: u32, height: u32) -> Self {
        Self {
            sprite_width: width,
            sprite_height: height,
            padding_width: 0,
            padding_height: 0,
        }
    }

    pub fn with_padding(mut self, width: u32, height: u32) -> Self {
        self.padding_width = width;
        self.padding_height = height;
        self
    }
}

/// A texture split into a grid of sprites.
///
/// Columns count left to right and rows count top to bottom, starting at 0.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    texture: Arc<Texture>,
    descriptor: SpriteSheetDescriptor,
    columns: u32,
    rows: u32,
}

impl SpriteSheet {
    pub fn new(texture: Arc<Texture>, descriptor: SpriteSheetDescriptor) -> RenderResult<Self> {
        if descriptor.sprite_width == 0 || descriptor.sprite_height == 0 {
            return Err(RenderError::InvalidSpriteSheet(format!(
                "sprite size {}x{} has a zero dimension",
                descriptor.sprite_width, descriptor.sprite_height
            )));
        }
        if descriptor.sprite_width > texture.width() || descriptor.sprite_height > texture.height() {
            return Err(RenderError::InvalidSpriteSheet(format!(
                "sprite size {}x{} exceeds texture size {}x{}",
                descriptor.sprite_width,
                descriptor.sprite_height,
                texture.width(),
                texture.height()
            )));
        }

        let (Some(columns), Some(rows)) = (
            grid_cells(texture.width(), descriptor.sprite_width, descriptor.padding_width),
            grid_cells(texture.height(), descriptor.sprite_height, descriptor.padding_height),
        ) else {
            return Err(RenderError::InvalidSpriteSheet(format!(
                "padding {}x{} overflows the grid of a {}x{} texture",
                descriptor.padding_width,
                descriptor.padding_height,
                texture.width(),
                texture.height()
            )));
        };

        tracing::debug!(
            "Sprite sheet {:?}: {}x{} sprites of {}x{}",
            texture.label().unwrap_or("<unnamed>"),
            columns,
            rows,
            descriptor.sprite_width,
            descriptor.sprite_height
        );

        Ok(Self {
            texture,
            descriptor,
            columns,
            rows,
        })
    }

    pub fn texture(&self) -> &Arc<Texture> {
        &self.texture
    }

    pub fn descriptor(&self) -> &SpriteSheetDescriptor {
        &self.descriptor
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn sprite_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Texture coordinates of the sprite at `column`, `row`:
    /// bottom-left, bottom-right, top-right, top-left.
    pub fn tex_coords(&self, column: u32, row: u32) -> RenderResult<[Vec2; 4]> {
        if column >= self.columns || row >= self.rows {
            return Err(RenderError::SpriteOutOfBounds {
                column,
                row,
                columns: self.columns,
                rows: self.rows,
            });
        }

        let desc = &self.descriptor;
        let width = self.texture.width() as f32;
        let height = self.texture.height() as f32;

        let x = (column * (desc.sprite_width + desc.padding_width)) as f32;
        // Pixel rows run top-down, texture v runs bottom-up.
        let y = (row * (desc.sprite_height + desc.padding_height)) as f32;

        let left = x / width;
        let right = (x + desc.sprite_width as f32) / width;
        let top = 1.0 - y / height;
        let bottom = 1.0 - (y + desc.sprite_height as f32) / height;

        Ok([
            Vec2::new(left, bottom),
            Vec2::new(right, bottom),
            Vec2::new(right, top),
            Vec2::new(left, top),
        ])
    }

    /// Texture coordinates of sprite `index`, counting left to right then top to bottom.
    pub fn tex_coords_at(&self, index: u32) -> RenderResult<[Vec2; 4]> {
        self.tex_coords(index % self.columns, index / self.columns)
    }

    /// Rectangle render data showing the sprite at `column`, `row`.
    pub fn render_data(
        &self,
        column: u32,
        row: u32,
        transform: Transform,
        color: Color,
    ) -> RenderResult<EdgeRenderData> {
        Ok(EdgeRenderData::new(transform, color)
            .with_texture(Arc::clone(&self.texture))
            .with_tex_coords(self.tex_coords(column, row)?))
    }
}

/// Cells of `sprite` pixels separated by `padding` that fit in `extent`.
/// The last cell needs no trailing padding.
fn grid_cells(extent: u32, sprite: u32, padding: u32) -> Option<u32> {
    Some(extent.checked_add(padding)? / sprite.checked_add(padding)?)
}
