//! Per-draw render data handed to [`Renderer2D`](super::Renderer2D).
//!
//! These are plain values copied into the batch. The only shared reference
//! they hold is the texture (or font), which is owned elsewhere.

use std::sync::Arc;

use glam::{Vec2, Vec3};

use crate::camera::ProjectionMode;
use crate::color::{Color, DEFAULT_COLOR};
use crate::resource::Texture;
use crate::text::Font;
use crate::transform::Transform;

/// Entity id written when a primitive belongs to no entity.
pub const NULL_ENTITY_ID: i32 = 0;
/// UI id written when a primitive belongs to no UI element.
pub const NULL_UI_ID: i32 = -1;

/// Texture coordinates covering the whole texture, counter-clockwise from bottom-left.
pub const DEFAULT_TEX_COORDS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Render data for rectangles and triangles.
///
/// Triangles use the first three texture coordinates.
#[derive(Debug, Clone)]
pub struct EdgeRenderData {
    pub transform: Transform,
    pub color: Color,
    pub texture: Option<Arc<Texture>>,
    pub tex_coords: [Vec2; 4],
    pub tiling_factor: f32,
    pub mode: ProjectionMode,
    pub entity_id: i32,
    pub ui_id: i32,
    /// Register only non-transparent pixels of this primitive in the pick buffer.
    pub entity_id_to_alpha_pixels: bool,
}

impl Default for EdgeRenderData {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            color: DEFAULT_COLOR,
            texture: None,
            tex_coords: DEFAULT_TEX_COORDS,
            tiling_factor: 1.0,
            mode: ProjectionMode::default(),
            entity_id: NULL_ENTITY_ID,
            ui_id: NULL_UI_ID,
            entity_id_to_alpha_pixels: false,
        }
    }
}

impl EdgeRenderData {
    pub fn new(transform: Transform, color: Color) -> Self {
        Self {
            transform,
            color,
            ..Default::default()
        }
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_tex_coords(mut self, tex_coords: [Vec2; 4]) -> Self {
        self.tex_coords = tex_coords;
        self
    }

    pub fn with_entity(mut self, entity_id: i32) -> Self {
        self.entity_id = entity_id;
        self
    }
}

/// Render data for filled or ring-shaped circles.
#[derive(Debug, Clone)]
pub struct CircleRenderData {
    pub transform: Transform,
    pub color: Color,
    /// 1.0 fills the circle, smaller values draw a ring.
    pub thickness: f32,
    /// Edge softness in local units.
    pub fade: f32,
    pub texture: Option<Arc<Texture>>,
    pub tex_coords: [Vec2; 4],
    pub tiling_factor: f32,
    pub mode: ProjectionMode,
    pub entity_id: i32,
    pub ui_id: i32,
    pub entity_id_to_alpha_pixels: bool,
}

impl Default for CircleRenderData {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            color: DEFAULT_COLOR,
            thickness: 1.0,
            fade: 0.005,
            texture: None,
            tex_coords: DEFAULT_TEX_COORDS,
            tiling_factor: 1.0,
            mode: ProjectionMode::default(),
            entity_id: NULL_ENTITY_ID,
            ui_id: NULL_UI_ID,
            entity_id_to_alpha_pixels: false,
        }
    }
}

impl CircleRenderData {
    pub fn new(transform: Transform, color: Color) -> Self {
        Self {
            transform,
            color,
            ..Default::default()
        }
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }
}

impl From<&EdgeRenderData> for CircleRenderData {
    fn from(edge: &EdgeRenderData) -> Self {
        Self {
            transform: edge.transform,
            color: edge.color,
            texture: edge.texture.clone(),
            tex_coords: edge.tex_coords,
            tiling_factor: edge.tiling_factor,
            mode: edge.mode,
            entity_id: edge.entity_id,
            ui_id: edge.ui_id,
            entity_id_to_alpha_pixels: edge.entity_id_to_alpha_pixels,
            ..Default::default()
        }
    }
}

/// Render data for a single line segment.
#[derive(Debug, Clone)]
pub struct LineRenderData {
    pub point0: Vec3,
    pub point1: Vec3,
    pub color: Color,
    /// Width in pixels. Applies to the whole line batch, see
    /// [`Renderer2D::draw_line`](super::Renderer2D::draw_line).
    pub thickness: f32,
    pub mode: ProjectionMode,
    pub entity_id: i32,
    pub ui_id: i32,
}

impl Default for LineRenderData {
    fn default() -> Self {
        Self {
            point0: Vec3::ZERO,
            point1: Vec3::X,
            color: DEFAULT_COLOR,
            thickness: 1.0,
            mode: ProjectionMode::default(),
            entity_id: NULL_ENTITY_ID,
            ui_id: NULL_UI_ID,
        }
    }
}

impl LineRenderData {
    pub fn new(point0: Vec3, point1: Vec3, color: Color) -> Self {
        Self {
            point0,
            point1,
            color,
            ..Default::default()
        }
    }

    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness;
        self
    }
}

/// Render data for a string of text.
#[derive(Debug, Clone)]
pub struct TextRenderData {
    pub transform: Transform,
    pub color: Color,
    pub text: String,
    pub font: Arc<Font>,
    pub mode: ProjectionMode,
    pub entity_id: i32,
    pub ui_id: i32,
    pub entity_id_to_alpha_pixels: bool,
}

impl TextRenderData {
    pub fn new(text: impl Into<String>, font: Arc<Font>) -> Self {
        Self {
            transform: Transform::default(),
            color: DEFAULT_COLOR,
            text: text.into(),
            font,
            mode: ProjectionMode::default(),
            entity_id: NULL_ENTITY_ID,
            ui_id: NULL_UI_ID,
            entity_id_to_alpha_pixels: false,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}
