//! Vertex records written into the geometry arenas.
//!
//! Each layout mirrors the attribute layout of its shader. Records are
//! produced only by the batch manager and never read back.

use bytemuck::{Pod, Zeroable};
use paper_core::math::{PackedVec2, PackedVec3};
use static_assertions::const_assert_eq;

use crate::color::Color;

/// Texture index written for untextured primitives.
pub const NO_TEXTURE: i32 = -1;

/// A vertex record with a fixed GPU attribute layout.
pub trait Vertex2D: Pod {
    /// Debug label of buffers holding this vertex type.
    const LABEL: &'static str;

    fn layout() -> wgpu::VertexBufferLayout<'static>;

    /// Size of one record in bytes.
    fn stride() -> u64 {
        std::mem::size_of::<Self>() as u64
    }
}

/// Vertex of rectangles and triangles.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct EdgeVertex {
    pub position: PackedVec3,
    pub color: Color,
    pub tex_coords: PackedVec2,
    pub tiling_factor: f32,
    pub tex_index: i32,
    pub projection_mode: i32,
    pub entity_id: i32,
    pub ui_id: i32,
    pub alpha_entity_id: i32,
}

/// Vertex of line segments.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: PackedVec3,
    pub color: Color,
    pub projection_mode: i32,
    pub entity_id: i32,
    pub ui_id: i32,
}

/// Vertex of circles. `local_position` spans `-1..1` so the fragment shader
/// can compute distance from the center.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CircleVertex {
    pub world_position: PackedVec3,
    pub local_position: PackedVec2,
    pub tex_coords: PackedVec2,
    pub tiling_factor: f32,
    pub tex_index: i32,
    pub color: Color,
    pub thickness: f32,
    pub fade: f32,
    pub projection_mode: i32,
    pub entity_id: i32,
    pub alpha_entity_id: i32,
}

/// Vertex of text glyph quads.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TextVertex {
    pub position: PackedVec3,
    pub color: Color,
    pub tex_coords: PackedVec2,
    pub projection_mode: i32,
    pub entity_id: i32,
    pub ui_id: i32,
    pub alpha_entity_id: i32,
}

const_assert_eq!(std::mem::size_of::<EdgeVertex>(), 60);
const_assert_eq!(std::mem::size_of::<LineVertex>(), 40);
const_assert_eq!(std::mem::size_of::<CircleVertex>(), 72);
const_assert_eq!(std::mem::size_of::<TextVertex>(), 52);

impl Vertex2D for EdgeVertex {
    const LABEL: &'static str = "edge_vertices";

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: &[wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
            // aPos
            0 => Float32x3,
            // aColor
            1 => Float32x4,
            // aTexCoord
            2 => Float32x2,
            // aTilingFactor
            3 => Float32,
            // aTexID
            4 => Sint32,
            // aProjectionMode
            5 => Sint32,
            // aEntityID
            6 => Sint32,
            // aUIID
            7 => Sint32,
            // aAlphaEntityID
            8 => Sint32,
        ];

        wgpu::VertexBufferLayout {
            array_stride: Self::stride(),
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: ATTRS,
        }
    }
}

impl Vertex2D for LineVertex {
    const LABEL: &'static str = "line_vertices";

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: &[wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x4,
            2 => Sint32,
            3 => Sint32,
            4 => Sint32,
        ];

        wgpu::VertexBufferLayout {
            array_stride: Self::stride(),
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: ATTRS,
        }
    }
}

impl Vertex2D for CircleVertex {
    const LABEL: &'static str = "circle_vertices";

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: &[wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
            // aWorldPos
            0 => Float32x3,
            // aLocalPos
            1 => Float32x2,
            // aTexCoord
            2 => Float32x2,
            // aTilingFactor
            3 => Float32,
            // aTexID
            4 => Sint32,
            // aColor
            5 => Float32x4,
            // aThickness
            6 => Float32,
            // aFade
            7 => Float32,
            // aProjectionMode
            8 => Sint32,
            // aEntityID
            9 => Sint32,
            // aAlphaEntityID
            10 => Sint32,
        ];

        wgpu::VertexBufferLayout {
            array_stride: Self::stride(),
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: ATTRS,
        }
    }
}

impl Vertex2D for TextVertex {
    const LABEL: &'static str = "text_vertices";

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: &[wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x4,
            2 => Float32x2,
            3 => Sint32,
            4 => Sint32,
            5 => Sint32,
            6 => Sint32,
        ];

        wgpu::VertexBufferLayout {
            array_stride: Self::stride(),
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: ATTRS,
        }
    }
}
