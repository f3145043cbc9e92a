//! The graphics backend contract the render core draws through.
//!
//! A concrete backend (OpenGL in the editor) lives outside this crate. The
//! trait is object-safe and takes `&self` everywhere, so a backend can be
//! shared as `Arc<dyn RenderBackend>` and record or forward calls through
//! interior mutability.

use crate::color::Color;
use crate::resource::{BufferId, ShaderId, Texture, VertexArrayId};

/// The graphics API a backend drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphicsApi {
    /// No API selected. Initializing a renderer against this is fatal.
    None,
    OpenGl,
    Vulkan,
}

impl std::fmt::Display for GraphicsApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphicsApi::None => write!(f, "None"),
            GraphicsApi::OpenGl => write!(f, "OpenGL"),
            GraphicsApi::Vulkan => write!(f, "Vulkan"),
        }
    }
}

/// Describes a dynamic vertex buffer.
#[derive(Debug, Clone)]
pub struct VertexBufferDescriptor<'a> {
    pub label: Option<&'a str>,
    /// Attribute layout of one vertex record.
    pub layout: wgpu::VertexBufferLayout<'static>,
    /// Capacity in bytes.
    pub size: u64,
}

/// Abstract draw-call issuance, resource creation and binding.
pub trait RenderBackend: Send + Sync {
    /// The API this backend drives.
    fn api(&self) -> GraphicsApi;

    // Buffers

    /// Create a dynamic vertex buffer with the declared attribute layout.
    fn create_vertex_buffer(&self, desc: &VertexBufferDescriptor<'_>) -> BufferId;

    /// Create a static index buffer.
    fn create_index_buffer(&self, label: Option<&str>, indices: &[u32]) -> BufferId;

    /// Create a vertex array combining a vertex buffer with an optional index buffer.
    fn create_vertex_array(
        &self,
        label: Option<&str>,
        vertex_buffer: BufferId,
        index_buffer: Option<BufferId>,
    ) -> VertexArrayId;

    /// Create a uniform buffer of `size` bytes.
    fn create_uniform_buffer(&self, label: Option<&str>, size: u64) -> BufferId;

    /// Overwrite bytes of a buffer starting at `offset`.
    fn write_buffer(&self, buffer: BufferId, offset: u64, data: &[u8]);

    /// Bind a uniform buffer to a numbered binding slot.
    fn bind_uniform_buffer(&self, buffer: BufferId, binding: u32);

    // Shaders

    /// Acquire and compile the shader program registered under `name`.
    fn create_shader(&self, name: &str) -> ShaderId;

    fn bind_shader(&self, shader: ShaderId);

    fn unbind_shader(&self, shader: ShaderId);

    /// Upload a named integer-array uniform to a bound shader.
    fn upload_int_array(&self, shader: ShaderId, name: &str, values: &[i32]);

    // Textures

    /// Bind a texture to a numbered texture unit.
    fn bind_texture(&self, texture: &Texture, unit: u32);

    fn unbind_texture(&self, texture: &Texture);

    // Draw state and draw calls

    /// Issue an indexed triangle draw of `index_count` indices.
    fn draw_indexed(&self, vertex_array: VertexArrayId, index_count: u32);

    /// Issue a line-list draw of `vertex_count` vertices at `thickness` pixels.
    fn draw_lines(&self, vertex_array: VertexArrayId, vertex_count: u32, thickness: f32);

    fn set_line_width(&self, thickness: f32);

    fn enable_depth_testing(&self, enabled: bool);

    fn is_depth_testing_enabled(&self) -> bool;

    fn set_clear_color(&self, color: Color);

    fn clear(&self);

    fn set_viewport(&self, x: u32, y: u32, width: u32, height: u32);
}
