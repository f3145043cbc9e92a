//! Thin command layer between the batch manager and the backend.

use std::sync::Arc;

use crate::backend::{GraphicsApi, RenderBackend};
use crate::camera::CameraUniform;
use crate::color::Color;
use crate::resource::{BufferId, VertexArrayId};
use crate::stats::RenderStats;

/// Owns the backend handle, the frame stats and the shared camera uniform.
pub struct RenderCommand {
    backend: Arc<dyn RenderBackend>,
    stats: RenderStats,
    camera_buffer: BufferId,
}

impl RenderCommand {
    /// # Panics
    /// Panics if the backend reports [`GraphicsApi::None`].
    pub fn new(backend: Arc<dyn RenderBackend>) -> Self {
        let api = backend.api();
        assert!(
            api != GraphicsApi::None,
            "'None' is not a valid graphics API; select a backend before initializing the renderer"
        );

        let camera_buffer = backend.create_uniform_buffer(Some("camera_uniform"), CameraUniform::SIZE);
        tracing::debug!("Render command layer initialized for {api}");

        Self {
            backend,
            stats: RenderStats::default(),
            camera_buffer,
        }
    }

    pub fn backend(&self) -> &dyn RenderBackend {
        self.backend.as_ref()
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut RenderStats {
        &mut self.stats
    }

    pub fn clear_stats(&mut self) {
        self.stats = RenderStats::default();
    }

    /// Upload camera matrices and bind them for every shader of the frame.
    pub fn bind_camera(&self, uniform: &CameraUniform) {
        self.backend
            .write_buffer(self.camera_buffer, 0, bytemuck::bytes_of(uniform));
        self.backend
            .bind_uniform_buffer(self.camera_buffer, CameraUniform::BINDING);
    }

    pub fn set_clear_color(&self, color: Color) {
        self.backend.set_clear_color(color);
    }

    pub fn clear(&self) {
        self.backend.clear();
    }

    pub fn set_viewport(&self, x: u32, y: u32, width: u32, height: u32) {
        self.backend.set_viewport(x, y, width, height);
    }

    pub fn enable_depth_testing(&self, enabled: bool) {
        self.backend.enable_depth_testing(enabled);
    }

    pub fn draw_indexed(&self, vertex_array: VertexArrayId, index_count: u32) {
        self.backend.draw_indexed(vertex_array, index_count);
    }

    pub fn set_line_width(&self, thickness: f32) {
        self.backend.set_line_width(thickness);
    }

    pub fn draw_lines(&self, vertex_array: VertexArrayId, vertex_count: u32, thickness: f32) {
        self.backend.draw_lines(vertex_array, vertex_count, thickness);
    }
}
