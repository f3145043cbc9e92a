//! Camera matrices shared by every 2D batch of a frame.
//!
//! Each vertex carries a [`ProjectionMode`] tag; the shaders pick the matching
//! projection out of [`CameraUniform`], which is uploaded once per
//! `begin_render`.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Which projection a primitive is rendered with.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProjectionMode {
    /// World-space primitives seen through the perspective camera.
    #[default]
    Perspective = 0,
    /// Screen-space primitives (UI) seen through the orthographic camera.
    Orthographic = 1,
}

impl ProjectionMode {
    /// Integer tag written into vertex records.
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Uniform block bound at [`CameraUniform::BINDING`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub perspective: [[f32; 4]; 4],
    pub orthographic: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Uniform buffer binding slot used by all 2D shaders.
    pub const BINDING: u32 = 0;
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;
}

/// A camera with both a perspective and an orthographic projection.
///
/// The viewport size is owned by the windowing layer; call
/// [`Camera::set_viewport_size`] after a resize and before the next
/// `begin_render`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Vertical field of view in radians.
    pub fov_y_radians: f32,
    pub near: f32,
    pub far: f32,
    viewport_width: f32,
    viewport_height: f32,
}

impl Camera {
    pub const DEFAULT_FOV_Y: f32 = std::f32::consts::FRAC_PI_4;

    /// Create a camera for a viewport of the given size, looking down -Z from `z = 10`.
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            fov_y_radians: Self::DEFAULT_FOV_Y,
            near: 0.1,
            far: 1000.0,
            viewport_width: viewport_width.max(1.0),
            viewport_height: viewport_height.max(1.0),
        }
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport_width = width.max(1.0);
        self.viewport_height = height.max(1.0);
    }

    pub fn viewport_size(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.viewport_width / self.viewport_height
    }

    /// World-to-view matrix for a camera at `position` looking down -Z.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    pub fn perspective_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_radians, self.aspect_ratio(), self.near, self.far)
    }

    /// Pixel-space projection with the origin at the viewport center.
    pub fn orthographic_matrix(&self) -> Mat4 {
        let half_w = self.viewport_width / 2.0;
        let half_h = self.viewport_height / 2.0;
        Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, -1.0, 1.0)
    }

    pub fn projection_matrix(&self, mode: ProjectionMode) -> Mat4 {
        match mode {
            ProjectionMode::Perspective => self.perspective_matrix(),
            ProjectionMode::Orthographic => self.orthographic_matrix(),
        }
    }

    /// Uniform data using this camera's own view matrix.
    pub fn uniform(&self) -> CameraUniform {
        self.uniform_with_view(self.view_matrix())
    }

    /// Uniform data with an externally supplied view matrix.
    pub fn uniform_with_view(&self, view: Mat4) -> CameraUniform {
        CameraUniform {
            view: view.to_cols_array_2d(),
            perspective: self.perspective_matrix().to_cols_array_2d(),
            orthographic: self.orthographic_matrix().to_cols_array_2d(),
        }
    }
}
