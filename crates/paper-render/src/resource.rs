//! Handles to GPU-resident resources owned by a [`RenderBackend`](crate::RenderBackend).
//!
//! The render core never owns GPU memory directly. Backends hand out plain
//! ids, and the core only ever binds, writes or draws through them.

use std::hash::{Hash, Hasher};

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw backend handle.
            pub const fn raw(self) -> u64 {
                self.0
            }
        }
    };
}

resource_id!(
    /// Vertex, index or uniform buffer handle.
    BufferId
);
resource_id!(
    /// Vertex array handle combining a vertex buffer with an optional index buffer.
    VertexArrayId
);
resource_id!(
    /// Compiled shader program handle.
    ShaderId
);
resource_id!(
    /// Texture handle.
    TextureId
);

/// A GPU texture owned outside the render core.
///
/// Two textures are equal when they refer to the same backend resource,
/// regardless of which `Arc` or copy they are reached through. This is what
/// texture-slot deduplication compares.
#[derive(Debug, Clone)]
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
    label: Option<String>,
}

impl Texture {
    /// Wrap an existing backend texture.
    pub fn from_raw(id: TextureId, width: u32, height: u32, format: wgpu::TextureFormat) -> Self {
        Self {
            id,
            width,
            height,
            format,
            label: None,
        }
    }

    /// Attach a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl PartialEq for Texture {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Texture {}

impl Hash for Texture {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Names of the shader programs the 2D renderer acquires at init.
pub mod shader_names {
    pub const EDGE: &str = "EdgeGeometryShader_2D";
    pub const LINE: &str = "LineGeometryShader_2D";
    pub const CIRCLE: &str = "CircleGeometryShader_2D";
    pub const TEXT: &str = "TextShader_2D";
}

/// Uniform name of the sampler array in the edge and circle shaders.
pub const TEXTURE_ARRAY_UNIFORM: &str = "uTexture";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_equality_is_by_resource() {
        let a = Texture::from_raw(TextureId(7), 16, 16, wgpu::TextureFormat::Rgba8Unorm);
        let b = Texture::from_raw(TextureId(7), 32, 32, wgpu::TextureFormat::R8Unorm)
            .with_label("same resource, stale metadata");
        let c = Texture::from_raw(TextureId(8), 16, 16, wgpu::TextureFormat::Rgba8Unorm);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
