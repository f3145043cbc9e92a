//! Paper Render
//!
//! The batched 2D render core of the Paper engine. Scene and UI code hand
//! per-primitive render data to [`Renderer2D`], which batches rectangles,
//! triangles, circles, lines and text glyphs per kind and issues draw calls
//! through an abstract [`RenderBackend`].

pub mod backend;
pub mod camera;
pub mod color;
pub mod command;
pub mod error;
pub mod renderer2d;
pub mod resource;
pub mod sprite;
pub mod stats;
pub mod text;
pub mod transform;

pub use backend::{GraphicsApi, RenderBackend, VertexBufferDescriptor};
pub use camera::{Camera, CameraUniform, ProjectionMode};
pub use color::{Color, DEFAULT_COLOR};
pub use command::RenderCommand;
pub use error::{RenderError, RenderResult};
pub use renderer2d::{
    CircleRenderData, EdgeRenderData, Geometry, GeometryKind, LineRenderData, RenderTarget2D,
    Renderer2D, Renderer2DConfig, TextRenderData,
};
pub use resource::{BufferId, ShaderId, Texture, TextureId, VertexArrayId};
pub use sprite::{SpriteSheet, SpriteSheetDescriptor};
pub use stats::RenderStats;
pub use text::{Font, FontMetrics, Glyph};
pub use transform::Transform;
