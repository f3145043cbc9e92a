//! Test utilities for the Paper engine.
//!
//! - `MockRenderBackend` - a [`RenderBackend`](paper_render::RenderBackend)
//!   that records every call instead of touching a GPU (requires `mock` feature)
//! - [`fixtures`] - textures and fonts with known metrics
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use std::sync::Arc;
//! use paper_render::{EdgeRenderData, Renderer2D};
//! use paper_test_utils::MockRenderBackend;
//!
//! let backend = Arc::new(MockRenderBackend::new());
//! let mut renderer = Renderer2D::new(backend.clone());
//!
//! renderer.draw_rectangle(&EdgeRenderData::default());
//! renderer.end_render();
//!
//! assert_eq!(backend.draw_indexed_calls().len(), 1);
//! # }
//! ```

pub mod fixtures;
#[cfg(feature = "mock")]
pub mod mock_render;

pub use fixtures::*;
#[cfg(feature = "mock")]
pub use mock_render::*;
