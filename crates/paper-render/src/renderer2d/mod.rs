//! Batched 2D renderer.
//!
//! [`Renderer2D`] owns one [`GeometryBuffer`] per [`GeometryKind`]. Draw calls
//! append vertices to the matching batch and assign texture slots; a batch is
//! flushed to the backend when it runs out of room, when its texture-slot
//! table is full, or when the caller asks for it through
//! [`Renderer2D::next_batch`], [`Renderer2D::render`] or
//! [`Renderer2D::end_render`].
//!
//! ```ignore
//! renderer.begin_render(&camera);
//! renderer.draw_rectangle(&EdgeRenderData::new(transform, Color::RED));
//! renderer.draw_string(&TextRenderData::new("score: 10", font.clone()));
//! renderer.end_render();
//! ```

mod config;
mod data;
mod geometry_buffer;
mod texture_slots;
mod vertex;

pub use config::Renderer2DConfig;
pub use data::*;
pub use geometry_buffer::{quad_indices, triangle_indices};
pub use texture_slots::TextureSlots;
pub use vertex::*;

use std::sync::Arc;

use glam::{Mat4, Vec3};
use paper_core::profiling::{profile_function, profile_scope};

use crate::backend::RenderBackend;
use crate::camera::{Camera, CameraUniform};
use crate::command::RenderCommand;
use crate::error::RenderResult;
use crate::resource::{shader_names, ShaderId, Texture, TEXTURE_ARRAY_UNIFORM};
use crate::stats::RenderStats;
use crate::text::layout_text;

use geometry_buffer::GeometryBuffer;

/// Local corners of a unit quad, counter-clockwise from bottom-left.
const QUAD_CORNERS: [Vec3; 4] = [
    Vec3::new(-0.5, -0.5, 0.0),
    Vec3::new(0.5, -0.5, 0.0),
    Vec3::new(0.5, 0.5, 0.0),
    Vec3::new(-0.5, 0.5, 0.0),
];

const TRIANGLE_CORNERS: [Vec3; 3] = [
    Vec3::new(-0.5, -0.5, 0.0),
    Vec3::new(0.5, -0.5, 0.0),
    Vec3::new(0.0, 0.5, 0.0),
];

/// Primitive kinds, each batched separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Rectangle,
    Triangle,
    Circle,
    Line,
    Text,
}

impl GeometryKind {
    /// All kinds in paint order.
    pub const ALL: [GeometryKind; 5] = [
        GeometryKind::Rectangle,
        GeometryKind::Triangle,
        GeometryKind::Circle,
        GeometryKind::Line,
        GeometryKind::Text,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GeometryKind::Rectangle => "rectangles",
            GeometryKind::Triangle => "triangles",
            GeometryKind::Circle => "circles",
            GeometryKind::Line => "lines",
            GeometryKind::Text => "text",
        }
    }
}

/// Which batches [`Renderer2D::render`] and [`Renderer2D::next_batch`] act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderTarget2D {
    #[default]
    All,
    Rectangle,
    Triangle,
    Circle,
    Line,
    Text,
}

impl RenderTarget2D {
    /// Kinds covered by this target. For [`RenderTarget2D::All`] this is the
    /// paint order: rectangles, triangles, circles, lines, text.
    pub fn kinds(self) -> &'static [GeometryKind] {
        match self {
            RenderTarget2D::All => &GeometryKind::ALL,
            RenderTarget2D::Rectangle => &[GeometryKind::Rectangle],
            RenderTarget2D::Triangle => &[GeometryKind::Triangle],
            RenderTarget2D::Circle => &[GeometryKind::Circle],
            RenderTarget2D::Line => &[GeometryKind::Line],
            RenderTarget2D::Text => &[GeometryKind::Text],
        }
    }
}

impl From<GeometryKind> for RenderTarget2D {
    fn from(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Rectangle => RenderTarget2D::Rectangle,
            GeometryKind::Triangle => RenderTarget2D::Triangle,
            GeometryKind::Circle => RenderTarget2D::Circle,
            GeometryKind::Line => RenderTarget2D::Line,
            GeometryKind::Text => RenderTarget2D::Text,
        }
    }
}

/// Shapes [`Renderer2D::draw_sprite`] can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Geometry {
    Rectangle,
    Triangle,
    Circle,
}

/// Vertex-type-erased view of a batch.
trait BatchState {
    fn fits(&self, vertices: usize, elements: u32) -> bool;
    fn textures(&self) -> &TextureSlots;
    fn textures_mut(&mut self) -> &mut TextureSlots;
    fn element_count(&self) -> u32;
    fn vertex_count(&self) -> usize;
    fn reset(&mut self);
    fn release(&mut self);
}

impl<V: Vertex2D> BatchState for GeometryBuffer<V> {
    fn fits(&self, vertices: usize, elements: u32) -> bool {
        GeometryBuffer::fits(self, vertices, elements)
    }

    fn textures(&self) -> &TextureSlots {
        GeometryBuffer::textures(self)
    }

    fn textures_mut(&mut self) -> &mut TextureSlots {
        GeometryBuffer::textures_mut(self)
    }

    fn element_count(&self) -> u32 {
        GeometryBuffer::element_count(self)
    }

    fn vertex_count(&self) -> usize {
        GeometryBuffer::vertex_count(self)
    }

    fn reset(&mut self) {
        GeometryBuffer::reset(self)
    }

    fn release(&mut self) {
        GeometryBuffer::release(self)
    }
}

#[derive(Debug, Clone, Copy)]
struct Shaders2D {
    edge: ShaderId,
    line: ShaderId,
    circle: ShaderId,
    text: ShaderId,
}

/// The batched 2D renderer.
///
/// All calls happen on the render thread between [`begin_render`](Self::begin_render)
/// and [`end_render`](Self::end_render).
pub struct Renderer2D {
    command: RenderCommand,
    config: Renderer2DConfig,
    shaders: Shaders2D,
    /// Sampler indices uploaded as `uTexture`, one per usable slot.
    texture_units: Vec<i32>,
    rectangles: GeometryBuffer<EdgeVertex>,
    triangles: GeometryBuffer<EdgeVertex>,
    circles: GeometryBuffer<CircleVertex>,
    lines: GeometryBuffer<LineVertex>,
    text: GeometryBuffer<TextVertex>,
    line_width: f32,
}

impl Renderer2D {
    /// Create a renderer with the default capacities.
    ///
    /// # Panics
    /// Panics if the backend reports [`GraphicsApi::None`](crate::GraphicsApi::None).
    pub fn new(backend: Arc<dyn RenderBackend>) -> Self {
        Self::build(backend, Renderer2DConfig::default())
    }

    /// Create a renderer with custom capacities.
    ///
    /// # Panics
    /// Panics if the backend reports [`GraphicsApi::None`](crate::GraphicsApi::None).
    pub fn with_config(backend: Arc<dyn RenderBackend>, config: Renderer2DConfig) -> RenderResult<Self> {
        config.validate()?;
        Ok(Self::build(backend, config))
    }

    fn build(backend: Arc<dyn RenderBackend>, config: Renderer2DConfig) -> Self {
        profile_function!();

        let command = RenderCommand::new(backend);
        let backend = command.backend();

        let usable_slots = config.usable_texture_slots() as usize;
        let quad_index_buffer =
            backend.create_index_buffer(Some("quad_indices"), &quad_indices(config.max_elements));
        let triangle_index_buffer =
            backend.create_index_buffer(Some("triangle_indices"), &triangle_indices(config.max_elements));

        let rectangles = GeometryBuffer::new(
            backend,
            GeometryKind::Rectangle,
            config.max_vertices,
            config.max_elements,
            usable_slots,
            Some(quad_index_buffer),
        );
        let triangles = GeometryBuffer::new(
            backend,
            GeometryKind::Triangle,
            config.max_vertices,
            config.max_elements,
            usable_slots,
            Some(triangle_index_buffer),
        );
        let circles = GeometryBuffer::new(
            backend,
            GeometryKind::Circle,
            config.max_vertices,
            config.max_elements,
            usable_slots,
            Some(quad_index_buffer),
        );
        let lines = GeometryBuffer::new(
            backend,
            GeometryKind::Line,
            config.max_vertices,
            config.max_elements,
            0,
            None,
        );
        // One slot: a text batch samples a single font atlas.
        let text = GeometryBuffer::new(
            backend,
            GeometryKind::Text,
            config.max_vertices,
            config.max_elements,
            1,
            Some(quad_index_buffer),
        );

        let shaders = Shaders2D {
            edge: backend.create_shader(shader_names::EDGE),
            line: backend.create_shader(shader_names::LINE),
            circle: backend.create_shader(shader_names::CIRCLE),
            text: backend.create_shader(shader_names::TEXT),
        };

        tracing::info!(
            "Renderer2D initialized: {} vertices, {} elements, {} texture slots per batch",
            config.max_vertices,
            config.max_elements,
            usable_slots
        );

        Self {
            command,
            config,
            shaders,
            texture_units: (0..usable_slots as i32).collect(),
            rectangles,
            triangles,
            circles,
            lines,
            text,
            line_width: 1.0,
        }
    }

    /// Release the CPU scratch memory. GPU resources belong to the backend.
    pub fn shutdown(mut self) {
        for kind in GeometryKind::ALL {
            self.batch_mut(kind).release();
        }
        tracing::info!("Renderer2D shut down");
    }

    /// Forward a window resize to the viewport.
    pub fn resize_window(&mut self, width: u32, height: u32) {
        self.command.set_viewport(0, 0, width, height);
    }

    /// Start a frame using the camera's own view matrix.
    pub fn begin_render(&mut self, camera: &Camera) {
        self.begin_with_uniform(&camera.uniform());
    }

    /// Start a frame viewing from `camera_transform` (the camera's world
    /// transform; its inverse is the view matrix).
    pub fn begin_render_with_transform(&mut self, camera: &Camera, camera_transform: Mat4) {
        self.begin_with_uniform(&camera.uniform_with_view(camera_transform.inverse()));
    }

    fn begin_with_uniform(&mut self, uniform: &CameraUniform) {
        self.command.bind_camera(uniform);
        // Submission order is paint order.
        self.command.enable_depth_testing(false);
        self.reset(RenderTarget2D::All);
    }

    /// Flush every non-empty batch and start fresh ones.
    pub fn end_render(&mut self) {
        self.render(RenderTarget2D::All);
        self.reset(RenderTarget2D::All);
    }

    /// Upload and draw the pending batches of `target`. Empty batches are
    /// skipped. Batches are not reset; see [`next_batch`](Self::next_batch).
    pub fn render(&mut self, target: RenderTarget2D) {
        profile_function!();
        for &kind in target.kinds() {
            self.flush(kind);
        }
    }

    /// Flush the batches of `target` and reset only those.
    pub fn next_batch(&mut self, target: RenderTarget2D) {
        self.render(target);
        self.reset(target);
    }

    pub fn draw_rectangle(&mut self, data: &EdgeRenderData) {
        profile_function!();
        let kind = GeometryKind::Rectangle;
        self.ensure_capacity(kind, 4, 6);
        let tex_index = self.texture_index(kind, data.texture.as_ref());

        let transform = data.transform.matrix();
        for (corner, tex_coords) in QUAD_CORNERS.iter().zip(data.tex_coords) {
            self.rectangles
                .push(edge_vertex(data, transform.transform_point3(*corner), tex_coords, tex_index));
        }
        self.rectangles.add_elements(6);
        self.command.stats_mut().record_object(4, 6);
    }

    pub fn draw_triangle(&mut self, data: &EdgeRenderData) {
        profile_function!();
        let kind = GeometryKind::Triangle;
        self.ensure_capacity(kind, 3, 3);
        let tex_index = self.texture_index(kind, data.texture.as_ref());

        let transform = data.transform.matrix();
        for (corner, tex_coords) in TRIANGLE_CORNERS.iter().zip(data.tex_coords) {
            self.triangles
                .push(edge_vertex(data, transform.transform_point3(*corner), tex_coords, tex_index));
        }
        self.triangles.add_elements(3);
        self.command.stats_mut().record_object(3, 3);
    }

    pub fn draw_circle(&mut self, data: &CircleRenderData) {
        profile_function!();
        let kind = GeometryKind::Circle;
        self.ensure_capacity(kind, 4, 6);
        let tex_index = self.texture_index(kind, data.texture.as_ref());

        let transform = data.transform.matrix();
        let alpha_entity_id = data.entity_id_to_alpha_pixels as i32;
        for (corner, tex_coords) in QUAD_CORNERS.iter().zip(data.tex_coords) {
            self.circles.push(CircleVertex {
                world_position: transform.transform_point3(*corner).into(),
                local_position: (corner.truncate() * 2.0).into(),
                tex_coords: tex_coords.into(),
                tiling_factor: data.tiling_factor,
                tex_index,
                color: data.color,
                thickness: data.thickness,
                fade: data.fade,
                projection_mode: data.mode.as_i32(),
                entity_id: data.entity_id,
                alpha_entity_id,
            });
        }
        self.circles.add_elements(6);
        self.command.stats_mut().record_object(4, 6);
    }

    /// Draw one line segment.
    ///
    /// Line width is state of the whole draw call, so the line batch is
    /// flushed after every line. Each call costs one draw call.
    pub fn draw_line(&mut self, data: &LineRenderData) {
        profile_function!();
        self.ensure_capacity(GeometryKind::Line, 2, 2);
        self.line_width = data.thickness;

        for point in [data.point0, data.point1] {
            self.lines.push(LineVertex {
                position: point.into(),
                color: data.color,
                projection_mode: data.mode.as_i32(),
                entity_id: data.entity_id,
                ui_id: data.ui_id,
            });
        }
        self.lines.add_elements(2);
        self.command.stats_mut().record_object(2, 2);

        self.next_batch(RenderTarget2D::Line);
    }

    /// Lay out and draw a string centered on its transform origin.
    ///
    /// If the font lacks both a character and the `'?'` fallback, the glyphs
    /// before that character are drawn and the rest of the string is dropped.
    pub fn draw_string(&mut self, data: &TextRenderData) {
        profile_function!();
        let layout = layout_text(&data.text, &data.font);
        if layout.is_empty() {
            return;
        }

        let kind = GeometryKind::Text;
        let transform = data.transform.matrix();
        let atlas = data.font.atlas();
        let alpha_entity_id = data.entity_id_to_alpha_pixels as i32;

        for quad in layout.quads() {
            self.ensure_capacity(kind, 4, 6);
            self.texture_slot(kind, atlas);

            for (position, tex_coords) in quad.positions.iter().zip(quad.tex_coords) {
                self.text.push(TextVertex {
                    position: transform.transform_point3(position.extend(0.0)).into(),
                    color: data.color,
                    tex_coords: tex_coords.into(),
                    projection_mode: data.mode.as_i32(),
                    entity_id: data.entity_id,
                    ui_id: data.ui_id,
                    alpha_entity_id,
                });
            }
            self.text.add_elements(6);
            self.command.stats_mut().record_object(4, 6);
        }
    }

    /// Draw `data` as the given shape. Circles use the default thickness and fade.
    pub fn draw_sprite(&mut self, geometry: Geometry, data: &EdgeRenderData) {
        match geometry {
            Geometry::Rectangle => self.draw_rectangle(data),
            Geometry::Triangle => self.draw_triangle(data),
            Geometry::Circle => self.draw_circle(&CircleRenderData::from(data)),
        }
    }

    pub fn stats(&self) -> RenderStats {
        self.command.stats()
    }

    pub fn clear_stats(&mut self) {
        self.command.clear_stats();
    }

    pub fn config(&self) -> &Renderer2DConfig {
        &self.config
    }

    pub fn command(&self) -> &RenderCommand {
        &self.command
    }

    /// Indices (vertices for lines) pending in the batch of `kind`.
    pub fn element_count(&self, kind: GeometryKind) -> u32 {
        self.batch(kind).element_count()
    }

    /// Vertex records pending in the batch of `kind`.
    pub fn vertex_count(&self, kind: GeometryKind) -> usize {
        self.batch(kind).vertex_count()
    }

    pub fn texture_slots_in_use(&self, kind: GeometryKind) -> usize {
        self.batch(kind).textures().len()
    }

    /// Width of the most recent line.
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    fn batch(&self, kind: GeometryKind) -> &dyn BatchState {
        match kind {
            GeometryKind::Rectangle => &self.rectangles,
            GeometryKind::Triangle => &self.triangles,
            GeometryKind::Circle => &self.circles,
            GeometryKind::Line => &self.lines,
            GeometryKind::Text => &self.text,
        }
    }

    fn batch_mut(&mut self, kind: GeometryKind) -> &mut dyn BatchState {
        match kind {
            GeometryKind::Rectangle => &mut self.rectangles,
            GeometryKind::Triangle => &mut self.triangles,
            GeometryKind::Circle => &mut self.circles,
            GeometryKind::Line => &mut self.lines,
            GeometryKind::Text => &mut self.text,
        }
    }

    fn reset(&mut self, target: RenderTarget2D) {
        for &kind in target.kinds() {
            self.batch_mut(kind).reset();
        }
    }

    /// Flush `kind` first if `vertices` and `elements` more would not fit.
    fn ensure_capacity(&mut self, kind: GeometryKind, vertices: usize, elements: u32) {
        if !self.batch(kind).fits(vertices, elements) {
            tracing::debug!(
                "{} batch full at {} elements, flushing",
                kind.label(),
                self.batch(kind).element_count()
            );
            self.next_batch(kind.into());
        }
    }

    fn texture_index(&mut self, kind: GeometryKind, texture: Option<&Arc<Texture>>) -> i32 {
        match texture {
            Some(texture) => self.texture_slot(kind, texture) as i32,
            None => NO_TEXTURE,
        }
    }

    /// Slot of `texture` in the batch of `kind`, flushing first if a new slot
    /// is needed and none is free.
    fn texture_slot(&mut self, kind: GeometryKind, texture: &Arc<Texture>) -> u32 {
        if let Some(slot) = self.batch(kind).textures().find(texture) {
            return slot;
        }
        if self.batch(kind).textures().is_full() {
            tracing::debug!(
                "{} batch out of texture slots ({} in use), flushing",
                kind.label(),
                self.batch(kind).textures().len()
            );
            self.next_batch(kind.into());
        }
        self.batch_mut(kind).textures_mut().insert(Arc::clone(texture))
    }

    fn flush(&mut self, kind: GeometryKind) {
        let units = self.texture_units.as_slice();
        match kind {
            GeometryKind::Rectangle => {
                flush_indexed(&mut self.command, &self.rectangles, self.shaders.edge, Some(units))
            }
            GeometryKind::Triangle => {
                flush_indexed(&mut self.command, &self.triangles, self.shaders.edge, Some(units))
            }
            GeometryKind::Circle => {
                flush_indexed(&mut self.command, &self.circles, self.shaders.circle, Some(units))
            }
            GeometryKind::Line => self.flush_lines(),
            GeometryKind::Text => flush_indexed(&mut self.command, &self.text, self.shaders.text, None),
        }
    }

    fn flush_lines(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        profile_scope!("flush_lines");

        let bytes = self.lines.bytes();
        tracing::trace!(
            "Flushing {} line vertices ({} bytes) at width {}",
            self.lines.vertex_count(),
            bytes.len(),
            self.line_width
        );

        let backend = self.command.backend();
        backend.write_buffer(self.lines.vertex_buffer(), 0, bytes);
        backend.bind_shader(self.shaders.line);
        self.command.set_line_width(self.line_width);
        self.command
            .draw_lines(self.lines.vertex_array(), self.lines.vertex_count() as u32, self.line_width);
        self.command.backend().unbind_shader(self.shaders.line);

        let size = bytes.len() as u32;
        self.command.stats_mut().record_draw(size);
    }
}

fn edge_vertex(data: &EdgeRenderData, position: Vec3, tex_coords: glam::Vec2, tex_index: i32) -> EdgeVertex {
    EdgeVertex {
        position: position.into(),
        color: data.color,
        tex_coords: tex_coords.into(),
        tiling_factor: data.tiling_factor,
        tex_index,
        projection_mode: data.mode.as_i32(),
        entity_id: data.entity_id,
        ui_id: data.ui_id,
        alpha_entity_id: data.entity_id_to_alpha_pixels as i32,
    }
}

/// Upload a batch, bind its textures and shader, and issue one indexed draw.
fn flush_indexed<V: Vertex2D>(
    command: &mut RenderCommand,
    batch: &GeometryBuffer<V>,
    shader: ShaderId,
    texture_units: Option<&[i32]>,
) {
    if batch.is_empty() {
        return;
    }
    profile_scope!("flush_indexed");

    let bytes = batch.bytes();
    tracing::trace!(
        "Flushing {} batch: {} elements, {} bytes, {} textures",
        batch.kind().label(),
        batch.element_count(),
        bytes.len(),
        batch.textures().len()
    );

    let backend = command.backend();
    backend.write_buffer(batch.vertex_buffer(), 0, bytes);
    for (unit, texture) in batch.textures().iter().enumerate() {
        backend.bind_texture(texture, unit as u32);
    }
    backend.bind_shader(shader);
    if let Some(units) = texture_units {
        backend.upload_int_array(shader, TEXTURE_ARRAY_UNIFORM, units);
    }
    command.draw_indexed(batch.vertex_array(), batch.element_count());
    backend.unbind_shader(shader);
    for texture in batch.textures().iter() {
        backend.unbind_texture(texture);
    }

    command.stats_mut().record_draw(bytes.len() as u32);
}
