//! Per-kind batch storage: a fixed-capacity vertex arena, the GPU buffers it
//! is flushed into, and the batch's texture-slot table.

use crate::backend::{RenderBackend, VertexBufferDescriptor};
use crate::resource::{BufferId, VertexArrayId};

use super::texture_slots::TextureSlots;
use super::vertex::Vertex2D;
use super::GeometryKind;

/// Index pattern for quads: two triangles per 4 vertices.
pub fn quad_indices(count: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity(count as usize);
    let mut offset = 0;
    while indices.len() + 6 <= count as usize {
        indices.extend_from_slice(&[
            offset,
            offset + 1,
            offset + 2,
            offset + 2,
            offset + 3,
            offset,
        ]);
        offset += 4;
    }
    indices
}

/// Index pattern for independent triangles.
pub fn triangle_indices(count: u32) -> Vec<u32> {
    (0..count - count % 3).collect()
}

pub(crate) struct GeometryBuffer<V: Vertex2D> {
    kind: GeometryKind,
    /// Scratch arena; `len()` is the write cursor and never exceeds `max_vertices`.
    vertices: Vec<V>,
    max_vertices: usize,
    max_elements: u32,
    element_count: u32,
    textures: TextureSlots,
    vertex_buffer: BufferId,
    vertex_array: VertexArrayId,
}

impl<V: Vertex2D> GeometryBuffer<V> {
    pub fn new(
        backend: &dyn RenderBackend,
        kind: GeometryKind,
        max_vertices: u32,
        max_elements: u32,
        texture_slots: usize,
        index_buffer: Option<BufferId>,
    ) -> Self {
        let vertex_buffer = backend.create_vertex_buffer(&VertexBufferDescriptor {
            label: Some(V::LABEL),
            layout: V::layout(),
            size: max_vertices as u64 * V::stride(),
        });
        let vertex_array = backend.create_vertex_array(Some(kind.label()), vertex_buffer, index_buffer);

        Self {
            kind,
            vertices: Vec::with_capacity(max_vertices as usize),
            max_vertices: max_vertices as usize,
            max_elements,
            element_count: 0,
            textures: TextureSlots::new(texture_slots),
            vertex_buffer,
            vertex_array,
        }
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    /// Whether `vertices` more records and `elements` more indices fit this batch.
    pub fn fits(&self, vertices: usize, elements: u32) -> bool {
        self.vertices.len() + vertices <= self.max_vertices
            && self.element_count + elements <= self.max_elements
    }

    pub fn push(&mut self, vertex: V) {
        debug_assert!(
            self.vertices.len() < self.max_vertices,
            "{} arena overflow",
            self.kind.label()
        );
        self.vertices.push(vertex);
    }

    pub fn add_elements(&mut self, count: u32) {
        self.element_count += count;
    }

    /// Rewind the cursor, zero the counts and empty the slot table.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.element_count = 0;
        self.textures.clear();
    }

    /// Drop the arena memory. Used at shutdown.
    pub fn release(&mut self) {
        self.reset();
        self.vertices = Vec::new();
    }

    pub fn is_empty(&self) -> bool {
        self.element_count == 0
    }

    pub fn element_count(&self) -> u32 {
        self.element_count
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Bytes written since the last reset.
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn textures(&self) -> &TextureSlots {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureSlots {
        &mut self.textures
    }

    pub fn vertex_buffer(&self) -> BufferId {
        self.vertex_buffer
    }

    pub fn vertex_array(&self) -> VertexArrayId {
        self.vertex_array
    }
}
