//! Recording implementation of [`RenderBackend`] for testing.
//!
//! Every call is appended to a log that tests can inspect afterwards.
//! Handles are allocated from one counter, so ids are unique across buffers,
//! vertex arrays and shaders.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use bytemuck::Pod;
use paper_render::{
    BufferId, Color, GraphicsApi, RenderBackend, ShaderId, Texture, TextureId, VertexArrayId,
    VertexBufferDescriptor,
};
use parking_lot::Mutex;

/// Records a backend call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    CreateVertexBuffer {
        id: BufferId,
        label: Option<String>,
        size: u64,
        stride: u64,
    },
    CreateIndexBuffer {
        id: BufferId,
        label: Option<String>,
        count: usize,
    },
    CreateVertexArray {
        id: VertexArrayId,
        label: Option<String>,
        vertex_buffer: BufferId,
        index_buffer: Option<BufferId>,
    },
    CreateUniformBuffer {
        id: BufferId,
        label: Option<String>,
        size: u64,
    },
    WriteBuffer {
        buffer: BufferId,
        offset: u64,
        data: Vec<u8>,
    },
    BindUniformBuffer {
        buffer: BufferId,
        binding: u32,
    },
    CreateShader {
        id: ShaderId,
        name: String,
    },
    BindShader(ShaderId),
    UnbindShader(ShaderId),
    UploadIntArray {
        shader: ShaderId,
        name: String,
        values: Vec<i32>,
    },
    BindTexture {
        texture: TextureId,
        unit: u32,
    },
    UnbindTexture(TextureId),
    DrawIndexed {
        vertex_array: VertexArrayId,
        index_count: u32,
    },
    DrawLines {
        vertex_array: VertexArrayId,
        vertex_count: u32,
        thickness: f32,
    },
    SetLineWidth(f32),
    EnableDepthTesting(bool),
    SetClearColor(Color),
    Clear,
    SetViewport {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// A draw call as seen by the backend, attributed to the vertex array it used.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    /// Label of the vertex array, e.g. `"rectangles"`.
    pub label: Option<String>,
    /// Indices for indexed draws, vertices for line draws.
    pub count: u32,
    /// Line width for line draws.
    pub thickness: Option<f32>,
}

/// Mock implementation of [`RenderBackend`] for testing.
///
/// Methods take `&self` and record through a `parking_lot::Mutex`, which
/// keeps the mock `Send + Sync` as the trait requires.
pub struct MockRenderBackend {
    api: GraphicsApi,
    calls: Mutex<Vec<RenderCall>>,
    next_id: AtomicU64,
    depth_testing: AtomicBool,
}

impl MockRenderBackend {
    /// A mock reporting [`GraphicsApi::OpenGl`].
    pub fn new() -> Self {
        Self::with_api(GraphicsApi::OpenGl)
    }

    pub fn with_api(api: GraphicsApi) -> Self {
        Self {
            api,
            calls: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            depth_testing: AtomicBool::new(true),
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn record(&self, call: RenderCall) {
        self.calls.lock().push(call);
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().clone()
    }

    /// Clear recorded calls (useful between test steps). Created resources
    /// stay resolvable by label.
    pub fn clear_calls(&self) {
        self.calls
            .lock()
            .retain(|call| matches!(call, RenderCall::CreateVertexArray { .. } | RenderCall::CreateShader { .. }));
    }

    /// Number of calls recorded since creation or the last [`clear_calls`](Self::clear_calls),
    /// excluding retained resource creations.
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| !matches!(call, RenderCall::CreateVertexArray { .. } | RenderCall::CreateShader { .. }))
            .count()
    }

    /// Label the vertex array `id` was created with.
    pub fn vertex_array_label(&self, id: VertexArrayId) -> Option<String> {
        self.calls.lock().iter().find_map(|call| match call {
            RenderCall::CreateVertexArray { id: created, label, .. } if *created == id => label.clone(),
            _ => None,
        })
    }

    /// Vertex buffer behind the vertex array labelled `label`.
    pub fn vertex_buffer_of(&self, label: &str) -> Option<BufferId> {
        self.calls.lock().iter().find_map(|call| match call {
            RenderCall::CreateVertexArray {
                label: Some(created),
                vertex_buffer,
                ..
            } if created == label => Some(*vertex_buffer),
            _ => None,
        })
    }

    /// Name of the shader `id` was created from.
    pub fn shader_name(&self, id: ShaderId) -> Option<String> {
        self.calls.lock().iter().find_map(|call| match call {
            RenderCall::CreateShader { id: created, name } if *created == id => Some(name.clone()),
            _ => None,
        })
    }

    /// Indexed and line draws in submission order.
    pub fn draws(&self) -> Vec<RecordedDraw> {
        let calls = self.calls();
        calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::DrawIndexed {
                    vertex_array,
                    index_count,
                } => Some(RecordedDraw {
                    label: self.vertex_array_label(*vertex_array),
                    count: *index_count,
                    thickness: None,
                }),
                RenderCall::DrawLines {
                    vertex_array,
                    vertex_count,
                    thickness,
                } => Some(RecordedDraw {
                    label: self.vertex_array_label(*vertex_array),
                    count: *vertex_count,
                    thickness: Some(*thickness),
                }),
                _ => None,
            })
            .collect()
    }

    /// Labels of the vertex arrays drawn, in submission order.
    pub fn draw_order(&self) -> Vec<String> {
        self.draws()
            .into_iter()
            .map(|draw| draw.label.unwrap_or_default())
            .collect()
    }

    /// Counts of every draw of the vertex array labelled `label`.
    pub fn draw_counts(&self, label: &str) -> Vec<u32> {
        self.draws()
            .into_iter()
            .filter(|draw| draw.label.as_deref() == Some(label))
            .map(|draw| draw.count)
            .collect()
    }

    pub fn draw_indexed_calls(&self) -> Vec<(VertexArrayId, u32)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RenderCall::DrawIndexed {
                    vertex_array,
                    index_count,
                } => Some((*vertex_array, *index_count)),
                _ => None,
            })
            .collect()
    }

    /// Thickness of every line draw, in submission order.
    pub fn line_thicknesses(&self) -> Vec<f32> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RenderCall::DrawLines { thickness, .. } => Some(*thickness),
                _ => None,
            })
            .collect()
    }

    /// Every texture bind as `(texture, unit)`.
    pub fn texture_binds(&self) -> Vec<(TextureId, u32)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RenderCall::BindTexture { texture, unit } => Some((*texture, *unit)),
                _ => None,
            })
            .collect()
    }

    /// Every upload of the named integer-array uniform.
    pub fn int_array_uploads(&self, name: &str) -> Vec<Vec<i32>> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RenderCall::UploadIntArray {
                    name: uploaded, values, ..
                } if uploaded == name => Some(values.clone()),
                _ => None,
            })
            .collect()
    }

    /// Every write to `buffer`, oldest first.
    pub fn buffer_writes(&self, buffer: BufferId) -> Vec<Vec<u8>> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RenderCall::WriteBuffer { buffer: written, data, .. } if *written == buffer => {
                    Some(data.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Vertex records uploaded for the vertex array labelled `label`, one
    /// entry per flush.
    pub fn uploaded_vertices<V: Pod>(&self, label: &str) -> Vec<Vec<V>> {
        let Some(buffer) = self.vertex_buffer_of(label) else {
            return Vec::new();
        };
        self.buffer_writes(buffer)
            .iter()
            .map(|bytes| {
                bytes
                    .chunks_exact(std::mem::size_of::<V>())
                    .map(bytemuck::pod_read_unaligned)
                    .collect()
            })
            .collect()
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&RenderCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(*call)).count()
    }
}

impl Default for MockRenderBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for MockRenderBackend {
    fn api(&self) -> GraphicsApi {
        self.api
    }

    fn create_vertex_buffer(&self, desc: &VertexBufferDescriptor<'_>) -> BufferId {
        let id = BufferId(self.next_id());
        self.record(RenderCall::CreateVertexBuffer {
            id,
            label: desc.label.map(str::to_owned),
            size: desc.size,
            stride: desc.layout.array_stride,
        });
        id
    }

    fn create_index_buffer(&self, label: Option<&str>, indices: &[u32]) -> BufferId {
        let id = BufferId(self.next_id());
        self.record(RenderCall::CreateIndexBuffer {
            id,
            label: label.map(str::to_owned),
            count: indices.len(),
        });
        id
    }

    fn create_vertex_array(
        &self,
        label: Option<&str>,
        vertex_buffer: BufferId,
        index_buffer: Option<BufferId>,
    ) -> VertexArrayId {
        let id = VertexArrayId(self.next_id());
        self.record(RenderCall::CreateVertexArray {
            id,
            label: label.map(str::to_owned),
            vertex_buffer,
            index_buffer,
        });
        id
    }

    fn create_uniform_buffer(&self, label: Option<&str>, size: u64) -> BufferId {
        let id = BufferId(self.next_id());
        self.record(RenderCall::CreateUniformBuffer {
            id,
            label: label.map(str::to_owned),
            size,
        });
        id
    }

    fn write_buffer(&self, buffer: BufferId, offset: u64, data: &[u8]) {
        self.record(RenderCall::WriteBuffer {
            buffer,
            offset,
            data: data.to_vec(),
        });
    }

    fn bind_uniform_buffer(&self, buffer: BufferId, binding: u32) {
        self.record(RenderCall::BindUniformBuffer { buffer, binding });
    }

    fn create_shader(&self, name: &str) -> ShaderId {
        let id = ShaderId(self.next_id());
        self.record(RenderCall::CreateShader {
            id,
            name: name.to_owned(),
        });
        id
    }

    fn bind_shader(&self, shader: ShaderId) {
        self.record(RenderCall::BindShader(shader));
    }

    fn unbind_shader(&self, shader: ShaderId) {
        self.record(RenderCall::UnbindShader(shader));
    }

    fn upload_int_array(&self, shader: ShaderId, name: &str, values: &[i32]) {
        self.record(RenderCall::UploadIntArray {
            shader,
            name: name.to_owned(),
            values: values.to_vec(),
        });
    }

    fn bind_texture(&self, texture: &Texture, unit: u32) {
        self.record(RenderCall::BindTexture {
            texture: texture.id(),
            unit,
        });
    }

    fn unbind_texture(&self, texture: &Texture) {
        self.record(RenderCall::UnbindTexture(texture.id()));
    }

    fn draw_indexed(&self, vertex_array: VertexArrayId, index_count: u32) {
        self.record(RenderCall::DrawIndexed {
            vertex_array,
            index_count,
        });
    }

    fn draw_lines(&self, vertex_array: VertexArrayId, vertex_count: u32, thickness: f32) {
        self.record(RenderCall::DrawLines {
            vertex_array,
            vertex_count,
            thickness,
        });
    }

    fn set_line_width(&self, thickness: f32) {
        self.record(RenderCall::SetLineWidth(thickness));
    }

    fn enable_depth_testing(&self, enabled: bool) {
        self.depth_testing.store(enabled, Ordering::Relaxed);
        self.record(RenderCall::EnableDepthTesting(enabled));
    }

    fn is_depth_testing_enabled(&self) -> bool {
        self.depth_testing.load(Ordering::Relaxed)
    }

    fn set_clear_color(&self, color: Color) {
        self.record(RenderCall::SetClearColor(color));
    }

    fn clear(&self) {
        self.record(RenderCall::Clear);
    }

    fn set_viewport(&self, x: u32, y: u32, width: u32, height: u32) {
        self.record(RenderCall::SetViewport { x, y, width, height });
    }
}
