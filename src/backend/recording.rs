//! Recording backend for testing and development.
//!
//! Performs no GPU work: every executor call is appended to a call log and
//! traced. Tests drive the full pipeline against it and assert on the
//! recorded sequence; it is also the fallback backend when no GPU
//! implementation is linked in.

use glam::{Mat4, Vec4};

use crate::assets::{BitmapId, ComputeShaderId, MeshId, ShaderPipelineId};
use crate::command::{ComputeKind, LightState, PrimitiveKind};
use crate::error::BackendError;
use crate::target::RenderTargetId;
use crate::vertex::{IndexEntry, VertexEntry, VertexLayoutId};

use super::RenderBackend;

/// One recorded executor call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    /// Frame started.
    BeginFrame,
    /// Staged vertices uploaded for one layout.
    UploadVertices {
        /// The layout uploaded.
        layout: VertexLayoutId,
        /// Byte count of the region.
        bytes: usize,
    },
    /// Staged indices uploaded.
    UploadIndices {
        /// Element count of the region.
        count: usize,
    },
    /// Render target bound.
    BindTarget(RenderTargetId),
    /// Target cleared.
    ClearTarget {
        /// The cleared target.
        target: RenderTargetId,
        /// Clear color.
        color: Vec4,
        /// Clear depth.
        depth: f32,
    },
    /// Shader pipeline bound.
    BindPipeline {
        /// The pipeline.
        pipeline: ShaderPipelineId,
        /// Its vertex layout.
        layout: VertexLayoutId,
    },
    /// Bitmap texture bound.
    BindTexture(BitmapId),
    /// Render target bound as shader input.
    BindTargetInput(RenderTargetId),
    /// Per-draw uniforms set.
    SetDrawState,
    /// Staged geometry drawn.
    DrawStaged {
        /// Primitive kind.
        kind: PrimitiveKind,
        /// Vertex count.
        vertex_count: u32,
        /// Index count, if indexed.
        index_count: Option<u32>,
    },
    /// Asset mesh drawn.
    DrawMesh {
        /// The mesh.
        mesh: MeshId,
        /// Cached vertex count.
        vertex_count: u32,
        /// Cached index count.
        index_count: u32,
    },
    /// Compute shader dispatched.
    Dispatch {
        /// The shader.
        shader: ComputeShaderId,
        /// The written target.
        target: RenderTargetId,
        /// What the pass computes.
        kind: ComputeKind,
    },
    /// Target resolved or blitted into another.
    ResolveTarget {
        /// Source target.
        source: RenderTargetId,
        /// Destination target.
        destination: RenderTargetId,
        /// Whether the antialiasing resolve path was taken.
        multisampled: bool,
        /// The staged full-screen quad drawn for the hand-off.
        quad: VertexEntry,
    },
    /// Output swapped to screen.
    Present,
}

/// Backend that records calls instead of touching a GPU.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
}

impl RecordingBackend {
    /// Create an empty recording backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded calls, in issue order.
    #[inline]
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Forget all recorded calls.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn record(&mut self, call: BackendCall) {
        log::trace!("RecordingBackend: {call:?}");
        self.calls.push(call);
    }
}

impl RenderBackend for RecordingBackend {
    fn name(&self) -> &'static str {
        "Recording"
    }

    fn begin_frame(&mut self) -> Result<(), BackendError> {
        self.record(BackendCall::BeginFrame);
        Ok(())
    }

    fn upload_vertices(
        &mut self,
        layout: VertexLayoutId,
        bytes: &[u8],
    ) -> Result<(), BackendError> {
        self.record(BackendCall::UploadVertices {
            layout,
            bytes: bytes.len(),
        });
        Ok(())
    }

    fn upload_indices(&mut self, indices: &[u32]) -> Result<(), BackendError> {
        self.record(BackendCall::UploadIndices {
            count: indices.len(),
        });
        Ok(())
    }

    fn bind_target(&mut self, target: RenderTargetId) -> Result<(), BackendError> {
        self.record(BackendCall::BindTarget(target));
        Ok(())
    }

    fn clear_target(
        &mut self,
        target: RenderTargetId,
        color: Vec4,
        depth: f32,
    ) -> Result<(), BackendError> {
        self.record(BackendCall::ClearTarget {
            target,
            color,
            depth,
        });
        Ok(())
    }

    fn bind_pipeline(
        &mut self,
        pipeline: ShaderPipelineId,
        layout: VertexLayoutId,
    ) -> Result<(), BackendError> {
        self.record(BackendCall::BindPipeline { pipeline, layout });
        Ok(())
    }

    fn bind_texture(&mut self, texture: BitmapId) -> Result<(), BackendError> {
        self.record(BackendCall::BindTexture(texture));
        Ok(())
    }

    fn bind_target_input(&mut self, source: RenderTargetId) -> Result<(), BackendError> {
        self.record(BackendCall::BindTargetInput(source));
        Ok(())
    }

    fn set_draw_state(
        &mut self,
        _transform: Mat4,
        _view_projection: Mat4,
        _color: Vec4,
        _light: LightState,
    ) -> Result<(), BackendError> {
        self.record(BackendCall::SetDrawState);
        Ok(())
    }

    fn draw_staged(
        &mut self,
        kind: PrimitiveKind,
        vertices: VertexEntry,
        indices: Option<IndexEntry>,
    ) -> Result<(), BackendError> {
        self.record(BackendCall::DrawStaged {
            kind,
            vertex_count: vertices.count,
            index_count: indices.map(|i| i.count),
        });
        Ok(())
    }

    fn draw_mesh(
        &mut self,
        mesh: MeshId,
        vertex_count: u32,
        index_count: u32,
    ) -> Result<(), BackendError> {
        self.record(BackendCall::DrawMesh {
            mesh,
            vertex_count,
            index_count,
        });
        Ok(())
    }

    fn dispatch(
        &mut self,
        shader: ComputeShaderId,
        target: RenderTargetId,
        kind: ComputeKind,
    ) -> Result<(), BackendError> {
        self.record(BackendCall::Dispatch {
            shader,
            target,
            kind,
        });
        Ok(())
    }

    fn resolve_target(
        &mut self,
        source: RenderTargetId,
        destination: RenderTargetId,
        multisampled: bool,
        quad: VertexEntry,
    ) -> Result<(), BackendError> {
        self.record(BackendCall::ResolveTarget {
            source,
            destination,
            multisampled,
            quad,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<(), BackendError> {
        self.record(BackendCall::Present);
        Ok(())
    }
}
