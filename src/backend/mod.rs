//! Backend executor boundary.
//!
//! The pipeline produces a fully-ordered, fully-addressed frame description
//! and nothing more; a [`RenderBackend`] implementation owns the actual GPU
//! context and interprets payload contents. [`execute_frame`] is the drain
//! loop: it uploads this frame's staging arenas once per layout, then walks
//! the sorted header array a single time, decoding each payload and issuing
//! the matching backend calls.
//!
//! The executor never mutates the frame; build, drain and clear phases are
//! strictly separated (see [`FrameGraph`](crate::frame::FrameGraph)).

pub mod recording;

pub use recording::{BackendCall, RecordingBackend};

use glam::{Mat4, Vec4};

use crate::assets::{AssetResolver, BitmapId, ComputeShaderId, MeshId, ShaderPipelineId};
use crate::command::{CommandType, ComputeKind, Geometry, LightState, PrimitiveKind};
use crate::error::BackendError;
use crate::frame::FrameGraph;
use crate::target::RenderTargetId;
use crate::vertex::{IndexEntry, VertexEntry, VertexLayoutId};

/// Contract a graphics-API-specific backend must fulfil.
///
/// Methods are issued in the queue's sorted order; the backend may batch
/// internally as long as observable results match. All failures are fatal
/// for the frame.
pub trait RenderBackend {
    /// Backend name for diagnostics.
    fn name(&self) -> &'static str;

    /// Called once before any other call of the frame.
    fn begin_frame(&mut self) -> Result<(), BackendError>;

    /// Upload (or reuse) this frame's staged vertex region for one layout.
    /// Called once per registered layout, before any draw.
    fn upload_vertices(
        &mut self,
        layout: VertexLayoutId,
        bytes: &[u8],
    ) -> Result<(), BackendError>;

    /// Upload this frame's shared index region. Called once, before any draw.
    fn upload_indices(&mut self, indices: &[u32]) -> Result<(), BackendError>;

    /// Bind a render target for subsequent draws.
    fn bind_target(&mut self, target: RenderTargetId) -> Result<(), BackendError>;

    /// Clear a target's color attachment, and its depth attachment if it
    /// owns one.
    fn clear_target(
        &mut self,
        target: RenderTargetId,
        color: Vec4,
        depth: f32,
    ) -> Result<(), BackendError>;

    /// Bind a shader pipeline together with the vertex layout it consumes.
    fn bind_pipeline(
        &mut self,
        pipeline: ShaderPipelineId,
        layout: VertexLayoutId,
    ) -> Result<(), BackendError>;

    /// Bind a bitmap texture for the next draw.
    fn bind_texture(&mut self, texture: BitmapId) -> Result<(), BackendError>;

    /// Bind a render target's color attachment as a shader input.
    fn bind_target_input(&mut self, source: RenderTargetId) -> Result<(), BackendError>;

    /// Set per-draw uniforms.
    fn set_draw_state(
        &mut self,
        transform: Mat4,
        view_projection: Mat4,
        color: Vec4,
        light: LightState,
    ) -> Result<(), BackendError>;

    /// Draw staged geometry from this frame's uploaded arenas.
    fn draw_staged(
        &mut self,
        kind: PrimitiveKind,
        vertices: VertexEntry,
        indices: Option<IndexEntry>,
    ) -> Result<(), BackendError>;

    /// Draw an asset mesh from the backend's persistent buffers.
    fn draw_mesh(
        &mut self,
        mesh: MeshId,
        vertex_count: u32,
        index_count: u32,
    ) -> Result<(), BackendError>;

    /// Dispatch a compute shader over a target's pixels.
    fn dispatch(
        &mut self,
        shader: ComputeShaderId,
        target: RenderTargetId,
        kind: ComputeKind,
    ) -> Result<(), BackendError>;

    /// Blit or resolve `source` into `destination` by drawing the staged
    /// full-screen `quad`. `multisampled` selects the antialiasing-resolve
    /// path over the plain framebuffer copy.
    fn resolve_target(
        &mut self,
        source: RenderTargetId,
        destination: RenderTargetId,
        multisampled: bool,
        quad: VertexEntry,
    ) -> Result<(), BackendError>;

    /// Swap the composited output to screen.
    fn present(&mut self) -> Result<(), BackendError>;
}

/// Drain a frame's sorted command queue into a backend.
///
/// The queue is frozen: `execute_frame` only reads. The resolver supplies
/// shader pipeline descriptors for the layout pairing check.
///
/// # Panics
///
/// Panics if a draw references an unregistered shader pipeline or if a
/// pipeline's registered vertex layout does not match the geometry's; both
/// are programmer errors caught at the point of mismatch.
pub fn execute_frame<B: RenderBackend>(
    frame: &FrameGraph,
    resolver: &dyn AssetResolver,
    backend: &mut B,
) -> Result<(), BackendError> {
    backend.begin_frame()?;

    let staging = frame.staging();
    for layout in VertexLayoutId::ALL {
        backend.upload_vertices(layout, staging.vertex_bytes(layout))?;
    }
    backend.upload_indices(staging.indices())?;

    let queue = frame.queue();
    let mut bound_target = RenderTargetId::None;

    for header in queue.headers() {
        match header.command {
            CommandType::Clear => {
                let clear = queue.clear_payload(header.payload);
                backend.clear_target(header.target, clear.color, clear.depth)?;
                bound_target = header.target;
            }
            CommandType::Primitive => {
                if bound_target != header.target {
                    backend.bind_target(header.target)?;
                    bound_target = header.target;
                }
                let draw = queue.primitive_payload(header.payload);
                let layout = draw.geometry.layout();
                let descriptor = resolver.pipeline(draw.pipeline).unwrap_or_else(|| {
                    panic!("shader pipeline {:?} was not registered", draw.pipeline)
                });
                assert_eq!(
                    descriptor.layout, layout,
                    "vertex layout was not found: pipeline {:?} expects {:?}, geometry uses {:?}",
                    draw.pipeline, descriptor.layout, layout
                );
                backend.bind_pipeline(draw.pipeline, layout)?;
                if let Some(texture) = draw.texture {
                    backend.bind_texture(texture)?;
                }
                backend.set_draw_state(
                    draw.transform,
                    draw.view_projection,
                    draw.color,
                    draw.light,
                )?;
                match draw.geometry {
                    Geometry::Staged { vertices, indices } => {
                        backend.draw_staged(draw.kind, vertices, indices)?;
                    }
                    Geometry::Asset {
                        mesh,
                        vertex_count,
                        index_count,
                        ..
                    } => {
                        backend.draw_mesh(mesh, vertex_count, index_count)?;
                    }
                }
            }
            CommandType::ShaderPass => {
                if bound_target != header.target {
                    backend.bind_target(header.target)?;
                    bound_target = header.target;
                }
                let pass = queue.shader_pass_payload(header.payload);
                let descriptor = resolver.pipeline(pass.pipeline).unwrap_or_else(|| {
                    panic!("shader pipeline {:?} was not registered", pass.pipeline)
                });
                assert_eq!(
                    descriptor.layout, pass.quad.layout,
                    "vertex layout was not found: pipeline {:?} expects {:?}, quad uses {:?}",
                    pass.pipeline, descriptor.layout, pass.quad.layout
                );
                backend.bind_pipeline(pass.pipeline, pass.quad.layout)?;
                backend.bind_target_input(pass.source)?;
                backend.draw_staged(PrimitiveKind::Triangle, pass.quad, None)?;
            }
            CommandType::ComputePass => {
                let pass = queue.compute_payload(header.payload);
                backend.dispatch(pass.shader, header.target, pass.kind)?;
                // Compute writes invalidate the raster binding.
                bound_target = RenderTargetId::None;
            }
            CommandType::PushTarget => {
                let push = queue.push_target_payload(header.payload);
                if header.target.is_terminal() {
                    backend.present()?;
                } else {
                    backend.resolve_target(
                        push.source,
                        header.target,
                        push.source.is_multisampled(),
                        push.quad,
                    )?;
                }
                bound_target = RenderTargetId::None;
            }
        }
    }

    log::trace!(
        "{}: executed {} commands",
        backend.name(),
        queue.headers().len()
    );
    Ok(())
}
