//! Render command records.
//!
//! A command is a fixed-size [`CommandHeader`] plus a typed payload stored
//! in a per-type array inside the queue. The header carries everything the
//! sorter needs (type, target, sort key, payload index) so commands can be
//! ordered without decoding heterogeneous payloads.
//!
//! Sort keys are monotonic floats arranged in coarse bands (see [`band`]):
//! clears first, world geometry, the outline duplicates, debug overlays,
//! then the shader/compute/present passes that composite the frame.
//! Intra-band float offsets break ties; insertion order is preserved for
//! equal keys.

pub mod queue;

pub use queue::{CommandCounts, QueueCapacity, RenderCommandQueue};

use glam::{Mat4, Vec3, Vec4};
use static_assertions::const_assert_eq;

use crate::assets::{BitmapId, ComputeShaderId, MeshId, ShaderPipelineId};
use crate::target::RenderTargetId;
use crate::vertex::{IndexEntry, VertexEntry, VertexLayoutId};

/// Sort key bands. Lower keys execute first.
///
/// Bands are constants, not per-command configuration; helpers add small
/// intra-band offsets to order commands within a band.
pub mod band {
    /// Framebuffer clears.
    pub const CLEAR: f32 = 0.0;
    /// World geometry and staged primitives.
    pub const MESHES: f32 = 100.0;
    /// Flat duplicates of outlined geometry, drawn into the outline target.
    pub const OUTLINED_MESHES: f32 = 300.0;
    /// Debug overlay elements. Sub-elements interleave at `+0.1`, `+0.2`, `+0.3`.
    pub const DEBUG_OVERLAY: f32 = 400.0;
    /// Full-screen shader and compute passes.
    pub const SHADER_PASSES: f32 = 500.0;
    /// Present operations that flow one target into its successor.
    pub const PUSH_RENDER_TARGETS: f32 = 600.0;
}

/// Discriminant of a command's payload type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandType {
    /// Clear a render target.
    Clear,
    /// Draw a primitive (staged or asset-backed geometry).
    Primitive,
    /// Full-screen shader pass reading one target.
    ShaderPass,
    /// Compute pass over a target's pixels.
    ComputePass,
    /// Present a target into its routing successor.
    PushTarget,
}

/// Fixed-size command header.
///
/// The sorter only ever reads headers; payloads stay untouched until the
/// backend executor drains the queue.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct CommandHeader {
    /// Monotonic sort key; lower sorts first.
    pub sort_key: f32,
    /// Payload type discriminant.
    pub command: CommandType,
    /// The target this command writes.
    pub target: RenderTargetId,
    /// Index into the queue's payload array for `command`.
    pub payload: u16,
}

// The sorter relies on headers being small and uniform; keep the record at
// two words.
const_assert_eq!(std::mem::size_of::<CommandHeader>(), 8);

impl CommandHeader {
    /// Create a header.
    pub fn new(
        command: CommandType,
        target: RenderTargetId,
        sort_key: f32,
        payload: u16,
    ) -> Self {
        Self {
            sort_key,
            command,
            target,
            payload,
        }
    }
}

/// Kind of primitive a draw command rasterizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Points.
    Point,
    /// Line list.
    Line,
    /// Line strip.
    LineStrip,
    /// Closed line loop.
    LineLoop,
    /// Triangle list.
    Triangle,
    /// Triangle fan.
    TriangleFan,
    /// Tessellation patches.
    Patch,
}

/// Where a draw command's geometry lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    /// Vertices staged into this frame's arenas.
    Staged {
        /// The staged vertex region.
        vertices: VertexEntry,
        /// Optional staged indices, already biased by the vertex offset.
        indices: Option<IndexEntry>,
    },
    /// Pre-existing asset geometry in the backend's persistent buffers.
    Asset {
        /// The mesh asset.
        mesh: MeshId,
        /// Cached vertex count.
        vertex_count: u32,
        /// Cached index count; 0 for non-indexed meshes.
        index_count: u32,
        /// Layout of the asset's vertex data.
        layout: VertexLayoutId,
    },
}

impl Geometry {
    /// The vertex layout this geometry follows.
    pub fn layout(&self) -> VertexLayoutId {
        match self {
            Self::Staged { vertices, .. } => vertices.layout,
            Self::Asset { layout, .. } => *layout,
        }
    }
}

/// Snapshot of the active light at push time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightState {
    /// Direction towards the light.
    pub direction: Vec3,
    /// Light color.
    pub color: Vec3,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, 1.0, 0.0),
            color: Vec3::ONE,
        }
    }
}

/// Payload of a [`CommandType::Clear`] command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearCommand {
    /// Color the target is cleared to.
    pub color: Vec4,
    /// Depth value the target's depth attachment is cleared to, if any.
    pub depth: f32,
}

/// Payload of a [`CommandType::Primitive`] command.
///
/// Snapshots the camera and light state active at push time, so later
/// changes to the frame context do not affect already-pushed draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveCommand {
    /// Primitive kind.
    pub kind: PrimitiveKind,
    /// Geometry source.
    pub geometry: Geometry,
    /// Shader pipeline to draw with.
    pub pipeline: ShaderPipelineId,
    /// Texture bound for the draw, if any.
    pub texture: Option<BitmapId>,
    /// Model transform.
    pub transform: Mat4,
    /// Uniform color / tint.
    pub color: Vec4,
    /// Camera view-projection at push time.
    pub view_projection: Mat4,
    /// Active light at push time.
    pub light: LightState,
}

/// Payload of a [`CommandType::ShaderPass`] command: a full-screen pass
/// reading `source` and writing the header's target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderPassCommand {
    /// Shader pipeline to run.
    pub pipeline: ShaderPipelineId,
    /// The target read as input texture.
    pub source: RenderTargetId,
    /// Staged full-screen quad vertices.
    pub quad: VertexEntry,
}

/// What a compute pass computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeKind {
    /// Seed each silhouette pixel with its own coordinate.
    OutlineInit,
    /// One jump-flood propagation step.
    JumpFlood {
        /// Step size in pixels; strictly halves across the chain.
        step: u32,
    },
    /// 3x3 kernel blur for softening.
    KernelBlur,
}

/// Payload of a [`CommandType::ComputePass`] command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputeCommand {
    /// Compute shader to dispatch.
    pub shader: ComputeShaderId,
    /// What the pass computes.
    pub kind: ComputeKind,
}

/// Payload of a [`CommandType::PushTarget`] command: flow `source` into the
/// header's target (its routing successor) using a full-screen quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushTargetCommand {
    /// The presented target.
    pub source: RenderTargetId,
    /// Staged full-screen quad vertices.
    pub quad: VertexEntry,
}
