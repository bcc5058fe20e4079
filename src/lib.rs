//! Deferred render command pipeline.
//!
//! A frame is described, not drawn: callers push clears, primitives, text,
//! meshes, shader passes and target hand-offs into a [`FrameGraph`], which
//! stages geometry into per-layout frame arenas and keeps an always-sorted
//! command queue. Once the frame is closed, [`execute_frame`] drains the
//! queue into any [`RenderBackend`] in a single forward walk.
//!
//! No allocation happens after startup: arenas and queue storage are sized
//! once from [`FrameGraphConfig`] and recycled every frame. Overflowing any
//! capacity is a programmer error and panics.
//!
//! ```
//! use framegraph::{execute_frame, FrameGraph, FrameGraphConfig, RecordingBackend};
//! use framegraph::assets::{AssetCatalog, ShaderPipelineDescriptor};
//! use framegraph::target::RenderTargetId;
//! use framegraph::vertex::VertexLayoutId;
//! use glam::{Vec3, Vec4};
//!
//! let mut frame = FrameGraph::new(FrameGraphConfig::default());
//! let mut catalog = AssetCatalog::new();
//! catalog.register_pipeline(
//!     frame.pipelines().color,
//!     ShaderPipelineDescriptor { layout: VertexLayoutId::Color },
//! );
//!
//! frame.begin_frame();
//! frame.push_clear(RenderTargetId::World, Vec4::new(0.1, 0.1, 0.1, 1.0));
//! frame.push_line(Vec3::ZERO, Vec3::X, Vec4::ONE, 0.0);
//! frame.end_frame();
//!
//! let mut backend = RecordingBackend::new();
//! execute_frame(&frame, &catalog, &mut backend).unwrap();
//! ```

pub mod arena;
pub mod assets;
pub mod backend;
pub mod command;
pub mod error;
pub mod frame;
pub mod outline;
pub mod target;
pub mod vertex;

pub use arena::FrameArena;
pub use backend::{execute_frame, BackendCall, RecordingBackend, RenderBackend};
pub use command::{band, CommandHeader, CommandType, RenderCommandQueue};
pub use error::BackendError;
pub use frame::{DebugFlags, FrameGraph, FrameGraphConfig, FrameStats, PipelineSet};
pub use outline::OutlineSettings;
pub use target::{RenderTargetId, TargetFlags};

/// Crate version, for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
