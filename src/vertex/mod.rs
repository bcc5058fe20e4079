//! Vertex layouts and frame staging buffers.

pub mod layout;
pub mod staging;

pub use layout::{
    AttributeFormat, AttributeSemantic, ColorVertex, LayoutRegistry, TexturedVertex,
    VertexAttribute, VertexLayout, VertexLayoutId,
};
pub use staging::{IndexEntry, StagingBuffers, VertexEntry};
