//! Vertex and index staging buffers.
//!
//! The staging layer hands out offset-stable entries into this frame's
//! vertex/index arenas. Each registered layout owns a byte arena; index data
//! shares one `u32` arena across all layouts. Offsets are cumulative element
//! counts at push time, valid as indices into the eventual GPU buffer once
//! the backend uploads the whole arena contiguously, so callers writing
//! index data must bias their indices by the paired vertex entry's offset.
//!
//! Asset-backed draws (meshes, glyph atlases rendered from persistent GPU
//! buffers) never touch this layer; they record `{count, layout}` descriptors
//! only.

use crate::arena::FrameArena;
use crate::vertex::layout::{LayoutRegistry, VertexLayoutId};

/// Handle to a vertex allocation in this frame's staging buffers.
///
/// `offset` is the cumulative vertex count for `layout` at push time and is
/// stable for the rest of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexEntry {
    /// Element offset into the layout's staged vertex region.
    pub offset: u32,
    /// Number of vertices in this entry.
    pub count: u32,
    /// The layout these vertices follow.
    pub layout: VertexLayoutId,
}

/// Handle to an index allocation in this frame's shared index arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    /// Element offset into the staged index region.
    pub offset: u32,
    /// Number of indices in this entry.
    pub count: u32,
}

/// Per-frame vertex/index staging storage.
///
/// Created once at startup with fixed capacities and cleared at the start
/// of every frame; pushing past capacity is fatal.
#[derive(Debug)]
pub struct StagingBuffers {
    registry: LayoutRegistry,
    vertex_arenas: [FrameArena<u8>; VertexLayoutId::ALL.len()],
    index_arena: FrameArena<u32>,
}

impl StagingBuffers {
    /// Create staging buffers sized for worst-case frame content.
    ///
    /// `vertex_capacity` is the byte capacity of each per-layout arena;
    /// `index_capacity` is the element capacity of the shared index arena.
    pub fn new(vertex_capacity: usize, index_capacity: usize) -> Self {
        Self {
            registry: LayoutRegistry::new(),
            vertex_arenas: [
                FrameArena::new(vertex_capacity, "vertices/color"),
                FrameArena::new(vertex_capacity, "vertices/textured"),
                FrameArena::new(vertex_capacity, "vertices/mesh"),
            ],
            index_arena: FrameArena::new(index_capacity, "indices"),
        }
    }

    /// The layout registry backing these buffers.
    #[inline]
    pub fn registry(&self) -> &LayoutRegistry {
        &self.registry
    }

    /// Allocate `count` vertices of `layout`, returning the entry and a
    /// writable byte slice of `count * stride` bytes.
    ///
    /// # Panics
    ///
    /// Panics if the layout's arena cannot hold `count` more vertices.
    pub fn push_vertices(
        &mut self,
        layout: VertexLayoutId,
        count: u32,
    ) -> (VertexEntry, &mut [u8]) {
        let stride = self.registry.stride(layout) as usize;
        let arena = &mut self.vertex_arenas[layout.index()];
        debug_assert_eq!(arena.used() % stride, 0);
        let offset = (arena.used() / stride) as u32;
        let (_, bytes) = arena.push(count as usize * stride);
        (
            VertexEntry {
                offset,
                count,
                layout,
            },
            bytes,
        )
    }

    /// Allocate `count` indices from the shared index arena, returning the
    /// entry and a writable slice.
    ///
    /// Callers must add the paired vertex entry's offset to every index they
    /// write so that draws sharing one GPU buffer address their own vertices.
    ///
    /// # Panics
    ///
    /// Panics if the index arena cannot hold `count` more elements.
    pub fn push_indices(&mut self, count: u32) -> (IndexEntry, &mut [u32]) {
        let (offset, slice) = self.index_arena.push(count as usize);
        (
            IndexEntry {
                offset: offset as u32,
                count,
            },
            slice,
        )
    }

    /// Vertices staged for `layout` this frame, as raw bytes.
    #[inline]
    pub fn vertex_bytes(&self, layout: VertexLayoutId) -> &[u8] {
        self.vertex_arenas[layout.index()].contents()
    }

    /// Number of vertices staged for `layout` this frame.
    pub fn vertex_count(&self, layout: VertexLayoutId) -> u32 {
        let stride = self.registry.stride(layout) as usize;
        (self.vertex_arenas[layout.index()].used() / stride) as u32
    }

    /// Indices staged this frame.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        self.index_arena.contents()
    }

    /// Total bytes staged across all vertex arenas this frame.
    pub fn staged_vertex_bytes(&self) -> usize {
        self.vertex_arenas.iter().map(|a| a.used()).sum()
    }

    /// The staging epoch, advanced on every clear. All arenas share it.
    #[inline]
    pub fn epoch(&self) -> u64 {
        self.index_arena.epoch()
    }

    /// Release all staged data for the next frame.
    pub fn clear(&mut self) {
        for arena in &mut self.vertex_arenas {
            arena.clear();
        }
        self.index_arena.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_offsets_accumulate_per_layout() {
        let mut staging = StagingBuffers::new(4096, 1024);

        let (a, _) = staging.push_vertices(VertexLayoutId::Color, 4);
        let (b, _) = staging.push_vertices(VertexLayoutId::Color, 4);
        assert_eq!(a.offset, 0);
        assert_eq!(b.offset, a.offset + 4);

        // A different layout allocates from its own arena.
        let (c, _) = staging.push_vertices(VertexLayoutId::Textured, 6);
        assert_eq!(c.offset, 0);
        assert_eq!(staging.vertex_count(VertexLayoutId::Color), 8);
        assert_eq!(staging.vertex_count(VertexLayoutId::Textured), 6);
    }

    #[test]
    fn test_index_offsets_are_shared() {
        let mut staging = StagingBuffers::new(4096, 1024);
        let (a, _) = staging.push_indices(6);
        let (b, _) = staging.push_indices(3);
        assert_eq!(a.offset, 0);
        assert_eq!(b.offset, 6);
        assert_eq!(staging.indices().len(), 9);
    }

    #[test]
    fn test_slice_sizes_match_stride() {
        let mut staging = StagingBuffers::new(4096, 1024);
        let (_, bytes) = staging.push_vertices(VertexLayoutId::Textured, 3);
        assert_eq!(bytes.len(), 3 * 36);
    }

    #[test]
    fn test_clear_reproduces_offsets() {
        let mut staging = StagingBuffers::new(4096, 1024);
        let first = staging.push_vertices(VertexLayoutId::Color, 5).0;
        let epoch = staging.epoch();

        staging.clear();
        assert_eq!(staging.epoch(), epoch + 1);

        let second = staging.push_vertices(VertexLayoutId::Color, 5).0;
        assert_eq!(first, second);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn test_vertex_overflow_is_fatal() {
        let mut staging = StagingBuffers::new(28 * 2, 16);
        staging.push_vertices(VertexLayoutId::Color, 3);
    }
}
