//! Asset resolver contract.
//!
//! The pipeline never loads or decodes assets. A collaborator resolves
//! integer IDs to cached, read-only descriptors: vertex/index counts and a
//! persistent GPU buffer for meshes, dimensions for bitmaps, glyph metrics
//! for fonts, the expected vertex layout for shader pipelines. Push helpers
//! and the executor only read this metadata.
//!
//! [`AssetCatalog`] is the in-memory reference implementation of the
//! contract, also used by the test suite.

use std::collections::HashMap;

use glam::Vec2;

use crate::vertex::VertexLayoutId;

/// Identifier of a mesh asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub u32);

/// Identifier of a bitmap asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitmapId(pub u32);

/// Identifier of a font asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

/// Identifier of a graphics shader pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderPipelineId(pub u32);

/// Identifier of a compute shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComputeShaderId(pub u32);

/// Cached metadata of a mesh living in the backend's persistent buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshDescriptor {
    /// Number of vertices.
    pub vertex_count: u32,
    /// Number of indices; 0 for non-indexed meshes.
    pub index_count: u32,
    /// Layout of the mesh's vertex data.
    pub layout: VertexLayoutId,
}

/// Cached metadata of a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapDescriptor {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Placement and atlas metrics of one glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Top-left corner of the glyph in atlas UV space.
    pub uv_min: Vec2,
    /// Bottom-right corner of the glyph in atlas UV space.
    pub uv_max: Vec2,
    /// Glyph quad size in layout units.
    pub size: Vec2,
    /// Offset from the pen position to the quad origin.
    pub bearing: Vec2,
    /// Pen advance after this glyph.
    pub advance: f32,
}

/// Cached metadata of a font: its atlas texture and per-glyph metrics.
#[derive(Debug, Clone)]
pub struct FontDescriptor {
    /// The glyph atlas bitmap.
    pub atlas: BitmapId,
    /// Baseline-to-baseline distance in layout units.
    pub line_height: f32,
    glyphs: HashMap<char, GlyphMetrics>,
}

impl FontDescriptor {
    /// Create a font descriptor with no glyphs.
    pub fn new(atlas: BitmapId, line_height: f32) -> Self {
        Self {
            atlas,
            line_height,
            glyphs: HashMap::new(),
        }
    }

    /// Add a glyph's metrics.
    pub fn with_glyph(mut self, c: char, metrics: GlyphMetrics) -> Self {
        self.glyphs.insert(c, metrics);
        self
    }

    /// Metrics for a character, if the font covers it.
    pub fn glyph(&self, c: char) -> Option<&GlyphMetrics> {
        self.glyphs.get(&c)
    }

    /// Number of glyphs this font covers.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

/// Cached metadata of a graphics shader pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderPipelineDescriptor {
    /// The vertex layout this pipeline's attribute bindings expect.
    pub layout: VertexLayoutId,
}

/// Read-only access to cached asset metadata.
///
/// Implemented by the asset-loading collaborator; the pipeline treats
/// unknown IDs at the point of use as fatal programmer errors.
pub trait AssetResolver {
    /// Look up a mesh descriptor.
    fn mesh(&self, id: MeshId) -> Option<&MeshDescriptor>;
    /// Look up a bitmap descriptor.
    fn bitmap(&self, id: BitmapId) -> Option<&BitmapDescriptor>;
    /// Look up a font descriptor.
    fn font(&self, id: FontId) -> Option<&FontDescriptor>;
    /// Look up a shader pipeline descriptor.
    fn pipeline(&self, id: ShaderPipelineId) -> Option<&ShaderPipelineDescriptor>;
}

/// In-memory asset catalog implementing [`AssetResolver`].
#[derive(Debug, Default)]
pub struct AssetCatalog {
    meshes: HashMap<MeshId, MeshDescriptor>,
    bitmaps: HashMap<BitmapId, BitmapDescriptor>,
    fonts: HashMap<FontId, FontDescriptor>,
    pipelines: HashMap<ShaderPipelineId, ShaderPipelineDescriptor>,
    next_id: u32,
}

impl AssetCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Register a mesh descriptor, returning its ID.
    pub fn register_mesh(&mut self, descriptor: MeshDescriptor) -> MeshId {
        let id = MeshId(self.allocate_id());
        self.meshes.insert(id, descriptor);
        id
    }

    /// Register a bitmap descriptor, returning its ID.
    pub fn register_bitmap(&mut self, descriptor: BitmapDescriptor) -> BitmapId {
        let id = BitmapId(self.allocate_id());
        self.bitmaps.insert(id, descriptor);
        id
    }

    /// Register a font descriptor, returning its ID.
    pub fn register_font(&mut self, descriptor: FontDescriptor) -> FontId {
        let id = FontId(self.allocate_id());
        self.fonts.insert(id, descriptor);
        id
    }

    /// Register a shader pipeline descriptor under a caller-chosen ID.
    ///
    /// Pipeline IDs are chosen by the caller so they can match the fixed
    /// IDs the frame context is configured with.
    pub fn register_pipeline(&mut self, id: ShaderPipelineId, descriptor: ShaderPipelineDescriptor) {
        self.pipelines.insert(id, descriptor);
    }
}

impl AssetResolver for AssetCatalog {
    fn mesh(&self, id: MeshId) -> Option<&MeshDescriptor> {
        self.meshes.get(&id)
    }

    fn bitmap(&self, id: BitmapId) -> Option<&BitmapDescriptor> {
        self.bitmaps.get(&id)
    }

    fn font(&self, id: FontId) -> Option<&FontDescriptor> {
        self.fonts.get(&id)
    }

    fn pipeline(&self, id: ShaderPipelineId) -> Option<&ShaderPipelineDescriptor> {
        self.pipelines.get(&id)
    }
}
