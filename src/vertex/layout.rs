//! Vertex layout definitions.
//!
//! A layout is an ordered list of typed attributes with byte offsets and a
//! stride. Layouts are immutable, registered once at startup in a
//! [`LayoutRegistry`] and identified everywhere else by a small enumerated
//! [`VertexLayoutId`]. Each registered layout owns its own staging arena so
//! draws with different attribute shapes never fragment each other's region.
//!
//! Invariants enforced at registration:
//! - stride equals the sum of attribute sizes
//! - attribute offsets are monotonically increasing and non-overlapping

use bytemuck::{Pod, Zeroable};
use static_assertions::const_assert_eq;

/// Identifier for a registered vertex layout.
///
/// The set is closed: every attribute shape the pipeline stages or draws is
/// one of these. Asset meshes reference [`VertexLayoutId::Mesh`] but never
/// stage data; their geometry lives in the backend's persistent buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VertexLayoutId {
    /// Position + color. Lines, triangles, rects, debug overlay shapes.
    Color,
    /// Position + texcoord + color. Bitmaps, text glyphs, full-screen quads.
    Textured,
    /// Position + normal + texcoord. Asset-backed meshes.
    Mesh,
}

impl VertexLayoutId {
    /// All registered layout IDs, in registry order.
    pub const ALL: [VertexLayoutId; 3] = [Self::Color, Self::Textured, Self::Mesh];

    /// Index of this layout in the registry table.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Semantic meaning of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeSemantic {
    /// Vertex position (float3).
    Position,
    /// Vertex normal (float3).
    Normal,
    /// Texture coordinates (float2).
    TexCoord,
    /// Vertex color (float4).
    Color,
}

/// Element shape of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeFormat {
    /// Two 32-bit floats.
    Float2,
    /// Three 32-bit floats.
    Float3,
    /// Four 32-bit floats.
    Float4,
}

impl AttributeFormat {
    /// Size in bytes of this format.
    pub fn size(&self) -> u32 {
        match self {
            Self::Float2 => 8,
            Self::Float3 => 12,
            Self::Float4 => 16,
        }
    }
}

/// A single attribute within a vertex layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    /// Semantic meaning of this attribute.
    pub semantic: AttributeSemantic,
    /// Data format of this attribute.
    pub format: AttributeFormat,
    /// Byte offset within one vertex.
    pub offset: u32,
}

impl VertexAttribute {
    /// Create a new vertex attribute.
    pub fn new(semantic: AttributeSemantic, format: AttributeFormat, offset: u32) -> Self {
        Self {
            semantic,
            format,
            offset,
        }
    }
}

/// An immutable description of one vertex shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    /// The attributes, ordered by offset.
    pub attributes: Vec<VertexAttribute>,
    /// Bytes between consecutive vertices.
    pub stride: u32,
    /// Debug label.
    pub label: &'static str,
}

impl VertexLayout {
    /// Create a layout from attributes. The stride is the sum of attribute
    /// sizes; offsets are assigned by accumulation, so attributes are packed
    /// in declaration order.
    pub fn new(label: &'static str, formats: &[(AttributeSemantic, AttributeFormat)]) -> Self {
        let mut attributes = Vec::with_capacity(formats.len());
        let mut offset = 0;
        for &(semantic, format) in formats {
            attributes.push(VertexAttribute::new(semantic, format, offset));
            offset += format.size();
        }
        Self {
            attributes,
            stride: offset,
            label,
        }
    }

    /// Check if this layout contains a specific semantic.
    pub fn has_semantic(&self, semantic: AttributeSemantic) -> bool {
        self.attributes.iter().any(|attr| attr.semantic == semantic)
    }

    /// Validate the layout invariants.
    ///
    /// Returns an error message if the stride does not match the attribute
    /// sizes or if any attribute overlaps its predecessor.
    pub fn validate(&self) -> Result<(), String> {
        let mut expected_offset = 0;
        for attr in &self.attributes {
            if attr.offset != expected_offset {
                return Err(format!(
                    "layout '{}': attribute {:?} at offset {} overlaps or leaves a gap (expected {})",
                    self.label, attr.semantic, attr.offset, expected_offset
                ));
            }
            expected_offset += attr.format.size();
        }
        if self.stride != expected_offset {
            return Err(format!(
                "layout '{}': stride {} does not equal sum of attribute sizes {}",
                self.label, self.stride, expected_offset
            ));
        }
        Ok(())
    }
}

/// The table of registered vertex layouts, indexed by [`VertexLayoutId`].
///
/// Built once at startup; every layout is validated at construction, so an
/// invalid layout aborts before any command can reference it.
#[derive(Debug)]
pub struct LayoutRegistry {
    layouts: [VertexLayout; VertexLayoutId::ALL.len()],
}

impl LayoutRegistry {
    /// Build the registry with the closed set of pipeline layouts.
    pub fn new() -> Self {
        use AttributeFormat::*;
        use AttributeSemantic::*;

        let layouts = [
            VertexLayout::new("color", &[(Position, Float3), (Color, Float4)]),
            VertexLayout::new(
                "textured",
                &[(Position, Float3), (TexCoord, Float2), (Color, Float4)],
            ),
            VertexLayout::new("mesh", &[(Position, Float3), (Normal, Float3), (TexCoord, Float2)]),
        ];
        for layout in &layouts {
            if let Err(msg) = layout.validate() {
                panic!("invalid vertex layout: {msg}");
            }
        }
        Self { layouts }
    }

    /// Look up a layout by ID.
    #[inline]
    pub fn get(&self, id: VertexLayoutId) -> &VertexLayout {
        &self.layouts[id.index()]
    }

    /// Stride in bytes of a registered layout.
    #[inline]
    pub fn stride(&self, id: VertexLayoutId) -> u32 {
        self.layouts[id.index()].stride
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Staged vertex structs
// ============================================================================

/// Vertex written by line/triangle/rect/debug helpers ([`VertexLayoutId::Color`]).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    /// Position in world or NDC space.
    pub position: [f32; 3],
    /// RGBA color.
    pub color: [f32; 4],
}

/// Vertex written by bitmap/text/quad helpers ([`VertexLayoutId::Textured`]).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    /// Position in world or NDC space.
    pub position: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
    /// RGBA tint.
    pub color: [f32; 4],
}

// The staging layer copies these structs byte-for-byte into per-layout
// arenas, so their in-memory size must match the registered stride.
const_assert_eq!(std::mem::size_of::<ColorVertex>(), 28);
const_assert_eq!(std::mem::size_of::<TexturedVertex>(), 36);
