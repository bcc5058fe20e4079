//! The frame context.
//!
//! [`FrameGraph`] owns every per-frame structure: the staging arenas, the
//! sorted command queue, the active camera/light state and the per-frame
//! outline flag. It is created once by the frame driver and passed by
//! reference to game logic; there are no process-wide singletons.
//!
//! A frame has three strictly separated phases:
//!
//! 1. **build** — between `begin_frame` and `end_frame`, game logic is the
//!    exclusive writer, calling `push_*` helpers;
//! 2. **drain** — the backend executor is the exclusive reader
//!    (see [`execute_frame`](crate::backend::execute_frame));
//! 3. **clear** — the next `begin_frame` resets everything.
//!
//! Push helpers are thin constructors: they fill a payload from caller
//! arguments plus the active camera/light/debug state, stage vertex data if
//! the primitive isn't asset-backed, and insert a header at the right sort
//! band. They never touch the GPU.

use bitflags::bitflags;
use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::assets::{AssetResolver, BitmapId, ComputeShaderId, FontId, MeshId, ShaderPipelineId};
use crate::command::queue::{CommandCounts, QueueCapacity, RenderCommandQueue};
use crate::command::{
    band, ClearCommand, CommandHeader, CommandType, ComputeCommand, ComputeKind, Geometry,
    LightState, PrimitiveCommand, PrimitiveKind, PushTargetCommand, ShaderPassCommand,
};
use crate::outline::{jump_flood_steps, OutlineSettings};
use crate::target::RenderTargetId;
use crate::vertex::{ColorVertex, StagingBuffers, TexturedVertex, VertexEntry, VertexLayoutId};

bitflags! {
    /// Gates for the debug overlay helpers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DebugFlags: u32 {
        /// Draw debug shapes (lines, rects).
        const OVERLAY = 1 << 0;
        /// Draw debug text.
        const TEXT = 1 << 1;
    }
}

/// The fixed shader pipelines the push helpers draw with.
///
/// IDs are resolved by the asset collaborator; the defaults match the
/// conventional registration order of the built-in pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSet {
    /// Untextured position+color geometry.
    pub color: ShaderPipelineId,
    /// Textured quads (bitmaps, text, full-screen passes).
    pub textured: ShaderPipelineId,
    /// Shaded asset meshes.
    pub mesh: ShaderPipelineId,
    /// Flat single-color draw, used for outline silhouettes.
    pub flat: ShaderPipelineId,
}

impl Default for PipelineSet {
    fn default() -> Self {
        Self {
            color: ShaderPipelineId(0),
            textured: ShaderPipelineId(1),
            mesh: ShaderPipelineId(2),
            flat: ShaderPipelineId(3),
        }
    }
}

/// Startup configuration for a [`FrameGraph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGraphConfig {
    /// Per-type command capacities.
    pub queue: QueueCapacity,
    /// Byte capacity of each per-layout vertex arena.
    pub vertex_arena_bytes: usize,
    /// Element capacity of the shared index arena.
    pub index_arena_len: usize,
    /// Built-in shader pipelines.
    pub pipelines: PipelineSet,
    /// Outline chain parameters.
    pub outline: OutlineSettings,
}

impl Default for FrameGraphConfig {
    fn default() -> Self {
        Self {
            queue: QueueCapacity::default(),
            vertex_arena_bytes: 1 << 20,
            index_arena_len: 1 << 16,
            pipelines: PipelineSet::default(),
            outline: OutlineSettings::default(),
        }
    }
}

/// Per-frame statistics for trace logging and benches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Per-type command counts.
    pub commands: CommandCounts,
    /// Bytes staged across all vertex arenas.
    pub staged_vertex_bytes: usize,
    /// Indices staged this frame.
    pub staged_indices: usize,
}

/// Per-frame context: arenas, command queue and active draw state.
#[derive(Debug)]
pub struct FrameGraph {
    staging: StagingBuffers,
    queue: RenderCommandQueue,
    pipelines: PipelineSet,
    outline: OutlineSettings,
    camera: Mat4,
    light: LightState,
    debug_flags: DebugFlags,
    /// Set once per frame when the first outlined draw schedules the
    /// jump-flood chain; read-only for the rest of the frame.
    outline_scheduled: bool,
    in_frame: bool,
    frame_index: u64,
}

impl FrameGraph {
    /// Create a frame context sized by `config`.
    pub fn new(config: FrameGraphConfig) -> Self {
        Self {
            staging: StagingBuffers::new(config.vertex_arena_bytes, config.index_arena_len),
            queue: RenderCommandQueue::new(config.queue),
            pipelines: config.pipelines,
            outline: config.outline,
            camera: Mat4::IDENTITY,
            light: LightState::default(),
            debug_flags: DebugFlags::empty(),
            outline_scheduled: false,
            in_frame: false,
            frame_index: 0,
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Begin the build phase: clear the queue and all staging arenas.
    pub fn begin_frame(&mut self) {
        debug_assert!(!self.in_frame, "begin_frame called while already in frame");
        self.in_frame = true;
        self.outline_scheduled = false;
        self.queue.clear_entries();
        self.staging.clear();
    }

    /// End the build phase.
    ///
    /// Commands pushed this frame stay readable until the next
    /// `begin_frame`, so the executor can drain a frozen queue.
    pub fn end_frame(&mut self) {
        debug_assert!(self.in_frame, "end_frame called outside of frame");
        self.in_frame = false;
        self.frame_index = self.frame_index.wrapping_add(1);

        let stats = self.stats();
        log::trace!(
            "frame {}: {} commands ({} primitives, {} compute), {} staged vertex bytes",
            self.frame_index,
            self.queue.len(),
            stats.commands.primitives,
            stats.commands.compute_passes,
            stats.staged_vertex_bytes
        );
    }

    /// Number of completed frames.
    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Whether the build phase is open.
    #[inline]
    pub fn in_frame(&self) -> bool {
        self.in_frame
    }

    /// Whether the outline chain has been scheduled this frame.
    #[inline]
    pub fn outline_scheduled(&self) -> bool {
        self.outline_scheduled
    }

    /// The sorted command queue.
    #[inline]
    pub fn queue(&self) -> &RenderCommandQueue {
        &self.queue
    }

    /// This frame's staging buffers.
    #[inline]
    pub fn staging(&self) -> &StagingBuffers {
        &self.staging
    }

    /// The built-in pipeline set.
    #[inline]
    pub fn pipelines(&self) -> PipelineSet {
        self.pipelines
    }

    /// The outline chain parameters.
    #[inline]
    pub fn outline_settings(&self) -> OutlineSettings {
        self.outline
    }

    /// Per-frame statistics.
    pub fn stats(&self) -> FrameStats {
        FrameStats {
            commands: self.queue.counts(),
            staged_vertex_bytes: self.staging.staged_vertex_bytes(),
            staged_indices: self.staging.indices().len(),
        }
    }

    // ------------------------------------------------------------------
    // Global draw state
    // ------------------------------------------------------------------

    /// Set the active camera view-projection. Snapshotted by every
    /// subsequent primitive push.
    pub fn set_camera(&mut self, view_projection: Mat4) {
        self.camera = view_projection;
    }

    /// Set the active light. Snapshotted by every subsequent primitive push.
    pub fn set_light(&mut self, light: LightState) {
        self.light = light;
    }

    /// Enable or disable debug overlay helpers.
    pub fn set_debug_flags(&mut self, flags: DebugFlags) {
        self.debug_flags = flags;
    }

    /// The current debug overlay gates.
    #[inline]
    pub fn debug_flags(&self) -> DebugFlags {
        self.debug_flags
    }

    // ------------------------------------------------------------------
    // Push helpers
    // ------------------------------------------------------------------

    /// Clear a render target at the start of the frame's execution.
    pub fn push_clear(&mut self, target: RenderTargetId, color: Vec4) {
        self.assert_build_phase();
        let payload = self.queue.add_clear(ClearCommand { color, depth: 1.0 });
        self.queue.push(CommandHeader::new(
            CommandType::Clear,
            target,
            band::CLEAR,
            payload,
        ));
    }

    /// Draw a world-space line. `order` offsets the key within the mesh band.
    pub fn push_line(&mut self, a: Vec3, b: Vec3, color: Vec4, order: f32) {
        self.assert_build_phase();
        self.line_internal(a, b, color, band::MESHES + order);
    }

    /// Draw a world-space triangle.
    pub fn push_triangle(&mut self, points: [Vec3; 3], color: Vec4, order: f32) {
        self.assert_build_phase();
        let vertices: Vec<ColorVertex> = points
            .iter()
            .map(|p| ColorVertex {
                position: p.to_array(),
                color: color.to_array(),
            })
            .collect();
        let entry = self.stage_color_vertices(&vertices);
        let payload = self.color_primitive(PrimitiveKind::Triangle, entry, None, color);
        self.push_primitive(RenderTargetId::World, band::MESHES + order, payload);
    }

    /// Draw an axis-aligned rectangle in the z = 0 plane.
    pub fn push_rect(&mut self, min: Vec2, max: Vec2, color: Vec4, order: f32) {
        self.assert_build_phase();
        self.rect_internal(min, max, color, band::MESHES + order);
    }

    /// Draw a bitmap as a textured quad.
    ///
    /// # Panics
    ///
    /// Panics if `bitmap` is not registered with the resolver.
    pub fn push_bitmap(
        &mut self,
        resolver: &dyn AssetResolver,
        bitmap: BitmapId,
        min: Vec2,
        max: Vec2,
        tint: Vec4,
        order: f32,
    ) {
        self.assert_build_phase();
        resolver
            .bitmap(bitmap)
            .unwrap_or_else(|| panic!("bitmap {bitmap:?} was not registered"));
        let quad = self.stage_textured_quad(min, max, Vec2::ZERO, Vec2::ONE, tint);
        let payload = PrimitiveCommand {
            kind: PrimitiveKind::Triangle,
            geometry: Geometry::Staged {
                vertices: quad.0,
                indices: Some(quad.1),
            },
            pipeline: self.pipelines.textured,
            texture: Some(bitmap),
            transform: Mat4::IDENTITY,
            color: tint,
            view_projection: self.camera,
            light: self.light,
        };
        self.push_primitive(RenderTargetId::World, band::MESHES + order, payload);
    }

    /// Draw a string as one batch of glyph quads from the font's atlas.
    ///
    /// Characters the font does not cover are skipped (their pen advance is
    /// lost); `'\n'` starts a new line.
    ///
    /// # Panics
    ///
    /// Panics if `font` is not registered with the resolver.
    pub fn push_text(
        &mut self,
        resolver: &dyn AssetResolver,
        font: FontId,
        text: &str,
        origin: Vec2,
        scale: f32,
        color: Vec4,
        order: f32,
    ) {
        self.assert_build_phase();
        self.text_internal(resolver, font, text, origin, scale, color, band::MESHES + order);
    }

    /// Draw an asset-backed mesh.
    ///
    /// No staging happens: the command records the mesh's cached counts and
    /// layout and the backend draws from its persistent buffers. When
    /// `outlined` is set, a flat duplicate is appended into the outline
    /// target and the jump-flood chain is scheduled once for the frame.
    ///
    /// # Panics
    ///
    /// Panics if `mesh` is not registered with the resolver.
    pub fn push_mesh(
        &mut self,
        resolver: &dyn AssetResolver,
        mesh: MeshId,
        transform: Mat4,
        color: Vec4,
        outlined: bool,
        order: f32,
    ) {
        self.assert_build_phase();
        let descriptor = *resolver
            .mesh(mesh)
            .unwrap_or_else(|| panic!("mesh {mesh:?} was not registered"));
        let geometry = Geometry::Asset {
            mesh,
            vertex_count: descriptor.vertex_count,
            index_count: descriptor.index_count,
            layout: descriptor.layout,
        };

        let payload = PrimitiveCommand {
            kind: PrimitiveKind::Triangle,
            geometry,
            pipeline: self.pipelines.mesh,
            texture: None,
            transform,
            color,
            view_projection: self.camera,
            light: self.light,
        };
        self.push_primitive(RenderTargetId::World, band::MESHES + order, payload);

        if outlined {
            // Flat white silhouette copy, drawn into the outline target.
            let duplicate = PrimitiveCommand {
                kind: PrimitiveKind::Triangle,
                geometry,
                pipeline: self.pipelines.flat,
                texture: None,
                transform,
                color: Vec4::ONE,
                view_projection: self.camera,
                light: self.light,
            };
            self.push_primitive(
                RenderTargetId::Outline,
                band::OUTLINED_MESHES + order,
                duplicate,
            );

            if !self.outline_scheduled {
                self.outline_scheduled = true;
                self.schedule_outline_chain();
            }
        }
    }

    /// Append a full-screen shader pass reading `source` and writing
    /// `target`, ordered by `order` within the shader pass band.
    pub fn push_shader_pass(
        &mut self,
        pipeline: ShaderPipelineId,
        source: RenderTargetId,
        target: RenderTargetId,
        order: f32,
    ) {
        self.assert_build_phase();
        let quad = self.fullscreen_quad();
        let payload = self.queue.add_shader_pass(ShaderPassCommand {
            pipeline,
            source,
            quad,
        });
        self.queue.push(CommandHeader::new(
            CommandType::ShaderPass,
            target,
            band::SHADER_PASSES + order,
            payload,
        ));
    }

    /// Append a compute pass over `target`'s pixels, ordered by `order`
    /// within the shader pass band.
    pub fn push_compute_pass(
        &mut self,
        shader: ComputeShaderId,
        kind: ComputeKind,
        target: RenderTargetId,
        order: f32,
    ) {
        self.assert_build_phase();
        let payload = self.queue.add_compute_pass(ComputeCommand { shader, kind });
        self.queue.push(CommandHeader::new(
            CommandType::ComputePass,
            target,
            band::SHADER_PASSES + order,
            payload,
        ));
    }

    /// Present a target: flow its contents into its routing successor with
    /// a full-screen quad, resolving multisampling when the source has it.
    ///
    /// Presenting `Output` is the terminal swap to screen.
    ///
    /// # Panics
    ///
    /// Panics if `target` is the terminal marker.
    pub fn push_render_target(&mut self, target: RenderTargetId) {
        self.assert_build_phase();
        assert!(
            !target.is_terminal(),
            "cannot present the terminal render target"
        );
        let quad = self.fullscreen_quad();
        let payload = self
            .queue
            .add_push_target(PushTargetCommand { source: target, quad });
        self.queue.push(CommandHeader::new(
            CommandType::PushTarget,
            target.successor(),
            band::PUSH_RENDER_TARGETS + target.present_order(),
            payload,
        ));
    }

    // ------------------------------------------------------------------
    // Debug overlay helpers
    // ------------------------------------------------------------------

    /// Draw a debug line. No-op unless [`DebugFlags::OVERLAY`] is set.
    pub fn push_debug_line(&mut self, a: Vec3, b: Vec3, color: Vec4) {
        if !self.debug_flags.contains(DebugFlags::OVERLAY) {
            return;
        }
        self.assert_build_phase();
        self.line_internal(a, b, color, band::DEBUG_OVERLAY + 0.1);
    }

    /// Draw a debug rect. No-op unless [`DebugFlags::OVERLAY`] is set.
    pub fn push_debug_rect(&mut self, min: Vec2, max: Vec2, color: Vec4) {
        if !self.debug_flags.contains(DebugFlags::OVERLAY) {
            return;
        }
        self.assert_build_phase();
        self.rect_internal(min, max, color, band::DEBUG_OVERLAY + 0.2);
    }

    /// Draw debug text. No-op unless [`DebugFlags::TEXT`] is set.
    pub fn push_debug_text(
        &mut self,
        resolver: &dyn AssetResolver,
        font: FontId,
        text: &str,
        origin: Vec2,
        scale: f32,
        color: Vec4,
    ) {
        if !self.debug_flags.contains(DebugFlags::TEXT) {
            return;
        }
        self.assert_build_phase();
        self.text_internal(
            resolver,
            font,
            text,
            origin,
            scale,
            color,
            band::DEBUG_OVERLAY + 0.3,
        );
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    #[inline]
    fn assert_build_phase(&self) {
        debug_assert!(self.in_frame, "push called outside of frame build phase");
    }

    fn push_primitive(&mut self, target: RenderTargetId, key: f32, payload: PrimitiveCommand) {
        let index = self.queue.add_primitive(payload);
        self.queue
            .push(CommandHeader::new(CommandType::Primitive, target, key, index));
    }

    fn color_primitive(
        &self,
        kind: PrimitiveKind,
        vertices: VertexEntry,
        indices: Option<crate::vertex::IndexEntry>,
        color: Vec4,
    ) -> PrimitiveCommand {
        PrimitiveCommand {
            kind,
            geometry: Geometry::Staged { vertices, indices },
            pipeline: self.pipelines.color,
            texture: None,
            transform: Mat4::IDENTITY,
            color,
            view_projection: self.camera,
            light: self.light,
        }
    }

    fn stage_color_vertices(&mut self, vertices: &[ColorVertex]) -> VertexEntry {
        let (entry, bytes) = self
            .staging
            .push_vertices(VertexLayoutId::Color, vertices.len() as u32);
        bytes.copy_from_slice(bytemuck::cast_slice(vertices));
        entry
    }

    /// Stage a textured quad as 4 vertices and 6 indices. Written indices
    /// are biased by the vertex entry's offset so every quad this frame can
    /// share one GPU buffer.
    fn stage_textured_quad(
        &mut self,
        min: Vec2,
        max: Vec2,
        uv_min: Vec2,
        uv_max: Vec2,
        color: Vec4,
    ) -> (VertexEntry, crate::vertex::IndexEntry) {
        let corners = [
            (Vec2::new(min.x, min.y), Vec2::new(uv_min.x, uv_min.y)),
            (Vec2::new(max.x, min.y), Vec2::new(uv_max.x, uv_min.y)),
            (Vec2::new(max.x, max.y), Vec2::new(uv_max.x, uv_max.y)),
            (Vec2::new(min.x, max.y), Vec2::new(uv_min.x, uv_max.y)),
        ];
        let vertices: Vec<TexturedVertex> = corners
            .iter()
            .map(|(p, uv)| TexturedVertex {
                position: [p.x, p.y, 0.0],
                uv: uv.to_array(),
                color: color.to_array(),
            })
            .collect();

        let (ventry, bytes) = self.staging.push_vertices(VertexLayoutId::Textured, 4);
        bytes.copy_from_slice(bytemuck::cast_slice(&vertices));

        const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];
        let (ientry, indices) = self.staging.push_indices(6);
        for (dst, relative) in indices.iter_mut().zip(QUAD_INDICES) {
            *dst = ventry.offset + relative;
        }
        (ventry, ientry)
    }

    /// Stage a full-screen quad covering NDC [-1, 1]^2 as two triangles.
    fn fullscreen_quad(&mut self) -> VertexEntry {
        let positions = [
            [-1.0, -1.0],
            [1.0, -1.0],
            [1.0, 1.0],
            [1.0, 1.0],
            [-1.0, 1.0],
            [-1.0, -1.0],
        ];
        let vertices: Vec<TexturedVertex> = positions
            .iter()
            .map(|&[x, y]: &[f32; 2]| TexturedVertex {
                position: [x, y, 0.0],
                uv: [(x + 1.0) * 0.5, (y + 1.0) * 0.5],
                color: [1.0, 1.0, 1.0, 1.0],
            })
            .collect();
        let (entry, bytes) = self.staging.push_vertices(VertexLayoutId::Textured, 6);
        bytes.copy_from_slice(bytemuck::cast_slice(&vertices));
        entry
    }

    fn line_internal(&mut self, a: Vec3, b: Vec3, color: Vec4, key: f32) {
        let vertices = [
            ColorVertex {
                position: a.to_array(),
                color: color.to_array(),
            },
            ColorVertex {
                position: b.to_array(),
                color: color.to_array(),
            },
        ];
        let entry = self.stage_color_vertices(&vertices);
        let payload = self.color_primitive(PrimitiveKind::Line, entry, None, color);
        self.push_primitive(RenderTargetId::World, key, payload);
    }

    fn rect_internal(&mut self, min: Vec2, max: Vec2, color: Vec4, key: f32) {
        let corners = [
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, max.y),
            Vec2::new(min.x, max.y),
        ];
        let vertices: Vec<ColorVertex> = corners
            .iter()
            .map(|p| ColorVertex {
                position: [p.x, p.y, 0.0],
                color: color.to_array(),
            })
            .collect();
        let (ventry, bytes) = self.staging.push_vertices(VertexLayoutId::Color, 4);
        bytes.copy_from_slice(bytemuck::cast_slice(&vertices));

        const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];
        let (ientry, indices) = self.staging.push_indices(6);
        for (dst, relative) in indices.iter_mut().zip(QUAD_INDICES) {
            *dst = ventry.offset + relative;
        }

        let payload = self.color_primitive(
            PrimitiveKind::Triangle,
            ventry,
            Some(ientry),
            color,
        );
        self.push_primitive(RenderTargetId::World, key, payload);
    }

    #[allow(clippy::too_many_arguments)]
    fn text_internal(
        &mut self,
        resolver: &dyn AssetResolver,
        font: FontId,
        text: &str,
        origin: Vec2,
        scale: f32,
        color: Vec4,
        key: f32,
    ) {
        let descriptor = resolver
            .font(font)
            .unwrap_or_else(|| panic!("font {font:?} was not registered"));

        // Lay out glyph quads on the CPU first; one staging allocation and
        // one command for the whole string.
        let mut vertices: Vec<TexturedVertex> = Vec::new();
        let mut relative_indices: Vec<u32> = Vec::new();
        let mut pen = origin;
        for c in text.chars() {
            if c == '\n' {
                pen.x = origin.x;
                pen.y += descriptor.line_height * scale;
                continue;
            }
            let Some(glyph) = descriptor.glyph(c) else {
                continue;
            };
            let quad_min = pen + glyph.bearing * scale;
            let quad_max = quad_min + glyph.size * scale;
            let base = vertices.len() as u32;
            let corners = [
                (quad_min, glyph.uv_min),
                (Vec2::new(quad_max.x, quad_min.y), Vec2::new(glyph.uv_max.x, glyph.uv_min.y)),
                (quad_max, glyph.uv_max),
                (Vec2::new(quad_min.x, quad_max.y), Vec2::new(glyph.uv_min.x, glyph.uv_max.y)),
            ];
            for (p, uv) in corners {
                vertices.push(TexturedVertex {
                    position: [p.x, p.y, 0.0],
                    uv: uv.to_array(),
                    color: color.to_array(),
                });
            }
            for relative in [0, 1, 2, 2, 3, 0] {
                relative_indices.push(base + relative);
            }
            pen.x += glyph.advance * scale;
        }
        if vertices.is_empty() {
            return;
        }

        let atlas = descriptor.atlas;
        let (ventry, bytes) = self
            .staging
            .push_vertices(VertexLayoutId::Textured, vertices.len() as u32);
        bytes.copy_from_slice(bytemuck::cast_slice(&vertices));

        let (ientry, indices) = self.staging.push_indices(relative_indices.len() as u32);
        for (dst, relative) in indices.iter_mut().zip(relative_indices) {
            *dst = ventry.offset + relative;
        }

        let payload = PrimitiveCommand {
            kind: PrimitiveKind::Triangle,
            geometry: Geometry::Staged {
                vertices: ventry,
                indices: Some(ientry),
            },
            pipeline: self.pipelines.textured,
            texture: Some(atlas),
            transform: Mat4::IDENTITY,
            color,
            view_projection: self.camera,
            light: self.light,
        };
        self.push_primitive(RenderTargetId::World, key, payload);
    }

    /// Append the outline multi-pass chain, in command-emission order:
    /// init, strictly-halving jump-flood passes, resolve, optional blur,
    /// then the composite of the outline result onto the output.
    fn schedule_outline_chain(&mut self) {
        debug_assert!(self.outline_scheduled);
        let settings = self.outline;

        let mut order = 0.0;
        self.push_compute_pass(
            settings.init_shader,
            ComputeKind::OutlineInit,
            RenderTargetId::PostprocessOutline,
            order,
        );
        for step in jump_flood_steps(settings.max_jump_distance) {
            order += 1.0;
            self.push_compute_pass(
                settings.flood_shader,
                ComputeKind::JumpFlood { step },
                RenderTargetId::PostprocessOutline,
                order,
            );
        }
        order += 1.0;
        self.push_shader_pass(
            settings.resolve_pipeline,
            RenderTargetId::Outline,
            RenderTargetId::PostprocessOutline,
            order,
        );
        if settings.blur {
            order += 1.0;
            self.push_compute_pass(
                settings.blur_shader,
                ComputeKind::KernelBlur,
                RenderTargetId::PostprocessOutline,
                order,
            );
        }
        self.push_render_target(RenderTargetId::PostprocessOutline);
    }
}

impl Default for FrameGraph {
    fn default() -> Self {
        Self::new(FrameGraphConfig::default())
    }
}
