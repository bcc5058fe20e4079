//! End-to-end pipeline tests.
//!
//! These tests build whole frames through the public API and verify the
//! sorted command stream, both directly on the queue and through the
//! recording backend. No GPU is involved.
//!
//! # Test Categories
//!
//! - **Ordering Tests**: Verify band ordering and stable tie-breaking of
//!   whole frames
//! - **Outline Tests**: Verify the jump-flood chain shape and its
//!   once-per-frame scheduling
//! - **Routing Tests**: Verify target hand-offs reach the screen
//! - **Capacity Tests**: Verify overflow is fatal and leaves valid state
//! - **Determinism Tests**: Verify identical input produces identical
//!   frames across arena recycling
//!
//! ```bash
//! cargo test --test pipeline_tests
//! ```

use glam::{Mat4, Vec2, Vec3, Vec4};
use rstest::rstest;

use framegraph::assets::{
    AssetCatalog, BitmapDescriptor, FontDescriptor, GlyphMetrics, MeshDescriptor, MeshId,
    ShaderPipelineDescriptor,
};
use framegraph::command::queue::QueueCapacity;
use framegraph::command::{ComputeKind, Geometry};
use framegraph::outline::{jump_flood_steps, OutlineSettings};
use framegraph::vertex::VertexLayoutId;
use framegraph::{
    band, execute_frame, BackendCall, CommandType, DebugFlags, FrameGraph, FrameGraphConfig,
    RecordingBackend, RenderTargetId,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Catalog with the built-in pipelines, one cube mesh and one font.
fn test_catalog() -> (AssetCatalog, MeshId) {
    let mut catalog = AssetCatalog::new();
    let pipelines = framegraph::PipelineSet::default();
    for (id, layout) in [
        (pipelines.color, VertexLayoutId::Color),
        (pipelines.textured, VertexLayoutId::Textured),
        (pipelines.mesh, VertexLayoutId::Mesh),
        (pipelines.flat, VertexLayoutId::Mesh),
        (OutlineSettings::default().resolve_pipeline, VertexLayoutId::Textured),
    ] {
        catalog.register_pipeline(id, ShaderPipelineDescriptor { layout });
    }
    let mesh = catalog.register_mesh(MeshDescriptor {
        vertex_count: 24,
        index_count: 36,
        layout: VertexLayoutId::Mesh,
    });
    (catalog, mesh)
}

fn monospace_font(catalog: &mut AssetCatalog) -> framegraph::assets::FontId {
    let atlas = catalog.register_bitmap(BitmapDescriptor {
        width: 256,
        height: 256,
    });
    let mut font = FontDescriptor::new(atlas, 16.0);
    for (i, c) in ('a'..='z').enumerate() {
        font = font.with_glyph(
            c,
            GlyphMetrics {
                uv_min: Vec2::new(i as f32 * 0.03, 0.0),
                uv_max: Vec2::new(i as f32 * 0.03 + 0.03, 0.06),
                size: Vec2::new(8.0, 12.0),
                bearing: Vec2::new(0.0, -12.0),
                advance: 9.0,
            },
        );
    }
    catalog.register_font(font)
}

// ============================================================================
// Ordering Tests
// ============================================================================

/// A frame pushed in scrambled order drains in band order: clear, world
/// geometry, the outline silhouette duplicate, then the composite passes.
#[test]
fn test_full_frame_band_ordering() {
    init_logging();
    let (catalog, mesh) = test_catalog();
    let mut frame = FrameGraph::new(FrameGraphConfig::default());

    frame.begin_frame();
    // Deliberately worst-case push order.
    frame.push_render_target(RenderTargetId::Output);
    frame.push_mesh(&catalog, mesh, Mat4::IDENTITY, Vec4::ONE, true, 0.0);
    frame.push_rect(Vec2::ZERO, Vec2::ONE, Vec4::ONE, 1.0);
    frame.push_clear(RenderTargetId::World, Vec4::ZERO);
    frame.push_render_target(RenderTargetId::World);
    frame.end_frame();

    let headers = frame.queue().headers();
    let kinds: Vec<CommandType> = headers.iter().map(|h| h.command).collect();

    assert_eq!(kinds[0], CommandType::Clear);
    assert_eq!(kinds[1], CommandType::Primitive); // mesh at order 0.0
    assert_eq!(kinds[2], CommandType::Primitive); // rect at order 1.0
    assert_eq!(kinds[3], CommandType::Primitive); // outline duplicate
    assert_eq!(headers[3].target, RenderTargetId::Outline);

    // Everything after the duplicate is the composite machinery, sorted by
    // band regardless of push order.
    for header in &headers[4..] {
        assert!(header.sort_key >= band::SHADER_PASSES);
    }
    assert_eq!(headers.last().unwrap().command, CommandType::PushTarget);
    assert_eq!(headers.last().unwrap().target, RenderTargetId::None);
}

/// Primitives with equal keys keep their push order.
#[test]
fn test_equal_order_primitives_are_stable() {
    init_logging();
    let mut frame = FrameGraph::new(FrameGraphConfig::default());

    frame.begin_frame();
    for i in 0..8 {
        frame.push_line(Vec3::ZERO, Vec3::splat(i as f32), Vec4::ONE, 0.0);
    }
    frame.end_frame();

    let payloads: Vec<u16> = frame.queue().headers().iter().map(|h| h.payload).collect();
    assert_eq!(payloads, (0..8).collect::<Vec<u16>>());
}

/// Consecutive staged pushes get consecutive, offset-biased regions.
#[test]
fn test_consecutive_push_offsets() {
    init_logging();
    let mut frame = FrameGraph::new(FrameGraphConfig::default());

    frame.begin_frame();
    frame.push_line(Vec3::ZERO, Vec3::X, Vec4::ONE, 0.0);
    frame.push_line(Vec3::ZERO, Vec3::Y, Vec4::ONE, 1.0);
    frame.push_triangle([Vec3::ZERO, Vec3::X, Vec3::Y], Vec4::ONE, 2.0);

    let queue = frame.queue();
    let offsets: Vec<u32> = (0..3)
        .map(|i| match queue.primitive_payload(i).geometry {
            Geometry::Staged { vertices, .. } => vertices.offset,
            Geometry::Asset { .. } => unreachable!(),
        })
        .collect();
    // 2 + 2 line vertices, then the triangle at 4.
    assert_eq!(offsets, vec![0, 2, 4]);
    assert_eq!(frame.staging().vertex_count(VertexLayoutId::Color), 7);
    frame.end_frame();
}

// ============================================================================
// Outline Tests
// ============================================================================

/// The jump-flood chain emits `log2(next_pow2(max)) + 1` flood passes.
#[rstest]
#[case(0, 1)]
#[case(1, 1)]
#[case(2, 2)]
#[case(20, 6)]
#[case(32, 6)]
#[case(64, 7)]
fn test_jump_flood_pass_count(#[case] max: u32, #[case] passes: usize) {
    assert_eq!(jump_flood_steps(max).len(), passes);
}

/// The scheduled chain is init, flood steps in strictly halving order, one
/// resolve pass, then the composite of the outline target.
#[test]
fn test_outline_chain_shape() {
    init_logging();
    let (catalog, mesh) = test_catalog();
    let mut frame = FrameGraph::new(FrameGraphConfig::default());

    frame.begin_frame();
    frame.push_mesh(&catalog, mesh, Mat4::IDENTITY, Vec4::ONE, true, 0.0);
    frame.end_frame();

    let queue = frame.queue();
    let compute: Vec<ComputeKind> = queue
        .headers()
        .iter()
        .filter(|h| h.command == CommandType::ComputePass)
        .map(|h| queue.compute_payload(h.payload).kind)
        .collect();

    assert_eq!(compute[0], ComputeKind::OutlineInit);
    let steps: Vec<u32> = compute[1..]
        .iter()
        .map(|k| match k {
            ComputeKind::JumpFlood { step } => *step,
            other => panic!("unexpected pass {other:?}"),
        })
        .collect();
    assert_eq!(steps, jump_flood_steps(32));

    // Resolve reads the silhouette target, writes the postprocess target.
    let resolve = queue
        .headers()
        .iter()
        .find(|h| h.command == CommandType::ShaderPass)
        .unwrap();
    assert_eq!(resolve.target, RenderTargetId::PostprocessOutline);
    assert_eq!(
        queue.shader_pass_payload(resolve.payload).source,
        RenderTargetId::Outline
    );

    // The chain ends by presenting the postprocess target to its successor.
    let push = queue
        .headers()
        .iter()
        .find(|h| h.command == CommandType::PushTarget)
        .unwrap();
    assert_eq!(push.target, RenderTargetId::PostprocessOutline.successor());
}

/// Many outlined meshes share a single chain; silhouettes merge in the
/// outline target rather than multiplying passes.
#[test]
fn test_outline_chain_scheduled_once_per_frame() {
    init_logging();
    let (catalog, mesh) = test_catalog();
    let mut frame = FrameGraph::new(FrameGraphConfig::default());

    frame.begin_frame();
    for i in 0..16 {
        frame.push_mesh(&catalog, mesh, Mat4::IDENTITY, Vec4::ONE, true, i as f32);
    }
    let counts = frame.queue().counts();
    assert_eq!(counts.primitives, 32);
    assert_eq!(counts.compute_passes, 1 + jump_flood_steps(32).len());
    assert_eq!(counts.shader_passes, 1);
    frame.end_frame();

    // The flag resets with the frame.
    frame.begin_frame();
    assert!(!frame.outline_scheduled());
    frame.end_frame();
}

// ============================================================================
// Routing Tests
// ============================================================================

/// Every non-terminal target's successor chain reaches the terminal marker.
#[rstest]
#[case(RenderTargetId::World)]
#[case(RenderTargetId::Outline)]
#[case(RenderTargetId::PostprocessOutline)]
#[case(RenderTargetId::PingPong)]
#[case(RenderTargetId::Output)]
fn test_routing_reaches_terminal(#[case] target: RenderTargetId) {
    assert!(target.hops_to_terminal() >= 1);
}

/// Presenting world then output produces a resolve into the output followed
/// by the terminal swap, in that order.
#[test]
fn test_present_chain_through_backend() {
    init_logging();
    let (catalog, _) = test_catalog();
    let mut frame = FrameGraph::new(FrameGraphConfig::default());
    let mut backend = RecordingBackend::new();

    frame.begin_frame();
    frame.push_clear(RenderTargetId::World, Vec4::ZERO);
    frame.push_line(Vec3::ZERO, Vec3::X, Vec4::ONE, 0.0);
    frame.push_render_target(RenderTargetId::World);
    frame.push_render_target(RenderTargetId::Output);
    frame.end_frame();
    execute_frame(&frame, &catalog, &mut backend).unwrap();

    let calls = backend.calls();
    let resolve = calls
        .iter()
        .position(|c| {
            matches!(
                c,
                BackendCall::ResolveTarget {
                    source: RenderTargetId::World,
                    destination: RenderTargetId::Output,
                    multisampled: true,
                    ..
                }
            )
        })
        .expect("world resolves into output");
    let present = calls
        .iter()
        .position(|c| matches!(c, BackendCall::Present))
        .expect("output presents");
    assert!(resolve < present);

    // Draws happen before either hand-off.
    let draw = calls
        .iter()
        .position(|c| matches!(c, BackendCall::DrawStaged { .. }))
        .unwrap();
    assert!(draw < resolve);
}

/// A full frame with an outlined mesh drains without target ping-pong: the
/// executor binds each raster target once per contiguous run.
#[test]
fn test_executed_frame_call_stream() {
    init_logging();
    let (catalog, mesh) = test_catalog();
    let mut frame = FrameGraph::new(FrameGraphConfig::default());
    let mut backend = RecordingBackend::new();

    frame.begin_frame();
    frame.push_clear(RenderTargetId::World, Vec4::ZERO);
    frame.push_mesh(&catalog, mesh, Mat4::IDENTITY, Vec4::ONE, true, 0.0);
    frame.push_mesh(&catalog, mesh, Mat4::IDENTITY, Vec4::ONE, false, 1.0);
    frame.push_render_target(RenderTargetId::World);
    frame.push_render_target(RenderTargetId::Output);
    frame.end_frame();
    execute_frame(&frame, &catalog, &mut backend).unwrap();

    let calls = backend.calls();
    assert_eq!(calls[0], BackendCall::BeginFrame);
    assert_eq!(calls.last(), Some(&BackendCall::Present));

    // Uploads precede every draw and dispatch.
    let first_work = calls
        .iter()
        .position(|c| {
            matches!(
                c,
                BackendCall::DrawMesh { .. } | BackendCall::Dispatch { .. }
            )
        })
        .unwrap();
    let last_upload = calls
        .iter()
        .rposition(|c| {
            matches!(
                c,
                BackendCall::UploadVertices { .. } | BackendCall::UploadIndices { .. }
            )
        })
        .unwrap();
    assert!(last_upload < first_work);

    // Two world draws + one outline silhouette.
    let mesh_draws = calls
        .iter()
        .filter(|c| matches!(c, BackendCall::DrawMesh { .. }))
        .count();
    assert_eq!(mesh_draws, 3);

    // The flood dispatches appear in strictly halving step order.
    let steps: Vec<u32> = calls
        .iter()
        .filter_map(|c| match c {
            BackendCall::Dispatch {
                kind: ComputeKind::JumpFlood { step },
                ..
            } => Some(*step),
            _ => None,
        })
        .collect();
    assert_eq!(steps, jump_flood_steps(32));
}

// ============================================================================
// Capacity Tests
// ============================================================================

/// Overflowing a per-type capacity panics and leaves the queue readable.
#[test]
fn test_capacity_overflow_is_fatal_and_state_stays_valid() {
    init_logging();
    let mut frame = FrameGraph::new(FrameGraphConfig {
        queue: QueueCapacity {
            primitives: 4,
            ..QueueCapacity::default()
        },
        ..FrameGraphConfig::default()
    });

    frame.begin_frame();
    for i in 0..4 {
        frame.push_line(Vec3::ZERO, Vec3::X, Vec4::ONE, i as f32);
    }
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        frame.push_line(Vec3::ZERO, Vec3::Y, Vec4::ONE, 4.0);
    }));
    assert!(result.is_err());

    // Commands pushed before the overflow are intact and sorted.
    assert_eq!(frame.queue().len(), 4);
    let keys: Vec<f32> = frame.queue().headers().iter().map(|h| h.sort_key).collect();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
#[should_panic(expected = "exhausted")]
fn test_vertex_arena_overflow_is_fatal() {
    let mut frame = FrameGraph::new(FrameGraphConfig {
        vertex_arena_bytes: 64,
        ..FrameGraphConfig::default()
    });
    frame.begin_frame();
    // Two lines need 4 * 28 = 112 bytes.
    frame.push_line(Vec3::ZERO, Vec3::X, Vec4::ONE, 0.0);
    frame.push_line(Vec3::ZERO, Vec3::Y, Vec4::ONE, 1.0);
}

// ============================================================================
// Determinism Tests
// ============================================================================

/// The same push sequence produces byte-identical command streams across
/// frames; arena recycling leaves no residue.
#[test]
fn test_frames_are_deterministic() {
    init_logging();
    let (mut catalog, mesh) = test_catalog();
    let font = monospace_font(&mut catalog);
    let mut frame = FrameGraph::new(FrameGraphConfig::default());
    let mut backend = RecordingBackend::new();

    let mut build = |frame: &mut FrameGraph| {
        frame.begin_frame();
        frame.set_camera(Mat4::from_scale(Vec3::splat(2.0)));
        frame.set_debug_flags(DebugFlags::OVERLAY | DebugFlags::TEXT);
        frame.push_clear(RenderTargetId::World, Vec4::ZERO);
        frame.push_mesh(&catalog, mesh, Mat4::IDENTITY, Vec4::ONE, true, 0.0);
        frame.push_text(
            &catalog,
            font,
            "hello\nworld",
            Vec2::new(8.0, 8.0),
            1.0,
            Vec4::ONE,
            5.0,
        );
        frame.push_debug_rect(Vec2::ZERO, Vec2::ONE, Vec4::ONE);
        frame.push_render_target(RenderTargetId::World);
        frame.push_render_target(RenderTargetId::Output);
        frame.end_frame();
    };

    build(&mut frame);
    execute_frame(&frame, &catalog, &mut backend).unwrap();
    let first: Vec<BackendCall> = backend.calls().to_vec();
    let first_stats = frame.stats();

    // A noisy intermediate frame, then the original frame again.
    frame.begin_frame();
    frame.push_rect(Vec2::ZERO, Vec2::splat(9.0), Vec4::ONE, 0.0);
    frame.end_frame();

    backend.clear_calls();
    build(&mut frame);
    execute_frame(&frame, &catalog, &mut backend).unwrap();

    assert_eq!(backend.calls(), first.as_slice());
    assert_eq!(frame.stats(), first_stats);
}

/// Glyphs the font does not cover are skipped without staging anything.
#[test]
fn test_text_skips_uncovered_glyphs() {
    init_logging();
    let (mut catalog, _) = test_catalog();
    let font = monospace_font(&mut catalog);
    let mut frame = FrameGraph::new(FrameGraphConfig::default());

    frame.begin_frame();
    // Digits are not in the font; only "ab" produces quads.
    frame.push_text(&catalog, font, "a12b", Vec2::ZERO, 1.0, Vec4::ONE, 0.0);
    assert_eq!(frame.staging().vertex_count(VertexLayoutId::Textured), 8);

    // A fully uncovered string pushes no command at all.
    frame.push_text(&catalog, font, "123", Vec2::ZERO, 1.0, Vec4::ONE, 1.0);
    assert_eq!(frame.queue().counts().primitives, 1);
    frame.end_frame();
}
