//! Jump-flood outline configuration.
//!
//! Outlines are produced without CPU-side geometry analysis: outlined
//! meshes are re-drawn flat into the outline target, a jump-flood distance
//! transform runs over the silhouette as a chain of compute passes, and a
//! resolve pass turns per-pixel seed distances into an outline color and
//! width. The chain is built from ordinary commands by the frame context
//! (see `FrameGraph::schedule_outline_chain`), once per frame regardless of
//! how many outlined objects exist, so all silhouettes share one field.
//!
//! The correctness-critical invariant of jump flooding is the step
//! schedule: starting at the highest power of two covering the maximum
//! jump distance, steps strictly halve and terminate at 1. That converges
//! over the full image in `O(log n)` passes.

use glam::Vec4;

use crate::assets::{ComputeShaderId, ShaderPipelineId};

/// Parameters of the outline multi-pass chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineSettings {
    /// Maximum distance in pixels a silhouette seed can propagate. The
    /// chain emits `ceil(log2(max_jump_distance)) + 1` flood passes; a value
    /// of 0 or 1 still emits one pass at step 1, never zero, so backend
    /// pipeline object counts stay static.
    pub max_jump_distance: u32,
    /// Outline color.
    pub color: Vec4,
    /// Outline width in pixels.
    pub width: f32,
    /// Whether to soften the result with a 3x3 kernel blur.
    pub blur: bool,
    /// Compute shader seeding silhouette pixels with their coordinates.
    pub init_shader: ComputeShaderId,
    /// Compute shader performing one jump-flood propagation step.
    pub flood_shader: ComputeShaderId,
    /// Compute shader for the optional 3x3 blur.
    pub blur_shader: ComputeShaderId,
    /// Shader pipeline converting seed distances into outline pixels.
    pub resolve_pipeline: ShaderPipelineId,
}

impl Default for OutlineSettings {
    fn default() -> Self {
        Self {
            max_jump_distance: 32,
            color: Vec4::new(1.0, 0.6, 0.1, 1.0),
            width: 3.0,
            blur: false,
            init_shader: ComputeShaderId(0),
            flood_shader: ComputeShaderId(1),
            blur_shader: ComputeShaderId(2),
            resolve_pipeline: ShaderPipelineId(4),
        }
    }
}

/// The jump-flood step schedule for a maximum jump distance.
///
/// Returns the step sizes in emission order: the highest power of two
/// covering `max_jump_distance` down to 1, each exactly half its
/// predecessor. Never empty.
pub fn jump_flood_steps(max_jump_distance: u32) -> Vec<u32> {
    let mut step = max_jump_distance.max(1).next_power_of_two();
    let mut steps = Vec::with_capacity(step.trailing_zeros() as usize + 1);
    while step >= 1 {
        steps.push(step);
        step /= 2;
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_of_two_pass_count() {
        // max = 2^k yields exactly k + 1 passes.
        for k in 0..8u32 {
            let steps = jump_flood_steps(1 << k);
            assert_eq!(steps.len() as u32, k + 1);
            assert_eq!(steps[0], 1 << k);
            assert_eq!(*steps.last().unwrap(), 1);
        }
    }

    #[test]
    fn test_steps_strictly_halve() {
        let steps = jump_flood_steps(64);
        for pair in steps.windows(2) {
            assert_eq!(pair[1] * 2, pair[0]);
        }
    }

    #[test]
    fn test_zero_distance_still_emits_one_pass() {
        assert_eq!(jump_flood_steps(0), vec![1]);
        assert_eq!(jump_flood_steps(1), vec![1]);
    }

    #[test]
    fn test_non_power_of_two_rounds_up() {
        // 20 pixels needs a 32-pixel first step to cover the distance.
        assert_eq!(jump_flood_steps(20), vec![32, 16, 8, 4, 2, 1]);
    }
}
