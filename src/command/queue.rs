//! The render command queue.
//!
//! Headers live in one contiguous array kept sorted by sort key at all
//! times: every push is an insertion sort that shifts larger-keyed entries
//! right. Per-frame command counts are bounded and game logic pushes bands
//! in roughly priority order, so inserts are near-append in practice and
//! the executor consumes the array with a single ordered walk.
//!
//! Payloads are stored per type in arrays pre-reserved to fixed capacities.
//! Exceeding a capacity is fatal; the queue is deliberately not an elastic
//! collection, keeping frame cost bounded and steady-state allocation-free.

use super::{
    ClearCommand, CommandHeader, ComputeCommand, PrimitiveCommand, PushTargetCommand,
    ShaderPassCommand,
};

/// Fixed per-type command capacities, set once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueCapacity {
    /// Maximum clear commands per frame.
    pub clears: usize,
    /// Maximum primitive draws per frame.
    pub primitives: usize,
    /// Maximum shader passes per frame.
    pub shader_passes: usize,
    /// Maximum compute passes per frame.
    pub compute_passes: usize,
    /// Maximum present operations per frame.
    pub push_targets: usize,
}

impl QueueCapacity {
    /// Total header capacity across all types.
    pub fn total(&self) -> usize {
        self.clears + self.primitives + self.shader_passes + self.compute_passes + self.push_targets
    }
}

impl Default for QueueCapacity {
    fn default() -> Self {
        Self {
            clears: 8,
            primitives: 4096,
            shader_passes: 32,
            compute_passes: 64,
            push_targets: 8,
        }
    }
}

/// Per-frame command counts, for stats and trace logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandCounts {
    /// Clear commands pushed this frame.
    pub clears: usize,
    /// Primitive draws pushed this frame.
    pub primitives: usize,
    /// Shader passes pushed this frame.
    pub shader_passes: usize,
    /// Compute passes pushed this frame.
    pub compute_passes: usize,
    /// Present operations pushed this frame.
    pub push_targets: usize,
}

/// Insertion-ordered, priority-sorted list of heterogeneous commands.
#[derive(Debug)]
pub struct RenderCommandQueue {
    headers: Vec<CommandHeader>,
    clears: Vec<ClearCommand>,
    primitives: Vec<PrimitiveCommand>,
    shader_passes: Vec<ShaderPassCommand>,
    compute_passes: Vec<ComputeCommand>,
    push_targets: Vec<PushTargetCommand>,
    capacity: QueueCapacity,
}

impl RenderCommandQueue {
    /// Create a queue with all arrays pre-reserved to `capacity`.
    ///
    /// No array reallocates after this point.
    ///
    /// # Panics
    ///
    /// Panics if any per-type capacity exceeds the 16-bit payload index
    /// space of [`CommandHeader`].
    pub fn new(capacity: QueueCapacity) -> Self {
        for (label, cap) in [
            ("clear", capacity.clears),
            ("primitive", capacity.primitives),
            ("shader pass", capacity.shader_passes),
            ("compute pass", capacity.compute_passes),
            ("push render target", capacity.push_targets),
        ] {
            assert!(
                cap <= u16::MAX as usize + 1,
                "{label} capacity {cap} does not fit 16-bit payload indices"
            );
        }
        Self {
            headers: Vec::with_capacity(capacity.total()),
            clears: Vec::with_capacity(capacity.clears),
            primitives: Vec::with_capacity(capacity.primitives),
            shader_passes: Vec::with_capacity(capacity.shader_passes),
            compute_passes: Vec::with_capacity(capacity.compute_passes),
            push_targets: Vec::with_capacity(capacity.push_targets),
            capacity,
        }
    }

    /// The configured capacities.
    #[inline]
    pub fn capacity(&self) -> QueueCapacity {
        self.capacity
    }

    /// Store a clear payload, returning its index.
    ///
    /// # Panics
    ///
    /// Panics if the per-frame clear capacity is exceeded.
    pub fn add_clear(&mut self, payload: ClearCommand) -> u16 {
        assert!(
            self.clears.len() < self.capacity.clears,
            "clear command capacity exceeded ({})",
            self.capacity.clears
        );
        self.clears.push(payload);
        (self.clears.len() - 1) as u16
    }

    /// Store a primitive payload, returning its index.
    ///
    /// # Panics
    ///
    /// Panics if the per-frame primitive capacity is exceeded.
    pub fn add_primitive(&mut self, payload: PrimitiveCommand) -> u16 {
        assert!(
            self.primitives.len() < self.capacity.primitives,
            "primitive command capacity exceeded ({})",
            self.capacity.primitives
        );
        self.primitives.push(payload);
        (self.primitives.len() - 1) as u16
    }

    /// Store a shader pass payload, returning its index.
    ///
    /// # Panics
    ///
    /// Panics if the per-frame shader pass capacity is exceeded.
    pub fn add_shader_pass(&mut self, payload: ShaderPassCommand) -> u16 {
        assert!(
            self.shader_passes.len() < self.capacity.shader_passes,
            "shader pass capacity exceeded ({})",
            self.capacity.shader_passes
        );
        self.shader_passes.push(payload);
        (self.shader_passes.len() - 1) as u16
    }

    /// Store a compute pass payload, returning its index.
    ///
    /// # Panics
    ///
    /// Panics if the per-frame compute pass capacity is exceeded.
    pub fn add_compute_pass(&mut self, payload: ComputeCommand) -> u16 {
        assert!(
            self.compute_passes.len() < self.capacity.compute_passes,
            "compute pass capacity exceeded ({})",
            self.capacity.compute_passes
        );
        self.compute_passes.push(payload);
        (self.compute_passes.len() - 1) as u16
    }

    /// Store a present payload, returning its index.
    ///
    /// # Panics
    ///
    /// Panics if the per-frame present capacity is exceeded.
    pub fn add_push_target(&mut self, payload: PushTargetCommand) -> u16 {
        assert!(
            self.push_targets.len() < self.capacity.push_targets,
            "push render target capacity exceeded ({})",
            self.capacity.push_targets
        );
        self.push_targets.push(payload);
        (self.push_targets.len() - 1) as u16
    }

    /// Insert a header, keeping the array sorted by sort key.
    ///
    /// The insert shifts larger-keyed entries right; equal keys keep
    /// insertion order, making the sort stable. Payloads for the header's
    /// type must already be stored.
    ///
    /// # Panics
    ///
    /// Panics if the header's payload index is out of range for its type or
    /// if the total header capacity is exceeded.
    pub fn push(&mut self, header: CommandHeader) {
        let payload_len = match header.command {
            super::CommandType::Clear => self.clears.len(),
            super::CommandType::Primitive => self.primitives.len(),
            super::CommandType::ShaderPass => self.shader_passes.len(),
            super::CommandType::ComputePass => self.compute_passes.len(),
            super::CommandType::PushTarget => self.push_targets.len(),
        };
        assert!(
            (header.payload as usize) < payload_len,
            "command header references payload {} of type {:?} but only {} exist",
            header.payload,
            header.command,
            payload_len
        );
        assert!(
            self.headers.len() < self.capacity.total(),
            "command header capacity exceeded ({})",
            self.capacity.total()
        );

        self.headers.push(header);
        let mut i = self.headers.len() - 1;
        while i > 0 && self.headers[i - 1].sort_key > header.sort_key {
            self.headers.swap(i - 1, i);
            i -= 1;
        }
    }

    /// The sorted headers, in execution order.
    #[inline]
    pub fn headers(&self) -> &[CommandHeader] {
        &self.headers
    }

    /// Number of commands queued this frame.
    #[inline]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Whether the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Per-type command counts.
    pub fn counts(&self) -> CommandCounts {
        CommandCounts {
            clears: self.clears.len(),
            primitives: self.primitives.len(),
            shader_passes: self.shader_passes.len(),
            compute_passes: self.compute_passes.len(),
            push_targets: self.push_targets.len(),
        }
    }

    /// Clear payload for a header of type [`CommandType::Clear`](super::CommandType::Clear).
    #[inline]
    pub fn clear_payload(&self, index: u16) -> &ClearCommand {
        &self.clears[index as usize]
    }

    /// Primitive payload for a header of type [`CommandType::Primitive`](super::CommandType::Primitive).
    #[inline]
    pub fn primitive_payload(&self, index: u16) -> &PrimitiveCommand {
        &self.primitives[index as usize]
    }

    /// Shader pass payload for a header of type [`CommandType::ShaderPass`](super::CommandType::ShaderPass).
    #[inline]
    pub fn shader_pass_payload(&self, index: u16) -> &ShaderPassCommand {
        &self.shader_passes[index as usize]
    }

    /// Compute payload for a header of type [`CommandType::ComputePass`](super::CommandType::ComputePass).
    #[inline]
    pub fn compute_payload(&self, index: u16) -> &ComputeCommand {
        &self.compute_passes[index as usize]
    }

    /// Present payload for a header of type [`CommandType::PushTarget`](super::CommandType::PushTarget).
    #[inline]
    pub fn push_target_payload(&self, index: u16) -> &PushTargetCommand {
        &self.push_targets[index as usize]
    }

    /// Reset all header and payload arrays for the next frame.
    ///
    /// Counters drop to zero and no payload residue is reachable; array
    /// capacities are retained.
    pub fn clear_entries(&mut self) {
        self.headers.clear();
        self.clears.clear();
        self.primitives.clear();
        self.shader_passes.clear();
        self.compute_passes.clear();
        self.push_targets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::super::{band, CommandType};
    use super::*;
    use crate::target::RenderTargetId;
    use glam::Vec4;

    fn clear_header(queue: &mut RenderCommandQueue, key: f32) -> CommandHeader {
        let payload = queue.add_clear(ClearCommand {
            color: Vec4::ZERO,
            depth: 1.0,
        });
        CommandHeader::new(CommandType::Clear, RenderTargetId::Output, key, payload)
    }

    #[test]
    fn test_push_keeps_headers_sorted() {
        let mut queue = RenderCommandQueue::new(QueueCapacity::default());
        for key in [300.0, 0.0, 150.0, 600.0, 75.0] {
            let header = clear_header(&mut queue, key);
            queue.push(header);
        }
        let keys: Vec<f32> = queue.headers().iter().map(|h| h.sort_key).collect();
        assert_eq!(keys, vec![0.0, 75.0, 150.0, 300.0, 600.0]);
    }

    #[test]
    fn test_equal_keys_preserve_insertion_order() {
        let mut queue = RenderCommandQueue::new(QueueCapacity::default());
        for _ in 0..4 {
            let header = clear_header(&mut queue, band::DEBUG_OVERLAY);
            queue.push(header);
        }
        let payloads: Vec<u16> = queue.headers().iter().map(|h| h.payload).collect();
        assert_eq!(payloads, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_clear_entries_is_idempotent() {
        let mut queue = RenderCommandQueue::new(QueueCapacity::default());
        let header = clear_header(&mut queue, 0.0);
        queue.push(header);

        queue.clear_entries();
        assert!(queue.is_empty());
        assert_eq!(queue.counts(), CommandCounts::default());

        queue.clear_entries();
        assert!(queue.is_empty());
        assert_eq!(queue.counts(), CommandCounts::default());
    }

    #[test]
    #[should_panic(expected = "clear command capacity exceeded")]
    fn test_payload_overflow_is_fatal() {
        let mut queue = RenderCommandQueue::new(QueueCapacity {
            clears: 2,
            ..QueueCapacity::default()
        });
        for _ in 0..3 {
            queue.add_clear(ClearCommand {
                color: Vec4::ZERO,
                depth: 1.0,
            });
        }
    }

    #[test]
    #[should_panic(expected = "references payload")]
    fn test_dangling_payload_index_is_fatal() {
        let mut queue = RenderCommandQueue::new(QueueCapacity::default());
        queue.push(CommandHeader::new(
            CommandType::Primitive,
            RenderTargetId::World,
            band::MESHES,
            0,
        ));
    }

    #[test]
    #[should_panic(expected = "does not fit 16-bit payload indices")]
    fn test_capacity_beyond_payload_index_space_is_fatal() {
        RenderCommandQueue::new(QueueCapacity {
            primitives: u16::MAX as usize + 2,
            ..QueueCapacity::default()
        });
    }

    #[test]
    fn test_queue_state_valid_after_overflow_panic() {
        let mut queue = RenderCommandQueue::new(QueueCapacity {
            clears: 1,
            ..QueueCapacity::default()
        });
        let header = clear_header(&mut queue, 0.0);
        queue.push(header);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            queue.add_clear(ClearCommand {
                color: Vec4::ONE,
                depth: 0.0,
            });
        }));
        assert!(result.is_err());

        // Commands queued before the failing call remain inspectable.
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.counts().clears, 1);
        assert_eq!(queue.clear_payload(0).depth, 1.0);
    }
}
