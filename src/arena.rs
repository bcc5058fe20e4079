//! Frame-scoped bump allocation.
//!
//! [`FrameArena`] backs all per-frame transient data: staged vertex bytes,
//! staged index values, anything that lives exactly one frame. Allocation is
//! a pointer bump, there is no individual deallocation, and the whole region
//! is released at once when the frame is cleared.
//!
//! Arenas are created once at startup, sized for worst-case frame content.
//! Exhausting one is a sizing bug, not a recoverable runtime condition, so
//! `push` asserts instead of returning a `Result`.
//!
//! Each clear advances an epoch counter. Entries handed out by the staging
//! layer carry offsets, not references, so a stale entry can at worst read
//! zeroed memory from the next frame; the epoch lets callers debug-assert
//! that they are not mixing frames.

use bytemuck::Zeroable;

/// A linear allocator freed in bulk at frame boundaries.
///
/// Generic over the element type so the index arena can hand out `u32`
/// slices directly while vertex arenas work in raw bytes.
#[derive(Debug)]
pub struct FrameArena<T: Copy + Zeroable> {
    data: Vec<T>,
    used: usize,
    epoch: u64,
    label: &'static str,
}

impl<T: Copy + Zeroable> FrameArena<T> {
    /// Create an arena with a fixed element capacity.
    ///
    /// The backing storage is allocated and zeroed up front; no further
    /// allocation happens for the lifetime of the arena.
    pub fn new(capacity: usize, label: &'static str) -> Self {
        Self {
            data: vec![T::zeroed(); capacity],
            used: 0,
            epoch: 0,
            label,
        }
    }

    /// Allocate `count` elements, returning the element offset of the
    /// allocation and a writable slice over it.
    ///
    /// Offsets are cumulative and stable for the rest of the frame.
    ///
    /// # Panics
    ///
    /// Panics if the arena does not have `count` elements left.
    pub fn push(&mut self, count: usize) -> (usize, &mut [T]) {
        assert!(
            self.used + count <= self.data.len(),
            "frame arena '{}' exhausted: {} + {} exceeds capacity {}",
            self.label,
            self.used,
            count,
            self.data.len()
        );
        let offset = self.used;
        self.used += count;
        (offset, &mut self.data[offset..offset + count])
    }

    /// Number of elements allocated this frame.
    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    /// Total element capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Elements still available this frame.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.used
    }

    /// The current frame epoch. Incremented by every [`clear`](Self::clear).
    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Debug label for diagnostics.
    #[inline]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// All elements allocated this frame, in allocation order.
    #[inline]
    pub fn contents(&self) -> &[T] {
        &self.data[..self.used]
    }

    /// Release the whole frame's allocations at once.
    ///
    /// Used elements are zeroed so stale offsets read deterministic data,
    /// the cursor resets and the epoch advances. Capacity is retained.
    pub fn clear(&mut self) {
        self.data[..self.used].fill(T::zeroed());
        self.used = 0;
        self.epoch += 1;
    }
}
