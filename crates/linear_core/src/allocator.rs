//! Fixed-capacity bump allocator
//!
//! One contiguous byte buffer and a cursor. `allocate` advances the cursor,
//! `reset` rewinds it to zero. Nothing is ever freed individually.

use crate::{AllocError, Allocation, AllocationStats};
use std::fmt;
use tracing::{debug, trace, warn};

/// Fill level of a [`LinearAllocator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocatorState {
    /// Cursor at zero.
    Empty,
    PartiallyFilled,
    /// Cursor at capacity; only zero-sized allocations succeed.
    Full,
}

/// Linear ("bump") allocator over an owned, fixed-size byte buffer.
///
/// Successive allocations are laid out back to back in call order with no
/// padding. Handles are plain offsets and stay meaningful until the next
/// [`reset`](Self::reset).
///
/// The allocator mutates through `&mut self` only; sharing one between threads
/// needs an external lock.
pub struct LinearAllocator {
    buffer: Box<[u8]>,
    cursor: usize,
    label: String,
    stats: AllocationStats,
}

impl LinearAllocator {
    /// Create an allocator owning `capacity` zeroed bytes.
    pub fn new(capacity: usize) -> Result<Self, AllocError> {
        Self::with_label(capacity, "linear")
    }

    /// Create an allocator whose log events carry `label`.
    pub fn with_label(capacity: usize, label: impl Into<String>) -> Result<Self, AllocError> {
        if capacity == 0 {
            return Err(AllocError::InvalidCapacity { capacity });
        }
        let label = label.into();
        debug!(%label, capacity, "linear allocator created");
        Ok(Self {
            buffer: vec![0u8; capacity].into_boxed_slice(),
            cursor: 0,
            label,
            stats: AllocationStats::new(),
        })
    }

    /// Reserve the next `size` bytes.
    ///
    /// On failure the cursor is left where it was. A zero-sized request always
    /// succeeds and yields an empty handle at the current cursor.
    pub fn allocate(&mut self, size: usize) -> Result<Allocation, AllocError> {
        let start = self.cursor;
        let end = match start.checked_add(size) {
            Some(end) if end <= self.capacity() => end,
            _ => {
                self.stats.record_failure();
                warn!(
                    label = %self.label,
                    requested = size,
                    used = start,
                    capacity = self.capacity(),
                    "linear allocator out of memory"
                );
                return Err(AllocError::OutOfMemory {
                    requested: size,
                    used: start,
                    capacity: self.capacity(),
                });
            }
        };

        self.cursor = end;
        self.stats.record_allocation(size, end);
        trace!(label = %self.label, offset = start, size, cursor = end, "allocated");
        Ok(Allocation::new(start, size))
    }

    /// Reserve exactly `size_of::<T>()` bytes.
    #[inline]
    pub fn allocate_for<T>(&mut self) -> Result<Allocation, AllocError> {
        self.allocate(std::mem::size_of::<T>())
    }

    /// Rewind the cursor to zero, invalidating every outstanding handle.
    ///
    /// The buffer is neither shrunk nor cleared.
    pub fn reset(&mut self) {
        let released = self.cursor;
        self.cursor = 0;
        self.stats.record_reset();
        if released > 0 {
            debug!(label = %self.label, released, "linear allocator reset");
        }
    }

    /// Alias for [`reset`](Self::reset).
    #[inline]
    pub fn free(&mut self) {
        self.reset();
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes handed out since the last reset (the cursor).
    #[inline]
    pub fn used(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.cursor
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.cursor == self.capacity()
    }

    pub fn state(&self) -> AllocatorState {
        if self.is_empty() {
            AllocatorState::Empty
        } else if self.is_full() {
            AllocatorState::Full
        } else {
            AllocatorState::PartiallyFilled
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn stats(&self) -> &AllocationStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = AllocationStats::new();
    }

    /// Raw bytes behind `handle`.
    ///
    /// # Panics
    /// If the handle reaches past the end of the buffer.
    pub fn bytes(&self, handle: Allocation) -> &[u8] {
        self.debug_check_live(handle);
        &self.buffer[handle.range()]
    }

    /// Mutable raw bytes behind `handle`.
    ///
    /// # Panics
    /// If the handle reaches past the end of the buffer.
    pub fn bytes_mut(&mut self, handle: Allocation) -> &mut [u8] {
        self.debug_check_live(handle);
        &mut self.buffer[handle.range()]
    }

    #[inline]
    pub(crate) fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    #[inline]
    pub(crate) fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Handles past the cursor come from before a reset or from another allocator.
    #[inline]
    pub(crate) fn debug_check_live(&self, handle: Allocation) {
        debug_assert!(
            handle.end() <= self.cursor,
            "handle {}..{} is past the cursor {} of allocator '{}'",
            handle.offset(),
            handle.end(),
            self.cursor,
            self.label
        );
    }
}

impl fmt::Debug for LinearAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearAllocator")
            .field("label", &self.label)
            .field("capacity", &self.capacity())
            .field("used", &self.cursor)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_debug_omits_buffer_contents() {
        let allocator = LinearAllocator::with_label(4096, "frame").unwrap();
        let text = format!("{allocator:?}");
        assert!(text.contains("\"frame\""));
        assert!(text.contains("capacity: 4096"));
        assert!(text.len() < 512);
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let err = LinearAllocator::new(0).unwrap_err();
        assert_eq!(err, AllocError::InvalidCapacity { capacity: 0 });
    }

    #[test]
    fn test_new_allocator_is_empty() {
        let allocator = LinearAllocator::new(1024).unwrap();
        assert_eq!(allocator.capacity(), 1024);
        assert_eq!(allocator.used(), 0);
        assert_eq!(allocator.remaining(), 1024);
        assert_eq!(allocator.state(), AllocatorState::Empty);
        assert_eq!(allocator.label(), "linear");
    }

    #[test]
    fn test_allocations_follow_each_other() {
        let mut allocator = LinearAllocator::new(1024).unwrap();
        let h1 = allocator.allocate(2).unwrap();
        let h2 = allocator.allocate(4).unwrap();

        assert_eq!((h1.offset(), h1.len()), (0, 2));
        assert_eq!((h2.offset(), h2.len()), (2, 4));
        assert_eq!(allocator.used(), 6);
        assert_eq!(allocator.state(), AllocatorState::PartiallyFilled);
    }

    #[test]
    fn test_out_of_memory_leaves_cursor() {
        let mut allocator = LinearAllocator::new(4).unwrap();
        allocator.allocate(3).unwrap();
        assert_eq!(allocator.used(), 3);

        let err = allocator.allocate(2).unwrap_err();
        assert_eq!(
            err,
            AllocError::OutOfMemory {
                requested: 2,
                used: 3,
                capacity: 4
            }
        );
        assert_eq!(allocator.used(), 3);

        allocator.allocate(1).unwrap();
        assert_eq!(allocator.used(), 4);
        assert!(allocator.allocate(1).is_err());
        assert_eq!(allocator.stats().failed_allocations(), 2);
    }

    #[test]
    fn test_full_then_reset_then_full_again() {
        let mut allocator = LinearAllocator::new(4).unwrap();
        allocator.allocate(4).unwrap();
        assert_eq!(allocator.state(), AllocatorState::Full);

        allocator.reset();
        assert_eq!(allocator.used(), 0);
        assert_eq!(allocator.state(), AllocatorState::Empty);

        allocator.allocate(4).unwrap();
        assert!(allocator.is_full());
    }

    #[test]
    fn test_zero_sized_allocation() {
        let mut allocator = LinearAllocator::new(4).unwrap();
        allocator.allocate(3).unwrap();
        let empty = allocator.allocate(0).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.offset(), 3);
        assert_eq!(allocator.used(), 3);

        allocator.allocate(1).unwrap();
        let at_end = allocator.allocate(0).unwrap();
        assert_eq!(at_end.offset(), 4);
        assert!(allocator.bytes(at_end).is_empty());
    }

    #[test]
    fn test_overflowing_size_is_out_of_memory() {
        let mut allocator = LinearAllocator::new(8).unwrap();
        allocator.allocate(1).unwrap();
        let err = allocator.allocate(usize::MAX).unwrap_err();
        assert!(matches!(err, AllocError::OutOfMemory { .. }));
        assert_eq!(allocator.used(), 1);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut allocator = LinearAllocator::new(16).unwrap();
        allocator.allocate(5).unwrap();
        allocator.reset();
        assert_eq!(allocator.used(), 0);
        allocator.free();
        assert_eq!(allocator.used(), 0);
        assert_eq!(allocator.stats().resets(), 2);
    }

    #[test]
    fn test_reset_does_not_clear_bytes() {
        let mut allocator = LinearAllocator::new(4).unwrap();
        let handle = allocator.allocate(4).unwrap();
        allocator.bytes_mut(handle).copy_from_slice(&[1, 2, 3, 4]);
        allocator.reset();

        let again = allocator.allocate(4).unwrap();
        assert_eq!(again, handle);
        assert_eq!(allocator.bytes(again), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_stats_track_usage() {
        let mut allocator = LinearAllocator::new(16).unwrap();
        allocator.allocate(10).unwrap();
        allocator.reset();
        allocator.allocate(3).unwrap();
        allocator.allocate(0).unwrap();

        let stats = *allocator.stats();
        assert_eq!(stats.allocations(), 3);
        assert_eq!(stats.bytes_allocated(), 13);
        assert_eq!(stats.peak_used(), 10);

        allocator.reset_stats();
        assert_eq!(*allocator.stats(), AllocationStats::default());
        assert_eq!(allocator.used(), 3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "past the cursor")]
    fn test_stale_handle_is_caught_in_debug() {
        let mut allocator = LinearAllocator::new(8).unwrap();
        let handle = allocator.allocate(4).unwrap();
        allocator.reset();
        let _ = allocator.bytes(handle);
    }

    proptest! {
        #[test]
        fn prop_layout_is_contiguous(
            capacity in 1usize..512,
            sizes in proptest::collection::vec(0usize..64, 0..32),
        ) {
            let mut allocator = LinearAllocator::new(capacity).unwrap();
            let mut expected = 0usize;

            for size in sizes {
                let before = allocator.used();
                match allocator.allocate(size) {
                    Ok(handle) => {
                        prop_assert!(expected + size <= capacity);
                        prop_assert_eq!(handle.offset(), expected);
                        prop_assert_eq!(handle.len(), size);
                        expected += size;
                    }
                    Err(AllocError::OutOfMemory { requested, used, .. }) => {
                        prop_assert!(expected + size > capacity);
                        prop_assert_eq!(requested, size);
                        prop_assert_eq!(used, before);
                    }
                    Err(other) => {
                        prop_assert!(false, "unexpected error {}", other);
                    }
                }
                prop_assert_eq!(allocator.used(), expected);
                prop_assert!(allocator.used() <= allocator.capacity());
            }
        }

        #[test]
        fn prop_reuse_after_reset_is_deterministic(
            sizes in proptest::collection::vec(0usize..32, 1..16),
        ) {
            let capacity = sizes.iter().sum::<usize>().max(1);
            let mut allocator = LinearAllocator::new(capacity).unwrap();

            let first: Vec<Allocation> = sizes
                .iter()
                .map(|&size| allocator.allocate(size).unwrap())
                .collect();
            allocator.reset();
            let second: Vec<Allocation> = sizes
                .iter()
                .map(|&size| allocator.allocate(size).unwrap())
                .collect();

            prop_assert_eq!(first, second);
        }
    }
}
