//! Allocation handles
//!
//! A handle is a non-owning (offset, len) pair into the allocator's buffer.
//! It stays meaningful only until the next reset of the allocator that issued it.

use std::ops::Range;

/// Byte range granted by [`LinearAllocator::allocate`](crate::LinearAllocator::allocate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Allocation {
    offset: usize,
    len: usize,
}

impl Allocation {
    #[inline]
    pub(crate) fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// First byte of the range.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte of the range.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}
