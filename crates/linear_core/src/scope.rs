//! Scoped reset
//!
//! [`ResetGuard`] borrows an allocator for the length of a block and rewinds
//! it when the block is left, whether by return, `?`, or unwinding.

use crate::LinearAllocator;
use std::ops::{Deref, DerefMut};

/// Exclusive borrow of a [`LinearAllocator`] that resets it on drop.
pub struct ResetGuard<'a> {
    allocator: &'a mut LinearAllocator,
}

impl<'a> ResetGuard<'a> {
    pub fn new(allocator: &'a mut LinearAllocator) -> Self {
        Self { allocator }
    }
}

impl Deref for ResetGuard<'_> {
    type Target = LinearAllocator;

    fn deref(&self) -> &LinearAllocator {
        self.allocator
    }
}

impl DerefMut for ResetGuard<'_> {
    fn deref_mut(&mut self) -> &mut LinearAllocator {
        self.allocator
    }
}

impl Drop for ResetGuard<'_> {
    fn drop(&mut self) {
        self.allocator.reset();
    }
}

impl LinearAllocator {
    /// Borrow the allocator until the returned guard is dropped, then reset it.
    pub fn scope(&mut self) -> ResetGuard<'_> {
        ResetGuard::new(self)
    }
}
