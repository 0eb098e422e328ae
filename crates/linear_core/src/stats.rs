//! Allocation tracking
//!
//! Counters the allocator updates as it serves and resets memory

use serde::Serialize;

/// Running usage counters for a single allocator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AllocationStats {
    allocations: u64,
    failed_allocations: u64,
    resets: u64,
    bytes_allocated: u64,
    peak_used: usize,
}

impl AllocationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_allocation(&mut self, size: usize, cursor: usize) {
        self.allocations += 1;
        self.bytes_allocated += size as u64;
        self.peak_used = self.peak_used.max(cursor);
    }

    pub(crate) fn record_failure(&mut self) {
        self.failed_allocations += 1;
    }

    pub(crate) fn record_reset(&mut self) {
        self.resets += 1;
    }

    /// Successful allocations, including zero-sized ones.
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    pub fn failed_allocations(&self) -> u64 {
        self.failed_allocations
    }

    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// Total bytes handed out across every reset cycle.
    pub fn bytes_allocated(&self) -> u64 {
        self.bytes_allocated
    }

    /// Highest cursor position observed.
    pub fn peak_used(&self) -> usize {
        self.peak_used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_survives_smaller_cycles() {
        let mut stats = AllocationStats::new();
        stats.record_allocation(8, 8);
        stats.record_reset();
        stats.record_allocation(2, 2);

        assert_eq!(stats.allocations(), 2);
        assert_eq!(stats.bytes_allocated(), 10);
        assert_eq!(stats.peak_used(), 8);
        assert_eq!(stats.resets(), 1);
        assert_eq!(stats.failed_allocations(), 0);
    }
}
