use thiserror::Error;

/// Errors reported by [`LinearAllocator`](crate::LinearAllocator) construction and allocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("incorrect capacity: {capacity} (must be greater than zero)")]
    InvalidCapacity { capacity: usize },

    #[error(
        "not enough memory: requested {requested} bytes, {} of {capacity} bytes free",
        .capacity - .used
    )]
    OutOfMemory {
        requested: usize,
        used: usize,
        capacity: usize,
    },
}

/// Errors raised while loading an [`AllocatorConfig`](crate::AllocatorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid allocator config: {0}")]
    Invalid(#[from] AllocError),
}
