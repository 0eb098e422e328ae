//! Linear Allocator Core
//!
//! A fixed-capacity bump allocator:
//! - Cursor-based allocation with no per-object free
//! - Bulk reset, optionally scoped to a block via [`ResetGuard`]
//! - Typed store/load over plain-old-data values
//! - Usage statistics and serde-backed configuration

pub mod allocator;
pub mod config;
pub mod error;
pub mod handle;
pub mod scope;
pub mod stats;
mod typed;

pub use allocator::{AllocatorState, LinearAllocator};
pub use config::AllocatorConfig;
pub use error::{AllocError, ConfigError};
pub use handle::Allocation;
pub use scope::ResetGuard;
pub use stats::AllocationStats;

pub use bytemuck;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
