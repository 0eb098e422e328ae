//! Allocator configuration

use crate::{ConfigError, LinearAllocator};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Construction parameters for a [`LinearAllocator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Buffer size in bytes. Must be greater than zero.
    pub capacity: usize,
    /// Name attached to the allocator's log events.
    pub label: String,
}

impl AllocatorConfig {
    /// 1 MiB
    pub const DEFAULT_CAPACITY: usize = 1 << 20;

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn build(&self) -> Result<LinearAllocator, ConfigError> {
        Ok(LinearAllocator::with_label(self.capacity, self.label.as_str())?)
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            label: "linear".to_string(),
        }
    }
}
