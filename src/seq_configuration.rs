//! Configuration types for lazyseq operations

use serde::{Deserialize, Serialize};

use crate::error::{SeqError, SeqResult};

/// Configuration for the two-worker [`zip`](crate::zip::zip) combinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZipConfig {
    /// Items each worker may hand over before it has to wait for the consumer
    pub handoff_capacity: usize,
}

impl Default for ZipConfig {
    fn default() -> Self {
        Self {
            handoff_capacity: 1,
        }
    }
}

impl ZipConfig {
    /// Create a new zip configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-worker handoff capacity
    pub fn handoff_capacity(mut self, capacity: usize) -> Self {
        self.handoff_capacity = capacity;
        self
    }

    /// Check that the configuration can be used to build a zip
    pub fn validate(&self) -> SeqResult<()> {
        if self.handoff_capacity == 0 {
            return Err(SeqError::InvalidHandoffCapacity {
                capacity: self.handoff_capacity,
            });
        }
        Ok(())
    }
}
