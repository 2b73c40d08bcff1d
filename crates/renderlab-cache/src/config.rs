//! Storage backend selection

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-memory storage (fast, non-persistent)
    Memory,

    /// Filesystem storage (persistent, single-instance)
    Filesystem {
        /// Cache directory path
        dir: PathBuf,
    },
}

impl StoreBackend {
    /// Parse a backend name from configuration. `dir` is only consulted
    /// for the filesystem backend.
    pub fn parse(name: &str, dir: &str) -> anyhow::Result<Self> {
        match name {
            "memory" => Ok(Self::Memory),
            "filesystem" => Ok(Self::Filesystem {
                dir: PathBuf::from(dir),
            }),
            other => Err(anyhow::anyhow!("Unknown cache backend: {}", other)),
        }
    }
}

impl Default for StoreBackend {
    fn default() -> Self {
        Self::Memory
    }
}
