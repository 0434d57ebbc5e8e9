// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Key-value backends for persisted history.
//!
//! The predictor only needs text get/set by key. `MemoryStore` keeps values
//! in process memory; `FileStore` keeps one file per key under a directory.

mod file_store;
mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Write rejected for key '{0}'")]
    WriteRejected(String),
}

/// Text key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value at `key`, `None` if absent.
    async fn get_text(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` at `key`, replacing any previous value.
    async fn set_text(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
