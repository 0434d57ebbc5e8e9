// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Load and save device history through a key-value backend.

use std::sync::Arc;

use thiserror::Error;

use super::device_history::{decode_history, encode_history, HistoryFormatError, ModelDeviceHistory};
use crate::storage::{KeyValueStore, StorageError};

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to persist history for '{model_id}': {source}")]
    Write {
        model_id: String,
        #[source]
        source: StorageError,
    },

    #[error("Failed to encode history for '{model_id}': {source}")]
    Encode {
        model_id: String,
        #[source]
        source: HistoryFormatError,
    },
}

/// Persisted history per model on this device.
///
/// Device identity is implicit: one backend per browser profile or machine.
#[derive(Clone)]
pub struct DeviceHistoryStore {
    backend: Arc<dyn KeyValueStore>,
}

impl DeviceHistoryStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Backend key for a model's history.
    pub fn key_for(model_id: &str) -> String {
        format!("models/{}", model_id)
    }

    /// Load history for `model_id`.
    ///
    /// Missing, unreadable, or malformed records yield a fresh default.
    pub async fn get(&self, model_id: &str) -> ModelDeviceHistory {
        let key = Self::key_for(model_id);
        let text = match self.backend.get_text(&key).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(model_id, "no device history recorded, using defaults");
                return ModelDeviceHistory::default();
            }
            Err(e) => {
                tracing::warn!(model_id, error = %e, "device history unreadable, using defaults");
                return ModelDeviceHistory::default();
            }
        };

        match decode_history(&text) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(model_id, error = %e, "device history corrupt, using defaults");
                ModelDeviceHistory::default()
            }
        }
    }

    /// Persist history for `model_id`. Backend failures are returned as-is.
    pub async fn set(&self, model_id: &str, history: &ModelDeviceHistory) -> Result<(), HistoryError> {
        let text = encode_history(history).map_err(|source| HistoryError::Encode {
            model_id: model_id.to_string(),
            source,
        })?;
        self.backend
            .set_text(&Self::key_for(model_id), &text)
            .await
            .map_err(|source| HistoryError::Write {
                model_id: model_id.to_string(),
                source,
            })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
