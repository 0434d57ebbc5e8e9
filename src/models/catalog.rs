// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Prebuilt model registry lookup.
//!
//! The registry ships with the crate as JSON in the same shape as the
//! in-browser engine's prebuilt model list. Only the memory requirement is
//! used for prediction; the other fields are kept for listing.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const PREBUILT_MODELS_JSON: &str = include_str!("../../data/prebuilt_models.json");

const MB_PER_GB: f64 = 1024.0;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Malformed model registry: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate model ID in registry: {0}")]
    DuplicateModel(String),
}

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub model_id: String,
    #[serde(rename = "vram_required_MB", default)]
    pub vram_required_mb: Option<f64>,
    #[serde(default)]
    pub low_resource_required: bool,
    #[serde(default)]
    pub required_features: Vec<String>,
}

/// Result of looking a model up by exact ID.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatalogLookup {
    NotFound,
    /// Known model. `required_memory_gb` is 0 when the entry has no
    /// memory requirement.
    Found { required_memory_gb: f64 },
}

/// Exact-match lookup over a model registry.
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    records: Vec<ModelRecord>,
    by_id: HashMap<String, usize>,
}

impl ModelCatalog {
    /// Build from registry JSON (an array of records).
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<ModelRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<ModelRecord>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if by_id.insert(record.model_id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateModel(record.model_id.clone()));
            }
        }
        Ok(Self { records, by_id })
    }

    /// The registry bundled with the crate.
    pub fn prebuilt() -> &'static ModelCatalog {
        static PREBUILT: OnceLock<ModelCatalog> = OnceLock::new();
        PREBUILT.get_or_init(|| {
            ModelCatalog::from_json(PREBUILT_MODELS_JSON)
                .expect("Failed to parse embedded prebuilt_models.json")
        })
    }

    pub fn lookup(&self, model_id: &str) -> CatalogLookup {
        match self.get(model_id) {
            None => CatalogLookup::NotFound,
            Some(record) => CatalogLookup::Found {
                required_memory_gb: record.vram_required_mb.unwrap_or(0.0) / MB_PER_GB,
            },
        }
    }

    /// Required memory in GB, 0 when unknown.
    pub fn required_memory_gb(&self, model_id: &str) -> f64 {
        match self.lookup(model_id) {
            CatalogLookup::Found { required_memory_gb } => required_memory_gb,
            CatalogLookup::NotFound => 0.0,
        }
    }

    pub fn get(&self, model_id: &str) -> Option<&ModelRecord> {
        self.by_id.get(model_id).map(|&i| &self.records[i])
    }

    /// All records in registry order.
    pub fn records(&self) -> &[ModelRecord] {
        &self.records
    }

    /// Records whose ID contains `query`, case-insensitively.
    pub fn find(&self, query: &str) -> Vec<&ModelRecord> {
        let query_lower = query.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.model_id.to_lowercase().contains(&query_lower))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
