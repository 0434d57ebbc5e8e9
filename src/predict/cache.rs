// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Bounded cache of resolved model info, keyed by model ID.

use std::collections::VecDeque;

use crate::history::ModelDeviceHistory;

/// A model's requirements plus its history on this device.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub model_id: String,
    pub required_memory_gb: f64,
    pub required_storage_gb: f64,
    pub history: ModelDeviceHistory,
}

/// Least-recently-used cache of [`ModelInfo`].
///
/// Capacity 1 keeps only the current model; switching models evicts it.
#[derive(Debug)]
pub struct ModelInfoCache {
    capacity: usize,
    /// Most recently used at the back.
    entries: VecDeque<ModelInfo>,
}

impl ModelInfoCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.entries.iter().any(|e| e.model_id == model_id)
    }

    /// Look up and mark as most recently used.
    pub fn get(&mut self, model_id: &str) -> Option<&ModelInfo> {
        let index = self.entries.iter().position(|e| e.model_id == model_id)?;
        let entry = self.entries.remove(index)?;
        self.entries.push_back(entry);
        self.entries.back()
    }

    /// Insert or replace, evicting least recently used entries over capacity.
    pub fn insert(&mut self, info: ModelInfo) {
        self.entries.retain(|e| e.model_id != info.model_id);
        self.entries.push_back(info);
        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                tracing::debug!(model_id = %evicted.model_id, "evicted model info");
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str) -> ModelInfo {
        ModelInfo {
            model_id: id.to_string(),
            required_memory_gb: 1.0,
            required_storage_gb: 3.0,
            history: ModelDeviceHistory::default(),
        }
    }

    #[test]
    fn test_single_slot_replaces_on_new_key() {
        let mut cache = ModelInfoCache::new(1);
        cache.insert(info("a"));
        cache.insert(info("b"));
        assert_eq!(cache.len(), 1);
        assert!(!cache.contains("a"));
        assert!(cache.get("b").is_some());
    }

    #[test]
    fn test_zero_capacity_clamped() {
        assert_eq!(ModelInfoCache::new(0).capacity(), 1);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = ModelInfoCache::new(2);
        cache.insert(info("a"));
        cache.insert(info("b"));
        assert!(cache.get("a").is_some());
        cache.insert(info("c"));
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_insert_same_key_replaces() {
        let mut cache = ModelInfoCache::new(2);
        cache.insert(info("a"));
        let mut updated = info("a");
        updated.required_memory_gb = 9.0;
        cache.insert(updated);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a").unwrap().required_memory_gb, 9.0);
    }
}
