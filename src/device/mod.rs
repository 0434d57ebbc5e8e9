// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Device capability probes.
//!
//! Probes report 0 when a value can't be detected. The predictor converts
//! that sentinel to `None` with [`detected`] before evaluating rules.

mod native;

pub use native::{is_local_origin, NativeProbe};

use std::sync::Arc;

use async_trait::async_trait;

/// Live device capabilities consulted on every prediction.
#[async_trait]
pub trait DeviceProbe: Send + Sync {
    /// Memory available to the model in GB, 0 if undetectable.
    fn estimate_system_memory_gb(&self) -> f64;

    /// Free storage for model weights in GB, 0 if undetectable.
    async fn estimate_available_storage_gb(&self) -> f64;

    /// True when the app is served from a local development host.
    fn is_serving_locally(&self) -> bool;

    /// False when the GPU compute API models run on is missing entirely.
    fn has_gpu_api(&self) -> bool {
        true
    }
}

/// Map the probe sentinel 0 (or any non-positive / non-finite value) to `None`.
pub fn detected(value: f64) -> Option<f64> {
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Fixed probe values, for tests and command-line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticProbe {
    pub system_memory_gb: f64,
    pub available_storage_gb: f64,
    pub serving_locally: bool,
    pub gpu_api: bool,
}

impl StaticProbe {
    pub fn new(system_memory_gb: f64, available_storage_gb: f64) -> Self {
        Self {
            system_memory_gb,
            available_storage_gb,
            serving_locally: false,
            gpu_api: true,
        }
    }

    pub fn serving_locally(mut self, local: bool) -> Self {
        self.serving_locally = local;
        self
    }

    pub fn gpu_api(mut self, available: bool) -> Self {
        self.gpu_api = available;
        self
    }
}

#[async_trait]
impl DeviceProbe for StaticProbe {
    fn estimate_system_memory_gb(&self) -> f64 {
        self.system_memory_gb
    }

    async fn estimate_available_storage_gb(&self) -> f64 {
        self.available_storage_gb
    }

    fn is_serving_locally(&self) -> bool {
        self.serving_locally
    }

    fn has_gpu_api(&self) -> bool {
        self.gpu_api
    }
}

/// Wraps another probe, replacing individual readings.
pub struct OverrideProbe {
    inner: Arc<dyn DeviceProbe>,
    pub system_memory_gb: Option<f64>,
    pub available_storage_gb: Option<f64>,
    pub serving_locally: Option<bool>,
}

impl OverrideProbe {
    pub fn new(inner: Arc<dyn DeviceProbe>) -> Self {
        Self {
            inner,
            system_memory_gb: None,
            available_storage_gb: None,
            serving_locally: None,
        }
    }
}

#[async_trait]
impl DeviceProbe for OverrideProbe {
    fn estimate_system_memory_gb(&self) -> f64 {
        self.system_memory_gb
            .unwrap_or_else(|| self.inner.estimate_system_memory_gb())
    }

    async fn estimate_available_storage_gb(&self) -> f64 {
        match self.available_storage_gb {
            Some(gb) => gb,
            None => self.inner.estimate_available_storage_gb().await,
        }
    }

    fn is_serving_locally(&self) -> bool {
        self.serving_locally
            .unwrap_or_else(|| self.inner.is_serving_locally())
    }

    fn has_gpu_api(&self) -> bool {
        self.inner.has_gpu_api()
    }
}

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;
