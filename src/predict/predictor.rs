// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Problem predictor.
//!
//! A prediction resolves the model (catalog requirements plus device
//! history), gathers live probe signals, then evaluates each rule
//! independently. Update operations resolve the model the same way, append
//! samples, and persist the history.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use super::cache::{ModelInfo, ModelInfoCache};
use super::descriptions::{
    beta_description, developer_mode_description, hard_incompatibility_description,
    load_success_description, performance_description, shortfall_description, Capacity,
    LoadRecord,
};
use super::problem_types::{ModelDeviceProblem, ModelDeviceProblemType};
use crate::device::{detected, DeviceProbe};
use crate::history::{DeviceHistoryStore, HistoryError, ModelDeviceHistory};
use crate::models::{CatalogLookup, ModelCatalog};

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Thresholds and policy for the predictor.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictorSettings {
    /// Input throughput below this average is reported as poor performance.
    pub min_input_tokens_per_sec: f64,
    /// Output throughput below this average is reported as poor performance.
    pub min_output_tokens_per_sec: f64,
    /// Storage needed for a model, as a multiple of its memory requirement.
    pub storage_to_memory_ratio: f64,
    /// Resolved models kept in memory.
    pub cache_capacity: usize,
    /// Report a beta notice with every prediction.
    pub app_is_beta: bool,
}

impl Default for PredictorSettings {
    fn default() -> Self {
        Self {
            min_input_tokens_per_sec: 5.0,
            min_output_tokens_per_sec: 10.0,
            storage_to_memory_ratio: 3.0,
            cache_capacity: 1,
            app_is_beta: false,
        }
    }
}

/// Live signals gathered for one prediction.
#[derive(Debug, Clone, Copy)]
struct DeviceSignals {
    memory_gb: Option<f64>,
    storage_gb: Option<f64>,
    serving_locally: bool,
    gpu_api: bool,
}

pub struct ProblemPredictor {
    store: DeviceHistoryStore,
    probe: Arc<dyn DeviceProbe>,
    catalog: Arc<ModelCatalog>,
    settings: PredictorSettings,
    cache: Mutex<ModelInfoCache>,
}

impl ProblemPredictor {
    pub fn new(
        store: DeviceHistoryStore,
        probe: Arc<dyn DeviceProbe>,
        catalog: Arc<ModelCatalog>,
        settings: PredictorSettings,
    ) -> Self {
        let cache = Mutex::new(ModelInfoCache::new(settings.cache_capacity));
        Self {
            store,
            probe,
            catalog,
            settings,
            cache,
        }
    }

    /// Predictor over the bundled model registry.
    pub fn with_prebuilt_catalog(
        store: DeviceHistoryStore,
        probe: Arc<dyn DeviceProbe>,
        settings: PredictorSettings,
    ) -> Self {
        let catalog = Arc::new(ModelCatalog::prebuilt().clone());
        Self::new(store, probe, catalog, settings)
    }

    pub fn settings(&self) -> &PredictorSettings {
        &self.settings
    }

    /// Predict problems loading `model_id` on this device.
    ///
    /// `Ok(None)` means no problems were found.
    pub async fn predict(
        &self,
        model_id: &str,
    ) -> Result<Option<Vec<ModelDeviceProblem>>, PredictError> {
        let info = {
            let mut cache = self.cache.lock().await;
            self.resolve(&mut cache, model_id).await?
        };
        let signals = self.gather_signals().await;
        let problems = self.evaluate(&info, signals);

        tracing::debug!(
            model_id,
            problem_count = problems.len(),
            "predicted model device problems"
        );
        if problems.is_empty() {
            Ok(None)
        } else {
            Ok(Some(problems))
        }
    }

    /// Record the outcome of a load attempt.
    ///
    /// A non-finite load time is dropped; the outcome is still recorded.
    pub async fn update_load_history(
        &self,
        model_id: &str,
        succeeded: bool,
        load_time_ms: f64,
    ) -> Result<(), PredictError> {
        self.update_history(model_id, |history| {
            history
                .load_success_rate
                .update(if succeeded { 1.0 } else { 0.0 });
            if succeeded {
                if load_time_ms.is_finite() {
                    history.load_time.update(load_time_ms);
                } else {
                    tracing::warn!(model_id, load_time_ms, "ignoring non-finite load time");
                }
            }
            true
        })
        .await
    }

    /// Record token throughput from one inference session.
    ///
    /// A direction whose window is zero is left untouched.
    pub async fn update_performance_history(
        &self,
        model_id: &str,
        input_token_count: u64,
        output_token_count: u64,
        input_window_ms: f64,
        output_window_ms: f64,
    ) -> Result<(), PredictError> {
        let input_rate = tokens_per_sec(input_token_count, input_window_ms);
        let output_rate = tokens_per_sec(output_token_count, output_window_ms);
        self.update_history(model_id, |history| {
            if let Some(rate) = input_rate {
                history.input_tokens_per_sec.update(rate);
            }
            if let Some(rate) = output_rate {
                history.output_tokens_per_sec.update(rate);
            }
            input_rate.is_some() || output_rate.is_some()
        })
        .await
    }

    /// Drop all cached model info so the next call reloads history.
    pub async fn invalidate(&self) {
        self.cache.lock().await.clear();
    }

    async fn update_history<F>(&self, model_id: &str, mutate: F) -> Result<(), PredictError>
    where
        F: FnOnce(&mut ModelDeviceHistory) -> bool,
    {
        let mut cache = self.cache.lock().await;
        let mut info = self.resolve(&mut cache, model_id).await?;
        if !mutate(&mut info.history) {
            tracing::debug!(model_id, "no samples to record");
            return Ok(());
        }
        self.store.set(model_id, &info.history).await?;
        tracing::info!(model_id, "device history updated");
        cache.insert(info);
        Ok(())
    }

    async fn resolve(
        &self,
        cache: &mut ModelInfoCache,
        model_id: &str,
    ) -> Result<ModelInfo, PredictError> {
        if let Some(info) = cache.get(model_id) {
            tracing::debug!(model_id, "model info cache hit");
            return Ok(info.clone());
        }

        let required_memory_gb = match self.catalog.lookup(model_id) {
            CatalogLookup::Found { required_memory_gb } => required_memory_gb,
            CatalogLookup::NotFound => return Err(PredictError::ModelNotFound(model_id.to_string())),
        };
        let history = self.store.get(model_id).await;
        let info = ModelInfo {
            model_id: model_id.to_string(),
            required_memory_gb,
            required_storage_gb: required_memory_gb * self.settings.storage_to_memory_ratio,
            history,
        };
        tracing::debug!(
            model_id,
            required_memory_gb,
            required_storage_gb = info.required_storage_gb,
            "resolved model info"
        );
        cache.insert(info.clone());
        Ok(info)
    }

    async fn gather_signals(&self) -> DeviceSignals {
        let memory_gb = detected(self.probe.estimate_system_memory_gb());
        let storage_gb = detected(self.probe.estimate_available_storage_gb().await);
        DeviceSignals {
            memory_gb,
            storage_gb,
            serving_locally: self.probe.is_serving_locally(),
            gpu_api: self.probe.has_gpu_api(),
        }
    }

    fn evaluate(&self, info: &ModelInfo, signals: DeviceSignals) -> Vec<ModelDeviceProblem> {
        let history = &info.history;
        let loaded_before = history.has_loaded_successfully();
        let mut problems = Vec::new();

        let success = &history.load_success_rate;
        if !success.is_empty() && success.average() < 1.0 {
            problems.push(ModelDeviceProblem::new(
                ModelDeviceProblemType::BadLoadSuccessHistory,
                load_success_description(LoadRecord::from_series(success)),
                false,
            ));
        }

        let input = &history.input_tokens_per_sec;
        let output = &history.output_tokens_per_sec;
        let slow_input = !input.is_empty() && input.average() < self.settings.min_input_tokens_per_sec;
        let slow_output =
            !output.is_empty() && output.average() < self.settings.min_output_tokens_per_sec;
        if slow_input || slow_output {
            problems.push(ModelDeviceProblem::new(
                ModelDeviceProblemType::BadPerformanceHistory,
                performance_description(input, output),
                false,
            ));
        }

        if let Some(problem) = shortfall_problem(
            ModelDeviceProblemType::InsufficientVram,
            Capacity::Memory,
            info.required_memory_gb,
            signals.memory_gb,
            loaded_before,
        ) {
            problems.push(problem);
        }

        if let Some(problem) = shortfall_problem(
            ModelDeviceProblemType::InsufficientStorage,
            Capacity::Storage,
            info.required_storage_gb,
            signals.storage_gb,
            loaded_before,
        ) {
            problems.push(problem);
        }

        if !signals.gpu_api {
            problems.push(ModelDeviceProblem::new(
                ModelDeviceProblemType::HardIncompatibility,
                hard_incompatibility_description(&info.model_id),
                true,
            ));
        }

        if signals.serving_locally {
            problems.push(ModelDeviceProblem::new(
                ModelDeviceProblemType::DeveloperMode,
                developer_mode_description(&info.model_id),
                false,
            ));
        }

        if self.settings.app_is_beta {
            problems.push(ModelDeviceProblem::new(
                ModelDeviceProblemType::Beta,
                beta_description(&info.model_id),
                false,
            ));
        }

        problems
    }
}

/// Undetected capacity counts as a shortfall. Blocking only when the
/// shortfall was measured and the model never loaded here.
fn shortfall_problem(
    problem_type: ModelDeviceProblemType,
    capacity: Capacity,
    required_gb: f64,
    available_gb: Option<f64>,
    loaded_before: bool,
) -> Option<ModelDeviceProblem> {
    if required_gb <= available_gb.unwrap_or(0.0) {
        return None;
    }
    Some(ModelDeviceProblem::new(
        problem_type,
        shortfall_description(capacity, required_gb, available_gb, loaded_before),
        available_gb.is_some() && !loaded_before,
    ))
}

fn tokens_per_sec(token_count: u64, window_ms: f64) -> Option<f64> {
    if window_ms > 0.0 && window_ms.is_finite() {
        Some(token_count as f64 / (window_ms / 1000.0))
    } else {
        None
    }
}

#[cfg(test)]
#[path = "predictor_tests.rs"]
mod tests;
