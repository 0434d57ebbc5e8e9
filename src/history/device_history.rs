// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-model device history record and its JSON format.

use serde::{Deserialize, Serialize};

use super::moving_average::MovingAverage;

/// Samples kept for load success rate and load time.
pub const LOAD_HISTORY_CAPACITY: usize = 4;

/// Samples kept for input and output throughput.
pub const PERFORMANCE_HISTORY_CAPACITY: usize = 20;

/// Rolling history of one model on this device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDeviceHistory {
    /// 1 per successful load, 0 per failed load.
    pub load_success_rate: MovingAverage,
    /// Milliseconds per successful load.
    pub load_time: MovingAverage,
    pub input_tokens_per_sec: MovingAverage,
    pub output_tokens_per_sec: MovingAverage,
}

impl Default for ModelDeviceHistory {
    fn default() -> Self {
        Self {
            load_success_rate: MovingAverage::new(LOAD_HISTORY_CAPACITY),
            load_time: MovingAverage::new(LOAD_HISTORY_CAPACITY),
            input_tokens_per_sec: MovingAverage::new(PERFORMANCE_HISTORY_CAPACITY),
            output_tokens_per_sec: MovingAverage::new(PERFORMANCE_HISTORY_CAPACITY),
        }
    }
}

impl ModelDeviceHistory {
    /// True if at least one recorded load attempt succeeded.
    pub fn has_loaded_successfully(&self) -> bool {
        self.load_success_rate.samples().any(|s| s > 0.0)
    }

    fn series(&self) -> [(&'static str, &MovingAverage); 4] {
        [
            ("loadSuccessRate", &self.load_success_rate),
            ("loadTime", &self.load_time),
            ("inputTokensPerSec", &self.input_tokens_per_sec),
            ("outputTokensPerSec", &self.output_tokens_per_sec),
        ]
    }

    fn series_mut(&mut self) -> [(&'static str, &mut MovingAverage); 4] {
        [
            ("loadSuccessRate", &mut self.load_success_rate),
            ("loadTime", &mut self.load_time),
            ("inputTokensPerSec", &mut self.input_tokens_per_sec),
            ("outputTokensPerSec", &mut self.output_tokens_per_sec),
        ]
    }
}

/// Why a persisted history record was rejected.
#[derive(Debug, thiserror::Error)]
pub enum HistoryFormatError {
    #[error("Malformed history JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Series '{0}' has zero capacity")]
    ZeroCapacity(&'static str),

    #[error("Series '{0}' holds a non-finite sample")]
    NonFinite(&'static str),

    #[error("Series '{field}' holds {len} samples but capacity is {max}")]
    OverCapacity {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

/// Parse and validate a persisted history record.
///
/// Stored averages are not trusted; each is recomputed from its series.
pub fn decode_history(text: &str) -> Result<ModelDeviceHistory, HistoryFormatError> {
    let mut history: ModelDeviceHistory = serde_json::from_str(text)?;
    for (field, series) in history.series_mut() {
        series.validate(field)?;
        series.recompute_average();
    }
    Ok(history)
}

/// Serialize a history record.
///
/// JSON has no encoding for NaN or infinity, so a series holding one is
/// rejected rather than written as `null`.
pub fn encode_history(history: &ModelDeviceHistory) -> Result<String, HistoryFormatError> {
    for (field, series) in history.series() {
        if series.samples().any(|s| !s.is_finite()) {
            return Err(HistoryFormatError::NonFinite(field));
        }
    }
    Ok(serde_json::to_string(history)?)
}
