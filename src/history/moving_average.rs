// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fixed-capacity rolling sample buffer with a maintained mean.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::device_history::HistoryFormatError;

/// Bounded FIFO of samples, oldest first.
///
/// `last_average` is recomputed from `series` on every [`update`](Self::update).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingAverage {
    series: VecDeque<f64>,
    series_max: usize,
    last_average: f64,
}

impl MovingAverage {
    /// Create an empty series holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        let series_max = if capacity == 0 {
            tracing::warn!("moving average capacity 0 requested, using 1");
            1
        } else {
            capacity
        };
        Self {
            series: VecDeque::with_capacity(series_max),
            series_max,
            last_average: 0.0,
        }
    }

    /// Append a sample, evict the oldest while over capacity, recompute the mean.
    pub fn update(&mut self, sample: f64) {
        self.series.push_back(sample);
        while self.series.len() > self.series_max {
            self.series.pop_front();
        }
        self.recompute_average();
    }

    /// Set `last_average` to the mean of `series`, 0 when empty.
    pub(crate) fn recompute_average(&mut self) {
        self.last_average = if self.series.is_empty() {
            0.0
        } else {
            self.series.iter().sum::<f64>() / self.series.len() as f64
        };
    }

    pub fn average(&self) -> f64 {
        self.last_average
    }

    pub fn capacity(&self) -> usize {
        self.series_max
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<f64> {
        self.series.back().copied()
    }

    /// Samples, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.series.iter().copied()
    }

    /// Check a deserialized series for shape problems serde can't express.
    pub(crate) fn validate(&self, field: &'static str) -> Result<(), HistoryFormatError> {
        if self.series_max == 0 {
            return Err(HistoryFormatError::ZeroCapacity(field));
        }
        if self.series.len() > self.series_max {
            return Err(HistoryFormatError::OverCapacity {
                field,
                len: self.series.len(),
                max: self.series_max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "moving_average_tests.rs"]
mod tests;
