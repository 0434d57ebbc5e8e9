// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Problem descriptions built from the numbers that triggered them.

use crate::history::MovingAverage;

/// Load success history, summarized for narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LoadRecord {
    pub attempts: usize,
    pub failures: usize,
    /// Window is full, so older attempts have been dropped.
    pub window_full: bool,
    pub latest_failed: bool,
}

impl LoadRecord {
    pub fn from_series(series: &MovingAverage) -> Self {
        let attempts = series.len();
        let failures = series.samples().filter(|&s| s < 0.5).count();
        Self {
            attempts,
            failures,
            window_full: attempts == series.capacity(),
            latest_failed: series.latest().is_some_and(|s| s < 0.5),
        }
    }
}

fn attempts_word(n: usize) -> &'static str {
    if n == 1 {
        "attempt"
    } else {
        "attempts"
    }
}

pub(crate) fn load_success_description(record: LoadRecord) -> String {
    let LoadRecord {
        attempts,
        failures,
        window_full,
        latest_failed,
    } = record;

    if failures == attempts {
        return if window_full {
            format!(
                "This model failed to load on each of the last {} attempts on this device. \
                 Only the most recent attempts are kept, so it may have failed even more often.",
                attempts
            )
        } else {
            format!(
                "This model has never loaded successfully on this device ({} failed {}).",
                attempts,
                attempts_word(attempts)
            )
        };
    }

    let window = if window_full {
        format!("{} of the last {} load attempts", failures, attempts)
    } else {
        format!("{} of {} load attempts so far", failures, attempts)
    };
    match (window_full, latest_failed) {
        (true, true) => format!(
            "{} on this device failed, including the most recent one. Older attempts \
             aren't tracked, so loading may be less reliable than this suggests.",
            window
        ),
        (true, false) => format!(
            "{} on this device failed, though the most recent one succeeded. Older \
             attempts aren't tracked.",
            window
        ),
        (false, true) => format!(
            "{} on this device failed, and the most recent attempt was one of them.",
            window
        ),
        (false, false) => format!(
            "{} on this device failed. The most recent attempt succeeded, so it may load fine now.",
            window
        ),
    }
}

fn rate_phrase(series: &MovingAverage) -> String {
    if series.is_empty() {
        "an undeterminable rate".to_string()
    } else {
        format!("{:.1} tokens per second", series.average())
    }
}

pub(crate) fn performance_description(input: &MovingAverage, output: &MovingAverage) -> String {
    format!(
        "Past sessions on this device read input at {} and generated output at {}, \
         which is slow enough that responses may feel sluggish.",
        rate_phrase(input),
        rate_phrase(output)
    )
}

/// Which capacity a shortfall description talks about.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Capacity {
    Memory,
    Storage,
}

impl Capacity {
    fn noun(self) -> &'static str {
        match self {
            Capacity::Memory => "memory",
            Capacity::Storage => "storage space",
        }
    }
}

pub(crate) fn shortfall_description(
    capacity: Capacity,
    required_gb: f64,
    available_gb: Option<f64>,
    loaded_before: bool,
) -> String {
    let noun = capacity.noun();
    match (available_gb, loaded_before) {
        (Some(available), false) => format!(
            "This model needs about {:.1} GB of {} but this device has only {:.1} GB. \
             Loading will probably fail.",
            required_gb, noun, available
        ),
        (Some(available), true) => format!(
            "This model needs about {:.1} GB of {} and this device has {:.1} GB. It has \
             loaded here before, so it may still work, but expect it to be slow or unstable.",
            required_gb, noun, available
        ),
        (None, false) => format!(
            "This model needs about {:.1} GB of {}, and how much this device has couldn't \
             be determined. It may not load.",
            required_gb, noun
        ),
        (None, true) => format!(
            "This model needs about {:.1} GB of {}. How much this device has couldn't be \
             determined, but the model has loaded here before.",
            required_gb, noun
        ),
    }
}

pub(crate) fn developer_mode_description(model_id: &str) -> String {
    format!(
        "The app is being served from a local development host, so {} won't be loaded \
         automatically.",
        model_id
    )
}

pub(crate) fn beta_description(model_id: &str) -> String {
    format!(
        "This app is in beta. Support for {} on this device hasn't been fully tested.",
        model_id
    )
}

pub(crate) fn hard_incompatibility_description(model_id: &str) -> String {
    format!(
        "This device doesn't provide the GPU compute API needed to run {}.",
        model_id
    )
}

#[cfg(test)]
#[path = "descriptions_tests.rs"]
mod tests;
