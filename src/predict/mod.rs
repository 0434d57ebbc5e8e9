// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Model device problem prediction.
//!
//! - `problem_types`: problem enum, problem record, display filtering
//! - `descriptions`: text generated from the triggering data
//! - `cache`: resolved model info keyed by model ID
//! - `predictor`: rule evaluation and history updates

pub mod cache;
mod descriptions;
pub mod predictor;
pub mod problem_types;

pub use cache::{ModelInfo, ModelInfoCache};
pub use predictor::{PredictError, PredictorSettings, ProblemPredictor};
pub use problem_types::{
    has_blocking_problem, problems_for_display, ModelDeviceProblem, ModelDeviceProblemType,
};
