// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! devicefit - model device fitness prediction.
//!
//! Combines per-model, per-device history (load success, load time, token
//! throughput) with live device capability probes to predict whether loading
//! a locally-run LLM is likely to fail or perform poorly.
//!
//! Modules, leaf-first:
//! - `history`: moving averages and the persisted device history
//! - `storage`: key-value backends the history is persisted through
//! - `models`: prebuilt model catalog and display nicknames
//! - `device`: memory, storage, and environment probes
//! - `predict`: the problem predictor

pub mod cli;
pub mod config;
pub mod device;
pub mod history;
pub mod models;
pub mod predict;
pub mod storage;

pub use config::{ConfigError, FitConfig};
pub use device::{DeviceProbe, NativeProbe, StaticProbe};
pub use history::{DeviceHistoryStore, ModelDeviceHistory, MovingAverage};
pub use models::{nickname, nickname_all, CatalogLookup, ModelCatalog};
pub use predict::{
    has_blocking_problem, problems_for_display, ModelDeviceProblem, ModelDeviceProblemType,
    PredictError, ProblemPredictor,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
