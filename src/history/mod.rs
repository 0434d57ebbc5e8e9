// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Rolling performance and reliability history per model on this device.

pub mod device_history;
pub mod moving_average;
pub mod store;

pub use device_history::{
    decode_history, encode_history, HistoryFormatError, ModelDeviceHistory,
    LOAD_HISTORY_CAPACITY, PERFORMANCE_HISTORY_CAPACITY,
};
pub use moving_average::MovingAverage;
pub use store::{DeviceHistoryStore, HistoryError};
