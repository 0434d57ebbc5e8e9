// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tests for the device history store.

use std::sync::Arc;

use super::*;
use crate::history::{LOAD_HISTORY_CAPACITY, PERFORMANCE_HISTORY_CAPACITY};
use crate::storage::{KeyValueStore, MemoryStore};

fn setup() -> (Arc<MemoryStore>, DeviceHistoryStore) {
    let backend = Arc::new(MemoryStore::new());
    let store = DeviceHistoryStore::new(backend.clone());
    (backend, store)
}

#[tokio::test]
async fn test_get_missing_returns_default() {
    let (_, store) = setup();
    let history = store.get("Phi-3.5-mini-instruct-q4f16_1-MLC").await;
    assert_eq!(history, ModelDeviceHistory::default());
    assert_eq!(history.load_success_rate.capacity(), LOAD_HISTORY_CAPACITY);
    assert_eq!(history.load_time.capacity(), LOAD_HISTORY_CAPACITY);
    assert_eq!(history.input_tokens_per_sec.capacity(), PERFORMANCE_HISTORY_CAPACITY);
    assert_eq!(history.output_tokens_per_sec.capacity(), PERFORMANCE_HISTORY_CAPACITY);
}

#[tokio::test]
async fn test_set_then_get_round_trip() {
    let (_, store) = setup();
    let mut history = ModelDeviceHistory::default();
    history.load_success_rate.update(1.0);
    history.load_success_rate.update(0.0);
    history.load_time.update(5300.0);
    history.output_tokens_per_sec.update(21.5);

    store.set("m", &history).await.unwrap();
    assert_eq!(store.get("m").await, history);
}

#[tokio::test]
async fn test_corrupt_json_falls_back_to_default() {
    let (backend, store) = setup();
    backend.set_text("models/m", "{not json").await.unwrap();
    assert_eq!(store.get("m").await, ModelDeviceHistory::default());
}

#[tokio::test]
async fn test_wrong_shape_falls_back_to_default() {
    let (backend, store) = setup();
    backend
        .set_text("models/m", r#"{"loadSuccessRate":{"series":[1],"seriesMax":4,"lastAverage":1}}"#)
        .await
        .unwrap();
    assert_eq!(store.get("m").await, ModelDeviceHistory::default());
}

#[tokio::test]
async fn test_over_capacity_series_falls_back_to_default() {
    let (backend, store) = setup();
    let series = r#"{"series":[1,1,1,1,1],"seriesMax":4,"lastAverage":1}"#;
    let empty = r#"{"series":[],"seriesMax":20,"lastAverage":0}"#;
    let record = format!(
        r#"{{"loadSuccessRate":{series},"loadTime":{empty},"inputTokensPerSec":{empty},"outputTokensPerSec":{empty}}}"#
    );
    backend.set_text("models/m", &record).await.unwrap();
    assert_eq!(store.get("m").await, ModelDeviceHistory::default());
}

#[tokio::test]
async fn test_write_failure_propagates() {
    let (backend, store) = setup();
    backend.set_read_only(true);
    let result = store.set("m", &ModelDeviceHistory::default()).await;
    assert!(matches!(result, Err(HistoryError::Write { ref model_id, .. }) if model_id == "m"));
}

#[test]
fn test_key_for_model() {
    assert_eq!(DeviceHistoryStore::key_for("abc"), "models/abc");
}

#[tokio::test]
async fn test_stale_stored_average_is_recomputed() {
    let (backend, store) = setup();
    let drifted = r#"{"series":[0,0],"seriesMax":4,"lastAverage":1}"#;
    let empty = r#"{"series":[],"seriesMax":20,"lastAverage":7}"#;
    let record = format!(
        r#"{{"loadSuccessRate":{drifted},"loadTime":{{"series":[],"seriesMax":4,"lastAverage":0}},"inputTokensPerSec":{empty},"outputTokensPerSec":{empty}}}"#
    );
    backend.set_text("models/m", &record).await.unwrap();

    let history = store.get("m").await;
    assert_eq!(history.load_success_rate.len(), 2);
    assert_eq!(history.load_success_rate.average(), 0.0);
    assert_eq!(history.input_tokens_per_sec.average(), 0.0);
}

#[tokio::test]
async fn test_non_finite_sample_is_not_persisted() {
    let (backend, store) = setup();
    let mut good = ModelDeviceHistory::default();
    good.load_success_rate.update(0.0);
    store.set("m", &good).await.unwrap();

    let mut bad = good.clone();
    bad.load_time.update(f64::NAN);
    let result = store.set("m", &bad).await;
    assert!(matches!(
        result,
        Err(HistoryError::Encode {
            source: HistoryFormatError::NonFinite("loadTime"),
            ..
        })
    ));
    assert_eq!(store.get("m").await, good);
    assert_eq!(backend.len().await, 1);
}
