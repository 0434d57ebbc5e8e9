// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! End-to-end prediction scenarios through the public API.
//!
//! History recorded through one predictor must drive the problems a fresh
//! predictor reports, across both in-memory and on-disk stores.

use std::sync::Arc;

use tempfile::TempDir;

use devicefit::predict::PredictorSettings;
use devicefit::{
    has_blocking_problem, nickname, nickname_all, problems_for_display, DeviceHistoryStore,
    FileStore, MemoryStore, ModelDeviceProblemType, PredictError, ProblemPredictor, StaticProbe,
};

const QWEN_7B: &str = "Qwen2.5-7B-Instruct-q4f16_1-MLC";
const QWEN_05B: &str = "Qwen2.5-0.5B-Instruct-q4f16_1-MLC";

fn predictor(backend: Arc<MemoryStore>, probe: StaticProbe) -> ProblemPredictor {
    ProblemPredictor::with_prebuilt_catalog(
        DeviceHistoryStore::new(backend),
        Arc::new(probe),
        PredictorSettings::default(),
    )
}

fn roomy() -> StaticProbe {
    StaticProbe::new(32.0, 500.0)
}

// ============================================================================
// Prediction
// ============================================================================

#[tokio::test]
async fn test_clean_device_reports_nothing() {
    let p = predictor(Arc::new(MemoryStore::new()), roomy());
    assert_eq!(p.predict(QWEN_7B).await.unwrap(), None);
}

#[tokio::test]
async fn test_unknown_model_is_an_error() {
    let p = predictor(Arc::new(MemoryStore::new()), roomy());
    let err = p.predict("Imaginary-70B-q4f16_1-MLC").await.unwrap_err();
    assert!(matches!(err, PredictError::ModelNotFound(_)));
}

#[tokio::test]
async fn test_memory_shortfall_blocks_until_first_success() {
    let backend = Arc::new(MemoryStore::new());
    let p = predictor(backend.clone(), StaticProbe::new(2.0, 500.0));

    let problems = p.predict(QWEN_7B).await.unwrap().unwrap();
    assert_eq!(problems[0].problem_type, ModelDeviceProblemType::InsufficientVram);
    assert!(has_blocking_problem(&problems));

    p.update_load_history(QWEN_7B, true, 9000.0).await.unwrap();
    let problems = p.predict(QWEN_7B).await.unwrap().unwrap();
    assert_eq!(problems.len(), 1);
    assert!(!has_blocking_problem(&problems));
}

#[tokio::test]
async fn test_failed_loads_are_reported() {
    let p = predictor(Arc::new(MemoryStore::new()), roomy());
    p.update_load_history(QWEN_05B, false, 0.0).await.unwrap();
    p.update_load_history(QWEN_05B, true, 1500.0).await.unwrap();

    let problems = p.predict(QWEN_05B).await.unwrap().unwrap();
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].problem_type, ModelDeviceProblemType::BadLoadSuccessHistory);
    assert!(!problems[0].is_blocking);
}

#[tokio::test]
async fn test_developer_mode_hidden_next_to_other_problems() {
    let p = predictor(Arc::new(MemoryStore::new()), roomy().serving_locally(true));
    let only_dev = p.predict(QWEN_05B).await.unwrap().unwrap();
    assert_eq!(problems_for_display(&only_dev).len(), 1);

    p.update_load_history(QWEN_05B, false, 0.0).await.unwrap();
    let problems = p.predict(QWEN_05B).await.unwrap().unwrap();
    assert_eq!(problems.len(), 2);
    let shown = problems_for_display(&problems);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].problem_type, ModelDeviceProblemType::BadLoadSuccessHistory);
}

// ============================================================================
// History updates
// ============================================================================

#[tokio::test]
async fn test_zero_input_window_records_output_only() {
    let backend = Arc::new(MemoryStore::new());
    let p = predictor(backend.clone(), roomy());
    p.update_performance_history(QWEN_05B, 120, 50, 0.0, 10_000.0)
        .await
        .unwrap();

    let history = DeviceHistoryStore::new(backend).get(QWEN_05B).await;
    assert!(history.input_tokens_per_sec.is_empty());
    assert_eq!(history.output_tokens_per_sec.samples().collect::<Vec<_>>(), vec![5.0]);

    let problems = p.predict(QWEN_05B).await.unwrap().unwrap();
    assert_eq!(problems[0].problem_type, ModelDeviceProblemType::BadPerformanceHistory);
}

#[tokio::test]
async fn test_empty_session_writes_nothing() {
    let backend = Arc::new(MemoryStore::new());
    let p = predictor(backend.clone(), roomy());
    p.update_performance_history(QWEN_05B, 0, 0, 0.0, 0.0)
        .await
        .unwrap();
    assert!(backend.is_empty().await);
}

#[tokio::test]
async fn test_rejected_write_leaves_prediction_unchanged() {
    let backend = Arc::new(MemoryStore::new());
    let p = predictor(backend.clone(), roomy());
    backend.set_read_only(true);

    assert!(p.update_load_history(QWEN_05B, false, 0.0).await.is_err());
    assert_eq!(p.predict(QWEN_05B).await.unwrap(), None);
}

#[tokio::test]
async fn test_history_survives_restart_on_disk() {
    let dir = TempDir::new().unwrap();
    let open = || {
        ProblemPredictor::with_prebuilt_catalog(
            DeviceHistoryStore::new(Arc::new(FileStore::new(dir.path().to_path_buf()))),
            Arc::new(roomy()),
            PredictorSettings::default(),
        )
    };

    let first = open();
    first.update_load_history(QWEN_05B, false, 0.0).await.unwrap();
    drop(first);

    let second = open();
    let problems = second.predict(QWEN_05B).await.unwrap().unwrap();
    assert_eq!(problems[0].problem_type, ModelDeviceProblemType::BadLoadSuccessHistory);
}

// ============================================================================
// Nicknames
// ============================================================================

#[test]
fn test_nicknames_number_collisions() {
    let ids = [
        "Llama-3.2-1B-Instruct-q4f32_1-MLC",
        "Llama-3.2-1B-Instruct-q4f16_1-MLC",
        "DeepSeek-R1-Distill-Qwen-7B-q4f16_1-MLC",
    ];
    assert_eq!(
        nickname_all(&ids),
        vec!["Llama 1B", "Llama 1B #2", "Qwen < DeepSeek 7B"]
    );
    assert_eq!(
        nickname(ids[0], &["Llama 1B".to_string(), "Llama 1B #2".to_string()]),
        "Llama 1B #3"
    );
}
