// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tests for CLI output formatting.

use super::*;

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("this is a very long string", 10), "this is...");
}

#[test]
fn test_format_no_problems() {
    assert_eq!(
        format_problems("Llama 8B", None),
        "Llama 8B: no problems expected on this device\n"
    );
}

#[test]
fn test_format_problems_marks_blocking() {
    let problems = vec![
        ModelDeviceProblem::new(ModelDeviceProblemType::InsufficientVram, "needs more".into(), true),
        ModelDeviceProblem::new(ModelDeviceProblemType::DeveloperMode, "local".into(), false),
    ];
    let out = format_problems("Llama 8B", Some(problems.as_slice()));
    assert!(out.starts_with("Llama 8B: 2 potential problem(s)\n"));
    assert!(out.contains("[mem]  needs more (blocking)\n"));
    assert!(out.contains("[dev]  local\n"));
}

#[test]
fn test_format_history_empty_and_filled() {
    let mut history = ModelDeviceHistory::default();
    history.load_time.update(4000.0);
    let out = format_history("m", &history);
    assert!(out.contains("Load success rate      no samples"));
    assert!(out.contains("(1/4 samples)"));
}

#[test]
fn test_format_model_row_unknown_memory() {
    let record = ModelRecord {
        model_id: "embed".to_string(),
        vram_required_mb: None,
        low_resource_required: false,
        required_features: Vec::new(),
    };
    assert!(format_model_row(&record, "Embed").ends_with("unknown"));
}
