// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Human-readable output for CLI commands.

use crate::history::{ModelDeviceHistory, MovingAverage};
use crate::models::ModelRecord;
use crate::predict::{ModelDeviceProblem, ModelDeviceProblemType};

pub fn problem_icon(problem_type: ModelDeviceProblemType) -> &'static str {
    match problem_type {
        ModelDeviceProblemType::InsufficientVram => "[mem]",
        ModelDeviceProblemType::InsufficientStorage => "[disk]",
        ModelDeviceProblemType::BadLoadSuccessHistory => "[load]",
        ModelDeviceProblemType::BadPerformanceHistory => "[slow]",
        ModelDeviceProblemType::DeveloperMode => "[dev]",
        ModelDeviceProblemType::Beta => "[beta]",
        ModelDeviceProblemType::HardIncompatibility => "[X]",
    }
}

pub fn format_problems(nickname: &str, problems: Option<&[ModelDeviceProblem]>) -> String {
    let Some(problems) = problems else {
        return format!("{}: no problems expected on this device\n", nickname);
    };
    let mut out = format!("{}: {} potential problem(s)\n", nickname, problems.len());
    for problem in problems {
        let blocking = if problem.is_blocking { " (blocking)" } else { "" };
        out.push_str(&format!(
            "  {:6} {}{}\n",
            problem_icon(problem.problem_type),
            problem.description,
            blocking
        ));
    }
    out
}

fn format_series(name: &str, series: &MovingAverage, unit: &str) -> String {
    if series.is_empty() {
        return format!("  {:22} no samples\n", name);
    }
    format!(
        "  {:22} avg {:>9.1} {:8} ({}/{} samples)\n",
        name,
        series.average(),
        unit,
        series.len(),
        series.capacity()
    )
}

pub fn format_history(model_id: &str, history: &ModelDeviceHistory) -> String {
    let mut out = format!("Device history for {}\n", model_id);
    out.push_str(&format_series("Load success rate", &history.load_success_rate, ""));
    out.push_str(&format_series("Load time", &history.load_time, "ms"));
    out.push_str(&format_series("Input throughput", &history.input_tokens_per_sec, "tok/s"));
    out.push_str(&format_series("Output throughput", &history.output_tokens_per_sec, "tok/s"));
    out
}

pub fn format_model_row(record: &ModelRecord, nickname: &str) -> String {
    let memory = match record.vram_required_mb {
        Some(mb) => format!("{:.1} GB", mb / 1024.0),
        None => "unknown".to_string(),
    };
    format!("  {:48} {:24} {:>9}", truncate(&record.model_id, 48), truncate(nickname, 24), memory)
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
