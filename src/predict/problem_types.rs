// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Problem types produced by the predictor.

use serde::{Deserialize, Serialize};

/// Kind of problem loading a model on this device may run into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelDeviceProblemType {
    InsufficientVram,
    InsufficientStorage,
    BadLoadSuccessHistory,
    BadPerformanceHistory,
    DeveloperMode,
    Beta,
    /// Missing platform capability, e.g. no GPU compute API.
    HardIncompatibility,
}

impl ModelDeviceProblemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsufficientVram => "insufficient_vram",
            Self::InsufficientStorage => "insufficient_storage",
            Self::BadLoadSuccessHistory => "bad_load_success_history",
            Self::BadPerformanceHistory => "bad_performance_history",
            Self::DeveloperMode => "developer_mode",
            Self::Beta => "beta",
            Self::HardIncompatibility => "hard_incompatibility",
        }
    }
}

impl std::fmt::Display for ModelDeviceProblemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A predicted problem with a description of what triggered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDeviceProblem {
    #[serde(rename = "type")]
    pub problem_type: ModelDeviceProblemType,
    pub description: String,
    /// Loading should not proceed without an explicit override.
    pub is_blocking: bool,
}

impl ModelDeviceProblem {
    pub fn new(problem_type: ModelDeviceProblemType, description: String, is_blocking: bool) -> Self {
        Self {
            problem_type,
            description,
            is_blocking,
        }
    }
}

/// True if any problem should stop loading.
pub fn has_blocking_problem(problems: &[ModelDeviceProblem]) -> bool {
    problems.iter().any(|p| p.is_blocking)
}

/// Problems to show the user.
///
/// Developer mode is reported on its own; next to any other problem it is
/// dropped.
pub fn problems_for_display(problems: &[ModelDeviceProblem]) -> Vec<ModelDeviceProblem> {
    let has_other = problems
        .iter()
        .any(|p| p.problem_type != ModelDeviceProblemType::DeveloperMode);
    problems
        .iter()
        .filter(|p| !has_other || p.problem_type != ModelDeviceProblemType::DeveloperMode)
        .cloned()
        .collect()
}
