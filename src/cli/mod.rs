// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Operator CLI: argument parsing, commands, and output formatting.

pub mod args;
pub mod commands;
pub mod format;

pub use args::{parse_global, ArgError, GlobalOptions};
pub use commands::{CliContext, EXIT_CONFIG, EXIT_FAILURE, EXIT_OK};
