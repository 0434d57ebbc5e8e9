// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Argument parsing for the devicefit CLI.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ArgError {
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Invalid value for {flag}: {value}")]
    InvalidValue { flag: String, value: String },

    #[error("Unknown argument: {0}")]
    UnknownArgument(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),
}

/// Flags accepted before or after any command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOptions {
    pub config_path: Option<PathBuf>,
    pub memory_gb: Option<f64>,
    pub storage_gb: Option<f64>,
    pub local: Option<bool>,
    pub json: bool,
    pub json_logs: bool,
}

/// Split global flags out of `args`, returning them and the remaining
/// command words in order.
pub fn parse_global(args: &[String]) -> Result<(GlobalOptions, Vec<String>), ArgError> {
    let mut opts = GlobalOptions::default();
    let mut rest = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                opts.config_path = Some(PathBuf::from(value_at(args, i)?));
                i += 2;
            }
            "--memory-gb" => {
                opts.memory_gb = Some(parse_value(args, i)?);
                i += 2;
            }
            "--storage-gb" => {
                opts.storage_gb = Some(parse_value(args, i)?);
                i += 2;
            }
            "--local" => {
                opts.local = Some(true);
                i += 1;
            }
            "--remote" => {
                opts.local = Some(false);
                i += 1;
            }
            "--json" => {
                opts.json = true;
                i += 1;
            }
            "--json-logs" => {
                opts.json_logs = true;
                i += 1;
            }
            _ => {
                rest.push(args[i].clone());
                i += 1;
            }
        }
    }
    Ok((opts, rest))
}

/// `record-load` arguments after the model ID.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub succeeded: bool,
    pub load_time_ms: f64,
}

pub fn parse_load_outcome(args: &[String]) -> Result<LoadOutcome, ArgError> {
    let mut succeeded = None;
    let mut load_time_ms: f64 = 0.0;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--ok" => {
                succeeded = Some(true);
                i += 1;
            }
            "--failed" => {
                succeeded = Some(false);
                i += 1;
            }
            "--time-ms" => {
                load_time_ms = parse_value(args, i)?;
                if !load_time_ms.is_finite() {
                    return Err(ArgError::InvalidValue {
                        flag: args[i].clone(),
                        value: args[i + 1].clone(),
                    });
                }
                i += 2;
            }
            other => return Err(ArgError::UnknownArgument(other.to_string())),
        }
    }
    Ok(LoadOutcome {
        succeeded: succeeded.ok_or(ArgError::MissingArgument("--ok or --failed"))?,
        load_time_ms,
    })
}

/// `record-perf` arguments after the model ID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionThroughput {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub input_ms: f64,
    pub output_ms: f64,
}

pub fn parse_session_throughput(args: &[String]) -> Result<SessionThroughput, ArgError> {
    let mut session = SessionThroughput::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input-tokens" => session.input_tokens = parse_value(args, i)?,
            "--output-tokens" => session.output_tokens = parse_value(args, i)?,
            "--input-ms" => session.input_ms = parse_value(args, i)?,
            "--output-ms" => session.output_ms = parse_value(args, i)?,
            other => return Err(ArgError::UnknownArgument(other.to_string())),
        }
        i += 2;
    }
    Ok(session)
}

fn value_at(args: &[String], i: usize) -> Result<&str, ArgError> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| ArgError::MissingValue(args[i].clone()))
}

fn parse_value<T: FromStr>(args: &[String], i: usize) -> Result<T, ArgError> {
    let raw = value_at(args, i)?;
    raw.parse().map_err(|_| ArgError::InvalidValue {
        flag: args[i].clone(),
        value: raw.to_string(),
    })
}
