// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Command implementations. Each returns a process exit code.

use std::sync::Arc;

use serde::Serialize;

use super::args::{parse_load_outcome, parse_session_throughput, ArgError, GlobalOptions};
use super::format::{format_history, format_model_row, format_problems};
use crate::config::FitConfig;
use crate::device::{DeviceProbe, NativeProbe, OverrideProbe};
use crate::history::DeviceHistoryStore;
use crate::models::{nickname, nickname_all, ModelCatalog};
use crate::predict::{ModelDeviceProblem, ProblemPredictor};
use crate::storage::FileStore;

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;

/// Configuration and services shared by commands.
pub struct CliContext {
    pub config: FitConfig,
    pub store: DeviceHistoryStore,
    pub predictor: ProblemPredictor,
    pub json: bool,
}

impl CliContext {
    pub fn new(config: FitConfig, opts: &GlobalOptions) -> Self {
        let store = DeviceHistoryStore::new(Arc::new(FileStore::new(config.data_dir.clone())));
        let native = Arc::new(NativeProbe::new(
            config.data_dir.clone(),
            config.origin.clone(),
            config.gpu_api_available,
        ));
        let mut probe = OverrideProbe::new(native);
        probe.system_memory_gb = opts.memory_gb;
        probe.available_storage_gb = opts.storage_gb;
        probe.serving_locally = opts.local;
        let probe: Arc<dyn DeviceProbe> = Arc::new(probe);

        let predictor = ProblemPredictor::with_prebuilt_catalog(
            store.clone(),
            probe,
            config.predictor_settings(),
        );
        Self {
            config,
            store,
            predictor,
            json: opts.json,
        }
    }
}

#[derive(Serialize)]
struct PredictionReport<'a> {
    model_id: &'a str,
    nickname: String,
    problems: Option<&'a [ModelDeviceProblem]>,
    blocking: bool,
}

/// `predict <model>`: exit 0 when no problems are expected, 1 otherwise.
pub async fn run_predict(ctx: &CliContext, args: &[String]) -> i32 {
    let Some(model_id) = args.first() else {
        eprintln!("{}", ArgError::MissingArgument("<MODEL>"));
        return EXIT_FAILURE;
    };

    let problems = match ctx.predictor.predict(model_id).await {
        Ok(problems) => problems,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_FAILURE;
        }
    };
    let name = nickname(model_id, &[]);

    if ctx.json {
        let report = PredictionReport {
            model_id,
            nickname: name,
            problems: problems.as_deref(),
            blocking: problems
                .as_deref()
                .is_some_and(crate::predict::has_blocking_problem),
        };
        if !print_json(&report) {
            return EXIT_FAILURE;
        }
    } else {
        print!("{}", format_problems(&name, problems.as_deref()));
    }

    if problems.is_some() {
        EXIT_FAILURE
    } else {
        EXIT_OK
    }
}

/// `nickname <model>...`: one nickname per line, numbered across the batch.
pub fn run_nickname(args: &[String]) -> i32 {
    if args.is_empty() {
        eprintln!("{}", ArgError::MissingArgument("<MODEL>..."));
        return EXIT_FAILURE;
    }
    for (id, name) in args.iter().zip(nickname_all(args)) {
        println!("{}\t{}", name, id);
    }
    EXIT_OK
}

/// `record-load <model> --ok|--failed [--time-ms N]`
pub async fn run_record_load(ctx: &CliContext, args: &[String]) -> i32 {
    let Some((model_id, rest)) = args.split_first() else {
        eprintln!("{}", ArgError::MissingArgument("<MODEL>"));
        return EXIT_FAILURE;
    };
    let outcome = match parse_load_outcome(rest) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{}", e);
            return EXIT_FAILURE;
        }
    };
    match ctx
        .predictor
        .update_load_history(model_id, outcome.succeeded, outcome.load_time_ms)
        .await
    {
        Ok(()) => EXIT_OK,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_FAILURE
        }
    }
}

/// `record-perf <model> --input-tokens N --output-tokens N --input-ms N --output-ms N`
pub async fn run_record_perf(ctx: &CliContext, args: &[String]) -> i32 {
    let Some((model_id, rest)) = args.split_first() else {
        eprintln!("{}", ArgError::MissingArgument("<MODEL>"));
        return EXIT_FAILURE;
    };
    let session = match parse_session_throughput(rest) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", e);
            return EXIT_FAILURE;
        }
    };
    match ctx
        .predictor
        .update_performance_history(
            model_id,
            session.input_tokens,
            session.output_tokens,
            session.input_ms,
            session.output_ms,
        )
        .await
    {
        Ok(()) => EXIT_OK,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_FAILURE
        }
    }
}

/// `history <model>`
pub async fn run_history(ctx: &CliContext, args: &[String]) -> i32 {
    let Some(model_id) = args.first() else {
        eprintln!("{}", ArgError::MissingArgument("<MODEL>"));
        return EXIT_FAILURE;
    };
    let history = ctx.store.get(model_id).await;
    if ctx.json {
        if !print_json(&history) {
            return EXIT_FAILURE;
        }
    } else {
        print!("{}", format_history(model_id, &history));
    }
    EXIT_OK
}

/// `models [--filter TEXT]`
pub fn run_models(args: &[String], json: bool) -> i32 {
    let catalog = ModelCatalog::prebuilt();
    let records = match args {
        [] => catalog.records().iter().collect::<Vec<_>>(),
        [flag, query] if flag == "--filter" => catalog.find(query),
        [other, ..] => {
            eprintln!("{}", ArgError::UnknownArgument(other.clone()));
            return EXIT_FAILURE;
        }
    };

    if json {
        return if print_json(&records) { EXIT_OK } else { EXIT_FAILURE };
    }
    let ids: Vec<&str> = records.iter().map(|r| r.model_id.as_str()).collect();
    let names = nickname_all(ids.as_slice());
    println!("Models ({})", records.len());
    for (record, name) in records.iter().zip(names) {
        println!("{}", format_model_row(record, &name));
    }
    EXIT_OK
}

/// `config show|defaults|validate`
pub fn run_config(config: Result<FitConfig, crate::config::ConfigError>, sub: &str) -> i32 {
    match sub {
        "defaults" => print_toml(&FitConfig::default()),
        "show" => match config {
            Ok(config) => print_toml(&config),
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                EXIT_CONFIG
            }
        },
        "validate" => match config {
            Ok(_) => {
                println!("Configuration is valid");
                EXIT_OK
            }
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                EXIT_CONFIG
            }
        },
        other => {
            eprintln!("Unknown config subcommand: {}", other);
            EXIT_FAILURE
        }
    }
}

fn print_toml(config: &FitConfig) -> i32 {
    match config.to_toml() {
        Ok(text) => {
            print!("{}", text);
            EXIT_OK
        }
        Err(e) => {
            eprintln!("Failed to render configuration: {}", e);
            EXIT_FAILURE
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            false
        }
    }
}
