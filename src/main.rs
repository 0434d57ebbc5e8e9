// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! devicefit CLI entry point.

mod cli_parser;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use devicefit::cli::commands;
use devicefit::cli::{parse_global, CliContext, GlobalOptions, EXIT_CONFIG};
use devicefit::FitConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (opts, rest) = match parse_global(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            cli_parser::print_usage();
            return ExitCode::FAILURE;
        }
    };
    init_tracing(opts.json_logs);

    let command = rest.first().map(|s| s.as_str()).unwrap_or("help");
    let rest = rest.get(1..).unwrap_or_default();

    match command {
        "help" | "--help" | "-h" => {
            match rest.first() {
                Some(sub) => cli_parser::print_command_help(sub),
                None => cli_parser::print_usage(),
            }
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("devicefit {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        "nickname" => exit(commands::run_nickname(rest)),
        "models" => exit(commands::run_models(rest, opts.json)),
        "config" => {
            let sub = rest.first().map(|s| s.as_str()).unwrap_or("show");
            exit(commands::run_config(FitConfig::load(opts.config_path.as_deref()), sub))
        }
        "predict" | "record-load" | "record-perf" | "history" => {
            let Some(ctx) = context(&opts) else {
                return exit(EXIT_CONFIG);
            };
            let code = match command {
                "predict" => commands::run_predict(&ctx, rest).await,
                "record-load" => commands::run_record_load(&ctx, rest).await,
                "record-perf" => commands::run_record_perf(&ctx, rest).await,
                _ => commands::run_history(&ctx, rest).await,
            };
            exit(code)
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            cli_parser::print_usage();
            ExitCode::FAILURE
        }
    }
}

fn context(opts: &GlobalOptions) -> Option<CliContext> {
    match FitConfig::load(opts.config_path.as_deref()) {
        Ok(config) => {
            tracing::debug!(data_dir = %config.data_dir.display(), "configuration loaded");
            Some(CliContext::new(config, opts))
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            None
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn exit(code: i32) -> ExitCode {
    ExitCode::from(code as u8)
}
