// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Help text for the devicefit CLI.

/// Print general usage information.
pub fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "devicefit - model device fitness v{}

USAGE:
    devicefit [COMMAND] [OPTIONS]

COMMANDS:
    predict      Predict problems loading a model on this device
    nickname     Print short display names for model IDs
    record-load  Record the outcome of a model load attempt
    record-perf  Record token throughput from an inference session
    history      Show recorded history for a model
    models       List models in the bundled registry
    config       Manage configuration (show, defaults, validate)
    version      Show version information
    help         Show this help message

OPTIONS:
    --config FILE      Load configuration from FILE (default: ./devicefit.toml)
    --memory-gb N      Override detected system memory
    --storage-gb N     Override detected free storage
    --local            Treat the app as served locally (developer mode)
    --remote           Treat the app as served remotely
    --json             JSON output
    --json-logs        JSON log lines on stderr

EXAMPLES:
    devicefit predict Llama-3.1-8B-Instruct-q4f32_1-MLC-1k
    devicefit predict Phi-3.5-mini-instruct-q4f16_1-MLC --memory-gb 4 --json
    devicefit nickname Llama-3.2-1B-Instruct-q4f16_1-MLC Llama-3.2-1B-Instruct-q4f32_1-MLC
    devicefit record-load Qwen2.5-0.5B-Instruct-q4f16_1-MLC --ok --time-ms 1800
    devicefit models --filter deepseek

ENVIRONMENT:
    DEVICEFIT_DATA_DIR   History directory
    DEVICEFIT_ORIGIN     URL the app is served from
    DEVICEFIT_BETA       Report a beta notice (true/false)
    RUST_LOG             Log level (debug, info, warn, error)

EXIT CODES:
    0  Success / no problems expected
    1  Failure / problems predicted
    2  Configuration error
",
        version
    );
}

/// Print detailed help for a specific command.
pub fn print_command_help(command: &str) {
    match command {
        "predict" => print_predict_help(),
        "record-load" => print_record_load_help(),
        "record-perf" => print_record_perf_help(),
        "config" => print_config_help(),
        _ => {
            eprintln!(
                "No detailed help available for '{}'. Use 'devicefit help' for general usage.",
                command
            );
        }
    }
}

fn print_predict_help() {
    eprintln!(
        "devicefit predict - Predict model device problems

USAGE:
    devicefit predict <MODEL> [--memory-gb N] [--storage-gb N] [--local] [--json]

DESCRIPTION:
    Combines the model's memory requirement, its load and throughput history
    on this device, and live memory/storage readings into a list of likely
    problems. Blocking problems are marked.

EXIT CODES:
    0  No problems expected
    1  Problems predicted, or the model is unknown
"
    );
}

fn print_record_load_help() {
    eprintln!(
        "devicefit record-load - Record a load attempt

USAGE:
    devicefit record-load <MODEL> --ok|--failed [--time-ms N]

DESCRIPTION:
    Appends to the model's load success history. Load time is recorded
    only for successful loads.
"
    );
}

fn print_record_perf_help() {
    eprintln!(
        "devicefit record-perf - Record session throughput

USAGE:
    devicefit record-perf <MODEL> --input-tokens N --output-tokens N
                                  --input-ms N --output-ms N

DESCRIPTION:
    Appends tokens-per-second samples. A direction with a zero window
    is skipped.
"
    );
}

fn print_config_help() {
    eprintln!(
        "devicefit config - Manage configuration

USAGE:
    devicefit config show       Print the effective configuration
    devicefit config defaults   Print the built-in defaults
    devicefit config validate   Exit 2 if the configuration is invalid
"
    );
}
