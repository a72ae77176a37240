mod engine;
mod models;
mod report;
mod rules;
mod sink;

use std::io::stderr;
use std::path::PathBuf;
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::FraudPipeline;
use crate::sink::OutputLayout;

const DEFAULT_INPUT: &str = "data/sample_payments.csv";
const DEFAULT_OUTPUT_DIR: &str = "output";

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: If I was making a much more sophisticated CLI application, I would have used the clap crate
    //      to handle the CLI parsing and execution.
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        eprintln!("Usage: fraud-batch [input.csv:optional] [output_dir:optional] [log_level:optional]");
        eprintln!("Defaults: input '{DEFAULT_INPUT}', output directory '{DEFAULT_OUTPUT_DIR}'");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let input = PathBuf::from(args.get(1).map(String::as_str).unwrap_or(DEFAULT_INPUT));
    let output_dir = args.get(2).map(String::as_str).unwrap_or(DEFAULT_OUTPUT_DIR);
    let log_level = args.get(3)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let layout = OutputLayout::new(output_dir);
    let pipeline = FraudPipeline::new();

    let timer = Instant::now();
    let summary = pipeline.run(input, &layout).await?;
    let duration = timer.elapsed();

    info!("Scored batch in: {duration:?}");

    summary.print();

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The run summary goes to stdout, so logging goes to stderr to keep the two streams separate
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
