use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use tpm_crypto_kat::prelude::*;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Vector document to run
    #[clap(short, long)]
    vectors: Option<PathBuf>,

    /// Trace every command and report mismatches as warnings
    #[clap(short, long)]
    debug: bool,

    /// Write a JSON report of the run to this path
    #[clap(short, long)]
    report: Option<PathBuf>,

    /// JSON configuration file; flags given on the command line take precedence
    #[clap(short, long)]
    config: Option<PathBuf>,
}

fn load_config(args: Args) -> KatResult<HarnessConfig> {
    let base = match &args.config {
        Some(path) => HarnessConfig::from_json_file(path)?,
        None => HarnessConfig::default(),
    };
    Ok(base.merge(args.vectors, args.debug, args.report))
}

fn run(config: &HarnessConfig) -> KatResult<SuiteReport> {
    let vectors = config.vectors.as_ref().ok_or_else(|| {
        KatError::DocumentError("no vector document given, use --vectors".to_string())
    })?;

    let mut verifier = Verifier::new(SoftCoprocessor::with_debug(config.debug));
    let report = run_document(&mut verifier, vectors)?;

    if let Some(path) = &config.report {
        report.write_json(path)?;
        info!("report written to {}", path.display());
    }
    Ok(report)
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = load_config(args);

    let default_level = match &config {
        Ok(config) => config.log_level(),
        Err(_) => "info",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match config.and_then(|config| run(&config)) {
        Ok(report) => {
            info!("{} vectors passed", report.passed());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("[{}] {}", e.error_code(), e);
            ExitCode::FAILURE
        }
    }
}
