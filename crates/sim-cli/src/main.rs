//! Coordinator binary entry point (§6): parse the CLI, compose the
//! effective configuration (or resume one from a checkpoint), validate
//! it, run the simulation to completion, and emit whichever of
//! `--export-metrics` / `--checkpoint` were requested.
//!
//! Exit codes: 0 success, 1 configuration/validation failure, 2 runtime
//! failure (I/O, checkpoint decode) (§7).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use sim_cli::{compose, Cli, Coordinator};

enum Failure {
    Validation(String),
    Runtime(String),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure::Validation(msg)) => {
            eprintln!("configuration error: {msg}");
            ExitCode::from(1)
        }
        Err(Failure::Runtime(msg)) => {
            eprintln!("runtime error: {msg}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<(), Failure> {
    init_tracing(cli.debug);

    let mut coordinator = if let Some(resume_path) = &cli.resume {
        Coordinator::resume_from(Path::new(resume_path)).map_err(|e| Failure::Runtime(e.to_string()))?
    } else {
        let config = compose(&cli).map_err(|e| Failure::Validation(e.to_string()))?;
        config.validate().map_err(|e| Failure::Validation(e.to_string()))?;
        Coordinator::new(config)
    };

    if let Some(path) = &cli.checkpoint {
        coordinator.set_checkpoint_path(Some(PathBuf::from(path)));
    }

    coordinator.run();

    if let Some(path) = &cli.export_metrics {
        let chain_label = cli
            .chain
            .map(|preset| format!("{preset:?}").to_lowercase())
            .unwrap_or_else(|| "custom".to_string());
        let export = coordinator.metrics_export(&chain_label);
        let json = serde_json::to_string_pretty(&export).map_err(|e| Failure::Runtime(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| Failure::Runtime(e.to_string()))?;
    }

    if let Some(path) = &cli.checkpoint {
        coordinator
            .checkpoint_now(Path::new(path))
            .map_err(|e| Failure::Runtime(e.to_string()))?;
    }

    Ok(())
}

fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
