//! Skidbladnir — enhance astrophotography light frames and stack them.
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

mod commands;
mod config;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::{Args, Command};

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let pipeline = match args.pipeline() {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("Invalid pipeline parameters: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match &args.command {
        Command::Process { files, out_dir } => {
            commands::process(&pipeline, files, out_dir).map(|written| {
                tracing::info!("Processed {} frame(s) into {}", written.len(), out_dir.display());
            })
        }
        Command::Stack { files, output } => commands::stack(&pipeline, files, output).map(|_| ()),
        Command::Params => match pipeline.params().to_json_string() {
            Ok(json) => {
                println!("{json}");
                Ok(())
            }
            Err(e) => Err(e.into()),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
