//! Command-line arguments and pipeline parameter resolution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use skidbladnir_core::{FramePipeline, PipelineParams};
use skidbladnir_io::DEFAULT_STACK_FILE_NAME;

/// Environment variable naming a JSON parameter file, used when `--params` is absent.
pub const PARAMS_ENV: &str = "SKIDBLADNIR_PARAMS";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON file overriding the pipeline parameters.
    #[arg(long, global = true)]
    pub params: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enhance each frame and save it next to the others in OUT_DIR.
    Process {
        /// Light frames to enhance.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory for `<name>_processed.png` outputs.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Enhance every frame, average them, refine the result, and save it.
    Stack {
        /// Pre-aligned light frames of identical size.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file; the container follows the extension (png, jpg, tif).
        #[arg(short, long, default_value = DEFAULT_STACK_FILE_NAME)]
        output: PathBuf,
    },
    /// Print the active parameters as JSON, usable as a template for `--params`.
    Params,
}

impl Args {
    /// `--params` if given, else the file named by `SKIDBLADNIR_PARAMS`, else defaults.
    pub fn pipeline(&self) -> skidbladnir_core::Result<FramePipeline> {
        let path = self
            .params
            .clone()
            .or_else(|| std::env::var_os(PARAMS_ENV).map(PathBuf::from));

        match path {
            Some(path) => {
                tracing::info!("Using pipeline parameters from {}", path.display());
                FramePipeline::new(PipelineParams::from_json_file(&path)?)
            }
            None => Ok(FramePipeline::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_defaults_output_name() {
        let args = Args::try_parse_from(["skidbladnir", "stack", "a.png", "b.png"]).unwrap();
        match args.command {
            Command::Stack { files, output } => {
                assert_eq!(files.len(), 2);
                assert_eq!(output, PathBuf::from("StackedResult.tif"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_stack_requires_files() {
        assert!(Args::try_parse_from(["skidbladnir", "stack"]).is_err());
    }

    #[test]
    fn test_params_flag_is_global() {
        let args = Args::try_parse_from(["skidbladnir", "process", "a.png", "--params", "p.json"])
            .unwrap();
        assert_eq!(args.params, Some(PathBuf::from("p.json")));
    }

    #[test]
    fn test_explicit_params_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        let json = r#"{ "refine": { "gamma": 1.1, "saturation": 1.0, "reduce_noise": false } }"#;
        std::fs::write(&path, json).unwrap();

        let args = Args {
            params: Some(path),
            command: Command::Params,
        };
        assert_eq!(args.pipeline().unwrap().params().refine.gamma, 1.1);
    }
}
