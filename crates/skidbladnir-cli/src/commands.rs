//! The `process` and `stack` actions.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use skidbladnir_core::{FramePipeline, PixelGrid, process_batch, stack_and_refine};
use skidbladnir_io::{FrameIoError, OutputFormat, load_frame, save_frame};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Frame(#[from] FrameIoError),
    #[error(transparent)]
    Pipeline(#[from] skidbladnir_core::Error),
    #[error("cannot create {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Load every file, stopping at the first one that fails.
fn load_all(files: &[PathBuf]) -> Result<Vec<PixelGrid>, CommandError> {
    files
        .iter()
        .map(|path| load_frame(path).map_err(CommandError::from))
        .collect()
}

/// Enhance each frame and write `<stem>_processed.png` into `out_dir`.
///
/// Inputs sharing a stem get an index suffix so no output overwrites another.
pub fn process(
    pipeline: &FramePipeline,
    files: &[PathBuf],
    out_dir: &Path,
) -> Result<Vec<PathBuf>, CommandError> {
    let mut frames = load_all(files)?;
    process_batch(pipeline, &mut frames);

    std::fs::create_dir_all(out_dir).map_err(|source| CommandError::OutputDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(frames.len());
    for (name, frame) in output_names(files).into_iter().zip(&frames) {
        let path = out_dir.join(name);
        save_frame(frame, &path)?;
        written.push(path);
    }
    Ok(written)
}

/// Enhance every frame, average, refine, and save to `output`.
pub fn stack(
    pipeline: &FramePipeline,
    files: &[PathBuf],
    output: &Path,
) -> Result<PixelGrid, CommandError> {
    OutputFormat::from_path(output)?;

    let start = Instant::now();
    let mut frames = load_all(files)?;
    process_batch(pipeline, &mut frames);

    let composite = stack_and_refine(pipeline, &frames)?;
    save_frame(&composite, output)?;
    tracing::info!(
        "Stacked {} frame(s) into {} in {:.2} s",
        frames.len(),
        output.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(composite)
}

fn processed_file_name(stem: &str) -> String {
    format!("{stem}_processed.{}", OutputFormat::Png.extension())
}

/// One output file name per input, unique even on case-insensitive filesystems.
fn output_names(files: &[PathBuf]) -> Vec<String> {
    let mut used = HashSet::new();
    files
        .iter()
        .enumerate()
        .map(|(index, source)| {
            let stem = source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "frame".to_string());
            let mut name = processed_file_name(&stem);
            let mut suffix = index;
            while !used.insert(name.to_lowercase()) {
                name = processed_file_name(&format!("{stem}_{suffix}"));
                suffix += 1;
            }
            name
        })
        .collect()
}
