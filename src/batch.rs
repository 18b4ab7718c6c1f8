//! Directory batch processing
//!
//! Crops every PDF directly inside a directory into `cropped_<name>` next to
//! it. Files are processed in parallel; pages of one file stay sequential.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::crop::{CropError, PdfCropper, Rasterizer, Result};

/// Prefix of batch output files
pub const OUTPUT_PREFIX: &str = "cropped_";

/// Outcome of a directory batch
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Successfully written outputs
    pub ok: Vec<PathBuf>,
    /// Inputs that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.ok.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

fn is_pdf(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("pdf") | Some("PDF")
    )
}

fn is_batch_output(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(OUTPUT_PREFIX))
}

/// PDF files directly inside `dir`, sorted, excluding earlier batch outputs.
pub fn collect_pdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CropError::InputNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || !is_pdf(&path) {
            continue;
        }
        if is_batch_output(&path) {
            tracing::info!(path = %path.display(), "skipping earlier batch output");
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// Batch output path for an input file
pub fn output_path_for(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", OUTPUT_PREFIX, name))
}

/// Batch runner over one directory
pub struct BatchProcessor<'a, R: Rasterizer> {
    cropper: &'a PdfCropper<R>,
    jobs: usize,
    show_progress: bool,
}

impl<'a, R: Rasterizer> BatchProcessor<'a, R> {
    pub fn new(cropper: &'a PdfCropper<R>) -> Self {
        Self {
            cropper,
            jobs: num_cpus::get(),
            show_progress: false,
        }
    }

    /// Worker thread count (0 means one per CPU)
    #[must_use]
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        self
    }

    #[must_use]
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Crop every PDF in `dir`; individual failures do not stop the batch.
    pub fn process_directory(&self, dir: &Path) -> Result<BatchSummary> {
        let files = collect_pdf_files(dir)?;
        self.process_files(&files)
    }

    pub fn process_files(&self, files: &[PathBuf]) -> Result<BatchSummary> {
        let progress = self.progress_bar(files.len() as u64);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| CropError::InvalidArgument(e.to_string()))?;

        let outcomes: Vec<(PathBuf, std::result::Result<PathBuf, String>)> = pool.install(|| {
            files
                .par_iter()
                .map(|input| {
                    let output = output_path_for(input);
                    tracing::info!(input = %input.display(), output = %output.display(), "processing");
                    let outcome = self
                        .cropper
                        .crop_all_pages_to_single_file(input, &output)
                        .map(|_| output)
                        .map_err(|e| e.to_string());
                    if let Err(message) = &outcome {
                        tracing::warn!(input = %input.display(), error = %message, "failed");
                    }
                    progress.inc(1);
                    (input.clone(), outcome)
                })
                .collect()
        });
        progress.finish_and_clear();

        let mut summary = BatchSummary::default();
        for (input, outcome) in outcomes {
            match outcome {
                Ok(output) => summary.ok.push(output),
                Err(message) => summary.failed.push((input, message)),
            }
        }
        Ok(summary)
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }
        bar
    }
}
