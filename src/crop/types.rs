//! Crop module core types
//!
//! Options, per-page requests and results shared by the cropping API.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::geometry::PageRect;
use crate::detect::{CropStrategy, SearchParams, DEFAULT_STEP, DEFAULT_THRESHOLD};

// ============================================================
// Constants
// ============================================================

/// Default rasterization resolution
pub const DEFAULT_DPI: f64 = 128.0;

/// Default detection threshold for directory batches
pub const BATCH_THRESHOLD: f64 = 0.1;

// ============================================================
// Error Types
// ============================================================

/// Cropping error types
#[derive(Debug, Error)]
pub enum CropError {
    #[error("Input not found: {0}")]
    InputNotFound(PathBuf),

    #[error("output file is required")]
    MissingOutput,

    #[error("page no exceed the page number: page {page}, document has {count} pages")]
    InvalidPage { page: usize, count: usize },

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required tool not found: {0}")]
    ToolNotFound(String),

    #[error("render page {page}: {message}")]
    RenderFailed { page: usize, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CropError>;

// ============================================================
// Options
// ============================================================

/// Page cropping options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropOptions {
    /// Rasterization resolution
    pub dpi: f64,
    /// Fractional tolerance threshold
    pub threshold: f64,
    /// Scan stride in pixels
    pub space: usize,
    /// Scan strategy
    pub strategy: CropStrategy,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            threshold: DEFAULT_THRESHOLD,
            space: DEFAULT_STEP,
            strategy: CropStrategy::Center,
        }
    }
}

impl CropOptions {
    /// Create a new options builder
    pub fn builder() -> CropOptionsBuilder {
        CropOptionsBuilder::default()
    }

    /// Preset for whole-directory batches
    pub fn batch() -> Self {
        Self {
            threshold: BATCH_THRESHOLD,
            ..Default::default()
        }
    }

    /// Replace non-positive values with their defaults.
    #[must_use]
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        Self {
            dpi: if self.dpi > 0.0 { self.dpi } else { defaults.dpi },
            threshold: if self.threshold > 0.0 {
                self.threshold
            } else {
                defaults.threshold
            },
            space: if self.space > 0 {
                self.space
            } else {
                defaults.space
            },
            strategy: self.strategy,
        }
    }

    /// Detector parameters for these options
    pub fn search_params(&self) -> SearchParams {
        SearchParams::new(self.space, self.threshold, self.strategy)
    }
}

/// Builder for CropOptions
#[derive(Debug, Default)]
pub struct CropOptionsBuilder {
    options: CropOptions,
}

impl CropOptionsBuilder {
    /// Set rasterization DPI
    #[must_use]
    pub fn dpi(mut self, dpi: f64) -> Self {
        self.options.dpi = dpi;
        self
    }

    /// Set detection threshold
    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.options.threshold = threshold;
        self
    }

    /// Set scan stride in pixels
    #[must_use]
    pub fn space(mut self, space: usize) -> Self {
        self.options.space = space;
        self
    }

    /// Set scan strategy
    #[must_use]
    pub fn strategy(mut self, strategy: CropStrategy) -> Self {
        self.options.strategy = strategy;
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> CropOptions {
        self.options.normalized()
    }
}

// ============================================================
// Per-page request / result
// ============================================================

/// Crop request for one page
///
/// Offsets are points measured from the top-left corner of the MediaBox.
/// A request with `left == right` or `top == bottom` asks for detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOption {
    /// 0-indexed page number
    pub number: usize,
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
    /// Destination file; derived from the input name when empty
    pub output: Option<PathBuf>,
}

impl PageOption {
    /// Automatic detection request for a page
    pub fn auto(number: usize) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// True when no usable manual rectangle was given
    pub fn is_auto(&self) -> bool {
        self.left == self.right || self.top == self.bottom
    }
}

/// Outcome of cropping one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult {
    /// 0-indexed page number
    pub page_no: usize,
    pub media: PageRect,
    pub crop: PageRect,
    pub output: PathBuf,
    /// Whether the crop box came from detection
    pub was_auto: bool,
}

impl PageResult {
    /// One-line summary: page, media box, crop box, output path
    pub fn summary_line(&self) -> String {
        format!(
            "{} {} {} {}",
            self.page_no,
            self.media,
            self.crop,
            self.output.display()
        )
    }
}

/// Default destination for a single extracted page.
pub fn default_output_file(input: &Path, page_no: usize) -> PathBuf {
    let base = input.with_extension("");
    PathBuf::from(format!("{} - page {:>2}.pdf", base.display(), page_no))
}
