//! pdf-crop - Crop PDF pages to their printed content
//!
//! Renders each page, locates the non-blank content rectangle with a
//! summed-area occupancy index, and writes it back as the page's CropBox.
//!
//! # Modules
//!
//! - [`detect`]: occupancy index and border detector (center / border scans)
//! - [`crop`]: page geometry, rasterization and document cropping
//! - [`batch`]: whole-directory processing
//! - [`config`]: TOML configuration file
//! - [`cli`]: command-line definitions

pub mod batch;
pub mod cli;
pub mod config;
pub mod crop;
pub mod detect;

pub use batch::{collect_pdf_files, output_path_for, BatchProcessor, BatchSummary};
pub use cli::{exit_codes, Cli, Commands, CropAllArgs, CropArgs, DetectArgs};
pub use config::{CliOverrides, Config};
pub use crop::{
    default_output_file, rect_from_content, rect_from_top_left, CropError, CropOptions,
    CropOptionsBuilder, PageOption, PageRect, PageResult, PdfCropper, PdfDocument,
    PdftoppmRasterizer, Rasterizer, Result,
};
pub use detect::{BorderDetector, ContentRect, CropStrategy, OccupancyIndex, SearchParams};
