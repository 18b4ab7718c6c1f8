//! Command-line interface definitions

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CliOverrides;
use crate::crop::{CropError, PageOption, Result};
use crate::detect::CropStrategy;

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_ARGS: i32 = 2;
    pub const INPUT_NOT_FOUND: i32 = 3;
    pub const TOOL_MISSING: i32 = 4;
}

/// Values consumed by each `--page` occurrence
pub const PAGE_SPEC_LEN: usize = 6;

/// Crop PDF pages to their printed content using raster detection
#[derive(Debug, Parser)]
#[command(name = "pdf-crop", version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: <config dir>/pdf-crop/config.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Crop the pages of one PDF
    Crop(CropArgs),
    /// Crop every PDF in a directory
    CropAll(CropAllArgs),
    /// Show rasterizer availability
    Info,
}

/// Detection tuning shared by the crop commands
#[derive(Debug, Clone, Args)]
pub struct DetectArgs {
    /// Detection threshold as a fraction of the page size
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Scan stride in pixels
    #[arg(long)]
    pub space: Option<usize>,

    /// Rasterization DPI
    #[arg(long)]
    pub dpi: Option<f64>,

    /// Scan strategy
    #[arg(long = "crop-from", value_enum)]
    pub crop_from: Option<CropStrategy>,
}

impl DetectArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            dpi: self.dpi,
            threshold: self.threshold,
            space: self.space,
            strategy: self.crop_from,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct CropArgs {
    /// Input PDF
    #[arg(short = 'i', long = "input_file", visible_alias = "input")]
    pub input: PathBuf,

    /// Per-page crop and output: page left top right bottom out.pdf (repeatable)
    #[arg(
        short = 'p',
        long = "page",
        num_args = PAGE_SPEC_LEN,
        value_names = ["PAGE", "LEFT", "TOP", "RIGHT", "BOTTOM", "OUTPUT"],
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub page: Vec<String>,

    /// Crop all pages into this single document instead of one file per page
    #[arg(short, long, conflicts_with = "page")]
    pub output: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub detect: DetectArgs,
}

impl CropArgs {
    /// Parse the flattened `--page` values into page options.
    pub fn page_options(&self) -> Result<Vec<PageOption>> {
        parse_page_specs(&self.page)
    }
}

#[derive(Debug, Clone, Args)]
pub struct CropAllArgs {
    /// Directory containing PDFs (default: current directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Parallel jobs (0 = one per CPU)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    #[command(flatten)]
    pub detect: DetectArgs,
}

fn parse_int<T: std::str::FromStr>(value: &str, field: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| CropError::InvalidArgument(format!("invalid {}: {}", field, e)))
}

/// Group `--page` values six at a time.
pub fn parse_page_specs(values: &[String]) -> Result<Vec<PageOption>> {
    if values.len() % PAGE_SPEC_LEN != 0 {
        return Err(CropError::InvalidArgument(format!(
            "--page requires {} arguments",
            PAGE_SPEC_LEN
        )));
    }

    values
        .chunks(PAGE_SPEC_LEN)
        .map(|spec| {
            Ok(PageOption {
                number: parse_int(&spec[0], "page number")?,
                left: parse_int(&spec[1], "left value")?,
                top: parse_int(&spec[2], "top value")?,
                right: parse_int(&spec[3], "right value")?,
                bottom: parse_int(&spec[4], "bottom value")?,
                output: Some(PathBuf::from(&spec[5])),
            })
        })
        .collect()
}
