//! pdf-crop - Crop PDF pages to their printed content
//!
//! CLI entry point

use anyhow::Context;
use clap::Parser;
use pdf_crop::crop::PDFTOPPM;
use pdf_crop::{
    exit_codes, BatchProcessor, Cli, Commands, Config, CropAllArgs, CropArgs, CropError,
    CropOptions, PdfCropper, PdftoppmRasterizer,
};
use std::path::Path;
use tracing::Level;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Crop(args) => load_config(cli.config.as_deref()).and_then(|c| run_crop(args, &c)),
        Commands::CropAll(args) => {
            load_config(cli.config.as_deref()).and_then(|c| run_crop_all(args, &c, cli.quiet))
        }
        Commands::Info => run_info(),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for(&e)
        }
    });
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<CropError>() {
        Some(CropError::InputNotFound(_)) => exit_codes::INPUT_NOT_FOUND,
        Some(CropError::ToolNotFound(_)) => exit_codes::TOOL_MISSING,
        Some(CropError::InvalidArgument(_)) | Some(CropError::InvalidPage { .. }) => {
            exit_codes::INVALID_ARGS
        }
        _ => exit_codes::GENERAL_ERROR,
    }
}

/// Explicit config path must load; the default location falls back to defaults.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Ok(Config::load_from_path(path)?),
        None => Ok(Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring unreadable config file");
            Config::default()
        })),
    }
}

// ============ Crop Command ============

fn run_crop(args: &CropArgs, config: &Config) -> anyhow::Result<()> {
    if !args.input.exists() {
        return Err(CropError::InputNotFound(args.input.clone()).into());
    }
    let pages = args.page_options()?;
    let options = config.merge_with_cli(CropOptions::default(), &args.detect.overrides());
    tracing::debug!(?options, "crop options");

    // Manual rectangles never render, so a missing rasterizer only matters for detection.
    let needs_render = pages.is_empty() || pages.iter().any(|p| p.is_auto());
    let rasterizer = match PdftoppmRasterizer::new() {
        Ok(r) => r,
        Err(e) if needs_render => return Err(e.into()),
        Err(_) => PdftoppmRasterizer::with_program(PDFTOPPM),
    };
    let cropper = PdfCropper::with_rasterizer(rasterizer, options);

    let results = match &args.output {
        Some(output) => cropper.crop_all_pages_to_single_file(&args.input, output)?,
        None => cropper.crop_pages(&args.input, &pages)?,
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).context("serialize results")?
        );
    } else {
        for result in &results {
            println!("{}", result.summary_line());
        }
    }
    Ok(())
}

// ============ Crop-All Command ============

fn run_crop_all(args: &CropAllArgs, config: &Config, quiet: bool) -> anyhow::Result<()> {
    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("resolve current directory")?,
    };
    if !dir.is_dir() {
        return Err(CropError::InputNotFound(dir).into());
    }
    let options = config.merge_with_cli(CropOptions::batch(), &args.detect.overrides());
    let cropper = PdfCropper::new(options)?;

    let summary = BatchProcessor::new(&cropper)
        .jobs(args.jobs)
        .show_progress(!quiet)
        .process_directory(&dir)?;

    if !quiet {
        for output in &summary.ok {
            println!("Successfully processed: {}", output.display());
        }
    }
    for (input, message) in &summary.failed {
        eprintln!("Error processing {}: {}", input.display(), message);
    }
    if !quiet {
        println!(
            "{} file(s): {} ok, {} failed",
            summary.total(),
            summary.ok.len(),
            summary.failed.len()
        );
    }

    if !summary.is_success() {
        anyhow::bail!("{} file(s) failed to process", summary.failed.len());
    }
    Ok(())
}

// ============ Info Command ============

fn run_info() -> anyhow::Result<()> {
    println!("pdf-crop v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Rasterizer:");
    match PdftoppmRasterizer::new() {
        Ok(rasterizer) => {
            let version = rasterizer.version().unwrap_or_else(|| "unknown version".into());
            println!("  Poppler: {} ({})", version, rasterizer.program().display());
        }
        Err(_) => println!("  Poppler ({}): Not found", PDFTOPPM),
    }

    println!();
    println!("Config File Location:");
    match Config::default_path() {
        Some(path) => println!("  User: {}", path.display()),
        None => println!("  User: unavailable"),
    }
    Ok(())
}
