//! PDF Cropping module
//!
//! Applies detected content rectangles to PDF pages as CropBox entries.
//!
//! # Features
//!
//! - MediaBox lookup with page-tree inheritance and A4 fallback
//! - Automatic or manual (top-left offset) crop boxes per page
//! - Whole-document output or one file per cropped page
//! - Pluggable rasterizer (`pdftoppm` by default)
//!
//! # Example
//!
//! ```rust,no_run
//! use pdf_crop::{CropOptions, PdfCropper};
//! use std::path::Path;
//!
//! let cropper = PdfCropper::new(CropOptions::default()).unwrap();
//! let results = cropper
//!     .crop_all_pages_to_single_file(Path::new("book.pdf"), Path::new("book_cropped.pdf"))
//!     .unwrap();
//!
//! for page in &results {
//!     println!("{}", page.summary_line());
//! }
//! ```

// Submodules
mod cropper;
mod geometry;
mod pdf;
mod render;
mod types;

// Re-export public API
pub use cropper::PdfCropper;
pub use geometry::{rect_from_content, rect_from_top_left, PageRect, A4_HEIGHT, A4_WIDTH};
pub use pdf::PdfDocument;
pub use render::{PdftoppmRasterizer, Rasterizer, PDFTOPPM};
pub use types::{
    default_output_file, CropError, CropOptions, CropOptionsBuilder, PageOption, PageResult,
    Result, BATCH_THRESHOLD, DEFAULT_DPI,
};
