//! Content Region Detection module
//!
//! Locates the non-blank content rectangle of a rasterized page.
//!
//! # Features
//!
//! - Constant-time occupied-pixel counts over any rectangle (summed-area table)
//! - Center-outward scan (whitespace begins) and edge-inward scan (content begins)
//! - Total function: blank or zero-area rasters give an all-zero rectangle
//!
//! # Example
//!
//! ```rust
//! use image::{Rgba, RgbaImage};
//! use pdf_crop::{BorderDetector, CropStrategy, SearchParams};
//!
//! let mut page = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
//! for y in 20..80 {
//!     for x in 30..70 {
//!         page.put_pixel(x, y, Rgba([0, 0, 0, 255]));
//!     }
//! }
//!
//! let params = SearchParams::new(5, 0.1, CropStrategy::Center);
//! let rect = BorderDetector::detect(&page, &params);
//! assert!((rect.left - 0.3).abs() < 0.05);
//! ```

// Submodules
mod border;
mod occupancy;
mod types;

// Re-export public API
pub use border::BorderDetector;
pub use occupancy::{is_occupied, OccupancyIndex};
pub use types::{
    ContentRect, CropStrategy, SearchParams, DEFAULT_STEP, DEFAULT_THRESHOLD, MIN_TOLERANCE,
};
