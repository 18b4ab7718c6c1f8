//! Detection core types

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================
// Constants
// ============================================================

/// Default scan stride in pixels
pub const DEFAULT_STEP: usize = 5;

/// Default fractional tolerance threshold
pub const DEFAULT_THRESHOLD: f64 = 0.008;

/// Smallest tolerance band, keeps every scan making progress
pub const MIN_TOLERANCE: usize = 1;

// ============================================================
// Strategy
// ============================================================

/// Scan strategy for locating the content rectangle
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CropStrategy {
    /// Scan outward from the densest row/column until an empty band
    #[default]
    Center,
    /// Scan inward from the page edges until an occupied band
    Border,
}

impl CropStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            CropStrategy::Center => "center",
            CropStrategy::Border => "border",
        }
    }
}

impl fmt::Display for CropStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================
// Search parameters
// ============================================================

/// Parameters driving one detection run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Scan stride in pixels (> 0)
    pub step: usize,
    /// Tolerance band as a fraction of the axis length
    pub threshold: f64,
    /// Scan strategy
    pub strategy: CropStrategy,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            threshold: DEFAULT_THRESHOLD,
            strategy: CropStrategy::Center,
        }
    }
}

impl SearchParams {
    pub fn new(step: usize, threshold: f64, strategy: CropStrategy) -> Self {
        Self {
            step,
            threshold,
            strategy,
        }
    }

    /// Tolerance band in pixels for an axis of `axis_len` pixels.
    ///
    /// Truncates toward zero, floors at one pixel, and for the border
    /// strategy never exceeds `step`.
    pub fn tolerance(&self, axis_len: usize) -> usize {
        let band = ((axis_len as f64) * self.threshold) as usize;
        let band = band.max(MIN_TOLERANCE);
        match self.strategy {
            CropStrategy::Center => band,
            CropStrategy::Border => band.min(self.step.max(MIN_TOLERANCE)),
        }
    }
}

// ============================================================
// Result
// ============================================================

/// Content rectangle as fractions of the raster width/height
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ContentRect {
    /// The all-zero rectangle returned for blank or zero-area rasters
    pub const ZERO: ContentRect = ContentRect {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// Convert pixel bounds to fractions of `width` x `height`.
    ///
    /// A far edge that fell short of its near edge collapses onto it.
    pub fn from_pixels(
        left: usize,
        top: usize,
        right: usize,
        bottom: usize,
        width: usize,
        height: usize,
    ) -> Self {
        if width == 0 || height == 0 {
            return Self::ZERO;
        }
        let w = width as f64;
        let h = height as f64;
        Self {
            left: left as f64 / w,
            top: top as f64 / h,
            right: right.max(left) as f64 / w,
            bottom: bottom.max(top) as f64 / h,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// True when the rectangle encloses no area
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

impl fmt::Display for ContentRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "left={:.4} top={:.4} right={:.4} bottom={:.4}",
            self.left, self.top, self.right, self.bottom
        )
    }
}
