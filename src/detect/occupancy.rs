//! Occupancy index
//!
//! Summed-area table of non-background pixels with per-row and per-column
//! totals. Built once per page raster, then queried in constant time by the
//! border scans.

use image::{Rgba, RgbaImage};
use std::ops::Range;

/// Channel value of a pure opaque white pixel
const BACKGROUND_CHANNEL: u8 = u8::MAX;

/// Returns true when a pixel is not pure opaque white.
#[inline]
pub fn is_occupied(pixel: &Rgba<u8>) -> bool {
    pixel.0.iter().any(|&c| c != BACKGROUND_CHANNEL)
}

/// Queryable count of occupied pixels over a raster
#[derive(Debug, Clone)]
pub struct OccupancyIndex {
    width: usize,
    height: usize,
    /// (width+1) x (height+1), row-major; cell (x, y) counts [0,x) x [0,y)
    prefix_sum: Vec<usize>,
    row_counts: Vec<usize>,
    column_counts: Vec<usize>,
}

impl OccupancyIndex {
    /// Build the index in a single pass over the raster.
    pub fn build(raster: &RgbaImage) -> Self {
        let width = raster.width() as usize;
        let height = raster.height() as usize;
        let stride = width + 1;

        let mut prefix_sum = vec![0usize; stride * (height + 1)];
        let mut row_counts = vec![0usize; height];
        let mut column_counts = vec![0usize; width];

        for (y, row) in raster.rows().enumerate() {
            let mut running = 0usize;
            for (x, pixel) in row.enumerate() {
                if is_occupied(pixel) {
                    running += 1;
                    row_counts[y] += 1;
                    column_counts[x] += 1;
                }
                prefix_sum[(y + 1) * stride + x + 1] = prefix_sum[y * stride + x + 1] + running;
            }
        }

        Self {
            width,
            height,
            prefix_sum,
            row_counts,
            column_counts,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the raster had zero width or zero height
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Occupied pixels per row, top to bottom
    pub fn row_counts(&self) -> &[usize] {
        &self.row_counts
    }

    /// Occupied pixels per column, left to right
    pub fn column_counts(&self) -> &[usize] {
        &self.column_counts
    }

    /// Total number of occupied pixels
    pub fn total(&self) -> usize {
        self.cell(self.width, self.height)
    }

    /// Index of the first row holding the maximum occupied count.
    pub fn densest_row(&self) -> Option<usize> {
        first_max(&self.row_counts)
    }

    /// Index of the first column holding the maximum occupied count.
    pub fn densest_column(&self) -> Option<usize> {
        first_max(&self.column_counts)
    }

    /// Count occupied pixels in the half-open rectangle [x0,x1) x [y0,y1).
    ///
    /// Coordinates are clamped to the index bounds; an empty or inverted
    /// rectangle after clamping counts zero.
    pub fn count_occupied(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> usize {
        let clamp = |v: i64, max: usize| v.clamp(0, max as i64) as usize;
        self.count_in(
            clamp(x0, self.width)..clamp(x1, self.width),
            clamp(y0, self.height)..clamp(y1, self.height),
        )
    }

    /// Range form of [`count_occupied`](Self::count_occupied) used by the scans.
    pub(crate) fn count_in(&self, xs: Range<usize>, ys: Range<usize>) -> usize {
        let x0 = xs.start.min(self.width);
        let x1 = xs.end.min(self.width);
        let y0 = ys.start.min(self.height);
        let y1 = ys.end.min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return 0;
        }

        self.cell(x1, y1) + self.cell(x0, y0) - self.cell(x0, y1) - self.cell(x1, y0)
    }

    #[inline]
    fn cell(&self, x: usize, y: usize) -> usize {
        self.prefix_sum[y * (self.width + 1) + x]
    }
}

/// First index of the maximum value; ties keep the lowest index.
fn first_max(counts: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, &count) in counts.iter().enumerate() {
        match best {
            Some((_, max)) if count <= max => {}
            _ => best = Some((i, count)),
        }
    }
    best.map(|(i, _)| i)
}
