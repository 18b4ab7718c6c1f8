//! Border detector
//!
//! Both strategies are a directional step-scan over an [`OccupancyIndex`]
//! that stops on a band predicate:
//!
//! - **center**: start at the densest row/column and walk outward until a
//!   band holds no occupied pixels (whitespace begins);
//! - **border**: start at the page edges and walk inward until a band holds
//!   any occupied pixel (content begins).

use image::RgbaImage;
use std::ops::Range;

use super::occupancy::OccupancyIndex;
use super::types::{ContentRect, CropStrategy, SearchParams};

/// Walking direction along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Toward index 0; the probed band ends at the current position
    Backward,
    /// Toward the axis length; the probed band starts at the current position
    Forward,
}

/// Band predicate that ends a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopWhen {
    Empty,
    Occupied,
}

impl StopWhen {
    fn matches(self, count: usize) -> bool {
        match self {
            StopWhen::Empty => count == 0,
            StopWhen::Occupied => count != 0,
        }
    }
}

/// One directional scan along an axis of length `len`
#[derive(Debug, Clone, Copy)]
struct Scan {
    direction: Direction,
    start: usize,
    /// Exclusive bound: Backward runs while pos > limit, Forward while pos < limit
    limit: usize,
    step: usize,
    tolerance: usize,
    len: usize,
    stop: StopWhen,
}

impl Scan {
    /// Walk the axis; `count` receives the band range and returns its occupancy.
    fn run(&self, mut count: impl FnMut(Range<usize>) -> usize) -> Option<usize> {
        let step = self.step.max(1);
        let mut pos = self.start;
        match self.direction {
            Direction::Backward => {
                while pos > self.limit {
                    let band = pos.saturating_sub(self.tolerance)..pos;
                    if self.stop.matches(count(band)) {
                        return Some(pos);
                    }
                    pos = pos.saturating_sub(step);
                }
            }
            Direction::Forward => {
                while pos < self.limit {
                    let band = pos..pos.saturating_add(self.tolerance).min(self.len);
                    if self.stop.matches(count(band)) {
                        return Some(pos);
                    }
                    pos = pos.saturating_add(step);
                }
            }
        }
        None
    }
}

/// Whitespace border detector
pub struct BorderDetector;

impl BorderDetector {
    /// Detect the content rectangle of a raster.
    pub fn detect(raster: &RgbaImage, params: &SearchParams) -> ContentRect {
        let index = OccupancyIndex::build(raster);
        Self::detect_from_index(&index, params)
    }

    /// Detect the content rectangle from a prebuilt occupancy index.
    pub fn detect_from_index(index: &OccupancyIndex, params: &SearchParams) -> ContentRect {
        if index.is_empty() {
            return ContentRect::ZERO;
        }

        let (left, top, right, bottom) = match params.strategy {
            CropStrategy::Center => Self::scan_center(index, params),
            CropStrategy::Border => Self::scan_border(index, params),
        };

        tracing::trace!(
            strategy = %params.strategy,
            left,
            top,
            right,
            bottom,
            "pixel bounds"
        );

        ContentRect::from_pixels(left, top, right, bottom, index.width(), index.height())
    }

    /// Center-outward scan; left/right only look inside [top, bottom).
    fn scan_center(index: &OccupancyIndex, params: &SearchParams) -> (usize, usize, usize, usize) {
        let (width, height) = (index.width(), index.height());
        let tol_h = params.tolerance(height);
        let tol_w = params.tolerance(width);
        let cx = index.densest_column().unwrap_or(0);
        let cy = index.densest_row().unwrap_or(0);

        let vertical = |direction, limit| Scan {
            direction,
            start: cy,
            limit,
            step: params.step,
            tolerance: tol_h,
            len: height,
            stop: StopWhen::Empty,
        };
        let rows = |ys: Range<usize>| index.count_in(0..width, ys);

        let top = vertical(Direction::Backward, 0).run(rows).unwrap_or(0);
        let bottom = vertical(Direction::Forward, height)
            .run(rows)
            .unwrap_or(height);

        let horizontal = |direction, limit| Scan {
            direction,
            start: cx,
            limit,
            step: params.step,
            tolerance: tol_w,
            len: width,
            stop: StopWhen::Empty,
        };
        let columns = |xs: Range<usize>| index.count_in(xs, top..bottom);

        let left = horizontal(Direction::Backward, 0).run(columns).unwrap_or(0);
        let right = horizontal(Direction::Forward, width)
            .run(columns)
            .unwrap_or(width);

        (left, top, right, bottom)
    }

    /// Edge-inward scan; every edge probes the full opposite extent.
    fn scan_border(index: &OccupancyIndex, params: &SearchParams) -> (usize, usize, usize, usize) {
        let (width, height) = (index.width(), index.height());
        let tol_h = params.tolerance(height);
        let tol_w = params.tolerance(width);

        let scan = |direction, start, limit, tolerance, len| Scan {
            direction,
            start,
            limit,
            step: params.step,
            tolerance,
            len,
            stop: StopWhen::Occupied,
        };
        let rows = |ys: Range<usize>| index.count_in(0..width, ys);
        let columns = |xs: Range<usize>| index.count_in(xs, 0..height);

        let top = scan(Direction::Forward, 0, height, tol_h, height)
            .run(rows)
            .unwrap_or(0);
        let bottom = scan(Direction::Backward, height, top, tol_h, height)
            .run(rows)
            .unwrap_or(0);
        let left = scan(Direction::Forward, 0, width, tol_w, width)
            .run(columns)
            .unwrap_or(0);
        let right = scan(Direction::Backward, width, left, tol_w, width)
            .run(columns)
            .unwrap_or(0);

        (left, top, right, bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    /// White raster with an occupied block covering [x0,x1) x [y0,y1)
    fn block(width: u32, height: u32, (x0, y0, x1, y1): (u32, u32, u32, u32)) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x0..x1).contains(&x) && (y0..y1).contains(&y) {
                BLACK
            } else {
                WHITE
            }
        })
    }

    fn assert_well_formed(rect: &ContentRect) {
        assert!(0.0 <= rect.left && rect.left <= rect.right && rect.right <= 1.0, "{rect}");
        assert!(0.0 <= rect.top && rect.top <= rect.bottom && rect.bottom <= 1.0, "{rect}");
    }

    fn index_of(img: &RgbaImage) -> OccupancyIndex {
        OccupancyIndex::build(img)
    }

    #[test]
    fn test_center_block_scenario() {
        let img = block(100, 100, (30, 20, 70, 80));
        let params = SearchParams::new(5, 0.1, CropStrategy::Center);

        let rect = BorderDetector::detect(&img, &params);

        assert!((rect.left - 0.30).abs() <= 0.05, "{rect}");
        assert!((rect.top - 0.20).abs() <= 0.05, "{rect}");
        assert!((rect.right - 0.70).abs() <= 0.05, "{rect}");
        assert!((rect.bottom - 0.80).abs() <= 0.05, "{rect}");
    }

    #[test]
    fn test_center_strictly_brackets_block() {
        let img = block(120, 90, (40, 30, 80, 60));
        let params = SearchParams::new(2, 0.05, CropStrategy::Center);

        let rect = BorderDetector::detect(&img, &params);
        let (left, top) = (rect.left * 120.0, rect.top * 90.0);
        let (right, bottom) = (rect.right * 120.0, rect.bottom * 90.0);

        assert!(left > 0.0 && left <= 40.0, "{rect}");
        assert!(top > 0.0 && top <= 30.0, "{rect}");
        assert!(right < 120.0 && right >= 80.0, "{rect}");
        assert!(bottom < 90.0 && bottom >= 60.0, "{rect}");
    }

    #[test]
    fn test_blank_raster_is_zero() {
        let img = RgbaImage::from_pixel(50, 50, WHITE);
        for strategy in [CropStrategy::Center, CropStrategy::Border] {
            for (step, threshold) in [(1, 0.001), (5, 0.1), (50, 1.0), (7, 0.33)] {
                let params = SearchParams::new(step, threshold, strategy);
                let rect = BorderDetector::detect(&img, &params);
                assert_eq!(rect, ContentRect::ZERO, "{strategy} step={step}");
            }
        }
    }

    #[test]
    fn test_zero_area_raster_is_zero() {
        for (w, h) in [(0, 0), (0, 10), (10, 0)] {
            let img = RgbaImage::new(w, h);
            for strategy in [CropStrategy::Center, CropStrategy::Border] {
                let rect = BorderDetector::detect(&img, &SearchParams::new(5, 0.1, strategy));
                assert_eq!(rect, ContentRect::ZERO);
            }
        }
    }

    #[test]
    fn test_border_block_scenario() {
        let img = block(100, 100, (30, 20, 70, 80));
        let params = SearchParams::new(5, 0.1, CropStrategy::Border);

        let rect = BorderDetector::detect(&img, &params);

        assert_eq!(rect.left, 0.30);
        assert_eq!(rect.top, 0.20);
        assert_eq!(rect.right, 0.70);
        assert_eq!(rect.bottom, 0.80);
    }

    #[test]
    fn test_border_finds_edge_content_first() {
        // A thin header band is the densest row, so both scans start near the top.
        let mut img = block(100, 100, (10, 30, 90, 90));
        for y in 2..6 {
            for x in 10..90 {
                img.put_pixel(x, y, BLACK);
            }
        }

        let center = BorderDetector::detect(&img, &SearchParams::new(2, 0.05, CropStrategy::Center));
        let border = BorderDetector::detect(&img, &SearchParams::new(2, 0.05, CropStrategy::Border));

        assert_well_formed(&center);
        assert_well_formed(&border);
        assert!(border.top <= center.top, "border={border} center={center}");
        assert!(border.top <= 0.02 + f64::EPSILON, "{border}");
    }

    #[test]
    fn test_border_tolerance_capped_by_step() {
        let params = SearchParams::new(3, 0.5, CropStrategy::Border);
        assert_eq!(params.tolerance(100), 3);

        let params = SearchParams::new(3, 0.5, CropStrategy::Center);
        assert_eq!(params.tolerance(100), 50);
    }

    #[test]
    fn test_tolerance_floor() {
        let params = SearchParams::new(5, 0.001, CropStrategy::Center);
        assert_eq!(params.tolerance(100), 1);
        assert_eq!(params.tolerance(0), 1);

        let params = SearchParams::new(5, 0.019, CropStrategy::Center);
        assert_eq!(params.tolerance(100), 1);
    }

    #[test]
    fn test_center_left_right_confined_to_vertical_band() {
        // A stripe above the body reaches the right edge but lies outside [top, bottom).
        let mut img = block(100, 100, (20, 40, 70, 70));
        for y in 5..10 {
            for x in 60..100 {
                img.put_pixel(x, y, BLACK);
            }
        }
        let params = SearchParams::new(2, 0.05, CropStrategy::Center);

        let rect = BorderDetector::detect(&img, &params);

        assert_eq!(rect.top, 0.40);
        assert_eq!(rect.bottom, 0.70);
        assert_eq!(rect.left, 0.20);
        assert_eq!(rect.right, 0.70);
    }

    #[test]
    fn test_border_left_right_use_full_height() {
        // tolerance 1 with step 5: row 2 falls between top probes, so only a
        // full-height column scan can see it.
        let mut img = block(100, 100, (20, 40, 50, 60));
        for x in 90..95 {
            img.put_pixel(x, 2, BLACK);
        }
        let params = SearchParams::new(5, 0.01, CropStrategy::Border);
        assert_eq!(params.tolerance(100), 1);

        let rect = BorderDetector::detect(&img, &params);

        assert_eq!(rect.top, 0.40);
        assert_eq!(rect.bottom, 0.60);
        assert_eq!(rect.left, 0.20);
        assert_eq!(rect.right, 0.95);
    }

    #[test]
    fn test_extreme_params_do_not_overflow() {
        let img = block(10, 10, (3, 3, 7, 7));
        let cases = [
            (usize::MAX, 0.1),
            (5, 1e30),
            (usize::MAX, 1e30),
        ];

        for strategy in [CropStrategy::Center, CropStrategy::Border] {
            for (step, threshold) in cases {
                let params = SearchParams::new(step, threshold, strategy);
                let rect = BorderDetector::detect(&img, &params);
                assert_well_formed(&rect);
            }
        }
    }

    #[test]
    fn test_center_scan_reaches_edges() {
        let img = RgbaImage::from_pixel(40, 30, BLACK);
        let params = SearchParams::new(4, 0.1, CropStrategy::Center);

        let rect = BorderDetector::detect(&img, &params);

        assert_eq!(rect.left, 0.0);
        assert_eq!(rect.top, 0.0);
        assert_eq!(rect.right, 1.0);
        assert_eq!(rect.bottom, 1.0);
    }

    #[test]
    fn test_border_sparse_bands_stay_ordered() {
        // tolerance 1 with step 5 leaves gaps between probes
        let mut img = RgbaImage::from_pixel(100, 100, WHITE);
        for x in 0..100 {
            img.put_pixel(x, 20, BLACK);
            img.put_pixel(x, 23, BLACK);
        }
        let params = SearchParams::new(5, 0.001, CropStrategy::Border);

        let rect = BorderDetector::detect(&img, &params);

        assert_well_formed(&rect);
        assert_eq!(rect.top, 0.20);
    }

    #[test]
    fn test_well_formed_on_scattered_pixels() {
        let img = RgbaImage::from_fn(64, 48, |x, y| {
            if (x * 31 + y * 17) % 23 == 0 {
                BLACK
            } else {
                WHITE
            }
        });
        let index = index_of(&img);
        for strategy in [CropStrategy::Center, CropStrategy::Border] {
            for step in [1, 3, 8, 100] {
                for threshold in [0.001, 0.05, 0.5, 1.0] {
                    let params = SearchParams::new(step, threshold, strategy);
                    assert_well_formed(&BorderDetector::detect_from_index(&index, &params));
                }
            }
        }
    }

    #[test]
    fn test_scan_routine_backward_and_forward() {
        let occupied = |r: Range<usize>| r.filter(|&i| (10..20).contains(&i)).count();

        let back = Scan {
            direction: Direction::Backward,
            start: 15,
            limit: 0,
            step: 1,
            tolerance: 2,
            len: 30,
            stop: StopWhen::Empty,
        };
        assert_eq!(back.run(occupied), Some(10));

        let fwd = Scan {
            direction: Direction::Forward,
            limit: 30,
            ..back
        };
        assert_eq!(fwd.run(occupied), Some(20));

        let inward = Scan {
            direction: Direction::Forward,
            start: 0,
            limit: 30,
            step: 4,
            tolerance: 4,
            len: 30,
            stop: StopWhen::Occupied,
        };
        assert_eq!(inward.run(occupied), Some(8));

        let never = Scan {
            stop: StopWhen::Occupied,
            ..back
        };
        assert_eq!(never.run(|_| 0), None);
    }
}
