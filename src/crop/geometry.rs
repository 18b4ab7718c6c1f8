//! Page geometry
//!
//! PDF rectangles and the mapping from a fractional content rectangle
//! (origin top-left, y down) to PDF user space (origin bottom-left, y up).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::detect::ContentRect;

/// A4 width in points, used when a page has no readable MediaBox
pub const A4_WIDTH: f64 = 595.0;

/// A4 height in points
pub const A4_HEIGHT: f64 = 842.0;

/// Axis-aligned rectangle in PDF user space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageRect {
    pub llx: f64,
    pub lly: f64,
    pub urx: f64,
    pub ury: f64,
}

impl PageRect {
    /// Create a rectangle, ordering the corners.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            llx: x0.min(x1),
            lly: y0.min(y1),
            urx: x0.max(x1),
            ury: y0.max(y1),
        }
    }

    /// Rectangle anchored at the origin
    pub fn for_dim(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// A4 portrait page
    pub fn a4() -> Self {
        Self::for_dim(A4_WIDTH, A4_HEIGHT)
    }

    pub fn width(&self) -> f64 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f64 {
        self.ury - self.lly
    }

    /// Corner values in PDF array order
    pub fn to_array(&self) -> [f64; 4] {
        [self.llx, self.lly, self.urx, self.ury]
    }
}

impl fmt::Display for PageRect {
    /// `(llx, lly), (urx, ury)` with coordinates truncated to integers
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}), ({}, {})",
            self.llx as i64, self.lly as i64, self.urx as i64, self.ury as i64
        )
    }
}

/// Build a crop box from offsets measured from the media box's top-left corner.
pub fn rect_from_top_left(media: &PageRect, left: i64, top: i64, right: i64, bottom: i64) -> PageRect {
    let height = media.height();

    let left_x = media.llx + left as f64;
    let right_x = media.llx + right as f64;
    let upper_y = media.lly + (height - top as f64);
    let lower_y = media.lly + (height - bottom as f64);

    PageRect::new(left_x, lower_y, right_x, upper_y)
}

/// Scale a fractional content rectangle onto a media box.
///
/// Offsets are truncated to whole points before the top-left mapping.
pub fn rect_from_content(media: &PageRect, content: &ContentRect) -> PageRect {
    let width = media.width();
    let height = media.height();
    rect_from_top_left(
        media,
        (content.left * width) as i64,
        (content.top * height) as i64,
        (content.right * width) as i64,
        (content.bottom * height) as i64,
    )
}
