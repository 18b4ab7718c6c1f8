//! Shared fixtures for integration tests

#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use lopdf::{dictionary, Document, Object, Stream};
use pdf_crop::{Rasterizer, Result};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Write a PDF whose pages carry the given MediaBoxes.
pub fn write_pdf(path: &Path, media_boxes: &[Option<[i64; 4]>]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for media in media_boxes {
        let content_id = doc.add_object(Stream::new(dictionary! {}, b"q Q".to_vec()));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "Contents" => Object::Reference(content_id),
        };
        if let Some(m) = media {
            page.set(
                "MediaBox",
                m.iter().map(|&v| Object::Integer(v)).collect::<Vec<_>>(),
            );
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Count" => Object::Integer(kids.len() as i64),
        "Kids" => kids,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc.save(path).unwrap();
}

/// White raster with one black block covering `x` columns and `y` rows.
pub fn block(width: u32, height: u32, x: (u32, u32), y: (u32, u32)) -> RgbaImage {
    RgbaImage::from_fn(width, height, |px, py| {
        if (x.0..x.1).contains(&px) && (y.0..y.1).contains(&py) {
            BLACK
        } else {
            WHITE
        }
    })
}

/// Serves one raster per page and counts render calls
pub struct StaticRasterizer {
    pages: Vec<RgbaImage>,
    calls: AtomicUsize,
}

impl StaticRasterizer {
    pub fn new(pages: Vec<RgbaImage>) -> Self {
        Self {
            pages,
            calls: AtomicUsize::new(0),
        }
    }

    /// Same raster for every page
    pub fn uniform(raster: RgbaImage) -> Self {
        Self::new(vec![raster])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Rasterizer for StaticRasterizer {
    fn render_page(&self, _pdf: &Path, page_no: usize, _dpi: f64) -> Result<RgbaImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let index = page_no.min(self.pages.len() - 1);
        Ok(self.pages[index].clone())
    }
}

pub fn assert_rect_close(actual: &pdf_crop::PageRect, expected: &pdf_crop::PageRect) {
    let pairs = actual.to_array().into_iter().zip(expected.to_array());
    for (a, e) in pairs {
        assert!((a - e).abs() < 1e-3, "{actual:?} != {expected:?}");
    }
}
