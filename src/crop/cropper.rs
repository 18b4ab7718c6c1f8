//! Document cropper
//!
//! Per page: render, detect the content rectangle, scale it onto the
//! MediaBox and write the CropBox.

use std::path::Path;

use super::geometry::{rect_from_content, rect_from_top_left, PageRect};
use super::pdf::PdfDocument;
use super::render::{PdftoppmRasterizer, Rasterizer};
use super::types::{default_output_file, CropError, CropOptions, PageOption, PageResult, Result};
use crate::detect::BorderDetector;

/// Crops PDF pages to their detected content
pub struct PdfCropper<R: Rasterizer = PdftoppmRasterizer> {
    rasterizer: R,
    options: CropOptions,
}

impl PdfCropper<PdftoppmRasterizer> {
    /// Cropper using `pdftoppm` from `PATH`.
    pub fn new(options: CropOptions) -> Result<Self> {
        Ok(Self::with_rasterizer(PdftoppmRasterizer::new()?, options))
    }
}

impl<R: Rasterizer> PdfCropper<R> {
    pub fn with_rasterizer(rasterizer: R, options: CropOptions) -> Self {
        Self {
            rasterizer,
            options: options.normalized(),
        }
    }

    pub fn options(&self) -> &CropOptions {
        &self.options
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Detect the crop box of one page against its media box.
    pub fn detect_page(&self, input: &Path, page_no: usize, media: &PageRect) -> Result<PageRect> {
        let raster = self
            .rasterizer
            .render_page(input, page_no, self.options.dpi)?;
        let content = BorderDetector::detect(&raster, &self.options.search_params());
        let crop = rect_from_content(media, &content);
        tracing::debug!(
            page = page_no,
            strategy = %self.options.strategy,
            %content,
            %crop,
            "detected content"
        );
        Ok(crop)
    }

    /// Crop every page and write the whole document to `output`.
    pub fn crop_document(&self, input: &Path, output: &Path) -> Result<()> {
        self.crop_all_pages_to_single_file(input, output).map(|_| ())
    }

    /// Crop every page into one output document; results report `output`.
    pub fn crop_all_pages_to_single_file(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<Vec<PageResult>> {
        if output.as_os_str().is_empty() {
            return Err(CropError::MissingOutput);
        }
        let mut pdf = PdfDocument::load(input)?;

        let mut results = Vec::with_capacity(pdf.page_count());
        for page_no in 0..pdf.page_count() {
            let media = pdf.media_box(page_no);
            let crop = self.detect_page(input, page_no, &media)?;
            pdf.set_crop_box(page_no, &crop)?;
            results.push(PageResult {
                page_no,
                media,
                crop,
                output: output.to_path_buf(),
                was_auto: true,
            });
        }

        pdf.save(output)?;
        Ok(results)
    }

    /// Crop selected pages, writing each to its own single-page document.
    ///
    /// An empty selection crops every page automatically.
    pub fn crop_pages(&self, input: &Path, pages: &[PageOption]) -> Result<Vec<PageResult>> {
        let mut pdf = PdfDocument::load(input)?;
        let count = pdf.page_count();

        let selected: Vec<PageOption> = if pages.is_empty() {
            (0..count).map(PageOption::auto).collect()
        } else {
            pages.to_vec()
        };

        let mut results = Vec::with_capacity(selected.len());
        for option in &selected {
            let page_no = option.number;
            if page_no >= count {
                return Err(CropError::InvalidPage {
                    page: page_no,
                    count,
                });
            }
            let media = pdf.media_box(page_no);

            let was_auto = option.is_auto();
            let crop = if was_auto {
                self.detect_page(input, page_no, &media)?
            } else {
                rect_from_top_left(&media, option.left, option.top, option.right, option.bottom)
            };
            pdf.set_crop_box(page_no, &crop)?;

            let output = option
                .output
                .clone()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| default_output_file(input, page_no));
            pdf.write_single_page(page_no, &output)?;

            results.push(PageResult {
                page_no,
                media,
                crop,
                output,
                was_auto,
            });
        }

        Ok(results)
    }
}
