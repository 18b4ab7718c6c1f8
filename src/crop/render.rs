//! Page rasterization
//!
//! Renders one PDF page to an RGBA bitmap. The default backend shells out
//! to poppler's `pdftoppm`.

use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::types::{CropError, Result};

/// Name of the poppler rasterizer binary
pub const PDFTOPPM: &str = "pdftoppm";

/// Renders pages of a PDF file to bitmaps
pub trait Rasterizer: Send + Sync {
    /// Render a 0-indexed page at `dpi`.
    fn render_page(&self, pdf: &Path, page_no: usize, dpi: f64) -> Result<RgbaImage>;
}

/// Rasterizer backed by the `pdftoppm` command
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    program: PathBuf,
}

impl PdftoppmRasterizer {
    /// Locate `pdftoppm` on `PATH`.
    pub fn new() -> Result<Self> {
        let program =
            which::which(PDFTOPPM).map_err(|_| CropError::ToolNotFound(PDFTOPPM.to_string()))?;
        Ok(Self { program })
    }

    /// Use an explicit binary path.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// First line of `pdftoppm -v`, which poppler prints on stderr.
    pub fn version(&self) -> Option<String> {
        let output = Command::new(&self.program).arg("-v").output().ok()?;
        let text = if output.stderr.is_empty() {
            output.stdout
        } else {
            output.stderr
        };
        String::from_utf8_lossy(&text)
            .lines()
            .next()
            .map(|line| line.trim().to_string())
    }

    fn render_args(pdf: &Path, page_no: usize, dpi: f64, prefix: &Path) -> Vec<String> {
        let page = (page_no + 1).to_string();
        vec![
            "-r".to_string(),
            format!("{}", dpi),
            "-f".to_string(),
            page.clone(),
            "-l".to_string(),
            page,
            "-png".to_string(),
            "-singlefile".to_string(),
            pdf.to_string_lossy().into_owned(),
            prefix.to_string_lossy().into_owned(),
        ]
    }
}

impl Rasterizer for PdftoppmRasterizer {
    fn render_page(&self, pdf: &Path, page_no: usize, dpi: f64) -> Result<RgbaImage> {
        let work_dir = tempfile::tempdir()?;
        let prefix = work_dir.path().join("page");

        let output = Command::new(&self.program)
            .args(Self::render_args(pdf, page_no, dpi, &prefix))
            .output()?;
        if !output.status.success() {
            return Err(CropError::RenderFailed {
                page: page_no,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let png = prefix.with_extension("png");
        if !png.exists() {
            return Err(CropError::RenderFailed {
                page: page_no,
                message: format!("{} produced no output", PDFTOPPM),
            });
        }

        let image = image::open(&png)?.to_rgba8();
        tracing::debug!(
            page = page_no,
            width = image.width(),
            height = image.height(),
            dpi,
            "rendered page"
        );
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_args() {
        let args = PdftoppmRasterizer::render_args(
            Path::new("/docs/in.pdf"),
            2,
            128.0,
            Path::new("/tmp/x/page"),
        );
        assert_eq!(
            args,
            vec![
                "-r",
                "128",
                "-f",
                "3",
                "-l",
                "3",
                "-png",
                "-singlefile",
                "/docs/in.pdf",
                "/tmp/x/page"
            ]
        );
    }

    #[test]
    fn test_fractional_dpi_arg() {
        let args = PdftoppmRasterizer::render_args(Path::new("a.pdf"), 0, 72.5, Path::new("p"));
        assert_eq!(args[1], "72.5");
        assert_eq!(args[3], "1");
    }

    #[test]
    fn test_missing_program_fails() {
        let rasterizer = PdftoppmRasterizer::with_program("/nonexistent/pdftoppm");
        let result = rasterizer.render_page(Path::new("in.pdf"), 0, 72.0);
        assert!(matches!(result, Err(CropError::Io(_))));
        assert!(rasterizer.version().is_none());
    }
}
