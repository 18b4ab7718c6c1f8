//! PDF page boxes
//!
//! Thin wrapper over [`lopdf::Document`] for the page-level operations the
//! cropper needs: MediaBox lookup, CropBox writes, single-page extraction.

use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::{Path, PathBuf};

use super::geometry::PageRect;
use super::types::{CropError, Result};

/// Maximum `Parent` hops followed when resolving inherited attributes
const MAX_INHERITANCE_DEPTH: usize = 32;

/// A loaded PDF document
#[derive(Debug, Clone)]
pub struct PdfDocument {
    doc: Document,
    source: Option<PathBuf>,
}

impl PdfDocument {
    /// Load a document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CropError::InputNotFound(path.to_path_buf()));
        }
        let doc = Document::load(path)?;
        Ok(Self {
            doc,
            source: Some(path.to_path_buf()),
        })
    }

    /// Wrap an in-memory document.
    pub fn from_document(doc: Document) -> Self {
        Self { doc, source: None }
    }

    /// Path the document was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// lopdf's 1-indexed page number for a 0-indexed page
    fn page_key(&self, page_no: usize) -> Result<u32> {
        u32::try_from(page_no)
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or(CropError::InvalidPage {
                page: page_no,
                count: self.page_count(),
            })
    }

    /// Object id of a 0-indexed page
    fn page_id(&self, page_no: usize) -> Result<ObjectId> {
        let key = self.page_key(page_no)?;
        self.doc
            .get_pages()
            .get(&key)
            .copied()
            .ok_or(CropError::InvalidPage {
                page: page_no,
                count: self.page_count(),
            })
    }

    /// MediaBox of a page, following inheritance; A4 when missing or unreadable.
    pub fn media_box(&self, page_no: usize) -> PageRect {
        match self
            .page_id(page_no)
            .ok()
            .and_then(|id| self.inherited_box(id, b"MediaBox"))
        {
            Some(rect) => rect,
            None => {
                tracing::warn!(page = page_no, "no readable MediaBox, falling back to A4");
                PageRect::a4()
            }
        }
    }

    /// CropBox of a page if one is set on the page or an ancestor.
    pub fn crop_box(&self, page_no: usize) -> Option<PageRect> {
        let id = self.page_id(page_no).ok()?;
        self.inherited_box(id, b"CropBox")
    }

    /// Write a CropBox on the page dictionary.
    pub fn set_crop_box(&mut self, page_no: usize, rect: &PageRect) -> Result<()> {
        let id = self.page_id(page_no)?;
        let values: Vec<Object> = rect.to_array().into_iter().map(Object::from).collect();
        let page = self.doc.get_object_mut(id)?.as_dict_mut()?;
        page.set("CropBox", Object::Array(values));
        Ok(())
    }

    /// Copy of the document holding only one page.
    pub fn extract_page(&self, page_no: usize) -> Result<PdfDocument> {
        let count = self.page_count();
        if page_no >= count {
            return Err(CropError::InvalidPage {
                page: page_no,
                count,
            });
        }
        let keep = self.page_key(page_no)?;
        let drop: Vec<u32> = self
            .doc
            .get_pages()
            .into_keys()
            .filter(|&n| n != keep)
            .collect();

        let mut doc = self.doc.clone();
        if !drop.is_empty() {
            doc.delete_pages(&drop);
            doc.prune_objects();
        }
        Ok(Self {
            doc,
            source: self.source.clone(),
        })
    }

    /// Save the document, creating parent directories.
    pub fn save(&mut self, output: &Path) -> Result<()> {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.doc.save(output)?;
        tracing::info!(path = %output.display(), "wrote PDF");
        Ok(())
    }

    /// Extract one page and save it as its own document.
    pub fn write_single_page(&self, page_no: usize, output: &Path) -> Result<()> {
        self.extract_page(page_no)?.save(output)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Look up a rectangle attribute on a node or its ancestors.
    fn inherited_box(&self, start: ObjectId, key: &[u8]) -> Option<PageRect> {
        let mut id = start;
        for _ in 0..MAX_INHERITANCE_DEPTH {
            let dict = self.doc.get_dictionary(id).ok()?;
            if let Ok(value) = dict.get(key) {
                return self.read_rect(value);
            }
            id = parent_of(dict)?;
        }
        None
    }

    fn read_rect(&self, value: &Object) -> Option<PageRect> {
        let items = self.resolve(value)?.as_array().ok()?;
        if items.len() != 4 {
            return None;
        }
        let mut corners = [0.0f64; 4];
        for (slot, item) in corners.iter_mut().zip(items) {
            *slot = number(self.resolve(item)?)?;
        }
        let [x0, y0, x1, y1] = corners;
        Some(PageRect::new(x0, y0, x1, y1))
    }

    fn resolve<'a>(&'a self, value: &'a Object) -> Option<&'a Object> {
        match value {
            Object::Reference(id) => self.doc.get_object(*id).ok(),
            other => Some(other),
        }
    }
}

fn parent_of(dict: &Dictionary) -> Option<ObjectId> {
    dict.get(b"Parent").ok()?.as_reference().ok()
}

fn number(value: &Object) -> Option<f64> {
    match value {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}
