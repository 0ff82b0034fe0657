use std::path::Path;

use mupdf::pdf::{PdfDocument, PdfObject};
use mupdf::{Document, Quad, TextPageFlags};

use verselink_core::{BackendError, CharRecord, LinkSink, Rect, TextSource};

/// MuPDF-based implementation of [`TextSource`].
///
/// This crate is the sole AGPL island — it isolates the mupdf dependency
/// (which is AGPL-3.0) so that the matching core does not transitively
/// depend on it.
///
/// Characters are reported per structure line, with each glyph's quad
/// collapsed to its bounding rectangle and the span font size attached; the
/// core's normalizer uses the sizes to tell verse numbers from superscript
/// footnote markers.
pub struct MupdfTextSource {
    doc: Document,
}

impl MupdfTextSource {
    pub fn open(path: &Path) -> Result<Self, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;
        let doc = Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;
        Ok(Self { doc })
    }
}

impl TextSource for MupdfTextSource {
    fn page_count(&self) -> Result<usize, BackendError> {
        self.doc
            .page_count()
            .map(|n| n as usize)
            .map_err(|e| BackendError::ExtractionError(e.to_string()))
    }

    fn page_lines(&self, page_index: usize) -> Result<Vec<Vec<CharRecord>>, BackendError> {
        let page = self
            .doc
            .load_page(page_index as i32)
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

        let mut lines = Vec::new();
        for (block_no, block) in text_page.blocks().enumerate() {
            for (line_no, line) in block.lines().enumerate() {
                let mut records = Vec::new();
                for ch in line.chars() {
                    let Some(glyph) = ch.char() else {
                        continue;
                    };
                    records.push(CharRecord {
                        ch: glyph,
                        rect: quad_bounds(&ch.quad()),
                        size: ch.size(),
                        block: block_no as u32,
                        line: line_no as u32,
                    });
                }
                lines.push(records);
            }
        }
        Ok(lines)
    }
}

fn quad_bounds(quad: &Quad) -> Rect {
    let xs = [quad.ul.x, quad.ur.x, quad.ll.x, quad.lr.x];
    let ys = [quad.ul.y, quad.ur.y, quad.ll.y, quad.lr.y];
    Rect {
        x0: xs.iter().copied().fold(f32::INFINITY, f32::min),
        y0: ys.iter().copied().fold(f32::INFINITY, f32::min),
        x1: xs.iter().copied().fold(f32::NEG_INFINITY, f32::max),
        y1: ys.iter().copied().fold(f32::NEG_INFINITY, f32::max),
    }
}

/// MuPDF-based implementation of [`LinkSink`].
///
/// Each accepted link becomes a borderless `/Link` annotation with a `/URI`
/// action, appended to the page's `/Annots` array. Rectangles arrive in
/// fixed-text space (top-left origin) and are flipped into PDF user space
/// against the page bounds before being written.
pub struct MupdfLinkSink {
    doc: PdfDocument,
}

impl MupdfLinkSink {
    pub fn open(path: &Path) -> Result<Self, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;
        let doc =
            PdfDocument::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;
        Ok(Self { doc })
    }

    /// Write the annotated document to `path`.
    pub fn save(&mut self, path: &Path) -> Result<(), BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::AnnotationError("invalid path encoding".into()))?;
        self.doc
            .save(path_str)
            .map_err(|e| BackendError::AnnotationError(e.to_string()))
    }

    fn link_annotation(
        &mut self,
        rect: &Rect,
        page_height: f32,
        uri: &str,
    ) -> Result<PdfObject, BackendError> {
        let err = |e: mupdf::Error| BackendError::AnnotationError(e.to_string());

        let mut rect_arr = self.doc.new_array().map_err(err)?;
        rect_arr.array_push(self.doc.new_real(rect.x0).map_err(err)?).map_err(err)?;
        rect_arr
            .array_push(self.doc.new_real(page_height - rect.y1).map_err(err)?)
            .map_err(err)?;
        rect_arr.array_push(self.doc.new_real(rect.x1).map_err(err)?).map_err(err)?;
        rect_arr
            .array_push(self.doc.new_real(page_height - rect.y0).map_err(err)?)
            .map_err(err)?;

        let mut border = self.doc.new_dict().map_err(err)?;
        border
            .dict_put("W", self.doc.new_int(0).map_err(err)?)
            .map_err(err)?;

        let mut action = self.doc.new_dict().map_err(err)?;
        action
            .dict_put("S", self.doc.new_name("URI").map_err(err)?)
            .map_err(err)?;
        action
            .dict_put("URI", self.doc.new_string(uri).map_err(err)?)
            .map_err(err)?;

        let mut annot = self.doc.new_dict().map_err(err)?;
        annot
            .dict_put("Type", self.doc.new_name("Annot").map_err(err)?)
            .map_err(err)?;
        annot
            .dict_put("Subtype", self.doc.new_name("Link").map_err(err)?)
            .map_err(err)?;
        annot.dict_put("Rect", rect_arr).map_err(err)?;
        annot.dict_put("BS", border).map_err(err)?;
        annot.dict_put("A", action).map_err(err)?;

        self.doc.add_object(&annot).map_err(err)
    }
}

impl LinkSink for MupdfLinkSink {
    fn insert_link(
        &mut self,
        page_index: usize,
        rect: Rect,
        uri: &str,
    ) -> Result<(), BackendError> {
        let err = |e: mupdf::Error| BackendError::AnnotationError(e.to_string());

        let page = self
            .doc
            .load_page(page_index as i32)
            .map_err(err)?;
        let bounds = page.bounds().map_err(err)?;
        let page_height = bounds.y1 - bounds.y0;

        let annot_ref = self.link_annotation(&rect, page_height, uri)?;

        let mut page_obj = self.doc.find_page(page_index as i32).map_err(err)?;
        match page_obj.get_dict("Annots").map_err(err)? {
            Some(mut annots) => {
                annots.array_push(annot_ref).map_err(err)?;
            }
            None => {
                let mut annots = self.doc.new_array().map_err(err)?;
                annots.array_push(annot_ref).map_err(err)?;
                page_obj.dict_put("Annots", annots).map_err(err)?;
            }
        }
        Ok(())
    }
}
