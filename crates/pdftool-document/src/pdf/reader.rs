// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader: open, inspect, split, rotate and read text from existing PDF
// documents using the `lopdf` crate.

use std::path::{Path, PathBuf};

use lopdf::{Document, Object, ObjectId};
use pdftool_core::error::{PdfToolError, Result};
use pdftool_core::output;
use pdftool_core::types::PageInfo;
use tracing::{debug, info, instrument, warn};

use super::pages::{self, PageCopier};

/// A4 portrait in points, used when a page tree carries no MediaBox at all.
const FALLBACK_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 595.0, 842.0];

/// An opened PDF document.
///
/// Wraps `lopdf::Document` and provides the page-level operations of the
/// application. Operations that modify pages return fresh bytes and leave the
/// reader untouched.
#[derive(Debug, Clone)]
pub struct PdfReader {
    document: Document,
    /// Source path, if opened from a file.
    source_path: Option<PathBuf>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            PdfToolError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.to_path_buf()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            PdfToolError::PdfError(format!("failed to load PDF from memory: {err}"))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    /// Reload from bytes while keeping the original source path, e.g. after a
    /// rotation was saved back to disk.
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    // -- Inspection -----------------------------------------------------------

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// File name of the source, or `document.pdf` for in-memory documents.
    pub fn display_name(&self) -> String {
        self.source_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string())
    }

    /// The underlying lopdf document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Size and rotation of every page, in page order.
    pub fn pages(&self) -> Vec<PageInfo> {
        self.document
            .get_pages()
            .into_iter()
            .map(|(number, page_id)| self.page_info(number, page_id))
            .collect()
    }

    fn page_info(&self, number: u32, page_id: ObjectId) -> PageInfo {
        let media_box = pages::inherited_attribute(&self.document, page_id, b"MediaBox")
            .and_then(|object| match object {
                Object::Array(values) if values.len() == 4 => {
                    let numbers: Vec<f32> = values
                        .iter()
                        .filter_map(|value| pages::resolve(&self.document, value))
                        .filter_map(pages::number)
                        .collect();
                    <[f32; 4]>::try_from(numbers).ok()
                }
                _ => None,
            })
            .unwrap_or(FALLBACK_MEDIA_BOX);

        PageInfo {
            number,
            width_pt: (media_box[2] - media_box[0]).abs(),
            height_pt: (media_box[3] - media_box[1]).abs(),
            rotation: pages::page_rotation(&self.document, page_id),
        }
    }

    fn page_id(&self, page_number: u32) -> Result<ObjectId> {
        let pages = self.document.get_pages();
        pages
            .get(&page_number)
            .copied()
            .ok_or(PdfToolError::PageOutOfRange {
                page: page_number,
                count: pages.len(),
            })
    }

    // -- Split ----------------------------------------------------------------

    /// Extract a single page (1-indexed) into a new standalone PDF document.
    ///
    /// Returns the serialised bytes of the single-page PDF.
    #[instrument(skip(self))]
    pub fn extract_page(&self, page_number: u32) -> Result<Vec<u8>> {
        let page_id = self.page_id(page_number)?;

        let (mut new_doc, pages_id) = pages::new_document();
        PageCopier::new(&self.document).copy_page(&mut new_doc, pages_id, page_id)?;
        let output = pages::save_to_bytes(&mut new_doc, "extracted page")?;

        debug!(page_number, output_bytes = output.len(), "Page extracted");
        Ok(output)
    }

    /// Write every page as `page_<n>.pdf` into a new timestamped directory
    /// below `base_dir`.
    ///
    /// Returns the written paths in page order.
    #[instrument(skip(self), fields(base_dir = %base_dir.display()))]
    pub fn split_into_pages(&self, base_dir: &Path) -> Result<Vec<PathBuf>> {
        let total = self.page_count() as u32;
        if total == 0 {
            return Err(PdfToolError::NoPages);
        }

        let written = output::with_batch_dir(base_dir, |batch_dir| {
            info!(total, dir = %batch_dir.display(), "Splitting PDF");
            let mut written = Vec::with_capacity(total as usize);
            for page_number in 1..=total {
                let bytes = self.extract_page(page_number)?;
                let path = batch_dir.join(format!("page_{page_number}.pdf"));
                std::fs::write(&path, bytes)?;
                written.push(path);
            }
            Ok(written)
        })?;

        info!(files = written.len(), "Split complete");
        Ok(written)
    }

    // -- Rotation -------------------------------------------------------------

    /// Rotate a single page by `degrees`. See [`PdfReader::rotate_pages`].
    pub fn rotate_page(&self, page_number: u32, degrees: i32) -> Result<Vec<u8>> {
        self.rotate_pages(&[(page_number, degrees)])
    }

    /// Turn pages by the given number of degrees (multiples of 90, positive
    /// is clockwise).
    ///
    /// Returns the full document as bytes with the rotations applied. The
    /// request is validated completely before anything is changed.
    #[instrument(skip_all, fields(requested = rotations.len()))]
    pub fn rotate_pages(&self, rotations: &[(u32, i32)]) -> Result<Vec<u8>> {
        if rotations.is_empty() {
            return Err(PdfToolError::NoRotation);
        }

        let mut targets = Vec::with_capacity(rotations.len());
        for &(page_number, degrees) in rotations {
            if degrees % 90 != 0 {
                return Err(PdfToolError::InvalidRotation(degrees));
            }
            targets.push((page_number, self.page_id(page_number)?, degrees));
        }

        let mut doc = self.document.clone();
        for (page_number, page_id, degrees) in targets {
            let existing = pages::page_rotation(&doc, page_id);
            let rotation = (existing + degrees).rem_euclid(360);

            // Set on the page itself; an inherited value stays on the parent
            // for the page's siblings.
            if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(page_id) {
                dict.set("Rotate", Object::Integer(rotation as i64));
            }
            info!(page_number, existing, rotation, "Page rotated");
        }

        pages::save_to_bytes(&mut doc, "rotated PDF")
    }

    // -- Text -----------------------------------------------------------------

    /// Text of the whole document, pages in order.
    ///
    /// A document that yields only whitespace (typically a scan) is reported
    /// as [`PdfToolError::NoText`].
    #[instrument(skip(self))]
    pub fn extract_text(&self) -> Result<String> {
        let mut text = String::new();
        for page_number in self.document.get_pages().keys() {
            let page_text = self.raw_page_text(*page_number)?;
            text.push_str(&page_text);
            if !text.ends_with('\n') {
                text.push('\n');
            }
        }

        if text.trim().is_empty() {
            return Err(PdfToolError::NoText);
        }
        debug!(chars = text.len(), "Text extracted");
        Ok(text)
    }

    /// Text of one page (1-indexed). May be empty.
    pub fn extract_page_text(&self, page_number: u32) -> Result<String> {
        self.raw_page_text(page_number)
    }

    /// Decodable text of one page. Runs the font encodings cannot map
    /// (CID fonts without `/ToUnicode`, for instance) are skipped with a
    /// warning; the rest of the page still counts.
    fn raw_page_text(&self, page_number: u32) -> Result<String> {
        let page_id = self.page_id(page_number)?;
        if self.document.get_page_contents(page_id).is_empty() {
            return Ok(String::new());
        }

        let mut text = String::new();
        for chunk in self.document.extract_text_chunks(&[page_number]) {
            match chunk {
                Ok(fragment) => text.push_str(&fragment),
                Err(err) => warn!(page_number, %err, "Skipping undecodable text"),
            }
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use lopdf::dictionary;

    fn reader_for(labels: &[&str]) -> PdfReader {
        let mut doc = test_support::pdf_with_pages(labels);
        PdfReader::from_bytes(&test_support::to_bytes(&mut doc)).expect("load fixture")
    }

    #[test]
    fn garbage_bytes_are_a_pdf_error() {
        let result = PdfReader::from_bytes(b"definitely not a pdf");
        assert!(matches!(result, Err(PdfToolError::PdfError(_))));
    }

    #[test]
    fn pages_report_inherited_media_box() {
        let reader = reader_for(&["A", "B"]);
        let pages = reader.pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].number, 2);
        assert_eq!(pages[0].width_pt, 595.0);
        assert_eq!(pages[0].height_pt, 842.0);
        assert_eq!(pages[0].rotation, 0);
    }

    #[test]
    fn extract_page_out_of_range() {
        let reader = reader_for(&["A", "B"]);
        assert!(matches!(
            reader.extract_page(3),
            Err(PdfToolError::PageOutOfRange { page: 3, count: 2 })
        ));
        assert!(reader.extract_page(0).is_err());
    }

    #[test]
    fn extracted_page_is_standalone() {
        let reader = reader_for(&["A", "B", "C"]);
        let bytes = reader.extract_page(2).expect("extract");
        let single = Document::load_mem(&bytes).expect("reload");
        assert_eq!(test_support::page_labels(&single), vec!["B"]);
    }

    #[test]
    fn split_writes_one_file_per_page() {
        let reader = reader_for(&["A", "B", "C", "D"]);
        let base = tempfile::tempdir().expect("tempdir");

        let paths = reader.split_into_pages(base.path()).expect("split");

        assert_eq!(paths.len(), 4);
        let batch_dir = paths[0].parent().expect("batch dir");
        assert_eq!(batch_dir.parent(), Some(base.path()));
        for (index, (path, label)) in paths.iter().zip(["A", "B", "C", "D"]).enumerate() {
            assert_eq!(
                path.file_name().and_then(|n| n.to_str()),
                Some(format!("page_{}.pdf", index + 1).as_str())
            );
            let doc = Document::load(path).expect("reload split page");
            assert_eq!(doc.get_pages().len(), 1);
            assert_eq!(test_support::page_labels(&doc), vec![label]);
        }
    }

    #[test]
    fn second_split_goes_to_a_new_directory() {
        let reader = reader_for(&["A"]);
        let base = tempfile::tempdir().expect("tempdir");
        let first = reader.split_into_pages(base.path()).expect("first split");
        let second = reader.split_into_pages(base.path()).expect("second split");
        assert_ne!(first[0].parent(), second[0].parent());
    }

    #[test]
    fn empty_document_cannot_be_split() {
        let (mut doc, _) = pages::new_document();
        let reader = PdfReader::from_bytes(&test_support::to_bytes(&mut doc)).expect("load");
        let base = tempfile::tempdir().expect("tempdir");

        assert!(matches!(reader.split_into_pages(base.path()), Err(PdfToolError::NoPages)));
        assert_eq!(std::fs::read_dir(base.path()).expect("read base").count(), 0);
    }

    #[test]
    fn rotate_pages_accumulates_and_normalises() {
        let reader = reader_for(&["A", "B"]);
        let once = PdfReader::from_bytes(&reader.rotate_pages(&[(1, 90), (2, -90)]).expect("rotate"))
            .expect("reload");
        assert_eq!(once.pages()[0].rotation, 90);
        assert_eq!(once.pages()[1].rotation, 270);

        let twice = PdfReader::from_bytes(&once.rotate_page(1, 270).expect("rotate")).expect("reload");
        assert_eq!(twice.pages()[0].rotation, 0);
    }

    #[test]
    fn rotate_pages_validates_request() {
        let reader = reader_for(&["A"]);
        assert!(matches!(reader.rotate_page(1, 45), Err(PdfToolError::InvalidRotation(45))));
        assert!(matches!(
            reader.rotate_page(5, 90),
            Err(PdfToolError::PageOutOfRange { page: 5, .. })
        ));
        assert!(matches!(reader.rotate_pages(&[]), Err(PdfToolError::NoRotation)));
    }

    #[test]
    fn text_contains_every_page_in_order() {
        let reader = reader_for(&["Alpha", "Beta"]);
        let text = reader.extract_text().expect("text");
        let alpha = text.find("Page Alpha").expect("first page text");
        let beta = text.find("Page Beta").expect("second page text");
        assert!(alpha < beta);

        let second = reader.extract_page_text(2).expect("page text");
        assert!(second.contains("Page Beta"));
    }

    #[test]
    fn unmapped_font_does_not_hide_readable_text() {
        let mut doc = test_support::pdf_with_pages(&["Alpha", "Beta"]);
        test_support::add_unmapped_cid_font(&mut doc);
        let reader = PdfReader::from_bytes(&test_support::to_bytes(&mut doc)).expect("load");

        let text = reader.extract_text().expect("text");
        assert!(text.contains("Page Alpha"));
        assert!(text.contains("Page Beta"));
        assert!(reader.extract_page_text(1).expect("page text").contains("Page Alpha"));
    }

    #[test]
    fn blank_document_has_no_text() {
        let (mut doc, pages_id) = pages::new_document();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        pages::append_kid(&mut doc, pages_id, page_id).expect("append");
        let reader = PdfReader::from_bytes(&test_support::to_bytes(&mut doc)).expect("load");

        assert_eq!(reader.pages()[0].width_pt, 612.0);
        assert!(matches!(reader.extract_text(), Err(PdfToolError::NoText)));
    }
}
