// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state: reactive signals for the Dioxus UI.

use std::rc::Rc;

use pdftool_core::types::PageInfo;
use pdftool_document::PdfReader;

/// The PDF the feature pages work on.
#[derive(Debug, Clone)]
pub struct OpenDocument {
    pub reader: Rc<PdfReader>,
    /// Page sizes and rotations, read once on open.
    pub pages: Vec<PageInfo>,
    /// Rotated document bytes not yet written to disk.
    pub unsaved: Option<Vec<u8>>,
}

impl OpenDocument {
    pub fn new(reader: PdfReader) -> Self {
        let pages = reader.pages();
        Self {
            reader: Rc::new(reader),
            pages,
            unsaved: None,
        }
    }
}

/// Shared state accessible to all pages via `use_context`.
///
/// Settings are not mirrored here; pages read the saved configuration from
/// `AppServices`.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Currently opened PDF, if any.
    pub document: Option<OpenDocument>,
}

impl AppState {

    /// Replace the opened document.
    pub fn open(&mut self, reader: PdfReader) {
        self.document = Some(OpenDocument::new(reader));
    }
}
