// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pdftool-document: document processing for PDF Tool.
//
// Provides PDF operations (open, inspect, split, merge, rotate, text export),
// embedded image extraction with folder or ZIP output, PDF to DOCX conversion,
// and a reader for ZUGFeRD / Factur-X invoice data attached to PDFs.

pub mod archive;
pub mod convert;
pub mod image;
pub mod pdf;
pub mod zugferd;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export the primary entry points so callers can use `pdftool_document::PdfReader` etc.
pub use self::image::extractor::{ExtractedImage, extract_images, save_images};
pub use pdf::merge::{merge_documents, merge_files};
pub use pdf::reader::PdfReader;
pub use zugferd::{ZugferdDocument, read_invoice, read_invoice_file};
