// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for PDF Tool.

use thiserror::Error;

/// Top-level error type for all PDF Tool operations.
#[derive(Debug, Error)]
pub enum PdfToolError {
    // -- PDF errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("page {page} out of range (document has {count} pages)")]
    PageOutOfRange { page: u32, count: usize },

    #[error("rotation must be a multiple of 90, got {0}")]
    InvalidRotation(i32),

    #[error("at least {required} PDF files are needed, got {given}")]
    NotEnoughInputs { required: usize, given: usize },

    #[error("the document has no pages")]
    NoPages,

    #[error("no pages selected for rotation")]
    NoRotation,

    #[error("no text found in the document")]
    NoText,

    // -- Images --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("the document contains no extractable images")]
    NoImages,

    // -- Invoices --
    #[error("no embedded files found in the document")]
    NoEmbeddedFiles,

    #[error("no ZUGFeRD invoice data found: {0}")]
    NoInvoiceData(String),

    #[error("XML parsing failed: {0}")]
    XmlError(String),

    // -- Outputs --
    #[error("archive creation failed: {0}")]
    ArchiveError(String),

    #[error("document conversion failed: {0}")]
    ConversionError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PdfToolError>;
