// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the error dialogs.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The severity drives the dialog level (warning vs. error).

use crate::error::PdfToolError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The user has to do something first (pick more files, open a PDF).
    ActionRequired,
    /// The input cannot be processed as-is.
    Permanent,
    /// Something around the operation failed (disk full, permissions).
    Environment,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (dialog title).
    pub message: String,
    /// What the user should try (dialog body).
    pub suggestion: String,
    /// Drives the dialog icon.
    pub severity: Severity,
}

impl HumanError {
    fn new(message: &str, suggestion: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
            severity,
        }
    }
}

/// Convert a `PdfToolError` into dialog text.
pub fn humanize_error(err: &PdfToolError) -> HumanError {
    match err {
        PdfToolError::PdfError(_) => HumanError::new(
            "There's a problem with this PDF file.",
            "The file may be damaged or password protected. Try opening it in a PDF viewer first, or choose a different file.",
            Severity::Permanent,
        ),

        PdfToolError::PageOutOfRange { page, count } => HumanError::new(
            "That page doesn't exist.",
            format!("Page {page} was requested but the document only has {count} pages."),
            Severity::ActionRequired,
        ),

        PdfToolError::InvalidRotation(_) => HumanError::new(
            "Pages can only be turned in quarter steps.",
            "Use the rotate left or rotate right buttons.",
            Severity::ActionRequired,
        ),

        PdfToolError::NotEnoughInputs { required, .. } => HumanError::new(
            "Not enough files to merge.",
            format!("Add at least {required} PDF files to the list, then try again."),
            Severity::ActionRequired,
        ),

        PdfToolError::NoPages => HumanError::new(
            "This PDF has no pages.",
            "There is nothing to split. Open a different PDF.",
            Severity::Permanent,
        ),

        PdfToolError::NoRotation => HumanError::new(
            "No page is selected.",
            "Select a page, then use the rotate left or rotate right buttons.",
            Severity::ActionRequired,
        ),

        PdfToolError::NoText => HumanError::new(
            "This PDF contains no text.",
            "The pages are probably scanned images. Text can only be exported from PDFs with real text.",
            Severity::Permanent,
        ),

        PdfToolError::ImageError(_) => HumanError::new(
            "The images in this PDF couldn't be extracted.",
            "One of the images uses a format PDF Tool can't convert, so no images were saved. Try exporting them with a PDF viewer.",
            Severity::Permanent,
        ),

        PdfToolError::NoImages => HumanError::new(
            "This PDF contains no images.",
            "Only pictures embedded in the PDF can be extracted. Vector drawings and text are not images.",
            Severity::Permanent,
        ),

        PdfToolError::NoEmbeddedFiles => HumanError::new(
            "This PDF has no attached files.",
            "ZUGFeRD invoices carry their data as an attached XML file. This document is a plain PDF.",
            Severity::Permanent,
        ),

        PdfToolError::NoInvoiceData(_) => HumanError::new(
            "No invoice data found.",
            "The PDF has attachments, but none of them is a ZUGFeRD or Factur-X invoice.",
            Severity::Permanent,
        ),

        PdfToolError::XmlError(_) => HumanError::new(
            "The invoice data is damaged.",
            "The attached XML file couldn't be read. Ask the sender for a corrected invoice.",
            Severity::Permanent,
        ),

        PdfToolError::ArchiveError(_) => HumanError::new(
            "The ZIP file couldn't be created.",
            "Check that the target folder is writable, or save the images to a folder instead.",
            Severity::Environment,
        ),

        PdfToolError::ConversionError(_) => HumanError::new(
            "The conversion didn't work.",
            "Try again with a different output location.",
            Severity::Environment,
        ),

        PdfToolError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError::new(
                "The file couldn't be found.",
                "It may have been moved or deleted. Try choosing the file again.",
                Severity::ActionRequired,
            ),
            std::io::ErrorKind::PermissionDenied => HumanError::new(
                "PDF Tool doesn't have permission to use that location.",
                "Check the file permissions, or choose a different folder.",
                Severity::Environment,
            ),
            _ => HumanError::new(
                "There was a problem reading or writing a file.",
                "Try again. If this keeps happening, your disk may be full.",
                Severity::Environment,
            ),
        },

        PdfToolError::Serialization(_) => HumanError::new(
            "The settings couldn't be saved.",
            "Try again. If this keeps happening, delete the settings file and restart PDF Tool.",
            Severity::Environment,
        ),
    }
}
