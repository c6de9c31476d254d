// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native file and message dialogs (rfd).

use std::path::{Path, PathBuf};

use pdftool_core::PdfToolError;
use pdftool_core::human_errors::{Severity, humanize_error};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

fn file_dialog(title: &str, start: Option<&Path>) -> FileDialog {
    let dialog = FileDialog::new().set_title(title);
    match start {
        Some(dir) if dir.is_dir() => dialog.set_directory(dir),
        _ => dialog,
    }
}

/// Ask for one PDF to open.
pub fn pick_pdf(start: Option<&Path>) -> Option<PathBuf> {
    file_dialog("Open PDF", start)
        .add_filter("PDF", &["pdf"])
        .pick_file()
}

/// Ask for any number of PDFs; empty when cancelled.
pub fn pick_pdfs(start: Option<&Path>) -> Vec<PathBuf> {
    file_dialog("Add PDFs", start)
        .add_filter("PDF", &["pdf"])
        .pick_files()
        .unwrap_or_default()
}

pub fn pick_folder(title: &str, start: Option<&Path>) -> Option<PathBuf> {
    file_dialog(title, start).pick_folder()
}

/// Ask where to save a file, suggesting `default_name`.
pub fn save_file(
    title: &str,
    default_name: &str,
    filter: (&str, &str),
    start: Option<&Path>,
) -> Option<PathBuf> {
    let (filter_name, extension) = filter;
    file_dialog(title, start)
        .set_file_name(default_name)
        .add_filter(filter_name, &[extension])
        .save_file()
}

/// Log a failed operation and show it in a modal dialog.
pub fn show_error(operation: &str, err: &PdfToolError) {
    tracing::error!(operation, error = %err, "operation failed");

    let human = humanize_error(err);
    let level = match human.severity {
        Severity::ActionRequired => MessageLevel::Warning,
        Severity::Permanent | Severity::Environment => MessageLevel::Error,
    };
    MessageDialog::new()
        .set_level(level)
        .set_title(format!("{operation}: {}", human.message))
        .set_description(format!("{}\n\nDetails: {err}", human.suggestion))
        .set_buttons(MessageButtons::Ok)
        .show();
}

/// Show a success message.
pub fn show_info(title: &str, text: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title(title)
        .set_description(text)
        .set_buttons(MessageButtons::Ok)
        .show();
}
