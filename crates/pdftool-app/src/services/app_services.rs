// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: owns the persisted configuration and runs the
// document operations for the Dioxus UI.
//
// Every operation is synchronous and returns either a short success summary
// for the info dialog or the error for the error dialog.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Local;
use pdftool_core::error::{PdfToolError, Result};
use pdftool_core::output::dated_file_name;
use pdftool_core::types::InvoiceData;
use pdftool_core::{AppConfig, ImageExportMode};
use pdftool_document::{
    ExtractedImage, PdfReader, ZugferdDocument, archive, convert, extract_images, merge_files,
    read_invoice, save_images,
};
use tracing::{info, warn};

use super::data_dir;

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    data_dir: PathBuf,
    config: Arc<Mutex<AppConfig>>,
}

impl AppServices {
    /// Resolve the data directory and load the saved settings, falling back
    /// to defaults.
    pub fn init() -> Self {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");
        Self::with_data_dir(dir)
    }

    fn with_data_dir(dir: PathBuf) -> Self {
        let config = AppConfig::load(&dir).unwrap_or_default();
        Self {
            data_dir: dir,
            config: Arc::new(Mutex::new(config)),
        }
    }

    fn lock_config(&self) -> MutexGuard<'_, AppConfig> {
        self.config.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // -- Settings ------------------------------------------------------------

    pub fn config(&self) -> AppConfig {
        self.lock_config().clone()
    }

    /// Persist `config` to `<data dir>/config.json` and make it current.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        config.save(&self.data_dir)?;
        *self.lock_config() = config.clone();
        info!("settings saved");
        Ok(())
    }

    /// Base directory for split pages and extracted images.
    pub fn export_dir(&self) -> PathBuf {
        self.lock_config()
            .export_dir
            .clone()
            .unwrap_or_else(data_dir::home_dir)
    }

    /// Start directory for save dialogs: the export directory, else the
    /// folder of the opened PDF.
    pub fn save_dir(&self, reader: Option<&PdfReader>) -> PathBuf {
        let configured = self.lock_config().export_dir.clone();
        configured
            .or_else(|| {
                reader
                    .and_then(PdfReader::source_path)
                    .and_then(Path::parent)
                    .map(Path::to_path_buf)
            })
            .unwrap_or_else(data_dir::home_dir)
    }

    fn describe(&self, summary: String, path: &Path) -> String {
        if self.lock_config().show_output_path {
            format!("{summary}\n\n{}", path.display())
        } else {
            summary
        }
    }

    // -- Documents -----------------------------------------------------------

    /// Open a PDF and remember its folder for the next dialog.
    pub fn open_document(&self, path: &Path) -> Result<PdfReader> {
        let reader = PdfReader::open(path)?;
        info!(file = %reader.display_name(), pages = reader.page_count(), "PDF opened");

        let mut config = self.config();
        let folder = path.parent().map(Path::to_path_buf);
        if folder.is_some() && config.last_open_dir != folder {
            config.last_open_dir = folder;
            if let Err(err) = self.save_config(&config) {
                warn!(error = %err, "could not remember last folder");
            }
        }
        Ok(reader)
    }

    /// Write edited document bytes to `path` and reopen the result.
    pub fn save_document(&self, bytes: &[u8], path: &Path) -> Result<PdfReader> {
        std::fs::write(path, bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "PDF saved");
        Ok(PdfReader::from_bytes(bytes)?.with_source_path(path))
    }

    pub fn export_text(&self, reader: &PdfReader, output: &Path) -> Result<String> {
        convert::export_text(reader, output)?;
        Ok(self.describe("Text exported.".to_string(), output))
    }

    // -- Split / merge -------------------------------------------------------

    pub fn split(&self, reader: &PdfReader, base_dir: &Path) -> Result<String> {
        let files = reader.split_into_pages(base_dir)?;
        let folder = files
            .first()
            .and_then(|file| file.parent())
            .unwrap_or(base_dir);
        Ok(self.describe(format!("{} page file(s) written.", files.len()), folder))
    }

    pub fn default_merge_name(&self) -> String {
        dated_file_name("Merge", "pdf", &Local::now())
    }

    pub fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<String> {
        let pages = merge_files(inputs, output)?;
        Ok(self.describe(
            format!("{} files merged into {pages} page(s).", inputs.len()),
            output,
        ))
    }

    // -- Conversion ----------------------------------------------------------

    pub fn to_word(&self, reader: &PdfReader, output: &Path) -> Result<String> {
        let pages = convert::pdf_to_docx(reader, output)?;
        Ok(self.describe(format!("{pages} page(s) converted."), output))
    }

    // -- Images --------------------------------------------------------------

    pub fn extract_images(&self, reader: &PdfReader) -> Result<Vec<ExtractedImage>> {
        extract_images(reader)
    }

    pub fn default_zip_name(&self) -> String {
        dated_file_name("Images", "zip", &Local::now())
    }

    /// Write images to a timestamped folder under `target`, or into the ZIP
    /// file `target`, depending on `mode`.
    pub fn save_images(
        &self,
        images: &[ExtractedImage],
        mode: ImageExportMode,
        target: &Path,
    ) -> Result<String> {
        if images.is_empty() {
            return Err(PdfToolError::NoImages);
        }
        match mode {
            ImageExportMode::Folder => {
                let files = save_images(images, target)?;
                let folder = files.first().and_then(|f| f.parent()).unwrap_or(target);
                Ok(self.describe(format!("{} image(s) saved.", files.len()), folder))
            }
            ImageExportMode::Zip => {
                let count = archive::zip_images(images, target)?;
                Ok(self.describe(format!("{count} image(s) packed."), target))
            }
        }
    }

    // -- Invoices ------------------------------------------------------------

    pub fn read_invoice(&self, reader: &PdfReader) -> Result<ZugferdDocument> {
        read_invoice(reader)
    }

    /// Save the flat invoice record as pretty JSON.
    pub fn export_invoice_json(&self, invoice: &InvoiceData, output: &Path) -> Result<String> {
        let json = serde_json::to_string_pretty(invoice)?;
        std::fs::write(output, json)?;
        info!(path = %output.display(), "invoice record exported");
        Ok(self.describe("Invoice data saved.".to_string(), output))
    }
}
