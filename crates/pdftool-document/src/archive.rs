// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ZIP output for extracted images, and the package writer behind DOCX export.

use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use pdftool_core::error::{PdfToolError, Result};
use tracing::{info, instrument, warn};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::image::ExtractedImage;

/// Pack extracted images into a deflate-compressed archive at `zip_path`.
///
/// Entries carry the image file names, flat at the archive root. Returns the
/// number of entries written.
#[instrument(skip_all, fields(count = images.len(), zip_path = %zip_path.display()))]
pub fn zip_images(images: &[ExtractedImage], zip_path: &Path) -> Result<usize> {
    let entries = images
        .iter()
        .map(|image| Ok::<_, PdfToolError>((image.file_name(), Cow::Borrowed(image.data.as_slice()))));
    write_archive(zip_path, entries)
}

/// Pack existing files into an archive, each under its own file name.
#[instrument(skip_all, fields(count = paths.len(), zip_path = %zip_path.display()))]
pub fn create_zip_from_files(paths: &[PathBuf], zip_path: &Path) -> Result<usize> {
    let entries = paths.iter().map(|path| -> Result<(String, Cow<'static, [u8]>)> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                PdfToolError::ArchiveError(format!("{} has no file name", path.display()))
            })?;
        Ok((name, Cow::Owned(std::fs::read(path)?)))
    });
    write_archive(zip_path, entries)
}

/// Write `(name, data)` entries to a new archive. A failed write removes the
/// incomplete file.
pub(crate) fn write_archive<'a, I>(zip_path: &Path, entries: I) -> Result<usize>
where
    I: Iterator<Item = Result<(String, Cow<'a, [u8]>)>>,
{
    let result = write_entries(zip_path, entries);
    if result.is_err() && zip_path.exists() {
        if let Err(err) = std::fs::remove_file(zip_path) {
            warn!(%err, "could not remove incomplete archive");
        }
    }
    result
}

fn write_entries<'a, I>(zip_path: &Path, entries: I) -> Result<usize>
where
    I: Iterator<Item = Result<(String, Cow<'a, [u8]>)>>,
{
    let file = File::create(zip_path)?;
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut written = 0usize;
    for entry in entries {
        let (name, data) = entry?;
        writer
            .start_file(name.as_str(), options)
            .map_err(|err| PdfToolError::ArchiveError(format!("cannot add {name}: {err}")))?;
        writer.write_all(&data)?;
        written += 1;
    }

    writer
        .finish()
        .map_err(|err| PdfToolError::ArchiveError(format!("cannot finish archive: {err}")))?;
    info!(entries = written, "Archive written");
    Ok(written)
}
