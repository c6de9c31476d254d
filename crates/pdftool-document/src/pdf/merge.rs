// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Concatenate several PDFs into one.

use std::path::{Path, PathBuf};

use pdftool_core::error::{PdfToolError, Result};
use tracing::{debug, info, instrument};

use super::pages::{self, PageCopier};
use super::reader::PdfReader;

/// Smallest number of inputs a merge accepts.
pub const MIN_MERGE_INPUTS: usize = 2;

/// Merge already opened documents, pages in input order.
#[instrument(skip_all, fields(inputs = readers.len()))]
pub fn merge_documents(readers: &[PdfReader]) -> Result<Vec<u8>> {
    if readers.len() < MIN_MERGE_INPUTS {
        return Err(PdfToolError::NotEnoughInputs {
            required: MIN_MERGE_INPUTS,
            given: readers.len(),
        });
    }

    let (mut merged, pages_id) = pages::new_document();
    let mut total = 0usize;

    for (index, reader) in readers.iter().enumerate() {
        let source = reader.document();
        // One copier per source keeps shared resources shared.
        let mut copier = PageCopier::new(source);
        for page_id in source.get_pages().into_values() {
            copier.copy_page(&mut merged, pages_id, page_id)?;
            total += 1;
        }
        debug!(input = index + 1, pages = reader.page_count(), "Input appended");
    }

    info!(inputs = readers.len(), pages = total, "Merging PDFs");
    pages::save_to_bytes(&mut merged, "merged PDF")
}

/// Merge the files at `paths` into `output`. Returns the merged page count.
#[instrument(skip_all, fields(inputs = paths.len(), output = %output.display()))]
pub fn merge_files(paths: &[PathBuf], output: &Path) -> Result<usize> {
    if paths.len() < MIN_MERGE_INPUTS {
        return Err(PdfToolError::NotEnoughInputs {
            required: MIN_MERGE_INPUTS,
            given: paths.len(),
        });
    }

    let readers = paths
        .iter()
        .map(PdfReader::open)
        .collect::<Result<Vec<_>>>()?;
    let page_count = readers.iter().map(PdfReader::page_count).sum();

    let bytes = merge_documents(&readers)?;
    std::fs::write(output, bytes)?;

    info!(page_count, "Merged PDF written");
    Ok(page_count)
}
