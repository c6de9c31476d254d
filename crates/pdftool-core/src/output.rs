// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output locations: timestamped batch directories and dated default file
// names for save dialogs.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use tracing::{debug, warn};

use crate::error::Result;

/// Format used for batch directory names, e.g. `2026-10-18_14-03-59`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Format used for dated default file names, e.g. `Merge_2026-10-18.pdf`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render the batch directory label for a point in time.
pub fn timestamp_label<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Default file name such as `Merge_2026-10-18.pdf`.
pub fn dated_file_name<Tz: TimeZone>(prefix: &str, extension: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{prefix}_{}.{extension}", at.format(DATE_FORMAT))
}

/// Create a fresh `<base>/<timestamp>` directory for one batch of outputs.
pub fn timestamped_dir(base: &Path) -> Result<PathBuf> {
    timestamped_dir_at(base, &Local::now())
}

/// Same as [`timestamped_dir`] with an explicit clock value.
///
/// Two batches started within the same second get `_2`, `_3`, … suffixes so
/// an earlier batch is never overwritten.
pub fn timestamped_dir_at<Tz: TimeZone>(base: &Path, at: &DateTime<Tz>) -> Result<PathBuf>
where
    Tz::Offset: std::fmt::Display,
{
    std::fs::create_dir_all(base)?;
    let label = timestamp_label(at);

    let mut candidate = base.join(&label);
    let mut attempt = 1u32;
    while candidate.exists() {
        attempt += 1;
        candidate = base.join(format!("{label}_{attempt}"));
    }

    std::fs::create_dir(&candidate)?;
    debug!(path = %candidate.display(), "output directory created");
    Ok(candidate)
}

/// Create a batch directory below `base` and let `fill` write into it.
///
/// When `fill` fails the directory and whatever it already holds are
/// removed, so an aborted batch leaves nothing behind.
pub fn with_batch_dir<T, F>(base: &Path, fill: F) -> Result<T>
where
    F: FnOnce(&Path) -> Result<T>,
{
    let dir = timestamped_dir(base)?;
    let result = fill(&dir);
    if result.is_err() {
        if let Err(err) = std::fs::remove_dir_all(&dir) {
            warn!(path = %dir.display(), %err, "could not remove incomplete output directory");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 7, 9, 5, 1).single().expect("valid date")
    }

    #[test]
    fn label_uses_dashes_and_underscore() {
        assert_eq!(timestamp_label(&fixed_time()), "2026-03-07_09-05-01");
    }

    #[test]
    fn dated_name_for_merge_output() {
        assert_eq!(
            dated_file_name("Merge", "pdf", &fixed_time()),
            "Merge_2026-03-07.pdf"
        );
    }

    #[test]
    fn same_second_batches_get_suffixes() {
        let base = tempfile::tempdir().expect("tempdir");
        let first = timestamped_dir_at(base.path(), &fixed_time()).expect("first");
        let second = timestamped_dir_at(base.path(), &fixed_time()).expect("second");

        assert!(first.is_dir());
        assert!(second.is_dir());
        assert_eq!(first.file_name().unwrap(), "2026-03-07_09-05-01");
        assert_eq!(second.file_name().unwrap(), "2026-03-07_09-05-01_2");
    }

    #[test]
    fn failed_batch_is_removed() {
        let base = tempfile::tempdir().expect("tempdir");
        let result: Result<()> = with_batch_dir(base.path(), |dir| {
            std::fs::write(dir.join("page_1.pdf"), b"%PDF")?;
            Err(crate::error::PdfToolError::PdfError("page 2 failed".into()))
        });

        assert!(result.is_err());
        let leftovers = std::fs::read_dir(base.path()).expect("read base").count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn finished_batch_is_kept() {
        let base = tempfile::tempdir().expect("tempdir");
        let file = with_batch_dir(base.path(), |dir| {
            let file = dir.join("image_01_of_01_page_01.png");
            std::fs::write(&file, b"png")?;
            Ok(file)
        })
        .expect("batch");
        assert!(file.is_file());
    }

    #[test]
    fn missing_base_is_created() {
        let base = tempfile::tempdir().expect("tempdir");
        let nested = base.path().join("exports").join("pdf");
        let dir = timestamped_dir_at(&nested, &fixed_time()).expect("create");
        assert!(dir.starts_with(&nested));
        assert!(dir.is_dir());
    }
}
