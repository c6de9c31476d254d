// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: reading, splitting, merging and rotating PDFs.

pub mod merge;
pub mod pages;
pub mod reader;

pub use reader::PdfReader;
