// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module: pull embedded pictures out of a PDF.

pub mod extractor;

pub use extractor::{ExtractedImage, extract_images, save_images};
