// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

pub mod common;
pub mod home;
pub mod images;
pub mod invoice;
pub mod merge;
pub mod settings;
pub mod split;
pub mod to_word;
