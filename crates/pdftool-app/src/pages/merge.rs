// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Merge page: ordered list of input PDFs combined into one file.

use std::path::PathBuf;

use dioxus::prelude::*;
use pdftool_document::pdf::merge::MIN_MERGE_INPUTS;

use crate::pages::common::{ActionButton, ToolButton, move_item};
use crate::services::app_services::AppServices;
use crate::services::dialogs;
use crate::state::AppState;

#[component]
pub fn Merge() -> Element {
    let state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    // The list starts with the opened PDF, when it exists on disk.
    let mut files = use_signal(|| {
        state
            .read()
            .document
            .as_ref()
            .and_then(|doc| doc.reader.source_path().map(PathBuf::from))
            .into_iter()
            .collect::<Vec<PathBuf>>()
    });
    let mut selected = use_signal(|| Option::<usize>::None);

    let count = files.read().len();
    let chosen = *selected.read();

    rsx! {
        div {
            h1 { "Merge PDFs" }
            p { style: "color: #666;", "Pages are combined in list order. At least {MIN_MERGE_INPUTS} files are needed." }

            div { style: "display: flex; gap: 8px; flex-wrap: wrap; margin: 16px 0;",
                ToolButton {
                    label: "Add files...",
                    disabled: false,
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let start = svc.config().last_open_dir;
                            let picked = dialogs::pick_pdfs(start.as_deref());
                            if !picked.is_empty() {
                                tracing::debug!(added = picked.len(), "merge inputs added");
                                files.write().extend(picked);
                            }
                        }
                    },
                }
                ToolButton {
                    label: "Remove",
                    disabled: chosen.is_none(),
                    onclick: move |_| {
                        if let Some(index) = chosen {
                            if index < files.read().len() {
                                files.write().remove(index);
                            }
                            selected.set(None);
                        }
                    },
                }
                ToolButton {
                    label: "Move up",
                    disabled: !matches!(chosen, Some(index) if index > 0),
                    onclick: move |_| {
                        if let Some(index) = chosen {
                            if move_item(&mut *files.write(), index, -1) {
                                selected.set(Some(index - 1));
                            }
                        }
                    },
                }
                ToolButton {
                    label: "Move down",
                    disabled: !matches!(chosen, Some(index) if index + 1 < count),
                    onclick: move |_| {
                        if let Some(index) = chosen {
                            if move_item(&mut *files.write(), index, 1) {
                                selected.set(Some(index + 1));
                            }
                        }
                    },
                }
            }

            if count == 0 {
                p { style: "color: #888;", "No files added yet." }
            }
            ol { style: "padding-left: 24px;",
                for (index, path) in files.read().iter().enumerate() {
                    {
                        let is_selected = chosen == Some(index);
                        let background = if is_selected { "#e5f0ff" } else { "white" };
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| path.display().to_string());
                        let folder = path
                            .parent()
                            .map(|p| p.display().to_string())
                            .unwrap_or_default();
                        rsx! {
                            li {
                                key: "{index}",
                                style: "padding: 8px; margin: 4px 0; border: 1px solid #e0e0e0; border-radius: 6px; cursor: pointer; background: {background};",
                                onclick: move |_| selected.set(Some(index)),
                                strong { "{name}" }
                                span { style: "margin-left: 8px; color: #888; font-size: 12px;", "{folder}" }
                            }
                        }
                    }
                }
            }

            ActionButton {
                label: format!("Merge {count} files"),
                disabled: count < MIN_MERGE_INPUTS,
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let inputs = files.read().clone();
                        let start = svc.save_dir(None);
                        let Some(output) = dialogs::save_file(
                            "Save merged PDF",
                            &svc.default_merge_name(),
                            ("PDF", "pdf"),
                            Some(&start),
                        ) else {
                            return;
                        };
                        match svc.merge(&inputs, &output) {
                            Ok(summary) => dialogs::show_info("Merge PDFs", &summary),
                            Err(err) => dialogs::show_error("Merge PDFs", &err),
                        }
                    }
                },
            }
        }
    }
}
