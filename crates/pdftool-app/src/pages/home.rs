// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Home page: the opened PDF with page tiles, rotation and text export.

use std::path::Path;

use dioxus::prelude::*;
use pdftool_document::PdfReader;

use crate::pages::common::{NoDocument, ToolButton};
use crate::services::app_services::AppServices;
use crate::services::dialogs;
use crate::state::AppState;

#[component]
pub fn Home() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut selected_page = use_signal(|| Option::<u32>::None);

    let Some(doc) = state.read().document.clone() else {
        return rsx! {
            div {
                h1 { "PDF Tool" }
                p { style: "color: #666;", "Split, merge and convert PDFs, extract images, read e-invoices." }
                NoDocument {}
            }
        };
    };

    let name = doc.reader.display_name();
    let count = doc.pages.len();
    let has_unsaved = doc.unsaved.is_some();

    // Rotate the selected page of the current (possibly already rotated) state.
    let mut rotate = move |degrees: i32| {
        let Some(page) = *selected_page.read() else {
            return;
        };
        let Some(current) = state.read().document.clone() else {
            return;
        };
        let result = match current.unsaved.as_deref() {
            Some(bytes) => PdfReader::from_bytes(bytes).and_then(|r| r.rotate_page(page, degrees)),
            None => current.reader.rotate_page(page, degrees),
        };
        let updated = result.and_then(|bytes| Ok((PdfReader::from_bytes(&bytes)?.pages(), bytes)));
        match updated {
            Ok((pages, bytes)) => {
                if let Some(open) = state.write().document.as_mut() {
                    open.pages = pages;
                    open.unsaved = Some(bytes);
                }
                tracing::info!(page, degrees, "page rotated");
            }
            Err(err) => dialogs::show_error("Rotate page", &err),
        }
    };

    rsx! {
        div {
            h1 { "{name}" }
            p { style: "color: #666;",
                "{count} page(s)"
                if has_unsaved { span { style: "color: #ff9500;", " (unsaved changes)" } }
            }

            // Toolbar
            div { style: "display: flex; gap: 8px; flex-wrap: wrap; margin: 16px 0;",
                ToolButton {
                    label: "Rotate left",
                    disabled: selected_page.read().is_none(),
                    onclick: move |_| rotate(-90),
                }
                ToolButton {
                    label: "Rotate right",
                    disabled: selected_page.read().is_none(),
                    onclick: move |_| rotate(90),
                }
                ToolButton {
                    label: "Save",
                    disabled: !has_unsaved,
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let Some(current) = state.read().document.clone() else {
                                return;
                            };
                            let Some(bytes) = current.unsaved else {
                                return;
                            };
                            let start = svc.save_dir(Some(&current.reader));
                            let Some(path) = dialogs::save_file(
                                "Save PDF",
                                &current.reader.display_name(),
                                ("PDF", "pdf"),
                                Some(&start),
                            ) else {
                                return;
                            };
                            match svc.save_document(&bytes, &path) {
                                Ok(reader) => state.write().open(reader),
                                Err(err) => dialogs::show_error("Save PDF", &err),
                            }
                        }
                    },
                }
                ToolButton {
                    label: "Export text",
                    disabled: false,
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let Some(current) = state.read().document.clone() else {
                                return;
                            };
                            let default_name = text_file_name(&current.reader.display_name());
                            let start = svc.save_dir(Some(&current.reader));
                            let Some(path) = dialogs::save_file(
                                "Export text",
                                &default_name,
                                ("Text", "txt"),
                                Some(&start),
                            ) else {
                                return;
                            };
                            match svc.export_text(&current.reader, &path) {
                                Ok(summary) => dialogs::show_info("Export text", &summary),
                                Err(err) => dialogs::show_error("Export text", &err),
                            }
                        }
                    },
                }
            }

            // Page tiles
            div { style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(120px, 1fr)); gap: 12px;",
                for info in doc.pages.iter().copied() {
                    {
                        let is_selected = *selected_page.read() == Some(info.number);
                        let border = if is_selected { "2px solid #007aff" } else { "1px solid #ccc" };
                        let (width_mm, height_mm) = info.display_size_mm();
                        let aspect = if height_mm > 0.0 { width_mm / height_mm } else { 0.707 };
                        let size = format!("{width_mm:.0} \u{00D7} {height_mm:.0} mm");
                        rsx! {
                            div {
                                key: "{info.number}",
                                style: "aspect-ratio: {aspect}; border: {border}; border-radius: 4px; display: flex; flex-direction: column; align-items: center; justify-content: center; background: white; font-size: 13px; color: #666; cursor: pointer;",
                                onclick: move |_| selected_page.set(Some(info.number)),
                                strong { "Page {info.number}" }
                                span { "{size}" }
                                if info.rotation != 0 {
                                    span { "{info.rotation}\u{00B0}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// `report.pdf` becomes `report.txt`.
fn text_file_name(pdf_name: &str) -> String {
    let stem = Path::new(pdf_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    format!("{stem}.txt")
}
