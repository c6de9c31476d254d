// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Split page: one PDF per page of the opened document.

use std::path::PathBuf;

use dioxus::prelude::*;

use crate::pages::common::{ActionButton, NoDocument};
use crate::services::app_services::AppServices;
use crate::services::dialogs;
use crate::state::AppState;

#[component]
pub fn Split() -> Element {
    let state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut base_dir = use_signal(|| Option::<PathBuf>::None);
    let mut last_result = use_signal(|| Option::<String>::None);

    let Some(doc) = state.read().document.clone() else {
        return rsx! {
            h1 { "Split PDF" }
            NoDocument {}
        };
    };

    let count = doc.pages.len();
    let name = doc.reader.display_name();
    let reader = doc.reader.clone();
    let button_label = format!("Split into {count} files");
    let target = base_dir.read().clone().unwrap_or_else(|| svc.export_dir());
    let target_label = target.display().to_string();

    rsx! {
        div {
            h1 { "Split PDF" }
            p { style: "color: #666;",
                "Writes each of the {count} page(s) of {name} to its own file, inside a new timestamped folder."
            }

            div { style: "display: flex; align-items: center; gap: 12px; margin: 16px 0;",
                span { style: "font-size: 14px;", "Output folder:" }
                code { style: "flex: 1; font-size: 13px; color: #333;", "{target_label}" }
                button {
                    style: "padding: 6px 12px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                    onclick: {
                        let target = target.clone();
                        move |_| {
                            if let Some(dir) = dialogs::pick_folder("Output folder", Some(&target)) {
                                base_dir.set(Some(dir));
                            }
                        }
                    },
                    "Change..."
                }
            }

            ActionButton {
                label: button_label,
                disabled: count == 0,
                onclick: {
                    let svc = svc.clone();
                    let target = target.clone();
                    move |_| match svc.split(&reader, &target) {
                        Ok(summary) => {
                            dialogs::show_info("Split PDF", &summary);
                            last_result.set(Some(summary));
                        }
                        Err(err) => dialogs::show_error("Split PDF", &err),
                    }
                },
            }

            if let Some(ref summary) = *last_result.read() {
                p { style: "margin-top: 16px; color: #34c759; white-space: pre-wrap;", "{summary}" }
            }
        }
    }
}
