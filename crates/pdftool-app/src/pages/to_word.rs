// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF to Word page.

use std::path::Path;

use dioxus::prelude::*;
use pdftool_document::convert::default_output_name;

use crate::pages::common::{ActionButton, NoDocument};
use crate::services::app_services::AppServices;
use crate::services::dialogs;
use crate::state::AppState;

#[component]
pub fn ToWord() -> Element {
    let state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    let Some(doc) = state.read().document.clone() else {
        return rsx! {
            h1 { "PDF to Word" }
            NoDocument {}
        };
    };

    let name = doc.reader.display_name();
    let reader = doc.reader.clone();

    rsx! {
        div {
            h1 { "PDF to Word" }
            p { style: "color: #666;",
                "Converts the text of {name} into a Word document, one section per page. Layout, images and fonts are not carried over."
            }
            if doc.unsaved.is_some() {
                p { style: "color: #ff9500; font-size: 14px;", "Unsaved rotations are not part of the conversion." }
            }

            ActionButton {
                label: "Convert to DOCX".to_string(),
                disabled: false,
                onclick: move |_| {
                    let default_name = default_output_name(Path::new(&reader.display_name()));
                    let start = svc.save_dir(Some(&reader));
                    let Some(output) = dialogs::save_file(
                        "Save Word document",
                        &default_name,
                        ("Word document", "docx"),
                        Some(&start),
                    ) else {
                        return;
                    };
                    match svc.to_word(&reader, &output) {
                        Ok(summary) => dialogs::show_info("PDF to Word", &summary),
                        Err(err) => dialogs::show_error("PDF to Word", &err),
                    }
                },
            }
        }
    }
}
