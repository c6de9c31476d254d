// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Extract Images page: preview grid and export to a folder or a ZIP file.

use std::rc::Rc;

use dioxus::prelude::*;
use pdftool_core::ImageExportMode;
use pdftool_document::{ExtractedImage, PdfReader};

use crate::pages::common::{ActionButton, NoDocument, preview_url};
use crate::services::app_services::AppServices;
use crate::services::dialogs;
use crate::state::AppState;

#[component]
pub fn Images() -> Element {
    let state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    // Results are kept together with the reader they came from.
    let mut found = use_signal(|| Option::<(Rc<PdfReader>, Vec<ExtractedImage>)>::None);

    let Some(doc) = state.read().document.clone() else {
        return rsx! {
            h1 { "Extract Images" }
            NoDocument {}
        };
    };

    let images: Option<Vec<ExtractedImage>> = found
        .read()
        .as_ref()
        .filter(|(source, _)| Rc::ptr_eq(source, &doc.reader))
        .map(|(_, images)| images.clone());
    let mode = svc.config().image_export;
    let mode_label = match mode {
        ImageExportMode::Folder => "Save to folder",
        ImageExportMode::Zip => "Save as ZIP",
    };

    rsx! {
        div {
            h1 { "Extract Images" }
            p { style: "color: #666;",
                "JPEG and JPEG 2000 pictures are saved unchanged, everything else as PNG."
            }

            div { style: "display: flex; gap: 8px; margin: 16px 0;",
                ActionButton {
                    label: "Find images".to_string(),
                    disabled: false,
                    onclick: {
                        let svc = svc.clone();
                        let reader = doc.reader.clone();
                        move |_| match svc.extract_images(&reader) {
                            Ok(images) => found.set(Some((reader.clone(), images))),
                            Err(err) => dialogs::show_error("Extract images", &err),
                        }
                    },
                }
                ActionButton {
                    label: mode_label.to_string(),
                    disabled: images.as_ref().is_none_or(Vec::is_empty),
                    onclick: {
                        let svc = svc.clone();
                        let images = images.clone().unwrap_or_default();
                        move |_| {
                            let target = match mode {
                                ImageExportMode::Folder => {
                                    dialogs::pick_folder("Save images to", Some(&svc.export_dir()))
                                }
                                ImageExportMode::Zip => dialogs::save_file(
                                    "Save images as ZIP",
                                    &svc.default_zip_name(),
                                    ("ZIP archive", "zip"),
                                    Some(&svc.export_dir()),
                                ),
                            };
                            let Some(target) = target else {
                                return;
                            };
                            match svc.save_images(&images, mode, &target) {
                                Ok(summary) => dialogs::show_info("Extract images", &summary),
                                Err(err) => dialogs::show_error("Extract images", &err),
                            }
                        }
                    },
                }
            }

            match images {
                None => rsx! {
                    p { style: "color: #888;", "Press \"Find images\" to scan the document." }
                },
                Some(ref list) if list.is_empty() => rsx! {
                    p { style: "color: #888;", "The document contains no extractable images." }
                },
                Some(ref list) => {
                    let count = list.len();
                    rsx! {
                        p { style: "color: #666; font-size: 14px;", "{count} image(s) found" }
                        div { style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(160px, 1fr)); gap: 12px;",
                            for image in list.iter() {
                                ImageTile { key: "{image.index}", image: image.clone() }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ImageTile(image: ExtractedImage) -> Element {
    let file_name = image.file_name();
    let size = match (image.width, image.height) {
        (Some(w), Some(h)) => format!("{w} \u{00D7} {h} px"),
        _ => String::new(),
    };
    rsx! {
        div { style: "border: 1px solid #e0e0e0; border-radius: 8px; padding: 8px; background: white; text-align: center;",
            match preview_url(&image) {
                Some(url) => rsx! {
                    img { src: "{url}", style: "max-width: 100%; max-height: 140px; object-fit: contain;" }
                },
                None => rsx! {
                    div { style: "height: 140px; display: flex; align-items: center; justify-content: center; color: #888; font-size: 13px;",
                        "JPEG 2000 (no preview)"
                    }
                },
            }
            p { style: "font-size: 12px; margin: 4px 0; word-break: break-all;", "{file_name}" }
            p { style: "font-size: 12px; margin: 0; color: #888;", "Page {image.page} {size}" }
        }
    }
}
