// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page: persistent app configuration.

use dioxus::prelude::*;
use pdftool_core::ImageExportMode;

use crate::services::app_services::AppServices;
use crate::services::dialogs;

#[component]
pub fn Settings() -> Element {
    let svc = use_context::<AppServices>();
    // Edits stay in this draft until "Save Settings" stores them.
    let mut draft = use_signal(|| svc.config());
    let mut save_msg = use_signal(|| Option::<String>::None);

    let export_dir = draft
        .read()
        .export_dir
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| "Home folder".to_string());
    let mode = draft.read().image_export;

    rsx! {
        div {
            h1 { "Settings" }

            section { style: "margin: 16px 0;",
                h3 { "Output" }
                div { style: "display: flex; justify-content: space-between; align-items: center; gap: 12px; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Export folder" }
                    code { style: "flex: 1; text-align: right; font-size: 13px;", "{export_dir}" }
                    button {
                        style: "padding: 4px 12px; border-radius: 6px; border: 1px solid #ccc; background: white;",
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                let start = svc.export_dir();
                                if let Some(dir) = dialogs::pick_folder("Export folder", Some(&start)) {
                                    draft.write().export_dir = Some(dir);
                                }
                            }
                        },
                        "Choose..."
                    }
                    button {
                        style: "padding: 4px 12px; border-radius: 6px; border: 1px solid #ccc; background: white;",
                        onclick: move |_| draft.write().export_dir = None,
                        "Reset"
                    }
                }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Save extracted images" }
                    select {
                        style: "padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                        value: export_mode_label(mode),
                        onchange: move |evt| {
                            if let Some(mode) = export_mode_from_label(&evt.value()) {
                                draft.write().image_export = mode;
                            }
                        },
                        option { value: "Folder", "One file per image in a new folder" }
                        option { value: "Zip", "All images in one ZIP file" }
                    }
                }
                SettingRow {
                    label: "Show output location after an operation",
                    checked: draft.read().show_output_path,
                    on_toggle: move |v: bool| { draft.write().show_output_path = v; },
                }
            }

            // Save button
            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px; margin-top: 8px;",
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let config = draft.read().clone();
                        match svc.save_config(&config) {
                            Ok(()) => save_msg.set(Some("Settings saved.".into())),
                            Err(err) => {
                                save_msg.set(None);
                                dialogs::show_error("Save settings", &err);
                            }
                        }
                    }
                },
                "Save Settings"
            }
            if let Some(ref msg) = *save_msg.read() {
                p { style: "color: #34c759; font-size: 14px; text-align: center; margin-top: 8px;",
                    "{msg}"
                }
            }
        }
    }
}

#[component]
fn SettingRow(label: &'static str, checked: bool, on_toggle: EventHandler<bool>) -> Element {
    rsx! {
        div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
            span { "{label}" }
            input {
                r#type: "checkbox",
                checked: checked,
                onchange: move |evt| on_toggle.call(evt.checked()),
            }
        }
    }
}

fn export_mode_label(mode: ImageExportMode) -> &'static str {
    match mode {
        ImageExportMode::Folder => "Folder",
        ImageExportMode::Zip => "Zip",
    }
}

fn export_mode_from_label(label: &str) -> Option<ImageExportMode> {
    match label {
        "Folder" => Some(ImageExportMode::Folder),
        "Zip" => Some(ImageExportMode::Zip),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_mode_labels_round_trip() {
        for mode in [ImageExportMode::Folder, ImageExportMode::Zip] {
            assert_eq!(export_mode_from_label(export_mode_label(mode)), Some(mode));
        }
        assert_eq!(export_mode_from_label("Cloud"), None);
    }
}
