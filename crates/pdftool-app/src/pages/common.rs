// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Widgets and helpers shared by the feature pages.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use dioxus::prelude::*;
use pdftool_core::types::ImageFormat;
use pdftool_document::ExtractedImage;

/// Inline `data:` URL for an image preview. WebViews cannot show JPEG 2000,
/// so those get no preview.
pub fn preview_url(image: &ExtractedImage) -> Option<String> {
    match image.format {
        ImageFormat::Jpeg | ImageFormat::Png => Some(format!(
            "data:{};base64,{}",
            image.format.mime_type(),
            BASE64.encode(&image.data)
        )),
        ImageFormat::Jpeg2000 => None,
    }
}

/// Move the entry at `index` up (`-1`) or down (`+1`). Returns whether
/// anything moved.
pub fn move_item<T>(items: &mut [T], index: usize, offset: isize) -> bool {
    let Some(target) = index.checked_add_signed(offset) else {
        return false;
    };
    if index >= items.len() || target >= items.len() || target == index {
        return false;
    }
    items.swap(index, target);
    true
}

/// Placeholder for pages that need an opened PDF.
#[component]
pub fn NoDocument() -> Element {
    rsx! {
        div { style: "padding: 32px; border: 1px dashed #ccc; border-radius: 12px; text-align: center; color: #888;",
            p { "No PDF opened." }
            p { style: "font-size: 14px;", "Use \"Open PDF\" in the sidebar first." }
        }
    }
}

#[component]
pub fn ActionButton(
    label: String,
    disabled: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    let opacity = if disabled { "0.5" } else { "1" };
    rsx! {
        button {
            style: "padding: 10px 20px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 15px; opacity: {opacity};",
            disabled: disabled,
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}

#[component]
pub fn ToolButton(
    label: &'static str,
    disabled: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    let opacity = if disabled { "0.5" } else { "1" };
    rsx! {
        button {
            style: "padding: 6px 12px; border-radius: 8px; border: 1px solid #ccc; background: white; font-size: 14px; opacity: {opacity};",
            disabled: disabled,
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}
