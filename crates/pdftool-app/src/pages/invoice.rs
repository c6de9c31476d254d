// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ZUGFeRD Reader page: invoice fields, line items and the raw XML tree.

use std::rc::Rc;

use dioxus::prelude::*;
use pdftool_core::types::{LineItem, NOT_AVAILABLE};
use pdftool_document::zugferd::XmlNode;
use pdftool_document::{PdfReader, ZugferdDocument};

use crate::pages::common::{ActionButton, NoDocument, ToolButton};
use crate::services::app_services::AppServices;
use crate::services::dialogs;
use crate::state::AppState;

#[component]
pub fn Invoice() -> Element {
    let state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut found = use_signal(|| Option::<(Rc<PdfReader>, ZugferdDocument)>::None);
    let mut show_xml = use_signal(|| false);

    let Some(doc) = state.read().document.clone() else {
        return rsx! {
            h1 { "ZUGFeRD Reader" }
            NoDocument {}
        };
    };

    let current: Option<ZugferdDocument> = found
        .read()
        .as_ref()
        .filter(|(source, _)| Rc::ptr_eq(source, &doc.reader))
        .map(|(_, invoice)| invoice.clone());
    let xml_label: &'static str = if *show_xml.read() { "Hide XML" } else { "Show XML" };

    rsx! {
        div {
            h1 { "ZUGFeRD Reader" }
            p { style: "color: #666;",
                "Reads the ZUGFeRD or Factur-X invoice data embedded in the opened PDF."
            }

            div { style: "display: flex; gap: 8px; margin: 16px 0;",
                ActionButton {
                    label: "Read invoice".to_string(),
                    disabled: false,
                    onclick: {
                        let svc = svc.clone();
                        let reader = doc.reader.clone();
                        move |_| match svc.read_invoice(&reader) {
                            Ok(invoice) => found.set(Some((reader.clone(), invoice))),
                            Err(err) => {
                                found.set(None);
                                dialogs::show_error("Read invoice", &err);
                            }
                        }
                    },
                }
                if let Some(ref invoice) = current {
                    ToolButton {
                        label: "Save as JSON",
                        disabled: false,
                        onclick: {
                            let svc = svc.clone();
                            let data = invoice.invoice.clone();
                            let reader = doc.reader.clone();
                            move |_| {
                                let default_name = format!(
                                    "{}.json",
                                    data.invoice_number.as_deref().unwrap_or("invoice")
                                );
                                let start = svc.save_dir(Some(&reader));
                                let Some(output) = dialogs::save_file(
                                    "Save invoice data",
                                    &default_name,
                                    ("JSON", "json"),
                                    Some(&start),
                                ) else {
                                    return;
                                };
                                match svc.export_invoice_json(&data, &output) {
                                    Ok(summary) => dialogs::show_info("Save invoice data", &summary),
                                    Err(err) => dialogs::show_error("Save invoice data", &err),
                                }
                            }
                        },
                    }
                    ToolButton {
                        label: xml_label,
                        disabled: false,
                        onclick: move |_| {
                            let visible = *show_xml.read();
                            show_xml.set(!visible);
                        },
                    }
                }
            }

            if let Some(invoice) = current {
                InvoiceView { document: invoice, show_xml: *show_xml.read() }
            }
        }
    }
}

#[component]
fn InvoiceView(document: ZugferdDocument, show_xml: bool) -> Element {
    let rows = document.invoice.display_rows();
    let version = document.version.label();
    let source = document.attachment_name.clone();
    let element_count = document.root.element_count();

    rsx! {
        p { style: "font-size: 14px; color: #666;",
            strong { "{version}" }
            " from attachment "
            code { "{source}" }
        }

        table { style: "border-collapse: collapse; width: 100%; font-size: 14px; margin: 12px 0;",
            for (index, (section, label, value)) in rows.into_iter().enumerate() {
                {
                    let missing = value == NOT_AVAILABLE;
                    let color = if missing { "#aaa" } else { "#222" };
                    rsx! {
                        tr { key: "{index}", style: "border-bottom: 1px solid #f0f0f0;",
                            td { style: "padding: 6px 8px; color: #888; width: 100px;", "{section}" }
                            td { style: "padding: 6px 8px; width: 160px;", "{label}" }
                            td { style: "padding: 6px 8px; color: {color};", "{value}" }
                        }
                    }
                }
            }
        }

        h3 { "Line items" }
        if document.invoice.line_items.is_empty() {
            p { style: "color: #888;", "No line items." }
        } else {
            table { style: "border-collapse: collapse; width: 100%; font-size: 14px;",
                tr { style: "text-align: left; border-bottom: 1px solid #ccc;",
                    th { style: "padding: 6px 8px;", "#" }
                    th { style: "padding: 6px 8px;", "Product" }
                    th { style: "padding: 6px 8px;", "Quantity" }
                    th { style: "padding: 6px 8px; text-align: right;", "Total" }
                }
                for (index, item) in document.invoice.line_items.iter().enumerate() {
                    LineItemRow { key: "{index}", position: index + 1, item: item.clone() }
                }
            }
        }

        if show_xml {
            h3 { "XML ({element_count} elements)" }
            div { style: "font-family: monospace; font-size: 12px; background: #fafafa; border: 1px solid #e0e0e0; border-radius: 8px; padding: 8px; overflow-x: auto;",
                XmlTree { node: document.root.clone() }
            }
        }
    }
}

#[component]
fn LineItemRow(position: usize, item: LineItem) -> Element {
    let id = item.line_id.clone().unwrap_or_else(|| position.to_string());
    let product = item.product_name.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let quantity = match (&item.quantity, &item.unit_code) {
        (Some(quantity), Some(unit)) => format!("{quantity} {unit}"),
        (Some(quantity), None) => quantity.clone(),
        _ => NOT_AVAILABLE.to_string(),
    };
    let total = item
        .line_total
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    rsx! {
        tr { style: "border-bottom: 1px solid #f0f0f0;",
            td { style: "padding: 6px 8px;", "{id}" }
            td { style: "padding: 6px 8px;", "{product}" }
            td { style: "padding: 6px 8px;", "{quantity}" }
            td { style: "padding: 6px 8px; text-align: right;", "{total}" }
        }
    }
}

/// Collapsible element tree; elements with text show it inline.
#[component]
fn XmlTree(node: XmlNode) -> Element {
    let name = node.qualified_name().into_owned();
    let attributes: String = node
        .attributes
        .iter()
        .map(|(key, value)| format!(" {key}=\"{value}\""))
        .collect();
    let text = node.text().map(str::to_string);

    if node.children.is_empty() {
        return rsx! {
            div { style: "padding-left: 12px;",
                span { style: "color: #881280;", "{name}" }
                span { style: "color: #994500;", "{attributes}" }
                if let Some(text) = text {
                    span { style: "color: #1a1aa6;", " {text}" }
                }
            }
        };
    }

    rsx! {
        details { open: true, style: "padding-left: 12px;",
            summary {
                span { style: "color: #881280;", "{name}" }
                span { style: "color: #994500;", "{attributes}" }
            }
            for (index, child) in node.children.iter().enumerate() {
                XmlTree { key: "{index}", node: child.clone() }
            }
        }
    }
}
