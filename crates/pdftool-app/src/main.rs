// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF Tool: desktop utility to split, merge, convert and inspect PDFs.
//
// Entry point. Initialises logging, backend services, app state, and launches
// the Dioxus UI.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;
use pdftool_core::types::Feature;

use pages::home::Home;
use pages::images::Images;
use pages::invoice::Invoice;
use pages::merge::Merge;
use pages::settings::Settings;
use pages::split::Split;
use pages::to_word::ToWord;

use services::app_services::AppServices;
use services::dialogs;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("PDF Tool starting");

    dioxus::launch(app);
}

/// Top-level route enum.
#[derive(Debug, Clone, Routable, PartialEq)]
enum Route {
    #[layout(SidebarLayout)]
    #[route("/")]
    Home {},
    #[route("/split")]
    Split {},
    #[route("/merge")]
    Merge {},
    #[route("/to-word")]
    ToWord {},
    #[route("/images")]
    Images {},
    #[route("/invoice")]
    Invoice {},
    #[route("/settings")]
    Settings {},
}

impl Route {
    fn for_feature(feature: Feature) -> Self {
        match feature {
            Feature::Home => Route::Home {},
            Feature::Split => Route::Split {},
            Feature::Merge => Route::Merge {},
            Feature::ToWord => Route::ToWord {},
            Feature::Images => Route::Images {},
            Feature::Invoice => Route::Invoice {},
            Feature::Settings => Route::Settings {},
        }
    }
}

/// Root component.
fn app() -> Element {
    let svc = use_hook(AppServices::init);

    use_context_provider(|| svc.clone());
    use_context_provider(|| Signal::new(state::AppState::default()));

    rsx! {
        Router::<Route> {}
    }
}

/// Sidebar with the feature buttons, next to the active page.
#[component]
fn SidebarLayout() -> Element {
    let mut state = use_context::<Signal<state::AppState>>();
    let svc = use_context::<AppServices>();
    let current = use_route::<Route>();

    let open_name = state
        .read()
        .document
        .as_ref()
        .map(|doc| doc.reader.display_name());

    rsx! {
        div { class: "app-container",
            style: "display: flex; height: 100vh; font-family: system-ui, -apple-system, sans-serif;",

            // Sidebar
            nav { class: "sidebar",
                style: "width: 200px; display: flex; flex-direction: column; gap: 4px; padding: 16px 8px; border-right: 1px solid #e0e0e0; background: #fafafa;",
                h2 { style: "margin: 0 8px 16px; font-size: 18px;", "PDF Tool" }

                button {
                    style: "padding: 10px; margin-bottom: 12px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 14px;",
                    onclick: move |_| {
                        let start = svc.config().last_open_dir;
                        let Some(path) = dialogs::pick_pdf(start.as_deref()) else {
                            return;
                        };
                        match svc.open_document(&path) {
                            Ok(reader) => state.write().open(reader),
                            Err(err) => dialogs::show_error("Open PDF", &err),
                        }
                    },
                    "Open PDF"
                }

                for feature in Feature::ALL {
                    SidebarButton {
                        to: Route::for_feature(feature),
                        label: feature.label(),
                        active: Route::for_feature(feature) == current,
                        dimmed: feature.needs_open_document() && open_name.is_none(),
                    }
                }

                div { style: "flex: 1;" }
                if let Some(ref name) = open_name {
                    p { style: "margin: 8px; color: #666; font-size: 12px; word-break: break-all;", "{name}" }
                }
            }

            // Page content
            div { class: "page-content",
                style: "flex: 1; overflow-y: auto; padding: 24px;",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn SidebarButton(to: Route, label: &'static str, active: bool, dimmed: bool) -> Element {
    let background = if active { "#e5f0ff" } else { "transparent" };
    let color = if dimmed { "#aaa" } else { "#333" };
    rsx! {
        Link { to: to,
            style: "display: block; padding: 8px 12px; border-radius: 6px; text-decoration: none; font-size: 14px; background: {background}; color: {color};",
            "{label}"
        }
    }
}
