//! Layout component wrapping all pages with Pico CSS and common elements.

use dioxus::prelude::*;

use super::nav::Nav;
use crate::app::{use_session_view, Route};
use crate::route;

/// CSS styles for the application (extends Pico CSS).
const CUSTOM_STYLES: &str = r#"
:root { --pico-font-size: 15px; }
small { color: var(--pico-muted-color); }
.notice { padding: 0.75rem 1rem; border-radius: var(--pico-border-radius); margin-bottom: 1rem; }
.notice-ok { background: #d1fae5; color: #065f46; }
.notice-err { background: #fee2e2; color: #991b1b; }
.time-grid { overflow-x: auto; }
.time-grid table { border-collapse: collapse; font-size: 0.8rem; }
.time-grid th, .time-grid td { padding: 0.25rem; text-align: center; min-width: 2.5rem; }
.time-grid td.slot { cursor: pointer; border: 1px solid var(--pico-muted-border-color); }
.time-grid td.slot.past { background: var(--pico-muted-border-color); cursor: not-allowed; }
.time-grid td.slot.reserved { background: #9ca3af; }
.time-grid td.slot.selected { background: var(--pico-primary-background); }
.controls { display: flex; gap: 0.5rem; margin-top: 0.5rem; flex-wrap: wrap; }
.controls button { margin: 0; padding: 0.5rem 1rem; }
.otp { font-size: 2.5rem; letter-spacing: 0.3rem; text-align: center; }
"#;

/// Main layout component wrapping all pages.
///
/// Pages the current session may not open are left immediately for home.
#[component]
pub fn Layout(title: String, children: Element) -> Element {
    let version = env!("CARGO_PKG_VERSION");
    let full_title = format!("{} - Study Room", title);

    let view = use_session_view();
    let path = use_route::<Route>().to_string();
    let allowed = view().map(|v| route::resolve(&path, v) == path);

    use_effect(use_reactive((&allowed,), |(allowed,)| {
        if allowed == Some(false) {
            tracing::info!("Page not permitted for this session, redirecting home");
            let _ = navigator().replace(Route::Home {});
        }
    }));

    rsx! {
        // Head elements - Dioxus hoists these to the real <head>
        document::Title { "{full_title}" }
        document::Link { rel: "stylesheet", href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css" }
        document::Style { {CUSTOM_STYLES} }

        header { class: "container", Nav {} }
        main { class: "container",
            match allowed {
                Some(true) => rsx! { {children} },
                Some(false) => rsx! {},
                None => rsx! { p { aria_busy: "true", "Checking access..." } },
            }
        }
        footer { class: "container",
            small { "Study Room v{version}" }
        }
    }
}
