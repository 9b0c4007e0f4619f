use dioxus::prelude::*;

use crate::app::Route;

/// Unknown paths go home
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    use_effect(move || {
        tracing::debug!(path = %segments.join("/"), "Unknown route, redirecting home");
        let _ = navigator().replace(Route::Home {});
    });
    rsx! {}
}
