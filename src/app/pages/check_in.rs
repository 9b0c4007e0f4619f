//! Personal check-in code, rotated by the server.

use std::time::Duration;

use dioxus::prelude::*;

use crate::api::{self, ApiClient};
use crate::app::components::Layout;
use crate::app::use_app;
use crate::query::hooks::{use_polled_query, QueryState};
use crate::query::{resources, QueryKey};
use crate::timers::hooks::use_countdown;

#[component]
pub fn CheckIn() -> Element {
    let app = use_app();
    let refresh_secs = app.config.otp_refresh_secs.max(1);
    let countdown = use_countdown("otp-refresh");

    let otp = use_polled_query(
        Duration::from_secs(u64::from(refresh_secs)),
        || Some(QueryKey::new(resources::OTP)),
        |api: ApiClient| async move { api::check_in::otp(&api).await },
    );

    // Restart the visible countdown whenever a new code arrives
    use_effect(move || {
        if otp.data().is_some() {
            countdown.start(refresh_secs);
        }
    });

    rsx! {
        Layout { title: "Check-in".to_string(),
            h1 { "Check-in code" }
            p { "Show this code at the desk scanner when your reservation starts." }
            match otp.state() {
                QueryState::Ready(code) => rsx! {
                    p { class: "otp", "{code}" }
                    if let Some(left) = countdown.get() {
                        p { small { "New code in {left}" } }
                    }
                },
                QueryState::Failed(message) => rsx! { p { class: "notice notice-err", "{message}" } },
                _ => rsx! { p { aria_busy: "true", "Fetching your code..." } },
            }
        }
    }
}
