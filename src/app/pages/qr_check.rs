//! Kiosk check-in page for the rooms in `?room_ids=`.

use dioxus::prelude::*;

use crate::api::{self, ApiClient};
use crate::app::components::{Layout, NoticeBanner, ScanPanel};
use crate::checkin::{format_room_ids, parse_room_ids};
use crate::query::hooks::use_query;
use crate::query::{resources, QueryKey};
use crate::timers::hooks::use_notice;

#[component]
pub fn QrCheck(room_ids: String) -> Element {
    let notice = use_notice();
    let current = use_memo(use_reactive((&room_ids,), |(room_ids,)| parse_room_ids(&room_ids)));

    let rooms = use_query(
        move || {
            let ids = current();
            (!ids.is_empty()).then(|| QueryKey::new(resources::ROOMS).param(format_room_ids(&ids)))
        },
        move |api: ApiClient| {
            let ids = current.peek().clone();
            async move { api::rooms::rooms(&api, &ids).await }
        },
    );

    let selected = match rooms.data() {
        Some(rooms) if !rooms.is_empty() => rooms
            .iter()
            .map(|r| r.room_name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        _ => "none".to_string(),
    };

    rsx! {
        Layout { title: "QR check-in".to_string(),
            h1 { "QR check-in" }
            p { "Selected rooms: {selected}" }
            p { "Scan your QR code with the scanner." }
            ScanPanel { room_ids: current(), notice }
            NoticeBanner { notice }
        }
    }
}
