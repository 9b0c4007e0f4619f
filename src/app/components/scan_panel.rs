//! Scanner input for desk check-in.

use dioxus::prelude::*;
use studyroom_types::RoomId;

use crate::api;
use crate::app::use_api;
use crate::checkin::{success_message, ScanBuffer};
use crate::query::hooks::{run_mutation, use_query_context};
use crate::query::invalidates;
use crate::timers::hooks::NoticeHandle;

/// Text field a scanner types into; Enter submits the code for `room_ids`
#[component]
pub fn ScanPanel(room_ids: Vec<RoomId>, notice: NoticeHandle) -> Element {
    let api = use_api();
    let query = use_query_context();
    let mut buffer = use_signal(ScanBuffer::default);

    let on_key = move |e: KeyboardEvent| {
        let query = query.clone();
        let room_ids = room_ids.clone();
        let code = if e.key() == Key::Enter {
            buffer.write().submit()
        } else {
            None
        };
        async move {
            let Some(code) = code else {
                return;
            };
            if room_ids.is_empty() {
                notice.hint("Select a room first.");
                return;
            }
            tracing::debug!(rooms = ?room_ids, "Submitting check-in");
            let client = api.client();
            match run_mutation(&query, invalidates::CHECK_IN, api::check_in::check_in(&client, &code, &room_ids)).await {
                Ok(resp) => notice.success(success_message(&resp)),
                Err(e) => notice.error(e.user_message()),
            }
        }
    };

    rsx! {
        input {
            r#type: "text",
            placeholder: "Scan QR code",
            autofocus: true,
            value: buffer.read().text().to_string(),
            oninput: move |e| buffer.write().set(e.value()),
            onkeydown: on_key,
        }
    }
}
