//! Admin visit check: reservations of the selected rooms on a date, plus a
//! scanner field for desk check-in.

use chrono::NaiveDate;
use dioxus::prelude::*;
use studyroom_types::RoomId;

use crate::api::{self, ApiClient};
use crate::app::components::{Layout, NoticeBanner, ScanPanel};
use crate::app::Route;
use crate::checkin::{format_room_ids, parse_room_ids};
use crate::forms::{format_date_input, parse_date_input};
use crate::query::hooks::{use_query, QueryState};
use crate::query::{resources, QueryKey};
use crate::timers::hooks::use_notice;
use crate::timetable::format_span;

#[component]
pub fn CheckVisit(room_ids: String) -> Element {
    let notice = use_notice();
    let selected = use_memo(use_reactive((&room_ids,), |(room_ids,)| parse_room_ids(&room_ids)));
    let mut date_input = use_signal(String::new);
    let mut lookup = use_signal(|| None::<NaiveDate>);

    let all_rooms = use_query(
        || Some(QueryKey::new(resources::ALL_ROOMS)),
        |api: ApiClient| async move { api::rooms::all_rooms(&api).await },
    );

    let partitions = use_query(
        move || {
            let ids = selected();
            (!ids.is_empty()).then(|| QueryKey::new(resources::PARTITIONS_BY_ROOMS).param(format_room_ids(&ids)))
        },
        move |api: ApiClient| {
            let ids = selected.peek().clone();
            async move { api::rooms::partitions_by_room_ids(&api, &ids).await }
        },
    );

    let reservations = use_query(
        move || {
            let day = lookup()?;
            let ids: Vec<_> = partitions.data()?.iter().map(|p| p.room_partition_id).collect();
            Some(
                QueryKey::new(resources::RESERVATIONS_BY_PARTITIONS)
                    .param(day)
                    .param(format_room_ids(&ids)),
            )
        },
        move |api: ApiClient| {
            let day = lookup.peek().unwrap_or_default();
            let ids: Vec<_> = partitions
                .data()
                .unwrap_or_default()
                .iter()
                .map(|p| p.room_partition_id)
                .collect();
            async move { api::reservations::by_partitions_date(&api, day, &ids).await }
        },
    );

    let toggle_room = move |room: RoomId| {
        let mut ids = selected();
        match ids.iter().position(|id| *id == room) {
            Some(pos) => {
                ids.remove(pos);
            }
            None => ids.push(room),
        }
        let _ = navigator().replace(Route::CheckVisit {
            room_ids: format_room_ids(&ids),
        });
    };

    let search = move |_: MouseEvent| match parse_date_input(&date_input()) {
        Ok(day) => lookup.set(Some(day)),
        Err(e) => notice.hint(e.to_string()),
    };

    let table = match reservations.state() {
        QueryState::Idle => rsx! {},
        QueryState::Ready(items) if items.is_empty() => rsx! { p { "No reservations on this date." } },
        QueryState::Ready(items) => rsx! {
            table {
                thead {
                    tr {
                        th { "ID" }
                        th { "Room" }
                        th { "Name" }
                        th { "Time" }
                        th { "State" }
                    }
                }
                tbody {
                    for r in items {
                        tr { key: "{r.reservation_id}",
                            td { "{r.reservation_id}" }
                            td { "{r.room_name} " {r.partition_number.clone().unwrap_or_default()} }
                            td { {r.name.clone().unwrap_or_default()} }
                            td { {format_span(&r.start_date_time, &r.end_date_time)} }
                            td { "{r.state}" }
                        }
                    }
                }
            }
        },
        QueryState::Failed(message) => rsx! { p { class: "notice notice-err", "{message}" } },
        QueryState::Loading => rsx! { p { aria_busy: "true", "Loading reservations..." } },
    };

    let chosen = selected();
    rsx! {
        Layout { title: "Visit check".to_string(),
            h1 { "Visit check" }
            NoticeBanner { notice }
            div { class: "grid",
                section {
                    h2 { "Rooms" }
                    for room in all_rooms.data().unwrap_or_default() {
                        label { key: "{room.room_id}",
                            input {
                                r#type: "checkbox",
                                checked: chosen.contains(&room.room_id),
                                onchange: move |_| toggle_room(room.room_id),
                            }
                            "{room.room_name}"
                        }
                    }
                    h2 { "Attendance date" }
                    fieldset { role: "group",
                        input {
                            placeholder: "YYYYMMDD",
                            value: "{date_input}",
                            oninput: move |e| date_input.set(format_date_input(&e.value())),
                        }
                        button { onclick: search, "Look up" }
                    }
                    {table}
                }
                section {
                    h2 { "QR check-in" }
                    ScanPanel { room_ids: chosen.clone(), notice }
                    if !chosen.is_empty() {
                        Link {
                            to: Route::QrCheck { room_ids: format_room_ids(&chosen) },
                            "Open kiosk page"
                        }
                    }
                }
            }
        }
    }
}
