//! Admin schedules: apply an operation policy to rooms on chosen dates.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use dioxus::prelude::*;
use studyroom_types::RoomId;

use crate::api::{self, ApiClient};
use crate::app::components::{Layout, NoticeBanner};
use crate::app::use_api;
use crate::forms::{format_date_input, parse_date_input};
use crate::query::hooks::{run_mutation, use_query, use_query_context, QueryState};
use crate::query::{invalidates, resources, QueryKey};
use crate::timers::hooks::use_notice;

#[component]
pub fn Schedules() -> Element {
    let api = use_api();
    let query = use_query_context();
    let notice = use_notice();

    let mut policy = use_signal(|| None::<i64>);
    let mut rooms = use_signal(BTreeSet::<RoomId>::new);
    let mut dates = use_signal(BTreeSet::<NaiveDate>::new);
    let mut date_input = use_signal(String::new);

    let policies = use_query(
        || Some(QueryKey::new(resources::POLICIES)),
        |api: ApiClient| async move { api::schedules::policies(&api).await },
    );
    let all_rooms = use_query(
        || Some(QueryKey::new(resources::ALL_ROOMS)),
        |api: ApiClient| async move { api::rooms::all_rooms(&api).await },
    );

    let add_date = move |_: MouseEvent| match parse_date_input(&date_input()) {
        Ok(day) => {
            dates.write().insert(day);
            date_input.set(String::new());
        }
        Err(e) => notice.hint(e.to_string()),
    };

    let apply = move |_: MouseEvent| {
        let query = query.clone();
        async move {
            let Some(policy_id) = policy() else {
                notice.hint("Choose a policy.");
                return;
            };
            let room_ids: Vec<_> = rooms().into_iter().collect();
            let days: Vec<_> = dates().into_iter().collect();
            if room_ids.is_empty() || days.is_empty() {
                notice.hint("Choose at least one room and one date.");
                return;
            }
            let client = api.client();
            let request = api::schedules::apply_policy(&client, &room_ids, policy_id, &days);
            match run_mutation(&query, invalidates::SCHEDULE, request).await {
                Ok(()) => {
                    dates.write().clear();
                    notice.success("Schedule applied.");
                }
                Err(e) => notice.error(e.user_message()),
            }
        }
    };

    let policy_list = match policies.state() {
        QueryState::Ready(items) => rsx! {
            for p in items {
                label { key: "{p.room_operation_policy_id}",
                    input {
                        r#type: "radio",
                        name: "policy",
                        checked: policy() == Some(p.room_operation_policy_id),
                        onchange: move |_| policy.set(Some(p.room_operation_policy_id)),
                    }
                    {p.operation_start_time.clone().unwrap_or_default()}
                    " - "
                    {p.operation_end_time.clone().unwrap_or_default()}
                    if let Some(max) = p.each_max_minute {
                        small { " (max {max} min)" }
                    }
                }
            }
        },
        QueryState::Failed(message) => rsx! { p { "{message}" } },
        _ => rsx! { p { aria_busy: "true" } },
    };

    rsx! {
        Layout { title: "Schedules".to_string(),
            h1 { "Schedules" }
            NoticeBanner { notice }
            section {
                h2 { "Operation policy" }
                {policy_list}
            }
            section {
                h2 { "Rooms" }
                for room in all_rooms.data().unwrap_or_default() {
                    label { key: "{room.room_id}",
                        input {
                            r#type: "checkbox",
                            checked: rooms.read().contains(&room.room_id),
                            onchange: move |_| {
                                let mut set = rooms.write();
                                if !set.remove(&room.room_id) {
                                    set.insert(room.room_id);
                                }
                            },
                        }
                        "{room.room_name}"
                    }
                }
            }
            section {
                h2 { "Dates" }
                fieldset { role: "group",
                    input {
                        placeholder: "YYYYMMDD",
                        value: "{date_input}",
                        oninput: move |e| date_input.set(format_date_input(&e.value())),
                    }
                    button { onclick: add_date, "Add" }
                }
                ul {
                    for day in dates() {
                        li { key: "{day}",
                            "{day} "
                            a {
                                href: "#",
                                onclick: move |e: MouseEvent| {
                                    e.prevent_default();
                                    dates.write().remove(&day);
                                },
                                "remove"
                            }
                        }
                    }
                }
            }
            button { onclick: apply, "Apply schedule" }
        }
    }
}
