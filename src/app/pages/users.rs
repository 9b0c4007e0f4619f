//! Admin user management: blocked users, search, per-user reservations.

use dioxus::prelude::*;
use studyroom_types::{ReservationId, ReservationState, UserId};

use crate::api::{self, ApiClient, ApiError};
use crate::app::components::{Layout, NoticeBanner};
use crate::app::use_api;
use crate::query::hooks::{run_mutation, use_query, use_query_context, QueryState};
use crate::query::{invalidates, resources, QueryKey};
use crate::timers::hooks::use_notice;
use crate::timetable::format_span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchBy {
    Serial,
    Name,
}

impl SearchBy {
    fn as_str(self) -> &'static str {
        match self {
            Self::Serial => "serial",
            Self::Name => "name",
        }
    }
}

/// Admin actions on a single reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReservationAction {
    Mark(ReservationState),
    Delete,
}

#[component]
pub fn Users() -> Element {
    let api = use_api();
    let query = use_query_context();
    let notice = use_notice();

    let mut search_by = use_signal(|| SearchBy::Serial);
    let mut term = use_signal(String::new);
    let mut search = use_signal(|| None::<(SearchBy, String)>);
    let mut selected_user = use_signal(|| None::<(UserId, String)>);

    let blocked = use_query(
        || Some(QueryKey::new(resources::BLOCKED_USERS)),
        |api: ApiClient| async move { api::users::blocked(&api).await },
    );

    let found = use_query(
        move || {
            search().map(|(by, term)| QueryKey::new(resources::USER_SEARCH).param(by.as_str()).param(term))
        },
        move |api: ApiClient| {
            let (by, term) = search.peek().clone().unwrap_or((SearchBy::Serial, String::new()));
            async move {
                match by {
                    SearchBy::Serial => api::users::by_serial(&api, &term).await,
                    SearchBy::Name => api::users::by_name(&api, &term).await,
                }
            }
        },
    );

    let user_reservations = use_query(
        move || selected_user().map(|(id, _)| QueryKey::new(resources::RESERVATIONS_BY_USER).param(id)),
        move |api: ApiClient| {
            let id = selected_user.peek().as_ref().map(|(id, _)| *id).unwrap_or_default();
            async move { api::reservations::by_user(&api, id).await }
        },
    );

    let unblock_query = query.clone();
    let unblock = move |user: UserId| {
        let query = unblock_query.clone();
        async move {
            let client = api.client();
            match run_mutation(&query, invalidates::BLOCKED_USER, api::users::unblock(&client, user)).await {
                Ok(()) => notice.success("User unblocked."),
                Err(e) => notice.error(e.user_message()),
            }
        }
    };

    let act = move |reservation: ReservationId, action: ReservationAction| {
        let query = query.clone();
        async move {
            let client = api.client();
            let result: Result<(), ApiError> = match action {
                ReservationAction::Mark(state) => {
                    run_mutation(
                        &query,
                        invalidates::MANAGED_RESERVATION,
                        api::reservations::set_state(&client, reservation, state),
                    )
                    .await
                }
                ReservationAction::Delete => {
                    run_mutation(
                        &query,
                        invalidates::MANAGED_RESERVATION,
                        api::reservations::admin_delete(&client, reservation),
                    )
                    .await
                }
            };
            match result {
                Ok(()) => notice.success("Reservation updated."),
                Err(e) => notice.error(e.user_message()),
            }
        }
    };

    let submit_search = move |e: FormEvent| {
        e.prevent_default();
        let value = term().trim().to_string();
        if value.is_empty() {
            notice.hint("Enter a search term.");
            return;
        }
        search.set(Some((search_by(), value)));
    };

    let blocked_list = match blocked.state() {
        QueryState::Ready(users) if users.is_empty() => rsx! { p { "No blocked users." } },
        QueryState::Ready(users) => rsx! {
            table {
                tbody {
                    for user in users {
                        tr { key: "{user.user_id}",
                            td { "{user.name}" }
                            td { {user.serial.clone().unwrap_or_default()} }
                            td {
                                {format_span(
                                    user.block_start_time.as_deref().unwrap_or_default(),
                                    user.block_end_time.as_deref().unwrap_or_default(),
                                )}
                            }
                            td {
                                button {
                                    class: "secondary outline",
                                    onclick: {
                                        let unblock = unblock.clone();
                                        let id = user.user_id;
                                        move |_| unblock(id)
                                    },
                                    "Unblock"
                                }
                            }
                        }
                    }
                }
            }
        },
        QueryState::Failed(message) => rsx! { p { "{message}" } },
        _ => rsx! { p { aria_busy: "true" } },
    };

    let results = match found.state() {
        QueryState::Ready(users) if users.is_empty() => rsx! { p { "No matching users." } },
        QueryState::Ready(users) => rsx! {
            ul {
                for user in users {
                    li {
                        a {
                            href: "#",
                            onclick: {
                                let user = user.clone();
                                move |e: MouseEvent| {
                                    e.prevent_default();
                                    if let Some(id) = user.user_id {
                                        selected_user.set(Some((id, user.name.clone())));
                                    }
                                }
                            },
                            "{user.name}"
                        }
                        " "
                        small { {user.serial.clone().unwrap_or_default()} }
                    }
                }
            }
        },
        QueryState::Failed(message) => rsx! { p { "{message}" } },
        QueryState::Loading => rsx! { p { aria_busy: "true" } },
        QueryState::Idle => rsx! {},
    };

    let history = match user_reservations.state() {
        QueryState::Ready(items) if items.is_empty() => rsx! { p { "No reservations." } },
        QueryState::Ready(items) => rsx! {
            table {
                tbody {
                    for r in items {
                        tr { key: "{r.reservation_id}",
                            td { "{r.room_name} " {r.partition_number.clone().unwrap_or_default()} }
                            td { {format_span(&r.start_date_time, &r.end_date_time)} }
                            td { "{r.state}" }
                            td {
                                div { class: "controls",
                                    for (label, action) in [
                                        ("Visited", ReservationAction::Mark(ReservationState::Visited)),
                                        ("No-show", ReservationAction::Mark(ReservationState::NotVisited)),
                                        ("Processed", ReservationAction::Mark(ReservationState::Processed)),
                                        ("Delete", ReservationAction::Delete),
                                    ] {
                                        button {
                                            class: "outline",
                                            onclick: {
                                                let act = act.clone();
                                                let id = r.reservation_id;
                                                move |_| act(id, action)
                                            },
                                            "{label}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
        QueryState::Failed(message) => rsx! { p { "{message}" } },
        QueryState::Loading => rsx! { p { aria_busy: "true" } },
        QueryState::Idle => rsx! {},
    };

    rsx! {
        Layout { title: "Users".to_string(),
            h1 { "Users" }
            NoticeBanner { notice }
            section {
                h2 { "Blocked users" }
                {blocked_list}
            }
            section {
                h2 { "Find a user" }
                form { onsubmit: submit_search,
                    fieldset { role: "group",
                        select {
                            onchange: move |e| search_by.set(if e.value() == "name" { SearchBy::Name } else { SearchBy::Serial }),
                            option { value: "serial", selected: search_by() == SearchBy::Serial, "Serial" }
                            option { value: "name", selected: search_by() == SearchBy::Name, "Name" }
                        }
                        input { placeholder: "Search", value: "{term}", oninput: move |e| term.set(e.value()) }
                        button { r#type: "submit", "Search" }
                    }
                }
                {results}
            }
            if let Some((_, name)) = selected_user() {
                section {
                    h2 { "Reservations of {name}" }
                    {history}
                }
            }
        }
    }
}
