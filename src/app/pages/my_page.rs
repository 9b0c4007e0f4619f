//! My page: own reservations, penalties and account settings.

use dioxus::prelude::*;
use studyroom_types::{ReservationId, ReservationState};

use crate::api::{self, ApiClient};
use crate::app::components::{Layout, NoticeBanner};
use crate::app::{use_api, use_app};
use crate::forms;
use crate::query::hooks::{run_mutation, use_query, use_query_context, QueryState};
use crate::query::{invalidates, resources, QueryKey};
use crate::timers::hooks::{use_countdown, use_notice};
use crate::timetable::format_span;

#[component]
pub fn MyPage() -> Element {
    let api = use_api();
    let query = use_query_context();
    let notice = use_notice();

    let me = use_query(
        || Some(QueryKey::new(resources::MY_INFO)),
        |api: ApiClient| async move { api::users::me(&api).await },
    );
    let reservations = use_query(
        || Some(QueryKey::new(resources::MY_RESERVATIONS)),
        |api: ApiClient| async move { api::reservations::mine(&api).await },
    );
    let no_show = use_query(
        || Some(QueryKey::new(resources::NO_SHOW)),
        |api: ApiClient| async move { api::reservations::no_show(&api).await },
    );
    let blocked = use_query(
        || Some(QueryKey::new(resources::BLOCKED_PERIOD)),
        |api: ApiClient| async move { api::users::blocked_period(&api).await },
    );

    let cancel = move |id: ReservationId| {
        let query = query.clone();
        async move {
            let client = api.client();
            match run_mutation(&query, invalidates::OWN_RESERVATION, api::reservations::delete_mine(&client, id)).await {
                Ok(()) => notice.success("Reservation cancelled."),
                Err(e) => notice.error(e.user_message()),
            }
        }
    };

    let profile = match me.state() {
        QueryState::Ready(user) => rsx! {
            p { strong { "{user.name}" } " ({user.username})" }
            if let Some(email) = user.email.as_deref() {
                p { small { "{email}" } }
            }
        },
        QueryState::Failed(message) => rsx! { p { "{message}" } },
        _ => rsx! { p { aria_busy: "true" } },
    };

    let penalties = rsx! {
        p {
            "No-shows: "
            strong { {no_show.data().map(|n| n.count.to_string()).unwrap_or_else(|| "-".to_string())} }
        }
        match blocked.data().flatten() {
            Some(period) => rsx! {
                p { class: "notice notice-err",
                    "Reservations blocked: "
                    {format_span(
                        period.block_start_time.as_deref().unwrap_or_default(),
                        period.block_end_time.as_deref().unwrap_or_default(),
                    )}
                }
            },
            None => rsx! {},
        }
    };

    let list = match reservations.state() {
        QueryState::Ready(items) if items.is_empty() => rsx! { p { "You have no reservations." } },
        QueryState::Ready(items) => rsx! {
            table {
                thead {
                    tr {
                        th { "Room" }
                        th { "Time" }
                        th { "State" }
                        th {}
                    }
                }
                tbody {
                    for r in items {
                        tr { key: "{r.reservation_id}",
                            td { "{r.room_name} " {r.partition_number.clone().unwrap_or_default()} }
                            td { {format_span(&r.start_date_time, &r.end_date_time)} }
                            td { "{r.state}" }
                            td {
                                if r.state == ReservationState::Reserved {
                                    button {
                                        class: "secondary outline",
                                        onclick: {
                                            let id = r.reservation_id;
                                            let cancel = cancel.clone();
                                            move |_| cancel(id)
                                        },
                                        "Cancel"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
        QueryState::Failed(message) => rsx! { p { "{message}" } },
        _ => rsx! { p { aria_busy: "true", "Loading reservations..." } },
    };

    rsx! {
        Layout { title: "My page".to_string(),
            h1 { "My page" }
            NoticeBanner { notice }
            section { {profile} {penalties} }
            section {
                h2 { "My reservations" }
                {list}
            }
            PasswordChange {}
            EmailChange {}
        }
    }
}

#[component]
fn PasswordChange() -> Element {
    let api = use_api();
    let query = use_query_context();
    let notice = use_notice();
    let mut current = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut confirm = use_signal(String::new);

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let query = query.clone();
        async move {
            if let Err(e) = forms::validate_new_password(&new_password(), &confirm()) {
                notice.hint(e.to_string());
                return;
            }
            let client = api.client();
            let (pre, next) = (current(), new_password());
            let change = api::users::change_password(&client, &pre, &next);
            match run_mutation(&query, invalidates::ACCOUNT, change).await {
                Ok(()) => {
                    current.set(String::new());
                    new_password.set(String::new());
                    confirm.set(String::new());
                    notice.success("Password changed.");
                }
                Err(e) => notice.error(e.user_message()),
            }
        }
    };

    rsx! {
        section {
            h2 { "Change password" }
            NoticeBanner { notice }
            form { onsubmit: submit,
                input { r#type: "password", placeholder: "Current password", value: "{current}", oninput: move |e| current.set(e.value()) }
                input { r#type: "password", placeholder: "New password", value: "{new_password}", oninput: move |e| new_password.set(e.value()) }
                input { r#type: "password", placeholder: "Confirm new password", value: "{confirm}", oninput: move |e| confirm.set(e.value()) }
                button { r#type: "submit", "Change password" }
            }
        }
    }
}

#[component]
fn EmailChange() -> Element {
    let app = use_app();
    let api = use_api();
    let query = use_query_context();
    let notice = use_notice();
    let countdown = use_countdown("email-change-code");
    let code_secs = app.config.verification_timer_secs;

    let mut password = use_signal(String::new);
    let mut new_email = use_signal(String::new);
    let mut code = use_signal(String::new);

    let send = move |_: MouseEvent| async move {
        if let Err(e) = forms::validate_email(&new_email()) {
            notice.hint(e.to_string());
            return;
        }
        match api::users::send_new_email_code(&api.client(), &password(), &new_email()).await {
            Ok(()) => {
                countdown.start(code_secs);
                notice.success("Verification code sent to the new address.");
            }
            Err(e) => notice.error(e.user_message()),
        }
    };

    let verify = move |_: MouseEvent| {
        let query = query.clone();
        async move {
            if let Err(e) = forms::validate_code(&code()) {
                notice.hint(e.to_string());
                return;
            }
            if !countdown.is_running() {
                notice.hint("The code has expired. Send a new one.");
                return;
            }
            let client = api.client();
            let (address, entered) = (new_email(), code());
            let confirm = api::users::verify_new_email(&client, &address, &entered);
            match run_mutation(&query, invalidates::ACCOUNT, confirm).await {
                Ok(()) => {
                    countdown.stop();
                    password.set(String::new());
                    code.set(String::new());
                    notice.success("E-mail address changed.");
                }
                Err(e) => notice.error(e.user_message()),
            }
        }
    };

    rsx! {
        section {
            h2 { "Change e-mail" }
            NoticeBanner { notice }
            input { r#type: "password", placeholder: "Password", value: "{password}", oninput: move |e| password.set(e.value()) }
            fieldset { role: "group",
                input { r#type: "email", placeholder: "New e-mail", value: "{new_email}", oninput: move |e| new_email.set(e.value()) }
                button { onclick: send, "Send code" }
            }
            if let Some(left) = countdown.get().filter(|c| !c.is_finished()) {
                small { "Code valid for {left}" }
            }
            fieldset { role: "group",
                input { placeholder: "Verification code", value: "{code}", oninput: move |e| code.set(e.value()) }
                button { onclick: verify, "Confirm" }
            }
        }
    }
}
