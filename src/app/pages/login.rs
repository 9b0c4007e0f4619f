//! Login page.

use dioxus::prelude::*;

use crate::app::components::{Layout, NoticeBanner};
use crate::app::{use_api, use_session, Route};
use crate::query::hooks::use_query_context;
use crate::session;
use crate::timers::hooks::use_notice;

#[component]
pub fn Login() -> Element {
    let api = use_api();
    let mut session = use_session();
    let query = use_query_context();
    let notice = use_notice();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let query = query.clone();
        async move {
            if busy() {
                return;
            }
            let id = username();
            let pw = password();
            if id.trim().is_empty() || pw.is_empty() {
                notice.hint("Enter your ID and password");
                return;
            }

            busy.set(true);
            let result = session::login(&api.client(), &id, &pw).await;
            busy.set(false);

            match result {
                Ok(tokens) => {
                    session.write().commit_session(tokens);
                    query.reset();
                    password.set(String::new());
                    let _ = navigator().replace(Route::Rooms {});
                }
                Err(e) => notice.error(e.to_string()),
            }
        }
    };

    rsx! {
        Layout { title: "Log in".to_string(),
            h1 { "Log in" }
            NoticeBanner { notice }
            form { onsubmit: submit,
                input {
                    r#type: "text",
                    placeholder: "Student ID",
                    autocomplete: "username",
                    value: "{username}",
                    oninput: move |e| username.set(e.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    autocomplete: "current-password",
                    value: "{password}",
                    oninput: move |e| password.set(e.value()),
                }
                button { r#type: "submit", aria_busy: if busy() { "true" } else { "false" }, "Log in" }
            }
            div { class: "controls",
                Link { to: Route::SignUp {}, "Create an account" }
                Link { to: Route::PasswordReset {}, "Forgot your password?" }
            }
        }
    }
}
