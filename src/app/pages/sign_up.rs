//! Account creation followed by e-mail verification.

use dioxus::prelude::*;
use studyroom_types::SignUpRequest;

use crate::api;
use crate::app::components::{Layout, NoticeBanner};
use crate::app::{use_api, use_app, Route};
use crate::forms::{self, InputError};
use crate::timers::hooks::{use_countdown, use_notice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Details,
    Verify,
}

fn validate(
    username: &str,
    password: &str,
    confirm: &str,
    name: &str,
    serial: &str,
    email: &str,
) -> Result<SignUpRequest, InputError> {
    let username = forms::required(username, "your student ID")?;
    let name = forms::required(name, "your name")?;
    let serial = forms::required(serial, "your serial number")?;
    forms::validate_new_password(password, confirm)?;
    forms::validate_email(email)?;
    Ok(SignUpRequest {
        username: username.to_string(),
        password: password.to_string(),
        serial: serial.to_string(),
        name: name.to_string(),
        email: email.trim().to_string(),
    })
}

#[component]
pub fn SignUp() -> Element {
    let app = use_app();
    let api = use_api();
    let notice = use_notice();
    let countdown = use_countdown("sign-up-code");
    let code_secs = app.config.verification_timer_secs;

    let mut step = use_signal(|| Step::Details);
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut serial = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut code = use_signal(String::new);
    let mut sent_to = use_signal(String::new);

    let send_code = move || async move {
        match api::auth::send_mail_code(&api.client(), &username()).await {
            Ok(resp) => {
                sent_to.set(resp.email);
                countdown.start(code_secs);
                notice.success("Verification code sent.");
            }
            Err(e) => notice.error(e.user_message()),
        }
    };

    let submit_details = move |e: FormEvent| {
        e.prevent_default();
        async move {
            let request = match validate(&username(), &password(), &confirm(), &name(), &serial(), &email()) {
                Ok(request) => request,
                Err(e) => {
                    notice.hint(e.to_string());
                    return;
                }
            };
            if let Err(e) = api::users::sign_up(&api.client(), &request).await {
                notice.error(e.user_message());
                return;
            }
            step.set(Step::Verify);
            send_code().await;
        }
    };

    let verify = move |_: MouseEvent| async move {
        if let Err(e) = forms::validate_code(&code()) {
            notice.hint(e.to_string());
            return;
        }
        if !countdown.is_running() {
            notice.hint("The code has expired. Send a new one.");
            return;
        }
        match api::auth::verify_mail_code(&api.client(), &sent_to(), &code()).await {
            Ok(()) => {
                countdown.stop();
                notice.success("E-mail verified. You can log in now.");
                let _ = navigator().replace(Route::Login {});
            }
            Err(e) => notice.error(e.user_message()),
        }
    };

    rsx! {
        Layout { title: "Sign up".to_string(),
            h1 { "Sign up" }
            NoticeBanner { notice }
            match step() {
                Step::Details => rsx! {
                    form { onsubmit: submit_details,
                        input { placeholder: "Student ID", value: "{username}", oninput: move |e| username.set(e.value()) }
                        input { r#type: "password", placeholder: "Password", value: "{password}", oninput: move |e| password.set(e.value()) }
                        input { r#type: "password", placeholder: "Confirm password", value: "{confirm}", oninput: move |e| confirm.set(e.value()) }
                        input { placeholder: "Name", value: "{name}", oninput: move |e| name.set(e.value()) }
                        input { placeholder: "Serial number", value: "{serial}", oninput: move |e| serial.set(e.value()) }
                        input { r#type: "email", placeholder: "E-mail", value: "{email}", oninput: move |e| email.set(e.value()) }
                        button { r#type: "submit", "Create account" }
                    }
                },
                Step::Verify => rsx! {
                    p { "A verification code was sent to {sent_to}." }
                    if let Some(left) = countdown.get() {
                        small { "Code valid for {left}" }
                    }
                    input { placeholder: "Verification code", value: "{code}", oninput: move |e| code.set(e.value()) }
                    div { class: "controls",
                        button { onclick: verify, "Verify" }
                        button { class: "secondary", onclick: move |_| send_code(), "Send again" }
                    }
                },
            }
        }
    }
}
