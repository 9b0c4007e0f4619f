//! Logged-out password reset: mail a code, verify it, set a new password.

use dioxus::prelude::*;

use crate::api;
use crate::app::components::{Layout, NoticeBanner};
use crate::app::{use_api, use_app, Route};
use crate::forms;
use crate::timers::hooks::{use_countdown, use_notice};

#[component]
pub fn PasswordReset() -> Element {
    let app = use_app();
    let api = use_api();
    let notice = use_notice();
    let countdown = use_countdown("password-reset-code");
    let code_secs = app.config.verification_timer_secs;

    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut code = use_signal(String::new);
    let mut verified = use_signal(|| false);
    let mut new_password = use_signal(String::new);
    let mut confirm = use_signal(String::new);

    let send_code = move |_: MouseEvent| async move {
        let id = match forms::required(&username(), "your student ID") {
            Ok(id) => id.to_string(),
            Err(e) => {
                notice.hint(e.to_string());
                return;
            }
        };
        match api::auth::send_mail_code(&api.client(), &id).await {
            Ok(resp) => {
                email.set(resp.email);
                verified.set(false);
                countdown.start(code_secs);
                notice.success("Verification code sent.");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sending reset code failed");
                notice.error("Could not send the verification code.");
            }
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
        match api::auth::verify_mail_code(&api.client(), &email(), &code()).await {
            Ok(()) => {
                countdown.stop();
                verified.set(true);
                notice.success("Code confirmed. Choose a new password.");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Reset code rejected");
                notice.hint("The verification code is not valid.");
            }
        }
    };

    let reset = move |_: MouseEvent| async move {
        if let Err(e) = forms::validate_new_password(&new_password(), &confirm()) {
            notice.hint(e.to_string());
            return;
        }
        match api::users::reset_password(&api.client(), &code(), &new_password()).await {
            Ok(()) => {
                notice.success("Password changed. Log in with the new password.");
                let _ = navigator().replace(Route::Login {});
            }
            Err(e) => notice.error(e.user_message()),
        }
    };

    rsx! {
        Layout { title: "Reset password".to_string(),
            h1 { "Reset your password" }
            p { "Enter your student ID; a verification code is sent to the e-mail address on file." }
            NoticeBanner { notice }

            fieldset { role: "group",
                input {
                    placeholder: "Student ID",
                    value: "{username}",
                    oninput: move |e| username.set(e.value()),
                }
                button { onclick: send_code, "Send code" }
            }
            if let Some(left) = countdown.get().filter(|c| !c.is_finished()) {
                small { "Code valid for {left}" }
            }

            if !verified() {
                fieldset { role: "group",
                    input {
                        placeholder: "Verification code",
                        value: "{code}",
                        oninput: move |e| code.set(e.value()),
                    }
                    button { onclick: verify, "Confirm" }
                }
            } else {
                input {
                    r#type: "password",
                    placeholder: "New password",
                    value: "{new_password}",
                    oninput: move |e| new_password.set(e.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Confirm new password",
                    value: "{confirm}",
                    oninput: move |e| confirm.set(e.value()),
                }
                button { onclick: reset, "Change password" }
            }
        }
    }
}
