use dioxus::prelude::*;

use crate::timers::hooks::NoticeHandle;

/// Renders the handle's current notice, if any
#[component]
pub fn NoticeBanner(notice: NoticeHandle) -> Element {
    let Some(current) = notice.current() else {
        return rsx! {};
    };
    let class = if current.is_error() { "notice notice-err" } else { "notice notice-ok" };

    rsx! {
        div { class: "{class}", role: "status",
            onclick: move |_| notice.dismiss(),
            "{current.text}"
        }
    }
}
