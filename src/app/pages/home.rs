use dioxus::prelude::*;

use crate::app::components::Layout;
use crate::app::{use_session, Route};

#[component]
pub fn Home() -> Element {
    let session = use_session();
    let logged_in = session.read().is_authenticated();

    rsx! {
        Layout { title: "Home".to_string(),
            hgroup {
                h1 { "Study Room" }
                p { "Reserve a department study room, check in with your code, and manage your bookings." }
            }
            div { class: "controls",
                Link { to: Route::Rooms {}, role: "button", "See time tables" }
                if logged_in {
                    Link { to: Route::MyPage {}, role: "button", class: "secondary", "My reservations" }
                } else {
                    Link { to: Route::Login {}, role: "button", class: "secondary", "Log in" }
                }
            }
        }
    }
}
