//! Navigation bar; links depend on the session.

use dioxus::prelude::*;

use crate::app::{use_session, use_session_view, Route};
use crate::query::hooks::use_query_context;

#[component]
pub fn Nav() -> Element {
    let mut session = use_session();
    let view = use_session_view();
    let query = use_query_context();
    let current = use_route::<Route>();

    let view = view().unwrap_or_default();
    let link = |target: Route, label: &'static str| {
        let active = std::mem::discriminant(&target) == std::mem::discriminant(&current);
        rsx! {
            li {
                Link {
                    to: target,
                    aria_current: if active { "page" } else { "false" },
                    "{label}"
                }
            }
        }
    };

    rsx! {
        nav {
            ul {
                li { Link { to: Route::Home {}, strong { "Study Room" } } }
            }
            ul {
                {link(Route::Rooms {}, "Rooms")}
                if view.logged_in {
                    {link(Route::MyPage {}, "My page")}
                    {link(Route::CheckIn {}, "Check-in")}
                }
                if view.is_admin {
                    {link(Route::CheckVisit { room_ids: String::new() }, "Visits")}
                    {link(Route::Users {}, "Users")}
                    {link(Route::Schedules {}, "Schedules")}
                }
                if view.logged_in {
                    li {
                        a {
                            href: "#",
                            onclick: move |e| {
                                e.prevent_default();
                                session.write().logout();
                                query.reset();
                                let _ = navigator().replace(Route::Home {});
                            },
                            "Log out"
                        }
                    }
                } else {
                    {link(Route::Login {}, "Log in")}
                }
            }
        }
    }
}
