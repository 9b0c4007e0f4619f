//! Dioxus application entry point.
//!
//! The root component installs the shared contexts (configuration, session,
//! query cache) and mounts the router.

use std::sync::Arc;

use dioxus::prelude::*;

pub mod components;
pub mod pages;

use crate::api::{self, ApiClient, ApiError};
use crate::config::ClientConfig;
use crate::query::hooks::{use_query, use_query_provider, QueryState};
use crate::query::{resources, QueryKey};
use crate::route::SessionView;
use crate::session::{storage, AuthSession};
use crate::timetable::TimeTable;

use pages::{
    CheckIn, CheckVisit, Home, Login, MyPage, NotFound, PasswordReset, QrCheck, Rooms, Schedules, SignUp, Users,
};

/// Read-only state shared by every page
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ClientConfig>,
    /// Unauthenticated base client
    pub api: ApiClient,
    pub time_table: Arc<TimeTable>,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api_base_url)?;
        let time_table = Arc::new(TimeTable::new(&config.time_table));
        Ok(Self {
            config: Arc::new(config),
            api,
            time_table,
        })
    }
}

/// Copyable access to a client carrying the current session's token
#[derive(Clone, Copy)]
pub struct ApiHandle {
    base: CopyValue<ApiClient>,
    session: Signal<AuthSession>,
}

impl ApiHandle {
    /// Client for the session as it is right now (does not subscribe)
    pub fn client(&self) -> ApiClient {
        self.session.peek().client(&self.base.read())
    }
}

pub fn use_app() -> AppContext {
    use_context::<AppContext>()
}

pub fn use_session() -> Signal<AuthSession> {
    use_context::<Signal<AuthSession>>()
}

pub fn use_api() -> ApiHandle {
    use_context::<ApiHandle>()
}

/// Routing view of the session. `None` while the admin flag is still loading.
pub fn use_session_view() -> Memo<Option<SessionView>> {
    let session = use_session();
    let me = use_query(
        move || {
            session
                .read()
                .is_authenticated()
                .then(|| QueryKey::new(resources::MY_INFO))
        },
        |api| async move { api::users::me(&api).await },
    );

    use_memo(move || {
        if !session.read().is_authenticated() {
            return Some(SessionView::default());
        }
        match me.state() {
            QueryState::Ready(user) => Some(SessionView {
                logged_in: true,
                is_admin: user.service_role.is_admin(),
            }),
            QueryState::Failed(_) => Some(SessionView {
                logged_in: true,
                is_admin: false,
            }),
            QueryState::Idle | QueryState::Loading => None,
        }
    })
}

/// Root app component with routing
#[component]
pub fn App() -> Element {
    let app = use_app();
    let session = use_context_provider(|| Signal::new(storage::load()));
    use_context_provider(|| ApiHandle {
        base: CopyValue::new(app.api.clone()),
        session,
    });
    use_query_provider();

    // Mirror the session into browser storage
    use_effect(move || storage::save(&session.read()));

    rsx! {
        Router::<Route> {}
    }
}

/// Application routes; access levels live in [`crate::route::ROUTES`]
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[route("/sign-up")]
    SignUp {},
    #[route("/password-reset")]
    PasswordReset {},
    #[route("/rooms")]
    Rooms {},
    #[route("/my")]
    MyPage {},
    #[route("/check-in")]
    CheckIn {},
    #[route("/manage/visits?:room_ids")]
    CheckVisit { room_ids: String },
    #[route("/manage/qr?:room_ids")]
    QrCheck { room_ids: String },
    #[route("/manage/users")]
    Users {},
    #[route("/manage/schedules")]
    Schedules {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{access_of, ROUTES};

    #[test]
    fn test_every_guarded_path_has_a_page() {
        for (path, _) in ROUTES {
            let route: Route = path.parse().unwrap_or_else(|_| panic!("{path} does not parse"));
            assert!(
                !matches!(route, Route::NotFound { .. }),
                "{path} falls through to NotFound"
            );
        }
    }

    #[test]
    fn test_every_page_has_an_access_level() {
        let pages = [
            Route::Home {},
            Route::Login {},
            Route::SignUp {},
            Route::PasswordReset {},
            Route::Rooms {},
            Route::MyPage {},
            Route::CheckIn {},
            Route::CheckVisit {
                room_ids: "1,2".into(),
            },
            Route::QrCheck {
                room_ids: "1".into(),
            },
            Route::Users {},
            Route::Schedules {},
        ];
        for page in pages {
            assert!(access_of(&page.to_string()).is_some(), "{page} has no access level");
        }
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let route: Route = "/nowhere/at/all"
            .parse()
            .unwrap_or_else(|_| panic!("catch-all route must match"));
        assert!(matches!(route, Route::NotFound { .. }));
        assert_eq!(access_of("/nowhere/at/all"), None);
    }
}
