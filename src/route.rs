//! Route access rules
//!
//! Which pages a visitor may open is a pure function of the session; the
//! router consults it on every render.

use std::collections::BTreeSet;

/// Landing page; every refused or unknown path ends up here
pub const HOME: &str = "/";

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

/// The part of the session routing cares about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionView {
    pub logged_in: bool,
    pub is_admin: bool,
}

/// Every page of the application and its access level
pub const ROUTES: &[(&str, Access)] = &[
    ("/", Access::Public),
    ("/login", Access::Public),
    ("/sign-up", Access::Public),
    ("/password-reset", Access::Public),
    ("/rooms", Access::Public),
    ("/my", Access::Authenticated),
    ("/check-in", Access::Authenticated),
    ("/manage/visits", Access::Admin),
    ("/manage/qr", Access::Admin),
    ("/manage/users", Access::Admin),
    ("/manage/schedules", Access::Admin),
];

pub fn permits(access: Access, view: SessionView) -> bool {
    match access {
        Access::Public => true,
        Access::Authenticated => view.logged_in,
        Access::Admin => view.logged_in && view.is_admin,
    }
}

/// Access level of `path` (query string ignored), `None` for unknown paths
pub fn access_of(path: &str) -> Option<Access> {
    let path = path.split('?').next().unwrap_or(path);
    let path = match path.trim_end_matches('/') {
        "" => HOME,
        trimmed => trimmed,
    };
    ROUTES.iter().find(|(p, _)| *p == path).map(|(_, a)| *a)
}

/// Paths `view` may open
pub fn allowed_routes(view: SessionView) -> BTreeSet<&'static str> {
    ROUTES
        .iter()
        .filter(|(_, access)| permits(*access, view))
        .map(|(path, _)| *path)
        .collect()
}

/// `path` itself when it is known and permitted, otherwise [`HOME`]
pub fn resolve(path: &str, view: SessionView) -> &str {
    match access_of(path) {
        Some(access) if permits(access, view) => path,
        _ => HOME,
    }
}
