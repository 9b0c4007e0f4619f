//! REST API access
//!
//! [`ApiClient`] handles transport; the submodules hold one async function
//! per endpoint, returning the unwrapped payload.

mod client;
mod error;

pub mod auth;
pub mod check_in;
pub mod reservations;
pub mod rooms;
pub mod schedules;
pub mod users;

#[cfg(test)]
pub(crate) mod mock;

pub use client::ApiClient;
pub use error::{ApiError, GENERIC_FAILURE};
