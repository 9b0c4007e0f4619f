//! Study Room - reservation web client
//!
//! Browser client for the department study-room service:
//! - Room time tables with slot selection and reservation
//! - My page: reservations, no-shows, block status, account changes
//! - OTP and QR based check-in
//! - Admin tools: visit checks, kiosk check-in, users, schedules
//!
//! Business rules live on the server; this crate owns the interaction state
//! (selection, session, query cache, timers) and the pages.

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

// Dioxus UI app (pages, components, routing)
pub mod app;

// REST client and endpoint wrappers
pub mod api;
pub mod config;
pub mod query;
pub mod session;

// Interaction state, UI independent
pub mod checkin;
pub mod forms;
pub mod route;
pub mod selection;
pub mod timers;
pub mod timetable;
