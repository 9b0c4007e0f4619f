//! Wire types for the study-room reservation REST API.
//!
//! Every response body is wrapped in an envelope `{ "data": ... }`; errors
//! carry an optional `message` or `errorMessage` field. This crate only
//! describes the shapes, it performs no I/O.
//!
//! # Modules
//! - [`envelope`] - Response envelope and error body
//! - [`auth`] - Login and mail verification bodies
//! - [`user`] - User profile, sign-up, password and blocking
//! - [`room`] - Rooms and partitions
//! - [`reservation`] - Reservations and their states
//! - [`schedule`] - Available dates and operation policies
//! - [`check_in`] - Check-in and OTP codes

pub mod auth;
pub mod check_in;
pub mod envelope;
pub mod reservation;
pub mod room;
pub mod schedule;
pub mod user;

/// Room identifier
pub type RoomId = i64;
/// Partition (bookable sub-unit of a room) identifier
pub type PartitionId = i64;
/// Reservation identifier
pub type ReservationId = i64;
/// User identifier
pub type UserId = i64;
/// Department identifier
pub type DepartmentId = i64;

// Re-export commonly used types at crate root
pub use auth::{LoginRequest, MailSendResponse, MailVerifyRequest, TokenResponse};
pub use check_in::{CheckInRequest, CheckInResponse, CheckedInReservation, OtpResponse, RoomSelector};
pub use envelope::{ApiEnvelope, ErrorBody};
pub use reservation::{
    NewReservation, PartitionReservationInfo, PartitionReservationsResponse, ReservationInfo,
    ReservationListResponse, ReservationState, ReservedInterval, StateChangeRequest,
};
pub use room::{Partition, PartitionItems, PartitionsResponse, Room, RoomsResponse};
pub use schedule::{AvailableDates, OperationPolicy, PoliciesResponse, ScheduleRequest};
pub use user::{
    BlockedPeriod, BlockedUser, BlockedUsersResponse, EmailChangeRequest, NoShowCount,
    PasswordChangeRequest, PasswordResetRequest, ServiceRole, SignUpRequest, UserInfo,
    UserSearchResponse,
};
