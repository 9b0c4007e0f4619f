//! Page components, one per route.

mod check_in;
mod check_visit;
mod home;
mod login;
mod my_page;
mod not_found;
mod password_reset;
mod qr_check;
mod rooms;
mod schedules;
mod sign_up;
mod users;

pub use check_in::CheckIn;
pub use check_visit::CheckVisit;
pub use home::Home;
pub use login::Login;
pub use my_page::MyPage;
pub use not_found::NotFound;
pub use password_reset::PasswordReset;
pub use qr_check::QrCheck;
pub use rooms::Rooms;
pub use schedules::Schedules;
pub use sign_up::SignUp;
pub use users::Users;
