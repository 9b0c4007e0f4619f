//! Shared UI components.

pub mod layout;
pub mod nav;
pub mod notice;
pub mod scan_panel;
pub mod time_grid;

pub use layout::Layout;
pub use nav::Nav;
pub use notice::NoticeBanner;
pub use scan_panel::ScanPanel;
pub use time_grid::TimeGrid;
