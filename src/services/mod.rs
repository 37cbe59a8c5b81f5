pub mod dashboard_service;
pub mod wipe_service;

pub use dashboard_service::{dashboard_stats, overview, AdminOverview, DashboardStats};
pub use wipe_service::{clear_all_data, WipeReport, WIPE_COLLECTIONS};
