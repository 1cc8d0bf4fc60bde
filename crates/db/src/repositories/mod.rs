//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod art_type_repo;
pub mod award_repo;
pub mod dashboard_repo;
pub mod demand_repo;
pub mod feedback_repo;
pub mod lesson_repo;
pub mod link_repo;
pub mod notification_repo;
pub mod session_repo;
pub mod settings_repo;
pub mod user_repo;
pub mod work_session_repo;

pub use art_type_repo::ArtTypeRepo;
pub use award_repo::AwardRepo;
pub use dashboard_repo::DashboardRepo;
pub use demand_repo::DemandRepo;
pub use feedback_repo::FeedbackRepo;
pub use lesson_repo::{LessonProgressRepo, LessonRepo};
pub use link_repo::{LinkRepo, TagRepo};
pub use notification_repo::NotificationRepo;
pub use session_repo::SessionRepo;
pub use settings_repo::SettingsRepo;
pub use user_repo::UserRepo;
pub use work_session_repo::WorkSessionRepo;

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for list endpoints.
pub const MAX_LIMIT: i64 = 200;

/// Clamp a requested page size into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Build `?N, ?N+1, ...` placeholders for an `IN (...)` list of `count`
/// values starting at parameter index `first`.
pub(crate) fn placeholders(first: usize, count: usize) -> String {
    (first..first + count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}
