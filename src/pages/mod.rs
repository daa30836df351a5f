//! One view-controller per page. Each takes the caller's session and the
//! repositories bound to it, loads the page's view model, and performs the
//! page's mutations. Mutations hand back the stored row so callers can patch
//! what they already hold instead of reloading.

pub mod activities;
pub mod dashboard;
pub mod find_tutor;
pub mod guides;
pub mod layout;
pub mod marketing;
pub mod messages;
pub mod progress;
pub mod student_detail;
pub mod students;
pub mod teacher_dashboard;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::AppError;

pub use layout::{Layout, Page};

pub(crate) fn parse_date(value: &str, field: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {}, expected YYYY-MM-DD", field)))
}

pub(crate) fn parse_id(value: &str, field: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value.trim()).map_err(|_| AppError::Validation(format!("Invalid {}", field)))
}

/// Trimmed description, `None` when blank.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
