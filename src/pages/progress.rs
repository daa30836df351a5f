use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, ProviderResultExt};
use crate::middleware::SessionContext;
use crate::models::{Activity, ActivityStatus, Student};
use crate::progress::ProgressSummary;
use crate::repository::Repositories;
use crate::scope;

#[derive(Debug, PartialEq, Serialize)]
pub struct StatusShare {
    pub status: ActivityStatus,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct ProgressView {
    pub students: Vec<Student>,
    pub selected_student_id: Option<Uuid>,
    pub activities: Vec<Activity>,
    pub summary: ProgressSummary,
    pub statuses: Vec<StatusShare>,
}

pub struct ProgressPage<'a> {
    session: &'a SessionContext,
    repos: &'a Repositories,
}

impl<'a> ProgressPage<'a> {
    pub fn new(session: &'a SessionContext, repos: &'a Repositories) -> Self {
        ProgressPage { session, repos }
    }

    /// Rollups for one student, the first selectable one when none is given.
    pub async fn load(&self, student_id: Option<Uuid>) -> Result<ProgressView, AppError> {
        let students = scope::students_for(self.session, self.repos)
            .await
            .or_fail("Failed to load data")?;

        let selected = match student_id {
            Some(id) if !students.iter().any(|s| s.id == id) => {
                return Err(AppError::NotFound("Student not found".to_string()));
            }
            Some(id) => Some(id),
            None => students.first().map(|s| s.id),
        };

        let activities = match selected {
            Some(id) => self
                .repos
                .activities
                .find_by_student(id)
                .await
                .or_fail("Failed to load data")?,
            None => Vec::new(),
        };

        let summary = ProgressSummary::of(&activities);
        let statuses = ActivityStatus::ALL
            .iter()
            .map(|&status| StatusShare {
                status,
                count: summary.breakdown.count(status),
                percentage: summary.breakdown.percentage(status),
            })
            .collect();

        Ok(ProgressView {
            students,
            selected_student_id: selected,
            activities,
            summary,
            statuses,
        })
    }
}
