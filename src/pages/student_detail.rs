use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, ProviderResultExt};
use crate::middleware::SessionContext;
use crate::models::{Activity, Student};
use crate::progress::ProgressSummary;
use crate::repository::Repositories;

#[derive(Debug, Serialize)]
pub struct StudentDetailView {
    pub student: Student,
    /// Latest due date first.
    pub activities: Vec<Activity>,
    pub summary: ProgressSummary,
}

pub struct StudentDetailPage<'a> {
    session: &'a SessionContext,
    repos: &'a Repositories,
}

impl<'a> StudentDetailPage<'a> {
    pub fn new(session: &'a SessionContext, repos: &'a Repositories) -> Self {
        StudentDetailPage { session, repos }
    }

    pub async fn load(&self, student_id: Uuid) -> Result<StudentDetailView, AppError> {
        let student = self
            .repos
            .students
            .find_by_id(student_id)
            .await
            .or_fail("Failed to load data")?
            .filter(|s| !self.session.is_parent() || s.parent_id == self.session.user_id)
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

        let activities = self
            .repos
            .activities
            .find_by_student(student.id)
            .await
            .or_fail("Failed to load data")?;

        Ok(StudentDetailView {
            summary: ProgressSummary::of(&activities),
            student,
            activities,
        })
    }
}
