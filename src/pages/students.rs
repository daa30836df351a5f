use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::parse_date;
use crate::error::{require, AppError, ProviderResultExt};
use crate::middleware::SessionContext;
use crate::models::student::{DEFAULT_GRADE, GRADE_OPTIONS};
use crate::models::{NewStudent, Student};
use crate::repository::Repositories;
use crate::types::StudentForm;

#[derive(Debug, Serialize)]
pub struct StudentsView {
    pub students: Vec<Student>,
    pub grade_options: &'static [&'static str],
}

pub struct StudentsPage<'a> {
    session: &'a SessionContext,
    repos: &'a Repositories,
}

impl<'a> StudentsPage<'a> {
    pub fn new(session: &'a SessionContext, repos: &'a Repositories) -> Self {
        StudentsPage { session, repos }
    }

    pub async fn load(&self) -> Result<StudentsView, AppError> {
        let students = if self.session.is_parent() {
            self.repos
                .students
                .find_by_parent(&self.session.user_id)
                .await
                .or_fail("Failed to load data")?
        } else {
            Vec::new()
        };

        Ok(StudentsView {
            students,
            grade_options: &GRADE_OPTIONS,
        })
    }

    pub async fn add(&self, form: StudentForm) -> Result<Student, AppError> {
        let (Some(full_name), Some(date_of_birth)) =
            (require(&form.full_name), require(&form.date_of_birth))
        else {
            return Err(AppError::Validation("Please fill in all fields".to_string()));
        };

        let date_of_birth = parse_date(date_of_birth, "date of birth")?;
        let grade_level = require(&form.grade_level).unwrap_or(DEFAULT_GRADE);
        if !GRADE_OPTIONS.contains(&grade_level) {
            return Err(AppError::Validation(format!(
                "Unknown grade level: {}",
                grade_level
            )));
        }

        let student = self
            .repos
            .students
            .insert(NewStudent {
                full_name: full_name.to_string(),
                date_of_birth,
                grade_level: grade_level.to_string(),
                parent_id: self.session.user_id.clone(),
            })
            .await
            .or_fail("Failed to add student")?;

        info!(student_id = %student.id, parent_id = %student.parent_id, "Added student");
        Ok(student)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self
            .repos
            .students
            .delete(id, &self.session.user_id)
            .await
            .or_fail("Failed to delete student")?;

        if !deleted {
            return Err(AppError::NotFound("Student not found".to_string()));
        }
        info!(student_id = %id, "Deleted student");
        Ok(())
    }
}
