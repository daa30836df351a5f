use serde::Serialize;
use tracing::{info, warn};

use super::{optional_text, parse_date, parse_id};
use crate::error::{require, AppError, ProviderResultExt};
use crate::middleware::SessionContext;
use crate::models::{Activity, ActivityStatus, NewActivity, StudentProgress, TeacherClass};
use crate::progress::{student_completion, ClassOverview};
use crate::repository::Repositories;
use crate::types::AssignmentForm;

const DASHBOARD_ROUTE: &str = "/dashboard";

#[derive(Debug, Serialize)]
pub struct StudentRow {
    #[serde(flatten)]
    pub progress: StudentProgress,
    pub completion: f64,
}

#[derive(Debug, Serialize)]
pub struct TeacherDashboardView {
    pub user: SessionContext,
    pub classes: Vec<TeacherClass>,
    pub students: Vec<StudentRow>,
    pub overview: ClassOverview,
}

pub struct TeacherDashboardPage<'a> {
    session: &'a SessionContext,
    repos: &'a Repositories,
}

impl<'a> TeacherDashboardPage<'a> {
    /// Anyone but a teacher is sent back to the general dashboard.
    pub fn new(session: &'a SessionContext, repos: &'a Repositories) -> Result<Self, AppError> {
        if !session.is_teacher() {
            warn!(user_id = %session.user_id, role = %session.role, "Non-teacher on teacher dashboard");
            return Err(AppError::Redirect(DASHBOARD_ROUTE));
        }
        Ok(TeacherDashboardPage { session, repos })
    }

    pub async fn load(&self) -> Result<TeacherDashboardView, AppError> {
        let classes = self.classes().await?;
        let class_ids: Vec<_> = classes.iter().map(|c| c.id).collect();
        let progress = self
            .repos
            .classes
            .progress_for_classes(&class_ids)
            .await
            .or_fail("Failed to load data")?;

        let overview = ClassOverview::of(&classes, &progress);
        let students = progress
            .into_iter()
            .map(|progress| StudentRow {
                completion: student_completion(&progress),
                progress,
            })
            .collect();

        Ok(TeacherDashboardView {
            user: self.session.clone(),
            classes,
            students,
            overview,
        })
    }

    /// Assigns a pending activity to one of the teacher's classes.
    pub async fn assign(&self, form: AssignmentForm) -> Result<Activity, AppError> {
        let (Some(title), Some(due_date), Some(class_id)) = (
            require(&form.title),
            require(&form.due_date),
            require(&form.class_id),
        ) else {
            return Err(AppError::Validation("Please fill in all fields".to_string()));
        };

        let due_date = parse_date(due_date, "due date")?;
        let class_id = parse_id(class_id, "class")?;

        if !self.classes().await?.iter().any(|c| c.id == class_id) {
            return Err(AppError::NotFound("Class not found".to_string()));
        }

        let activity = self
            .repos
            .activities
            .insert(NewActivity {
                title: title.to_string(),
                description: optional_text(form.description),
                due_date,
                student_id: None,
                class_id: Some(class_id),
                teacher_id: Some(self.session.user_id.clone()),
                status: ActivityStatus::Pending,
            })
            .await
            .or_fail("Failed to create assignment")?;

        info!(activity_id = %activity.id, class_id = %class_id, "Created assignment");
        Ok(activity)
    }

    async fn classes(&self) -> Result<Vec<TeacherClass>, AppError> {
        self.repos
            .classes
            .find_by_teacher(&self.session.user_id)
            .await
            .or_fail("Failed to load data")
    }
}
