use serde::{Serialize, Serializer};
use tracing::info;
use uuid::Uuid;

use super::{optional_text, parse_date, parse_id};
use crate::error::{require, AppError, ProviderResultExt};
use crate::middleware::SessionContext;
use crate::models::{Activity, ActivityStatus, NewActivity, Role, Student};
use crate::progress::StatusBreakdown;
use crate::repository::Repositories;
use crate::scope;
use crate::types::ActivityForm;

/// The status tab selected on the activities page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ActivityStatus),
}

impl StatusFilter {
    /// `None`, blank and `"all"` select every activity.
    pub fn parse(value: Option<&str>) -> Result<Self, AppError> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None | Some("all") => Ok(StatusFilter::All),
            Some(status) => status
                .parse()
                .map(StatusFilter::Only)
                .map_err(AppError::Validation),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn matches(&self, activity: &Activity) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => activity.status == *status,
        }
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Serialize)]
pub struct ActivitiesView {
    pub role: Role,
    /// Choices for the new-activity form.
    pub students: Vec<Student>,
    pub filter: StatusFilter,
    pub activities: Vec<Activity>,
    /// Counts over every visible activity, regardless of the filter.
    pub counts: StatusBreakdown,
}

pub struct ActivitiesPage<'a> {
    session: &'a SessionContext,
    repos: &'a Repositories,
}

impl<'a> ActivitiesPage<'a> {
    pub fn new(session: &'a SessionContext, repos: &'a Repositories) -> Self {
        ActivitiesPage { session, repos }
    }

    pub async fn load(&self, filter: StatusFilter) -> Result<ActivitiesView, AppError> {
        let scoped = scope::activities_for(self.session, self.repos)
            .await
            .or_fail("Failed to load data")?;

        let counts = StatusBreakdown::of(&scoped.activities);
        let activities = scoped
            .activities
            .into_iter()
            .filter(|a| filter.matches(a))
            .collect();

        Ok(ActivitiesView {
            role: self.session.role,
            students: scoped.students,
            filter,
            activities,
            counts,
        })
    }

    /// Creates a pending activity for one of the parent's own students.
    pub async fn add(&self, form: ActivityForm) -> Result<Activity, AppError> {
        let (Some(title), Some(due_date), Some(student_id)) = (
            require(&form.title),
            require(&form.due_date),
            require(&form.student_id),
        ) else {
            return Err(AppError::Validation(
                "Please fill in all required fields".to_string(),
            ));
        };

        let due_date = parse_date(due_date, "due date")?;
        let student_id = parse_id(student_id, "student")?;

        let scoped = scope::activities_for(self.session, self.repos)
            .await
            .or_fail("Failed to add activity")?;
        if !scoped.owns_student(student_id) {
            return Err(AppError::NotFound("Student not found".to_string()));
        }

        let activity = self
            .repos
            .activities
            .insert(NewActivity {
                title: title.to_string(),
                description: optional_text(form.description),
                due_date,
                student_id: Some(student_id),
                class_id: None,
                teacher_id: None,
                status: ActivityStatus::Pending,
            })
            .await
            .or_fail("Failed to add activity")?;

        info!(activity_id = %activity.id, student_id = %student_id, "Added activity");
        Ok(activity)
    }

    /// Moves a visible activity to `status`. Setting the current status again
    /// is accepted and leaves the row as it was.
    pub async fn update_status(
        &self,
        activity_id: Uuid,
        status: ActivityStatus,
    ) -> Result<Activity, AppError> {
        let scoped = scope::activities_for(self.session, self.repos)
            .await
            .or_fail("Failed to update activity status")?;
        if !scoped.activities.iter().any(|a| a.id == activity_id) {
            return Err(AppError::NotFound("Activity not found".to_string()));
        }

        let activity = self
            .repos
            .activities
            .update_status(activity_id, status)
            .await
            .or_fail("Failed to update activity status")?
            .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))?;

        info!(activity_id = %activity_id, status = %status, "Updated activity status");
        Ok(activity)
    }
}
