use serde::Serialize;

use crate::error::{AppError, ProviderResultExt};
use crate::middleware::SessionContext;
use crate::models::{Activity, Student};
use crate::progress::ProgressSummary;
use crate::repository::Repositories;
use crate::scope;

const UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub user: SessionContext,
    pub students: Vec<Student>,
    pub activities: Vec<Activity>,
    /// Earliest-due activities that are not completed yet.
    pub upcoming: Vec<Activity>,
    pub summary: ProgressSummary,
}

pub struct DashboardPage<'a> {
    session: &'a SessionContext,
    repos: &'a Repositories,
}

impl<'a> DashboardPage<'a> {
    pub fn new(session: &'a SessionContext, repos: &'a Repositories) -> Self {
        DashboardPage { session, repos }
    }

    pub async fn load(&self) -> Result<DashboardView, AppError> {
        let scoped = scope::activities_for(self.session, self.repos)
            .await
            .or_fail("Failed to load data")?;

        let upcoming = scoped
            .activities
            .iter()
            .filter(|a| !a.is_completed())
            .take(UPCOMING_LIMIT)
            .cloned()
            .collect();

        Ok(DashboardView {
            user: self.session.clone(),
            summary: ProgressSummary::of(&scoped.activities),
            students: scoped.students,
            activities: scoped.activities,
            upcoming,
        })
    }
}
