//! Role-based choice of what a caller may see.

use tracing::debug;
use uuid::Uuid;

use crate::middleware::SessionContext;
use crate::models::{Activity, Contact, Role, Student};
use crate::repository::{RepoResult, Repositories};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScopedActivities {
    /// The parent's children; empty for every other role.
    pub students: Vec<Student>,
    pub activities: Vec<Activity>,
}

impl ScopedActivities {
    pub fn owns_student(&self, id: Uuid) -> bool {
        self.students.iter().any(|s| s.id == id)
    }
}

/// Parents see activities of their own students, teachers the ones they
/// assigned. Other roles see nothing.
pub async fn activities_for(
    session: &SessionContext,
    repos: &Repositories,
) -> RepoResult<ScopedActivities> {
    match session.role {
        Role::Parent => {
            let students = repos.students.find_by_parent(&session.user_id).await?;
            let ids: Vec<Uuid> = students.iter().map(|s| s.id).collect();
            let activities = repos.activities.find_by_student_ids(&ids).await?;
            debug!(
                user_id = %session.user_id,
                students = students.len(),
                activities = activities.len(),
                "Loaded parent activities"
            );
            Ok(ScopedActivities {
                students,
                activities,
            })
        }
        Role::Teacher => {
            let activities = repos.activities.find_by_teacher(&session.user_id).await?;
            Ok(ScopedActivities {
                students: Vec::new(),
                activities,
            })
        }
        Role::Tutor | Role::Admin => Ok(ScopedActivities::default()),
    }
}

/// Students a caller can pick on the progress page: a parent's own children,
/// everyone otherwise (the provider's row policies still apply).
pub async fn students_for(
    session: &SessionContext,
    repos: &Repositories,
) -> RepoResult<Vec<Student>> {
    if session.is_parent() {
        repos.students.find_by_parent(&session.user_id).await
    } else {
        repos.students.find_all().await
    }
}

/// Who a caller can start a conversation with: guides for parents, students
/// for teachers.
pub async fn contacts_for(
    session: &SessionContext,
    repos: &Repositories,
) -> RepoResult<Vec<Contact>> {
    match session.role {
        Role::Parent => Ok(repos
            .guides
            .find_by_parent(&session.user_id)
            .await?
            .iter()
            .map(Contact::from)
            .collect()),
        Role::Teacher => Ok(repos
            .students
            .find_all()
            .await?
            .iter()
            .map(Contact::from)
            .collect()),
        Role::Tutor | Role::Admin => Ok(Vec::new()),
    }
}
