//! Typed access to the provider's tables, one trait per entity.

pub mod memory;
pub mod supabase;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    Activity, ActivityStatus, Guide, Message, NewActivity, NewGuide, NewMessage, NewStudent,
    Profile, Student, StudentProgress, TeacherClass,
};
use crate::supabase::ProviderError;

pub type RepoResult<T> = Result<T, ProviderError>;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, user_id: &str) -> RepoResult<Option<Profile>>;
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Ordered by name.
    async fn find_by_parent(&self, parent_id: &str) -> RepoResult<Vec<Student>>;
    async fn find_all(&self) -> RepoResult<Vec<Student>>;
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Student>>;
    async fn insert(&self, student: NewStudent) -> RepoResult<Student>;
    /// Deletes only when the row belongs to `parent_id`; returns whether a row went away.
    async fn delete(&self, id: Uuid, parent_id: &str) -> RepoResult<bool>;
}

#[async_trait]
pub trait GuideRepository: Send + Sync {
    /// Ordered by name.
    async fn find_by_parent(&self, parent_id: &str) -> RepoResult<Vec<Guide>>;
    async fn insert(&self, guide: NewGuide) -> RepoResult<Guide>;
    async fn delete(&self, id: Uuid, parent_id: &str) -> RepoResult<bool>;
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Ascending by due date. An empty id set yields no rows without a round trip.
    async fn find_by_student_ids(&self, student_ids: &[Uuid]) -> RepoResult<Vec<Activity>>;
    /// Descending by due date.
    async fn find_by_student(&self, student_id: Uuid) -> RepoResult<Vec<Activity>>;
    /// Ascending by due date.
    async fn find_by_teacher(&self, teacher_id: &str) -> RepoResult<Vec<Activity>>;
    async fn insert(&self, activity: NewActivity) -> RepoResult<Activity>;
    /// Last writer wins. `None` when no row has that id.
    async fn update_status(&self, id: Uuid, status: ActivityStatus)
        -> RepoResult<Option<Activity>>;
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Every message sent or received by the user, newest first.
    async fn find_for_user(&self, user_id: &str) -> RepoResult<Vec<Message>>;
    /// Both directions between the two users, oldest first.
    async fn find_thread(&self, me: &str, other: &str) -> RepoResult<Vec<Message>>;
    async fn insert(&self, message: NewMessage) -> RepoResult<Message>;
    /// Marks everything `sender` sent to `recipient` as read.
    async fn mark_read(&self, recipient: &str, sender: &str) -> RepoResult<usize>;
}

#[async_trait]
pub trait ClassRepository: Send + Sync {
    async fn find_by_teacher(&self, teacher_id: &str) -> RepoResult<Vec<TeacherClass>>;
    async fn progress_for_classes(&self, class_ids: &[Uuid]) -> RepoResult<Vec<StudentProgress>>;
}

/// The repositories bound to one caller's credentials.
#[derive(Clone)]
pub struct Repositories {
    pub profiles: Arc<dyn ProfileRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub guides: Arc<dyn GuideRepository>,
    pub activities: Arc<dyn ActivityRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub classes: Arc<dyn ClassRepository>,
}

impl Repositories {
    /// Uses one backend for every entity.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: ProfileRepository
            + StudentRepository
            + GuideRepository
            + ActivityRepository
            + MessageRepository
            + ClassRepository
            + 'static,
    {
        Repositories {
            profiles: backend.clone(),
            students: backend.clone(),
            guides: backend.clone(),
            activities: backend.clone(),
            messages: backend.clone(),
            classes: backend,
        }
    }
}

pub trait RepositoryFactory: Send + Sync {
    fn for_token(&self, access_token: &str) -> Repositories;
}
