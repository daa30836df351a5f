use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use super::{
    ActivityRepository, ClassRepository, GuideRepository, MessageRepository, ProfileRepository,
    RepoResult, Repositories, RepositoryFactory, StudentRepository,
};
use crate::models::{
    Activity, ActivityStatus, Guide, Message, NewActivity, NewGuide, NewMessage, NewStudent,
    Profile, Student, StudentProgress, TeacherClass,
};
use crate::supabase::{Query, SupabaseClient};

const USERS: &str = "users";
const STUDENTS: &str = "students";
const GUIDES: &str = "guides";
const ACTIVITIES: &str = "activities";
const MESSAGES: &str = "messages";
const CLASSES: &str = "classes";
const STUDENT_PROGRESS: &str = "student_progress";

/// PostgREST-backed repositories acting with one user's access token.
pub struct SupabaseRepository {
    client: SupabaseClient,
    access_token: String,
}

impl SupabaseRepository {
    pub fn new(client: SupabaseClient, access_token: &str) -> Self {
        SupabaseRepository {
            client,
            access_token: access_token.to_string(),
        }
    }
}

#[async_trait]
impl ProfileRepository for SupabaseRepository {
    async fn find_by_id(&self, user_id: &str) -> RepoResult<Option<Profile>> {
        let query = Query::table(USERS)
            .select("id,email,full_name,role,created_at")
            .eq("id", user_id)
            .limit(1);
        self.client.select_single(&self.access_token, &query).await
    }
}

#[async_trait]
impl StudentRepository for SupabaseRepository {
    async fn find_by_parent(&self, parent_id: &str) -> RepoResult<Vec<Student>> {
        let query = Query::table(STUDENTS)
            .eq("parent_id", parent_id)
            .order("full_name", true);
        self.client.select(&self.access_token, &query).await
    }

    async fn find_all(&self) -> RepoResult<Vec<Student>> {
        let query = Query::table(STUDENTS).order("full_name", true);
        self.client.select(&self.access_token, &query).await
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Student>> {
        let query = Query::table(STUDENTS).eq("id", id);
        self.client.select_single(&self.access_token, &query).await
    }

    async fn insert(&self, student: NewStudent) -> RepoResult<Student> {
        self.client
            .insert(&self.access_token, STUDENTS, &student)
            .await
    }

    async fn delete(&self, id: Uuid, parent_id: &str) -> RepoResult<bool> {
        let query = Query::table(STUDENTS)
            .eq("id", id)
            .eq("parent_id", parent_id);
        Ok(self.client.delete(&self.access_token, &query).await? > 0)
    }
}

#[async_trait]
impl GuideRepository for SupabaseRepository {
    async fn find_by_parent(&self, parent_id: &str) -> RepoResult<Vec<Guide>> {
        let query = Query::table(GUIDES)
            .eq("parent_id", parent_id)
            .order("full_name", true);
        self.client.select(&self.access_token, &query).await
    }

    async fn insert(&self, guide: NewGuide) -> RepoResult<Guide> {
        self.client.insert(&self.access_token, GUIDES, &guide).await
    }

    async fn delete(&self, id: Uuid, parent_id: &str) -> RepoResult<bool> {
        let query = Query::table(GUIDES)
            .eq("id", id)
            .eq("parent_id", parent_id);
        Ok(self.client.delete(&self.access_token, &query).await? > 0)
    }
}

#[async_trait]
impl ActivityRepository for SupabaseRepository {
    async fn find_by_student_ids(&self, student_ids: &[Uuid]) -> RepoResult<Vec<Activity>> {
        if student_ids.is_empty() {
            debug!("No students, skipping activity query");
            return Ok(Vec::new());
        }
        let query = Query::table(ACTIVITIES)
            .is_in("student_id", student_ids)
            .order("due_date", true);
        self.client.select(&self.access_token, &query).await
    }

    async fn find_by_student(&self, student_id: Uuid) -> RepoResult<Vec<Activity>> {
        let query = Query::table(ACTIVITIES)
            .eq("student_id", student_id)
            .order("due_date", false);
        self.client.select(&self.access_token, &query).await
    }

    async fn find_by_teacher(&self, teacher_id: &str) -> RepoResult<Vec<Activity>> {
        let query = Query::table(ACTIVITIES)
            .eq("teacher_id", teacher_id)
            .order("due_date", true);
        self.client.select(&self.access_token, &query).await
    }

    async fn insert(&self, activity: NewActivity) -> RepoResult<Activity> {
        self.client
            .insert(&self.access_token, ACTIVITIES, &activity)
            .await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ActivityStatus,
    ) -> RepoResult<Option<Activity>> {
        let query = Query::table(ACTIVITIES).eq("id", id);
        let rows: Vec<Activity> = self
            .client
            .update(&self.access_token, &query, &json!({ "status": status }))
            .await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl MessageRepository for SupabaseRepository {
    async fn find_for_user(&self, user_id: &str) -> RepoResult<Vec<Message>> {
        let query = Query::table(MESSAGES)
            .or(vec![
                vec![("sender_id", user_id.to_string())],
                vec![("recipient_id", user_id.to_string())],
            ])
            .order("created_at", false);
        self.client.select(&self.access_token, &query).await
    }

    async fn find_thread(&self, me: &str, other: &str) -> RepoResult<Vec<Message>> {
        let query = Query::table(MESSAGES)
            .or(vec![
                vec![("sender_id", me.to_string()), ("recipient_id", other.to_string())],
                vec![("sender_id", other.to_string()), ("recipient_id", me.to_string())],
            ])
            .order("created_at", true);
        self.client.select(&self.access_token, &query).await
    }

    async fn insert(&self, message: NewMessage) -> RepoResult<Message> {
        self.client
            .insert(&self.access_token, MESSAGES, &message)
            .await
    }

    async fn mark_read(&self, recipient: &str, sender: &str) -> RepoResult<usize> {
        let query = Query::table(MESSAGES)
            .eq("recipient_id", recipient)
            .eq("sender_id", sender)
            .eq("read", false);
        let rows: Vec<Message> = self
            .client
            .update(&self.access_token, &query, &json!({ "read": true }))
            .await?;
        Ok(rows.len())
    }
}

#[async_trait]
impl ClassRepository for SupabaseRepository {
    async fn find_by_teacher(&self, teacher_id: &str) -> RepoResult<Vec<TeacherClass>> {
        let query = Query::table(CLASSES).eq("teacher_id", teacher_id);
        self.client.select(&self.access_token, &query).await
    }

    async fn progress_for_classes(&self, class_ids: &[Uuid]) -> RepoResult<Vec<StudentProgress>> {
        if class_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = Query::table(STUDENT_PROGRESS).is_in("class_id", class_ids);
        self.client.select(&self.access_token, &query).await
    }
}

pub struct SupabaseRepositoryFactory {
    client: SupabaseClient,
}

impl SupabaseRepositoryFactory {
    pub fn new(client: SupabaseClient) -> Self {
        SupabaseRepositoryFactory { client }
    }
}

impl RepositoryFactory for SupabaseRepositoryFactory {
    fn for_token(&self, access_token: &str) -> Repositories {
        Repositories::from_backend(Arc::new(SupabaseRepository::new(
            self.client.clone(),
            access_token,
        )))
    }
}
