//! In-process tables with the same ordering rules as the hosted store. Used by the
//! integration tests to drive the whole service without a network.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{
    ActivityRepository, ClassRepository, GuideRepository, MessageRepository, ProfileRepository,
    RepoResult, Repositories, RepositoryFactory, StudentRepository,
};
use crate::models::{
    Activity, ActivityStatus, Guide, Message, NewActivity, NewGuide, NewMessage, NewStudent,
    Profile, Student, StudentProgress, TeacherClass,
};

#[derive(Default)]
struct Tables {
    profiles: Vec<Profile>,
    students: Vec<Student>,
    guides: Vec<Guide>,
    activities: Vec<Activity>,
    messages: Vec<Message>,
    classes: Vec<TeacherClass>,
    progress: Vec<StudentProgress>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_profile(&self, profile: Profile) {
        self.write().profiles.push(profile);
    }

    pub fn add_student(&self, student: Student) {
        self.write().students.push(student);
    }

    pub fn add_guide(&self, guide: Guide) {
        self.write().guides.push(guide);
    }

    pub fn add_activity(&self, activity: Activity) {
        self.write().activities.push(activity);
    }

    pub fn add_message(&self, message: Message) {
        self.write().messages.push(message);
    }

    pub fn add_class(&self, class: TeacherClass) {
        self.write().classes.push(class);
    }

    pub fn add_progress(&self, progress: StudentProgress) {
        self.write().progress.push(progress);
    }

    pub fn activities(&self) -> Vec<Activity> {
        self.read().activities.clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.read().messages.clone()
    }

    pub fn students(&self) -> Vec<Student> {
        self.read().students.clone()
    }

    pub fn guides(&self) -> Vec<Guide> {
        self.read().guides.clone()
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_id(&self, user_id: &str) -> RepoResult<Option<Profile>> {
        Ok(self.read().profiles.iter().find(|p| p.id == user_id).cloned())
    }
}

#[async_trait]
impl StudentRepository for MemoryStore {
    async fn find_by_parent(&self, parent_id: &str) -> RepoResult<Vec<Student>> {
        let mut rows: Vec<Student> = self
            .read()
            .students
            .iter()
            .filter(|s| s.parent_id == parent_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(rows)
    }

    async fn find_all(&self) -> RepoResult<Vec<Student>> {
        let mut rows = self.read().students.clone();
        rows.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Student>> {
        Ok(self.read().students.iter().find(|s| s.id == id).cloned())
    }

    async fn insert(&self, student: NewStudent) -> RepoResult<Student> {
        let row = Student {
            id: Uuid::new_v4(),
            full_name: student.full_name,
            date_of_birth: student.date_of_birth,
            grade_level: student.grade_level,
            parent_id: student.parent_id,
            created_at: Some(Utc::now()),
        };
        self.write().students.push(row.clone());
        Ok(row)
    }

    async fn delete(&self, id: Uuid, parent_id: &str) -> RepoResult<bool> {
        let mut tables = self.write();
        let before = tables.students.len();
        tables
            .students
            .retain(|s| !(s.id == id && s.parent_id == parent_id));
        Ok(tables.students.len() < before)
    }
}

#[async_trait]
impl GuideRepository for MemoryStore {
    async fn find_by_parent(&self, parent_id: &str) -> RepoResult<Vec<Guide>> {
        let mut rows: Vec<Guide> = self
            .read()
            .guides
            .iter()
            .filter(|g| g.parent_id == parent_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(rows)
    }

    async fn insert(&self, guide: NewGuide) -> RepoResult<Guide> {
        let row = Guide {
            id: Uuid::new_v4(),
            full_name: guide.full_name,
            email: guide.email,
            specialization: guide.specialization,
            hourly_rate: guide.hourly_rate,
            status: guide.status,
            parent_id: guide.parent_id,
            created_at: Some(Utc::now()),
        };
        self.write().guides.push(row.clone());
        Ok(row)
    }

    async fn delete(&self, id: Uuid, parent_id: &str) -> RepoResult<bool> {
        let mut tables = self.write();
        let before = tables.guides.len();
        tables
            .guides
            .retain(|g| !(g.id == id && g.parent_id == parent_id));
        Ok(tables.guides.len() < before)
    }
}

#[async_trait]
impl ActivityRepository for MemoryStore {
    async fn find_by_student_ids(&self, student_ids: &[Uuid]) -> RepoResult<Vec<Activity>> {
        let mut rows: Vec<Activity> = self
            .read()
            .activities
            .iter()
            .filter(|a| a.student_id.map_or(false, |id| student_ids.contains(&id)))
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.due_date);
        Ok(rows)
    }

    async fn find_by_student(&self, student_id: Uuid) -> RepoResult<Vec<Activity>> {
        let mut rows: Vec<Activity> = self
            .read()
            .activities
            .iter()
            .filter(|a| a.student_id == Some(student_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.due_date.cmp(&a.due_date));
        Ok(rows)
    }

    async fn find_by_teacher(&self, teacher_id: &str) -> RepoResult<Vec<Activity>> {
        let mut rows: Vec<Activity> = self
            .read()
            .activities
            .iter()
            .filter(|a| a.teacher_id.as_deref() == Some(teacher_id))
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.due_date);
        Ok(rows)
    }

    async fn insert(&self, activity: NewActivity) -> RepoResult<Activity> {
        let row = Activity {
            id: Uuid::new_v4(),
            title: activity.title,
            description: activity.description,
            status: activity.status,
            due_date: activity.due_date,
            student_id: activity.student_id,
            class_id: activity.class_id,
            teacher_id: activity.teacher_id,
            score: None,
            completed_at: None,
            created_at: Some(Utc::now()),
        };
        self.write().activities.push(row.clone());
        Ok(row)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ActivityStatus,
    ) -> RepoResult<Option<Activity>> {
        let mut tables = self.write();
        Ok(tables.activities.iter_mut().find(|a| a.id == id).map(|a| {
            a.status = status;
            a.clone()
        }))
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn find_for_user(&self, user_id: &str) -> RepoResult<Vec<Message>> {
        let mut rows: Vec<Message> = self
            .read()
            .messages
            .iter()
            .filter(|m| m.sender_id == user_id || m.recipient_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn find_thread(&self, me: &str, other: &str) -> RepoResult<Vec<Message>> {
        let mut rows: Vec<Message> = self
            .read()
            .messages
            .iter()
            .filter(|m| {
                (m.sender_id == me && m.recipient_id == other)
                    || (m.sender_id == other && m.recipient_id == me)
            })
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.created_at);
        Ok(rows)
    }

    async fn insert(&self, message: NewMessage) -> RepoResult<Message> {
        let row = Message {
            id: Uuid::new_v4(),
            sender_id: message.sender_id,
            recipient_id: message.recipient_id,
            content: message.content,
            created_at: Utc::now(),
            read: message.read,
            sender_name: message.sender_name,
            recipient_name: message.recipient_name,
        };
        self.write().messages.push(row.clone());
        Ok(row)
    }

    async fn mark_read(&self, recipient: &str, sender: &str) -> RepoResult<usize> {
        let mut tables = self.write();
        let mut marked = 0;
        for message in tables
            .messages
            .iter_mut()
            .filter(|m| m.recipient_id == recipient && m.sender_id == sender && !m.read)
        {
            message.read = true;
            marked += 1;
        }
        Ok(marked)
    }
}

#[async_trait]
impl ClassRepository for MemoryStore {
    async fn find_by_teacher(&self, teacher_id: &str) -> RepoResult<Vec<TeacherClass>> {
        Ok(self
            .read()
            .classes
            .iter()
            .filter(|c| c.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    async fn progress_for_classes(&self, class_ids: &[Uuid]) -> RepoResult<Vec<StudentProgress>> {
        Ok(self
            .read()
            .progress
            .iter()
            .filter(|p| class_ids.contains(&p.class_id))
            .cloned()
            .collect())
    }
}

impl RepositoryFactory for MemoryStore {
    fn for_token(&self, _access_token: &str) -> Repositories {
        Repositories::from_backend(Arc::new(self.clone()))
    }
}
