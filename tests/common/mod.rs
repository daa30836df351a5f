#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;

use kidguides::models::{
    Activity, ActivityStatus, AuthUser, Guide, GuideStatus, Message, Profile, Role, Student,
    StudentProgress, TeacherClass,
};
use kidguides::repository::memory::MemoryStore;
use kidguides::supabase::{AuthProvider, AuthSession, ProviderError, SignUpOutcome, SignUpRequest};
use kidguides::{AppConfig, AppState, Provider};

/// Builds the service with the whole route table around `$state`.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(kidguides::app_data($state))
                .configure(kidguides::configure),
        )
        .await
    };
}
pub(crate) use init_app;

/// Scripted identity provider: tokens map to users, signup answers with
/// whatever outcome the test queued.
#[derive(Default)]
pub struct FakeAuth {
    tokens: Mutex<HashMap<String, AuthUser>>,
    passwords: Mutex<HashMap<(String, String), String>>,
    signup_outcome: Mutex<Option<SignUpOutcome>>,
    pub signups: Mutex<Vec<SignUpRequest>>,
    signup_calls: AtomicUsize,
    get_user_calls: AtomicUsize,
}

impl FakeAuth {
    pub fn add_token(&self, token: &str, user_id: &str, email: &str) {
        self.tokens.lock().unwrap().insert(
            token.to_string(),
            AuthUser {
                id: user_id.to_string(),
                email: Some(email.to_string()),
            },
        );
    }

    pub fn add_password(&self, email: &str, password: &str, token: &str) {
        self.passwords
            .lock()
            .unwrap()
            .insert((email.to_string(), password.to_string()), token.to_string());
    }

    pub fn respond_to_signup(&self, outcome: SignUpOutcome) {
        *self.signup_outcome.lock().unwrap() = Some(outcome);
    }

    pub fn signup_calls(&self) -> usize {
        self.signup_calls.load(Ordering::SeqCst)
    }

    pub fn get_user_calls(&self) -> usize {
        self.get_user_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthProvider for FakeAuth {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, ProviderError> {
        self.signup_calls.fetch_add(1, Ordering::SeqCst);
        self.signups.lock().unwrap().push(request.clone());
        Ok(self
            .signup_outcome
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| SignUpOutcome::Created(json!({ "email": request.email }))))
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthSession>, ProviderError> {
        let token = self
            .passwords
            .lock()
            .unwrap()
            .get(&(email.to_string(), password.to_string()))
            .cloned();
        let Some(token) = token else {
            return Ok(None);
        };
        let user = self.tokens.lock().unwrap().get(&token).cloned();
        Ok(user.map(|user| AuthSession {
            access_token: token,
            refresh_token: Some("refresh".to_string()),
            user,
        }))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        self.tokens.lock().unwrap().remove(access_token);
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, ProviderError> {
        self.get_user_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tokens.lock().unwrap().get(access_token).cloned())
    }
}

pub struct Harness {
    pub store: MemoryStore,
    pub auth: Arc<FakeAuth>,
}

impl Harness {
    pub fn new() -> Self {
        Harness {
            store: MemoryStore::new(),
            auth: Arc::new(FakeAuth::default()),
        }
    }

    /// Registers a user with a profile row and returns `(user_id, token)`.
    pub fn user(&self, role: Role, name: &str) -> (String, String) {
        let user_id = Uuid::new_v4().to_string();
        let token = format!("token-{}", user_id);
        let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));

        self.store.add_profile(Profile {
            id: user_id.clone(),
            email: email.clone(),
            full_name: Some(name.to_string()),
            role,
            created_at: None,
        });
        self.auth.add_token(&token, &user_id, &email);
        (user_id, token)
    }

    pub fn state(&self) -> AppState {
        AppState::new(
            config(),
            Some(Provider {
                auth: self.auth.clone(),
                repositories: Arc::new(self.store.clone()),
            }),
        )
    }
}

pub fn config() -> AppConfig {
    AppConfig::from_lookup(|_| None).expect("default config")
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn student(parent_id: &str, name: &str) -> Student {
    Student {
        id: Uuid::new_v4(),
        full_name: name.to_string(),
        date_of_birth: date("2018-04-12"),
        grade_level: "1st Grade".to_string(),
        parent_id: parent_id.to_string(),
        created_at: None,
    }
}

pub fn activity(student_id: Uuid, title: &str, status: ActivityStatus, due: &str) -> Activity {
    Activity {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        status,
        due_date: date(due),
        student_id: Some(student_id),
        class_id: None,
        teacher_id: None,
        score: None,
        completed_at: None,
        created_at: None,
    }
}

pub fn guide(parent_id: &str, name: &str) -> Guide {
    Guide {
        id: Uuid::new_v4(),
        full_name: name.to_string(),
        email: format!("{}@guides.example.com", name.to_lowercase().replace(' ', ".")),
        specialization: "Reading".to_string(),
        hourly_rate: Some(25.0),
        status: GuideStatus::Active,
        parent_id: parent_id.to_string(),
        created_at: None,
    }
}

pub fn message(from: &str, to: &str, content: &str, read: bool, minutes: i64) -> Message {
    Message {
        id: Uuid::new_v4(),
        sender_id: from.to_string(),
        recipient_id: to.to_string(),
        content: content.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes),
        read,
        sender_name: None,
        recipient_name: None,
    }
}

pub fn class(teacher_id: &str, name: &str, student_count: u32) -> TeacherClass {
    TeacherClass {
        id: Uuid::new_v4(),
        name: name.to_string(),
        grade_level: Some("2nd Grade".to_string()),
        student_count,
        teacher_id: teacher_id.to_string(),
    }
}

pub fn progress(class_id: Uuid, name: &str, completed: u32, total: u32) -> StudentProgress {
    StudentProgress {
        id: Uuid::new_v4().to_string(),
        class_id,
        full_name: name.to_string(),
        completed_activities: completed,
        total_activities: total,
        average_score: 0.0,
    }
}
