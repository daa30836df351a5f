use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Mutex;

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use chrono::{NaiveDate, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use uuid::Uuid;

use kidguides::config::ProviderConfig;
use kidguides::models::{ActivityStatus, AuthUser, NewActivity, Role};
use kidguides::repository::supabase::SupabaseRepository;
use kidguides::repository::{ActivityRepository, ProfileRepository, StudentRepository};
use kidguides::supabase::{
    AuthProvider, ProviderError, SignUpOutcome, SignUpRequest, SupabaseAuth, SupabaseClient,
};

const ANON_KEY: &str = "anon-key";
const USER_TOKEN: &str = "user-token";

#[derive(Clone, Debug)]
struct Recorded {
    method: String,
    path: String,
    query: String,
    headers: HashMap<String, String>,
    body: Value,
}

/// Canned answers keyed by method and path, plus every request received.
#[derive(Default)]
struct Script {
    responses: Mutex<HashMap<(String, String), (u16, Value)>>,
    requests: Mutex<Vec<Recorded>>,
}

async fn respond(req: HttpRequest, body: web::Bytes, script: web::Data<Script>) -> HttpResponse {
    let headers = req
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    script.requests.lock().unwrap().push(Recorded {
        method: req.method().to_string(),
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        headers,
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let key = (req.method().to_string(), req.path().to_string());
    let (status, payload) = script
        .responses
        .lock()
        .unwrap()
        .get(&key)
        .cloned()
        .unwrap_or((404, json!({ "message": "no such route" })));

    let mut response = HttpResponse::build(StatusCode::from_u16(status).unwrap());
    if payload.is_null() {
        response.finish()
    } else {
        response.json(payload)
    }
}

/// A local stand-in for the hosted REST and auth endpoints.
struct FakeSupabase {
    script: web::Data<Script>,
    url: String,
}

impl FakeSupabase {
    fn start() -> Self {
        let script = web::Data::new(Script::default());
        let data = script.clone();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(respond))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .unwrap()
        .run();
        actix_web::rt::spawn(server);

        FakeSupabase {
            script,
            url: format!("http://127.0.0.1:{}", port),
        }
    }

    fn on(&self, method: &str, path: &str, status: u16, body: Value) {
        self.script
            .responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body));
    }

    fn requests(&self) -> Vec<Recorded> {
        self.script.requests.lock().unwrap().clone()
    }

    fn last_request(&self) -> Recorded {
        self.requests().pop().expect("a request reached the fake provider")
    }

    fn config(&self, jwt_secret: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            url: self.url.clone(),
            anon_key: ANON_KEY.to_string(),
            jwt_secret: jwt_secret.map(str::to_string),
        }
    }

    fn client(&self) -> SupabaseClient {
        SupabaseClient::new(&self.config(None))
    }

    fn auth(&self, jwt_secret: Option<&str>) -> SupabaseAuth {
        let config = self.config(jwt_secret);
        SupabaseAuth::new(SupabaseClient::new(&config), config.jwt_secret.clone())
    }

    fn repository(&self) -> SupabaseRepository {
        SupabaseRepository::new(self.client(), USER_TOKEN)
    }
}

fn activity_row(id: Uuid, status: &str) -> Value {
    json!({
        "id": id,
        "title": "Nature walk journal",
        "description": null,
        "status": status,
        "due_date": "2024-05-01",
        "student_id": Uuid::new_v4(),
    })
}

fn signup_request() -> SignUpRequest {
    SignUpRequest {
        email: "pat@example.com".to_string(),
        password: "hunter22".to_string(),
        role: Role::Parent,
        full_name: "Pat Doe".to_string(),
    }
}

#[actix_web::test]
async fn single_row_lookup_treats_406_as_missing() {
    let fake = FakeSupabase::start();
    fake.on("GET", "/rest/v1/users", 406, json!({ "code": "PGRST116" }));

    let profile = ProfileRepository::find_by_id(&fake.repository(), "u1").await.unwrap();
    assert!(profile.is_none());

    let request = fake.last_request();
    assert_eq!(request.headers["accept"], "application/vnd.pgrst.object+json");
    assert_eq!(request.headers["apikey"], ANON_KEY);
    assert_eq!(request.headers["authorization"], format!("Bearer {}", USER_TOKEN));
    assert!(request.query.contains("id=eq.u1"), "{}", request.query);
}

#[actix_web::test]
async fn single_row_lookup_decodes_the_object() {
    let fake = FakeSupabase::start();
    fake.on(
        "GET",
        "/rest/v1/users",
        200,
        json!({
            "id": "u1",
            "email": "pat@example.com",
            "full_name": "Pat Doe",
            "role": "teacher",
            "created_at": null,
        }),
    );

    let profile = ProfileRepository::find_by_id(&fake.repository(), "u1").await.unwrap().unwrap();
    assert_eq!(profile.role, Role::Teacher);
    assert_eq!(profile.full_name.as_deref(), Some("Pat Doe"));
}

#[actix_web::test]
async fn failed_selects_surface_the_status() {
    let fake = FakeSupabase::start();
    fake.on("GET", "/rest/v1/students", 500, json!({ "message": "boom" }));

    let err = fake.repository().find_all().await.unwrap_err();
    assert!(
        matches!(err, ProviderError::Status { status: 500, .. }),
        "{:?}",
        err
    );
}

#[actix_web::test]
async fn inserts_ask_for_the_stored_row() {
    let fake = FakeSupabase::start();
    let id = Uuid::new_v4();
    fake.on("POST", "/rest/v1/activities", 201, json!([activity_row(id, "pending")]));

    let stored = ActivityRepository::insert(
        &fake.repository(),
        NewActivity {
            title: "Nature walk journal".to_string(),
            description: None,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            student_id: Some(Uuid::new_v4()),
            class_id: None,
            teacher_id: None,
            status: ActivityStatus::Pending,
        },
    )
    .await
    .unwrap();
    assert_eq!(stored.id, id);

    let request = fake.last_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.headers["prefer"], "return=representation");
    assert_eq!(request.body["status"], "pending");
    assert_eq!(request.body["due_date"], "2024-05-01");
    assert!(request.body.get("class_id").is_none());
}

#[actix_web::test]
async fn status_updates_patch_and_return_the_row() {
    let fake = FakeSupabase::start();
    let id = Uuid::new_v4();
    fake.on("PATCH", "/rest/v1/activities", 200, json!([activity_row(id, "completed")]));

    let updated = fake
        .repository()
        .update_status(id, ActivityStatus::Completed)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, ActivityStatus::Completed);

    let request = fake.last_request();
    assert_eq!(request.headers["prefer"], "return=representation");
    assert_eq!(request.body, json!({ "status": "completed" }));
    assert!(request.query.contains(&format!("id=eq.{}", id)), "{}", request.query);

    fake.on("PATCH", "/rest/v1/activities", 200, json!([]));
    let missing = fake
        .repository()
        .update_status(id, ActivityStatus::Pending)
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[actix_web::test]
async fn sign_in_rejections_mean_no_session() {
    let fake = FakeSupabase::start();
    let auth = fake.auth(None);

    for status in [400, 401] {
        fake.on("POST", "/auth/v1/token", status, json!({ "error": "invalid_grant" }));
        assert!(auth.sign_in("pat@example.com", "wrong").await.unwrap().is_none());
    }

    let request = fake.last_request();
    assert_eq!(request.query, "grant_type=password");
    assert_eq!(request.body["email"], "pat@example.com");
    assert_eq!(request.headers["authorization"], format!("Bearer {}", ANON_KEY));
}

#[actix_web::test]
async fn sign_in_returns_the_session() {
    let fake = FakeSupabase::start();
    fake.on(
        "POST",
        "/auth/v1/token",
        200,
        json!({
            "access_token": "fresh-token",
            "refresh_token": "refresh",
            "user": { "id": "u1", "email": "pat@example.com" },
        }),
    );

    let session = fake
        .auth(None)
        .sign_in("pat@example.com", "hunter22")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.access_token, "fresh-token");
    assert_eq!(session.user.id, "u1");
}

#[actix_web::test]
async fn unknown_tokens_resolve_to_no_user() {
    let fake = FakeSupabase::start();
    let auth = fake.auth(None);

    for status in [401, 403] {
        fake.on("GET", "/auth/v1/user", status, json!({ "msg": "invalid JWT" }));
        assert!(auth.get_user("stale").await.unwrap().is_none());
    }

    fake.on("GET", "/auth/v1/user", 200, json!({ "id": "u1", "email": "pat@example.com" }));
    let user = auth.get_user(USER_TOKEN).await.unwrap();
    assert_eq!(
        user,
        Some(AuthUser {
            id: "u1".to_string(),
            email: Some("pat@example.com".to_string()),
        })
    );
    assert_eq!(
        fake.last_request().headers["authorization"],
        format!("Bearer {}", USER_TOKEN)
    );
}

#[actix_web::test]
async fn sign_up_accepts_nested_and_top_level_users() {
    let fake = FakeSupabase::start();
    let auth = fake.auth(None);

    fake.on(
        "POST",
        "/auth/v1/signup",
        200,
        json!({ "user": { "id": "u1", "email": "pat@example.com" }, "session": null }),
    );
    let nested = auth.sign_up(&signup_request()).await.unwrap();
    assert_eq!(
        nested,
        SignUpOutcome::Created(json!({ "id": "u1", "email": "pat@example.com" }))
    );

    let body = fake.last_request().body;
    assert_eq!(body["data"], json!({ "full_name": "Pat Doe", "role": "parent" }));

    fake.on(
        "POST",
        "/auth/v1/signup",
        200,
        json!({ "id": "u2", "email": "pat@example.com" }),
    );
    let top_level = auth.sign_up(&signup_request()).await.unwrap();
    assert_eq!(
        top_level,
        SignUpOutcome::Created(json!({ "id": "u2", "email": "pat@example.com" }))
    );
}

#[actix_web::test]
async fn sign_up_rejections_keep_status_and_body() {
    let fake = FakeSupabase::start();
    fake.on("POST", "/auth/v1/signup", 422, json!({ "msg": "User already registered" }));

    let outcome = fake.auth(None).sign_up(&signup_request()).await.unwrap();
    assert_eq!(
        outcome,
        SignUpOutcome::Rejected {
            status: 422,
            body: json!({ "msg": "User already registered" }),
        }
    );
}

#[actix_web::test]
async fn sign_out_tolerates_already_invalid_tokens() {
    let fake = FakeSupabase::start();
    let auth = fake.auth(None);

    fake.on("POST", "/auth/v1/logout", 204, Value::Null);
    auth.sign_out(USER_TOKEN).await.unwrap();

    fake.on("POST", "/auth/v1/logout", 401, json!({ "msg": "invalid JWT" }));
    auth.sign_out(USER_TOKEN).await.unwrap();

    fake.on("POST", "/auth/v1/logout", 500, json!({ "msg": "down" }));
    assert!(auth.sign_out(USER_TOKEN).await.is_err());
}

#[actix_web::test]
async fn jwt_secret_verifies_tokens_without_a_round_trip() {
    let fake = FakeSupabase::start();
    let secret = "project-jwt-secret";
    let auth = fake.auth(Some(secret));
    let sign = |exp: i64| {
        encode(
            &Header::default(),
            &json!({ "sub": "u1", "email": "pat@example.com", "aud": "authenticated", "exp": exp }),
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    };

    let user = auth
        .get_user(&sign(Utc::now().timestamp() + 600))
        .await
        .unwrap();
    assert_eq!(user.map(|u| u.id).as_deref(), Some("u1"));

    let expired = auth
        .get_user(&sign(Utc::now().timestamp() - 600))
        .await
        .unwrap();
    assert!(expired.is_none());

    assert!(fake.requests().is_empty());
}
