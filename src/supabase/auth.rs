use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::{read_json, ProviderError, SupabaseClient};
use crate::models::{AuthUser, Role};

#[derive(Clone, Debug)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub full_name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SignUpOutcome {
    Created(Value),
    Rejected { status: u16, body: Value },
}

/// How a rejected signup is reported back to the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum SignUpRejection {
    AlreadyExists,
    Failed(String),
}

impl SignUpRejection {
    /// The provider reports duplicates under several field names, or just with a 422.
    pub fn classify(status: u16, body: &Value) -> Self {
        let field = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| {
                    body.get(*key)
                        .and_then(Value::as_str)
                        .filter(|s| !s.is_empty())
                })
                .unwrap_or("")
                .to_string()
        };

        let message = field(&["error_description", "msg", "message"]);
        let code = field(&["error_code", "error"]);

        if message.to_lowercase().contains("already registered")
            || code == "signup_disabled"
            || status == 422
        {
            return SignUpRejection::AlreadyExists;
        }

        if message.is_empty() {
            SignUpRejection::Failed("Sign up failed".to_string())
        } else {
            SignUpRejection::Failed(message)
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, ProviderError>;

    /// `None` when the provider rejected the credentials.
    async fn sign_in(&self, email: &str, password: &str)
        -> Result<Option<AuthSession>, ProviderError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError>;

    /// `None` when the token is unknown, expired or malformed.
    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

pub struct SupabaseAuth {
    client: SupabaseClient,
    jwt_secret: Option<String>,
}

impl SupabaseAuth {
    pub fn new(client: SupabaseClient, jwt_secret: Option<String>) -> Self {
        SupabaseAuth { client, jwt_secret }
    }

    fn verify_locally(&self, secret: &str, token: &str) -> Option<AuthUser> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&["authenticated"]);

        match decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation) {
            Ok(data) => Some(AuthUser {
                id: data.claims.sub,
                email: data.claims.email,
            }),
            Err(e) => {
                warn!("Invalid token: {:?}", e);
                None
            }
        }
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, ProviderError> {
        let body = json!({
            "email": request.email,
            "password": request.password,
            "data": {
                "full_name": request.full_name,
                "role": request.role,
            },
        });

        let builder = self.client.http().post(self.client.auth_url("signup")).json(&body);
        let response = self
            .client
            .authorize(builder, self.client.anon_key())
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let payload: Value = serde_json::from_slice(&bytes)?;

        if status.is_success() {
            info!("Signed up {}", request.email);
            // Depending on the project's confirmation settings the user is either
            // top-level or nested under `user`.
            let user = payload.get("user").cloned().unwrap_or(payload);
            Ok(SignUpOutcome::Created(user))
        } else {
            warn!("Signup rejected by provider ({}): {}", status, payload);
            Ok(SignUpOutcome::Rejected {
                status: status.as_u16(),
                body: payload,
            })
        }
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthSession>, ProviderError> {
        let builder = self
            .client
            .http()
            .post(self.client.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));
        let response = self
            .client
            .authorize(builder, self.client.anon_key())
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED
        ) {
            debug!("Credentials rejected for {}", email);
            return Ok(None);
        }

        read_json(response).await.map(Some)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        let builder = self.client.http().post(self.client.auth_url("logout"));
        let response = self.client.authorize(builder, access_token).send().await?;

        let status = response.status();
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        Err(ProviderError::Status {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        })
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, ProviderError> {
        if let Some(secret) = &self.jwt_secret {
            return Ok(self.verify_locally(secret, access_token));
        }

        let builder = self.client.http().get(self.client.auth_url("user"));
        let response = self.client.authorize(builder, access_token).send().await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }

        read_json(response).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "super-secret-jwt-token";

    fn local_auth() -> SupabaseAuth {
        let client = SupabaseClient::new(&ProviderConfig {
            url: "http://127.0.0.1:1".to_string(),
            anon_key: "anon".to_string(),
            jwt_secret: Some(SECRET.to_string()),
        });
        SupabaseAuth::new(client, Some(SECRET.to_string()))
    }

    fn token(secret: &str, expires_in: i64) -> String {
        let claims = json!({
            "sub": "u1",
            "email": "pat@example.com",
            "aud": "authenticated",
            "role": "authenticated",
            "exp": Utc::now().timestamp() + expires_in,
        });
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn local_verification_accepts_a_signed_token() {
        let user = local_auth().verify_locally(SECRET, &token(SECRET, 3600));
        assert_eq!(
            user,
            Some(AuthUser {
                id: "u1".to_string(),
                email: Some("pat@example.com".to_string()),
            })
        );
    }

    #[test]
    fn local_verification_rejects_expired_tokens() {
        assert_eq!(local_auth().verify_locally(SECRET, &token(SECRET, -3600)), None);
    }

    #[test]
    fn local_verification_rejects_foreign_signatures() {
        assert_eq!(local_auth().verify_locally(SECRET, &token("other", 3600)), None);
    }

    #[test]
    fn already_registered_message_means_duplicate() {
        let body = json!({ "msg": "User already registered" });
        assert_eq!(
            SignUpRejection::classify(400, &body),
            SignUpRejection::AlreadyExists
        );
    }

    #[test]
    fn empty_description_falls_through_to_msg() {
        let body = json!({ "error_description": "", "msg": "User already registered" });
        assert_eq!(
            SignUpRejection::classify(400, &body),
            SignUpRejection::AlreadyExists
        );
    }

    #[test]
    fn unprocessable_status_means_duplicate() {
        assert_eq!(
            SignUpRejection::classify(422, &json!({})),
            SignUpRejection::AlreadyExists
        );
    }

    #[test]
    fn signup_disabled_code_means_duplicate() {
        let body = json!({ "error_code": "signup_disabled", "message": "Signups not allowed" });
        assert_eq!(
            SignUpRejection::classify(400, &body),
            SignUpRejection::AlreadyExists
        );
    }

    #[test]
    fn other_failures_keep_the_provider_message() {
        let body = json!({ "error_description": "Password should be at least 6 characters" });
        assert_eq!(
            SignUpRejection::classify(400, &body),
            SignUpRejection::Failed("Password should be at least 6 characters".to_string())
        );
    }

    #[test]
    fn failures_without_message_get_a_default() {
        assert_eq!(
            SignUpRejection::classify(500, &json!({ "error": "boom" })),
            SignUpRejection::Failed("Sign up failed".to_string())
        );
    }
}
