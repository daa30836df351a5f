use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::AuthUser;

/// Body of `POST /api/auth/signup`. Every field is required; presence is
/// checked by the handler so the error matches the other forms.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
    #[schema(value_type = Object)]
    pub user: Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupConflict {
    pub error: String,
    #[serde(rename = "userExists")]
    pub user_exists: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}
