use std::sync::Arc;
use std::time::Duration;

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, errors::ErrorKind, DecodingKey, Validation};
use moka::future::Cache;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{AppError, ProviderResultExt};
use crate::models::Role;
use crate::repository::Repositories;
use crate::AppState;

pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";

/// Who is calling, resolved from the access token for the current request only.
/// Controllers take it by reference; nothing outlives the request except the
/// short-lived cache entry that sign-out removes.
#[derive(Clone, Debug, Serialize)]
pub struct SessionContext {
    pub user_id: String,
    pub email: Option<String>,
    pub role: Role,
    pub full_name: Option<String>,
    #[serde(skip)]
    pub access_token: String,
}

impl SessionContext {
    pub fn is_parent(&self) -> bool {
        self.role == Role::Parent
    }

    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }
}

pub type SessionCache = Cache<String, SessionContext>;

pub fn session_cache(ttl: Duration) -> SessionCache {
    Cache::builder()
        .max_capacity(10_000)
        .time_to_live(ttl)
        .build()
}

/// Bearer header first, then the provider's cookie.
pub fn access_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .or_else(|| {
            req.cookie(ACCESS_TOKEN_COOKIE)
                .map(|cookie| cookie.value().to_string())
                .filter(|token| !token.is_empty())
        })
}

/// True when the token is a JWT whose `exp` has passed. Tokens that are not
/// JWTs, or carry no `exp`, are left to the provider.
pub fn token_expired(token: &str) -> bool {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_aud = false;
    validation.leeway = 0;

    match decode::<serde_json::Value>(token, &DecodingKey::from_secret(&[]), &validation) {
        Err(e) => matches!(e.kind(), ErrorKind::ExpiredSignature),
        Ok(_) => false,
    }
}

/// Token → provider identity → `users` row. Any gap means "not signed in".
/// Cached sessions never outlive the token's own expiry.
pub async fn resolve_session(state: &AppState, token: &str) -> Result<SessionContext, AppError> {
    if token_expired(token) {
        info!("Access token has expired");
        state.sessions.invalidate(token).await;
        return Err(AppError::Unauthenticated);
    }

    if let Some(session) = state.sessions.get(token).await {
        debug!("Session cache hit for {}", session.user_id);
        return Ok(session);
    }

    let provider = state.provider.as_ref().ok_or(AppError::Configuration)?;

    let user = provider
        .auth
        .get_user(token)
        .await
        .or_fail("Failed to load session")?
        .ok_or(AppError::Unauthenticated)?;

    let profile = provider
        .repositories
        .for_token(token)
        .profiles
        .find_by_id(&user.id)
        .await
        .or_fail("Failed to load profile")?
        .ok_or_else(|| {
            warn!("No profile row for authenticated user {}", user.id);
            AppError::Unauthenticated
        })?;

    let session = SessionContext {
        user_id: user.id,
        email: user.email.or(Some(profile.email)),
        role: profile.role,
        full_name: profile.full_name,
        access_token: token.to_string(),
    };

    info!("Authenticated user: {} ({})", session.user_id, session.role);
    state.sessions.insert(token.to_string(), session.clone()).await;
    Ok(session)
}

impl FromRequest for SessionContext {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<Arc<AppState>>>().cloned();
        let token = access_token(req);

        Box::pin(async move {
            let state = state.ok_or(AppError::Configuration)?;
            let token = token.ok_or_else(|| {
                info!("No access token on request");
                AppError::Unauthenticated
            })?;
            resolve_session(&state, &token).await
        })
    }
}

/// A signed-in caller together with the repositories bound to their token.
pub struct Authenticated {
    pub session: SessionContext,
    pub repos: Repositories,
}

impl FromRequest for Authenticated {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<Arc<AppState>>>().cloned();
        let session = SessionContext::from_request(req, payload);

        Box::pin(async move {
            let session = session.await?;
            let provider = state
                .as_ref()
                .and_then(|state| state.provider.as_ref())
                .ok_or(AppError::Configuration)?;
            let repos = provider.repositories.for_token(&session.access_token);
            Ok(Authenticated { session, repos })
        })
    }
}
