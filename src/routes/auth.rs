use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::{error, info, warn};

use crate::error::{require, AppError, ProviderResultExt};
use crate::middleware::auth::{access_token, ACCESS_TOKEN_COOKIE};
use crate::models::Role;
use crate::supabase::auth::SignUpRejection;
use crate::supabase::{SignUpOutcome, SignUpRequest};
use crate::types::{LoginRequest, LoginResponse, SignupConflict, SignupRequest, SignupResponse};
use crate::AppState;

const SIGNUP_CREATED: &str =
    "User created successfully. Please check your email to confirm your account.";
const SIGNUP_CONFLICT: &str =
    "An account with this email already exists. Please move to Sign In option.";
const SIGNUP_UNEXPECTED: &str = "An unexpected error occurred during signup";

fn error_json(response: &mut actix_web::HttpResponseBuilder, message: &str) -> HttpResponse {
    response.json(json!({ "error": message }))
}

/// Registers a new account with the provider. Field presence is checked
/// before the provider is contacted.
#[utoipa::path(
    context_path = "/api/auth",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Missing fields or provider rejection"),
        (status = 409, description = "Email already registered", body = SignupConflict),
        (status = 500, description = "Configuration or unexpected error")
    )
)]
#[post("/signup")]
pub async fn signup(app_state: web::Data<Arc<AppState>>, body: web::Bytes) -> HttpResponse {
    let request: SignupRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            error!("Signup error: {:?}", e);
            return error_json(&mut HttpResponse::InternalServerError(), SIGNUP_UNEXPECTED);
        }
    };

    let (Some(email), Some(_), Some(role), Some(full_name)) = (
        require(&request.email),
        require(&request.password),
        require(&request.role),
        require(&request.full_name),
    ) else {
        return error_json(&mut HttpResponse::BadRequest(), "Missing required fields");
    };

    let Ok(role) = role.parse::<Role>() else {
        return error_json(&mut HttpResponse::BadRequest(), "Invalid role");
    };

    let Some(provider) = app_state.provider.as_ref() else {
        error!("Missing Supabase environment variables");
        return error_json(
            &mut HttpResponse::InternalServerError(),
            "Server configuration error",
        );
    };

    let sign_up = SignUpRequest {
        email: email.to_string(),
        password: request.password.clone().unwrap_or_default(),
        role,
        full_name: full_name.to_string(),
    };

    match provider.auth.sign_up(&sign_up).await {
        Ok(SignUpOutcome::Created(user)) => {
            info!("Created {} account for {}", role, email);
            HttpResponse::Created().json(SignupResponse {
                success: true,
                message: SIGNUP_CREATED.to_string(),
                user,
            })
        }
        Ok(SignUpOutcome::Rejected { status, body }) => {
            match SignUpRejection::classify(status, &body) {
                SignUpRejection::AlreadyExists => {
                    warn!("Signup for existing account {}", email);
                    HttpResponse::Conflict().json(SignupConflict {
                        error: "User already exists".to_string(),
                        user_exists: true,
                        message: SIGNUP_CONFLICT.to_string(),
                    })
                }
                SignUpRejection::Failed(message) => {
                    error_json(&mut HttpResponse::BadRequest(), &message)
                }
            }
        }
        Err(e) => {
            error!("Signup error: {:?}", e);
            error_json(&mut HttpResponse::InternalServerError(), SIGNUP_UNEXPECTED)
        }
    }
}

/// Password sign-in. The access token is returned in the body and set as
/// the session cookie.
#[utoipa::path(
    context_path = "/api/auth",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Credentials rejected")
    )
)]
#[post("/login")]
pub async fn login(
    app_state: web::Data<Arc<AppState>>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let (Some(email), Some(password)) = (
        require(&body.email),
        body.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    let provider = app_state.provider.as_ref().ok_or(AppError::Configuration)?;

    let Some(session) = provider
        .auth
        .sign_in(email, password)
        .await
        .or_fail("Failed to sign in")?
    else {
        info!("Rejected sign-in for {}", email);
        return Ok(error_json(
            &mut HttpResponse::Unauthorized(),
            "Invalid login credentials",
        ));
    };

    info!("Signed in user: {}", session.user.id);
    let cookie = Cookie::build(ACCESS_TOKEN_COOKIE, session.access_token.clone())
        .path("/")
        .http_only(true)
        .finish();

    Ok(HttpResponse::Ok().cookie(cookie).json(LoginResponse {
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        user: session.user,
    }))
}

/// Ends the provider session and drops the cached session context.
#[utoipa::path(
    context_path = "/api/auth",
    tag = "auth",
    responses((status = 204, description = "Signed out"))
)]
#[post("/logout")]
pub async fn logout(
    app_state: web::Data<Arc<AppState>>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let mut removal = Cookie::new(ACCESS_TOKEN_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();

    let Some(token) = access_token(&req) else {
        return Ok(HttpResponse::NoContent().cookie(removal).finish());
    };

    app_state.sessions.invalidate(&token).await;
    if let Some(provider) = app_state.provider.as_ref() {
        provider
            .auth
            .sign_out(&token)
            .await
            .or_fail("Failed to sign out")?;
    }

    info!("Signed out session");
    Ok(HttpResponse::NoContent().cookie(removal).finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .service(signup)
            .service(login)
            .service(logout),
    );
}
