use actix_web::http::header::LOCATION;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::supabase::ProviderError;

/// Sign-in page of the web front end, which posts to `/api/auth/login`.
pub const LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed form input, caught before any provider call.
    #[error("{0}")]
    Validation(String),

    #[error("Not authenticated")]
    Unauthenticated,

    /// The caller is signed in but belongs on another page.
    #[error("Redirecting to {0}")]
    Redirect(&'static str),

    #[error("{0}")]
    NotFound(String),

    /// Provider failures surface only the caller's generic message.
    #[error("{message}")]
    Provider {
        message: &'static str,
        #[source]
        source: ProviderError,
    },

    #[error("Server configuration error")]
    Configuration,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated | AppError::Redirect(_) => StatusCode::FOUND,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Provider { .. } | AppError::Configuration => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        let mut response = HttpResponse::build(self.status_code());
        match self {
            AppError::Unauthenticated => {
                response.insert_header((LOCATION, LOGIN_ROUTE));
            }
            AppError::Redirect(to) => {
                response.insert_header((LOCATION, *to));
            }
            _ => {}
        }
        response.json(ErrorBody { error: &message })
    }
}

pub trait ProviderResultExt<T> {
    /// Logs the provider failure and replaces it with a user-facing message.
    fn or_fail(self, message: &'static str) -> Result<T, AppError>;
}

impl<T> ProviderResultExt<T> for Result<T, ProviderError> {
    fn or_fail(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|source| {
            error!("{}: {:?}", message, source);
            AppError::Provider { message, source }
        })
    }
}

pub fn require(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
