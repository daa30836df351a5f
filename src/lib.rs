pub mod config;
pub mod conversations;
pub mod docs;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod pages;
pub mod progress;
pub mod repository;
pub mod routes;
pub mod scope;
pub mod supabase;
pub mod types;

use std::sync::Arc;

use actix_web::web;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use config::AppConfig;

use middleware::auth::{session_cache, SessionCache};
use repository::supabase::SupabaseRepositoryFactory;
use repository::RepositoryFactory;
use supabase::{AuthProvider, SupabaseAuth, SupabaseClient};

/// The hosted backend: identity plus the per-user table access.
pub struct Provider {
    pub auth: Arc<dyn AuthProvider>,
    pub repositories: Arc<dyn RepositoryFactory>,
}

impl Provider {
    pub fn supabase(config: &config::ProviderConfig) -> Self {
        let client = SupabaseClient::new(config);
        Provider {
            auth: Arc::new(SupabaseAuth::new(client.clone(), config.jwt_secret.clone())),
            repositories: Arc::new(SupabaseRepositoryFactory::new(client)),
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    /// `None` when the provider URL or key is missing; routes that need it
    /// answer with a configuration error.
    pub provider: Option<Provider>,
    pub sessions: SessionCache,
}

impl AppState {
    pub fn new(config: AppConfig, provider: Option<Provider>) -> Self {
        let sessions = session_cache(config.session_cache_ttl);
        AppState {
            config,
            provider,
            sessions,
        }
    }

    pub fn from_config(config: AppConfig) -> Self {
        let provider = config.provider.as_ref().map(Provider::supabase);
        AppState::new(config, provider)
    }
}

/// Every route of the application, plus the API reference at `/scalar`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(Scalar::with_url("/scalar", docs::ApiDoc::openapi()))
        .configure(routes::configure);
}

/// Convenience for tests and `main`: shared state as the handlers expect it.
pub fn app_data(state: AppState) -> web::Data<Arc<AppState>> {
    web::Data::new(Arc::new(state))
}
