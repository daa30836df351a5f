pub mod auth;
pub mod query;

use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::ProviderConfig;
pub use auth::{AuthProvider, AuthSession, SignUpOutcome, SignUpRequest, SupabaseAuth};
pub use query::Query;

const CLIENT_INFO: &str = "kidguides-auth";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("provider returned no rows")]
    Empty,
}

/// Thin wrapper over the provider's REST (`/rest/v1`) and auth (`/auth/v1`) endpoints.
#[derive(Clone)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    http: Client,
}

impl SupabaseClient {
    pub fn new(config: &ProviderConfig) -> Self {
        SupabaseClient {
            base_url: config.url.clone(),
            anon_key: config.anon_key.clone(),
            http: Client::new(),
        }
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attaches the project key and the caller's bearer token. Table calls made
    /// with a user's access token are subject to row-level security.
    pub(crate) fn authorize(&self, builder: RequestBuilder, bearer: &str) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
            .header("X-Client-Info", CLIENT_INFO)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub async fn select<T: DeserializeOwned>(
        &self,
        bearer: &str,
        query: &Query,
    ) -> Result<Vec<T>, ProviderError> {
        debug!(table = query.table, "select");
        let request = self
            .http
            .get(self.rest_url(query.table))
            .query(&query.params());
        let response = self.authorize(request, bearer).send().await?;
        read_json(response).await
    }

    /// `single()`: exactly one row, `None` when the filter matched nothing.
    pub async fn select_single<T: DeserializeOwned>(
        &self,
        bearer: &str,
        query: &Query,
    ) -> Result<Option<T>, ProviderError> {
        let request = self
            .http
            .get(self.rest_url(query.table))
            .query(&query.params())
            .header(header::ACCEPT, SINGLE_OBJECT);
        let response = self.authorize(request, bearer).send().await?;

        // PostgREST answers 406 when a single-object request matches zero rows
        if response.status() == StatusCode::NOT_ACCEPTABLE {
            return Ok(None);
        }
        read_json(response).await.map(Some)
    }

    /// Inserts one row and returns it as stored.
    pub async fn insert<B, T>(&self, bearer: &str, table: &str, row: &B) -> Result<T, ProviderError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(table, "insert");
        let request = self
            .http
            .post(self.rest_url(table))
            .header("Prefer", "return=representation")
            .json(row);
        let response = self.authorize(request, bearer).send().await?;
        let mut rows: Vec<T> = read_json(response).await?;
        if rows.is_empty() {
            return Err(ProviderError::Empty);
        }
        Ok(rows.swap_remove(0))
    }

    /// Patches every row matching the query and returns the updated rows.
    pub async fn update<B, T>(
        &self,
        bearer: &str,
        query: &Query,
        patch: &B,
    ) -> Result<Vec<T>, ProviderError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(table = query.table, "update");
        let request = self
            .http
            .patch(self.rest_url(query.table))
            .query(&query.params())
            .header("Prefer", "return=representation")
            .json(patch);
        let response = self.authorize(request, bearer).send().await?;
        read_json(response).await
    }

    /// Deletes matching rows, returning how many went away.
    pub async fn delete(&self, bearer: &str, query: &Query) -> Result<usize, ProviderError> {
        debug!(table = query.table, "delete");
        let request = self
            .http
            .delete(self.rest_url(query.table))
            .query(&query.params())
            .header("Prefer", "return=representation");
        let response = self.authorize(request, bearer).send().await?;
        let rows: Vec<serde_json::Value> = read_json(response).await?;
        Ok(rows.len())
    }
}

pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let body = String::from_utf8_lossy(&bytes).into_owned();
        error!("Error response from provider ({}): {}", status, body);
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_slice(&bytes)?)
}
