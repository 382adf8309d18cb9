use std::sync::RwLock;

use chrono::{DateTime, SecondsFormat, Utc};
use fleetdash_common::BackendError;
use fleetdash_common::config::BackendConfig;
use fleetdash_protocols::postgrest::{
    ErrorPayload, Query, QueryError, REST_PATH, RETURN_REPRESENTATION, SINGLE_OBJECT,
};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

const PREFER: &str = "Prefer";
const API_KEY: &str = "apikey";

/// Client for the project's REST and auth endpoints.
pub struct RestBackend {
    http: Client,
    base_url: String,
    anon_key: String,
    access_token: RwLock<Option<String>>,
}

impl RestBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http: Client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("fleetdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.url.clone(),
            anon_key: config.anon_key.clone(),
            access_token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn set_access_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.access_token.write() {
            *guard = token;
        }
    }

    /// The adopted session's token, or the anon key before sign-in.
    fn bearer(&self) -> String {
        self.access_token
            .read()
            .ok()
            .and_then(|token| token.clone())
            .unwrap_or_else(|| self.anon_key.clone())
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let token: String = self.bearer();
        self.request_as(method, path, &token)
    }

    pub(crate) fn request_as(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header(API_KEY, &self.anon_key)
            .bearer_auth(token)
    }

    /// GET for `query`; single-row queries ask for a bare object.
    pub(crate) fn read(&self, query: &Query) -> RequestBuilder {
        let builder: RequestBuilder = self
            .request(Method::GET, &query.path())
            .query(&query.params());
        if query.is_single() {
            builder.header(ACCEPT, SINGLE_OBJECT)
        } else {
            builder
        }
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        query: &Query,
    ) -> Result<Vec<T>, BackendError> {
        debug!(table = query.table_name(), "select");
        let response: Response = self.send(self.read(query), query.table_name()).await?;
        decode(response).await
    }

    /// Reads exactly one row of a [`Query::single`] query.
    /// Zero rows surface as [`BackendError::NotFound`].
    pub(crate) async fn fetch_one<T: DeserializeOwned>(
        &self,
        query: &Query,
        what: &str,
    ) -> Result<T, BackendError> {
        if !query.is_single() {
            return Err(BackendError::InvalidQuery(format!(
                "{what}: expected a single-row query"
            )));
        }
        debug!(table = query.table_name(), what, "select single");
        let response: Response = self.send(self.read(query), what).await?;
        decode(response).await
    }

    pub(crate) async fn insert<B, T>(&self, table: &str, row: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(table, "insert");
        let builder: RequestBuilder = self
            .request(Method::POST, &format!("{REST_PATH}/{table}"))
            .header(PREFER, RETURN_REPRESENTATION)
            .json(&[row]);
        let response: Response = self.send(builder, table).await?;
        let rows: Vec<T> = decode(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::Decode(format!("insert into {table} returned no rows")))
    }

    /// Updates the rows matched by `query` and returns the first one.
    pub(crate) async fn patch<B, T>(
        &self,
        query: &Query,
        changes: &B,
        what: &str,
    ) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(table = query.table_name(), what, "update");
        let builder: RequestBuilder = self
            .request(Method::PATCH, &query.path())
            .query(&query.params())
            .header(PREFER, RETURN_REPRESENTATION)
            .json(changes);
        let response: Response = self.send(builder, what).await?;
        let rows: Vec<T> = decode(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(what.to_string()))
    }

    pub(crate) async fn remove(&self, query: &Query, what: &str) -> Result<(), BackendError> {
        debug!(table = query.table_name(), what, "delete");
        let builder: RequestBuilder = self
            .request(Method::DELETE, &query.path())
            .query(&query.params());
        self.send(builder, what).await?;
        Ok(())
    }

    async fn send(&self, builder: RequestBuilder, what: &str) -> Result<Response, BackendError> {
        let response: Response = builder
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: String = response.text().await.unwrap_or_default();
        Err(error_from(status, &body, what))
    }
}

/// Maps a failed response to a [`BackendError`].
///
/// PostgREST's "0 rows for a single object" answer becomes `NotFound`; anything
/// else keeps its status, error code and message.
fn error_from(status: StatusCode, body: &str, what: &str) -> BackendError {
    let payload: ErrorPayload = serde_json::from_str(body).unwrap_or_default();
    if payload.is_no_rows() {
        return BackendError::NotFound(what.to_string());
    }

    let message: String = payload.describe().unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string()
    });

    BackendError::Api {
        status: status.as_u16(),
        code: payload.code,
        message,
    }
}

pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let body = response
        .bytes()
        .await
        .map_err(|e| BackendError::Transport(e.to_string()))?;
    serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))
}

/// Runs a query builder, turning identifier mistakes into backend errors.
pub(crate) fn build(
    query: impl FnOnce() -> Result<Query, QueryError>,
) -> Result<Query, BackendError> {
    query().map_err(|e| BackendError::InvalidQuery(e.to_string()))
}

/// Filter value for timestamp columns.
pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
