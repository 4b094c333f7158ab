//! Hosted PostgREST backend.
//!
//! Speaks the REST surface of the hosted data store: table routes under
//! `/rest/v1/{table}`, stored procedures under `/rest/v1/rpc/{name}`. Every
//! request carries the public API key both as `apikey` and as a bearer token.
//!
//! There are no retries. A failed write is reported once and the visitor
//! decides whether to submit again.

use std::time::Duration;

use chrono::Utc;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::model::{EMAIL_PREFERENCES_TABLE, PILOT_APPLICATIONS_TABLE, RECORD_CONSENT_PROCEDURE};
use crate::{ConsentEvent, EmailPreference, LeadStore, PilotApplication, StoreError};

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Connection settings for [`RestStore`].
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    pub url: String,
    /// Public (anon) API key.
    pub api_key: String,
    /// Request timeout. `None` leaves the HTTP client default in place.
    pub timeout: Option<Duration>,
}

/// A [`LeadStore`] backed by the hosted PostgREST API.
pub struct RestStore {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Error body returned by PostgREST.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

impl RestStore {
    /// Build a client for the given project.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the URL or key is empty, or the
    /// HTTP client cannot be built.
    pub fn new(config: RestStoreConfig) -> Result<Self, StoreError> {
        let base_url = config.url.trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            return Err(StoreError::Config("missing store URL".to_owned()));
        }
        if config.api_key.trim().is_empty() {
            return Err(StoreError::Config("missing store API key".to_owned()));
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("signalpath-site/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            api_key: config.api_key,
            client,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn rpc_url(&self, procedure: &str) -> String {
        format!("{}/rest/v1/rpc/{procedure}", self.base_url)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Send a request and hand back the response on 2xx, or a classified
    /// error otherwise.
    async fn send(
        &self,
        table: &str,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, StoreError> {
        let resp = self.authed(req).send().await.map_err(network_error)?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().await.unwrap_or_default();
        let body = serde_json::from_str::<ApiErrorBody>(&text).unwrap_or_default();
        let err = classify(table, status, body);
        tracing::debug!(table, status = status.as_u16(), error = %err, "store request rejected");
        Err(err)
    }

    async fn rows<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Vec<T>, StoreError> {
        let text = resp.text().await.map_err(network_error)?;
        serde_json::from_str(&text)
            .map_err(|e| StoreError::unknown("decode", format!("unexpected response body: {e}")))
    }

    async fn select_preference(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Option<EmailPreference>, StoreError> {
        let req = self
            .client
            .get(self.table_url(EMAIL_PREFERENCES_TABLE))
            .query(&[
                ("select", "*".to_owned()),
                (column, format!("eq.{value}")),
                ("limit", "1".to_owned()),
            ]);
        let resp = self.send(EMAIL_PREFERENCES_TABLE, req).await?;
        let mut rows = Self::rows::<EmailPreference>(resp).await?;
        Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
    }

    async fn write_preference(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<EmailPreference, StoreError> {
        let resp = self.send(EMAIL_PREFERENCES_TABLE, req).await?;
        Self::rows::<EmailPreference>(resp)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::unknown("empty", "store returned no representation"))
    }
}

#[async_trait::async_trait]
impl LeadStore for RestStore {
    async fn insert_pilot_application(
        &self,
        application: &PilotApplication,
    ) -> Result<(), StoreError> {
        let req = self
            .client
            .post(self.table_url(PILOT_APPLICATIONS_TABLE))
            .header("Prefer", "return=minimal")
            .json(application);
        self.send(PILOT_APPLICATIONS_TABLE, req).await?;
        Ok(())
    }

    async fn find_preference_by_email(
        &self,
        email: &str,
    ) -> Result<Option<EmailPreference>, StoreError> {
        self.select_preference("email", email).await
    }

    async fn find_preference_by_token(
        &self,
        token: &str,
    ) -> Result<Option<EmailPreference>, StoreError> {
        self.select_preference("preference_token", token).await
    }

    async fn insert_preference(
        &self,
        preference: &EmailPreference,
    ) -> Result<EmailPreference, StoreError> {
        let req = self
            .client
            .post(self.table_url(EMAIL_PREFERENCES_TABLE))
            .header("Prefer", "return=representation")
            .json(preference);
        self.write_preference(req).await
    }

    async fn upsert_preference(
        &self,
        preference: &EmailPreference,
    ) -> Result<EmailPreference, StoreError> {
        let mut body = preference.clone();
        body.updated_at = Some(Utc::now());
        let req = self
            .client
            .post(self.table_url(EMAIL_PREFERENCES_TABLE))
            .query(&[("on_conflict", "email")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&body);
        self.write_preference(req).await
    }

    async fn record_consent(&self, event: &ConsentEvent) -> Result<(), StoreError> {
        let req = self
            .client
            .post(self.rpc_url(RECORD_CONSENT_PROCEDURE))
            .json(event);
        self.send(RECORD_CONSENT_PROCEDURE, req).await?;
        Ok(())
    }
}

fn network_error(err: reqwest::Error) -> StoreError {
    let reason = if err.is_timeout() {
        "request timed out".to_owned()
    } else {
        format!("network error: {err}")
    };
    StoreError::Transient { reason }
}

fn classify(table: &str, status: StatusCode, body: ApiErrorBody) -> StoreError {
    let message = body
        .message
        .or(body.details)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    if body.code.as_deref() == Some(UNIQUE_VIOLATION) || status == StatusCode::CONFLICT {
        return StoreError::DuplicateKey {
            table: table.to_owned(),
            message,
        };
    }

    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        return StoreError::Transient {
            reason: format!("HTTP {}: {message}", status.as_u16()),
        };
    }

    StoreError::Unknown {
        code: body.code.unwrap_or_else(|| status.as_u16().to_string()),
        message,
    }
}
