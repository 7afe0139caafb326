//! HttpApiClient - REST implementation of the remote-service traits.
//!
//! One `reqwest::Client` with an in-memory cookie store backs every request,
//! so the session cookie set by `/login` is sent on all later calls. No
//! token is ever placed in headers.

use async_trait::async_trait;
use jobtrack_core::api::{
    AuthApi, IdentityPayload, JobApi, JobListPayload, JobPayload, RemoteResult,
};
use jobtrack_core::config::ClientConfig;
use jobtrack_core::error::{Result, TrackerError};
use jobtrack_core::job::{JobDraft, JobId, JobPatch};
use jobtrack_core::session::{Credentials, Registration};
use jobtrack_core::transport::{TransportError, payload_from_body};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Remote-service client over HTTP with session cookies.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpApiClient {
    /// Creates a client for the configured backend.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| TrackerError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("[HttpApiClient] {} {}", method, url);
        self.client.request(method, url)
    }

    /// Sends a request and returns the body of a successful response.
    async fn send(&self, request: RequestBuilder) -> RemoteResult<String> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::network(format!(
                    "timeout of {}ms exceeded",
                    self.timeout.as_millis()
                ))
            } else {
                TransportError::network(format!("Network Error: {}", e))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::network(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            tracing::debug!("[HttpApiClient] {} response: {}", status, body);
            return Err(TransportError::http(status.as_u16(), payload_from_body(&body)));
        }

        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> RemoteResult<T> {
        let body = self.send(request).await?;
        decode(&body)
    }
}

/// Decodes a success body. Non-JSON or empty bodies still reach the
/// payload enums as their `Unexpected` variant.
fn decode<T: DeserializeOwned>(body: &str) -> RemoteResult<T> {
    let value = payload_from_body(body).unwrap_or(Value::Null);
    serde_json::from_value(value)
        .map_err(|e| TransportError::network(format!("Unreadable response: {}", e)))
}

#[async_trait]
impl AuthApi for HttpApiClient {
    async fn current_user(&self) -> RemoteResult<IdentityPayload> {
        self.fetch(self.request(Method::GET, "/api/me")).await
    }

    async fn login(&self, credentials: &Credentials) -> RemoteResult<IdentityPayload> {
        self.fetch(self.request(Method::POST, "/login").json(credentials))
            .await
    }

    async fn register(&self, registration: &Registration) -> RemoteResult<IdentityPayload> {
        self.fetch(self.request(Method::POST, "/register").json(registration))
            .await
    }

    async fn logout(&self) -> RemoteResult<()> {
        self.send(self.request(Method::POST, "/logout")).await?;
        Ok(())
    }
}

#[async_trait]
impl JobApi for HttpApiClient {
    async fn list_jobs(&self) -> RemoteResult<JobListPayload> {
        self.fetch(self.request(Method::GET, "/api/jobs/")).await
    }

    async fn create_job(&self, draft: &JobDraft) -> RemoteResult<JobPayload> {
        self.fetch(self.request(Method::POST, "/api/jobs/").json(draft))
            .await
    }

    async fn update_job(&self, id: &JobId, patch: &JobPatch) -> RemoteResult<()> {
        let path = format!("/api/jobs/{}", id);
        self.send(self.request(Method::PUT, &path).json(patch)).await?;
        Ok(())
    }

    async fn delete_job(&self, id: &JobId) -> RemoteResult<()> {
        let path = format!("/api/jobs/{}", id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}
