//! Remote-service contract.
//!
//! These traits decouple the stores from the HTTP transport. All requests
//! implicitly carry the session cookie; the traits never see credentials
//! beyond the login and registration forms.
//!
//! | Operation     | Request                  |
//! |---------------|--------------------------|
//! | probe session | `GET /api/me`            |
//! | login         | `POST /login`            |
//! | register      | `POST /register`         |
//! | logout        | `POST /logout`           |
//! | list records  | `GET /api/jobs/`         |
//! | create record | `POST /api/jobs/`        |
//! | update record | `PUT /api/jobs/{id}`     |
//! | delete record | `DELETE /api/jobs/{id}`  |
//!
//! Response bodies come in more than one shape (bare object vs. envelope), so
//! they are returned as the `*Payload` enums and interpreted by the caller.

use crate::job::{JobDraft, JobId, JobPatch, JobRecord};
use crate::serde_helpers::skip_invalid;
use crate::session::{Credentials, Registration, UserIdentity};
use crate::transport::TransportError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Result of a remote call.
pub type RemoteResult<T> = std::result::Result<T, TransportError>;

/// A response body that may carry the current user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IdentityPayload {
    /// `{"user": {...}}`
    Envelope { user: UserIdentity },
    /// `{...}`
    Bare(UserIdentity),
    /// Anything else, including an empty body.
    Unexpected(Value),
}

impl IdentityPayload {
    pub fn into_identity(self) -> Option<UserIdentity> {
        match self {
            IdentityPayload::Envelope { user } | IdentityPayload::Bare(user) => Some(user),
            IdentityPayload::Unexpected(_) => None,
        }
    }
}

impl Default for IdentityPayload {
    fn default() -> Self {
        IdentityPayload::Unexpected(Value::Null)
    }
}

/// A response body that should carry the record list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum JobListPayload {
    /// `[...]`
    Bare(#[serde(deserialize_with = "skip_invalid")] Vec<JobRecord>),
    /// `{"jobs": [...]}`
    Envelope {
        #[serde(deserialize_with = "skip_invalid")]
        jobs: Vec<JobRecord>,
    },
    /// Anything else.
    Unexpected(Value),
}

impl JobListPayload {
    pub fn into_records(self) -> Option<Vec<JobRecord>> {
        match self {
            JobListPayload::Bare(jobs) | JobListPayload::Envelope { jobs } => Some(jobs),
            JobListPayload::Unexpected(_) => None,
        }
    }
}

/// A response body that may carry a single record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum JobPayload {
    /// `{"job": {...}}`
    Envelope { job: JobRecord },
    /// `{...}`
    Bare(JobRecord),
    /// Anything else.
    Unexpected(Value),
}

impl JobPayload {
    pub fn into_record(self) -> Option<JobRecord> {
        match self {
            JobPayload::Envelope { job } | JobPayload::Bare(job) => Some(job),
            JobPayload::Unexpected(_) => None,
        }
    }
}

impl Default for JobPayload {
    fn default() -> Self {
        JobPayload::Unexpected(Value::Null)
    }
}

/// Session endpoints of the remote service.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `GET /api/me`
    async fn current_user(&self) -> RemoteResult<IdentityPayload>;

    /// `POST /login`
    async fn login(&self, credentials: &Credentials) -> RemoteResult<IdentityPayload>;

    /// `POST /register`
    ///
    /// A success without a usable identity means the caller still has to log in.
    async fn register(&self, registration: &Registration) -> RemoteResult<IdentityPayload>;

    /// `POST /logout`
    async fn logout(&self) -> RemoteResult<()>;
}

/// Job record endpoints of the remote service.
#[async_trait]
pub trait JobApi: Send + Sync {
    /// `GET /api/jobs/`
    async fn list_jobs(&self) -> RemoteResult<JobListPayload>;

    /// `POST /api/jobs/`
    async fn create_job(&self, draft: &JobDraft) -> RemoteResult<JobPayload>;

    /// `PUT /api/jobs/{id}`
    ///
    /// The response body is not used by the client.
    async fn update_job(&self, id: &JobId, patch: &JobPatch) -> RemoteResult<()>;

    /// `DELETE /api/jobs/{id}`
    async fn delete_job(&self, id: &JobId) -> RemoteResult<()>;
}
