//! Hand-written doubles for the remote traits and the navigator.

use crate::navigator::{Navigator, Route};
use async_trait::async_trait;
use jobtrack_core::api::{
    AuthApi, IdentityPayload, JobApi, JobListPayload, JobPayload, RemoteResult,
};
use jobtrack_core::job::{JobDraft, JobId, JobPatch, JobRecord, JobStatus};
use jobtrack_core::session::{Credentials, Registration, UserIdentity};
use jobtrack_core::transport::TransportError;
use serde_json::{Value, json};
use std::sync::Mutex;

pub fn user(username: &str) -> IdentityPayload {
    IdentityPayload::Envelope {
        user: UserIdentity::from_username(username),
    }
}

pub fn http_error(status: u16, payload: Value) -> TransportError {
    TransportError::http(status, Some(payload))
}

// Mock AuthApi: each operation answers with a preset result
pub struct MockAuthApi {
    pub current_user: Mutex<RemoteResult<IdentityPayload>>,
    pub login: Mutex<RemoteResult<IdentityPayload>>,
    pub register: Mutex<RemoteResult<IdentityPayload>>,
    pub logout: Mutex<RemoteResult<()>>,
    pub calls: Mutex<Vec<String>>,
}

impl MockAuthApi {
    pub fn new() -> Self {
        Self {
            current_user: Mutex::new(Err(http_error(401, json!({"error": "Not logged in"})))),
            login: Mutex::new(Ok(user("al"))),
            register: Mutex::new(Ok(IdentityPayload::Unexpected(json!({"message": "ok"})))),
            logout: Mutex::new(Ok(())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn logged_in(username: &str) -> Self {
        let api = Self::new();
        *api.current_user.lock().unwrap() = Ok(user(username));
        api
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn current_user(&self) -> RemoteResult<IdentityPayload> {
        self.record("current_user");
        // let a concurrent caller run while this request is "in flight"
        tokio::task::yield_now().await;
        self.current_user.lock().unwrap().clone()
    }

    async fn login(&self, credentials: &Credentials) -> RemoteResult<IdentityPayload> {
        self.record(&format!("login:{}", credentials.username));
        self.login.lock().unwrap().clone()
    }

    async fn register(&self, registration: &Registration) -> RemoteResult<IdentityPayload> {
        self.record(&format!("register:{}", registration.username));
        self.register.lock().unwrap().clone()
    }

    async fn logout(&self) -> RemoteResult<()> {
        self.record("logout");
        self.logout.lock().unwrap().clone()
    }
}

// Mock JobApi backed by an in-memory "server" collection
pub struct MockJobApi {
    pub server: Mutex<Vec<JobRecord>>,
    pub next_id: Mutex<i64>,
    /// Returned instead of the server list when set.
    pub list_override: Mutex<Option<JobListPayload>>,
    /// Consumed by the next call, which then fails.
    pub fail_next: Mutex<Option<TransportError>>,
    pub calls: Mutex<Vec<String>>,
}

impl MockJobApi {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<JobRecord>) -> Self {
        Self {
            server: Mutex::new(records),
            next_id: Mutex::new(100),
            list_override: Mutex::new(None),
            fail_next: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_next(&self, err: TransportError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> RemoteResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl JobApi for MockJobApi {
    async fn list_jobs(&self) -> RemoteResult<JobListPayload> {
        self.record("list".to_string())?;
        if let Some(payload) = self.list_override.lock().unwrap().clone() {
            return Ok(payload);
        }
        Ok(JobListPayload::Envelope {
            jobs: self.server.lock().unwrap().clone(),
        })
    }

    async fn create_job(&self, draft: &JobDraft) -> RemoteResult<JobPayload> {
        self.record(format!("create:{}", draft.company))?;
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        let mut record = JobRecord::new(id, draft.company.clone(), draft.position.clone());
        record.date_applied = Some(if draft.date_applied.is_empty() {
            "2024-03-10".to_string()
        } else {
            draft.date_applied.clone()
        });
        record.status = Some(JobStatus::from(draft.status.as_str())).filter(|s| !s.as_str().is_empty());
        self.server.lock().unwrap().push(record.clone());
        Ok(JobPayload::Bare(record))
    }

    async fn update_job(&self, id: &JobId, patch: &JobPatch) -> RemoteResult<()> {
        self.record(format!("update:{}", id))?;
        if let Some(record) = self.server.lock().unwrap().iter_mut().find(|r| &r.id == id) {
            patch.apply_to(record);
        }
        Ok(())
    }

    async fn delete_job(&self, id: &JobId) -> RemoteResult<()> {
        self.record(format!("delete:{}", id))?;
        self.server.lock().unwrap().retain(|r| &r.id != id);
        Ok(())
    }
}

// Navigator that remembers every route it was sent to
#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}
