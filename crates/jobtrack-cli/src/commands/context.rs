//! Shared wiring for every command: configuration, logging, the HTTP client
//! and the two stores.

use crate::{LoginArgs, ViewArgs};
use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use jobtrack_application::{Navigator, RecordStore, Route, SessionStore};
use jobtrack_core::config::ClientConfig;
use jobtrack_core::error::TrackerError;
use jobtrack_core::job::JobStatus;
use jobtrack_core::session::Credentials;
use jobtrack_core::view::{SortKey, SortOrder, ViewState};
use jobtrack_infrastructure::{ConfigService, HttpApiClient};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Resolves the configuration; `--base-url` wins over everything else.
pub fn load_config(path: Option<&Path>, base_url: Option<&str>) -> Result<ClientConfig> {
    let service = path.map(ConfigService::with_path).unwrap_or_default();
    let mut config = service.load().context("Failed to load configuration")?;
    if let Some(url) = base_url {
        config.api_base_url = url.to_string();
    }
    Ok(config)
}

/// Logs to stderr. `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// A terminal has no routes; navigation is only traced.
struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!("[Navigator] -> {}", route.path());
    }
}

pub struct AppContext {
    pub config: ClientConfig,
    pub session: Arc<SessionStore>,
    pub records: Arc<RecordStore>,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Arc::new(HttpApiClient::new(&config)?);
        let session = Arc::new(SessionStore::new(client.clone(), Arc::new(TracingNavigator)));
        let records = Arc::new(RecordStore::new(client, session.clone()));
        Ok(Self {
            config,
            session,
            records,
        })
    }

    /// Reuses a live server session, otherwise logs in with the given credentials.
    pub async fn ensure_session(&self, login: &LoginArgs) -> Result<()> {
        if self.session.probe_session().await {
            return Ok(());
        }

        let (Some(username), Some(password)) = (&login.username, &login.password) else {
            bail!("Not logged in. Pass --username and --password or set JOBTRACK_USERNAME and JOBTRACK_PASSWORD.");
        };

        let credentials = Credentials::new(username.clone(), password.clone());
        if let Err(e) = self.session.login(&credentials).await {
            return Err(user_error(self.session.last_error().await, e));
        }
        Ok(())
    }

    /// Ensures a session and loads the record set.
    pub async fn load_records(&self, login: &LoginArgs) -> Result<()> {
        self.ensure_session(login).await?;
        if let Err(e) = self.records.list().await {
            return Err(user_error(self.records.last_error().await, e));
        }
        Ok(())
    }

    /// The record store's display message for a failed operation.
    pub async fn record_error(&self, err: TrackerError) -> anyhow::Error {
        user_error(self.records.last_error().await, err)
    }
}

/// Prefers the classified display message over the raw error.
pub fn user_error(message: Option<String>, err: TrackerError) -> anyhow::Error {
    match message {
        Some(message) => anyhow!(message),
        None => anyhow!(err),
    }
}

pub fn view_state(args: &ViewArgs) -> Result<ViewState> {
    let mut view = ViewState::default();
    if let Some(term) = &args.search {
        view = view.with_search(term.clone());
    }
    if let Some(status) = &args.status {
        view = view.with_status(Some(JobStatus::from(status.as_str())));
    }
    if let Some(sort) = &args.sort {
        let key: SortKey = sort
            .parse()
            .map_err(|_| anyhow!("Unknown sort key '{}'", sort))?;
        view.sort_key = key;
    }
    if args.asc {
        view.sort_order = SortOrder::Ascending;
    }
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_state_from_args() {
        let args = ViewArgs {
            search: Some("acme".into()),
            status: Some("Interview".into()),
            sort: Some("company".into()),
            asc: true,
        };
        let view = view_state(&args).unwrap();
        assert_eq!(view.search_term, "acme");
        assert_eq!(view.status_filter, Some(JobStatus::Interview));
        assert_eq!(view.sort_key, SortKey::Company);
        assert_eq!(view.sort_order, SortOrder::Ascending);

        assert_eq!(view_state(&ViewArgs::default()).unwrap(), ViewState::default());
    }

    #[test]
    fn test_unknown_sort_key_is_rejected() {
        let args = ViewArgs {
            sort: Some("salary".into()),
            ..ViewArgs::default()
        };
        assert!(view_state(&args).is_err());
    }

    #[test]
    fn test_user_error_prefers_display_message() {
        let err = user_error(Some("Please log in to continue".into()), TrackerError::Unauthenticated);
        assert_eq!(err.to_string(), "Please log in to continue");
    }
}
