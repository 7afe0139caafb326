use crate::navigator::{Navigator, Route};
use jobtrack_core::api::AuthApi;
use jobtrack_core::classifier::{ErrorClassifier, ErrorContext};
use jobtrack_core::error::{Result, TrackerError};
use jobtrack_core::session::{AuthStatus, Credentials, Registration, Session, UserIdentity};
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};

/// Owns the client's single [`Session`] and the operations that change it.
///
/// `SessionStore` is responsible for:
/// - Probing for an existing session once at startup
/// - Logging in, registering and logging out against the remote service
/// - Classifying authentication failures into display messages
/// - Triggering navigation after successful transitions
///
/// Construct one per running client and share it as `Arc<SessionStore>`.
/// Side effects (state changes, navigation) happen only after the remote
/// call resolves.
pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    navigator: Arc<dyn Navigator>,
    classifier: ErrorClassifier,
    session: RwLock<Session>,
    probe: OnceCell<bool>,
}

impl SessionStore {
    /// Creates a store with an unauthenticated session.
    pub fn new(api: Arc<dyn AuthApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            navigator,
            classifier: ErrorClassifier::default(),
            session: RwLock::new(Session::default()),
            probe: OnceCell::new(),
        }
    }

    /// Replaces the error classification policy.
    pub fn with_classifier(mut self, classifier: ErrorClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Returns a copy of the current session.
    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn status(&self) -> AuthStatus {
        self.session.read().await.status()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    pub async fn identity(&self) -> Option<UserIdentity> {
        self.session.read().await.identity().cloned()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.session.read().await.last_error().map(str::to_string)
    }

    /// Checks for an existing server session.
    ///
    /// Runs at most once per store. A call made while the probe is in flight
    /// waits for it; later calls return the current state. Any failure, or a
    /// response without a user, leaves the session unauthenticated without
    /// surfacing an error.
    pub async fn probe_session(&self) -> bool {
        self.probe.get_or_init(|| self.run_probe()).await;
        self.is_authenticated().await
    }

    async fn run_probe(&self) -> bool {
        self.session.write().await.begin_authentication();

        match self.api.current_user().await {
            Ok(payload) => match payload.into_identity() {
                Some(identity) => {
                    tracing::info!("[SessionStore] Restored session for {}", identity.username);
                    self.session.write().await.authenticate(identity);
                    true
                }
                None => {
                    tracing::warn!("[SessionStore] Session probe returned no user; treating as logged out");
                    self.session.write().await.reset();
                    false
                }
            },
            Err(e) => {
                tracing::debug!("[SessionStore] No active session: {}", e);
                self.session.write().await.reset();
                false
            }
        }
    }

    /// Logs in and navigates to the dashboard on success.
    ///
    /// A 401 is always reported as "Incorrect username or password".
    pub async fn login(&self, credentials: &Credentials) -> Result<UserIdentity> {
        if let Err(e) = credentials.validate() {
            return Err(self.fail(e, ErrorContext::Login).await);
        }

        self.session.write().await.begin_authentication();
        tracing::debug!("[SessionStore] Logging in as {}", credentials.username);

        let identity = self.login_remote(credentials).await?;
        self.navigator.navigate(Route::Dashboard);
        Ok(identity)
    }

    /// Registers and ends in an authenticated session.
    ///
    /// When the registration response carries the new user, that identity is
    /// used directly; otherwise the store logs in with the same credentials.
    /// A 400 is always reported as "Email or username already in use".
    pub async fn register(&self, registration: &Registration) -> Result<UserIdentity> {
        if let Err(e) = registration.validate() {
            return Err(self.fail(e, ErrorContext::Register).await);
        }

        self.session.write().await.begin_authentication();
        tracing::debug!("[SessionStore] Registering {}", registration.username);

        let payload = match self.api.register(registration).await {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail(e.into(), ErrorContext::Register).await),
        };

        let identity = match payload.into_identity() {
            Some(identity) => {
                self.session.write().await.authenticate(identity.clone());
                identity
            }
            None => {
                tracing::debug!("[SessionStore] Registration returned no session; logging in");
                self.login_remote(&registration.credentials()).await?
            }
        };

        tracing::info!("[SessionStore] Registered {}", identity.username);
        self.navigator.navigate(Route::Dashboard);
        Ok(identity)
    }

    /// Logs out and navigates to the login page.
    ///
    /// Local state is cleared only after the server confirms. On failure the
    /// session stays as it was, the error is recorded and returned.
    pub async fn logout(&self) -> Result<()> {
        self.session.write().await.clear_error();

        if let Err(e) = self.api.logout().await {
            let message = self.classifier.classify(&e, ErrorContext::General);
            tracing::warn!("[SessionStore] Logout failed: {}", message);
            self.session.write().await.record_error(message);
            return Err(e.into());
        }

        self.session.write().await.reset();
        tracing::info!("[SessionStore] Logged out");
        self.navigator.navigate(Route::Login);
        Ok(())
    }

    async fn login_remote(&self, credentials: &Credentials) -> Result<UserIdentity> {
        match self.api.login(credentials).await {
            Ok(payload) => {
                let identity = payload
                    .into_identity()
                    .unwrap_or_else(|| UserIdentity::from_username(credentials.username.clone()));
                tracing::info!("[SessionStore] Logged in as {}", identity.username);
                self.session.write().await.authenticate(identity.clone());
                Ok(identity)
            }
            Err(e) => Err(self.fail(e.into(), ErrorContext::Login).await),
        }
    }

    async fn fail(&self, err: TrackerError, context: ErrorContext) -> TrackerError {
        let message = self.classifier.classify_error(&err, context);
        tracing::warn!("[SessionStore] {:?} failed: {}", context, message);
        self.session.write().await.fail(message);
        err
    }
}

#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;
