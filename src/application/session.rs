//! Session store: the single source of truth for who is acting.
//!
//! State is mutated exclusively by the four operations here; every other
//! component only reads snapshots. None of the operations surface transport
//! errors to the caller; failures degrade to outcome values.

use std::sync::{
    PoisonError, RwLock,
    atomic::{AtomicBool, Ordering},
};

use tracing::{debug, warn};
use velina_api_types::{Acknowledgement, AuthUserResponse};

use crate::domain::session::SessionState;
use crate::infra::api::ApiClient;

const LOGIN_FALLBACK_MESSAGE: &str = "Login failed";
const REGISTER_FALLBACK_MESSAGE: &str = "Registration failed";

/// Result of a session operation, reported to the initiating view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub ok: bool,
    pub message: Option<String>,
}

impl AuthOutcome {
    fn success(message: Option<String>) -> Self {
        Self { ok: true, message }
    }

    fn failure(message: String) -> Self {
        Self {
            ok: false,
            message: Some(message),
        }
    }
}

pub struct SessionStore {
    api: ApiClient,
    state: RwLock<SessionState>,
    initialized: AtomicBool,
}

impl SessionStore {
    /// A fresh store starts in the resolving state so guards defer until
    /// `initialize` has completed.
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: RwLock::new(SessionState::default()),
            initialized: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// A point-in-time copy of the session state.
    pub fn snapshot(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write_state(&self, apply: impl FnOnce(&mut SessionState)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut state);
        state.version += 1;
    }

    /// Resolve the current identity against the API. Invoked once per process
    /// lifetime; a repeated call is ignored with a warning rather than issuing
    /// a second resolution.
    ///
    /// Resolution failure is not an error: it means "unauthenticated".
    pub async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            warn!("session store already initialized; ignoring repeated call");
            return;
        }

        self.write_state(|state| state.resolving = true);
        match self.api.get::<AuthUserResponse>("/api/auth/me", &[]).await {
            Ok(resp) => {
                debug!(username = %resp.user.username, "resumed existing session");
                self.write_state(|state| state.identity = Some(resp.user));
            }
            Err(err) => {
                debug!(error = %err, "no authenticated session");
                self.write_state(|state| state.identity = None);
            }
        }
        self.write_state(|state| state.resolving = false);
    }

    /// Submit credentials. On success the stored identity is replaced
    /// wholesale; on failure it is left exactly as it was.
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        self.write_state(|state| state.resolving = true);
        let body = serde_json::json!({ "email": email, "password": password });
        let outcome = match self.api.post::<AuthUserResponse>("/api/auth/login", body).await {
            Ok(resp) => {
                debug!(username = %resp.user.username, "login succeeded");
                self.write_state(|state| state.identity = Some(resp.user));
                AuthOutcome::success(None)
            }
            Err(err) => AuthOutcome::failure(
                err.server_message()
                    .unwrap_or(LOGIN_FALLBACK_MESSAGE)
                    .to_owned(),
            ),
        };
        self.write_state(|state| state.resolving = false);
        outcome
    }

    /// Request a new account. Success does not authenticate; the stored
    /// identity never changes here.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> AuthOutcome {
        self.write_state(|state| state.resolving = true);
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
            "password2": confirm_password,
        });
        let outcome = match self
            .api
            .post::<Acknowledgement>("/api/auth/register", body)
            .await
        {
            Ok(ack) => AuthOutcome::success(ack.message),
            Err(err) => AuthOutcome::failure(
                err.server_message()
                    .unwrap_or(REGISTER_FALLBACK_MESSAGE)
                    .to_owned(),
            ),
        };
        self.write_state(|state| state.resolving = false);
        outcome
    }

    /// Terminate the session. Best-effort on the server side: the local
    /// identity is cleared no matter how the termination call ends, so a stale
    /// identity can never survive a logout attempt.
    pub async fn logout(&self) -> AuthOutcome {
        self.write_state(|state| state.resolving = true);
        if let Err(err) = self.api.get::<Acknowledgement>("/api/auth/logout", &[]).await {
            warn!(error = %err, "logout request failed; clearing local session anyway");
        }
        self.write_state(|state| {
            state.identity = None;
            state.resolving = false;
        });
        AuthOutcome::success(None)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::MockServer;
    use url::Url;
    use velina_api_types::Role;

    use super::*;

    const ADA: &str = r#"{"success":true,"user":{"_id":"u1","username":"ada","email":"ada@example.com","role":"user"}}"#;

    fn store(server: &MockServer) -> SessionStore {
        let base = Url::parse(&server.base_url()).expect("base url");
        let api = ApiClient::new(base, Duration::from_secs(5)).expect("client");
        SessionStore::new(api)
    }

    #[tokio::test]
    async fn guards_defer_until_initialize_completes() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/api/auth/me");
            then.status(401).body(r#"{"success":false}"#);
        });

        let store = store(&server);
        assert!(store.snapshot().resolving);

        store.initialize().await;
        let state = store.snapshot();
        assert!(!state.resolving);
        assert!(state.identity.is_none());
    }

    #[tokio::test]
    async fn initialize_resumes_an_existing_session() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/api/auth/me");
            then.status(200)
                .header("content-type", "application/json")
                .body(ADA);
        });

        let store = store(&server);
        store.initialize().await;
        let state = store.snapshot();
        assert_eq!(state.identity.as_ref().map(|i| i.id.as_str()), Some("u1"));
        assert!(!state.resolving);
    }

    #[tokio::test]
    async fn repeated_initialize_does_not_issue_a_second_resolution() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/api/auth/me");
            then.status(200)
                .header("content-type", "application/json")
                .body(ADA);
        });

        let store = store(&server);
        store.initialize().await;
        store.initialize().await;
        mock.assert_hits(1);
    }

    #[tokio::test]
    async fn successful_login_replaces_the_identity() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("POST")
                .path("/api/auth/login")
                .json_body(serde_json::json!({
                    "email": "ada@example.com",
                    "password": "pw",
                }));
            then.status(200)
                .header("content-type", "application/json")
                .body(ADA);
        });

        let store = store(&server);
        let outcome = store.login("ada@example.com", "pw").await;
        assert!(outcome.ok);

        let state = store.snapshot();
        assert_eq!(
            state.identity.as_ref().map(|i| i.role),
            Some(Role::User)
        );
        assert!(!state.resolving);
    }

    #[tokio::test]
    async fn failed_login_keeps_identity_and_reports_the_server_reason() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("POST").path("/api/auth/login");
            then.status(401)
                .header("content-type", "application/json")
                .body(r#"{"success":false,"message":"Invalid credentials"}"#);
        });

        let store = store(&server);
        let before = store.snapshot().identity.clone();
        let outcome = store.login("ada@example.com", "wrong").await;

        assert!(!outcome.ok);
        assert_eq!(outcome.message.as_deref(), Some("Invalid credentials"));
        assert_eq!(store.snapshot().identity, before);
    }

    #[tokio::test]
    async fn login_without_a_server_message_uses_the_fallback() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("POST").path("/api/auth/login");
            then.status(500).body("");
        });

        let store = store(&server);
        let outcome = store.login("ada@example.com", "pw").await;
        assert!(!outcome.ok);
        assert_eq!(outcome.message.as_deref(), Some("Login failed"));
    }

    #[tokio::test]
    async fn register_reports_the_server_message_without_authenticating() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("POST").path("/api/auth/register");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"success":true,"message":"Check your inbox"}"#);
        });

        let store = store(&server);
        let outcome = store.register("ada", "ada@example.com", "pw", "pw").await;
        assert!(outcome.ok);
        assert_eq!(outcome.message.as_deref(), Some("Check your inbox"));
        assert!(store.snapshot().identity.is_none());
    }

    #[tokio::test]
    async fn register_without_a_server_message_uses_the_fallback() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("POST").path("/api/auth/register");
            then.status(500).body("");
        });

        let store = store(&server);
        let outcome = store.register("ada", "ada@example.com", "pw", "pw").await;
        assert!(!outcome.ok);
        assert_eq!(outcome.message.as_deref(), Some("Registration failed"));
        assert!(store.snapshot().identity.is_none());
    }

    #[tokio::test]
    async fn logout_clears_identity_even_when_the_call_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("POST").path("/api/auth/login");
            then.status(200)
                .header("content-type", "application/json")
                .body(ADA);
        });
        server.mock(|when, then| {
            when.method("GET").path("/api/auth/logout");
            then.status(500).body("");
        });

        let store = store(&server);
        store.login("ada@example.com", "pw").await;
        assert!(store.snapshot().identity.is_some());

        let outcome = store.logout().await;
        assert!(outcome.ok);
        let state = store.snapshot();
        assert!(state.identity.is_none());
        assert!(!state.resolving);
    }

    #[tokio::test]
    async fn every_write_bumps_the_state_version() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/api/auth/me");
            then.status(401).body(r#"{"success":false}"#);
        });

        let store = store(&server);
        let before = store.snapshot().version;
        store.initialize().await;
        assert!(store.snapshot().version > before);
    }
}
