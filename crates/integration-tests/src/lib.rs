//! Integration test harness for Folio.
//!
//! [`TestApp::spawn`] serves the real router on an ephemeral local port over
//! an in-memory store and a recording mailer, so the tests in `tests/` drive
//! the API over HTTP with `reqwest` without any external services.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p folio-integration-tests
//!
//! # Include the PostgreSQL-backed tests
//! FOLIO_TEST_DATABASE_URL=postgres://localhost/folio_test \
//!     cargo test -p folio-integration-tests -- --include-ignored
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use folio_server::app;
use folio_server::db::{DocumentStore, MemoryStore};
use folio_server::services::auth::{AuthService, PasswordScheme};
use folio_server::services::contact::ContactRelay;
use folio_server::services::email::RecordingMailer;
use folio_server::state::AppState;
use reqwest::Client;
use tokio::task::JoinHandle;

/// Sender address used by the test contact relay.
pub const SENDER: &str = "site@folio.test";
/// Recipient address used by the test contact relay.
pub const RECIPIENT: &str = "owner@folio.test";

/// How the spawned app is wired.
#[derive(Debug, Clone, Copy)]
pub struct TestOptions {
    /// Whether a mail transport is configured at all.
    pub mail: bool,
    /// Whether the configured transport rejects every message.
    pub failing_mailer: bool,
    /// Credential scheme used for login and `create_user`.
    pub scheme: PasswordScheme,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            mail: true,
            failing_mailer: false,
            scheme: PasswordScheme::PlainText,
        }
    }
}

/// A running server plus handles on its collaborators.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub store: Arc<dyn DocumentStore>,
    pub mailer: RecordingMailer,
    scheme: PasswordScheme,
    server: JoinHandle<()>,
}

impl TestApp {
    /// Spawn with a memory store, a working mailer and plain-text credentials.
    pub async fn spawn() -> Self {
        Self::spawn_with(TestOptions::default()).await
    }

    /// Spawn with a memory store and the given options.
    pub async fn spawn_with(options: TestOptions) -> Self {
        Self::spawn_on(Arc::new(MemoryStore::new()), options).await
    }

    /// Spawn over an arbitrary store.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn spawn_on(store: Arc<dyn DocumentStore>, options: TestOptions) -> Self {
        let mailer = if options.failing_mailer {
            RecordingMailer::failing()
        } else {
            RecordingMailer::new()
        };
        let contact = options
            .mail
            .then(|| ContactRelay::new(Arc::new(mailer.clone()), SENDER, RECIPIENT));

        let state = AppState::new(store.clone(), options.scheme.verifier(), contact);
        let router = app::router(state, None);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let address = format!(
            "http://{}",
            listener.local_addr().expect("Listener has no local address")
        );

        let server = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server failed");
        });

        Self {
            address,
            client: Client::new(),
            store,
            mailer,
            scheme: options.scheme,
            server,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }

    /// Insert a user whose password is stored with the app's scheme.
    ///
    /// # Panics
    ///
    /// Panics if the user cannot be created.
    pub async fn create_user(&self, username: &str, email: &str, password: &str) {
        let verifier = self.scheme.verifier();
        AuthService::new(self.store.as_ref(), verifier.as_ref())
            .create_user(username, email, password, "admin")
            .await
            .expect("Failed to create test user");
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server.abort();
    }
}
