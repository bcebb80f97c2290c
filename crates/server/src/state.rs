//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::DocumentStore;
use crate::services::auth::CredentialVerifier;
use crate::services::contact::ContactRelay;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Every collaborator is constructed once at
/// startup and injected here; handlers never reach for globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn DocumentStore>,
    verifier: Arc<dyn CredentialVerifier>,
    contact: Option<ContactRelay>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `store` - Document store backend
    /// * `verifier` - Credential check used by login
    /// * `contact` - Contact relay, `None` when no mail transport is configured
    #[must_use]
    pub fn new(
        store: Arc<dyn DocumentStore>,
        verifier: Arc<dyn CredentialVerifier>,
        contact: Option<ContactRelay>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                verifier,
                contact,
            }),
        }
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }

    /// Get a reference to the credential verifier.
    #[must_use]
    pub fn verifier(&self) -> &dyn CredentialVerifier {
        self.inner.verifier.as_ref()
    }

    /// Get the contact relay, if mail is configured.
    #[must_use]
    pub fn contact(&self) -> Option<&ContactRelay> {
        self.inner.contact.as_ref()
    }
}
