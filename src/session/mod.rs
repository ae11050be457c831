//! Credential store: the session's authoritative in-memory state plus
//! best-effort durable persistence.
//!
//! Reads never block on I/O; writes persist through a [`SessionStore`]
//! backend and swallow storage failures (a read-only disk must not log the
//! receptionist out mid-shift).

mod store;

pub use store::{FileSessionStore, MemorySessionStore, PersistedSession, SessionStore};

use crate::types::account::Account;
use std::sync::{Arc, RwLock};
use tracing::warn;

/// Snapshot of the credential pair. Both tokens are present or both are
/// absent; no partial credential state survives a session boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CredentialPair {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl CredentialPair {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

/// Process-wide session state, owned by the client and injected where
/// needed rather than reached for as a global.
pub struct SessionState {
    inner: RwLock<PersistedSession>,
    store: Arc<dyn SessionStore>,
}

impl SessionState {
    /// Load the persisted session from the backing store. A load failure or
    /// a half-written credential pair (exactly one token) degrades to a
    /// clean logged-out state.
    pub async fn load(store: Arc<dyn SessionStore>) -> Self {
        let mut session = match store.load().await {
            Ok(session) => session.unwrap_or_default(),
            Err(e) => {
                warn!(store = store.name(), error = %e, "session load failed, starting logged out");
                PersistedSession::default()
            }
        };
        if session.access_token.is_some() != session.refresh_token.is_some() {
            warn!(store = store.name(), "partial credential pair on disk, discarding");
            session = PersistedSession::default();
        }
        Self {
            inner: RwLock::new(session),
            store,
        }
    }

    /// Ephemeral session state for tests and tools that must not persist.
    pub fn in_memory() -> Self {
        Self {
            inner: RwLock::new(PersistedSession::default()),
            store: Arc::new(MemorySessionStore::new()),
        }
    }

    /// Current credential snapshot. Never blocks on I/O.
    pub fn credentials(&self) -> CredentialPair {
        let session = self.inner.read().unwrap();
        CredentialPair {
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
        }
    }

    /// Last-known account record, if any.
    pub fn account(&self) -> Option<Account> {
        self.inner.read().unwrap().account.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().unwrap().access_token.is_some()
    }

    /// Commit a credential pair. The access token is written whenever
    /// non-empty; the refresh token only when non-empty, so a refresh
    /// response that omits a rotated token retains the previous one.
    pub async fn set_credentials(&self, access: &str, refresh: Option<&str>) {
        {
            let mut session = self.inner.write().unwrap();
            if !access.is_empty() {
                session.access_token = Some(access.to_string());
            }
            match refresh {
                Some(r) if !r.is_empty() => session.refresh_token = Some(r.to_string()),
                _ => {}
            }
        }
        self.persist().await;
    }

    /// Record the logged-in account alongside the credentials.
    pub async fn set_account(&self, account: Account) {
        self.inner.write().unwrap().account = Some(account);
        self.persist().await;
    }

    /// Drop credentials and account. Called on logout and after a failed
    /// refresh, forcing re-authentication.
    pub async fn clear(&self) {
        *self.inner.write().unwrap() = PersistedSession::default();
        if let Err(e) = self.store.clear().await {
            warn!(store = self.store.name(), error = %e, "session clear failed");
        }
    }

    async fn persist(&self) {
        let snapshot = self.inner.read().unwrap().clone();
        if let Err(e) = self.store.save(&snapshot).await {
            warn!(store = self.store.name(), error = %e, "session persist failed");
        }
    }
}
