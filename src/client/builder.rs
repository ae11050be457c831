use crate::client::core::ApiClient;
use crate::session::{FileSessionStore, SessionState, SessionStore};
use crate::transport::{HttpTransport, DEFAULT_TIMEOUT_MS};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
///
/// Keep this surface area small and predictable: base URL, deadline,
/// session backend.
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    session_store: Option<Arc<dyn SessionStore>>,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
            session_store: None,
        }
    }

    /// Backend base URL (required). A trailing slash is tolerated.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Per-call deadline. Also settable via `FRONTDESK_HTTP_TIMEOUT_MS`;
    /// the builder value wins. Default 30 000 ms.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout_ms(self, ms: u64) -> Self {
        self.timeout(Duration::from_millis(ms))
    }

    /// Inject a session backend. Default is the file store under the user
    /// config directory.
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    /// Use an in-memory session (nothing persisted). Primarily for tests
    /// and one-shot tooling.
    pub fn in_memory_session(self) -> Self {
        self.session_store(Arc::new(crate::session::MemorySessionStore::new()))
    }

    /// Build the client, loading any persisted session.
    pub async fn build(self) -> Result<ApiClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::configuration("base URL is required"))?;

        let parsed = url::Url::parse(&base_url)
            .map_err(|e| Error::configuration(format!("invalid base URL `{base_url}`: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::configuration(format!(
                "unsupported base URL scheme `{}`",
                parsed.scheme()
            )));
        }

        let timeout = self
            .timeout
            .or_else(|| {
                std::env::var("FRONTDESK_HTTP_TIMEOUT_MS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .filter(|ms| *ms > 0)
                    .map(Duration::from_millis)
            })
            .unwrap_or(Duration::from_millis(DEFAULT_TIMEOUT_MS));

        let store = self
            .session_store
            .unwrap_or_else(|| Arc::new(FileSessionStore::default()));
        let session = Arc::new(SessionState::load(store).await);
        let transport = Arc::new(HttpTransport::new(&base_url, timeout)?);

        Ok(ApiClient { transport, session })
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
