use crate::envelope::Envelope;
use crate::session::SessionState;
use crate::transport::HttpTransport;
use crate::types::account::Account;
use crate::types::request::RequestDescriptor;
use crate::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Gateway client for the Frontdesk backend.
///
/// One instance per process is the intended shape: the credential pair lives
/// in [`SessionState`], owned here and injected into the call path rather
/// than reached for as ambient global state. Cloning via `Arc` is cheap and
/// all methods take `&self`.
pub struct ApiClient {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) session: Arc<SessionState>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client with default configuration (file-backed session,
    /// 30 s deadline). Use [`crate::ApiClientBuilder`] for anything else.
    pub async fn new(base_url: &str) -> Result<Self> {
        crate::client::builder::ApiClientBuilder::new()
            .base_url(base_url)
            .build()
            .await
    }

    /// The session state backing this client.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Last-known account record from the most recent login.
    pub fn current_account(&self) -> Option<Account> {
        self.session.account()
    }

    /// GET `path`, unwrapping the envelope payload into `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let data = self.call(&RequestDescriptor::get(path)).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// POST `body` to `path`, unwrapping the envelope payload into `T`.
    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T> {
        let data = self.call(&RequestDescriptor::post(path, body)).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// PUT `body` to `path`, unwrapping the envelope payload into `T`.
    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T> {
        let data = self.call(&RequestDescriptor::put(path, body)).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// DELETE `path`, unwrapping the envelope payload into `T`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let data = self.call(&RequestDescriptor::delete(path)).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// POST returning the full normalized envelope instead of unwrapping.
    ///
    /// For callers that must show the backend's success/failure `message`
    /// verbatim (check-in confirmations, cancellation notices). A
    /// `success == false` envelope is returned, not converted to an error;
    /// HTTP and auth failures still surface as errors.
    pub async fn post_raw(&self, path: &str, body: Value) -> Result<Envelope> {
        self.call_enveloped(&RequestDescriptor::post(path, body))
            .await
    }

    /// PUT variant of [`Self::post_raw`].
    pub async fn put_raw(&self, path: &str, body: Value) -> Result<Envelope> {
        self.call_enveloped(&RequestDescriptor::put(path, body))
            .await
    }
}
