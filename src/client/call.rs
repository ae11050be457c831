//! Call state machine: attach credential, send, refresh-and-retry once on
//! 401, normalize.

use crate::envelope::Envelope;
use crate::types::request::RequestDescriptor;
use crate::{Error, Result};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use super::core::ApiClient;

impl ApiClient {
    /// Execute a call and unwrap the envelope payload.
    ///
    /// Failure order: transport errors first, then HTTP status, then the
    /// envelope's own `success` flag. The payload is `Null` when the
    /// backend sent an empty body.
    pub(crate) async fn call(&self, descriptor: &RequestDescriptor) -> Result<Value> {
        let envelope = self.call_enveloped(descriptor).await?;
        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "API returned error".to_string());
            return Err(Error::Api { message });
        }
        Ok(envelope.into_data())
    }

    /// Execute a call and return the normalized envelope.
    ///
    /// The refresh retry is a saturating flag, not a loop: at most one
    /// refresh and one resend per call, so a broken backend can never spin
    /// us. Unauthenticated descriptors (login, refresh itself) skip the
    /// whole cycle.
    pub(crate) async fn call_enveloped(&self, descriptor: &RequestDescriptor) -> Result<Envelope> {
        let request_id = Uuid::new_v4().to_string();
        let start = std::time::Instant::now();

        let bearer = if descriptor.requires_auth {
            self.session.credentials().access_token
        } else {
            None
        };

        let mut resp = self
            .transport
            .execute(descriptor, bearer.as_deref(), &request_id)
            .await?;

        if resp.status == 401 && descriptor.requires_auth {
            if !self.refresh().await {
                // Refresh already cleared the store; clear again is a no-op
                // but keeps the invariant local.
                self.session.clear().await;
                warn!(
                    method = %descriptor.method,
                    path = %descriptor.path,
                    request_id = %request_id,
                    "credential refresh failed, forcing re-login"
                );
                return Err(Error::Unauthorized);
            }

            let bearer = self.session.credentials().access_token;
            resp = self
                .transport
                .execute(descriptor, bearer.as_deref(), &request_id)
                .await?;

            if resp.status == 401 {
                self.session.clear().await;
                warn!(
                    method = %descriptor.method,
                    path = %descriptor.path,
                    request_id = %request_id,
                    "retry still unauthorized after refresh, credentials cleared"
                );
                return Err(Error::Unauthorized);
            }
        }

        let envelope = Envelope::normalize(&resp.body);

        if !resp.is_success() {
            let message = envelope
                .message
                .clone()
                .unwrap_or_else(|| format!("HTTP error {}", resp.status));
            warn!(
                status = resp.status,
                method = %descriptor.method,
                path = %descriptor.path,
                request_id = %request_id,
                duration_ms = start.elapsed().as_millis() as u64,
                "request failed"
            );
            return Err(Error::Http {
                status: resp.status,
                message,
            });
        }

        debug!(
            status = resp.status,
            method = %descriptor.method,
            path = %descriptor.path,
            request_id = %request_id,
            duration_ms = start.elapsed().as_millis() as u64,
            "request complete"
        );

        Ok(envelope)
    }
}
