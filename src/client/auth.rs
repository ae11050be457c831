//! Auth surface: login, logout, and the refresh protocol.

use crate::types::account::LoginResponse;
use crate::types::request::RequestDescriptor;
use crate::{Error, Result};
use serde_json::{json, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use super::core::ApiClient;
use crate::envelope::Envelope;

pub(crate) const LOGIN_PATH: &str = "/accounts/login";
pub(crate) const LOGOUT_PATH: &str = "/accounts/logout";
pub(crate) const REFRESH_PATH: &str = "/accounts/refresh";

impl ApiClient {
    /// Authenticate and commit the returned credential pair plus account
    /// record. The credential-pair invariant (both tokens or neither) is
    /// enforced here: a login payload missing either token commits nothing.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let descriptor = RequestDescriptor::post(
            LOGIN_PATH,
            json!({ "username": username, "password": password }),
        )
        .unauthenticated();

        let data = self.call(&descriptor).await?;

        let access = str_field(&data, "accessToken", "AccessToken").ok_or_else(|| Error::Api {
            message: "login response missing access token".to_string(),
        })?;
        let refresh = str_field(&data, "refreshToken", "RefreshToken").ok_or_else(|| {
            Error::Api {
                message: "login response missing refresh token".to_string(),
            }
        })?;
        let account: Option<crate::types::account::Account> = data
            .get("account")
            .or_else(|| data.get("Account"))
            .filter(|v| !v.is_null())
            .and_then(|v| serde_json::from_value(v.clone()).ok());

        self.session.set_credentials(&access, Some(&refresh)).await;
        if let Some(account) = &account {
            self.session.set_account(account.clone()).await;
        }

        debug!(username, "login succeeded");
        Ok(LoginResponse {
            access_token: access,
            refresh_token: refresh,
            account,
        })
    }

    /// Log out. The local session is cleared unconditionally, even when the
    /// backend call fails; the network error still propagates so the caller
    /// can log it.
    pub async fn logout(&self) -> Result<()> {
        let result = self
            .call(&RequestDescriptor::post(LOGOUT_PATH, json!({})))
            .await;
        self.session.clear().await;
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(error = %e, "logout call failed, session cleared locally");
                Err(e)
            }
        }
    }

    /// Refresh protocol: exchange the stored refresh token for a new access
    /// token. Returns `false` without network I/O when no refresh token is
    /// stored.
    ///
    /// Fail-closed: any failure (network, timeout, non-2xx, missing access
    /// token in the payload) clears all credentials so the next call
    /// surfaces `Unauthorized` instead of looping. Concurrent callers are
    /// not serialized; a second refresh with an already-rotated token simply
    /// fails closed and that caller re-logins.
    pub(crate) async fn refresh(&self) -> bool {
        let Some(refresh_token) = self.session.credentials().refresh_token else {
            return false;
        };

        let descriptor =
            RequestDescriptor::post(REFRESH_PATH, json!({ "refreshToken": refresh_token }))
                .unauthenticated();

        match self.refresh_exchange(&descriptor).await {
            Ok((access, new_refresh)) => {
                // set_credentials retains the stored refresh token when the
                // backend omits a rotated one.
                self.session
                    .set_credentials(&access, new_refresh.as_deref())
                    .await;
                debug!(rotated_refresh = new_refresh.is_some(), "credential refresh succeeded");
                true
            }
            Err(e) => {
                warn!(error = %e, "credential refresh failed, clearing session");
                self.session.clear().await;
                false
            }
        }
    }

    async fn refresh_exchange(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<(String, Option<String>)> {
        let request_id = Uuid::new_v4().to_string();
        let resp = self.transport.execute(descriptor, None, &request_id).await?;
        if !resp.is_success() {
            return Err(Error::Http {
                status: resp.status,
                message: format!("refresh rejected with HTTP {}", resp.status),
            });
        }

        let payload = Envelope::normalize(&resp.body).into_data();
        let access = str_field(&payload, "accessToken", "AccessToken").ok_or_else(|| {
            Error::Api {
                message: "refresh response missing access token".to_string(),
            }
        })?;
        let new_refresh = str_field(&payload, "refreshToken", "RefreshToken");
        Ok((access, new_refresh))
    }
}

/// Non-empty string field with casing fallback, lowercase-first like the
/// envelope.
fn str_field(value: &Value, camel: &str, pascal: &str) -> Option<String> {
    value
        .get(camel)
        .or_else(|| value.get(pascal))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
