use crate::types::request::{Method, RequestDescriptor};
use crate::{Error, Result};
use std::time::Duration;

/// Default per-call deadline. Override via the builder or
/// `FRONTDESK_HTTP_TIMEOUT_MS`.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Raw result of one exchange: status plus unparsed body. Envelope
/// normalization happens above this layer.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Thin wrapper over a pooled `reqwest::Client` bound to one base URL.
///
/// The deadline covers the whole exchange; an elapsed deadline aborts the
/// in-flight call and surfaces as [`Error::Timeout`]. A late response from
/// an aborted call is discarded by the pool, never delivered.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Network)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform one exchange described by `descriptor`.
    ///
    /// `Content-Type: application/json` and `Accept: application/json` are
    /// always attached; GET and DELETE never carry a body (the descriptor
    /// constructors already enforce this, the match below is the backstop).
    pub async fn execute(
        &self,
        descriptor: &RequestDescriptor,
        bearer: Option<&str>,
        request_id: &str,
    ) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, descriptor.path);

        let mut req = match descriptor.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        req = req
            .header("content-type", "application/json")
            .header("accept", "application/json")
            .header("x-request-id", request_id);

        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }

        if descriptor.method.allows_body() {
            if let Some(body) = &descriptor.body {
                req = req.json(body);
            }
        }

        let resp = req.send().await.map_err(Error::from_reqwest)?;
        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(Error::from_reqwest)?
            .to_vec();

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let transport =
            HttpTransport::new("https://pms.example.com/api/", Duration::from_secs(30)).unwrap();
        assert_eq!(transport.base_url(), "https://pms.example.com/api");
    }

    #[test]
    fn success_range_is_2xx() {
        let ok = RawResponse {
            status: 204,
            body: Vec::new(),
        };
        assert!(ok.is_success());
        let redirect = RawResponse {
            status: 301,
            body: Vec::new(),
        };
        assert!(!redirect.is_success());
    }
}
