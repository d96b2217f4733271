// Frontdesk HTTP client
//
// Wraps `reqwest::Client` with base-URL construction and envelope
// unwrapping. All endpoint modules (users, visitors, etc.) are implemented
// as inherent methods via separate files to keep this module focused on
// transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, FALLBACK_MESSAGE};
use crate::models::{Envelope, ErrorBody};
use crate::transport::TransportConfig;

/// Raw HTTP client for the Frontdesk backend.
///
/// Handles the `{ data, message, isError, responseCode }` envelope and
/// credential inclusion via a shared cookie jar. All methods return
/// unwrapped payloads -- the envelope is stripped before the caller sees
/// it. The backend is inconsistent about wrapping (some endpoints return
/// the payload bare), so unwrapping is defensive: envelope first, bare
/// shape second.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from a base URL and transport config.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Use this when you already have a client with a session cookie in
    /// its jar (e.g. in tests).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}")).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the payload.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        Self::parse_payload(resp).await
    }

    /// Send a GET request with query parameters and unwrap the payload.
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("GET {} (query: {:?})", url, query);

        let resp = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_payload(resp).await
    }

    /// Send a POST request with JSON body and unwrap the payload.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_payload(resp).await
    }

    /// Send a PUT request with JSON body and unwrap the payload.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("PUT {}", url);

        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_payload(resp).await
    }

    /// Send a PATCH request with JSON body and unwrap the payload.
    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("PATCH {}", url);

        let resp = self
            .http
            .patch(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_payload(resp).await
    }

    /// Send a DELETE request and unwrap the payload.
    #[allow(dead_code)]
    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("DELETE {}", url);

        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_payload(resp).await
    }

    // ── Response parsing ─────────────────────────────────────────────

    /// Unwrap a response into `T`.
    ///
    /// Non-2xx statuses become [`Error::Api`] carrying the body's
    /// `message` field when present, the fixed fallback otherwise; 401 is
    /// promoted to [`Error::Authentication`]. For 2xx bodies the envelope
    /// shape is tried first (`isError: true` inside HTTP 200 is still an
    /// error), then the bare payload shape.
    async fn parse_payload<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: extract_error_message(&body)
                    .unwrap_or_else(|| "session expired or invalid credentials".into()),
            });
        }

        if !status.is_success() {
            return Err(Error::Api {
                message: extract_error_message(&body)
                    .unwrap_or_else(|| FALLBACK_MESSAGE.to_owned()),
                status: Some(status.as_u16()),
            });
        }

        // Envelope first. Some endpoints skip the wrapper entirely, so a
        // parse failure here is not fatal.
        match serde_json::from_str::<Envelope<T>>(&body) {
            Ok(envelope) => {
                if envelope.is_error {
                    return Err(Error::Api {
                        message: envelope
                            .message
                            .filter(|m| !m.is_empty())
                            .unwrap_or_else(|| FALLBACK_MESSAGE.to_owned()),
                        status: envelope.response_code,
                    });
                }
                trace!("unwrapped envelope response");
                Ok(envelope.data)
            }
            Err(envelope_err) => {
                // Bare payload fallback.
                serde_json::from_str::<T>(&body).map_err(|bare_err| {
                    let preview = &body[..body.len().min(200)];
                    Error::Decode {
                        message: format!(
                            "envelope: {envelope_err}; bare: {bare_err} (body preview: {preview:?})"
                        ),
                        body: body.clone(),
                    }
                })
            }
        }
    }
}

/// Pull the `message` field out of an error body, if there is one.
fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn api_url_joins_cleanly() {
        let client = ApiClient::with_client(
            reqwest::Client::new(),
            Url::parse("https://api.frontdesk.dev/v1/").unwrap(),
        );
        let url = client.api_url("/users/signin").unwrap();
        assert_eq!(url.as_str(), "https://api.frontdesk.dev/v1/users/signin");
    }

    #[test]
    fn error_message_extraction() {
        assert_eq!(
            extract_error_message(r#"{"message":"Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(extract_error_message(r#"{"message":""}"#), None);
        assert_eq!(extract_error_message("not json"), None);
        assert_eq!(extract_error_message(r#"{"error":"nope"}"#), None);
    }
}
