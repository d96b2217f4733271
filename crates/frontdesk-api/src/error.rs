use thiserror::Error;

/// Fallback shown when the backend gives us nothing usable.
///
/// Matches the product's notification copy — any failure that carries no
/// server-supplied `message` field surfaces as this string.
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

/// Top-level error type for the `frontdesk-api` crate.
///
/// Covers every failure mode at the HTTP boundary: authentication,
/// transport, API-reported errors, and response decoding. `frontdesk-core`
/// maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Sign-in failed or the session cookie has expired.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Error reported by the backend, either as a non-2xx status with a
    /// `{message}` body or as an `isError: true` envelope inside HTTP 200.
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// Response body matched neither the envelope nor a bare payload.
    #[error("Decode error: {message}")]
    Decode { message: String, body: String },
}

impl Error {
    /// The single string surfaced to the user for this failure.
    ///
    /// Server-supplied messages pass through verbatim; everything else
    /// (transport faults, decode failures, TLS trouble) collapses to the
    /// generic [`FALLBACK_MESSAGE`].
    pub fn user_message(&self) -> &str {
        match self {
            Self::Authentication { message } | Self::Api { message, .. } => {
                if message.is_empty() {
                    FALLBACK_MESSAGE
                } else {
                    message
                }
            }
            _ => FALLBACK_MESSAGE,
        }
    }

    /// Returns `true` if this error means the session is gone and the
    /// caller should re-authenticate.
    pub fn is_auth_expired(&self) -> bool {
        match self {
            Self::Authentication { .. } => true,
            Self::Api { status, .. } => *status == Some(401),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status, .. } => *status == Some(404),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_passes_through() {
        let err = Error::Api {
            message: "Email already registered".into(),
            status: Some(409),
        };
        assert_eq!(err.user_message(), "Email already registered");
    }

    #[test]
    fn transport_errors_collapse_to_fallback() {
        let err = Error::Tls("handshake failed".into());
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn empty_server_message_falls_back() {
        let err = Error::Api {
            message: String::new(),
            status: Some(500),
        };
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    }
}
