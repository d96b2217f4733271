// ── Core error types ──
//
// User-facing errors from frontdesk-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<frontdesk_api::Error>` impl translates transport-layer
// errors into domain-appropriate variants.

use thiserror::Error;

pub use frontdesk_api::FALLBACK_MESSAGE;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    // ── Operation errors ─────────────────────────────────────────────
    /// Error reported by the backend, carrying its message verbatim.
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    /// The action channel is gone (portal dropped or never opened).
    #[error("Portal closed")]
    PortalClosed,

    // ── Persistence errors ───────────────────────────────────────────
    #[error("Session cache error: {0}")]
    Cache(String),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The single string surfaced to the user for this failure:
    /// the server-supplied message where one exists, the fixed fallback
    /// everywhere else.
    pub fn user_message(&self) -> &str {
        match self {
            Self::AuthenticationFailed { message } | Self::Api { message, .. } => {
                if message.is_empty() {
                    FALLBACK_MESSAGE
                } else {
                    message
                }
            }
            _ => FALLBACK_MESSAGE,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<frontdesk_api::Error> for CoreError {
    fn from(err: frontdesk_api::Error) -> Self {
        match err {
            frontdesk_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            frontdesk_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: String::new(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            frontdesk_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            frontdesk_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            frontdesk_api::Error::Api { message, status } => CoreError::Api { message, status },
            frontdesk_api::Error::Decode { message, body: _ } => {
                CoreError::Internal(format!("Decode error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_messages_pass_through() {
        let err = CoreError::Api {
            message: "Visit already checked out".into(),
            status: Some(409),
        };
        assert_eq!(err.user_message(), "Visit already checked out");
    }

    #[test]
    fn everything_else_gets_the_fallback() {
        assert_eq!(CoreError::Timeout.user_message(), FALLBACK_MESSAGE);
        assert_eq!(
            CoreError::Cache("disk full".into()).user_message(),
            FALLBACK_MESSAGE
        );
    }
}
