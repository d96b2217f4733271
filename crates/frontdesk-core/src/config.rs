// ── Portal configuration ──

use std::path::PathBuf;

use secrecy::SecretString;
use url::Url;

/// TLS verification mode (core-level mirror of the api crate's TlsMode).
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// Use the system certificate store.
    #[default]
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (for local/staging backends).
    DangerAcceptInvalid,
}

/// Stored sign-in credentials resolved from configuration.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

/// Everything a `Portal` needs to talk to one backend.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Backend base URL, supplied via environment configuration.
    pub base_url: Url,
    pub timeout_secs: u64,
    pub tls: TlsVerification,
    /// Override for the session cache file; `None` uses the platform
    /// default location.
    pub session_cache: Option<PathBuf>,
}

impl PortalConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout_secs: 30,
            tls: TlsVerification::System,
            session_cache: None,
        }
    }
}
