//! Shared configuration for Frontdesk clients.
//!
//! TOML profiles, credential resolution (env-var indirection preferred
//! over plaintext), and translation to `frontdesk_core::PortalConfig`.
//! The backend base URL is supplied via environment configuration --
//! `FRONTDESK_`-prefixed variables override the config file, which
//! overrides built-in defaults.

use std::collections::HashMap;
use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use frontdesk_core::{Credentials, PortalConfig, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no profile named '{profile}'")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// A named backend profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g. "https://api.frontdesk.dev").
    pub base_url: String,

    /// Sign-in email, if stored.
    pub email: Option<String>,

    /// Sign-in password (plaintext -- prefer `password_env`).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Override for the session cache file path.
    pub session_cache: Option<PathBuf>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "frontdesk", "frontdesk").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("frontdesk");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load a Config from an explicit file path + environment.
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("FRONTDESK_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write to an explicit path.
pub fn save_config_to(cfg: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml)?;
    Ok(())
}

// ── Resolution ──────────────────────────────────────────────────────

impl Config {
    /// Look up a profile by name, falling back to the default profile.
    pub fn profile(&self, name: Option<&str>) -> Result<(&str, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get_key_value(name)
            .map(|(k, p)| (k.as_str(), p))
            .ok_or_else(|| ConfigError::UnknownProfile {
                profile: name.to_owned(),
            })
    }

    /// Resolve a profile into a `PortalConfig` plus optional stored
    /// credentials.
    ///
    /// Password resolution order: `password_env` indirection first, then
    /// the plaintext `password` field. A profile without both yields
    /// `None` credentials -- the caller prompts interactively.
    pub fn resolve(
        &self,
        name: Option<&str>,
    ) -> Result<(PortalConfig, Option<Credentials>), ConfigError> {
        let (_, profile) = self.profile(name)?;

        let base_url =
            Url::parse(&profile.base_url).map_err(|e| ConfigError::Validation {
                field: "base_url".into(),
                reason: e.to_string(),
            })?;

        let insecure = profile.insecure.unwrap_or(self.defaults.insecure);
        let tls = if insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ca) = &profile.ca_cert {
            TlsVerification::CustomCa(ca.clone())
        } else {
            TlsVerification::System
        };

        let config = PortalConfig {
            base_url,
            timeout_secs: profile.timeout.unwrap_or(self.defaults.timeout),
            tls,
            session_cache: profile.session_cache.clone(),
        };

        let credentials = profile.email.as_ref().and_then(|email| {
            resolve_password(profile).map(|password| Credentials {
                email: email.clone(),
                password,
            })
        });

        Ok((config, credentials))
    }
}

fn resolve_password(profile: &Profile) -> Option<SecretString> {
    if let Some(var) = &profile.password_env {
        if let Ok(value) = std::env::var(var) {
            return Some(value.into());
        }
    }
    profile.password.clone().map(SecretString::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn profile(base_url: &str) -> Profile {
        Profile {
            base_url: base_url.into(),
            email: None,
            password: None,
            password_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
            session_cache: None,
        }
    }

    #[test]
    fn resolve_uses_defaults() {
        let mut config = Config::default();
        config
            .profiles
            .insert("default".into(), profile("https://api.frontdesk.dev"));

        let (portal, credentials) = config.resolve(None).unwrap();

        assert_eq!(portal.base_url.as_str(), "https://api.frontdesk.dev/");
        assert_eq!(portal.timeout_secs, 30);
        assert!(credentials.is_none());
    }

    #[test]
    fn resolve_rejects_bad_urls() {
        let mut config = Config::default();
        config.profiles.insert("default".into(), profile("not a url"));

        assert!(matches!(
            config.resolve(None),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let config = Config::default();
        assert!(matches!(
            config.resolve(Some("staging")),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn plaintext_password_resolves_to_credentials() {
        let mut config = Config::default();
        let mut p = profile("https://api.frontdesk.dev");
        p.email = Some("ada@acme.test".into());
        p.password = Some("hunter2!".into());
        config.profiles.insert("default".into(), p);

        let (_, credentials) = config.resolve(None).unwrap();
        assert_eq!(credentials.unwrap().email, "ada@acme.test");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        let mut p = profile("https://api.frontdesk.dev");
        p.timeout = Some(10);
        config.profiles.insert("prod".into(), p);

        save_config_to(&config, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded.profiles["prod"].timeout, Some(10));
        assert_eq!(loaded.profiles["prod"].base_url, "https://api.frontdesk.dev");
    }
}
