// ── Persisted session vault ──
//
// The vault is the single owner of the persisted session layer: the
// user-info blob (session + subscribed plan), the one-time-password
// verification flag, and the selected promotional pricing. No other code
// path touches the cache file; the in-memory store is a derived
// read-through cache hydrated from here at startup only.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{PricingPlan, SelectedPromotion, Session};

/// The persisted user-info blob: session identity plus plan info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedUserInfo {
    pub session: Session,
    #[serde(default)]
    pub plan: Option<PricingPlan>,
}

/// On-disk shape of the session cache.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    user_info: Option<PersistedUserInfo>,
    #[serde(default)]
    otp_verified: bool,
    #[serde(default)]
    selected_promotion: Option<SelectedPromotion>,
}

/// Sole writer of the persisted session layer.
pub struct SessionVault {
    path: PathBuf,
}

impl SessionVault {
    /// Create a vault backed by the given cache file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a vault at the platform-default cache location.
    pub fn at_default_path() -> Result<Self, CoreError> {
        let dirs = ProjectDirs::from("dev", "frontdesk", "frontdesk").ok_or_else(|| {
            CoreError::Cache("cannot resolve a cache directory for this platform".into())
        })?;
        Ok(Self::new(dirs.cache_dir().join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // ── User info ────────────────────────────────────────────────────

    /// Read the persisted user-info blob, if any.
    pub fn user_info(&self) -> Option<PersistedUserInfo> {
        self.read().user_info
    }

    /// Persist the signed-in user, replacing any previous blob.
    pub fn store_user_info(
        &self,
        session: &Session,
        plan: Option<&PricingPlan>,
    ) -> Result<(), CoreError> {
        let mut cache = self.read();
        cache.user_info = Some(PersistedUserInfo {
            session: session.clone(),
            plan: plan.cloned(),
        });
        self.write(&cache)
    }

    /// Remove the persisted user-info blob (sign-out).
    ///
    /// The OTP flag and promotion survive a sign-out: they belong to
    /// flows that span authentication (password reset, pricing page).
    pub fn clear_user_info(&self) -> Result<(), CoreError> {
        let mut cache = self.read();
        if cache.user_info.is_none() {
            return Ok(());
        }
        cache.user_info = None;
        self.write(&cache)
    }

    // ── One-time-password flag ───────────────────────────────────────

    pub fn otp_verified(&self) -> bool {
        self.read().otp_verified
    }

    pub fn set_otp_verified(&self, verified: bool) -> Result<(), CoreError> {
        let mut cache = self.read();
        cache.otp_verified = verified;
        self.write(&cache)
    }

    // ── Selected promotion ───────────────────────────────────────────

    pub fn selected_promotion(&self) -> Option<SelectedPromotion> {
        self.read().selected_promotion
    }

    pub fn set_selected_promotion(
        &self,
        promotion: Option<&SelectedPromotion>,
    ) -> Result<(), CoreError> {
        let mut cache = self.read();
        cache.selected_promotion = promotion.cloned();
        self.write(&cache)
    }

    // ── File handling ────────────────────────────────────────────────

    /// Load the cache file, tolerating absence and corruption.
    ///
    /// A missing file is the normal first-run state; an unreadable one is
    /// treated as empty (the backend session cookie is the real source of
    /// authentication, this cache only skips a re-login roundtrip).
    fn read(&self) -> CacheFile {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return CacheFile::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session cache unreadable");
                return CacheFile::default();
            }
        };
        match serde_json::from_slice(&raw) {
            Ok(cache) => cache,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session cache corrupt, starting empty");
                CacheFile::default()
            }
        }
    }

    fn write(&self, cache: &CacheFile) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CoreError::Cache(format!("cannot create cache dir: {e}")))?;
        }
        let raw = serde_json::to_vec_pretty(cache)
            .map_err(|e| CoreError::Cache(format!("cannot serialize cache: {e}")))?;
        fs::write(&self.path, raw)
            .map_err(|e| CoreError::Cache(format!("cannot write cache: {e}")))?;
        debug!(path = %self.path.display(), "session cache written");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn session() -> Session {
        Session {
            user_id: "u1".into(),
            email: "ada@acme.test".into(),
            first_name: Some("Ada".into()),
            last_name: None,
            role: Role::Admin,
            company_id: Some("c1".into()),
            employee_id: None,
            visitor_id: None,
            mfa_enabled: true,
        }
    }

    fn vault() -> (tempfile::TempDir, SessionVault) {
        let dir = tempfile::tempdir().unwrap();
        let vault = SessionVault::new(dir.path().join("session.json"));
        (dir, vault)
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let (_dir, vault) = vault();
        assert!(vault.user_info().is_none());
        assert!(!vault.otp_verified());
        assert!(vault.selected_promotion().is_none());
    }

    #[test]
    fn user_info_round_trips() {
        let (_dir, vault) = vault();
        vault.store_user_info(&session(), None).unwrap();

        let info = vault.user_info().unwrap();
        assert_eq!(info.session, session());
        assert!(info.plan.is_none());
    }

    #[test]
    fn clear_removes_only_user_info() {
        let (_dir, vault) = vault();
        vault.store_user_info(&session(), None).unwrap();
        vault.set_otp_verified(true).unwrap();

        vault.clear_user_info().unwrap();

        assert!(vault.user_info().is_none());
        assert!(vault.otp_verified());
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let (_dir, vault) = vault();
        fs::write(vault.path(), b"{ not json").unwrap();
        assert!(vault.user_info().is_none());
    }

    #[test]
    fn promotion_round_trips() {
        let (_dir, vault) = vault();
        let promo = SelectedPromotion {
            plan_id: "plan1".into(),
            discount_code: Some("WELCOME10".into()),
        };
        vault.set_selected_promotion(Some(&promo)).unwrap();
        assert_eq!(vault.selected_promotion(), Some(promo));

        vault.set_selected_promotion(None).unwrap();
        assert!(vault.selected_promotion().is_none());
    }
}
