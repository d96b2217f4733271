// ── User settings domain type ──

use serde::{Deserialize, Serialize};

/// Per-user preferences, including the MFA toggle.
///
/// MFA codes themselves are opaque values relayed to the backend; the
/// client only tracks whether the factor is enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub mfa_enabled: bool,
    pub notify_on_check_in: bool,
    pub theme: Option<String>,
}
