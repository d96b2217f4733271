// ── Session and role types ──

use serde::{Deserialize, Serialize};

/// Role tag attached to every authenticated user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
    Visitor,
}

/// The signed-in user's identity.
///
/// Created from the sign-in/sign-up response, replaced wholesale on
/// re-login, cleared on sign-out. Also persisted by the session vault so
/// a restarted client can restore without re-authenticating (the cookie
/// jar still carries the backend session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub company_id: Option<String>,
    pub employee_id: Option<String>,
    pub visitor_id: Option<String>,
    pub mfa_enabled: bool,
}

impl Session {
    /// Display name: "First Last", falling back to the email address.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.email.clone(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
