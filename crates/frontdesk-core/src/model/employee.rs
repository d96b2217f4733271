// ── Employee domain type ──

use serde::{Deserialize, Serialize};

use super::Keyed;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub company_id: Option<String>,
    /// Whether the employee is currently on shift, when the backend
    /// reports it.
    pub on_shift: Option<bool>,
}

impl Employee {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.email.clone(),
        }
    }
}

impl Keyed for Employee {
    fn key(&self) -> &str {
        &self.id
    }
}
