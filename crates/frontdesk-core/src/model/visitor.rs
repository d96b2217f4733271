// ── Visitor and visit domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Employee, Keyed};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visitor {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    /// The visitor's own company, free text.
    pub company_name: Option<String>,
    pub purpose: Option<String>,
    pub host_employee_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Keyed for Visitor {
    fn key(&self) -> &str {
        &self.id
    }
}

/// One visit of a visitor.
///
/// `employee` is the denormalized host copy the backend attaches; it is
/// not resolved against the employee collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub id: String,
    pub visitor_id: String,
    pub employee: Option<Employee>,
    pub purpose: Option<String>,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
}

impl Visit {
    /// A visit is open when it has been checked in but not out.
    pub fn is_open(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_none()
    }
}

impl Keyed for Visit {
    fn key(&self) -> &str {
        &self.id
    }
}
