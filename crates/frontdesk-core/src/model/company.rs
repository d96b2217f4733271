// ── Company domain type ──

use serde::{Deserialize, Serialize};

use super::Keyed;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub logo_url: Option<String>,
    /// The plan this company is subscribed to, if any.
    pub plan_id: Option<String>,
}

impl Keyed for Company {
    fn key(&self) -> &str {
        &self.id
    }
}
