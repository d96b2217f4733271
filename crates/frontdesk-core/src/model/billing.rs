// ── Pricing and billing domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Keyed;

/// Billing interval of a plan.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BillingInterval {
    Month,
    Year,
}

/// Promotional discount attached to a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub code: Option<String>,
    pub percent_off: Option<f64>,
    pub valid_until: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPlan {
    pub id: String,
    pub name: String,
    /// Price in the smallest currency unit (e.g. cents).
    pub price: Option<i64>,
    pub currency: Option<String>,
    pub interval: Option<BillingInterval>,
    pub features: Vec<String>,
    pub discount: Option<Discount>,
    pub active: bool,
}

impl Keyed for PricingPlan {
    fn key(&self) -> &str {
        &self.id
    }
}

/// A feature row from the pricing page, scoped to a plan tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub name: String,
    pub tier: Option<String>,
    pub description: Option<String>,
}

impl Keyed for Feature {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Invoice lifecycle state as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum InvoiceStatus {
    Paid,
    Open,
    Void,
    Unknown,
}

impl InvoiceStatus {
    pub(crate) fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("paid") => Self::Paid,
            Some("open") => Self::Open,
            Some("void") => Self::Void,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub number: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub status: InvoiceStatus,
    pub plan_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Keyed for Invoice {
    fn key(&self) -> &str {
        &self.id
    }
}

/// An in-flight checkout created by `/subscription/create-payment-intent`.
///
/// `client_secret` is an opaque value handed to the payment widget; the
/// client never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<String>,
}

/// Result of `/subscription/confirm-payment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub subscription_id: Option<String>,
    pub status: Option<String>,
    pub invoice_id: Option<String>,
}

/// The promotional pricing the user picked on the pricing page.
///
/// Persisted by the session vault so a restarted checkout can resume with
/// the same promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPromotion {
    pub plan_id: String,
    pub discount_code: Option<String>,
}
