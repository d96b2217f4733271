// ── API-to-domain type conversions ──
//
// Bridges raw `frontdesk_api` wire types into canonical domain types.
// Each `From` impl normalizes field names, parses strings into strong
// types, and fills sensible defaults for missing optional data. Parsing
// is tolerant: an unparseable timestamp or enum tag degrades to `None`
// (or a fallback variant) rather than failing the whole conversion.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use frontdesk_api::models::{
    CompanyPayload, DiscountPayload, EmployeePayload, FeaturePayload, InvoicePayload,
    PaymentConfirmationPayload, PaymentIntentPayload, PlanPayload, SettingsPayload, UserPayload,
    VisitPayload, VisitorPayload,
};

use crate::model::{
    BillingInterval, Company, Discount, Employee, Feature, Invoice, InvoiceStatus,
    PaymentConfirmation, PaymentIntent, PricingPlan, Role, Session, UserSettings, Visit, Visitor,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse an ISO-8601 datetime string, silently dropping unparseable values.
fn parse_datetime(raw: Option<&String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Map the backend's role tag to a `Role`.
///
/// Unknown tags degrade to `Visitor`, the least-privileged role.
fn parse_role(raw: Option<&String>) -> Role {
    raw.and_then(|s| Role::from_str(s).ok()).unwrap_or(Role::Visitor)
}

// ── Users ──────────────────────────────────────────────────────────

impl From<UserPayload> for Session {
    fn from(raw: UserPayload) -> Self {
        let role = parse_role(raw.role.as_ref());
        Self {
            user_id: raw.id,
            email: raw.email,
            first_name: raw.first_name,
            last_name: raw.last_name,
            role,
            company_id: raw.company_id,
            employee_id: raw.employee_id,
            visitor_id: raw.visitor_id,
            mfa_enabled: raw.is_mfa_enabled,
        }
    }
}

// ── Company ────────────────────────────────────────────────────────

impl From<CompanyPayload> for Company {
    fn from(raw: CompanyPayload) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            email: raw.email,
            phone: raw.phone,
            address: raw.address,
            logo_url: raw.logo_url,
            plan_id: raw.plan_id,
        }
    }
}

// ── Employee ───────────────────────────────────────────────────────

impl From<EmployeePayload> for Employee {
    fn from(raw: EmployeePayload) -> Self {
        Self {
            id: raw.id,
            email: raw.email,
            first_name: raw.first_name,
            last_name: raw.last_name,
            phone: raw.phone,
            department: raw.department,
            designation: raw.designation,
            company_id: raw.company_id,
            on_shift: raw.on_shift,
        }
    }
}

// ── Visitor / Visit ────────────────────────────────────────────────

impl From<VisitorPayload> for Visitor {
    fn from(raw: VisitorPayload) -> Self {
        let created_at = parse_datetime(raw.created_at.as_ref());
        Self {
            id: raw.id,
            email: raw.email,
            first_name: raw.first_name,
            last_name: raw.last_name,
            phone: raw.phone,
            company_name: raw.company_name,
            purpose: raw.purpose,
            host_employee_id: raw.host_employee_id,
            created_at,
        }
    }
}

impl From<VisitPayload> for Visit {
    fn from(raw: VisitPayload) -> Self {
        let check_in = parse_datetime(raw.check_in.as_ref());
        let check_out = parse_datetime(raw.check_out.as_ref());
        Self {
            id: raw.id,
            visitor_id: raw.visitor_id,
            employee: raw.employee.map(Employee::from),
            purpose: raw.purpose,
            check_in,
            check_out,
        }
    }
}

// ── Billing ────────────────────────────────────────────────────────

impl From<DiscountPayload> for Discount {
    fn from(raw: DiscountPayload) -> Self {
        let valid_until = parse_datetime(raw.valid_until.as_ref());
        Self {
            code: raw.code,
            percent_off: raw.percent_off,
            valid_until,
        }
    }
}

impl From<PlanPayload> for PricingPlan {
    fn from(raw: PlanPayload) -> Self {
        let interval = raw
            .interval
            .as_deref()
            .and_then(|s| BillingInterval::from_str(s).ok());
        Self {
            id: raw.id,
            name: raw.name,
            price: raw.price,
            currency: raw.currency,
            interval,
            features: raw.features,
            discount: raw.discount.map(Discount::from),
            active: raw.is_active.unwrap_or(true),
        }
    }
}

impl From<FeaturePayload> for Feature {
    fn from(raw: FeaturePayload) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            tier: raw.feature_type,
            description: raw.description,
        }
    }
}

impl From<InvoicePayload> for Invoice {
    fn from(raw: InvoicePayload) -> Self {
        let status = InvoiceStatus::parse(raw.status.as_deref());
        let created_at = parse_datetime(raw.created_at.as_ref());
        Self {
            id: raw.id,
            number: raw.number,
            amount: raw.amount,
            currency: raw.currency,
            status,
            plan_id: raw.plan_id,
            created_at,
        }
    }
}

impl From<PaymentIntentPayload> for PaymentIntent {
    fn from(raw: PaymentIntentPayload) -> Self {
        Self {
            id: raw.id,
            client_secret: raw.client_secret,
            amount: raw.amount,
            currency: raw.currency,
            status: raw.status,
        }
    }
}

impl From<PaymentConfirmationPayload> for PaymentConfirmation {
    fn from(raw: PaymentConfirmationPayload) -> Self {
        Self {
            subscription_id: raw.subscription_id,
            status: raw.status,
            invoice_id: raw.invoice_id,
        }
    }
}

// ── Settings ───────────────────────────────────────────────────────

impl From<SettingsPayload> for UserSettings {
    fn from(raw: SettingsPayload) -> Self {
        Self {
            mfa_enabled: raw.is_mfa_enabled,
            notify_on_check_in: raw.notify_on_check_in.unwrap_or(false),
            theme: raw.theme,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn role_falls_back_to_visitor() {
        assert_eq!(parse_role(Some(&"admin".to_owned())), Role::Admin);
        assert_eq!(parse_role(Some(&"superuser".to_owned())), Role::Visitor);
        assert_eq!(parse_role(None), Role::Visitor);
    }

    #[test]
    fn datetime_parsing_is_tolerant() {
        assert!(parse_datetime(Some(&"2026-02-10T09:00:00Z".to_owned())).is_some());
        assert!(parse_datetime(Some(&"yesterday".to_owned())).is_none());
        assert!(parse_datetime(None).is_none());
    }

    #[test]
    fn visit_conversion_parses_timestamps() {
        let raw = VisitPayload {
            id: "visit1".into(),
            visitor_id: "v1".into(),
            employee: None,
            purpose: Some("interview".into()),
            check_in: Some("2026-02-10T09:00:00Z".into()),
            check_out: None,
            extra: serde_json::Map::new(),
        };
        let visit = Visit::from(raw);
        assert!(visit.check_in.is_some());
        assert!(visit.is_open());
    }
}
