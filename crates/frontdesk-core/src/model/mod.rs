// ── Domain model ──
//
// Canonical types mirroring the backend's resources. Entity ids are
// opaque backend strings; cross-entity references (e.g. a Visit's
// employee) are denormalized copies returned by the backend, never
// resolved client-side.

pub mod billing;
pub mod company;
pub mod employee;
pub mod settings;
pub mod user;
pub mod visitor;

pub use billing::{
    BillingInterval, Discount, Feature, Invoice, InvoiceStatus, PaymentConfirmation,
    PaymentIntent, PricingPlan, SelectedPromotion,
};
pub use company::Company;
pub use employee::Employee;
pub use settings::UserSettings;
pub use user::{Role, Session};
pub use visitor::{Visit, Visitor};

/// Lookup key for items held in a store collection.
pub trait Keyed {
    fn key(&self) -> &str;
}
