// ── Central reactive state store ──
//
// One slice per backend domain, composed into a single observable root.
// Reads are wait-free snapshot clones; mutations notify subscribers via
// `watch` channels. There are no locks and no transactions: whichever
// async completion arrives mutates its slice, with staleness guarded per
// fetch field by `FetchGate`.

mod auth;
mod collection;
mod company;
mod employee;
mod flag;
mod gate;
mod pricing;
mod settings;
mod visitor;

use std::sync::Arc;

pub use auth::AuthSlice;
pub use collection::Collection;
pub use company::CompanySlice;
pub use employee::EmployeeSlice;
pub use flag::LoadingFlag;
pub use gate::FetchGate;
pub use pricing::PricingSlice;
pub use settings::SettingsSlice;
pub use visitor::VisitorSlice;

use crate::model::{Employee, Feature, Invoice, PricingPlan, Visit, Visitor};
use crate::stream::SnapshotStream;

/// The composed client state store.
///
/// Empty at initialization, populated by the first successful fetch of
/// each field, patched in place by mutation actions, and reset only by
/// explicit sign-out (or by dropping the whole store).
pub struct StateStore {
    pub auth: AuthSlice,
    pub company: CompanySlice,
    pub employee: EmployeeSlice,
    pub visitor: VisitorSlice,
    pub pricing: PricingSlice,
    pub settings: SettingsSlice,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            auth: AuthSlice::new(),
            company: CompanySlice::new(),
            employee: EmployeeSlice::new(),
            visitor: VisitorSlice::new(),
            pricing: PricingSlice::new(),
            settings: SettingsSlice::new(),
        }
    }

    /// Reset every slice to its initial empty state.
    ///
    /// Sign-out runs this; it is the only whole-store reset short of
    /// dropping the store.
    pub(crate) fn reset(&self) {
        self.auth.clear_session();
        self.company.clear();
        self.employee.clear();
        self.visitor.clear();
        self.pricing.clear();
        self.settings.clear();
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn visitors_snapshot(&self) -> Arc<Vec<Arc<Visitor>>> {
        self.visitor.visitors.snapshot()
    }

    pub fn visits_snapshot(&self) -> Arc<Vec<Arc<Visit>>> {
        self.visitor.visits.snapshot()
    }

    pub fn employees_snapshot(&self) -> Arc<Vec<Arc<Employee>>> {
        self.employee.employees.snapshot()
    }

    pub fn plans_snapshot(&self) -> Arc<Vec<Arc<PricingPlan>>> {
        self.pricing.plans.snapshot()
    }

    pub fn features_snapshot(&self) -> Arc<Vec<Arc<Feature>>> {
        self.pricing.features.snapshot()
    }

    pub fn invoices_snapshot(&self) -> Arc<Vec<Arc<Invoice>>> {
        self.pricing.invoices.snapshot()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_visitors(&self) -> SnapshotStream<Visitor> {
        SnapshotStream::new(self.visitor.visitors.subscribe())
    }

    pub fn subscribe_visits(&self) -> SnapshotStream<Visit> {
        SnapshotStream::new(self.visitor.visits.subscribe())
    }

    pub fn subscribe_employees(&self) -> SnapshotStream<Employee> {
        SnapshotStream::new(self.employee.employees.subscribe())
    }

    pub fn subscribe_plans(&self) -> SnapshotStream<PricingPlan> {
        SnapshotStream::new(self.pricing.plans.subscribe())
    }

    pub fn subscribe_invoices(&self) -> SnapshotStream<Invoice> {
        SnapshotStream::new(self.pricing.invoices.subscribe())
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, Session};

    fn session() -> Session {
        Session {
            user_id: "u1".into(),
            email: "ada@acme.test".into(),
            first_name: None,
            last_name: None,
            role: Role::Admin,
            company_id: None,
            employee_id: None,
            visitor_id: None,
            mfa_enabled: false,
        }
    }

    #[test]
    fn starts_empty_and_unauthenticated() {
        let store = StateStore::new();
        assert!(!store.auth.is_authenticated());
        assert!(store.visitors_snapshot().is_empty());
        assert!(store.employees_snapshot().is_empty());
        assert!(store.company.company().is_none());
    }

    #[test]
    fn reset_clears_every_slice() {
        let store = StateStore::new();
        store.auth.set_session(session());
        store.visitor.visitors.append(crate::model::Visitor {
            id: "v1".into(),
            email: "g@x.test".into(),
            first_name: None,
            last_name: None,
            phone: None,
            company_name: None,
            purpose: None,
            host_employee_id: None,
            created_at: None,
        });

        store.reset();

        assert!(!store.auth.is_authenticated());
        assert!(store.visitors_snapshot().is_empty());
    }
}
