// ── Pricing slice ──
//
// Plans, features, and invoices are read-mostly collections; the
// selected plan and the in-flight payment intent are scalars tied to the
// checkout flow.

use tokio::sync::watch;

use super::collection::Collection;
use super::flag::LoadingFlag;
use super::gate::FetchGate;
use crate::model::{Feature, Invoice, PaymentIntent, PricingPlan};

pub struct PricingSlice {
    pub plans: Collection<PricingPlan>,
    pub features: Collection<Feature>,
    pub invoices: Collection<Invoice>,
    selected_plan: watch::Sender<Option<PricingPlan>>,
    payment_intent: watch::Sender<Option<PaymentIntent>>,
    pub fetching_plans: LoadingFlag,
    pub fetching_plan: LoadingFlag,
    pub saving_plan: LoadingFlag,
    pub fetching_features: LoadingFlag,
    pub fetching_invoices: LoadingFlag,
    pub creating_intent: LoadingFlag,
    pub confirming_payment: LoadingFlag,
    pub(crate) plans_gate: FetchGate,
    pub(crate) plan_gate: FetchGate,
    pub(crate) features_gate: FetchGate,
    pub(crate) invoices_gate: FetchGate,
}

impl PricingSlice {
    pub(crate) fn new() -> Self {
        let (selected_plan, _) = watch::channel(None);
        let (payment_intent, _) = watch::channel(None);
        Self {
            plans: Collection::new(),
            features: Collection::new(),
            invoices: Collection::new(),
            selected_plan,
            payment_intent,
            fetching_plans: LoadingFlag::new(),
            fetching_plan: LoadingFlag::new(),
            saving_plan: LoadingFlag::new(),
            fetching_features: LoadingFlag::new(),
            fetching_invoices: LoadingFlag::new(),
            creating_intent: LoadingFlag::new(),
            confirming_payment: LoadingFlag::new(),
            plans_gate: FetchGate::new(),
            plan_gate: FetchGate::new(),
            features_gate: FetchGate::new(),
            invoices_gate: FetchGate::new(),
        }
    }

    /// The plan loaded by the last single-plan fetch.
    pub fn selected_plan(&self) -> Option<PricingPlan> {
        self.selected_plan.borrow().clone()
    }

    pub fn subscribe_selected_plan(&self) -> watch::Receiver<Option<PricingPlan>> {
        self.selected_plan.subscribe()
    }

    /// The in-flight checkout, if a payment intent has been created.
    pub fn payment_intent(&self) -> Option<PaymentIntent> {
        self.payment_intent.borrow().clone()
    }

    pub fn subscribe_payment_intent(&self) -> watch::Receiver<Option<PaymentIntent>> {
        self.payment_intent.subscribe()
    }

    pub(crate) fn set_selected_plan(&self, plan: PricingPlan) {
        self.selected_plan.send_modify(|p| *p = Some(plan));
    }

    pub(crate) fn set_payment_intent(&self, intent: Option<PaymentIntent>) {
        self.payment_intent.send_modify(|p| *p = intent);
    }

    pub(crate) fn clear(&self) {
        self.plans.clear();
        self.features.clear();
        self.invoices.clear();
        self.selected_plan.send_modify(|p| *p = None);
        self.payment_intent.send_modify(|p| *p = None);
    }
}
