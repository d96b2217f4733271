// ── Action API ──
//
// Every backend operation flows through a unified `Action` enum. The
// portal routes each variant to the corresponding endpoint and applies
// the documented snapshot mutation on success. Actions carry the typed
// request bodies defined at the API layer; passwords travel as
// `SecretString` and never appear in serialized form.

use secrecy::SecretString;
use tokio::sync::oneshot;

use crate::error::CoreError;
use crate::model::{
    Company, Employee, PaymentConfirmation, PaymentIntent, PricingPlan, Session, UserSettings,
    Visitor,
};

pub use frontdesk_api::models::{
    ConfirmPaymentRequest, CreateEmployeeRequest, CreatePaymentIntentRequest, CreatePlanRequest,
    CreateVisitorRequest, FeatureType, SignUpRequest, UpdateCompanyRequest, UpdatePlanRequest,
    UpdateSettingsRequest,
};

/// An action envelope sent through the dispatch channel.
/// Contains the action, its fetch ticket (if any), and a oneshot
/// response channel.
pub(crate) struct ActionEnvelope {
    pub action: Action,
    /// Staleness ticket issued at dispatch time for fetch actions.
    pub ticket: Option<u64>,
    pub response_tx: oneshot::Sender<Result<ActionOutcome, CoreError>>,
}

/// All operations against the Frontdesk backend.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Credentials ──────────────────────────────────────────────────
    SignUp {
        request: SignUpRequest,
        password: SecretString,
    },
    SignIn {
        email: String,
        password: SecretString,
    },
    SignOut,
    ChangePassword {
        current: SecretString,
        new: SecretString,
    },
    ForgotPassword {
        email: String,
    },
    VerifyResetToken {
        email: String,
        token: String,
    },
    SetNewPassword {
        email: String,
        token: String,
        password: SecretString,
    },

    // ── Company ──────────────────────────────────────────────────────
    FetchCompany,
    UpdateCompany(UpdateCompanyRequest),

    // ── Employees ────────────────────────────────────────────────────
    FetchEmployees,
    CreateEmployee(CreateEmployeeRequest),

    // ── Visitors / visits ────────────────────────────────────────────
    FetchVisitors {
        filter: Option<String>,
    },
    CreateVisitor(CreateVisitorRequest),
    FetchVisits {
        visitor_id: String,
    },
    CheckInVisit {
        visit_id: String,
    },
    CheckOutVisit {
        visit_id: String,
    },

    // ── Pricing / billing ────────────────────────────────────────────
    FetchPlans,
    FetchPlan {
        id: String,
    },
    CreatePlan(CreatePlanRequest),
    UpdatePlan {
        id: String,
        update: UpdatePlanRequest,
    },
    FetchFeatures {
        tier: FeatureType,
    },
    FetchInvoices,
    CreatePaymentIntent(CreatePaymentIntentRequest),
    ConfirmPayment(ConfirmPaymentRequest),

    // ── Settings ─────────────────────────────────────────────────────
    FetchSettings,
    UpdateSettings(UpdateSettingsRequest),
}

/// Result of an action execution.
///
/// Fetches return `Ok` -- their payload lands in the store, which is the
/// only place consumers should read it from. Creates return the created
/// entity for immediate UI feedback.
#[derive(Debug)]
pub enum ActionOutcome {
    Ok,
    Session(Session),
    Company(Company),
    Employee(Employee),
    Visitor(Visitor),
    Plan(PricingPlan),
    PaymentIntent(PaymentIntent),
    PaymentConfirmation(PaymentConfirmation),
    Settings(UserSettings),
}
