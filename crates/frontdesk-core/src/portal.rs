// ── Portal facade ──
//
// Full lifecycle management for a Frontdesk backend connection: session
// restore, action dispatch, and snapshot access. UI consumers hold a
// cloned Portal, dispatch actions, and read the store reactively.
//
// Dispatches are concurrent: the processor task spawns one task per
// action envelope, so the caller stays responsive and may dispatch
// further actions while one is outstanding. There is no retry and no
// cancellation -- every failure is terminal for that action and must be
// re-dispatched by the user.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, mpsc, oneshot};
use tracing::{debug, info, warn};

use frontdesk_api::ApiClient;
use frontdesk_api::transport::{TlsMode, TransportConfig};

use crate::action::{Action, ActionEnvelope, ActionOutcome};
use crate::config::{PortalConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{
    Company, Employee, Feature, Invoice, PaymentConfirmation, PaymentIntent, PricingPlan,
    SelectedPromotion, Session, UserSettings, Visit, Visitor,
};
use crate::session::SessionVault;
use crate::store::{FetchGate, StateStore};

const ACTION_CHANNEL_SIZE: usize = 64;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc`. Owns the API client, the state store,
/// and the session vault; routes every backend operation through the
/// action channel.
#[derive(Clone)]
pub struct Portal {
    inner: Arc<PortalInner>,
}

struct PortalInner {
    config: PortalConfig,
    api: Arc<ApiClient>,
    store: Arc<StateStore>,
    vault: Arc<SessionVault>,
    action_tx: mpsc::Sender<ActionEnvelope>,
    action_rx: Mutex<Option<mpsc::Receiver<ActionEnvelope>>>,
    opened: AtomicBool,
}

impl Portal {
    /// Create a new Portal from configuration. Does NOT touch the network
    /// or the session cache -- call [`open()`](Self::open) to hydrate the
    /// store and start the action processor.
    pub fn new(config: PortalConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let api = ApiClient::new(config.base_url.clone(), &transport)?;

        let vault = match &config.session_cache {
            Some(path) => SessionVault::new(path.clone()),
            None => SessionVault::at_default_path()?,
        };

        let (action_tx, action_rx) = mpsc::channel(ACTION_CHANNEL_SIZE);

        Ok(Self {
            inner: Arc::new(PortalInner {
                config,
                api: Arc::new(api),
                store: Arc::new(StateStore::new()),
                vault: Arc::new(vault),
                action_tx,
                action_rx: Mutex::new(Some(action_rx)),
                opened: AtomicBool::new(false),
            }),
        })
    }

    /// Access the portal configuration.
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    /// Access the underlying state store.
    pub fn store(&self) -> &StateStore {
        &self.inner.store
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Hydrate the store from the session vault and start the action
    /// processor.
    ///
    /// Hydration happens here and nowhere else: the vault owns the
    /// persisted session layer, the store is a derived cache of it. With
    /// no persisted user info the store comes up unauthenticated.
    pub async fn open(&self) -> Result<(), CoreError> {
        if let Some(info) = self.inner.vault.user_info() {
            debug!(email = %info.session.email, "restoring persisted session");
            self.inner.store.auth.set_session(info.session);
            if let Some(plan) = info.plan {
                self.inner.store.pricing.set_selected_plan(plan);
            }
        }

        let Some(rx) = self.inner.action_rx.lock().await.take() else {
            debug!("portal already open");
            return Ok(());
        };

        let api = Arc::clone(&self.inner.api);
        let store = Arc::clone(&self.inner.store);
        let vault = Arc::clone(&self.inner.vault);
        tokio::spawn(processor_task(api, store, vault, rx));

        self.inner.opened.store(true, Ordering::SeqCst);
        info!("portal open");
        Ok(())
    }

    // ── Action dispatch ──────────────────────────────────────────────

    /// Dispatch an action and await its outcome.
    ///
    /// The owning loading flag is set the moment this is called -- before
    /// the HTTP request starts -- and cleared when the action settles,
    /// fulfilled or rejected. Fetch actions are also issued their
    /// staleness ticket here, in dispatch order.
    pub async fn dispatch(&self, action: Action) -> Result<ActionOutcome, CoreError> {
        if !self.inner.opened.load(Ordering::SeqCst) {
            return Err(CoreError::PortalClosed);
        }

        let ticket = begin_action(&self.inner.store, &action);
        let (tx, rx) = oneshot::channel();

        let envelope = ActionEnvelope {
            action,
            ticket,
            response_tx: tx,
        };

        if let Err(send_err) = self.inner.action_tx.send(envelope).await {
            end_action(&self.inner.store, &send_err.0.action);
            return Err(CoreError::PortalClosed);
        }

        rx.await.map_err(|_| CoreError::PortalClosed)?
    }

    // ── Session observation ──────────────────────────────────────────

    /// The current session, if signed in.
    pub fn session(&self) -> Option<Session> {
        self.inner.store.auth.session()
    }

    /// Whether the password-reset one-time token has been verified.
    pub fn otp_verified(&self) -> bool {
        self.inner.vault.otp_verified()
    }

    /// The promotional pricing selected during checkout, if any.
    pub fn selected_promotion(&self) -> Option<SelectedPromotion> {
        self.inner.vault.selected_promotion()
    }

    // ── Snapshot accessors (delegate to StateStore) ──────────────────

    pub fn visitors_snapshot(&self) -> Arc<Vec<Arc<Visitor>>> {
        self.inner.store.visitors_snapshot()
    }

    pub fn visits_snapshot(&self) -> Arc<Vec<Arc<Visit>>> {
        self.inner.store.visits_snapshot()
    }

    pub fn employees_snapshot(&self) -> Arc<Vec<Arc<Employee>>> {
        self.inner.store.employees_snapshot()
    }

    pub fn plans_snapshot(&self) -> Arc<Vec<Arc<PricingPlan>>> {
        self.inner.store.plans_snapshot()
    }

    pub fn features_snapshot(&self) -> Arc<Vec<Arc<Feature>>> {
        self.inner.store.features_snapshot()
    }

    pub fn invoices_snapshot(&self) -> Arc<Vec<Arc<Invoice>>> {
        self.inner.store.invoices_snapshot()
    }

    pub fn company(&self) -> Option<Company> {
        self.inner.store.company.company()
    }

    pub fn settings(&self) -> Option<UserSettings> {
        self.inner.store.settings.settings()
    }

    pub fn payment_intent(&self) -> Option<PaymentIntent> {
        self.inner.store.pricing.payment_intent()
    }
}

// ── Transport ────────────────────────────────────────────────────────

fn build_transport(config: &PortalConfig) -> TransportConfig {
    TransportConfig {
        tls: match &config.tls {
            TlsVerification::System => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        },
        timeout: Duration::from_secs(config.timeout_secs),
    }
}

// ── Processor ────────────────────────────────────────────────────────

/// Drains the action channel, spawning one task per envelope so that
/// concurrent dispatches proceed independently. Ends when the last
/// Portal clone (and with it the sender) is dropped.
async fn processor_task(
    api: Arc<ApiClient>,
    store: Arc<StateStore>,
    vault: Arc<SessionVault>,
    mut rx: mpsc::Receiver<ActionEnvelope>,
) {
    while let Some(envelope) = rx.recv().await {
        let api = Arc::clone(&api);
        let store = Arc::clone(&store);
        let vault = Arc::clone(&vault);
        tokio::spawn(async move {
            let ActionEnvelope {
                action,
                ticket,
                response_tx,
            } = envelope;

            let result = handle_action(&api, &store, &vault, &action, ticket).await;
            end_action(&store, &action);

            // Receiver gone means the dispatcher stopped waiting; the
            // store mutation above already happened, which matches the
            // fire-and-forget behavior of an unmounted view.
            let _ = response_tx.send(result);
        });
    }
    debug!("action processor stopped");
}

/// Set the owning loading flag and issue a staleness ticket where the
/// action is a tracked fetch.
fn begin_action(store: &StateStore, action: &Action) -> Option<u64> {
    match action {
        Action::SignIn { .. } => store.auth.signing_in.set(true),
        Action::SignUp { .. } => store.auth.signing_up.set(true),
        Action::ChangePassword { .. } => store.auth.changing_password.set(true),
        Action::ForgotPassword { .. } => store.auth.requesting_reset.set(true),
        Action::VerifyResetToken { .. } => store.auth.verifying_token.set(true),
        Action::SetNewPassword { .. } => store.auth.setting_password.set(true),
        Action::SignOut => {}
        Action::FetchCompany => {
            store.company.fetching.set(true);
            return Some(store.company.fetch_gate.begin());
        }
        Action::UpdateCompany(_) => store.company.saving.set(true),
        Action::FetchEmployees => {
            store.employee.fetching.set(true);
            return Some(store.employee.fetch_gate.begin());
        }
        Action::CreateEmployee(_) => store.employee.creating.set(true),
        Action::FetchVisitors { .. } => {
            store.visitor.fetching_visitors.set(true);
            return Some(store.visitor.visitors_gate.begin());
        }
        Action::CreateVisitor(_) => store.visitor.creating_visitor.set(true),
        Action::FetchVisits { .. } => {
            store.visitor.fetching_visits.set(true);
            return Some(store.visitor.visits_gate.begin());
        }
        Action::CheckInVisit { .. } => store.visitor.checking_in.set(true),
        Action::CheckOutVisit { .. } => store.visitor.checking_out.set(true),
        Action::FetchPlans => {
            store.pricing.fetching_plans.set(true);
            return Some(store.pricing.plans_gate.begin());
        }
        Action::FetchPlan { .. } => {
            store.pricing.fetching_plan.set(true);
            return Some(store.pricing.plan_gate.begin());
        }
        Action::CreatePlan(_) | Action::UpdatePlan { .. } => store.pricing.saving_plan.set(true),
        Action::FetchFeatures { .. } => {
            store.pricing.fetching_features.set(true);
            return Some(store.pricing.features_gate.begin());
        }
        Action::FetchInvoices => {
            store.pricing.fetching_invoices.set(true);
            return Some(store.pricing.invoices_gate.begin());
        }
        Action::CreatePaymentIntent(_) => store.pricing.creating_intent.set(true),
        Action::ConfirmPayment(_) => store.pricing.confirming_payment.set(true),
        Action::FetchSettings => {
            store.settings.fetching.set(true);
            return Some(store.settings.fetch_gate.begin());
        }
        Action::UpdateSettings(_) => store.settings.saving.set(true),
    }
    None
}

/// Clear the owning loading flag once the action settles.
fn end_action(store: &StateStore, action: &Action) {
    match action {
        Action::SignIn { .. } => store.auth.signing_in.set(false),
        Action::SignUp { .. } => store.auth.signing_up.set(false),
        Action::ChangePassword { .. } => store.auth.changing_password.set(false),
        Action::ForgotPassword { .. } => store.auth.requesting_reset.set(false),
        Action::VerifyResetToken { .. } => store.auth.verifying_token.set(false),
        Action::SetNewPassword { .. } => store.auth.setting_password.set(false),
        Action::SignOut => {}
        Action::FetchCompany => store.company.fetching.set(false),
        Action::UpdateCompany(_) => store.company.saving.set(false),
        Action::FetchEmployees => store.employee.fetching.set(false),
        Action::CreateEmployee(_) => store.employee.creating.set(false),
        Action::FetchVisitors { .. } => store.visitor.fetching_visitors.set(false),
        Action::CreateVisitor(_) => store.visitor.creating_visitor.set(false),
        Action::FetchVisits { .. } => store.visitor.fetching_visits.set(false),
        Action::CheckInVisit { .. } => store.visitor.checking_in.set(false),
        Action::CheckOutVisit { .. } => store.visitor.checking_out.set(false),
        Action::FetchPlans => store.pricing.fetching_plans.set(false),
        Action::FetchPlan { .. } => store.pricing.fetching_plan.set(false),
        Action::CreatePlan(_) | Action::UpdatePlan { .. } => store.pricing.saving_plan.set(false),
        Action::FetchFeatures { .. } => store.pricing.fetching_features.set(false),
        Action::FetchInvoices => store.pricing.fetching_invoices.set(false),
        Action::CreatePaymentIntent(_) => store.pricing.creating_intent.set(false),
        Action::ConfirmPayment(_) => store.pricing.confirming_payment.set(false),
        Action::FetchSettings => store.settings.fetching.set(false),
        Action::UpdateSettings(_) => store.settings.saving.set(false),
    }
}

/// Whether a fetch completion holding `ticket` may still apply.
fn admitted(gate: &FetchGate, ticket: Option<u64>) -> bool {
    ticket.is_none_or(|t| gate.admits(t))
}

/// Execute one action: a single HTTP call, then the documented snapshot
/// mutation on success. Rejections leave the store untouched.
#[allow(clippy::too_many_lines, clippy::cognitive_complexity)]
async fn handle_action(
    api: &ApiClient,
    store: &StateStore,
    vault: &SessionVault,
    action: &Action,
    ticket: Option<u64>,
) -> Result<ActionOutcome, CoreError> {
    match action {
        // ── Credentials ──────────────────────────────────────────────
        Action::SignUp { request, password } => {
            let payload = api.sign_up(request, password).await?;
            let session = Session::from(payload);
            store.auth.set_session(session.clone());
            persist_session(vault, &session);
            Ok(ActionOutcome::Session(session))
        }
        Action::SignIn { email, password } => {
            let payload = api.sign_in(email, password).await?;
            let session = Session::from(payload);
            store.auth.set_session(session.clone());
            persist_session(vault, &session);
            Ok(ActionOutcome::Session(session))
        }
        Action::SignOut => {
            store.reset();
            if let Err(e) = vault.clear_user_info() {
                warn!(error = %e, "failed to clear persisted session (non-fatal)");
            }
            Ok(ActionOutcome::Ok)
        }
        Action::ChangePassword { current, new } => {
            api.change_password(current, new).await?;
            Ok(ActionOutcome::Ok)
        }
        Action::ForgotPassword { email } => {
            api.forgot_password(email).await?;
            Ok(ActionOutcome::Ok)
        }
        Action::VerifyResetToken { email, token } => {
            api.verify_forgot_pass_token(email, token).await?;
            if let Err(e) = vault.set_otp_verified(true) {
                warn!(error = %e, "failed to persist OTP flag (non-fatal)");
            }
            Ok(ActionOutcome::Ok)
        }
        Action::SetNewPassword {
            email,
            token,
            password,
        } => {
            api.new_password(email, token, password).await?;
            if let Err(e) = vault.set_otp_verified(false) {
                warn!(error = %e, "failed to reset OTP flag (non-fatal)");
            }
            Ok(ActionOutcome::Ok)
        }

        // ── Company ──────────────────────────────────────────────────
        Action::FetchCompany => {
            let payload = api.get_company().await?;
            if admitted(&store.company.fetch_gate, ticket) {
                store.company.set_company(Company::from(payload));
            } else {
                debug!("discarding stale company fetch");
            }
            Ok(ActionOutcome::Ok)
        }
        Action::UpdateCompany(update) => {
            let payload = api.update_company(update).await?;
            let company = Company::from(payload);
            store.company.set_company(company.clone());
            Ok(ActionOutcome::Company(company))
        }

        // ── Employees ────────────────────────────────────────────────
        Action::FetchEmployees => {
            let payloads = api.list_employees().await?;
            if admitted(&store.employee.fetch_gate, ticket) {
                store
                    .employee
                    .employees
                    .replace(payloads.into_iter().map(Employee::from).collect());
            } else {
                debug!("discarding stale employee fetch");
            }
            Ok(ActionOutcome::Ok)
        }
        Action::CreateEmployee(request) => {
            let payload = api.create_employee(request).await?;
            let employee = Employee::from(payload);
            store.employee.employees.append(employee.clone());
            Ok(ActionOutcome::Employee(employee))
        }

        // ── Visitors / visits ────────────────────────────────────────
        Action::FetchVisitors { filter } => {
            let payloads = api.list_visitors(filter.as_deref()).await?;
            if admitted(&store.visitor.visitors_gate, ticket) {
                store
                    .visitor
                    .visitors
                    .replace(payloads.into_iter().map(Visitor::from).collect());
            } else {
                debug!("discarding stale visitor fetch");
            }
            Ok(ActionOutcome::Ok)
        }
        Action::CreateVisitor(request) => {
            let payload = api.create_visitor(request).await?;
            let visitor = Visitor::from(payload);
            store.visitor.visitors.append(visitor.clone());
            Ok(ActionOutcome::Visitor(visitor))
        }
        Action::FetchVisits { visitor_id } => {
            let payloads = api.list_visits(visitor_id).await?;
            if admitted(&store.visitor.visits_gate, ticket) {
                store
                    .visitor
                    .visits
                    .replace(payloads.into_iter().map(Visit::from).collect());
            } else {
                debug!("discarding stale visit fetch");
            }
            Ok(ActionOutcome::Ok)
        }
        Action::CheckInVisit { visit_id } => {
            api.check_in_visit(visit_id).await?;
            store.visitor.mark_checked_in(visit_id, Utc::now());
            Ok(ActionOutcome::Ok)
        }
        Action::CheckOutVisit { visit_id } => {
            api.check_out_visit(visit_id).await?;
            store.visitor.mark_checked_out(visit_id, Utc::now());
            Ok(ActionOutcome::Ok)
        }

        // ── Pricing / billing ────────────────────────────────────────
        Action::FetchPlans => {
            let payloads = api.list_plans().await?;
            if admitted(&store.pricing.plans_gate, ticket) {
                store
                    .pricing
                    .plans
                    .replace(payloads.into_iter().map(PricingPlan::from).collect());
            } else {
                debug!("discarding stale plan fetch");
            }
            Ok(ActionOutcome::Ok)
        }
        Action::FetchPlan { id } => {
            let payload = api.get_plan(id).await?;
            if admitted(&store.pricing.plan_gate, ticket) {
                store.pricing.set_selected_plan(PricingPlan::from(payload));
            } else {
                debug!("discarding stale single-plan fetch");
            }
            Ok(ActionOutcome::Ok)
        }
        Action::CreatePlan(request) => {
            let payload = api.create_plan(request).await?;
            let plan = PricingPlan::from(payload);
            store.pricing.plans.append(plan.clone());
            Ok(ActionOutcome::Plan(plan))
        }
        Action::UpdatePlan { id, update } => {
            let payload = api.update_plan(id, update).await?;
            let plan = PricingPlan::from(payload);
            store.pricing.plans.patch(id, |p| *p = plan.clone());
            Ok(ActionOutcome::Plan(plan))
        }
        Action::FetchFeatures { tier } => {
            let payloads = api.list_features(*tier).await?;
            if admitted(&store.pricing.features_gate, ticket) {
                store
                    .pricing
                    .features
                    .replace(payloads.into_iter().map(Feature::from).collect());
            } else {
                debug!("discarding stale feature fetch");
            }
            Ok(ActionOutcome::Ok)
        }
        Action::FetchInvoices => {
            let payloads = api.list_invoices().await?;
            if admitted(&store.pricing.invoices_gate, ticket) {
                store
                    .pricing
                    .invoices
                    .replace(payloads.into_iter().map(Invoice::from).collect());
            } else {
                debug!("discarding stale invoice fetch");
            }
            Ok(ActionOutcome::Ok)
        }
        Action::CreatePaymentIntent(request) => {
            let payload = api.create_payment_intent(request).await?;
            let intent = PaymentIntent::from(payload);
            store.pricing.set_payment_intent(Some(intent.clone()));
            let promotion = SelectedPromotion {
                plan_id: request.plan_id.clone(),
                discount_code: request.discount_code.clone(),
            };
            if let Err(e) = vault.set_selected_promotion(Some(&promotion)) {
                warn!(error = %e, "failed to persist selected promotion (non-fatal)");
            }
            Ok(ActionOutcome::PaymentIntent(intent))
        }
        Action::ConfirmPayment(request) => {
            let payload = api.confirm_payment(request).await?;
            let confirmation = PaymentConfirmation::from(payload);
            store.pricing.set_payment_intent(None);
            if let Err(e) = vault.set_selected_promotion(None) {
                warn!(error = %e, "failed to clear selected promotion (non-fatal)");
            }
            // Refresh the persisted plan info now that the subscription
            // is active.
            if let Some(session) = store.auth.session() {
                let plan = store
                    .pricing
                    .plans
                    .find(&request.plan_id)
                    .map(|p| (*p).clone());
                if let Err(e) = vault.store_user_info(&session, plan.as_ref()) {
                    warn!(error = %e, "failed to persist plan info (non-fatal)");
                }
            }
            Ok(ActionOutcome::PaymentConfirmation(confirmation))
        }

        // ── Settings ─────────────────────────────────────────────────
        Action::FetchSettings => {
            let payload = api.get_settings().await?;
            if admitted(&store.settings.fetch_gate, ticket) {
                store.settings.set_settings(UserSettings::from(payload));
            } else {
                debug!("discarding stale settings fetch");
            }
            Ok(ActionOutcome::Ok)
        }
        Action::UpdateSettings(update) => {
            let payload = api.update_settings(update).await?;
            let settings = UserSettings::from(payload);
            store.settings.set_settings(settings.clone());
            // Keep the session's MFA flag in step with the settings copy.
            if let Some(mut session) = store.auth.session() {
                if session.mfa_enabled != settings.mfa_enabled {
                    session.mfa_enabled = settings.mfa_enabled;
                    store.auth.set_session(session.clone());
                    persist_session(vault, &session);
                }
            }
            Ok(ActionOutcome::Settings(settings))
        }
    }
}

/// Write the session through the vault, preserving any persisted plan.
/// A cache failure never fails the action -- the backend cookie is the
/// real session, the cache only skips a re-login roundtrip.
fn persist_session(vault: &SessionVault, session: &Session) {
    let plan = vault.user_info().and_then(|info| info.plan);
    if let Err(e) = vault.store_user_info(session, plan.as_ref()) {
        warn!(error = %e, "failed to persist session (non-fatal)");
    }
}
