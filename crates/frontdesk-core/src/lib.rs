//! Reactive client core between `frontdesk-api` and UI consumers.
//!
//! This crate owns the domain model, the observable state store, and the
//! action dispatch plumbing for the Frontdesk client workspace:
//!
//! - **[`Portal`]** — Central facade managing the client lifecycle:
//!   [`open()`](Portal::open) hydrates the session from the vault and
//!   starts the action processor; [`dispatch()`](Portal::dispatch) routes
//!   every backend operation and returns its outcome.
//!
//! - **[`StateStore`]** — One slice per domain (auth, company, employee,
//!   visitor, pricing, settings), each holding snapshot fields in
//!   `tokio::sync::watch` channels plus a named loading flag per tracked
//!   operation. Fulfilled actions apply replacement, append, or
//!   point-patch mutations; rejected actions leave snapshots untouched.
//!
//! - **[`SessionVault`]** — Sole writer of the persisted session layer
//!   (user-info blob, OTP flag, selected promotion). The store is a
//!   derived read-through cache hydrated at startup only.
//!
//! - **[`SnapshotStream<T>`]** — Subscription handle vended by the store.
//!   Exposes `current()` / `latest()` / `changed()` for reactive
//!   rendering.
//!
//! - **[`Action`]** — Typed operation requests routed through an `mpsc`
//!   channel to the portal's processor, which spawns one task per action
//!   so concurrent dispatches proceed independently. Stale fetch
//!   completions are discarded per field (latest dispatch wins).

pub mod action;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod portal;
pub mod session;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use action::{Action, ActionOutcome};
pub use config::{Credentials, PortalConfig, TlsVerification};
pub use error::{CoreError, FALLBACK_MESSAGE};
pub use portal::Portal;
pub use session::{PersistedUserInfo, SessionVault};
pub use store::StateStore;
pub use stream::SnapshotStream;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    BillingInterval,
    Company,
    Discount,
    Employee,
    Feature,
    Invoice,
    InvoiceStatus,
    PaymentConfirmation,
    PaymentIntent,
    PricingPlan,
    Role,
    SelectedPromotion,
    Session,
    UserSettings,
    Visit,
    Visitor,
};
