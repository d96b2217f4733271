// Pricing, invoice, and subscription endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    ConfirmPaymentRequest, CreatePaymentIntentRequest, CreatePlanRequest, FeaturePayload,
    FeatureType, InvoicePayload, PaymentConfirmationPayload, PaymentIntentPayload, PlanPayload,
    UpdatePlanRequest,
};

impl ApiClient {
    /// List all pricing plans.
    ///
    /// `GET /plan`
    pub async fn list_plans(&self) -> Result<Vec<PlanPayload>, Error> {
        debug!("listing plans");
        self.get("plan").await
    }

    /// Fetch a single plan.
    ///
    /// `GET /plan/{id}`
    pub async fn get_plan(&self, id: &str) -> Result<PlanPayload, Error> {
        debug!(id, "fetching plan");
        self.get(&format!("plan/{id}")).await
    }

    /// Create a pricing plan.
    ///
    /// `POST /plan`
    pub async fn create_plan(&self, req: &CreatePlanRequest) -> Result<PlanPayload, Error> {
        debug!(name = %req.name, "creating plan");
        self.post("plan", req).await
    }

    /// Update a pricing plan.
    ///
    /// `PUT /plan/{id}`
    pub async fn update_plan(
        &self,
        id: &str,
        req: &UpdatePlanRequest,
    ) -> Result<PlanPayload, Error> {
        debug!(id, "updating plan");
        self.put(&format!("plan/{id}"), req).await
    }

    /// List features for a plan tier.
    ///
    /// `GET /feature/{type}`
    pub async fn list_features(
        &self,
        feature_type: FeatureType,
    ) -> Result<Vec<FeaturePayload>, Error> {
        debug!(%feature_type, "listing features");
        self.get(&format!("feature/{feature_type}")).await
    }

    /// List the company's invoices.
    ///
    /// `GET /invoice`
    pub async fn list_invoices(&self) -> Result<Vec<InvoicePayload>, Error> {
        debug!("listing invoices");
        self.get("invoice").await
    }

    /// Start a checkout by creating a payment intent for a plan.
    ///
    /// `POST /subscription/create-payment-intent`
    pub async fn create_payment_intent(
        &self,
        req: &CreatePaymentIntentRequest,
    ) -> Result<PaymentIntentPayload, Error> {
        debug!(plan_id = %req.plan_id, "creating payment intent");
        self.post("subscription/create-payment-intent", req).await
    }

    /// Confirm a completed payment and activate the subscription.
    ///
    /// `POST /subscription/confirm-payment`
    pub async fn confirm_payment(
        &self,
        req: &ConfirmPaymentRequest,
    ) -> Result<PaymentConfirmationPayload, Error> {
        debug!(plan_id = %req.plan_id, "confirming payment");
        self.post("subscription/confirm-payment", req).await
    }
}
