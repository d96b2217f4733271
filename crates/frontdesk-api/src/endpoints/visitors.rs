// Visitor and visit endpoints
//
// Visits are scoped per visitor; check-in/check-out are PATCH mutations
// keyed by visit id. The backend returns the updated visit, but the
// client's store applies its own point-patch (see frontdesk-core).

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{CreateVisitorRequest, VisitPayload, VisitorPayload};

impl ApiClient {
    /// List visitors, optionally filtered by a search term.
    ///
    /// `GET /visitor` (optional `search` query)
    pub async fn list_visitors(&self, filter: Option<&str>) -> Result<Vec<VisitorPayload>, Error> {
        debug!(?filter, "listing visitors");
        match filter {
            Some(term) => self.get_with_query("visitor", &[("search", term)]).await,
            None => self.get("visitor").await,
        }
    }

    /// Register a visitor.
    ///
    /// `POST /visitor/create`
    pub async fn create_visitor(
        &self,
        req: &CreateVisitorRequest,
    ) -> Result<VisitorPayload, Error> {
        debug!(email = %req.email, "creating visitor");
        self.post("visitor/create", req).await
    }

    /// List a visitor's visits.
    ///
    /// `GET /visits/{visitorId}`
    pub async fn list_visits(&self, visitor_id: &str) -> Result<Vec<VisitPayload>, Error> {
        debug!(visitor_id, "listing visits");
        self.get(&format!("visits/{visitor_id}")).await
    }

    /// Mark a visit as checked in.
    ///
    /// `PATCH /visits/checkin/{visitId}`
    pub async fn check_in_visit(&self, visit_id: &str) -> Result<VisitPayload, Error> {
        debug!(visit_id, "checking in visit");
        self.patch(&format!("visits/checkin/{visit_id}"), &serde_json::json!({}))
            .await
    }

    /// Mark a visit as checked out.
    ///
    /// `PATCH /visits/checkout/{visitId}`
    pub async fn check_out_visit(&self, visit_id: &str) -> Result<VisitPayload, Error> {
        debug!(visit_id, "checking out visit");
        self.patch(&format!("visits/checkout/{visit_id}"), &serde_json::json!({}))
            .await
    }
}
