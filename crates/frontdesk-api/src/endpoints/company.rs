// Company administration endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{CompanyPayload, UpdateCompanyRequest};

impl ApiClient {
    /// Fetch the signed-in user's company.
    ///
    /// `GET /company`
    pub async fn get_company(&self) -> Result<CompanyPayload, Error> {
        debug!("fetching company");
        self.get("company").await
    }

    /// Update company details.
    ///
    /// `PUT /company`
    pub async fn update_company(
        &self,
        req: &UpdateCompanyRequest,
    ) -> Result<CompanyPayload, Error> {
        debug!("updating company");
        self.put("company", req).await
    }
}
