// Employee endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{CreateEmployeeRequest, EmployeePayload};

impl ApiClient {
    /// List all employees of the company.
    ///
    /// `GET /employee`
    pub async fn list_employees(&self) -> Result<Vec<EmployeePayload>, Error> {
        debug!("listing employees");
        self.get("employee").await
    }

    /// Create an employee.
    ///
    /// `POST /employee`
    pub async fn create_employee(
        &self,
        req: &CreateEmployeeRequest,
    ) -> Result<EmployeePayload, Error> {
        debug!(email = %req.email, "creating employee");
        self.post("employee", req).await
    }
}
