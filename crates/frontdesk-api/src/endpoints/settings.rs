// User-settings endpoints (MFA and notification preferences)

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{SettingsPayload, UpdateSettingsRequest};

impl ApiClient {
    /// Fetch the signed-in user's settings.
    ///
    /// `GET /user-settings`
    pub async fn get_settings(&self) -> Result<SettingsPayload, Error> {
        debug!("fetching user settings");
        self.get("user-settings").await
    }

    /// Update the signed-in user's settings.
    ///
    /// `PUT /user-settings`
    pub async fn update_settings(
        &self,
        req: &UpdateSettingsRequest,
    ) -> Result<SettingsPayload, Error> {
        debug!("updating user settings");
        self.put("user-settings", req).await
    }
}
