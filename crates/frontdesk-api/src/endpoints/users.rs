// User and credential endpoints
//
// Sign-in sets a session cookie in the client's jar; subsequent requests
// use that cookie automatically. Passwords arrive as `SecretString` and
// are spliced into the JSON body at the last moment -- they never live in
// a serializable request struct.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{SignUpRequest, UserPayload};

impl ApiClient {
    /// Register a new account.
    ///
    /// `POST /users/signup`
    pub async fn sign_up(
        &self,
        req: &SignUpRequest,
        password: &SecretString,
    ) -> Result<UserPayload, Error> {
        debug!(email = %req.email, "signing up");
        let body = json!({
            "email": req.email,
            "firstName": req.first_name,
            "lastName": req.last_name,
            "companyName": req.company_name,
            "password": password.expose_secret(),
        });
        self.post("users/signup", &body).await
    }

    /// Authenticate with email/password.
    ///
    /// `POST /users/signin` -- on success the session cookie is stored in
    /// the client's cookie jar and used for all subsequent requests.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<UserPayload, Error> {
        debug!(email, "signing in");
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });
        self.post("users/signin", &body).await
    }

    /// Change the password of the signed-in user.
    ///
    /// `POST /users/change-password`
    pub async fn change_password(
        &self,
        current: &SecretString,
        new: &SecretString,
    ) -> Result<(), Error> {
        debug!("changing password");
        let body = json!({
            "currentPassword": current.expose_secret(),
            "newPassword": new.expose_secret(),
        });
        let _: serde_json::Value = self.post("users/change-password", &body).await?;
        Ok(())
    }

    /// Start the password-reset flow by emailing a one-time token.
    ///
    /// `POST /users/forgot-password`
    pub async fn forgot_password(&self, email: &str) -> Result<(), Error> {
        debug!(email, "requesting password reset");
        let body = json!({ "email": email });
        let _: serde_json::Value = self.post("users/forgot-password", &body).await?;
        Ok(())
    }

    /// Verify the one-time token from the reset email.
    ///
    /// `POST /users/verify-forgot-pass-token` -- the token is an opaque
    /// value relayed to the backend, never validated client-side.
    pub async fn verify_forgot_pass_token(&self, email: &str, token: &str) -> Result<(), Error> {
        debug!(email, "verifying reset token");
        let body = json!({ "email": email, "token": token });
        let _: serde_json::Value = self.post("users/verify-forgot-pass-token", &body).await?;
        Ok(())
    }

    /// Set a new password after token verification.
    ///
    /// `POST /users/new-password`
    pub async fn new_password(
        &self,
        email: &str,
        token: &str,
        password: &SecretString,
    ) -> Result<(), Error> {
        debug!(email, "setting new password");
        let body = json!({
            "email": email,
            "token": token,
            "password": password.expose_secret(),
        });
        let _: serde_json::Value = self.post("users/new-password", &body).await?;
        Ok(())
    }
}
