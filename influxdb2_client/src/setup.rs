//! Onboarding of a freshly installed server

use reqwest::{Method, StatusCode};
use tracing::info;

use crate::{
    Client, Error, Result,
    http::json_response,
    models::{IsOnboarding, OnboardingRequest, OnboardingResponse},
};

impl Client {
    /// Initialise a new server with a user, org and bucket, and a data retention period
    ///
    /// Returns the newly created entities along with the authorization, whose token is then
    /// used by this client and every sub-client for all further requests. A retention period of
    /// zero means infinite retention.
    ///
    /// The request runs while the client's registry lock is held, so no sub-client is created
    /// while the credential is being replaced. The credential only changes once the full
    /// response has been received and decoded; a failed or cancelled setup leaves it as is.
    pub async fn setup(
        &self,
        username: &str,
        password: &str,
        org: &str,
        bucket: &str,
        retention_period_hours: u32,
    ) -> Result<OnboardingResponse> {
        if username.is_empty() || password.is_empty() {
            return Err(Error::validation(
                "a username and a password are required for a setup",
            ));
        }
        let body = OnboardingRequest::new(username, password, org, bucket, retention_period_hours)?;

        let _registry = self.registry.lock().await;
        let response = self
            .http
            .execute(Method::POST, "api/v2/setup", |req| req.json(&body))
            .await?;
        let onboarding: OnboardingResponse = json_response(response, StatusCode::CREATED).await?;

        let token = onboarding
            .auth
            .as_ref()
            .and_then(|auth| auth.token.as_deref())
            .ok_or(Error::MissingToken)?;
        self.http.set_authorization(format!("Token {token}"));
        info!(org, bucket, "onboarding complete, using the issued token");

        Ok(onboarding)
    }

    /// Check whether the server still accepts [`setup`](Self::setup)
    pub async fn is_onboarding_allowed(&self) -> Result<bool> {
        let response = self
            .http
            .execute(Method::GET, "api/v2/setup", |req| req)
            .await?;
        let onboarding: IsOnboarding = json_response(response, StatusCode::OK).await?;
        Ok(onboarding.allowed)
    }
}
