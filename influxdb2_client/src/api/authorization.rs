//! Authorizations API

use std::sync::Arc;

use reqwest::{Method, StatusCode};

use crate::{
    Result,
    http::{HttpService, empty_response, json_response},
    models::{Authorization, AuthorizationStatus, AuthorizationUpdateRequest, Authorizations},
};

/// Client managing API tokens
#[derive(Debug)]
pub struct AuthorizationsApi {
    http: Arc<HttpService>,
}

impl AuthorizationsApi {
    pub(crate) fn new(http: Arc<HttpService>) -> Self {
        Self { http }
    }

    /// List all authorizations
    pub async fn find_authorizations(&self) -> Result<Vec<Authorization>> {
        let response = self
            .http
            .execute(Method::GET, "api/v2/authorizations", |req| req)
            .await?;
        let authorizations: Authorizations = json_response(response, StatusCode::OK).await?;
        Ok(authorizations.authorizations)
    }

    /// Create an authorization; the returned value carries the new token
    pub async fn create_authorization(
        &self,
        authorization: &Authorization,
    ) -> Result<Authorization> {
        let response = self
            .http
            .execute(Method::POST, "api/v2/authorizations", |req| {
                req.json(authorization)
            })
            .await?;
        json_response(response, StatusCode::CREATED).await
    }

    /// Activate or deactivate an authorization
    pub async fn update_authorization_status(
        &self,
        authorization_id: &str,
        status: AuthorizationStatus,
    ) -> Result<Authorization> {
        let body = AuthorizationUpdateRequest { status };
        let response = self
            .http
            .execute_on(
                Method::PATCH,
                "api/v2/authorizations",
                authorization_id,
                |req| req.json(&body),
            )
            .await?;
        json_response(response, StatusCode::OK).await
    }

    /// Delete an authorization
    pub async fn delete_authorization(&self, authorization_id: &str) -> Result<()> {
        let response = self
            .http
            .execute_on(
                Method::DELETE,
                "api/v2/authorizations",
                authorization_id,
                |req| req,
            )
            .await?;
        empty_response(response, StatusCode::NO_CONTENT).await
    }
}
