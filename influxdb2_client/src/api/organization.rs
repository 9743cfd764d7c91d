//! Organizations API

use std::sync::Arc;

use reqwest::{Method, StatusCode};

use crate::{
    Result,
    http::{HttpService, empty_response, json_response},
    models::{Organization, Organizations, PostOrganizationRequest},
};

/// Client managing organizations
#[derive(Debug)]
pub struct OrganizationsApi {
    http: Arc<HttpService>,
}

impl OrganizationsApi {
    pub(crate) fn new(http: Arc<HttpService>) -> Self {
        Self { http }
    }

    /// List all organizations
    pub async fn find_organizations(&self) -> Result<Vec<Organization>> {
        let response = self
            .http
            .execute(Method::GET, "api/v2/orgs", |req| req)
            .await?;
        let orgs: Organizations = json_response(response, StatusCode::OK).await?;
        Ok(orgs.orgs)
    }

    /// Look up an organization by name
    pub async fn find_organization_by_name(&self, name: &str) -> Result<Option<Organization>> {
        let response = self
            .http
            .execute(Method::GET, "api/v2/orgs", |req| req.query(&[("org", name)]))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let orgs: Organizations = json_response(response, StatusCode::OK).await?;
        Ok(orgs.orgs.into_iter().find(|org| org.name == name))
    }

    /// Create an organization
    pub async fn create_organization(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<Organization> {
        let body = PostOrganizationRequest {
            name: name.to_string(),
            description,
        };
        let response = self
            .http
            .execute(Method::POST, "api/v2/orgs", |req| req.json(&body))
            .await?;
        json_response(response, StatusCode::CREATED).await
    }

    /// Delete an organization
    pub async fn delete_organization(&self, org_id: &str) -> Result<()> {
        let response = self
            .http
            .execute_on(Method::DELETE, "api/v2/orgs", org_id, |req| req)
            .await?;
        empty_response(response, StatusCode::NO_CONTENT).await
    }
}
