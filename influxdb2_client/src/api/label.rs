//! Labels API

use std::{collections::HashMap, sync::Arc};

use reqwest::{Method, StatusCode};

use crate::{
    Result,
    http::{HttpService, empty_response, json_response},
    models::{LabelCreateRequest, LabelResponse, LabelUpdate, LabelsResponse},
};

/// Client managing labels
#[derive(Debug)]
pub struct LabelsApi {
    http: Arc<HttpService>,
}

impl LabelsApi {
    pub(crate) fn new(http: Arc<HttpService>) -> Self {
        Self { http }
    }

    /// List all Labels
    pub async fn find_labels(&self) -> Result<LabelsResponse> {
        let response = self
            .http
            .execute(Method::GET, "api/v2/labels", |req| req)
            .await?;
        json_response(response, StatusCode::OK).await
    }

    /// Retrieve a label by ID
    pub async fn find_label_by_id(&self, label_id: &str) -> Result<LabelResponse> {
        let response = self
            .http
            .execute_on(Method::GET, "api/v2/labels", label_id, |req| req)
            .await?;
        json_response(response, StatusCode::OK).await
    }

    /// Create a Label
    pub async fn create_label(
        &self,
        org_id: &str,
        name: &str,
        properties: Option<HashMap<String, String>>,
    ) -> Result<LabelResponse> {
        let body = LabelCreateRequest {
            org_id: org_id.into(),
            name: name.into(),
            properties,
        };
        let response = self
            .http
            .execute(Method::POST, "api/v2/labels", |req| req.json(&body))
            .await?;
        json_response(response, StatusCode::CREATED).await
    }

    /// Update a Label
    pub async fn update_label(
        &self,
        name: Option<String>,
        properties: Option<HashMap<String, String>>,
        label_id: &str,
    ) -> Result<LabelResponse> {
        let body = LabelUpdate { name, properties };
        let response = self
            .http
            .execute_on(
                Method::PATCH,
                "api/v2/labels",
                label_id,
                |req| req.json(&body),
            )
            .await?;
        json_response(response, StatusCode::OK).await
    }

    /// Delete a Label
    pub async fn delete_label(&self, label_id: &str) -> Result<()> {
        let response = self
            .http
            .execute_on(Method::DELETE, "api/v2/labels", label_id, |req| req)
            .await?;
        empty_response(response, StatusCode::NO_CONTENT).await
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;
    use crate::test_support::service;

    #[tokio::test]
    async fn find_labels() {
        let mut mock_server = Server::new_async().await;
        let mock = mock_server
            .mock("GET", "/api/v2/labels")
            .match_header("Authorization", "Token some-token")
            .with_body(r#"{"labels":[{"id":"l1","orgID":"o1","name":"prod"}]}"#)
            .create_async()
            .await;

        let api = LabelsApi::new(service(&mock_server.url()));
        let labels = api.find_labels().await.unwrap();

        assert_eq!(labels.labels[0].name.as_deref(), Some("prod"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_label() {
        let mut properties = HashMap::new();
        properties.insert("some-key".to_string(), "some-value".to_string());

        let mut mock_server = Server::new_async().await;
        let mock = mock_server
            .mock("POST", "/api/v2/labels")
            .match_body(Matcher::Json(json!({
                "orgID": "some-org",
                "name": "some-label",
                "properties": {"some-key": "some-value"},
            })))
            .with_status(201)
            .with_body(r#"{"label":{"id":"l1","orgID":"some-org","name":"some-label"}}"#)
            .create_async()
            .await;

        let api = LabelsApi::new(service(&mock_server.url()));
        let created = api
            .create_label("some-org", "some-label", Some(properties))
            .await
            .unwrap();

        assert_eq!(created.label.and_then(|l| l.id).as_deref(), Some("l1"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_label_without_changes() {
        let mut mock_server = Server::new_async().await;
        let mock = mock_server
            .mock("PATCH", "/api/v2/labels/l1")
            .match_body("{}")
            .with_body(r#"{"label":{"id":"l1"}}"#)
            .create_async()
            .await;

        let api = LabelsApi::new(service(&mock_server.url()));
        api.update_label(None, None, "l1").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn label_ids_stay_within_the_labels_endpoint() {
        let mut mock_server = Server::new_async().await;
        let escaped = mock_server
            .mock(
                "DELETE",
                Matcher::Regex(r"^/api/v2/labels/[^/]*%2F[^/]*$".into()),
            )
            .with_status(204)
            .expect(1)
            .create_async()
            .await;
        let query = mock_server
            .mock("GET", Matcher::Regex(r"^/api/v2/labels/l1%3F".into()))
            .with_body(r#"{"label":{"id":"l1"}}"#)
            .expect(1)
            .create_async()
            .await;
        let ready = mock_server
            .mock("DELETE", "/ready")
            .expect(0)
            .create_async()
            .await;
        let collection = mock_server
            .mock("DELETE", "/api/v2/labels")
            .expect(0)
            .create_async()
            .await;

        let api = LabelsApi::new(service(&mock_server.url()));
        api.delete_label("../../../ready").await.unwrap();
        api.find_label_by_id("l1?orgID=other").await.unwrap();

        for id in ["", ".", ".."] {
            let err = api.delete_label(id).await.unwrap_err();
            assert_eq!(err.kind(), crate::ErrorKind::Validation);
        }

        escaped.assert_async().await;
        query.assert_async().await;
        ready.assert_async().await;
        collection.assert_async().await;
    }

    #[tokio::test]
    async fn delete_label() {
        let mut mock_server = Server::new_async().await;
        let mock = mock_server
            .mock("DELETE", "/api/v2/labels/l1")
            .with_status(204)
            .create_async()
            .await;

        let api = LabelsApi::new(service(&mock_server.url()));
        api.delete_label("l1").await.unwrap();

        mock.assert_async().await;
    }
}
