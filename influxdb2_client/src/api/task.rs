//! Tasks API

use std::sync::Arc;

use reqwest::{Method, StatusCode};

use crate::{
    Result,
    http::{HttpService, empty_response, json_response},
    models::{Task, TaskCreateRequest, TaskStatus, Tasks},
};

/// Client managing scheduled Flux tasks
#[derive(Debug)]
pub struct TasksApi {
    http: Arc<HttpService>,
}

impl TasksApi {
    pub(crate) fn new(http: Arc<HttpService>) -> Self {
        Self { http }
    }

    /// List tasks, optionally only those of the organization named `org`
    pub async fn find_tasks(&self, org: Option<&str>) -> Result<Vec<Task>> {
        let response = self
            .http
            .execute(Method::GET, "api/v2/tasks", |req| match org {
                Some(org) => req.query(&[("org", org)]),
                None => req,
            })
            .await?;
        let tasks: Tasks = json_response(response, StatusCode::OK).await?;
        Ok(tasks.tasks)
    }

    /// Retrieve a task by ID
    pub async fn get_task(&self, task_id: &str) -> Result<Task> {
        let response = self
            .http
            .execute_on(Method::GET, "api/v2/tasks", task_id, |req| req)
            .await?;
        json_response(response, StatusCode::OK).await
    }

    /// Create an active task in the organization `org_id`
    ///
    /// The schedule is part of `flux`, in its `option task = {...}` statement.
    pub async fn create_task(
        &self,
        org_id: &str,
        flux: &str,
        description: Option<String>,
    ) -> Result<Task> {
        let body = TaskCreateRequest {
            org_id: org_id.to_string(),
            flux: flux.to_string(),
            description,
            status: TaskStatus::Active,
        };
        let response = self
            .http
            .execute(Method::POST, "api/v2/tasks", |req| req.json(&body))
            .await?;
        json_response(response, StatusCode::CREATED).await
    }

    /// Delete a task
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        let response = self
            .http
            .execute_on(Method::DELETE, "api/v2/tasks", task_id, |req| req)
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

    const FLUX: &str = r#"option task = {name: "downsample", every: 1h}
from(bucket: "raw") |> range(start: -1h) |> to(bucket: "hourly")"#;

    #[tokio::test]
    async fn create_task() {
        let mut mock_server = Server::new_async().await;
        let mock = mock_server
            .mock("POST", "/api/v2/tasks")
            .match_body(Matcher::Json(json!({
                "orgID": "o1",
                "flux": FLUX,
                "status": "active",
            })))
            .with_status(201)
            .with_body(
                json!({
                    "id": "t1",
                    "orgID": "o1",
                    "name": "downsample",
                    "flux": FLUX,
                    "every": "1h",
                    "status": "active",
                })
                .to_string(),
            )
            .create_async()
            .await;

        let api = TasksApi::new(service(&mock_server.url()));
        let task = api.create_task("o1", FLUX, None).await.unwrap();

        assert_eq!(task.name, "downsample");
        assert_eq!(task.every.as_deref(), Some("1h"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn find_get_delete_tasks() {
        let mut mock_server = Server::new_async().await;
        let find = mock_server
            .mock("GET", "/api/v2/tasks")
            .with_body(r#"{"tasks":[{"id":"t1","orgID":"o1","name":"a","flux":""}]}"#)
            .create_async()
            .await;
        let get = mock_server
            .mock("GET", "/api/v2/tasks/t1")
            .with_body(r#"{"id":"t1","orgID":"o1","name":"a","flux":""}"#)
            .create_async()
            .await;
        let delete = mock_server
            .mock("DELETE", "/api/v2/tasks/t1")
            .with_status(204)
            .create_async()
            .await;

        let api = TasksApi::new(service(&mock_server.url()));
        assert_eq!(api.find_tasks(None).await.unwrap().len(), 1);
        assert_eq!(api.get_task("t1").await.unwrap().id, "t1");
        api.delete_task("t1").await.unwrap();

        find.assert_async().await;
        get.assert_async().await;
        delete.assert_async().await;
    }
}
