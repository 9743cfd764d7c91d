//! Users API

use std::sync::Arc;

use reqwest::{Method, StatusCode};

use crate::{
    Result,
    http::{HttpService, empty_response, json_response},
    models::{User, Users},
};

/// Client managing users
#[derive(Debug)]
pub struct UsersApi {
    http: Arc<HttpService>,
}

impl UsersApi {
    pub(crate) fn new(http: Arc<HttpService>) -> Self {
        Self { http }
    }

    /// List all users
    pub async fn find_users(&self) -> Result<Vec<User>> {
        let response = self
            .http
            .execute(Method::GET, "api/v2/users", |req| req)
            .await?;
        let users: Users = json_response(response, StatusCode::OK).await?;
        Ok(users.users)
    }

    /// The user owning the token the client authenticates with
    pub async fn me(&self) -> Result<User> {
        let response = self
            .http
            .execute(Method::GET, "api/v2/me", |req| req)
            .await?;
        json_response(response, StatusCode::OK).await
    }

    /// Create a user
    pub async fn create_user(&self, name: &str) -> Result<User> {
        let body = User::new(name);
        let response = self
            .http
            .execute(Method::POST, "api/v2/users", |req| req.json(&body))
            .await?;
        json_response(response, StatusCode::CREATED).await
    }

    /// Delete a user
    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        let response = self
            .http
            .execute_on(Method::DELETE, "api/v2/users", user_id, |req| req)
            .await?;
        empty_response(response, StatusCode::NO_CONTENT).await
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;
    use crate::{models::UserStatus, test_support::service};

    #[tokio::test]
    async fn me() {
        let mut mock_server = Server::new_async().await;
        let mock = mock_server
            .mock("GET", "/api/v2/me")
            .match_header("Authorization", "Token some-token")
            .with_body(r#"{"id":"u1","name":"admin","status":"active"}"#)
            .create_async()
            .await;

        let api = UsersApi::new(service(&mock_server.url()));
        let user = api.me().await.unwrap();

        assert_eq!(user.name, "admin");
        assert_eq!(user.status, Some(UserStatus::Active));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_find_delete_user() {
        let mut mock_server = Server::new_async().await;
        let create = mock_server
            .mock("POST", "/api/v2/users")
            .match_body(Matcher::Json(json!({"name": "jdoe"})))
            .with_status(201)
            .with_body(r#"{"id":"u2","name":"jdoe"}"#)
            .create_async()
            .await;
        let find = mock_server
            .mock("GET", "/api/v2/users")
            .with_body(r#"{"users":[{"id":"u1","name":"admin"},{"id":"u2","name":"jdoe"}]}"#)
            .create_async()
            .await;
        let delete = mock_server
            .mock("DELETE", "/api/v2/users/u2")
            .with_status(204)
            .create_async()
            .await;

        let api = UsersApi::new(service(&mock_server.url()));
        let user = api.create_user("jdoe").await.unwrap();
        assert_eq!(user.id.as_deref(), Some("u2"));
        assert_eq!(api.find_users().await.unwrap().len(), 2);
        api.delete_user("u2").await.unwrap();

        create.assert_async().await;
        find.assert_async().await;
        delete.assert_async().await;
    }
}
