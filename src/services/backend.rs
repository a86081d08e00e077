use crate::models::Profile;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the Pokojowo core API
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid service API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the Pokojowo core API's internal user endpoints.
///
/// The core backend owns all user records; this service only reads profile
/// snapshots from it:
/// - Fetching a single profile by user id
/// - Querying candidate profiles for a matching run
pub struct BackendClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl BackendClient {
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }

    /// Fetch a single user profile by id
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile, BackendError> {
        let url = format!(
            "{}/internal/v1/users/{}",
            self.base_url,
            urlencoding::encode(user_id)
        );

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        match response.status().as_u16() {
            401 | 403 => return Err(BackendError::Unauthorized),
            404 => return Err(BackendError::NotFound(format!("user {}", user_id))),
            status if status >= 400 => {
                return Err(BackendError::ApiError(format!(
                    "status {} fetching profile {}",
                    status, user_id
                )))
            }
            _ => {}
        }

        let body: Value = response.json().await?;

        // The endpoint wraps the document in a "user" envelope.
        let document = body.get("user").cloned().unwrap_or(body);

        serde_json::from_value(document)
            .map_err(|e| BackendError::InvalidResponse(format!("failed to parse profile: {}", e)))
    }

    /// Query candidate profiles for a matching run.
    ///
    /// Only completed profiles are returned and the requesting user is
    /// excluded server-side. `location` is a partial-match filter. Candidates
    /// that fail to parse are skipped with a warning rather than failing the
    /// whole batch.
    pub async fn query_candidates(
        &self,
        exclude_user_id: &str,
        location: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Profile>, BackendError> {
        let mut url = format!(
            "{}/internal/v1/users?profileComplete=true&exclude={}&limit={}",
            self.base_url,
            urlencoding::encode(exclude_user_id),
            limit
        );

        if let Some(location) = location {
            url.push_str("&location=");
            url.push_str(&urlencoding::encode(location));
        }

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        match response.status().as_u16() {
            401 | 403 => return Err(BackendError::Unauthorized),
            status if status >= 400 => {
                return Err(BackendError::ApiError(format!(
                    "status {} querying candidates",
                    status
                )))
            }
            _ => {}
        }

        let body: Value = response.json().await?;

        let documents = body
            .get("users")
            .and_then(Value::as_array)
            .ok_or_else(|| BackendError::InvalidResponse("Missing users array".into()))?;

        let candidates = documents
            .iter()
            .filter_map(|document| match serde_json::from_value::<Profile>(document.clone()) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!("Skipping unparseable candidate profile: {}", e);
                    None
                }
            })
            .collect();

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_profile_parses_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/internal/v1/users/u1")
            .match_header("x-api-key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"user": {"userId": "u1", "username": "anna", "age": 26, "gender": "female"}}"#,
            )
            .create_async()
            .await;

        let client = BackendClient::new(server.url(), "test-key".to_string(), 5);
        let profile = client.get_profile("u1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(profile.user_id, "u1");
        assert_eq!(profile.age, Some(26));
    }

    #[tokio::test]
    async fn test_get_profile_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/internal/v1/users/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = BackendClient::new(server.url(), "test-key".to_string(), 5);
        let result = client.get_profile("missing").await;

        assert!(matches!(result, Err(BackendError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_query_candidates_skips_bad_documents() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                "/internal/v1/users?profileComplete=true&exclude=u1&limit=10",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"users": [
                    {"userId": "u2", "username": "ola"},
                    {"not_a_profile": true},
                    {"userId": "u3", "username": "piotr"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = BackendClient::new(server.url(), "test-key".to_string(), 5);
        let candidates = client.query_candidates("u1", None, 10).await.unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].user_id, "u2");
    }
}
