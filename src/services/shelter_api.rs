use crate::models::Candidate;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the shelter backend
#[derive(Debug, Error)]
pub enum ShelterApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the PawMatch shelter backend.
///
/// The backend owns animal records, availability status and shelter
/// administration; this service only ever reads snapshots of adoptable
/// animals from it. Status filtering (`available` only) happens backend
/// side, and the snapshot is trusted as-is.
pub struct ShelterApiClient {
    base_url: String,
    api_key: String,
    project_id: String,
    client: Client,
}

impl ShelterApiClient {
    /// Create a new shelter backend client
    pub fn new(base_url: String, api_key: String, project_id: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            project_id,
            client,
        }
    }

    /// Fetch the current snapshot of available animals of one species
    pub async fn list_available(&self, species: &str) -> Result<Vec<Candidate>, ShelterApiError> {
        let url = format!(
            "{}/animals?status=available&species={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(species)
        );

        tracing::debug!("Fetching candidate pool from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-PawMatch-Key", &self.api_key)
            .header("X-PawMatch-Project", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ShelterApiError::ApiError(format!(
                "Failed to fetch candidate pool: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("animals")
            .and_then(|d| d.as_array())
            .ok_or_else(|| ShelterApiError::InvalidResponse("Missing animals array".into()))?;

        // Documents with unexpected shapes are skipped rather than failing
        // the whole snapshot; the backend occasionally lags schema changes
        let candidates: Vec<Candidate> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                serde_json::from_value(data.clone()).ok()
            })
            .collect();

        tracing::debug!(
            "Fetched {} candidates for species '{}' (total reported: {})",
            candidates.len(),
            species,
            total
        );

        Ok(candidates)
    }

    /// Ping the backend; used by the health endpoint
    pub async fn health_check(&self) -> Result<bool, ShelterApiError> {
        let url = format!("{}/health", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .header("X-PawMatch-Key", &self.api_key)
            .header("X-PawMatch-Project", &self.project_id)
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ShelterApiClient::new(
            "https://shelter.test/v1".to_string(),
            "test_key".to_string(),
            "test_project".to_string(),
        );

        assert_eq!(client.base_url, "https://shelter.test/v1");
        assert_eq!(client.api_key, "test_key");
    }

    #[tokio::test]
    async fn test_list_available_parses_animals() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "total": 2,
            "animals": [
                {
                    "animalId": "a-1",
                    "name": "Luna",
                    "species": "dog",
                    "size": "small",
                    "age": 2.0,
                    "tags": ["cuddly"],
                    "compatibility": {
                        "kids": "suitable",
                        "dogs": "suitable",
                        "cats": "cautious",
                        "activity": "low",
                        "suitedFor": ["apartment-suitable"],
                        "toleratesAlone": true
                    }
                },
                { "garbage": true }
            ]
        });

        let mock = server
            .mock("GET", "/animals")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = ShelterApiClient::new(
            server.url(),
            "test_key".to_string(),
            "test_project".to_string(),
        );

        let candidates = client.list_available("dog").await.unwrap();

        mock.assert_async().await;
        // The malformed document is skipped, not fatal
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, "a-1");
        assert!(candidates[0].compatibility.tolerates_alone);
    }

    #[tokio::test]
    async fn test_list_available_surfaces_api_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/animals")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = ShelterApiClient::new(
            server.url(),
            "test_key".to_string(),
            "test_project".to_string(),
        );

        let err = client.list_available("dog").await.unwrap_err();
        assert!(matches!(err, ShelterApiError::ApiError(_)));
    }

    #[tokio::test]
    async fn test_health_check() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/health")
            .with_status(200)
            .create_async()
            .await;

        let client = ShelterApiClient::new(
            server.url(),
            "test_key".to_string(),
            "test_project".to_string(),
        );

        assert!(client.health_check().await.unwrap());
    }
}
