use crate::domain::model::Place;
use crate::domain::ports::{ConfigProvider, PlaceCatalog, PlaceStore};
use crate::utils::error::{PickerError, Result};
use crate::utils::validation::validate_url;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct PlacesEnvelope {
    places: Vec<Place>,
}

#[derive(Debug, Serialize)]
struct PlacesPayload<'a> {
    places: &'a [Place],
}

#[derive(Debug, Deserialize)]
struct UpdateAck {
    #[serde(default)]
    message: Option<String>,
}

/// Backend speaking the `{"places": [...]}` JSON protocol.
#[derive(Debug, Clone)]
pub struct HttpPlaceStore {
    client: Client,
    selected_url: String,
    catalog_url: String,
}

impl HttpPlaceStore {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        validate_url("base_url", config.base_url())?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            selected_url: endpoint(config.base_url(), config.selected_path()),
            catalog_url: endpoint(config.base_url(), config.catalog_path()),
        })
    }

    pub fn selected_url(&self) -> &str {
        &self.selected_url
    }

    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    async fn get_places(&self, url: &str, failure: &str) -> Result<Vec<Place>> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        tracing::debug!("response status: {}", response.status());

        if !response.status().is_success() {
            return Err(PickerError::remote(failure));
        }

        let envelope: PlacesEnvelope = response.json().await?;
        Ok(envelope.places)
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

impl PlaceStore for HttpPlaceStore {
    async fn fetch_selected(&self) -> Result<Vec<Place>> {
        self.get_places(&self.selected_url, "Failed to fetch user places")
            .await
    }

    async fn persist_selected(&self, places: &[Place]) -> Result<()> {
        tracing::debug!("PUT {} ({} places)", self.selected_url, places.len());
        let response = self
            .client
            .put(&self.selected_url)
            .json(&PlacesPayload { places })
            .send()
            .await?;
        tracing::debug!("response status: {}", response.status());

        if !response.status().is_success() {
            return Err(PickerError::remote("Failed to update user data"));
        }

        // The acknowledgement body is informational only.
        match response.json::<UpdateAck>().await {
            Ok(UpdateAck {
                message: Some(message),
            }) => tracing::debug!("backend: {}", message),
            Ok(_) => {}
            Err(e) => tracing::debug!("ignoring unreadable update acknowledgement: {}", e),
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl PlaceCatalog for HttpPlaceStore {
    async fn fetch_available(&self) -> Result<Vec<Place>> {
        self.get_places(&self.catalog_url, "Failed to fetch places")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    struct MockConfig {
        base_url: String,
    }

    impl ConfigProvider for MockConfig {
        fn base_url(&self) -> &str {
            &self.base_url
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(5)
        }
    }

    fn store_for(server: &MockServer) -> HttpPlaceStore {
        HttpPlaceStore::from_config(&MockConfig {
            base_url: server.base_url(),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        assert_eq!(
            endpoint("http://localhost:3000/", "/user-places"),
            "http://localhost:3000/user-places"
        );
        assert_eq!(
            endpoint("http://localhost:3000/api", "places"),
            "http://localhost:3000/api/places"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = HttpPlaceStore::from_config(&MockConfig {
            base_url: "localhost".to_string(),
        });
        assert!(matches!(
            result,
            Err(PickerError::InvalidConfigValueError { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_selected_parses_envelope() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/user-places");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "places": [
                        {"id": "p1", "title": "Forest", "image": {"src": "forest.jpg", "alt": "Trees"}, "lat": 1.5, "lon": 2.5}
                    ]
                }));
        });

        let places = store_for(&server).fetch_selected().await.unwrap();

        api_mock.assert();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Forest");
        assert_eq!(places[0].extra.get("lat"), Some(&serde_json::json!(1.5)));
    }

    #[tokio::test]
    async fn test_fetch_selected_failure_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/user-places");
            then.status(500);
        });

        let err = store_for(&server).fetch_selected().await.unwrap_err();
        assert_eq!(err.user_message(), "Failed to fetch user places");
    }

    #[tokio::test]
    async fn test_persist_sends_full_list() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/user-places")
                .json_body(serde_json::json!({
                    "places": [
                        {"id": "p2", "title": "Beach", "image": {"src": "beach.jpg", "alt": ""}},
                        {"id": "p1", "title": "Forest", "image": {"src": "forest.jpg", "alt": ""}}
                    ]
                }));
            then.status(200)
                .json_body(serde_json::json!({"message": "User places updated!"}));
        });

        let places = vec![
            Place::new("p2", "Beach", "beach.jpg"),
            Place::new("p1", "Forest", "forest.jpg"),
        ];
        store_for(&server).persist_selected(&places).await.unwrap();

        api_mock.assert();
    }

    #[tokio::test]
    async fn test_persist_failure_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path("/user-places");
            then.status(500);
        });

        let err = store_for(&server)
            .persist_selected(&[Place::new("p1", "Forest", "forest.jpg")])
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Failed to update user data");
    }

    #[tokio::test]
    async fn test_fetch_available_uses_catalog_path() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/places");
            then.status(200).json_body(serde_json::json!({
                "places": [
                    {"id": "p1", "title": "Forest", "image": {"src": "forest.jpg"}},
                    {"id": "p2", "title": "Beach", "image": {"src": "beach.jpg"}}
                ]
            }));
        });

        let places = store_for(&server).fetch_available().await.unwrap();

        api_mock.assert();
        assert_eq!(places.len(), 2);
    }
}
