use crate::domain::model::Place;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Remote copy of the user's selection.
pub trait PlaceStore: Send + Sync {
    fn fetch_selected(&self) -> impl std::future::Future<Output = Result<Vec<Place>>> + Send;

    /// Replaces the whole remote selection with `places`, in order.
    fn persist_selected(
        &self,
        places: &[Place],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait PlaceCatalog: Send + Sync {
    async fn fetch_available(&self) -> Result<Vec<Place>>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn selected_path(&self) -> &str {
        "user-places"
    }
    fn catalog_path(&self) -> &str {
        "places"
    }
}
