pub mod confirmation;
pub mod coordinator;
pub mod errors;
pub mod session;
pub mod state;
pub mod view;

pub use crate::domain::model::{ImageRef, Place, SelectedPlaces};
pub use crate::domain::ports::{ConfigProvider, PlaceCatalog, PlaceStore};
pub use crate::utils::error::Result;
