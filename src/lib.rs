pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::TomlConfig;

pub use adapters::HttpPlaceStore;
pub use core::coordinator::PendingMutation;
pub use core::errors::{LoadError, MutationError, MutationKind};
pub use core::session::PlacePicker;
pub use core::view::{ListPanel, PickerView};
pub use domain::model::{ImageRef, Place, SelectedPlaces};
pub use domain::ports::{ConfigProvider, PlaceCatalog, PlaceStore};
pub use utils::error::{PickerError, Result};
