use crate::core::errors::{LoadError, MutationError};
use crate::domain::model::{Place, SelectedPlaces};
use serde::Serialize;

pub const ERROR_TITLE: &str = "an error occurred";
pub const LOADING_TEXT: &str = "fetching data....";
pub const EMPTY_FALLBACK_TEXT: &str = "Select the places you would like to visit below.";

/// Snapshot of a session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickerView {
    pub places: SelectedPlaces,
    pub is_loading: bool,
    pub load_error: Option<LoadError>,
    pub mutation_error: Option<MutationError>,
    pub pending_removal: Option<Place>,
}

/// What the selection area shows. A load error takes the whole area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListPanel<'a> {
    Failed(&'a LoadError),
    Loading(&'static str),
    Empty(&'static str),
    Places(&'a [Place]),
}

impl PickerView {
    pub fn list_panel(&self) -> ListPanel<'_> {
        if let Some(error) = &self.load_error {
            return ListPanel::Failed(error);
        }
        if self.is_loading {
            return ListPanel::Loading(LOADING_TEXT);
        }
        if self.places.is_empty() {
            return ListPanel::Empty(EMPTY_FALLBACK_TEXT);
        }
        ListPanel::Places(self.places.as_slice())
    }

    /// Overlay shown above the list until dismissed.
    pub fn error_overlay(&self) -> Option<&MutationError> {
        self.mutation_error.as_ref()
    }

    pub fn is_confirming_removal(&self) -> bool {
        self.pending_removal.is_some()
    }
}
