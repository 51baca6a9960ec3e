use crate::domain::model::{Place, SelectedPlaces};

/// In-memory selection plus the loading flag of the initial fetch.
#[derive(Debug, Default)]
pub struct CollectionState {
    places: SelectedPlaces,
    is_loading: bool,
}

impl CollectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> SelectedPlaces {
        self.places.clone()
    }

    pub fn replace(&mut self, places: Vec<Place>) {
        self.places = SelectedPlaces::from_places(places);
    }

    pub(crate) fn restore(&mut self, snapshot: SelectedPlaces) {
        self.places = snapshot;
    }

    /// Computes the next selection from the value held right now and stores it.
    /// Returns `(snapshot, next)`: the value before and after the mutation.
    pub fn apply_local<F>(&mut self, mutate: F) -> (SelectedPlaces, SelectedPlaces)
    where
        F: FnOnce(&SelectedPlaces) -> SelectedPlaces,
    {
        let next = mutate(&self.places);
        let snapshot = std::mem::replace(&mut self.places, next.clone());
        (snapshot, next)
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }
}
