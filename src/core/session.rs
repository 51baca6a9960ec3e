use crate::core::coordinator::{lock, MutationCoordinator, PendingMutation, SharedState};
use crate::core::errors::MutationError;
use crate::core::view::PickerView;
use crate::domain::model::{Place, SelectedPlaces};
use crate::domain::ports::PlaceStore;
use crate::utils::error::{PickerError, Result};
use std::sync::Arc;

/// One user's session over a remote selection.
///
/// Mutations change the local list immediately and queue the remote write,
/// handing back a [`PendingMutation`] for its outcome. Writes go out one at a
/// time in call order on a background task, so a session must be created
/// inside a Tokio runtime.
pub struct PlacePicker<S> {
    state: SharedState,
    coordinator: MutationCoordinator<S>,
}

impl<S: PlaceStore + 'static> PlacePicker<S> {
    pub fn new(store: S) -> Self {
        let state = SharedState::default();
        let coordinator = MutationCoordinator::new(Arc::clone(&state), Arc::new(store));
        Self { state, coordinator }
    }

    pub fn store(&self) -> &S {
        self.coordinator.store()
    }

    /// Fetches the remote selection into the session. Runs once; later calls
    /// fail with [`PickerError::AlreadyLoaded`] without touching the store.
    ///
    /// A fetch failure leaves the list as it was, records the load error and
    /// is returned to the caller as well.
    pub async fn load(&self) -> Result<()> {
        {
            let mut state = lock(&self.state);
            if state.loaded {
                return Err(PickerError::AlreadyLoaded);
            }
            state.loaded = true;
            state.collection.set_loading(true);
        }

        tracing::info!("fetching selected places");
        let fetched = self.coordinator.store().fetch_selected().await;

        let mut state = lock(&self.state);
        let result = match fetched {
            Ok(places) => {
                tracing::info!(count = places.len(), "selected places loaded");
                state.collection.replace(places);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "initial load failed");
                state.errors.set_load_error(err.user_message());
                Err(err)
            }
        };
        state.collection.set_loading(false);
        result
    }

    pub fn select(&self, place: Place) -> PendingMutation {
        self.coordinator.select(place)
    }

    pub fn request_removal(&self, place: Place) {
        tracing::debug!(place = %place.id, "removal requested");
        lock(&self.state).removal.request(place);
    }

    /// Opens the confirmation for a place that is currently selected.
    pub fn request_removal_by_id(&self, id: &str) -> Result<()> {
        let place = lock(&self.state)
            .collection
            .current()
            .get(id)
            .cloned()
            .ok_or_else(|| PickerError::PlaceNotFound { id: id.to_string() })?;
        self.request_removal(place);
        Ok(())
    }

    pub fn cancel_removal(&self) {
        tracing::debug!("removal cancelled");
        lock(&self.state).removal.cancel();
    }

    /// Removes the place awaiting confirmation. `None` when nothing was pending,
    /// in which case nothing is mutated.
    pub fn confirm_removal(&self) -> Option<PendingMutation> {
        let target = lock(&self.state).removal.confirm();
        match target {
            Some(target) => Some(self.coordinator.remove(&target)),
            None => {
                tracing::debug!("confirm without a pending removal ignored");
                None
            }
        }
    }

    /// Resolves once every write queued so far has finished.
    pub async fn settled(&self) {
        self.coordinator.settled().await
    }

    pub fn dismiss_mutation_error(&self) -> Option<MutationError> {
        lock(&self.state).errors.dismiss_mutation_error()
    }

    pub fn selected(&self) -> SelectedPlaces {
        lock(&self.state).collection.current()
    }

    pub fn view(&self) -> PickerView {
        let state = lock(&self.state);
        PickerView {
            places: state.collection.current(),
            is_loading: state.collection.is_loading(),
            load_error: state.errors.load_error().cloned(),
            mutation_error: state.errors.mutation_error().cloned(),
            pending_removal: state.removal.pending().cloned(),
        }
    }
}
