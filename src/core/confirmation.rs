use crate::domain::model::Place;

/// Gate in front of removal: a place must be requested and then confirmed.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RemovalWorkflow {
    #[default]
    Idle,
    PendingConfirmation(Place),
}

impl RemovalWorkflow {
    /// Opens (or retargets) the confirmation. Last request wins.
    pub fn request(&mut self, place: Place) {
        if let RemovalWorkflow::PendingConfirmation(previous) = self {
            tracing::debug!(previous = %previous.id, next = %place.id, "replacing pending removal");
        }
        *self = RemovalWorkflow::PendingConfirmation(place);
    }

    /// Closes the confirmation without touching the selection.
    pub fn cancel(&mut self) {
        *self = RemovalWorkflow::Idle;
    }

    /// Closes the confirmation and hands back the place to remove, if any was pending.
    pub fn confirm(&mut self) -> Option<Place> {
        match std::mem::take(self) {
            RemovalWorkflow::PendingConfirmation(target) => Some(target),
            RemovalWorkflow::Idle => None,
        }
    }

    pub fn pending(&self) -> Option<&Place> {
        match self {
            RemovalWorkflow::PendingConfirmation(target) => Some(target),
            RemovalWorkflow::Idle => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RemovalWorkflow::Idle)
    }
}
