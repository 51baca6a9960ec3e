use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_ADD_FAILURE: &str = "failed to update the data";
pub const DEFAULT_REMOVE_FAILURE: &str = "failed to Delete the data";
pub const DEFAULT_LOAD_FAILURE: &str = "Failed to fetch user places";

/// Failure of the initial fetch. Terminal for the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadError {
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Add,
    Remove,
}

impl MutationKind {
    pub fn default_message(self) -> &'static str {
        match self {
            MutationKind::Add => DEFAULT_ADD_FAILURE,
            MutationKind::Remove => DEFAULT_REMOVE_FAILURE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationError {
    pub kind: MutationKind,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

/// Two independent error slots: one for the initial load, one for the latest
/// failed mutation.
#[derive(Debug, Default)]
pub struct ErrorChannel {
    load_error: Option<LoadError>,
    mutation_error: Option<MutationError>,
}

impl ErrorChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the load failure. Only the first one sticks; an empty message
    /// falls back to [`DEFAULT_LOAD_FAILURE`].
    pub fn set_load_error(&mut self, message: impl Into<String>) {
        if self.load_error.is_some() {
            tracing::debug!("load error already recorded, ignoring");
            return;
        }
        let message = message.into();
        let message = if message.trim().is_empty() {
            DEFAULT_LOAD_FAILURE.to_string()
        } else {
            message
        };
        self.load_error = Some(LoadError {
            message,
            occurred_at: Utc::now(),
        });
    }

    /// Records a mutation failure, replacing any undismissed one. An empty
    /// message falls back to the kind's default text.
    pub fn set_mutation_error(&mut self, kind: MutationKind, message: impl Into<String>) {
        let message = message.into();
        let message = if message.trim().is_empty() {
            kind.default_message().to_string()
        } else {
            message
        };
        self.mutation_error = Some(MutationError {
            kind,
            message,
            occurred_at: Utc::now(),
        });
    }

    /// Returns the dismissed error, if there was one.
    pub fn dismiss_mutation_error(&mut self) -> Option<MutationError> {
        self.mutation_error.take()
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        self.load_error.as_ref()
    }

    pub fn mutation_error(&self) -> Option<&MutationError> {
        self.mutation_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_is_set_once() {
        let mut channel = ErrorChannel::new();
        channel.set_load_error("Failed to fetch user places");
        channel.set_load_error("second");
        assert_eq!(
            channel.load_error().unwrap().message,
            "Failed to fetch user places"
        );
    }

    #[test]
    fn test_empty_load_error_uses_default() {
        let mut channel = ErrorChannel::new();
        channel.set_load_error("  ");
        assert_eq!(channel.load_error().unwrap().message, DEFAULT_LOAD_FAILURE);
    }

    #[test]
    fn test_mutation_error_defaults_and_dismiss() {
        let mut channel = ErrorChannel::new();
        channel.set_mutation_error(MutationKind::Remove, "");
        assert_eq!(
            channel.mutation_error().unwrap().message,
            "failed to Delete the data"
        );

        channel.set_mutation_error(MutationKind::Add, "Failed to update user data");
        let dismissed = channel.dismiss_mutation_error().unwrap();
        assert_eq!(dismissed.kind, MutationKind::Add);
        assert_eq!(dismissed.message, "Failed to update user data");
        assert!(channel.mutation_error().is_none());
        assert!(channel.dismiss_mutation_error().is_none());
    }

    #[test]
    fn test_slots_are_independent() {
        let mut channel = ErrorChannel::new();
        channel.set_load_error("load");
        channel.set_mutation_error(MutationKind::Add, "");
        channel.dismiss_mutation_error();
        assert!(channel.load_error().is_some());
        assert!(channel.mutation_error().is_none());
    }
}
