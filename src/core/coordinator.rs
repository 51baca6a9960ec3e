use crate::core::confirmation::RemovalWorkflow;
use crate::core::errors::{ErrorChannel, MutationKind};
use crate::core::state::CollectionState;
use crate::domain::model::{Place, SelectedPlaces};
use crate::domain::ports::PlaceStore;
use crate::utils::error::{PickerError, Result};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use tokio::sync::{mpsc, oneshot};

/// Everything a session owns. The lock is only taken for synchronous sections,
/// never across an await.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub(crate) collection: CollectionState,
    pub(crate) errors: ErrorChannel,
    pub(crate) removal: RemovalWorkflow,
    pub(crate) loaded: bool,
}

pub(crate) type SharedState = Arc<Mutex<SessionState>>;

/// Poisoning is ignored: no locked section panics halfway through an update.
pub(crate) fn lock(state: &SharedState) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

enum WriteJob {
    Persist {
        kind: MutationKind,
        snapshot: SelectedPlaces,
        next: SelectedPlaces,
        reply: oneshot::Sender<Result<()>>,
    },
    Barrier(oneshot::Sender<()>),
}

/// Handle on the remote half of an optimistic mutation.
///
/// The local change is applied and the remote write is queued before this
/// value exists. The write runs in the background in call order; dropping the
/// handle does not cancel it. On failure the selection is rolled back to its
/// pre-mutation value and the error channel is written whether or not anyone
/// awaits the handle. Awaiting resolves once the write has finished.
pub struct PendingMutation {
    kind: MutationKind,
    reply: oneshot::Receiver<Result<()>>,
}

impl PendingMutation {
    pub fn kind(&self) -> MutationKind {
        self.kind
    }
}

impl Future for PendingMutation {
    type Output = Result<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.reply)
            .poll(cx)
            .map(|outcome| outcome.unwrap_or_else(|_| Err(PickerError::WriteQueueClosed)))
    }
}

impl std::fmt::Debug for PendingMutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingMutation")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

pub struct MutationCoordinator<S> {
    state: SharedState,
    store: Arc<S>,
    writes: mpsc::UnboundedSender<WriteJob>,
}

impl<S: PlaceStore + 'static> MutationCoordinator<S> {
    /// Spawns the session's writer task, so it must run inside a Tokio runtime.
    pub(crate) fn new(state: SharedState, store: Arc<S>) -> Self {
        let (writes, jobs) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(Arc::clone(&state), Arc::clone(&store), jobs));
        Self {
            state,
            store,
            writes,
        }
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Prepends `place` to the selection (no-op if already selected) and
    /// queues the remote write.
    pub fn select(&self, place: Place) -> PendingMutation {
        let id = place.id.clone();
        let mut state = lock(&self.state);
        let (snapshot, next) = state
            .collection
            .apply_local(move |current| current.with_selected(place));

        tracing::debug!(
            place = %id,
            changed = snapshot.len() != next.len(),
            "applied optimistic select"
        );
        self.enqueue(&mut state, MutationKind::Add, snapshot, next)
    }

    /// Drops `place` from the selection and closes any open confirmation.
    /// Only reachable through a confirmed removal.
    pub(crate) fn remove(&self, place: &Place) -> PendingMutation {
        let mut state = lock(&self.state);
        let (snapshot, next) = state
            .collection
            .apply_local(|current| current.without(&place.id));
        state.removal.cancel();

        tracing::debug!(place = %place.id, remaining = next.len(), "applied optimistic remove");
        self.enqueue(&mut state, MutationKind::Remove, snapshot, next)
    }

    /// Resolves once every write queued before the call has finished.
    pub async fn settled(&self) {
        let (done, wait) = oneshot::channel();
        if self.writes.send(WriteJob::Barrier(done)).is_ok() {
            let _ = wait.await;
        }
    }

    // Queued while the local change is still locked in, so queue order is call order.
    fn enqueue(
        &self,
        state: &mut SessionState,
        kind: MutationKind,
        snapshot: SelectedPlaces,
        next: SelectedPlaces,
    ) -> PendingMutation {
        let (reply, rx) = oneshot::channel();
        let job = WriteJob::Persist {
            kind,
            snapshot,
            next,
            reply,
        };

        if let Err(mpsc::error::SendError(WriteJob::Persist { snapshot, .. })) =
            self.writes.send(job)
        {
            tracing::warn!(?kind, "write queue closed, rolling back selection");
            state.collection.restore(snapshot);
            state
                .errors
                .set_mutation_error(kind, PickerError::WriteQueueClosed.user_message());
        }

        PendingMutation { kind, reply: rx }
    }
}

async fn run_writer<S: PlaceStore>(
    state: SharedState,
    store: Arc<S>,
    mut jobs: mpsc::UnboundedReceiver<WriteJob>,
) {
    while let Some(job) = jobs.recv().await {
        match job {
            WriteJob::Persist {
                kind,
                snapshot,
                next,
                reply,
            } => {
                let outcome = store.persist_selected(next.as_slice()).await;
                match &outcome {
                    Ok(()) => {
                        tracing::debug!(?kind, count = next.len(), "remote selection updated");
                    }
                    Err(err) => {
                        tracing::warn!(
                            ?kind,
                            error = %err,
                            restored = snapshot.len(),
                            "persist failed, rolling back selection"
                        );
                        let mut state = lock(&state);
                        state.collection.restore(snapshot);
                        state.errors.set_mutation_error(kind, err.user_message());
                    }
                }
                // Nobody may be waiting on the handle any more.
                let _ = reply.send(outcome);
            }
            WriteJob::Barrier(done) => {
                let _ = done.send(());
            }
        }
    }
    tracing::debug!("write queue closed");
}
