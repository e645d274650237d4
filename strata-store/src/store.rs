//! Store - dispatch validation, the commit pipeline, and selectors.
//!
//! A store wires the pieces together: the snapshot cell holding the current
//! state, the registry of reducers, the dispatch bus, and a spawned
//! pipeline task that commits each validated action.
//!
//! A commit reads the snapshot current at that instant, clones it into a
//! draft, runs the matched reducer (which may suspend on external awaits),
//! and publishes the finalized draft. Under the default
//! [`CommitPolicy::Unserialized`] overlapping commits race: each opens its
//! draft from whatever snapshot is current when it starts, and the last one
//! to finish wins. A slower earlier commit's edits are overwritten, not
//! merged - the lost-update behavior is part of the contract, not a bug.
//! [`CommitPolicy::SingleWriter`] serializes commits instead.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use futures_util::Stream;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;

use strata_model::{Action, ActionCreator};

use crate::bus::DispatchBus;
use crate::cell::SnapshotCell;
use crate::error::{ComposeError, DispatchError};
use crate::provider::Provider;
use crate::registry::Registry;

/// How the pipeline schedules commits relative to each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Every dispatch starts its commit immediately; overlapping commits
    /// race and the last finisher wins.
    #[default]
    Unserialized,
    /// The pipeline finishes each commit before starting the next; drafts
    /// always open from the previous commit's result.
    SingleWriter,
}

struct StoreInner<S> {
    cell: SnapshotCell<S>,
    registry: RwLock<Arc<Registry<S>>>,
    bus: DispatchBus,
}

impl<S> StoreInner<S> {
    fn registry(&self) -> Arc<Registry<S>> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// The observable, immutable-snapshot state container.
///
/// Cheap to clone; all clones share the same cell, registry, and pipeline.
/// Must be constructed inside a tokio runtime (the pipeline is a spawned
/// task). The pipeline shuts down when the last clone is dropped.
pub struct Store<S> {
    inner: Arc<StoreInner<S>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: Clone + Send + Sync + 'static> Store<S> {
    /// Construct a store with the default commit policy.
    ///
    /// Fails if the providers declare any duplicate action kind.
    pub fn new(
        initial: S,
        providers: impl IntoIterator<Item = Provider<S>>,
    ) -> Result<Self, ComposeError> {
        Self::builder().build(initial, providers)
    }

    /// Configure a store before construction.
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    /// Dispatch an action. The only way to update the state's value.
    ///
    /// Synchronous: validates the kind against the registry and returns
    /// without waiting for the commit. An unknown kind fails here and the
    /// action never reaches the bus. Whether the commit itself succeeds is
    /// deliberately not reported back - a failed reducer leaves the
    /// snapshot unchanged and is only visible in the logs.
    pub fn dispatch(&self, action: Action) -> Result<(), DispatchError> {
        if !self.inner.registry().contains(&action.kind) {
            return Err(DispatchError::UnknownActionKind(action.kind));
        }
        self.inner.bus.push(action);
        Ok(())
    }

    /// Select all or part of the current snapshot synchronously.
    pub fn select<T>(&self, selector: impl FnOnce(&S) -> T) -> T {
        selector(&self.inner.cell.current())
    }

    /// The raw current snapshot.
    pub fn snapshot(&self) -> Arc<S> {
        self.inner.cell.current()
    }

    /// Select as a stream: the projection of the snapshot current at
    /// subscribe time first, then one projection per published snapshot,
    /// in publish order, for as long as the store lives.
    pub fn select_async<T>(
        &self,
        selector: impl Fn(&S) -> T + Send + 'static,
    ) -> impl Stream<Item = T> + Send + Unpin {
        self.inner
            .cell
            .subscribe()
            .map(move |snapshot| selector(&snapshot))
    }

    /// Every registered kind mapped to its action constructor.
    ///
    /// The same map is returned until the registry is replaced.
    pub fn actions(&self) -> Arc<HashMap<String, ActionCreator>> {
        self.inner.registry().creators()
    }

    /// Every action that reached the bus (post-validation), in dispatch
    /// order, from subscribe time on.
    pub fn latest_action(&self) -> impl Stream<Item = Action> + Send + Unpin {
        self.inner.bus.tap()
    }

    /// Swap in a registry built from new providers.
    ///
    /// Steady-state stores never do this; it exists so a replaced registry
    /// carries a freshly derived constructor map rather than a stale one.
    pub fn replace_registry(
        &self,
        providers: impl IntoIterator<Item = Provider<S>>,
    ) -> Result<(), ComposeError> {
        let registry = Registry::from_providers(providers)?;
        *self
            .inner
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(registry);
        Ok(())
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("registry", &*self.inner.registry())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Store`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StoreBuilder {
    policy: CommitPolicy,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how overlapping commits are scheduled.
    pub fn commit_policy(mut self, policy: CommitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Merge the providers, seed the cell, and spawn the pipeline.
    pub fn build<S: Clone + Send + Sync + 'static>(
        self,
        initial: S,
        providers: impl IntoIterator<Item = Provider<S>>,
    ) -> Result<Store<S>, ComposeError> {
        let registry = Registry::from_providers(providers)?;
        let (bus, pipeline_rx) = DispatchBus::new();
        let inner = Arc::new(StoreInner {
            cell: SnapshotCell::new(initial),
            registry: RwLock::new(Arc::new(registry)),
            bus,
        });
        spawn_pipeline(Arc::downgrade(&inner), pipeline_rx, self.policy);
        Ok(Store { inner })
    }
}

/// The bus's sole internal consumer.
///
/// Holds only a weak reference to the store: when the last `Store` clone is
/// dropped the bus sender closes and the loop ends.
fn spawn_pipeline<S: Clone + Send + Sync + 'static>(
    inner: Weak<StoreInner<S>>,
    mut rx: mpsc::UnboundedReceiver<Action>,
    policy: CommitPolicy,
) {
    tokio::spawn(async move {
        while let Some(action) = rx.recv().await {
            let Some(inner) = inner.upgrade() else { break };
            let commit = tokio::spawn(commit_action(inner, action));
            match policy {
                CommitPolicy::Unserialized => {
                    // Fire-and-forget: the commit races any other in-flight
                    // commit and nothing awaits its outcome.
                }
                CommitPolicy::SingleWriter => {
                    if let Err(join_err) = commit.await {
                        tracing::error!(error = %join_err, "commit task aborted");
                    }
                }
            }
        }
    });
}

/// Run one action's reducer against a draft of the current snapshot and
/// publish the result.
///
/// Failures do not update the snapshot and are not reported to the
/// dispatch caller (which already returned); the log line is the only
/// trace they leave.
async fn commit_action<S: Clone + Send + Sync + 'static>(inner: Arc<StoreInner<S>>, action: Action) {
    let Action { kind, payload } = action;

    let Some(reducer) = inner.registry().reducer(&kind) else {
        // Validated at dispatch; only a registry swap in between can
        // remove the kind again.
        tracing::error!(%kind, "reducer disappeared before commit");
        return;
    };

    // The draft opens over the snapshot current now - not over whatever is
    // current when a suspended reducer later resumes.
    let draft = (*inner.cell.current()).clone();
    tracing::debug!(%kind, "commit started");

    match reducer(draft, payload).await {
        Ok(next) => {
            inner.cell.publish(Arc::new(next));
            tracing::debug!(%kind, "snapshot published");
        }
        Err(error) => {
            tracing::error!(%kind, %error, "commit failed; snapshot unchanged");
        }
    }
}
