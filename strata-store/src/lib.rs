//! Strata Store
//!
//! A generic, observable, immutable-snapshot state container. A store owns
//! one state value, accepts typed actions, routes each to its registered
//! reducer, and publishes a new immutable snapshot once the reducer
//! completes - synchronously or after an asynchronous wait.
//!
//! - `SnapshotCell` - last-value slot multicasting every published snapshot
//! - `Provider` - composable handler sets contributed by feature modules
//! - `Registry` - immutable kind -> reducer map with derived constructors
//! - `Store` - dispatch validation, the commit pipeline, selectors
//!
//! Commits are deliberately not serialized by default: two overlapping
//! asynchronous commits may both start from the same snapshot and the last
//! one to finish wins. See [`CommitPolicy`] for the serialized variant.

pub mod cell;
pub mod error;
pub mod provider;
pub mod registry;
pub mod store;

mod bus;

// Re-exports
pub use cell::SnapshotCell;
pub use error::{ComposeError, DispatchError};
pub use provider::Provider;
pub use registry::Registry;
pub use store::{CommitPolicy, Store, StoreBuilder};

// Model types consumers need alongside the store
pub use strata_model::{Action, ActionCreator, HandlerError, PayloadArity, ReducerEntry};
