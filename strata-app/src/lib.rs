//! Strata App
//!
//! The demo application built on the store: one `AppState` holding users,
//! tasks, and notes, plus one provider per feature area. Each provider's
//! reducers await the mock backend and apply the acknowledged edit to
//! their draft.
//!
//! `app_providers` bundles every feature's handler set; handing the bundle
//! to `Store::new` is the canonical provider-composition example.

pub mod notes;
pub mod state;
pub mod tasks;
pub mod users;
pub mod utility;

pub use notes::notes_provider;
pub use state::{default_state, AppState};
pub use tasks::tasks_provider;
pub use users::users_provider;
pub use utility::utility_provider;

use std::sync::Arc;

use strata_mockbackend::MockBackend;
use strata_store::Provider;

/// Every feature module's provider, ready to hand to `Store::new`.
pub fn app_providers(backend: Arc<MockBackend>) -> Vec<Provider<AppState>> {
    vec![
        users_provider(backend.clone()),
        tasks_provider(backend.clone()),
        notes_provider(backend),
        utility_provider(),
    ]
}
