//! State utilities that belong to no single feature.

use strata_store::{Provider, ReducerEntry};

use crate::state::{default_state, AppState};

/// Handler set for cross-cutting state operations.
pub fn utility_provider() -> Provider<AppState> {
    Provider::new("utility").register(ReducerEntry::without_payload(
        "reset_state",
        |_draft: AppState| async move {
            // Discard the draft entirely; the next snapshot is the default.
            Ok(default_state())
        },
    ))
}
