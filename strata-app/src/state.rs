//! The demo application's state tree.

use strata_mockbackend::{Note, Task, User};

/// Entire application state: one immutable snapshot per commit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub users: Vec<User>,
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
}

/// The state a fresh store starts from: everything empty until the first
/// fetch commits.
pub fn default_state() -> AppState {
    AppState::default()
}
