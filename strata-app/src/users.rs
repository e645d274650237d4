//! User feature module.
//!
//! Every reducer here follows the same shape: await the backend, then
//! apply the acknowledged edit to the draft. The draft was opened when the
//! commit started, so edits land on the snapshot observed at that point -
//! the overlap semantics the store documents.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use strata_mockbackend::{MockBackend, User};
use strata_store::{Provider, ReducerEntry};

use crate::state::AppState;

/// Payload for `update_user`: which record to replace, and with what.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateUser {
    pub user_id: u64,
    pub user: User,
}

/// Handler set for the user feature.
pub fn users_provider(backend: Arc<MockBackend>) -> Provider<AppState> {
    let fetch = backend.clone();
    let add = backend.clone();
    let update = backend.clone();
    let remove = backend;

    Provider::new("users")
        .register(ReducerEntry::without_payload(
            "get_users_and_tasks",
            move |mut draft: AppState| {
                let backend = fetch.clone();
                async move {
                    let bundle = backend.get_users_and_tasks().await;
                    draft.users = bundle.users;
                    draft.tasks = bundle.tasks;
                    Ok(draft)
                }
            },
        ))
        .register(ReducerEntry::with_payload(
            "add_user",
            move |mut draft: AppState, user: User| {
                let backend = add.clone();
                async move {
                    if backend.add_user(user.clone()).await {
                        draft.users.push(user);
                    }
                    Ok(draft)
                }
            },
        ))
        .register(ReducerEntry::with_payload(
            "update_user",
            move |mut draft: AppState, payload: UpdateUser| {
                let backend = update.clone();
                async move {
                    if backend.update_user(payload.user_id, payload.user.clone()).await {
                        if let Some(found) =
                            draft.users.iter_mut().find(|u| u.user_id == payload.user_id)
                        {
                            *found = payload.user;
                        }
                    }
                    Ok(draft)
                }
            },
        ))
        .register(ReducerEntry::with_payload(
            "remove_user",
            move |mut draft: AppState, user_id: u64| {
                let backend = remove.clone();
                async move {
                    if backend.remove_user(user_id).await {
                        draft.users.retain(|u| u.user_id != user_id);
                    }
                    Ok(draft)
                }
            },
        ))
}
