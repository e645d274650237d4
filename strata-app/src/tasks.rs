//! Task feature module.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use strata_mockbackend::{MockBackend, Task};
use strata_store::{Provider, ReducerEntry};

use crate::state::AppState;

/// Payload for `update_task`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateTask {
    pub task_id: u64,
    pub task: Task,
}

/// Handler set for the task feature.
pub fn tasks_provider(backend: Arc<MockBackend>) -> Provider<AppState> {
    let add = backend.clone();
    let update = backend.clone();
    let remove = backend;

    Provider::new("tasks")
        .register(ReducerEntry::with_payload(
            "add_task",
            move |mut draft: AppState, task: Task| {
                let backend = add.clone();
                async move {
                    if backend.add_task(task.clone()).await {
                        draft.tasks.push(task);
                    }
                    Ok(draft)
                }
            },
        ))
        .register(ReducerEntry::with_payload(
            "update_task",
            move |mut draft: AppState, payload: UpdateTask| {
                let backend = update.clone();
                async move {
                    if backend.update_task(payload.task_id, payload.task.clone()).await {
                        if let Some(found) =
                            draft.tasks.iter_mut().find(|t| t.task_id == payload.task_id)
                        {
                            *found = payload.task;
                        }
                    }
                    Ok(draft)
                }
            },
        ))
        .register(ReducerEntry::with_payload(
            "remove_task",
            move |mut draft: AppState, task_id: u64| {
                let backend = remove.clone();
                async move {
                    if backend.remove_task(task_id).await {
                        draft.tasks.retain(|t| t.task_id != task_id);
                    }
                    Ok(draft)
                }
            },
        ))
}
