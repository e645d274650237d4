//! Note feature module.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use strata_mockbackend::{MockBackend, Note};
use strata_store::{Provider, ReducerEntry};

use crate::state::AppState;

/// Payload for `update_note`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateNote {
    pub note_id: u64,
    pub note: Note,
}

/// Handler set for the note feature.
pub fn notes_provider(backend: Arc<MockBackend>) -> Provider<AppState> {
    let fetch = backend.clone();
    let add = backend.clone();
    let update = backend.clone();
    let remove = backend;

    Provider::new("notes")
        .register(ReducerEntry::without_payload(
            "get_notes",
            move |mut draft: AppState| {
                let backend = fetch.clone();
                async move {
                    draft.notes = backend.get_notes().await;
                    Ok(draft)
                }
            },
        ))
        .register(ReducerEntry::with_payload(
            "add_note",
            move |mut draft: AppState, note: Note| {
                let backend = add.clone();
                async move {
                    if backend.add_note(note.clone()).await {
                        draft.notes.push(note);
                    }
                    Ok(draft)
                }
            },
        ))
        .register(ReducerEntry::with_payload(
            "update_note",
            move |mut draft: AppState, payload: UpdateNote| {
                let backend = update.clone();
                async move {
                    if backend.update_note(payload.note_id, payload.note.clone()).await {
                        if let Some(found) =
                            draft.notes.iter_mut().find(|n| n.note_id == payload.note_id)
                        {
                            *found = payload.note;
                        }
                    }
                    Ok(draft)
                }
            },
        ))
        .register(ReducerEntry::with_payload(
            "remove_note",
            move |mut draft: AppState, note_id: u64| {
                let backend = remove.clone();
                async move {
                    if backend.remove_note(note_id).await {
                        draft.notes.retain(|n| n.note_id != note_id);
                    }
                    Ok(draft)
                }
            },
        ))
}
