//! Actions and their derived constructors.
//!
//! An `Action` is a typed event: a kind string that selects a registered
//! reducer, plus an optional payload carried as an opaque JSON value. The
//! payload stays opaque until the matched reducer decodes it back into its
//! concrete type.

use serde::Serialize;
use serde_json::Value;

/// A typed event dispatched to the store.
///
/// `kind` must match a registered reducer at dispatch time. The payload is
/// an opaque `serde_json::Value`; reducers built with
/// [`ReducerEntry::with_payload`](crate::ReducerEntry::with_payload) decode
/// it into their declared payload type.
#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    /// Registry key selecting the reducer.
    pub kind: String,
    /// Opaque payload, `None` for payload-less actions.
    pub payload: Option<Value>,
}

impl Action {
    /// Build a payload-less action.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
        }
    }

    /// Build an action carrying an already-encoded payload.
    pub fn with_payload(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload: Some(payload),
        }
    }
}

/// Constructor for actions of one registered kind.
///
/// Derived from a reducer entry's payload arity: entries declared with a
/// payload get a one-argument constructor ([`ActionCreator::create_with`]),
/// payload-less entries get a zero-argument one ([`ActionCreator::create`]).
#[derive(Clone, Debug, PartialEq)]
pub struct ActionCreator {
    kind: String,
    expects_payload: bool,
}

impl ActionCreator {
    /// Derive a creator for the given kind and arity.
    pub fn new(kind: impl Into<String>, expects_payload: bool) -> Self {
        Self {
            kind: kind.into(),
            expects_payload,
        }
    }

    /// The action kind this creator produces.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Whether the matched reducer declares a payload.
    pub fn expects_payload(&self) -> bool {
        self.expects_payload
    }

    /// Build a payload-less action of this kind.
    pub fn create(&self) -> Action {
        Action::new(self.kind.clone())
    }

    /// Build an action of this kind carrying `payload`.
    ///
    /// Fails only if the payload cannot be represented as JSON.
    pub fn create_with<P: Serialize>(&self, payload: P) -> Result<Action, serde_json::Error> {
        Ok(Action::with_payload(
            self.kind.clone(),
            serde_json::to_value(payload)?,
        ))
    }
}
