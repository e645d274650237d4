//! Reducer plumbing.
//!
//! A reducer takes exclusive ownership of a draft (a mutable working copy
//! of the snapshot current when its commit started), optionally a decoded
//! payload, and returns the next draft - synchronously or after awaiting an
//! external operation.
//!
//! Entries are declared explicitly as `(kind, payload arity, handler)`
//! values via [`ReducerEntry::with_payload`] and
//! [`ReducerEntry::without_payload`]; the registry derives action
//! constructors and dispatch validation from this table.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::HandlerError;

/// Boxed future produced by a reducer invocation.
pub type ReducerFuture<S> = Pin<Box<dyn Future<Output = Result<S, HandlerError>> + Send>>;

/// Type-erased reducer: draft in, next draft out.
///
/// The payload arrives still-encoded; the typed factories below decode it
/// before the user's closure runs.
pub type Reducer<S> = Arc<dyn Fn(S, Option<Value>) -> ReducerFuture<S> + Send + Sync>;

/// Whether an entry's reducer declares a payload.
///
/// Drives the derived constructor: `WithPayload` entries get a one-argument
/// creator, `WithoutPayload` entries a zero-argument one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadArity {
    WithoutPayload,
    WithPayload,
}

impl PayloadArity {
    pub fn expects_payload(&self) -> bool {
        matches!(self, PayloadArity::WithPayload)
    }
}

/// One declared `(kind, arity, handler)` registry entry.
pub struct ReducerEntry<S> {
    kind: String,
    arity: PayloadArity,
    reducer: Reducer<S>,
}

impl<S: Send + 'static> ReducerEntry<S> {
    /// Declare a reducer that takes a decoded payload of type `P`.
    ///
    /// A missing or undecodable payload fails the commit with
    /// [`HandlerError`] before the closure runs.
    pub fn with_payload<P, F, Fut>(kind: impl Into<String>, reduce: F) -> Self
    where
        P: DeserializeOwned,
        F: Fn(S, P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<S, HandlerError>> + Send + 'static,
    {
        let kind = kind.into();
        let entry_kind = kind.clone();
        let reducer: Reducer<S> =
            Arc::new(move |draft: S, payload: Option<Value>| -> ReducerFuture<S> {
                let value = match payload {
                    Some(value) => value,
                    None => {
                        let err = HandlerError::MissingPayload(entry_kind.clone());
                        return Box::pin(std::future::ready(Err(err)));
                    }
                };
                match serde_json::from_value::<P>(value) {
                    Ok(decoded) => Box::pin(reduce(draft, decoded)),
                    Err(source) => {
                        let err = HandlerError::PayloadDecode {
                            kind: entry_kind.clone(),
                            source,
                        };
                        Box::pin(std::future::ready(Err(err)))
                    }
                }
            });
        Self {
            kind,
            arity: PayloadArity::WithPayload,
            reducer,
        }
    }

    /// Declare a payload-less reducer.
    ///
    /// Any payload carried by the action is ignored.
    pub fn without_payload<F, Fut>(kind: impl Into<String>, reduce: F) -> Self
    where
        F: Fn(S) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<S, HandlerError>> + Send + 'static,
    {
        let reducer: Reducer<S> =
            Arc::new(move |draft: S, _payload: Option<Value>| -> ReducerFuture<S> {
                Box::pin(reduce(draft))
            });
        Self {
            kind: kind.into(),
            arity: PayloadArity::WithoutPayload,
            reducer,
        }
    }
}

impl<S> ReducerEntry<S> {
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn arity(&self) -> PayloadArity {
        self.arity
    }

    /// Decompose into the registry's storage form.
    pub fn into_parts(self) -> (String, PayloadArity, Reducer<S>) {
        (self.kind, self.arity, self.reducer)
    }
}

impl<S> std::fmt::Debug for ReducerEntry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReducerEntry")
            .field("kind", &self.kind)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Counter {
        value: i64,
    }

    #[tokio::test]
    async fn with_payload_decodes_before_running() {
        let entry = ReducerEntry::with_payload("add", |mut draft: Counter, amount: i64| async move {
            draft.value += amount;
            Ok(draft)
        });
        assert_eq!(entry.kind(), "add");
        assert_eq!(entry.arity(), PayloadArity::WithPayload);

        let (_, _, reducer) = entry.into_parts();
        let next = reducer(Counter::default(), Some(json!(3))).await.unwrap();
        assert_eq!(next.value, 3);
    }

    #[tokio::test]
    async fn with_payload_rejects_a_missing_payload() {
        let entry = ReducerEntry::with_payload("add", |draft: Counter, _amount: i64| async move {
            Ok(draft)
        });
        let (_, _, reducer) = entry.into_parts();
        let err = reducer(Counter::default(), None).await.unwrap_err();
        assert!(matches!(err, HandlerError::MissingPayload(kind) if kind == "add"));
    }

    #[tokio::test]
    async fn with_payload_rejects_an_undecodable_payload() {
        let entry = ReducerEntry::with_payload("add", |draft: Counter, _amount: i64| async move {
            Ok(draft)
        });
        let (_, _, reducer) = entry.into_parts();
        let err = reducer(Counter::default(), Some(json!("not a number")))
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::PayloadDecode { kind, .. } if kind == "add"));
    }

    #[tokio::test]
    async fn without_payload_ignores_any_payload() {
        let entry = ReducerEntry::without_payload("bump", |mut draft: Counter| async move {
            draft.value += 1;
            Ok(draft)
        });
        assert_eq!(entry.arity(), PayloadArity::WithoutPayload);

        let (_, _, reducer) = entry.into_parts();
        let next = reducer(Counter::default(), Some(json!({"stray": true})))
            .await
            .unwrap();
        assert_eq!(next.value, 1);
    }
}
