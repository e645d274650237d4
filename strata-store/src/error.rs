//! Errors surfaced at the store's public seams.

use thiserror::Error;

/// Failure while composing providers or constructing a store.
///
/// Raised before the store comes into existence - a colliding registry is
/// never allowed to back a running store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("action kind '{kind}' registered by both '{first}' and '{second}'")]
    DuplicateActionKind {
        kind: String,
        first: String,
        second: String,
    },
}

/// Failure raised synchronously from `dispatch`.
///
/// The only error a dispatch caller ever sees; a rejected action never
/// reaches the bus.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no action registered with kind '{0}'")]
    UnknownActionKind(String),
}
