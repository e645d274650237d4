//! DispatchBus - validated actions on their way to the commit pipeline.
//!
//! One internal consumer (the pipeline's unbounded channel) plus a fan-out
//! list of observer taps for `latest_action`. Only actions that passed
//! dispatch validation are ever pushed here.

use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use strata_model::Action;

pub(crate) struct DispatchBus {
    pipeline_tx: mpsc::UnboundedSender<Action>,
    taps: Mutex<Vec<mpsc::UnboundedSender<Action>>>,
}

impl DispatchBus {
    /// Create the bus and hand back the pipeline's receiving end.
    pub(crate) fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (pipeline_tx, pipeline_rx) = mpsc::unbounded_channel();
        (
            Self {
                pipeline_tx,
                taps: Mutex::new(Vec::new()),
            },
            pipeline_rx,
        )
    }

    fn taps(&self) -> std::sync::MutexGuard<'_, Vec<mpsc::UnboundedSender<Action>>> {
        self.taps.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Push a validated action: observers first, then the pipeline.
    ///
    /// A closed pipeline receiver means the store is shutting down; the
    /// action is dropped on the floor like any other in-flight work.
    pub(crate) fn push(&self, action: Action) {
        self.taps().retain(|tx| tx.send(action.clone()).is_ok());
        let _ = self.pipeline_tx.send(action);
    }

    /// Observe every action that reaches the bus from now on, in dispatch
    /// order. No replay; a tap only sees actions pushed after it was taken.
    pub(crate) fn tap(&self) -> UnboundedReceiverStream<Action> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.taps().push(tx);
        UnboundedReceiverStream::new(rx)
    }
}
