//! The consumer-facing pull stream.

use std::{
    pin::Pin,
    task::{Context, Poll},
};

use futures::Stream;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use crate::{error::WalkResult, events::WalkEvent};

/// Object-mode stream of walk events.
///
/// The walk is lazy: the controller starts fetching on the first poll.
/// Loader and parse failures are in-band `Err` items; the stream ends only
/// when the whole playlist hierarchy has been consumed. Dropping the stream
/// cancels the walk.
pub struct WalkStream {
    rx: mpsc::Receiver<WalkResult<WalkEvent>>,
    start: Option<oneshot::Sender<()>>,
    cancel: CancellationToken,
}

impl WalkStream {
    pub(crate) fn new(
        rx: mpsc::Receiver<WalkResult<WalkEvent>>,
        start: oneshot::Sender<()>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            rx,
            start: Some(start),
            cancel,
        }
    }

    /// Token cancelling the underlying walk; shared with
    /// `WalkOptions::cancel` when one was provided.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

impl Stream for WalkStream {
    type Item = WalkResult<WalkEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if let Some(start) = this.start.take() {
            // First downstream read kicks off the root fetch.
            let _ = start.send(());
        }
        this.rx.poll_recv(cx)
    }
}

impl Drop for WalkStream {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
