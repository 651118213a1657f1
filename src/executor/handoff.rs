//! Rendezvous job handoff
//!
//! A zero-capacity conduit between the dispatcher and the worker pool. A
//! send only completes once some receiver has accepted the value, so the
//! number of accepted-but-unfinished jobs can never exceed the number of
//! receivers. This throttling is load-bearing: replacing it with a
//! buffered queue would let the dispatcher run arbitrarily far ahead of
//! the pool.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, Mutex};

/// The receiving side was dropped before the value could be handed over
#[derive(Error, Debug, PartialEq, Eq)]
#[error("handoff channel closed")]
pub struct SendError;

type Envelope<T> = (T, oneshot::Sender<()>);

/// Sending half of a rendezvous channel
pub struct Sender<T> {
    inner: mpsc::Sender<Envelope<T>>,
}

/// Receiving half of a rendezvous channel.
///
/// Cloneable so multiple workers can compete for jobs; each value is
/// delivered to exactly one of them.
pub struct Receiver<T> {
    inner: Arc<Mutex<mpsc::Receiver<Envelope<T>>>>,
}

impl<T> Clone for Receiver<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Create a rendezvous channel.
///
/// Dropping the `Sender` closes the channel; pending receivers then
/// observe `None`, which is the shutdown signal for the worker pool.
pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
    // Capacity 1 holds the value of the single in-progress send; the
    // acknowledgement below keeps the sender blocked until a receiver
    // has actually taken it.
    let (tx, rx) = mpsc::channel(1);
    (
        Sender { inner: tx },
        Receiver {
            inner: Arc::new(Mutex::new(rx)),
        },
    )
}

impl<T> Sender<T> {
    /// Hand one value to a receiver, waiting until one accepts it.
    pub async fn send(&self, value: T) -> Result<(), SendError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.inner
            .send((value, ack_tx))
            .await
            .map_err(|_| SendError)?;
        ack_rx.await.map_err(|_| SendError)
    }
}

impl<T> Receiver<T> {
    /// Accept the next value, or `None` once the channel is closed and
    /// drained.
    pub async fn recv(&self) -> Option<T> {
        let mut rx = self.inner.lock().await;
        let (value, ack) = rx.recv().await?;
        drop(rx);
        // The sender may have given up waiting; the value is still ours.
        let _ = ack.send(());
        Some(value)
    }
}
