//! Result collection
//!
//! The fan-in half of the engine: a single loop multiplexing result
//! messages and completion signals until every submitted job is
//! accounted for.

use anyhow::{Context, Result};
use std::io::Write;
use tokio::sync::mpsc;
use tracing::debug;

use crate::models::FAIL_MARKER;

/// Collects results for a known number of submitted jobs
pub struct ResultCollector {
    total: usize,
}

impl ResultCollector {
    /// Create a collector expecting `total` jobs
    pub fn new(total: usize) -> Self {
        Self { total }
    }

    /// Multiplex the two event sources until `total` jobs have both
    /// printed a result message and signalled completion.
    ///
    /// Messages are written to `out` as they arrive, in completion
    /// order; this is the sole writer of test output. There is no
    /// priority between the two sources. Returns the number of messages
    /// containing the failure marker.
    pub async fn collect<W: Write>(
        &self,
        mut messages: mpsc::Receiver<String>,
        mut completions: mpsc::Receiver<()>,
        out: &mut W,
    ) -> Result<usize> {
        let mut printed = 0usize;
        let mut completed = 0usize;
        let mut failed = 0usize;

        while printed < self.total || completed < self.total {
            tokio::select! {
                message = messages.recv(), if printed < self.total => {
                    let message =
                        message.context("result channel closed with jobs outstanding")?;
                    if message.contains(FAIL_MARKER) {
                        failed += 1;
                    }
                    out.write_all(message.as_bytes())
                        .context("failed to write test output")?;
                    out.flush().context("failed to write test output")?;
                    printed += 1;
                }
                signal = completions.recv(), if completed < self.total => {
                    signal.context("completion channel closed with jobs outstanding")?;
                    completed += 1;
                    debug!("completed {}/{}", completed, self.total);
                }
            }
        }

        Ok(failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channels() -> (
        mpsc::Sender<String>,
        mpsc::Receiver<String>,
        mpsc::Sender<()>,
        mpsc::Receiver<()>,
    ) {
        let (msg_tx, msg_rx) = mpsc::channel(8);
        let (done_tx, done_rx) = mpsc::channel(8);
        (msg_tx, msg_rx, done_tx, done_rx)
    }

    #[tokio::test]
    async fn test_zero_jobs_terminates_immediately() {
        let (_msg_tx, msg_rx, _done_tx, done_rx) = channels();
        let mut out = Vec::new();

        let failed = ResultCollector::new(0)
            .collect(msg_rx, done_rx, &mut out)
            .await
            .unwrap();

        assert_eq!(failed, 0);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_collects_one_message_per_completion() {
        let (msg_tx, msg_rx, done_tx, done_rx) = channels();
        let mut out = Vec::new();

        msg_tx.send("a\n".to_string()).await.unwrap();
        done_tx.send(()).await.unwrap();
        msg_tx.send("b\n".to_string()).await.unwrap();
        done_tx.send(()).await.unwrap();

        let failed = ResultCollector::new(2)
            .collect(msg_rx, done_rx, &mut out)
            .await
            .unwrap();

        assert_eq!(failed, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "a\nb\n");
    }

    #[tokio::test]
    async fn test_fail_marker_counted() {
        let (msg_tx, msg_rx, done_tx, done_rx) = channels();
        let mut out = Vec::new();

        msg_tx.send("=== RUN TestX\n".to_string()).await.unwrap();
        done_tx.send(()).await.unwrap();
        msg_tx
            .send("--- FAIL: TestY (0.01s)\n".to_string())
            .await
            .unwrap();
        done_tx.send(()).await.unwrap();

        let failed = ResultCollector::new(2)
            .collect(msg_rx, done_rx, &mut out)
            .await
            .unwrap();

        assert_eq!(failed, 1);
    }

    #[tokio::test]
    async fn test_waits_for_trailing_message_after_last_completion() {
        // A completion can be observed while its message is still
        // buffered; the collector must not terminate before printing it.
        let (msg_tx, msg_rx, done_tx, done_rx) = channels();
        let mut out = Vec::new();

        done_tx.send(()).await.unwrap();
        let writer = tokio::spawn(async move {
            tokio::task::yield_now().await;
            msg_tx.send("late\n".to_string()).await.unwrap();
        });

        let failed = ResultCollector::new(1)
            .collect(msg_rx, done_rx, &mut out)
            .await
            .unwrap();
        writer.await.unwrap();

        assert_eq!(failed, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "late\n");
    }

    #[tokio::test]
    async fn test_premature_channel_close_is_an_error() {
        let (msg_tx, msg_rx, done_tx, done_rx) = channels();
        let mut out = Vec::new();

        drop(msg_tx);
        drop(done_tx);

        let result = ResultCollector::new(1)
            .collect(msg_rx, done_rx, &mut out)
            .await;
        assert!(result.is_err());
    }
}
