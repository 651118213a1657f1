//! Test execution engine
//!
//! Wires the dispatcher, worker pool, and result collector into the
//! fan-out/fan-in pipeline.

pub mod handoff;

mod collector;
mod worker;

pub use collector::ResultCollector;
pub use worker::WorkerPool;

use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::info;

use crate::config::RunConfig;
use crate::models::RunSummary;
use crate::runner::TestRunner;

/// Parallel test dispatch engine
///
/// Fans a list of test names out to a fixed pool of workers over a
/// rendezvous handoff, merges their output back into a single stream,
/// and joins every task before returning.
pub struct DispatchEngine {
    runner: Arc<TestRunner>,
    parallelism: usize,
}

impl DispatchEngine {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            runner: Arc::new(TestRunner::new(config.binary.clone())),
            parallelism: config.parallelism,
        }
    }

    /// Run every named test and stream captured output to `out`.
    ///
    /// Output arrives in completion order, which is some permutation of
    /// the submission order. At most `parallelism` jobs are in flight
    /// at any instant; the rendezvous handoff throttles the dispatcher
    /// to the pool's pace.
    pub async fn run<W: Write>(&self, test_names: Vec<String>, out: &mut W) -> Result<RunSummary> {
        let total = test_names.len();
        info!(
            "dispatching {} tests across {} workers",
            total, self.parallelism
        );

        let (job_tx, job_rx) = handoff::channel();
        let (msg_tx, msg_rx) = mpsc::channel(1);
        let (done_tx, done_rx) = mpsc::channel(1);

        let started = Instant::now();

        let pool = WorkerPool::spawn(
            self.parallelism,
            job_rx,
            Arc::clone(&self.runner),
            msg_tx,
            done_tx,
        );
        let dispatcher = tokio::spawn(worker::dispatch(test_names, job_tx));

        let failed = ResultCollector::new(total)
            .collect(msg_rx, done_rx, out)
            .await?;

        // The dispatcher has nothing left to send once every job has
        // completed; joining it also drops the handoff sender, which is
        // the pool's shutdown signal.
        dispatcher.await.context("dispatcher task failed")??;
        pool.join().await?;

        let elapsed = started.elapsed();
        info!("run finished in {}ms", elapsed.as_millis());

        Ok(RunSummary::new(
            self.runner.binary().to_path_buf(),
            elapsed,
            total,
            failed,
        ))
    }
}
