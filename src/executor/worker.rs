//! Worker pool
//!
//! A fixed number of long-lived workers, each pulling one job at a time
//! from the rendezvous handoff and running it to completion.

use anyhow::{Context, Result};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::executor::handoff;
use crate::runner::TestRunner;

/// A pool of exactly P worker tasks
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `count` workers competing for jobs on the handoff channel.
    ///
    /// Each worker sends one result message and one completion signal
    /// per job, and exits once the handoff channel is closed and
    /// drained.
    pub fn spawn(
        count: usize,
        jobs: handoff::Receiver<String>,
        runner: Arc<TestRunner>,
        messages: mpsc::Sender<String>,
        completions: mpsc::Sender<()>,
    ) -> Self {
        let handles = (0..count)
            .map(|worker_id| {
                let jobs = jobs.clone();
                let runner = Arc::clone(&runner);
                let messages = messages.clone();
                let completions = completions.clone();
                tokio::spawn(worker_loop(worker_id, jobs, runner, messages, completions))
            })
            .collect();

        Self { handles }
    }

    /// Number of workers in the pool
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every worker to exit.
    ///
    /// Workers only exit after the handoff channel closes, so this is
    /// the join half of the pool's shutdown path.
    pub async fn join(self) -> Result<()> {
        for result in join_all(self.handles).await {
            result.context("worker task failed")?;
        }
        Ok(())
    }
}

async fn worker_loop(
    worker_id: usize,
    jobs: handoff::Receiver<String>,
    runner: Arc<TestRunner>,
    messages: mpsc::Sender<String>,
    completions: mpsc::Sender<()>,
) {
    while let Some(test_name) = jobs.recv().await {
        debug!("worker {} running {}", worker_id, test_name);
        let message = runner.run(&test_name).await;

        // The collector going away early means the run is over; there
        // is nobody left to report to.
        if messages.send(message).await.is_err() {
            break;
        }
        if completions.send(()).await.is_err() {
            break;
        }
    }

    debug!("worker {} shutting down", worker_id);
}

/// Feed each test name, in order, into the handoff channel.
///
/// Every send blocks until a worker accepts the job; dropping the sender
/// on return closes the channel and shuts the pool down.
pub async fn dispatch(test_names: Vec<String>, jobs: handoff::Sender<String>) -> Result<()> {
    for test_name in test_names {
        jobs.send(test_name.trim().to_string())
            .await
            .context("worker pool stopped accepting jobs")?;
    }
    Ok(())
}
