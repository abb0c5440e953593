//! One-shot background jobs.
//!
//! A job runs on tokio's blocking pool and reports exactly once through a
//! oneshot channel. There is no progress reporting and no cancellation.

use crate::pipeline::{DecodedFile, EncodedFile, GlampressPipeline};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    Encode { input: PathBuf, out_dir: Option<PathBuf> },
    Decode { artifact: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobOutput {
    Encoded(EncodedFile),
    Decoded(DecodedFile),
}

/// Terminal notification for a job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Completed(JobOutput),
    Failed { reason: String },
}

impl JobOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Run a job to completion on the current thread.
pub fn run_job(pipeline: &GlampressPipeline, job: Job) -> JobOutcome {
    let result = match job {
        Job::Encode { input, out_dir } => pipeline
            .encode_file(&input, out_dir.as_deref())
            .map(JobOutput::Encoded),
        Job::Decode { artifact } => pipeline.decode_file(&artifact).map(JobOutput::Decoded),
    };
    match result {
        Ok(output) => JobOutcome::Completed(output),
        Err(e) => JobOutcome::Failed { reason: e.to_string() },
    }
}

/// Submit a job to the blocking pool. Must be called inside a tokio runtime.
///
/// The receiver yields one [`JobOutcome`]; a panicking job is reported as `Failed`.
pub fn submit(pipeline: Arc<GlampressPipeline>, job: Job) -> oneshot::Receiver<JobOutcome> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let outcome = match tokio::task::spawn_blocking(move || run_job(&pipeline, job)).await {
            Ok(outcome) => outcome,
            Err(e) => JobOutcome::Failed { reason: format!("worker task failed: {e}") },
        };
        if tx.send(outcome).is_err() {
            tracing::debug!("job outcome dropped, receiver gone");
        }
    });
    rx
}
