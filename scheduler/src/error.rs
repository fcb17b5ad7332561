use thiserror::Error;

/// Errors raised by the scheduling policies and the containers they use.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// The process batch is empty or one of its definitions is out of range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Round-Robin was asked to run with a non positive quantum.
    #[error("Invalid quantum: {0} (must be greater than 0)")]
    InvalidQuantum(i64),

    /// A front operation was attempted on an empty queue.
    ///
    /// The engine never does this while its loop invariants hold, so
    /// seeing this error means the scheduling logic is broken.
    #[error("Queue '{queue}' is empty")]
    EmptyQueue {
        /// The queue that was empty.
        queue: &'static str,
    },

    /// Aggregates were requested before any process finished.
    #[error("No process has finished yet")]
    NoData,
}

/// Result alias used across the scheduler crate.
pub type SchedulerResult<T> = Result<T, SchedulerError>;
