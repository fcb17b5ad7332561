use scheduler::SchedulerError;
use thiserror::Error;

/// Errors returned by a simulation run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The run was rejected before the first tick.
    #[error(transparent)]
    Rejected(#[from] SchedulerError),

    /// The scheduling logic broke one of its invariants and the run was aborted.
    #[error("Scheduling invariant violated at tick {tick}: {source}\n{state}")]
    Invariant {
        tick: usize,
        source: SchedulerError,
        /// A dump of the queues and the CPU slot at the time of the failure.
        state: String,
    },
}
