//! A CPU scheduling policy library.
//!
//! This library provides the process records, queues and policies used
//! to simulate First Come First Served, Shortest Job First and
//! Round-Robin scheduling over a known batch of processes. The simulation
//! loop itself lives in the `processor` crate.
//!

use std::num::NonZeroUsize;

mod admission;
mod error;
mod events;
mod process;
mod queue;
mod scheduler;
mod schedulers;

pub use crate::admission::admit;
pub use crate::error::{SchedulerError, SchedulerResult};
pub use crate::events::{Event, Observer};
pub use crate::process::{
    validate, FinishedProcess, Pid, ProcessDefinition, ProcessRecord, ProcessState,
};
pub use crate::queue::{Order, OrderedQueue};
pub use crate::scheduler::{Policy, Progress, Scheduler};
pub use crate::schedulers::{Fcfs, RoundRobin, Sjf};

/// Returns a structure that implements the `Scheduler` trait with a first come, first served policy.
pub fn fcfs() -> Fcfs {
    Fcfs::new()
}

/// Returns a structure that implements the `Scheduler` trait with a non preemptive
/// shortest job first policy.
pub fn sjf() -> Sjf {
    Sjf::new()
}

/// Returns a structure that implements the `Scheduler` trait with a round robin scheduler policy
///
/// * `quantum` - the time units that a process can run before it is preempted,
///               must be greater than 0.
pub fn round_robin(quantum: i64) -> SchedulerResult<RoundRobin> {
    usize::try_from(quantum)
        .ok()
        .and_then(NonZeroUsize::new)
        .map(RoundRobin::new)
        .ok_or(SchedulerError::InvalidQuantum(quantum))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_rejects_non_positive_quantum() {
        assert_eq!(round_robin(0).unwrap_err(), SchedulerError::InvalidQuantum(0));
        assert_eq!(round_robin(-2).unwrap_err(), SchedulerError::InvalidQuantum(-2));
        assert_eq!(round_robin(3).unwrap().quantum(), NonZeroUsize::new(3));
    }
}
