use std::collections::HashSet;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::{SchedulerError, SchedulerResult};

/// The PID of a process.
///
/// PIDs are chosen by the caller and must be unique within a batch.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Pid(usize);

impl Pid {
    pub fn new(pid: usize) -> Pid {
        Pid(pid)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl PartialEq<usize> for Pid {
    fn eq(&self, other: &usize) -> bool {
        self.0 == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Where a process currently lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProcessState {
    /// The process has not arrived yet.
    Pending,

    /// The process has arrived and waits for the CPU.
    Ready,

    /// The process owns the CPU.
    Running,

    /// The process has executed its whole burst.
    Finished,
}

impl Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessState::Pending => write!(f, "PENDING"),
            ProcessState::Ready => write!(f, "READY"),
            ProcessState::Running => write!(f, "RUNNING"),
            ProcessState::Finished => write!(f, "FINISHED"),
        }
    }
}

/// A process as supplied by the caller, before validation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    /// The process id.
    pub id: usize,

    /// The tick at which the process becomes ready. Must not be negative.
    pub arrival: i64,

    /// The total CPU time the process needs. Must be positive.
    pub burst: i64,

    /// Carried through to the results, none of the policies use it.
    #[serde(default)]
    pub priority: i32,
}

impl ProcessDefinition {
    pub fn new(id: usize, arrival: i64, burst: i64) -> Self {
        ProcessDefinition {
            id,
            arrival,
            burst,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Checks a batch of definitions and turns it into fresh records.
///
/// The batch is rejected as a whole: either every definition is valid or
/// nothing is returned.
pub fn validate(definitions: &[ProcessDefinition]) -> SchedulerResult<Vec<ProcessRecord>> {
    if definitions.is_empty() {
        return Err(SchedulerError::InvalidInput(String::from(
            "at least one process is required",
        )));
    }

    let mut seen = HashSet::with_capacity(definitions.len());
    definitions
        .iter()
        .map(|definition| {
            if !seen.insert(definition.id) {
                return Err(SchedulerError::InvalidInput(format!(
                    "duplicate process id {}",
                    definition.id
                )));
            }
            ProcessRecord::new(definition)
        })
        .collect()
}

/// The mutable state of one process during a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRecord {
    pid: Pid,
    arrival: usize,
    burst: usize,
    priority: i32,
    state: ProcessState,
    remaining: usize,
    waiting: usize,
    last_ready: usize,
    executed: usize,
    response: Option<usize>,
    dispatches: usize,
}

impl ProcessRecord {
    /// Builds a record in the [`ProcessState::Pending`] state.
    pub fn new(definition: &ProcessDefinition) -> SchedulerResult<Self> {
        let arrival = usize::try_from(definition.arrival).map_err(|_| {
            SchedulerError::InvalidInput(format!(
                "process {} has negative arrival time {}",
                definition.id, definition.arrival
            ))
        })?;
        let burst = match usize::try_from(definition.burst) {
            Ok(burst) if burst > 0 => burst,
            _ => {
                return Err(SchedulerError::InvalidInput(format!(
                    "process {} has non positive burst time {}",
                    definition.id, definition.burst
                )))
            }
        };

        Ok(ProcessRecord {
            pid: Pid::new(definition.id),
            arrival,
            burst,
            priority: definition.priority,
            state: ProcessState::Pending,
            remaining: burst,
            waiting: 0,
            last_ready: arrival,
            executed: 0,
            response: None,
            dispatches: 0,
        })
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn arrival(&self) -> usize {
        self.arrival
    }

    pub fn burst(&self) -> usize {
        self.burst
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn waiting(&self) -> usize {
        self.waiting
    }

    /// Time executed since the current dispatch.
    pub fn executed(&self) -> usize {
        self.executed
    }

    /// The tick of the last move into the ready queue.
    pub fn last_ready(&self) -> usize {
        self.last_ready
    }

    pub fn dispatches(&self) -> usize {
        self.dispatches
    }

    /// Marks the record as arrived.
    ///
    /// The ready sojourn is counted from the arrival time.
    pub fn admit(&mut self) {
        debug_assert_eq!(self.state, ProcessState::Pending);
        self.state = ProcessState::Ready;
        self.last_ready = self.arrival;
    }

    /// Puts the record on the CPU at `tick`.
    ///
    /// Adds the time spent in the ready queue since the last admission or
    /// preemption to the waiting time.
    pub fn dispatch(&mut self, tick: usize) {
        debug_assert_eq!(self.state, ProcessState::Ready);
        self.waiting += tick - self.last_ready;
        self.executed = 0;
        self.dispatches += 1;
        self.response.get_or_insert(tick - self.arrival);
        self.state = ProcessState::Running;
    }

    /// Executes one unit of time.
    pub fn run_tick(&mut self) {
        debug_assert_eq!(self.state, ProcessState::Running);
        debug_assert!(self.remaining > 0);
        self.remaining -= 1;
        self.executed += 1;
    }

    /// Takes the record off the CPU and back into the ready state.
    pub fn preempt(&mut self, tick: usize) {
        debug_assert_eq!(self.state, ProcessState::Running);
        self.last_ready = tick;
        self.state = ProcessState::Ready;
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Consumes the record and returns its final accounting.
    pub fn finish(mut self, tick: usize) -> FinishedProcess {
        debug_assert!(self.is_complete());
        self.state = ProcessState::Finished;
        FinishedProcess {
            pid: self.pid,
            arrival: self.arrival,
            burst: self.burst,
            priority: self.priority,
            waiting: self.waiting,
            turnaround: tick - self.arrival,
            response: self.response.unwrap_or(0),
            completion: tick,
            dispatches: self.dispatches,
        }
    }
}

impl Display for ProcessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\tarrival={}\tburst={}\tremaining={}\twaiting={}\texecuted={}",
            self.pid,
            self.state,
            self.arrival,
            self.burst,
            self.remaining,
            self.waiting,
            self.executed
        )
    }
}

/// The read-only accounting of a process that ran to completion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedProcess {
    pub pid: Pid,
    pub arrival: usize,
    pub burst: usize,
    pub priority: i32,
    pub waiting: usize,
    pub turnaround: usize,
    pub response: usize,
    /// The tick at which the last unit of the burst was executed.
    pub completion: usize,
    /// How many times the process was put on the CPU.
    pub dispatches: usize,
}
