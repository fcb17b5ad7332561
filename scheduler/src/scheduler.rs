use std::fmt::{self, Display};
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{admission, Observer, Order, OrderedQueue, ProcessRecord, SchedulerError, SchedulerResult};

/// What happened to the running process during the last unit of time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The process keeps the CPU.
    Running,

    /// The process used its whole quantum and has to give the CPU back.
    Expired,

    /// The process executed its last unit of time.
    Completed,
}

impl Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Running => write!(f, "Running"),
            Progress::Expired => write!(f, "Expired"),
            Progress::Completed => write!(f, "Completed"),
        }
    }
}

/// The trait that every scheduling policy implements.
///
/// The simulation loop in the `processor` crate owns the queues and the CPU
/// slot and calls these methods once per tick, in this order: `admit`,
/// `select_next` (only when the CPU is idle), then `advance` after the clock
/// moves forward.
pub trait Scheduler: Send {
    /// Short name of the policy, used in reports and logs.
    fn name(&self) -> &'static str;

    /// The ordering of this policy's ready queue.
    fn ready_order(&self) -> Order;

    /// The quantum, for preemptive policies.
    fn quantum(&self) -> Option<NonZeroUsize> {
        None
    }

    /// Moves the processes that have arrived by `tick` into the ready queue.
    fn admit(
        &mut self,
        pending: &mut OrderedQueue,
        ready: &mut OrderedQueue,
        tick: usize,
        observer: &mut dyn Observer,
    ) -> SchedulerResult<usize> {
        admission::admit(pending, ready, tick, observer)
    }

    /// Picks the process to put on the idle CPU at `tick`.
    ///
    /// Returns `None` when nothing is ready.
    fn select_next(
        &mut self,
        ready: &mut OrderedQueue,
        tick: usize,
    ) -> SchedulerResult<Option<ProcessRecord>>;

    /// Executes one unit of time of `running` and reports the outcome.
    ///
    /// Completion is always reported before quantum expiry.
    fn advance(&mut self, running: &mut ProcessRecord) -> Progress;
}

impl Scheduler for Box<dyn Scheduler> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn ready_order(&self) -> Order {
        (**self).ready_order()
    }

    fn quantum(&self) -> Option<NonZeroUsize> {
        (**self).quantum()
    }

    fn admit(
        &mut self,
        pending: &mut OrderedQueue,
        ready: &mut OrderedQueue,
        tick: usize,
        observer: &mut dyn Observer,
    ) -> SchedulerResult<usize> {
        (**self).admit(pending, ready, tick, observer)
    }

    fn select_next(
        &mut self,
        ready: &mut OrderedQueue,
        tick: usize,
    ) -> SchedulerResult<Option<ProcessRecord>> {
        (**self).select_next(ready, tick)
    }

    fn advance(&mut self, running: &mut ProcessRecord) -> Progress {
        (**self).advance(running)
    }
}

/// Pops the front of `ready` and dispatches it at `tick`.
pub(crate) fn dispatch_front(
    ready: &mut OrderedQueue,
    tick: usize,
) -> SchedulerResult<Option<ProcessRecord>> {
    if ready.is_empty() {
        return Ok(None);
    }
    let mut record = ready.pop_front()?;
    record.dispatch(tick);
    Ok(Some(record))
}

/// The scheduling disciplines that can be selected at runtime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Policy {
    /// First come, first served.
    Fcfs,
    /// Non preemptive shortest job first.
    Sjf,
    /// Round-Robin with a fixed quantum.
    RoundRobin,
}

impl Policy {
    pub const ALL: [Policy; 3] = [Policy::Fcfs, Policy::Sjf, Policy::RoundRobin];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Policy::Fcfs => "fcfs",
            Policy::Sjf => "sjf",
            Policy::RoundRobin => "round-robin",
        }
    }

    /// Builds the scheduler for this policy.
    ///
    /// `quantum` is only checked for [`Policy::RoundRobin`].
    pub fn build(self, quantum: i64) -> SchedulerResult<Box<dyn Scheduler>> {
        Ok(match self {
            Policy::Fcfs => Box::new(crate::fcfs()),
            Policy::Sjf => Box::new(crate::sjf()),
            Policy::RoundRobin => Box::new(crate::round_robin(quantum)?),
        })
    }
}

impl FromStr for Policy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "rr" | "round-robin" | "round_robin" | "roundrobin" => Ok(Policy::RoundRobin),
            _ => Err(SchedulerError::InvalidInput(format!(
                "invalid policy '{}', valid: fcfs, sjf, rr",
                s
            ))),
        }
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Policy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn policy_parsing() {
        assert_eq!("FCFS".parse::<Policy>().unwrap(), Policy::Fcfs);
        assert_eq!("sjf".parse::<Policy>().unwrap(), Policy::Sjf);
        assert_eq!("rr".parse::<Policy>().unwrap(), Policy::RoundRobin);
        assert_eq!(
            "round-robin".parse::<Policy>().unwrap(),
            Policy::RoundRobin
        );
        assert!("lottery".parse::<Policy>().is_err());
    }

    #[test]
    fn build_validates_quantum_for_round_robin_only() {
        assert!(Policy::Fcfs.build(0).is_ok());
        assert!(Policy::Sjf.build(-3).is_ok());
        assert_eq!(
            Policy::RoundRobin.build(0).err(),
            Some(SchedulerError::InvalidQuantum(0))
        );

        let scheduler = Policy::RoundRobin.build(4).unwrap();
        assert_eq!(scheduler.name(), "round-robin");
        assert_eq!(scheduler.quantum(), NonZeroUsize::new(4));
    }
}
