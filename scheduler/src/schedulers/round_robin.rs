use std::num::NonZeroUsize;

use crate::scheduler::dispatch_front;
use crate::{Order, OrderedQueue, ProcessRecord, Progress, Scheduler, SchedulerResult};

/// Round-Robin with a fixed quantum.
///
/// The ready queue is strict FIFO. A dispatched process runs for at most
/// `quantum` units before it goes to the back of the ready queue. A process
/// that finishes exactly when its quantum runs out is completed, not
/// requeued.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: NonZeroUsize,
}

impl RoundRobin {
    pub fn new(quantum: NonZeroUsize) -> Self {
        RoundRobin { quantum }
    }
}

impl Scheduler for RoundRobin {
    fn name(&self) -> &'static str {
        "round-robin"
    }

    fn ready_order(&self) -> Order {
        Order::Fifo
    }

    fn quantum(&self) -> Option<NonZeroUsize> {
        Some(self.quantum)
    }

    fn select_next(
        &mut self,
        ready: &mut OrderedQueue,
        tick: usize,
    ) -> SchedulerResult<Option<ProcessRecord>> {
        dispatch_front(ready, tick)
    }

    fn advance(&mut self, running: &mut ProcessRecord) -> Progress {
        running.run_tick();
        if running.is_complete() {
            Progress::Completed
        } else if running.executed() >= self.quantum.get() {
            Progress::Expired
        } else {
            Progress::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProcessDefinition;
    use pretty_assertions::assert_eq;

    fn running(burst: i64) -> ProcessRecord {
        let mut record = ProcessRecord::new(&ProcessDefinition::new(0, 0, burst)).unwrap();
        record.admit();
        record.dispatch(0);
        record
    }

    #[test]
    fn expires_after_quantum() {
        let mut scheduler = RoundRobin::new(NonZeroUsize::new(2).unwrap());
        let mut record = running(5);
        assert_eq!(scheduler.advance(&mut record), Progress::Running);
        assert_eq!(scheduler.advance(&mut record), Progress::Expired);
        assert_eq!(record.remaining(), 3);
    }

    #[test]
    fn completion_wins_over_expiry() {
        let mut scheduler = RoundRobin::new(NonZeroUsize::new(2).unwrap());
        let mut record = running(2);
        assert_eq!(scheduler.advance(&mut record), Progress::Running);
        assert_eq!(scheduler.advance(&mut record), Progress::Completed);
    }
}
