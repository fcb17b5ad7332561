use log::trace;

use crate::scheduler::dispatch_front;
use crate::{
    admission, Observer, Order, OrderedQueue, ProcessRecord, Progress, Scheduler, SchedulerResult,
};

/// Non preemptive shortest job first.
///
/// Whenever new processes arrive the ready queue is re-sorted by remaining
/// time, ties keeping their admission order. The choice only considers
/// processes that have already arrived, and a dispatched process is never
/// preempted by a shorter arrival.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sjf;

impl Sjf {
    pub fn new() -> Self {
        Sjf
    }
}

impl Scheduler for Sjf {
    fn name(&self) -> &'static str {
        "sjf"
    }

    fn ready_order(&self) -> Order {
        Order::ShortestRemaining
    }

    fn admit(
        &mut self,
        pending: &mut OrderedQueue,
        ready: &mut OrderedQueue,
        tick: usize,
        observer: &mut dyn Observer,
    ) -> SchedulerResult<usize> {
        let admitted = admission::admit(pending, ready, tick, observer)?;
        if admitted > 0 {
            ready.reorder();
            trace!("t={tick}: ready queue reordered by remaining time");
        }
        Ok(admitted)
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
        } else {
            Progress::Running
        }
    }
}
