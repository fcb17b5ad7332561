use crate::scheduler::dispatch_front;
use crate::{Order, OrderedQueue, ProcessRecord, Progress, Scheduler, SchedulerResult};

/// First come, first served.
///
/// Non preemptive: the ready queue is served in admission order and a
/// dispatched process keeps the CPU until it completes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Fcfs;

impl Fcfs {
    pub fn new() -> Self {
        Fcfs
    }
}

impl Scheduler for Fcfs {
    fn name(&self) -> &'static str {
        "fcfs"
    }

    fn ready_order(&self) -> Order {
        Order::Fifo
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
