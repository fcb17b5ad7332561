//! A processor simulation library
//!
//! This is used for running the scheduling policies from the [`scheduler`]
//! crate over a batch of processes and collecting their statistics.

use std::fmt::{self, Display};
use std::mem;

use log::{debug, error, info};

use scheduler::{
    Event, Observer, Order, OrderedQueue, Pid, ProcessDefinition, ProcessRecord, Progress,
    Scheduler, SchedulerError, SchedulerResult,
};

mod collector;
mod error;
mod report;

pub use crate::collector::{Averages, ResultCollector};
pub use crate::error::SimulationError;
pub use crate::report::{format_report, Report, Segment};

use crate::report::trace;

/// Writes every event of a run to the `debug` log.
#[derive(Debug, Clone, Copy)]
pub struct LogObserver {
    policy: &'static str,
}

impl LogObserver {
    pub fn new(policy: &'static str) -> Self {
        LogObserver { policy }
    }
}

impl Observer for LogObserver {
    fn notify(&mut self, event: &Event) {
        debug!("[{}] {}", self.policy, event);
    }
}

/// The CPU slot.
#[derive(Debug)]
enum Cpu {
    Idle,
    Running(ProcessRecord),
    /// The process used up its quantum on the previous tick. It is put
    /// back in the ready queue after that tick's arrivals.
    Expired(ProcessRecord),
}

impl Cpu {
    fn pid(&self) -> Option<Pid> {
        match self {
            Cpu::Idle => None,
            Cpu::Running(record) | Cpu::Expired(record) => Some(record.pid()),
        }
    }
}

impl Display for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cpu::Idle => write!(f, "cpu: idle"),
            Cpu::Running(record) => write!(f, "cpu: running {}", record),
            Cpu::Expired(record) => write!(f, "cpu: expired {}", record),
        }
    }
}

/// The processor simulator.
///
/// One instance owns every queue of a single run. The loop is sequential:
/// each tick depends on the state left by the previous one.
pub struct Processor<S: Scheduler> {
    scheduler: S,
    pending: OrderedQueue,
    ready: OrderedQueue,
    cpu: Cpu,
    tick: usize,
    total: usize,
    collector: ResultCollector,
    gantt: Vec<Segment>,
}

impl<S: Scheduler> Processor<S> {
    /// Runs a simulation and logs its events.
    ///
    /// * `scheduler` - the scheduler to use for the simulation.
    /// * `definitions` - the processes, in input order.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::Processor;
    /// use scheduler::ProcessDefinition;
    ///
    /// let batch = [
    ///     ProcessDefinition::new(0, 0, 5),
    ///     ProcessDefinition::new(1, 1, 3),
    ///     ProcessDefinition::new(2, 2, 8),
    /// ];
    /// let report = Processor::run(scheduler::round_robin(2).unwrap(), &batch).unwrap();
    /// assert_eq!(report.elapsed, 16);
    /// ```
    pub fn run(scheduler: S, definitions: &[ProcessDefinition]) -> Result<Report, SimulationError> {
        let mut observer = LogObserver::new(scheduler.name());
        Self::run_observed(scheduler, definitions, &mut observer)
    }

    /// Runs a simulation, reporting every transition to `observer`.
    pub fn run_observed(
        scheduler: S,
        definitions: &[ProcessDefinition],
        observer: &mut dyn Observer,
    ) -> Result<Report, SimulationError> {
        let records = scheduler::validate(definitions)?;
        let mut processor = Processor::new(scheduler, records);
        info!(
            "{}: simulating {} processes",
            processor.scheduler.name(),
            processor.total
        );

        while processor.collector.count() < processor.total {
            if let Err(source) = processor.step(observer) {
                return Err(processor.abort(source));
            }
        }

        processor.into_report()
    }

    fn new(scheduler: S, records: Vec<ProcessRecord>) -> Self {
        let total = records.len();
        let ready = OrderedQueue::new("ready", scheduler.ready_order());
        Processor {
            scheduler,
            pending: OrderedQueue::from_records("pending", Order::Arrival, records),
            ready,
            cpu: Cpu::Idle,
            tick: 0,
            total,
            collector: ResultCollector::with_capacity(total),
            gantt: Vec::new(),
        }
    }

    /// Simulates one tick.
    fn step(&mut self, observer: &mut dyn Observer) -> SchedulerResult<()> {
        self.skip_idle()?;
        let tick = self.tick;
        self.scheduler
            .admit(&mut self.pending, &mut self.ready, tick, observer)?;

        self.cpu = match mem::replace(&mut self.cpu, Cpu::Idle) {
            Cpu::Expired(mut record) => {
                record.preempt(tick);
                observer.notify(&Event::Preempted {
                    tick,
                    pid: record.pid(),
                    remaining: record.remaining(),
                });
                self.ready.push(record);
                Cpu::Idle
            }
            cpu => cpu,
        };

        if let Cpu::Idle = self.cpu {
            if let Some(record) = self.scheduler.select_next(&mut self.ready, tick)? {
                observer.notify(&Event::Dispatched {
                    tick,
                    pid: record.pid(),
                    waiting: record.waiting(),
                });
                self.cpu = Cpu::Running(record);
            }
        }

        trace(&mut self.gantt, self.cpu.pid(), tick, tick + 1);
        self.tick += 1;
        let tick = self.tick;

        self.cpu = match mem::replace(&mut self.cpu, Cpu::Idle) {
            Cpu::Running(mut record) => match self.scheduler.advance(&mut record) {
                Progress::Running => Cpu::Running(record),
                Progress::Expired => Cpu::Expired(record),
                Progress::Completed => {
                    let finished = record.finish(tick);
                    observer.notify(&Event::Terminated {
                        tick,
                        pid: finished.pid,
                        turnaround: finished.turnaround,
                    });
                    self.collector.record(finished);
                    Cpu::Idle
                }
            },
            cpu => cpu,
        };
        Ok(())
    }

    /// Moves the clock to the next arrival while there is nothing to run.
    fn skip_idle(&mut self) -> SchedulerResult<()> {
        if !matches!(self.cpu, Cpu::Idle) || !self.ready.is_empty() || self.pending.is_empty() {
            return Ok(());
        }
        let next = self.pending.peek_front()?.arrival();
        if next > self.tick {
            debug!(
                "{}: idle from {} to {}",
                self.scheduler.name(),
                self.tick,
                next
            );
            trace(&mut self.gantt, None, self.tick, next);
            self.tick = next;
        }
        Ok(())
    }

    fn abort(&self, source: SchedulerError) -> SimulationError {
        let state = self.dump();
        error!(
            "{}: aborting at tick {}: {}\n{}",
            self.scheduler.name(),
            self.tick,
            source,
            state
        );
        SimulationError::Invariant {
            tick: self.tick,
            source,
            state,
        }
    }

    fn dump(&self) -> String {
        format!(
            "{}{}{}\nfinished: {}/{}",
            self.pending,
            self.ready,
            self.cpu,
            self.collector.count(),
            self.total
        )
    }

    fn into_report(self) -> Result<Report, SimulationError> {
        let averages = self.collector.averages()?;
        debug!(
            "{}: finished at tick {} ({} gantt segments)",
            self.scheduler.name(),
            self.tick,
            self.gantt.len()
        );
        Ok(Report {
            policy: self.scheduler.name().to_string(),
            quantum: self.scheduler.quantum().map(|quantum| quantum.get()),
            finished: self.collector.into_finished(),
            averages,
            elapsed: self.tick,
            gantt: self.gantt,
        })
    }
}
