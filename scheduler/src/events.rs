use std::fmt::{self, Display};

use serde::Serialize;

use crate::Pid;

/// A state transition observed during a simulation run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// The process moved from the pending queue to the ready queue.
    Admitted { tick: usize, pid: Pid },

    /// The process was put on the CPU.
    Dispatched {
        tick: usize,
        pid: Pid,
        /// Total waiting time accumulated so far.
        waiting: usize,
    },

    /// The process used up its quantum and went back to the ready queue.
    Preempted {
        tick: usize,
        pid: Pid,
        remaining: usize,
    },

    /// The process executed its whole burst.
    Terminated {
        tick: usize,
        pid: Pid,
        turnaround: usize,
    },
}

impl Event {
    pub fn tick(&self) -> usize {
        match *self {
            Event::Admitted { tick, .. }
            | Event::Dispatched { tick, .. }
            | Event::Preempted { tick, .. }
            | Event::Terminated { tick, .. } => tick,
        }
    }

    pub fn pid(&self) -> Pid {
        match *self {
            Event::Admitted { pid, .. }
            | Event::Dispatched { pid, .. }
            | Event::Preempted { pid, .. }
            | Event::Terminated { pid, .. } => pid,
        }
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Admitted { tick, pid } => write!(f, "arrival:\tt: {tick:2}, p: {pid}"),
            Event::Dispatched { tick, pid, waiting } => {
                write!(f, "dispatch:\tt: {tick:2}, p: {pid}, w: {waiting:2}")
            }
            Event::Preempted {
                tick,
                pid,
                remaining,
            } => write!(f, "timeout:\tt: {tick:2}, p: {pid}, r: {remaining:2}"),
            Event::Terminated {
                tick,
                pid,
                turnaround,
            } => write!(f, "terminate:\tt: {tick:2}, p: {pid}, ta: {turnaround:2}"),
        }
    }
}

/// Receives the events of a run.
///
/// The engine calls the observer after each transition has been applied.
/// Observers cannot influence the run.
pub trait Observer {
    fn notify(&mut self, event: &Event);
}

/// Discards every event.
impl Observer for () {
    fn notify(&mut self, _event: &Event) {}
}

/// Records every event in order.
impl Observer for Vec<Event> {
    fn notify(&mut self, event: &Event) {
        self.push(*event);
    }
}

/// Calls the closure with every event.
impl<F> Observer for F
where
    F: FnMut(&Event),
{
    fn notify(&mut self, event: &Event) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn notify_all(observer: &mut dyn Observer, events: &[Event]) {
        for event in events {
            observer.notify(event);
        }
    }

    fn lifecycle() -> Vec<Event> {
        let pid = Pid::new(2);
        vec![
            Event::Admitted { tick: 1, pid },
            Event::Dispatched { tick: 3, pid, waiting: 2 },
            Event::Terminated { tick: 5, pid, turnaround: 4 },
        ]
    }

    #[test]
    fn closure_counts_events() {
        let mut count = 0;
        let mut last_tick = 0;
        notify_all(
            &mut |event: &Event| {
                count += 1;
                last_tick = event.tick();
            },
            &lifecycle(),
        );
        assert_eq!(count, 3);
        assert_eq!(last_tick, 5);
    }

    #[test]
    fn vec_records_in_order() {
        let mut recorded: Vec<Event> = Vec::new();
        notify_all(&mut recorded, &lifecycle());
        notify_all(&mut (), &lifecycle());

        assert_eq!(recorded, lifecycle());
        assert!(recorded.iter().all(|event| event.pid() == Pid::new(2)));
    }

    #[test]
    fn display_names_the_transition() {
        let event = Event::Preempted {
            tick: 4,
            pid: Pid::new(1),
            remaining: 3,
        };
        assert_eq!(event.to_string(), "timeout:\tt:  4, p: P1, r:  3");
    }
}
