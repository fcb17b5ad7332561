use std::fmt::{self, Display};

use serde::Serialize;

use scheduler::{FinishedProcess, Pid};

use crate::Averages;

/// A run of ticks during which the CPU slot did not change owner.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// The process on the CPU, `None` when the CPU was idle.
    pub pid: Option<Pid>,
    pub start: usize,
    pub end: usize,
}

impl Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pid {
            Some(pid) => write!(f, "{} {}-{}", pid, self.start, self.end),
            None => write!(f, "idle {}-{}", self.start, self.end),
        }
    }
}

impl Segment {
    /// The number of ticks covered.
    pub fn duration(&self) -> usize {
        self.end - self.start
    }
}

/// Appends `start..end` owned by `pid` to `gantt`, extending the last
/// segment when it has the same owner and ends at `start`.
pub(crate) fn trace(gantt: &mut Vec<Segment>, pid: Option<Pid>, start: usize, end: usize) {
    match gantt.last_mut() {
        Some(segment) if segment.pid == pid && segment.end == start => segment.end = end,
        _ => gantt.push(Segment { pid, start, end }),
    }
}

/// The outcome of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// The name of the policy that produced the run.
    pub policy: String,

    /// The Round-Robin quantum, if any.
    pub quantum: Option<usize>,

    /// The finished processes, in completion order.
    pub finished: Vec<FinishedProcess>,

    pub averages: Averages,

    /// The clock value when the last process finished.
    pub elapsed: usize,

    /// The owner of the CPU over time, consecutive ticks with the same
    /// owner merged into one segment.
    pub gantt: Vec<Segment>,
}

impl Report {
    /// Looks up a finished process by PID.
    pub fn process(&self, pid: usize) -> Option<&FinishedProcess> {
        self.finished.iter().find(|process| process.pid == pid)
    }

    /// The PIDs in completion order.
    pub fn completion_order(&self) -> Vec<Pid> {
        self.finished.iter().map(|process| process.pid).collect()
    }

    fn title(&self) -> String {
        match self.quantum {
            Some(quantum) => format!("{} (quantum {})", self.policy.to_uppercase(), quantum),
            None => self.policy.to_uppercase(),
        }
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== {} =====", self.title())?;
        writeln!(f, "IDX\tPID\tARRIVAL\tBURST\tPRI\tWAITING\tTURNAROUND\tRESPONSE")?;
        for (index, process) in self.finished.iter().enumerate() {
            writeln!(
                f,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                index,
                process.pid,
                process.arrival,
                process.burst,
                process.priority,
                process.waiting,
                process.turnaround,
                process.response
            )?;
        }
        writeln!(f, "time flow:\t\t{}", self.elapsed)?;
        writeln!(f, "average turnaround:\t{:.2}", self.averages.turnaround)?;
        writeln!(f, "average waiting:\t{:.2}", self.averages.waiting)?;
        writeln!(f, "average response:\t{:.2}", self.averages.response)?;
        write!(f, "gantt:\t|")?;
        for segment in &self.gantt {
            write!(f, "{}|", segment)?;
        }
        writeln!(f)
    }
}

/// Format a list of [`Report`]s to a [`String`].
///
/// * `reports` - the reports returned by [`crate::Processor::run`].
///
/// ## Example
///
/// ```rust
/// use processor::{format_report, Processor};
/// use scheduler::ProcessDefinition;
///
/// let batch = [ProcessDefinition::new(0, 0, 3), ProcessDefinition::new(1, 1, 2)];
/// let report = Processor::run(scheduler::fcfs(), &batch).unwrap();
///
/// println!("{}", format_report(&[report]));
/// ```
pub fn format_report(reports: &[Report]) -> String {
    let mut s = String::new();
    for report in reports {
        s.push_str(&report.to_string());
        s.push('\n');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn trace_merges_consecutive_ticks() {
        let p0 = Some(Pid::new(0));
        let p1 = Some(Pid::new(1));
        let mut gantt = Vec::new();
        trace(&mut gantt, p0, 0, 1);
        trace(&mut gantt, p0, 1, 2);
        trace(&mut gantt, None, 2, 4);
        trace(&mut gantt, p1, 4, 5);
        trace(&mut gantt, p0, 5, 6);
        assert_eq!(
            gantt,
            vec![
                Segment { pid: p0, start: 0, end: 2 },
                Segment { pid: None, start: 2, end: 4 },
                Segment { pid: p1, start: 4, end: 5 },
                Segment { pid: p0, start: 5, end: 6 },
            ]
        );
        assert_eq!(gantt[1].duration(), 2);
    }

    #[test]
    fn display_prints_segments() {
        let report = Report {
            policy: String::from("round-robin"),
            quantum: Some(2),
            finished: vec![],
            averages: Averages {
                turnaround: 0.0,
                waiting: 0.0,
                response: 0.0,
            },
            elapsed: 3,
            gantt: vec![
                Segment { pid: None, start: 0, end: 1 },
                Segment { pid: Some(Pid::new(4)), start: 1, end: 3 },
            ],
        };
        let text = report.to_string();
        assert!(text.starts_with("===== ROUND-ROBIN (quantum 2) =====\n"));
        assert!(text.ends_with("gantt:\t|idle 0-1|P4 1-3|\n"));
    }
}
