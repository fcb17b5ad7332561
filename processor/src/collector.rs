use serde::{Deserialize, Serialize};

use scheduler::{FinishedProcess, SchedulerError, SchedulerResult};

/// Average times over all finished processes.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    pub turnaround: f64,
    pub waiting: f64,
    pub response: f64,
}

/// Collects finished processes in completion order and keeps the running
/// sums needed for the averages.
#[derive(Debug, Default, Clone)]
pub struct ResultCollector {
    finished: Vec<FinishedProcess>,
    turnaround_sum: u64,
    waiting_sum: u64,
    response_sum: u64,
}

impl ResultCollector {
    pub fn new() -> Self {
        ResultCollector::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ResultCollector {
            finished: Vec::with_capacity(capacity),
            ..ResultCollector::default()
        }
    }

    pub fn record(&mut self, process: FinishedProcess) {
        self.turnaround_sum += process.turnaround as u64;
        self.waiting_sum += process.waiting as u64;
        self.response_sum += process.response as u64;
        self.finished.push(process);
    }

    pub fn count(&self) -> usize {
        self.finished.len()
    }

    pub fn finished(&self) -> &[FinishedProcess] {
        &self.finished
    }

    pub fn into_finished(self) -> Vec<FinishedProcess> {
        self.finished
    }

    pub fn averages(&self) -> SchedulerResult<Averages> {
        if self.finished.is_empty() {
            return Err(SchedulerError::NoData);
        }
        let n = self.finished.len() as f64;
        Ok(Averages {
            turnaround: self.turnaround_sum as f64 / n,
            waiting: self.waiting_sum as f64 / n,
            response: self.response_sum as f64 / n,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scheduler::Pid;

    fn finished(pid: usize, waiting: usize, turnaround: usize, response: usize) -> FinishedProcess {
        FinishedProcess {
            pid: Pid::new(pid),
            arrival: 0,
            burst: turnaround - waiting,
            priority: 0,
            waiting,
            turnaround,
            response,
            completion: turnaround,
            dispatches: 1,
        }
    }

    #[test]
    fn averages_without_data_fail() {
        assert_eq!(ResultCollector::new().averages(), Err(SchedulerError::NoData));
    }

    #[test]
    fn averages_are_idempotent() {
        let mut collector = ResultCollector::with_capacity(2);
        collector.record(finished(0, 0, 5, 0));
        collector.record(finished(1, 3, 4, 1));

        let first = collector.averages().unwrap();
        let second = collector.averages().unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first,
            Averages {
                turnaround: 4.5,
                waiting: 1.5,
                response: 0.5,
            }
        );
    }

    #[test]
    fn keeps_completion_order() {
        let mut collector = ResultCollector::new();
        collector.record(finished(4, 0, 1, 0));
        collector.record(finished(2, 1, 2, 1));
        assert_eq!(collector.count(), 2);
        let order: Vec<Pid> = collector.finished().iter().map(|p| p.pid).collect();
        assert_eq!(order, vec![Pid::new(4), Pid::new(2)]);
    }
}
