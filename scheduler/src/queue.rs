use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt::{self, Display};

use crate::{ProcessRecord, SchedulerError, SchedulerResult};

/// The ordering a queue applies when it is reordered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Order {
    /// Ascending arrival time, used by the pending queue.
    Arrival,

    /// Insertion order. Reordering is a no-op.
    Fifo,

    /// Ascending remaining time, used by the SJF ready queue.
    ShortestRemaining,
}

impl Order {
    pub fn compare(self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        match self {
            Order::Arrival => a.arrival().cmp(&b.arrival()),
            Order::Fifo => Ordering::Equal,
            Order::ShortestRemaining => a.remaining().cmp(&b.remaining()),
        }
    }
}

/// A queue of process records.
///
/// `push` always appends; the contents are only rearranged by an explicit
/// call to [`OrderedQueue::reorder`] or [`OrderedQueue::reorder_by`]. Both
/// use a stable sort, so records that compare equal keep their insertion
/// order.
#[derive(Debug, Clone)]
pub struct OrderedQueue {
    name: &'static str,
    order: Order,
    records: VecDeque<ProcessRecord>,
}

impl OrderedQueue {
    pub fn new(name: &'static str, order: Order) -> Self {
        OrderedQueue {
            name,
            order,
            records: VecDeque::new(),
        }
    }

    /// Builds a queue from `records` and sorts it.
    pub fn from_records(name: &'static str, order: Order, records: Vec<ProcessRecord>) -> Self {
        let mut queue = OrderedQueue {
            name,
            order,
            records: records.into(),
        };
        queue.reorder();
        queue
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn push(&mut self, record: ProcessRecord) {
        self.records.push_back(record);
    }

    pub fn pop_front(&mut self) -> SchedulerResult<ProcessRecord> {
        self.records
            .pop_front()
            .ok_or(SchedulerError::EmptyQueue { queue: self.name })
    }

    pub fn peek_front(&self) -> SchedulerResult<&ProcessRecord> {
        self.records
            .front()
            .ok_or(SchedulerError::EmptyQueue { queue: self.name })
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.records.iter()
    }

    /// Sorts the contents with the queue's own ordering.
    pub fn reorder(&mut self) {
        let order = self.order;
        self.reorder_by(|a, b| order.compare(a, b));
    }

    /// Sorts the contents with an arbitrary comparator.
    pub fn reorder_by<F>(&mut self, compare: F)
    where
        F: FnMut(&ProcessRecord, &ProcessRecord) -> Ordering,
    {
        self.records.make_contiguous().sort_by(compare);
    }
}

impl Display for OrderedQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({:?}, {} records)", self.name, self.order, self.records.len())?;
        for record in &self.records {
            writeln!(f, "  {}", record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProcessDefinition;
    use pretty_assertions::assert_eq;

    fn record(id: usize, arrival: i64, burst: i64) -> ProcessRecord {
        ProcessRecord::new(&ProcessDefinition::new(id, arrival, burst)).unwrap()
    }

    fn pids(queue: &OrderedQueue) -> Vec<usize> {
        queue.iter().map(|record| record.pid().get()).collect()
    }

    #[test]
    fn empty_queue_front_operations_fail() {
        let mut queue = OrderedQueue::new("ready", Order::Fifo);
        assert_eq!(queue.name(), "ready");
        assert_eq!(queue.order(), Order::Fifo);
        assert_eq!(
            queue.pop_front(),
            Err(SchedulerError::EmptyQueue { queue: "ready" })
        );
        assert_eq!(
            queue.peek_front().unwrap_err(),
            SchedulerError::EmptyQueue { queue: "ready" }
        );
    }

    #[test]
    fn arrival_order_is_stable() {
        let queue = OrderedQueue::from_records(
            "pending",
            Order::Arrival,
            vec![record(0, 4, 1), record(1, 0, 1), record(2, 4, 1), record(3, 0, 1)],
        );
        assert_eq!(pids(&queue), vec![1, 3, 0, 2]);
    }

    #[test]
    fn fifo_reorder_keeps_insertion_order() {
        let mut queue = OrderedQueue::new("ready", Order::Fifo);
        queue.push(record(5, 3, 9));
        queue.push(record(2, 0, 1));
        queue.push(record(8, 1, 4));
        queue.reorder();
        assert_eq!(pids(&queue), vec![5, 2, 8]);
    }

    #[test]
    fn shortest_remaining_breaks_ties_by_insertion() {
        let mut queue = OrderedQueue::new("ready", Order::ShortestRemaining);
        queue.push(record(0, 0, 6));
        queue.push(record(1, 1, 3));
        queue.push(record(2, 2, 6));
        queue.push(record(3, 3, 3));
        queue.reorder();
        assert_eq!(pids(&queue), vec![1, 3, 0, 2]);

        assert_eq!(queue.pop_front().unwrap().pid(), 1);
        assert_eq!(queue.peek_front().unwrap().pid(), 3);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn reorder_by_accepts_custom_comparator() {
        let mut queue = OrderedQueue::new("ready", Order::Fifo);
        queue.push(record(0, 0, 1));
        queue.push(record(1, 0, 2));
        queue.reorder_by(|a, b| b.burst().cmp(&a.burst()));
        assert_eq!(pids(&queue), vec![1, 0]);
    }
}
