use crate::{Event, Observer, OrderedQueue, SchedulerResult};

/// Moves every record that has arrived by `tick` from `pending` to `ready`.
///
/// `pending` is sorted by arrival, so records are admitted in arrival order
/// and simultaneous arrivals keep their input order. Returns the number of
/// records admitted.
pub fn admit(
    pending: &mut OrderedQueue,
    ready: &mut OrderedQueue,
    tick: usize,
    observer: &mut dyn Observer,
) -> SchedulerResult<usize> {
    let mut admitted = 0;
    while !pending.is_empty() && pending.peek_front()?.arrival() <= tick {
        let mut record = pending.pop_front()?;
        record.admit();
        let pid = record.pid();
        ready.push(record);
        admitted += 1;
        observer.notify(&Event::Admitted { tick, pid });
    }
    Ok(admitted)
}
