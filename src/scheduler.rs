//! Virtual interval timers.
//!
//! The slider's autoplay is the only asynchronous behavior on the site. It is
//! modeled as a repeating interval on a clock that only moves when the caller
//! advances it, which keeps every test deterministic.
//!
//! Due tasks are handed out one at a time through [`Scheduler::next_due`] so
//! the handler of one task may clear or create intervals before the next one
//! is considered.
//!
//! The clock saturates at [`Duration::MAX`], which stands for "never": an
//! interval whose next run would land there stays registered but never fires.

use std::time::Duration;

/// Browsers clamp tiny intervals; zero would otherwise spin forever.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle returned by [`Scheduler::set_interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Interval<T> {
    id: TimerId,
    period: Duration,
    next_due: Duration,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    intervals: Vec<Interval<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 1,
            intervals: Vec::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live intervals.
    pub fn active(&self) -> usize {
        self.intervals.len()
    }

    /// Fire `task` every `period`, first at `now + period`.
    pub fn set_interval(&mut self, period: Duration, task: T) -> TimerId {
        let period = period.max(MIN_PERIOD);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.intervals.push(Interval {
            id,
            period,
            next_due: self.now.saturating_add(period),
            task,
        });
        id
    }

    /// Cancel an interval. Unknown or already-cleared ids are ignored.
    pub fn clear_interval(&mut self, id: TimerId) -> bool {
        let before = self.intervals.len();
        self.intervals.retain(|i| i.id != id);
        self.intervals.len() != before
    }

    /// Pop the earliest task due at or before `deadline`, moving the clock to
    /// its due time and rescheduling it. Ties go to the older interval.
    pub fn next_due(&mut self, deadline: Duration) -> Option<T> {
        let interval = self
            .intervals
            .iter_mut()
            .filter(|i| i.next_due <= deadline && i.next_due < Duration::MAX)
            .min_by_key(|i| (i.next_due, i.id.0))?;
        self.now = self.now.max(interval.next_due);
        interval.next_due = interval.next_due.saturating_add(interval.period);
        Some(interval.task.clone())
    }

    /// Move the clock to `deadline` once every due task has been popped.
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    /// Advance by `by` and collect every task that fired, in order.
    ///
    /// Convenience for callers whose tasks never touch the scheduler.
    pub fn advance(&mut self, by: Duration) -> Vec<T> {
        let deadline = self.now.saturating_add(by);
        let mut fired = Vec::new();
        while let Some(task) = self.next_due(deadline) {
            fired.push(task);
        }
        self.settle(deadline);
        fired
    }
}
