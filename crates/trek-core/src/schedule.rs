//! Deferred one-shot tasks keyed by a session-time deadline.
//!
//! The queue is polled by the same loop that drives gameplay ticks, so a
//! task never fires re-entrantly and every pending task can be cancelled
//! before the state it refers to is torn down.

use serde::{Deserialize, Serialize};

/// Handle returned when a task is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u64);

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    id: TaskId,
    /// Session time (seconds) at or after which the task fires.
    deadline: f64,
    task: T,
}

/// Pending deferred tasks. Each task fires at most once.
#[derive(Debug, Clone)]
pub struct TaskQueue<T> {
    tasks: Vec<ScheduledTask<T>>,
    next_id: u64,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire once `now >= deadline`.
    pub fn schedule_at(&mut self, deadline: f64, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask { id, deadline, task });
        id
    }

    /// Schedule `task` to fire `delay_ms` milliseconds after `now`.
    pub fn schedule_in(&mut self, now: f64, delay_ms: u64, task: T) -> TaskId {
        self.schedule_at(now + delay_ms as f64 / 1000.0, task)
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Cancel every pending task. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.tasks.len();
        self.tasks.clear();
        count
    }

    /// Remove and return every task whose deadline has passed, ordered by
    /// deadline and then by scheduling order.
    pub fn pop_due(&mut self, now: f64) -> Vec<T> {
        if !self.tasks.iter().any(|t| t.deadline <= now) {
            return Vec::new();
        }

        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|t| t.deadline <= now);
        self.tasks = pending;

        due.sort_by(|a, b| a.deadline.total_cmp(&b.deadline).then(a.id.cmp(&b.id)));
        due.into_iter().map(|t| t.task).collect()
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<f64> {
        self.tasks
            .iter()
            .map(|t| t.deadline)
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
