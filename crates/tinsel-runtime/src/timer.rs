//! Cancellable scheduled tasks driven by frame time.
//!
//! Nothing here runs a callback: `advance` reports which handles came due and
//! the owner reacts. A cancelled handle is never reported again, and handles
//! are never reused, so a stale handle cannot match a newer task.

/// Identifies one scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct ScheduledTask {
    handle: TaskHandle,
    /// Seconds between firings
    interval: f64,
    /// Seconds until the next firing
    remaining: f64,
    repeating: bool,
}

/// Owns a set of pending tasks
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, interval: f64, repeating: bool) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        let interval = interval.max(0.0);
        self.tasks.push(ScheduledTask {
            handle,
            interval,
            remaining: interval,
            repeating,
        });
        handle
    }

    /// Fire once after `delay` seconds
    pub fn schedule_once(&mut self, delay: f64) -> TaskHandle {
        self.insert(delay, false)
    }

    /// Fire every `interval` seconds until cancelled
    pub fn schedule_repeating(&mut self, interval: f64) -> TaskHandle {
        self.insert(interval, true)
    }

    /// Cancel a task. Returns false if it had already finished or been cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Advance time by `dt` and return every firing, in order.
    ///
    /// A repeating task whose interval fits several times into `dt` is reported
    /// once per firing. Zero-interval repeating tasks fire once per advance.
    pub fn advance(&mut self, dt: f64) -> Vec<TaskHandle> {
        let mut fired = Vec::new();
        let dt = dt.max(0.0);

        for task in &mut self.tasks {
            task.remaining -= dt;
            while task.remaining <= 0.0 {
                fired.push(task.handle);
                if !task.repeating || task.interval <= 0.0 {
                    break;
                }
                task.remaining += task.interval;
            }
        }

        self.tasks.retain(|t| t.repeating || t.remaining > 0.0);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_fires_after_delay_then_drops() {
        let mut s = Scheduler::new();
        let h = s.schedule_once(1.0);
        assert!(s.advance(0.5).is_empty());
        assert_eq!(s.advance(0.5), vec![h]);
        assert!(!s.is_pending(h));
        assert!(s.advance(5.0).is_empty());
    }

    #[test]
    fn repeating_fires_each_interval() {
        let mut s = Scheduler::new();
        let h = s.schedule_repeating(1.0);
        let mut count = 0;
        // 5.5 seconds of 60 Hz frames
        for _ in 0..330 {
            count += s.advance(1.0 / 60.0).len();
        }
        assert_eq!(count, 5);
        assert!(s.is_pending(h));
    }

    #[test]
    fn large_step_reports_every_firing() {
        let mut s = Scheduler::new();
        let h = s.schedule_repeating(1.0);
        assert_eq!(s.advance(3.0), vec![h, h, h]);
    }

    #[test]
    fn cancel_stops_future_firings() {
        let mut s = Scheduler::new();
        let h = s.schedule_repeating(1.0);
        s.advance(1.0);
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        assert!(s.advance(10.0).is_empty());
    }

    #[test]
    fn handles_are_not_reused() {
        let mut s = Scheduler::new();
        let a = s.schedule_once(1.0);
        s.cancel(a);
        let b = s.schedule_once(1.0);
        assert_ne!(a, b);
        assert!(!s.is_pending(a));
        assert!(s.is_pending(b));
    }
}
