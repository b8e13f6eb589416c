//! Ordered list of actions due at millisecond offsets from a starting point.
//!
//! Multi-step timed sequences are built as a `Timeline` first, then the web
//! driver turns each entry into a `setTimeout`. Tests replay the same timeline
//! against a virtual clock instead.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub struct Scheduled<T> {
    pub at_ms: u32,
    pub action: T,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Timeline<T> {
    entries: Vec<Scheduled<T>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert keeping entries sorted by due time; equal times keep push order.
    pub fn push(&mut self, at_ms: u32, action: T) {
        let idx = self.entries.partition_point(|e| e.at_ms <= at_ms);
        self.entries.insert(idx, Scheduled { at_ms, action });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scheduled<T>> {
        self.entries.iter()
    }

    /// Remove and return every entry due at or before `now_ms`, in order.
    pub fn drain_due(&mut self, now_ms: u32) -> Vec<Scheduled<T>> {
        let split = self.entries.partition_point(|e| e.at_ms <= now_ms);
        self.entries.drain(..split).collect()
    }

    /// Run entries due now through `run` and hand the rest to `schedule`.
    /// An entry `schedule` rejects is logged and run right away, so a missing
    /// timer never drops a step. Returns how many entries were rejected.
    pub fn dispatch<E: fmt::Display>(
        self,
        mut schedule: impl FnMut(&Scheduled<T>) -> Result<(), E>,
        mut run: impl FnMut(T),
    ) -> usize {
        let mut rejected = 0;
        for entry in self.entries {
            if entry.at_ms == 0 {
                run(entry.action);
                continue;
            }
            if let Err(e) = schedule(&entry) {
                log::warn!("could not schedule step at {} ms, running it now: {e}", entry.at_ms);
                rejected += 1;
                run(entry.action);
            }
        }
        rejected
    }

    /// Split into actions due immediately and those that need a timer.
    pub fn split_immediate(mut self) -> (Vec<T>, Vec<Scheduled<T>>) {
        let now = self.drain_due(0).into_iter().map(|e| e.action).collect();
        (now, self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_stay_sorted_and_stable() {
        let mut t = Timeline::new();
        t.push(300, "c");
        t.push(0, "a");
        t.push(300, "d");
        t.push(100, "b");
        let order: Vec<_> = t.iter().map(|e| e.action).collect();
        assert_eq!(order, ["a", "b", "c", "d"]);
    }

    #[test]
    fn drain_due_is_inclusive_and_consumes() {
        let mut t = Timeline::new();
        t.push(10, 1);
        t.push(20, 2);
        t.push(30, 3);
        let due: Vec<_> = t.drain_due(20).into_iter().map(|e| e.action).collect();
        assert_eq!(due, [1, 2]);
        assert_eq!(t.len(), 1);
        assert!(t.drain_due(20).is_empty());
    }

    #[test]
    fn dispatch_runs_rejected_entries_immediately() {
        let mut t = Timeline::new();
        t.push(0, "now");
        t.push(10, "timed");
        t.push(20, "stuck");
        t.push(30, "late");
        let mut scheduled = Vec::new();
        let mut ran = Vec::new();
        let rejected = t.dispatch(
            |e| {
                if e.at_ms == 20 {
                    return Err("timer quota");
                }
                scheduled.push(e.action);
                Ok(())
            },
            |action| ran.push(action),
        );
        assert_eq!(rejected, 1);
        assert_eq!(scheduled, ["timed", "late"]);
        assert_eq!(ran, ["now", "stuck"]);
    }

    #[test]
    fn split_immediate_separates_zero_delay() {
        let mut t = Timeline::new();
        t.push(0, 'x');
        t.push(5, 'y');
        let (now, later) = t.split_immediate();
        assert_eq!(now, ['x']);
        assert_eq!(later, [Scheduled { at_ms: 5, action: 'y' }]);
    }
}
