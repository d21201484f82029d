//! Per-source refresh deadlines.
//!
//! Holds at most one pending deadline per source; scheduling again replaces
//! the old one, so a manual refresh can never stack a second timer on top of
//! the regular one. Time is passed in explicitly, which keeps the scheduler
//! independent of any particular clock.

use std::time::{Duration, Instant};

use crate::source::SourceId;

/// Pending refresh deadlines, one slot per source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scheduler {
    deadlines: [Option<Instant>; SourceId::COUNT],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the timer for `source` to fire `delay` after `now`.
    pub fn schedule(&mut self, source: SourceId, delay: Duration, now: Instant) {
        self.deadlines[source.index()] = Some(now + delay);
    }

    pub fn cancel(&mut self, source: SourceId) {
        self.deadlines[source.index()] = None;
    }

    pub fn deadline(&self, source: SourceId) -> Option<Instant> {
        self.deadlines[source.index()]
    }

    pub fn is_armed(&self, source: SourceId) -> bool {
        self.deadline(source).is_some()
    }

    /// Earliest pending deadline across all sources.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.iter().flatten().min().copied()
    }

    /// Remove and return every source whose deadline is at or before `now`,
    /// earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<SourceId> {
        let mut due: Vec<(Instant, SourceId)> = SourceId::ALL
            .iter()
            .filter_map(|source| {
                self.deadlines[source.index()]
                    .filter(|deadline| *deadline <= now)
                    .map(|deadline| (deadline, *source))
            })
            .collect();
        due.sort();

        for (_, source) in &due {
            self.cancel(*source);
        }
        due.into_iter().map(|(_, source)| source).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_replaces_existing_deadline() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(SourceId::Crypto, Duration::from_secs(30), t0);
        scheduler.schedule(SourceId::Crypto, Duration::from_secs(30), t0 + Duration::from_secs(10));

        assert_eq!(
            scheduler.deadline(SourceId::Crypto),
            Some(t0 + Duration::from_secs(40))
        );
        assert!(scheduler.take_due(t0 + Duration::from_secs(30)).is_empty());
        assert_eq!(
            scheduler.take_due(t0 + Duration::from_secs(40)),
            vec![SourceId::Crypto]
        );
        assert!(!scheduler.is_armed(SourceId::Crypto));
    }

    #[test]
    fn test_take_due_orders_by_deadline() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(SourceId::Weather, Duration::from_secs(20), t0);
        scheduler.schedule(SourceId::News, Duration::from_secs(5), t0);
        scheduler.schedule(SourceId::Activity, Duration::from_secs(90), t0);

        assert_eq!(scheduler.next_deadline(), Some(t0 + Duration::from_secs(5)));
        assert_eq!(
            scheduler.take_due(t0 + Duration::from_secs(60)),
            vec![SourceId::News, SourceId::Weather]
        );
        assert_eq!(scheduler.next_deadline(), Some(t0 + Duration::from_secs(90)));
    }

    #[test]
    fn test_cancel_and_empty() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.next_deadline(), None);

        scheduler.schedule(SourceId::Weather, Duration::ZERO, t0);
        scheduler.cancel(SourceId::Weather);
        assert!(scheduler.take_due(t0 + Duration::from_secs(1)).is_empty());
    }
}
