use std::time::{Duration, Instant};

/// How long a key stays drawn as pressed after a trigger.
pub const PRESS_FLASH: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Eq)]
struct ScheduledReset {
    due: Instant,
    note: &'static str,
}

/// One-shot "release the key" tasks, one per trigger.
///
/// Entries are never merged or cancelled: two quick triggers of the same
/// note complete twice.
#[derive(Debug, Default)]
pub struct ResetQueue {
    pending: Vec<ScheduledReset>,
}

impl ResetQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, note: &'static str, now: Instant) {
        let reset = ScheduledReset {
            due: now + PRESS_FLASH,
            note,
        };
        // Triggers arrive in time order, so this is almost always a push.
        let idx = self.pending.partition_point(|r| r.due <= reset.due);
        self.pending.insert(idx, reset);
    }

    /// Removes and returns every reset due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<&'static str> {
        let split = self.pending.partition_point(|r| r.due <= now);
        self.pending.drain(..split).map(|r| r.note).collect()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.first().map(|r| r.due)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
