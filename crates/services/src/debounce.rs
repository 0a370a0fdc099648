use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use exam_core::model::QuestionId;

/// Delay between the last keystroke and the automatic recompute.
#[must_use]
pub fn recompute_delay() -> Duration {
    Duration::milliseconds(500)
}

/// Per-question debounce handles for automatic answer recomputes.
///
/// Each question id owns at most one pending deadline. Scheduling again
/// before the deadline fires supersedes the previous one, so a recompute
/// only happens once the inputs stabilize. Nothing here spawns tasks; the
/// event loop drives it by calling [`RecomputeDebouncer::fire_due`].
#[derive(Debug, Clone)]
pub struct RecomputeDebouncer {
    pending: HashMap<QuestionId, DateTime<Utc>>,
    delay: Duration,
}

impl Default for RecomputeDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecomputeDebouncer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            delay: recompute_delay(),
        }
    }

    /// Override the delay; used by tests and by callers that want an
    /// immediate recompute path.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Arm (or re-arm) the recompute deadline for a question.
    pub fn schedule(&mut self, question_id: QuestionId, now: DateTime<Utc>) {
        self.pending.insert(question_id, now + self.delay);
    }

    /// Drop a pending recompute, if any.
    pub fn cancel(&mut self, question_id: QuestionId) {
        self.pending.remove(&question_id);
    }

    #[must_use]
    pub fn is_pending(&self, question_id: QuestionId) -> bool {
        self.pending.contains_key(&question_id)
    }

    /// Drain and return the question ids whose deadline has passed,
    /// in stable (id) order.
    pub fn fire_due(&mut self, now: DateTime<Utc>) -> Vec<QuestionId> {
        let mut due: Vec<QuestionId> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, _)| *id)
            .collect();
        due.sort_unstable();
        for id in &due {
            self.pending.remove(id);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::time::fixed_now;

    fn q(id: u64) -> QuestionId {
        QuestionId::new(id)
    }

    #[test]
    fn fires_after_delay() {
        let mut debouncer = RecomputeDebouncer::new();
        let t0 = fixed_now();
        debouncer.schedule(q(1), t0);

        assert!(debouncer.fire_due(t0).is_empty());
        assert_eq!(
            debouncer.fire_due(t0 + Duration::milliseconds(500)),
            vec![q(1)]
        );
        assert!(!debouncer.is_pending(q(1)));
    }

    #[test]
    fn rescheduling_supersedes_pending_deadline() {
        let mut debouncer = RecomputeDebouncer::new();
        let t0 = fixed_now();
        debouncer.schedule(q(1), t0);
        // Another keystroke 300ms later pushes the deadline out.
        debouncer.schedule(q(1), t0 + Duration::milliseconds(300));

        assert!(
            debouncer
                .fire_due(t0 + Duration::milliseconds(500))
                .is_empty()
        );
        assert_eq!(
            debouncer.fire_due(t0 + Duration::milliseconds(800)),
            vec![q(1)]
        );
    }

    #[test]
    fn cancel_discards_pending() {
        let mut debouncer = RecomputeDebouncer::new();
        let t0 = fixed_now();
        debouncer.schedule(q(1), t0);
        debouncer.cancel(q(1));
        assert!(debouncer.fire_due(t0 + Duration::seconds(10)).is_empty());
    }

    #[test]
    fn questions_debounce_independently() {
        let mut debouncer = RecomputeDebouncer::new();
        let t0 = fixed_now();
        debouncer.schedule(q(2), t0);
        debouncer.schedule(q(1), t0 + Duration::milliseconds(400));

        assert_eq!(
            debouncer.fire_due(t0 + Duration::milliseconds(600)),
            vec![q(2)]
        );
        assert!(debouncer.is_pending(q(1)));
    }

    #[test]
    fn due_ids_come_out_sorted() {
        let mut debouncer = RecomputeDebouncer::new().with_delay(Duration::zero());
        let t0 = fixed_now();
        debouncer.schedule(q(3), t0);
        debouncer.schedule(q(1), t0);
        debouncer.schedule(q(2), t0);
        assert_eq!(debouncer.fire_due(t0), vec![q(1), q(2), q(3)]);
    }
}
