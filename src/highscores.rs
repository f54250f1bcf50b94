//! Session score and best-score record
//!
//! The tracker is pure state. Loading and saving the best score goes through
//! [`crate::persistence`]; the tracker only flags when a new record is waiting
//! to be written.

use serde::Serialize;

/// Score & record tracker for one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreTracker {
    /// Obstacles passed this session
    score: u32,
    /// Best final score seen (persisted)
    best: u32,
    /// Outcome of `finalize`; `None` until the session ends
    new_record: Option<bool>,
    /// A new best is waiting to be persisted
    #[serde(skip)]
    unsaved: bool,
}

impl ScoreTracker {
    /// Fresh session on top of a previously stored best score
    pub fn new(best: u32) -> Self {
        Self {
            score: 0,
            best,
            new_record: None,
            unsaved: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// True once the session ended with a score above the previous best
    pub fn is_new_record(&self) -> bool {
        self.new_record.unwrap_or(false)
    }

    /// Whether `finalize` already ran for this session
    pub fn is_finalized(&self) -> bool {
        self.new_record.is_some()
    }

    /// Count a successful pass-through. Returns the new score.
    pub fn record_pass(&mut self) -> u32 {
        if self.is_finalized() {
            return self.score;
        }
        self.score += 1;
        self.score
    }

    /// Close the session. Returns whether the final score is a new record.
    ///
    /// Runs at most once per session; later calls repeat the first answer.
    pub fn finalize(&mut self) -> bool {
        if let Some(new_record) = self.new_record {
            return new_record;
        }

        let new_record = self.score > self.best;
        if new_record {
            self.best = self.score;
            self.unsaved = true;
        }
        self.new_record = Some(new_record);
        new_record
    }

    /// New best score to persist, if any. Clears the pending flag.
    pub fn take_unsaved(&mut self) -> Option<u32> {
        std::mem::take(&mut self.unsaved).then_some(self.best)
    }

    /// Tracker for the next session: score reset, best and any unsaved
    /// record carried over
    pub fn next_session(&self) -> Self {
        Self {
            unsaved: self.unsaved,
            ..Self::new(self.best)
        }
    }

    /// Raise the best score from storage (never lowers it)
    pub fn merge_stored_best(&mut self, stored: u32) {
        self.best = self.best.max(stored);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_equal_score_is_not_a_record() {
        let mut tracker = ScoreTracker::new(2);
        tracker.record_pass();
        tracker.record_pass();
        assert!(!tracker.finalize());
        assert!(!tracker.is_new_record());
        assert_eq!(tracker.best(), 2);
        assert_eq!(tracker.take_unsaved(), None);
    }

    #[test]
    fn test_one_above_best_is_a_record() {
        let mut tracker = ScoreTracker::new(2);
        for _ in 0..3 {
            tracker.record_pass();
        }
        assert!(tracker.finalize());
        assert!(tracker.is_new_record());
        assert_eq!(tracker.best(), 3);
        assert_eq!(tracker.take_unsaved(), Some(3));
        assert_eq!(tracker.take_unsaved(), None);
    }

    #[test]
    fn test_finalize_runs_once() {
        let mut tracker = ScoreTracker::new(0);
        tracker.record_pass();
        assert!(tracker.finalize());
        assert_eq!(tracker.take_unsaved(), Some(1));
        // Repeated finalize must not re-flag the record for saving
        assert!(tracker.finalize());
        assert_eq!(tracker.take_unsaved(), None);
    }

    #[test]
    fn test_no_score_after_finalize() {
        let mut tracker = ScoreTracker::new(0);
        tracker.record_pass();
        tracker.finalize();
        assert_eq!(tracker.record_pass(), 1);
        assert_eq!(tracker.score(), 1);
    }

    #[test]
    fn test_zero_score_session_with_zero_best() {
        let mut tracker = ScoreTracker::new(0);
        assert!(!tracker.finalize());
        assert_eq!(tracker.best(), 0);
    }

    #[test]
    fn test_merge_stored_best_never_lowers() {
        let mut tracker = ScoreTracker::new(10);
        tracker.merge_stored_best(4);
        assert_eq!(tracker.best(), 10);
        tracker.merge_stored_best(12);
        assert_eq!(tracker.best(), 12);
    }

    #[test]
    fn test_next_session_carries_unsaved_record() {
        let mut tracker = ScoreTracker::new(0);
        tracker.record_pass();
        tracker.record_pass();
        tracker.finalize();

        let mut next = tracker.next_session();
        assert_eq!(next.score(), 0);
        assert_eq!(next.best(), 2);
        assert!(!next.is_finalized());
        assert_eq!(next.take_unsaved(), Some(2));

        // Once taken, the flag stays cleared
        assert_eq!(next.next_session().take_unsaved(), None);
    }

    proptest! {
        #[test]
        fn best_never_below_final_score(best in 0u32..50, passes in 0u32..100) {
            let mut tracker = ScoreTracker::new(best);
            for _ in 0..passes {
                tracker.record_pass();
            }
            let new_record = tracker.finalize();
            prop_assert!(tracker.best() >= tracker.score());
            prop_assert!(tracker.best() >= best);
            prop_assert_eq!(new_record, passes > best);
        }
    }
}
