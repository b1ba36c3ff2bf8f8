//! Temporal smoothing for noisy per-tick signals
//!
//! A per-frame classifier flickers: a single misread tick would otherwise
//! flip the displayed state or count a phantom blink. The three small state
//! machines here convert the raw stream into a stable output. Each one owns
//! its counters explicitly and is advanced once per tick by the caller;
//! there are no globals and no timers.
//!
//! - [`LabelConfirmer`]: a new label must sustain for N consecutive ticks
//!   before it is accepted; the accepted label is sticky.
//! - [`SustainedCondition`]: a boolean condition must hold for N consecutive
//!   ticks to raise an alert; one false tick resets the run and clears the
//!   alert immediately.
//! - [`PulseTally`]: counts completed true-runs of at least a minimum length,
//!   once per run, on the true-to-false transition.

use serde::{Deserialize, Serialize};

/// Run-length confirmation over an arbitrary label stream.
///
/// Tracks the most recent raw label and how many consecutive ticks it has
/// been seen. Once the run reaches `confirm_ticks`, the label becomes the
/// confirmed output. The confirmed label does not revert when the raw signal
/// turns noisy again; only a *different* label sustaining a full run
/// replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfirmer<L> {
    last_raw: L,
    run_length: u32,
    confirmed: L,
    confirm_ticks: u32,
}

impl<L: Copy + PartialEq> LabelConfirmer<L> {
    /// Create a confirmer resting on the idle label.
    ///
    /// `confirm_ticks` must be positive; engine configs validate this before
    /// construction.
    pub fn new(idle: L, confirm_ticks: u32) -> Self {
        debug_assert!(confirm_ticks > 0);
        Self {
            last_raw: idle,
            run_length: 0,
            confirmed: idle,
            confirm_ticks,
        }
    }

    /// Feed one raw label and return the (possibly updated) confirmed label
    pub fn observe(&mut self, raw: L) -> L {
        if raw == self.last_raw {
            self.run_length = self.run_length.saturating_add(1);
        } else {
            self.last_raw = raw;
            self.run_length = 1;
        }

        if self.run_length >= self.confirm_ticks {
            self.confirmed = self.last_raw;
        }

        self.confirmed
    }

    /// Currently confirmed label
    pub fn confirmed(&self) -> L {
        self.confirmed
    }

    /// Consecutive ticks the current raw label has been seen
    pub fn run_length(&self) -> u32 {
        self.run_length
    }
}

/// Sustained-condition alert with immediate release.
///
/// The run counter grows while the condition holds and snaps back to zero on
/// the first tick it does not; the alert clears on that same tick. There is
/// no stickiness in the negative direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SustainedCondition {
    run_length: u32,
    trigger_ticks: u32,
    active: bool,
}

impl SustainedCondition {
    /// `trigger_ticks` must be positive; engine configs validate this.
    pub fn new(trigger_ticks: u32) -> Self {
        debug_assert!(trigger_ticks > 0);
        Self {
            run_length: 0,
            trigger_ticks,
            active: false,
        }
    }

    /// Feed one tick of the condition and return whether the alert is active
    pub fn observe(&mut self, held: bool) -> bool {
        if held {
            self.run_length = self.run_length.saturating_add(1);
            if self.run_length >= self.trigger_ticks {
                self.active = true;
            }
        } else {
            self.run_length = 0;
            self.active = false;
        }

        self.active
    }

    /// Whether the alert is currently raised
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Consecutive ticks the condition has held
    pub fn run_length(&self) -> u32 {
        self.run_length
    }
}

/// Edge-triggered counter of completed minimum-duration runs.
///
/// A run of `held == true` ticks that reaches `min_run` and then ends (the
/// first `false` tick) bumps the tally exactly once, regardless of how long
/// the run lasted. Runs shorter than `min_run` never count. The tally is
/// monotonic for the life of the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseTally {
    run_length: u32,
    min_run: u32,
    count: u64,
}

impl PulseTally {
    /// `min_run` must be positive; engine configs validate this.
    pub fn new(min_run: u32) -> Self {
        debug_assert!(min_run > 0);
        Self {
            run_length: 0,
            min_run,
            count: 0,
        }
    }

    /// Feed one tick; returns true when this tick completed a qualifying run
    pub fn observe(&mut self, held: bool) -> bool {
        if held {
            self.run_length = self.run_length.saturating_add(1);
            return false;
        }

        let completed = self.run_length >= self.min_run;
        if completed {
            self.count += 1;
        }
        self.run_length = 0;
        completed
    }

    /// Total qualifying runs seen so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Length of the in-progress run, 0 if the condition is not holding
    pub fn run_length(&self) -> u32 {
        self.run_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    enum Label {
        Idle,
        A,
        B,
    }

    #[test]
    fn test_confirmer_accepts_after_full_run() {
        let mut confirmer = LabelConfirmer::new(Label::Idle, 5);

        for _ in 0..4 {
            assert_eq!(confirmer.observe(Label::A), Label::Idle);
        }
        // Fifth consecutive tick flips the confirmed label
        assert_eq!(confirmer.observe(Label::A), Label::A);
    }

    #[test]
    fn test_confirmer_four_ticks_is_not_enough() {
        let mut confirmer = LabelConfirmer::new(Label::Idle, 5);

        for _ in 0..4 {
            confirmer.observe(Label::A);
        }
        assert_eq!(confirmer.confirmed(), Label::Idle);
    }

    #[test]
    fn test_confirmer_interrupted_run_resets() {
        let mut confirmer = LabelConfirmer::new(Label::Idle, 5);

        for _ in 0..4 {
            confirmer.observe(Label::A);
        }
        confirmer.observe(Label::B);

        assert_eq!(confirmer.run_length(), 1);
        assert_eq!(confirmer.confirmed(), Label::Idle);
    }

    #[test]
    fn test_confirmer_is_sticky_through_noise() {
        let mut confirmer = LabelConfirmer::new(Label::Idle, 3);

        for _ in 0..3 {
            confirmer.observe(Label::A);
        }
        assert_eq!(confirmer.confirmed(), Label::A);

        // Jitter that never sustains must not dislodge the confirmed label
        confirmer.observe(Label::B);
        confirmer.observe(Label::Idle);
        confirmer.observe(Label::B);
        assert_eq!(confirmer.confirmed(), Label::A);
    }

    #[test]
    fn test_confirmer_idle_can_reconfirm() {
        let mut confirmer = LabelConfirmer::new(Label::Idle, 3);

        for _ in 0..3 {
            confirmer.observe(Label::A);
        }
        for _ in 0..3 {
            confirmer.observe(Label::Idle);
        }
        assert_eq!(confirmer.confirmed(), Label::Idle);
    }

    #[test]
    fn test_sustained_alert_on_threshold_tick() {
        let mut condition = SustainedCondition::new(60);

        for tick in 1..=59 {
            assert!(!condition.observe(true), "alert too early at tick {tick}");
        }
        assert!(condition.observe(true));
    }

    #[test]
    fn test_sustained_drop_on_tick_59_prevents_alert() {
        let mut condition = SustainedCondition::new(60);

        for _ in 0..58 {
            condition.observe(true);
        }
        assert!(!condition.observe(false));
        assert_eq!(condition.run_length(), 0);
        assert!(!condition.observe(true));
    }

    #[test]
    fn test_sustained_clears_on_first_good_tick() {
        let mut condition = SustainedCondition::new(3);

        for _ in 0..10 {
            condition.observe(true);
        }
        assert!(condition.is_active());

        // One good tick drops both the run and the alert
        assert!(!condition.observe(false));
        assert!(!condition.is_active());
        assert_eq!(condition.run_length(), 0);
    }

    #[test]
    fn test_tally_short_run_never_counts() {
        let mut tally = PulseTally::new(2);

        tally.observe(true);
        assert!(!tally.observe(false));
        assert_eq!(tally.count(), 0);
    }

    #[test]
    fn test_tally_exact_minimum_counts_once() {
        let mut tally = PulseTally::new(2);

        tally.observe(true);
        tally.observe(true);
        assert!(tally.observe(false));
        assert_eq!(tally.count(), 1);
    }

    #[test]
    fn test_tally_long_run_counts_once() {
        let mut tally = PulseTally::new(2);

        for _ in 0..10 {
            tally.observe(true);
        }
        assert!(tally.observe(false));
        assert_eq!(tally.count(), 1);

        // Staying open afterwards adds nothing
        assert!(!tally.observe(false));
        assert_eq!(tally.count(), 1);
    }

    #[test]
    fn test_tally_counts_each_qualifying_run() {
        let mut tally = PulseTally::new(2);

        for _ in 0..3 {
            tally.observe(true);
            tally.observe(true);
            tally.observe(false);
        }
        assert_eq!(tally.count(), 3);
    }
}
