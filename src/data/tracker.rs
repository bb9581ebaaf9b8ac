//! Per-metric animated value tracking.
//!
//! An [`AnimatedValue`] eases its displayed value toward the most recent
//! target over a fixed duration. Retargeting mid-flight starts the new
//! transition from wherever the display currently is, so values never jump.
//!
//! The tracker is driven by an explicit clock: callers pass `now` to both
//! [`AnimatedValue::set_target`] and [`AnimatedValue::advance`]. The owner
//! decides the frame cadence; the tracker itself never schedules anything.

use std::time::{Duration, Instant};

use super::easing::ease_in_out_cubic;

/// Target changes smaller than this are treated as noise and ignored.
pub const CHANGE_EPSILON: f64 = 0.01;

/// Whether a tracker currently has a transition in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// Displayed value equals the target.
    Idle,
    /// An interpolation toward the target is running.
    Animating,
}

/// An in-flight transition.
#[derive(Debug, Clone, Copy)]
struct Animation {
    start_value: f64,
    start_time: Instant,
}

/// Animated display value for a single metric.
#[derive(Debug, Clone)]
pub struct AnimatedValue {
    displayed: f64,
    target: f64,
    duration: Duration,
    animation: Option<Animation>,
}

impl AnimatedValue {
    /// Create an idle tracker showing `initial`.
    pub fn new(initial: f64, duration: Duration) -> Self {
        debug_assert!(initial.is_finite(), "initial value must be finite");
        Self {
            displayed: initial,
            target: initial,
            duration,
            animation: None,
        }
    }

    /// The value to display right now (as of the last `advance`).
    pub fn value(&self) -> f64 {
        self.displayed
    }

    /// The latest target.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// The transition duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn state(&self) -> TrackerState {
        if self.animation.is_some() {
            TrackerState::Animating
        } else {
            TrackerState::Idle
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Point the tracker at a new target.
    ///
    /// Returns `false` (and leaves the tracker untouched) when the target
    /// moved by less than [`CHANGE_EPSILON`]. Otherwise the current
    /// position at `now` becomes the start of a fresh transition, replacing
    /// any transition already in flight.
    ///
    /// `target` must be finite.
    pub fn set_target(&mut self, target: f64, now: Instant) -> bool {
        debug_assert!(target.is_finite(), "animation target must be finite");

        if (target - self.target).abs() < CHANGE_EPSILON {
            return false;
        }

        // Bring the display up to date so the new transition starts where
        // the old one actually is.
        self.advance(now);

        self.target = target;
        self.animation = Some(Animation {
            start_value: self.displayed,
            start_time: now,
        });
        true
    }

    /// Step the transition to `now` and return the displayed value.
    ///
    /// Once the transition completes the displayed value is set to the
    /// target exactly and the tracker goes idle.
    pub fn advance(&mut self, now: Instant) -> f64 {
        let Some(animation) = self.animation else {
            return self.displayed;
        };

        let progress = self.progress(animation, now);
        if progress >= 1.0 {
            self.displayed = self.target;
            self.animation = None;
        } else {
            let eased = ease_in_out_cubic(progress);
            self.displayed =
                animation.start_value + (self.target - animation.start_value) * eased;
        }

        self.displayed
    }

    /// Abandon any in-flight transition and settle on the target.
    pub fn cancel(&mut self) {
        self.animation = None;
        self.displayed = self.target;
    }

    fn progress(&self, animation: Animation, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(animation.start_time);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(2000);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_new_is_idle() {
        let tracker = AnimatedValue::new(42.0, DURATION);
        assert_eq!(tracker.state(), TrackerState::Idle);
        assert_eq!(tracker.value(), 42.0);
        assert_eq!(tracker.target(), 42.0);
    }

    #[test]
    fn test_small_change_is_ignored() {
        let t0 = Instant::now();
        let mut tracker = AnimatedValue::new(10.0, DURATION);

        assert!(!tracker.set_target(10.0, t0));
        assert!(!tracker.set_target(10.009, t0));
        assert!(!tracker.set_target(9.995, t0));

        assert_eq!(tracker.state(), TrackerState::Idle);
        assert_eq!(tracker.value(), 10.0);
        assert_eq!(tracker.target(), 10.0);
    }

    #[test]
    fn test_full_transition() {
        let t0 = Instant::now();
        let mut tracker = AnimatedValue::new(0.0, DURATION);

        assert!(tracker.set_target(100.0, t0));
        assert_eq!(tracker.state(), TrackerState::Animating);

        assert!(tracker.advance(t0).abs() < 1e-9);

        let mid = tracker.advance(t0 + ms(1000));
        assert!(mid > 0.0 && mid < 100.0, "midpoint {} out of range", mid);
        assert_eq!(tracker.state(), TrackerState::Animating);

        assert_eq!(tracker.advance(t0 + ms(2000)), 100.0);
        assert_eq!(tracker.state(), TrackerState::Idle);
    }

    #[test]
    fn test_values_stay_between_start_and_target() {
        let t0 = Instant::now();
        let mut tracker = AnimatedValue::new(80.0, DURATION);
        tracker.set_target(20.0, t0);

        let mut previous = 80.0;
        for step in 0..=40 {
            let v = tracker.advance(t0 + ms(step * 50));
            assert!((20.0..=80.0).contains(&v));
            assert!(v <= previous);
            previous = v;
        }
        assert_eq!(tracker.value(), 20.0);
        assert!(!tracker.is_animating());
    }

    #[test]
    fn test_overshooting_time_settles_exactly() {
        let t0 = Instant::now();
        let mut tracker = AnimatedValue::new(0.0, DURATION);
        tracker.set_target(33.3, t0);
        assert_eq!(tracker.advance(t0 + ms(10_000)), 33.3);
        assert_eq!(tracker.state(), TrackerState::Idle);
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let t0 = Instant::now();
        let mut tracker = AnimatedValue::new(0.0, DURATION);
        tracker.set_target(50.0, t0);

        // Halfway through, ease(0.5) == 0.5
        let t1 = t0 + ms(1000);
        let before = tracker.advance(t1);
        assert!((before - 25.0).abs() < 1e-9);

        assert!(tracker.set_target(80.0, t1));
        // No discontinuity at the retarget instant
        assert!((tracker.advance(t1) - before).abs() < 1e-9);

        // The new transition runs its full duration from the retarget
        let almost = tracker.advance(t1 + ms(1999));
        assert!(almost > 25.0 && almost < 80.0);
        assert_eq!(tracker.advance(t1 + ms(2000)), 80.0);
    }

    #[test]
    fn test_retarget_without_intermediate_frame() {
        let t0 = Instant::now();
        let mut tracker = AnimatedValue::new(0.0, DURATION);
        tracker.set_target(50.0, t0);

        // No advance call between the two targets: the start value must
        // still reflect where the first transition was at t1.
        let t1 = t0 + ms(1000);
        tracker.set_target(80.0, t1);
        assert!((tracker.advance(t1) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_epsilon_compares_against_target_not_display() {
        let t0 = Instant::now();
        let mut tracker = AnimatedValue::new(0.0, DURATION);
        tracker.set_target(100.0, t0);
        tracker.advance(t0 + ms(500));

        // Same target again mid-flight must not restart the transition
        assert!(!tracker.set_target(100.0, t0 + ms(500)));
        assert_eq!(tracker.advance(t0 + ms(2000)), 100.0);
    }

    #[test]
    fn test_cancel_settles_on_target() {
        let t0 = Instant::now();
        let mut tracker = AnimatedValue::new(0.0, DURATION);
        tracker.set_target(60.0, t0);
        tracker.advance(t0 + ms(300));

        tracker.cancel();
        assert_eq!(tracker.state(), TrackerState::Idle);
        assert_eq!(tracker.value(), 60.0);

        // Later frames are inert
        assert_eq!(tracker.advance(t0 + ms(1000)), 60.0);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let t0 = Instant::now();
        let mut tracker = AnimatedValue::new(0.0, Duration::ZERO);
        tracker.set_target(5.0, t0);
        assert_eq!(tracker.advance(t0), 5.0);
        assert!(!tracker.is_animating());
    }
}
