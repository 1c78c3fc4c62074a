//! Shimmer sweep animation
//!
//! The sweep is a repeating 0 → 100 progress cycle. Nothing here owns a
//! clock: the host calls [`ShimmerAnimator::tick_at`] once per
//! frame and redraws when it returns `true`.

use std::time::{Duration, Instant};

use crate::easing::Easing;
use crate::error::AnimationError;

/// Progress (0-100) at `elapsed` into a repeating cycle of `period`
///
/// Each cycle restarts from 0; the curve never runs backwards.
pub fn progress_at(elapsed: Duration, period: Duration, easing: Easing) -> f32 {
    let period_nanos = period.as_nanos();
    if period_nanos == 0 {
        return 0.0;
    }
    let into_cycle = elapsed.as_nanos() % period_nanos;
    let t = (into_cycle as f64 / period_nanos as f64) as f32;
    (easing.apply(t) * 100.0).clamp(0.0, 100.0)
}

/// Live sweep state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningShimmer {
    pub started_at: Instant,
    pub period: Duration,
    pub easing: Easing,
    /// Current position in the sweep (0-100)
    pub progress: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Running(RunningShimmer),
}

/// Drives the shimmer progress value
#[derive(Debug, Clone, Default)]
pub struct ShimmerAnimator {
    state: AnimationState,
    easing: Easing,
}

impl ShimmerAnimator {
    pub fn new(easing: Easing) -> Self {
        Self {
            state: AnimationState::Idle,
            easing,
        }
    }

    /// Easing used by the next `start`
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimationState::Running(_))
    }

    /// Current progress; always 0 while idle
    pub fn progress(&self) -> f32 {
        match self.state {
            AnimationState::Idle => 0.0,
            AnimationState::Running(run) => run.progress,
        }
    }

    /// Begin (or restart) the sweep at progress 0
    ///
    /// A running sweep is replaced.
    pub fn start_at(&mut self, period: Duration, now: Instant) -> Result<(), AnimationError> {
        if period.is_zero() {
            return Err(AnimationError::InvalidPeriod { period });
        }

        let replaced = self.is_running();
        self.state = AnimationState::Running(RunningShimmer {
            started_at: now,
            period,
            easing: self.easing,
            progress: 0.0,
        });
        tracing::debug!(?period, replaced, "shimmer started");
        Ok(())
    }

    /// Cancel the sweep and reset progress
    pub fn stop(&mut self) {
        if let AnimationState::Running(run) = self.state {
            tracing::debug!(progress = run.progress, "shimmer stopped");
        }
        self.state = AnimationState::Idle;
    }

    /// Advance progress to `now`. Returns `true` when a redraw is due.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        match &mut self.state {
            AnimationState::Idle => false,
            AnimationState::Running(run) => {
                let elapsed = now.saturating_duration_since(run.started_at);
                run.progress = progress_at(elapsed, run.period, run.easing);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(1000);

    #[test]
    fn start_then_stop_is_idle_at_zero() {
        for ms in [1, 250, 1000, 60_000] {
            let mut anim = ShimmerAnimator::default();
            let t0 = Instant::now();
            anim.start_at(Duration::from_millis(ms), t0).unwrap();
            anim.tick_at(t0 + Duration::from_millis(ms / 3));
            anim.stop();
            assert_eq!(anim.state(), &AnimationState::Idle);
            assert_eq!(anim.progress(), 0.0);
        }
    }

    #[test]
    fn zero_period_is_rejected() {
        let mut anim = ShimmerAnimator::default();
        assert_eq!(
            anim.start_at(Duration::ZERO, Instant::now()),
            Err(AnimationError::InvalidPeriod {
                period: Duration::ZERO
            })
        );
        assert!(!anim.is_running());
    }

    #[test]
    fn progress_rises_within_a_cycle_and_wraps() {
        let mut anim = ShimmerAnimator::new(Easing::FastOutSlowIn);
        let t0 = Instant::now();
        anim.start_at(PERIOD, t0).unwrap();

        let mut last = -1.0;
        for ms in (0..1000).step_by(20) {
            assert!(anim.tick_at(t0 + Duration::from_millis(ms)));
            let p = anim.progress();
            assert!((0.0..=100.0).contains(&p));
            assert!(p >= last, "progress fell at {ms}ms");
            last = p;
        }

        anim.tick_at(t0 + PERIOD);
        assert_eq!(anim.progress(), 0.0);

        anim.tick_at(t0 + PERIOD + PERIOD / 2);
        let again = anim.progress();
        anim.tick_at(t0 + PERIOD / 2);
        assert!((anim.progress() - again).abs() < 1e-3);
    }

    #[test]
    fn midpoint_progress_is_near_half() {
        let linear = progress_at(PERIOD / 2, PERIOD, Easing::Linear);
        assert!((linear - 50.0).abs() < 1e-3);

        // The default curve runs ahead of linear but stays in a loose band
        let eased = progress_at(PERIOD / 2, PERIOD, Easing::FastOutSlowIn);
        assert!((eased - 50.0).abs() < 30.0, "eased midpoint {eased}");
    }

    #[test]
    fn restart_resets_progress_and_period() {
        let mut anim = ShimmerAnimator::new(Easing::Linear);
        let t0 = Instant::now();
        anim.start_at(PERIOD, t0).unwrap();
        anim.tick_at(t0 + Duration::from_millis(400));
        assert!(anim.progress() > 0.0);

        let t1 = t0 + Duration::from_millis(500);
        anim.start_at(Duration::from_millis(800), t1).unwrap();
        assert_eq!(anim.progress(), 0.0);

        // Progress now follows the new start time and period
        anim.tick_at(t1 + Duration::from_millis(200));
        assert!((anim.progress() - 25.0).abs() < 1e-3);
    }

    #[test]
    fn ticks_after_stop_change_nothing() {
        let mut anim = ShimmerAnimator::default();
        let t0 = Instant::now();
        anim.start_at(PERIOD, t0).unwrap();
        anim.stop();
        anim.stop();

        assert!(!anim.tick_at(t0 + Duration::from_millis(300)));
        assert_eq!(anim.progress(), 0.0);
        assert_eq!(anim.state(), &AnimationState::Idle);
    }
}
