use bevy::math::curve::{Curve, EaseFunction};
use bevy::prelude::*;
use std::time::Duration;

/// How long a follow tween takes to fully catch up with its target.
/// The bar trails the entity instead of snapping to it.
pub const FOLLOW_DURATION: Duration = Duration::from_secs(10);

/// Timed interpolation of an entity's XY position.
///
/// The tween can be retargeted while it runs: `retarget` moves both ends and
/// keeps the elapsed time, so a target that changes every frame still produces
/// a smooth ease rather than a reset.
#[derive(Component, Debug, Clone)]
pub struct PositionTween {
    start: Vec2,
    end: Vec2,
    timer: Timer,
    ease: EaseFunction,
    playing: bool,
}

impl PositionTween {
    /// Create a playing tween from `start` to `end`.
    pub fn new(start: Vec2, end: Vec2, duration: Duration, ease: EaseFunction) -> Self {
        Self {
            start,
            end,
            timer: Timer::new(duration, TimerMode::Once),
            ease,
            playing: true,
        }
    }

    /// A linear catch-up tween resting at `at`, used to follow a moving target.
    pub fn follow(at: Vec2) -> Self {
        Self::new(at, at, FOLLOW_DURATION, EaseFunction::Linear)
    }

    /// Restart the interpolation from `from` toward `to` without resetting progress.
    pub fn retarget(&mut self, from: Vec2, to: Vec2) {
        self.start = from;
        self.end = to;
    }

    /// Resume the tween. A finished tween starts over from zero.
    pub fn play(&mut self) {
        if self.timer.is_finished() {
            self.timer.reset();
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_finished(&self) -> bool {
        self.timer.is_finished()
    }

    pub fn target(&self) -> Vec2 {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.timer.duration()
    }

    /// Progress through the tween (0.0 to 1.0), before easing.
    pub fn progress(&self) -> f32 {
        self.timer.fraction()
    }

    /// Current interpolated position.
    pub fn value(&self) -> Vec2 {
        let t = self.ease.sample_clamped(self.progress());
        self.start.lerp(self.end, t)
    }

    /// Advance the tween. Returns the new position, or `None` while paused.
    pub fn tick(&mut self, delta: Duration) -> Option<Vec2> {
        if !self.playing {
            return None;
        }
        self.timer.tick(delta);
        if self.timer.is_finished() {
            self.playing = false;
        }
        Some(self.value())
    }
}
