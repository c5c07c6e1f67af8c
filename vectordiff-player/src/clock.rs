//! Virtual playback time, advanced by wall-clock deltas scaled by speed.

use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
}

/// Owns the virtual time value. Integration is delta-based so the
/// advance rate is independent of the host's frame cadence.
#[derive(Debug)]
pub struct PlaybackClock {
    current_time: f32,
    speed: f32,
    state: PlaybackState,
    last_instant: Option<Instant>,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        PlaybackClock {
            current_time: 0.0,
            speed: 1.0,
            state: PlaybackState::Idle,
            last_instant: None,
        }
    }
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Starts advancing time from `now`. No-op if already playing, so the
    /// reference instant is never clobbered mid-run.
    pub fn play(&mut self, now: Instant) {
        if self.state == PlaybackState::Idle {
            self.state = PlaybackState::Playing;
            self.last_instant = Some(now);
        }
    }

    /// Stops advancing time. Idempotent while idle.
    pub fn pause(&mut self) {
        self.state = PlaybackState::Idle;
        self.last_instant = None;
    }

    /// Back to time zero, idle.
    pub fn reset(&mut self) {
        self.pause();
        self.current_time = 0.0;
    }

    /// Sets time directly without touching play/pause state. While playing
    /// the next tick measures its delta from the scrub input's arrival.
    pub fn scrub(&mut self, time: f32, now: Instant) {
        self.current_time = time;
        if self.state == PlaybackState::Playing {
            self.last_instant = Some(now);
        }
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Advances time by the wall delta since the previous tick times the
    /// speed multiplier. Returns the new time, or `None` while idle.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        if self.state != PlaybackState::Playing {
            return None;
        }
        let last = self.last_instant.unwrap_or(now);
        let delta = now.saturating_duration_since(last).as_secs_f32();
        self.last_instant = Some(now);
        self.current_time += delta * self.speed;
        Some(self.current_time)
    }
}
