//! Application controller: active dimension selection, control input
//! handling, and the per-tick render+serialize cycle.

use std::time::Instant;
use vectordiff_canvas::Canvas;
use vectordiff_scene::{DimensionId, DimensionModel, Scene};

use crate::{DiffSink, FrameScheduler, PlaybackClock, PlayerError};

pub struct Controller<C: Canvas, S: DiffSink> {
    scene: Scene,
    current: DimensionId,
    clock: PlaybackClock,
    scheduler: FrameScheduler,
    canvas: C,
    sink: S,
}

impl<C: Canvas, S: DiffSink> Controller<C, S> {
    /// Starts idle on the 1D model at time zero. The first frame is not
    /// emitted until `refresh` or a control event runs.
    pub fn new(canvas: C, sink: S) -> Self {
        Controller {
            scene: Scene::new(),
            current: DimensionId::Line,
            clock: PlaybackClock::new(),
            scheduler: FrameScheduler::new(),
            canvas,
            sink,
        }
    }

    pub fn current_dimension(&self) -> DimensionId {
        self.current
    }

    pub fn current_time(&self) -> f32 {
        self.clock.current_time()
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    // --- Control events ---
    // Each mutates state synchronously and re-renders/re-serializes, so
    // the surface and the diff output never lag the model state.

    pub fn play(&mut self, now: Instant) {
        self.clock.play(now);
        self.scheduler.arm();
        log::debug!("playback started at t={:.3}", self.clock.current_time());
    }

    pub fn pause(&mut self) {
        self.clock.pause();
        // Disarming cancels any tick the host already scheduled.
        self.scheduler.disarm();
    }

    pub fn reset(&mut self) -> Result<(), PlayerError> {
        self.pause();
        self.clock.reset();
        self.scene.model_mut(self.current).reset();
        self.refresh()
    }

    /// Pauses, rewinds to zero, and activates the model for `dimension`.
    pub fn switch_dimension(&mut self, dimension: DimensionId) -> Result<(), PlayerError> {
        self.pause();
        self.clock.reset();
        self.current = dimension;
        log::info!("switched to dimension {}", dimension);
        self.refresh()
    }

    /// Sets time directly (manual time-slider input) without changing the
    /// play/pause state.
    pub fn scrub(&mut self, time: f32, now: Instant) -> Result<(), PlayerError> {
        self.clock.scrub(time, now);
        self.refresh()
    }

    /// Speed only affects how fast ticks advance time, so the refreshed
    /// frame is identical to the previous one; it is emitted anyway to
    /// keep every control event on the same mutate-then-refresh path.
    pub fn set_speed(&mut self, speed: f32) -> Result<(), PlayerError> {
        self.clock.set_speed(speed);
        self.refresh()
    }

    /// Forwards a parameter overwrite to the active model.
    pub fn set_parameter(
        &mut self,
        target: Option<&str>,
        field: &str,
        value: f32,
    ) -> Result<(), PlayerError> {
        self.scene
            .model_mut(self.current)
            .set_parameter(target, field, value);
        self.refresh()
    }

    // --- Frame tick ---

    /// One animation tick: advance time, then render and serialize at the
    /// new value, in that order. Returns `false` without doing any work
    /// when the scheduler is disarmed (paused or never started).
    pub fn tick(&mut self, now: Instant) -> Result<bool, PlayerError> {
        if !self.scheduler.is_armed() {
            return Ok(false);
        }
        if self.clock.tick(now).is_none() {
            return Ok(false);
        }
        self.refresh()?;
        Ok(true)
    }

    /// Renders and serializes the active model at the current time.
    pub fn refresh(&mut self) -> Result<(), PlayerError> {
        let time = self.clock.current_time();
        let model = self.scene.model(self.current);
        model.render(time, &mut self.canvas);
        let diff = model.vector_diff(time)?;
        self.sink.emit(&diff)?;
        Ok(())
    }
}
