use serde_json::Value;
use std::io;
use thiserror::Error;
use vectordiff_scene::SceneError;

pub mod clock;
pub mod controller;
pub mod scheduler;

pub use clock::{PlaybackClock, PlaybackState};
pub use controller::Controller;
pub use scheduler::FrameScheduler;

// --- Error Types ---

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("scene serialization failed: {0}")]
    Scene(#[from] SceneError),

    #[error("diff sink failed: {0}")]
    Sink(#[from] SinkError),
}

// --- Output sink ---

/// Destination for the VectorDiff document produced on every render
/// cycle (a JSON panel, stdout, a capture buffer in tests).
pub trait DiffSink {
    fn emit(&mut self, diff: &Value) -> Result<(), SinkError>;
}
