use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

// --- Error Type ---

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

// --- Enums for Choices ---

/// Starting dimension selection, matching the "1D".."5D" tags used in the
/// VectorDiff output.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DimensionChoice {
    #[default]
    #[serde(rename = "1D")]
    OneD,
    #[serde(rename = "2D")]
    TwoD,
    #[serde(rename = "3D")]
    ThreeD,
    #[serde(rename = "4D")]
    FourD,
    #[serde(rename = "5D")]
    FiveD,
}

// --- Configuration Sections ---

#[derive(Deserialize, Debug, Clone)]
pub struct CanvasSettings {
    pub width: f32,
    pub height: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlaybackSettings {
    #[serde(default)]
    pub initial_dimension: DimensionChoice,
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Stop once playback time reaches this value; run until interrupted
    /// when absent.
    pub duration_seconds: Option<f32>,
}

fn default_speed() -> f32 {
    1.0
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            initial_dimension: DimensionChoice::default(),
            speed: default_speed(),
            duration_seconds: None,
        }
    }
}

// --- Top-Level Config Struct ---

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub framerate: u32,
    pub canvas: CanvasSettings,
    #[serde(default)]
    pub playback: PlaybackSettings,
}

// --- Loading Function ---

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;

    if config.framerate == 0 {
        return Err(ConfigError::Validation(
            "Framerate cannot be zero.".to_string(),
        ));
    }
    if config.canvas.width <= 0.0 || config.canvas.height <= 0.0 {
        return Err(ConfigError::Validation(
            "Canvas dimensions must be positive.".to_string(),
        ));
    }
    if !(config.playback.speed >= 0.0 && config.playback.speed.is_finite()) {
        return Err(ConfigError::Validation(
            "Playback speed must be a finite value >= 0.".to_string(),
        ));
    }

    Ok(config)
}
