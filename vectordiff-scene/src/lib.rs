use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use vectordiff_canvas::{Canvas, Color};

pub mod line;
pub mod multiverse;
pub mod plane;
pub mod space;
pub mod spacetime;

pub use line::LineModel;
pub use multiverse::MultiverseModel;
pub use plane::PlaneModel;
pub use space::SpaceModel;
pub use spacetime::SpacetimeModel;

// --- Error Type ---

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("VectorDiff serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// --- Shared palette ---
// Reference-frame colors shared by several renderers. Entity colors live
// with their default entity sets.

pub(crate) const FRAME_COLOR: Color = Color::rgb(0x62, 0x6C, 0x71);
pub(crate) const GRID_COLOR: Color = Color::rgb(0xE5, 0xE5, 0xE5);
pub(crate) const LABEL_COLOR: Color = Color::rgb(0x13, 0x42, 0x52);

// --- Dimension selection ---

/// Tag for the closed set of dimension models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DimensionId {
    #[serde(rename = "1D")]
    Line,
    #[serde(rename = "2D")]
    Plane,
    #[serde(rename = "3D")]
    Space,
    #[serde(rename = "4D")]
    Spacetime,
    #[serde(rename = "5D")]
    Multiverse,
}

impl DimensionId {
    pub fn label(&self) -> &'static str {
        match self {
            DimensionId::Line => "1D",
            DimensionId::Plane => "2D",
            DimensionId::Space => "3D",
            DimensionId::Spacetime => "4D",
            DimensionId::Multiverse => "5D",
        }
    }
}

impl std::fmt::Display for DimensionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// --- Model contract ---

/// Common capability surface of every dimension model. Time never mutates
/// a model; `render` and `vector_diff` are pure functions of
/// (entity state, time) apart from the draw calls they issue.
pub trait DimensionModel {
    /// Restores the fixed default entity set and model globals.
    fn reset(&mut self);

    /// Overwrites one numeric field on one entity (`target = Some(id)`) or
    /// a model-global parameter (`target = None`). Values are taken as-is
    /// with no range validation; unknown targets or fields are no-ops.
    fn set_parameter(&mut self, target: Option<&str>, field: &str, value: f32);

    /// Clears the surface, draws the background reference frame, then each
    /// entity at its position for `time` with a coordinate label.
    fn render(&self, time: f32, canvas: &mut dyn Canvas);

    /// Produces the VectorDiff document: a `baseScene` with initial entity
    /// parameters and a `timeline` holding exactly one snapshot at `time`.
    fn vector_diff(&self, time: f32) -> Result<Value, SceneError>;
}

// --- Scene aggregate ---

/// One model per dimension, created once and selected by tag.
#[derive(Default)]
pub struct Scene {
    line: LineModel,
    plane: PlaneModel,
    space: SpaceModel,
    spacetime: SpacetimeModel,
    multiverse: MultiverseModel,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&self, id: DimensionId) -> &dyn DimensionModel {
        match id {
            DimensionId::Line => &self.line,
            DimensionId::Plane => &self.plane,
            DimensionId::Space => &self.space,
            DimensionId::Spacetime => &self.spacetime,
            DimensionId::Multiverse => &self.multiverse,
        }
    }

    pub fn model_mut(&mut self, id: DimensionId) -> &mut dyn DimensionModel {
        match id {
            DimensionId::Line => &mut self.line,
            DimensionId::Plane => &mut self.plane,
            DimensionId::Space => &mut self.space,
            DimensionId::Spacetime => &mut self.spacetime,
            DimensionId::Multiverse => &mut self.multiverse,
        }
    }
}

// --- Helpers ---

/// Wraps `value` into `[0, span)`, matching remainder semantics where the
/// sign follows the dividend. Display-only: serialized positions stay
/// unwrapped.
pub(crate) fn wrap(value: f32, span: f32) -> f32 {
    ((value % span) + span) % span
}
