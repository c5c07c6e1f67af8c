//! 1D dimension: points moving along a single line.

use glam::vec2;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use vectordiff_canvas::{Canvas, Color, TextAlign};

use crate::{wrap, DimensionModel, SceneError, FRAME_COLOR, LABEL_COLOR};

const POINT_COLOR: Color = Color::rgb(0x1F, 0xB8, 0xCD);

#[derive(Clone, Debug)]
pub struct LinePoint {
    pub id: &'static str,
    pub initial_position: f32,
    pub velocity: f32,
    pub color: Color,
}

impl LinePoint {
    fn position_at(&self, time: f32) -> f32 {
        self.initial_position + self.velocity * time
    }
}

pub struct LineModel {
    points: Vec<LinePoint>,
}

impl Default for LineModel {
    fn default() -> Self {
        LineModel {
            points: default_points(),
        }
    }
}

fn default_points() -> Vec<LinePoint> {
    vec![LinePoint {
        id: "point_A",
        initial_position: 100.0,
        velocity: 50.0,
        color: POINT_COLOR,
    }]
}

// --- VectorDiff shape ---

#[derive(Serialize)]
struct LineDiff {
    #[serde(rename = "baseScene")]
    base_scene: LineBase,
    timeline: [LineEvent; 1],
}

#[derive(Serialize)]
struct LineBase {
    dimensions: u8,
    entities: BTreeMap<&'static str, LineBaseEntity>,
}

#[derive(Serialize)]
struct LineBaseEntity {
    position: [f32; 1],
    velocity: [f32; 1],
}

#[derive(Serialize)]
struct LineEvent {
    timestamp: f32,
    operation: &'static str,
    changes: BTreeMap<&'static str, LineChange>,
}

#[derive(Serialize)]
struct LineChange {
    position: [f32; 1],
}

impl DimensionModel for LineModel {
    fn reset(&mut self) {
        self.points = default_points();
    }

    fn set_parameter(&mut self, target: Option<&str>, field: &str, value: f32) {
        let Some(id) = target else { return };
        let Some(point) = self.points.iter_mut().find(|p| p.id == id) else {
            return;
        };
        match field {
            "position" => point.initial_position = value,
            "velocity" => point.velocity = value,
            _ => {}
        }
    }

    fn render(&self, time: f32, canvas: &mut dyn Canvas) {
        canvas.clear();

        let center_y = canvas.height() / 2.0;
        let line_start = 50.0;
        let line_length = canvas.width() - 100.0;

        canvas.draw_line(
            vec2(line_start, center_y),
            vec2(line_start + line_length, center_y),
            FRAME_COLOR,
            2.0,
        );

        for point in &self.points {
            let position = point.position_at(time);
            // Wrapped for display only; the logical position is unbounded.
            let x = line_start + wrap(position, line_length);

            canvas.draw_filled_circle(vec2(x, center_y), 8.0, point.color);
            canvas.draw_text(
                &format!("{:.1}", position),
                vec2(x, center_y - 20.0),
                12.0,
                TextAlign::Center,
                LABEL_COLOR,
            );
        }
    }

    fn vector_diff(&self, time: f32) -> Result<Value, SceneError> {
        let mut entities = BTreeMap::new();
        let mut changes = BTreeMap::new();
        for point in &self.points {
            entities.insert(
                point.id,
                LineBaseEntity {
                    position: [point.initial_position],
                    velocity: [point.velocity],
                },
            );
            changes.insert(
                point.id,
                LineChange {
                    position: [point.position_at(time)],
                },
            );
        }

        let diff = LineDiff {
            base_scene: LineBase {
                dimensions: 1,
                entities,
            },
            timeline: [LineEvent {
                timestamp: time,
                operation: "move",
                changes,
            }],
        };
        Ok(serde_json::to_value(diff)?)
    }
}
