//! 2D dimension: circles moving in a plane with a reference grid.

use glam::{vec2, Vec2};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use vectordiff_canvas::{Canvas, Color, TextAlign};

use crate::{wrap, DimensionModel, SceneError, GRID_COLOR, LABEL_COLOR};

const GRID_STEP: f32 = 50.0;

#[derive(Clone, Debug)]
pub struct PlaneCircle {
    pub id: &'static str,
    pub initial_position: Vec2,
    pub velocity: Vec2,
    pub color: Color,
    pub radius: f32,
}

impl PlaneCircle {
    fn position_at(&self, time: f32) -> Vec2 {
        self.initial_position + self.velocity * time
    }
}

pub struct PlaneModel {
    circles: Vec<PlaneCircle>,
}

impl Default for PlaneModel {
    fn default() -> Self {
        PlaneModel {
            circles: default_circles(),
        }
    }
}

fn default_circles() -> Vec<PlaneCircle> {
    vec![
        PlaneCircle {
            id: "circle_A",
            initial_position: vec2(300.0, 200.0),
            velocity: vec2(30.0, 20.0),
            color: Color::rgb(0xFF, 0xC1, 0x85),
            radius: 15.0,
        },
        PlaneCircle {
            id: "circle_B",
            initial_position: vec2(150.0, 300.0),
            velocity: vec2(-20.0, -15.0),
            color: Color::rgb(0xB4, 0x41, 0x3C),
            radius: 12.0,
        },
    ]
}

// --- VectorDiff shape ---

#[derive(Serialize)]
struct PlaneDiff {
    #[serde(rename = "baseScene")]
    base_scene: PlaneBase,
    timeline: [PlaneEvent; 1],
}

#[derive(Serialize)]
struct PlaneBase {
    dimensions: u8,
    entities: BTreeMap<&'static str, PlaneBaseEntity>,
}

#[derive(Serialize)]
struct PlaneBaseEntity {
    position: Vec2,
    velocity: Vec2,
    radius: f32,
}

#[derive(Serialize)]
struct PlaneEvent {
    timestamp: f32,
    operation: &'static str,
    changes: BTreeMap<&'static str, PlaneChange>,
}

#[derive(Serialize)]
struct PlaneChange {
    position: Vec2,
}

impl DimensionModel for PlaneModel {
    fn reset(&mut self) {
        self.circles = default_circles();
    }

    fn set_parameter(&mut self, target: Option<&str>, field: &str, value: f32) {
        let Some(id) = target else { return };
        let Some(circle) = self.circles.iter_mut().find(|c| c.id == id) else {
            return;
        };
        match field {
            "position_x" => circle.initial_position.x = value,
            "position_y" => circle.initial_position.y = value,
            "velocity_x" => circle.velocity.x = value,
            "velocity_y" => circle.velocity.y = value,
            "radius" => circle.radius = value,
            _ => {}
        }
    }

    fn render(&self, time: f32, canvas: &mut dyn Canvas) {
        canvas.clear();

        let width = canvas.width();
        let height = canvas.height();

        // Reference grid, verticals then horizontals.
        let mut x = 0.0;
        while x < width {
            canvas.draw_line(vec2(x, 0.0), vec2(x, height), GRID_COLOR, 1.0);
            x += GRID_STEP;
        }
        let mut y = 0.0;
        while y < height {
            canvas.draw_line(vec2(0.0, y), vec2(width, y), GRID_COLOR, 1.0);
            y += GRID_STEP;
        }

        for circle in &self.circles {
            let position = circle.position_at(time);
            let wrapped = vec2(wrap(position.x, width), wrap(position.y, height));

            canvas.draw_filled_circle(wrapped, circle.radius, circle.color);
            canvas.draw_text(
                &format!("({:.0}, {:.0})", position.x, position.y),
                vec2(wrapped.x, wrapped.y - circle.radius - 5.0),
                10.0,
                TextAlign::Center,
                LABEL_COLOR,
            );
        }
    }

    fn vector_diff(&self, time: f32) -> Result<Value, SceneError> {
        let mut entities = BTreeMap::new();
        let mut changes = BTreeMap::new();
        for circle in &self.circles {
            entities.insert(
                circle.id,
                PlaneBaseEntity {
                    position: circle.initial_position,
                    velocity: circle.velocity,
                    radius: circle.radius,
                },
            );
            changes.insert(
                circle.id,
                PlaneChange {
                    position: circle.position_at(time),
                },
            );
        }

        let diff = PlaneDiff {
            base_scene: PlaneBase {
                dimensions: 2,
                entities,
            },
            timeline: [PlaneEvent {
                timestamp: time,
                operation: "move",
                changes,
            }],
        };
        Ok(serde_json::to_value(diff)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectordiff_canvas::{DrawCommand, RecordingCanvas};

    #[test]
    fn reset_restores_both_circles() {
        let mut model = PlaneModel::default();
        model.set_parameter(Some("circle_A"), "position_x", 0.0);
        model.set_parameter(Some("circle_B"), "radius", 99.0);
        model.reset();

        assert_eq!(model.circles.len(), 2);
        assert_eq!(model.circles[0].initial_position, vec2(300.0, 200.0));
        assert_eq!(model.circles[0].velocity, vec2(30.0, 20.0));
        assert_eq!(model.circles[0].radius, 15.0);
        assert_eq!(model.circles[1].initial_position, vec2(150.0, 300.0));
        assert_eq!(model.circles[1].velocity, vec2(-20.0, -15.0));
        assert_eq!(model.circles[1].radius, 12.0);
    }

    #[test]
    fn serialized_positions_are_unwrapped() {
        let model = PlaneModel::default();
        let diff = model.vector_diff(100.0).unwrap();
        // circle_A: (300 + 30*100, 200 + 20*100) = (3300, 2200)
        let pos = &diff["timeline"][0]["changes"]["circle_A"]["position"];
        assert_eq!(pos[0], 3300.0);
        assert_eq!(pos[1], 2200.0);
        // circle_B heads negative and is also left unwrapped
        let pos = &diff["timeline"][0]["changes"]["circle_B"]["position"];
        assert_eq!(pos[0], -1850.0);
    }

    #[test]
    fn display_positions_wrap_into_canvas() {
        let model = PlaneModel::default();
        let mut canvas = RecordingCanvas::new(600.0, 400.0);
        model.render(100.0, &mut canvas);

        for command in canvas.commands() {
            if let DrawCommand::FilledCircle { center, .. } = command {
                assert!(center.x >= 0.0 && center.x < 600.0);
                assert!(center.y >= 0.0 && center.y < 400.0);
            }
        }
    }

    #[test]
    fn unknown_entity_or_field_is_a_no_op() {
        let mut model = PlaneModel::default();
        model.set_parameter(Some("circle_Z"), "position_x", 1.0);
        model.set_parameter(Some("circle_A"), "spin", 1.0);
        model.set_parameter(None, "position_x", 1.0);
        assert_eq!(model.circles[0].initial_position, vec2(300.0, 200.0));
    }

    #[test]
    fn base_scene_carries_radii() {
        let model = PlaneModel::default();
        let diff = model.vector_diff(0.0).unwrap();
        assert_eq!(diff["baseScene"]["entities"]["circle_A"]["radius"], 15.0);
        assert_eq!(diff["baseScene"]["entities"]["circle_B"]["radius"], 12.0);
    }

    #[test]
    fn vector_diff_is_pure() {
        let model = PlaneModel::default();
        let a = serde_json::to_string(&model.vector_diff(7.25).unwrap()).unwrap();
        let b = serde_json::to_string(&model.vector_diff(7.25).unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
