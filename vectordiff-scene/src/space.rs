//! 3D dimension: spheres in space, obliquely projected onto the surface.

use glam::{vec2, vec3, Vec3};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use vectordiff_canvas::{Canvas, Color, TextAlign};

use crate::{DimensionModel, SceneError, GRID_COLOR, LABEL_COLOR};

const X_AXIS_COLOR: Color = Color::rgb(0xFF, 0x6B, 0x6B);
const Y_AXIS_COLOR: Color = Color::rgb(0x4E, 0xCD, 0xC4);
const Z_AXIS_COLOR: Color = Color::rgb(0x45, 0xB7, 0xD1);

#[derive(Clone, Debug)]
pub struct SpaceSphere {
    pub id: &'static str,
    pub initial_position: Vec3,
    pub velocity: Vec3,
    pub color: Color,
    pub radius: f32,
}

impl SpaceSphere {
    fn position_at(&self, time: f32) -> Vec3 {
        self.initial_position + self.velocity * time
    }
}

pub struct SpaceModel {
    spheres: Vec<SpaceSphere>,
}

impl Default for SpaceModel {
    fn default() -> Self {
        SpaceModel {
            spheres: default_spheres(),
        }
    }
}

fn default_spheres() -> Vec<SpaceSphere> {
    vec![
        SpaceSphere {
            id: "sphere_A",
            initial_position: Vec3::ZERO,
            velocity: vec3(1.0, 0.5, 0.3),
            color: Color::rgb(0xEC, 0xEB, 0xD5),
            radius: 20.0,
        },
        SpaceSphere {
            id: "sphere_B",
            initial_position: vec3(2.0, -1.0, 1.0),
            velocity: vec3(-0.5, 0.8, -0.2),
            color: Color::rgb(0x5D, 0x87, 0x8F),
            radius: 15.0,
        },
    ]
}

/// Oblique projection of a world-space point onto the surface, relative to
/// the surface center.
fn project(center: glam::Vec2, position: Vec3) -> glam::Vec2 {
    vec2(
        center.x + position.x * 50.0 - position.z * 25.0,
        center.y - position.y * 50.0 + position.z * 25.0,
    )
}

// --- VectorDiff shape ---

#[derive(Serialize)]
struct SpaceDiff {
    #[serde(rename = "baseScene")]
    base_scene: SpaceBase,
    timeline: [SpaceEvent; 1],
}

#[derive(Serialize)]
struct SpaceBase {
    dimensions: u8,
    entities: BTreeMap<&'static str, SpaceBaseEntity>,
}

#[derive(Serialize)]
struct SpaceBaseEntity {
    position: Vec3,
    velocity: Vec3,
    radius: f32,
}

#[derive(Serialize)]
struct SpaceEvent {
    timestamp: f32,
    operation: &'static str,
    changes: BTreeMap<&'static str, SpaceChange>,
}

#[derive(Serialize)]
struct SpaceChange {
    position: Vec3,
}

impl DimensionModel for SpaceModel {
    fn reset(&mut self) {
        self.spheres = default_spheres();
    }

    fn set_parameter(&mut self, target: Option<&str>, field: &str, value: f32) {
        let Some(id) = target else { return };
        let Some(sphere) = self.spheres.iter_mut().find(|s| s.id == id) else {
            return;
        };
        match field {
            "position_x" => sphere.initial_position.x = value,
            "position_y" => sphere.initial_position.y = value,
            "position_z" => sphere.initial_position.z = value,
            "velocity_x" => sphere.velocity.x = value,
            "velocity_y" => sphere.velocity.y = value,
            "velocity_z" => sphere.velocity.z = value,
            "radius" => sphere.radius = value,
            _ => {}
        }
    }

    fn render(&self, time: f32, canvas: &mut dyn Canvas) {
        canvas.clear();

        let center = vec2(canvas.width() / 2.0, canvas.height() / 2.0);

        // Axes: X right, Y up, Z toward the viewer (down-left).
        canvas.draw_line(center, center + vec2(100.0, 0.0), X_AXIS_COLOR, 2.0);
        canvas.draw_line(center, center + vec2(0.0, -100.0), Y_AXIS_COLOR, 2.0);
        canvas.draw_line(center, center + vec2(-50.0, 50.0), Z_AXIS_COLOR, 2.0);

        // Short oblique strokes hinting at the depth plane.
        for i in -2..=2 {
            for j in -2..=2 {
                let anchor = center + vec2(i as f32 * 40.0, j as f32 * 40.0);
                canvas.draw_line(anchor, anchor + vec2(-25.0, 25.0), GRID_COLOR, 1.0);
            }
        }

        for sphere in &self.spheres {
            let position = sphere.position_at(time);
            let projected = project(center, position);

            // Depth-scaled size, floored so far entities stay visible.
            let size = sphere.radius * (1.0 + position.z * 0.1);
            canvas.draw_filled_circle(projected, size.max(5.0), sphere.color);

            canvas.draw_text(
                &format!("({:.1}, {:.1}, {:.1})", position.x, position.y, position.z),
                vec2(projected.x, projected.y - size - 5.0),
                10.0,
                TextAlign::Center,
                LABEL_COLOR,
            );
        }
    }

    fn vector_diff(&self, time: f32) -> Result<Value, SceneError> {
        let mut entities = BTreeMap::new();
        let mut changes = BTreeMap::new();
        for sphere in &self.spheres {
            entities.insert(
                sphere.id,
                SpaceBaseEntity {
                    position: sphere.initial_position,
                    velocity: sphere.velocity,
                    radius: sphere.radius,
                },
            );
            changes.insert(
                sphere.id,
                SpaceChange {
                    position: sphere.position_at(time),
                },
            );
        }

        let diff = SpaceDiff {
            base_scene: SpaceBase {
                dimensions: 3,
                entities,
            },
            timeline: [SpaceEvent {
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
    fn reset_restores_default_spheres() {
        let mut model = SpaceModel::default();
        model.set_parameter(Some("sphere_A"), "velocity_z", 9.0);
        model.reset();

        assert_eq!(model.spheres[0].initial_position, Vec3::ZERO);
        assert_eq!(model.spheres[0].velocity, vec3(1.0, 0.5, 0.3));
        assert_eq!(model.spheres[0].radius, 20.0);
        assert_eq!(model.spheres[1].initial_position, vec3(2.0, -1.0, 1.0));
        assert_eq!(model.spheres[1].velocity, vec3(-0.5, 0.8, -0.2));
        assert_eq!(model.spheres[1].radius, 15.0);
    }

    #[test]
    fn projection_at_origin_lands_on_center() {
        let model = SpaceModel::default();
        let mut canvas = RecordingCanvas::new(600.0, 400.0);
        model.render(0.0, &mut canvas);

        // sphere_A starts at the origin: projected to the surface center,
        // radius unscaled at z=0.
        let circles: Vec<_> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FilledCircle { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect();
        assert_eq!(circles[0].0, vec2(300.0, 200.0));
        assert_eq!(circles[0].1, 20.0);
    }

    #[test]
    fn depth_scales_displayed_radius() {
        let model = SpaceModel::default();
        let mut canvas = RecordingCanvas::new(600.0, 400.0);
        // At t=10, sphere_A sits at z=3: radius 20*(1+0.3) = 26.
        model.render(10.0, &mut canvas);

        let radius = canvas
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::FilledCircle { radius, .. } => Some(*radius),
                _ => None,
            })
            .unwrap();
        assert!((radius - 26.0).abs() < 1e-4);
    }

    #[test]
    fn displayed_radius_is_floored() {
        let mut model = SpaceModel::default();
        // Push sphere_A far away so the scaled size would go below 5.
        model.set_parameter(Some("sphere_A"), "position_z", -100.0);
        model.set_parameter(Some("sphere_A"), "velocity_z", 0.0);
        let mut canvas = RecordingCanvas::new(600.0, 400.0);
        model.render(0.0, &mut canvas);

        let radius = canvas
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::FilledCircle { radius, .. } => Some(*radius),
                _ => None,
            })
            .unwrap();
        assert_eq!(radius, 5.0);
    }

    #[test]
    fn serialized_positions_follow_the_linear_law() {
        let model = SpaceModel::default();
        let diff = model.vector_diff(2.0).unwrap();
        let pos = &diff["timeline"][0]["changes"]["sphere_B"]["position"];
        assert_eq!(pos[0], 1.0); // 2 - 0.5*2
        assert!((pos[1].as_f64().unwrap() - 0.6).abs() < 1e-6); // -1 + 0.8*2
        assert!((pos[2].as_f64().unwrap() - 0.6).abs() < 1e-6); // 1 - 0.2*2
    }

    #[test]
    fn vector_diff_is_pure() {
        let model = SpaceModel::default();
        let a = serde_json::to_string(&model.vector_diff(4.5).unwrap()).unwrap();
        let b = serde_json::to_string(&model.vector_diff(4.5).unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
