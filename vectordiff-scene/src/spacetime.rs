//! 4D dimension: a particle worldline through stylized spacetime.
//!
//! The worldline is resampled from tau = 0 on every render call. That is
//! O(time / 0.1) work per frame, which is fine at this tool's time scales.

use glam::{vec2, vec3, Vec3};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use vectordiff_canvas::{Canvas, Color, TextAlign};

use crate::{DimensionModel, SceneError, GRID_COLOR, LABEL_COLOR};

const GRID_STEP: f32 = 40.0;
const SAMPLE_STEP: f32 = 0.1;
const CURVE_SAMPLE_STEP: f32 = 10.0;

#[derive(Clone, Debug)]
pub struct WorldlineParticle {
    pub id: &'static str,
    pub velocity: Vec3,
    pub color: Color,
    pub proper_time: f32,
}

pub struct SpacetimeModel {
    particles: Vec<WorldlineParticle>,
    /// Time dilation multiplier applied to the sampled worldline.
    temporal_velocity: f32,
    /// Bends the horizontal time-grid lines; display only.
    curvature: f32,
}

impl Default for SpacetimeModel {
    fn default() -> Self {
        SpacetimeModel {
            particles: default_particles(),
            temporal_velocity: 1.0,
            curvature: 0.0,
        }
    }
}

fn default_particles() -> Vec<WorldlineParticle> {
    vec![WorldlineParticle {
        id: "particle_A",
        velocity: vec3(30.0, 20.0, 10.0),
        color: Color::rgb(0x5D, 0x87, 0x8F),
        proper_time: 0.0,
    }]
}

/// Worldline sample points for the display projection, stepped in fixed
/// tau increments from 0 up to `time`.
fn worldline_points(
    center: glam::Vec2,
    velocity: Vec3,
    temporal_velocity: f32,
    time: f32,
) -> Vec<glam::Vec2> {
    let mut points = Vec::new();
    let mut tau = 0.0f32;
    while tau <= time {
        let adjusted = tau * temporal_velocity;
        points.push(vec2(
            center.x + velocity.x * adjusted * 0.5,
            center.y + velocity.y * adjusted * 0.5,
        ));
        tau += SAMPLE_STEP;
    }
    points
}

// --- VectorDiff shape ---

#[derive(Serialize)]
struct SpacetimeDiff {
    #[serde(rename = "baseScene")]
    base_scene: SpacetimeBase,
    timeline: [SpacetimeEvent; 1],
}

#[derive(Serialize)]
struct SpacetimeBase {
    dimensions: u8,
    spacetime_fabric: &'static str,
    temporal_velocity: f32,
    curvature: f32,
    entities: BTreeMap<&'static str, SpacetimeBaseEntity>,
}

#[derive(Serialize)]
struct SpacetimeBaseEntity {
    worldline_start: [f32; 4],
    velocity: Vec3,
    proper_time: f32,
}

#[derive(Serialize)]
struct SpacetimeEvent {
    spacetime_coordinate: [f32; 4],
    operation: &'static str,
    changes: BTreeMap<&'static str, SpacetimeChange>,
}

#[derive(Serialize)]
struct SpacetimeChange {
    worldline_segment: [[f32; 4]; 2],
}

impl DimensionModel for SpacetimeModel {
    fn reset(&mut self) {
        self.particles = default_particles();
        self.temporal_velocity = 1.0;
        self.curvature = 0.0;
    }

    fn set_parameter(&mut self, target: Option<&str>, field: &str, value: f32) {
        match target {
            None => match field {
                "temporal_velocity" => self.temporal_velocity = value,
                "curvature" => self.curvature = value,
                _ => {}
            },
            Some(id) => {
                let Some(particle) = self.particles.iter_mut().find(|p| p.id == id) else {
                    return;
                };
                match field {
                    "velocity_x" => particle.velocity.x = value,
                    "velocity_y" => particle.velocity.y = value,
                    "velocity_z" => particle.velocity.z = value,
                    _ => {}
                }
            }
        }
    }

    fn render(&self, time: f32, canvas: &mut dyn Canvas) {
        canvas.clear();

        let width = canvas.width();
        let height = canvas.height();
        let center = vec2(width / 2.0, height / 2.0);

        // Spatial grid (verticals).
        let mut x = 0.0;
        while x < width {
            canvas.draw_line(vec2(x, 0.0), vec2(x, height), GRID_COLOR, 1.0);
            x += GRID_STEP;
        }

        // Time grid (horizontals), bent sinusoidally when curved.
        let mut y = 0.0;
        while y < height {
            if self.curvature != 0.0 {
                let mut prev = vec2(0.0, y); // sin(0) = 0, no offset at the left edge
                let mut gx = CURVE_SAMPLE_STEP;
                while gx < width {
                    let next = vec2(gx, y + self.curvature * 20.0 * (gx * 0.01).sin());
                    canvas.draw_line(prev, next, GRID_COLOR, 1.0);
                    prev = next;
                    gx += CURVE_SAMPLE_STEP;
                }
            } else {
                canvas.draw_line(vec2(0.0, y), vec2(width, y), GRID_COLOR, 1.0);
            }
            y += GRID_STEP;
        }

        let mut point_count = 0;
        for particle in &self.particles {
            let points = worldline_points(center, particle.velocity, self.temporal_velocity, time);

            for pair in points.windows(2) {
                canvas.draw_line(pair[0], pair[1], particle.color, 3.0);
            }

            if let Some(last) = points.last() {
                canvas.draw_filled_circle(*last, 8.0, particle.color);
            }
            point_count = points.len();
        }

        canvas.draw_text(
            &format!("Time: {:.2}s", time),
            vec2(10.0, 30.0),
            14.0,
            TextAlign::Left,
            LABEL_COLOR,
        );
        canvas.draw_text(
            &format!("Temporal velocity: {:.1}x", self.temporal_velocity),
            vec2(10.0, 50.0),
            14.0,
            TextAlign::Left,
            LABEL_COLOR,
        );
        canvas.draw_text(
            &format!("Worldline: {} points", point_count),
            vec2(10.0, 70.0),
            14.0,
            TextAlign::Left,
            LABEL_COLOR,
        );
    }

    fn vector_diff(&self, time: f32) -> Result<Value, SceneError> {
        let dilated = time * self.temporal_velocity;

        let mut entities = BTreeMap::new();
        let mut changes = BTreeMap::new();
        let mut endpoint = [0.0f32; 4];
        for particle in &self.particles {
            entities.insert(
                particle.id,
                SpacetimeBaseEntity {
                    worldline_start: [0.0; 4],
                    velocity: particle.velocity,
                    proper_time: particle.proper_time,
                },
            );
            // Only the endpoint segment is reported, not the sampled path.
            endpoint = [
                particle.velocity.x * dilated,
                particle.velocity.y * dilated,
                particle.velocity.z * dilated,
                dilated,
            ];
            changes.insert(
                particle.id,
                SpacetimeChange {
                    worldline_segment: [[0.0; 4], endpoint],
                },
            );
        }

        let diff = SpacetimeDiff {
            base_scene: SpacetimeBase {
                dimensions: 4,
                spacetime_fabric: "minkowski",
                temporal_velocity: self.temporal_velocity,
                curvature: self.curvature,
                entities,
            },
            timeline: [SpacetimeEvent {
                spacetime_coordinate: endpoint,
                operation: "worldline_evolution",
                changes,
            }],
        };
        Ok(serde_json::to_value(diff)?)
    }
}
