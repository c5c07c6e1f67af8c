//! 5D dimension: parallel universes aging at different time-flow rates.

use glam::vec2;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use vectordiff_canvas::{Canvas, Color, TextAlign};

use crate::{DimensionModel, SceneError, LABEL_COLOR};

const CONNECTOR_COLOR: Color = Color::rgb(0x94, 0x44, 0x54);
/// Adjacent universes interact (dashed connector) below this flow-rate gap.
const INTERACTION_THRESHOLD: f32 = 0.7;
const UNIVERSE_SPACING: f32 = 150.0;
const FIRST_UNIVERSE_X: f32 = 100.0;

#[derive(Clone, Debug)]
pub struct Universe {
    pub id: &'static str,
    pub temporal_flow_rate: f32,
    pub expansion_rate: f32,
    pub age: f32,
    pub color: Color,
    /// Vertical lane the universe is drawn on.
    pub lane: f32,
}

impl Universe {
    fn age_at(&self, time: f32) -> f32 {
        self.age + self.temporal_flow_rate * time
    }
}

pub struct MultiverseModel {
    universes: Vec<Universe>,
    /// Scales how fast meta-time advances relative to playback time.
    /// Display only; it never feeds back into the age law.
    meta_time_multiplier: f32,
}

impl Default for MultiverseModel {
    fn default() -> Self {
        MultiverseModel {
            universes: default_universes(),
            meta_time_multiplier: 1.0,
        }
    }
}

fn default_universes() -> Vec<Universe> {
    vec![
        Universe {
            id: "universe_A",
            temporal_flow_rate: 1.0,
            expansion_rate: 70.0,
            age: 0.0,
            color: Color::rgb(0xDB, 0x45, 0x45),
            lane: 100.0,
        },
        Universe {
            id: "universe_B",
            temporal_flow_rate: 0.5,
            expansion_rate: 140.0,
            age: 0.0,
            color: Color::rgb(0xD2, 0xBA, 0x4C),
            lane: 200.0,
        },
        Universe {
            id: "universe_C",
            temporal_flow_rate: 1.5,
            expansion_rate: 35.0,
            age: 0.0,
            color: Color::rgb(0x96, 0x43, 0x25),
            lane: 300.0,
        },
    ]
}

// --- VectorDiff shape ---

#[derive(Serialize)]
struct MultiverseDiff {
    #[serde(rename = "baseScene")]
    base_scene: MultiverseBase,
    timeline: [MultiverseEvent; 1],
}

#[derive(Serialize)]
struct MultiverseBase {
    dimensions: u8,
    meta_temporal_fabric: &'static str,
    meta_time_multiplier: f32,
    entities: BTreeMap<&'static str, MultiverseBaseEntity>,
}

#[derive(Serialize)]
struct MultiverseBaseEntity {
    temporal_flow_rate: f32,
    expansion_rate: f32,
    age: f32,
}

#[derive(Serialize)]
struct MultiverseEvent {
    meta_time: f32,
    operation: &'static str,
    changes: BTreeMap<&'static str, MultiverseChange>,
}

#[derive(Serialize)]
struct MultiverseChange {
    age: f32,
}

impl DimensionModel for MultiverseModel {
    fn reset(&mut self) {
        self.universes = default_universes();
        self.meta_time_multiplier = 1.0;
    }

    fn set_parameter(&mut self, target: Option<&str>, field: &str, value: f32) {
        match target {
            None => {
                if field == "meta_time_multiplier" {
                    self.meta_time_multiplier = value;
                }
            }
            Some(id) => {
                let Some(universe) = self.universes.iter_mut().find(|u| u.id == id) else {
                    return;
                };
                match field {
                    "temporal_flow_rate" => universe.temporal_flow_rate = value,
                    "expansion_rate" => universe.expansion_rate = value,
                    _ => {}
                }
            }
        }
    }

    fn render(&self, time: f32, canvas: &mut dyn Canvas) {
        canvas.clear();

        let meta_time = time * self.meta_time_multiplier;
        canvas.draw_text(
            &format!("Meta-time: {:.2}", meta_time),
            vec2(10.0, 30.0),
            14.0,
            TextAlign::Left,
            LABEL_COLOR,
        );
        canvas.draw_text(
            &format!("Multiplier: {:.1}x", self.meta_time_multiplier),
            vec2(10.0, 50.0),
            14.0,
            TextAlign::Left,
            LABEL_COLOR,
        );

        for (index, universe) in self.universes.iter().enumerate() {
            let age = universe.age_at(time);
            let size = (age * 8.0).clamp(10.0, 80.0);
            let center = vec2(
                FIRST_UNIVERSE_X + index as f32 * UNIVERSE_SPACING,
                universe.lane,
            );

            canvas.draw_circle(center, size, universe.color, 3.0);
            canvas.draw_filled_circle(center, size, universe.color.with_alpha(0x20));

            let name = (b'A' + index as u8) as char;
            canvas.draw_text(
                &format!("Universe {}", name),
                vec2(center.x, center.y - size - 10.0),
                12.0,
                TextAlign::Center,
                universe.color,
            );
            canvas.draw_text(
                &format!("Age: {:.1}", age),
                vec2(center.x, center.y - size - 25.0),
                12.0,
                TextAlign::Center,
                universe.color,
            );
            canvas.draw_text(
                &format!("Flow: {}x", universe.temporal_flow_rate),
                vec2(center.x, center.y - size - 40.0),
                12.0,
                TextAlign::Center,
                universe.color,
            );
        }

        // Dashed connectors between adjacent universes with similar flow.
        for (index, pair) in self.universes.windows(2).enumerate() {
            let gap = (pair[0].temporal_flow_rate - pair[1].temporal_flow_rate).abs();
            if gap < INTERACTION_THRESHOLD {
                canvas.draw_dashed_line(
                    vec2(
                        FIRST_UNIVERSE_X + index as f32 * UNIVERSE_SPACING,
                        pair[0].lane,
                    ),
                    vec2(
                        FIRST_UNIVERSE_X + (index + 1) as f32 * UNIVERSE_SPACING,
                        pair[1].lane,
                    ),
                    CONNECTOR_COLOR,
                    2.0,
                    [5.0, 5.0],
                );
            }
        }
    }

    fn vector_diff(&self, time: f32) -> Result<Value, SceneError> {
        let mut entities = BTreeMap::new();
        let mut changes = BTreeMap::new();
        for universe in &self.universes {
            entities.insert(
                universe.id,
                MultiverseBaseEntity {
                    temporal_flow_rate: universe.temporal_flow_rate,
                    expansion_rate: universe.expansion_rate,
                    age: universe.age,
                },
            );
            changes.insert(
                universe.id,
                MultiverseChange {
                    age: universe.age_at(time),
                },
            );
        }

        let diff = MultiverseDiff {
            base_scene: MultiverseBase {
                dimensions: 5,
                meta_temporal_fabric: "multiverse",
                meta_time_multiplier: self.meta_time_multiplier,
                entities,
            },
            timeline: [MultiverseEvent {
                meta_time: time * self.meta_time_multiplier,
                operation: "meta_temporal_evolution",
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

    fn dashed_connectors(canvas: &RecordingCanvas) -> Vec<(f32, f32)> {
        canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::DashedLine { from, to, .. } => Some((from.x, to.x)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn reset_restores_three_universes() {
        let mut model = MultiverseModel::default();
        model.set_parameter(None, "meta_time_multiplier", 3.0);
        model.set_parameter(Some("universe_B"), "temporal_flow_rate", 2.0);
        model.reset();

        assert_eq!(model.meta_time_multiplier, 1.0);
        let flows: Vec<f32> = model.universes.iter().map(|u| u.temporal_flow_rate).collect();
        let expansions: Vec<f32> = model.universes.iter().map(|u| u.expansion_rate).collect();
        assert_eq!(flows, vec![1.0, 0.5, 1.5]);
        assert_eq!(expansions, vec![70.0, 140.0, 35.0]);
        assert!(model.universes.iter().all(|u| u.age == 0.0));
    }

    #[test]
    fn ages_are_monotone_for_non_negative_flow() {
        let model = MultiverseModel::default();
        for universe in &model.universes {
            let early = universe.age_at(1.0);
            let late = universe.age_at(2.0);
            assert!(late >= early);
        }
    }

    #[test]
    fn connector_present_only_for_similar_flow_rates() {
        let model = MultiverseModel::default();
        let mut canvas = RecordingCanvas::new(600.0, 400.0);
        model.render(1.0, &mut canvas);

        // |1.0 - 0.5| < 0.7 links A-B; |0.5 - 1.5| >= 0.7 leaves B-C apart.
        let connectors = dashed_connectors(&canvas);
        assert_eq!(connectors, vec![(100.0, 250.0)]);
    }

    #[test]
    fn connector_disappears_when_flows_diverge() {
        let mut model = MultiverseModel::default();
        model.set_parameter(Some("universe_B"), "temporal_flow_rate", 0.2);
        let mut canvas = RecordingCanvas::new(600.0, 400.0);
        model.render(1.0, &mut canvas);
        assert!(dashed_connectors(&canvas).is_empty());
    }

    #[test]
    fn displayed_radius_is_clamped() {
        let model = MultiverseModel::default();

        // Young universes bottom out at 10.
        let mut canvas = RecordingCanvas::new(600.0, 400.0);
        model.render(0.0, &mut canvas);
        let radii: Vec<f32> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![10.0, 10.0, 10.0]);

        // Old universes cap at 80.
        let mut canvas = RecordingCanvas::new(600.0, 400.0);
        model.render(100.0, &mut canvas);
        let radii: Vec<f32> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![80.0, 80.0, 80.0]);
    }

    #[test]
    fn meta_time_scales_but_ages_do_not() {
        let mut model = MultiverseModel::default();
        model.set_parameter(None, "meta_time_multiplier", 2.0);
        let diff = model.vector_diff(3.0).unwrap();

        assert_eq!(diff["timeline"][0]["meta_time"], 6.0);
        // Ages follow playback time, not meta-time.
        assert_eq!(diff["timeline"][0]["changes"]["universe_A"]["age"], 3.0);
        assert_eq!(diff["timeline"][0]["changes"]["universe_B"]["age"], 1.5);
        assert_eq!(diff["timeline"][0]["changes"]["universe_C"]["age"], 4.5);
        assert_eq!(
            diff["timeline"][0]["operation"],
            "meta_temporal_evolution"
        );
    }

    #[test]
    fn base_scene_carries_fabric_and_rates() {
        let model = MultiverseModel::default();
        let diff = model.vector_diff(0.0).unwrap();
        let base = &diff["baseScene"];
        assert_eq!(base["dimensions"], 5);
        assert_eq!(base["meta_temporal_fabric"], "multiverse");
        assert_eq!(base["meta_time_multiplier"], 1.0);
        assert_eq!(base["entities"]["universe_B"]["expansion_rate"], 140.0);
        assert_eq!(base["entities"]["universe_B"]["age"], 0.0);
    }

    #[test]
    fn vector_diff_is_pure() {
        let model = MultiverseModel::default();
        let a = serde_json::to_string(&model.vector_diff(1.75).unwrap()).unwrap();
        let b = serde_json::to_string(&model.vector_diff(1.75).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn non_finite_time_does_not_panic() {
        let model = MultiverseModel::default();
        let mut canvas = RecordingCanvas::new(600.0, 400.0);
        model.render(f32::NAN, &mut canvas);
        model.vector_diff(f32::NAN).unwrap();
    }
}
