//! Headless demo: deals a scene and replays scripted pointer gestures.

use std::collections::HashMap;

use anyhow::Context;
use pilekit_core::layout::{CARD_HEIGHT, CARD_WIDTH, SURFACE_HEIGHT, SURFACE_WIDTH};
use pilekit_core::{ObjectId, Rect, TextureId, Vec2};
use pilekit_engine::{Engine, InteractionEvent, PointerFrame, Renderer, SceneDescription};
use pilekit_settings::EngineConfig;

/// Where a scripted gesture lets go of the object.
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    /// Center of the named object's drawn rectangle
    Onto(String),
    /// A fixed surface point
    Point(Vec2),
}

/// Press on `object`, drag, release at `destination`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    pub object: String,
    pub destination: Destination,
}

impl Gesture {
    pub fn onto(object: &str, target: &str) -> Self {
        Self {
            object: object.to_string(),
            destination: Destination::Onto(target.to_string()),
        }
    }

    pub fn to_point(object: &str, x: f64, y: f64) -> Self {
        Self {
            object: object.to_string(),
            destination: Destination::Point(Vec2::new(x, y)),
        }
    }
}

/// Gestures replayed against [`pilekit_engine::default_layout`].
pub fn default_script() -> Vec<Gesture> {
    vec![
        Gesture::onto("two_of_clubs", "slot_1"),
        Gesture::onto("three_of_clubs", "two_of_clubs"),
        Gesture::to_point("three_of_clubs", SURFACE_WIDTH - CARD_WIDTH, CARD_HEIGHT),
        Gesture::onto("three_of_clubs", "slot_3"),
    ]
}

/// Renderer that reports every draw call through `tracing`.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    pub textured: usize,
    pub placeholders: usize,
}

impl Renderer for TraceRenderer {
    fn draw_texture(&mut self, id: ObjectId, rect: Rect, texture: TextureId) {
        self.textured += 1;
        tracing::debug!(%id, %texture, x = rect.x, y = rect.y, "draw texture");
    }

    fn draw_placeholder(&mut self, id: ObjectId, rect: Rect) {
        self.placeholders += 1;
        tracing::debug!(%id, x = rect.x, y = rect.y, "draw placeholder");
    }
}

/// Outcome of a demo run.
#[derive(Debug, Default)]
pub struct DemoReport {
    pub events: Vec<InteractionEvent>,
    /// Piles left on the table, bottom to top, by object name
    pub piles: Vec<Vec<String>>,
    pub frames: usize,
    pub renderer: TraceRenderer,
}

/// Builds `scene` and replays `script`, rendering every frame.
pub fn run(
    config: EngineConfig,
    scene: &SceneDescription,
    script: &[Gesture],
) -> anyhow::Result<DemoReport> {
    let (mut engine, names) = scene.build(config).context("Failed to build scene")?;
    let labels: HashMap<ObjectId, String> = names
        .iter()
        .map(|(name, id)| (*id, name.clone()))
        .collect();
    let mut report = DemoReport::default();

    for gesture in script {
        let from = center_of(&engine, &names, &gesture.object)?;
        let to = match &gesture.destination {
            Destination::Onto(target) => center_of(&engine, &names, target)?,
            Destination::Point(point) => clamp_to_surface(*point),
        };
        tracing::info!(object = %gesture.object, ?to, "Gesture");

        let halfway = Vec2::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
        let frames = [
            PointerFrame::press(from.x, from.y),
            PointerFrame::at(halfway.x, halfway.y),
            PointerFrame::release(to.x, to.y),
        ];
        for input in &frames {
            let frame = engine.tick(input);
            for event in &frame.events {
                log_event(event, &labels);
            }
            report.events.extend(frame.events);
            pilekit_engine::submit(&frame.draw_list, &mut report.renderer);
            report.frames += 1;
        }
    }

    engine
        .verify_integrity()
        .context("Pile links inconsistent after demo")?;

    for pile in engine.store().piles()? {
        report.piles.push(
            pile.iter()
                .map(|id| labels.get(id).cloned().unwrap_or_else(|| id.to_string()))
                .collect(),
        );
    }
    Ok(report)
}

/// Keeps a scripted pointer position on the table.
pub fn clamp_to_surface(point: Vec2) -> Vec2 {
    Vec2::new(
        point.x.clamp(0.0, SURFACE_WIDTH),
        point.y.clamp(0.0, SURFACE_HEIGHT),
    )
}

fn center_of(
    engine: &Engine,
    names: &HashMap<String, ObjectId>,
    name: &str,
) -> anyhow::Result<Vec2> {
    let id = names
        .get(name)
        .with_context(|| format!("Scene has no object named '{name}'"))?;
    Ok(engine.effective_rect(*id)?.center())
}

fn log_event(event: &InteractionEvent, labels: &HashMap<ObjectId, String>) {
    let label = |id: &ObjectId| labels.get(id).map(String::as_str).unwrap_or("?");
    match event {
        InteractionEvent::PickedUp { id } => {
            tracing::info!(object = label(id), "Picked up");
        }
        InteractionEvent::Dropped { id, target } => {
            tracing::info!(object = label(id), target = label(target), "Dropped");
        }
        InteractionEvent::Reverted { id, reason } => {
            tracing::info!(object = label(id), ?reason, "Snapped back");
        }
    }
}
