use std::path::PathBuf;

use anyhow::Context;
use pilekit::demo::{self, Gesture};
use pilekit::{default_layout, init_logging, EngineConfig, SceneDescription, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!(version = VERSION, built = BUILD_DATE, "PileKit demo");

    // Usage: pilekit [engine config] [scene description]
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let config = match args.next() {
        Some(path) => EngineConfig::load_from_file(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::load_or_default(&EngineConfig::default_path())?,
    };
    let (scene, script) = match args.next() {
        Some(path) => (
            SceneDescription::load_from_file(&path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?,
            Vec::<Gesture>::new(),
        ),
        None => (default_layout(), demo::default_script()),
    };

    let report = demo::run(config, &scene, &script)?;
    tracing::info!(
        frames = report.frames,
        events = report.events.len(),
        textured = report.renderer.textured,
        placeholders = report.renderer.placeholders,
        "Demo finished"
    );
    for pile in &report.piles {
        tracing::info!(members = ?pile, "Pile");
    }

    Ok(())
}
