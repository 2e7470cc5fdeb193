//! # PileKit
//!
//! A card pile and stacking engine for 2D tabletop games:
//! - Piles of objects linked bottom to top, with capacity limits
//! - Nearest-rectangle target resolution with depth tie-breaking
//! - Press/drag/release with snap-back on rejected drops
//! - Depth-ordered draw lists for any renderer
//!
//! ## Architecture
//!
//! PileKit is organized as a workspace with multiple crates:
//!
//! 1. **pilekit-core** - Geometry, identifiers, layout constants, error taxonomy
//! 2. **pilekit-settings** - Engine configuration, JSON/TOML documents
//! 3. **pilekit-engine** - Registry, piles, selection, interaction, presentation
//! 4. **pilekit** - Logging setup and the headless demo binary

pub mod demo;

pub use pilekit_core::{EngineError, ObjectId, Rect, Result, TextureId, Vec2};
pub use pilekit_engine::{
    default_layout, Engine, Frame, InteractionEvent, PointerFrame, Renderer, SceneBuilder,
    SceneDescription,
};
pub use pilekit_settings::{EngineConfig, HitTestMode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
