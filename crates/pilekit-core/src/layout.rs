//! Default layout dimensions shared by the settings and the demo host.

/// Width of the demo surface in pixels.
pub const SURFACE_WIDTH: f64 = 1280.0;
/// Height of the demo surface in pixels.
pub const SURFACE_HEIGHT: f64 = 720.0;

pub const CARD_WIDTH: f64 = 111.0;
pub const CARD_HEIGHT: f64 = 160.0;

/// Horizontal gap between neighbouring cards or slots.
pub const CARD_GAP: f64 = 5.0;

/// Per-depth fan-out applied to piled cards unless configured otherwise.
pub const DEFAULT_PILE_OFFSET_X: f64 = 0.0;
pub const DEFAULT_PILE_OFFSET_Y: f64 = 24.0;

/// Default pile capacity.
pub const DEFAULT_PILE_CAPACITY: usize = 40;
