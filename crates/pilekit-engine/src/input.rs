//! Pointer input consumed once per tick.

use pilekit_core::Vec2;

/// Single pointer with one primary button.
///
/// Edges are reported for the current tick only: `pressed_edge` is true on the
/// tick the button went down, `released_edge` on the tick it came up.
pub trait InputSource {
    fn pointer_position(&self) -> Vec2;
    fn pressed_edge(&self) -> bool;
    fn released_edge(&self) -> bool;
}

/// Input state for one tick as a plain value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerFrame {
    pub position: Vec2,
    pub pressed: bool,
    pub released: bool,
}

impl PointerFrame {
    /// Pointer resting or moving with no button edge.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Vec2::new(x, y),
            pressed: false,
            released: false,
        }
    }

    pub fn press(x: f64, y: f64) -> Self {
        Self {
            pressed: true,
            ..Self::at(x, y)
        }
    }

    pub fn release(x: f64, y: f64) -> Self {
        Self {
            released: true,
            ..Self::at(x, y)
        }
    }
}

impl InputSource for PointerFrame {
    fn pointer_position(&self) -> Vec2 {
        self.position
    }

    fn pressed_edge(&self) -> bool {
        self.pressed
    }

    fn released_edge(&self) -> bool {
        self.released
    }
}
