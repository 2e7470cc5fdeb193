//! Engine objects and their optional facets.

use pilekit_core::{ObjectId, Rect, TextureId, Vec2};
use serde::{Deserialize, Serialize};

/// Position and size of an object, plus the rectangle it had before the
/// current interaction began.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub rect: Rect,
    pub last_rect: Rect,
    /// Where the object rests whenever it is not part of a pile
    pub home: Rect,
}

impl Placement {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            last_rect: rect,
            home: rect,
        }
    }
}

/// Drawing data: an optional texture and the fan-out applied per pile level.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Visual {
    pub texture: Option<TextureId>,
    pub pile_offset: Vec2,
}

impl Visual {
    pub fn new(texture: Option<TextureId>, pile_offset: Vec2) -> Self {
        Self {
            texture,
            pile_offset,
        }
    }
}

/// Marks an object as eligible to take part in piles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pileable {
    /// Largest pile this object accepts when it is the anchor
    pub max_pile_size: Option<usize>,
}

/// Marks an object the pointer can pick up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Interactive {
    pub held: bool,
}

/// Neighbours in the pile relation. Both `None` means the object is unpiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PileLink {
    pub below: Option<ObjectId>,
    pub above: Option<ObjectId>,
}

impl PileLink {
    pub fn is_piled(&self) -> bool {
        self.below.is_some() || self.above.is_some()
    }
}

/// Facet tags used by selection filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Placed,
    Visual,
    Pileable,
    Interactive,
    /// Interactive and not currently held
    Idle,
    /// Top of its pile, or unpiled
    PileTop,
}

/// An addressable entity on the surface.
///
/// The registry is the sole owner; piles are a derived graph over the
/// identifiers stored in [`PileLink`].
#[derive(Debug, Clone)]
pub struct GameObject {
    id: ObjectId,
    pub placement: Option<Placement>,
    pub visual: Option<Visual>,
    pub pileable: Option<Pileable>,
    pub interactive: Option<Interactive>,
    pub(crate) link: PileLink,
}

impl GameObject {
    /// Creates a bare object with a fresh identifier and no facets.
    pub fn new() -> Self {
        Self::with_id(ObjectId::new())
    }

    pub fn with_id(id: ObjectId) -> Self {
        Self {
            id,
            placement: None,
            visual: None,
            pileable: None,
            interactive: None,
            link: PileLink::default(),
        }
    }

    pub fn placed(mut self, rect: Rect) -> Self {
        self.placement = Some(Placement::new(rect));
        self
    }

    pub fn visual(mut self, visual: Visual) -> Self {
        self.visual = Some(visual);
        self
    }

    pub fn pileable(mut self, max_pile_size: Option<usize>) -> Self {
        self.pileable = Some(Pileable { max_pile_size });
        self
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = Some(Interactive::default());
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn link(&self) -> PileLink {
        self.link
    }

    pub fn rect(&self) -> Option<Rect> {
        self.placement.map(|p| p.rect)
    }

    pub fn is_held(&self) -> bool {
        self.interactive.is_some_and(|i| i.held)
    }

    /// Per-depth fan-out, zero without a visual facet.
    pub fn pile_offset(&self) -> Vec2 {
        self.visual.map(|v| v.pile_offset).unwrap_or(Vec2::ZERO)
    }

    /// Tests a facet tag that depends on this object alone.
    ///
    /// `PileTop` is answered from the link: no object above.
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Placed => self.placement.is_some(),
            Capability::Visual => self.visual.is_some(),
            Capability::Pileable => self.pileable.is_some(),
            Capability::Interactive => self.interactive.is_some(),
            Capability::Idle => self.interactive.is_some_and(|i| !i.held),
            Capability::PileTop => self.link.above.is_none(),
        }
    }
}

impl Default for GameObject {
    fn default() -> Self {
        Self::new()
    }
}
