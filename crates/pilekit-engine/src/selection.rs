//! Selection resolver: maps a probe or drop rectangle to a single object.
//!
//! Candidates pass through a [`Filter`], a plain value naming the facets a
//! candidate must carry, identifiers to skip and an optional spatial
//! constraint. The resolver then compares effective rectangles:
//!
//! 1. squared distance between top-left corners picks the closest position
//! 2. every candidate co-located with it (within the tie tolerance) is tied
//! 3. the deepest tied candidate wins; among equals the one visited last
//!
//! Visiting order is registry insertion order, so results are reproducible.

use pilekit_core::{distance_sqr, ObjectId, Rect, Result, Vec2};
use pilekit_settings::SelectionSettings;
use smallvec::SmallVec;

use crate::object::{Capability, GameObject};
use crate::registry::ObjectStore;

/// Spatial constraint applied to a candidate's effective rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Region {
    #[default]
    Anywhere,
    Overlapping(Rect),
    Containing(Vec2),
}

/// Candidate filter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    requires: SmallVec<[Capability; 4]>,
    excluding: SmallVec<[ObjectId; 2]>,
    region: Region,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(mut self, capability: Capability) -> Self {
        if !self.requires.contains(&capability) {
            self.requires.push(capability);
        }
        self
    }

    pub fn excluding(mut self, id: ObjectId) -> Self {
        self.excluding.push(id);
        self
    }

    pub fn overlapping(mut self, rect: Rect) -> Self {
        self.region = Region::Overlapping(rect);
        self
    }

    pub fn containing(mut self, point: Vec2) -> Self {
        self.region = Region::Containing(point);
        self
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Facet and exclusion checks.
    pub fn accepts(&self, object: &GameObject) -> bool {
        !self.excluding.contains(&object.id())
            && self.requires.iter().all(|capability| object.has(*capability))
    }

    /// Spatial check against an effective rectangle.
    pub fn accepts_rect(&self, rect: Option<Rect>) -> bool {
        match (self.region, rect) {
            (Region::Anywhere, _) => true,
            (Region::Overlapping(area), Some(rect)) => rect.intersects(&area),
            (Region::Containing(point), Some(rect)) => rect.contains_point(point),
            (_, None) => false,
        }
    }
}

/// An object that passed a filter, with its derived geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub id: ObjectId,
    /// Effective rectangle, `None` for objects without a placement
    pub rect: Option<Rect>,
    pub depth: usize,
    pub held: bool,
}

impl Candidate {
    /// Draw and selection priority. A held object outranks every pile depth.
    pub fn priority(&self) -> usize {
        if self.held {
            usize::MAX
        } else {
            self.depth
        }
    }
}

/// Nearest-rectangle resolver with depth tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolver {
    tie_epsilon: f64,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::from_settings(&SelectionSettings::default())
    }
}

impl Resolver {
    pub fn new(tie_epsilon: f64) -> Self {
        Self { tie_epsilon }
    }

    pub fn from_settings(settings: &SelectionSettings) -> Self {
        Self::new(settings.tie_epsilon)
    }

    pub fn tie_epsilon(&self) -> f64 {
        self.tie_epsilon
    }

    /// Every object passing `filter`, in registry order.
    pub fn candidates(&self, store: &ObjectStore, filter: &Filter) -> Result<Vec<Candidate>> {
        let mut candidates = Vec::new();
        for object in store.iter() {
            if !filter.accepts(object) {
                continue;
            }
            let id = object.id();
            let rect = match object.placement {
                Some(_) => Some(store.effective_rect(id)?),
                None => None,
            };
            if !filter.accepts_rect(rect) {
                continue;
            }
            candidates.push(Candidate {
                id,
                rect,
                depth: store.depth_of(id)?,
                held: object.is_held(),
            });
        }
        Ok(candidates)
    }

    /// Closest candidate to `reference`, deepest among co-located ties.
    pub fn resolve(
        &self,
        store: &ObjectStore,
        reference: &Rect,
        filter: &Filter,
    ) -> Result<Option<ObjectId>> {
        let placed: Vec<(Candidate, Rect)> = self
            .candidates(store, filter)?
            .into_iter()
            .filter_map(|candidate| candidate.rect.map(|rect| (candidate, rect)))
            .collect();

        let mut closest: Option<(f64, Rect)> = None;
        for (_, rect) in &placed {
            let distance = distance_sqr(reference, rect);
            if closest.map_or(true, |(best, _)| distance < best) {
                closest = Some((distance, *rect));
            }
        }
        let Some((distance, closest_rect)) = closest else {
            return Ok(None);
        };

        let tied: SmallVec<[&Candidate; 4]> = placed
            .iter()
            .filter(|(_, rect)| rect.approx_eq_position(&closest_rect, self.tie_epsilon))
            .map(|(candidate, _)| candidate)
            .collect();

        let winner = if tied.len() == 1 {
            Some(tied[0].id)
        } else {
            tied.iter().max_by_key(|c| c.priority()).map(|c| c.id)
        };

        tracing::trace!(
            ?winner,
            distance,
            tied = tied.len(),
            candidates = placed.len(),
            "Resolved reference rectangle"
        );
        Ok(winner)
    }

    /// Deepest candidate passing `filter`, no spatial comparison.
    pub fn resolve_top(&self, store: &ObjectStore, filter: &Filter) -> Result<Option<ObjectId>> {
        let winner = self
            .candidates(store, filter)?
            .iter()
            .max_by_key(|c| c.priority())
            .map(|c| c.id);
        tracing::trace!(?winner, "Resolved topmost candidate");
        Ok(winner)
    }

    /// Topmost drawn object whose effective rectangle contains `point`.
    ///
    /// Objects without a visual facet never reach the draw list, so they
    /// cannot be hit either.
    pub fn hit_test(&self, store: &ObjectStore, point: Vec2) -> Result<Option<ObjectId>> {
        let filter = Filter::new()
            .require(Capability::Placed)
            .require(Capability::Visual)
            .containing(point);
        self.resolve_top(store, &filter)
    }
}
