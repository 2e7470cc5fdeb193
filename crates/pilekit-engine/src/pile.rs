//! Pile model: ordering relation between registered objects.
//!
//! Piles are not stored anywhere. Each object records the identifier of the
//! object directly below and directly above it; a pile is the chain those
//! links form, bottom to top. Depth, top and anchor are recomputed by walking
//! the chain, so nothing cached can fall out of step with the links.
//!
//! ```text
//! top     A   below = B, above = None
//!         B   below = C, above = A
//! bottom  C   below = None, above = B   <- anchor, depth 0
//! ```

use pilekit_core::{EngineError, ObjectId, Rect, Result};

use crate::object::PileLink;
use crate::registry::ObjectStore;

#[derive(Debug, Clone, Copy)]
enum Direction {
    Down,
    Up,
}

impl Direction {
    fn next(self, link: &PileLink) -> Option<ObjectId> {
        match self {
            Direction::Down => link.below,
            Direction::Up => link.above,
        }
    }
}

impl ObjectStore {
    /// Follows links from `start` until the chain ends.
    ///
    /// Returns the last object reached and the number of steps taken.
    fn walk(&self, start: ObjectId, direction: Direction) -> Result<(ObjectId, usize)> {
        let mut current = start;
        let mut link = self.require(start)?.link;
        let mut steps = 0;

        while let Some(next) = direction.next(&link) {
            let object = self.get(next).ok_or(EngineError::DanglingReference {
                from: current,
                missing: next,
            })?;
            steps += 1;
            if steps >= self.len() {
                return Err(EngineError::PileCycle { id: start });
            }
            current = next;
            link = object.link;
        }

        Ok((current, steps))
    }

    /// Object directly below `id`, if any.
    pub fn below(&self, id: ObjectId) -> Result<Option<ObjectId>> {
        let below = self.require(id)?.link.below;
        match below {
            Some(next) if !self.contains(next) => Err(EngineError::DanglingReference {
                from: id,
                missing: next,
            }),
            _ => Ok(below),
        }
    }

    /// Object directly above `id`, if any.
    pub fn above(&self, id: ObjectId) -> Result<Option<ObjectId>> {
        let above = self.require(id)?.link.above;
        match above {
            Some(next) if !self.contains(next) => Err(EngineError::DanglingReference {
                from: id,
                missing: next,
            }),
            _ => Ok(above),
        }
    }

    pub fn is_piled(&self, id: ObjectId) -> Result<bool> {
        Ok(self.require(id)?.link.is_piled())
    }

    /// Top of the pile containing `id`. An unpiled object is its own top.
    pub fn top_of(&self, id: ObjectId) -> Result<ObjectId> {
        Ok(self.walk(id, Direction::Up)?.0)
    }

    /// Bottom (anchor) of the pile containing `id`.
    pub fn bottom_of(&self, id: ObjectId) -> Result<ObjectId> {
        Ok(self.walk(id, Direction::Down)?.0)
    }

    /// Distance from the pile's bottom; the bottom is depth 0.
    pub fn depth_of(&self, id: ObjectId) -> Result<usize> {
        Ok(self.walk(id, Direction::Down)?.1)
    }

    /// Number of members in the pile containing `id` (1 when unpiled).
    pub fn pile_len(&self, id: ObjectId) -> Result<usize> {
        let (_, down) = self.walk(id, Direction::Down)?;
        let (_, up) = self.walk(id, Direction::Up)?;
        Ok(down + up + 1)
    }

    /// Members of the pile containing `id`, bottom to top.
    pub fn pile_members(&self, id: ObjectId) -> Result<Vec<ObjectId>> {
        let bottom = self.bottom_of(id)?;
        let mut members = vec![bottom];
        let mut current = bottom;
        while let Some(next) = self.above(current)? {
            if members.len() >= self.len() {
                return Err(EngineError::PileCycle { id });
            }
            members.push(next);
            current = next;
        }
        Ok(members)
    }

    /// Every pile with two or more members, bottom to top, in registry order
    /// of their anchors.
    pub fn piles(&self) -> Result<Vec<Vec<ObjectId>>> {
        let mut piles = Vec::new();
        for object in self.iter() {
            if object.link.below.is_none() && object.link.above.is_some() {
                piles.push(self.pile_members(object.id())?);
            }
        }
        Ok(piles)
    }

    /// On-screen rectangle after pile offsetting.
    ///
    /// A piled object sits at its anchor's position plus `depth` times its own
    /// per-level offset and keeps its own size. A held object reports its live
    /// rectangle.
    pub fn effective_rect(&self, id: ObjectId) -> Result<Rect> {
        let object = self.require(id)?;
        let rect = object.rect().ok_or(EngineError::Unplaced { id })?;
        if object.is_held() || !object.link.is_piled() {
            return Ok(rect);
        }

        let (anchor, depth) = self.walk(id, Direction::Down)?;
        let anchor_rect = self
            .require(anchor)?
            .rect()
            .ok_or(EngineError::Unplaced { id: anchor })?;
        let offset = object.pile_offset().scaled(depth as f64);

        Ok(rect.with_position(anchor_rect.top_left() + offset))
    }

    /// Maximum size of a pile anchored at `anchor`.
    pub fn capacity_of(
        &self,
        anchor: ObjectId,
        default_capacity: Option<usize>,
    ) -> Result<Option<usize>> {
        let pileable = self.require(anchor)?.pileable;
        Ok(pileable.and_then(|p| p.max_pile_size).or(default_capacity))
    }

    /// Places `mover` directly above `target`.
    ///
    /// `mover` first leaves whatever pile it is in. Members that were above
    /// `target` move up by one. Everything is validated before the first link
    /// changes, so an error leaves the registry untouched.
    pub fn join(
        &mut self,
        mover: ObjectId,
        target: ObjectId,
        default_capacity: Option<usize>,
    ) -> Result<()> {
        if mover == target {
            return Err(EngineError::SelfJoin { id: mover });
        }

        for id in [mover, target] {
            let object = self.require(id)?;
            if object.pileable.is_none() || object.placement.is_none() {
                return Err(EngineError::NotPileable { id });
            }
        }

        if self.below(mover)? == Some(target) {
            tracing::debug!(%mover, %target, "Already directly above target");
            self.snap_to_anchor(mover)?;
            return Ok(());
        }

        let destination: Vec<ObjectId> = self
            .pile_members(target)?
            .into_iter()
            .filter(|id| *id != mover)
            .collect();
        let anchor = destination[0];
        if let Some(capacity) = self.capacity_of(anchor, default_capacity)? {
            if destination.len() + 1 > capacity {
                return Err(EngineError::CapacityExceeded { anchor, capacity });
            }
        }
        // Surface any fault in the mover's own pile before touching links.
        self.pile_members(mover)?;

        self.detach(mover)?;

        let above_target = self.above(target)?;
        self.require_mut(mover)?.link = PileLink {
            below: Some(target),
            above: above_target,
        };
        self.require_mut(target)?.link.above = Some(mover);
        if let Some(upper) = above_target {
            self.require_mut(upper)?.link.below = Some(mover);
        }

        self.snap_to_anchor(mover)?;
        tracing::debug!(
            %mover,
            %target,
            %anchor,
            size = destination.len() + 1,
            "Joined pile"
        );
        Ok(())
    }

    /// Removes `id` from its pile.
    ///
    /// The member above drops directly onto the member below. A pile left
    /// with one member dissolves. Every object that ends up unpiled, and a
    /// member that becomes the new anchor, returns to its home rectangle.
    /// No-op for an unpiled object.
    pub fn detach(&mut self, id: ObjectId) -> Result<()> {
        let link = self.require(id)?.link;
        if !link.is_piled() {
            return Ok(());
        }

        if let Some(lower) = link.below {
            let lower_link = self
                .get(lower)
                .ok_or(EngineError::DanglingReference {
                    from: id,
                    missing: lower,
                })?
                .link;
            if lower_link.above != Some(id) {
                return Err(EngineError::BrokenLink { lower, upper: id });
            }
        }
        if let Some(upper) = link.above {
            let upper_link = self
                .get(upper)
                .ok_or(EngineError::DanglingReference {
                    from: id,
                    missing: upper,
                })?
                .link;
            if upper_link.below != Some(id) {
                return Err(EngineError::BrokenLink { lower: id, upper });
            }
        }

        if let Some(lower) = link.below {
            self.require_mut(lower)?.link.above = link.above;
        }
        if let Some(upper) = link.above {
            self.require_mut(upper)?.link.below = link.below;
        }

        self.require_mut(id)?.link = PileLink::default();
        self.return_home(id)?;
        // A detached anchor hands the pile to the member above it.
        if link.below.is_none() {
            if let Some(upper) = link.above {
                self.return_home(upper)?;
            }
        }
        // A pile left with one member dissolves around the survivor.
        if let Some(lower) = link.below {
            if link.above.is_none() && !self.is_piled(lower)? {
                self.return_home(lower)?;
            }
        }

        tracing::debug!(%id, below = ?link.below, above = ?link.above, "Detached from pile");
        Ok(())
    }

    fn return_home(&mut self, id: ObjectId) -> Result<()> {
        if let Some(placement) = self.require_mut(id)?.placement.as_mut() {
            placement.rect = placement.home;
            placement.last_rect = placement.home;
        }
        Ok(())
    }

    /// Moves the raw placement of `id` onto its pile anchor's position.
    fn snap_to_anchor(&mut self, id: ObjectId) -> Result<()> {
        let anchor = self.bottom_of(id)?;
        let position = self
            .require(anchor)?
            .rect()
            .ok_or(EngineError::Unplaced { id: anchor })?
            .top_left();
        if let Some(placement) = self.require_mut(id)?.placement.as_mut() {
            placement.rect = placement.rect.with_position(position);
        }
        Ok(())
    }

    /// Checks every link in the registry.
    ///
    /// Reports the first dangling reference, asymmetric link or cycle found.
    pub fn verify_integrity(&self) -> Result<()> {
        for object in self.iter() {
            let id = object.id();
            if let Some(lower) = object.link.below {
                let lower_object = self.get(lower).ok_or(EngineError::DanglingReference {
                    from: id,
                    missing: lower,
                })?;
                if lower_object.link.above != Some(id) {
                    return Err(EngineError::BrokenLink { lower, upper: id });
                }
            }
            if let Some(upper) = object.link.above {
                let upper_object = self.get(upper).ok_or(EngineError::DanglingReference {
                    from: id,
                    missing: upper,
                })?;
                if upper_object.link.below != Some(id) {
                    return Err(EngineError::BrokenLink { lower: id, upper });
                }
            }
            self.walk(id, Direction::Down)?;
        }
        Ok(())
    }
}
