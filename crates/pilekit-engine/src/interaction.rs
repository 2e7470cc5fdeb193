//! Press/drag/release lifecycle.
//!
//! ```text
//!          press over an interactive object
//!   Idle ───────────────────────────────────▶ Holding(o)
//!    ▲                                            │ pointer moves: o follows
//!    └────────────────────────────────────────────┘
//!       release: join the overlapped pile, or snap back
//! ```
//!
//! Rejected drops are not errors for the host: the held object returns to
//! where it was picked up and the reason is reported in the event.

use pilekit_core::{EngineError, ObjectId, Rect, Result, Vec2};
use pilekit_settings::HitTestMode;

use crate::engine::{report_fault, Engine};
use crate::object::Capability;
use crate::selection::Filter;

/// Interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Holding {
        id: ObjectId,
        /// Rectangle at the moment of press, restored on a rejected drop
        snapshot: Rect,
    },
}

/// Why a drop snapped back.
#[derive(Debug, Clone, PartialEq)]
pub enum RevertReason {
    /// Nothing pileable under the dropped object
    NoTarget,
    /// `join` refused the target
    Rejected(EngineError),
    /// Pile maintenance is broken
    Fault(EngineError),
}

/// Transition reported to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    PickedUp { id: ObjectId },
    Dropped { id: ObjectId, target: ObjectId },
    Reverted { id: ObjectId, reason: RevertReason },
}

impl Engine {
    /// Handles a pointer-press edge at `point`.
    ///
    /// Picks the object under the pointer, redirected to the top of its pile.
    /// Ignored while already holding.
    pub fn press(&mut self, point: Vec2) -> Option<InteractionEvent> {
        if let InteractionState::Holding { id, .. } = self.state {
            tracing::debug!(%id, "Press while holding ignored");
            return None;
        }

        let hit = match self.pick_target(point) {
            Ok(Some(id)) => id,
            Ok(None) => return None,
            Err(err) => {
                report_fault(&err);
                return None;
            }
        };

        let top = match self.store.top_of(hit) {
            Ok(top) => top,
            Err(err) => {
                report_fault(&err);
                return None;
            }
        };
        if top != hit {
            tracing::debug!(%hit, %top, "Redirected pick to top of pile");
        }

        let snapshot = match self.store.effective_rect(top) {
            Ok(rect) => rect,
            Err(err) => {
                report_fault(&err);
                return None;
            }
        };

        let object = self.store.get_mut(top)?;
        let Some(interactive) = object.interactive.as_mut() else {
            tracing::debug!(id = %top, "Top of pile is not interactive");
            return None;
        };
        let placement = object.placement.as_mut()?;
        placement.rect = snapshot;
        placement.last_rect = snapshot;
        interactive.held = true;

        self.state = InteractionState::Holding { id: top, snapshot };
        tracing::debug!(id = %top, x = point.x, y = point.y, "Picked up");
        Some(InteractionEvent::PickedUp { id: top })
    }

    /// Centers the held object on `point`. No-op while idle.
    pub fn drag_to(&mut self, point: Vec2) {
        let InteractionState::Holding { id, .. } = self.state else {
            return;
        };
        if let Some(placement) = self
            .store
            .get_mut(id)
            .and_then(|object| object.placement.as_mut())
        {
            placement.rect = placement.rect.centered_on(point);
        }
    }

    /// Handles a pointer-release edge.
    ///
    /// Joins the held object onto the pile it overlaps; otherwise, or when the
    /// join is refused, restores the rectangle captured at press time.
    pub fn release(&mut self) -> Option<InteractionEvent> {
        let InteractionState::Holding { id, snapshot } = self.state else {
            return None;
        };
        self.state = InteractionState::Idle;

        let object = self.store.get_mut(id)?;
        if let Some(interactive) = object.interactive.as_mut() {
            interactive.held = false;
        }
        let live = object.rect()?;

        let outcome = self
            .drop_target(id, live)
            .and_then(|target| match target {
                Some(target) => self.join(id, target).map(|()| Some(target)),
                None => Ok(None),
            });

        match outcome {
            Ok(Some(target)) => {
                if let Some(placement) = self
                    .store
                    .get_mut(id)
                    .and_then(|object| object.placement.as_mut())
                {
                    placement.last_rect = placement.rect;
                }
                tracing::debug!(%id, %target, "Dropped onto pile");
                Some(InteractionEvent::Dropped { id, target })
            }
            Ok(None) => {
                tracing::debug!(%id, "No stackable object under drop, reverting");
                self.revert(id, snapshot, RevertReason::NoTarget)
            }
            Err(err) => {
                report_fault(&err);
                let reason = if err.is_invariant_fault() {
                    RevertReason::Fault(err)
                } else {
                    RevertReason::Rejected(err)
                };
                self.revert(id, snapshot, reason)
            }
        }
    }

    fn pick_target(&self, point: Vec2) -> Result<Option<ObjectId>> {
        let probe = Rect::probe(point, self.config.selection.probe_size);
        let filter = Filter::new()
            .require(Capability::Idle)
            .require(Capability::Placed)
            .overlapping(probe);

        match self.config.selection.hit_test {
            HitTestMode::Topmost => self.resolver.resolve_top(&self.store, &filter),
            HitTestMode::Nearest => self.resolver.resolve(&self.store, &probe, &filter),
        }
    }

    /// Pile member the dropped object should land on.
    ///
    /// The resolved object is redirected to the top of its pile. When that top
    /// is the dropped object itself, the member directly below is used.
    fn drop_target(&self, id: ObjectId, live: Rect) -> Result<Option<ObjectId>> {
        let filter = Filter::new()
            .require(Capability::Pileable)
            .require(Capability::Placed)
            .excluding(id)
            .overlapping(live);

        let Some(target) = self.resolver.resolve(&self.store, &live, &filter)? else {
            return Ok(None);
        };

        let top = self.store.top_of(target)?;
        if top == id {
            return Ok(Some(self.store.below(id)?.unwrap_or(target)));
        }
        Ok(Some(top))
    }

    fn revert(
        &mut self,
        id: ObjectId,
        snapshot: Rect,
        reason: RevertReason,
    ) -> Option<InteractionEvent> {
        let placement = self.store.get_mut(id)?.placement.as_mut()?;
        placement.rect = snapshot;
        placement.last_rect = snapshot;
        Some(InteractionEvent::Reverted { id, reason })
    }
}
