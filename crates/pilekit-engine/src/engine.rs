//! Engine context owning the registry, the interaction state and the settings.

use pilekit_core::{EngineError, ObjectId, Rect, Result, Vec2};
use pilekit_settings::EngineConfig;
use smallvec::SmallVec;

use crate::input::InputSource;
use crate::interaction::{InteractionEvent, InteractionState};
use crate::object::GameObject;
use crate::presentation::{self, DrawItem, Renderer};
use crate::registry::ObjectStore;
use crate::selection::{Filter, Resolver};

/// Output of one tick.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub events: SmallVec<[InteractionEvent; 2]>,
    pub draw_list: Vec<DrawItem>,
}

/// The stacking engine.
///
/// Single owner of all engine state; every mutation goes through `&mut self`.
#[derive(Debug, Clone)]
pub struct Engine {
    pub(crate) store: ObjectStore,
    pub(crate) resolver: Resolver,
    pub(crate) config: EngineConfig,
    pub(crate) state: InteractionState,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Creates an empty engine.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_store(ObjectStore::new(), config)
    }

    /// Wraps an already populated registry.
    pub fn with_store(store: ObjectStore, config: EngineConfig) -> Self {
        Self {
            store,
            resolver: Resolver::from_settings(&config.selection),
            config,
            state: InteractionState::Idle,
        }
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Object currently held by the pointer.
    pub fn held(&self) -> Option<ObjectId> {
        match self.state {
            InteractionState::Idle => None,
            InteractionState::Holding { id, .. } => Some(id),
        }
    }

    pub fn object_count(&self) -> usize {
        self.store.len()
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.store.get(id)
    }

    pub fn insert(&mut self, object: GameObject) -> Result<ObjectId> {
        self.store.insert(object)
    }

    /// Removes an object, dropping any hold on it first.
    pub fn remove(&mut self, id: ObjectId) -> Result<GameObject> {
        if self.held() == Some(id) {
            tracing::debug!(%id, "Removing held object, hold cancelled");
            self.state = InteractionState::Idle;
        }
        self.store.remove(id)
    }

    pub fn top_of(&self, id: ObjectId) -> Result<ObjectId> {
        self.store.top_of(id)
    }

    pub fn depth_of(&self, id: ObjectId) -> Result<usize> {
        self.store.depth_of(id)
    }

    pub fn effective_rect(&self, id: ObjectId) -> Result<Rect> {
        self.store.effective_rect(id)
    }

    /// Places `mover` directly above `target`, bounded by the configured
    /// default capacity.
    pub fn join(&mut self, mover: ObjectId, target: ObjectId) -> Result<()> {
        self.store.join(mover, target, self.config.pile.default_capacity)
    }

    pub fn detach(&mut self, id: ObjectId) -> Result<()> {
        self.store.detach(id)
    }

    pub fn resolve(&self, reference: &Rect, filter: &Filter) -> Result<Option<ObjectId>> {
        self.resolver.resolve(&self.store, reference, filter)
    }

    pub fn resolve_top(&self, filter: &Filter) -> Result<Option<ObjectId>> {
        self.resolver.resolve_top(&self.store, filter)
    }

    /// Topmost object drawn under `point`.
    pub fn hit_test(&self, point: Vec2) -> Option<ObjectId> {
        match self.resolver.hit_test(&self.store, point) {
            Ok(hit) => hit,
            Err(err) => {
                report_fault(&err);
                None
            }
        }
    }

    /// Runs one frame: input edges, pointer tracking, then presentation.
    ///
    /// Press is handled before tracking and release after it, so a release
    /// drops the held object where the pointer is on that tick.
    pub fn tick<I: InputSource + ?Sized>(&mut self, input: &I) -> Frame {
        let mut events = SmallVec::new();
        let point = input.pointer_position();

        if input.pressed_edge() {
            events.extend(self.press(point));
        }
        self.drag_to(point);
        if input.released_edge() {
            events.extend(self.release());
        }

        Frame {
            events,
            draw_list: self.draw_list(),
        }
    }

    /// Current draw list, bottom to top.
    pub fn draw_list(&self) -> Vec<DrawItem> {
        match presentation::draw_list(&self.store) {
            Ok(items) => items,
            Err(err) => {
                report_fault(&err);
                Vec::new()
            }
        }
    }

    /// Builds the draw list and hands it to `renderer`.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        presentation::submit(&self.draw_list(), renderer);
    }

    /// Full link scan, see [`ObjectStore::verify_integrity`].
    pub fn verify_integrity(&self) -> Result<()> {
        self.store.verify_integrity()
    }
}

/// Logs an engine error that reached a non-propagating boundary.
///
/// Invariant faults are bugs in pile maintenance and trip a debug assertion.
pub(crate) fn report_fault(err: &EngineError) {
    if err.is_invariant_fault() {
        tracing::error!(error = %err, "Pile invariant violated");
        debug_assert!(false, "pile invariant violated: {err}");
    } else {
        tracing::warn!(error = %err, "Engine operation failed");
    }
}
