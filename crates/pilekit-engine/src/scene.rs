//! Scene setup: bulk creation of objects and pre-dealt piles.
//!
//! Scenes are built either in code through [`SceneBuilder`] or from a
//! [`SceneDescription`] read from a JSON or TOML file. Pile state is never
//! written back; a description only seeds the initial layout.

use std::collections::HashMap;
use std::path::Path;

use pilekit_core::layout::{CARD_GAP, CARD_HEIGHT, CARD_WIDTH, SURFACE_HEIGHT};
use pilekit_core::{ObjectId, Rect, Result, TextureId, Vec2};
use pilekit_settings::{load_document, save_document, EngineConfig};
use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::error::{SceneError, SceneResult};
use crate::object::{GameObject, Visual};
use crate::registry::ObjectStore;

/// Incrementally builds an [`Engine`].
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    config: EngineConfig,
    store: ObjectStore,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl SceneBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            store: ObjectStore::new(),
        }
    }

    /// A draggable, pileable object fanned out by the default pile offset.
    pub fn card(&mut self, rect: Rect, texture: Option<TextureId>) -> Result<ObjectId> {
        let visual = Visual::new(texture, self.config.pile.default_offset);
        self.object(
            GameObject::new()
                .placed(rect)
                .visual(visual)
                .pileable(None)
                .interactive(),
        )
    }

    /// A fixed, untextured pile anchor. Drawn as a placeholder outline.
    pub fn slot(&mut self, rect: Rect) -> Result<ObjectId> {
        self.object(
            GameObject::new()
                .placed(rect)
                .visual(Visual::default())
                .pileable(None),
        )
    }

    /// Registers an arbitrary object.
    pub fn object(&mut self, object: GameObject) -> Result<ObjectId> {
        self.store.insert(object)
    }

    /// Stacks `members` bottom to top.
    pub fn pile(&mut self, members: &[ObjectId]) -> Result<()> {
        for pair in members.windows(2) {
            self.store.join(pair[1], pair[0], self.config.pile.default_capacity)?;
        }
        Ok(())
    }

    pub fn build(self) -> Engine {
        tracing::info!(objects = self.store.len(), "Scene built");
        Engine::with_store(self.store, self.config)
    }
}

/// Role of a described object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Draggable and pileable
    #[default]
    Card,
    /// Fixed pile anchor
    Slot,
}

/// One object in a scene description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    /// Name used by `piles` to refer to this object
    pub name: String,
    #[serde(default)]
    pub kind: ObjectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<TextureId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pile_size: Option<usize>,
    /// Overrides the configured per-level offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pile_offset: Option<Vec2>,
    pub rect: Rect,
}

/// Declarative initial layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Pre-dealt piles, each listed bottom to top by object name
    #[serde(default)]
    pub piles: Vec<Vec<String>>,
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
}

impl SceneDescription {
    /// Load a description from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SceneResult<Self> {
        Ok(load_document(path)?)
    }

    /// Save a description to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SceneResult<()> {
        Ok(save_document(self, path)?)
    }

    /// Creates every object, then deals the piles.
    ///
    /// Returns the engine and the identifier assigned to each name.
    pub fn build(
        &self,
        config: EngineConfig,
    ) -> SceneResult<(Engine, HashMap<String, ObjectId>)> {
        let default_offset = config.pile.default_offset;
        let mut builder = SceneBuilder::new(config);
        let mut names = HashMap::with_capacity(self.objects.len());

        for spec in &self.objects {
            if names.contains_key(&spec.name) {
                return Err(SceneError::DuplicateName(spec.name.clone()));
            }
            let offset = spec.pile_offset.unwrap_or(match spec.kind {
                ObjectKind::Card => default_offset,
                ObjectKind::Slot => Vec2::ZERO,
            });
            let visual = Visual::new(spec.texture, offset);
            let mut object = GameObject::new()
                .placed(spec.rect)
                .visual(visual)
                .pileable(spec.max_pile_size);
            if spec.kind == ObjectKind::Card {
                object = object.interactive();
            }
            let id = builder.object(object)?;
            names.insert(spec.name.clone(), id);
        }

        for (index, pile) in self.piles.iter().enumerate() {
            if pile.len() < 2 {
                return Err(SceneError::PileTooShort {
                    index,
                    len: pile.len(),
                });
            }
            let members = pile
                .iter()
                .map(|name| {
                    names
                        .get(name)
                        .copied()
                        .ok_or_else(|| SceneError::UnknownName(name.clone()))
                })
                .collect::<SceneResult<Vec<_>>>()?;
            builder.pile(&members)?;
        }

        Ok((builder.build(), names))
    }
}

/// Two cards along the top edge and three empty slots further down.
pub fn default_layout() -> SceneDescription {
    let card = |name: &str, x: f64, texture: u64| ObjectSpec {
        name: name.to_string(),
        kind: ObjectKind::Card,
        texture: Some(TextureId(texture)),
        max_pile_size: None,
        pile_offset: None,
        rect: Rect::new(x, 0.0, CARD_WIDTH, CARD_HEIGHT),
    };
    let slot = |name: &str, column: f64| ObjectSpec {
        name: name.to_string(),
        kind: ObjectKind::Slot,
        texture: None,
        max_pile_size: None,
        pile_offset: None,
        rect: Rect::new(
            400.0 + column * (CARD_WIDTH + CARD_GAP),
            SURFACE_HEIGHT - 2.0 * CARD_HEIGHT,
            CARD_WIDTH,
            CARD_HEIGHT,
        ),
    };

    SceneDescription {
        piles: Vec::new(),
        objects: vec![
            card("two_of_clubs", 0.0, 2),
            card("three_of_clubs", CARD_WIDTH + CARD_GAP, 3),
            slot("slot_1", 0.0),
            slot("slot_2", 1.0),
            slot("slot_3", 2.0),
        ],
    }
}
