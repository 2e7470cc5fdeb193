//! Object registry: sole owner of every engine object.

use std::collections::HashMap;

use pilekit_core::{EngineError, ObjectId, Result};

use crate::object::GameObject;

/// Owns objects by identifier and remembers insertion order.
///
/// Iteration always follows insertion order, which makes every "last visited
/// wins" tie-break in the resolver reproducible for a given scene.
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    objects: HashMap<ObjectId, GameObject>,
    order: Vec<ObjectId>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an object and returns its identifier.
    ///
    /// The object must arrive unpiled; piles are only built through `join`.
    pub fn insert(&mut self, mut object: GameObject) -> Result<ObjectId> {
        let id = object.id();
        if self.objects.contains_key(&id) {
            return Err(EngineError::DuplicateObject { id });
        }
        object.link = Default::default();
        self.objects.insert(id, object);
        self.order.push(id);
        Ok(id)
    }

    /// Detaches the object from its pile, then drops it from the registry.
    pub fn remove(&mut self, id: ObjectId) -> Result<GameObject> {
        self.detach(id)?;
        let object = self
            .objects
            .remove(&id)
            .ok_or(EngineError::UnknownObject { id })?;
        self.order.retain(|other| *other != id);
        tracing::debug!(%id, "Removed object");
        Ok(object)
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(&id)
    }

    /// Like [`get`](Self::get) but reports an unknown id as an error.
    pub fn require(&self, id: ObjectId) -> Result<&GameObject> {
        self.objects.get(&id).ok_or(EngineError::UnknownObject { id })
    }

    pub(crate) fn require_mut(&mut self, id: ObjectId) -> Result<&mut GameObject> {
        self.objects
            .get_mut(&id)
            .ok_or(EngineError::UnknownObject { id })
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Identifiers in insertion order.
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = ObjectId> + '_ {
        self.order.iter().copied()
    }

    /// Objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &GameObject> + '_ {
        self.order.iter().filter_map(|id| self.objects.get(id))
    }
}
