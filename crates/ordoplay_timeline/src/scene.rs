// SPDX-License-Identifier: MIT OR Apache-2.0
//! Live scene objects targeted by track bindings.

use crate::binding::ObjectId;
use indexmap::IndexMap;

/// Access to live objects by handle.
///
/// Handles are weak: an object may be despawned while something still holds
/// its ID, so every operation tolerates missing objects.
pub trait SceneObjects {
    /// Whether the object still exists
    fn contains(&self, id: ObjectId) -> bool;

    /// Active flag, or `None` for a missing object
    fn is_active(&self, id: ObjectId) -> Option<bool>;

    /// Set the active flag. Returns false if the object is gone.
    fn set_active(&mut self, id: ObjectId, active: bool) -> bool;

    /// Parent in the hierarchy
    fn parent(&self, id: ObjectId) -> Option<ObjectId>;

    /// Whether the object carries an animator
    fn is_animated(&self, id: ObjectId) -> bool;
}

/// An object in the in-memory scene
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Object name
    pub name: String,
    /// Whether the object is active
    pub active: bool,
    /// Parent object
    pub parent: Option<ObjectId>,
    /// Whether the object carries an animator
    pub animated: bool,
}

impl SceneObject {
    /// Create an active, unanimated root object
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            parent: None,
            animated: false,
        }
    }

    /// Attach an animator
    pub fn with_animator(mut self) -> Self {
        self.animated = true;
        self
    }

    /// Set the parent object
    pub fn with_parent(mut self, parent: ObjectId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the initial active flag
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

/// In-memory scene
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: IndexMap<ObjectId, SceneObject>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object
    pub fn spawn(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId::new();
        self.objects.insert(id, object);
        id
    }

    /// Add an animated object
    pub fn spawn_animated(&mut self, name: impl Into<String>) -> ObjectId {
        self.spawn(SceneObject::new(name).with_animator())
    }

    /// Remove an object. Children keep a dangling parent handle.
    pub fn despawn(&mut self, id: ObjectId) -> Option<SceneObject> {
        self.objects.shift_remove(&id)
    }

    /// Get an object
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl SceneObjects for Scene {
    fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    fn is_active(&self, id: ObjectId) -> Option<bool> {
        self.objects.get(&id).map(|o| o.active)
    }

    fn set_active(&mut self, id: ObjectId, active: bool) -> bool {
        match self.objects.get_mut(&id) {
            Some(object) => {
                object.active = active;
                true
            }
            None => false,
        }
    }

    fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects.get(&id).and_then(|o| o.parent)
    }

    fn is_animated(&self, id: ObjectId) -> bool {
        self.objects.get(&id).is_some_and(|o| o.animated)
    }
}
