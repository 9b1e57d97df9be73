// SPDX-License-Identifier: MIT OR Apache-2.0
//! Object handles and track bindings.

use crate::track::TrackId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Handle to a live scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    /// Create a new random object ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// Runtime association between tracks and the objects they animate
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    bindings: IndexMap<TrackId, ObjectId>,
}

impl BindingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a track to an object, returning the previous binding
    pub fn set(&mut self, track: TrackId, object: ObjectId) -> Option<ObjectId> {
        self.bindings.insert(track, object)
    }

    /// Object currently bound to a track
    pub fn get(&self, track: TrackId) -> Option<ObjectId> {
        self.bindings.get(&track).copied()
    }

    /// Clear a track's binding
    pub fn remove(&mut self, track: TrackId) -> Option<ObjectId> {
        self.bindings.shift_remove(&track)
    }

    /// All bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (TrackId, ObjectId)> + '_ {
        self.bindings.iter().map(|(t, o)| (*t, *o))
    }

    /// Number of bound tracks
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no track is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
