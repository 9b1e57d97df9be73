// SPDX-License-Identifier: MIT OR Apache-2.0
//! Track definitions for timeline assets.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub Uuid);

impl TrackId {
    /// Create a new random track ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind of content a track carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    /// Animation clips driving an animated object
    Animation,
    /// Activation (object enabled while a clip is active)
    Activation,
    /// Audio playback
    Audio,
    /// Nested timelines and prefabs
    Control,
    /// Signal emitters
    Signal,
    /// Folder of child tracks
    Group,
}

impl TrackKind {
    /// Whether tracks of this kind animate a bound object
    pub fn is_animation(&self) -> bool {
        matches!(self, Self::Animation)
    }
}

/// A track in a timeline asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackAsset {
    /// Unique track ID
    pub id: TrackId,
    /// Display name
    pub name: String,
    /// Track kind
    pub kind: TrackKind,
    /// Whether the track is muted
    #[serde(default)]
    pub muted: bool,
    /// Child tracks (only populated for groups)
    #[serde(default)]
    pub children: Vec<TrackAsset>,
}

impl TrackAsset {
    /// Create a new track
    pub fn new(name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            id: TrackId::new(),
            name: name.into(),
            kind,
            muted: false,
            children: Vec::new(),
        }
    }

    /// Create an animation track
    pub fn animation(name: impl Into<String>) -> Self {
        Self::new(name, TrackKind::Animation)
    }

    /// Add a child track, turning this track into a group if it is not one
    pub fn add_child(&mut self, track: TrackAsset) -> TrackId {
        self.kind = TrackKind::Group;
        let id = track.id;
        self.children.push(track);
        id
    }

    /// Whether this track animates a bound object
    pub fn is_animation(&self) -> bool {
        self.kind.is_animation()
    }

    /// Depth-first search for a track by ID, including this one
    pub fn find(&self, track_id: TrackId) -> Option<&TrackAsset> {
        if self.id == track_id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(track_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_kind() {
        assert!(TrackAsset::animation("TransitionA").is_animation());
        assert!(!TrackAsset::new("TransitionA", TrackKind::Audio).is_animation());
    }

    #[test]
    fn test_group_children() {
        let mut group = TrackAsset::new("Cameras", TrackKind::Activation);
        let child = TrackAsset::animation("Dolly");
        let child_id = group.add_child(child);

        assert_eq!(group.kind, TrackKind::Group);
        assert_eq!(group.find(child_id).map(|t| t.name.as_str()), Some("Dolly"));
        assert!(group.find(TrackId::new()).is_none());
    }
}
