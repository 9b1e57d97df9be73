// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline asset containing a marker track and root tracks.

use crate::marker::{Marker, MarkerId, MarkerTrack};
use crate::track::{TrackAsset, TrackId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a timeline asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimelineId(pub Uuid);

impl TimelineId {
    /// Create a new random timeline ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TimelineId {
    fn default() -> Self {
        Self::new()
    }
}

/// Error loading or saving a timeline asset
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    /// Malformed RON input
    #[error("Failed to parse timeline: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Serialization failure
    #[error("Failed to serialize timeline: {0}")]
    Serialize(#[from] ron::Error),
}

/// An authored timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineAsset {
    /// Unique timeline ID
    pub id: TimelineId,
    /// Timeline name
    pub name: String,
    /// Timeline duration in seconds
    pub duration: f64,
    /// Marker track (absent until the first marker is added)
    #[serde(default)]
    marker_track: Option<MarkerTrack>,
    /// Root tracks in authoring order
    #[serde(default)]
    root_tracks: IndexMap<TrackId, TrackAsset>,
}

impl TimelineAsset {
    /// Create a new empty timeline
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TimelineId::new(),
            name: name.into(),
            duration: 10.0,
            marker_track: None,
            root_tracks: IndexMap::new(),
        }
    }

    /// Add a root track
    pub fn add_track(&mut self, track: TrackAsset) -> TrackId {
        let id = track.id;
        self.root_tracks.insert(id, track);
        id
    }

    /// Remove a root track
    pub fn remove_track(&mut self, track_id: TrackId) -> Option<TrackAsset> {
        self.root_tracks.shift_remove(&track_id)
    }

    /// Find a track anywhere in the hierarchy
    pub fn track(&self, track_id: TrackId) -> Option<&TrackAsset> {
        self.root_tracks.values().find_map(|t| t.find(track_id))
    }

    /// Root tracks in authoring order
    pub fn root_tracks(&self) -> impl Iterator<Item = &TrackAsset> {
        self.root_tracks.values()
    }

    /// Root track count
    pub fn track_count(&self) -> usize {
        self.root_tracks.len()
    }

    /// The marker track, if one has been created
    pub fn marker_track(&self) -> Option<&MarkerTrack> {
        self.marker_track.as_ref()
    }

    /// The marker track, created on demand
    pub fn marker_track_mut(&mut self) -> &mut MarkerTrack {
        self.marker_track.get_or_insert_with(MarkerTrack::new)
    }

    /// Add a marker to the marker track
    pub fn add_marker(&mut self, marker: Marker) -> MarkerId {
        self.marker_track_mut().add(marker)
    }

    /// Add a signal emitter to the marker track
    pub fn add_signal(&mut self, time: f64, signal: impl Into<String>) -> MarkerId {
        self.add_marker(Marker::signal(time, signal))
    }

    /// Time of the last marker
    pub fn content_duration(&self) -> f64 {
        self.marker_track
            .as_ref()
            .and_then(|t| t.markers().last())
            .map_or(0.0, |m| m.time)
    }

    /// Serialize to RON
    pub fn to_ron(&self) -> Result<String, TimelineError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Deserialize from RON
    pub fn from_ron(source: &str) -> Result<Self, TimelineError> {
        Ok(ron::from_str(source)?)
    }
}

impl Default for TimelineAsset {
    fn default() -> Self {
        Self::new("Untitled Timeline")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::TrackKind;

    #[test]
    fn test_marker_track_created_on_demand() {
        let mut timeline = TimelineAsset::new("Transitions");
        assert!(timeline.marker_track().is_none());

        timeline.add_signal(1.5, "StartA");
        timeline.add_signal(3.0, "EndA");

        assert_eq!(timeline.marker_track().map(MarkerTrack::len), Some(2));
        assert_eq!(timeline.content_duration(), 3.0);
    }

    #[test]
    fn test_root_track_order() {
        let mut timeline = TimelineAsset::default();
        timeline.add_track(TrackAsset::animation("TransitionA"));
        let audio = timeline.add_track(TrackAsset::new("Music", TrackKind::Audio));
        timeline.add_track(TrackAsset::animation("TransitionB"));

        let names: Vec<&str> = timeline.root_tracks().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["TransitionA", "Music", "TransitionB"]);

        timeline.remove_track(audio);
        assert_eq!(timeline.track_count(), 2);
    }

    #[test]
    fn test_serialization() {
        let mut timeline = TimelineAsset::new("Serialization Test");
        let track = timeline.add_track(TrackAsset::animation("TransitionA"));
        timeline.add_signal(2.0, "StartA");

        let ron = timeline.to_ron().unwrap();
        let loaded = TimelineAsset::from_ron(&ron).unwrap();
        assert_eq!(loaded.name, "Serialization Test");
        assert_eq!(loaded.track(track).map(|t| t.kind), Some(TrackKind::Animation));
        assert_eq!(loaded.marker_track().map(MarkerTrack::len), Some(1));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            TimelineAsset::from_ron("(name: "),
            Err(TimelineError::Parse(_))
        ));
    }
}
