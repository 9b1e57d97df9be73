// SPDX-License-Identifier: MIT OR Apache-2.0
//! One-time scan of a timeline into transition lookup structures.

use crate::config::{DuplicateMarkerPolicy, TransitionConfig};
use crate::error::ConfigurationError;
use indexmap::{IndexMap, IndexSet};
use ordoplay_timeline::{TimelineAsset, TrackId};

/// A start marker found in the timeline
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerEntry {
    /// Marker display name
    pub name: String,
    /// Marker time in seconds
    pub time: f64,
}

/// Start marker name to time
#[derive(Debug, Clone, Default)]
pub struct MarkerIndex {
    times: IndexMap<String, f64>,
}

impl MarkerIndex {
    /// Insert an entry, returning the time it replaced
    fn insert(&mut self, entry: MarkerEntry) -> Option<f64> {
        self.times.insert(entry.name, entry.time)
    }

    /// Time of a start marker
    pub fn get(&self, name: &str) -> Option<f64> {
        self.times.get(name).copied()
    }

    /// Whether a start marker exists
    pub fn contains(&self, name: &str) -> bool {
        self.times.contains_key(name)
    }

    /// Marker names in discovery order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.times.keys().map(String::as_str)
    }

    /// Number of start markers
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether no start marker was found
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Stop signals that get one stop reaction each
#[derive(Debug, Clone, Default)]
pub struct StopReactionRegistry {
    signals: IndexSet<String>,
}

impl StopReactionRegistry {
    /// Add a stop signal. Returns false if it was already present.
    fn insert(&mut self, signal: &str) -> bool {
        if self.signals.contains(signal) {
            return false;
        }
        self.signals.insert(signal.to_string())
    }

    /// Whether the signal is a stop signal
    pub fn contains(&self, signal: &str) -> bool {
        self.signals.contains(signal)
    }

    /// Stop signals in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.signals.iter().map(String::as_str)
    }

    /// Number of stop signals
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Whether there are no stop signals
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

/// Which side of a transition a track animates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackRole {
    /// The object being transitioned away from
    Source,
    /// The object being transitioned to
    Destination,
}

/// A track resolved for a role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackBinding {
    /// Role of the track
    pub role: TrackRole,
    /// The timeline track
    pub track: TrackId,
}

/// Source and destination tracks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackBindings {
    /// Source track
    pub source: Option<TrackId>,
    /// Destination track
    pub destination: Option<TrackId>,
}

impl TrackBindings {
    /// Binding for a role
    pub fn get(&self, role: TrackRole) -> Option<TrackBinding> {
        let track = match role {
            TrackRole::Source => self.source,
            TrackRole::Destination => self.destination,
        }?;
        Some(TrackBinding { role, track })
    }
}

/// Everything a coordinator needs from a timeline
#[derive(Debug, Clone, Default)]
pub struct TimelineIndex {
    /// Start markers
    pub markers: MarkerIndex,
    /// Stop signals
    pub stop_signals: StopReactionRegistry,
    /// Resolved tracks
    pub tracks: TrackBindings,
}

/// Builds a [`TimelineIndex`] from a timeline asset
#[derive(Debug, Clone, Default)]
pub struct MarkerIndexBuilder {
    config: TransitionConfig,
}

impl MarkerIndexBuilder {
    /// Create a builder
    pub fn new(config: TransitionConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Scan the timeline's marker track and root tracks
    pub fn build(&self, timeline: Option<&TimelineAsset>) -> Result<TimelineIndex, ConfigurationError> {
        let timeline = timeline.ok_or(ConfigurationError::MissingTimeline)?;
        let marker_track = timeline
            .marker_track()
            .ok_or_else(|| ConfigurationError::MissingMarkerTrack(timeline.name.clone()))?;

        let mut index = TimelineIndex::default();

        for marker in marker_track.markers() {
            let Some(name) = marker.signal_name() else {
                continue;
            };

            if self.config.is_start_marker(name) {
                if self.config.duplicate_markers == DuplicateMarkerPolicy::Reject && index.markers.contains(name) {
                    return Err(ConfigurationError::DuplicateStartMarker { name: name.to_string() });
                }
                let entry = MarkerEntry {
                    name: name.to_string(),
                    time: marker.time,
                };
                if let Some(previous) = index.markers.insert(entry) {
                    tracing::warn!("Start marker '{name}' at {previous}s replaced by {}s", marker.time);
                }
            }

            if self.config.is_stop_marker(name) {
                index.stop_signals.insert(name);
            }
        }

        for track in timeline.root_tracks() {
            if !track.is_animation() {
                continue;
            }
            if self.config.is_source_track(&track.name) && index.tracks.source.is_none() {
                index.tracks.source = Some(track.id);
            }
            if self.config.is_destination_track(&track.name) && index.tracks.destination.is_none() {
                index.tracks.destination = Some(track.id);
            }
        }

        tracing::info!(
            "Indexed timeline '{}': {} start markers, {} stop signals, source track {}, destination track {}",
            timeline.name,
            index.markers.len(),
            index.stop_signals.len(),
            if index.tracks.source.is_some() { "found" } else { "missing" },
            if index.tracks.destination.is_some() { "found" } else { "missing" },
        );

        Ok(index)
    }
}
