// SPDX-License-Identifier: MIT OR Apache-2.0
//! Markers and the marker track.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub Uuid);

impl MarkerId {
    /// Create a new random marker ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MarkerId {
    fn default() -> Self {
        Self::new()
    }
}

/// What a marker does when the cursor reaches it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkerPayload {
    /// Emits the named signal
    Signal {
        /// Signal name, also the marker's display name
        signal: String,
    },
    /// Editor annotation, never emitted
    Annotation {
        /// Annotation label
        label: String,
    },
}

/// A timestamped marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Unique marker ID
    pub id: MarkerId,
    /// Time position in seconds
    pub time: f64,
    /// Marker payload
    pub payload: MarkerPayload,
}

impl Marker {
    /// Create a signal emitter at the given time
    pub fn signal(time: f64, signal: impl Into<String>) -> Self {
        Self {
            id: MarkerId::new(),
            time,
            payload: MarkerPayload::Signal {
                signal: signal.into(),
            },
        }
    }

    /// Create an annotation at the given time
    pub fn annotation(time: f64, label: impl Into<String>) -> Self {
        Self {
            id: MarkerId::new(),
            time,
            payload: MarkerPayload::Annotation {
                label: label.into(),
            },
        }
    }

    /// Signal emitted by this marker, if it is a signal emitter
    pub fn signal_name(&self) -> Option<&str> {
        match &self.payload {
            MarkerPayload::Signal { signal } => Some(signal),
            MarkerPayload::Annotation { .. } => None,
        }
    }
}

/// The timeline's dedicated marker track
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkerTrack {
    markers: Vec<Marker>,
}

impl MarkerTrack {
    /// Create an empty marker track
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marker, keeping the track sorted by time
    pub fn add(&mut self, marker: Marker) -> MarkerId {
        let id = marker.id;
        let idx = self.markers.partition_point(|m| m.time <= marker.time);
        self.markers.insert(idx, marker);
        id
    }

    /// All markers in time order
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Markers with `start < time <= end`, or `start <= time <= end` when
    /// `inclusive_start` is set
    pub fn markers_in_range(&self, start: f64, end: f64, inclusive_start: bool) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |m| {
            let after_start = if inclusive_start { m.time >= start } else { m.time > start };
            after_start && m.time <= end
        })
    }

    /// Number of markers
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether the track has no markers
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
