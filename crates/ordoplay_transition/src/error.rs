// SPDX-License-Identifier: MIT OR Apache-2.0
//! Initialization errors.

/// The timeline or configuration cannot support transitions
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// No timeline asset was supplied
    #[error("No timeline asset bound to the transition")]
    MissingTimeline,

    /// The timeline has no marker track
    #[error("Timeline '{0}' has no marker track")]
    MissingMarkerTrack(String),

    /// Two start markers share a name and duplicates are rejected
    #[error("Duplicate start marker: {name}")]
    DuplicateStartMarker {
        /// Marker name
        name: String,
    },

    /// Malformed RON configuration
    #[error("Failed to parse transition config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Configuration could not be written as RON
    #[error("Failed to serialize transition config: {0}")]
    Serialize(#[from] ron::Error),
}
