// SPDX-License-Identifier: MIT OR Apache-2.0
//! Transition configuration.
//!
//! All names are matched as substrings of marker and track display names.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// What to do when two start markers share a name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DuplicateMarkerPolicy {
    /// The later marker replaces the earlier one
    #[default]
    LastWins,
    /// Initialization fails
    Reject,
}

/// Names used to find markers and tracks in a timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Substring identifying start markers
    pub start_marker_prefix: String,
    /// Substring identifying stop markers
    pub stop_marker_prefix: String,
    /// Substring identifying the source track
    pub source_track_name: String,
    /// Substring identifying the destination track
    pub destination_track_name: String,
    /// Duplicate start marker handling
    pub duplicate_markers: DuplicateMarkerPolicy,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            start_marker_prefix: "Start".to_string(),
            stop_marker_prefix: "End".to_string(),
            source_track_name: "TransitionA".to_string(),
            destination_track_name: "TransitionB".to_string(),
            duplicate_markers: DuplicateMarkerPolicy::default(),
        }
    }
}

impl TransitionConfig {
    /// Whether a marker name denotes a transition start
    pub fn is_start_marker(&self, name: &str) -> bool {
        name.contains(&self.start_marker_prefix)
    }

    /// Whether a marker name denotes a transition stop
    pub fn is_stop_marker(&self, name: &str) -> bool {
        name.contains(&self.stop_marker_prefix)
    }

    /// Whether a track name denotes the source track
    pub fn is_source_track(&self, name: &str) -> bool {
        name.contains(&self.source_track_name)
    }

    /// Whether a track name denotes the destination track
    pub fn is_destination_track(&self, name: &str) -> bool {
        name.contains(&self.destination_track_name)
    }

    /// Load from RON. Missing fields take their defaults.
    pub fn from_ron(source: &str) -> Result<Self, ConfigurationError> {
        Ok(ron::from_str(source)?)
    }

    /// Save to RON
    pub fn to_ron(&self) -> Result<String, ConfigurationError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TransitionConfig::default();
        assert_eq!(config.start_marker_prefix, "Start");
        assert_eq!(config.stop_marker_prefix, "End");
        assert_eq!(config.source_track_name, "TransitionA");
        assert_eq!(config.destination_track_name, "TransitionB");
        assert_eq!(config.duplicate_markers, DuplicateMarkerPolicy::LastWins);
    }

    #[test]
    fn test_substring_matching() {
        let config = TransitionConfig::default();
        assert!(config.is_start_marker("StartMenu"));
        assert!(config.is_stop_marker("MenuEnd"));
        assert!(config.is_source_track("TransitionA_Extra"));
        assert!(!config.is_destination_track("TransitionA"));
    }

    #[test]
    fn test_partial_ron() {
        let config = TransitionConfig::from_ron("(stop_marker_prefix: \"Stop\", duplicate_markers: Reject)").unwrap();
        assert_eq!(config.stop_marker_prefix, "Stop");
        assert_eq!(config.start_marker_prefix, "Start");
        assert_eq!(config.duplicate_markers, DuplicateMarkerPolicy::Reject);
    }

    #[test]
    fn test_serialization() {
        let config = TransitionConfig {
            source_track_name: "Outgoing".to_string(),
            ..TransitionConfig::default()
        };
        let ron = config.to_ron().unwrap();
        assert_eq!(TransitionConfig::from_ron(&ron).unwrap(), config);
    }

    #[test]
    fn test_ron_errors_share_one_type() {
        fn load_saved(config: &TransitionConfig) -> Result<TransitionConfig, ConfigurationError> {
            TransitionConfig::from_ron(&config.to_ron()?)
        }

        let config = TransitionConfig::default();
        assert_eq!(load_saved(&config).unwrap(), config);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            TransitionConfig::from_ron("(start_marker_prefix: 3)"),
            Err(ConfigurationError::Parse(_))
        ));
    }
}
