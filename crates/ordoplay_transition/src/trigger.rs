// SPDX-License-Identifier: MIT OR Apache-2.0
//! Button-style caller that starts a transition from its owner's animator.

use crate::coordinator::{TransitionCoordinator, TransitionOptions, TransitionOutcome};
use ordoplay_timeline::{ObjectId, PlaybackEngine, SceneObjects};
use std::collections::HashSet;

/// Transition name used when none is configured
pub const DEFAULT_TRANSITION_NAME: &str = "StartTransition";

/// Starts a transition from the nearest animated ancestor of its owner to a
/// fixed destination
#[derive(Debug, Clone)]
pub struct TransitionTrigger {
    /// Object to transition to
    pub destination: Option<ObjectId>,
    /// Start marker to play from
    pub transition_name: String,
    source: Option<ObjectId>,
}

impl TransitionTrigger {
    /// Create a trigger for a destination
    pub fn new(destination: Option<ObjectId>) -> Self {
        Self {
            destination,
            transition_name: DEFAULT_TRANSITION_NAME.to_string(),
            source: None,
        }
    }

    /// Set the start marker name
    pub fn with_transition_name(mut self, name: impl Into<String>) -> Self {
        self.transition_name = name.into();
        self
    }

    /// Resolve the source as the closest animated ancestor of `owner`.
    /// The owner itself is not considered.
    pub fn attach(&mut self, owner: ObjectId, scene: &impl SceneObjects) -> Option<ObjectId> {
        let mut visited = HashSet::from([owner]);
        let mut current = scene.parent(owner);

        self.source = None;
        while let Some(id) = current {
            if !visited.insert(id) {
                tracing::warn!("Cycle in scene hierarchy above {owner:?}");
                break;
            }
            if scene.is_animated(id) {
                self.source = Some(id);
                break;
            }
            current = scene.parent(id);
        }
        self.source
    }

    /// Resolved source object
    pub fn source(&self) -> Option<ObjectId> {
        self.source
    }

    /// Start the transition. Returns `None` without a coordinator, without
    /// both objects, or when source and destination are the same object.
    pub fn activate<E, S>(&self, coordinator: Option<&TransitionCoordinator<E, S>>) -> Option<TransitionOutcome>
    where
        E: PlaybackEngine + Send + 'static,
        S: SceneObjects + Send + 'static,
    {
        let coordinator = coordinator?;
        let (source, destination) = (self.source?, self.destination?);
        if source == destination {
            return None;
        }

        Some(coordinator.start_transition(
            Some(source),
            Some(destination),
            &self.transition_name,
            TransitionOptions::default(),
        ))
    }
}
