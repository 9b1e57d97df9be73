// SPDX-License-Identifier: MIT OR Apache-2.0
//! Transition coordinator.
//!
//! This module handles:
//! - Rebinding the source and destination tracks
//! - Seeking to a start marker and starting playback
//! - Reacting to stop signals (deactivating the source, stopping playback)
//!
//! Requests made while the engine is playing are dropped, never queued.

use crate::config::TransitionConfig;
use crate::error::ConfigurationError;
use crate::index::{MarkerIndexBuilder, TimelineIndex, TrackBindings};
use ordoplay_timeline::{shared, ObjectId, PlaybackEngine, SceneObjects, Shared, SignalReceiver, TimelineAsset};

/// Flags for a single transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransitionOptions {
    /// Deactivate the source object when the stop signal fires
    pub disable_source_after_transition: bool,
    /// Activate the destination object before binding it
    pub enable_destination_before_transition: bool,
}

/// Result of a transition request.
///
/// Only `Started` starts playback; the others are silent no-ops.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    /// Playback started at the marker
    Started {
        /// Start marker name
        marker: String,
        /// Time playback was moved to
        time: f64,
    },
    /// No playback engine is attached
    EngineMissing,
    /// A transition is already playing
    AlreadyPlaying,
    /// No start marker has the requested name. Bindings were still applied.
    UnknownMarker,
}

impl TransitionOutcome {
    /// Whether playback was started
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

/// Coordinator state as seen from outside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    /// Nothing is playing
    Idle,
    /// A transition is playing until its stop signal
    Playing,
}

/// Work done when a stop signal is received
struct StopReaction<E, S> {
    pending_disable: Shared<Option<ObjectId>>,
    engine: Option<Shared<E>>,
    scene: Shared<S>,
}

impl<E: PlaybackEngine, S: SceneObjects> StopReaction<E, S> {
    fn fire(&self) {
        let target = self.pending_disable.lock().take();
        if let Some(target) = target {
            if self.scene.lock().set_active(target, false) {
                tracing::debug!("Deactivated transition source {target:?}");
            } else {
                tracing::debug!("Transition source {target:?} no longer exists");
            }
        }

        if let Some(engine) = &self.engine {
            engine.lock().stop();
        }
        tracing::info!("Transition stopped");
    }
}

/// Drives transitions on a playback engine
pub struct TransitionCoordinator<E, S> {
    index: TimelineIndex,
    engine: Option<Shared<E>>,
    scene: Shared<S>,
    /// Object to deactivate on the next stop signal
    pending_disable: Shared<Option<ObjectId>>,
}

impl<E, S> TransitionCoordinator<E, S>
where
    E: PlaybackEngine + Send + 'static,
    S: SceneObjects + Send + 'static,
{
    /// Create a coordinator from a prebuilt index
    pub fn new(index: TimelineIndex, engine: Option<Shared<E>>, scene: Shared<S>) -> Self {
        Self {
            index,
            engine,
            scene,
            pending_disable: shared(None),
        }
    }

    /// Index the timeline, create the coordinator and register its stop
    /// reactions with the receiver.
    ///
    /// Without an engine the timeline is still validated, but no reaction is
    /// registered.
    pub fn initialize(
        config: TransitionConfig,
        timeline: Option<&TimelineAsset>,
        engine: Option<Shared<E>>,
        scene: Shared<S>,
        receiver: &mut SignalReceiver,
    ) -> Result<Self, ConfigurationError> {
        let index = MarkerIndexBuilder::new(config).build(timeline)?;
        let coordinator = Self::new(index, engine, scene);
        if coordinator.engine.is_none() {
            tracing::warn!("No playback engine; stop reactions not registered");
            return Ok(coordinator);
        }
        coordinator.register_stop_reactions(receiver);
        Ok(coordinator)
    }

    /// Register the stop reaction for every stop signal the receiver does
    /// not already react to. Returns the number registered.
    pub fn register_stop_reactions(&self, receiver: &mut SignalReceiver) -> usize {
        let mut registered = 0;
        for signal in self.index.stop_signals.iter() {
            if receiver.is_registered(signal) {
                tracing::debug!("Signal '{signal}' already has a reaction");
                continue;
            }

            let reaction = self.stop_reaction();
            match receiver.add_reaction(signal, Box::new(move || reaction.fire())) {
                Ok(()) => registered += 1,
                Err(e) => tracing::warn!("Failed to register stop reaction: {e}"),
            }
        }
        registered
    }

    fn stop_reaction(&self) -> StopReaction<E, S> {
        StopReaction {
            pending_disable: self.pending_disable.clone(),
            engine: self.engine.clone(),
            scene: self.scene.clone(),
        }
    }

    /// Bind `source` and `destination` to the transition tracks and play
    /// from the start marker named `transition_name`.
    ///
    /// Bindings are applied before the seek, and are kept even when the
    /// marker is unknown.
    pub fn start_transition(
        &self,
        source: Option<ObjectId>,
        destination: Option<ObjectId>,
        transition_name: &str,
        options: TransitionOptions,
    ) -> TransitionOutcome {
        let Some(engine) = &self.engine else {
            tracing::debug!("Transition '{transition_name}' ignored: no playback engine");
            return TransitionOutcome::EngineMissing;
        };
        let mut engine = engine.lock();
        if engine.is_playing() {
            tracing::debug!("Transition '{transition_name}' ignored: already playing");
            return TransitionOutcome::AlreadyPlaying;
        }

        if let (Some(track), Some(source)) = (self.index.tracks.source, source) {
            *self.pending_disable.lock() = options.disable_source_after_transition.then_some(source);
            engine.set_binding(track, source);
        }

        if let (Some(track), Some(destination)) = (self.index.tracks.destination, destination) {
            if options.enable_destination_before_transition {
                self.scene.lock().set_active(destination, true);
            }
            engine.set_binding(track, destination);
        }

        let Some(time) = self.index.markers.get(transition_name) else {
            tracing::warn!("Unknown transition marker '{transition_name}'");
            return TransitionOutcome::UnknownMarker;
        };

        engine.set_time(time);
        engine.play();
        tracing::info!("Started transition '{transition_name}' at {time}s");

        TransitionOutcome::Started {
            marker: transition_name.to_string(),
            time,
        }
    }

    /// Run the stop reaction directly
    pub fn on_stop_signal(&self) {
        self.stop_reaction().fire();
    }

    /// Current state
    pub fn state(&self) -> TransitionState {
        match &self.engine {
            Some(engine) if engine.lock().is_playing() => TransitionState::Playing,
            _ => TransitionState::Idle,
        }
    }

    /// Start marker names, or `None` if the timeline has none
    pub fn start_markers(&self) -> Option<Vec<&str>> {
        if self.index.markers.is_empty() {
            return None;
        }
        Some(self.index.markers.names().collect())
    }

    /// Time of a start marker
    pub fn marker_time(&self, name: &str) -> Option<f64> {
        self.index.markers.get(name)
    }

    /// Object that the next stop signal will deactivate
    pub fn pending_disable(&self) -> Option<ObjectId> {
        *self.pending_disable.lock()
    }

    /// Resolved source and destination tracks
    pub fn bindings(&self) -> TrackBindings {
        self.index.tracks
    }

    /// The index built at initialization
    pub fn index(&self) -> &TimelineIndex {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordoplay_timeline::{advance, PlayState, Scene, SceneObject, TimelinePlayer, TrackAsset, TrackId, TrackKind};

    struct Fixture {
        player: Shared<TimelinePlayer>,
        scene: Shared<Scene>,
        receiver: SignalReceiver,
        coordinator: TransitionCoordinator<TimelinePlayer, Scene>,
        source_track: TrackId,
        destination_track: TrackId,
        src: ObjectId,
        dst: ObjectId,
    }

    fn fixture() -> Fixture {
        let mut timeline = TimelineAsset::new("Menu");
        timeline.duration = 8.0;
        timeline.add_signal(1.5, "StartA");
        timeline.add_signal(3.0, "EndA");
        timeline.add_signal(4.0, "StartB");
        timeline.add_signal(6.0, "EndB");
        let source_track = timeline.add_track(TrackAsset::animation("TransitionA"));
        let destination_track = timeline.add_track(TrackAsset::animation("TransitionB"));
        timeline.add_track(TrackAsset::new("TransitionA Music", TrackKind::Audio));

        let mut scene = Scene::new();
        let src = scene.spawn_animated("MainMenu");
        let dst = scene.spawn(SceneObject::new("Settings").with_animator().with_active(false));
        let scene = shared(scene);

        let player = shared(TimelinePlayer::new(timeline.clone()));
        let mut receiver = SignalReceiver::new();
        let coordinator = TransitionCoordinator::initialize(
            TransitionConfig::default(),
            Some(&timeline),
            Some(player.clone()),
            scene.clone(),
            &mut receiver,
        )
        .unwrap();

        Fixture {
            player,
            scene,
            receiver,
            coordinator,
            source_track,
            destination_track,
            src,
            dst,
        }
    }

    #[test]
    fn test_start_seeks_and_plays() {
        let f = fixture();
        let outcome = f.coordinator.start_transition(Some(f.src), Some(f.dst), "StartB", TransitionOptions::default());

        assert_eq!(
            outcome,
            TransitionOutcome::Started {
                marker: "StartB".to_string(),
                time: 4.0
            }
        );
        let player = f.player.lock();
        assert_eq!(player.time(), 4.0);
        assert_eq!(player.state(), PlayState::Playing);
        assert_eq!(player.binding(f.source_track), Some(f.src));
        assert_eq!(player.binding(f.destination_track), Some(f.dst));
        drop(player);
        assert_eq!(f.coordinator.state(), TransitionState::Playing);
        assert_eq!(f.scene.lock().is_active(f.dst), Some(false));
    }

    #[test]
    fn test_enable_destination_needs_object_and_track() {
        let f = fixture();
        let options = TransitionOptions {
            enable_destination_before_transition: true,
            ..TransitionOptions::default()
        };
        f.coordinator.start_transition(Some(f.src), None, "StartZ", options);
        assert_eq!(f.scene.lock().is_active(f.dst), Some(false));

        let mut timeline = TimelineAsset::new("SourceOnly");
        timeline.add_signal(1.0, "StartA");
        timeline.add_track(TrackAsset::animation("TransitionA"));
        let mut receiver = SignalReceiver::new();
        let coordinator = TransitionCoordinator::initialize(
            TransitionConfig::default(),
            Some(&timeline),
            Some(shared(TimelinePlayer::new(timeline.clone()))),
            f.scene.clone(),
            &mut receiver,
        )
        .unwrap();

        assert!(coordinator.start_transition(Some(f.src), Some(f.dst), "StartA", options).is_started());
        assert_eq!(f.scene.lock().is_active(f.dst), Some(false));
    }

    #[test]
    fn test_stop_signal_disables_source() {
        let mut f = fixture();
        let options = TransitionOptions {
            disable_source_after_transition: true,
            ..TransitionOptions::default()
        };
        f.coordinator.start_transition(Some(f.src), Some(f.dst), "StartB", options);
        assert_eq!(f.coordinator.pending_disable(), Some(f.src));

        assert!(f.receiver.receive("EndB"));

        assert_eq!(f.scene.lock().is_active(f.src), Some(false));
        assert_eq!(f.player.lock().state(), PlayState::Stopped);
        assert_eq!(f.coordinator.pending_disable(), None);
        assert_eq!(f.coordinator.state(), TransitionState::Idle);
    }

    #[test]
    fn test_playback_reaches_stop_marker() {
        let mut f = fixture();
        let options = TransitionOptions {
            disable_source_after_transition: true,
            enable_destination_before_transition: true,
        };
        assert!(f.coordinator.start_transition(Some(f.src), Some(f.dst), "StartA", options).is_started());
        assert_eq!(f.scene.lock().is_active(f.dst), Some(true));

        assert_eq!(advance(&f.player, &mut f.receiver, 1.0), 0);
        assert_eq!(f.coordinator.state(), TransitionState::Playing);

        assert_eq!(advance(&f.player, &mut f.receiver, 1.0), 1);
        assert_eq!(f.coordinator.state(), TransitionState::Idle);
        assert_eq!(f.scene.lock().is_active(f.src), Some(false));
        assert_eq!(f.scene.lock().is_active(f.dst), Some(true));
    }

    #[test]
    fn test_request_while_playing_dropped() {
        let f = fixture();
        f.coordinator.start_transition(Some(f.src), Some(f.dst), "StartA", TransitionOptions::default());

        let other = f.scene.lock().spawn_animated("Other");
        let options = TransitionOptions {
            disable_source_after_transition: true,
            ..TransitionOptions::default()
        };
        let outcome = f.coordinator.start_transition(Some(other), Some(f.src), "StartB", options);

        assert_eq!(outcome, TransitionOutcome::AlreadyPlaying);
        let player = f.player.lock();
        assert_eq!(player.time(), 1.5);
        assert_eq!(player.binding(f.source_track), Some(f.src));
        assert_eq!(player.binding(f.destination_track), Some(f.dst));
        drop(player);
        assert_eq!(f.coordinator.pending_disable(), None);
    }

    #[test]
    fn test_unknown_marker_binds_without_playing() {
        let f = fixture();
        let outcome = f.coordinator.start_transition(Some(f.src), Some(f.dst), "StartZ", TransitionOptions::default());

        assert_eq!(outcome, TransitionOutcome::UnknownMarker);
        let player = f.player.lock();
        assert_eq!(player.time(), 0.0);
        assert_eq!(player.state(), PlayState::Stopped);
        assert_eq!(player.binding(f.source_track), Some(f.src));
        assert_eq!(player.binding(f.destination_track), Some(f.dst));
    }

    #[test]
    fn test_stop_without_pending_target() {
        let f = fixture();
        f.coordinator.start_transition(Some(f.src), None, "StartA", TransitionOptions::default());
        assert_eq!(f.coordinator.pending_disable(), None);

        f.coordinator.on_stop_signal();
        f.coordinator.on_stop_signal();

        assert_eq!(f.scene.lock().is_active(f.src), Some(true));
        assert_eq!(f.player.lock().state(), PlayState::Stopped);
        assert_eq!(f.coordinator.pending_disable(), None);
    }

    #[test]
    fn test_later_transition_clears_pending_target() {
        let f = fixture();
        let options = TransitionOptions {
            disable_source_after_transition: true,
            ..TransitionOptions::default()
        };
        f.coordinator.start_transition(Some(f.src), Some(f.dst), "StartZ", options);
        assert_eq!(f.coordinator.pending_disable(), Some(f.src));

        f.coordinator.start_transition(Some(f.dst), Some(f.src), "StartA", TransitionOptions::default());
        assert_eq!(f.coordinator.pending_disable(), None);
    }

    #[test]
    fn test_missing_source_keeps_pending_target() {
        let f = fixture();
        let options = TransitionOptions {
            disable_source_after_transition: true,
            ..TransitionOptions::default()
        };
        f.coordinator.start_transition(Some(f.src), None, "StartZ", options);
        f.coordinator.start_transition(None, Some(f.dst), "StartZ", TransitionOptions::default());

        assert_eq!(f.coordinator.pending_disable(), Some(f.src));
    }

    #[test]
    fn test_despawned_pending_target_tolerated() {
        let f = fixture();
        let options = TransitionOptions {
            disable_source_after_transition: true,
            ..TransitionOptions::default()
        };
        f.coordinator.start_transition(Some(f.src), Some(f.dst), "StartA", options);
        f.scene.lock().despawn(f.src);

        f.coordinator.on_stop_signal();

        assert_eq!(f.coordinator.pending_disable(), None);
        assert_eq!(f.player.lock().state(), PlayState::Stopped);
    }

    #[test]
    fn test_missing_engine_is_noop() {
        let mut timeline = TimelineAsset::new("Menu");
        timeline.add_signal(1.0, "StartA");
        timeline.add_signal(2.0, "EndA");
        timeline.add_track(TrackAsset::animation("TransitionA"));

        let mut scene = Scene::new();
        let src = scene.spawn_animated("MainMenu");
        let mut receiver = SignalReceiver::new();
        let coordinator = TransitionCoordinator::<TimelinePlayer, Scene>::initialize(
            TransitionConfig::default(),
            Some(&timeline),
            None,
            shared(scene),
            &mut receiver,
        )
        .unwrap();

        let options = TransitionOptions {
            disable_source_after_transition: true,
            ..TransitionOptions::default()
        };
        assert_eq!(
            coordinator.start_transition(Some(src), None, "StartA", options),
            TransitionOutcome::EngineMissing
        );
        assert_eq!(coordinator.pending_disable(), None);
        assert_eq!(coordinator.state(), TransitionState::Idle);
        assert!(receiver.is_empty());
        assert!(!receiver.receive("EndA"));

        coordinator.on_stop_signal();
        assert_eq!(coordinator.pending_disable(), None);
    }

    #[test]
    fn test_reactions_registered_once() {
        let mut f = fixture();
        assert_eq!(f.receiver.registered_signals().collect::<Vec<_>>(), vec!["EndA", "EndB"]);
        assert_eq!(f.coordinator.register_stop_reactions(&mut f.receiver), 0);
        assert_eq!(f.receiver.len(), 2);
    }

    #[test]
    fn test_existing_reaction_not_replaced() {
        let mut timeline = TimelineAsset::new("Menu");
        timeline.add_signal(2.0, "EndA");
        timeline.add_signal(3.0, "EndA");
        timeline.add_signal(4.0, "EndB");

        let mut receiver = SignalReceiver::new();
        receiver.add_reaction("EndB", Box::new(|| {})).unwrap();

        let index = MarkerIndexBuilder::default().build(Some(&timeline)).unwrap();
        let coordinator = TransitionCoordinator::new(
            index,
            Some(shared(TimelinePlayer::new(timeline))),
            shared(Scene::new()),
        );
        assert_eq!(coordinator.register_stop_reactions(&mut receiver), 1);
        assert_eq!(receiver.len(), 2);
    }

    #[test]
    fn test_start_markers() {
        let f = fixture();
        assert_eq!(f.coordinator.start_markers(), Some(vec!["StartA", "StartB"]));
        assert_eq!(f.coordinator.marker_time("StartB"), Some(4.0));
        assert_eq!(f.coordinator.bindings().source, Some(f.source_track));

        let mut timeline = TimelineAsset::new("Empty");
        timeline.marker_track_mut();
        let index = MarkerIndexBuilder::default().build(Some(&timeline)).unwrap();
        let coordinator = TransitionCoordinator::<TimelinePlayer, Scene>::new(index, None, shared(Scene::new()));
        assert_eq!(coordinator.start_markers(), None);
    }

    #[test]
    fn test_missing_timeline_fails() {
        let mut receiver = SignalReceiver::new();
        let result = TransitionCoordinator::<TimelinePlayer, Scene>::initialize(
            TransitionConfig::default(),
            None,
            None,
            shared(Scene::new()),
            &mut receiver,
        );
        assert!(matches!(result, Err(ConfigurationError::MissingTimeline)));
        assert!(receiver.is_empty());
    }
}
