// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reference playback director for timeline assets.

use crate::binding::{BindingTable, ObjectId};
use crate::engine::{PlayState, PlaybackEngine, Shared};
use crate::signal::SignalReceiver;
use crate::timeline::TimelineAsset;
use crate::track::TrackId;

/// Plays a timeline asset and collects the signals it passes
#[derive(Debug)]
pub struct TimelinePlayer {
    timeline: TimelineAsset,
    /// Current playback time
    time: f64,
    /// Playback state
    state: PlayState,
    /// Playback speed multiplier
    pub speed: f64,
    /// Wrap to the start instead of stopping at the end
    pub looping: bool,
    bindings: BindingTable,
    /// Signals fired since the last `take_signals`
    pending_signals: Vec<String>,
    /// Next update also fires markers sitting exactly on the cursor
    cursor_moved: bool,
}

impl TimelinePlayer {
    /// Create a stopped player at time zero
    pub fn new(timeline: TimelineAsset) -> Self {
        Self {
            timeline,
            time: 0.0,
            state: PlayState::Stopped,
            speed: 1.0,
            looping: false,
            bindings: BindingTable::new(),
            pending_signals: Vec::new(),
            cursor_moved: true,
        }
    }

    /// The timeline being played
    pub fn timeline(&self) -> &TimelineAsset {
        &self.timeline
    }

    /// Current playback time
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Current playback state
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Current bindings
    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Object bound to a track
    pub fn binding(&self, track: TrackId) -> Option<ObjectId> {
        self.bindings.get(track)
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.state == PlayState::Playing {
            self.state = PlayState::Paused;
        }
    }

    /// Advance playback with delta time
    pub fn update(&mut self, delta_time: f64) {
        if self.state != PlayState::Playing {
            return;
        }

        let start = self.time;
        let inclusive = std::mem::take(&mut self.cursor_moved);
        let end_time = self.timeline.duration;
        self.time += delta_time * self.speed;

        if self.time < end_time {
            self.collect_signals(start, self.time, inclusive);
            return;
        }

        self.collect_signals(start, end_time, inclusive);
        if self.looping && end_time > 0.0 {
            let mut remaining = self.time - end_time;
            while remaining >= end_time {
                self.collect_signals(0.0, end_time, true);
                remaining -= end_time;
            }
            self.time = remaining;
            self.collect_signals(0.0, self.time, true);
        } else {
            self.time = end_time;
            self.state = PlayState::Stopped;
            tracing::debug!("Timeline '{}' reached its end", self.timeline.name);
        }
    }

    fn collect_signals(&mut self, start: f64, end: f64, inclusive: bool) {
        let Some(track) = self.timeline.marker_track() else {
            return;
        };
        for marker in track.markers_in_range(start, end, inclusive) {
            if let Some(signal) = marker.signal_name() {
                self.pending_signals.push(signal.to_string());
            }
        }
    }

    /// Get fired signals and clear them
    pub fn take_signals(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_signals)
    }
}

impl PlaybackEngine for TimelinePlayer {
    fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    fn set_binding(&mut self, track: TrackId, object: ObjectId) {
        self.bindings.set(track, object);
    }

    fn set_time(&mut self, time: f64) {
        self.time = time.max(0.0);
        self.cursor_moved = true;
    }

    fn play(&mut self) {
        if self.state != PlayState::Playing {
            self.cursor_moved = true;
        }
        self.state = PlayState::Playing;
    }

    fn stop(&mut self) {
        self.state = PlayState::Stopped;
        self.time = 0.0;
        self.cursor_moved = true;
    }
}

/// Advance a shared player and deliver the signals it fired.
///
/// The player lock is released before any reaction runs, so reactions may
/// command the player. Returns the number of signals delivered.
pub fn advance(player: &Shared<TimelinePlayer>, receiver: &mut SignalReceiver, delta_time: f64) -> usize {
    let signals = {
        let mut player = player.lock();
        player.update(delta_time);
        player.take_signals()
    };

    signals.iter().filter(|s| receiver.receive(s)).count()
}
