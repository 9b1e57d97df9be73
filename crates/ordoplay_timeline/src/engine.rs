// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback engine abstraction.

use crate::binding::ObjectId;
use crate::track::TrackId;
use parking_lot::Mutex;
use std::sync::Arc;

/// Handle to state owned by the host and shared with transitions
pub type Shared<T> = Arc<Mutex<T>>;

/// Wrap a value in a [`Shared`] handle
pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(Mutex::new(value))
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    /// Stopped
    #[default]
    Stopped,
    /// Playing forward
    Playing,
    /// Paused
    Paused,
}

/// Commands a transition issues to the playback engine
pub trait PlaybackEngine {
    /// Whether playback is in progress
    fn is_playing(&self) -> bool;

    /// Bind a track to an object
    fn set_binding(&mut self, track: TrackId, object: ObjectId);

    /// Move the time cursor
    fn set_time(&mut self, time: f64);

    /// Start playback from the current cursor
    fn play(&mut self);

    /// Stop playback. Stopping a stopped engine does nothing.
    fn stop(&mut self);
}
