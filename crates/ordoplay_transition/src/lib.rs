// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline transitions for `OrdoPlay`.
//!
//! A transition hands an animated look over from one object to another by
//! binding both to dedicated timeline tracks, seeking to a named start
//! marker and playing until a stop signal fires.
//!
//! ## Architecture
//!
//! - [`MarkerIndexBuilder`] scans a timeline once and produces a
//!   [`TimelineIndex`]: start marker times, stop signals and the source and
//!   destination tracks.
//! - [`TransitionCoordinator`] owns the index, rebinds tracks and drives the
//!   playback engine. Its stop reaction is registered with a
//!   [`SignalReceiver`](ordoplay_timeline::SignalReceiver).
//! - [`TransitionTrigger`] is a small caller that resolves the source object
//!   from the scene hierarchy.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod index;
pub mod trigger;

pub use config::{DuplicateMarkerPolicy, TransitionConfig};
pub use coordinator::{TransitionCoordinator, TransitionOptions, TransitionOutcome, TransitionState};
pub use error::ConfigurationError;
pub use index::{
    MarkerEntry, MarkerIndex, MarkerIndexBuilder, StopReactionRegistry, TimelineIndex, TrackBinding,
    TrackBindings, TrackRole,
};
pub use trigger::{TransitionTrigger, DEFAULT_TRANSITION_NAME};
