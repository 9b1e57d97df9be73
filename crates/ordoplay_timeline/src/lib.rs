// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline model for `OrdoPlay` transitions.
//!
//! This crate provides the playback-side pieces a transition drives:
//! - Timeline assets with a marker track and root tracks
//! - Signal markers and a signal receiver (dispatch table)
//! - Object handles and track bindings
//! - Scene objects with active flags and a parent hierarchy
//! - A reference playback director
//!
//! ## Architecture
//!
//! Consumers talk to playback only through [`PlaybackEngine`] and to live
//! objects only through [`SceneObjects`]. [`TimelinePlayer`] and [`Scene`]
//! are in-memory implementations of both.

pub mod binding;
pub mod engine;
pub mod marker;
pub mod player;
pub mod scene;
pub mod signal;
pub mod timeline;
pub mod track;

pub use binding::{BindingTable, ObjectId};
pub use engine::{shared, PlayState, PlaybackEngine, Shared};
pub use marker::{Marker, MarkerId, MarkerPayload, MarkerTrack};
pub use player::{advance, TimelinePlayer};
pub use scene::{Scene, SceneObject, SceneObjects};
pub use signal::{Reaction, SignalError, SignalReceiver};
pub use timeline::{TimelineAsset, TimelineError, TimelineId};
pub use track::{TrackAsset, TrackId, TrackKind};
