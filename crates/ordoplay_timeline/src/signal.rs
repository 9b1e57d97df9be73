// SPDX-License-Identifier: MIT OR Apache-2.0
//! Signal reception.
//!
//! A [`SignalReceiver`] owns the dispatch table from signal names to
//! reactions. Reactions run synchronously on the thread that calls
//! [`SignalReceiver::receive`].

use indexmap::IndexMap;
use std::fmt;

/// Callback run when a signal is received
pub type Reaction = Box<dyn FnMut() + Send>;

/// Error registering a reaction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
    /// A reaction is already registered for the signal
    #[error("Signal already has a reaction: {0}")]
    AlreadyRegistered(String),
}

/// Dispatch table keyed by signal name
#[derive(Default)]
pub struct SignalReceiver {
    reactions: IndexMap<String, Reaction>,
}

impl SignalReceiver {
    /// Create an empty receiver
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the reaction for a signal
    pub fn add_reaction(&mut self, signal: impl Into<String>, reaction: Reaction) -> Result<(), SignalError> {
        let signal = signal.into();
        if self.reactions.contains_key(&signal) {
            return Err(SignalError::AlreadyRegistered(signal));
        }
        tracing::debug!("Registered reaction for signal '{signal}'");
        self.reactions.insert(signal, reaction);
        Ok(())
    }

    /// Remove the reaction for a signal
    pub fn remove_reaction(&mut self, signal: &str) -> bool {
        self.reactions.shift_remove(signal).is_some()
    }

    /// Whether a reaction is registered for the signal
    pub fn is_registered(&self, signal: &str) -> bool {
        self.reactions.contains_key(signal)
    }

    /// Registered signal names in registration order
    pub fn registered_signals(&self) -> impl Iterator<Item = &str> {
        self.reactions.keys().map(String::as_str)
    }

    /// Number of registered reactions
    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    /// Run the reaction for a signal. Returns false if none is registered.
    pub fn receive(&mut self, signal: &str) -> bool {
        match self.reactions.get_mut(signal) {
            Some(reaction) => {
                tracing::trace!("Dispatching signal '{signal}'");
                reaction();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for SignalReceiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalReceiver")
            .field("signals", &self.reactions.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_receive_runs_reaction() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        let mut receiver = SignalReceiver::new();
        receiver
            .add_reaction("EndA", Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();

        assert!(receiver.receive("EndA"));
        assert!(receiver.receive("EndA"));
        assert!(!receiver.receive("EndB"));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut receiver = SignalReceiver::new();
        receiver.add_reaction("EndA", Box::new(|| {})).unwrap();

        let err = receiver.add_reaction("EndA", Box::new(|| {})).unwrap_err();
        assert_eq!(err, SignalError::AlreadyRegistered("EndA".to_string()));
        assert_eq!(receiver.len(), 1);

        assert!(receiver.remove_reaction("EndA"));
        assert!(!receiver.is_registered("EndA"));
    }
}
