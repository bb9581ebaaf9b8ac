//! Channel-based data source.
//!
//! Receives snapshots via a tokio watch channel. This is useful when
//! snapshots are pushed by the embedding application rather than polled
//! from the backend.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use super::{DataSource, Snapshot};

/// A data source that receives snapshots via a channel.
///
/// Only the latest snapshot is kept: if several are sent between two
/// polls, the source yields the most recent one.
///
/// # Example
///
/// ```
/// use andy_console::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("embedded");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Snapshot>,
    description: String,
    last_error: Arc<Mutex<Option<String>>>,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where snapshots come from
    pub fn new(receiver: watch::Receiver<Snapshot>, source_description: &str) -> Self {
        Self::with_error_slot(receiver, source_description, Arc::default())
    }

    /// Create a channel source whose error is reported through a shared
    /// slot written by the producer.
    pub fn with_error_slot(
        receiver: watch::Receiver<Snapshot>,
        source_description: &str,
        last_error: Arc<Mutex<Option<String>>>,
    ) -> Self {
        Self {
            receiver,
            description: source_description.to_string(),
            last_error,
        }
    }

    /// Create a channel pair for sending snapshots to a ChannelSource.
    ///
    /// The initial (all-zero) value is not reported as new data.
    pub fn create(source_description: &str) -> (watch::Sender<Snapshot>, Self) {
        let (tx, rx) = watch::channel(Snapshot::default());
        let source = Self::new(rx, &format!("channel: {}", source_description));
        (tx, source)
    }

    /// Record an error to be shown until the next successful snapshot.
    pub fn set_error(&self, error: Option<String>) {
        *self.last_error.lock() = error;
    }

    /// Shared slot the producer writes errors into.
    pub fn error_handle(&self) -> Arc<Mutex<Option<String>>> {
        Arc::clone(&self.last_error)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<Snapshot> {
        // Once the sender is gone `has_changed` errors, but a value published
        // just before that is still unseen and must be handed out once.
        let changed = match self.receiver.has_changed() {
            Ok(changed) => changed,
            Err(_) => self.receiver.borrow().has_changed(),
        };
        if changed {
            Some(self.receiver.borrow_and_update().clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }
}
