//! Status sources: where snapshots come from.
//!
//! Two layers live here:
//!
//! - [`StatusFetcher`]: performs a single read of the status source
//!   ([`HttpFetcher`] for the backend API, [`FileFetcher`] for a JSON file).
//! - [`DataSource`]: what the UI polls each frame for the latest snapshot.
//!   [`PolledSource`] drives a fetcher on a fixed interval in the
//!   background; [`ChannelSource`] accepts snapshots pushed by the caller.

mod channel;
mod error;
mod file;
mod http;
mod poller;
mod snapshot;

pub use channel::ChannelSource;
pub use error::PollError;
pub use file::FileFetcher;
pub use http::{HttpFetcher, STATUS_PATH};
pub use poller::{
    PollerHandle, PolledSource, StatusPoller, DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL,
};
pub use snapshot::{LoadAverage, PowerMode, Snapshot, SystemStatus};

use std::fmt::Debug;

use async_trait::async_trait;

/// A single read of a status source.
///
/// Implementations must be cheap to call repeatedly and free of side
/// effects; the poller may run several fetches concurrently.
#[async_trait]
pub trait StatusFetcher: Send + Sync + Debug {
    /// Fetch and parse one snapshot.
    async fn fetch(&self) -> Result<Snapshot, PollError>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}

/// Trait for receiving snapshots from various sources.
///
/// # Example
///
/// ```
/// use andy_console::{ChannelSource, DataSource, Snapshot};
///
/// let (tx, mut source) = ChannelSource::create("test");
/// tx.send_replace(Snapshot { cpu: 12.0, ..Default::default() });
/// if let Some(snapshot) = source.poll() {
///     println!("CPU at {}%", snapshot.cpu);
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if a new snapshot arrived since the last
    /// call, `None` otherwise. This method must not block.
    fn poll(&mut self) -> Option<Snapshot>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI header.
    fn description(&self) -> &str;

    /// The error from the most recent failed fetch, if the latest attempt
    /// failed.
    fn error(&self) -> Option<String>;

    /// Ask for an immediate fetch outside the regular schedule.
    fn refresh(&mut self) {}
}
