//! # andy-console
//!
//! An operator console for the ANDY-OS backend: polls the backend's status
//! endpoint on a fixed interval and renders CPU, memory, load, and
//! temperature as animated, severity-colored readouts in a terminal UI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │(animation)    │(rendering)   │         │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘  │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── StatusPoller(HttpFetcher | FileFetcher)     │
//! │  │ (input) │    | ChannelSource                             │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, frame bookkeeping, and export
//! - **[`source`]**: Snapshot model, fetchers, and the background poller behind
//!   the [`DataSource`] trait
//! - **[`data`]**: Eased value trackers, threshold color ramp, and metric
//!   formatting
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]** / **[`logging`]**: Layered settings and tracing setup
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll the backend every 2s
//! andy-console --endpoint http://localhost:8000
//!
//! # Replay a saved status document
//! andy-console --file status.json
//!
//! # Fetch once and write the settled frame as JSON
//! andy-console --export frame.json
//! ```
//!
//! ### As a library with the HTTP poller
//!
//! ```no_run
//! use std::time::Duration;
//! use andy_console::{App, HttpFetcher, StatusPoller};
//!
//! # tokio_test::block_on(async {
//! let fetcher = HttpFetcher::new("http://localhost:8000", None).unwrap();
//! let source = StatusPoller::new(fetcher)
//!     .interval(Duration::from_secs(2))
//!     .spawn();
//! let app = App::new(Box::new(source), Duration::from_secs(2));
//! # });
//! ```
//!
//! ### As a library with channel source
//!
//! ```
//! use std::time::{Duration, Instant};
//! use andy_console::{ChannelSource, MetricId, Snapshot, TelemetryPanel};
//! use andy_console::DataSource;
//!
//! let (tx, mut source) = ChannelSource::create("embedded");
//! tx.send_replace(Snapshot { cpu: 95.0, ..Default::default() });
//!
//! let mut panel = TelemetryPanel::new(Duration::from_secs(2));
//! let t0 = Instant::now();
//! if let Some(snapshot) = source.poll() {
//!     panel.apply(&snapshot, t0);
//! }
//! panel.advance(t0 + Duration::from_secs(2));
//!
//! let frame = panel.frame();
//! assert_eq!(frame.get(MetricId::Cpu).unwrap().text, "95%");
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod logging;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::ConsoleConfig;
pub use data::{
    color_for, ease_in_out_cubic, AnimatedValue, Band, Hsl, MetricDescriptor, MetricId,
    MetricKind, RenderedMetric, TelemetryFrame, TelemetryPanel, Thresholds, TrackerState,
    METRICS,
};
pub use source::{
    ChannelSource, DataSource, FileFetcher, HttpFetcher, LoadAverage, PollError, PolledSource,
    PollerHandle, PowerMode, Snapshot, StatusFetcher, StatusPoller, SystemStatus,
};
