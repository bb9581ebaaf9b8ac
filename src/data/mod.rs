//! Telemetry processing: from raw snapshots to animated, colored metrics.
//!
//! ## Submodules
//!
//! - [`easing`]: Cubic ease-in-out curve used by every transition
//! - [`color`]: Threshold bands and the green → yellow → red color ramp
//! - [`tracker`]: [`AnimatedValue`], the per-metric transition state machine
//! - [`metric`]: The six static [`MetricDescriptor`]s
//! - [`panel`]: [`TelemetryPanel`], which composes the above into frames
//!
//! ## Data Flow
//!
//! ```text
//! Snapshot (raw JSON)
//!        │
//!        ▼
//! TelemetryPanel::apply()  ── set_target() on all six trackers
//!        │
//!        ▼
//! TelemetryPanel::advance(now) ── eased values, once per frame
//!        │
//!        ▼
//! TelemetryPanel::frame() ── text + color_for() per metric
//! ```

pub mod color;
pub mod easing;
pub mod metric;
pub mod panel;
pub mod tracker;

pub use color::{color_for, Band, Hsl, Thresholds};
pub use easing::ease_in_out_cubic;
pub use metric::{MetricDescriptor, MetricId, MetricKind, METRICS};
pub use panel::{RenderedMetric, TelemetryFrame, TelemetryPanel};
pub use tracker::{AnimatedValue, TrackerState, CHANGE_EPSILON};
