//! Telemetry panel: snapshot in, colored frame out.
//!
//! The panel owns one [`AnimatedValue`] per metric descriptor. Applying a
//! snapshot retargets all of them at once; advancing steps every running
//! transition; [`TelemetryPanel::frame`] renders the current values with
//! their formatting and severity colors.

use std::time::{Duration, Instant};

use serde::Serialize;

use super::color::{color_for, Band, Hsl};
use super::metric::{MetricDescriptor, MetricId, MetricKind, METRICS};
use super::tracker::AnimatedValue;
use crate::source::Snapshot;

/// One metric, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedMetric {
    pub id: MetricId,
    pub label: &'static str,
    /// Current (possibly mid-transition) value.
    pub value: f64,
    /// Formatted value with unit, e.g. `"95%"` or `"2.00"`.
    pub text: String,
    pub color: Hsl,
    pub band: Band,
    pub kind: MetricKind,
    /// The metric's `high` threshold, used to scale gauges.
    pub scale: f64,
}

/// A full panel render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryFrame {
    pub metrics: Vec<RenderedMetric>,
}

impl TelemetryFrame {
    pub fn primary(&self) -> impl Iterator<Item = &RenderedMetric> {
        self.metrics.iter().filter(|m| m.kind == MetricKind::Primary)
    }

    pub fn detail(&self) -> impl Iterator<Item = &RenderedMetric> {
        self.metrics.iter().filter(|m| m.kind == MetricKind::Detail)
    }

    pub fn get(&self, id: MetricId) -> Option<&RenderedMetric> {
        self.metrics.iter().find(|m| m.id == id)
    }
}

/// Animated panel over the six fixed metrics.
#[derive(Debug, Clone)]
pub struct TelemetryPanel {
    trackers: Vec<(MetricDescriptor, AnimatedValue)>,
}

impl TelemetryPanel {
    /// Create a panel with every metric at zero.
    ///
    /// `duration` is the transition length, normally the poll interval so
    /// each transition ends as the next snapshot is due.
    pub fn new(duration: Duration) -> Self {
        let trackers = METRICS
            .iter()
            .map(|descriptor| (*descriptor, AnimatedValue::new(0.0, duration)))
            .collect();
        Self { trackers }
    }

    /// Create an idle panel that shows `snapshot` directly.
    pub fn settled(snapshot: &Snapshot, duration: Duration) -> Self {
        let trackers = METRICS
            .iter()
            .map(|descriptor| {
                let value = sanitize(descriptor.id.read(snapshot));
                (*descriptor, AnimatedValue::new(value, duration))
            })
            .collect();
        Self { trackers }
    }

    /// Retarget every metric from a new snapshot.
    ///
    /// All targets are set before any frame is advanced. Returns the number
    /// of metrics whose transition was (re)started.
    pub fn apply(&mut self, snapshot: &Snapshot, now: Instant) -> usize {
        self.trackers
            .iter_mut()
            .filter_map(|(descriptor, tracker)| {
                let target = sanitize(descriptor.id.read(snapshot));
                tracker.set_target(target, now).then_some(())
            })
            .count()
    }

    /// Advance every running transition to `now`.
    ///
    /// Returns `true` while at least one metric is still animating.
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut animating = false;
        for (_, tracker) in self.trackers.iter_mut() {
            if tracker.is_animating() {
                tracker.advance(now);
                animating |= tracker.is_animating();
            }
        }
        animating
    }

    pub fn is_animating(&self) -> bool {
        self.trackers.iter().any(|(_, t)| t.is_animating())
    }

    /// Stop every transition, leaving each metric on its target.
    pub fn cancel_all(&mut self) {
        for (_, tracker) in self.trackers.iter_mut() {
            tracker.cancel();
        }
    }

    pub fn tracker(&self, id: MetricId) -> Option<&AnimatedValue> {
        self.trackers
            .iter()
            .find(|(descriptor, _)| descriptor.id == id)
            .map(|(_, tracker)| tracker)
    }

    /// Render the current values.
    pub fn frame(&self) -> TelemetryFrame {
        let metrics = self
            .trackers
            .iter()
            .map(|(descriptor, tracker)| render_metric(descriptor, tracker.value()))
            .collect();
        TelemetryFrame { metrics }
    }
}

fn render_metric(descriptor: &MetricDescriptor, value: f64) -> RenderedMetric {
    RenderedMetric {
        id: descriptor.id,
        label: descriptor.label,
        value,
        text: descriptor.format(value),
        color: color_for(value, &descriptor.thresholds),
        band: descriptor.thresholds.band(value),
        kind: descriptor.kind,
        scale: descriptor.thresholds.high,
    }
}

/// Trackers require finite targets.
fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
