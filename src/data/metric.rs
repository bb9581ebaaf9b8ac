//! Static descriptors for the displayed telemetry metrics.

use serde::Serialize;

use super::color::Thresholds;
use crate::source::Snapshot;

const LOAD_THRESHOLDS: Thresholds = Thresholds::new(4.0, 8.0, 12.0);

/// Identifies a displayed metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    Cpu,
    Memory,
    Load1m,
    Temperature,
    Load5m,
    Load15m,
}

impl MetricId {
    /// Read this metric's raw value out of a snapshot.
    pub fn read(&self, snapshot: &Snapshot) -> f64 {
        match self {
            MetricId::Cpu => snapshot.cpu,
            MetricId::Memory => snapshot.memory,
            MetricId::Load1m => snapshot.load_avg.one,
            MetricId::Temperature => snapshot.temperature,
            MetricId::Load5m => snapshot.load_avg.five,
            MetricId::Load15m => snapshot.load_avg.fifteen,
        }
    }
}

/// Where a metric is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Main metric card.
    Primary,
    /// Secondary readout under the load card.
    Detail,
}

/// Static display configuration for one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricDescriptor {
    pub id: MetricId,
    pub label: &'static str,
    pub unit: &'static str,
    pub thresholds: Thresholds,
    pub decimals: usize,
    pub kind: MetricKind,
}

impl MetricDescriptor {
    /// Format a value with this metric's precision and unit.
    pub fn format(&self, value: f64) -> String {
        format!("{:.*}{}", self.decimals, value, self.unit)
    }
}

/// The six metrics shown by the telemetry panel, in display order.
pub const METRICS: [MetricDescriptor; 6] = [
    MetricDescriptor {
        id: MetricId::Cpu,
        label: "CPU",
        unit: "%",
        thresholds: Thresholds::new(50.0, 80.0, 95.0),
        decimals: 0,
        kind: MetricKind::Primary,
    },
    MetricDescriptor {
        id: MetricId::Memory,
        label: "MEM",
        unit: "%",
        thresholds: Thresholds::new(60.0, 85.0, 95.0),
        decimals: 0,
        kind: MetricKind::Primary,
    },
    MetricDescriptor {
        id: MetricId::Load1m,
        label: "LOAD",
        unit: "",
        thresholds: LOAD_THRESHOLDS,
        decimals: 2,
        kind: MetricKind::Primary,
    },
    MetricDescriptor {
        id: MetricId::Temperature,
        label: "TEMP",
        unit: "°C",
        thresholds: Thresholds::new(60.0, 80.0, 90.0),
        decimals: 0,
        kind: MetricKind::Primary,
    },
    MetricDescriptor {
        id: MetricId::Load5m,
        label: "5m",
        unit: "",
        thresholds: LOAD_THRESHOLDS,
        decimals: 2,
        kind: MetricKind::Detail,
    },
    MetricDescriptor {
        id: MetricId::Load15m,
        label: "15m",
        unit: "",
        thresholds: LOAD_THRESHOLDS,
        decimals: 2,
        kind: MetricKind::Detail,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LoadAverage;

    #[test]
    fn test_format() {
        assert_eq!(METRICS[0].format(95.4), "95%");
        assert_eq!(METRICS[2].format(2.0), "2.00");
        assert_eq!(METRICS[3].format(55.2), "55°C");
        assert_eq!(METRICS[4].format(0.456), "0.46");
    }

    #[test]
    fn test_read_from_snapshot() {
        let snapshot = Snapshot {
            cpu: 1.0,
            memory: 2.0,
            load_avg: LoadAverage {
                one: 3.0,
                five: 4.0,
                fifteen: 5.0,
            },
            temperature: 6.0,
            ..Default::default()
        };
        let values: Vec<f64> = METRICS.iter().map(|m| m.id.read(&snapshot)).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 6.0, 4.0, 5.0]);
    }

    #[test]
    fn test_load_metrics_share_thresholds() {
        let load: Vec<_> = METRICS
            .iter()
            .filter(|m| matches!(m.id, MetricId::Load1m | MetricId::Load5m | MetricId::Load15m))
            .collect();
        assert_eq!(load.len(), 3);
        assert!(load.iter().all(|m| m.thresholds == LOAD_THRESHOLDS));
    }
}
