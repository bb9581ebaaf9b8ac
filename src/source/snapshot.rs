//! Status snapshot types.
//!
//! These types match the JSON body served by the andy-os backend at
//! `GET /api/status`. Numeric fields that are missing or `null` read as 0,
//! and unrecognized status/mode strings are kept as `Unknown` rather than
//! failing the whole snapshot.

use serde::{Deserialize, Deserializer, Serialize};

/// One poll cycle's full telemetry reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// CPU utilization, percent.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub cpu: f64,

    /// Memory utilization, percent.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub memory: f64,

    /// System load averages.
    #[serde(default, deserialize_with = "default_if_null")]
    pub load_avg: LoadAverage,

    /// CPU temperature, degrees Celsius.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub temperature: f64,

    /// Backend's own health assessment.
    #[serde(default, deserialize_with = "default_if_null")]
    pub status: SystemStatus,

    /// Backend's current operating mode.
    #[serde(default, deserialize_with = "default_if_null")]
    pub mode: PowerMode,
}

/// 1, 5 and 15 minute load averages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadAverage {
    #[serde(rename = "1m", default, deserialize_with = "zero_if_null")]
    pub one: f64,
    #[serde(rename = "5m", default, deserialize_with = "zero_if_null")]
    pub five: f64,
    #[serde(rename = "15m", default, deserialize_with = "zero_if_null")]
    pub fifteen: f64,
}

/// Health status reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    #[default]
    Healthy,
    Warning,
    Critical,
    #[serde(other)]
    Unknown,
}

impl SystemStatus {
    /// Returns a short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            SystemStatus::Healthy => "healthy",
            SystemStatus::Warning => "warning",
            SystemStatus::Critical => "critical",
            SystemStatus::Unknown => "unknown",
        }
    }
}

/// Operating mode reported by the backend.
///
/// The backend drops to power-save when it considers itself critical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerMode {
    #[default]
    Performance,
    #[serde(rename = "Power Save")]
    PowerSave,
    #[serde(other)]
    Unknown,
}

impl PowerMode {
    pub fn label(&self) -> &'static str {
        match self {
            PowerMode::Performance => "Performance",
            PowerMode::PowerSave => "Power Save",
            PowerMode::Unknown => "Unknown",
        }
    }
}

fn zero_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_if_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
