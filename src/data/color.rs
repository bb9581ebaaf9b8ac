//! Severity color ramp for telemetry values.
//!
//! Values are mapped onto a green → yellow → red hue ramp using a
//! `(low, mid, high)` threshold triple. Each of the four bands uses its own
//! saturation so the colors match the web console exactly.

use std::fmt;

use ratatui::style::Color;
use serde::Serialize;

/// Hue of the fully healthy color.
const HUE_GREEN: f64 = 120.0;
/// Hue at the `mid` threshold.
const HUE_YELLOW: f64 = 60.0;
/// Hue at and beyond the `high` threshold.
const HUE_RED: f64 = 0.0;

/// All bands share the same lightness.
const LIGHTNESS: u8 = 50;

/// Severity thresholds for a metric.
///
/// The triple must be strictly increasing (`low < mid < high`). This is
/// checked in debug builds only; descriptors are static and always
/// well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    /// Upper bound of the nominal band.
    pub low: f64,
    /// Boundary between the elevated and high bands (pure yellow).
    pub mid: f64,
    /// Upper bound of the high band (pure red).
    pub high: f64,
}

impl Thresholds {
    /// Create a threshold triple.
    pub const fn new(low: f64, mid: f64, high: f64) -> Self {
        Self { low, mid, high }
    }

    /// Classify a value into its severity band.
    pub fn band(&self, value: f64) -> Band {
        debug_assert!(
            self.low <= self.mid && self.mid <= self.high,
            "thresholds must be increasing: {:?}",
            self
        );

        if value <= self.low {
            Band::Nominal
        } else if value <= self.mid {
            Band::Elevated
        } else if value <= self.high {
            Band::High
        } else {
            Band::Critical
        }
    }
}

/// One of the four severity ranges used for color interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    /// `value <= low`
    Nominal,
    /// `low < value <= mid`
    Elevated,
    /// `mid < value <= high`
    High,
    /// `value > high`
    Critical,
}

impl Band {
    /// Saturation (percent) used for colors in this band.
    pub fn saturation(&self) -> u8 {
        match self {
            Band::Nominal => 70,
            Band::Elevated => 80,
            Band::High => 85,
            Band::Critical => 90,
        }
    }
}

/// A color in HSL space.
///
/// Hue is kept unrounded; saturation and lightness are whole percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsl {
    /// Hue in degrees, `[0, 360)`.
    pub hue: f64,
    /// Saturation, percent.
    pub saturation: u8,
    /// Lightness, percent.
    pub lightness: u8,
}

impl Hsl {
    pub const fn new(hue: f64, saturation: u8, lightness: u8) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Convert to 8-bit RGB components.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = f64::from(self.saturation) / 100.0;
        let l = f64::from(self.lightness) / 100.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Hsl {
    /// Formats as a CSS color, e.g. `hsl(120, 70%, 50%)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

impl From<Hsl> for Color {
    fn from(hsl: Hsl) -> Self {
        let (r, g, b) = hsl.to_rgb();
        Color::Rgb(r, g, b)
    }
}

/// Map a value onto the severity color ramp.
///
/// A degenerate band (`mid == low` or `high == mid`) is empty, so values
/// fall through to the next band and the interpolation never divides by
/// zero.
pub fn color_for(value: f64, thresholds: &Thresholds) -> Hsl {
    let band = thresholds.band(value);
    let hue = match band {
        Band::Nominal => HUE_GREEN,
        Band::Elevated => {
            let ratio = (value - thresholds.low) / (thresholds.mid - thresholds.low);
            HUE_GREEN - ratio * (HUE_GREEN - HUE_YELLOW)
        }
        Band::High => {
            let ratio = (value - thresholds.mid) / (thresholds.high - thresholds.mid);
            HUE_YELLOW - ratio * (HUE_YELLOW - HUE_RED)
        }
        Band::Critical => HUE_RED,
    };

    Hsl::new(hue, band.saturation(), LIGHTNESS)
}
