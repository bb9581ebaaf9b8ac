//! Console chrome colors.
//!
//! Only the frame around the readouts is themed: borders, titles, the
//! backend status indicator, and gauge tracks. Metric values always use the
//! severity ramp from [`crate::data::color`] so they read the same on any
//! background.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::source::SystemStatus;

/// Background luma above which the light palette is used.
const LIGHT_BACKGROUND_LUMA: f32 = 0.5;

/// Styles for everything on screen except metric values.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Help overlay border and transient status-bar messages.
    pub highlight: Color,
    /// Backend reports `warning`; also used for the last-poll-failed line.
    pub warning: Color,
    /// Backend reports `critical`.
    pub critical: Color,
    /// Backend reports `healthy`.
    pub healthy: Color,
    pub border: Color,
    /// Metric card titles and the LOAD detail prefix.
    pub label: Style,
    /// Panel titles.
    pub header: Style,
    /// Unfilled part of a metric gauge.
    pub gauge_track: Color,
    pub border_type: BorderType,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            label: Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            gauge_track: Color::DarkGray,
            border_type: BorderType::Rounded,
        }
    }

    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            border: Color::DarkGray,
            label: Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            gauge_track: Color::Gray,
            ..Self::dark()
        }
    }

    /// Pick a palette for a measured background luma (0.0 black, 1.0 white).
    ///
    /// An unknown background gets the dark palette.
    pub fn for_luma(luma: Option<f32>) -> Self {
        match luma {
            Some(luma) if luma > LIGHT_BACKGROUND_LUMA => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Query the terminal background and pick a palette.
    pub fn auto_detect() -> Self {
        Self::for_luma(terminal_light::luma().ok())
    }

    /// Style of the header dot and status label.
    ///
    /// A status string the console does not recognize is dimmed rather
    /// than colored.
    pub fn status_style(&self, status: SystemStatus) -> Style {
        let base = Style::default();
        match status {
            SystemStatus::Healthy => base.fg(self.healthy),
            SystemStatus::Warning => base.fg(self.warning),
            SystemStatus::Critical => base.fg(self.critical).add_modifier(Modifier::BOLD),
            SystemStatus::Unknown => base.add_modifier(Modifier::DIM),
        }
    }
}
