//! Application state and the frame/poll bookkeeping around it.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::data::{TelemetryFrame, TelemetryPanel};
use crate::source::{DataSource, PowerMode, SystemStatus};
use crate::ui::Theme;

/// How long a status-bar message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Redraw cadence while any value is easing (~60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Event wait when nothing is moving. Also bounds how late a new snapshot
/// can start its transition.
pub const IDLE_INTERVAL: Duration = Duration::from_millis(50);

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub panel: TelemetryPanel,
    pub status: SystemStatus,
    pub mode: PowerMode,
    pub last_updated: Option<Instant>,
    pub load_error: Option<String>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `source`.
    ///
    /// `transition` is how long each metric takes to ease to a new value;
    /// pass the poll interval so transitions finish as the next snapshot is
    /// due.
    pub fn new(source: Box<dyn DataSource>, transition: Duration) -> Self {
        Self::with_theme(source, transition, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme.
    pub fn with_theme(source: Box<dyn DataSource>, transition: Duration, theme: Theme) -> Self {
        Self {
            running: true,
            show_help: false,
            source,
            panel: TelemetryPanel::new(transition),
            status: SystemStatus::default(),
            mode: PowerMode::default(),
            last_updated: None,
            load_error: None,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source and retarget the panel if a snapshot arrived.
    ///
    /// Returns `true` if new data was applied. A failed fetch leaves the
    /// previous values in place and only updates `load_error`.
    pub fn reload_data(&mut self, now: Instant) -> bool {
        let received = if let Some(snapshot) = self.source.poll() {
            let restarted = self.panel.apply(&snapshot, now);
            debug!(restarted, "applied snapshot");
            self.status = snapshot.status;
            self.mode = snapshot.mode;
            self.last_updated = Some(now);
            true
        } else {
            false
        };

        self.load_error = self.source.error();
        received
    }

    /// Advance animations to `now`. Returns `true` while any are running.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.panel.advance(now)
    }

    pub fn is_animating(&self) -> bool {
        self.panel.is_animating()
    }

    /// How long the UI loop may wait for input before the next frame.
    pub fn frame_timeout(&self) -> Duration {
        if self.is_animating() {
            FRAME_INTERVAL
        } else {
            IDLE_INTERVAL
        }
    }

    /// Current rendered telemetry.
    pub fn frame(&self) -> TelemetryFrame {
        self.panel.frame()
    }

    /// Ask the source for an immediate fetch.
    pub fn refresh(&mut self) {
        self.source.refresh();
        self.set_status_message("Refreshing...".to_string());
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Stop all animations. Called once the UI loop has exited.
    pub fn shutdown(&mut self) {
        self.panel.cancel_all();
        self.running = false;
    }

    /// Export the current frame to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        write_export(
            path,
            self.source_description(),
            self.status,
            self.mode,
            &self.frame(),
        )
    }
}

/// Write a telemetry frame plus backend status as pretty JSON.
pub fn write_export(
    path: &Path,
    source: &str,
    status: SystemStatus,
    mode: PowerMode,
    frame: &TelemetryFrame,
) -> Result<()> {
    let export = serde_json::json!({
        "source": source,
        "status": status,
        "mode": mode,
        "metrics": frame.metrics.iter().map(|m| {
            serde_json::json!({
                "id": m.id,
                "label": m.label,
                "value": m.value,
                "text": m.text,
                "band": m.band,
                "color": m.color.to_string(),
            })
        }).collect::<Vec<_>>(),
    });

    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write export to {}", path.display()))?;

    info!(path = %path.display(), "exported telemetry frame");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MetricId;
    use crate::source::{ChannelSource, LoadAverage, Snapshot};
    use tokio::sync::watch;

    const TRANSITION: Duration = Duration::from_millis(2000);

    fn app() -> (watch::Sender<Snapshot>, App) {
        let (tx, source) = ChannelSource::create("test");
        let app = App::with_theme(Box::new(source), TRANSITION, Theme::dark());
        (tx, app)
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            cpu: 95.0,
            memory: 40.0,
            load_avg: LoadAverage {
                one: 2.0,
                five: 2.0,
                fifteen: 2.0,
            },
            temperature: 55.0,
            status: SystemStatus::Warning,
            mode: PowerMode::Performance,
        }
    }

    #[test]
    fn test_no_data_yet() {
        let (_tx, mut app) = app();
        assert!(!app.reload_data(Instant::now()));
        assert!(app.last_updated.is_none());
        assert_eq!(app.source_description(), "channel: test");
    }

    #[test]
    fn test_snapshot_animates_to_target() {
        let (tx, mut app) = app();
        let t0 = Instant::now();
        tx.send_replace(snapshot());

        assert!(app.reload_data(t0));
        assert_eq!(app.status, SystemStatus::Warning);
        assert!(app.is_animating());

        assert!(app.tick(t0 + Duration::from_millis(500)));
        assert!(!app.tick(t0 + TRANSITION));

        let frame = app.frame();
        assert_eq!(frame.get(MetricId::Cpu).unwrap().text, "95%");
        assert_eq!(frame.get(MetricId::Temperature).unwrap().text, "55°C");
    }

    #[test]
    fn test_failed_poll_keeps_rendered_metrics() {
        let (tx, source) = ChannelSource::create("test");
        let errors = source.error_handle();
        let mut app = App::with_theme(Box::new(source), TRANSITION, Theme::dark());

        let t0 = Instant::now();
        tx.send_replace(snapshot());
        app.reload_data(t0);
        app.tick(t0 + TRANSITION);
        let before = app.frame();

        // Simulated network failure: error recorded, nothing published
        *errors.lock() = Some("request failed: connection refused".to_string());
        let t1 = t0 + Duration::from_millis(4000);
        assert!(!app.reload_data(t1));
        app.tick(t1);

        assert_eq!(app.frame(), before);
        assert_eq!(app.status, SystemStatus::Warning);
        assert!(app.load_error.as_deref().unwrap().contains("connection refused"));
    }

    #[test]
    fn test_frame_timeout() {
        let (tx, mut app) = app();
        assert_eq!(app.frame_timeout(), IDLE_INTERVAL);
        // An idle loop must notice new data well inside one transition
        assert!(IDLE_INTERVAL * 20 <= TRANSITION);

        let t0 = Instant::now();
        tx.send_replace(snapshot());
        app.reload_data(t0);
        assert_eq!(app.frame_timeout(), FRAME_INTERVAL);

        app.tick(t0 + TRANSITION);
        assert_eq!(app.frame_timeout(), IDLE_INTERVAL);
    }

    #[test]
    fn test_shutdown_cancels_animations() {
        let (tx, mut app) = app();
        tx.send_replace(snapshot());
        app.reload_data(Instant::now());
        assert!(app.is_animating());

        app.shutdown();
        assert!(!app.is_animating());
        assert!(!app.running);
    }

    #[test]
    fn test_status_message() {
        let (_tx, mut app) = app();
        assert!(app.get_status_message().is_none());
        app.set_status_message("hello".to_string());
        assert_eq!(app.get_status_message(), Some("hello"));
    }

    #[test]
    fn test_export_state() {
        let (tx, mut app) = app();
        tx.send_replace(snapshot());
        let t0 = Instant::now();
        app.reload_data(t0);
        app.tick(t0 + TRANSITION);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        app.export_state(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["source"], "channel: test");
        assert_eq!(json["status"], "warning");
        assert_eq!(json["metrics"][0]["text"], "95%");
        assert_eq!(json["metrics"][0]["color"], "hsl(0, 85%, 50%)");
        assert_eq!(json["metrics"][1]["color"], "hsl(120, 70%, 50%)");
    }
}
