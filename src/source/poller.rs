//! Fixed-interval status polling.
//!
//! [`StatusPoller`] spawns a background task that fetches a snapshot
//! immediately and then once per interval. Each fetch runs as its own task
//! and publishes into a watch channel; the UI side reads it through the
//! returned [`PolledSource`].
//!
//! A failed fetch publishes nothing, so the last good snapshot stays on
//! screen. There is no retry beyond the next tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

use super::{ChannelSource, DataSource, Snapshot, StatusFetcher};

/// Default polling cadence. Transitions last exactly this long.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Shortest interval the poller will run with; smaller values are raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// State shared between the poll loop, its fetch tasks, and the handle.
#[derive(Debug)]
struct PollShared {
    /// Cleared on stop; fetches that finish afterwards are discarded.
    mounted: AtomicBool,
    /// Set while a fetch is running (only tracked with overlap suppression).
    in_flight: AtomicBool,
    /// A refresh arrived while a fetch was in flight; run it when that ends.
    refresh_pending: AtomicBool,
    last_error: Arc<Mutex<Option<String>>>,
}

/// Builder for a background status poller.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use andy_console::{DataSource, HttpFetcher, StatusPoller};
///
/// # tokio_test::block_on(async {
/// let fetcher = HttpFetcher::new("http://localhost:8000", None).unwrap();
/// let mut source = StatusPoller::new(fetcher)
///     .interval(Duration::from_secs(2))
///     .spawn();
///
/// if let Some(snapshot) = source.poll() {
///     println!("CPU {}%", snapshot.cpu);
/// }
/// # });
/// ```
#[derive(Debug)]
pub struct StatusPoller {
    fetcher: Arc<dyn StatusFetcher>,
    interval: Duration,
    suppress_overlap: bool,
}

impl StatusPoller {
    /// Create a poller for the given fetcher with the default interval.
    pub fn new<F: StatusFetcher + 'static>(fetcher: F) -> Self {
        Self::from_arc(Arc::new(fetcher))
    }

    /// Create a poller for an already shared fetcher.
    pub fn from_arc(fetcher: Arc<dyn StatusFetcher>) -> Self {
        Self {
            fetcher,
            interval: DEFAULT_POLL_INTERVAL,
            suppress_overlap: false,
        }
    }

    /// Set the polling interval.
    ///
    /// Values below [`MIN_POLL_INTERVAL`] (including zero) are raised to it.
    pub fn interval(mut self, interval: Duration) -> Self {
        if interval < MIN_POLL_INTERVAL {
            warn!(
                requested_ms = interval.as_millis() as u64,
                "poll interval too small, using minimum"
            );
        }
        self.interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Skip ticks while a previous fetch is still running.
    ///
    /// Off by default: a slow fetch does not hold back the next one. A
    /// refresh requested while a fetch is running is queued and starts as
    /// soon as that fetch finishes.
    pub fn suppress_overlap(mut self, suppress: bool) -> Self {
        self.suppress_overlap = suppress;
        self
    }

    /// Start polling.
    ///
    /// Must be called from within a tokio runtime. Polling stops when the
    /// returned source (or its handle) is stopped or dropped.
    pub fn spawn(self) -> PolledSource {
        let (tx, rx) = watch::channel(Snapshot::default());
        let shared = Arc::new(PollShared {
            mounted: AtomicBool::new(true),
            in_flight: AtomicBool::new(false),
            refresh_pending: AtomicBool::new(false),
            last_error: Arc::default(),
        });
        let refresh = Arc::new(Notify::new());

        let source = ChannelSource::with_error_slot(
            rx,
            self.fetcher.description(),
            Arc::clone(&shared.last_error),
        );

        info!(
            source = self.fetcher.description(),
            interval_ms = self.interval.as_millis() as u64,
            "starting status poller"
        );

        let task = tokio::spawn(poll_loop(
            self.fetcher,
            self.interval,
            self.suppress_overlap,
            Arc::clone(&shared),
            Arc::new(tx),
            Arc::clone(&refresh),
        ));

        PolledSource {
            source,
            handle: PollerHandle {
                task,
                shared,
                refresh,
            },
        }
    }
}

async fn poll_loop(
    fetcher: Arc<dyn StatusFetcher>,
    interval: Duration,
    suppress_overlap: bool,
    shared: Arc<PollShared>,
    tx: Arc<watch::Sender<Snapshot>>,
    refresh: Arc<Notify>,
) {
    // The first tick completes immediately.
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let requested = tokio::select! {
            _ = ticker.tick() => false,
            _ = refresh.notified() => {
                debug!(source = fetcher.description(), "refresh requested");
                true
            }
        };

        if suppress_overlap && shared.in_flight.swap(true, Ordering::AcqRel) {
            if requested {
                debug!(
                    source = fetcher.description(),
                    "poll in flight, refresh queued"
                );
                shared.refresh_pending.store(true, Ordering::Release);
            } else {
                debug!(
                    source = fetcher.description(),
                    "previous poll still in flight, skipping tick"
                );
            }
            continue;
        }

        let fetcher = Arc::clone(&fetcher);
        let shared = Arc::clone(&shared);
        let tx = Arc::clone(&tx);
        let refresh = Arc::clone(&refresh);
        tokio::spawn(async move {
            poll_once(fetcher.as_ref(), &shared, &tx).await;
            shared.in_flight.store(false, Ordering::Release);
            if shared.refresh_pending.swap(false, Ordering::AcqRel) {
                refresh.notify_one();
            }
        });
    }
}

/// Run one fetch and publish the result if the poller is still mounted.
async fn poll_once(
    fetcher: &dyn StatusFetcher,
    shared: &PollShared,
    tx: &watch::Sender<Snapshot>,
) {
    let result = fetcher.fetch().await;

    if !shared.mounted.load(Ordering::Acquire) {
        trace!(source = fetcher.description(), "poller stopped, discarding result");
        return;
    }

    match result {
        Ok(snapshot) => {
            debug!(
                cpu = snapshot.cpu,
                memory = snapshot.memory,
                temperature = snapshot.temperature,
                "snapshot received"
            );
            *shared.last_error.lock() = None;
            tx.send_replace(snapshot);
        }
        Err(err) => {
            warn!(
                source = fetcher.description(),
                error = %err,
                "status poll failed, keeping last snapshot"
            );
            *shared.last_error.lock() = Some(err.to_string());
        }
    }
}

/// Controls a running poller.
///
/// Stopping cancels the interval. Fetches already in flight are left to
/// finish, but their results are discarded.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
    shared: Arc<PollShared>,
    refresh: Arc<Notify>,
}

impl PollerHandle {
    /// Trigger a fetch now, outside the regular schedule.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// Stop polling. Idempotent.
    pub fn stop(&mut self) {
        if self.shared.mounted.swap(false, Ordering::AcqRel) {
            info!("stopping status poller");
        }
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        self.shared.mounted.load(Ordering::Acquire) && !self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A [`DataSource`] fed by a background [`StatusPoller`].
///
/// Dropping the source stops the poller.
#[derive(Debug)]
pub struct PolledSource {
    source: ChannelSource,
    handle: PollerHandle,
}

impl PolledSource {
    pub fn handle(&self) -> &PollerHandle {
        &self.handle
    }

    /// Stop polling; the last snapshot stays available.
    pub fn stop(&mut self) {
        self.handle.stop();
    }
}

impl DataSource for PolledSource {
    fn poll(&mut self) -> Option<Snapshot> {
        self.source.poll()
    }

    fn description(&self) -> &str {
        self.source.description()
    }

    fn error(&self) -> Option<String> {
        self.source.error()
    }

    fn refresh(&mut self) {
        self.handle.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::PollError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;

    /// Plays back a fixed script of results, one per fetch.
    #[derive(Debug, Default)]
    struct ScriptedFetcher {
        script: Mutex<VecDeque<Result<Snapshot, PollError>>>,
        calls: AtomicUsize,
        delay: Duration,
    }

    impl ScriptedFetcher {
        fn new(script: Vec<Result<Snapshot, PollError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                ..Default::default()
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatusFetcher for ScriptedFetcher {
        async fn fetch(&self) -> Result<Snapshot, PollError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.script
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(PollError::Transport("script exhausted".to_string())))
        }

        fn description(&self) -> &str {
            "scripted"
        }
    }

    fn cpu(value: f64) -> Result<Snapshot, PollError> {
        Ok(Snapshot {
            cpu: value,
            ..Default::default()
        })
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn spawn(fetcher: &Arc<ScriptedFetcher>) -> PolledSource {
        StatusPoller::from_arc(fetcher.clone() as Arc<dyn StatusFetcher>)
            .interval(ms(2000))
            .spawn()
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetches_immediately_then_on_interval() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![cpu(10.0), cpu(20.0), cpu(30.0)]));
        let mut source = spawn(&fetcher);
        assert_eq!(source.description(), "scripted");

        tokio::time::sleep(ms(10)).await;
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(source.poll().unwrap().cpu, 10.0);
        assert!(source.poll().is_none());

        tokio::time::sleep(ms(2000)).await;
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(source.poll().unwrap().cpu, 20.0);

        tokio::time::sleep(ms(2000)).await;
        assert_eq!(fetcher.calls(), 3);
        assert_eq!(source.poll().unwrap().cpu, 30.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_poll_keeps_previous_snapshot() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![
            cpu(10.0),
            Err(PollError::Status(503)),
        ]));
        let mut source = spawn(&fetcher);

        tokio::time::sleep(ms(10)).await;
        assert_eq!(source.poll().unwrap().cpu, 10.0);
        assert!(source.error().is_none());

        tokio::time::sleep(ms(2000)).await;
        assert_eq!(fetcher.calls(), 2);
        // Nothing new published
        assert!(source.poll().is_none());
        assert_eq!(
            source.error().as_deref(),
            Some("status endpoint returned HTTP 503")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_clears_error() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![
            Err(PollError::Transport("connection refused".to_string())),
            cpu(40.0),
        ]));
        let mut source = spawn(&fetcher);

        tokio::time::sleep(ms(10)).await;
        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("connection refused"));

        tokio::time::sleep(ms(2000)).await;
        assert_eq!(source.poll().unwrap().cpu, 40.0);
        assert!(source.error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_fetches_allowed_by_default() {
        let fetcher =
            Arc::new(ScriptedFetcher::new(vec![cpu(1.0), cpu(2.0)]).with_delay(ms(3000)));
        let mut source = spawn(&fetcher);

        tokio::time::sleep(ms(2010)).await;
        // Second tick started while the first fetch is still running
        assert_eq!(fetcher.calls(), 2);
        assert!(source.poll().is_none());

        tokio::time::sleep(ms(1000)).await;
        assert_eq!(source.poll().unwrap().cpu, 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlap_suppression_skips_ticks() {
        let fetcher =
            Arc::new(ScriptedFetcher::new(vec![cpu(1.0), cpu(2.0)]).with_delay(ms(3000)));
        let _source = StatusPoller::from_arc(fetcher.clone() as Arc<dyn StatusFetcher>)
            .interval(ms(2000))
            .suppress_overlap(true)
            .spawn();

        tokio::time::sleep(ms(2010)).await;
        assert_eq!(fetcher.calls(), 1);

        // First fetch finished at 3000, next tick at 4000 goes ahead
        tokio::time::sleep(ms(2000)).await;
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_queued_behind_in_flight_fetch() {
        let fetcher =
            Arc::new(ScriptedFetcher::new(vec![cpu(1.0), cpu(2.0)]).with_delay(ms(3000)));
        let mut source = StatusPoller::from_arc(fetcher.clone() as Arc<dyn StatusFetcher>)
            .interval(ms(2000))
            .suppress_overlap(true)
            .spawn();

        tokio::time::sleep(ms(10)).await;
        source.refresh();
        tokio::time::sleep(ms(10)).await;
        assert_eq!(fetcher.calls(), 1);

        // First fetch ends at 3000; the queued refresh starts right away
        // instead of waiting for the tick at 4000.
        tokio::time::sleep(ms(3000)).await;
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(source.poll().unwrap().cpu, 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_raised_to_minimum() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![cpu(5.0)]));
        let mut source = StatusPoller::from_arc(fetcher.clone() as Arc<dyn StatusFetcher>)
            .interval(Duration::ZERO)
            .spawn();

        tokio::time::sleep(ms(10)).await;
        assert!(source.handle().is_running());
        assert!(fetcher.calls() >= 2);
        assert_eq!(source.poll().unwrap().cpu, 5.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_snapshot_available_after_stop() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![cpu(77.0)]));
        let mut source = spawn(&fetcher);

        tokio::time::sleep(ms(10)).await;
        source.stop();
        tokio::time::sleep(ms(10)).await;

        assert_eq!(source.poll().unwrap().cpu, 77.0);
        assert!(source.poll().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_fetches_now() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![cpu(1.0), cpu(2.0)]));
        let mut source = spawn(&fetcher);

        tokio::time::sleep(ms(10)).await;
        assert_eq!(source.poll().unwrap().cpu, 1.0);

        source.refresh();
        tokio::time::sleep(ms(10)).await;
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(source.poll().unwrap().cpu, 2.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_discards_in_flight_result() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![cpu(99.0)]).with_delay(ms(1000)));
        let mut source = spawn(&fetcher);

        tokio::time::sleep(ms(10)).await;
        assert_eq!(fetcher.calls(), 1);

        source.stop();
        assert!(!source.handle().is_running());

        tokio::time::sleep(ms(5000)).await;
        // The in-flight fetch completed but was not published, and no
        // further ticks ran.
        assert_eq!(fetcher.calls(), 1);
        assert!(source.poll().is_none());
        assert!(source.error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_polling() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![cpu(1.0)]));
        let source = spawn(&fetcher);

        tokio::time::sleep(ms(10)).await;
        drop(source);

        tokio::time::sleep(ms(10_000)).await;
        assert_eq!(fetcher.calls(), 1);
    }
}
