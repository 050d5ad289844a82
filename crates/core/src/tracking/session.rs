//! Tracking session - the per-second tick loop
//!
//! A [`TrackingSession`] covers one start/stop cycle for one project/task
//! pair. Starting it spawns a single background task that owns the tick
//! source, the elapsed counter and the current chunk. The task reports on
//! two channels:
//!
//! - `ticks`: the new elapsed-seconds value after every tick
//! - `windows`: every packaged [`TimeWindow`]
//!
//! Every `flush_every_ticks` ticks the current chunk is packaged and the next
//! chunk starts at the end of the emitted window, so consecutive windows are
//! contiguous. Stopping cancels the task, which then flushes the partial
//! chunk (if any) and exits. Both channels close when the task exits.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use t3tracker_domain::{
    Result, Selection, SessionPhase, SessionSummary, TimeWindow, TrackerError, TrackingConfig,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::packaging::package_window;
use super::ports::{Clock, SystemInfoProvider};

/// Upper bound on waiting for the tick task after cancellation.
const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Receiving ends of a running session's notifications.
#[derive(Debug)]
pub struct SessionEvents {
    /// Elapsed seconds after each tick, in order.
    pub ticks: UnboundedReceiver<u64>,
    /// Packaged windows, in order.
    pub windows: UnboundedReceiver<TimeWindow>,
}

/// One start/stop cycle of time tracking.
pub struct TrackingSession {
    clock: Arc<dyn Clock>,
    system_info: Arc<dyn SystemInfoProvider>,
    tick_interval: Duration,
    flush_every_ticks: u64,
    phase: SessionPhase,
    selection: Option<Selection>,
    elapsed: Arc<AtomicU64>,
    cancellation: CancellationToken,
    task_handle: Option<JoinHandle<SessionSummary>>,
    summary: Option<SessionSummary>,
}

impl TrackingSession {
    /// Create an idle session.
    pub fn new(
        clock: Arc<dyn Clock>,
        system_info: Arc<dyn SystemInfoProvider>,
        config: TrackingConfig,
    ) -> Self {
        Self {
            clock,
            system_info,
            tick_interval: config.tick_interval(),
            flush_every_ticks: config.flush_every_ticks.max(1),
            phase: SessionPhase::Idle,
            selection: None,
            elapsed: Arc::new(AtomicU64::new(0)),
            cancellation: CancellationToken::new(),
            task_handle: None,
            summary: None,
        }
    }

    /// Start ticking for the given project and task.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// - `TrackerError::InvalidSelection` if either id is empty; nothing is
    ///   spawned and the session stays idle.
    /// - `TrackerError::SessionState` if the session was already started.
    /// - `TrackerError::Internal` if no tokio runtime is available.
    #[instrument(skip(self))]
    pub fn start(&mut self, project_id: &str, task_id: &str) -> Result<SessionEvents> {
        let selection = Selection::new(project_id, task_id)?;

        if self.phase != SessionPhase::Idle {
            return Err(TrackerError::SessionState(format!(
                "cannot start a session that is {}",
                self.phase
            )));
        }

        let runtime = tokio::runtime::Handle::try_current().map_err(|err| {
            TrackerError::Internal(format!("tracking requires a tokio runtime: {err}"))
        })?;

        let (ticks_tx, ticks) = mpsc::unbounded_channel();
        let (windows_tx, windows) = mpsc::unbounded_channel();

        let tick_loop = TickLoop {
            selection: selection.clone(),
            clock: Arc::clone(&self.clock),
            system_info: Arc::clone(&self.system_info),
            flush_every_ticks: self.flush_every_ticks,
            elapsed_seconds: 0,
            chunk_start: self.clock.now_millis(),
            windows_emitted: 0,
            elapsed_mirror: Arc::clone(&self.elapsed),
            ticks_tx,
            windows_tx,
        };

        self.cancellation = CancellationToken::new();
        let cancel = self.cancellation.clone();
        let tick_interval = self.tick_interval;

        self.task_handle = Some(runtime.spawn(tick_loop.run(tick_interval, cancel)));
        self.selection = Some(selection);
        self.phase = SessionPhase::Running;

        info!(project_id, task_id, "Tracking session started");
        Ok(SessionEvents { ticks, windows })
    }

    /// Stop ticking and flush the partial chunk.
    ///
    /// Returns once the tick task has exited; no tick or window follows.
    /// Calling this on a session that is not running does nothing and
    /// returns `None`.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> Option<SessionSummary> {
        if self.phase != SessionPhase::Running {
            debug!(phase = %self.phase, "stop ignored, session not running");
            return None;
        }

        self.phase = SessionPhase::Stopped;
        self.cancellation.cancel();

        let handle = self.task_handle.take()?;
        let summary = match tokio::time::timeout(JOIN_TIMEOUT, handle).await {
            Ok(Ok(summary)) => summary,
            Ok(Err(err)) => {
                warn!(error = %err, "Tracking task panicked");
                return None;
            }
            Err(_) => {
                warn!(timeout_secs = JOIN_TIMEOUT.as_secs(), "Tracking task did not exit in time");
                return None;
            }
        };

        info!(
            elapsed_seconds = summary.elapsed_seconds,
            windows_emitted = summary.windows_emitted,
            "Tracking session stopped"
        );
        self.summary = Some(summary);
        Some(summary)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Elapsed seconds as last published by the tick task.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.load(Ordering::Acquire)
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Summary of a stopped session.
    pub fn summary(&self) -> Option<SessionSummary> {
        self.summary
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        if self.is_running() {
            // The tick task still performs its final flush on cancellation.
            warn!("TrackingSession dropped while running; cancelling tick task");
            self.cancellation.cancel();
        }
    }
}

/// State owned by the background tick task.
struct TickLoop {
    selection: Selection,
    clock: Arc<dyn Clock>,
    system_info: Arc<dyn SystemInfoProvider>,
    flush_every_ticks: u64,
    elapsed_seconds: u64,
    chunk_start: i64,
    windows_emitted: u64,
    elapsed_mirror: Arc<AtomicU64>,
    ticks_tx: UnboundedSender<u64>,
    windows_tx: UnboundedSender<TimeWindow>,
}

impl TickLoop {
    async fn run(mut self, tick_interval: Duration, cancel: CancellationToken) -> SessionSummary {
        let mut interval = tokio::time::interval_at(Instant::now() + tick_interval, tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!(elapsed_seconds = self.elapsed_seconds, "Tick loop cancelled");
                    break;
                }
                _ = interval.tick() => self.on_tick(),
            }
        }

        if self.elapsed_seconds % self.flush_every_ticks != 0 {
            self.flush();
        }

        SessionSummary {
            elapsed_seconds: self.elapsed_seconds,
            windows_emitted: self.windows_emitted,
        }
    }

    fn on_tick(&mut self) {
        self.elapsed_seconds += 1;
        self.elapsed_mirror.store(self.elapsed_seconds, Ordering::Release);

        if self.ticks_tx.send(self.elapsed_seconds).is_err() {
            debug!("Tick receiver dropped");
        }

        if self.elapsed_seconds % self.flush_every_ticks == 0 {
            self.flush();
        }
    }

    fn flush(&mut self) {
        let window = package_window(
            self.chunk_start,
            self.clock.now_millis(),
            &self.selection,
            self.system_info.snapshot(),
            self.system_info.timezone_offset_millis(),
        );
        let next_chunk_start = window.end;

        info!(
            duration_ms = window.duration_ms(),
            elapsed_seconds = self.elapsed_seconds,
            "Packaged a time window"
        );

        if self.windows_tx.send(window).is_err() {
            warn!("Window receiver dropped; packaged window discarded");
        }

        self.windows_emitted += 1;
        self.chunk_start = next_chunk_start;
    }
}
