//! The session controller: command dispatch and event reconciliation.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::watch;
use wingrab_common::error::{WingrabError, WingrabResult};
use wingrab_host_protocol::{CommandGateway, EventReceiver, HostEvent, WindowHandle};

use crate::axis::{Axis, AxisState, IntentOp, PendingIntent};
use crate::state::{CaptureArtifact, SessionSnapshot, SessionState};

/// Capture interval used until the embedder selects one.
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Capture axis: command-confirmed. The host emits no "capture started"
/// event, so the command result is the settlement.
#[derive(Debug, Default)]
struct CaptureAxis {
    state: AxisState,
    window_id: Option<String>,
    interval_ms: Option<u64>,
    pending: Option<PendingIntent>,
}

/// Record axis: event-confirmed. The host is the source of truth for
/// recording state; command results alone never flip this axis.
#[derive(Debug, Default)]
struct RecordAxis {
    state: AxisState,
    /// Last window this axis targeted. Kept across sessions so a
    /// host-initiated `recording-started` can resolve its window.
    window_id: Option<String>,
    pending: Option<PendingIntent>,
}

/// Owns the capture/record lifecycle.
///
/// All methods take `&mut self`: the controller runs on one logical thread
/// and the embedder serializes calls. Command awaits and event deliveries
/// are the only suspension points; every guard is checked-and-set within a
/// single synchronous transition, so no further locking is needed.
pub struct SessionController {
    gateway: Arc<dyn CommandGateway>,
    capture: CaptureAxis,
    record: RecordAxis,
    last_artifact: Option<CaptureArtifact>,
    windows: Vec<WindowHandle>,
    selected_window: Option<String>,
    selected_interval_ms: u64,
    next_token: u64,
    observers: watch::Sender<SessionSnapshot>,
}

impl SessionController {
    /// Create a controller over the given gateway.
    pub fn new(gateway: Arc<dyn CommandGateway>) -> Self {
        let initial = SessionSnapshot {
            selected_interval_ms: DEFAULT_INTERVAL_MS,
            ..SessionSnapshot::default()
        };
        let (observers, _) = watch::channel(initial);
        Self {
            gateway,
            capture: CaptureAxis::default(),
            record: RecordAxis::default(),
            last_artifact: None,
            windows: Vec::new(),
            selected_window: None,
            selected_interval_ms: DEFAULT_INTERVAL_MS,
            next_token: 0,
            observers,
        }
    }

    // Observable state

    /// Current snapshot of everything a presentation layer renders.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.session_state(),
            capture_axis: self.capture.state,
            record_axis: self.record.state,
            last_artifact: self.last_artifact.clone(),
            windows: self.windows.clone(),
            selected_window: self.selected_window.clone(),
            selected_interval_ms: self.selected_interval_ms,
        }
    }

    /// Subscribe to snapshot changes.
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.observers.subscribe()
    }

    /// Composed session state.
    pub fn session_state(&self) -> SessionState {
        let capturing = if self.capture.state.is_engaged() {
            self.capture
                .window_id
                .as_deref()
                .zip(self.capture.interval_ms)
        } else {
            None
        };
        let recording = if self.record.state.is_engaged() {
            self.record.window_id.as_deref()
        } else {
            None
        };
        SessionState::compose(capturing, recording)
    }

    /// Raw capture-axis state.
    pub fn capture_state(&self) -> AxisState {
        self.capture.state
    }

    /// Raw record-axis state.
    pub fn record_state(&self) -> AxisState {
        self.record.state
    }

    /// Most recent still-capture artifact.
    pub fn last_artifact(&self) -> Option<&CaptureArtifact> {
        self.last_artifact.as_ref()
    }

    /// Windows from the last enumeration.
    pub fn windows(&self) -> &[WindowHandle] {
        &self.windows
    }

    // Selection and enumeration

    /// Re-enumerate capturable windows from the host.
    pub async fn refresh_windows(&mut self) -> WingrabResult<Vec<WindowHandle>> {
        let windows = self.gateway.get_windows().await?;
        self.windows = windows.clone();
        self.publish();
        Ok(windows)
    }

    /// Remember the window the user picked.
    pub fn select_window(&mut self, window_id: impl Into<String>) {
        self.selected_window = Some(window_id.into());
        self.publish();
    }

    /// Remember the interval the user picked.
    pub fn select_interval_ms(&mut self, interval_ms: u64) {
        self.selected_interval_ms = interval_ms;
        self.publish();
    }

    /// Base directory the host writes artifacts into.
    pub async fn capture_dir(&self) -> WingrabResult<PathBuf> {
        self.gateway.get_capture_path().await
    }

    // Capture axis

    /// Start periodic still capture of `window_id`.
    ///
    /// Optimistic: the axis goes `Requested` while the command is in
    /// flight, `Active` on success, back to `Idle` on rejection.
    pub async fn start_capture(
        &mut self,
        window_id: &str,
        interval_ms: u64,
    ) -> WingrabResult<()> {
        validate_window_id(window_id)?;
        validate_interval(interval_ms)?;
        if self.capture.state != AxisState::Idle {
            return Err(WingrabError::already_active(Axis::Capture.as_str()));
        }

        let token = self.take_token();
        self.capture.pending = Some(PendingIntent {
            token,
            axis: Axis::Capture,
            op: IntentOp::StartCapture {
                window_id: window_id.to_string(),
                interval_ms,
            },
        });
        self.capture.state = AxisState::Requested;
        self.publish();

        tracing::info!(window_id, interval_ms, token, "Dispatching start_capture");
        match self.gateway.start_capture(window_id, interval_ms).await {
            Ok(()) => {
                // No "capture started" event exists; the command result is
                // authoritative for this axis.
                self.capture.state = AxisState::Active;
                self.capture.window_id = Some(window_id.to_string());
                self.capture.interval_ms = Some(interval_ms);
                self.capture.pending = None;
                self.publish();
                Ok(())
            }
            Err(e) => {
                self.capture.state = AxisState::Idle;
                self.capture.pending = None;
                self.publish();
                Err(WingrabError::command(format!(
                    "start_capture rejected: {e}"
                )))
            }
        }
    }

    /// Stop periodic still capture.
    ///
    /// A no-op while idle; rejected while a start/stop is still settling.
    /// On rejection of the stop command the axis stays `Active`.
    pub async fn stop_capture(&mut self) -> WingrabResult<()> {
        match self.capture.state {
            AxisState::Idle => return Err(WingrabError::already_idle(Axis::Capture.as_str())),
            AxisState::Requested | AxisState::Stopping => {
                return Err(WingrabError::intent_pending(Axis::Capture.as_str()))
            }
            AxisState::Active => {}
        }

        let token = self.take_token();
        self.capture.pending = Some(PendingIntent {
            token,
            axis: Axis::Capture,
            op: IntentOp::StopCapture,
        });
        self.capture.state = AxisState::Stopping;
        self.publish();

        tracing::info!(token, "Dispatching stop_capture");
        match self.gateway.stop_capture().await {
            Ok(()) => {
                self.capture.state = AxisState::Idle;
                self.capture.window_id = None;
                self.capture.interval_ms = None;
                self.capture.pending = None;
                self.publish();
                Ok(())
            }
            Err(e) => {
                // Stop failed: the host is still capturing.
                self.capture.state = AxisState::Active;
                self.capture.pending = None;
                self.publish();
                Err(WingrabError::command(format!("stop_capture rejected: {e}")))
            }
        }
    }

    // Record axis

    /// Ask the host to start recording `window_id`.
    ///
    /// The axis stays `Requested` even on command success; only the host's
    /// `recording-started` event makes it `Active`.
    pub async fn start_record(&mut self, window_id: &str) -> WingrabResult<()> {
        validate_window_id(window_id)?;
        if self.record.state != AxisState::Idle {
            return Err(WingrabError::already_active(Axis::Record.as_str()));
        }

        let token = self.take_token();
        self.record.pending = Some(PendingIntent {
            token,
            axis: Axis::Record,
            op: IntentOp::StartRecord {
                window_id: window_id.to_string(),
            },
        });
        self.record.state = AxisState::Requested;
        self.record.window_id = Some(window_id.to_string());
        self.publish();

        tracing::info!(window_id, token, "Dispatching start_record");
        match self.gateway.start_record(window_id).await {
            Ok(()) => Ok(()),
            Err(e) => {
                // Revert only if this intent is still the outstanding one;
                // a `recording-started` event settles it first and wins.
                if self.record.pending.as_ref().is_some_and(|p| p.token == token) {
                    self.record.pending = None;
                    if self.record.state == AxisState::Requested {
                        self.record.state = AxisState::Idle;
                    }
                    self.publish();
                }
                Err(WingrabError::command(format!("start_record rejected: {e}")))
            }
        }
    }

    /// Ask the host to stop recording.
    ///
    /// The axis returns to `Idle` only on the `recording-stopped` event,
    /// regardless of the command result.
    pub async fn stop_record(&mut self) -> WingrabResult<()> {
        match self.record.state {
            AxisState::Idle => return Err(WingrabError::already_idle(Axis::Record.as_str())),
            AxisState::Requested | AxisState::Stopping => {
                return Err(WingrabError::intent_pending(Axis::Record.as_str()))
            }
            AxisState::Active => {}
        }

        let token = self.take_token();
        self.record.pending = Some(PendingIntent {
            token,
            axis: Axis::Record,
            op: IntentOp::StopRecord,
        });
        self.record.state = AxisState::Stopping;
        self.publish();

        tracing::info!(token, "Dispatching stop_record");
        match self.gateway.stop_record().await {
            Ok(()) => Ok(()),
            Err(e) => {
                // The event is authoritative: stay Stopping until the host
                // reports `recording-stopped`, but surface the rejection.
                if self.record.pending.as_ref().is_some_and(|p| p.token == token) {
                    self.record.pending = None;
                    self.publish();
                }
                Err(WingrabError::command(format!("stop_record rejected: {e}")))
            }
        }
    }

    // Event reconciliation

    /// Apply one host event.
    ///
    /// Unknown-phase or duplicate deliveries are logged and dropped, never
    /// errors: at-least-once delivery makes them normal.
    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::CaptureTaken(path) => {
                if self.capture.state == AxisState::Active {
                    self.last_artifact = Some(CaptureArtifact::arrived(path));
                    self.publish();
                } else {
                    tracing::debug!(
                        path = %path.display(),
                        state = ?self.capture.state,
                        "Ignoring capture-taken outside an active capture session"
                    );
                }
            }
            HostEvent::RecordingStarted => self.on_recording_started(),
            HostEvent::RecordingStopped => self.on_recording_stopped(),
        }
    }

    /// Apply every event currently queued on `events` without blocking.
    pub fn drain_events(&mut self, events: &mut EventReceiver) {
        loop {
            match events.try_recv() {
                Ok(event) => self.handle_event(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
                Err(TryRecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Host event stream lagged; events dropped");
                }
            }
        }
    }

    fn on_recording_started(&mut self) {
        if self.record.state == AxisState::Active {
            tracing::debug!("Duplicate recording-started ignored");
            return;
        }

        // The event always wins, including host-initiated recordings with
        // no pending intent. Resolve the window from the intent, the axis's
        // last target, or the UI selection, in that order.
        let window_id = match self.record.pending.take() {
            Some(PendingIntent {
                op: IntentOp::StartRecord { window_id },
                ..
            }) => Some(window_id),
            _ => None,
        }
        .or_else(|| self.record.window_id.clone())
        .or_else(|| self.selected_window.clone());

        match window_id {
            Some(window_id) => {
                if self.record.state != AxisState::Requested {
                    tracing::warn!(
                        state = ?self.record.state,
                        "recording-started without a matching request; trusting the host"
                    );
                }
                self.record.window_id = Some(window_id);
                self.record.state = AxisState::Active;
                self.record.pending = None;
                self.publish();
            }
            None => {
                tracing::warn!(
                    "recording-started with no known target window; dropping event"
                );
            }
        }
    }

    fn on_recording_stopped(&mut self) {
        if self.record.state == AxisState::Idle {
            tracing::debug!("Stale recording-stopped ignored");
            return;
        }
        if self.record.state != AxisState::Stopping {
            tracing::warn!(
                state = ?self.record.state,
                "recording-stopped without a matching stop; trusting the host"
            );
        }
        self.record.state = AxisState::Idle;
        self.record.pending = None;
        self.publish();
    }

    // Internal helpers

    fn take_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        self.observers.send_replace(snapshot);
    }
}

fn validate_window_id(window_id: &str) -> WingrabResult<()> {
    if window_id.trim().is_empty() {
        return Err(WingrabError::validation("window id must not be empty"));
    }
    Ok(())
}

fn validate_interval(interval_ms: u64) -> WingrabResult<()> {
    if interval_ms == 0 {
        return Err(WingrabError::validation(
            "capture interval must be greater than zero",
        ));
    }
    Ok(())
}
