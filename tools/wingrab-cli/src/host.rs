//! In-process stand-in for the capture host.
//!
//! Implements the full command surface and event stream of a real host so
//! the controller and CLI run end to end. Frames and recordings are
//! placeholder files; real pixel capture and encoding belong to the
//! external host process this binary would normally talk to over IPC.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use wingrab_common::error::{WingrabError, WingrabResult};
use wingrab_host_protocol::{
    event_channel, CommandGateway, EventReceiver, EventSender, HostEvent, WindowHandle,
};

struct CaptureWorker {
    stop: Arc<AtomicBool>,
    task: tokio::task::JoinHandle<()>,
}

pub struct SimulatedHost {
    captures_dir: PathBuf,
    events: EventSender,
    capture: Mutex<Option<CaptureWorker>>,
    recording: Mutex<Option<PathBuf>>,
}

impl SimulatedHost {
    pub fn new(captures_dir: PathBuf) -> Self {
        let (events, _) = event_channel();
        Self {
            captures_dir,
            events,
            capture: Mutex::new(None),
            recording: Mutex::new(None),
        }
    }

    /// Subscribe to the host's event stream.
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    fn lock_capture(&self) -> WingrabResult<std::sync::MutexGuard<'_, Option<CaptureWorker>>> {
        self.capture
            .lock()
            .map_err(|_| WingrabError::host("capture state poisoned"))
    }

    fn lock_recording(&self) -> WingrabResult<std::sync::MutexGuard<'_, Option<PathBuf>>> {
        self.recording
            .lock()
            .map_err(|_| WingrabError::host("recording state poisoned"))
    }

    fn artifact_path(dir: &Path, prefix: &str, ext: &str) -> PathBuf {
        let timestamp = chrono::Utc::now().timestamp_millis();
        dir.join(format!("{prefix}_{timestamp}.{ext}"))
    }
}

#[async_trait::async_trait]
impl CommandGateway for SimulatedHost {
    async fn get_windows(&self) -> WingrabResult<Vec<WindowHandle>> {
        // A real host enumerates the window server; the stand-in reports a
        // fixed desktop.
        Ok(vec![
            WindowHandle {
                id: "sim-1".to_string(),
                title: "Document - editor".to_string(),
                app_name: "editor".to_string(),
            },
            WindowHandle {
                id: "sim-2".to_string(),
                title: "Inbox".to_string(),
                app_name: "mail".to_string(),
            },
            WindowHandle {
                id: "sim-3".to_string(),
                title: "Terminal".to_string(),
                app_name: "terminal".to_string(),
            },
        ])
    }

    async fn get_capture_path(&self) -> WingrabResult<PathBuf> {
        Ok(self.captures_dir.clone())
    }

    async fn start_capture(&self, window_id: &str, interval_ms: u64) -> WingrabResult<()> {
        let mut capture = self.lock_capture()?;
        if capture.is_some() {
            return Err(WingrabError::host("already capturing"));
        }

        std::fs::create_dir_all(&self.captures_dir)?;

        let stop = Arc::new(AtomicBool::new(false));
        let dir = self.captures_dir.clone();
        let events = self.events.clone();
        let window = window_id.to_string();
        let worker_stop = stop.clone();
        let task = tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                if worker_stop.load(Ordering::SeqCst) {
                    break;
                }
                let path = Self::artifact_path(&dir, "capture", "webp");
                match tokio::fs::write(&path, b"").await {
                    Ok(()) => {
                        let _ = events.send(HostEvent::CaptureTaken(path));
                    }
                    Err(e) => {
                        tracing::error!(window = %window, error = %e, "Failed to write frame")
                    }
                }
            }
        });

        *capture = Some(CaptureWorker { stop, task });
        Ok(())
    }

    async fn stop_capture(&self) -> WingrabResult<()> {
        if let Some(worker) = self.lock_capture()?.take() {
            worker.stop.store(true, Ordering::SeqCst);
            worker.task.abort();
        }
        Ok(())
    }

    async fn start_record(&self, _window_id: &str) -> WingrabResult<()> {
        let mut recording = self.lock_recording()?;
        if recording.is_some() {
            return Err(WingrabError::host("already recording"));
        }

        std::fs::create_dir_all(&self.captures_dir)?;
        *recording = Some(Self::artifact_path(&self.captures_dir, "recording", "mp4"));

        // The host confirms asynchronously, like a real encoder spin-up.
        let _ = self.events.send(HostEvent::RecordingStarted);
        Ok(())
    }

    async fn stop_record(&self) -> WingrabResult<()> {
        let output = self
            .lock_recording()?
            .take()
            .ok_or_else(|| WingrabError::host("not recording"))?;

        tokio::fs::write(&output, b"").await?;
        tracing::info!(output = %output.display(), "Recording finalized");
        let _ = self.events.send(HostEvent::RecordingStopped);
        Ok(())
    }
}
