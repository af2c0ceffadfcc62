//! The imperative command surface of the capture host.

use std::path::PathBuf;

use wingrab_common::error::WingrabResult;

use crate::window::WindowHandle;

/// Request/response channel to the capture host process.
///
/// Each method maps to exactly one named host command. Calls resolve or
/// reject asynchronously; the gateway itself guarantees neither latency nor
/// ordering across concurrent calls. Implementations are transports (IPC,
/// in-process host, test doubles) and must not hold session state.
#[async_trait::async_trait]
pub trait CommandGateway: Send + Sync {
    /// Enumerate capturable windows, in host order.
    async fn get_windows(&self) -> WingrabResult<Vec<WindowHandle>>;

    /// Base directory the host writes artifacts into.
    async fn get_capture_path(&self) -> WingrabResult<PathBuf>;

    /// Begin periodic still capture of a window. The host emits one
    /// `capture-taken` event per frame written; there is no dedicated
    /// "capture started" event.
    async fn start_capture(&self, window_id: &str, interval_ms: u64) -> WingrabResult<()>;

    /// Stop periodic still capture.
    async fn stop_capture(&self) -> WingrabResult<()>;

    /// Begin recording a window to video. The host confirms with a
    /// `recording-started` event; the command result alone does not mean
    /// recording is live.
    async fn start_record(&self, window_id: &str) -> WingrabResult<()>;

    /// Stop recording. The host confirms with a `recording-stopped` event.
    async fn stop_record(&self) -> WingrabResult<()>;
}
