//! Observable session state.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wingrab_host_protocol::WindowHandle;

use crate::axis::AxisState;

/// The composed, externally observable session state.
///
/// Capture and record are independent axes; this variant is their visible
/// product and the single source of truth for rendering. Window ids are
/// non-empty whenever the corresponding axis is engaged. The combined
/// variant carries both window ids because the axes may target different
/// windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    Capturing {
        window_id: String,
        interval_ms: u64,
    },
    Recording {
        window_id: String,
    },
    CapturingAndRecording {
        capture_window_id: String,
        interval_ms: u64,
        record_window_id: String,
    },
}

impl SessionState {
    /// Compose the visible state from engaged-axis details.
    pub(crate) fn compose(
        capturing: Option<(&str, u64)>,
        recording: Option<&str>,
    ) -> Self {
        match (capturing, recording) {
            (None, None) => Self::Idle,
            (Some((window_id, interval_ms)), None) => Self::Capturing {
                window_id: window_id.to_string(),
                interval_ms,
            },
            (None, Some(window_id)) => Self::Recording {
                window_id: window_id.to_string(),
            },
            (Some((capture_window_id, interval_ms)), Some(record_window_id)) => {
                Self::CapturingAndRecording {
                    capture_window_id: capture_window_id.to_string(),
                    interval_ms,
                    record_window_id: record_window_id.to_string(),
                }
            }
        }
    }
}

/// The result of one still capture: where the host wrote the frame, and
/// when the notification arrived. Only the most recent artifact is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureArtifact {
    pub path: PathBuf,
    pub received_at: DateTime<Utc>,
}

impl CaptureArtifact {
    /// Record an artifact path as arriving now.
    pub fn arrived(path: PathBuf) -> Self {
        Self {
            path,
            received_at: Utc::now(),
        }
    }
}

/// Everything a presentation layer needs to render, published through a
/// `tokio::sync::watch` channel on every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionSnapshot {
    /// Composed session state.
    pub state: SessionState,

    /// Raw capture-axis state, including transitional phases.
    pub capture_axis: AxisState,

    /// Raw record-axis state, including transitional phases.
    pub record_axis: AxisState,

    /// Most recent still-capture artifact, if any.
    pub last_artifact: Option<CaptureArtifact>,

    /// Windows from the last enumeration.
    pub windows: Vec<WindowHandle>,

    /// Window currently selected in the UI.
    pub selected_window: Option<String>,

    /// Capture interval currently selected in the UI.
    pub selected_interval_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composition_covers_all_axis_products() {
        assert_eq!(SessionState::compose(None, None), SessionState::Idle);
        assert_eq!(
            SessionState::compose(Some(("w1", 500)), None),
            SessionState::Capturing {
                window_id: "w1".to_string(),
                interval_ms: 500,
            }
        );
        assert_eq!(
            SessionState::compose(None, Some("w2")),
            SessionState::Recording {
                window_id: "w2".to_string(),
            }
        );
        assert_eq!(
            SessionState::compose(Some(("w1", 500)), Some("w2")),
            SessionState::CapturingAndRecording {
                capture_window_id: "w1".to_string(),
                interval_ms: 500,
                record_window_id: "w2".to_string(),
            }
        );
    }

    #[test]
    fn artifact_records_arrival_time() {
        let before = Utc::now();
        let artifact = CaptureArtifact::arrived(PathBuf::from("/a/1.webp"));
        assert_eq!(artifact.path, PathBuf::from("/a/1.webp"));
        assert!(artifact.received_at >= before);
    }
}
