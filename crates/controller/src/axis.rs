//! Per-axis lifecycle types.
//!
//! Capture and record are two independent lifecycles ("axes") that share
//! one state shape but settle differently: capture transitions on command
//! results, record transitions on host events.

use serde::{Deserialize, Serialize};

/// Which lifecycle a state or intent belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Capture,
    Record,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Capture => "capture",
            Self::Record => "record",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AxisState {
    /// Nothing running, nothing in flight.
    #[default]
    Idle,
    /// Start command issued, settlement outstanding.
    Requested,
    /// Running.
    Active,
    /// Stop command issued, settlement outstanding.
    Stopping,
}

impl AxisState {
    /// Whether the axis counts as "on" for the composed session state.
    ///
    /// `Stopping` still counts: the session is live until the stop settles.
    pub fn is_engaged(&self) -> bool {
        matches!(self, Self::Active | Self::Stopping)
    }

    /// Whether a command is in flight on this axis.
    pub fn is_transitional(&self) -> bool {
        matches!(self, Self::Requested | Self::Stopping)
    }
}

/// Transient record of one in-flight start/stop command.
///
/// Exactly one intent may exist per axis at a time; it is created when the
/// command is dispatched and cleared when the command settles (result,
/// failure, or a superseding authoritative event). The token is monotonic
/// per controller and discriminates a late settlement from a newer intent.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingIntent {
    pub token: u64,
    pub axis: Axis,
    pub op: IntentOp,
}

/// The operation a [`PendingIntent`] is waiting on.
#[derive(Debug, Clone, PartialEq)]
pub enum IntentOp {
    StartCapture { window_id: String, interval_ms: u64 },
    StopCapture,
    StartRecord { window_id: String },
    StopRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engaged_covers_active_and_stopping() {
        assert!(!AxisState::Idle.is_engaged());
        assert!(!AxisState::Requested.is_engaged());
        assert!(AxisState::Active.is_engaged());
        assert!(AxisState::Stopping.is_engaged());
    }

    #[test]
    fn transitional_covers_in_flight_states() {
        assert!(AxisState::Requested.is_transitional());
        assert!(AxisState::Stopping.is_transitional());
        assert!(!AxisState::Idle.is_transitional());
        assert!(!AxisState::Active.is_transitional());
    }

    #[test]
    fn axis_names_match_error_messages() {
        assert_eq!(Axis::Capture.to_string(), "capture");
        assert_eq!(Axis::Record.to_string(), "record");
    }
}
