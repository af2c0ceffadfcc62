//! Error types shared across WinGrab crates.

/// Top-level error type for WinGrab operations.
#[derive(Debug, thiserror::Error)]
pub enum WingrabError {
    /// A start/stop argument was rejected before any command was dispatched.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The host rejected a command; the axis has been reverted.
    #[error("Command failed: {message}")]
    Command { message: String },

    /// The host process or its transport failed.
    #[error("Host error: {message}")]
    Host { message: String },

    /// `start` was called while the axis was not idle.
    #[error("{axis} axis is already active")]
    AlreadyActive { axis: String },

    /// `stop` was called while the axis was already idle.
    #[error("{axis} axis is already idle")]
    AlreadyIdle { axis: String },

    /// A start/stop intent is still in flight on this axis.
    #[error("{axis} axis has a command in flight")]
    IntentPending { axis: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using WingrabError.
pub type WingrabResult<T> = Result<T, WingrabError>;

impl WingrabError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    pub fn command(msg: impl Into<String>) -> Self {
        Self::Command {
            message: msg.into(),
        }
    }

    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host {
            message: msg.into(),
        }
    }

    pub fn already_active(axis: impl Into<String>) -> Self {
        Self::AlreadyActive { axis: axis.into() }
    }

    pub fn already_idle(axis: impl Into<String>) -> Self {
        Self::AlreadyIdle { axis: axis.into() }
    }

    pub fn intent_pending(axis: impl Into<String>) -> Self {
        Self::IntentPending { axis: axis.into() }
    }

    /// Guard rejections are benign: the requested operation was a no-op and
    /// the session is unchanged.
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            Self::AlreadyActive { .. } | Self::AlreadyIdle { .. } | Self::IntentPending { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_rejections_are_benign() {
        assert!(WingrabError::already_active("capture").is_benign());
        assert!(WingrabError::already_idle("record").is_benign());
        assert!(WingrabError::intent_pending("record").is_benign());
        assert!(!WingrabError::validation("empty window id").is_benign());
        assert!(!WingrabError::command("host said no").is_benign());
    }

    #[test]
    fn messages_name_the_axis() {
        let err = WingrabError::already_active("capture");
        assert_eq!(err.to_string(), "capture axis is already active");
    }
}
