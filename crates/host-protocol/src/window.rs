//! Window metadata reported by the host.

use serde::{Deserialize, Serialize};

/// A capturable on-screen window as enumerated by the host.
///
/// The `id` is an opaque, host-assigned identifier; `title` and `app_name`
/// are display metadata only. Handles are immutable once obtained and the
/// host remains their owner; WinGrab references windows by `id`.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct WindowHandle {
    /// Opaque host-assigned identifier.
    pub id: String,

    /// Window title at enumeration time.
    pub title: String,

    /// Name of the owning application.
    pub app_name: String,
}

// Equality and hashing go by id only: titles change while the window stays
// the same window.
impl PartialEq for WindowHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl std::hash::Hash for WindowHandle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} - {})", self.id, self.app_name, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(id: &str, title: &str) -> WindowHandle {
        WindowHandle {
            id: id.to_string(),
            title: title.to_string(),
            app_name: "editor".to_string(),
        }
    }

    #[test]
    fn equality_ignores_display_metadata() {
        assert_eq!(handle("w1", "untitled"), handle("w1", "notes.txt"));
        assert_ne!(handle("w1", "untitled"), handle("w2", "untitled"));
    }

    #[test]
    fn serde_uses_host_field_names() {
        let json = serde_json::to_string(&handle("w1", "notes.txt")).unwrap();
        assert!(json.contains("\"app_name\""));
        let parsed: WindowHandle = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, "w1");
    }
}
