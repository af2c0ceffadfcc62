pub mod capture;
pub mod path;
pub mod record;
pub mod windows;

use wingrab_controller::SessionController;

/// Resolve the target window: the explicit id if given, otherwise the
/// first window the host enumerates.
pub async fn pick_window(
    controller: &mut SessionController,
    window: Option<String>,
) -> anyhow::Result<String> {
    if let Some(id) = window {
        return Ok(id);
    }
    let windows = controller.refresh_windows().await?;
    let first = windows
        .first()
        .ok_or_else(|| anyhow::anyhow!("No capturable windows reported by the host"))?;
    Ok(first.id.clone())
}
