//! List capturable windows.

use wingrab_controller::SessionController;

pub async fn run(controller: &mut SessionController) -> anyhow::Result<()> {
    let windows = controller.refresh_windows().await?;

    if windows.is_empty() {
        println!("No capturable windows reported by the host.");
        return Ok(());
    }

    println!("{:<12} {:<16} TITLE", "ID", "APPLICATION");
    for window in windows {
        println!("{:<12} {:<16} {}", window.id, window.app_name, window.title);
    }
    Ok(())
}
