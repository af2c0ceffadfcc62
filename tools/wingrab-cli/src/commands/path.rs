//! Show where artifacts are written.

use wingrab_controller::SessionController;

pub async fn run(controller: &SessionController) -> anyhow::Result<()> {
    let dir = controller.capture_dir().await?;
    println!("{}", dir.display());
    Ok(())
}
