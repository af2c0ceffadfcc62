//! Capture periodic stills of a window.

use tokio::sync::broadcast::error::RecvError;
use wingrab_controller::SessionController;
use wingrab_host_protocol::{EventReceiver, HostEvent};

use super::pick_window;

pub async fn run(
    controller: &mut SessionController,
    mut events: EventReceiver,
    window: Option<String>,
    interval_ms: u64,
    shots: u32,
) -> anyhow::Result<()> {
    let window_id = pick_window(controller, window).await?;
    controller.select_window(window_id.clone());
    controller.select_interval_ms(interval_ms);

    controller.start_capture(&window_id, interval_ms).await?;
    println!("Capturing window {window_id} every {interval_ms}ms; Ctrl+C to stop.");

    let mut taken = 0u32;
    while taken < shots {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let is_frame = matches!(event, HostEvent::CaptureTaken(_));
                    controller.handle_event(event);
                    if is_frame {
                        taken += 1;
                        if let Some(artifact) = controller.last_artifact() {
                            println!("  [{taken}/{shots}] {}", artifact.path.display());
                        }
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Event stream lagged");
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    controller.stop_capture().await?;
    match controller.last_artifact() {
        Some(artifact) => println!("Last capture: {}", artifact.path.display()),
        None => println!("No captures were taken."),
    }
    Ok(())
}
