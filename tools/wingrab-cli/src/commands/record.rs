//! Record a window to video.

use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use wingrab_controller::{AxisState, SessionController};
use wingrab_host_protocol::EventReceiver;

use super::pick_window;

/// Pump host events into the controller until `done` holds.
async fn pump_until(
    controller: &mut SessionController,
    events: &mut EventReceiver,
    done: impl Fn(&SessionController) -> bool,
) -> anyhow::Result<()> {
    while !done(controller) {
        match events.recv().await {
            Ok(event) => controller.handle_event(event),
            Err(RecvError::Lagged(missed)) => {
                tracing::warn!(missed, "Event stream lagged");
            }
            Err(RecvError::Closed) => anyhow::bail!("host event stream closed"),
        }
    }
    Ok(())
}

pub async fn run(
    controller: &mut SessionController,
    mut events: EventReceiver,
    window: Option<String>,
    duration_secs: u64,
) -> anyhow::Result<()> {
    let window_id = pick_window(controller, window).await?;
    controller.select_window(window_id.clone());

    controller.start_record(&window_id).await?;

    // Recording is live only once the host confirms.
    pump_until(controller, &mut events, |c| {
        c.record_state() == AxisState::Active
    })
    .await?;
    println!("Recording window {window_id} for up to {duration_secs}s; Ctrl+C to stop.");

    tokio::select! {
        _ = tokio::time::sleep(Duration::from_secs(duration_secs)) => {}
        _ = tokio::signal::ctrl_c() => println!(),
    }

    controller.stop_record().await?;
    pump_until(controller, &mut events, |c| {
        c.record_state() == AxisState::Idle
    })
    .await?;

    println!("Recording stopped.");
    Ok(())
}
