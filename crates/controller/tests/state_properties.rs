//! Property tests: no operation or event sequence may panic the controller
//! or leave it observing an inconsistent state.

use std::path::PathBuf;
use std::sync::Arc;

use proptest::prelude::*;
use wingrab_common::error::WingrabResult;
use wingrab_controller::{AxisState, SessionController, SessionState};
use wingrab_host_protocol::{CommandGateway, HostEvent, WindowHandle};

/// Gateway that accepts everything.
struct YesGateway;

#[async_trait::async_trait]
impl CommandGateway for YesGateway {
    async fn get_windows(&self) -> WingrabResult<Vec<WindowHandle>> {
        Ok(Vec::new())
    }
    async fn get_capture_path(&self) -> WingrabResult<PathBuf> {
        Ok(PathBuf::from("/tmp"))
    }
    async fn start_capture(&self, _: &str, _: u64) -> WingrabResult<()> {
        Ok(())
    }
    async fn stop_capture(&self) -> WingrabResult<()> {
        Ok(())
    }
    async fn start_record(&self, _: &str) -> WingrabResult<()> {
        Ok(())
    }
    async fn stop_record(&self) -> WingrabResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Step {
    StartCapture { window: String, interval_ms: u64 },
    StopCapture,
    StartRecord { window: String },
    StopRecord,
    Event(HostEvent),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    let window = prop_oneof![Just(String::new()), Just("w1".to_string()), Just("w2".to_string())];
    prop_oneof![
        (window.clone(), 0u64..3000).prop_map(|(window, interval_ms)| Step::StartCapture {
            window,
            interval_ms,
        }),
        Just(Step::StopCapture),
        window.prop_map(|window| Step::StartRecord { window }),
        Just(Step::StopRecord),
        Just(Step::Event(HostEvent::CaptureTaken(PathBuf::from("/a/1.webp")))),
        Just(Step::Event(HostEvent::RecordingStarted)),
        Just(Step::Event(HostEvent::RecordingStopped)),
    ]
}

/// The composed state must agree with the raw axis states, and every
/// engaged axis must carry a non-empty window id.
fn assert_consistent(controller: &SessionController) {
    let snapshot = controller.snapshot();
    let capture_on = snapshot.capture_axis.is_engaged();
    let record_on = snapshot.record_axis.is_engaged();

    match &snapshot.state {
        SessionState::Idle => {
            assert!(!capture_on && !record_on);
        }
        SessionState::Capturing { window_id, interval_ms } => {
            assert!(capture_on && !record_on);
            assert!(!window_id.is_empty());
            assert!(*interval_ms > 0);
        }
        SessionState::Recording { window_id } => {
            assert!(!capture_on && record_on);
            assert!(!window_id.is_empty());
        }
        SessionState::CapturingAndRecording {
            capture_window_id,
            interval_ms,
            record_window_id,
        } => {
            assert!(capture_on && record_on);
            assert!(!capture_window_id.is_empty());
            assert!(!record_window_id.is_empty());
            assert!(*interval_ms > 0);
        }
    }

    // A requested axis is never visible as running.
    if snapshot.capture_axis == AxisState::Requested {
        assert!(!matches!(
            snapshot.state,
            SessionState::Capturing { .. } | SessionState::CapturingAndRecording { .. }
        ));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn arbitrary_sequences_never_break_the_state_machine(steps in prop::collection::vec(step_strategy(), 0..48)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        runtime.block_on(async {
            let mut controller = SessionController::new(Arc::new(YesGateway));
            for step in steps {
                // Guard and validation rejections are expected; only
                // inconsistency is a failure.
                match step {
                    Step::StartCapture { window, interval_ms } => {
                        let _ = controller.start_capture(&window, interval_ms).await;
                    }
                    Step::StopCapture => {
                        let _ = controller.stop_capture().await;
                    }
                    Step::StartRecord { window } => {
                        let _ = controller.start_record(&window).await;
                    }
                    Step::StopRecord => {
                        let _ = controller.stop_record().await;
                    }
                    Step::Event(event) => controller.handle_event(event),
                }
                assert_consistent(&controller);
            }
        });
    }
}
