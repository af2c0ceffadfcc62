//! WinGrab Session Controller
//!
//! Owns the capture/record lifecycle. The controller issues commands to the
//! capture host, consumes its event stream, and reconciles optimistic local
//! state with the host's authoritative confirmations, exposing a single
//! observable session state to any presentation layer.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │              SessionController                  │
//! │   ┌──────────────┐      ┌──────────────┐       │
//! │   │ capture axis │      │ record axis  │       │
//! │   │ (command-    │      │ (event-      │       │
//! │   │  confirmed)  │      │  confirmed)  │       │
//! │   └──────┬───────┘      └──────┬───────┘       │
//! │          │   commands          │   events       │
//! │          ▼                     ▼                │
//! │   ┌─────────────────────────────────────────┐  │
//! │   │   CommandGateway   │   HostEvent stream │  │
//! │   └─────────────────────────────────────────┘  │
//! │                    │                            │
//! │                    ▼                            │
//! │        watch::Receiver<SessionSnapshot>         │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! The two axes are independent four-state machines (`Idle`, `Requested`,
//! `Active`, `Stopping`). The capture axis trusts command results because
//! the host emits no "capture started" confirmation; the record axis trusts
//! only the host's `recording-started` / `recording-stopped` events. This
//! asymmetry mirrors the host's notification contract and is deliberate.

pub mod axis;
pub mod controller;
pub mod state;

pub use axis::*;
pub use controller::*;
pub use state::*;
