//! WinGrab Host Protocol
//!
//! The contract between WinGrab and the external capture host process.
//! The host owns pixel capture, video encoding, and file I/O; WinGrab
//! reaches it through two primitives:
//!
//! - **Commands**: imperative request/response calls ([`CommandGateway`]).
//!   The gateway gives no latency or cross-call ordering guarantees.
//! - **Events**: asynchronous push notifications ([`HostEvent`]) delivered
//!   over a multiplexed channel. Delivery is at-least-once and ordered per
//!   topic; there is no ordering guarantee across topics.

pub mod command;
pub mod event;
pub mod window;

pub use command::*;
pub use event::*;
pub use window::*;
