//! Wireless link module.
//!
//! Everything between a UI intent and bytes on the radio:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      LinkService                        │
//! │   (coordinator - public API for the application)        │
//! └─────────────────────┬───────────────────────────────────┘
//!                       │
//!         ┌─────────────┼──────────────┐
//!         │             │              │
//!         ▼             ▼              ▼
//! ┌───────────┐  ┌────────────┐  ┌───────────┐
//! │  Session  │  │  Pipeline  │  │ Registry  │
//! │           │  │            │  │           │
//! │ - state   │  │ - C:<byte> │  │ - upsert  │
//! │   machine │  │   framing  │  │   by id   │
//! │ - channel │  │ - 10 ms    │  │ - name    │
//! │   select  │  │   spacing  │  │   filter  │
//! └───────────┘  └────────────┘  └───────────┘
//!        │
//!        ▼
//! ┌────────────────────────────────┐
//! │ RadioLink (transport trait)    │
//! │  real radio  /  SimulatedLink  │
//! └────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`transport`] - abstract radio surface and its events
//! - [`simulated`] - null transport for the simulated device
//! - [`registry`] - discovered-device list
//! - [`session`] - connection state machine
//! - [`pipeline`] - sequential transmit worker
//! - [`service`] - coordinator wiring it all together

pub mod pipeline;
pub mod registry;
pub mod service;
pub mod session;
pub mod simulated;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use service::LinkService;
pub use session::{Session, SessionPhase};
pub use simulated::SimulatedLink;
pub use transport::{
    ChannelInfo, LinkError, LinkEvent, LinkEventReceiver, LinkEventSender, RadioLink, ServiceId,
    WriteMode,
};
