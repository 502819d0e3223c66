//! Abstract wireless-link surface.
//!
//! The session layer depends only on this trait: request methods for
//! discovery, connection and writes, and an event channel for the
//! asynchronous radio callbacks. The platform radio stack below it is not
//! part of this crate.

use crate::domain::models::{ChannelId, Device, DeviceId};
use thiserror::Error;
use tokio::sync::mpsc;

/// Opaque identifier of one service on the remote device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceId(pub u32);

/// Capability flags reported for one discovered characteristic, in the
/// order the radio stack delivered them.
#[derive(Debug, Clone, Copy)]
pub struct ChannelInfo {
    pub id: ChannelId,
    /// Acknowledged write supported.
    pub write: bool,
    /// Write-without-acknowledgement supported.
    pub write_without_response: bool,
}

impl ChannelInfo {
    pub fn is_writable(&self) -> bool {
        self.write || self.write_without_response
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Acknowledged,
    Unacknowledged,
}

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("link to device {0:?} is down")]
    LinkDown(DeviceId),
    #[error("write addressed no channel")]
    NoChannel,
    #[error("radio request failed: {0}")]
    Radio(String),
}

/// Asynchronous radio events, delivered on the event channel handed to the
/// link implementation at construction.
#[derive(Debug, Clone)]
pub enum LinkEvent {
    Advertisement(Device),
    Connected(DeviceId),
    ServicesFound {
        device: DeviceId,
        services: Vec<ServiceId>,
    },
    CharacteristicsFound {
        device: DeviceId,
        service: ServiceId,
        channels: Vec<ChannelInfo>,
    },
    Disconnected(DeviceId),
}

pub type LinkEventSender = mpsc::UnboundedSender<LinkEvent>;
pub type LinkEventReceiver = mpsc::UnboundedReceiver<LinkEvent>;

/// Discover / connect / discover-services / discover-characteristics / write,
/// with results reported back through [`LinkEvent`]s.
///
/// Request methods return `Err` only when the radio refuses the request
/// itself; outcome and progress always arrive as events.
pub trait RadioLink: Send + Sync {
    fn start_scan(&self) -> Result<(), LinkError>;
    fn stop_scan(&self) -> Result<(), LinkError>;
    fn connect(&self, device: DeviceId) -> Result<(), LinkError>;
    fn disconnect(&self, device: DeviceId) -> Result<(), LinkError>;
    fn discover_services(&self, device: DeviceId) -> Result<(), LinkError>;
    fn discover_characteristics(&self, device: DeviceId, service: ServiceId)
        -> Result<(), LinkError>;

    /// Live link status, polled by connection reconciliation.
    fn is_link_up(&self, device: DeviceId) -> bool;

    /// Write one payload. `channel` is `None` only for transports that do
    /// not address channels (the simulated link); channel-addressed
    /// transports reject it with [`LinkError::NoChannel`].
    fn write(
        &self,
        device: DeviceId,
        channel: Option<ChannelId>,
        payload: &[u8],
        mode: WriteMode,
    ) -> Result<(), LinkError>;
}
