//! Null transport backing the simulated device.
//!
//! Implements the same [`RadioLink`] surface as a real radio but never
//! touches hardware: the link is always up, requests are no-ops and writes
//! are recorded for diagnostics instead of being transmitted.

use crate::domain::models::{ChannelId, DeviceId};
use crate::infrastructure::link::transport::{LinkError, RadioLink, ServiceId, WriteMode};
use std::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default)]
pub struct SimulatedLink {
    sent: Mutex<Vec<String>>,
}

impl SimulatedLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything "sent" to the simulated robot, in order.
    pub fn transcript(&self) -> Vec<String> {
        self.sent.lock().expect("transcript lock").clone()
    }
}

impl RadioLink for SimulatedLink {
    fn start_scan(&self) -> Result<(), LinkError> {
        Ok(())
    }

    fn stop_scan(&self) -> Result<(), LinkError> {
        Ok(())
    }

    fn connect(&self, _device: DeviceId) -> Result<(), LinkError> {
        Ok(())
    }

    fn disconnect(&self, _device: DeviceId) -> Result<(), LinkError> {
        Ok(())
    }

    fn discover_services(&self, _device: DeviceId) -> Result<(), LinkError> {
        Ok(())
    }

    fn discover_characteristics(
        &self,
        _device: DeviceId,
        _service: ServiceId,
    ) -> Result<(), LinkError> {
        Ok(())
    }

    fn is_link_up(&self, _device: DeviceId) -> bool {
        true
    }

    fn write(
        &self,
        _device: DeviceId,
        _channel: Option<ChannelId>,
        payload: &[u8],
        _mode: WriteMode,
    ) -> Result<(), LinkError> {
        let text = String::from_utf8_lossy(payload).into_owned();
        debug!(payload = %text, "simulated write");
        self.sent.lock().expect("transcript lock").push(text);
        Ok(())
    }
}
