//! Recording transport double shared by the session and pipeline tests.

use crate::domain::models::{ChannelId, DeviceId};
use crate::infrastructure::link::transport::{LinkError, RadioLink, ServiceId, WriteMode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedWrite {
    pub device: DeviceId,
    pub channel: ChannelId,
    pub payload: String,
    pub mode: WriteMode,
    pub at: tokio::time::Instant,
}

#[derive(Debug, Default)]
pub struct MockLink {
    calls: Mutex<Vec<String>>,
    writes: Mutex<Vec<RecordedWrite>>,
    link_up: AtomicBool,
}

impl MockLink {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
            link_up: AtomicBool::new(true),
        }
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn set_link_up(&self, up: bool) {
        self.link_up.store(up, Ordering::SeqCst);
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

impl RadioLink for MockLink {
    fn start_scan(&self) -> Result<(), LinkError> {
        self.record("start_scan");
        Ok(())
    }

    fn stop_scan(&self) -> Result<(), LinkError> {
        self.record("stop_scan");
        Ok(())
    }

    fn connect(&self, device: DeviceId) -> Result<(), LinkError> {
        self.record(format!("connect:{}", device.0));
        Ok(())
    }

    fn disconnect(&self, device: DeviceId) -> Result<(), LinkError> {
        self.record(format!("disconnect:{}", device.0));
        Ok(())
    }

    fn discover_services(&self, _device: DeviceId) -> Result<(), LinkError> {
        self.record("discover_services");
        Ok(())
    }

    fn discover_characteristics(
        &self,
        _device: DeviceId,
        service: ServiceId,
    ) -> Result<(), LinkError> {
        self.record(format!("discover_characteristics:{}", service.0));
        Ok(())
    }

    fn is_link_up(&self, _device: DeviceId) -> bool {
        self.link_up.load(Ordering::SeqCst)
    }

    fn write(
        &self,
        device: DeviceId,
        channel: Option<ChannelId>,
        payload: &[u8],
        mode: WriteMode,
    ) -> Result<(), LinkError> {
        if !self.link_up.load(Ordering::SeqCst) {
            return Err(LinkError::LinkDown(device));
        }
        let channel = channel.ok_or(LinkError::NoChannel)?;
        self.writes.lock().unwrap().push(RecordedWrite {
            device,
            channel,
            payload: String::from_utf8_lossy(payload).into_owned(),
            mode,
            at: tokio::time::Instant::now(),
        });
        Ok(())
    }
}
