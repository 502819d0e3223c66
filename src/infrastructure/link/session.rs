//! Session state machine.
//!
//! One session covers the lifecycle of one attempted/established connection:
//! scanning, connecting, service and characteristic discovery, then Ready
//! with a frozen writable channel. The delegate-callback flow of a radio
//! stack is modeled as explicit states transitioned only by the handlers
//! below; there are no ad-hoc connection booleans.

use crate::domain::models::{
    AppEvent, ChannelId, ChannelRef, ConnectionStatus, Device, DeviceId, MessageSeverity,
    StatusMessage,
};
use crate::infrastructure::link::registry::DeviceRegistry;
use crate::infrastructure::link::simulated::SimulatedLink;
use crate::infrastructure::link::transport::{
    ChannelInfo, LinkEvent, RadioLink, ServiceId, WriteMode,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Where the current session stands. `Disconnected` is terminal; a new
/// `connect()` starts a fresh attempt.
#[derive(Debug, Clone)]
pub enum SessionPhase {
    Idle,
    Scanning,
    Connecting { device: Device },
    DiscoveringServices { device: Device },
    DiscoveringCharacteristics { device: Device },
    Ready { device: Device, channel: Option<ChannelRef> },
    Disconnected,
}

impl SessionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "Idle",
            SessionPhase::Scanning => "Scanning",
            SessionPhase::Connecting { .. } => "Connecting",
            SessionPhase::DiscoveringServices { .. } => "DiscoveringServices",
            SessionPhase::DiscoveringCharacteristics { .. } => "DiscoveringCharacteristics",
            SessionPhase::Ready { .. } => "Ready",
            SessionPhase::Disconnected => "Disconnected",
        }
    }

    pub fn device(&self) -> Option<&Device> {
        match self {
            SessionPhase::Connecting { device }
            | SessionPhase::DiscoveringServices { device }
            | SessionPhase::DiscoveringCharacteristics { device }
            | SessionPhase::Ready { device, .. } => Some(device),
            _ => None,
        }
    }
}

/// Everything the transmit pipeline needs for one write.
pub struct WriteTarget {
    pub link: Arc<dyn RadioLink>,
    pub device: DeviceId,
    pub channel: Option<ChannelId>,
    pub mode: WriteMode,
}

/// Single-writer owner of the session and the device registry. All radio
/// events and UI calls must be serialized onto it; see `LinkService`.
pub struct Session {
    phase: SessionPhase,
    registry: DeviceRegistry,
    radio: Arc<dyn RadioLink>,
    simulated: Arc<SimulatedLink>,
    events: mpsc::UnboundedSender<AppEvent>,
    device_filter: String,
}

impl Session {
    pub fn new(
        radio: Arc<dyn RadioLink>,
        events: mpsc::UnboundedSender<AppEvent>,
        device_filter: String,
    ) -> Self {
        Self {
            phase: SessionPhase::Idle,
            registry: DeviceRegistry::new(),
            radio,
            simulated: Arc::new(SimulatedLink::new()),
            events,
            device_filter,
        }
    }

    // ---- UI-initiated calls ----

    pub fn start_scan(&mut self) {
        match self.phase {
            SessionPhase::Idle | SessionPhase::Disconnected => {}
            SessionPhase::Scanning => return,
            _ => {
                self.report(
                    MessageSeverity::Warning,
                    format!("cannot scan while {}", self.phase.name()),
                );
                return;
            }
        }

        self.registry.clear_discovered();
        if let Err(e) = self.radio.start_scan() {
            self.report(MessageSeverity::Error, format!("scan failed to start: {e}"));
            return;
        }

        info!("scan started");
        self.phase = SessionPhase::Scanning;
    }

    pub fn stop_scan(&mut self) {
        if !matches!(self.phase, SessionPhase::Scanning) {
            return;
        }
        if let Err(e) = self.radio.stop_scan() {
            warn!("stopping scan failed: {e}");
        }
        info!("scan stopped");
        self.phase = SessionPhase::Idle;
    }

    pub fn connect(&mut self, device: Device) {
        match self.phase {
            SessionPhase::Idle | SessionPhase::Scanning | SessionPhase::Disconnected => {}
            _ => {
                self.report(
                    MessageSeverity::Warning,
                    format!("connect ignored while {}", self.phase.name()),
                );
                return;
            }
        }

        if matches!(self.phase, SessionPhase::Scanning) {
            if let Err(e) = self.radio.stop_scan() {
                warn!("stopping scan before connect failed: {e}");
            }
        }

        if device.is_simulated {
            // Null-transport fast path: no radio steps, no channel.
            info!(name = %device.name, "connected to simulated device");
            self.phase = SessionPhase::Ready {
                device,
                channel: None,
            };
            self.send_status(ConnectionStatus::Connected);
            return;
        }

        info!(name = %device.name, id = device.id.0, "connecting");
        if let Err(e) = self.radio.connect(device.id) {
            self.report(MessageSeverity::Error, format!("connect failed: {e}"));
            self.phase = SessionPhase::Disconnected;
            return;
        }

        self.phase = SessionPhase::Connecting { device };
        self.send_status(ConnectionStatus::Connecting);
    }

    pub fn disconnect(&mut self) {
        if let Some(device) = self.phase.device() {
            if !device.is_simulated {
                if let Err(e) = self.radio.disconnect(device.id) {
                    warn!("radio disconnect failed: {e}");
                }
            }
        }
        self.drop_session("disconnected");
    }

    // ---- radio events ----

    pub fn handle_event(&mut self, event: LinkEvent) {
        match event {
            LinkEvent::Advertisement(device) => self.on_advertisement(device),
            LinkEvent::Connected(id) => self.on_connected(id),
            LinkEvent::ServicesFound { device, services } => {
                self.on_services_found(device, services)
            }
            LinkEvent::CharacteristicsFound {
                device,
                service,
                channels,
            } => self.on_characteristics_found(device, service, channels),
            LinkEvent::Disconnected(id) => self.on_link_lost(id),
        }
    }

    fn on_advertisement(&mut self, device: Device) {
        if !matches!(self.phase, SessionPhase::Scanning) {
            return;
        }
        debug!(name = %device.name, id = device.id.0, "advertisement");
        self.registry.upsert(device.clone());
        let _ = self.events.send(AppEvent::DeviceFound(device));
    }

    fn on_connected(&mut self, id: DeviceId) {
        let SessionPhase::Connecting { device } = &self.phase else {
            return;
        };
        if device.id != id {
            return;
        }
        let device = device.clone();

        info!(name = %device.name, "connected, discovering services");
        if let Err(e) = self.radio.discover_services(id) {
            self.report(
                MessageSeverity::Error,
                format!("service discovery failed: {e}"),
            );
        }
        self.phase = SessionPhase::DiscoveringServices { device };
    }

    fn on_services_found(&mut self, id: DeviceId, services: Vec<ServiceId>) {
        let SessionPhase::DiscoveringServices { device } = &self.phase else {
            return;
        };
        if device.id != id {
            return;
        }
        let device = device.clone();

        if services.is_empty() {
            // Stalled, not fatal: only disconnect+reconnect gets out of here.
            self.report(MessageSeverity::Warning, "no services found on device");
            return;
        }

        info!(count = services.len(), "services found");
        for service in &services {
            if let Err(e) = self.radio.discover_characteristics(id, *service) {
                self.report(
                    MessageSeverity::Error,
                    format!("characteristic discovery failed: {e}"),
                );
            }
        }
        self.phase = SessionPhase::DiscoveringCharacteristics { device };
    }

    fn on_characteristics_found(
        &mut self,
        id: DeviceId,
        service: ServiceId,
        channels: Vec<ChannelInfo>,
    ) {
        let SessionPhase::DiscoveringCharacteristics { device } = &self.phase else {
            // A channel was already selected this session (or the session is
            // gone); the frozen selection is not revisited.
            return;
        };
        if device.id != id {
            return;
        }
        let device = device.clone();

        // First writable characteristic in delivered order wins. The order is
        // radio-stack-dependent; that non-determinism is accepted as-is.
        let Some(writable) = channels.iter().find(|c| c.is_writable()) else {
            self.report(
                MessageSeverity::Warning,
                format!("no writable characteristic in service {:?}", service),
            );
            return;
        };

        let channel = ChannelRef {
            id: writable.id,
            supports_acknowledged_write: writable.write,
        };
        info!(channel = channel.id.0, ack = channel.supports_acknowledged_write, "writable channel selected");
        self.phase = SessionPhase::Ready {
            device,
            channel: Some(channel),
        };
        self.send_status(ConnectionStatus::Connected);
    }

    fn on_link_lost(&mut self, id: DeviceId) {
        let Some(device) = self.phase.device() else {
            return;
        };
        if device.id != id {
            return;
        }
        self.drop_session("link lost");
    }

    // ---- queries ----

    /// Connection poll. The simulated device is always connected; for a real
    /// one this reflects live link status and corrects the session if a
    /// disconnect event was missed.
    pub fn check_connection(&mut self) -> bool {
        let (id, simulated) = match &self.phase {
            SessionPhase::Ready { device, .. } => (device.id, device.is_simulated),
            _ => return false,
        };
        if simulated {
            return true;
        }

        let up = self.radio.is_link_up(id);
        if !up {
            warn!("link down while session believed Ready, reconciling");
            self.drop_session("link status drift");
        }
        up
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.phase, SessionPhase::Ready { .. })
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self.phase, SessionPhase::Scanning)
    }

    pub fn connected_device(&self) -> Option<Device> {
        match &self.phase {
            SessionPhase::Ready { device, .. } => Some(device.clone()),
            _ => None,
        }
    }

    /// The filtered registry view the UI lists.
    pub fn discovered_devices(&self) -> Vec<Device> {
        self.registry.filtered(&self.device_filter)
    }

    pub fn all_discovered_devices(&self) -> Vec<Device> {
        self.registry.devices().to_vec()
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn set_device_filter(&mut self, filter: impl Into<String>) {
        self.device_filter = filter.into();
    }

    /// Diagnostics recorded by the null transport.
    pub fn simulated_transcript(&self) -> Vec<String> {
        self.simulated.transcript()
    }

    /// Resolve the link, channel and write mode for an outbound command.
    /// `None` outside `Ready`; the simulated device routes to the null
    /// transport with no channel.
    pub fn write_target(&self) -> Option<WriteTarget> {
        let SessionPhase::Ready { device, channel } = &self.phase else {
            return None;
        };

        if device.is_simulated {
            return Some(WriteTarget {
                link: self.simulated.clone(),
                device: device.id,
                channel: None,
                mode: WriteMode::Unacknowledged,
            });
        }

        let channel = (*channel)?;
        Some(WriteTarget {
            link: self.radio.clone(),
            device: device.id,
            channel: Some(channel.id),
            mode: if channel.supports_acknowledged_write {
                WriteMode::Acknowledged
            } else {
                WriteMode::Unacknowledged
            },
        })
    }

    // ---- internals ----

    fn drop_session(&mut self, reason: &str) {
        info!(phase = self.phase.name(), reason, "session ended");
        self.phase = SessionPhase::Disconnected;
        self.send_status(ConnectionStatus::Disconnected);
    }

    fn send_status(&self, status: ConnectionStatus) {
        let _ = self.events.send(AppEvent::ConnectionStatus(status));
    }

    fn report(&self, severity: MessageSeverity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            MessageSeverity::Warning | MessageSeverity::Error => warn!("{message}"),
            _ => info!("{message}"),
        }
        let _ = self
            .events
            .send(AppEvent::LogMessage(StatusMessage::new(message, severity)));
    }
}
