use serde::{Deserialize, Serialize};

/// Opaque identifier for a remote radio, stable per physical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(pub u64);

/// Reserved id of the permanently-available simulated device.
pub const SIMULATED_DEVICE_ID: DeviceId = DeviceId(0);

/// A discovered connection candidate. Identity is the id alone; the name is
/// advertisement data and may change between scans.
#[derive(Debug, Clone)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub is_simulated: bool,
}

impl Device {
    pub fn new(id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_simulated: false,
        }
    }

    /// The offline testing target. Always reports connected and swallows
    /// commands without touching the radio.
    pub fn simulated() -> Self {
        Self {
            id: SIMULATED_DEVICE_ID,
            name: "Simulated robot".to_string(),
            is_simulated: true,
        }
    }
}

impl PartialEq for Device {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Device {}

/// Opaque identifier of one characteristic on the remote device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub u32);

/// The writable channel selected for a session. Frozen once chosen; a changed
/// characteristic set on the remote side only takes effect after reconnecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRef {
    pub id: ChannelId,
    pub supports_acknowledged_write: bool,
}

/// An outbound command, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// One ASCII line, sent as a single write.
    Text(String),
    /// Roomba Open Interface bytes, framed by the pipeline as one
    /// `C:<byte>` write per byte.
    RawBytes(Vec<u8>),
}

impl Command {
    pub fn text(payload: impl Into<String>) -> Self {
        Self::Text(payload.into())
    }
}

/// A joystick sample, both axes in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JoystickVector {
    pub x: f32,
    pub y: f32,
}

impl JoystickVector {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
}

/// Events pushed to the UI layer.
#[derive(Debug, Clone)]
pub enum AppEvent {
    DeviceFound(Device),
    ConnectionStatus(ConnectionStatus),
    LogMessage(StatusMessage),
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub severity: MessageSeverity,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>, severity: MessageSeverity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    Info,
    Success,
    Warning,
    Error,
}
