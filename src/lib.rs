//! Remote control core for ESP32 robots and Open Interface Roombas.
//!
//! Translates driver intents (joystick vectors, mode selection, motor
//! toggles) into the wire command protocol and manages the lifecycle of a
//! wireless session with exactly one target device at a time. Rendering and
//! the platform radio stack live outside this crate; the former observes the
//! read-only query surface on [`LinkService`], the latter implements
//! [`RadioLink`].

pub mod domain;
pub mod infrastructure;

pub use domain::encoder;
pub use domain::joystick::{JoystickSampler, SAMPLE_INTERVAL};
pub use domain::models::{
    AppEvent, ChannelId, ChannelRef, Command, ConnectionStatus, Device, DeviceId, JoystickVector,
    MessageSeverity, StatusMessage, SIMULATED_DEVICE_ID,
};
pub use domain::motors::MotorToggles;
pub use domain::profile::{ActionKind, ControllerPreset, ModeOption, QuickAction, RobotProfile};
pub use domain::settings::{Settings, SettingsService, DEFAULT_DEVICE_FILTER};
pub use infrastructure::link::{
    LinkError, LinkEvent, LinkService, RadioLink, SimulatedLink, WriteMode,
};
