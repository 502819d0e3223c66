//! Drag-gesture sampling and debounce.
//!
//! The joystick is not event-driven: while a drag is active the latest sample
//! is re-encoded on a fixed 100 ms cadence and transmitted only when the
//! resulting command string changed. Release emits the stop command
//! immediately, outside the cadence.

use crate::domain::encoder::{self, STOP_COMMAND};
use crate::domain::models::JoystickVector;
use std::time::Duration;

/// Cadence of [`JoystickSampler::tick`].
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Default)]
pub struct JoystickSampler {
    pending: JoystickVector,
    last_sent: Option<String>,
    active: bool,
}

impl JoystickSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest drag sample. Samples arriving between ticks
    /// overwrite each other; only the most recent one is encoded.
    pub fn update(&mut self, sample: JoystickVector) {
        self.pending = sample;
        self.active = true;
    }

    /// One 100 ms timer tick. Returns the drive command to transmit, or
    /// `None` while idle or when the command matches the last one sent.
    pub fn tick(&mut self) -> Option<String> {
        if !self.active {
            return None;
        }

        let command = encoder::drive_command(self.pending);
        if self.last_sent.as_deref() == Some(command.as_str()) {
            return None;
        }

        self.last_sent = Some(command.clone());
        Some(command)
    }

    /// Gesture release. Always returns the stop command; the caller
    /// transmits it immediately rather than waiting for the next tick.
    pub fn release(&mut self) -> String {
        self.pending = JoystickVector::default();
        self.active = false;
        self.last_sent = Some(STOP_COMMAND.to_string());
        STOP_COMMAND.to_string()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
