//! Motor toggle aggregation.
//!
//! The remote device has no per-motor command; every toggle re-sends the
//! full motor bitmask. This type owns the tracked booleans for the active
//! preset and turns each flip into the two-byte motor command.

use crate::domain::encoder::{self, MotorKind};
use crate::domain::models::Command;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct MotorToggles {
    enabled: HashSet<MotorKind>,
}

impl MotorToggles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip exactly one motor and return the motor command to transmit.
    /// Other motors are untouched.
    pub fn toggle(&mut self, motor: MotorKind) -> Command {
        if !self.enabled.insert(motor) {
            self.enabled.remove(&motor);
        }
        encoder::motor_command(self.bitmask())
    }

    pub fn is_enabled(&self, motor: MotorKind) -> bool {
        self.enabled.contains(&motor)
    }

    pub fn bitmask(&self) -> u8 {
        encoder::motor_bitmask(self.enabled.iter().copied())
    }

    /// Preset/profile switch: forget all tracked motors without emitting.
    /// The remote device keeps whatever motor state it last received.
    pub fn reset(&mut self) {
        self.enabled.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_vacuum_then_main_brush_sums_bits() {
        let mut motors = MotorToggles::new();
        assert_eq!(motors.toggle(MotorKind::Vacuum), Command::RawBytes(vec![138, 2]));
        assert_eq!(
            motors.toggle(MotorKind::MainBrush),
            Command::RawBytes(vec![138, 6])
        );
    }

    #[test]
    fn double_toggle_restores_prior_bitmask() {
        let mut motors = MotorToggles::new();
        motors.toggle(MotorKind::SideBrush);
        let before = motors.bitmask();

        motors.toggle(MotorKind::Vacuum);
        motors.toggle(MotorKind::Vacuum);
        assert_eq!(motors.bitmask(), before);
        assert!(!motors.is_enabled(MotorKind::Vacuum));
        assert!(motors.is_enabled(MotorKind::SideBrush));
    }

    #[test]
    fn reset_clears_all_motors_silently() {
        let mut motors = MotorToggles::new();
        motors.toggle(MotorKind::Vacuum);
        motors.toggle(MotorKind::MainBrush);

        motors.reset();
        assert_eq!(motors.bitmask(), 0);
        for motor in MotorKind::ALL {
            assert!(!motors.is_enabled(motor));
        }
    }
}
