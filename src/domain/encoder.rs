//! Wire command encoding.
//!
//! Pure functions mapping driver intents (joystick vector, mode selection,
//! motor toggles) to the text and byte payloads the remote firmware expects.

use crate::domain::models::{Command, JoystickVector};
use serde::{Deserialize, Serialize};

/// Axis values below this snap to exactly zero.
pub const DEAD_ZONE: f32 = 0.05;

/// Velocity range of the drive command, mm/s in Open Interface terms.
pub const MAX_VELOCITY: i32 = 500;

/// Sentinel radius meaning "drive straight".
pub const STRAIGHT_RADIUS: i32 = 32768;

/// Emitted on gesture release, bypassing the debounce.
pub const STOP_COMMAND: &str = "V:0 R:32768";

/// Roomba Open Interface single-byte commands.
pub mod opcode {
    /// Start / safe mode (motors limited).
    pub const SAFE_MODE: u8 = 131;
    /// Full mode, no safety limits.
    pub const FULL_MODE: u8 = 132;
    /// Spot cleaning pattern.
    pub const SPOT: u8 = 134;
    /// Default cleaning pass.
    pub const CLEAN: u8 = 135;
    /// Motor control header, followed by one bitmask byte.
    pub const MOTORS: u8 = 138;
    /// Seek the charging dock.
    pub const DOCK: u8 = 143;
}

/// Cleaning motors addressable through the motor bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotorKind {
    Vacuum,
    SideBrush,
    MainBrush,
}

impl MotorKind {
    pub const ALL: [MotorKind; 3] = [MotorKind::Vacuum, MotorKind::SideBrush, MotorKind::MainBrush];

    /// Fixed bit assignment of the Open Interface motor byte.
    pub fn bit(self) -> u8 {
        match self {
            MotorKind::MainBrush => 0b100,
            MotorKind::Vacuum => 0b010,
            MotorKind::SideBrush => 0b001,
        }
    }
}

/// Combined motor byte: bitwise OR over the enabled motors. Bits are
/// disjoint, so this equals their sum.
pub fn motor_bitmask(enabled: impl IntoIterator<Item = MotorKind>) -> u8 {
    enabled.into_iter().fold(0, |mask, motor| mask | motor.bit())
}

/// The two-byte motor command: header plus bitmask.
pub fn motor_command(bitmask: u8) -> Command {
    Command::RawBytes(vec![opcode::MOTORS, bitmask])
}

/// Translate a joystick sample into a `V:<velocity> R:<radius>` drive command.
///
/// The x axis is sign-flipped for natural control orientation, then both axes
/// pass a dead-zone. Velocity comes from y; radius from x, where full
/// deflection is the tightest curve (100) and a barely-deflected stick
/// approaches the widest (1000). A centered x yields the straight sentinel.
pub fn drive_command(sample: JoystickVector) -> String {
    let mut x = -sample.x;
    let mut y = sample.y;

    if x.abs() < DEAD_ZONE {
        x = 0.0;
    }
    if y.abs() < DEAD_ZONE {
        y = 0.0;
    }

    let velocity = ((y * MAX_VELOCITY as f32).round() as i32).clamp(-MAX_VELOCITY, MAX_VELOCITY);

    let radius = if x == 0.0 {
        STRAIGHT_RADIUS
    } else {
        let tightness = 1.0 - x.abs();
        let curve = (100.0 + tightness * 900.0).round() as i32;
        if x > 0.0 {
            curve
        } else {
            -curve
        }
    };

    format!("V:{velocity} R:{radius}")
}

/// `MODE:<NAME>` payload for profile mode selection.
pub fn mode_command(name: &str) -> Command {
    Command::Text(format!("MODE:{}", name.to_ascii_uppercase()))
}

/// `<LABEL>:<ACTION>` payload for generic buttons.
pub fn action_command(label: &str, action: &str) -> Command {
    Command::Text(format!(
        "{}:{}",
        label.to_ascii_uppercase(),
        action.to_ascii_uppercase()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(x: f32, y: f32) -> String {
        drive_command(JoystickVector::new(x, y))
    }

    #[test]
    fn dead_zone_snaps_to_stop() {
        for x in [-0.049, -0.01, 0.0, 0.02, 0.049] {
            for y in [-0.049, 0.0, 0.049] {
                assert_eq!(drive(x, y), STOP_COMMAND, "x={x} y={y}");
            }
        }
    }

    #[test]
    fn velocity_is_monotonic_and_clamped() {
        let velocity_of = |y: f32| -> i32 {
            let cmd = drive(0.0, y);
            let v = cmd
                .strip_prefix("V:")
                .and_then(|rest| rest.split(' ').next())
                .unwrap();
            v.parse().unwrap()
        };

        let mut last = i32::MIN;
        let mut y = -1.0;
        while y <= 1.0 {
            let v = velocity_of(y);
            assert!(v >= last, "velocity not monotonic at y={y}");
            assert!((-MAX_VELOCITY..=MAX_VELOCITY).contains(&v));
            last = v;
            y += 0.05;
        }
        assert_eq!(velocity_of(-1.0), -MAX_VELOCITY);
        assert_eq!(velocity_of(1.0), MAX_VELOCITY);
    }

    #[test]
    fn centered_x_drives_straight_regardless_of_y() {
        for y in [-1.0, -0.3, 0.5, 1.0] {
            let cmd = drive(0.0, y);
            assert!(cmd.ends_with("R:32768"), "{cmd}");
        }
    }

    #[test]
    fn full_deflection_is_tightest_curve() {
        // x = -1 flips to x' = 1: positive radius 100.
        assert_eq!(drive(-1.0, 1.0), "V:500 R:100");
        assert_eq!(drive(1.0, 1.0), "V:500 R:-100");
    }

    #[test]
    fn small_deflection_approaches_widest_curve() {
        // Just past the dead-zone the curve radius is near 1000.
        let cmd = drive(-0.051, 0.0);
        let radius: i32 = cmd.rsplit("R:").next().unwrap().parse().unwrap();
        assert!((950..1000).contains(&radius), "{cmd}");
    }

    #[test]
    fn motor_bits_are_fixed_and_disjoint() {
        assert_eq!(MotorKind::MainBrush.bit(), 4);
        assert_eq!(MotorKind::Vacuum.bit(), 2);
        assert_eq!(MotorKind::SideBrush.bit(), 1);
        assert_eq!(motor_bitmask(MotorKind::ALL), 7);
        assert_eq!(motor_bitmask([MotorKind::Vacuum, MotorKind::MainBrush]), 6);
        assert_eq!(motor_bitmask([]), 0);
    }

    #[test]
    fn motor_command_is_header_plus_bitmask() {
        assert_eq!(motor_command(6), Command::RawBytes(vec![138, 6]));
    }

    #[test]
    fn text_payload_constructors() {
        assert_eq!(mode_command("manual"), Command::text("MODE:MANUAL"));
        assert_eq!(action_command("lights", "on"), Command::text("LIGHTS:ON"));
    }
}
