//! Robot profiles and controller presets.
//!
//! A profile bundles the mode options and quick actions suited to one kind of
//! robot; a preset is a serde-codable description of which controls a surface
//! shows. Both only ever hand [`Command`] values to the transmit pipeline.

use crate::domain::encoder::{self, opcode, MotorKind};
use crate::domain::models::Command;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RobotProfile {
    /// Simple text presets for any ESP32-based robot.
    #[default]
    Generic,
    /// iRobot Roomba vacuums driven over the Open Interface.
    Roomba,
    /// Differential-drive tank with lights and accessories.
    Tank,
}

/// One selectable drive mode of a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeOption {
    pub id: &'static str,
    pub title: &'static str,
    pub caption: Option<&'static str>,
    pub command: Command,
}

/// One quick-action button of a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickAction {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub kind: ActionKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionKind {
    /// Fires one command per press.
    Momentary { command: Command },
    /// Alternates between two commands, starting from `default_on`.
    Toggle {
        default_on: bool,
        on: Command,
        off: Command,
    },
    /// Routed through the motor toggle aggregator instead of sending directly.
    RoombaMotor(MotorKind),
}

impl RobotProfile {
    pub const ALL: [RobotProfile; 3] = [RobotProfile::Generic, RobotProfile::Roomba, RobotProfile::Tank];

    pub fn display_name(self) -> &'static str {
        match self {
            RobotProfile::Generic => "Universal",
            RobotProfile::Roomba => "Roomba",
            RobotProfile::Tank => "Tracked Tank",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RobotProfile::Generic => "Simple button presets for any ESP32-based robot.",
            RobotProfile::Roomba => {
                "Tailored controls for iRobot Roomba vacuums using the Open Interface."
            }
            RobotProfile::Tank => {
                "Preset commands for a differential drive tank with lights and accessories."
            }
        }
    }

    pub fn mode_options(self) -> Vec<ModeOption> {
        match self {
            RobotProfile::Generic => vec![
                ModeOption {
                    id: "manual",
                    title: "Manual",
                    caption: Some("Direct drive with joystick"),
                    command: encoder::mode_command("manual"),
                },
                ModeOption {
                    id: "assist",
                    title: "Assist",
                    caption: Some("Joystick + onboard assists"),
                    command: encoder::mode_command("assist"),
                },
            ],
            RobotProfile::Roomba => vec![
                ModeOption {
                    id: "safe",
                    title: "Safe",
                    caption: Some("Limits the motors"),
                    command: Command::RawBytes(vec![opcode::SAFE_MODE]),
                },
                ModeOption {
                    id: "full",
                    title: "Full",
                    caption: Some("No safety limits"),
                    command: Command::RawBytes(vec![opcode::FULL_MODE]),
                },
            ],
            RobotProfile::Tank => vec![
                ModeOption {
                    id: "precision",
                    title: "Precision",
                    caption: Some("Slow, accurate movements"),
                    command: encoder::mode_command("precision"),
                },
                ModeOption {
                    id: "turbo",
                    title: "Turbo",
                    caption: Some("Full power driving"),
                    command: encoder::mode_command("turbo"),
                },
            ],
        }
    }

    pub fn default_mode(self) -> Option<ModeOption> {
        self.mode_options().into_iter().next()
    }

    pub fn quick_actions(self) -> Vec<QuickAction> {
        match self {
            RobotProfile::Generic => vec![
                QuickAction {
                    id: "generic.b1",
                    title: "Light",
                    icon: "lightbulb",
                    kind: ActionKind::Toggle {
                        default_on: false,
                        on: encoder::action_command("b1", "on"),
                        off: encoder::action_command("b1", "off"),
                    },
                },
                QuickAction {
                    id: "generic.b2",
                    title: "Horn",
                    icon: "speaker",
                    kind: ActionKind::Momentary {
                        command: encoder::action_command("b2", "trigger"),
                    },
                },
                QuickAction {
                    id: "generic.b3",
                    title: "Macro",
                    icon: "bolt",
                    kind: ActionKind::Momentary {
                        command: encoder::action_command("b3", "run"),
                    },
                },
            ],
            RobotProfile::Roomba => vec![
                QuickAction {
                    id: "roomba.vacuum",
                    title: "Vacuum",
                    icon: "tornado",
                    kind: ActionKind::RoombaMotor(MotorKind::Vacuum),
                },
                QuickAction {
                    id: "roomba.side_brush",
                    title: "Side Brush",
                    icon: "fan",
                    kind: ActionKind::RoombaMotor(MotorKind::SideBrush),
                },
                QuickAction {
                    id: "roomba.main_brush",
                    title: "Main Brush",
                    icon: "paintbrush",
                    kind: ActionKind::RoombaMotor(MotorKind::MainBrush),
                },
                QuickAction {
                    id: "roomba.clean",
                    title: "Clean",
                    icon: "sparkles",
                    kind: ActionKind::Momentary {
                        command: Command::RawBytes(vec![opcode::CLEAN]),
                    },
                },
                QuickAction {
                    id: "roomba.spot",
                    title: "Spot",
                    icon: "target",
                    kind: ActionKind::Momentary {
                        command: Command::RawBytes(vec![opcode::SPOT]),
                    },
                },
                QuickAction {
                    id: "roomba.dock",
                    title: "Dock",
                    icon: "house",
                    kind: ActionKind::Momentary {
                        command: Command::RawBytes(vec![opcode::DOCK]),
                    },
                },
            ],
            RobotProfile::Tank => vec![
                QuickAction {
                    id: "tank.headlights",
                    title: "Headlights",
                    icon: "headlights",
                    kind: ActionKind::Toggle {
                        default_on: false,
                        on: encoder::action_command("lights", "on"),
                        off: encoder::action_command("lights", "off"),
                    },
                },
                QuickAction {
                    id: "tank.turret",
                    title: "Turret",
                    icon: "scope",
                    kind: ActionKind::Momentary {
                        command: encoder::action_command("turret", "fire"),
                    },
                },
                QuickAction {
                    id: "tank.smoke",
                    title: "Smoke",
                    icon: "smoke",
                    kind: ActionKind::Toggle {
                        default_on: false,
                        on: encoder::action_command("smoke", "on"),
                        off: encoder::action_command("smoke", "off"),
                    },
                },
                QuickAction {
                    id: "tank.anchor",
                    title: "Anchor",
                    icon: "lifepreserver",
                    kind: ActionKind::Momentary {
                        command: encoder::action_command("anchor", "deploy"),
                    },
                },
            ],
        }
    }

    pub fn joystick_tip(self) -> &'static str {
        match self {
            RobotProfile::Generic => {
                "Use the joystick to stream normalized X/Y commands to your firmware."
            }
            RobotProfile::Roomba => {
                "Joystick commands are translated into Roomba velocity/radius strings."
            }
            RobotProfile::Tank => {
                "Differential drive: push forward to advance, twist to spin in place."
            }
        }
    }
}

/// Toggle group routing a preset button through the motor aggregator.
pub const ROOMBA_MOTOR_TOGGLE_GROUP: &str = "roomba.motors";

/// A stored control-surface layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerPreset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub joystick: bool,
    #[serde(default)]
    pub buttons: Vec<ActionButton>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionButton {
    pub id: String,
    pub title: String,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub is_toggle: bool,
    #[serde(default)]
    pub send_message: Option<String>,
    #[serde(default)]
    pub roomba_bytes: Option<Vec<u8>>,
    #[serde(default)]
    pub toggle_group: Option<String>,
    #[serde(default)]
    pub roomba_motor: Option<MotorKind>,
}

fn default_visible() -> bool {
    true
}

impl ControllerPreset {
    /// The built-in Roomba preset: joystick plus the motor toggle group.
    pub fn default_preset() -> Self {
        Self {
            id: "roomba.default".to_string(),
            name: "Roomba".to_string(),
            is_default: true,
            joystick: true,
            buttons: vec![
                ActionButton {
                    id: "vacuum".to_string(),
                    title: "Vacuum".to_string(),
                    is_visible: true,
                    is_toggle: true,
                    send_message: None,
                    roomba_bytes: None,
                    toggle_group: Some(ROOMBA_MOTOR_TOGGLE_GROUP.to_string()),
                    roomba_motor: Some(MotorKind::Vacuum),
                },
                ActionButton {
                    id: "side_brush".to_string(),
                    title: "Side Brush".to_string(),
                    is_visible: true,
                    is_toggle: true,
                    send_message: None,
                    roomba_bytes: None,
                    toggle_group: Some(ROOMBA_MOTOR_TOGGLE_GROUP.to_string()),
                    roomba_motor: Some(MotorKind::SideBrush),
                },
                ActionButton {
                    id: "main_brush".to_string(),
                    title: "Main Brush".to_string(),
                    is_visible: true,
                    is_toggle: true,
                    send_message: None,
                    roomba_bytes: None,
                    toggle_group: Some(ROOMBA_MOTOR_TOGGLE_GROUP.to_string()),
                    roomba_motor: Some(MotorKind::MainBrush),
                },
                ActionButton {
                    id: "dock".to_string(),
                    title: "Dock".to_string(),
                    is_visible: true,
                    is_toggle: false,
                    send_message: None,
                    roomba_bytes: Some(vec![opcode::DOCK]),
                    toggle_group: None,
                    roomba_motor: None,
                },
            ],
        }
    }
}
