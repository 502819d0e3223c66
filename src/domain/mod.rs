pub mod encoder;
pub mod joystick;
pub mod models;
pub mod motors;
pub mod profile;
pub mod settings;
