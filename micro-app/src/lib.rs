#![no_std]
//! Everything between the acquisition core and the board: screen state,
//! buttons, battery model, persisted settings and frame pacing.

pub mod app;
pub mod battery;
pub mod fps;
pub mod input;
pub mod settings;
pub mod view;

pub use app::{App, Command, MenuItem, Outcome, Screen};
pub use battery::{BatterySensor, BatteryStatus};
pub use fps::{Cadence, FpsCounter};
pub use input::{Button, ButtonEvents, Buttons};
pub use settings::{Settings, SettingsError, SettingsStore};
