#![no_std]
//! Acquisition core of the handheld 2.4 GHz analyzer.
//!
//! A sweep produces one RSSI magnitude per channel (smaller means stronger),
//! the [`SignalTracker`] turns those samples into peak and floating heights,
//! and the [`Waterfall`] keeps a fixed-depth bit history per display column.
//! [`Scanner`] owns all of it and runs the three steps in order once per frame.

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod fault;
pub mod radio;
pub mod scanner;
pub mod sweep;
pub mod tracker;
pub mod waterfall;

pub use config::{ConfigError, ScanConfig};
pub use fault::{RadioStage, SweepFault};
pub use radio::{HfClock, Radio};
pub use scanner::{ScanStatus, Scanner};
pub use sweep::SweepDriver;
pub use tracker::SignalTracker;
pub use waterfall::{column_to_channel, Waterfall};

/// The scanner as built for the 88-channel band and the 128-column panel.
pub type BandScanner = Scanner<{ config::BANDWIDTH }, { config::DISPLAY_WIDTH }>;
