#![no_std]
//! Drawing side of the analyzer: the packed monochrome frame, the spectrum
//! and waterfall compositor, text screens and the bit-banged panel link.

pub mod compositor;
pub mod frame;
pub mod panel;
pub mod screens;

pub use compositor::{Compositor, SpectrumView};
pub use frame::{Frame, FRAME_BYTES, FRAME_HEIGHT, FRAME_WIDTH};
pub use panel::{BitBangPanel, DisplayTransport, PanelKind, PanelPins};
pub use screens::{BatteryIndicator, ScannerOverlay};
