//! Desktop preview of the analyzer screens. A synthetic radio stands in for
//! the chip; arrow keys are left/right and Enter is the mid button.

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use embedded_graphics_simulator::{
    sdl2::Keycode, BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent,
    Window,
};
use micro_app::{view, App, BatteryStatus, ButtonEvents, Command, FpsCounter, Screen};
use micro_rssi::{BandScanner, HfClock, Radio, ScanConfig};
use micro_viz::{Compositor, Frame, FRAME_HEIGHT, FRAME_WIDTH};
use rand::Rng;
use std::{
    f32::consts::PI,
    thread,
    time::{Duration, Instant},
};

pub const FRAME_DELAY_MS: u64 = 16;

/// Noise floor plus three Wi-Fi networks and a hopping narrowband source.
struct SyntheticRadio {
    rng: rand::rngs::ThreadRng,
    channel: u8,
    frame: u32,
    ready: bool,
    rssi_done: bool,
}

impl SyntheticRadio {
    fn new() -> Self {
        Self { rng: rand::rng(), channel: 0, frame: 0, ready: false, rssi_done: false }
    }

    fn level(&mut self) -> u8 {
        let ch = self.channel as f32;
        let t = self.frame as f32 * 0.05;
        let mut level = 92.0 + self.rng.random_range(-3.0..3.0);

        // 20 MHz wide Wi-Fi lobes, each with its own traffic pattern.
        for (center, strength, rate) in [(12.0, 40.0, 1.3), (37.0, 30.0, 0.7), (62.0, 35.0, 2.1)] {
            let d = (ch - center) / 10.0;
            if d.abs() < 1.0 {
                let busy = ((t * rate).sin() * 0.5 + 0.5).powi(2);
                level -= strength * busy * (d * PI / 2.0).cos();
            }
        }

        let hop = (self.frame / 4 * 37 % 79) as u8;
        if self.channel == hop {
            level -= 45.0;
        }
        level.clamp(20.0, 127.0) as u8
    }
}

impl Radio for SyntheticRadio {
    fn power_up(&mut self) {}

    fn set_frequency(&mut self, frequency: u8) {
        if frequency < self.channel {
            self.frame += 1;
        }
        self.channel = frequency;
    }

    fn set_whitening_iv(&mut self, _iv: u8) {}

    fn start_receive(&mut self) {
        self.ready = true;
    }

    fn is_ready(&mut self) -> bool {
        self.ready
    }

    fn start_rssi(&mut self) {
        self.rssi_done = true;
    }

    fn is_rssi_done(&mut self) -> bool {
        self.rssi_done
    }

    fn rssi_sample(&mut self) -> u8 {
        self.level()
    }

    fn disable(&mut self) {
        self.ready = false;
        self.rssi_done = false;
    }

    fn is_disabled(&mut self) -> bool {
        !self.ready
    }
}

struct AlwaysOn;

impl HfClock for AlwaysOn {
    fn is_running(&mut self) -> bool {
        true
    }

    fn request_start(&mut self) {}
}

fn main() -> Result<(), std::convert::Infallible> {
    let mut display: SimulatorDisplay<BinaryColor> =
        SimulatorDisplay::new(Size::new(FRAME_WIDTH as u32, FRAME_HEIGHT as u32));
    let mut window = Window::new(
        "Pixl Analyzer Simulator",
        &OutputSettingsBuilder::new()
            .theme(BinaryColorTheme::LcdBlue)
            .scale(4)
            .build(),
    );

    let mut radio = SyntheticRadio::new();
    let mut scanner = match BandScanner::new(ScanConfig::default()) {
        Ok(scanner) => scanner,
        Err(e) => panic!("default scan config rejected: {e}"),
    };
    let compositor = Compositor::from_config(scanner.config());
    let mut app = App::new(32, true);
    let battery = BatteryStatus::from_raw(790, false);
    let mut frame = Frame::new();

    let start = Instant::now();
    let millis = || start.elapsed().as_millis() as u32;
    let mut fps = FpsCounter::new(millis());

    'running: loop {
        if app.screen() == Screen::Scanner {
            scanner.step(&mut radio, &mut AlwaysOn);
            let corner = view::corner_label(&app, Some(fps.fps()));
            view::render_scanner(&mut frame, &compositor, &scanner, &corner, &battery)?;
            fps.tick(millis());
        } else {
            view::render_page(&mut frame, &app, &battery)?;
        }

        display.clear(BinaryColor::Off)?;
        display.draw_iter(frame.lit_pixels())?;
        window.update(&display);

        let mut events = ButtonEvents::default();
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Left => events.left = true,
                    Keycode::Right => events.right = true,
                    Keycode::Return | Keycode::Space => events.mid = true,
                    _ => {}
                },
                _ => {}
            }
        }

        let outcome = app.handle(events);
        for command in outcome.commands {
            match command {
                Command::Sleep | Command::EnterBootloader => {
                    println!("{command:?}: closing simulator");
                    break 'running;
                }
                Command::ApplyContrast(level) | Command::SaveContrast(level) => {
                    println!("{command:?} (contrast {level})");
                }
            }
        }

        thread::sleep(Duration::from_millis(FRAME_DELAY_MS + outcome.pause_ms as u64));
    }

    Ok(())
}
