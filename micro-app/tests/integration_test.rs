use micro_app::{view, App, BatteryStatus, ButtonEvents, Command, Screen};
use micro_rssi::config::WATERFALL_START;
use micro_rssi::{BandScanner, HfClock, Radio, ScanConfig};
use micro_viz::{Compositor, Frame};
use rand::Rng;

/// Radio that answers every channel with one level, or never gets ready.
struct FlatRadio {
    level: u8,
    dead: bool,
    ready: bool,
}

impl Radio for FlatRadio {
    fn power_up(&mut self) {}
    fn set_frequency(&mut self, _frequency: u8) {}
    fn set_whitening_iv(&mut self, _iv: u8) {}
    fn start_receive(&mut self) {
        self.ready = !self.dead;
    }
    fn is_ready(&mut self) -> bool {
        self.ready
    }
    fn start_rssi(&mut self) {}
    fn is_rssi_done(&mut self) -> bool {
        true
    }
    fn rssi_sample(&mut self) -> u8 {
        self.level
    }
    fn disable(&mut self) {
        self.ready = false;
    }
    fn is_disabled(&mut self) -> bool {
        true
    }
}

struct Xtal;

impl HfClock for Xtal {
    fn is_running(&mut self) -> bool {
        true
    }
    fn request_start(&mut self) {}
}

fn scanner() -> BandScanner {
    BandScanner::new(ScanConfig { wait_budget: 16, ..ScanConfig::default() }).unwrap()
}

fn banner_pixels(frame: &Frame) -> usize {
    (24..104).filter(|&x| (24..30).any(|y| frame.pixel(x, y))).count()
}

#[test]
fn dead_radio_freezes_frame_under_banner() {
    let mut scanner = scanner();
    let compositor = Compositor::new(32, WATERFALL_START);
    let battery = BatteryStatus::from_raw(800, false);
    let mut radio = FlatRadio { level: 60, dead: false, ready: false };

    scanner.step(&mut radio, &mut Xtal);
    let mut good = Frame::new();
    view::render_scanner(&mut good, &compositor, &scanner, "0", &battery).unwrap();
    assert_eq!(banner_pixels(&good), 80, "strong signal fills the spectrum rows");

    radio.dead = true;
    for _ in 0..3 {
        scanner.step(&mut radio, &mut Xtal);
    }
    assert!(scanner.is_faulted());

    let mut frozen = Frame::new();
    view::render_scanner(&mut frozen, &compositor, &scanner, "0", &battery).unwrap();
    // Waterfall and lower spectrum untouched, banner drawn over the middle.
    assert_eq!(frozen.page(7), good.page(7));
    assert_eq!(frozen.page(5), good.page(5));
    assert_ne!(frozen.page(3), good.page(3));
}

#[test]
fn random_button_mashing_keeps_state_in_range() {
    let mut rng = rand::rng();
    let mut app = App::new(32, true);

    for _ in 0..2000 {
        let events = ButtonEvents {
            left: rng.random_bool(0.4),
            mid: rng.random_bool(0.2),
            right: rng.random_bool(0.4),
        };
        let out = app.handle(events);

        assert!(app.scanner_mode() < 3);
        assert!(app.selection() < app.menu_items().len());
        assert!(app.contrast() <= 63);
        for cmd in &out.commands {
            match cmd {
                Command::ApplyContrast(c) | Command::SaveContrast(c) => assert_eq!(*c, app.contrast()),
                Command::Sleep | Command::EnterBootloader => assert_eq!(app.screen(), Screen::Menu),
            }
        }
    }
}
