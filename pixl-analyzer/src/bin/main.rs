#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::{info, warn};
use defmt_rtt as _;
use embedded_hal::delay::DelayNs;
use panic_halt as _;

use micro_app::{
    app::{BOOTLOADER_MS, BOOT_SCREEN_MS, GOODBYE_MS, HOLD_STEPS, HOLD_STEP_MS},
    fps::BATTERY_REFRESH_FRAMES,
    settings, view, App, BatteryStatus, Buttons, Cadence, Command, FpsCounter, Screen,
};
use micro_rssi::{config::WATERFALL_START, BandScanner, ScanConfig};
use micro_viz::{screens, BitBangPanel, Compositor, DisplayTransport, Frame, PanelPins};
use nrf52832_hal::{
    gpio::{p0, Level, Output, Pin, PushPull},
    pac, Delay,
};

use pixl_analyzer::{
    battery::SaadcBattery,
    pins::BTN_MID,
    power::{self, Millis},
    radio::{NrfHfClock, NrfRadio},
    settings::UicrStore,
    PANEL,
};

type Panel = BitBangPanel<Pin<Output<PushPull>>>;

fn show(panel: &mut Panel, frame: &Frame) {
    let Ok(()) = panel.present(frame);
}

fn measure(sensor: &mut SaadcBattery, last: BatteryStatus) -> BatteryStatus {
    match BatteryStatus::measure(sensor) {
        Ok(status) => status,
        Err(()) => {
            warn!("battery sample failed, keeping last reading");
            last
        }
    }
}

#[entry]
fn main() -> ! {
    info!("Init!");

    let p = pac::Peripherals::take().unwrap();
    let core = pac::CorePeripherals::take().unwrap();
    let mut delay = Delay::new(core.SYST);

    let mut store = UicrStore::new(p.UICR, p.NVMC);
    let stored = settings::load(&mut store);
    let millis = Millis::start(p.TIMER0);

    let port0 = p0::Parts::new(p.P0);
    let Ok(mut buttons) = Buttons::new(
        port0.p0_05.into_pullup_input().degrade(),
        port0.p0_06.into_pullup_input().degrade(),
        port0.p0_07.into_pullup_input().degrade(),
    );

    let mut panel = BitBangPanel::new(
        PanelPins {
            scl: port0.p0_26.into_push_pull_output(Level::Low).degrade(),
            mosi: port0.p0_25.into_push_pull_output(Level::Low).degrade(),
            cs: port0.p0_27.into_push_pull_output(Level::High).degrade(),
            dc: port0.p0_28.into_push_pull_output(Level::Low).degrade(),
            rst: port0.p0_29.into_push_pull_output(Level::High).degrade(),
            backlight: port0.p0_30.into_push_pull_output(Level::Low).degrade(),
        },
        PANEL,
    );
    let Ok(()) = panel.init(&mut delay, stored.lcd_contrast);

    let mut radio = NrfRadio::new(p.RADIO);
    let mut hfclk = NrfHfClock::new(p.CLOCK);

    let mut frame = Frame::new();
    show(&mut panel, &frame);

    // Power-on gate: the mid button has to stay down through the whole bar.
    for step in 0..HOLD_STEPS {
        let Ok(held) = buttons.mid.raw();
        if !held {
            info!("released during power-on hold");
            frame.clear();
            show(&mut panel, &frame);
            let Ok(()) = panel.uninit(&mut delay);
            power::deep_sleep(&p.POWER, &mut radio, BTN_MID);
        }
        frame.clear();
        let Ok(()) = screens::hold_to_start(&mut frame, step, HOLD_STEPS);
        show(&mut panel, &frame);
        delay.delay_ms(HOLD_STEP_MS);
    }

    frame.clear();
    let Ok(()) = screens::boot_screen(&mut frame);
    show(&mut panel, &frame);
    delay.delay_ms(BOOT_SCREEN_MS);

    let mut battery_sensor = SaadcBattery::new(
        p.SAADC,
        port0.p0_02.into_floating_input(),
        port0.p0_03.into_pullup_input().degrade(),
    );
    let mut battery = measure(&mut battery_sensor, BatteryStatus::default());
    info!("battery {} mV, level {}", (battery.voltage * 1000.0) as u32, battery.level);

    let mut scanner = match BandScanner::new(ScanConfig::default()) {
        Ok(scanner) => scanner,
        Err(e) => defmt::panic!("scan config rejected: {}", defmt::Display2Format(&e)),
    };
    if let Err(fault) = scanner.init_radio(&mut radio) {
        warn!("radio init: {}", fault);
    }

    let compositor = Compositor::new(ScanConfig::default().spectrum_height, WATERFALL_START);
    let mut app = App::new(stored.lcd_contrast, PANEL.has_contrast());
    let mut fps = FpsCounter::new(millis.now());
    let mut battery_refresh = Cadence::new(BATTERY_REFRESH_FRAMES);

    info!("entering main loop");
    loop {
        if app.screen() == Screen::Scanner {
            scanner.step(&mut radio, &mut hfclk);
            if battery_refresh.tick() {
                battery = measure(&mut battery_sensor, battery);
            }

            let reading = if cfg!(feature = "fps-indicator") { Some(fps.fps()) } else { None };
            let corner = view::corner_label(&app, reading);
            let Ok(()) = view::render_scanner(&mut frame, &compositor, &scanner, &corner, &battery);
        } else {
            if app.screen() == Screen::Menu {
                battery = measure(&mut battery_sensor, battery);
            }
            let Ok(()) = view::render_page(&mut frame, &app, &battery);
        }
        show(&mut panel, &frame);

        let was_scanning = app.screen() == Screen::Scanner;
        let Ok(events) = buttons.poll(&mut delay, millis.now());
        let outcome = app.handle(events);

        for command in outcome.commands {
            match command {
                Command::ApplyContrast(level) => {
                    let Ok(()) = panel.set_contrast(level);
                }
                Command::SaveContrast(level) => {
                    let settings = settings::Settings { lcd_contrast: level };
                    if let Err(e) = settings::save(&mut store, &settings) {
                        warn!("contrast not saved: {}", defmt::Display2Format(&e));
                    }
                }
                Command::Sleep => {
                    frame.clear();
                    let Ok(()) = screens::message(&mut frame, 40, 30, "GOODBYE");
                    show(&mut panel, &frame);
                    delay.delay_ms(GOODBYE_MS);

                    frame.clear();
                    show(&mut panel, &frame);
                    let Ok(()) = panel.uninit(&mut delay);
                    power::deep_sleep(&p.POWER, &mut radio, BTN_MID);
                }
                Command::EnterBootloader => {
                    frame.clear();
                    let Ok(()) = screens::message(&mut frame, 35, 30, "BOOTLOADER");
                    show(&mut panel, &frame);
                    delay.delay_ms(BOOTLOADER_MS);
                    power::enter_bootloader(&p.POWER);
                }
            }
        }

        if was_scanning && cfg!(feature = "fps-indicator") {
            fps.tick(millis.now());
        }
        if outcome.pause_ms > 0 {
            delay.delay_ms(outcome.pause_ms);
        }
    }
}
