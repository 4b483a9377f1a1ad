use defmt::{info, warn};
use micro_rssi::{Radio, ScanConfig, SweepDriver};
use nrf52832_hal::pac::{P0, POWER, TIMER0};

/// Magic value the bootloader checks in GPREGRET to stay in DFU mode.
pub const BOOTLOADER_DFU_START: u8 = 0xB1;

/// Free-running 1 MHz timer read as milliseconds since boot.
pub struct Millis {
    timer: TIMER0,
}

impl Millis {
    pub fn start(timer: TIMER0) -> Self {
        timer.tasks_stop.write(|w| unsafe { w.bits(1) });
        timer.mode.write(|w| w.mode().timer());
        timer.bitmode.write(|w| w.bitmode()._32bit());
        timer.prescaler.write(|w| unsafe { w.prescaler().bits(4) });
        timer.tasks_clear.write(|w| unsafe { w.bits(1) });
        timer.tasks_start.write(|w| unsafe { w.bits(1) });
        Self { timer }
    }

    pub fn now(&self) -> u32 {
        self.timer.tasks_capture[0].write(|w| unsafe { w.bits(1) });
        self.timer.cc[0].read().bits() / 1000
    }
}

/// Radio off, wake on the mid button, then System OFF. Never returns;
/// waking is a reset.
pub fn deep_sleep<R: Radio>(power: &POWER, radio: &mut R, wake_pin: usize) -> ! {
    info!("entering system off");

    if let Err(fault) = SweepDriver::new(&ScanConfig::default()).shutdown_radio(radio) {
        warn!("{}, sleeping anyway", fault);
    }

    // SAFETY: only the wake pin's configuration is rewritten, and nothing
    // runs after this function.
    let p0 = unsafe { &*P0::ptr() };
    p0.pin_cnf[wake_pin].write(|w| w.dir().input().input().connect().pull().pullup().sense().low());

    power.systemoff.write(|w| w.systemoff().enter());
    loop {
        cortex_m::asm::wfe();
    }
}

/// Leaves a note for the bootloader and resets into it.
pub fn enter_bootloader(power: &POWER) -> ! {
    info!("resetting into DFU");
    power.gpregret.write(|w| unsafe { w.gpregret().bits(BOOTLOADER_DFU_START) });
    cortex_m::peripheral::SCB::sys_reset()
}
