use micro_app::SettingsStore;
use nrf52832_hal::pac::{NVMC, UICR};

/// The UICR CUSTOMER words as a settings log.
pub struct UicrStore {
    uicr: UICR,
    nvmc: NVMC,
}

impl UicrStore {
    pub fn new(uicr: UICR, nvmc: NVMC) -> Self {
        Self { uicr, nvmc }
    }

    fn wait_ready(&self) {
        while self.nvmc.ready.read().ready().is_busy() {}
    }
}

impl SettingsStore for UicrStore {
    type Error = core::convert::Infallible;

    fn slots(&self) -> usize {
        self.uicr.customer.len()
    }

    fn read(&mut self, slot: usize) -> u32 {
        self.uicr.customer[slot].read().bits()
    }

    fn program(&mut self, slot: usize, word: u32) -> Result<(), Self::Error> {
        self.nvmc.config.write(|w| w.wen().wen());
        self.wait_ready();
        self.uicr.customer[slot].write(|w| unsafe { w.bits(word) });
        self.wait_ready();
        self.nvmc.config.write(|w| w.wen().ren());
        self.wait_ready();
        Ok(())
    }
}
