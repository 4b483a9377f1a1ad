#[cfg(feature = "logging")]
use defmt::debug;

use heapless::Vec;

use crate::input::ButtonEvents;
use crate::settings::MAX_CONTRAST;

pub const SCANNER_MODES: u8 = 3;
/// Settle time after a menu frame or a screen change.
pub const MENU_PACING_MS: u32 = 150;
pub const HOLD_STEPS: u32 = 20;
pub const HOLD_STEP_MS: u32 = 50;
pub const BOOT_SCREEN_MS: u32 = 1500;
pub const GOODBYE_MS: u32 = 800;
pub const BOOTLOADER_MS: u32 = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum Screen {
    Scanner,
    Menu,
    Info,
    Contrast,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum MenuItem {
    Back,
    About,
    Sleep,
    Dfu,
    LcdContrast,
}

impl MenuItem {
    pub const fn label(self) -> &'static str {
        match self {
            MenuItem::Back => "Back",
            MenuItem::About => "About",
            MenuItem::Sleep => "Sleep",
            MenuItem::Dfu => "DFU mode",
            MenuItem::LcdContrast => "LCD Contrast",
        }
    }
}

static MENU_ITEMS: [MenuItem; 5] = [
    MenuItem::Back,
    MenuItem::About,
    MenuItem::Sleep,
    MenuItem::Dfu,
    MenuItem::LcdContrast,
];

/// Side effects the hardware loop must carry out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum Command {
    /// Push a new contrast to the panel without persisting it.
    ApplyContrast(u8),
    SaveContrast(u8),
    Sleep,
    EnterBootloader,
}

/// What one input poll produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub commands: Vec<Command, 2>,
    pub pause_ms: u32,
}

impl Outcome {
    fn push(&mut self, command: Command) {
        // At most one apply and one save per poll.
        let _ = self.commands.push(command);
    }
}

/// Screen navigation and the values the screens edit.
pub struct App {
    screen: Screen,
    selection: usize,
    scanner_mode: u8,
    contrast: u8,
    saved_contrast: u8,
    has_contrast: bool,
}

impl App {
    pub fn new(contrast: u8, has_contrast: bool) -> Self {
        let contrast = contrast.min(MAX_CONTRAST);
        Self {
            screen: Screen::Scanner,
            selection: 0,
            scanner_mode: 0,
            contrast,
            saved_contrast: contrast,
            has_contrast,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn scanner_mode(&self) -> u8 {
        self.scanner_mode
    }

    pub fn contrast(&self) -> u8 {
        self.contrast
    }

    /// Panels without software contrast get no contrast entry.
    pub fn menu_items(&self) -> &'static [MenuItem] {
        if self.has_contrast {
            &MENU_ITEMS
        } else {
            &MENU_ITEMS[..4]
        }
    }

    pub fn menu_labels(&self) -> Vec<&'static str, 5> {
        self.menu_items().iter().map(|item| item.label()).collect()
    }

    pub fn handle(&mut self, events: ButtonEvents) -> Outcome {
        let mut out = Outcome::default();
        #[cfg(feature = "logging")]
        let before = self.screen;

        match self.screen {
            Screen::Scanner => self.on_scanner(events),
            Screen::Menu => self.on_menu(events, &mut out),
            Screen::Info => {
                if events.any() {
                    self.screen = Screen::Menu;
                    out.pause_ms = MENU_PACING_MS;
                }
            }
            Screen::Contrast => self.on_contrast(events, &mut out),
        }

        #[cfg(feature = "logging")]
        if before != self.screen {
            debug!("screen {} -> {}", before, self.screen);
        }
        out
    }

    fn on_scanner(&mut self, events: ButtonEvents) {
        if events.mid {
            self.screen = Screen::Menu;
            self.selection = 0;
        }
        if events.left {
            self.scanner_mode = self.scanner_mode.checked_sub(1).unwrap_or(SCANNER_MODES - 1);
        }
        if events.right {
            self.scanner_mode = (self.scanner_mode + 1) % SCANNER_MODES;
        }
    }

    fn on_menu(&mut self, events: ButtonEvents, out: &mut Outcome) {
        let items = self.menu_items().len();
        if events.left {
            self.selection = self.selection.checked_sub(1).unwrap_or(items - 1);
        }
        if events.right {
            self.selection = (self.selection + 1) % items;
        }

        if events.mid {
            match self.menu_items()[self.selection] {
                MenuItem::Back => self.screen = Screen::Scanner,
                MenuItem::About => self.screen = Screen::Info,
                MenuItem::Sleep => out.push(Command::Sleep),
                MenuItem::Dfu => out.push(Command::EnterBootloader),
                MenuItem::LcdContrast => self.screen = Screen::Contrast,
            }
        }
        out.pause_ms = MENU_PACING_MS;
    }

    fn on_contrast(&mut self, events: ButtonEvents, out: &mut Outcome) {
        if events.left {
            self.contrast = self.contrast.saturating_sub(1);
        }
        if events.right {
            self.contrast = (self.contrast + 1).min(MAX_CONTRAST);
        }
        if events.left || events.right {
            out.push(Command::ApplyContrast(self.contrast));
        }

        if events.mid {
            self.screen = Screen::Menu;
            if self.contrast != self.saved_contrast {
                self.saved_contrast = self.contrast;
                out.push(Command::SaveContrast(self.contrast));
            }
            out.pause_ms = MENU_PACING_MS;
        }
    }
}
