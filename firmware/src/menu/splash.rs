//! Splash screen and the boot selection menu it can open

use bios_api::{Attribute, Display, Keyboard};

use super::hotkey::HotkeyDetector;
use super::widgets::{self, Frame, ListCursor, ListInput};
use crate::config::FirmwareConfig;
use crate::utils::keys::next_make;

const LOGO: Frame = Frame::new(20, 3, 40, 8);
const BAR_Y: u8 = 15;
const BAR_START: u8 = 26;
const BAR_END: u8 = 55;

/// Show the splash for its configured duration.
///
/// Returns `true` as soon as `B` and `T` are held together.
pub fn splash<D, K>(display: &mut D, keyboard: &mut K, config: &FirmwareConfig) -> bool
where
    D: Display + ?Sized,
    K: Keyboard + ?Sized,
{
    display.clear(Attribute::BLANK);
    widgets::draw_frame(display, LOGO, Attribute::SELECTED);
    display.draw("W e x I B", LOGO.x + 15, LOGO.y + 3, Attribute::SELECTED);
    display.draw("Basic Input/Output System", LOGO.x + 7, LOGO.y + 5, Attribute::SELECTED);
    display.draw("WexIB ", 31, 12, Attribute::PROMPT);
    display.draw(crate::VERSION, 37, 12, Attribute::PROMPT);
    display.draw("Press B+T simultaneously for boot menu", 18, 20, Attribute::SELECTED);
    display.draw("[", BAR_START - 1, BAR_Y, Attribute::SELECTED);
    display.draw("]", BAR_END, BAR_Y, Attribute::SELECTED);

    let mut hotkey = HotkeyDetector::new();
    for tick in 0..config.splash_ticks {
        for _ in 0..config.splash_polls_per_tick {
            if let Some(raw) = keyboard.poll_key() {
                if hotkey.feed(raw) {
                    log::info!("splash: boot menu hotkey");
                    return true;
                }
            }
        }
        let x = BAR_START + tick.min(u32::from(BAR_END - BAR_START - 1)) as u8;
        display.draw("=", x, BAR_Y, Attribute::SELECTED);
    }
    false
}

/// Entries of the boot selection menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootChoice {
    HardDisk,
    Usb,
    Setup,
    Continue,
}

impl BootChoice {
    pub const ALL: [BootChoice; 4] = [
        BootChoice::HardDisk,
        BootChoice::Usb,
        BootChoice::Setup,
        BootChoice::Continue,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BootChoice::HardDisk => "Hard Disk (HDD 0)",
            BootChoice::Usb => "USB Device",
            BootChoice::Setup => "BIOS Setup",
            BootChoice::Continue => "Continue Normal Boot",
        }
    }
}

/// Let the user pick a boot device. Esc means `Continue`.
pub fn boot_selection<D, K>(display: &mut D, keyboard: &mut K) -> BootChoice
where
    D: Display + ?Sized,
    K: Keyboard + ?Sized,
{
    display.clear(Attribute::NORMAL);
    widgets::draw_title(display, "BOOT SELECTION MENU", 30, 1);
    display.draw("Select boot device:", 25, 4, Attribute::NORMAL);
    display.draw("ENTER: Select  ESC: Cancel", 25, 20, Attribute::NORMAL);

    let labels = BootChoice::ALL.map(BootChoice::label);
    let mut cursor = ListCursor::new(labels.len());
    loop {
        widgets::draw_list(display, &labels, cursor.selected(), 25, 6);
        match cursor.handle(next_make(keyboard)) {
            ListInput::Chosen(index) => return BootChoice::ALL[index],
            ListInput::Back => return BootChoice::Continue,
            _ => {}
        }
    }
}
