//! Main menu - tagged action dispatch over a scrolling list

use bios_api::input::scancode;
use bios_api::{Attribute, ClockReading, Display, KeyEvent, PowerMode};

use super::widgets;
use crate::clock::{format_date, format_time};
use crate::settings::Configuration;

/// Rows of the list visible at once
pub const VISIBLE_ROWS: usize = 5;

const LIST_X: u8 = 1;
const LIST_Y: u8 = 2;
const PANEL_X: u8 = 20;
const TEXT_X: u8 = 22;
const FOOTER: &str = "(C) 2025 WexIB - Press ESC to reboot";

/// Main menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Boot,
    HardwareTest,
    Settings,
    Security,
    Information,
    UsbBoot,
}

impl MenuAction {
    pub const ALL: [MenuAction; 6] = [
        MenuAction::Boot,
        MenuAction::HardwareTest,
        MenuAction::Settings,
        MenuAction::Security,
        MenuAction::Information,
        MenuAction::UsbBoot,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Boot => "\u{4} Boot",
            MenuAction::HardwareTest => "\u{4} Hardware Test",
            MenuAction::Settings => "\u{4} Settings",
            MenuAction::Security => "\u{4} Security",
            MenuAction::Information => "\u{4} Information",
            MenuAction::UsbBoot => "\u{4} USB Boot",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MenuAction::Boot => "BOOT MANAGER",
            MenuAction::HardwareTest => "HARDWARE TEST UTILITY",
            MenuAction::Settings => "BIOS SETTINGS",
            MenuAction::Security => "SECURITY SETTINGS",
            MenuAction::Information => "BIOS CONFIGURATION",
            MenuAction::UsbBoot => "USB BOOT",
        }
    }

    /// Static description lines `(row, text)` and the Enter hint row
    fn description(self) -> (&'static [(u8, &'static str)], Option<(u8, &'static str)>) {
        match self {
            MenuAction::Boot => (
                &[
                    (3, "Boot from Hard Disk"),
                    (5, "Will load first sector (512 bytes)"),
                    (6, "and transfer control to it"),
                ],
                Some((8, "Press Enter to boot")),
            ),
            MenuAction::HardwareTest => (
                &[
                    (3, "Run hardware diagnostics"),
                    (5, "Tests: CPU, Memory, Video, Keyboard, Disk, CMOS"),
                    (6, "Shows error if 2+ components fail"),
                ],
                Some((8, "Press Enter to start test")),
            ),
            MenuAction::Settings => (
                &[
                    (3, "BIOS Configuration"),
                    (5, "Boot Priority, Power Management"),
                    (6, "Load Defaults, Save Settings"),
                ],
                Some((8, "Press Enter to configure")),
            ),
            MenuAction::Security => (&[], Some((8, "Press Enter to configure"))),
            MenuAction::Information => (&[], None),
            MenuAction::UsbBoot => (
                &[
                    (3, "BOOT FROM USB DEVICE"),
                    (5, "Attempt to boot from USB storage"),
                    (6, "Supports USB flash drives"),
                    (7, "and external USB hard disks"),
                ],
                Some((9, "Press Enter to boot from USB")),
            ),
        }
    }
}

/// What the caller should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    None,
    Redraw,
    Invoke(MenuAction),
    /// Esc: warm restart
    Restart,
}

/// Live values shown on the right panel
#[derive(Debug, Clone, Copy)]
pub struct SystemStatus<'a> {
    pub config: &'a Configuration,
    pub power: PowerMode,
    pub checksum_valid: bool,
    pub clock: ClockReading,
}

/// Cursor state of the main menu.
#[derive(Debug, Clone, Default)]
pub struct MainMenu {
    selected: usize,
    offset: usize,
    last_key: Option<u8>,
}

impl MainMenu {
    pub const fn new() -> Self {
        Self {
            selected: 0,
            offset: 0,
            last_key: None,
        }
    }

    pub fn selected(&self) -> MenuAction {
        MenuAction::ALL[self.selected]
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// First visible entry
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Forget the held key, e.g. after a screen consumed its release.
    pub fn reset_repeat(&mut self) {
        self.last_key = None;
    }

    /// Apply one raw scancode. A make code equal to the last one is ignored
    /// until any break code arrives.
    pub fn handle_key(&mut self, raw: u8) -> MenuCommand {
        let code = match KeyEvent::decode(raw) {
            KeyEvent::Break(_) => {
                self.last_key = None;
                return MenuCommand::None;
            }
            KeyEvent::Make(code) if self.last_key == Some(code) => return MenuCommand::None,
            KeyEvent::Make(code) => code,
        };
        self.last_key = Some(code);

        match code {
            scancode::UP if self.selected > 0 => {
                self.selected -= 1;
                if self.selected < self.offset {
                    self.offset = self.selected;
                }
                MenuCommand::Redraw
            }
            scancode::DOWN if self.selected + 1 < MenuAction::ALL.len() => {
                self.selected += 1;
                if self.selected >= self.offset + VISIBLE_ROWS {
                    self.offset = self.selected + 1 - VISIBLE_ROWS;
                }
                MenuCommand::Redraw
            }
            scancode::ENTER => MenuCommand::Invoke(self.selected()),
            scancode::ESC => MenuCommand::Restart,
            _ => MenuCommand::None,
        }
    }

    /// Full interface: list panel, detail panel and footer.
    pub fn draw<D: Display + ?Sized>(&self, display: &mut D, status: &SystemStatus<'_>) {
        display.fill(b' ', 0, 0, PANEL_X, 24, Attribute::PANEL);
        display.fill(b' ', PANEL_X, 0, 80 - PANEL_X, 24, Attribute::BRIGHT);
        display.fill(b' ', 0, 24, 80, 1, Attribute::PANEL);

        display.draw("  BIOS Menu", LIST_X, 0, Attribute::PANEL);
        let visible = MenuAction::ALL
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(VISIBLE_ROWS);
        for (row, (index, action)) in visible.enumerate() {
            let attr = if index == self.selected {
                Attribute::SELECTED
            } else {
                Attribute::PANEL
            };
            display.draw(action.label(), LIST_X, LIST_Y + row as u8, attr);
        }

        self.draw_panel(display, status);
        display.draw(FOOTER, 0, 24, Attribute::PANEL);
    }

    fn draw_panel<D: Display + ?Sized>(&self, display: &mut D, status: &SystemStatus<'_>) {
        let action = self.selected();
        display.draw(action.title(), TEXT_X, 1, Attribute::BRIGHT);

        let (lines, hint) = action.description();
        for &(row, text) in lines {
            display.draw(text, TEXT_X, row, Attribute::BRIGHT);
        }

        match action {
            MenuAction::Security => {
                let config = status.config;
                display.draw("Password Protection", TEXT_X, 3, Attribute::DANGER);
                display.draw(
                    if config.security_enabled { "Status: ENABLED" } else { "Status: DISABLED" },
                    TEXT_X,
                    5,
                    Attribute::BRIGHT,
                );
                display.draw(
                    if config.password.is_empty() { "Password: NOT SET" } else { "Password: SET" },
                    TEXT_X,
                    6,
                    Attribute::BRIGHT,
                );
            }
            MenuAction::Information => draw_information(display, status),
            _ => {}
        }

        if let Some((row, text)) = hint {
            display.draw(text, TEXT_X, row, Attribute::PROMPT);
        }
    }
}

fn draw_information<D: Display + ?Sized>(display: &mut D, status: &SystemStatus<'_>) {
    let config = status.config;
    display.draw("Power Mode: ", TEXT_X, 4, Attribute::BRIGHT);
    display.draw(status.power.name(), TEXT_X + 12, 4, power_attr(status.power));
    display.draw("BIOS: WexIB v", TEXT_X, 6, Attribute::BRIGHT);
    display.draw(crate::VERSION, TEXT_X + 13, 6, Attribute::BRIGHT);

    display.draw("Security: ", TEXT_X, 9, Attribute::BRIGHT);
    display.draw(
        if config.security_enabled { "ENABLED" } else { "DISABLED" },
        TEXT_X + 11,
        9,
        Attribute::BRIGHT,
    );
    display.draw("Boot Order: ", TEXT_X, 10, Attribute::BRIGHT);
    display.draw(config.first_boot_device().name(), TEXT_X + 12, 10, Attribute::BRIGHT);
    display.draw("Hardware Errors: ", TEXT_X, 11, Attribute::BRIGHT);
    display.draw_char(widgets::digit(config.hw_error_count), TEXT_X + 17, 11, Attribute::BRIGHT);

    display.draw("CMOS Checksum: ", TEXT_X, 13, Attribute::BRIGHT);
    if status.checksum_valid {
        display.draw("VALID", TEXT_X + 15, 13, Attribute::SUCCESS);
    } else {
        display.draw("INVALID", TEXT_X + 15, 13, Attribute::ERROR);
    }
    display.draw("RTC:", TEXT_X, 14, Attribute::BRIGHT);
    display.draw("Active", TEXT_X + 5, 14, Attribute::SUCCESS);

    draw_clock(display, &status.clock);
}

/// Time and date in the lower right corner.
pub fn draw_clock<D: Display + ?Sized>(display: &mut D, reading: &ClockReading) {
    display.draw("Time: ", 59, 22, Attribute::BRIGHT);
    display.draw(&format_time(reading), 65, 22, Attribute::BRIGHT);
    display.draw("Date: ", 59, 23, Attribute::BRIGHT);
    display.draw(&format_date(reading), 65, 23, Attribute::BRIGHT);
}

/// Color coding of a power mode name
pub fn power_attr(mode: PowerMode) -> Attribute {
    match mode {
        PowerMode::MaxPerformance => Attribute::WARNING,
        PowerMode::Balanced => Attribute::SUCCESS,
        PowerMode::PowerSaving => Attribute::INFO,
        PowerMode::MinPower => Attribute::ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bios_api::sim::RecordingDisplay;

    fn press(menu: &mut MainMenu, code: u8) -> MenuCommand {
        let command = menu.handle_key(code);
        menu.handle_key(code | scancode::BREAK_BIT);
        command
    }

    #[test]
    fn test_navigation_bounds() {
        let mut menu = MainMenu::new();
        assert_eq!(press(&mut menu, scancode::UP), MenuCommand::None);
        for _ in 0..10 {
            press(&mut menu, scancode::DOWN);
        }
        assert_eq!(menu.selected(), MenuAction::UsbBoot);
        assert_eq!(press(&mut menu, scancode::DOWN), MenuCommand::None);
    }

    #[test]
    fn test_window_scrolls() {
        let mut menu = MainMenu::new();
        for _ in 0..4 {
            press(&mut menu, scancode::DOWN);
        }
        assert_eq!(menu.offset(), 0);
        press(&mut menu, scancode::DOWN);
        assert_eq!(menu.selected_index(), 5);
        assert_eq!(menu.offset(), 1);
        for _ in 0..5 {
            press(&mut menu, scancode::UP);
        }
        assert_eq!(menu.selected_index(), 0);
        assert_eq!(menu.offset(), 0);
    }

    #[test]
    fn test_held_key_ignored_until_release() {
        let mut menu = MainMenu::new();
        assert_eq!(menu.handle_key(scancode::DOWN), MenuCommand::Redraw);
        assert_eq!(menu.handle_key(scancode::DOWN), MenuCommand::None);
        assert_eq!(menu.selected_index(), 1);
        // Any break code releases, not only the held key's
        menu.handle_key(scancode::ENTER | scancode::BREAK_BIT);
        assert_eq!(menu.handle_key(scancode::DOWN), MenuCommand::Redraw);
        assert_eq!(menu.selected_index(), 2);
    }

    #[test]
    fn test_enter_and_escape() {
        let mut menu = MainMenu::new();
        press(&mut menu, scancode::DOWN);
        press(&mut menu, scancode::DOWN);
        assert_eq!(
            press(&mut menu, scancode::ENTER),
            MenuCommand::Invoke(MenuAction::Settings)
        );
        assert_eq!(press(&mut menu, scancode::ESC), MenuCommand::Restart);
    }

    #[test]
    fn test_draw_interface() {
        let config = Configuration::default();
        let status = SystemStatus {
            config: &config,
            power: PowerMode::Balanced,
            checksum_valid: true,
            clock: ClockReading::default(),
        };
        let mut display = RecordingDisplay::new();
        let mut menu = MainMenu::new();
        menu.draw(&mut display, &status);
        assert_eq!(display.attr_at(1, 2), Attribute::SELECTED);
        assert_eq!(display.attr_at(1, 3), Attribute::PANEL);
        assert!(display.contains("BOOT MANAGER"));
        assert_eq!(display.row(24), FOOTER);

        for _ in 0..4 {
            press(&mut menu, scancode::DOWN);
        }
        menu.draw(&mut display, &status);
        assert!(display.contains("BIOS CONFIGURATION"));
        assert!(display.contains("VALID"));
        assert!(display.contains("Hard Disk"));
        assert!(display.row(22).ends_with("Time: 00:00:00"));
    }
}
