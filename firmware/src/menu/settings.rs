//! Settings screens - boot priority, power management, defaults
//!
//! The settings screen edits a draft of the configuration. Only "Save & Exit"
//! and a confirmed boot-priority edit write the record; leaving any other way
//! discards the draft. Power mode changes are written as soon as they are made
//! because the power byte lives outside the checksummed record.

use bios_api::input::{self, scancode};
use bios_api::{Attribute, DeviceKind, Display, Keyboard, PowerMode, RegisterPort};

use super::main_menu::power_attr;
use super::widgets::{self, ListCursor, ListInput};
use crate::settings::{Configuration, SettingsStore};
use crate::utils::keys::{next_make, wait_any_key};

/// Entries of the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    BootPriority,
    PowerManagement,
    LoadDefaults,
    SaveAndExit,
    ExitWithoutSave,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 5] = [
        SettingsItem::BootPriority,
        SettingsItem::PowerManagement,
        SettingsItem::LoadDefaults,
        SettingsItem::SaveAndExit,
        SettingsItem::ExitWithoutSave,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsItem::BootPriority => "Boot Priority",
            SettingsItem::PowerManagement => "Power Management",
            SettingsItem::LoadDefaults => "Load Defaults",
            SettingsItem::SaveAndExit => "Save & Exit",
            SettingsItem::ExitWithoutSave => "Exit Without Save",
        }
    }
}

pub fn settings_screen<P, D, K>(
    display: &mut D,
    keyboard: &mut K,
    store: &mut SettingsStore<P>,
    config: &mut Configuration,
    power: &mut PowerMode,
) where
    P: RegisterPort,
    D: Display + ?Sized,
    K: Keyboard + ?Sized,
{
    let mut draft = config.clone();
    let labels = SettingsItem::ALL.map(SettingsItem::label);
    let mut cursor = ListCursor::new(labels.len());
    draw_settings_frame(display, *power);

    loop {
        widgets::draw_list(display, &labels, cursor.selected(), 25, 6);
        let item = match cursor.handle(next_make(keyboard)) {
            ListInput::Chosen(index) => SettingsItem::ALL[index],
            ListInput::Back => return,
            _ => continue,
        };

        match item {
            SettingsItem::BootPriority => {
                if boot_priority_screen(display, keyboard, store, &mut draft) {
                    *config = draft.clone();
                }
            }
            SettingsItem::PowerManagement => power_screen(display, keyboard, store, power),
            SettingsItem::LoadDefaults => {
                draft.boot_order = Configuration::DEFAULT_BOOT_ORDER;
                *power = PowerMode::Balanced;
                store.save_power_mode(*power);
                display.draw("Defaults loaded! Press any key...", 30, 15, Attribute::NORMAL);
                wait_any_key(keyboard);
            }
            SettingsItem::SaveAndExit => {
                *config = draft;
                store.save(config);
                store.save_power_mode(*power);
                return;
            }
            SettingsItem::ExitWithoutSave => return,
        }
        draw_settings_frame(display, *power);
    }
}

fn draw_settings_frame<D: Display + ?Sized>(display: &mut D, power: PowerMode) {
    display.clear(Attribute::NORMAL);
    widgets::draw_title(display, "BIOS SETTINGS", 35, 1);
    display.draw("Current Power Mode: ", 25, 4, Attribute::BRIGHT);
    display.draw(power.name(), 46, 4, power_attr(power));
    display.draw(
        "Use UP/DOWN to navigate, ENTER to select, ESC to return",
        15,
        20,
        Attribute::NORMAL,
    );
}

/// What a key did in the boot priority editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityCommand {
    None,
    Save,
    Cancel,
}

/// Cursor over the three priority slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootPriorityEditor {
    order: [DeviceKind; 3],
    selected: usize,
}

impl BootPriorityEditor {
    pub fn new(order: [DeviceKind; 3]) -> Self {
        Self { order, selected: 0 }
    }

    pub fn order(&self) -> [DeviceKind; 3] {
        self.order
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// `+`/`=` and `-`/`_` step the selected slot, saturating at both ends.
    pub fn handle_key(&mut self, make_code: u8) -> PriorityCommand {
        match make_code {
            scancode::UP => self.selected = self.selected.saturating_sub(1),
            scancode::DOWN => self.selected = (self.selected + 1).min(self.order.len() - 1),
            scancode::ENTER => return PriorityCommand::Save,
            scancode::ESC => return PriorityCommand::Cancel,
            code => {
                let slot = &mut self.order[self.selected];
                match input::to_ascii(code) {
                    Some(b'+' | b'=') => *slot = slot.next(),
                    Some(b'-' | b'_') => *slot = slot.previous(),
                    _ => {}
                }
            }
        }
        PriorityCommand::None
    }
}

const SLOT_LABELS: [&str; 3] = ["1st Boot Device: ", "2nd Boot Device: ", "3rd Boot Device: "];

/// Edit the priority slots of `draft`; on Enter the draft is saved.
///
/// Returns whether the record was written.
pub fn boot_priority_screen<P, D, K>(
    display: &mut D,
    keyboard: &mut K,
    store: &mut SettingsStore<P>,
    draft: &mut Configuration,
) -> bool
where
    P: RegisterPort,
    D: Display + ?Sized,
    K: Keyboard + ?Sized,
{
    display.clear(Attribute::NORMAL);
    widgets::draw_title(display, "BOOT PRIORITY SETTINGS", 30, 1);
    display.draw("Set the boot order (1st, 2nd, 3rd):", 25, 4, Attribute::NORMAL);
    display.draw(
        "Use +/- to change, ENTER to save, ESC to cancel",
        20,
        18,
        Attribute::NORMAL,
    );

    let mut editor = BootPriorityEditor::new(draft.boot_order);
    loop {
        for (slot, (label, device)) in SLOT_LABELS.iter().zip(editor.order()).enumerate() {
            let y = 7 + slot as u8 * 2;
            display.draw(label, 25, y, Attribute::NORMAL);
            display.fill(b' ', 40, y, 2, 1, Attribute::NORMAL);
            display.fill(b' ', 42, y, 12, 1, Attribute::NORMAL);
            display.draw(device.name(), 42, y, Attribute::BRIGHT);
        }
        display.draw(">", 40, 7 + editor.selected() as u8 * 2, Attribute::SELECTED);

        match editor.handle_key(next_make(keyboard)) {
            PriorityCommand::None => {}
            PriorityCommand::Cancel => return false,
            PriorityCommand::Save => {
                draft.boot_order = editor.order();
                store.save(draft);
                log::info!("settings: boot priority {:?}", draft.boot_order);
                display.draw("Boot priority saved to CMOS!", 25, 15, Attribute::NORMAL);
                display.draw("Press any key...", 25, 16, Attribute::NORMAL);
                wait_any_key(keyboard);
                return true;
            }
        }
    }
}

/// Pick a power mode; Enter applies and persists it immediately.
pub fn power_screen<P, D, K>(
    display: &mut D,
    keyboard: &mut K,
    store: &mut SettingsStore<P>,
    power: &mut PowerMode,
) where
    P: RegisterPort,
    D: Display + ?Sized,
    K: Keyboard + ?Sized,
{
    display.clear(Attribute::NORMAL);
    widgets::draw_title(display, "POWER MANAGEMENT SETTINGS", 28, 1);
    display.draw("ENTER: Select  ESC: Return", 20, 20, Attribute::NORMAL);

    let labels = PowerMode::ALL.map(PowerMode::name);
    let mut cursor = ListCursor::new(labels.len());
    loop {
        widgets::draw_list(display, &labels, cursor.selected(), 25, 5);
        for (row, mode) in PowerMode::ALL.into_iter().enumerate() {
            let (mark, attr) = if mode == *power {
                ("[X]", Attribute::SUCCESS)
            } else {
                ("[ ]", Attribute::NORMAL)
            };
            display.draw(mark, 50, 5 + row as u8, attr);
        }

        let highlighted = PowerMode::ALL[cursor.selected()];
        display.draw("Description: ", 25, 12, Attribute::BRIGHT);
        display.fill(b' ', 25, 13, 55, 1, Attribute::NORMAL);
        display.draw(highlighted.description(), 25, 13, Attribute::NORMAL);
        display.draw("Current mode: ", 25, 15, Attribute::BRIGHT);
        display.fill(b' ', 40, 15, 16, 1, Attribute::NORMAL);
        display.draw(power.name(), 40, 15, power_attr(*power));

        match cursor.handle(next_make(keyboard)) {
            ListInput::Chosen(index) => {
                *power = PowerMode::ALL[index];
                store.save_power_mode(*power);
            }
            ListInput::Back => return,
            _ => {}
        }
    }
}
