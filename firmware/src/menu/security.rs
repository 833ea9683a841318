//! Security settings screen and the new-password prompt

use bios_api::input;
use bios_api::input::scancode;
use bios_api::{Attribute, Display, Keyboard, RegisterPort};

use super::widgets;
use crate::security::actions;
use crate::security::{EditOutcome, LineEditor};
use crate::settings::{Configuration, Password, SettingsStore};
use crate::utils::keys::{next_make, wait_any_key};

pub fn security_screen<P, D, K>(
    display: &mut D,
    keyboard: &mut K,
    store: &mut SettingsStore<P>,
    config: &mut Configuration,
) where
    P: RegisterPort,
    D: Display + ?Sized,
    K: Keyboard + ?Sized,
{
    draw_security_frame(display);
    loop {
        draw_security_status(display, config);
        let code = next_make(keyboard);
        if code == scancode::ESC {
            return;
        }
        match input::to_ascii(code) {
            Some(b'1') => {
                actions::toggle_protection(config, store);
            }
            Some(b'2') => {
                if let Some(password) = set_password_screen(display, keyboard) {
                    if let Err(err) = actions::set_password(config, store, password) {
                        log::warn!("security: {}", err);
                    }
                }
                draw_security_frame(display);
            }
            Some(b'3') => actions::clear_password(config, store),
            _ => {}
        }
    }
}

fn draw_security_frame<D: Display + ?Sized>(display: &mut D) {
    display.clear(Attribute::NORMAL);
    widgets::draw_title(display, "BIOS SECURITY SETTINGS", 25, 1);
    display.draw("Password Protection: ", 25, 4, Attribute::NORMAL);
    display.draw("Password: ", 25, 5, Attribute::NORMAL);
    display.draw("1. Enable/Disable Password", 25, 7, Attribute::NORMAL);
    display.draw("2. Set Password", 25, 8, Attribute::NORMAL);
    display.draw("3. Clear Password", 25, 9, Attribute::NORMAL);
    display.draw("ESC. Return to Main Menu", 25, 11, Attribute::NORMAL);
}

fn draw_security_status<D: Display + ?Sized>(display: &mut D, config: &Configuration) {
    display.fill(b' ', 47, 4, 10, 1, Attribute::NORMAL);
    display.draw(
        if config.security_enabled { "ENABLED" } else { "DISABLED" },
        47,
        4,
        Attribute::NORMAL,
    );
    display.fill(b' ', 36, 5, 10, 1, Attribute::NORMAL);
    display.draw(
        if config.password.is_empty() { "NOT SET" } else { "SET" },
        36,
        5,
        Attribute::NORMAL,
    );
}

/// Prompt for a new password. `None` on Esc; an empty line is not accepted.
pub fn set_password_screen<D, K>(display: &mut D, keyboard: &mut K) -> Option<Password>
where
    D: Display + ?Sized,
    K: Keyboard + ?Sized,
{
    display.clear(Attribute::NORMAL);
    display.draw("Warn:", 25, 1, Attribute::DANGER);
    display.draw("This function is dangerous!", 25, 2, Attribute::DANGER);
    display.draw("Enter new password (max 8 chars): ", 25, 3, Attribute::PROMPT);
    display.draw("Press Enter when done, ESC to cancel", 25, 5, Attribute::PROMPT);

    let mut editor = LineEditor::new();
    loop {
        editor.draw_masked(display, 25, 4);
        match editor.handle_key(next_make(keyboard)) {
            EditOutcome::Submitted if !editor.is_empty() => break,
            EditOutcome::Cancelled => return None,
            _ => {}
        }
    }

    let password = editor.take();
    display.draw("Password set to: ", 25, 7, Attribute::PROMPT);
    let text = core::str::from_utf8(password.as_bytes()).unwrap_or("");
    display.draw(text, 42, 7, Attribute::NORMAL);
    display.draw("Press any key...", 25, 9, Attribute::PROMPT);
    wait_any_key(keyboard);
    Some(password)
}
