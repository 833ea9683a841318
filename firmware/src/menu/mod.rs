//! Text-mode user interface
//!
//! The main menu state machine, the splash and its boot hotkey, and every
//! setup screen reachable from the menu.

pub mod hotkey;
pub mod main_menu;
pub mod report;
pub mod security;
pub mod settings;
pub mod splash;
pub mod widgets;

pub use hotkey::HotkeyDetector;
pub use main_menu::{MainMenu, MenuAction, MenuCommand, SystemStatus};
pub use splash::{BootChoice, boot_selection, splash};
