//! Top-level driver
//!
//! [`Firmware`] owns the hardware collaborators and the explicit runtime
//! context. [`Firmware::run`] walks the start-up sequence once and returns
//! how control leaves the firmware; turning an [`Exit`] into a jump, a halt
//! or a reset is left to the bare-metal entry.

use bios_api::{DeviceKind, Display, Keyboard, MemoryBus, PowerMode, RegisterPort, Speaker};

use crate::boot::{AutoBoot, BootOrchestrator, Handoff};
use crate::clock::ClockReader;
use crate::config::FirmwareConfig;
use crate::diagnostics::post::report_failure;
use crate::diagnostics::{HardwareProbe, PostSequencer};
use crate::drivers::UsbStorage;
use crate::error::{FirmwareError, Result};
use crate::menu::main_menu::draw_clock;
use crate::menu::settings::settings_screen;
use crate::menu::security::security_screen;
use crate::menu::{self, BootChoice, MainMenu, MenuAction, MenuCommand, SystemStatus, report};
use crate::security::{SecurityGate, challenge};
use crate::settings::{Configuration, SettingsStore};

/// How control leaves the firmware
#[derive(Debug, PartialEq, Eq)]
pub enum Exit {
    /// A validated boot sector is in place; jump to its entry
    Handoff(Handoff),
    /// Fatal condition; idle forever
    Halt(FirmwareError),
    /// Warm restart through the keyboard controller
    Restart,
}

/// State shared by every screen
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub settings: Configuration,
    pub power: PowerMode,
    pub menu: MainMenu,
}

/// Where start-up goes after the boot selection menu
enum AfterSelection {
    Handoff(Handoff),
    AutoBoot,
    Menu,
}

pub struct Firmware<P, M, D, K, S, U> {
    port: P,
    memory: M,
    display: D,
    keyboard: K,
    speaker: S,
    usb: U,
    config: FirmwareConfig,
    context: Context,
}

impl<P, M, D, K, S, U> Firmware<P, M, D, K, S, U>
where
    P: RegisterPort,
    M: MemoryBus,
    D: Display,
    K: Keyboard,
    S: Speaker,
    U: UsbStorage,
{
    pub fn new(
        port: P,
        memory: M,
        display: D,
        keyboard: K,
        speaker: S,
        usb: U,
        config: FirmwareConfig,
    ) -> Self {
        Self {
            port,
            memory,
            display,
            keyboard,
            speaker,
            usb,
            config,
            context: Context::default(),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn config(&self) -> &FirmwareConfig {
        &self.config
    }

    /// POST, settings, gate, splash, auto-boot check, then the main menu.
    pub fn run(&mut self) -> Exit {
        log::info!("WexIB {} starting", crate::VERSION);

        if let Err(err) = self.power_on_self_test() {
            return Exit::Halt(err);
        }
        self.load_settings();

        if let Err(err) = self.unlock() {
            return match err {
                FirmwareError::RestartRequested => Exit::Restart,
                err => Exit::Halt(err),
            };
        }

        let mut check_disk = true;
        if menu::splash(&mut self.display, &mut self.keyboard, &self.config) {
            match self.boot_menu() {
                AfterSelection::Handoff(handoff) => return Exit::Handoff(handoff),
                AfterSelection::AutoBoot => {}
                AfterSelection::Menu => check_disk = false,
            }
        }

        self.draw_interface();
        if check_disk {
            if let Some(handoff) = self.auto_boot() {
                return Exit::Handoff(handoff);
            }
            self.draw_interface();
        }

        self.menu_loop()
    }

    fn power_on_self_test(&mut self) -> Result<()> {
        let result = {
            let probe = HardwareProbe::new(&mut self.port, &mut self.memory, &self.config);
            PostSequencer::new(probe, &mut self.speaker)
                .with_stage_chirps(self.config.stage_chirps)
                .run()
        };
        if result.is_success() {
            return Ok(());
        }
        report_failure(&mut self.display, &mut self.speaker, result);
        Err(FirmwareError::PostFailure(result))
    }

    /// Load the record and write it straight back, so a corrupt record is
    /// replaced by the defaults on every start.
    fn load_settings(&mut self) {
        let mut store = SettingsStore::new(&mut self.port);
        let settings = store.load();
        store.save(&settings);
        self.context.power = store.load_power_mode();
        self.context.settings = settings;
        log::info!(
            "settings: boot order {:?}, power {}",
            self.context.settings.boot_order,
            self.context.power.name()
        );
    }

    fn unlock(&mut self) -> Result<()> {
        let Some(mut gate) = SecurityGate::for_config(&self.context.settings) else {
            return Ok(());
        };
        challenge(&mut gate, &mut self.display, &mut self.keyboard)
    }

    /// Boot selection opened from the splash. Continue (and Esc) go on to
    /// the auto-boot check; Setup skips it.
    fn boot_menu(&mut self) -> AfterSelection {
        loop {
            let device = match menu::boot_selection(&mut self.display, &mut self.keyboard) {
                BootChoice::HardDisk => DeviceKind::HardDisk,
                BootChoice::Usb => DeviceKind::Usb,
                BootChoice::Setup => {
                    self.invoke(MenuAction::Settings);
                    return AfterSelection::Menu;
                }
                BootChoice::Continue => return AfterSelection::AutoBoot,
            };
            if let Some(handoff) = self.boot_device(device) {
                return AfterSelection::Handoff(handoff);
            }
        }
    }

    fn auto_boot(&mut self) -> Option<Handoff> {
        let mut boot =
            BootOrchestrator::new(&mut self.port, &mut self.memory, &mut self.usb, &self.config);
        match boot.auto_boot_check(&mut self.display, &mut self.keyboard) {
            AutoBoot::Handoff(handoff) => Some(handoff),
            AutoBoot::Declined | AutoBoot::NotBootable(_) => None,
        }
    }

    fn menu_loop(&mut self) -> Exit {
        let mut idle: u32 = 0;
        loop {
            let Some(raw) = self.keyboard.poll_key() else {
                idle += 1;
                if idle >= self.config.clock_refresh_polls {
                    idle = 0;
                    self.refresh_clock();
                }
                continue;
            };

            match self.context.menu.handle_key(raw) {
                MenuCommand::None => {}
                MenuCommand::Redraw => self.draw_interface(),
                MenuCommand::Invoke(action) => {
                    if let Some(handoff) = self.invoke(action) {
                        return Exit::Handoff(handoff);
                    }
                    self.context.menu.reset_repeat();
                    self.draw_interface();
                }
                MenuCommand::Restart => {
                    log::info!("menu: restart requested");
                    return Exit::Restart;
                }
            }
        }
    }

    /// Run one menu action. Only a successful boot returns a handoff.
    fn invoke(&mut self, action: MenuAction) -> Option<Handoff> {
        log::debug!("menu: {:?}", action);
        match action {
            MenuAction::Boot => {
                let order = self.context.settings.boot_order;
                report::boot_banner(&mut self.display, &order);
                let mut boot = BootOrchestrator::new(
                    &mut self.port,
                    &mut self.memory,
                    &mut self.usb,
                    &self.config,
                );
                let outcome = boot.boot(&order);
                self.finish_boot(outcome)
            }
            MenuAction::HardwareTest => {
                self.hardware_test();
                None
            }
            MenuAction::Settings => {
                let mut store = SettingsStore::new(&mut self.port);
                settings_screen(
                    &mut self.display,
                    &mut self.keyboard,
                    &mut store,
                    &mut self.context.settings,
                    &mut self.context.power,
                );
                None
            }
            MenuAction::Security => {
                let mut store = SettingsStore::new(&mut self.port);
                security_screen(
                    &mut self.display,
                    &mut self.keyboard,
                    &mut store,
                    &mut self.context.settings,
                );
                None
            }
            // Redrawn with fresh values by the caller
            MenuAction::Information => None,
            MenuAction::UsbBoot => self.boot_device(DeviceKind::Usb),
        }
    }

    fn boot_device(&mut self, device: DeviceKind) -> Option<Handoff> {
        report::device_banner(&mut self.display, device);
        let mut boot =
            BootOrchestrator::new(&mut self.port, &mut self.memory, &mut self.usb, &self.config);
        let outcome = match device {
            DeviceKind::Usb => boot.boot_from_usb(),
            _ => boot.boot_from_disk(),
        };
        self.finish_boot(outcome)
    }

    fn finish_boot(&mut self, outcome: Result<Handoff>) -> Option<Handoff> {
        match outcome {
            Ok(handoff) => {
                report::boot_success(&mut self.display);
                Some(handoff)
            }
            Err(err) => {
                report::boot_failure(&mut self.display, &mut self.keyboard, err);
                None
            }
        }
    }

    /// Survey every stage, persist the failure count and show the report.
    fn hardware_test(&mut self) {
        let report = {
            let probe = HardwareProbe::new(&mut self.port, &mut self.memory, &self.config);
            PostSequencer::new(probe, &mut self.speaker).survey()
        };
        self.context.settings.hw_error_count = report.failures();
        SettingsStore::new(&mut self.port).save(&self.context.settings);
        log::info!("hardware test: {} failure(s)", report.failures());
        report::hardware_test_report(&mut self.display, &mut self.keyboard, &report);
    }

    fn draw_interface(&mut self) {
        let checksum_valid = SettingsStore::new(&mut self.port).verify();
        let clock = ClockReader::new(&mut self.port, &self.config).read();
        let status = SystemStatus {
            config: &self.context.settings,
            power: self.context.power,
            checksum_valid,
            clock,
        };
        self.context.menu.draw(&mut self.display, &status);
    }

    fn refresh_clock(&mut self) {
        if self.context.menu.selected() != MenuAction::Information {
            return;
        }
        let reading = ClockReader::new(&mut self.port, &self.config).read();
        draw_clock(&mut self.display, &reading);
    }
}
