//! Result screens - boot progress and the hardware test report

use core::fmt::Write;

use arrayvec::ArrayString;
use bios_api::{Attribute, DeviceKind, Display, Keyboard};

use super::widgets;
use crate::diagnostics::{Severity, SurveyReport};
use crate::error::FirmwareError;
use crate::utils::keys::wait_any_key;

/// Clear the screen and say which device a manual boot goes to.
pub fn boot_banner<D: Display + ?Sized>(display: &mut D, order: &[DeviceKind; 3]) {
    display.clear(Attribute::NORMAL);
    let text = if order[0] == DeviceKind::Usb {
        "Booting from USB (1st priority)..."
    } else if order[1] == DeviceKind::Usb {
        "Trying USB (2nd priority)..."
    } else {
        "Attempting to boot from hard disk..."
    };
    display.draw(text, 0, 0, Attribute::NORMAL);
}

/// Banner for a boot forced to one device.
pub fn device_banner<D: Display + ?Sized>(display: &mut D, device: DeviceKind) {
    display.clear(Attribute::NORMAL);
    let text = match device {
        DeviceKind::Usb => "Attempting to boot from USB...",
        _ => "Attempting to boot from hard disk...",
    };
    display.draw(text, 0, 0, Attribute::NORMAL);
}

pub fn boot_success<D: Display + ?Sized>(display: &mut D) {
    display.draw(
        "Boot signature found! Transferring control...",
        0,
        3,
        Attribute::NORMAL,
    );
}

/// Text shown for a failed boot attempt
pub fn boot_error_text(err: FirmwareError) -> &'static str {
    match err {
        FirmwareError::SignatureInvalid => "Error: No boot signature (0xAA55)",
        FirmwareError::DeviceUnavailable(DeviceKind::Usb) => "Error: No USB storage device found",
        FirmwareError::DeviceUnavailable(_) => "Error: Boot device not available",
        _ => "Error: Cannot read boot sector",
    }
}

/// Show why a boot failed and wait for a key.
pub fn boot_failure<D, K>(display: &mut D, keyboard: &mut K, err: FirmwareError)
where
    D: Display + ?Sized,
    K: Keyboard + ?Sized,
{
    display.draw(boot_error_text(err), 0, 3, Attribute::NORMAL);
    display.draw("Press any key to return...", 0, 5, Attribute::NORMAL);
    wait_any_key(keyboard);
}

/// Per-stage results, the verdict, then wait for a key.
pub fn hardware_test_report<D, K>(display: &mut D, keyboard: &mut K, report: &SurveyReport)
where
    D: Display + ?Sized,
    K: Keyboard + ?Sized,
{
    display.clear(Attribute::NORMAL);
    widgets::draw_title(display, "HARDWARE TEST UTILITY", 30, 1);
    display.draw("Testing hardware components...", 25, 4, Attribute::NORMAL);

    for (row, (stage, passed)) in report.stages().enumerate() {
        let y = 5 + row as u8;
        let mut label = ArrayString::<16>::new();
        let _ = write!(label, "{} Test: ", stage.name());
        display.draw(&label, 25, y, Attribute::NORMAL);
        if passed {
            display.draw("PASSED", 40, y, Attribute::SUCCESS);
        } else {
            display.draw("FAILED", 40, y, Attribute::ERROR);
        }
    }

    match report.severity() {
        Severity::AllPassed => {
            display.draw("All tests passed successfully!", 25, 12, Attribute::SUCCESS);
        }
        Severity::Degraded => display.draw(
            "Some errors detected but system is operational.",
            25,
            12,
            Attribute::WARNING,
        ),
        Severity::Critical => {
            display.draw("Critical errors detected!", 25, 12, Attribute::ERROR);
            display.draw("System will show error on next boot.", 25, 13, Attribute::NORMAL);
        }
    }

    display.draw("Press any key to return...", 25, 16, Attribute::NORMAL);
    wait_any_key(keyboard);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{PostSequencer, PostStage, SelfTest};
    use bios_api::input::scancode;
    use bios_api::sim::{RecordingDisplay, RecordingSpeaker, ScriptedKeyboard};

    struct Failing(&'static [PostStage]);

    impl SelfTest for Failing {
        fn check(&mut self, stage: PostStage) -> bool {
            !self.0.contains(&stage)
        }
    }

    fn survey(failing: &'static [PostStage]) -> SurveyReport {
        PostSequencer::new(Failing(failing), RecordingSpeaker::new()).survey()
    }

    #[test]
    fn test_banner_follows_priority() {
        let mut display = RecordingDisplay::new();
        boot_banner(&mut display, &[DeviceKind::HardDisk, DeviceKind::Usb, DeviceKind::Disabled]);
        assert_eq!(display.row(0), "Trying USB (2nd priority)...");
        boot_banner(&mut display, &[DeviceKind::HardDisk, DeviceKind::OpticalDisk, DeviceKind::Usb]);
        assert_eq!(display.row(0), "Attempting to boot from hard disk...");
    }

    #[test]
    fn test_boot_failure_messages() {
        let mut display = RecordingDisplay::new();
        let mut keyboard = ScriptedKeyboard::new();
        keyboard.tap(scancode::ENTER);
        boot_failure(&mut display, &mut keyboard, FirmwareError::SignatureInvalid);
        assert_eq!(display.row(3), "Error: No boot signature (0xAA55)");
        assert_eq!(display.row(5), "Press any key to return...");
        assert_eq!(
            boot_error_text(FirmwareError::ReadFailure),
            "Error: Cannot read boot sector"
        );
    }

    #[test]
    fn test_report_degraded() {
        let mut display = RecordingDisplay::new();
        let mut keyboard = ScriptedKeyboard::new();
        keyboard.tap(scancode::ENTER);
        hardware_test_report(&mut display, &mut keyboard, &survey(&[PostStage::Disk]));
        assert_eq!(display.row(9), format!("{:25}Disk Test:     FAILED", ""));
        assert_eq!(display.attr_at(25, 12), Attribute::WARNING);
    }

    #[test]
    fn test_report_critical() {
        let mut display = RecordingDisplay::new();
        let mut keyboard = ScriptedKeyboard::new();
        keyboard.tap(scancode::ENTER);
        let report = survey(&[PostStage::Cpu, PostStage::Video]);
        hardware_test_report(&mut display, &mut keyboard, &report);
        assert!(display.contains("Critical errors detected!"));
        assert!(display.contains("System will show error on next boot."));
    }
}
