//! Settings store against a simulated CMOS bank

use bios_api::sim::SimPort;
use bios_api::{DeviceKind, PowerMode};
use bios_firmware::settings::layout;
use bios_firmware::{Configuration, Password, SettingsStore};
use proptest::prelude::*;

fn device() -> impl Strategy<Value = DeviceKind> {
    (0u8..5).prop_map(|code| DeviceKind::from_code(code).unwrap())
}

fn configuration() -> impl Strategy<Value = Configuration> {
    (
        any::<bool>(),
        any::<u8>(),
        [device(), device(), device()],
        "[a-zA-Z0-9]{0,8}",
        any::<u8>(),
    )
        .prop_map(|(security_enabled, boot_order_code, boot_order, password, hw_error_count)| {
            Configuration {
                security_enabled,
                boot_order_code,
                boot_order,
                password: Password::from_bytes(password.as_bytes()).unwrap(),
                hw_error_count,
            }
        })
}

/// Checksummed registers outside the password field
fn guarded_register() -> impl Strategy<Value = u8> {
    prop_oneof![
        Just(layout::BOOT_ORDER),
        Just(layout::SECURITY),
        Just(layout::CHECKSUM),
        (layout::BOOT_DEVICE..=layout::HW_ERROR_COUNT),
    ]
}

proptest! {
    #[test]
    fn test_save_then_load_round_trips(config in configuration()) {
        let mut port = SimPort::new();
        let mut store = SettingsStore::new(&mut port);
        store.save(&config);
        prop_assert!(store.verify());
        prop_assert_eq!(store.load(), config);
    }

    #[test]
    fn test_single_byte_corruption_loads_defaults(
        config in configuration(),
        reg in guarded_register(),
        flip in 1u8..=255,
    ) {
        let mut port = SimPort::new();
        SettingsStore::new(&mut port).save(&config);
        let corrupted = port.cmos(reg) ^ flip;
        port.set_cmos(reg, corrupted);

        let mut store = SettingsStore::new(&mut port);
        prop_assert!(!store.verify());
        prop_assert_eq!(store.load(), Configuration::default());
    }
}

#[test]
fn test_blank_cmos_loads_defaults() {
    let mut port = SimPort::new();
    port.set_cmos(layout::CHECKSUM, 0x42);
    assert_eq!(SettingsStore::new(&mut port).load(), Configuration::default());
}

#[test]
fn test_save_writes_checksum_last() {
    let mut port = SimPort::new();
    let config = Configuration {
        security_enabled: true,
        password: Password::from_bytes(b"abc").unwrap(),
        ..Configuration::default()
    };
    SettingsStore::new(&mut port).save(&config);

    let writes = port.cmos_writes();
    assert_eq!(writes.last(), Some(&(layout::CHECKSUM, config.checksum())));
    assert_eq!(port.cmos(layout::PASSWORD + 3), 0);
}

#[test]
fn test_load_does_not_repair() {
    let mut port = SimPort::new();
    port.set_cmos(layout::SECURITY, 1);
    SettingsStore::new(&mut port).load();
    assert!(port.cmos_writes().is_empty());
}

#[test]
fn test_power_mode_outside_checksum() {
    let mut port = SimPort::new();
    let mut store = SettingsStore::new(&mut port);
    store.save(&Configuration::default());
    store.save_power_mode(PowerMode::MinPower);
    assert!(store.verify());
    assert_eq!(store.load_power_mode(), PowerMode::MinPower);
    drop(store);

    port.set_cmos(layout::POWER_MODE, 9);
    assert_eq!(SettingsStore::new(&mut port).load_power_mode(), PowerMode::Balanced);
}
