//! Firmware configuration
//!
//! Tunables for the polling budgets, probe addresses and presentation details.
//! The CMOS record layout is fixed and lives in [`crate::settings::layout`].

use log::LevelFilter;

/// Firmware configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareConfig {
    /// Status polls while waiting for the disk to drop BUSY
    pub disk_busy_budget: u32,
    /// Status polls while waiting for the disk to raise READY
    pub disk_ready_budget: u32,
    /// Bytes drained from the keyboard controller during POST
    pub keyboard_drain_budget: u32,
    /// Status A polls while the RTC reports an update in progress
    pub rtc_update_budget: u32,
    /// RTC century register, `None` on boards without one
    pub rtc_century_register: Option<u8>,
    /// Low memory probe address
    pub low_memory_probe: usize,
    /// Extended memory probe address (above 1 MiB)
    pub extended_memory_probe: usize,
    /// 32-bit pattern written by the memory probe
    pub memory_pattern: u32,
    /// Base of the color text buffer
    pub text_buffer: usize,
    /// Cells written by the video probe
    pub video_probe_cells: [usize; 8],
    /// Attribute/character word written by the video probe
    pub video_probe_word: u16,
    /// Boot sector transfer address
    pub boot_address: usize,
    /// Emit a short chirp after every passing POST stage
    pub stage_chirps: bool,
    /// Progress-bar steps of the splash screen
    pub splash_ticks: u32,
    /// Keyboard polls per splash step; sets the splash duration
    pub splash_polls_per_tick: u32,
    /// Idle menu polls between clock refreshes on the information panel
    pub clock_refresh_polls: u32,
    /// Maximum log level
    pub log_level: LevelFilter,
}

impl FirmwareConfig {
    /// Create default configuration
    pub const fn new() -> Self {
        Self {
            disk_busy_budget: 10_000,
            disk_ready_budget: 10_000,
            keyboard_drain_budget: 1_000,
            rtc_update_budget: 10_000,
            rtc_century_register: Some(0x32),
            low_memory_probe: 0x1000,
            extended_memory_probe: 0x0010_0000,
            memory_pattern: 0x55AA_1234,
            text_buffer: 0xB8000,
            video_probe_cells: [0, 10, 20, 30, 40, 50, 60, 70],
            video_probe_word: 0x1F41,
            boot_address: 0x7C00,
            stage_chirps: cfg!(feature = "post-chirps"),
            splash_ticks: 30,
            splash_polls_per_tick: 20_000,
            clock_refresh_polls: 5_000,
            log_level: LevelFilter::Info,
        }
    }

    /// Set both disk polling budgets
    pub const fn with_disk_budgets(mut self, busy: u32, ready: u32) -> Self {
        self.disk_busy_budget = busy;
        self.disk_ready_budget = ready;
        self
    }

    pub const fn with_keyboard_drain_budget(mut self, budget: u32) -> Self {
        self.keyboard_drain_budget = budget;
        self
    }

    pub const fn with_rtc_update_budget(mut self, budget: u32) -> Self {
        self.rtc_update_budget = budget;
        self
    }

    pub const fn with_rtc_century_register(mut self, reg: Option<u8>) -> Self {
        self.rtc_century_register = reg;
        self
    }

    pub const fn with_stage_chirps(mut self, enabled: bool) -> Self {
        self.stage_chirps = enabled;
        self
    }

    pub const fn with_splash_ticks(mut self, ticks: u32) -> Self {
        self.splash_ticks = ticks;
        self
    }

    pub const fn with_splash_polls_per_tick(mut self, polls: u32) -> Self {
        self.splash_polls_per_tick = polls;
        self
    }

    pub const fn with_clock_refresh_polls(mut self, polls: u32) -> Self {
        self.clock_refresh_polls = polls;
        self
    }

    pub const fn with_boot_address(mut self, addr: usize) -> Self {
        self.boot_address = addr;
        self
    }

    pub const fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }
}

impl Default for FirmwareConfig {
    fn default() -> Self {
        Self::new()
    }
}
