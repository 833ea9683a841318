//! Simulated hardware for host-side tests
//!
//! Deterministic stand-ins for every collaborator trait. Reads can be scripted
//! per register, and every write is recorded so tests can assert on the exact
//! register traffic a component produced.

use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;

use crate::display::{Attribute, Display};
use crate::input::{self, Keyboard, scancode};
use crate::port::{MemoryBus, RegisterPort};
use crate::speaker::Speaker;

const CMOS_INDEX: u16 = 0x70;
const CMOS_DATA: u16 = 0x71;
const CMOS_SIZE: usize = 128;

/// Simulated I/O port space with a CMOS bank behind `0x70`/`0x71`.
///
/// Unscripted reads return the register's static value (default `0x00`).
/// Scripted reads pop from a per-register queue first.
#[derive(Debug, Clone)]
pub struct SimPort {
    registers: BTreeMap<u16, u8>,
    scripts: BTreeMap<u16, VecDeque<u8>>,
    words: BTreeMap<u16, VecDeque<u16>>,
    cmos: [u8; CMOS_SIZE],
    cmos_index: u8,
    cmos_scripts: BTreeMap<u8, VecDeque<u8>>,
    cmos_frozen: BTreeSet<u8>,
    cmos_reads: BTreeMap<u8, usize>,
    reads: BTreeMap<u16, usize>,
    writes: Vec<(u16, u8)>,
    word_writes: Vec<(u16, u16)>,
}

impl SimPort {
    pub fn new() -> Self {
        Self {
            registers: BTreeMap::new(),
            scripts: BTreeMap::new(),
            words: BTreeMap::new(),
            cmos: [0; CMOS_SIZE],
            cmos_index: 0,
            cmos_scripts: BTreeMap::new(),
            cmos_frozen: BTreeSet::new(),
            cmos_reads: BTreeMap::new(),
            reads: BTreeMap::new(),
            writes: Vec::new(),
            word_writes: Vec::new(),
        }
    }

    /// Static value returned by unscripted reads of `port`.
    pub fn set(&mut self, port: u16, value: u8) -> &mut Self {
        self.registers.insert(port, value);
        self
    }

    /// Queue values returned by the next reads of `port`.
    pub fn script(&mut self, port: u16, values: &[u8]) -> &mut Self {
        self.scripts.entry(port).or_default().extend(values.iter().copied());
        self
    }

    /// Queue 16-bit values returned by the next `read16` calls on `port`.
    pub fn script_words(&mut self, port: u16, values: &[u16]) -> &mut Self {
        self.words.entry(port).or_default().extend(values.iter().copied());
        self
    }

    /// Queue a 512-byte sector on the ATA data port as 256 little-endian words.
    pub fn load_sector(&mut self, sector: &[u8; 512]) -> &mut Self {
        let queue = self.words.entry(0x1F0).or_default();
        for pair in sector.chunks_exact(2) {
            queue.push_back(u16::from_le_bytes([pair[0], pair[1]]));
        }
        self
    }

    pub fn set_cmos(&mut self, reg: u8, value: u8) -> &mut Self {
        self.cmos[reg as usize % CMOS_SIZE] = value;
        self
    }

    pub fn cmos(&self, reg: u8) -> u8 {
        self.cmos[reg as usize % CMOS_SIZE]
    }

    /// Queue values returned by the next reads of CMOS register `reg`.
    pub fn script_cmos(&mut self, reg: u8, values: &[u8]) -> &mut Self {
        self.cmos_scripts.entry(reg).or_default().extend(values.iter().copied());
        self
    }

    /// Make CMOS register `reg` ignore writes.
    pub fn freeze_cmos(&mut self, reg: u8) -> &mut Self {
        self.cmos_frozen.insert(reg);
        self
    }

    pub fn cmos_read_count(&self, reg: u8) -> usize {
        self.cmos_reads.get(&reg).copied().unwrap_or(0)
    }

    pub fn read_count(&self, port: u16) -> usize {
        self.reads.get(&port).copied().unwrap_or(0)
    }

    /// Every byte written, in order.
    pub fn writes(&self) -> &[(u16, u8)] {
        &self.writes
    }

    pub fn writes_to(&self, port: u16) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(p, _)| *p == port)
            .map(|(_, v)| *v)
            .collect()
    }

    pub fn word_writes(&self) -> &[(u16, u16)] {
        &self.word_writes
    }

    /// CMOS registers written through the index/data pair, in order.
    pub fn cmos_writes(&self) -> Vec<(u8, u8)> {
        let mut index = 0u8;
        let mut out = Vec::new();
        for &(port, value) in &self.writes {
            match port {
                CMOS_INDEX => index = value & 0x7F,
                CMOS_DATA => out.push((index, value)),
                _ => {}
            }
        }
        out
    }
}

impl Default for SimPort {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterPort for SimPort {
    fn read8(&mut self, port: u16) -> u8 {
        *self.reads.entry(port).or_insert(0) += 1;
        if port == CMOS_DATA {
            let reg = self.cmos_index;
            *self.cmos_reads.entry(reg).or_insert(0) += 1;
            if let Some(value) = self.cmos_scripts.get_mut(&reg).and_then(VecDeque::pop_front) {
                return value;
            }
            return self.cmos[reg as usize];
        }
        if port == CMOS_INDEX {
            return self.cmos_index;
        }
        if let Some(value) = self.scripts.get_mut(&port).and_then(VecDeque::pop_front) {
            return value;
        }
        self.registers.get(&port).copied().unwrap_or(0)
    }

    fn write8(&mut self, port: u16, value: u8) {
        self.writes.push((port, value));
        match port {
            CMOS_INDEX => self.cmos_index = value & 0x7F,
            CMOS_DATA => {
                let reg = self.cmos_index;
                if !self.cmos_frozen.contains(&reg) {
                    self.cmos[reg as usize] = value;
                }
            }
            _ => {}
        }
    }

    fn read16(&mut self, port: u16) -> u16 {
        *self.reads.entry(port).or_insert(0) += 1;
        self.words
            .get_mut(&port)
            .and_then(VecDeque::pop_front)
            .unwrap_or(0)
    }

    fn write16(&mut self, port: u16, value: u16) {
        self.word_writes.push((port, value));
    }
}

/// Sparse simulated physical memory. Unwritten bytes read as zero.
#[derive(Debug, Clone, Default)]
pub struct SimMemory {
    bytes: BTreeMap<usize, u8>,
    faulty: BTreeSet<usize>,
}

impl SimMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `len` bytes at `addr` ignore writes.
    pub fn fault(&mut self, addr: usize, len: usize) -> &mut Self {
        self.faulty.extend(addr..addr + len);
        self
    }

    pub fn bytes(&self, addr: usize, len: usize) -> Vec<u8> {
        (addr..addr + len)
            .map(|a| self.bytes.get(&a).copied().unwrap_or(0))
            .collect()
    }

    pub fn poke(&mut self, addr: usize, bytes: &[u8]) -> &mut Self {
        for (offset, &b) in bytes.iter().enumerate() {
            self.bytes.insert(addr + offset, b);
        }
        self
    }
}

impl MemoryBus for SimMemory {
    fn read_u8(&mut self, addr: usize) -> u8 {
        self.bytes.get(&addr).copied().unwrap_or(0)
    }

    fn write_u8(&mut self, addr: usize, value: u8) {
        if !self.faulty.contains(&addr) {
            self.bytes.insert(addr, value);
        }
    }

    fn read_u16(&mut self, addr: usize) -> u16 {
        u16::from_le_bytes([self.read_u8(addr), self.read_u8(addr + 1)])
    }

    fn write_u16(&mut self, addr: usize, value: u16) {
        for (offset, b) in value.to_le_bytes().into_iter().enumerate() {
            self.write_u8(addr + offset, b);
        }
    }

    fn read_u32(&mut self, addr: usize) -> u32 {
        let mut raw = [0u8; 4];
        self.read_bytes(addr, &mut raw);
        u32::from_le_bytes(raw)
    }

    fn write_u32(&mut self, addr: usize, value: u32) {
        self.write_bytes(addr, &value.to_le_bytes());
    }
}

/// Keyboard fed from a fixed script of raw scancodes.
///
/// Panics once the script has been exhausted for `idle_limit` consecutive
/// polls so that a test waiting on input it never scripted fails instead of
/// spinning forever.
#[derive(Debug, Clone)]
pub struct ScriptedKeyboard {
    keys: VecDeque<u8>,
    idle_polls: usize,
    idle_limit: usize,
}

impl ScriptedKeyboard {
    pub fn new() -> Self {
        Self {
            keys: VecDeque::new(),
            idle_polls: 0,
            idle_limit: 100_000,
        }
    }

    pub fn with_idle_limit(mut self, limit: usize) -> Self {
        self.idle_limit = limit;
        self
    }

    /// Queue raw scancodes verbatim.
    pub fn raw(&mut self, codes: &[u8]) -> &mut Self {
        self.keys.extend(codes.iter().copied());
        self
    }

    /// Queue a make code followed by its break code.
    pub fn tap(&mut self, make_code: u8) -> &mut Self {
        self.keys.push_back(make_code);
        self.keys.push_back(make_code | scancode::BREAK_BIT);
        self
    }

    /// Tap the key for every character of `text`.
    pub fn type_text(&mut self, text: &str) -> &mut Self {
        for ch in text.bytes() {
            let code = (0u8..0x80)
                .find(|&sc| input::to_ascii(sc) == Some(ch))
                .unwrap_or_else(|| panic!("no scancode for {:?}", ch as char));
            self.tap(code);
        }
        self
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl Default for ScriptedKeyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyboard for ScriptedKeyboard {
    fn poll_key(&mut self) -> Option<u8> {
        match self.keys.pop_front() {
            Some(code) => {
                self.idle_polls = 0;
                Some(code)
            }
            None => {
                self.idle_polls += 1;
                assert!(
                    self.idle_polls < self.idle_limit,
                    "keyboard script exhausted"
                );
                None
            }
        }
    }
}

/// One `draw` call as seen by [`RecordingDisplay`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub text: String,
    pub x: u8,
    pub y: u8,
    pub attr: Attribute,
}

/// 80x25 display that records draw calls and keeps a character grid.
#[derive(Debug, Clone)]
pub struct RecordingDisplay {
    grid: [[(u8, Attribute); 80]; 25],
    draws: Vec<DrawCall>,
    clears: Vec<Attribute>,
}

impl RecordingDisplay {
    pub const WIDTH: usize = 80;
    pub const HEIGHT: usize = 25;

    pub fn new() -> Self {
        Self {
            grid: [[(b' ', Attribute::NORMAL); 80]; 25],
            draws: Vec::new(),
            clears: Vec::new(),
        }
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    pub fn clears(&self) -> &[Attribute] {
        &self.clears
    }

    /// Whether any `draw` call so far contained `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.draws.iter().any(|d| d.text.contains(needle))
    }

    /// Current contents of row `y`, trailing blanks trimmed.
    pub fn row(&self, y: usize) -> String {
        let text: String = self.grid[y].iter().map(|&(c, _)| c as char).collect();
        String::from(text.trim_end())
    }

    pub fn attr_at(&self, x: usize, y: usize) -> Attribute {
        self.grid[y][x].1
    }

    fn put(&mut self, ch: u8, x: u8, y: u8, attr: Attribute) {
        let (x, y) = (x as usize, y as usize);
        if x < Self::WIDTH && y < Self::HEIGHT {
            self.grid[y][x] = (ch, attr);
        }
    }
}

impl Default for RecordingDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RecordingDisplay {
    fn draw(&mut self, text: &str, x: u8, y: u8, attr: Attribute) {
        for (offset, b) in text.bytes().enumerate() {
            self.put(b, x.saturating_add(offset as u8), y, attr);
        }
        self.draws.push(DrawCall {
            text: String::from(text),
            x,
            y,
            attr,
        });
    }

    fn clear(&mut self, attr: Attribute) {
        self.grid = [[(b' ', attr); 80]; 25];
        self.clears.push(attr);
    }

    fn draw_char(&mut self, ch: u8, x: u8, y: u8, attr: Attribute) {
        self.put(ch, x, y, attr);
    }
}

/// Speaker that records every tone.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpeaker {
    pub tones: Vec<(u32, u32)>,
}

impl RecordingSpeaker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Speaker for RecordingSpeaker {
    fn emit_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        self.tones.push((frequency_hz, duration_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmos_index_data_pair() {
        let mut port = SimPort::new();
        port.write8(0x70, 0x11);
        port.write8(0x71, 0x42);
        assert_eq!(port.cmos(0x11), 0x42);
        port.write8(0x70, 0x91); // NMI-disable bit is ignored
        assert_eq!(port.read8(0x71), 0x42);
        assert_eq!(port.cmos_writes(), alloc::vec![(0x11, 0x42)]);
    }

    #[test]
    fn test_scripted_reads_fall_back_to_static() {
        let mut port = SimPort::new();
        port.set(0x64, 0x1C).script(0x64, &[0x1D]);
        assert_eq!(port.read8(0x64), 0x1D);
        assert_eq!(port.read8(0x64), 0x1C);
        assert_eq!(port.read_count(0x64), 2);
    }

    #[test]
    fn test_memory_fault_ignores_writes() {
        let mut mem = SimMemory::new();
        mem.fault(0x1000, 4);
        mem.write_u32(0x1000, 0xDEAD_BEEF);
        assert_eq!(mem.read_u32(0x1000), 0);
        mem.write_u32(0x2000, 0xDEAD_BEEF);
        assert_eq!(mem.read_u32(0x2000), 0xDEAD_BEEF);
    }

    #[test]
    fn test_type_text_taps_keys() {
        let mut kb = ScriptedKeyboard::new();
        kb.type_text("ab");
        assert_eq!(kb.poll_key(), Some(0x1E));
        assert_eq!(kb.poll_key(), Some(0x9E));
        assert_eq!(kb.poll_key(), Some(0x30));
        assert_eq!(kb.poll_key(), Some(0xB0));
        assert_eq!(kb.poll_key(), None);
    }

    #[test]
    fn test_recording_display_grid() {
        let mut display = RecordingDisplay::new();
        display.draw("Boot OS?", 2, 3, Attribute::SELECTED);
        assert_eq!(display.row(3), "  Boot OS?");
        assert_eq!(display.attr_at(2, 3), Attribute::SELECTED);
        assert!(display.contains("OS?"));
    }
}
