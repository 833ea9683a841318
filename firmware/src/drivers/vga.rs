//! VGA color text mode (80x25)

use bios_api::{Attribute, Display, MemoryBus};

pub const WIDTH: u8 = 80;
pub const HEIGHT: u8 = 25;
pub const TEXT_BUFFER: usize = 0xB8000;

/// Text-mode display writing attribute/character cells through a `MemoryBus`.
pub struct VgaText<M> {
    memory: M,
    base: usize,
}

impl<M: MemoryBus> VgaText<M> {
    pub const fn new(memory: M, base: usize) -> Self {
        Self { memory, base }
    }

    fn cell_addr(&self, x: u8, y: u8) -> usize {
        self.base + (y as usize * WIDTH as usize + x as usize) * 2
    }

    fn put(&mut self, ch: u8, x: u8, y: u8, attr: Attribute) {
        if x < WIDTH && y < HEIGHT {
            let addr = self.cell_addr(x, y);
            self.memory.write_u16(addr, attr.cell(ch));
        }
    }
}

impl<M: MemoryBus> Display for VgaText<M> {
    fn draw(&mut self, text: &str, x: u8, y: u8, attr: Attribute) {
        for (offset, byte) in text.bytes().enumerate() {
            let Some(col) = u8::try_from(offset).ok().and_then(|o| x.checked_add(o)) else {
                break;
            };
            self.put(byte, col, y, attr);
        }
    }

    fn clear(&mut self, attr: Attribute) {
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                self.put(b' ', x, y, attr);
            }
        }
    }

    fn draw_char(&mut self, ch: u8, x: u8, y: u8, attr: Attribute) {
        self.put(ch, x, y, attr);
    }
}
