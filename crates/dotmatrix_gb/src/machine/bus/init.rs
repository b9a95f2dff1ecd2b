use crate::interrupts::IE_ADDR;

use super::super::{boot::POST_BOOT_IO, joypad::Joypad, timer::Timer};
use super::GameBoyBus;

impl GameBoyBus {
    /// Put I/O, timer, video and joypad state where the boot program
    /// leaves them at PC = 0x0100.
    pub(in super::super) fn apply_post_boot_state(&mut self) {
        self.joypad = Joypad::new();
        self.timer = Timer::new();
        self.ppu.reset();

        for &(addr, value) in POST_BOOT_IO.iter() {
            match addr {
                0xFF00 => self.joypad.write_select(value),
                IE_ADDR => self.ie_reg = value,
                _ => self.memory[addr as usize] = value,
            }
        }
    }
}
