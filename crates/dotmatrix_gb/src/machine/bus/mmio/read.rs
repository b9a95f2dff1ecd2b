use crate::interrupts::{IE_ADDR, IF_ADDR};

use super::super::super::boot::BOOT_ROM;
use super::super::GameBoyBus;

impl GameBoyBus {
    /// Read a byte as the CPU would see it.
    ///
    /// No DMG read has side effects, so this doubles as the debugger's
    /// side-effect-free peek.
    pub(crate) fn peek(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x00FF if self.boot_mode => BOOT_ROM[addr as usize],

            // Fixed bank 0 and the switchable bank window.
            0x0000..=0x7FFF => self.cartridge.rom_read(addr),

            // External RAM through the current RAM bank.
            0xA000..=0xBFFF => self.cartridge.ram_read(addr),

            // P1 is computed from the button latch, not stored.
            0xFF00 => self.joypad.read(),

            IF_ADDR => self.if_reg.bits() | 0xE0,
            IE_ADDR => self.ie_reg,

            _ => self.memory[addr as usize],
        }
    }
}
