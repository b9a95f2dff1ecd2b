use crate::interrupts::{InterruptFlags, IE_ADDR, IF_ADDR};

use super::super::super::boot::BOOT_DISABLE_ADDR;
use super::super::super::ppu::{LY_ADDR, STAT_ADDR, STAT_WRITABLE};
use super::super::super::timer::{DIV_ADDR, TAC_ADDR};
use super::super::GameBoyBus;

impl GameBoyBus {
    pub(crate) fn write8_mmio(&mut self, addr: u16, value: u8) {
        if self.boot_mode && addr == BOOT_DISABLE_ADDR {
            log::info!("Boot program unmapped, handing over to the cartridge");
            self.boot_mode = false;
            self.boot_exit_pending = true;
            return;
        }

        match addr {
            // The ROM image is read-only; writes drive the bank controller.
            0x0000..=0x7FFF => self.cartridge.rom_write(addr, value),

            0xA000..=0xBFFF => self.cartridge.ram_write(addr, value),

            // Work RAM and its echo hold the same byte whichever is written.
            0xC000..=0xDDFF => {
                self.memory[addr as usize] = value;
                self.memory[addr as usize + 0x2000] = value;
            }
            0xE000..=0xFDFF => {
                self.memory[addr as usize] = value;
                self.memory[addr as usize - 0x2000] = value;
            }

            // Unusable OAM tail and the unmapped I/O block.
            0xFEA0..=0xFEFF | 0xFF4C..=0xFF7F => {}

            0xFF00 => self.joypad.write_select(value),

            0xFF04 => {
                self.memory[DIV_ADDR] = 0;
                self.timer.reset_divider();
            }
            0xFF07 => {
                self.memory[TAC_ADDR] = value;
                self.timer.write_control(value);
            }

            IF_ADDR => self.if_reg = InterruptFlags::from_bits_truncate(value),
            IE_ADDR => self.ie_reg = value,

            0xFF41 => {
                let stat = self.memory[STAT_ADDR];
                self.memory[STAT_ADDR] = (stat & !STAT_WRITABLE) | (value & STAT_WRITABLE);
            }
            0xFF44 => self.memory[LY_ADDR] = 0,
            0xFF46 => self.do_oam_dma(value),

            _ => self.memory[addr as usize] = value,
        }
    }
}
