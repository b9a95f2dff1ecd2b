use crate::interrupts::InterruptFlags;

use super::{
    cartridge::Cartridge,
    joypad::Joypad,
    ppu::Ppu,
    serial::{Serial, SC_ADDR, SB_ADDR, TRANSFER_SENTINEL},
    timer::Timer,
    MEMORY_SIZE,
};

mod dma;
mod init;
mod mmio;
mod traits;

pub(crate) struct GameBoyBus {
    pub(crate) memory: [u8; MEMORY_SIZE],
    /// IF (0xFF0F); bits 5-7 read back as 1.
    pub(crate) if_reg: InterruptFlags,
    /// IE (0xFFFF), stored as written.
    pub(crate) ie_reg: u8,
    pub(super) cartridge: Cartridge,
    /// Boot program mapped over 0x0000-0x00FF.
    pub(super) boot_mode: bool,
    /// Set by the boot-disable write; the machine applies the post-boot
    /// reset once the current instruction completes.
    boot_exit_pending: bool,
    pub(super) timer: Timer,
    pub(super) ppu: Ppu,
    pub(super) joypad: Joypad,
    pub(super) serial: Serial,
}

impl GameBoyBus {
    pub(super) fn new(cartridge: Cartridge, boot_mode: bool, serial_echo: bool) -> Self {
        let mut bus = Self {
            memory: [0; MEMORY_SIZE],
            if_reg: InterruptFlags::empty(),
            ie_reg: 0,
            cartridge,
            boot_mode,
            boot_exit_pending: false,
            timer: Timer::new(),
            ppu: Ppu::new(),
            joypad: Joypad::new(),
            serial: Serial::new(serial_echo),
        };
        bus.cartridge.seed_ram(&bus.memory[0xA000..0xC000]);
        bus
    }

    /// Clears and returns the boot hand-off flag.
    pub(super) fn take_boot_exit(&mut self) -> bool {
        std::mem::take(&mut self.boot_exit_pending)
    }

    /// Forward SB to the serial sink when SC holds the transfer sentinel.
    pub(super) fn poll_serial(&mut self) {
        if self.memory[SC_ADDR] == TRANSFER_SENTINEL {
            let byte = self.memory[SB_ADDR];
            self.serial.emit(byte);
            self.memory[SC_ADDR] = 0;
        }
    }

    /// Advance the timer, then the PPU, by `cycles`.
    pub(super) fn tick(&mut self, cycles: u32) {
        self.timer.advance(cycles, &mut self.memory, &mut self.if_reg);
        self.ppu.advance(cycles, &mut self.memory, &mut self.if_reg);
    }

    pub(super) fn request_interrupt(&mut self, flag: InterruptFlags) {
        self.if_reg |= flag;
    }
}
