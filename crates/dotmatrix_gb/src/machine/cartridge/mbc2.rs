/// MBC2: 4-bit ROM bank register and 512 bytes of built-in RAM.
pub(in super::super) struct Mbc2 {
    rom_bank: u8,
    ram_enabled: bool,
}

impl Mbc2 {
    pub(super) fn new() -> Self {
        Self {
            rom_bank: 1,
            ram_enabled: false,
        }
    }

    pub(super) fn rom_bank(&self) -> usize {
        self.rom_bank as usize
    }

    pub(super) fn ram_enabled(&self) -> bool {
        self.ram_enabled
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            // Address bit 8 must be clear for the RAM gate.
            0x0000..=0x1FFF if addr & 0x0100 == 0 => match value & 0x0F {
                0x0A => self.ram_enabled = true,
                0x00 => self.ram_enabled = false,
                _ => {}
            },
            0x2000..=0x3FFF => {
                self.rom_bank = value & 0x0F;
                log::debug!("MBC2 ROM bank -> {}", self.rom_bank);
            }
            _ => {}
        }
    }
}
