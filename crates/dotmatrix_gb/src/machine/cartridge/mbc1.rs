#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum BankingMode {
    /// 0x4000-0x5FFF writes select ROM bank bits 5-6; RAM bank pinned to 0.
    Rom,
    /// 0x4000-0x5FFF writes select the RAM bank.
    Ram,
}

/// MBC1 banking registers.
///
/// The ROM bank register is kept composed (low 5 bits plus the two high
/// bits) the way the cartridge exposes it to the bus.
pub(in super::super) struct Mbc1 {
    rom_bank: u8,
    ram_bank: u8,
    ram_enabled: bool,
    mode: BankingMode,
    /// Largest selectable RAM bank, so guest writes cannot index past the
    /// banks actually fitted.
    ram_bank_mask: u8,
}

impl Mbc1 {
    pub(super) fn new(ram_banks: usize) -> Self {
        Self {
            rom_bank: 1,
            ram_bank: 0,
            ram_enabled: false,
            mode: BankingMode::Rom,
            ram_bank_mask: ram_banks.saturating_sub(1).min(0x03) as u8,
        }
    }

    pub(super) fn rom_bank(&self) -> usize {
        self.rom_bank as usize
    }

    pub(super) fn ram_bank(&self) -> usize {
        self.ram_bank as usize
    }

    pub(super) fn ram_enabled(&self) -> bool {
        self.ram_enabled
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => match value & 0x0F {
                0x0A => self.ram_enabled = true,
                0x00 => self.ram_enabled = false,
                _ => {}
            },
            0x2000..=0x3FFF => {
                let mut low = value & 0x1F;
                if low == 0 {
                    low = 1;
                }
                self.rom_bank = (self.rom_bank & 0xE0) | low;
                log::debug!("MBC1 ROM bank -> {}", self.rom_bank);
            }
            0x4000..=0x5FFF => match self.mode {
                BankingMode::Rom => {
                    self.ram_bank = 0;
                    let mut high = (value & 0x03) << 5;
                    if self.rom_bank & 0x1F == 0 {
                        high += 1;
                    }
                    self.rom_bank = (self.rom_bank & 0x1F) | high;
                    log::debug!("MBC1 ROM bank -> {}", self.rom_bank);
                }
                BankingMode::Ram => {
                    self.ram_bank = value & 0x03 & self.ram_bank_mask;
                    self.rom_bank &= 0x1F;
                    log::debug!("MBC1 RAM bank -> {}", self.ram_bank);
                }
            },
            0x6000..=0x7FFF => {
                if value & 0x01 == 0x01 {
                    self.mode = BankingMode::Ram;
                    self.ram_bank = 0;
                } else {
                    self.mode = BankingMode::Rom;
                }
            }
            _ => {}
        }
    }
}
