mod mbc1;
mod mbc2;

use crate::error::LoadError;

use mbc1::Mbc1;
use mbc2::Mbc2;

pub(super) const ROM_BANK_SIZE: usize = 0x4000;
pub(super) const RAM_BANK_SIZE: usize = 0x2000;
const MAX_ROM_SIZE: usize = 0x20_0000;
const HEADER_END: usize = 0x150;
const TITLE_RANGE: std::ops::Range<usize> = 0x134..0x144;

/// Bank controller family declared by header byte 0x147.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ControllerKind {
    /// 32 KiB ROM, no banking.
    None,
    Mbc1,
    Mbc2,
}

impl ControllerKind {
    pub fn from_header(code: u8) -> Result<Self, LoadError> {
        match code {
            0x00 => Ok(ControllerKind::None),
            0x01..=0x03 => Ok(ControllerKind::Mbc1),
            0x05 | 0x06 => Ok(ControllerKind::Mbc2),
            other => Err(LoadError::UnsupportedController(other)),
        }
    }
}

/// Number of 8 KiB external RAM banks for header byte 0x149.
///
/// Unknown codes fit no RAM.
fn ram_bank_count(code: u8) -> usize {
    match code {
        0x00 => 0,
        0x01 | 0x02 => 1,
        0x03 => 4,
        0x04 => 16,
        other => {
            log::warn!("Unknown RAM size code 0x{:02X}, fitting no external RAM", other);
            0
        }
    }
}

/// Banking state machine, one variant per supported controller.
pub(super) enum BankController {
    None,
    Mbc1(Mbc1),
    Mbc2(Mbc2),
}

impl BankController {
    fn new(kind: ControllerKind, ram_banks: usize) -> Self {
        match kind {
            ControllerKind::None => BankController::None,
            ControllerKind::Mbc1 => BankController::Mbc1(Mbc1::new(ram_banks)),
            ControllerKind::Mbc2 => BankController::Mbc2(Mbc2::new()),
        }
    }

    fn kind(&self) -> ControllerKind {
        match self {
            BankController::None => ControllerKind::None,
            BankController::Mbc1(_) => ControllerKind::Mbc1,
            BankController::Mbc2(_) => ControllerKind::Mbc2,
        }
    }

    /// Handle a CPU write below 0x8000.
    fn on_write(&mut self, addr: u16, value: u8) {
        match self {
            BankController::None => {}
            BankController::Mbc1(m) => m.write(addr, value),
            BankController::Mbc2(m) => m.write(addr, value),
        }
    }

    fn rom_bank(&self) -> usize {
        match self {
            BankController::None => 1,
            BankController::Mbc1(m) => m.rom_bank(),
            BankController::Mbc2(m) => m.rom_bank(),
        }
    }

    fn ram_bank(&self) -> usize {
        match self {
            BankController::None | BankController::Mbc2(_) => 0,
            BankController::Mbc1(m) => m.ram_bank(),
        }
    }

    fn ram_enabled(&self) -> bool {
        match self {
            BankController::None => false,
            BankController::Mbc1(m) => m.ram_enabled(),
            BankController::Mbc2(m) => m.ram_enabled(),
        }
    }

    /// Whether a write to `addr` in 0xA000-0xBFFF reaches RAM.
    fn ram_write_allowed(&self, addr: u16) -> bool {
        match self {
            BankController::Mbc2(m) => m.ram_enabled() && addr < 0xA200,
            other => other.ram_enabled(),
        }
    }
}

/// Immutable ROM image plus the switchable external RAM banks.
pub(super) struct Cartridge {
    rom: Vec<u8>,
    ram_banks: Vec<[u8; RAM_BANK_SIZE]>,
    controller: BankController,
    title: String,
}

impl Cartridge {
    pub(super) fn from_rom(rom: &[u8]) -> Result<Self, LoadError> {
        if rom.is_empty() {
            return Err(LoadError::EmptyRom);
        }
        if rom.len() < HEADER_END {
            return Err(LoadError::HeaderTruncated(rom.len()));
        }
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::RomTooLarge(rom.len()));
        }

        let kind = ControllerKind::from_header(rom[0x147])?;
        let mut ram_banks = ram_bank_count(rom[0x149]);
        if kind == ControllerKind::Mbc2 {
            // The controller carries its own RAM.
            ram_banks = ram_banks.max(1);
        }

        let title: String = rom[TITLE_RANGE]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
            .collect();

        log::info!(
            "Cartridge loaded: title={:?} size={} bytes controller={:?} ram_banks={}",
            title,
            rom.len(),
            kind,
            ram_banks
        );

        Ok(Self {
            rom: rom.to_vec(),
            ram_banks: vec![[0; RAM_BANK_SIZE]; ram_banks],
            controller: BankController::new(kind, ram_banks),
            title,
        })
    }

    pub(super) fn kind(&self) -> ControllerKind {
        self.controller.kind()
    }

    pub(super) fn title(&self) -> &str {
        &self.title
    }

    /// Copy the initial contents of the RAM window into bank 0.
    pub(super) fn seed_ram(&mut self, window: &[u8]) {
        if let Some(bank) = self.ram_banks.first_mut() {
            let len = window.len().min(RAM_BANK_SIZE);
            bank[..len].copy_from_slice(&window[..len]);
        }
    }

    pub(super) fn rom_bank(&self) -> usize {
        self.controller.rom_bank()
    }

    pub(super) fn ram_bank(&self) -> usize {
        self.controller.ram_bank()
    }

    pub(super) fn ram_enabled(&self) -> bool {
        self.controller.ram_enabled()
    }

    /// Read from 0x0000-0x7FFF. Addresses past the end of the image read
    /// as open bus (0xFF).
    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        let index = match addr {
            0x0000..=0x3FFF => addr as usize,
            _ => self.controller.rom_bank() * ROM_BANK_SIZE + (addr as usize & (ROM_BANK_SIZE - 1)),
        };
        self.rom.get(index).copied().unwrap_or(0xFF)
    }

    /// Writes into ROM space only drive the bank controller; the image
    /// itself never changes.
    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        self.controller.on_write(addr, value);
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        if self.ram_banks.is_empty() {
            return 0xFF;
        }
        let offset = (addr as usize - 0xA000) & (RAM_BANK_SIZE - 1);
        self.current_ram_bank()[offset]
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if self.ram_banks.is_empty() {
            log::warn!(
                "Write 0x{:02X} to 0x{:04X} with no external RAM fitted",
                value,
                addr
            );
            return;
        }
        if !self.controller.ram_write_allowed(addr) {
            return;
        }
        let offset = (addr as usize - 0xA000) & (RAM_BANK_SIZE - 1);
        let bank = self.controller.ram_bank();
        self.checked_bank(bank);
        self.ram_banks[bank][offset] = value;
    }

    fn current_ram_bank(&self) -> &[u8; RAM_BANK_SIZE] {
        let bank = self.controller.ram_bank();
        self.checked_bank(bank);
        &self.ram_banks[bank]
    }

    fn checked_bank(&self, bank: usize) {
        if bank >= self.ram_banks.len() {
            panic!(
                "RAM bank {} selected but only {} allocated",
                bank,
                self.ram_banks.len()
            );
        }
    }
}
