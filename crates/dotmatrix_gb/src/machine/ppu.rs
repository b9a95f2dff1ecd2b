//! Scanline PPU: LCD mode timing, STAT/V-blank requests and line rendering.

mod render;

use dotmatrix_common::Color;

use crate::interrupts::InterruptFlags;
use crate::FRAMEBUFFER_LEN;

use super::MEMORY_SIZE;

pub(super) const LCDC_ADDR: usize = 0xFF40;
pub(super) const STAT_ADDR: usize = 0xFF41;
pub(super) const SCY_ADDR: usize = 0xFF42;
pub(super) const SCX_ADDR: usize = 0xFF43;
pub(super) const LY_ADDR: usize = 0xFF44;
pub(super) const LYC_ADDR: usize = 0xFF45;
pub(super) const DMA_ADDR: usize = 0xFF46;
pub(super) const BGP_ADDR: usize = 0xFF47;
pub(super) const OBP0_ADDR: usize = 0xFF48;
pub(super) const OBP1_ADDR: usize = 0xFF49;
pub(super) const WY_ADDR: usize = 0xFF4A;
pub(super) const WX_ADDR: usize = 0xFF4B;

/// Cycles per scanline.
pub(super) const LINE_CYCLES: i32 = 456;
/// Countdown values at or above this are still in OAM scan (first 80).
const OAM_SCAN_END: i32 = LINE_CYCLES - 80;
/// Countdown values at or above this are in pixel transfer (next 172).
const TRANSFER_END: i32 = OAM_SCAN_END - 172;
pub(super) const VBLANK_LINE: u8 = 144;
const LAST_LINE: u8 = 153;

/// STAT bits the CPU may write (interrupt selects).
pub(super) const STAT_WRITABLE: u8 = 0x78;
const STAT_COINCIDENCE: u8 = 0x04;
const STAT_COINCIDENCE_SELECT: u8 = 0x40;

/// The four DMG shades, lightest first.
pub(super) const SHADES: [Color; 4] = [
    Color::new_rgb(155, 188, 15),
    Color::new_rgb(139, 172, 15),
    Color::new_rgb(48, 98, 48),
    Color::new_rgb(15, 56, 15),
];

/// LCD mode as reported in STAT bits 0-1.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LcdMode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

impl LcdMode {
    pub fn from_stat(stat: u8) -> LcdMode {
        match stat & 0x03 {
            0 => LcdMode::HBlank,
            1 => LcdMode::VBlank,
            2 => LcdMode::OamScan,
            3 => LcdMode::Transfer,
            _ => unreachable!("LCD mode is two bits"),
        }
    }

    /// STAT interrupt select bit for entering this mode. Transfer has none.
    fn stat_select(self) -> Option<u8> {
        match self {
            LcdMode::HBlank => Some(0x08),
            LcdMode::VBlank => Some(0x10),
            LcdMode::OamScan => Some(0x20),
            LcdMode::Transfer => None,
        }
    }
}

pub(super) struct Ppu {
    /// Cycles left until the current scanline ends.
    countdown: i32,
    framebuffer: Vec<u8>,
    /// Palette-resolved background shade of each pixel on the line being
    /// drawn; sprites with the priority flag only show over shade 0.
    line_shades: [u8; crate::SCREEN_WIDTH],
}

impl Ppu {
    pub(super) fn new() -> Self {
        Self {
            countdown: LINE_CYCLES,
            framebuffer: vec![0; FRAMEBUFFER_LEN],
            line_shades: [0; crate::SCREEN_WIDTH],
        }
    }

    /// Restart line timing; the framebuffer keeps its last contents.
    pub(super) fn reset(&mut self) {
        self.countdown = LINE_CYCLES;
    }

    #[inline]
    pub(super) fn framebuffer(&self) -> &[u8] {
        &self.framebuffer
    }

    #[cfg(test)]
    pub(super) fn countdown(&self) -> i32 {
        self.countdown
    }

    pub(super) fn advance(
        &mut self,
        cycles: u32,
        memory: &mut [u8; MEMORY_SIZE],
        if_reg: &mut InterruptFlags,
    ) {
        if memory[LCDC_ADDR] & 0x80 == 0 {
            self.countdown = LINE_CYCLES;
            memory[LY_ADDR] = 0;
            memory[STAT_ADDR] = (memory[STAT_ADDR] & !0x03) | LcdMode::VBlank as u8;
            return;
        }

        self.countdown -= cycles as i32;
        if self.countdown <= 0 {
            self.finish_line(memory, if_reg);
            self.countdown += LINE_CYCLES;
        }

        self.update_status(memory, if_reg);
    }

    /// Draw the line at LY (if visible) and move to the next one.
    fn finish_line(&mut self, memory: &mut [u8; MEMORY_SIZE], if_reg: &mut InterruptFlags) {
        let ly = memory[LY_ADDR];
        if ly < VBLANK_LINE {
            self.render_line(ly, memory);
        }

        let next = match ly.wrapping_add(1) {
            line if line > LAST_LINE => 0,
            line => line,
        };
        memory[LY_ADDR] = next;

        if next == VBLANK_LINE {
            *if_reg |= InterruptFlags::VBLANK;
            log::debug!("PPU: V-blank (LY={}), IF=0x{:02X}", next, if_reg.bits());
        }
    }

    /// Recompute STAT mode and coincidence bits, requesting LCD STAT on a
    /// selected mode entry and on every update while LY == LYC is selected.
    fn update_status(&self, memory: &mut [u8; MEMORY_SIZE], if_reg: &mut InterruptFlags) {
        let ly = memory[LY_ADDR];
        let mut stat = memory[STAT_ADDR];
        let old_mode = LcdMode::from_stat(stat);

        let mode = if ly >= VBLANK_LINE {
            LcdMode::VBlank
        } else if self.countdown >= OAM_SCAN_END {
            LcdMode::OamScan
        } else if self.countdown >= TRANSFER_END {
            LcdMode::Transfer
        } else {
            LcdMode::HBlank
        };
        stat = (stat & !0x03) | mode as u8;

        if mode != old_mode {
            if let Some(select) = mode.stat_select() {
                if stat & select != 0 {
                    *if_reg |= InterruptFlags::LCD_STAT;
                }
            }
        }

        if ly == memory[LYC_ADDR] {
            stat |= STAT_COINCIDENCE;
            if stat & STAT_COINCIDENCE_SELECT != 0 {
                *if_reg |= InterruptFlags::LCD_STAT;
            }
        } else {
            stat &= !STAT_COINCIDENCE;
        }

        memory[STAT_ADDR] = stat;
    }
}
