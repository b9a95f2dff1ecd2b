use super::super::ppu::DMA_ADDR;
use super::GameBoyBus;

const OAM_BASE: usize = 0xFE00;
const OAM_LEN: u16 = 0xA0;

impl GameBoyBus {
    /// OAM DMA: copy XX00-XX9F into FE00-FE9F in one go.
    pub(super) fn do_oam_dma(&mut self, value: u8) {
        let source = (value as u16) << 8;
        for i in 0..OAM_LEN {
            let byte = self.peek(source.wrapping_add(i));
            self.memory[OAM_BASE + i as usize] = byte;
        }
        self.memory[DMA_ADDR] = value;
    }
}
