use crate::interrupts::InterruptFlags;

use super::MEMORY_SIZE;

pub(super) const DIV_ADDR: usize = 0xFF04;
pub(super) const TIMA_ADDR: usize = 0xFF05;
pub(super) const TMA_ADDR: usize = 0xFF06;
pub(super) const TAC_ADDR: usize = 0xFF07;

/// Cycles between DIV increments.
const DIVIDER_PERIOD: u32 = 256;

/// Divider / programmable timer counters.
///
/// The visible registers (DIV, TIMA, TMA, TAC) live in I/O memory; this
/// type only owns the hidden cycle accumulators behind them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(super) struct Timer {
    divider_counter: u32,
    timer_counter: u32,
    /// Cycles per TIMA increment, derived from TAC bits 0-1.
    divisor: u32,
}

impl Timer {
    pub(super) fn new() -> Self {
        Self {
            divider_counter: 0,
            timer_counter: 0,
            divisor: Self::divisor_for(0),
        }
    }

    /// TAC clock select: 00 → 1024, 01 → 16, 10 → 64, 11 → 256 cycles.
    pub(super) fn divisor_for(tac: u8) -> u32 {
        match tac & 0x03 {
            0 => 1024,
            1 => 16,
            2 => 64,
            3 => 256,
            _ => unreachable!("TAC clock select is two bits"),
        }
    }

    #[cfg(test)]
    pub(super) fn divisor(&self) -> u32 {
        self.divisor
    }

    /// Any write to DIV restarts the divider.
    pub(super) fn reset_divider(&mut self) {
        self.divider_counter = 0;
    }

    /// TAC was written; a new clock select restarts the timer counter.
    pub(super) fn write_control(&mut self, tac: u8) {
        let divisor = Self::divisor_for(tac);
        if divisor != self.divisor {
            log::debug!("Timer divisor {} -> {}", self.divisor, divisor);
            self.divisor = divisor;
            self.timer_counter = 0;
        }
    }

    pub(super) fn advance(
        &mut self,
        cycles: u32,
        memory: &mut [u8; MEMORY_SIZE],
        if_reg: &mut InterruptFlags,
    ) {
        self.divider_counter += cycles;
        while self.divider_counter >= DIVIDER_PERIOD {
            self.divider_counter -= DIVIDER_PERIOD;
            memory[DIV_ADDR] = memory[DIV_ADDR].wrapping_add(1);
        }

        if memory[TAC_ADDR] & 0x04 == 0 {
            return;
        }

        self.timer_counter += cycles;
        if self.timer_counter >= self.divisor {
            self.timer_counter = 0;
            let (tima, overflow) = memory[TIMA_ADDR].overflowing_add(1);
            if overflow {
                memory[TIMA_ADDR] = memory[TMA_ADDR];
                *if_reg |= InterruptFlags::TIMER;
            } else {
                memory[TIMA_ADDR] = tima;
            }
        }
    }
}
